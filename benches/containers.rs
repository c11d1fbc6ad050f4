use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use entity_collections::{Entity, EntityMap, EntityVec};

static POPULATION: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
struct Agent {
    id: u64,
    score: f64,
}

impl Entity for Agent {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

fn filled_vec() -> EntityVec<Agent> {
    (0..POPULATION)
        .map(|id| Agent {
            id,
            score: id as f64 * 0.5,
        })
        .collect()
}

fn filled_map() -> EntityMap<u64, Agent> {
    let mut map = EntityMap::with_capacity(POPULATION as usize);
    for id in 0..POPULATION {
        map.insert_by_id(Agent {
            id,
            score: id as f64 * 0.5,
        });
    }
    map
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("entity_vec fill", |bencher| {
        bencher.iter_with_large_drop(filled_vec)
    });

    let vec = filled_vec();
    c.bench_function("entity_vec find_by_id (linear scan)", |bencher| {
        bencher.iter(|| vec.find_by_id(black_box(&(POPULATION - 1))))
    });

    c.bench_function("entity_map fill", |bencher| {
        bencher.iter_with_large_drop(filled_map)
    });

    let map = filled_map();
    c.bench_function("entity_map get", |bencher| {
        bencher.iter(|| map.get(black_box(&(POPULATION - 1))))
    });

    c.bench_function("entity_map merge hit", |bencher| {
        bencher.iter_with_large_drop(|| {
            let mut map = filled_map();
            for id in 0..POPULATION {
                map.merge(
                    id,
                    Agent { id, score: 1.0 },
                    |current, incoming| {
                        Some(Agent {
                            id: current.id,
                            score: current.score + incoming.score,
                        })
                    },
                );
            }
            map
        })
    });
}

criterion_group!(container_benches, criterion_benchmark);
criterion_main!(container_benches);

use spark_maps::{Set, SyncMap};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const ROUNDS: usize = 500;

#[test]
fn concurrent_writers_on_disjoint_keys() {
    let _ = env_logger::try_init();
    let map: Arc<SyncMap<(usize, usize), usize>> = Arc::new(SyncMap::new());

    thread::scope(|s| {
        for t in 0..THREADS {
            let map = map.clone();
            s.spawn(move || {
                for i in 0..ROUNDS {
                    map.set((t, i), t * i);
                }
                // drop every odd key this thread wrote
                map.delete((0..ROUNDS).filter(|i| i % 2 == 1).map(|i| (t, i)));
            });
        }
    });

    assert_eq!(map.len(), THREADS * ROUNDS / 2);
    for t in 0..THREADS {
        assert_eq!(map.get(&(t, 2)), t * 2);
        assert!(!map.contains_key(&(t, 3)));
    }
}

#[test]
fn lock_makes_increments_atomic() {
    let _ = env_logger::try_init();
    let counter: Arc<SyncMap<&'static str, u64>> = Arc::new(SyncMap::new());

    thread::scope(|s| {
        for _ in 0..THREADS {
            let counter = counter.clone();
            s.spawn(move || {
                for _ in 0..ROUNDS {
                    counter.lock(|scope| {
                        let n = scope.get("hits").copied().unwrap_or_default();
                        scope.set("hits", n + 1);
                    });
                }
            });
        }
    });

    assert_eq!(counter.get("hits"), (THREADS * ROUNDS) as u64);
}

#[test]
fn readers_never_see_half_applied_lock_sections() {
    let _ = env_logger::try_init();
    // Writers move one unit between two accounts inside `lock`; readers
    // check the total inside `rlock`. A torn view would break the sum.
    let accounts: Arc<SyncMap<&'static str, i64>> =
        Arc::new(SyncMap::from_iter([("left", 1_000), ("right", 1_000)]));

    thread::scope(|s| {
        for w in 0..THREADS / 2 {
            let accounts = accounts.clone();
            s.spawn(move || {
                let (from, to) = if w % 2 == 0 {
                    ("left", "right")
                } else {
                    ("right", "left")
                };
                for _ in 0..ROUNDS {
                    accounts.lock(|scope| {
                        let a = scope.get(from).copied().unwrap_or_default();
                        let b = scope.get(to).copied().unwrap_or_default();
                        scope.set(from, a - 1);
                        scope.set(to, b + 1);
                    });
                }
            });
        }
        for _ in 0..THREADS / 2 {
            let accounts = accounts.clone();
            s.spawn(move || {
                for _ in 0..ROUNDS {
                    let total = accounts.rlock(|scope| scope.values().sum::<i64>());
                    assert_eq!(total, 2_000);
                    assert_eq!(accounts.reduce(0, |acc, _, v| acc + v), 2_000);
                }
            });
        }
    });

    assert_eq!(accounts.values().iter().sum::<i64>(), 2_000);
}

#[test]
fn last_writer_wins_on_shared_key() {
    let _ = env_logger::try_init();
    let map: Arc<SyncMap<u8, usize>> = Arc::new(SyncMap::new());

    thread::scope(|s| {
        for t in 0..THREADS {
            let map = map.clone();
            s.spawn(move || {
                for _ in 0..ROUNDS {
                    map.set(0, t);
                    // A completed set is never torn: any read yields a
                    // value some thread actually wrote.
                    assert!(map.get(&0) < THREADS);
                }
            });
        }
    });

    assert_eq!(map.len(), 1);
    assert!(map.get(&0) < THREADS);
}

#[test]
fn clone_snapshot_is_independent_under_writes() {
    let _ = env_logger::try_init();
    let map: Arc<SyncMap<usize, usize>> = Arc::new(SyncMap::new());
    for i in 0..100 {
        map.set(i, i);
    }

    let snapshot = thread::scope(|s| {
        let writer = map.clone();
        s.spawn(move || {
            for i in 100..200 {
                writer.set(i, i);
            }
        });
        map.as_ref().clone()
    });

    let len = snapshot.len();
    assert!((100..=200).contains(&len));
    snapshot.delete_func(|_, _| true);
    assert!(snapshot.is_empty());
    assert_eq!(map.len(), 200);
}

#[test]
fn set_shared_behind_external_lock() {
    let _ = env_logger::try_init();
    // Set has no locking of its own; callers coordinate.
    let members: Arc<parking_lot::Mutex<Set<usize>>> =
        Arc::new(parking_lot::Mutex::new(Set::new()));

    thread::scope(|s| {
        for t in 0..THREADS {
            let members = members.clone();
            s.spawn(move || {
                for i in 0..ROUNDS {
                    members.lock().insert(i % 50 + t * 50);
                }
            });
        }
    });

    let members = members.lock();
    assert_eq!(members.len(), THREADS * 50);
    let by_bucket: HashMap<usize, usize> = members.iter().fold(HashMap::new(), |mut acc, m| {
        *acc.entry(m / 50).or_default() += 1;
        acc
    });
    assert!(by_bucket.values().all(|&n| n == 50));
}

use spark_maps::{ObservableMap, ObservableOptions, Observer, ObserverFn, equals};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

type Triples = Arc<Mutex<Vec<(u32, u32, u32)>>>;

fn recorder(map: &ObservableMap<u32, u32>) -> Triples {
    let log: Triples = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    map.observe(move |k: &u32, new: &u32, old: &u32| {
        sink.lock().unwrap().push((*k, *new, *old));
    });
    log
}

/// Counts notifications; implemented as a full type rather than a closure.
#[derive(Clone, Default)]
struct Counter(Arc<AtomicUsize>);

impl Counter {
    fn hits(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Observer<u32, u32> for Counter {
    fn observe(&self, _key: &u32, _new: &u32, _old: &u32) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn notifications_chain_under_concurrent_writers() {
    let _ = env_logger::try_init();
    // Each notification's `old` must be the `new` of the one before it:
    // no two writers can interleave between notify and store.
    let map: Arc<ObservableMap<u32, u32>> = Arc::new(ObservableMap::new());
    let log = recorder(&map);

    thread::scope(|s| {
        for t in 1..=8u32 {
            let map = map.clone();
            s.spawn(move || {
                for i in 0..200u32 {
                    map.set(7, t * 1_000 + i);
                }
            });
        }
    });

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 8 * 200);
    assert_eq!(log[0].2, 0);
    for pair in log.windows(2) {
        assert_eq!(pair[1].2, pair[0].1, "old value must equal previous new value");
    }
    assert_eq!(map.get(&7), log.last().unwrap().1);
}

#[test]
fn value_becomes_visible_only_after_observers_finish() {
    let _ = env_logger::try_init();
    let map: Arc<ObservableMap<u32, u32>> = Arc::new(ObservableMap::new());
    let notified = Arc::new(AtomicBool::new(false));

    let flag = notified.clone();
    map.observe(move |_: &u32, new: &u32, _: &u32| {
        if *new == 2 {
            thread::sleep(Duration::from_millis(50));
            flag.store(true, Ordering::SeqCst);
        }
    });
    map.set(1, 1);

    thread::scope(|s| {
        let reader = map.clone();
        let flag = notified.clone();
        s.spawn(move || {
            while reader.get(&1) != 2 {
                thread::yield_now();
            }
            assert!(flag.load(Ordering::SeqCst), "value visible before observer ran");
        });
        map.set(1, 2);
    });
}

#[test]
fn observer_registered_while_writers_run() {
    let _ = env_logger::try_init();
    let map: Arc<ObservableMap<u32, u32>> = Arc::new(ObservableMap::new());
    let counter = Counter::default();

    thread::scope(|s| {
        let writer = map.clone();
        s.spawn(move || {
            for i in 0..1_000 {
                writer.set(i % 10, i);
            }
        });
        map.observe(counter.clone());
    });

    assert_eq!(map.observer_count(), 1);
    assert!(counter.hits() <= 1_000);

    let before = counter.hits();
    map.set(99, 1);
    assert_eq!(counter.hits(), before + 1);
}

#[test]
fn full_and_adapted_observers_mix() {
    let _ = env_logger::try_init();
    let map: ObservableMap<u32, u32> = ObservableMap::new();
    let counter = Counter::default();
    let sum = Arc::new(AtomicUsize::new(0));

    map.observe(counter.clone());
    let total = sum.clone();
    map.observe(ObserverFn::new(move |_: &u32, new: &u32, _: &u32| {
        total.fetch_add(*new as usize, Ordering::SeqCst);
    }));

    map.set(1, 5);
    map.set(2, 7);
    map.delete([1, 2, 3]);

    assert_eq!(counter.hits(), 5);
    assert_eq!(sum.load(Ordering::SeqCst), 12);
}

#[test]
fn absent_delete_policy_both_ways() {
    let _ = env_logger::try_init();

    let reporting: ObservableMap<u32, u32> = ObservableMap::new();
    let log = recorder(&reporting);
    reporting.delete([42]);
    assert_eq!(*log.lock().unwrap(), vec![(42, 0, 0)]);

    let quiet: ObservableMap<u32, u32> = ObservableMap::with_options(ObservableOptions {
        notify_absent_deletes: false,
        ..Default::default()
    });
    let log = recorder(&quiet);
    quiet.delete([42]);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn equality_filter_still_stores() {
    let _ = env_logger::try_init();
    let map: ObservableMap<u32, u32> = ObservableMap::with_options(ObservableOptions {
        equals: Some(equals),
        notify_absent_deletes: true,
    });
    let log = recorder(&map);

    map.set(1, 3);
    map.set(1, 3);
    map.lock(|scope| scope.set(1, 3));

    assert_eq!(*log.lock().unwrap(), vec![(1, 3, 0)]);
    assert_eq!(map.get(&1), 3);
}

#[test]
fn composite_lock_update_notifies_each_step() {
    let _ = env_logger::try_init();
    let map: ObservableMap<u32, u32> = ObservableMap::from_iter([(1, 10), (2, 20)]);
    let log = recorder(&map);

    // swap two values atomically
    map.lock(|scope| {
        let a = scope.get(&1).copied().unwrap_or_default();
        let b = scope.get(&2).copied().unwrap_or_default();
        scope.set(1, b);
        scope.set(2, a);
    });

    assert_eq!(*log.lock().unwrap(), vec![(1, 20, 10), (2, 10, 20)]);
    assert_eq!(map.get(&1), 20);
    assert_eq!(map.get(&2), 10);
}

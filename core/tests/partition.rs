//! Interval partitioner tests.

use vod_workload_core::{
    interval::{partition, partition_into, Partition},
    rng::SimRng,
};

fn assert_covers(p: &Partition, horizon: f64) {
    let b = p.boundaries();
    assert_eq!(b[0], 0.0, "partition must start at 0");
    assert_eq!(*b.last().unwrap(), horizon, "partition must end at the horizon");
    for w in b.windows(2) {
        assert!(w[0] < w[1], "boundaries not strictly ascending: {b:?}");
    }
    let spans: Vec<_> = p.spans().collect();
    for pair in spans.windows(2) {
        assert_eq!(pair[0].1, pair[1].0, "spans not contiguous: {spans:?}");
    }
}

#[test]
fn partitions_cover_horizon_exactly_across_seeds() {
    for seed in 0..200 {
        let mut rng = SimRng::from_seed(seed);
        let p = partition(100.0, &mut rng);
        assert!(
            (2..10).contains(&p.interval_count()),
            "seed {seed}: {} intervals, expected [2, 10)",
            p.interval_count()
        );
        assert_covers(&p, 100.0);
    }
}

#[test]
fn interior_cuts_are_whole_seconds() {
    let mut rng = SimRng::from_seed(3);
    let p = partition(57.5, &mut rng);
    assert_covers(&p, 57.5);
    for &b in &p.boundaries()[1..p.interval_count()] {
        assert_eq!(b.fract(), 0.0, "cut {b} is not a whole second");
        assert!(b >= 1.0 && b < 57.5);
    }
}

#[test]
fn short_horizon_small_counts() {
    // T = 3 admits k in [2, min(10, 4)) = {2, 3}.
    for seed in 0..50 {
        let mut rng = SimRng::from_seed(seed);
        let p = partition(3.0, &mut rng);
        assert!(p.interval_count() == 2 || p.interval_count() == 3, "got {} intervals", p.interval_count());
        assert_covers(&p, 3.0);
    }
}

#[test]
fn minimum_horizon_falls_back_to_single_interval() {
    let mut rng = SimRng::from_seed(42);
    let p = partition(1.0, &mut rng);
    assert_eq!(p, Partition::single(1.0));
    assert_eq!(p.boundaries(), &[0.0, 1.0]);
}

#[test]
fn fractional_horizon_below_two_falls_back() {
    let mut rng = SimRng::from_seed(42);
    let p = partition(0.25, &mut rng);
    assert_eq!(p.boundaries(), &[0.0, 0.25]);
}

#[test]
fn too_many_cuts_requested_falls_back() {
    // Horizon 5 has four interior candidates; nine intervals need eight.
    let mut rng = SimRng::from_seed(1);
    let p = partition_into(5.0, 9, &mut rng);
    assert_eq!(p, Partition::single(5.0));
}

#[test]
fn fallback_consumes_no_randomness() {
    let mut a = SimRng::from_seed(11);
    let mut b = SimRng::from_seed(11);
    let _ = partition(1.0, &mut a);
    assert_eq!(a.next_f64(), b.next_f64());
}

#[test]
fn exact_fit_uses_every_candidate() {
    let mut rng = SimRng::from_seed(5);
    let p = partition_into(5.0, 5, &mut rng);
    assert_eq!(p.boundaries(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

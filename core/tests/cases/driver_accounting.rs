use crate::common::{config, TestHarness};
use csma_core::TickOutcome;

#[test]
fn test_every_tick_is_classified_once() {
    let mut h = TestHarness::new_with_seed(config(12, 6, &[2, 4, 8, 16], 4, 5000), 7);
    let stats = h.sim.run();
    let c = stats.counters;

    assert_eq!(c.ticks, 5000);
    assert_eq!(
        c.utilization_ticks + c.idle_ticks + c.collision_events,
        c.ticks,
        "each tick is busy, idle or a collision"
    );
    assert!(c.collision_events > 0, "twelve stations on small windows must collide");
    assert_eq!(h.net().clock, 5000);
}

#[test]
fn test_invariants_hold_tick_by_tick() {
    let max_retry = 3;
    let mut h = TestHarness::new_with_seed(config(20, 3, &[1, 2, 4], max_retry, 3000), 42);

    let mut started = 0u64;
    let mut participants = 0u64;
    for _ in 0..3000 {
        match h.step() {
            TickOutcome::Transmit(_) => started += 1,
            TickOutcome::Collision(ready) => {
                assert!(ready.len() >= 2);
                participants += ready.len() as u64;
            }
            TickOutcome::Idle | TickOutcome::Busy => {}
        }

        let net = h.net();
        assert_eq!(net.busy, net.active_node.is_some());
        assert!(!net.collision, "collision flag never outlives its tick");
        for s in &net.stations {
            assert!(s.collisions < max_retry, "station {} at {}", s.id, s.collisions);
            assert!(s.backoff.is_some(), "station {} left without a packet", s.id);
        }
    }

    let in_flight = u64::from(h.net().busy);
    let successes: u64 = h.total_success().iter().sum();
    let failures: u64 = h.total_fail().iter().sum();
    assert_eq!(successes, started - in_flight);
    assert_eq!(failures, participants);
}

#[test]
fn test_run_stats_match_station_counters() {
    let mut h = TestHarness::new_with_seed(config(8, 10, &[4, 8, 16, 32], 2, 8000), 3);
    let stats = h.sim.run();

    assert_eq!(stats.successes, h.total_success());
    assert_eq!(stats.failures, h.total_fail());
    let drops: u64 = h.net().stations.iter().map(|s| s.total_drop).sum();
    assert_eq!(stats.total_dropped(), drops);
    assert!(stats.total_dropped() > 0, "two retries on eight stations should drop");
    let summary = stats.summary();
    assert!(summary.utilization_pct > 0.0 && summary.utilization_pct <= 100.0);
    assert!(summary.success_variance >= 0.0);
}

#[test]
fn test_reset_is_idempotent() {
    let mut h = TestHarness::scripted(config(2, 2, &[5], 2, 100), &[0, 3, 4, 4, 1, 4, 1]);
    h.step();
    h.step();
    assert!(h.net().clock > 0);

    h.sim.network.reset();
    let once = h.net().stations.clone();
    let clock_once = h.net().clock;

    // Same draws again, so the second reset must land on the same state.
    h.sim.network.reset();
    assert_eq!(h.net().stations, once);
    assert_eq!(h.net().clock, clock_once);
    assert_eq!(h.net().clock, 0);
    assert!(!h.net().busy);
    assert!(!h.net().collision);
    assert_eq!(h.net().active_node, None);
    assert_eq!(h.total_success(), vec![1, 0], "reset keeps lifetime counters");
    assert_eq!(h.backoffs(), vec![Some(4), Some(1)]);
}

#[test]
fn test_reset_clears_retry_count_but_keeps_totals() {
    // Both collide once with M=3, so each keeps a pending retry count of 1.
    let mut h = TestHarness::scripted(config(2, 1, &[2, 4], 3, 100), &[0, 0, 3, 2, 1, 2]);
    assert_eq!(h.step(), TickOutcome::Collision(vec![0, 1]));
    assert_eq!(h.collisions(), vec![1, 1]);

    h.sim.network.reset();
    assert_eq!(h.collisions(), vec![0, 0], "reset abandons the per-packet retry count");
    assert_eq!(h.total_fail(), vec![1, 1], "reset keeps lifetime counters");
    let drops: Vec<u64> = h.net().stations.iter().map(|s| s.total_drop).collect();
    assert_eq!(drops, vec![0, 0], "a reset is not a drop");
    assert_eq!(h.backoffs(), vec![Some(1), Some(2)]);
    assert_eq!(h.requested_windows(), &[2, 2, 4, 4, 2, 2]);
}

#[test]
fn test_resize_shrinks_and_grows() {
    let mut h = TestHarness::new_with_seed(config(5, 2, &[3, 6], 3, 1000), 11);
    h.sim.run();
    let before: Vec<u64> = h.total_success();

    h.sim.network.resize(3);
    let ids: Vec<u32> = h.net().stations.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(h.total_success(), before[..3].to_vec());
    assert_eq!(h.net().clock, 0);
    assert!(!h.net().busy);

    h.sim.network.resize(6);
    let ids: Vec<u32> = h.net().stations.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(h.total_success()[3..], [0, 0, 0]);
    for s in &h.net().stations {
        assert!(s.backoff.map_or(false, |b| b <= 3), "reseeded from the first window");
    }
}

#[test]
fn test_clear_counters_starts_a_fresh_tally() {
    let mut h = TestHarness::new_with_seed(config(6, 2, &[2, 4], 2, 2000), 5);
    h.sim.run();
    assert!(h.total_fail().iter().sum::<u64>() > 0);

    h.sim.network.resize(4);
    h.sim.network.clear_counters();
    for s in &h.net().stations {
        assert_eq!((s.total_success, s.total_fail, s.total_drop, s.collisions), (0, 0, 0, 0));
    }
}

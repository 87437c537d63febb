//! Properties that hold for any counter range and outcome sequence.

use proptest::prelude::*;

use satpred::*;

fn outcome() -> impl Strategy<Value = Outcome> {
    any::<bool>().prop_map(Outcome::from)
}

fn counter_cfg() -> impl Strategy<Value = SaturatingCounterConfig> {
    (1u8..=15).prop_flat_map(|max| {
        (Just(max), 0..=max).prop_map(|(max, init)| {
            SaturatingCounterConfig { max, init }
        })
    })
}

proptest! {
    #[test]
    fn value_stays_in_range(
        cfg in counter_cfg(),
        outcomes in prop::collection::vec(outcome(), 0..200),
    ) {
        let mut c = cfg.build().unwrap();
        for o in outcomes {
            c.update(o);
            prop_assert!(c.value() <= cfg.max);
        }
    }

    #[test]
    fn repeated_outcome_saturates(cfg in counter_cfg(), o in outcome(), extra in 0usize..8) {
        let mut c = cfg.build().unwrap();
        for _ in 0..(cfg.max as usize + extra) {
            c.update(o);
        }
        let end = if o == Outcome::T { cfg.max } else { 0 };
        prop_assert_eq!(c.value(), end);
        c.update(o);
        prop_assert_eq!(c.value(), end);
        prop_assert_eq!(c.predict(), o);
    }

    #[test]
    fn single_update_is_monotonic(max in 1u8..=15, v in 0u8..=15) {
        let v = v.min(max);
        prop_assert!(update(v, max, Outcome::T) >= v);
        prop_assert!(update(v, max, Outcome::N) <= v);
        prop_assert!(update(v, max, Outcome::T) - v <= 1);
        prop_assert!(v - update(v, max, Outcome::N) <= 1);
    }

    #[test]
    fn label_agrees_with_prediction_at_the_ends(max in 1u8..=15) {
        prop_assert_eq!(state_label(0, max), CounterState::StronglyNotTaken);
        prop_assert_eq!(state_label(max, max) >= CounterState::WeaklyTaken, true);
        prop_assert_eq!(predict(0, max), Outcome::N);
        prop_assert_eq!(predict(max, max), Outcome::T);
    }

    #[test]
    fn simulation_is_deterministic(
        size in 1usize..16,
        init in 0u8..=7,
        outcomes in prop::collection::vec(outcome(), 0..100),
    ) {
        let pattern: Pattern = outcomes.into_iter().collect();
        let mut a = CounterTable::new(size, init).unwrap();
        let mut b = CounterTable::new(size, init).unwrap();
        let ra = Simulation::new(&mut a, &pattern, 0).unwrap().run();
        let rb = Simulation::new(&mut b, &pattern, 0).unwrap().run();
        prop_assert_eq!(ra.trials, rb.trials);
        prop_assert_eq!(ra.stats, rb.stats);
        prop_assert_eq!(a.values(), b.values());
        prop_assert_eq!(ra.stats.total(), pattern.len());
    }

    #[test]
    fn merge_is_order_independent(
        xs in prop::collection::vec(any::<bool>(), 0..50),
        ys in prop::collection::vec(any::<bool>(), 0..50),
        zs in prop::collection::vec(any::<bool>(), 0..50),
    ) {
        let acc = |v: &[bool]| {
            let mut s = AccuracyStats::new();
            v.iter().for_each(|c| s.record(*c));
            s
        };
        let (x, y, z) = (acc(&xs), acc(&ys), acc(&zs));
        prop_assert_eq!((x + y) + z, x + (y + z));
        prop_assert_eq!(x + y, y + x);

        // Recording into a constituent before or after merging
        let mut before = x;
        zs.iter().for_each(|c| before.record(*c));
        let before = before + y;
        let mut after = x + y;
        zs.iter().for_each(|c| after.record(*c));
        prop_assert_eq!(before, after);
    }
}

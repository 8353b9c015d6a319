//! Salary range properties

use proptest::prelude::*;

use scoutlink::shared::scouting::SalaryRange;

proptest! {
    #[test]
    fn ordered_non_negative_ranges_are_valid(a in 0.0f64..1_000_000.0, b in 0.0f64..1_000_000.0) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let range = SalaryRange::new(min, max).unwrap();
        prop_assert!(range.contains(min));
        prop_assert!(range.contains(max));
        prop_assert!(range.contains((min + max) / 2.0));
    }

    #[test]
    fn inverted_ranges_are_rejected(min in 1.0f64..1_000_000.0, gap in 0.01f64..1000.0) {
        prop_assert!(SalaryRange::new(min, min - gap).is_err());
    }

    #[test]
    fn negative_minimum_is_rejected(min in -1_000_000.0f64..-0.01, max in 0.0f64..1000.0) {
        prop_assert!(SalaryRange::new(min, max).is_err());
    }
}

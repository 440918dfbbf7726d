//! Property-based tests for reading positions and percentages

use proptest::prelude::*;

use bookclub::shared::{Percentage, ReadingPosition};

fn position() -> impl Strategy<Value = (i64, i64)> {
    (1i64..=100_000).prop_flat_map(|total| (0..=total, Just(total)))
}

proptest! {
    #[test]
    fn prop_percentage_in_range((page, total) in position()) {
        let pct = ReadingPosition::new(page, total).unwrap().percentage();
        prop_assert!(pct <= Percentage::COMPLETE);
        if page == total {
            prop_assert_eq!(pct, Percentage::COMPLETE);
        }
        if page == 0 {
            prop_assert_eq!(pct, Percentage::ZERO);
        }
    }

    #[test]
    fn prop_percentage_is_nearest_hundredth((page, total) in position()) {
        let pct = ReadingPosition::new(page, total).unwrap().percentage();
        let exact = page as f64 * 100.0 / total as f64;
        prop_assert!((pct.as_f64() - exact).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn prop_more_pages_never_lowers_percentage((page, total) in position()) {
        prop_assume!(page < total);
        let here = ReadingPosition::new(page, total).unwrap().percentage();
        let next = ReadingPosition::new(page + 1, total).unwrap().percentage();
        prop_assert!(here <= next);
    }

    #[test]
    fn prop_page_beyond_total_rejected(total in 1i64..10_000, extra in 1i64..1_000) {
        prop_assert!(ReadingPosition::new(total + extra, total).is_err());
        prop_assert!(ReadingPosition::new(-extra, total).is_err());
    }

    #[test]
    fn prop_stored_value_round_trips(h in 0u32..=10_000) {
        let pct = Percentage::from_hundredths(h).unwrap();
        prop_assert_eq!(Percentage::try_from(i64::from(pct)).unwrap(), pct);
    }
}

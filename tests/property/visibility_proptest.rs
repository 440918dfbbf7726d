//! Property-based tests for the visibility threshold

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use bookclub::shared::{Percentage, ProgressMarked, VisibilityThreshold};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comment {
    id: usize,
    progress: Percentage,
    created_at: DateTime<Utc>,
}

impl ProgressMarked for Comment {
    fn progress(&self) -> Percentage {
        self.progress
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn percentage() -> impl Strategy<Value = Percentage> {
    (0u32..=10_000).prop_map(|h| Percentage::from_hundredths(h).unwrap())
}

/// Comments with clustered progress values so ties are common
fn comments() -> impl Strategy<Value = Vec<Comment>> {
    prop::collection::vec(
        (
            prop_oneof![percentage(), Just(Percentage::ZERO), Just(Percentage::COMPLETE)],
            0i64..1_000,
        ),
        0..40,
    )
    .prop_map(|raw| {
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        raw.into_iter()
            .enumerate()
            .map(|(id, (progress, secs))| Comment {
                id,
                progress,
                created_at: epoch + Duration::seconds(secs),
            })
            .collect()
    })
}

fn ids(items: &[Comment]) -> Vec<usize> {
    let mut ids: Vec<usize> = items.iter().map(|c| c.id).collect();
    ids.sort_unstable();
    ids
}

proptest! {
    #[test]
    fn prop_default_threshold_shows_only_zero(all in comments()) {
        let visible = VisibilityThreshold::for_reader(None).visible(all.clone());

        let expected: Vec<Comment> = all.into_iter().filter(|c| c.progress == Percentage::ZERO).collect();
        prop_assert_eq!(ids(&visible), ids(&expected));
    }

    #[test]
    fn prop_monotonic(all in comments(), a in percentage(), b in percentage()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let seen_low = ids(&VisibilityThreshold::for_reader(Some(low)).visible(all.clone()));
        let seen_high = ids(&VisibilityThreshold::for_reader(Some(high)).visible(all));

        for id in seen_low {
            prop_assert!(seen_high.contains(&id));
        }
    }

    #[test]
    fn prop_visible_and_ahead_partition_everything(all in comments(), reader in percentage()) {
        let threshold = VisibilityThreshold::for_reader(Some(reader));
        let (visible, ahead) = threshold.partition(all.clone());

        prop_assert_eq!(visible.len() + ahead.len(), all.len());
        prop_assert!(visible.iter().all(|c| c.progress <= reader));
        prop_assert!(ahead.iter().all(|c| c.progress > reader));

        let mut union: Vec<usize> = ids(&visible);
        union.extend(ids(&ahead));
        union.sort_unstable();
        prop_assert_eq!(union, ids(&all));
    }

    #[test]
    fn prop_display_order(all in comments(), reader in percentage()) {
        let visible = VisibilityThreshold::for_reader(Some(reader)).visible(all);

        for pair in visible.windows(2) {
            let (x, y) = (&pair[0], &pair[1]);
            prop_assert!(x.progress <= y.progress);
            if x.progress == y.progress {
                prop_assert!(x.created_at <= y.created_at);
                // Full ties keep their original order
                if x.created_at == y.created_at {
                    prop_assert!(x.id < y.id);
                }
            }
        }
    }

    #[test]
    fn prop_check_agrees_with_filter(all in comments(), reader in percentage()) {
        let threshold = VisibilityThreshold::for_reader(Some(reader));
        let visible = ids(&threshold.visible(all.clone()));

        for comment in &all {
            prop_assert_eq!(threshold.check(comment).is_ok(), visible.contains(&comment.id));
        }
    }
}

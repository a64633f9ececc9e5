//! Property tests for the filter/aggregate engine.
//!
//! The filter and the aggregation are the only derived views the dashboard
//! shows, so their laws are pinned over arbitrary record sets rather than
//! hand-picked fixtures.

use boma_core::engine::filter::{self, StatusFilter};
use boma_core::engine::stats;
use boma_core::model::project::{Category, Project, Status};
use proptest::prelude::*;

fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Planned),
        Just(Status::Active),
        Just(Status::Completed),
        Just(Status::OnHold),
    ]
}

fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Infrastructure),
        Just(Category::Education),
        Just(Category::Health),
        Just(Category::WaterSanitation),
        Just(Category::Youth),
        Just(Category::Economic),
    ]
}

prop_compose! {
    fn arb_project()(
        name in "[A-Za-z][A-Za-z ]{0,11}",
        constituency in "[A-Za-z][A-Za-z ]{0,11}",
        budget in 0_u64..10_000_000_000,
        category in arb_category(),
        status in arb_status(),
        progress in 0_u8..=100,
    ) -> Project {
        Project {
            id: String::new(),
            name,
            category,
            constituency,
            budget,
            spent: 0,
            progress,
            status,
            start_us: 0,
            end_us: 0,
            description: None,
        }
    }
}

fn arb_records() -> impl Strategy<Value = Vec<Project>> {
    prop::collection::vec(arb_project(), 0..24)
}

proptest! {
    // Text predicate: with the status filter wide open, the result is exactly
    // the records whose name or constituency contains the search text,
    // case-insensitively.
    #[test]
    fn all_filter_is_exactly_the_text_predicate(
        records in arb_records(),
        search in "[A-Za-z]{0,3}",
    ) {
        let hits = filter::apply(&records, &search, StatusFilter::All);
        let needle = search.to_lowercase();
        let expected: Vec<&Project> = records
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.name.to_lowercase().contains(&needle)
                    || r.constituency.to_lowercase().contains(&needle)
            })
            .collect();
        prop_assert_eq!(hits, expected);
    }

    // Status predicate: with an empty search, the result is exactly the
    // records carrying that status.
    #[test]
    fn status_filter_is_exactly_the_status_predicate(
        records in arb_records(),
        status in arb_status(),
    ) {
        let hits = filter::apply(&records, "", StatusFilter::Only(status));
        let expected: Vec<&Project> =
            records.iter().filter(|r| r.status == status).collect();
        prop_assert_eq!(hits, expected);
    }

    // The empty filter is the identity view.
    #[test]
    fn empty_filter_keeps_every_record(records in arb_records()) {
        let hits = filter::apply(&records, "", StatusFilter::All);
        prop_assert_eq!(hits.len(), records.len());
    }

    // Search is case-insensitive: upper- and lower-cased needles agree.
    #[test]
    fn search_case_does_not_change_the_view(
        records in arb_records(),
        search in "[A-Za-z]{1,3}",
    ) {
        let lower = filter::apply(&records, &search.to_lowercase(), StatusFilter::All);
        let upper = filter::apply(&records, &search.to_uppercase(), StatusFilter::All);
        prop_assert_eq!(lower, upper);
    }

    // Aggregation is the plain sum/count reductions, empty set included.
    #[test]
    fn totals_match_manual_reductions(records in arb_records()) {
        let totals = stats::aggregate(&records);
        let budget: u64 = records.iter().map(|r| r.budget).sum();
        prop_assert_eq!(totals.total_budget, budget);
        prop_assert_eq!(totals.projects, records.len());
        prop_assert_eq!(
            totals.active,
            records.iter().filter(|r| r.status == Status::Active).count()
        );
        prop_assert_eq!(
            totals.completed,
            records.iter().filter(|r| r.status == Status::Completed).count()
        );
    }
}

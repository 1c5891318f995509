use oir_model::{Member, RecordStatus};
use oir_search::{filter, FilterState, Searchable};
use oir_test_utils::member;
use proptest::prelude::*;

fn status() -> impl Strategy<Value = RecordStatus> {
    prop::sample::select(RecordStatus::ALL)
}

fn roster() -> impl Strategy<Value = Vec<Member>> {
    prop::collection::vec(("[A-Za-z ]{0,12}", "EMP[0-9]{3}", status()), 0..24).prop_map(|rows| {
        rows.into_iter()
            .map(|(name, employee_id, status)| {
                let mut m = member("IO-142", &name, &employee_id);
                m.status = status;
                m
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_blank_query_with_all_categories_is_identity(members in roster()) {
        let out = filter(&members, &FilterState::all_enabled());
        prop_assert_eq!(out.len(), members.len());
        for (kept, original) in out.iter().zip(members.iter()) {
            prop_assert_eq!(*kept, original);
        }
    }

    #[test]
    fn prop_every_result_contains_the_query(members in roster(), query in "[a-z]{1,3}") {
        let state = FilterState::all_enabled().with_query(query.as_str());
        for m in filter(&members, &state) {
            let hit = m
                .search_fields()
                .iter()
                .any(|f| f.to_lowercase().contains(&query));
            prop_assert!(hit);
        }
    }

    #[test]
    fn prop_disabling_a_category_removes_exactly_its_items(
        members in roster(),
        removed in status(),
    ) {
        let state = FilterState::all_enabled().with(removed, false);
        let out = filter(&members, &state);

        prop_assert!(out.iter().all(|m| m.status != removed));
        let expected = members.iter().filter(|m| m.status != removed).count();
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn prop_filtering_is_deterministic(members in roster(), query in "[a-zA-Z]{0,2}") {
        let state = FilterState::new().with_query(query.as_str());
        prop_assert_eq!(filter(&members, &state), filter(&members, &state));
    }
}

//! Tests for list-query parameter resolution.

use crate::task::ports::{DEFAULT_LIMIT, SortKey, SortOrder, TaskQuery};
use rstest::rstest;

#[rstest]
#[case("id", SortKey::Id)]
#[case("title", SortKey::Title)]
#[case("description", SortKey::Description)]
#[case("status", SortKey::Status)]
#[case("priority", SortKey::Priority)]
#[case("created_at", SortKey::CreatedAt)]
#[case("updated_at", SortKey::UpdatedAt)]
#[case("due_date", SortKey::DueDate)]
#[case("assigned_to", SortKey::AssignedTo)]
fn sort_key_resolves_known_columns(#[case] name: &str, #[case] expected: SortKey) {
    assert_eq!(SortKey::resolve(name), expected);
}

#[rstest]
#[case("")]
#[case("no_such_column")]
#[case("Title")]
fn sort_key_falls_back_to_created_at_for_unknown_names(#[case] name: &str) {
    assert_eq!(SortKey::resolve(name), SortKey::CreatedAt);
}

#[rstest]
fn sort_order_treats_anything_but_desc_as_ascending() {
    assert_eq!(SortOrder::resolve("desc"), SortOrder::Desc);
    assert_eq!(SortOrder::resolve("asc"), SortOrder::Asc);
    assert_eq!(SortOrder::resolve("DESC"), SortOrder::Asc);
    assert_eq!(SortOrder::resolve("descending"), SortOrder::Asc);
}

#[rstest]
fn query_defaults_match_the_documented_page() {
    let query = TaskQuery::default();
    assert_eq!(query.skip, 0);
    assert_eq!(query.limit, DEFAULT_LIMIT);
    assert_eq!(query.sort_by, SortKey::CreatedAt);
    assert_eq!(query.sort_order, SortOrder::Desc);
    assert!(query.status.is_none());
    assert!(query.search.is_none());
}

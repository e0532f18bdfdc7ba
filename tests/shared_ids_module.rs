use bulkquiz::shared::ids::CategoryId;
use bulkquiz::workflow::{RowStore, WorkflowLimits};

#[test]
fn shared_ids_module_parses_category_identifiers() {
    assert_eq!(CategoryId::parse("math").expect("id").as_str(), "math");
    assert_eq!(
        CategoryId::parse("world-history_2").expect("id").to_string(),
        "world-history_2"
    );

    assert!(CategoryId::parse("").is_err());
    assert!(CategoryId::parse("world history").is_err());
    assert!(CategoryId::parse("math/algebra").is_err());
}

#[test]
fn category_ids_deserialize_with_validation() {
    let id: CategoryId = serde_json::from_str("\"science\"").expect("valid id");
    assert_eq!(id.as_str(), "science");
    assert!(serde_json::from_str::<CategoryId>("\"not valid\"").is_err());
}

#[test]
fn row_ids_render_with_prefix_and_increase() {
    let mut store = RowStore::new(WorkflowLimits::default());
    let first = store.id_at(0).expect("row");
    let second = store.add_row();
    assert!(second.value() > first.value());
    assert_eq!(first.to_string(), format!("row-{}", first.value()));
}

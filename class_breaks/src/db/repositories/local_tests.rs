use serde_json::json;

use super::local::LocalRepository;
use crate::db::repository::{FeatureRepository, RepositoryError};
use crate::models::{FieldPath, FieldType, Predicate, SourceQuery};

fn network() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.create_layer(
        "reservoir",
        vec![
            ("name", FieldType::Text),
            ("volume", FieldType::Float),
            ("coastline", FieldType::Polygon),
        ],
    )
    .unwrap();
    repo.create_layer(
        "pipeline",
        vec![
            ("material", FieldType::Text),
            ("diameter", FieldType::Float),
            ("path", FieldType::LineString),
            ("reservoir", FieldType::ForeignKey("reservoir".to_string())),
        ],
    )
    .unwrap();

    for (x, volume) in [(1, 30.0), (2, 10.0), (3, 20.0)] {
        repo.insert_record(
            "reservoir",
            json!({"id": x, "name": format!("City {}", x), "volume": volume, "coastline": "POLYGON EMPTY"}),
        )
        .unwrap();
        repo.insert_record(
            "pipeline",
            json!({"material": "ceramic", "diameter": 4 - x, "path": "LINESTRING EMPTY", "reservoir": x}),
        )
        .unwrap();
    }
    repo
}

#[test]
fn test_field_type_lookup() {
    let repo = network();
    assert_eq!(
        repo.field_type("pipeline", "path").unwrap(),
        FieldType::LineString
    );
    assert_eq!(repo.field_type("pipeline", "id").unwrap(), FieldType::Integer);

    let err = repo.field_type("pipeline", "geom").unwrap_err();
    assert!(err.is_field_not_found());
    assert!(matches!(
        repo.field_type("hydrant", "geom").unwrap_err(),
        RepositoryError::LayerNotFound(_)
    ));
}

#[test]
fn test_values_are_sorted_ascending() {
    let repo = network();
    let values = repo
        .fetch_ordered_values(
            &SourceQuery::new("reservoir"),
            &FieldPath::parse("volume").unwrap(),
        )
        .unwrap();
    assert_eq!(values, vec![10.0, 20.0, 30.0]);
}

#[test]
fn test_related_field_traversal() {
    let repo = network();
    let values = repo
        .fetch_ordered_values(
            &SourceQuery::new("pipeline"),
            &FieldPath::parse("reservoir__volume").unwrap(),
        )
        .unwrap();
    assert_eq!(values, vec![10.0, 20.0, 30.0]);

    let err = repo
        .fetch_ordered_values(
            &SourceQuery::new("pipeline"),
            &FieldPath::parse("reservoir__depth").unwrap(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::FieldNotFound { ref layer, ref field } if layer == "reservoir" && field == "depth"
    ));
}

#[test]
fn test_traversal_through_non_relation_fails() {
    let repo = network();
    let err = repo
        .fetch_ordered_values(
            &SourceQuery::new("pipeline"),
            &FieldPath::parse("material__volume").unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, RepositoryError::QueryError(_)));
}

#[test]
fn test_dangling_relation_is_not_found() {
    let repo = network();
    repo.insert_record(
        "pipeline",
        json!({"material": "steel", "diameter": 9, "reservoir": 42}),
    )
    .unwrap();

    let err = repo
        .fetch_ordered_values(
            &SourceQuery::new("pipeline").filter(Predicate::exact("material", "steel")),
            &FieldPath::parse("reservoir.volume").unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
}

#[test]
fn test_predicates_select_rows() {
    let repo = network();
    repo.insert_record(
        "reservoir",
        json!({"name": "County 1", "volume": 5.0, "coastline": "POLYGON EMPTY"}),
    )
    .unwrap();

    let cities = SourceQuery::new("reservoir").filter(Predicate::starts_with("name", "City"));
    assert_eq!(repo.count(&cities).unwrap(), 3);
    assert_eq!(repo.count(&SourceQuery::new("reservoir")).unwrap(), 4);

    let unknown = SourceQuery::new("reservoir").filter(Predicate::exact("depth", 1));
    assert!(repo.count(&unknown).unwrap_err().is_field_not_found());
}

#[test]
fn test_non_numeric_value_field_rejected() {
    let repo = network();
    let err = repo
        .fetch_ordered_values(
            &SourceQuery::new("reservoir"),
            &FieldPath::parse("name").unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

#[test]
fn test_insert_validation() {
    let repo = network();
    assert!(repo
        .insert_record("reservoir", json!({"volume": "lots"}))
        .is_err());
    assert!(repo
        .insert_record("reservoir", json!({"depth": 3}))
        .unwrap_err()
        .is_field_not_found());
    assert!(repo.insert_record("reservoir", json!({"id": 1})).is_err());
    assert!(repo.insert_record("reservoir", json!([1, 2])).is_err());
    assert!(repo
        .create_layer("reservoir", Vec::<(&str, FieldType)>::new())
        .is_err());
}

#[test]
fn test_auto_ids_continue_after_explicit_ids() {
    let repo = network();
    let id = repo
        .insert_record("reservoir", json!({"name": "Lake", "volume": 1.0}))
        .unwrap();
    assert_eq!(id, 4);
}

#[test]
fn test_clear_and_list_layers() {
    let repo = network();
    assert_eq!(repo.list_layers().unwrap(), vec!["reservoir", "pipeline"]);
    repo.clear().unwrap();
    assert_eq!(repo.layer_count(), 0);
}

#[test]
fn test_debug_lists_layers() {
    let repo = network();
    let text = format!("{:?}", repo);
    assert!(text.starts_with("LocalRepository"));
    assert!(text.contains("\"pipeline\""));
}

use std::io::Write;
use tempfile::NamedTempFile;

use super::dataset::{load_dataset, load_dataset_str, load_into};
use crate::db::FeatureRepository;
use crate::models::{FieldPath, FieldType, SourceQuery};

const NETWORK: &str = r#"{
    "layers": [
        {
            "name": "pipeline",
            "fields": {
                "diameter": "integer",
                "path": "LineString",
                "reservoir": "foreign_key:reservoir"
            },
            "records": [
                { "diameter": 3, "path": "LINESTRING (0 0, 1 1)", "reservoir": 2 },
                { "diameter": 1, "path": "LINESTRING (0 0, 2 2)", "reservoir": 1 }
            ]
        },
        {
            "name": "reservoir",
            "fields": { "name": "text", "volume": "float" },
            "records": [
                { "id": 1, "name": "City 0", "volume": 10000.0 },
                { "id": 2, "name": "City 1", "volume": 20000.0 }
            ]
        }
    ]
}"#;

#[test]
fn test_load_with_forward_relation() {
    let repo = load_dataset_str(NETWORK).unwrap();
    assert_eq!(repo.list_layers().unwrap(), vec!["pipeline", "reservoir"]);
    assert_eq!(
        repo.field_type("pipeline", "reservoir").unwrap(),
        FieldType::ForeignKey("reservoir".to_string())
    );

    let values = repo
        .fetch_ordered_values(
            &SourceQuery::new("pipeline"),
            &FieldPath::parse("reservoir__volume").unwrap(),
        )
        .unwrap();
    assert_eq!(values, vec![10000.0, 20000.0]);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(NETWORK.as_bytes()).unwrap();
    let repo = load_dataset(file.path()).unwrap();
    assert_eq!(repo.layer_count(), 2);

    let err = load_dataset(std::path::Path::new("/nonexistent/dataset.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read dataset file"));
}

#[test]
fn test_reports_error_path() {
    let json = r#"{ "layers": [ { "name": "a", "fields": { "v": 3 } } ] }"#;
    let err = load_dataset_str(json).unwrap_err();
    assert!(
        err.to_string().contains("layers[0].fields.v"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_rejects_unknown_field_type() {
    let json = r#"{ "layers": [ { "name": "a", "fields": { "v": "complex" } } ] }"#;
    let err = load_dataset_str(json).unwrap_err();
    assert!(err.to_string().contains("field 'v'"));
}

#[test]
fn test_rejects_dangling_relation_target() {
    let json = r#"{ "layers": [ { "name": "a", "fields": { "b": "foreign_key:b" } } ] }"#;
    let err = load_dataset_str(json).unwrap_err();
    assert!(err.to_string().contains("unknown layer 'b'"));
}

#[test]
fn test_rejects_duplicate_layer() {
    let repo = load_dataset_str(NETWORK).unwrap();
    let again = r#"{ "layers": [ { "name": "reservoir", "fields": {} } ] }"#;
    let err = load_into(&repo, again).unwrap_err();
    assert!(err.to_string().contains("Failed to create layer 'reservoir'"));
}

#[test]
fn test_rejects_bad_record() {
    let json = r#"{ "layers": [ { "name": "a", "fields": { "v": "float" },
        "records": [ { "v": 1.0 }, { "v": "high" } ] } ] }"#;
    let err = load_dataset_str(json).unwrap_err();
    assert!(err.to_string().contains("Invalid record 1 in layer 'a'"));
}

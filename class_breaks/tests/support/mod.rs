#![allow(dead_code)]

use serde_json::json;

use class_breaks::db::LocalRepository;
use class_breaks::models::{FieldType, Predicate, SourceQuery};
use class_breaks::sld::{ComparisonOp, StyledLayerDescriptor};

/// Water network with three related layers.
///
/// Five "city" rows per layer (hydrant pressure 1, ceramic pipelines,
/// reservoirs named `City n`) and fifty "county" rows (pressure 2, concrete,
/// `County n`). County hydrant numbers and pipeline diameters run over the
/// squares 0..=2401 and 0..=49; county reservoir volumes are
/// `(n + 1)^2 * 10000`. No layer has a `geom` column.
pub fn water_network() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.create_layer(
        "reservoir",
        vec![
            ("name", FieldType::Text),
            ("volume", FieldType::Float),
            ("coastline", FieldType::Polygon),
        ],
    )
    .expect("create reservoir layer");
    repo.create_layer(
        "pipeline",
        vec![
            ("material", FieldType::Text),
            ("diameter", FieldType::Float),
            ("path", FieldType::LineString),
            ("reservoir", FieldType::ForeignKey("reservoir".to_string())),
        ],
    )
    .expect("create pipeline layer");
    repo.create_layer(
        "hydrant",
        vec![
            ("number", FieldType::Integer),
            ("pressure", FieldType::Integer),
            ("location", FieldType::Point),
            ("pipeline", FieldType::ForeignKey("pipeline".to_string())),
        ],
    )
    .expect("create hydrant layer");

    for x in 0..5i64 {
        add_row(&repo, &format!("City {}", x), (x + 1) * 10000, "ceramic", x, x, 1);
    }
    for y in 0..50i64 {
        add_row(
            &repo,
            &format!("County {}", y),
            (y + 1) * (y + 1) * 10000,
            "concrete",
            y,
            y * y,
            2,
        );
    }
    repo
}

fn add_row(
    repo: &LocalRepository,
    name: &str,
    volume: i64,
    material: &str,
    n: i64,
    number: i64,
    pressure: i64,
) {
    let reservoir = repo
        .insert_record(
            "reservoir",
            json!({
                "name": name,
                "volume": volume as f64,
                "coastline": format!("POLYGON(({n} {n}, {m} {n}, {n} {m}, {n} {n}))", n = n, m = n + 1),
            }),
        )
        .expect("insert reservoir");
    let pipeline = repo
        .insert_record(
            "pipeline",
            json!({
                "material": material,
                "diameter": n as f64,
                "path": format!("LINESTRING({n} {n}, {m} {m})", n = n, m = n + 1),
                "reservoir": reservoir,
            }),
        )
        .expect("insert pipeline");
    repo.insert_record(
        "hydrant",
        json!({
            "number": number,
            "pressure": pressure,
            "location": format!("POINT({n} {n})", n = n),
            "pipeline": pipeline,
        }),
    )
    .expect("insert hydrant");
}

pub fn city_hydrants() -> SourceQuery {
    SourceQuery::new("hydrant").filter(Predicate::exact("pressure", 1))
}

pub fn county_hydrants() -> SourceQuery {
    SourceQuery::new("hydrant").filter(Predicate::exact("pressure", 2))
}

pub fn ceramic_pipelines() -> SourceQuery {
    SourceQuery::new("pipeline").filter(Predicate::exact("material", "ceramic"))
}

pub fn concrete_pipelines() -> SourceQuery {
    SourceQuery::new("pipeline").filter(Predicate::exact("material", "concrete"))
}

pub fn city_reservoirs() -> SourceQuery {
    SourceQuery::new("reservoir").filter(Predicate::starts_with("name", "City"))
}

pub fn county_reservoirs() -> SourceQuery {
    SourceQuery::new("reservoir").filter(Predicate::starts_with("name", "County"))
}

/// Literals of one comparison kind, in rule order.
pub fn literals(sld: &StyledLayerDescriptor, op: ComparisonOp) -> Vec<Option<String>> {
    sld.rules()
        .iter()
        .map(|rule| {
            rule.filter
                .as_ref()
                .and_then(|f| f.find(op))
                .map(|c| c.literal.clone())
        })
        .collect()
}

/// Upper bound literals, in rule order.
pub fn upper_literals(sld: &StyledLayerDescriptor) -> Vec<String> {
    literals(sld, ComparisonOp::PropertyIsLessThanOrEqualTo)
        .into_iter()
        .map(|l| l.unwrap_or_default())
        .collect()
}

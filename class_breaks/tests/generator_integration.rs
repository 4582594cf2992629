//! End-to-end generation over the water network fixture.

mod support;

use class_breaks::db::LocalRepository;
use class_breaks::models::{
    ClassificationRequest, Classifier, FieldPath, FieldType, Predicate, SourceQuery,
};
use class_breaks::services::{
    as_equal_interval, as_fisher_jenks, as_jenks_caspall, as_jenks_caspall_forced,
    as_jenks_caspall_sampled, as_max_p_classifier, as_maximum_breaks, as_natural_breaks,
    as_quantiles, generate,
};
use class_breaks::sld::{ComparisonOp, StyledLayerDescriptor, Symbolizer};
use class_breaks::{GeneratorError, GeneratorResult};

use support::*;

type Builder =
    fn(&LocalRepository, SourceQuery, &str, usize) -> GeneratorResult<StyledLayerDescriptor>;

fn request(
    source: SourceQuery,
    field: &str,
    geofield: &str,
    classifier: Classifier,
) -> ClassificationRequest {
    ClassificationRequest::new(source, FieldPath::parse(field).unwrap(), 5)
        .with_geometry_field(geofield)
        .with_classifier(classifier)
}

fn run(
    repo: &LocalRepository,
    source: SourceQuery,
    field: &str,
    geofield: &str,
    classifier: Classifier,
) -> StyledLayerDescriptor {
    generate(repo, &request(source, field, geofield, classifier)).unwrap()
}

fn symbolizer_counts(sld: &StyledLayerDescriptor) -> (usize, usize, usize) {
    let rules = sld.rules();
    (
        rules
            .iter()
            .filter(|r| matches!(r.symbolizer, Symbolizer::Point(_)))
            .count(),
        rules
            .iter()
            .filter(|r| matches!(r.symbolizer, Symbolizer::Line(_)))
            .count(),
        rules
            .iter()
            .filter(|r| matches!(r.symbolizer, Symbolizer::Polygon(_)))
            .count(),
    )
}

#[test]
fn test_default_geometry_field_is_missing() {
    let repo = water_network();
    for (source, field) in [
        (city_hydrants(), "number"),
        (ceramic_pipelines(), "diameter"),
        (city_reservoirs(), "volume"),
    ] {
        let err = as_equal_interval(&repo, source, field, 5).unwrap_err();
        assert!(err.is_field_not_found(), "unexpected error: {}", err);
    }
}

#[test]
fn test_symbolizer_follows_geometry_type() {
    let repo = water_network();
    let scheme = || Classifier::EqualInterval;

    let sld = run(&repo, city_hydrants(), "number", "location", scheme());
    assert_eq!(symbolizer_counts(&sld), (5, 0, 0));

    let sld = run(&repo, ceramic_pipelines(), "diameter", "path", scheme());
    assert_eq!(symbolizer_counts(&sld), (0, 5, 0));

    let sld = run(&repo, city_reservoirs(), "volume", "coastline", scheme());
    assert_eq!(symbolizer_counts(&sld), (0, 0, 5));
}

#[test]
fn test_equal_interval_literals() {
    let repo = water_network();
    let scheme = || Classifier::EqualInterval;

    let sld = run(&repo, county_hydrants(), "number", "location", scheme());
    assert_eq!(
        upper_literals(&sld),
        ["480.2", "960.4", "1440.6", "1920.8", "2401.0"]
    );

    let sld = run(&repo, concrete_pipelines(), "diameter", "path", scheme());
    assert_eq!(upper_literals(&sld), ["9.8", "19.6", "29.4", "39.2", "49.0"]);

    let sld = run(&repo, county_reservoirs(), "volume", "coastline", scheme());
    assert_eq!(
        upper_literals(&sld),
        ["5008000.0", "10006000.0", "15004000.0", "20002000.0", "25000000.0"]
    );
}

#[test]
fn test_quantile_literals() {
    let repo = water_network();
    let scheme = || Classifier::Quantiles;

    let sld = run(&repo, county_hydrants(), "number", "location", scheme());
    assert_eq!(
        upper_literals(&sld),
        ["96.2", "384.4", "864.6", "1536.8", "2401.0"]
    );

    let sld = run(&repo, concrete_pipelines(), "diameter", "path", scheme());
    assert_eq!(upper_literals(&sld), ["9.8", "19.6", "29.4", "39.2", "49.0"]);

    let sld = run(&repo, county_reservoirs(), "volume", "coastline", scheme());
    assert_eq!(
        upper_literals(&sld),
        ["1168000.0", "4246000.0", "9244000.0", "16162000.0", "25000000.0"]
    );
}

#[test]
fn test_jenks_caspall_literals() {
    let repo = water_network();
    let scheme = || Classifier::JenksCaspall;

    let sld = run(&repo, county_hydrants(), "number", "location", scheme());
    assert_eq!(
        upper_literals(&sld),
        ["169.0", "484.0", "961.0", "1600.0", "2401.0"]
    );

    let sld = run(&repo, concrete_pipelines(), "diameter", "path", scheme());
    assert_eq!(upper_literals(&sld), ["9.0", "19.0", "29.0", "39.0", "49.0"]);

    let sld = run(&repo, county_reservoirs(), "volume", "coastline", scheme());
    assert_eq!(
        upper_literals(&sld),
        ["1690000.0", "5290000.0", "10240000.0", "16810000.0", "25000000.0"]
    );
}

#[test]
fn test_jenks_caspall_forced_literals() {
    let repo = water_network();
    let scheme = || Classifier::JenksCaspallForced;

    let sld = run(&repo, county_hydrants(), "number", "location", scheme());
    assert_eq!(
        upper_literals(&sld),
        ["289.0", "729.0", "1225.0", "1764.0", "2401.0"]
    );

    let sld = run(&repo, concrete_pipelines(), "diameter", "path", scheme());
    assert_eq!(upper_literals(&sld), ["9.0", "19.0", "29.0", "39.0", "49.0"]);

    let sld = run(&repo, county_reservoirs(), "volume", "coastline", scheme());
    assert_eq!(
        upper_literals(&sld),
        ["3240000.0", "7840000.0", "12960000.0", "18490000.0", "25000000.0"]
    );
}

#[test]
fn test_maximum_breaks_collapses_classes() {
    let repo = water_network();
    let scheme = Classifier::maximum_breaks;

    let sld = run(&repo, city_hydrants(), "number", "location", scheme());
    assert_eq!(sld.rules().len(), 2);

    let sld = run(&repo, concrete_pipelines(), "diameter", "path", scheme());
    assert_eq!(upper_literals(&sld), ["0.5", "49.0"]);

    let sld = run(&repo, county_hydrants(), "number", "location", scheme());
    assert_eq!(
        upper_literals(&sld),
        ["2070.5", "2162.5", "2256.5", "2352.5", "2401.0"]
    );

    let sld = run(&repo, county_reservoirs(), "volume", "coastline", scheme());
    assert_eq!(
        upper_literals(&sld),
        ["21625000.0", "22565000.0", "23525000.0", "24505000.0", "25000000.0"]
    );
}

#[test]
fn test_five_values_give_five_classes() {
    let repo = water_network();
    for classifier in [
        Classifier::EqualInterval,
        Classifier::Quantiles,
        Classifier::FisherJenks,
        Classifier::JenksCaspall,
        Classifier::JenksCaspallForced,
        Classifier::natural_breaks(),
        Classifier::max_p(),
    ] {
        let name = classifier.name();
        let sld = run(&repo, city_hydrants(), "number", "location", classifier);
        assert_eq!(sld.rules().len(), 5, "{}", name);

        let lower = literals(&sld, ComparisonOp::PropertyIsGreaterThan);
        assert_eq!(lower[0], None, "{}", name);
        assert!(lower[1..].iter().all(Option::is_some), "{}", name);
    }
}

#[test]
fn test_randomised_schemes_run_on_the_network() {
    let repo = water_network();

    let sld = as_natural_breaks(&repo, county_hydrants(), "pipeline__diameter", 5);
    assert!(sld.unwrap_err().is_field_not_found());

    let geo = |classifier| run(&repo, county_hydrants(), "number", "location", classifier);
    for classifier in [
        Classifier::jenks_caspall_sampled(),
        Classifier::natural_breaks(),
        Classifier::max_p(),
        Classifier::FisherJenks,
    ] {
        let sld = geo(classifier.clone());
        let upper = upper_literals(&sld);
        assert!(!upper.is_empty() && upper.len() <= 5, "{}", classifier);
        assert_eq!(
            upper.last().map(String::as_str),
            Some("2401.0"),
            "{}",
            classifier
        );
    }

    assert_eq!(geo(Classifier::max_p()), geo(Classifier::max_p()));
}

#[test]
fn test_convenience_entry_points_use_default_geometry_field() {
    let repo = water_network();
    repo.create_layer(
        "parcel",
        vec![
            ("area", FieldType::Float),
            ("geom", FieldType::MultiPolygon),
        ],
    )
    .unwrap();
    for area in [5.0, 1.0, 9.0, 3.0, 7.0] {
        repo.insert_record("parcel", serde_json::json!({ "area": area }))
            .unwrap();
    }

    let parcels = || SourceQuery::new("parcel");
    let builders: [Builder; 9] = [
        as_equal_interval,
        as_quantiles,
        as_fisher_jenks,
        as_jenks_caspall,
        as_jenks_caspall_forced,
        as_jenks_caspall_sampled,
        as_maximum_breaks,
        as_natural_breaks,
        as_max_p_classifier,
    ];
    for build in builders {
        let sld = build(&repo, parcels(), "area", 5).unwrap();
        assert!(!sld.rules().is_empty());
        assert!(matches!(sld.rules()[0].symbolizer, Symbolizer::Polygon(_)));
    }
}

#[test]
fn test_related_fields() {
    let repo = water_network();
    let scheme = || Classifier::Quantiles;

    let sld = run(&repo, ceramic_pipelines(), "reservoir__volume", "path", scheme());
    assert_eq!(sld.rules().len(), 5);

    let sld = run(&repo, city_hydrants(), "pipeline__diameter", "location", scheme());
    assert_eq!(sld.rules().len(), 5);

    let field = "pipeline__reservoir__volume";
    let sld = run(&repo, city_hydrants(), field, "location", scheme());
    assert_eq!(sld.rules().len(), 5);
    assert_eq!(
        sld.named_layer().unwrap().name,
        "5 breaks on \"pipeline__reservoir__volume\" as Quantiles"
    );
    assert_eq!(
        upper_literals(&sld),
        ["18000.0", "26000.0", "34000.0", "42000.0", "50000.0"]
    );
    let criterion = sld.rules()[1].filter.as_ref().unwrap().criteria()[0].clone();
    assert_eq!(criterion.property_name, "pipeline__reservoir__volume");

    let sld = generate(
        &repo,
        &request(city_hydrants(), "pipeline.reservoir.volume", "location", scheme())
            .with_property_name("reservoir_volume"),
    )
    .unwrap();
    let names: Vec<_> = sld.rules()[2]
        .filter
        .as_ref()
        .unwrap()
        .criteria()
        .into_iter()
        .map(|c| c.property_name.clone())
        .collect();
    assert_eq!(names, ["reservoir_volume", "reservoir_volume"]);
}

#[test]
fn test_empty_source_yields_no_rules() {
    let repo = water_network();
    let nobody = SourceQuery::new("hydrant").filter(Predicate::exact("pressure", 3));
    let sld = run(&repo, nobody, "number", "location", Classifier::FisherJenks);
    assert!(sld.rules().is_empty());
    assert!(sld.is_normalized());
    assert!(sld.to_xml().contains("<sld:FeatureTypeStyle>"));
}

#[test]
fn test_invalid_requests() {
    let repo = water_network();

    let err = generate(
        &repo,
        &ClassificationRequest::new(city_hydrants(), FieldPath::parse("number").unwrap(), 0)
            .with_geometry_field("location"),
    )
    .unwrap_err();
    assert!(matches!(err, GeneratorError::InvalidRequest(_)));

    let sampled = Classifier::JenksCaspallSampled { pct: 0.0, seed: 0 };
    let err = generate(
        &repo,
        &request(city_hydrants(), "number", "location", sampled),
    )
    .unwrap_err();
    assert!(matches!(err, GeneratorError::Classification(_)));

    let err = generate(
        &repo,
        &request(city_hydrants(), "pipeline__material", "location", Classifier::Quantiles),
    )
    .unwrap_err();
    assert!(matches!(err, GeneratorError::Repository(_)));
}

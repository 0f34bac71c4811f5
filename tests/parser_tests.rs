/// Spec parsing integration tests against a fixture catalog.

use scene_forge::core::catalog::Catalog;
use scene_forge::core::parser::{SpecError, SpecParser};
use scene_forge::schema::request::{DistributionMode, Sizing};

fn fixture_catalog() -> Catalog {
    Catalog::load_from_ron(std::path::Path::new("tests/fixtures/test_catalog.ron")).unwrap()
}

#[test]
fn wildcards_follow_fixture_order() {
    let catalog = fixture_catalog();
    let req = SpecParser::new(&catalog).parse("2|ALL|RANDOM|RANDOM").unwrap();
    assert_eq!(req.characters.names, vec!["Orange", "Pigeon", "Stick", "Fish"]);
    assert_eq!(req.characters.mode, DistributionMode::Together);
    assert_eq!(req.actions, vec!["dancing", "swimming"]);
    assert_eq!(req.locations, vec!["garden", "mountain"]);
}

#[test]
fn sized_segment_with_spaces() {
    let catalog = fixture_catalog();
    let req = SpecParser::new(&catalog)
        .parse("  3 | [1-2]Stick, Fish |dancing|garden ")
        .unwrap();
    assert_eq!(req.scene_count, 3);
    assert_eq!(req.characters.mode, DistributionMode::Separate);
    assert_eq!(req.characters.sizing, Sizing::Range { min: 1, max: 2 });
    assert_eq!(req.characters.names, vec!["Stick", "Fish"]);
    assert_eq!(req.locations, vec!["garden"]);
}

#[test]
fn names_outside_catalog_are_kept() {
    let catalog = fixture_catalog();
    let req = SpecParser::new(&catalog)
        .parse("1|Dragon+Orange|breathing fire|volcano")
        .unwrap();
    assert_eq!(req.characters.names, vec!["Dragon", "Orange"]);
    assert_eq!(req.actions, vec!["breathing fire"]);
    assert_eq!(req.locations, vec!["volcano"]);
}

#[test]
fn malformed_inputs() {
    let catalog = fixture_catalog();
    let parser = SpecParser::new(&catalog);

    for spec in ["", "Orange", "1|2|3", "1|a|b|c|d"] {
        let err = parser.parse(spec).unwrap_err();
        assert!(
            matches!(err, SpecError::SegmentCount(_)),
            "{:?} should fail on segment count",
            spec
        );
    }

    for spec in ["abc|Orange|dancing|garden", "1.5|Orange|dancing|garden", "|Orange|dancing|garden"] {
        let err = parser.parse(spec).unwrap_err();
        assert!(err.is_malformed());
        assert!(matches!(err, SpecError::InvalidCount(_)));
    }
}

//! End-to-end resolution: file names in, variant choice and output naming out,
//! with the variant pool loaded from JSON the way the CLI does it.

mod common;

use densify::config::ninepatch;
use densify::qualifier::{parse, serialize};
use densify::{DensityBucket, OutputCategory, ResourceDescriptor, VariantPool};

const POOL: &str = r#"[
    { "name": "panel" },
    { "name": "panel_land", "pattern": "panel", "qualifiers": "land" },
    { "name": "panel_land_night", "pattern": "panel", "qualifiers": "land-night" },
    { "name": "panel_v21", "pattern": "panel", "qualifiers": "v21" },
    { "name": "any_button", "pattern": "btn_\\w+", "stretch": { "x": [[3, 4]] } }
]"#;

fn pool() -> VariantPool {
    VariantPool::from_records(&ninepatch::load_from_str(POOL).unwrap()).unwrap()
}

fn resolve(pool: &VariantPool, file: &str) -> Option<String> {
    let res = ResourceDescriptor::from_path(file).unwrap();
    pool.best_match_for(&res).map(|v| v.name().to_string())
}

#[test]
fn picks_most_specific_variant() {
    let pool = pool();
    assert_eq!(resolve(&pool, "panel-mdpi.png").as_deref(), Some("panel"));
    assert_eq!(resolve(&pool, "panel-land-mdpi.png").as_deref(), Some("panel_land"));
    assert_eq!(
        resolve(&pool, "panel-night-land-xhdpi.png").as_deref(),
        Some("panel_land_night")
    );
    assert_eq!(resolve(&pool, "panel-v21-hdpi.png").as_deref(), Some("panel_v21"));
}

#[test]
fn incomparable_candidates_keep_the_first_qualifying_one() {
    // land and v21 both qualify; neither covers the other
    let pool = pool();
    assert_eq!(resolve(&pool, "panel-land-v21-hdpi.png").as_deref(), Some("panel_land"));
}

#[test]
fn superset_is_never_beaten_by_subset() {
    let pool = pool();
    let res = ResourceDescriptor::from_path("panel-land-night-v21-hdpi.png").unwrap();
    let chosen = pool.best_match_for(&res).unwrap();
    for candidate in pool.candidates(res.name()) {
        let strictly_more_specific = candidate.qualifiers().covers_dimensions_of(chosen.qualifiers())
            && candidate.qualifiers().len() > chosen.qualifiers().len()
            && res.attributes().agrees_with(candidate.qualifiers());
        assert!(!strictly_more_specific, "{} beats {}", candidate.name(), chosen.name());
    }
}

#[test]
fn patterns_match_whole_names_only() {
    let pool = pool();
    assert_eq!(resolve(&pool, "btn_ok-mdpi.png").as_deref(), Some("any_button"));
    assert_eq!(resolve(&pool, "panels-mdpi.png"), None);
    assert_eq!(resolve(&pool, "my_panel-mdpi.png"), None);
}

#[test]
fn output_naming_follows_target_density() {
    let res = ResourceDescriptor::from_path("art/btn_ok-port-night-v21-w32mdpi.png").unwrap();
    assert_eq!(
        res.output_dir(OutputCategory::Drawable, DensityBucket::Xxhdpi),
        "drawable-port-night-xxhdpi-v21"
    );
    assert_eq!(res.fallback_dir(OutputCategory::Mipmap), "mipmap-port-night-v21");
    assert_eq!(res.output_file(true), "btn_ok.9.png");
}

#[test]
fn serialize_is_stable_under_reparse() {
    for s in [
        "-en-rUS-mcc310-mnc004-xxhdpi-land",
        "-v21-night-port-sw600dp",
        "-unknown-land-also_unknown-hdpi",
    ] {
        let once = parse(s);
        assert_eq!(parse(&serialize(&once)), once, "input {}", s);
    }
}

#[test]
fn bad_pool_definitions_abort_loading() {
    let inverted = r#"[{ "name": "x", "stretch": { "y": [[5, 1]] } }]"#;
    let err = VariantPool::from_records(&ninepatch::load_from_str(inverted).unwrap()).unwrap_err();
    assert!(densify::error::classify::aborts_batch(&err));

    let bad_regex = r#"[{ "name": "x", "pattern": "([" }]"#;
    let err = VariantPool::from_records(&ninepatch::load_from_str(bad_regex).unwrap()).unwrap_err();
    assert_eq!(err.category(), "invalid_pattern");

    let dir = tempfile::tempdir().unwrap();
    let path = common::write_ninepatch_config(dir.path(), "{ not json");
    assert!(VariantPool::from_path(path).is_err());
}

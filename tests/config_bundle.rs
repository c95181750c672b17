use lanyard_engine::config::{BadgeConfig, ConfigError};
use lanyard_engine::BadgeCore;

const TUNED: &str = r##"{
    "maxSpeed": 30,
    "minSpeed": 5,
    "debug": true,
    "ribbonRotationOffset": { "x": 0.1, "y": 0.12, "z": 0.0 },
    "rotation": { "x": 0.0, "y": 0.1, "z": 0.0 },
    "stabilize": true,
    "bandMaterialProps": { "bandColor": "#336699", "bandRoughness": 0.4 },
    "bandGeometryProps": { "bandWidth": 0.3, "bandThickness": 0.05, "textureRepeats": 6 },
    "showGlitter": true
}"##;

#[test]
fn tuned_config_loads_and_runs() {
    let mut core = BadgeCore::from_config_json(TUNED).expect("valid config");
    assert!(core.config().debug);
    assert_eq!(core.config().band_geometry_props.texture_repeats, 6.0);
    assert!(core.background().is_visible());
    for _ in 0..60 {
        core.tick();
    }
    assert!(core.ribbon().unwrap().is_finite());
}

#[test]
fn config_json_round_trips_through_the_core() {
    let core = BadgeCore::from_config_json(TUNED).unwrap();
    let again = BadgeConfig::from_json(&core.config_json()).unwrap();
    assert_eq!(&again, core.config());
}

#[test]
fn out_of_range_values_are_clamped() {
    let core = BadgeCore::from_config_json(r#"{"bandGeometryProps":{"bandWidth":9.0},"maxSpeed":-3}"#).unwrap();
    assert_eq!(core.config().band_geometry_props.band_width, 1.0);
    assert_eq!(core.config().max_speed, 5.0);
}

#[test]
fn malformed_input_is_an_error() {
    assert!(matches!(BadgeCore::from_config_json("[1, 2"), Err(ConfigError::Json(_))));
    assert!(matches!(
        BadgeCore::from_config_json(r##"{"bandMaterialProps":{"bandColor":"#12"}}"##),
        Err(ConfigError::Color(_))
    ));
}

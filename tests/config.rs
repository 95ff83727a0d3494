use std::time::Duration;

use liveheat::{
    preset_named, preset_names, register_preset, ConfigError, FadePolicy, GridSpec,
    HeatmapConfig, Normalization, RadiusProfile, Smoothing,
};

#[test]
fn built_in_presets_validate() {
    for name in ["classic", "ember", "fixed-scale"] {
        let config = preset_named(name).expect("built-in preset must exist");
        config.validate().expect("built-in preset must validate");
    }
}

#[test]
fn unknown_preset_is_none() {
    assert!(preset_named("no-such-preset").is_none());
}

#[test]
fn registered_presets_can_be_looked_up() {
    let mut custom = HeatmapConfig::classic();
    custom.grid = GridSpec::new(8, 8);
    register_preset("test-custom", custom.clone());

    assert_eq!(preset_named("test-custom"), Some(custom));
    assert!(preset_names().iter().any(|n| n == "test-custom"));
    assert!(preset_names().iter().any(|n| n == "classic"));
}

#[test]
fn rejects_empty_grid() {
    let mut config = HeatmapConfig::classic();
    config.grid = GridSpec::new(0, 64);
    assert!(matches!(config.validate(), Err(ConfigError::EmptyGrid { .. })));
}

#[test]
fn rejects_out_of_range_coefficients() {
    let mut config = HeatmapConfig::classic();
    config.smoothing = Smoothing { alpha_value: 0.0, ..Smoothing::default() };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::CoefficientOutOfRange { name: "alpha_value", .. })
    ));

    config.smoothing = Smoothing { alpha_radius: 1.5, ..Smoothing::default() };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::CoefficientOutOfRange { name: "alpha_radius", .. })
    ));
}

#[test]
fn rejects_degenerate_decay() {
    let mut config = HeatmapConfig::classic();
    config.fade = FadePolicy::Decay(1.0);
    assert!(matches!(config.validate(), Err(ConfigError::DecayOutOfRange(_))));
}

#[test]
fn rejects_disordered_radius_profile() {
    let mut config = HeatmapConfig::classic();
    config.radius = RadiusProfile { min: 5.0, mid: 2.0, max: 7.5 };
    assert!(matches!(config.validate(), Err(ConfigError::RadiusProfile { .. })));
}

#[test]
fn rejects_non_positive_normalization() {
    let mut config = HeatmapConfig::classic();
    config.normalization = Normalization::Fixed(0.0);
    assert!(matches!(config.validate(), Err(ConfigError::NonPositive { .. })));

    config.normalization = Normalization::DynamicMax { divisor: -1.0 };
    assert!(matches!(config.validate(), Err(ConfigError::NonPositive { .. })));
}

#[test]
fn rejects_zero_poll_interval() {
    let mut config = HeatmapConfig::classic();
    config.poll_interval = Duration::ZERO;
    assert!(matches!(config.validate(), Err(ConfigError::ZeroPollInterval)));
}

#[test]
fn denominator_resolution() {
    assert_eq!(Normalization::Fixed(20.0).denominator(123.0), 20.0);
    assert_eq!(
        Normalization::DynamicMax { divisor: 10.0 }.denominator(50.0),
        5.0
    );
    assert_eq!(
        Normalization::DynamicMax { divisor: 10.0 }.denominator(0.0),
        1.0,
        "an empty field must fall back to a unit denominator"
    );
}

#[test]
fn json_round_trip_preserves_config() {
    let config = HeatmapConfig::ember();
    let json = config.to_json_string().expect("serialization must succeed");
    let restored = HeatmapConfig::from_json_str(&json).expect("round-trip must parse");
    assert_eq!(restored, config);
}

#[test]
fn json_with_bad_coefficients_is_rejected() {
    let mut config = HeatmapConfig::classic();
    config.smoothing.alpha_value = 2.0;
    // Serialization itself has no opinion; validation at parse time does.
    let json = config.to_json_string().expect("serialization must succeed");
    assert!(matches!(
        HeatmapConfig::from_json_str(&json),
        Err(ConfigError::CoefficientOutOfRange { .. })
    ));
}

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(
        HeatmapConfig::from_json_str("{ not json"),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn pointer_position_maps_back_to_cells() {
    let config = HeatmapConfig::classic(); // spacing 16x16
    let scale = 0.5;

    // Cell (8, 3) renders at (8*16*0.5, 3*16*0.5) = (64, 24).
    assert_eq!(config.cell_at(64.0, 24.0, scale), Some((8, 3)));
    // Slightly off-center still snaps to the nearest cell.
    assert_eq!(config.cell_at(66.0, 22.0, scale), Some((8, 3)));

    // Outside the lattice on either side.
    assert_eq!(config.cell_at(-20.0, 24.0, scale), None);
    let beyond = config.grid.width as f64 * 16.0 * scale + 32.0;
    assert_eq!(config.cell_at(beyond, 24.0, scale), None);

    // A degenerate scale cannot be inverted.
    assert_eq!(config.cell_at(64.0, 24.0, 0.0), None);
}

#[test]
fn grid_indexing_is_row_major() {
    let grid = GridSpec::new(120, 64);
    assert_eq!(grid.cells(), 7680);
    assert_eq!(grid.index(0, 0), 0);
    assert_eq!(grid.index(119, 0), 119);
    assert_eq!(grid.index(0, 1), 120);
    assert_eq!(grid.index(5, 3), 365);
}

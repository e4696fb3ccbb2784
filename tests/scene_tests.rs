//! Integration tests for presets, scene configs and the string oscillator.

use rand::SeedableRng;
use warpfield::{
    ConfigError, FieldEvaluator, FieldVariant, GridError, Preset, Scene, SceneConfig,
    StringConfig, StringSet, TimeWrap,
};

// ============================================================================
// Presets and Configs
// ============================================================================

#[test]
fn test_every_preset_builds_a_scene() {
    for preset in Preset::ALL {
        let mut config = SceneConfig::from_preset(preset);
        // Keep the grids small; only wiring is under test here
        config.grid_size = Some(8);
        config.seed = Some(17);
        let mut scene = Scene::from_config(&config).unwrap();
        assert_eq!(scene.vectors().grid().len(), 64);
        assert_eq!(scene.strings().is_some(), preset.has_strings());

        scene.step(1.0 / 60.0);
        assert!(scene.vectors().positions().iter().all(|v| v.is_finite()), "{}", preset);
    }
}

#[test]
fn test_config_json_round_trip_through_disk() {
    let json = r#"{
        "preset": "stretched-mass-time",
        "grid_size": 40,
        "speed": 0.5,
        "seed": 3,
        "background": [0.1, 0.1, 0.2]
    }"#;
    let config = SceneConfig::from_json(json).unwrap();
    assert_eq!(config.preset, Preset::StretchedMassTime);
    assert_eq!(config.grid_size(), 40);
    assert_eq!(config.grid_range(), 10.0);

    let path = std::env::temp_dir().join(format!("warpfield-scene-{}.json", std::process::id()));
    config.save(&path).unwrap();
    let loaded = SceneConfig::from_arg(path.to_str().unwrap()).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, config);
}

#[test]
fn test_unknown_preset_argument() {
    let err = SceneConfig::from_arg("tachyon").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownPreset(ref name) if name == "tachyon"));
    assert!(err.to_string().contains("tachyon"));
}

#[test]
fn test_oversized_grid_from_json_is_rejected() {
    let config = SceneConfig::from_json(r#"{ "preset": "warp", "grid_size": 50000 }"#).unwrap();
    assert!(matches!(
        Scene::from_config(&config),
        Err(GridError::InvalidSize(50000))
    ));
}

#[test]
fn test_preset_time_wraps() {
    assert_eq!(Preset::Warp.field().time_wrap(), TimeWrap::UNIT);
    assert_eq!(Preset::TurbulentWarp.field().time_wrap(), TimeWrap::Periodic(5.0));
    assert_eq!(Preset::PBrane.field().time_wrap(), TimeWrap::DECADE);
    assert_eq!(Preset::OpenClosedStrings.field().time_wrap(), TimeWrap::Unbounded);
}

// ============================================================================
// Scene Ticks
// ============================================================================

#[test]
fn test_scene_tick_matches_wrapped_update() {
    let mut config = SceneConfig::from_preset(Preset::EinsteinRosen);
    config.grid_size = Some(10);
    let mut a = Scene::from_config(&config).unwrap();
    let mut b = Scene::from_config(&config).unwrap();

    a.tick(2.0);
    b.tick(12.0);
    let pa = a.vectors().positions();
    let pb = b.vectors().positions();
    for (x, y) in pa.iter().zip(pb) {
        assert!((x - y).abs() < 1e-3);
    }
}

#[test]
fn test_einstein_rosen_scene_starts_flat() {
    let mut config = SceneConfig::from_preset(Preset::EinsteinRosen);
    config.grid_size = Some(21);
    let mut scene = Scene::from_config(&config).unwrap();
    scene.tick(0.0);
    for p in scene.vectors().grid().points() {
        assert_eq!(p.current, p.origin);
    }
}

#[test]
fn test_strings_move_with_raw_time() {
    let mut config = SceneConfig::from_preset(Preset::OpenClosedStrings);
    config.seed = Some(5);
    let mut scene = Scene::from_config(&config).unwrap();
    let start = scene.strings().unwrap().open()[0].start;

    scene.tick(25.0);

    let moved = scene.strings().unwrap().open()[0].start;
    let expected_x = start.x + 0.5 * (25.0 + start.x).sin();
    assert!((moved.x - expected_x).abs() < 1e-4);
    // The grid itself stays at rest under the strings
    assert_eq!(scene.vectors().grid().points()[0].displacement(), warpfield::Vec3::ZERO);
}

#[test]
fn test_custom_string_set() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let config = StringConfig {
        open_count: 3,
        closed_count: 2,
        loop_points: 6,
        loop_radius: 1.0,
    };
    let mut strings = StringSet::spawn(4.0, &config, &mut rng);
    assert_eq!(strings.segment_count(), 3 + 2 * 6);

    let mut out = Vec::new();
    strings.fill_segments(&mut out);
    assert_eq!(out.len(), 30);

    let before = strings.closed()[1].points().to_vec();
    strings.update(1.0);
    let after = strings.closed()[1].points();
    let shift = after[0] - before[0];
    for (a, b) in before.iter().zip(after) {
        assert!(((*b - *a) - shift).length() < 1e-6);
    }
}

#[test]
fn test_rest_field_is_never_displaced() {
    let mut config = SceneConfig::from_preset(Preset::OpenClosedStrings);
    config.grid_size = Some(6);
    let mut scene = Scene::from_config(&config).unwrap();
    for k in 0..5 {
        scene.tick(k as f32 * 3.7);
    }
    assert_eq!(scene.field().time_wrap(), FieldVariant::Rest.time_wrap());
    assert!(scene
        .vectors()
        .grid()
        .points()
        .iter()
        .all(|p| p.current == p.origin));
}

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;
use super::*;

fn assert_vec3_near(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < 1e-4,
        "expected {:?}, got {:?}", expected, actual
    );
}

// ============================================================================
// Orbit
// ============================================================================

#[test]
fn test_orbit_azimuth_quarter_turn() {
    let controls = OrbitControls::default();

    // +Z rotated a quarter turn around +Y lands on +X
    let p = controls.orbit_position(Vec3::new(0.0, 0.0, 10.0), FRAC_PI_2, 0.0);
    assert_vec3_near(p, Vec3::new(10.0, 0.0, 0.0));
}

#[test]
fn test_orbit_preserves_distance_to_pivot() {
    let mut controls = OrbitControls::default();
    controls.set_target(Vec3::new(1.0, 2.0, 3.0));

    let start = Vec3::new(4.0, 6.0, 3.0);
    let p = controls.orbit_position(start, 0.4, 0.2);
    assert!(((p - controls.target()).length() - 5.0).abs() < 1e-4);
}

#[test]
fn test_orbit_polar_is_clamped_below_pole() {
    let controls = OrbitControls::default();
    let p = controls.orbit_position(Vec3::new(0.0, 0.0, 10.0), 0.0, 10.0);

    // Never exactly on the +Y axis
    assert!(p.y < 10.0);
    assert!(p.x.abs() + p.z.abs() > 0.0);
    assert!(p.is_finite());
}

#[test]
fn test_orbit_at_pivot_is_noop() {
    let controls = OrbitControls::default();
    assert_eq!(controls.orbit_position(Vec3::ZERO, 1.0, 1.0), Vec3::ZERO);
}

// ============================================================================
// Dolly
// ============================================================================

#[test]
fn test_dolly_scales_distance() {
    let controls = OrbitControls::default();
    let p = controls.dolly_position(Vec3::new(0.0, 0.0, 10.0), 0.5);
    assert_vec3_near(p, Vec3::new(0.0, 0.0, 5.0));
}

#[test]
fn test_dolly_clamped_to_limits() {
    let controls = OrbitControls::new(OrbitSettings {
        min_distance: 2.0,
        max_distance: 20.0,
        ..OrbitSettings::default()
    });

    assert_vec3_near(controls.dolly_position(Vec3::new(0.0, 0.0, 10.0), 0.01), Vec3::new(0.0, 0.0, 2.0));
    assert_vec3_near(controls.dolly_position(Vec3::new(0.0, 0.0, 10.0), 100.0), Vec3::new(0.0, 0.0, 20.0));
}

#[test]
fn test_zoom_scale() {
    let controls = OrbitControls::default();
    assert_eq!(controls.zoom_scale(0.0), 1.0);
    assert!(controls.zoom_scale(1.0) < 1.0);
    assert!(controls.zoom_scale(-1.0) > 1.0);
}

// ============================================================================
// Settings validation
// ============================================================================

#[test]
fn test_settings_validation() {
    assert!(OrbitSettings::default().validate().is_ok());

    let rejected = [
        OrbitSettings { min_distance: 5.0, max_distance: 1.0, ..OrbitSettings::default() },
        OrbitSettings { min_distance: -1.0, ..OrbitSettings::default() },
        OrbitSettings { max_distance: f32::NAN, ..OrbitSettings::default() },
        OrbitSettings { zoom_speed: 0.0, ..OrbitSettings::default() },
        OrbitSettings { rotate_speed: f32::INFINITY, ..OrbitSettings::default() },
    ];
    for settings in rejected {
        assert!(settings.validate().is_err(), "accepted {:?}", settings);
    }
}

#[test]
fn test_set_settings_keeps_previous_on_error() {
    let mut controls = OrbitControls::default();
    let bad = OrbitSettings { min_distance: 5.0, max_distance: 1.0, ..OrbitSettings::default() };

    assert!(controls.set_settings(bad).is_err());
    assert_eq!(*controls.settings(), OrbitSettings::default());
}

#[test]
fn test_dolly_with_inverted_limits_does_not_panic() {
    let controls = OrbitControls::new(OrbitSettings {
        min_distance: 5.0,
        max_distance: 1.0,
        ..OrbitSettings::default()
    });

    let p = controls.dolly_position(Vec3::new(0.0, 0.0, 10.0), 0.5);
    assert!(p.is_finite());
}

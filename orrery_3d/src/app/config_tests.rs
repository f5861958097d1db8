use super::*;
use crate::error::Error;

#[test]
fn test_default_config_is_valid() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.fov_degrees, 75.0);
    assert_eq!((config.near, config.far), (0.1, 100.0));
    assert_eq!(config.camera_position, Vec3::new(0.0, 0.0, 25.0));
}

#[test]
fn test_builders() {
    let config = AppConfig::default()
        .with_fov(60.0)
        .with_clip_planes(1.0, 1000.0)
        .with_camera_position(Vec3::new(7.0, 7.0, 0.0))
        .with_size(640, 480);

    assert_eq!(config.fov_degrees, 60.0);
    assert_eq!(config.far, 1000.0);
    assert_eq!(config.camera_position, Vec3::new(7.0, 7.0, 0.0));
    assert!((config.aspect() - 4.0 / 3.0).abs() < 1e-6);
}

#[test]
fn test_validate_rejects_bad_values() {
    let cases = [
        AppConfig::default().with_fov(0.0),
        AppConfig::default().with_fov(181.0),
        AppConfig::default().with_clip_planes(0.0, 10.0),
        AppConfig::default().with_clip_planes(10.0, 1.0),
        AppConfig::default().with_size(0, 480),
        AppConfig::default().with_size(640, 0),
        AppConfig::default().with_camera_position(Vec3::splat(f32::NAN)),
        AppConfig::default().with_orbit(OrbitSettings { min_distance: 5.0, max_distance: 1.0, ..OrbitSettings::default() }),
        AppConfig::default().with_orbit(OrbitSettings { zoom_speed: 0.0, ..OrbitSettings::default() }),
    ];

    for config in cases {
        assert!(
            matches!(config.validate(), Err(Error::InvalidConfig(_))),
            "accepted {:?}", config
        );
    }
}

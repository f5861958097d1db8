/// Tests for Transform
///
/// These tests validate TRS composition order, Euler helpers,
/// and matrix decomposition.

use super::*;
use std::f32::consts::FRAC_PI_2;

fn assert_vec3_near(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < 1e-5,
        "expected {:?}, got {:?}", expected, actual
    );
}

// ============================================================================
// Tests: Construction
// ============================================================================

#[test]
fn test_default_is_identity() {
    let t = Transform::default();
    assert_eq!(t, Transform::IDENTITY);
    assert_eq!(t.to_matrix(), Mat4::IDENTITY);
}

#[test]
fn test_builders() {
    let t = Transform::new()
        .with_translation(Vec3::new(1.0, 2.0, 3.0))
        .with_uniform_scale(0.5);

    assert_eq!(t.translation, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(t.scale, Vec3::splat(0.5));
    assert_eq!(t.rotation, Quat::IDENTITY);
}

#[test]
fn test_with_euler_matches_axis_rotation() {
    let t = Transform::new().with_euler(0.0, FRAC_PI_2, 0.0);
    let expected = Quat::from_rotation_y(FRAC_PI_2);
    assert!(t.rotation.angle_between(expected) < 1e-5);
}

// ============================================================================
// Tests: TRS order
// ============================================================================

#[test]
fn test_scale_applies_before_rotation_and_translation() {
    let t = Transform::from_translation(Vec3::new(10.0, 0.0, 0.0))
        .with_rotation(Quat::from_rotation_y(FRAC_PI_2))
        .with_scale(Vec3::new(2.0, 1.0, 1.0));

    // (1,0,0) -> scale (2,0,0) -> rotY 90 (0,0,-2) -> translate (10,0,-2)
    let p = t.to_matrix().transform_point3(Vec3::X);
    assert_vec3_near(p, Vec3::new(10.0, 0.0, -2.0));
    assert_vec3_near(t.transform_point(Vec3::X), p);
}

#[test]
fn test_matrix_equals_explicit_product() {
    let t = Transform::from_translation(Vec3::new(1.0, -2.0, 3.0))
        .with_rotation(Quat::from_rotation_x(0.3))
        .with_scale(Vec3::new(1.0, 2.0, 3.0));

    let explicit = Mat4::from_translation(t.translation)
        * Mat4::from_quat(t.rotation)
        * Mat4::from_scale(t.scale);

    assert!(t.to_matrix().abs_diff_eq(explicit, 1e-5));
}

// ============================================================================
// Tests: Decomposition
// ============================================================================

#[test]
fn test_from_matrix_recovers_components() {
    let t = Transform::from_translation(Vec3::new(4.0, 5.0, 6.0))
        .with_rotation(Quat::from_rotation_z(0.7))
        .with_uniform_scale(3.0);

    let back = Transform::from_matrix(&t.to_matrix());

    assert_vec3_near(back.translation, t.translation);
    assert_vec3_near(back.scale, t.scale);
    assert!(back.rotation.angle_between(t.rotation) < 1e-4);
}

//! Integration tests for the host-facing App context
//!
//! Drives `on_resize` / `on_frame` the way a window host would, with the
//! recording renderer and the scripted asset loader standing in for the
//! real collaborators.
//!
//! Run with: cargo test --test app_integration_tests

use orrery_3d::glam::Vec3;
use orrery_3d::orrery3d::{App, AppConfig, AppEvent, Error};
use orrery_3d::orrery3d::animation::{Animation, Follow, FollowTarget};
use orrery_3d::orrery3d::asset::MockAssetLoader;
use orrery_3d::orrery3d::camera::{FitView, ViewAxis};
use orrery_3d::orrery3d::render::{MockRenderState, MockRenderer};
use orrery_3d::orrery3d::scene::{LightDesc, NodeKind, Renderable, Subtree, Transform};
use std::sync::{Arc, Mutex};

fn app_with(loader: MockAssetLoader) -> (App, Arc<Mutex<MockRenderState>>) {
    let renderer = MockRenderer::new();
    let state = renderer.state();
    let app = App::new(AppConfig::default(), Box::new(renderer), Box::new(loader)).unwrap();
    (app, state)
}

fn model() -> Subtree {
    let mut model = Subtree::new(Some("model"), NodeKind::Group);
    model
        .add(Subtree::ROOT, Some("body"), NodeKind::Renderable(Renderable::sphere("body", 2.0)),
            Transform::from_translation(Vec3::new(0.0, 5.0, 0.0)))
        .unwrap();
    model
}

// ============================================================================
// FRAME LOOP
// ============================================================================

#[test]
fn test_integration_frames_render_animated_scene() {
    let (mut app, state) = app_with(MockAssetLoader::new());
    let world = app.graph().world();
    let graph = app.graph_mut();
    let pivot = graph.add(world, Some("pivot"), NodeKind::Group).unwrap();
    let planet = graph
        .add(pivot, Some("planet"), NodeKind::Renderable(Renderable::sphere("sphere", 1.0)))
        .unwrap();
    graph.set_translation(planet, Vec3::new(10.0, 0.0, 0.0)).unwrap();
    graph.add(world, Some("light"), NodeKind::Light(LightDesc::directional(Vec3::ONE, 1.0))).unwrap();
    app.animator_mut().add_animation(Animation::spin("pivot", Vec3::Y, std::f32::consts::FRAC_PI_2));

    for ms in [0.0, 500.0, 1000.0] {
        app.on_frame(ms).unwrap();
    }

    assert_eq!(app.frame_count(), 3);
    let state = state.lock().unwrap();
    assert_eq!(state.frames.len(), 3);
    assert!(state.frames.iter().all(|f| f.draw_count == 1 && f.light_count == 1));
    // After one second the pivot has turned 90 degrees about +Y
    let position = app.graph().world_position(planet).unwrap();
    assert!((position - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-4);
}

#[test]
fn test_integration_frame_is_a_function_of_time() {
    let (mut app, _) = app_with(MockAssetLoader::new());
    let world = app.graph().world();
    let spinner = app.graph_mut().add(world, Some("spinner"), NodeKind::Group).unwrap();
    app.animator_mut().add_animation(Animation::spin(spinner, Vec3::Y, 1.3));

    app.on_frame(2500.0).unwrap();
    let direct = app.graph().world_transform(spinner).unwrap();

    app.on_frame(100.0).unwrap();
    app.on_frame(900.0).unwrap();
    app.on_frame(2500.0).unwrap();
    let stepped = app.graph().world_transform(spinner).unwrap();

    assert!(direct.abs_diff_eq(stepped, 1e-6));
}

#[test]
fn test_integration_follow_camera_tracks_node() {
    let (mut app, state) = app_with(MockAssetLoader::new());
    let world = app.graph().world();
    let pivot = app.graph_mut().add(world, Some("pivot"), NodeKind::Group).unwrap();
    let rider = app.graph_mut().add(pivot, Some("rider"), NodeKind::Group).unwrap();
    app.graph_mut().set_translation(rider, Vec3::new(0.0, 2.0, 8.0)).unwrap();
    app.animator_mut().add_animation(Animation::spin(pivot, Vec3::Y, 0.7));
    app.animator_mut().add_follow(Follow::new(rider, FollowTarget::CameraPosition));

    app.on_frame(1234.0).unwrap();

    let expected = app.graph().world_position(rider).unwrap();
    let state = state.lock().unwrap();
    let frame = state.frames.last().unwrap();
    assert!((frame.camera_position - expected).length() < 1e-4);
    assert_eq!(app.last_stats().applied, 2);
}

#[test]
fn test_integration_non_finite_time_rejected() {
    let (mut app, state) = app_with(MockAssetLoader::new());
    assert!(matches!(app.on_frame(f64::NAN), Err(Error::InvalidConfig(_))));
    assert_eq!(app.frame_count(), 0);
    assert!(state.lock().unwrap().frames.is_empty());
}

#[test]
fn test_integration_renderer_failure_propagates() {
    let (mut app, state) = app_with(MockAssetLoader::new());
    state.lock().unwrap().fail_next = Some("device lost".to_string());

    assert!(matches!(app.on_frame(0.0), Err(Error::Backend(_))));
    app.on_frame(16.0).unwrap();
    assert_eq!(app.frame_count(), 1);
}

// ============================================================================
// RESIZE
// ============================================================================

#[test]
fn test_integration_resize_updates_aspect() {
    let (mut app, state) = app_with(MockAssetLoader::new());
    app.on_resize(800, 400).unwrap();
    app.on_resize(800, 400).unwrap();
    app.on_frame(0.0).unwrap();

    assert_eq!(app.camera().aspect(), 2.0);
    let state = state.lock().unwrap();
    assert_eq!(state.resizes, vec![(800, 400), (800, 400)]);
    assert_eq!(state.frames[0].aspect, 2.0);
}

#[test]
fn test_integration_zero_resize_rejected() {
    let (mut app, state) = app_with(MockAssetLoader::new());
    let before = app.camera().aspect();
    assert!(app.on_resize(0, 600).is_err());
    assert_eq!(app.camera().aspect(), before);
    assert!(state.lock().unwrap().resizes.is_empty());
}

// ============================================================================
// ASSETS
// ============================================================================

#[test]
fn test_integration_asset_attached_after_pending_polls() {
    let (mut app, state) = app_with(MockAssetLoader::new().with_asset("model.gltf", model(), 2));
    let world = app.graph().world();
    app.load_asset("model.gltf", world, Some(FitView::Axis { axis: ViewAxis::Z, front_facing: true }));

    app.on_frame(0.0).unwrap();
    app.on_frame(16.0).unwrap();
    assert_eq!(app.pending_assets(), 1);
    assert!(app.graph().find("model").is_none());

    app.on_frame(32.0).unwrap();
    assert_eq!(app.pending_assets(), 0);
    let root = app.graph().find("model").unwrap();
    assert_eq!(
        app.take_events(),
        vec![AppEvent::AssetLoaded { path: "model.gltf".to_string(), root }]
    );

    // Framed on the body at (0, 5, 0) from +Z, in the same frame it appeared
    let state = state.lock().unwrap();
    let frame = state.frames.last().unwrap();
    assert!((frame.camera_target - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-4);
    assert!(frame.camera_position.z > 0.0);
    assert_eq!(frame.draw_count, 1);
    assert_eq!(app.rig().orbit().target(), frame.camera_target);
}

#[test]
fn test_integration_asset_failure_reported_once() {
    let (mut app, _) = app_with(MockAssetLoader::new());
    let world = app.graph().world();
    app.load_asset("missing.gltf", world, None);

    app.on_frame(0.0).unwrap();
    app.on_frame(16.0).unwrap();

    let events = app.take_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        AppEvent::AssetFailed { path, error: Error::AssetLoad(_) } if path == "missing.gltf"
    ));
    assert_eq!(app.graph().node_count(), 1);
    assert!(app.take_events().is_empty());
}

#[test]
fn test_integration_asset_parent_removed_while_loading() {
    let (mut app, _) = app_with(MockAssetLoader::new().with_asset("model.gltf", model(), 1));
    let world = app.graph().world();
    let holder = app.graph_mut().add(world, Some("holder"), NodeKind::Group).unwrap();
    app.load_asset("model.gltf", holder, None);
    app.graph_mut().remove(holder).unwrap();

    app.on_frame(0.0).unwrap();
    app.on_frame(16.0).unwrap();

    let events = app.take_events();
    assert!(matches!(&events[..], [AppEvent::AssetFailed { error: Error::InvalidNode(_), .. }]));
    assert_eq!(app.graph().node_count(), 1);
}

/// Orrery 3D demo host
///
/// Drives an `App` from a winit 0.30 event loop, or headless for a fixed
/// number of simulated frames. Drawing is delegated to a renderer that
/// only reports what it would draw.
///
/// Usage:
///   orrery3d_demo [solar|follow|model] [--headless N]

use std::f32::consts::TAU;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use glam::Vec3;
use orrery_3d::orrery3d::animation::{Animation, Follow, FollowTarget};
use orrery_3d::orrery3d::asset::{AssetLoad, AssetLoader, AssetRequest};
use orrery_3d::orrery3d::camera::{FitView, FocusCamera};
use orrery_3d::orrery3d::log::{DefaultLogger, LogSeverity};
use orrery_3d::orrery3d::render::DrawList;
use orrery_3d::orrery3d::scene::{LightDesc, NodeFlags, NodeKind, Renderable, SceneGraph, Subtree, Transform, AABB};
use orrery_3d::orrery3d::{App, AppConfig, AppEvent, Engine, Renderer, Result};
use orrery_3d::{engine_debug, engine_error, engine_info, engine_warn};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const SOURCE: &str = "orrery3d::Demo";

/// Simulated frame interval for headless runs
const HEADLESS_FRAME_MS: f64 = 1000.0 / 60.0;

// ============================================================================
// COLLABORATORS
// ============================================================================

/// Renderer that logs a summary of each frame
struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, graph: &SceneGraph, camera: &FocusCamera) -> Result<()> {
        let list = DrawList::collect(graph);
        self.frames += 1;
        if self.frames % 60 == 1 {
            engine_debug!(SOURCE, "frame {}: {} draws, {} lights ({} shadow casters), camera at {:?}",
                self.frames, list.items.len(), list.lights.len(), list.shadow_caster_count(),
                camera.position());
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        engine_info!(SOURCE, "surface {}x{}", width, height);
        Ok(())
    }
}

/// Loader that builds a procedural model for the "model" scene
#[derive(Default)]
struct ProceduralLoader {
    next_id: u64,
    requests: Vec<(AssetRequest, String)>,
}

impl AssetLoader for ProceduralLoader {
    fn request(&mut self, path: &str) -> AssetRequest {
        let request = AssetRequest::new(self.next_id);
        self.next_id += 1;
        self.requests.push((request, path.to_string()));
        request
    }

    fn poll(&mut self, request: AssetRequest) -> AssetLoad {
        let Some(index) = self.requests.iter().position(|(r, _)| *r == request) else {
            return AssetLoad::Failed(format!("unknown request {}", request.id()));
        };
        let (_, path) = self.requests.swap_remove(index);
        if path != "procedural:car" {
            return AssetLoad::Failed(format!("file not found: {}", path));
        }

        match procedural_car() {
            Some(car) => AssetLoad::Loaded(car),
            None => AssetLoad::Failed(format!("could not build model '{}'", path)),
        }
    }
}

/// Box body on four wheels, 6 nodes in total
fn procedural_car() -> Option<Subtree> {
    let mut car = Subtree::new(Some("car"), NodeKind::Group);
    let body = Renderable::new("car_body", AABB::new(
        Vec3::new(-2.0, -0.5, -1.0),
        Vec3::new(2.0, 0.5, 1.0),
    ));
    car.add(Subtree::ROOT, Some("body"), NodeKind::Renderable(body),
        Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)))?;
    for (i, (x, z)) in [(-1.5, -1.0), (1.5, -1.0), (-1.5, 1.0), (1.5, 1.0)].into_iter().enumerate() {
        let name = format!("wheel_{}", i);
        car.add(Subtree::ROOT, Some(&name), NodeKind::Renderable(Renderable::sphere("wheel", 0.4)),
            Transform::from_translation(Vec3::new(x, 0.4, z)))?;
    }
    Some(car)
}

// ============================================================================
// SCENES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scene {
    Solar,
    Follow,
    Model,
}

impl Scene {
    fn config(self) -> AppConfig {
        match self {
            Scene::Solar => AppConfig::default().with_camera_position(Vec3::new(0.0, 20.0, 35.0)),
            Scene::Follow => AppConfig::default().with_fov(45.0),
            Scene::Model => AppConfig::default().with_clip_planes(0.1, 1000.0),
        }
    }

    fn build(self, app: &mut App) -> Result<()> {
        match self {
            Scene::Solar => build_solar(app),
            Scene::Follow => build_follow(app),
            Scene::Model => build_model(app),
        }
    }
}

fn sphere(radius: f32) -> NodeKind {
    NodeKind::Renderable(Renderable::sphere("sphere", radius))
}

fn build_solar(app: &mut App) -> Result<()> {
    let graph = app.graph_mut();
    let world = graph.world();

    let solar_system = graph.add(world, Some("solarSystem"), NodeKind::Group)?;
    let sun = graph.add(solar_system, Some("sun"), sphere(1.0))?;
    graph.set_scale(sun, Vec3::splat(5.0))?;
    graph.add(sun, Some("sunLight"), NodeKind::Light(LightDesc::point(Vec3::ONE, 3.0, 0.0)))?;

    let earth_orbit = graph.add(solar_system, Some("earthOrbit"), NodeKind::Group)?;
    graph.set_translation(earth_orbit, Vec3::new(10.0, 0.0, 0.0))?;
    graph.add(earth_orbit, Some("earth"), sphere(1.0))?;

    let moon_orbit = graph.add(earth_orbit, Some("moonOrbit"), NodeKind::Group)?;
    graph.set_translation(moon_orbit, Vec3::new(2.0, 0.0, 0.0))?;
    let moon = graph.add(moon_orbit, Some("moon"), sphere(1.0))?;
    graph.set_scale(moon, Vec3::splat(0.5))?;

    let animator = app.animator_mut();
    animator.add_animation(Animation::spin("solarSystem", Vec3::Y, TAU / 20.0));
    animator.add_animation(Animation::spin("earthOrbit", Vec3::Y, TAU / 5.0));
    animator.add_animation(Animation::spin("moonOrbit", Vec3::Y, TAU / 2.0));
    Ok(())
}

fn build_follow(app: &mut App) -> Result<()> {
    let graph = app.graph_mut();
    let world = graph.world();

    let ground = graph.add(world, Some("ground"),
        NodeKind::Renderable(Renderable::new("plane", AABB::new(
            Vec3::new(-20.0, -0.01, -20.0),
            Vec3::new(20.0, 0.0, 20.0),
        ))))?;
    graph.set_flags(ground, NodeFlags::VISIBLE | NodeFlags::RECEIVE_SHADOW)?;

    let sun = graph.add(world, Some("sun"), NodeKind::Light(LightDesc::directional(Vec3::ONE, 1.0)))?;
    graph.set_translation(sun, Vec3::new(10.0, 20.0, 10.0))?;
    graph.set_flags(sun, NodeFlags::VISIBLE | NodeFlags::CAST_SHADOW)?;

    let big_sphere = graph.add(world, Some("bigSphere"), sphere(1.5))?;
    graph.set_translation(big_sphere, Vec3::new(0.0, 1.5, 0.0))?;
    graph.set_flags(big_sphere, NodeFlags::all())?;

    let small_pivot = graph.add(world, Some("smallSpherePivot"), NodeKind::Group)?;
    let small_sphere = graph.add(small_pivot, Some("smallSphere"), sphere(0.3))?;
    graph.set_translation(small_sphere, Vec3::new(5.0, 2.0, 0.0))?;
    graph.set_flags(small_sphere, NodeFlags::all())?;

    let target_pivot = graph.add(world, Some("targetPivot"), NodeKind::Group)?;
    let target = graph.add(target_pivot, Some("cameraTarget"), NodeKind::Group)?;
    graph.set_translation(target, Vec3::new(5.0, 2.0, 0.0))?;

    let rate = 50.0_f32.to_radians();
    let animator = app.animator_mut();
    animator.add_animation(Animation::spin("smallSpherePivot", Vec3::Y, rate));
    animator.add_animation(Animation::spin("targetPivot", Vec3::Y, rate).with_phase(15.0_f32.to_radians()));
    animator.add_follow(Follow::new("smallSphere", FollowTarget::CameraPosition));
    animator.add_follow(Follow::new("cameraTarget", FollowTarget::CameraLookAt));
    Ok(())
}

fn build_model(app: &mut App) -> Result<()> {
    let graph = app.graph_mut();
    let world = graph.world();
    let sky = graph.add(world, Some("skyLight"), NodeKind::Light(LightDesc::directional(Vec3::ONE, 0.8)))?;
    graph.set_translation(sky, Vec3::new(5.0, 10.0, 2.0))?;

    let turntable = graph.add(world, Some("turntable"), NodeKind::Group)?;
    app.animator_mut().add_animation(Animation::spin(turntable, Vec3::Y, 0.3));
    app.load_asset("procedural:car", turntable, Some(FitView::KeepDirection));
    Ok(())
}

// ============================================================================
// HOST
// ============================================================================

struct DemoHost {
    scene: Scene,
    window: Option<Window>,
    app: Option<App>,
    start: Instant,
    dragging: bool,
    cursor: Option<PhysicalPosition<f64>>,
}

impl DemoHost {
    fn new(scene: Scene) -> Self {
        Self {
            scene,
            window: None,
            app: None,
            start: Instant::now(),
            dragging: false,
            cursor: None,
        }
    }

    fn report_events(app: &mut App) {
        for event in app.take_events() {
            match event {
                AppEvent::AssetLoaded { path, .. } => engine_info!(SOURCE, "loaded '{}'", path),
                AppEvent::AssetFailed { path, error } => engine_warn!(SOURCE, "could not load '{}': {}", path, error),
            }
        }
    }
}

fn create_app(scene: Scene, config: AppConfig) -> Result<App> {
    let renderer = Box::new(LogRenderer { frames: 0 });
    let loader = Box::new(ProceduralLoader::default());
    let mut app = App::new(config, renderer, loader)?;
    scene.build(&mut app)?;
    Ok(app)
}

impl ApplicationHandler for DemoHost {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let config = self.scene.config();
        let attributes = Window::default_attributes()
            .with_title("Orrery 3D")
            .with_inner_size(PhysicalSize::new(config.width, config.height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(e) => {
                engine_error!(SOURCE, "failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        match create_app(self.scene, config) {
            Ok(app) => {
                self.app = Some(app);
                self.window = Some(window);
                self.start = Instant::now();
            }
            Err(e) => {
                engine_error!(SOURCE, "failed to build scene: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                engine_info!(SOURCE, "close requested after {} frames", app.frame_count());
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                // Minimized windows report 0x0; keep the last aspect ratio
                if size.width > 0 && size.height > 0 {
                    if let Err(e) = app.on_resize(size.width, size.height) {
                        engine_warn!(SOURCE, "resize ignored: {}", e);
                    }
                }
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.dragging = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some(last)) = (self.dragging, self.cursor) {
                    let height = app.config().height.max(1) as f32;
                    let dx = (position.x - last.x) as f32;
                    let dy = (position.y - last.y) as f32;
                    app.rig_mut().orbit_by(-TAU * dx / height, -TAU * dy / height);
                }
                self.cursor = Some(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / 50.0) as f32,
                };
                app.rig_mut().zoom(steps);
            }
            WindowEvent::RedrawRequested => {
                let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
                if let Err(e) = app.on_frame(elapsed_ms) {
                    engine_error!(SOURCE, "frame failed: {}", e);
                    event_loop.exit();
                }
                Self::report_events(app);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

// ============================================================================
// ENTRY POINT
// ============================================================================

#[derive(Debug, Parser)]
#[command(about = "Orrery 3D scene graph demo")]
struct Args {
    /// Scene to build
    #[arg(value_enum, default_value_t = Scene::Solar)]
    scene: Scene,

    /// Run N simulated frames without opening a window
    #[arg(long, value_name = "N")]
    headless: Option<u64>,
}

fn run_headless(scene: Scene, frames: u64) -> Result<()> {
    let mut app = create_app(scene, scene.config())?;
    for frame in 0..frames {
        app.on_frame(frame as f64 * HEADLESS_FRAME_MS)?;
        DemoHost::report_events(&mut app);
    }
    engine_info!(SOURCE, "{} frames, camera at {:?} looking at {:?}",
        app.frame_count(), app.camera().position(), app.camera().target());
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    Engine::set_logger(DefaultLogger::with_min_severity(LogSeverity::Debug));

    let args = Args::parse();
    engine_info!(SOURCE, "scene {:?}", args.scene);

    if let Some(frames) = args.headless {
        run_headless(args.scene, frames)?;
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut host = DemoHost::new(args.scene);
    event_loop.run_app(&mut host)?;
    Ok(())
}

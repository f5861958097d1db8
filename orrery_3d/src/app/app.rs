/// App - the single owning context driven by the host.
///
/// Owns the scene graph, the camera rig, the animator and the two
/// outbound collaborators (renderer and asset loader). The host calls
/// `on_resize` when the surface changes and `on_frame` once per display
/// refresh; nothing else runs in between.
///
/// Frame order:
/// 1. poll asset loads, attach finished fragments atomically
/// 2. animations (producers), world refresh
/// 3. follow trackers (consumers), world refresh if they moved nodes
/// 4. render

use crate::animation::{Animator, FrameStats};
use crate::asset::{AssetLoad, AssetLoader, AssetRequest};
use crate::camera::{zoom_fit, CameraRig, FitView, FocusCamera};
use crate::error::{Error, Result};
use crate::renderer::Renderer;
use crate::scene::{NodeKey, SceneGraph};
use crate::{engine_bail, engine_err, engine_info, engine_trace, engine_warn};
use super::config::AppConfig;

const SOURCE: &str = "orrery3d::App";

/// Reportable outcome of an asset load
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Fragment attached under its parent
    AssetLoaded { path: String, root: NodeKey },
    /// Load failed or could not be attached; never retried
    AssetFailed { path: String, error: Error },
}

struct PendingAsset {
    request: AssetRequest,
    path: String,
    parent: NodeKey,
    fit: Option<FitView>,
}

pub struct App {
    config: AppConfig,
    graph: SceneGraph,
    rig: CameraRig,
    animator: Animator,
    renderer: Box<dyn Renderer>,
    loader: Box<dyn AssetLoader>,
    pending: Vec<PendingAsset>,
    events: Vec<AppEvent>,
    frame_count: u64,
    last_stats: FrameStats,
}

impl App {
    /// Build the context from a validated configuration
    pub fn new(
        config: AppConfig,
        renderer: Box<dyn Renderer>,
        loader: Box<dyn AssetLoader>,
    ) -> Result<Self> {
        config.validate()?;

        let mut camera = FocusCamera::new(config.fov_degrees, config.aspect(), config.near, config.far)?;
        camera.set_position(config.camera_position);
        let mut rig = CameraRig::new(camera, config.orbit);
        rig.look_at(config.camera_target);

        engine_info!(SOURCE, "created {}x{} context, fov {}", config.width, config.height, config.fov_degrees);

        Ok(Self {
            config,
            graph: SceneGraph::new(),
            rig,
            animator: Animator::new(),
            renderer,
            loader,
            pending: Vec::new(),
            events: Vec::new(),
            frame_count: 0,
            last_stats: FrameStats::default(),
        })
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    pub fn camera(&self) -> &FocusCamera {
        self.rig.camera()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.animator
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Animator counters from the last frame
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Loads still in flight
    pub fn pending_assets(&self) -> usize {
        self.pending.len()
    }

    /// Drain asset events reported since the last call
    pub fn take_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== OPERATIONS =====

    /// Frame `subtree_root` with the camera (see [`zoom_fit`])
    pub fn zoom_fit(&mut self, subtree_root: NodeKey, view: FitView) -> Result<()> {
        zoom_fit(&self.graph, subtree_root, &mut self.rig, view)?;
        Ok(())
    }

    /// Start loading `path`; on success the fragment is attached under
    /// `parent` and, with `fit`, framed by the camera.
    pub fn load_asset(&mut self, path: &str, parent: NodeKey, fit: Option<FitView>) -> AssetRequest {
        let request = self.loader.request(path);
        engine_info!(SOURCE, "requested asset '{}'", path);
        self.pending.push(PendingAsset {
            request,
            path: path.to_string(),
            parent,
            fit,
        });
        request
    }

    /// Surface resized: update the aspect ratio and notify the renderer.
    ///
    /// Idempotent. A zero width or height is rejected and leaves the
    /// camera unchanged.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            engine_bail!(SOURCE, InvalidConfig, "cannot resize to {}x{}", width, height);
        }
        // Renderer first: a failed resize leaves the camera and config untouched
        self.renderer.resize(width, height)?;
        self.rig.set_aspect(width as f32 / height as f32)?;
        self.config.width = width;
        self.config.height = height;
        engine_info!(SOURCE, "resized to {}x{}", width, height);
        Ok(())
    }

    /// Run one frame at `elapsed_ms` since the loop started, then render.
    pub fn on_frame(&mut self, elapsed_ms: f64) -> Result<()> {
        if !elapsed_ms.is_finite() {
            engine_bail!(SOURCE, InvalidConfig, "elapsed time must be finite, got {}", elapsed_ms);
        }
        let seconds = elapsed_ms * 0.001;

        self.poll_assets();
        self.last_stats = self.animator.update(&mut self.graph, &mut self.rig, seconds)?;

        self.renderer.render(&self.graph, self.rig.camera())?;
        self.frame_count += 1;
        engine_trace!(SOURCE, "frame {} at {:.3}s", self.frame_count, seconds);
        Ok(())
    }

    fn poll_assets(&mut self) {
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for asset in std::mem::take(&mut self.pending) {
            match self.loader.poll(asset.request) {
                AssetLoad::Pending => still_pending.push(asset),
                AssetLoad::Loaded(subtree) => match self.graph.attach_subtree(asset.parent, subtree) {
                    Ok(root) => {
                        engine_info!(SOURCE, "attached asset '{}'", asset.path);
                        if let Some(view) = asset.fit {
                            if let Err(err) = zoom_fit(&self.graph, root, &mut self.rig, view) {
                                engine_warn!(SOURCE, "asset '{}' attached but not framed: {}", asset.path, err);
                            }
                        }
                        self.events.push(AppEvent::AssetLoaded { path: asset.path, root });
                    }
                    Err(error) => {
                        self.events.push(AppEvent::AssetFailed { path: asset.path, error });
                    }
                },
                AssetLoad::Failed(reason) => {
                    let error = engine_err!(SOURCE, AssetLoad, "'{}': {}", asset.path, reason);
                    self.events.push(AppEvent::AssetFailed { path: asset.path, error });
                }
            }
        }

        self.pending = still_pending;
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

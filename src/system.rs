//! Subsystem wiring: the callbacks the host's plugin layer drives.
//!
//! [`MirrorSystem`] ties the pieces together. The host calls
//! [`on_scenario_created`] once per scenario load with its model table and
//! structure list, [`on_before_draw`] from its per-frame draw hook, and
//! [`on_device_lost`] when GPU resources are invalidated. There is no
//! runtime patching or event plumbing here; the host calls these functions
//! directly.
//!
//! [`on_scenario_created`]: MirrorSystem::on_scenario_created
//! [`on_before_draw`]: MirrorSystem::on_before_draw
//! [`on_device_lost`]: MirrorSystem::on_device_lost

use std::collections::HashMap;
use std::iter;
use std::path::Path;
use std::rc::Rc;

use crate::config::MirrorConfig;
use crate::error::MirrorError;
use crate::factory::RenderTargetFactory;
use crate::host::{HostScenario, SceneModel, StructureInstance};
use crate::renderer::Renderer;
use crate::target::RenderTarget;

/// Per-frame GPU context supplied by the host's draw hook.
pub struct FrameContext<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Size of the host's main depth buffer. Mirror depth textures are
    /// allocated at least this large.
    pub depth_size: [u32; 2],
}

/// The mirror render-target subsystem.
pub struct MirrorSystem {
    config: MirrorConfig,
    renderer: Renderer,
    targets: Vec<RenderTarget>,
}

impl MirrorSystem {
    /// Load the configuration from `config_root` and set up an empty
    /// subsystem. Configuration errors fail here, before anything renders.
    pub fn new(config_root: &Path) -> Result<Self, MirrorError> {
        Ok(Self::from_config(MirrorConfig::load(config_root)?))
    }

    /// Set up the subsystem from an already-loaded configuration.
    pub fn from_config(config: MirrorConfig) -> Self {
        Self {
            config,
            renderer: Renderer::new(),
            targets: Vec::new(),
        }
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    pub fn targets(&self) -> &[RenderTarget] {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut [RenderTarget] {
        &mut self.targets
    }

    /// Resolve every configured mirror structure against the scenario's
    /// model table and structure list.
    ///
    /// Fails fast: an unknown or duplicate key aborts with no targets
    /// created, so a misconfigured entry disables the whole mirror feature
    /// for the scenario rather than leaving it half-initialized.
    pub fn on_scenario_created(
        &mut self,
        models: &HashMap<String, Rc<SceneModel>>,
        structures: &[Option<Rc<StructureInstance>>],
    ) -> Result<(), MirrorError> {
        self.targets = Vec::new();

        let mut factory = RenderTargetFactory::new(models, structures);
        for entry in &self.config.mirror_structures {
            factory.register(
                &entry.key,
                &entry.texture_file_name,
                [entry.texture_width, entry.texture_height],
                entry.zoom,
                entry.back_draw_distance,
                entry.front_draw_distance,
                entry.max_fps,
            )?;
        }

        self.targets = factory.create();
        log::info!("resolved {} mirror render target(s)", self.targets.len());
        Ok(())
    }

    /// Per-frame hook, called from the host's draw callback before the main
    /// scene draw.
    ///
    /// Ticks the camera state once, renders every target in registration
    /// order into one command encoder, submits it, and restores the host's
    /// camera framing. A failing target is logged and skipped; it never
    /// aborts the remaining targets or the host frame.
    pub fn on_before_draw(&mut self, frame: &FrameContext<'_>, scenario: &mut dyn HostScenario) {
        if self.targets.is_empty() {
            return;
        }

        let original_plane = scenario.camera_plane();

        if let Err(err) = self.renderer.tick(scenario) {
            log::error!("mirror camera state: {err}");
            return;
        }

        let mut encoder = frame
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("mirror targets"),
            });

        for target in &mut self.targets {
            if let Err(err) = target.render(
                frame.device,
                &mut encoder,
                scenario,
                &self.renderer,
                frame.depth_size,
            ) {
                log::error!("mirror render target: {err:#}");
            }
        }

        frame.queue.submit(iter::once(encoder.finish()));

        scenario.set_camera_plane(original_plane);
    }

    /// Out-of-band device-loss notification. Releases every target's GPU
    /// surfaces; the next frame recreates them from scratch.
    pub fn on_device_lost(&mut self) {
        log::warn!("device lost, releasing mirror render targets");
        self.free_resources();
    }

    /// Release all GPU resources, e.g. at scenario teardown.
    pub fn free_resources(&mut self) {
        for target in &mut self.targets {
            target.free_resources();
        }
    }
}

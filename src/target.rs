//! Per-structure mirror render targets.
//!
//! A [`RenderTarget`] owns the off-screen color and depth textures for one
//! placed mirror structure. GPU resources are created lazily on first render
//! and invalidated as a whole on device loss, so a target moves between two
//! states: unallocated and allocated. Each frame the target decides whether
//! to redraw at all (frame-rate throttle), whether the mirror is active
//! (enabled flag, draw-distance window), and only then computes the
//! reflected view and asks the host to draw the scene into its texture.

use std::rc::{Rc, Weak};
use std::time::Duration;

use instant::Instant;

use crate::error::MirrorError;
use crate::host::{HostScenario, MaterialHandle, SceneFrame, StructureInstance};
use crate::renderer::Renderer;
use crate::texture::Texture;

/// Caps how often a target's texture is regenerated, independent of the
/// host's frame rate.
///
/// When a frame is skipped the texture keeps the image from its last
/// successful render; a slightly stale mirror is cheaper than redrawing the
/// whole scene every host frame.
#[derive(Debug)]
pub struct FrameLimiter {
    interval: Duration,
    last_render: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(max_fps: f64) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / max_fps),
            last_render: None,
        }
    }

    /// Returns whether enough time has passed since the last acquired frame.
    /// Restarts the clock when it has. The first call always succeeds: the
    /// cap spaces out redraws, it does not delay the initial one.
    pub fn try_acquire(&mut self) -> bool {
        if let Some(last_render) = self.last_render {
            if last_render.elapsed() < self.interval {
                return false;
            }
        }

        self.last_render = Some(Instant::now());
        true
    }
}

/// Off-screen render target reflecting the scene for one mirror structure.
pub struct RenderTarget {
    instance: Weak<StructureInstance>,
    materials: Rc<Vec<MaterialHandle>>,
    texture_size: [u32; 2],
    zoom: f32,
    back_draw_distance: f32,
    front_draw_distance: f32,
    limiter: FrameLimiter,
    enabled: bool,

    texture: Option<Texture>,
    depth: Option<Texture>,
}

impl RenderTarget {
    pub(crate) fn new(
        instance: Weak<StructureInstance>,
        materials: Rc<Vec<MaterialHandle>>,
        texture_size: [u32; 2],
        zoom: f32,
        back_draw_distance: f32,
        front_draw_distance: f32,
        max_fps: f64,
    ) -> Self {
        Self {
            instance,
            materials,
            texture_size,
            zoom,
            back_draw_distance,
            front_draw_distance,
            limiter: FrameLimiter::new(max_fps),
            enabled: true,
            texture: None,
            depth: None,
        }
    }

    pub fn texture_size(&self) -> [u32; 2] {
        self.texture_size
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn back_draw_distance(&self) -> f32 {
        self.back_draw_distance
    }

    pub fn front_draw_distance(&self) -> f32 {
        self.front_draw_distance
    }

    /// The materials this target's texture is bound into.
    pub fn materials(&self) -> &[MaterialHandle] {
        &self.materials
    }

    /// Route location of the owning structure instance, if it still exists.
    pub fn location(&self) -> Option<f64> {
        self.instance.upgrade().map(|instance| instance.location)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A disabled target still clears its texture to black each frame; it
    /// just never draws a reflection into it.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn has_gpu_resources(&self) -> bool {
        self.texture.is_some() || self.depth.is_some()
    }

    /// Whether the owning instance falls inside the activation window
    /// `[current − back, current + front]` around `current_location`.
    pub fn in_draw_range(&self, current_location: f64) -> bool {
        let Some(instance) = self.instance.upgrade() else {
            return false;
        };

        current_location - self.back_draw_distance as f64 <= instance.location
            && instance.location <= current_location + self.front_draw_distance as f64
    }

    /// Render this frame's reflection, if due.
    ///
    /// Runs the per-tick sequence: lazy GPU allocation, frame-rate throttle,
    /// clear to opaque black, enable/cull gates, reflected-view scene draw.
    /// `host_depth_size` is the host's main depth buffer size; the target's
    /// depth texture is allocated at least that large.
    ///
    /// [`Renderer::tick`] must have run earlier in the same frame.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        scenario: &mut dyn HostScenario,
        renderer: &Renderer,
        host_depth_size: [u32; 2],
    ) -> anyhow::Result<()> {
        self.ensure_resources(device, host_depth_size)?;

        // Skipped frames keep the previous image, intentionally stale.
        if !self.limiter.try_acquire() {
            return Ok(());
        }

        let (Some(color), Some(depth)) = (self.texture.as_ref(), self.depth.as_ref()) else {
            return Ok(());
        };

        // Out-of-range and disabled mirrors show black, not a stale image,
        // so the clear happens before the gates.
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("mirror clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &color.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
            multiview_mask: None,
        });

        if !self.enabled {
            return Ok(());
        }
        let Some(instance) = self.instance.upgrade() else {
            return Ok(());
        };
        let location = scenario.location();
        if instance.location < location - self.back_draw_distance as f64 {
            return Ok(());
        }
        if location + (self.front_draw_distance as f64) < instance.location {
            return Ok(());
        }

        let block_to_object = renderer.track_transform(scenario, &instance);
        let view = renderer.reflection_view(block_to_object)?;

        let frame = SceneFrame {
            color: &color.view,
            depth: &depth.view,
            view,
            anisotropy_clamp: 1,
        };
        renderer.render_scene(scenario, device, encoder, &frame, self.texture_size, self.zoom)
    }

    /// Release all GPU resources; the next [`render`](Self::render) call
    /// recreates them from scratch.
    pub fn free_resources(&mut self) {
        self.texture = None;
        self.depth = None;
    }

    fn ensure_resources(
        &mut self,
        device: &wgpu::Device,
        host_depth_size: [u32; 2],
    ) -> Result<(), MirrorError> {
        if self.texture.is_none() {
            let texture =
                Texture::create_render_texture(device, self.texture_size, "mirror target")?;
            // The target has exclusive ownership of these material slots for
            // the scenario's duration; previous bindings are dropped here.
            for material in self.materials.iter() {
                material.borrow_mut().texture = Some(texture.clone());
            }
            log::debug!(
                "allocated {}x{} mirror render texture for {} material(s)",
                self.texture_size[0],
                self.texture_size[1],
                self.materials.len()
            );
            self.texture = Some(texture);
        }

        if self.depth.is_none() {
            let size = [
                host_depth_size[0].max(self.texture_size[0]),
                host_depth_size[1].max(self.texture_size[1]),
            ];
            self.depth = Some(Texture::create_depth_texture(device, size, "mirror depth")?);
            log::debug!("allocated {}x{} mirror depth texture", size[0], size[1]);
        }

        Ok(())
    }
}

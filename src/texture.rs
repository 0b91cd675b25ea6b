//! GPU textures for mirror render targets.
//!
//! Provides [`Texture`], a wrapper around WGPU texture resources, with
//! constructors for the two surfaces a mirror target owns: a sampleable
//! color render target and a matching depth texture. Requested sizes are
//! validated against the device limits up front so oversized configuration
//! values surface as errors instead of device loss.

use crate::error::MirrorError;

/// A GPU texture with a view and optional sampler.
///
/// Cloning is cheap: the underlying WGPU resources are reference counted,
/// which is what lets one mirror texture be bound into several materials.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
}

impl Texture {
    /// Depth buffer format used for mirror depth textures.
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Color format used for mirror render targets.
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Create a color texture that can be both rendered into and sampled.
    ///
    /// This is the texture bound into a mirror structure's materials: the
    /// scene is drawn into it each frame and the host samples it when the
    /// structure itself is rasterized.
    pub fn create_render_texture(
        device: &wgpu::Device,
        size: [u32; 2],
        label: &str,
    ) -> Result<Self, MirrorError> {
        check_dimensions(device, size)?;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size[0].max(1),
                height: size[1].max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Some(device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }

    /// Create a depth texture for depth-testing while a mirror is drawn.
    pub fn create_depth_texture(
        device: &wgpu::Device,
        size: [u32; 2],
        label: &str,
    ) -> Result<Self, MirrorError> {
        check_dimensions(device, size)?;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size[0].max(1),
                height: size[1].max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[Self::DEPTH_FORMAT],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            texture,
            view,
            sampler: None,
        })
    }
}

fn check_dimensions(device: &wgpu::Device, size: [u32; 2]) -> Result<(), MirrorError> {
    let max = device.limits().max_texture_dimension_2d;
    if size[0] > max || size[1] > max {
        return Err(MirrorError::TextureAllocation {
            width: size[0],
            height: size[1],
            max,
        });
    }

    Ok(())
}

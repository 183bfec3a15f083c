use winit::dpi::PhysicalSize;

use crate::coords::Viewport;

/// What the frame loop does after the surface refused to hand out a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was configured again; the next frame should work.
    Reconfigured,
    /// Transient; only this frame is dropped.
    SkipFrame,
    /// Out of memory. The loop stops.
    Fatal,
}

/// Window surface plus the configuration it was last given.
///
/// `size` tracks the window even while it is minimized; `config` keeps the
/// last size wgpu accepted, since a 0x0 surface cannot be configured.
pub(super) struct WindowSurface<'w> {
    surface: wgpu::Surface<'w>,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
}

impl<'w> WindowSurface<'w> {
    pub(super) fn new(
        surface: wgpu::Surface<'w>,
        device: &wgpu::Device,
        config: wgpu::SurfaceConfiguration,
    ) -> Self {
        surface.configure(device, &config);
        let size = PhysicalSize::new(config.width, config.height);
        Self {
            surface,
            config,
            size,
        }
    }

    #[inline]
    pub(super) fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Drawable area; empty while minimized.
    #[inline]
    pub(super) fn viewport(&self) -> Viewport {
        Viewport::from_pixels(self.size.width, self.size.height)
    }

    pub(super) fn resize(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) {
        self.size = size;
        if size.width == 0 || size.height == 0 {
            log::debug!("surface minimized; configuration deferred");
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(device, &self.config);
    }

    pub(super) fn acquire(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub(super) fn recover(&self, device: &wgpu::Device, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                if !self.viewport().is_valid() {
                    return SurfaceErrorAction::SkipFrame;
                }
                self.surface.configure(device, &self.config);
                SurfaceErrorAction::Reconfigured
            }
            wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        }
    }
}

/// First sRGB format when `prefer_srgb`, otherwise (or failing that) the
/// surface's own first choice.
pub(super) fn pick_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let srgb = formats.iter().copied().find(|f| f.is_srgb());
    match srgb {
        Some(f) if prefer_srgb => Some(f),
        _ => formats.first().copied(),
    }
}

/// `requested` if the surface supports it, else the surface's first mode.
pub(super) fn pick_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    match requested {
        Some(mode) if modes.contains(&mode) => mode,
        _ => modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
    }
}

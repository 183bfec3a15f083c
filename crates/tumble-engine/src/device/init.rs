/// Knobs for adapter, device and surface creation.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface when one exists. Sprite textures are sRGB, so this
    /// keeps image colors unchanged on screen.
    pub prefer_srgb: bool,

    /// `Fifo` paces the animation to the display refresh.
    pub present_mode: wgpu::PresentMode,

    /// Ignored when the surface does not support it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    /// Sprites need nothing beyond WebGL2-class limits.
    pub required_limits: wgpu::Limits,

    /// Swapchain depth hint.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

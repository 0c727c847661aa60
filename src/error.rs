//! Error types for the backdrop.
//!
//! GPU setup, window creation and configuration loading can fail; the
//! per-frame path never returns errors to the caller (they are logged).

use std::fmt;

/// Errors raised by a [`RenderBackend`](crate::render::RenderBackend).
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// Acquiring or presenting the next frame failed.
    Surface(wgpu::SurfaceError),
    /// The operation needs a surface but none is live.
    NotReady,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::Surface(e) => write!(f, "Surface error: {}", e),
            GpuError::NotReady => write!(f, "No rendering surface has been created"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::Surface(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

impl From<wgpu::SurfaceError> for GpuError {
    fn from(e: wgpu::SurfaceError) -> Self {
        GpuError::Surface(e)
    }
}

/// Errors that can occur while loading or validating a [`SceneConfig`](crate::SceneConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write the config file.
    Io(std::io::Error),
    /// The file is not valid JSON for a scene config.
    Parse(serde_json::Error),
    /// A value is out of its allowed range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors that can occur when mounting or running the backdrop.
#[derive(Debug)]
pub enum BackdropError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The scene configuration is unusable.
    Config(ConfigError),
    /// The mount target has a zero width or height.
    InvalidViewport { width: u32, height: u32 },
}

impl fmt::Display for BackdropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackdropError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            BackdropError::Window(e) => write!(f, "Failed to create window: {}", e),
            BackdropError::Gpu(e) => write!(f, "GPU error: {}", e),
            BackdropError::Config(e) => write!(f, "Config error: {}", e),
            BackdropError::InvalidViewport { width, height } => {
                write!(f, "Cannot mount on a {}x{} viewport", width, height)
            }
        }
    }
}

impl std::error::Error for BackdropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackdropError::EventLoop(e) => Some(e),
            BackdropError::Window(e) => Some(e),
            BackdropError::Gpu(e) => Some(e),
            BackdropError::Config(e) => Some(e),
            BackdropError::InvalidViewport { .. } => None,
        }
    }
}

impl From<winit::error::EventLoopError> for BackdropError {
    fn from(e: winit::error::EventLoopError) -> Self {
        BackdropError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for BackdropError {
    fn from(e: winit::error::OsError) -> Self {
        BackdropError::Window(e)
    }
}

impl From<GpuError> for BackdropError {
    fn from(e: GpuError) -> Self {
        BackdropError::Gpu(e)
    }
}

impl From<ConfigError> for BackdropError {
    fn from(e: ConfigError) -> Self {
        BackdropError::Config(e)
    }
}

use std::path::PathBuf;

use crate::device::GpuInit;
use crate::input::EventPolicy;
use crate::script::DEFAULT_SCRIPT_PATH;
use crate::time::WaitStrategy;
use crate::window::WindowConfig;

/// Target frame rate of the frame driver.
pub const DEFAULT_FPS: u32 = 30;

/// What the frame driver does when a script callback fails.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CallbackErrorPolicy {
    /// Log the error and keep running the frame.
    #[default]
    Log,
    /// Stop the loop and return the error from `run`.
    Abort,
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub gpu: GpuInit,

    pub fps: u32,
    pub wait: WaitStrategy,
    pub events: EventPolicy,
    pub on_callback_error: CallbackErrorPolicy,

    /// Startup script, resolved against the working directory.
    pub script_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            gpu: GpuInit::default(),
            fps: DEFAULT_FPS,
            wait: WaitStrategy::default(),
            events: EventPolicy::default(),
            on_callback_error: CallbackErrorPolicy::default(),
            script_path: PathBuf::from(DEFAULT_SCRIPT_PATH),
        }
    }
}

/// Rejected configuration value.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("fps must be greater than zero")]
    ZeroFps,
    #[error("script path is empty")]
    EmptyScriptPath,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.script_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyScriptPath);
        }
        Ok(())
    }
}

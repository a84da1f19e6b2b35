use crate::script::ScriptError;
use crate::window::InitError;

use super::{ConfigError, PresentError};

/// Everything that can end `Engine::run` early.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    #[error("failed to initialize render surface")]
    Init(#[from] InitError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Present(#[from] PresentError),
}

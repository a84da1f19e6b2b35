/// Failure to bring up the render surface. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to create the windowing event loop")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window")]
    Window(#[from] winit::error::OsError),

    #[error("the platform did not provide a window within {attempts} event pumps")]
    NoWindow { attempts: u32 },

    #[error("the windowing event loop exited during startup (code {0})")]
    Exited(i32),

    #[error("failed to create renderer: {0}")]
    Renderer(String),
}

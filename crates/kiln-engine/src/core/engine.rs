use crate::input::InputPoller;
use crate::script::ScriptHost;
use crate::sim::Stage;
use crate::time::FramePacer;
use crate::window::PlatformSurface;

use super::{EngineConfig, EngineError, FrameDriver, RunSummary};

/// Engine entry point.
pub struct Engine;

impl Engine {
    /// Loads the startup script, opens the window and runs frames until quit.
    ///
    /// The script is loaded before the window exists, so a missing or broken
    /// script fails without ever showing a window.
    pub fn run(config: EngineConfig) -> Result<RunSummary, EngineError> {
        config.validate()?;

        let stage = Stage::shared();
        let script = ScriptHost::load(&config.script_path, &stage)?;

        let surface = PlatformSurface::initialize(config.window, config.gpu)?;
        let pacer = FramePacer::with_fps(config.fps, config.wait);
        let poller = InputPoller::new(config.events);

        FrameDriver::new(surface, script, stage, pacer, poller, config.on_callback_error).run()
    }
}

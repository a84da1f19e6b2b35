use anyhow::Context;
use kiln_engine::logging::{init_logging, LoggingConfig};
use kiln_engine::{Engine, EngineConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = EngineConfig::default();
    let script = config.script_path.display().to_string();

    let summary = Engine::run(config)
        .with_context(|| format!("kiln exited abnormally running {script}"))?;

    log::info!("exited cleanly after {} frames", summary.frames);
    if summary.dropped_events > 0 {
        log::warn!("{} input events were dropped", summary.dropped_events);
    }

    Ok(())
}

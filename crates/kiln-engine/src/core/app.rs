/// Control directive returned by each frame phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Frame driver lifecycle.
///
/// `Stopped → Running` when the loop starts; `Running → Stopped` on a quit
/// signal or a fatal error. `Stopped` is terminal.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

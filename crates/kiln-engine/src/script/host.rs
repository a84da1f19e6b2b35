use std::path::Path;

use mlua::{Lua, Value, Variadic};

use crate::sim::SharedStage;

use super::bridge;
use super::ScriptError;

/// Startup script location, relative to the working directory.
pub const DEFAULT_SCRIPT_PATH: &str = "./scripts/playermovement.lua";

/// Result of looking up and invoking an optional callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CallOutcome {
    /// The global existed, was a function, and returned without error.
    Invoked,
    /// The global was absent or not a function; nothing ran.
    Missing,
}

/// Owns the Lua runtime and every function and global the script defines.
///
/// Natives are registered before the script's top-level code runs, so the
/// script may call them at load time as well as from callbacks.
pub struct ScriptHost {
    lua: Lua,
    name: String,
}

impl ScriptHost {
    /// Reads and executes the script at `path`.
    pub fn load(path: impl AsRef<Path>, stage: &SharedStage) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_source(path, &source, stage)
    }

    /// Executes `source` as if it had been read from `path`.
    pub fn from_source(
        path: impl AsRef<Path>,
        source: &str,
        stage: &SharedStage,
    ) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let lua = Lua::new();
        bridge::register(&lua, stage)?;

        lua.load(source)
            .set_name(format!("@{}", path.display()))
            .exec()
            .map_err(|err| ScriptError::Load {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;

        log::info!("loaded script {}", path.display());

        Ok(Self {
            lua,
            name: path.display().to_string(),
        })
    }

    /// Script name used in diagnostics.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes `update(dt)` if the script defines it.
    pub fn call_update(&self, dt: f64) -> Result<CallOutcome, ScriptError> {
        self.call_optional("update", &[dt])
    }

    /// Invokes `make_rect(x, y, w, h)` if the script defines it.
    pub fn call_make_rect(
        &self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Result<CallOutcome, ScriptError> {
        self.call_optional("make_rect", &[x, y, w, h])
    }

    /// Looks `name` up in the globals and calls it in protected mode.
    ///
    /// Arguments are passed as Lua floats; return values are discarded.
    fn call_optional(&self, name: &str, args: &[f64]) -> Result<CallOutcome, ScriptError> {
        let value: Value = self
            .lua
            .globals()
            .get(name)
            .map_err(|err| ScriptError::from_callback(name, err))?;

        let Value::Function(func) = value else {
            log::trace!("callback {name} not defined");
            return Ok(CallOutcome::Missing);
        };

        func.call::<_, ()>(args.iter().copied().collect::<Variadic<f64>>())
            .map_err(|err| ScriptError::from_callback(name, err))?;

        Ok(CallOutcome::Invoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::sim::{Player, ScriptDraw, Stage};

    fn host(source: &str) -> (ScriptHost, SharedStage) {
        let stage = Stage::shared();
        let host = ScriptHost::from_source("test.lua", source, &stage).unwrap();
        (host, stage)
    }

    #[test]
    fn missing_callbacks_are_skipped() {
        let (host, _) = host("x = 1");
        assert_eq!(host.call_update(0.033).unwrap(), CallOutcome::Missing);
        assert_eq!(
            host.call_make_rect(10.0, 10.0, 100.0, 100.0).unwrap(),
            CallOutcome::Missing
        );
    }

    #[test]
    fn non_function_global_is_treated_as_missing() {
        let (host, _) = host("update = 42");
        assert_eq!(host.call_update(0.033).unwrap(), CallOutcome::Missing);
    }

    #[test]
    fn update_receives_delta_time() {
        let (host, _) = host("function update(dt) last_dt = dt end");
        assert_eq!(host.call_update(0.034).unwrap(), CallOutcome::Invoked);

        let last: f64 = host.lua.globals().get("last_dt").unwrap();
        assert!((last - 0.034).abs() < 1e-12);
    }

    #[test]
    fn update_moves_player_through_bridge() {
        let (host, stage) = host("function update(dt) set_player_pos(50, 75) end");
        host.call_update(0.033).unwrap();
        assert_eq!(stage.borrow().player.rect(), Rect::new(50.0, 75.0, 10.0, 10.0));
    }

    #[test]
    fn make_rect_receives_fixed_arguments_and_draws() {
        let (host, stage) = host(
            "function make_rect(x, y, w, h) render_rect(x, y, x + w, y + h) end",
        );
        host.call_make_rect(10.0, 10.0, 100.0, 100.0).unwrap();

        let issued = stage.borrow_mut().take_issued();
        assert_eq!(
            issued,
            vec![ScriptDraw::Outline { x1: 10.0, y1: 10.0, x2: 110.0, y2: 110.0 }]
        );
    }

    #[test]
    fn natives_are_available_at_top_level() {
        let (_host, stage) = host("set_player_pos(1, 2)");
        assert_eq!((stage.borrow().player.x, stage.borrow().player.y), (1.0, 2.0));
    }

    #[test]
    fn runtime_error_is_reported_not_raised() {
        let (host, _) = host("function update(dt) error('boom') end");
        let err = host.call_update(0.033).unwrap_err();
        assert!(matches!(
            &err,
            ScriptError::Runtime { callback, message }
                if callback == "update" && message.contains("boom")
        ));
    }

    #[test]
    fn bad_native_arguments_surface_as_argument_error() {
        let (host, stage) = host("function update(dt) set_player_pos('left', 1) end");
        let err = host.call_update(0.033).unwrap_err();
        match err {
            ScriptError::Argument { callback, source } => {
                assert_eq!(callback, "update");
                assert_eq!(source.function, "set_player_pos");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(stage.borrow().player, Player::INITIAL);
    }

    #[test]
    fn wrong_arity_surfaces_as_argument_error() {
        let (host, _) = host("function make_rect(x, y, w, h) render_rect(x, y, w) end");
        let err = host.call_make_rect(10.0, 10.0, 100.0, 100.0).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Argument { source, .. } if source.function == "render_rect"
        ));
    }

    #[test]
    fn host_survives_callback_errors() {
        let (host, _) = host(
            "n = 0\nfunction update(dt) n = n + 1; if n == 1 then error('first') end end",
        );
        assert!(host.call_update(0.033).is_err());
        assert_eq!(host.call_update(0.033).unwrap(), CallOutcome::Invoked);
    }

    #[test]
    fn syntax_error_is_load_error() {
        let stage = Stage::shared();
        let err = ScriptHost::from_source("broken.lua", "function (", &stage)
            .err()
            .unwrap();
        assert!(matches!(err, ScriptError::Load { .. }));
    }

    #[test]
    fn top_level_error_is_load_error() {
        let stage = Stage::shared();
        let err = ScriptHost::from_source("raise.lua", "error('nope')", &stage)
            .err()
            .unwrap();
        assert!(matches!(&err, ScriptError::Load { message, .. } if message.contains("nope")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let stage = Stage::shared();
        let err = ScriptHost::load("./definitely/not/here.lua", &stage).err().unwrap();
        assert!(matches!(err, ScriptError::Io { .. }));
        assert!(err.to_string().contains("not/here.lua"));
    }

    #[test]
    fn shipped_script_loads_and_drives_the_player() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scripts/playermovement.lua");
        let stage = Stage::shared();
        let host = ScriptHost::load(path, &stage).unwrap();

        assert_eq!(host.call_update(0.033).unwrap(), CallOutcome::Invoked);
        let player = stage.borrow().player;
        assert_eq!(player.y, 20.0);
        assert!(player.x > 20.0);

        assert_eq!(host.call_make_rect(10.0, 10.0, 100.0, 100.0).unwrap(), CallOutcome::Invoked);
        assert_eq!(
            stage.borrow_mut().take_issued(),
            vec![ScriptDraw::Outline { x1: 10.0, y1: 10.0, x2: 110.0, y2: 110.0 }]
        );
    }
}

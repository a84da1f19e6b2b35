use std::rc::Rc;

use mlua::{Lua, Value, Variadic};

use crate::sim::{ScriptDraw, SharedStage, Stage};

use super::{ArgumentError, ScriptError};

/// A native function exposed to scripts as a global.
///
/// Every parameter is a number whose truncated value fits an `f32`; the count
/// and types are checked before `call` runs, so `call` receives exactly
/// `params.len()` values.
pub struct NativeFn {
    pub name: &'static str,
    pub params: &'static [&'static str],
    call: fn(&mut Stage, &[f64]) -> Result<(), ArgumentError>,
}

/// The complete set of natives visible to scripts.
pub static NATIVES: [NativeFn; 2] = [
    NativeFn {
        name: "set_player_pos",
        params: &["x", "y"],
        call: set_player_pos,
    },
    NativeFn {
        name: "render_rect",
        params: &["x1", "y1", "x2", "y2"],
        call: render_rect,
    },
];

impl NativeFn {
    /// Validates raw script arguments and converts them to numbers.
    pub fn check_args(&self, args: &[Value]) -> Result<Vec<f64>, ArgumentError> {
        if args.len() != self.params.len() {
            return Err(ArgumentError::new(
                self.name,
                format!(
                    "expected {} arguments ({}), got {}",
                    self.params.len(),
                    self.params.join(", "),
                    args.len()
                ),
            ));
        }

        args.iter()
            .zip(self.params)
            .map(|(value, param)| number_arg(self.name, param, value))
            .collect()
    }

    fn invoke(&self, stage: &mut Stage, args: &[Value]) -> Result<(), ArgumentError> {
        let values = self.check_args(args)?;
        (self.call)(stage, &values)
    }
}

/// True when `v` survives truncation to an integer pixel value stored as `f32`.
fn fits_pixel(v: f64) -> bool {
    (v.trunc() as f32).is_finite()
}

fn number_arg(function: &'static str, param: &str, value: &Value) -> Result<f64, ArgumentError> {
    let n = match value {
        Value::Integer(i) => *i as f64,
        Value::Number(n) => *n,
        other => {
            return Err(ArgumentError::new(
                function,
                format!("argument `{param}` must be a number, got {}", other.type_name()),
            ));
        }
    };

    if !n.is_finite() {
        return Err(ArgumentError::new(
            function,
            format!("argument `{param}` must be finite, got {n}"),
        ));
    }
    if !fits_pixel(n) {
        return Err(ArgumentError::new(
            function,
            format!("argument `{param}` is out of pixel range, got {n}"),
        ));
    }

    Ok(n)
}

fn set_player_pos(stage: &mut Stage, args: &[f64]) -> Result<(), ArgumentError> {
    if let &[x, y] = args {
        stage.player.set_position(x, y);
    }
    Ok(())
}

fn render_rect(stage: &mut Stage, args: &[f64]) -> Result<(), ArgumentError> {
    let &[x1, y1, x2, y2] = args else { return Ok(()) };

    // Corners fit individually; the spanned size may still overflow.
    if !fits_pixel(x2 - x1) || !fits_pixel(y2 - y1) {
        return Err(ArgumentError::new(
            "render_rect",
            format!("rectangle from ({x1}, {y1}) to ({x2}, {y2}) is out of pixel range"),
        ));
    }

    stage.issue(ScriptDraw::Outline { x1, y1, x2, y2 });
    Ok(())
}

/// Installs every native as a global of `lua`, bound to `stage`.
pub(crate) fn register(lua: &Lua, stage: &SharedStage) -> Result<(), ScriptError> {
    let globals = lua.globals();

    for native in NATIVES.iter() {
        let stage = Rc::clone(stage);
        let registered = lua
            .create_function(move |_, args: Variadic<Value>| {
                native
                    .invoke(&mut stage.borrow_mut(), &args)
                    .map_err(mlua::Error::external)
            })
            .and_then(|func| globals.set(native.name, func));

        if let Err(err) = registered {
            return Err(ScriptError::Register {
                name: native.name,
                message: err.to_string(),
            });
        }

        log::debug!("registered native {}({})", native.name, native.params.join(", "));
    }

    Ok(())
}

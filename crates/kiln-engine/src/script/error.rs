use std::path::PathBuf;

/// Wrong argument count or type passed to a native function.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{function}: {message}")]
pub struct ArgumentError {
    pub function: &'static str,
    pub message: String,
}

impl ArgumentError {
    pub(crate) fn new(function: &'static str, message: impl Into<String>) -> Self {
        Self { function, message: message.into() }
    }
}

/// Errors raised while loading a script or running its callbacks.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The startup script could not be read.
    #[error("failed to read script {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The startup script failed to parse or its top-level code raised an error.
    #[error("failed to load script {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },

    /// A native function could not be registered with the runtime.
    #[error("failed to register native `{name}`: {message}")]
    Register { name: &'static str, message: String },

    /// A callback raised an error.
    #[error("script callback `{callback}` failed: {message}")]
    Runtime { callback: String, message: String },

    /// A callback passed bad arguments to a native function.
    #[error("script callback `{callback}` passed bad arguments")]
    Argument {
        callback: String,
        #[source]
        source: ArgumentError,
    },
}

impl ScriptError {
    /// Classifies an error returned from a protected callback invocation.
    pub(crate) fn from_callback(callback: &str, err: mlua::Error) -> Self {
        match find_argument_error(&err) {
            Some(source) => ScriptError::Argument { callback: callback.to_string(), source },
            None => ScriptError::Runtime {
                callback: callback.to_string(),
                message: err.to_string(),
            },
        }
    }
}

/// Walks an mlua error chain looking for a native argument failure.
fn find_argument_error(err: &mlua::Error) -> Option<ArgumentError> {
    match err {
        mlua::Error::CallbackError { cause, .. } => find_argument_error(cause),
        mlua::Error::ExternalError(inner) => inner.downcast_ref::<ArgumentError>().cloned(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_argument_error_is_classified() {
        let err = mlua::Error::external(ArgumentError::new("render_rect", "expected 4 arguments"));
        let classified = ScriptError::from_callback("make_rect", err);
        match classified {
            ScriptError::Argument { callback, source } => {
                assert_eq!(callback, "make_rect");
                assert_eq!(source.function, "render_rect");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn plain_runtime_error_keeps_message() {
        let err = mlua::Error::RuntimeError("boom".into());
        let classified = ScriptError::from_callback("update", err);
        assert!(matches!(
            &classified,
            ScriptError::Runtime { callback, message }
                if callback == "update" && message.contains("boom")
        ));
    }
}

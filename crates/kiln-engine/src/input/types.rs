/// Keys the engine distinguishes. Anything else is `Unknown` with the
/// platform key code (0 when the platform reports none).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Cursor position in logical pixels, relative to the window's top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Input event in arrival order, free of platform types.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Close was requested for the window, or the event loop ended.
    Quit,
    Key {
        key: Key,
        state: KeyState,
        repeat: bool,
    },
    PointerMoved(PointerMoveEvent),
    PointerButton {
        button: MouseButton,
        state: MouseButtonState,
    },
    Focused(bool),
}

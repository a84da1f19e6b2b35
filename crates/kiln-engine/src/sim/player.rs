use crate::coords::Rect;

/// The movable rectangle driven by the script.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Player {
    pub const INITIAL: Player = Player {
        x: 20.0,
        y: 20.0,
        width: 10.0,
        height: 10.0,
    };

    /// Moves the player, dropping the fractional part of both coordinates.
    ///
    /// No bounds checking: positions outside the window are kept as given.
    /// Callers keep both values within `f32` range; the scripting bridge
    /// rejects anything else before it gets here.
    pub fn set_position(&mut self, x: f64, y: f64) {
        debug_assert!((x.trunc() as f32).is_finite() && (y.trunc() as f32).is_finite());
        self.x = x.trunc() as f32;
        self.y = y.trunc() as f32;
    }

    /// Integer pixel rectangle drawn for the player.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height).truncated()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::INITIAL
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use super::Player;

/// Drawing requested by a native while a callback runs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ScriptDraw {
    /// Unfilled rectangle spanning two corners, as passed by the script.
    Outline { x1: f64, y1: f64, x2: f64, y2: f64 },
}

/// State reachable from native script functions.
///
/// Draws issued by natives are buffered here while a callback runs and replayed
/// onto the render surface by the frame driver once it returns.
#[derive(Debug, Default)]
pub struct Stage {
    pub player: Player,
    issued: Vec<ScriptDraw>,
}

/// Single-threaded shared handle to the stage.
pub type SharedStage = Rc<RefCell<Stage>>;

impl Stage {
    pub fn shared() -> SharedStage {
        Rc::new(RefCell::new(Stage::default()))
    }

    pub fn issue(&mut self, draw: ScriptDraw) {
        self.issued.push(draw);
    }

    /// Draws issued since the last call, in issue order.
    pub fn take_issued(&mut self) -> Vec<ScriptDraw> {
        std::mem::take(&mut self.issued)
    }
}

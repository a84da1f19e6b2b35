use super::DrawCmd;

/// Recorded draw stream for a frame.
///
/// Commands are painted in insertion order. `clear()` keeps the allocation so
/// the list can be reused every frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }
}

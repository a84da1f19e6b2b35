//! Shape renderers.

mod quad;

pub mod rect;

//! wgpu bring-up and per-frame surface handling.
//!
//! `Gpu` borrows the window it draws into; the window layer keeps both alive
//! together in a self-referencing entry.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;

//! The boundary between the tiling engine and the compositor.

pub mod geometry;
pub mod headless;
pub mod window_server;

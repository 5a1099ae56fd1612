pub mod window_tracker;

pub use window_tracker::{ManagedWindow, WindowTracker};

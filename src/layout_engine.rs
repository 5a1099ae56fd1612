pub mod engine;
pub(crate) mod graph;
pub mod registry;
pub mod systems;
mod workspaces;

pub use engine::{LayoutCommand, LayoutEngine, ParseCommandError};
pub use graph::Direction;
pub use registry::{LayoutRegistry, UnknownLayout};
pub use systems::{LayoutSystem, LayoutSystemKind};
pub(crate) use workspaces::WorkspaceLayouts;

#[cfg(test)]
mod tests;

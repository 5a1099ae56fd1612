use thiserror::Error;

use crate::layout_engine::UnknownLayout;
use crate::sys::window_server::{WindowId, WorkspaceIndex};

/// Why an event or command had no effect. These are logged and dropped;
/// none of them stop the reactor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReactorError {
    #[error("No window to act on")]
    NoTargetWindow,
    #[error("Window not tracked: {0:?}")]
    WindowNotTracked(WindowId),
    #[error("Window no longer exists: {0:?}")]
    WindowGone(WindowId),
    #[error("Unknown layout: {0:?}")]
    UnknownLayout(String),
    #[error("Unknown workspace: {0}")]
    UnknownWorkspace(WorkspaceIndex),
    #[error("No work area for workspace {0}")]
    NoWorkArea(WorkspaceIndex),
}

impl From<UnknownLayout> for ReactorError {
    fn from(UnknownLayout(name): UnknownLayout) -> Self { ReactorError::UnknownLayout(name) }
}

//! The compositor boundary: what the reactor may ask about windows and
//! workspaces, and the requests it sends back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sys::geometry::Rect;

/// Opaque handle supplied by the compositor. Never reused across window
/// lifetimes.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(idx: u64) -> WindowId { WindowId(idx) }

    pub fn get(self) -> u64 { self.0 }
}

impl fmt::Debug for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "WindowId({})", self.0) }
}

pub type WorkspaceIndex = usize;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WindowType {
    #[default]
    Normal,
    Dialog,
    ModalDialog,
    Utility,
    Splashscreen,
    Menu,
    Toolbar,
    Dock,
    Desktop,
    Other,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowInfo {
    #[serde(default)]
    pub window_type: WindowType,
    #[serde(default)]
    pub skip_taskbar: bool,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub wm_class: Option<String>,
    pub frame: Rect,
    /// `None` for windows shown on every workspace.
    #[serde(default)]
    pub workspace: Option<WorkspaceIndex>,
    #[serde(default)]
    pub is_maximized: bool,
}

impl WindowInfo {
    /// The application id, falling back to the WM class.
    pub fn app_identifier(&self) -> Option<&str> {
        self.app_id.as_deref().filter(|id| !id.is_empty()).or(self.wm_class.as_deref())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WatchToken(pub u64);

/// Read-only queries against the compositor. Every lookup for a window that
/// has gone away returns `None` rather than failing.
pub trait WindowServer {
    /// Windows on `workspace` in the compositor's stable native order.
    fn list_windows(&self, workspace: WorkspaceIndex) -> Vec<WindowId>;
    fn window_info(&self, wid: WindowId) -> Option<WindowInfo>;
    fn work_area(&self, workspace: WorkspaceIndex) -> Option<Rect>;
    fn active_workspace(&self) -> WorkspaceIndex;
    fn workspace_count(&self) -> usize;

    /// Subscribes to the window's own unmanage notification.
    fn watch_unmanaging(&self, wid: WindowId) -> Option<WatchToken>;
    fn unwatch(&self, token: WatchToken);
}

/// Effects the reactor asks the compositor to carry out.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    MoveResize(WindowId, Rect),
    SetMaximized(WindowId, bool),
    ChangeWorkspace(WindowId, WorkspaceIndex),
    Activate(WindowId),
}

impl Request {
    pub fn window(&self) -> WindowId {
        match *self {
            Request::MoveResize(wid, _)
            | Request::SetMaximized(wid, _)
            | Request::ChangeWorkspace(wid, _)
            | Request::Activate(wid) => wid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_identifier_prefers_app_id() {
        let info = WindowInfo {
            app_id: Some("org.gnome.Terminal".into()),
            wm_class: Some("gnome-terminal-server".into()),
            ..Default::default()
        };
        assert_eq!(info.app_identifier(), Some("org.gnome.Terminal"));
    }

    #[test]
    fn app_identifier_falls_back_to_wm_class() {
        let info = WindowInfo {
            app_id: Some(String::new()),
            wm_class: Some("firefox".into()),
            ..Default::default()
        };
        assert_eq!(info.app_identifier(), Some("firefox"));
        assert_eq!(WindowInfo::default().app_identifier(), None);
    }

    #[test]
    fn request_window() {
        let wid = WindowId::new(3);
        assert_eq!(Request::Activate(wid).window(), wid);
        assert_eq!(Request::MoveResize(wid, Rect::default()).window(), wid);
    }
}

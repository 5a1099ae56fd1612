use tracing::{debug, trace};

use crate::common::collections::{HashMap, HashSet};
use crate::sys::geometry::{Rect, RectExt};
use crate::sys::window_server::{
    WatchToken, WindowId, WindowInfo, WindowServer, WindowType, WorkspaceIndex,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManagedWindow {
    pub floating: bool,
    /// Where the window goes when it is floated again.
    pub original_rect: Option<Rect>,
    /// The last rectangle we commanded. Any other reported geometry was
    /// caused by someone else.
    pub last_tiled_rect: Option<Rect>,
    /// Last workspace we saw the window on; `None` if it is on all of them.
    pub workspace: Option<WorkspaceIndex>,
    watch: Option<WatchToken>,
}

/// Every window under management, and nothing else.
#[derive(Debug, Default)]
pub struct WindowTracker {
    windows: HashMap<WindowId, ManagedWindow>,
    excluded_apps: HashSet<String>,
}

impl WindowTracker {
    pub fn new(excluded_apps: &[String]) -> Self {
        let mut tracker = Self::default();
        tracker.set_excluded_apps(excluded_apps);
        tracker
    }

    pub fn set_excluded_apps(&mut self, excluded_apps: &[String]) {
        self.excluded_apps = excluded_apps.iter().cloned().collect();
    }

    /// Whether a window of this kind should ever be tiled.
    pub fn is_valid(&self, info: &WindowInfo) -> bool {
        if info.window_type != WindowType::Normal || info.skip_taskbar {
            return false;
        }
        !info.app_identifier().is_some_and(|app| self.excluded_apps.contains(app))
    }

    /// Starts managing `wid` and subscribes to its unmanage notification.
    /// Returns false if the window is invalid or already tracked.
    pub fn track(&mut self, wid: WindowId, info: &WindowInfo, server: &dyn WindowServer) -> bool {
        if self.windows.contains_key(&wid) {
            trace!(?wid, "Already tracked");
            return false;
        }
        if !self.is_valid(info) {
            debug!(?wid, app = ?info.app_identifier(), window_type = ?info.window_type, "Not managing window");
            return false;
        }
        let watch = server.watch_unmanaging(wid);
        self.windows.insert(
            wid,
            ManagedWindow {
                floating: false,
                original_rect: Some(info.frame),
                last_tiled_rect: None,
                workspace: info.workspace,
                watch,
            },
        );
        debug!(?wid, "Tracking window");
        true
    }

    pub fn untrack(&mut self, wid: WindowId, server: &dyn WindowServer) -> Option<ManagedWindow> {
        let window = self.windows.remove(&wid)?;
        if let Some(token) = window.watch {
            server.unwatch(token);
        }
        debug!(?wid, "Untracked window");
        Some(window)
    }

    /// Detects a move or resize that we did not command. Such a window is
    /// floated and its new geometry becomes the one to restore to. Returns
    /// true if the window started floating.
    pub fn observe_geometry_change(&mut self, wid: WindowId, rect: Rect) -> bool {
        let Some(window) = self.windows.get_mut(&wid) else { return false };
        if window.floating || rect.same_as(window.last_tiled_rect.as_ref()) {
            return false;
        }
        debug!(?wid, ?rect, last_tiled = ?window.last_tiled_rect, "External geometry change, floating");
        window.floating = true;
        window.original_rect = Some(rect);
        true
    }

    /// Must be called before the matching move/resize is issued.
    pub fn record_tiled(&mut self, wid: WindowId, rect: Rect) {
        if let Some(window) = self.windows.get_mut(&wid) {
            window.last_tiled_rect = Some(rect);
        }
    }

    pub fn set_floating(&mut self, wid: WindowId, floating: bool) {
        if let Some(window) = self.windows.get_mut(&wid) {
            window.floating = floating;
        }
    }

    pub fn set_workspace(&mut self, wid: WindowId, workspace: Option<WorkspaceIndex>) {
        if let Some(window) = self.windows.get_mut(&wid) {
            window.workspace = workspace;
        }
    }

    pub fn is_floating(&self, wid: WindowId) -> bool {
        self.windows.get(&wid).is_some_and(|w| w.floating)
    }

    pub fn is_tiling(&self, wid: WindowId) -> bool {
        self.windows.get(&wid).is_some_and(|w| !w.floating)
    }

    pub fn contains(&self, wid: WindowId) -> bool { self.windows.contains_key(&wid) }

    pub fn get(&self, wid: WindowId) -> Option<&ManagedWindow> { self.windows.get(&wid) }

    pub fn len(&self) -> usize { self.windows.len() }

    pub fn is_empty(&self) -> bool { self.windows.is_empty() }

    pub fn window_ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.windows.keys().copied()
    }

    /// Drops every window, releasing their unmanage subscriptions.
    pub fn clear(&mut self, server: &dyn WindowServer) {
        for (_, window) in self.windows.drain() {
            if let Some(token) = window.watch {
                server.unwatch(token);
            }
        }
    }
}

use tracing::{debug, info, trace};

use crate::actor::reactor::Reactor;
use crate::sys::geometry::Rect;
use crate::sys::window_server::{WindowId, WindowInfo};

pub struct WindowEventHandler;

impl WindowEventHandler {
    pub fn handle_window_created(reactor: &mut Reactor, wid: WindowId, info: WindowInfo) {
        if reactor.server.window_info(wid).is_none() {
            trace!(?wid, "Window was destroyed before we saw it");
            return;
        }
        if !reactor.window_tracker.track(wid, &info, reactor.server.as_ref()) {
            return;
        }
        let workspace = reactor.workspace_for(&info);
        reactor.relayout(workspace);
    }

    pub fn handle_window_unmanaged(reactor: &mut Reactor, wid: WindowId) {
        let Some(window) = reactor.window_tracker.untrack(wid, reactor.server.as_ref()) else {
            trace!(?wid, "Unmanaged window was not tracked");
            return;
        };
        if reactor.focused_window == Some(wid) {
            reactor.focused_window = None;
        }
        let workspace = window.workspace.unwrap_or_else(|| reactor.server.active_workspace());
        reactor.relayout(workspace);
    }

    pub fn handle_focus_changed(reactor: &mut Reactor, wid: Option<WindowId>) {
        match wid {
            Some(wid) if reactor.window_tracker.contains(wid) => {
                debug!(?wid, "Focused");
                reactor.focused_window = Some(wid);
            }
            _ => trace!(?wid, "Focus moved to an unmanaged window"),
        }
    }

    pub fn handle_geometry_changed(reactor: &mut Reactor, wid: WindowId, rect: Rect) {
        if reactor.window_tracker.observe_geometry_change(wid, rect) {
            info!(?wid, ?rect, "Window moved by hand; it is now floating");
        }
    }
}

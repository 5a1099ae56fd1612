//! An in-memory desktop that implements [`WindowServer`].
//!
//! It mirrors the events a real compositor would emit and simulates the
//! effect of every [`Request`], producing the follow-up events a compositor
//! would report. Used for replaying recordings and for driving the reactor
//! in tests.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::actor::reactor::Event;
use crate::common::collections::HashMap;
use crate::sys::geometry::Rect;
use crate::sys::window_server::{
    Request, WatchToken, WindowId, WindowInfo, WindowServer, WorkspaceIndex,
};

/// Workspace geometry needed to rebuild a desktop, one work area per
/// workspace.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DesktopSnapshot {
    pub work_areas: Vec<Option<Rect>>,
    pub active_workspace: WorkspaceIndex,
}

impl DesktopSnapshot {
    pub fn capture(server: &dyn WindowServer) -> DesktopSnapshot {
        DesktopSnapshot {
            work_areas: (0..server.workspace_count()).map(|ws| server.work_area(ws)).collect(),
            active_workspace: server.active_workspace(),
        }
    }
}

#[derive(Debug)]
struct Desktop {
    work_areas: Vec<Option<Rect>>,
    active_workspace: WorkspaceIndex,
    windows: Vec<(WindowId, WindowInfo)>,
    focused: Option<WindowId>,
    watches: HashMap<WatchToken, WindowId>,
    next_token: u64,
}

impl Desktop {
    fn window_mut(&mut self, wid: WindowId) -> Option<&mut WindowInfo> {
        self.windows.iter_mut().find(|(w, _)| *w == wid).map(|(_, info)| info)
    }

    fn remove(&mut self, wid: WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|(w, _)| *w != wid);
        if self.focused == Some(wid) {
            self.focused = None;
        }
        before != self.windows.len()
    }
}

#[derive(Clone, Debug)]
pub struct HeadlessServer(Rc<RefCell<Desktop>>);

impl HeadlessServer {
    pub fn new(snapshot: DesktopSnapshot) -> HeadlessServer {
        HeadlessServer(Rc::new(RefCell::new(Desktop {
            work_areas: snapshot.work_areas,
            active_workspace: snapshot.active_workspace,
            windows: Vec::new(),
            focused: None,
            watches: HashMap::default(),
            next_token: 1,
        })))
    }

    /// A desktop with `workspaces` workspaces sharing one work area.
    pub fn with_workspaces(workspaces: usize, work_area: Rect) -> HeadlessServer {
        HeadlessServer::new(DesktopSnapshot {
            work_areas: vec![Some(work_area); workspaces],
            active_workspace: 0,
        })
    }

    pub fn add_window(&self, wid: WindowId, info: WindowInfo) {
        let mut desktop = self.0.borrow_mut();
        match desktop.window_mut(wid) {
            Some(existing) => *existing = info,
            None => desktop.windows.push((wid, info)),
        }
    }

    /// Removes the window, returning the unmanage notification if anyone is
    /// watching for it.
    pub fn destroy_window(&self, wid: WindowId) -> Option<Event> {
        let mut desktop = self.0.borrow_mut();
        if !desktop.remove(wid) {
            return None;
        }
        let before = desktop.watches.len();
        desktop.watches.retain(|_, w| *w != wid);
        (desktop.watches.len() != before).then_some(Event::WindowUnmanaged(wid))
    }

    pub fn frame(&self, wid: WindowId) -> Option<Rect> {
        self.window_info(wid).map(|info| info.frame)
    }

    pub fn focused(&self) -> Option<WindowId> { self.0.borrow().focused }

    pub fn is_watched(&self, wid: WindowId) -> bool {
        self.0.borrow().watches.values().any(|w| *w == wid)
    }

    /// Brings the desktop in line with an event reported by some other
    /// source, e.g. a recording.
    pub fn mirror(&self, event: &Event) {
        match event {
            Event::WindowCreated(wid, info) => self.add_window(*wid, info.clone()),
            Event::WindowUnmanaged(wid) => {
                let mut desktop = self.0.borrow_mut();
                desktop.remove(*wid);
                desktop.watches.retain(|_, w| w != wid);
            }
            Event::FocusChanged(wid) => self.0.borrow_mut().focused = *wid,
            Event::GeometryChanged(wid, frame) => {
                if let Some(info) = self.0.borrow_mut().window_mut(*wid) {
                    info.frame = *frame;
                }
            }
            Event::WorkspaceActivated { new, .. } => self.0.borrow_mut().active_workspace = *new,
            Event::Command { .. } | Event::ConfigChanged(_) => {}
        }
    }

    /// Carries out `request` and returns what a compositor would report
    /// as a result.
    pub fn apply(&self, request: &Request) -> Vec<Event> {
        let mut desktop = self.0.borrow_mut();
        let wid = request.window();
        let active = desktop.active_workspace;
        let work_areas = desktop.work_areas.clone();
        let Some(window) = desktop.window_mut(wid) else {
            trace!(?wid, "Request for a window that no longer exists");
            return vec![];
        };

        match *request {
            Request::MoveResize(_, frame) => {
                if window.frame == frame {
                    return vec![];
                }
                window.frame = frame;
                window.is_maximized = false;
                vec![Event::GeometryChanged(wid, frame)]
            }
            Request::SetMaximized(_, maximized) => {
                if window.is_maximized == maximized {
                    return vec![];
                }
                window.is_maximized = maximized;
                if !maximized {
                    return vec![];
                }
                let workspace = window.workspace.unwrap_or(active);
                let Some(area) = work_areas.get(workspace).copied().flatten() else {
                    return vec![];
                };
                if window.frame == area {
                    return vec![];
                }
                window.frame = area;
                vec![Event::GeometryChanged(wid, area)]
            }
            Request::ChangeWorkspace(_, workspace) => {
                if workspace < work_areas.len() {
                    window.workspace = Some(workspace);
                }
                vec![]
            }
            Request::Activate(_) => {
                let mut events = vec![];
                if let Some(workspace) = window.workspace
                    && workspace != active
                {
                    desktop.active_workspace = workspace;
                    events.push(Event::WorkspaceActivated { old: active, new: workspace });
                }
                desktop.focused = Some(wid);
                events.push(Event::FocusChanged(Some(wid)));
                events
            }
        }
    }
}

impl WindowServer for HeadlessServer {
    fn list_windows(&self, workspace: WorkspaceIndex) -> Vec<WindowId> {
        self.0
            .borrow()
            .windows
            .iter()
            .filter(|(_, info)| info.workspace.is_none_or(|ws| ws == workspace))
            .map(|(wid, _)| *wid)
            .collect()
    }

    fn window_info(&self, wid: WindowId) -> Option<WindowInfo> {
        self.0.borrow().windows.iter().find(|(w, _)| *w == wid).map(|(_, info)| info.clone())
    }

    fn work_area(&self, workspace: WorkspaceIndex) -> Option<Rect> {
        self.0.borrow().work_areas.get(workspace).copied().flatten()
    }

    fn active_workspace(&self) -> WorkspaceIndex { self.0.borrow().active_workspace }

    fn workspace_count(&self) -> usize { self.0.borrow().work_areas.len() }

    fn watch_unmanaging(&self, wid: WindowId) -> Option<WatchToken> {
        let mut desktop = self.0.borrow_mut();
        if !desktop.windows.iter().any(|(w, _)| *w == wid) {
            return None;
        }
        let token = WatchToken(desktop.next_token);
        desktop.next_token += 1;
        desktop.watches.insert(token, wid);
        Some(token)
    }

    fn unwatch(&self, token: WatchToken) { self.0.borrow_mut().watches.remove(&token); }
}

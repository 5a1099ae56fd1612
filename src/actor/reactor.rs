//! The reactor owns all tiling state and reacts to compositor events and
//! key-bound commands, one at a time and in arrival order.
//!
//! It never mutates windows directly. Queries go through a [`WindowServer`]
//! and effects are sent out as [`Request`]s; whatever the compositor reports
//! back arrives later as another [`Event`].

mod error;
mod events;
mod replay;
#[cfg(test)]
mod testing;

pub use error::ReactorError;
use events::command::CommandEventHandler;
use events::space::SpaceEventHandler;
use events::window::WindowEventHandler;
pub use replay::{HeadlessSession, Record, replay};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::actor;
use crate::common::config::Settings;
use crate::layout_engine::{LayoutCommand, LayoutEngine};
use crate::model::WindowTracker;
use crate::sys::geometry::Rect;
use crate::sys::headless::DesktopSnapshot;
use crate::sys::window_server::{Request, WindowId, WindowInfo, WindowServer, WorkspaceIndex};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Event {
    /// A window appeared, either newly mapped or found by the initial scan.
    WindowCreated(WindowId, WindowInfo),
    /// The window is going away. Only delivered for watched windows.
    WindowUnmanaged(WindowId),
    FocusChanged(Option<WindowId>),
    GeometryChanged(WindowId, Rect),
    WorkspaceActivated {
        old: WorkspaceIndex,
        new: WorkspaceIndex,
    },
    /// A key-bound command. Without a target it acts on the focused window.
    Command {
        command: LayoutCommand,
        target: Option<WindowId>,
    },
    ConfigChanged(Settings),
}

pub struct Reactor {
    server: Box<dyn WindowServer>,
    requests: actor::Sender<Request>,
    settings: Settings,
    layout_engine: LayoutEngine,
    window_tracker: WindowTracker,
    focused_window: Option<WindowId>,
    record: Record,
}

impl Reactor {
    pub fn new(
        settings: Settings,
        server: Box<dyn WindowServer>,
        requests: actor::Sender<Request>,
        mut record: Record,
    ) -> Reactor {
        record.start(&settings, &DesktopSnapshot::capture(server.as_ref()));
        Reactor {
            layout_engine: LayoutEngine::new(&settings),
            window_tracker: WindowTracker::new(&settings.excluded_apps),
            focused_window: None,
            server,
            requests,
            settings,
            record,
        }
    }

    /// Processes events until the channel closes, then restores windows.
    pub async fn run(mut self, mut events: actor::Receiver<Event>) {
        self.start();
        while let Some((span, event)) = events.recv().await {
            let _guard = span.enter();
            self.handle_event(event);
        }
        self.shutdown();
    }

    /// Takes over every window that already exists, workspace by workspace.
    pub fn start(&mut self) {
        let count = self.server.workspace_count();
        info!(workspaces = count, "Scanning existing windows");
        for workspace in 0..count {
            for wid in self.server.list_windows(workspace) {
                if self.window_tracker.contains(wid) {
                    continue;
                }
                let Some(info) = self.server.window_info(wid) else { continue };
                if self.window_tracker.is_valid(&info) {
                    self.handle_event(Event::WindowCreated(wid, info));
                }
            }
        }
    }

    /// Lets go of every window and un-maximizes the ones we managed.
    pub fn shutdown(&mut self) {
        let mut managed: Vec<_> = self.window_tracker.window_ids().collect();
        managed.sort();
        for wid in managed {
            if self.server.window_info(wid).is_some_and(|info| info.is_maximized) {
                self.send(Request::SetMaximized(wid, false));
            }
        }
        self.window_tracker.clear(self.server.as_ref());
        self.layout_engine.clear();
        self.focused_window = None;
        info!("Released all windows");
    }

    pub fn handle_event(&mut self, event: Event) {
        let _span = tracing::debug_span!("handle_event").entered();
        debug!(?event, "Event");
        self.record.on_event(&event);
        match event {
            Event::WindowCreated(wid, info) => {
                WindowEventHandler::handle_window_created(self, wid, info)
            }
            Event::WindowUnmanaged(wid) => WindowEventHandler::handle_window_unmanaged(self, wid),
            Event::FocusChanged(wid) => WindowEventHandler::handle_focus_changed(self, wid),
            Event::GeometryChanged(wid, rect) => {
                WindowEventHandler::handle_geometry_changed(self, wid, rect)
            }
            Event::WorkspaceActivated { old, new } => {
                SpaceEventHandler::handle_workspace_activated(self, old, new)
            }
            Event::Command { command, target } => {
                CommandEventHandler::handle_command(self, command, target)
            }
            Event::ConfigChanged(settings) => {
                SpaceEventHandler::handle_config_changed(self, settings)
            }
        }
    }

    /// Tiles every tracked, non-floating window on `workspace`.
    ///
    /// Each window's `last_tiled_rect` is recorded before its move is sent,
    /// so the geometry change it causes is recognized as our own. Moves are
    /// sent even when the window is already in place.
    fn apply_layout(&mut self, workspace: WorkspaceIndex) -> Result<(), ReactorError> {
        if workspace >= self.server.workspace_count() {
            return Err(ReactorError::UnknownWorkspace(workspace));
        }

        let mut tiling = Vec::new();
        for wid in self.server.list_windows(workspace) {
            let Some(info) = self.server.window_info(wid) else {
                trace!(?wid, "Listed window is gone");
                continue;
            };
            if !self.window_tracker.is_valid(&info) || !self.window_tracker.contains(wid) {
                continue;
            }
            self.window_tracker.set_workspace(wid, info.workspace);
            if self.window_tracker.is_tiling(wid) {
                tiling.push(wid);
            }
        }

        let area = self.server.work_area(workspace).ok_or(ReactorError::NoWorkArea(workspace))?;
        let frames = self.layout_engine.calculate(workspace, &tiling, area)?;
        for (wid, rect) in frames {
            self.window_tracker.record_tiled(wid, rect);
            self.send(Request::MoveResize(wid, rect));
        }
        Ok(())
    }

    /// Like [`Self::apply_layout`], for callers that have nothing to do on
    /// failure.
    fn relayout(&mut self, workspace: WorkspaceIndex) {
        if let Err(err) = self.apply_layout(workspace) {
            log_error(&err);
        }
    }

    fn send(&self, request: Request) {
        trace!(?request, "Sending request");
        self.requests.send(request);
    }

    fn workspace_for(&self, info: &WindowInfo) -> WorkspaceIndex {
        info.workspace.unwrap_or_else(|| self.server.active_workspace())
    }

    /// Resolves a command's target: the explicit window, or the focused one.
    fn resolve_target(&self, target: Option<WindowId>) -> Result<WindowId, ReactorError> {
        let wid = target.or(self.focused_window).ok_or(ReactorError::NoTargetWindow)?;
        if !self.window_tracker.contains(wid) {
            return Err(ReactorError::WindowNotTracked(wid));
        }
        Ok(wid)
    }

    fn window_info(&self, wid: WindowId) -> Result<WindowInfo, ReactorError> {
        self.server.window_info(wid).ok_or(ReactorError::WindowGone(wid))
    }
}

fn log_error(err: &ReactorError) {
    match err {
        ReactorError::NoTargetWindow
        | ReactorError::WindowNotTracked(_)
        | ReactorError::WindowGone(_) => trace!(%err, "Ignoring"),
        ReactorError::UnknownLayout(_) | ReactorError::UnknownWorkspace(_) => {
            warn!(%err, "Ignoring")
        }
        ReactorError::NoWorkArea(_) => debug!(%err, "Ignoring"),
    }
}

impl std::fmt::Debug for Reactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reactor")
            .field("settings", &self.settings)
            .field("layout_engine", &self.layout_engine)
            .field("window_tracker", &self.window_tracker)
            .field("focused_window", &self.focused_window)
            .finish_non_exhaustive()
    }
}

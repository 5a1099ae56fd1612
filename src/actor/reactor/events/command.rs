use tracing::{debug, info};

use crate::actor::reactor::{Reactor, ReactorError, log_error};
use crate::layout_engine::{Direction, LayoutCommand};
use crate::sys::geometry::directional_distance;
use crate::sys::window_server::{Request, WindowId, WorkspaceIndex};

pub struct CommandEventHandler;

impl CommandEventHandler {
    pub fn handle_command(
        reactor: &mut Reactor,
        command: LayoutCommand,
        target: Option<WindowId>,
    ) {
        info!(%command, ?target, "Command");
        let result = match command {
            LayoutCommand::ToggleFloating => Self::toggle_floating(reactor, target),
            LayoutCommand::MaximizeWindow => Self::toggle_maximized(reactor, target),
            LayoutCommand::FocusDirection(direction) => {
                Self::focus_direction(reactor, target, direction)
            }
            LayoutCommand::SetLayout(name) => Self::switch_layout(reactor, &name),
            LayoutCommand::MoveToWorkspace(workspace) => {
                Self::move_to_workspace(reactor, target, workspace)
            }
        };
        if let Err(err) = result {
            log_error(&err);
        }
    }

    fn toggle_floating(
        reactor: &mut Reactor,
        target: Option<WindowId>,
    ) -> Result<(), ReactorError> {
        let wid = reactor.resolve_target(target)?;
        let info = reactor.window_info(wid)?;

        if reactor.window_tracker.is_floating(wid) {
            debug!(?wid, "Tiling window");
            reactor.window_tracker.set_floating(wid, false);
            reactor.apply_layout(reactor.workspace_for(&info))
        } else {
            debug!(?wid, "Floating window");
            reactor.window_tracker.set_floating(wid, true);
            let original = reactor.window_tracker.get(wid).and_then(|w| w.original_rect);
            // Exact rect, no gap: repeated toggles must not shrink the window.
            if let Some(rect) = original {
                reactor.send(Request::MoveResize(wid, rect));
            }
            Ok(())
        }
    }

    fn toggle_maximized(
        reactor: &mut Reactor,
        target: Option<WindowId>,
    ) -> Result<(), ReactorError> {
        let wid = reactor.resolve_target(target)?;
        let info = reactor.window_info(wid)?;
        reactor.send(Request::SetMaximized(wid, !info.is_maximized));
        Ok(())
    }

    fn move_to_workspace(
        reactor: &mut Reactor,
        target: Option<WindowId>,
        workspace: WorkspaceIndex,
    ) -> Result<(), ReactorError> {
        let wid = reactor.resolve_target(target)?;
        if workspace >= reactor.server.workspace_count() {
            return Err(ReactorError::UnknownWorkspace(workspace));
        }
        reactor.window_info(wid)?;
        reactor.window_tracker.set_workspace(wid, Some(workspace));
        reactor.send(Request::ChangeWorkspace(wid, workspace));
        reactor.send(Request::Activate(wid));
        Ok(())
    }

    fn switch_layout(reactor: &mut Reactor, name: &str) -> Result<(), ReactorError> {
        let workspace = reactor.server.active_workspace();
        reactor.layout_engine.switch_layout(workspace, name)?;
        reactor.apply_layout(workspace)
    }

    /// Activates the nearest window whose center lies in `direction` from
    /// the current one. Ties go to the first window in stacking order.
    fn focus_direction(
        reactor: &mut Reactor,
        target: Option<WindowId>,
        direction: Direction,
    ) -> Result<(), ReactorError> {
        let wid = reactor.resolve_target(target)?;
        let info = reactor.window_info(wid)?;
        let workspace = reactor.workspace_for(&info);

        let candidates: Vec<_> = reactor
            .server
            .list_windows(workspace)
            .into_iter()
            .filter_map(|other| Some((other, reactor.server.window_info(other)?)))
            .filter(|(_, other)| reactor.window_tracker.is_valid(other))
            .collect();
        if candidates.len() < 2 {
            return Ok(());
        }

        let mut best: Option<(WindowId, f64)> = None;
        for (other, other_info) in candidates {
            if other == wid {
                continue;
            }
            let Some(distance) = directional_distance(&info.frame, &other_info.frame, direction)
            else {
                continue;
            };
            if best.is_none_or(|(_, min)| distance < min) {
                best = Some((other, distance));
            }
        }

        match best {
            Some((next, distance)) => {
                debug!(from = ?wid, to = ?next, distance, "Moving focus");
                reactor.send(Request::Activate(next));
            }
            None => debug!(?wid, %direction, "No window in that direction"),
        }
        Ok(())
    }
}

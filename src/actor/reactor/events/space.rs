use tracing::info;

use crate::actor::reactor::Reactor;
use crate::common::config::Settings;
use crate::sys::window_server::WorkspaceIndex;

pub struct SpaceEventHandler;

impl SpaceEventHandler {
    pub fn handle_workspace_activated(
        reactor: &mut Reactor,
        old: WorkspaceIndex,
        new: WorkspaceIndex,
    ) {
        reactor.relayout(new);
        // Windows may have been moved away from the workspace we are leaving.
        if old != new && old < reactor.server.workspace_count() {
            reactor.relayout(old);
        }
    }

    pub fn handle_config_changed(reactor: &mut Reactor, settings: Settings) {
        info!(?settings, "Applying new settings");
        reactor.layout_engine.set_layout_settings(&settings);
        reactor.window_tracker.set_excluded_apps(&settings.excluded_apps);
        reactor.settings = settings;
        let active = reactor.server.active_workspace();
        reactor.relayout(active);
    }
}

use super::{Event, Reactor, Record};
use crate::actor::{self, Receiver, Sender};
use crate::common::config::Settings;
use crate::layout_engine::LayoutCommand;
use crate::sys::geometry::Rect;
use crate::sys::headless::HeadlessServer;
use crate::sys::window_server::{Request, WindowId, WindowInfo};

pub fn screen() -> Rect { Rect::new(0, 0, 1000, 1000) }

pub fn w(idx: u64) -> WindowId { WindowId::new(idx) }

pub fn app_window(app: &str, workspace: usize) -> WindowInfo {
    WindowInfo {
        app_id: Some(app.to_string()),
        frame: Rect::new(100, 100, 400, 300),
        workspace: Some(workspace),
        ..Default::default()
    }
}

pub fn command(command: LayoutCommand) -> Event { Event::Command { command, target: None } }

pub fn command_for(wid: WindowId, command: LayoutCommand) -> Event {
    Event::Command { command, target: Some(wid) }
}

/// A headless desktop plus the receiving end of the reactor's requests.
pub struct Desktop {
    pub server: HeadlessServer,
    tx: Sender<Request>,
    rx: Receiver<Request>,
}

impl Desktop {
    pub fn new(workspaces: usize) -> Desktop {
        let (tx, rx) = actor::channel();
        Desktop {
            server: HeadlessServer::with_workspaces(workspaces, screen()),
            tx,
            rx,
        }
    }

    /// Maps a window and returns the creation event the compositor would send.
    pub fn open(&self, wid: WindowId, info: WindowInfo) -> Event {
        self.server.add_window(wid, info.clone());
        Event::WindowCreated(wid, info)
    }

    pub fn open_on(&self, idx: u64, workspace: usize) -> Event {
        self.open(w(idx), app_window("org.example.App", workspace))
    }

    pub fn destroy(&self, wid: WindowId) -> Vec<Event> {
        self.server.destroy_window(wid).into_iter().collect()
    }

    /// Drains every request sent so far.
    pub fn requests(&mut self) -> Vec<Request> {
        let mut requests = Vec::new();
        while let Ok((_, request)) = self.rx.try_recv() {
            requests.push(request);
        }
        requests
    }

    pub fn frame(&self, wid: WindowId) -> Rect {
        self.server.frame(wid).unwrap_or_else(|| panic!("{wid:?} does not exist"))
    }

    pub fn move_resize_targets(requests: &[Request]) -> Vec<(WindowId, Rect)> {
        requests
            .iter()
            .filter_map(|request| match *request {
                Request::MoveResize(wid, rect) => Some((wid, rect)),
                _ => None,
            })
            .collect()
    }
}

impl Reactor {
    pub fn new_for_test(desktop: &Desktop, settings: Settings) -> Reactor {
        Self::new_with_record(desktop, settings, Record::default())
    }

    pub fn new_with_record(desktop: &Desktop, settings: Settings, record: Record) -> Reactor {
        Reactor::new(settings, Box::new(desktop.server.clone()), desktop.tx.clone(), record)
    }

    pub fn handle_events(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.handle_event(event);
        }
    }

    /// Handles `events` the way a synchronous compositor would deliver
    /// them: every request is carried out and its consequences handled
    /// before the next request. Returns every request made along the way.
    pub fn settle(&mut self, desktop: &mut Desktop, events: Vec<Event>) -> Vec<Request> {
        let mut all = Vec::new();
        for event in events {
            self.settle_event(desktop, event, &mut all, 0);
        }
        all
    }

    fn settle_event(
        &mut self,
        desktop: &mut Desktop,
        event: Event,
        all: &mut Vec<Request>,
        depth: usize,
    ) {
        assert!(depth < 16, "reactor did not settle: {all:#?}");
        self.handle_event(event);
        for request in desktop.requests() {
            let follow_ups = desktop.server.apply(&request);
            all.push(request);
            for follow_up in follow_ups {
                self.settle_event(desktop, follow_up, all, depth + 1);
            }
        }
    }

    pub fn is_floating(&self, wid: WindowId) -> bool { self.window_tracker.is_floating(wid) }

    pub fn is_tracked(&self, wid: WindowId) -> bool { self.window_tracker.contains(wid) }

    pub fn focused_window(&self) -> Option<WindowId> { self.focused_window }

    pub fn layout_name(&self, workspace: usize) -> Option<&str> {
        self.layout_engine.layout_name(workspace)
    }

    pub fn active_workspace(&self) -> usize { self.server.active_workspace() }
}

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
#[cfg(test)]
use tempfile::NamedTempFile;
use tracing::warn;

use super::{Event, Reactor};
use crate::actor;
use crate::common::config::Settings;
use crate::sys::headless::{DesktopSnapshot, HeadlessServer};
use crate::sys::window_server::Request;

/// Writes everything the reactor sees to a file, one RON value per line:
/// the settings, the desktop's workspaces, then every event.
#[derive(Default)]
pub struct Record {
    file: Option<File>,
    #[cfg(test)]
    temp: Option<NamedTempFile>,
}

impl Record {
    pub fn new(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => Some(
                File::create(path)
                    .with_context(|| format!("creating recording {}", path.display()))?,
            ),
            None => None,
        };
        Ok(Self {
            file,
            #[cfg(test)]
            temp: None,
        })
    }

    #[cfg(test)]
    pub fn new_for_test(temp: NamedTempFile) -> Self { Self { file: None, temp: Some(temp) } }

    fn file(&mut self) -> Option<&mut File> {
        #[cfg(test)]
        return self.file.as_mut().or(self.temp.as_mut().map(|temp| temp.as_file_mut()));
        #[cfg(not(test))]
        self.file.as_mut()
    }

    pub(super) fn start(&mut self, settings: &Settings, desktop: &DesktopSnapshot) {
        let Some(file) = self.file() else { return };
        if let Err(err) = write_line(file, settings).and_then(|()| write_line(file, desktop)) {
            warn!("Could not write recording header: {err:#}");
        }
    }

    pub(super) fn on_event(&mut self, event: &Event) {
        let Some(file) = self.file() else { return };
        if let Err(err) = write_line(file, event) {
            warn!("Could not record event: {err:#}");
        }
    }
}

fn write_line(file: &mut File, value: &impl Serialize) -> anyhow::Result<()> {
    let line = ron::ser::to_string(value)?;
    writeln!(file, "{line}")?;
    Ok(())
}

/// A reactor driven against a [`HeadlessServer`], one event at a time.
///
/// Each event is mirrored onto the desktop right before the reactor handles
/// it, and every request it makes is applied before the next event. The
/// follow-up events of those requests are dropped; whoever feeds the
/// session reports them as ordinary events.
pub struct HeadlessSession {
    server: HeadlessServer,
    reactor: Reactor,
    requests: actor::Receiver<Request>,
}

impl HeadlessSession {
    pub fn new(settings: Settings, server: HeadlessServer, record: Record) -> Self {
        let (tx, requests) = actor::channel();
        let reactor = Reactor::new(settings, Box::new(server.clone()), tx, record);
        Self { server, reactor, requests }
    }

    pub fn server(&self) -> &HeadlessServer { &self.server }

    pub fn reactor(&self) -> &Reactor { &self.reactor }

    /// Takes over the windows already on the desktop.
    pub fn start(&mut self, on_request: impl FnMut(Request)) {
        self.reactor.start();
        self.drain(on_request);
    }

    pub fn step(&mut self, event: Event, on_request: impl FnMut(Request)) {
        self.server.mirror(&event);
        self.reactor.handle_event(event);
        self.drain(on_request);
    }

    pub fn shutdown(&mut self, on_request: impl FnMut(Request)) {
        self.reactor.shutdown();
        self.drain(on_request);
    }

    fn drain(&mut self, mut on_request: impl FnMut(Request)) {
        while let Ok((span, request)) = self.requests.try_recv() {
            let _guard = span.enter();
            _ = self.server.apply(&request);
            on_request(request);
        }
    }
}

/// Re-drives a reactor from a recording, handing every request it makes to
/// `on_request` in order.
///
/// The desktop is rebuilt from the recorded workspaces. Follow-up events
/// come from the recording, not from the simulation.
pub fn replay(path: &Path, mut on_request: impl FnMut(Request)) -> anyhow::Result<()> {
    let file = BufReader::new(
        File::open(path).with_context(|| format!("opening recording {}", path.display()))?,
    );
    let mut lines = file.lines();
    let settings: Settings = ron::de::from_str(&lines.next().context("Empty recording")??)?;
    let desktop: DesktopSnapshot =
        ron::de::from_str(&lines.next().context("Recording has no desktop line")??)?;

    let mut session = HeadlessSession::new(settings, HeadlessServer::new(desktop), Record::default());
    for (number, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: Event = ron::de::from_str(&line)
            .with_context(|| format!("event {} of {}", number + 1, path.display()))?;
        session.step(event, &mut on_request);
    }
    Ok(())
}

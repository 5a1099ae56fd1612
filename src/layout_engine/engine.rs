use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::registry::{LayoutRegistry, UnknownLayout};
use super::systems::GridLayoutSystem;
use super::{Direction, LayoutSystem, LayoutSystemKind, WorkspaceLayouts};
use crate::common::config::Settings;
use crate::sys::geometry::{Rect, RectExt};
use crate::sys::window_server::{WindowId, WorkspaceIndex};

/// A key-bindable command. The string form (`toggle-floating`,
/// `focus-left`, `layout-grid`, `move-to-workspace-3`) is what appears in
/// configuration files; workspace numbers there are one-based.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum LayoutCommand {
    ToggleFloating,
    MaximizeWindow,
    FocusDirection(Direction),
    SetLayout(String),
    MoveToWorkspace(WorkspaceIndex),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("invalid direction in {0:?}")]
    Direction(String),
    #[error("missing layout name in {0:?}")]
    LayoutName(String),
    #[error("workspace number in {0:?} must be at least 1")]
    Workspace(String),
}

impl FromStr for LayoutCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toggle-floating" => return Ok(Self::ToggleFloating),
            "maximize-window" => return Ok(Self::MaximizeWindow),
            _ => {}
        }
        if let Some(dir) = s.strip_prefix("focus-") {
            return dir
                .parse()
                .map(Self::FocusDirection)
                .map_err(|_| ParseCommandError::Direction(s.to_owned()));
        }
        if let Some(name) = s.strip_prefix("layout-") {
            if name.is_empty() {
                return Err(ParseCommandError::LayoutName(s.to_owned()));
            }
            return Ok(Self::SetLayout(name.to_owned()));
        }
        if let Some(number) = s.strip_prefix("move-to-workspace-") {
            return match number.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Self::MoveToWorkspace(n - 1)),
                _ => Err(ParseCommandError::Workspace(s.to_owned())),
            };
        }
        Err(ParseCommandError::Unknown(s.to_owned()))
    }
}

impl fmt::Display for LayoutCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToggleFloating => f.write_str("toggle-floating"),
            Self::MaximizeWindow => f.write_str("maximize-window"),
            Self::FocusDirection(dir) => write!(f, "focus-{dir}"),
            Self::SetLayout(name) => write!(f, "layout-{name}"),
            Self::MoveToWorkspace(ws) => write!(f, "move-to-workspace-{}", ws + 1),
        }
    }
}

impl TryFrom<String> for LayoutCommand {
    type Error = ParseCommandError;

    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<LayoutCommand> for String {
    fn from(value: LayoutCommand) -> Self { value.to_string() }
}

/// Turns a workspace's tiling windows into the rectangles they should be
/// moved to, using whichever layout that workspace has selected.
#[derive(Debug)]
pub struct LayoutEngine {
    registry: LayoutRegistry,
    workspace_layouts: WorkspaceLayouts,
    gap: u32,
    default_layout: String,
}

impl LayoutEngine {
    pub fn new(settings: &Settings) -> Self {
        let mut engine = LayoutEngine {
            registry: LayoutRegistry::default(),
            workspace_layouts: WorkspaceLayouts::default(),
            gap: 0,
            default_layout: String::new(),
        };
        engine.set_layout_settings(settings);
        engine
    }

    /// An unknown default layout falls back to grid, so untouched
    /// workspaces always have something to tile with.
    pub fn set_layout_settings(&mut self, settings: &Settings) {
        self.gap = settings.gap_size;
        self.default_layout = if self.registry.has(&settings.default_layout) {
            settings.default_layout.clone()
        } else {
            let fallback = LayoutSystemKind::from(GridLayoutSystem).name();
            warn!(layout = %settings.default_layout, fallback, "Unknown default layout");
            fallback.to_owned()
        };
    }

    pub fn registry(&self) -> &LayoutRegistry { &self.registry }

    /// The layout assigned to `workspace`, if it has been touched yet.
    pub fn layout_name(&self, workspace: WorkspaceIndex) -> Option<&str> {
        self.workspace_layouts.get(workspace)
    }

    /// Gapped target rectangles for `windows` on `workspace`, in order.
    /// Assigns the default layout to the workspace on first use.
    pub fn calculate(
        &mut self,
        workspace: WorkspaceIndex,
        windows: &[WindowId],
        area: Rect,
    ) -> Result<Vec<(WindowId, Rect)>, UnknownLayout> {
        if self.workspace_layouts.get(workspace).is_none()
            && !self.registry.has(&self.default_layout)
        {
            return Err(UnknownLayout(self.default_layout.clone()));
        }
        let name = self.workspace_layouts.ensure(workspace, &self.default_layout);
        let Some(system) = self.registry.resolve(name) else {
            return Err(UnknownLayout(name.to_owned()));
        };
        debug!(workspace, layout = name, count = windows.len(), "Calculating layout");

        let gap = self.gap;
        Ok(system
            .calculate_layout(windows, area)
            .into_iter()
            .map(|(wid, rect)| (wid, rect.with_gap(gap)))
            .collect())
    }

    pub fn switch_layout(
        &mut self,
        workspace: WorkspaceIndex,
        name: &str,
    ) -> Result<(), UnknownLayout> {
        if !self.registry.has(name) {
            return Err(UnknownLayout(name.to_owned()));
        }
        self.workspace_layouts.set(workspace, name);
        Ok(())
    }

    pub fn clear(&mut self) { self.workspace_layouts.clear(); }
}

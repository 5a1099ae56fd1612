use crate::common::collections::HashMap;
use crate::sys::window_server::WorkspaceIndex;

/// Which layout each workspace is using. A workspace gets an entry the first
/// time it is laid out or explicitly switched.
#[derive(Debug, Default, Clone)]
pub(crate) struct WorkspaceLayouts {
    map: HashMap<WorkspaceIndex, String>,
}

impl WorkspaceLayouts {
    pub(crate) fn ensure(&mut self, workspace: WorkspaceIndex, default: &str) -> &str {
        self.map.entry(workspace).or_insert_with(|| {
            tracing::debug!(workspace, layout = default, "Using default layout");
            default.to_owned()
        })
        .as_str()
    }

    pub(crate) fn get(&self, workspace: WorkspaceIndex) -> Option<&str> {
        self.map.get(&workspace).map(String::as_str)
    }

    pub(crate) fn set(&mut self, workspace: WorkspaceIndex, name: &str) {
        tracing::debug!(workspace, layout = name, "Switching layout");
        self.map.insert(workspace, name.to_owned());
    }

    pub(crate) fn clear(&mut self) { self.map.clear(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_keeps_first_assignment() {
        let mut layouts = WorkspaceLayouts::default();
        assert_eq!(layouts.get(0), None);
        assert_eq!(layouts.ensure(0, "grid"), "grid");
        assert_eq!(layouts.ensure(0, "rows"), "grid");
    }

    #[test]
    fn set_replaces_per_workspace() {
        let mut layouts = WorkspaceLayouts::default();
        layouts.ensure(0, "grid");
        layouts.set(1, "columns");
        layouts.set(0, "centered");
        assert_eq!(layouts.get(0), Some("centered"));
        assert_eq!(layouts.get(1), Some("columns"));

        layouts.clear();
        assert_eq!(layouts.get(0), None);
    }
}

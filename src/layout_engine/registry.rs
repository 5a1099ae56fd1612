use strum::IntoEnumIterator;

use super::LayoutSystemKind;
use crate::common::collections::BTreeMap;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("no layout named {0:?}")]
pub struct UnknownLayout(pub String);

/// Name to algorithm table. Populated once; names are case-sensitive and
/// iterate in sorted order.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    systems: BTreeMap<&'static str, LayoutSystemKind>,
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        let systems = LayoutSystemKind::iter().map(|kind| (kind.name(), kind)).collect();
        Self { systems }
    }
}

impl LayoutRegistry {
    pub fn resolve(&self, name: &str) -> Option<LayoutSystemKind> {
        self.systems.get(name).copied()
    }

    pub fn has(&self, name: &str) -> bool { self.systems.contains_key(name) }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.keys().copied()
    }
}

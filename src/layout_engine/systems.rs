use enum_dispatch::enum_dispatch;

use crate::sys::geometry::Rect;
use crate::sys::window_server::WindowId;

/// A stateless placement strategy. Output frames depend only on the window
/// count and the usable rectangle, never on the windows themselves.
#[enum_dispatch]
pub trait LayoutSystem {
    /// Exactly `count` frames; frame `i` belongs to the `i`th window.
    fn frames(&self, count: usize, screen: Rect) -> Vec<Rect>;

    fn calculate_layout(&self, windows: &[WindowId], screen: Rect) -> Vec<(WindowId, Rect)> {
        let frames = self.frames(windows.len(), screen);
        debug_assert_eq!(frames.len(), windows.len());
        windows.iter().copied().zip(frames).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[enum_dispatch(LayoutSystem)]
pub enum LayoutSystemKind {
    Grid(GridLayoutSystem),
    Columns(ColumnLayoutSystem),
    Rows(RowLayoutSystem),
    Maximized(MaximizedLayoutSystem),
    Centered(CenteredLayoutSystem),
}

impl LayoutSystemKind {
    pub fn name(&self) -> &'static str { self.into() }
}

fn count_as_i32(count: usize) -> i32 { i32::try_from(count).unwrap_or(i32::MAX) }

mod centered;
mod grid;
mod maximized;
mod stripes;

pub use centered::CenteredLayoutSystem;
pub use grid::GridLayoutSystem;
pub use maximized::MaximizedLayoutSystem;
pub use stripes::{ColumnLayoutSystem, RowLayoutSystem};

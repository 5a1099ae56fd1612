use super::{LayoutSystem, count_as_i32};
use crate::sys::geometry::Rect;

/// Equal-width columns, left to right, each spanning the full height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnLayoutSystem;

/// Equal-height rows, top to bottom, each spanning the full width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowLayoutSystem;

impl LayoutSystem for ColumnLayoutSystem {
    fn frames(&self, count: usize, screen: Rect) -> Vec<Rect> {
        if count <= 1 {
            return vec![screen; count];
        }
        let width = screen.width.div_euclid(count_as_i32(count));
        (0..count)
            .map(|i| Rect {
                x: screen.x.saturating_add(count_as_i32(i).saturating_mul(width)),
                width,
                ..screen
            })
            .collect()
    }
}

impl LayoutSystem for RowLayoutSystem {
    fn frames(&self, count: usize, screen: Rect) -> Vec<Rect> {
        if count <= 1 {
            return vec![screen; count];
        }
        let height = screen.height.div_euclid(count_as_i32(count));
        (0..count)
            .map(|i| Rect {
                y: screen.y.saturating_add(count_as_i32(i).saturating_mul(height)),
                height,
                ..screen
            })
            .collect()
    }
}

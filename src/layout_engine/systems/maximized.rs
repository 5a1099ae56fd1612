use super::LayoutSystem;
use crate::sys::geometry::Rect;

/// Every window gets the whole screen; they stack on top of each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaximizedLayoutSystem;

impl LayoutSystem for MaximizedLayoutSystem {
    fn frames(&self, count: usize, screen: Rect) -> Vec<Rect> { vec![screen; count] }
}

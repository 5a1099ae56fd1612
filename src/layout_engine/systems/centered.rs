use super::LayoutSystem;
use crate::sys::geometry::Rect;

/// Every window gets the same rectangle: three quarters of the screen in
/// each dimension, centered. Independent of the window count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CenteredLayoutSystem;

impl CenteredLayoutSystem {
    fn centered(screen: Rect) -> Rect {
        let width_reduction = screen.width.div_euclid(4);
        let height_reduction = screen.height.div_euclid(4);
        Rect {
            x: screen.x + width_reduction / 2,
            y: screen.y + height_reduction / 2,
            width: screen.width - width_reduction,
            height: screen.height - height_reduction,
        }
    }
}

impl LayoutSystem for CenteredLayoutSystem {
    fn frames(&self, count: usize, screen: Rect) -> Vec<Rect> {
        vec![Self::centered(screen); count]
    }
}

//! Integer rectangles in display units and the helpers the tiling engine
//! builds on.

use serde::{Deserialize, Serialize};

use crate::layout_engine::Direction;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn center(&self) -> Point {
        Point {
            x: f64::from(self.x) + f64::from(self.width) / 2.0,
            y: f64::from(self.y) + f64::from(self.height) / 2.0,
        }
    }
}

pub trait RectExt {
    fn with_gap(&self, gap: u32) -> Rect;
    fn same_as(&self, other: Option<&Rect>) -> bool;
}

impl RectExt for Rect {
    fn with_gap(&self, gap: u32) -> Rect { apply_gap(*self, gap) }

    fn same_as(&self, other: Option<&Rect>) -> bool { rect_equal(Some(self), other) }
}

/// Insets every side of `rect` by `gap`. Width and height never drop below 1.
pub fn apply_gap(rect: Rect, gap: u32) -> Rect {
    let gap = i64::from(gap);
    let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Rect {
        x: clamp(i64::from(rect.x) + gap),
        y: clamp(i64::from(rect.y) + gap),
        width: clamp((i64::from(rect.width) - gap * 2).max(1)),
        height: clamp((i64::from(rect.height) - gap * 2).max(1)),
    }
}

/// Field-wise equality. A missing rectangle is never equal to anything, not
/// even another missing one.
pub fn rect_equal(a: Option<&Rect>, b: Option<&Rect>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Distance between the centers of `from` and `to` along `direction`, or
/// `None` if `to` does not lie strictly on that side of `from`.
pub fn directional_distance(from: &Rect, to: &Rect, direction: Direction) -> Option<f64> {
    let source = from.center();
    let candidate = to.center();
    let distance = match direction {
        Direction::Left => source.x - candidate.x,
        Direction::Right => candidate.x - source.x,
        Direction::Up => source.y - candidate.y,
        Direction::Down => candidate.y - source.y,
    };
    (distance > 0.0).then_some(distance)
}

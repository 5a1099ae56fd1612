use super::{LayoutSystem, count_as_i32};
use crate::sys::geometry::Rect;

/// Row-major grid with `ceil(sqrt(n))` columns. Cells are floored, so the
/// last row and column can fall a few units short of the screen edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridLayoutSystem;

impl GridLayoutSystem {
    fn dimensions(count: usize) -> (usize, usize) {
        let root = count.isqrt();
        let columns = if root * root == count { root } else { root + 1 };
        (columns, count.div_ceil(columns))
    }
}

impl LayoutSystem for GridLayoutSystem {
    fn frames(&self, count: usize, screen: Rect) -> Vec<Rect> {
        match count {
            0 => return vec![],
            1 => return vec![screen],
            _ => {}
        }

        let (columns, rows) = Self::dimensions(count);
        let cell_width = screen.width.div_euclid(count_as_i32(columns));
        let cell_height = screen.height.div_euclid(count_as_i32(rows));

        (0..count)
            .map(|i| {
                let row = count_as_i32(i / columns);
                let column = count_as_i32(i % columns);
                Rect {
                    x: screen.x.saturating_add(column.saturating_mul(cell_width)),
                    y: screen.y.saturating_add(row.saturating_mul(cell_height)),
                    width: cell_width,
                    height: cell_height,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_follow_square_root() {
        assert_eq!(GridLayoutSystem::dimensions(2), (2, 1));
        assert_eq!(GridLayoutSystem::dimensions(3), (2, 2));
        assert_eq!(GridLayoutSystem::dimensions(4), (2, 2));
        assert_eq!(GridLayoutSystem::dimensions(5), (3, 2));
        assert_eq!(GridLayoutSystem::dimensions(9), (3, 3));
        assert_eq!(GridLayoutSystem::dimensions(10), (4, 3));
    }
}

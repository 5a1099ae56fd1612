use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;
use test_log::test;

use crate::common::config::Settings;
use crate::layout_engine::systems::{
    CenteredLayoutSystem, ColumnLayoutSystem, GridLayoutSystem, MaximizedLayoutSystem,
    RowLayoutSystem,
};
use crate::layout_engine::{LayoutCommand, LayoutEngine, LayoutSystem, LayoutSystemKind};
use crate::layout_engine::{Direction, UnknownLayout};
use crate::sys::geometry::Rect;
use crate::sys::window_server::WindowId;

fn w(idx: u64) -> WindowId { WindowId::new(idx) }

fn windows(n: u64) -> Vec<WindowId> { (1..=n).map(w).collect() }

fn screen() -> Rect { Rect::new(0, 0, 1920, 1080) }

mod every_layout {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn returns_one_frame_per_window() {
        for kind in LayoutSystemKind::iter() {
            for n in 0..=12 {
                let frames = kind.frames(n, screen());
                assert_eq!(frames.len(), n, "{} with {n} windows", kind.name());
            }
        }
    }

    #[test]
    fn preserves_window_order() {
        let wids = vec![w(7), w(3), w(9)];
        for kind in LayoutSystemKind::iter() {
            let layout = kind.calculate_layout(&wids, screen());
            let order: Vec<_> = layout.iter().map(|(wid, _)| *wid).collect();
            assert_eq!(order, wids, "{}", kind.name());
        }
    }

    #[test]
    fn frames_stay_positive_after_gap() {
        for kind in LayoutSystemKind::iter() {
            for n in 1..=9 {
                for (_, rect) in kind.calculate_layout(&windows(n), screen()) {
                    let gapped = crate::sys::geometry::apply_gap(rect, 8);
                    assert!(gapped.width >= 1 && gapped.height >= 1, "{}", kind.name());
                }
            }
        }
    }

    #[test]
    fn is_idempotent() {
        for kind in LayoutSystemKind::iter() {
            assert_eq!(kind.frames(5, screen()), kind.frames(5, screen()));
        }
    }
}

mod grid {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn single_window_fills_screen() {
        assert_eq!(GridLayoutSystem.frames(1, screen()), vec![screen()]);
    }

    #[test]
    fn four_windows_make_two_by_two() {
        let frames = GridLayoutSystem.frames(4, Rect::new(0, 0, 100, 100));
        assert_eq!(
            frames,
            vec![
                Rect::new(0, 0, 50, 50),
                Rect::new(50, 0, 50, 50),
                Rect::new(0, 50, 50, 50),
                Rect::new(50, 50, 50, 50),
            ]
        );
    }

    #[test]
    fn three_windows_leave_a_hole() {
        let frames = GridLayoutSystem.frames(3, Rect::new(10, 20, 100, 100));
        assert_eq!(
            frames,
            vec![
                Rect::new(10, 20, 50, 50),
                Rect::new(60, 20, 50, 50),
                Rect::new(10, 70, 50, 50),
            ]
        );
    }

    #[test]
    fn cells_are_floored() {
        let frames = GridLayoutSystem.frames(5, Rect::new(0, 0, 100, 101));
        assert!(frames.iter().all(|f| f.width == 33 && f.height == 50));
        assert_eq!(frames[4], Rect::new(33, 50, 33, 50));
    }
}

mod stripes {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn columns_split_width() {
        let frames = ColumnLayoutSystem.frames(3, Rect::new(0, 0, 90, 40));
        assert_eq!(
            frames,
            vec![Rect::new(0, 0, 30, 40), Rect::new(30, 0, 30, 40), Rect::new(60, 0, 30, 40)]
        );
    }

    #[test]
    fn rows_split_height() {
        let frames = RowLayoutSystem.frames(2, Rect::new(5, 5, 40, 91));
        assert_eq!(frames, vec![Rect::new(5, 5, 40, 45), Rect::new(5, 50, 40, 45)]);
    }

    #[test]
    fn empty_and_single() {
        assert!(ColumnLayoutSystem.frames(0, screen()).is_empty());
        assert!(RowLayoutSystem.frames(0, screen()).is_empty());
        assert_eq!(ColumnLayoutSystem.frames(1, screen()), vec![screen()]);
        assert_eq!(RowLayoutSystem.frames(1, screen()), vec![screen()]);
    }
}

mod stacked {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn maximized_repeats_screen() {
        assert_eq!(MaximizedLayoutSystem.frames(3, screen()), vec![screen(); 3]);
    }

    #[test]
    fn centered_shrinks_by_a_quarter() {
        let expected = Rect::new(25, 12, 150, 75);
        for n in 1..=4 {
            assert_eq!(
                CenteredLayoutSystem.frames(n, Rect::new(0, 0, 200, 100)),
                vec![expected; n]
            );
        }
        assert!(CenteredLayoutSystem.frames(0, screen()).is_empty());
    }
}

mod engine {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    fn settings(gap: u32, layout: &str) -> Settings {
        Settings {
            gap_size: gap,
            default_layout: layout.into(),
            ..Default::default()
        }
    }

    #[test]
    fn applies_gap_to_each_cell() {
        let mut engine = LayoutEngine::new(&settings(5, "columns"));
        let frames = engine.calculate(0, &windows(2), Rect::new(0, 0, 100, 50)).unwrap();
        assert_eq!(
            frames,
            vec![(w(1), Rect::new(5, 5, 40, 40)), (w(2), Rect::new(55, 5, 40, 40))]
        );
        assert_eq!(engine.layout_name(0), Some("columns"));
    }

    #[test]
    fn switch_is_per_workspace() {
        let mut engine = LayoutEngine::new(&settings(0, "grid"));
        engine.switch_layout(1, "maximized").unwrap();
        let area = Rect::new(0, 0, 100, 100);

        let ws0 = engine.calculate(0, &windows(2), area).unwrap();
        let ws1 = engine.calculate(1, &windows(2), area).unwrap();
        assert_eq!(ws0[1].1, Rect::new(50, 0, 50, 100));
        assert_eq!(ws1[1].1, area);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let mut engine = LayoutEngine::new(&settings(0, "grid"));
        assert_eq!(
            engine.switch_layout(0, "Grid"),
            Err(UnknownLayout("Grid".into()))
        );
        assert_eq!(engine.layout_name(0), None);
    }

    #[test]
    fn unknown_default_falls_back_to_grid() {
        let mut engine = LayoutEngine::new(&settings(0, "spiral"));
        let frames = engine.calculate(0, &windows(4), Rect::new(0, 0, 100, 100)).unwrap();
        assert_eq!(frames[3].1, Rect::new(50, 50, 50, 50));
        assert_eq!(engine.layout_name(0), Some("grid"));

        engine.set_layout_settings(&settings(0, "spiral"));
        engine.calculate(1, &[], screen()).unwrap();
        assert_eq!(engine.layout_name(1), Some("grid"));
    }

    #[test]
    fn new_default_only_affects_untouched_workspaces() {
        let mut engine = LayoutEngine::new(&settings(0, "grid"));
        engine.calculate(0, &[], screen()).unwrap();
        engine.set_layout_settings(&settings(0, "rows"));
        engine.calculate(1, &[], screen()).unwrap();
        assert_eq!(engine.layout_name(0), Some("grid"));
        assert_eq!(engine.layout_name(1), Some("rows"));

        engine.clear();
        assert_eq!(engine.layout_name(0), None);
    }
}

mod commands {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn parses_binding_names() {
        let cases = [
            ("toggle-floating", LayoutCommand::ToggleFloating),
            ("maximize-window", LayoutCommand::MaximizeWindow),
            ("focus-left", LayoutCommand::FocusDirection(Direction::Left)),
            ("focus-down", LayoutCommand::FocusDirection(Direction::Down)),
            ("layout-grid", LayoutCommand::SetLayout("grid".into())),
            ("move-to-workspace-1", LayoutCommand::MoveToWorkspace(0)),
            ("move-to-workspace-9", LayoutCommand::MoveToWorkspace(8)),
        ];
        for (text, command) in cases {
            assert_eq!(text.parse::<LayoutCommand>().as_ref(), Ok(&command));
            assert_eq!(command.to_string(), text);
        }
    }

    #[test]
    fn rejects_malformed_names() {
        for text in ["", "focus-sideways", "layout-", "move-to-workspace-0", "move-to-workspace-x", "float"]
        {
            assert!(text.parse::<LayoutCommand>().is_err(), "{text:?}");
        }
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&LayoutCommand::MoveToWorkspace(2)).unwrap();
        assert_eq!(json, "\"move-to-workspace-3\"");
        let back: LayoutCommand = serde_json::from_str("\"focus-up\"").unwrap();
        assert_eq!(back, LayoutCommand::FocusDirection(Direction::Up));
        assert!(serde_json::from_str::<LayoutCommand>("\"focus-nowhere\"").is_err());
    }
}

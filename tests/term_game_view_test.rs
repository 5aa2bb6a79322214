use tui_stacker::core::{Cell, GameOptions, Round, Scene, SessionSnapshot};
use tui_stacker::term::{AnchorY, FrameBuffer, GameView, Rgb, Viewport};
use tui_stacker::types::BlockColor;

fn in_round(round: &Round) -> SessionSnapshot {
    SessionSnapshot {
        scene: Scene::InRound,
        round: round.snapshot(),
    }
}

fn ch(fb: &FrameBuffer, x: u16, y: u16) -> char {
    fb.get(x, y).map(|g| g.ch).unwrap_or('\0')
}

#[test]
fn test_border_corners_fit_exact_viewport() {
    let round = Round::new(GameOptions::default());
    let fb = GameView::default().render(&in_round(&round), Viewport::new(22, 22));

    assert_eq!(ch(&fb, 0, 0), '┌');
    assert_eq!(ch(&fb, 21, 0), '┐');
    assert_eq!(ch(&fb, 0, 21), '└');
    assert_eq!(ch(&fb, 21, 21), '┘');
    assert_eq!(ch(&fb, 1, 1), '·');
}

#[test]
fn test_locked_cell_is_two_columns_wide() {
    let round = Round::new(GameOptions::default());
    let mut snap = in_round(&round);
    snap.round.current = None;
    snap.round.ghost = None;
    snap.round.cells[19 * 10] = Cell::locked(BlockColor::Red);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    for x in [1, 2] {
        let glyph = fb.get(x, 20).unwrap();
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg, Rgb::from(BlockColor::Red));
    }
    assert_eq!(ch(&fb, 3, 20), '·');
}

#[test]
fn test_board_is_centered_in_viewport() {
    let round = Round::new(GameOptions::default());
    let fb = GameView::default().render(&in_round(&round), Viewport::new(22, 30));
    assert_eq!(ch(&fb, 0, 4), '┌');
    assert_eq!(ch(&fb, 21, 25), '┘');

    let top = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&in_round(&round), Viewport::new(22, 30));
    assert_eq!(ch(&top, 0, 0), '┌');
}

#[test]
fn test_side_panel_shows_stats_when_wide_enough() {
    let round = Round::new(GameOptions::default());
    let fb = GameView::default().render(&in_round(&round), Viewport::new(60, 30));

    // Board frame spans columns 19..=40, panel starts two columns after it.
    assert_eq!(ch(&fb, 19, 4), '┌');
    assert!(fb.row_text(4).contains("SCORE"));
    assert_eq!(ch(&fb, 43, 4), 'S');
    assert_eq!(ch(&fb, 43, 5), '0');

    let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    for label in ["LEVEL", "LINES", "TIME", "HOLD", "NEXT"] {
        assert!(text.contains(label), "missing {label}");
    }

    let narrow = GameView::default().render(&in_round(&round), Viewport::new(30, 30));
    let text: String = (0..narrow.height()).map(|y| narrow.row_text(y)).collect();
    assert!(!text.contains("SCORE"));
}

#[test]
fn test_game_over_scene_draws_heading_and_menu() {
    let round = Round::new(GameOptions::default());
    let snap = SessionSnapshot {
        scene: Scene::GameOver {
            selected: tui_stacker::core::GameOverItem::Retry,
        },
        round: round.snapshot(),
    };
    let fb = GameView::default().render(&snap, Viewport::new(40, 24));
    let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("> Retry"));
}

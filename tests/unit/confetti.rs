use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::{clock::ManualClock, input::ScriptedInput};

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn grid_clips_writes_outside() {
    let mut grid = CellGrid::new(4, 2);
    grid.put_str(-2, 0, "abcdef", Style::default());
    grid.put(0, 5, 'x', Style::default());
    grid.put(9, 1, 'x', Style::default());
    assert_eq!(grid.row_text(0), "cdef");
    assert_eq!(grid.row_text(1), "    ");
    assert_eq!(grid.get(4, 0), None);
}

#[test]
fn center_x_never_negative() {
    assert_eq!(center_x(80, "abcd"), 38);
    assert_eq!(center_x(3, TITLE), 0);
}

#[test]
fn title_colors_cycle_with_time() {
    let mut scene = Scene::new(80, 24, true);
    let mut r = rng();
    scene.step(80, 24, &mut r);
    assert_eq!(scene.title_style(0).hue, Some(Hue::Red));
    assert_eq!(scene.title_style(1).hue, Some(Hue::Yellow));
    assert_eq!(scene.title_style(6).hue, Some(Hue::Red));
    assert!(scene.title_style(0).bold);

    scene.step(80, 24, &mut r);
    assert_eq!(scene.tick(), 2);
    assert_eq!(scene.title_style(0).hue, Some(Hue::Yellow));
}

#[test]
fn monochrome_has_no_hues() {
    let mut scene = Scene::new(80, 24, false);
    let mut r = rng();
    for _ in 0..12 {
        scene.step(80, 24, &mut r);
    }
    assert_eq!(scene.title_style(3).hue, None);
    assert!(!scene.confetti().is_empty());
    assert!(scene.confetti().iter().all(|p| p.hue.is_none()));
}

#[test]
fn figure_starts_centered_and_moves() {
    let mut scene = Scene::new(80, 24, true);
    let (w, _) = Figure::extent();
    let start = scene.figure();
    assert_eq!(start.x, (80 - w) / 2);
    assert_eq!(start.y, 12);

    scene.step(80, 24, &mut rng());
    let moved = scene.figure();
    assert_eq!((moved.x, moved.y), (start.x + 2, start.y + 1));
}

#[test]
fn figure_bounces_off_the_floor() {
    let mut scene = Scene::new(80, 24, true);
    let mut r = rng();
    let (_, h) = Figure::extent();
    let mut seen_up = false;
    for _ in 0..200 {
        scene.step(80, 24, &mut r);
        let f = scene.figure();
        assert!(f.y > 6 - 1 && f.y + h < 24, "y = {}", f.y);
        seen_up |= f.vy < 0;
    }
    assert!(seen_up);
}

#[test]
fn figure_bounces_off_the_sides() {
    let mut scene = Scene::new(60, 30, true);
    let mut r = rng();
    let mut dirs = Vec::new();
    for _ in 0..200 {
        scene.step(60, 30, &mut r);
        dirs.push(scene.figure().vx);
    }
    assert!(dirs.contains(&2));
    assert!(dirs.contains(&-2));
}

#[test]
fn confetti_spawns_every_sixth_tick_and_falls() {
    let mut scene = Scene::new(80, 40, true);
    let mut r = rng();
    for _ in 0..5 {
        scene.step(80, 40, &mut r);
    }
    assert!(scene.confetti().is_empty());

    scene.step(80, 40, &mut r);
    assert_eq!(scene.confetti().len(), 6);
    assert!(scene.confetti().iter().all(|p| p.y == 7));
    assert!(scene.confetti().iter().all(|p| (0..80).contains(&p.x)));

    scene.step(80, 40, &mut r);
    assert!(scene.confetti().iter().all(|p| p.y == 8));
}

#[test]
fn confetti_is_dropped_at_the_bottom() {
    let mut scene = Scene::new(40, 12, true);
    let mut r = rng();
    for _ in 0..60 {
        scene.step(40, 12, &mut r);
        assert!(scene.confetti().iter().all(|p| p.y < 11));
    }
}

#[test]
fn confetti_stops_spawning_at_the_cap() {
    let mut scene = Scene::new(80, 500, true);
    let mut r = rng();
    let mut max_seen = 0;
    for _ in 0..200 {
        let before = scene.confetti().len();
        scene.step(80, 500, &mut r);
        let after = scene.confetti().len();
        if before >= MAX_PIECES {
            assert!(after <= before);
        }
        max_seen = max_seen.max(after);
    }
    assert!(max_seen >= MAX_PIECES);
    assert!(max_seen < MAX_PIECES + 6);
}

#[test]
fn draw_places_text_rows() {
    let mut scene = Scene::new(80, 24, true);
    scene.step(80, 24, &mut rng());
    let grid = scene.draw(80, 24);
    assert!(grid.row_text(2).contains(TITLE));
    assert!(grid.row_text(4).contains(TAGLINE));
    assert!(grid.row_text(22).contains(FOOTER));
    let footer_x = center_x(80, FOOTER);
    assert!(grid.get(footer_x, 22).unwrap().style.dim);
}

#[test]
fn tiny_terminal_does_not_panic() {
    let mut scene = Scene::new(1, 1, true);
    let mut r = rng();
    for _ in 0..30 {
        scene.step(1, 1, &mut r);
        let _ = scene.draw(1, 1);
    }
}

#[test]
fn painter_only_resends_changed_cells() {
    let mut painter = GridPainter::new(Vec::new());
    let mut grid = CellGrid::new(5, 1);
    grid.put_str(0, 0, "hello", Style::default());
    painter.paint(grid.clone()).unwrap();
    let first = painter.out.len();
    assert!(first > 0);

    painter.paint(grid.clone()).unwrap();
    let unchanged = painter.out.len() - first;

    grid.put(1, 0, 'a', Style::default());
    painter.paint(grid).unwrap();
    let changed = painter.out.len() - first - unchanged;
    assert!(changed > unchanged);

    let text = String::from_utf8(painter.into_inner()).unwrap();
    assert!(text.contains('h'));
}

#[test]
fn run_stops_on_q() {
    let mut painter = GridPainter::new(Vec::new());
    let mut input = ScriptedInput::idle()
        .then(vec![])
        .then(vec![InputEvent::Key('x')])
        .then(vec![InputEvent::Key('Q')]);
    let mut clock = ManualClock::new();
    let ticks = run_animation(
        &mut painter,
        &mut input,
        &mut clock,
        &mut rng(),
        || Ok((40, 20)),
        true,
        None,
    )
    .unwrap();
    assert_eq!(ticks, 3);
    assert_eq!(clock.now(), TICK * 2);
}

#[test]
fn run_respects_max_ticks() {
    let mut painter = GridPainter::new(Vec::new());
    let mut clock = ManualClock::new();
    let ticks = run_animation(
        &mut painter,
        &mut ScriptedInput::idle(),
        &mut clock,
        &mut rng(),
        || Ok((40, 20)),
        false,
        Some(10),
    )
    .unwrap();
    assert_eq!(ticks, 10);
    assert_eq!(clock.now(), TICK * 10);
}

//! End-to-end carousel scenarios driven through the public [`Carousel`] API.
//!
//! Frames are delivered by draining the [`ManualScheduler`] the same way a
//! host render loop would.

use std::time::Duration;

use fcarousel_core::drag::landing_index;
use fcarousel_core::{
    BoxSize, Carousel, CarouselError, CellAlign, CellId, Direction, Instant, Options, OptionsPatch,
    Point, ReLayoutReason, Size,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn build(options: Options, container: Size, cells: &[BoxSize]) -> (Carousel, Vec<CellId>) {
    let mut carousel = Carousel::new(options).expect("valid options");
    carousel
        .set_container_size(container)
        .expect("finite container");
    let ids = cells
        .iter()
        .enumerate()
        .map(|(i, size)| carousel.add_cell_with(i as i64, *size).expect("finite box"))
        .collect();
    carousel.activate();
    (carousel, ids)
}

/// Eight 100-wide cells in a 300-wide container.
fn eight(options: Options) -> (Carousel, Vec<CellId>) {
    build(
        options,
        Size::new(300.0, 200.0),
        &[BoxSize::fixed(100.0, 100.0); 8],
    )
}

/// Five 1-wide cells, left aligned, in a 1-wide container.
fn five_unit(options: Options) -> (Carousel, Vec<CellId>) {
    build(
        options.with_cell_align(CellAlign::Left),
        Size::new(1.0, 1.0),
        &[BoxSize::fixed(1.0, 1.0); 5],
    )
}

fn settle(carousel: &mut Carousel) -> usize {
    let mut frames = 0;
    while carousel.scheduler_mut().take() {
        carousel.tick();
        frames += 1;
        assert!(frames < 20_000, "animation did not settle");
    }
    frames
}

fn close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

// ── Centered slides ─────────────────────────────────────────────────────

#[test]
fn one_cell_per_slide_targets_cell_centers() {
    let (carousel, _) = eight(Options::default());
    let targets: Vec<f64> = carousel.slides().iter().map(|s| s.target).collect();
    let expected: Vec<f64> = (0..8).map(|i| f64::from(i) * 100.0 + 50.0).collect();
    assert_eq!(targets, expected);
}

// ── Grouped cells ───────────────────────────────────────────────────────

#[test]
fn grouped_slides_center_on_their_own_span() {
    let (carousel, ids) = eight(Options::default().with_group_cells(3));
    let slides = carousel.slides();
    assert_eq!(slides.len(), 3);
    let members: Vec<usize> = slides.iter().map(|s| s.cells.len()).collect();
    assert_eq!(members, vec![3, 3, 2]);
    let targets: Vec<f64> = slides.iter().map(|s| s.target).collect();
    assert_eq!(targets, vec![150.0, 450.0, 700.0]);
    assert_eq!(carousel.slide_for_cell(ids[7]).map(|(i, _)| i), Some(2));
}

// ── Loop landing ────────────────────────────────────────────────────────

#[test]
fn loop_landing_prefers_the_wrapped_slide() {
    let (carousel, _) = five_unit(Options::default().with_loop(true));
    assert_eq!(landing_index(carousel.state(), 0.8), -1);
}

#[test]
fn loop_slow_drag_right_selects_the_last_slide() {
    let (mut carousel, _) = five_unit(Options::default().with_loop(true));
    let t0 = Instant::now();
    carousel.pointer_down();
    carousel.drag_start(t0);
    carousel.drag_move(Point::new(0.8, 0.0));
    // Let the slider catch up with the pointer and come to rest under it.
    for _ in 0..4 {
        assert!(carousel.scheduler_mut().take());
        carousel.tick();
    }
    assert!(close(carousel.state().slider.x, 0.8, 1e-9));
    carousel.pointer_up();
    carousel.drag_end(t0 + Duration::from_millis(500));

    assert_eq!(carousel.selected_index(), 4);
    settle(&mut carousel);
    // Raw offset went one track back; the drawn track is where slide 4 rests.
    assert!(close(carousel.state().slider.x, -4.0, 0.1));
    assert!(close(carousel.slider_position().x, -4.0, 0.1));
}

// ── Free scroll ─────────────────────────────────────────────────────────

#[test]
fn free_scroll_past_the_end_snaps() {
    let options = Options::default()
        .with_free_scroll(true)
        .with_initial_index(7);
    let (mut carousel, _) = eight(options);
    let t0 = Instant::now();
    carousel.pointer_down();
    carousel.drag_start(t0);
    carousel.drag_move(Point::new(-60.0, 0.0));
    assert!(carousel.scheduler_mut().take());
    carousel.tick();
    carousel.pointer_up();
    carousel.drag_end(t0 + Duration::from_millis(300));

    assert!(!carousel.state().animation.is_free_scrolling);
    assert_eq!(carousel.selected_index(), 7);
    settle(&mut carousel);
    assert!(close(carousel.state().slider.x, -750.0, 0.5));
}

// ── Removing cells ──────────────────────────────────────────────────────

#[test]
fn removing_the_selected_slide_clamps() {
    let (mut carousel, ids) = eight(Options::default());
    carousel.select(7, true);
    carousel.remove_cell(ids[7]).expect("known cell");
    carousel.re_layout(ReLayoutReason::CellsChanged);
    assert_eq!(carousel.slides().len(), 7);
    assert_eq!(carousel.selected_index(), 6);
    settle(&mut carousel);
    assert!(close(carousel.state().slider.x, -650.0, 0.5));
}

#[test]
fn removing_a_whole_group_clamps() {
    let (mut carousel, ids) = eight(Options::default().with_group_cells(3));
    carousel.select(2, true);
    carousel.remove_cell(ids[6]).expect("known cell");
    carousel.remove_cell(ids[7]).expect("known cell");
    carousel.re_layout(ReLayoutReason::CellsChanged);
    assert_eq!(carousel.slides().len(), 2);
    assert_eq!(carousel.selected_index(), 1);
}

// ── Loop behavior ───────────────────────────────────────────────────────

#[test]
fn loop_select_past_the_end_renders_like_select_in_range() {
    let mut rendered = Vec::new();
    for index in [2, 2 + 8] {
        let (mut carousel, ids) = eight(Options::default().with_loop(true));
        carousel.select(index, false);
        settle(&mut carousel);
        let cells: Vec<Point> = ids.iter().map(|&id| carousel.cell_position(id)).collect();
        rendered.push((carousel.selected_index(), carousel.slider_position(), cells));
    }
    let (a, b) = (&rendered[0], &rendered[1]);
    assert_eq!(a.0, 2);
    assert_eq!(a.0, b.0);
    assert!(close(a.1.x, b.1.x, 0.2));
    for (pa, pb) in a.2.iter().zip(&b.2) {
        assert_eq!(pa, pb);
    }
}

#[test]
fn loop_next_from_last_moves_forward() {
    let (mut carousel, ids) = eight(Options::default().with_loop(true).with_initial_index(7));
    carousel.next();
    assert_eq!(carousel.selected_index(), 0);
    // One frame in, the slider has moved forward (more negative), not back.
    let before = carousel.state().slider.x;
    assert!(carousel.scheduler_mut().take());
    carousel.tick();
    assert!(carousel.state().slider.x < before);
    settle(&mut carousel);
    // Slide 0 is centered again and the last cell is drawn before it.
    assert!(close(carousel.slider_position().x, 100.0, 0.1));
    let wrapped = &carousel.state().slider.cells_should_wrap_forward;
    assert_eq!(wrapped.first(), Some(&ids[7]));
    assert!(carousel.cell_position(ids[7]).x < 0.0);
}

#[test]
fn loop_progress_sums_to_one_while_crossing_the_seam() {
    let (mut carousel, _) = eight(Options::default().with_loop(true).with_initial_index(7));
    carousel.next();
    for _ in 0..15 {
        assert!(carousel.scheduler_mut().take());
        carousel.tick();
        let total: f64 = (0..8).map(|i| carousel.slide_progress(i)).sum();
        assert!(close(total, 1.0, 1e-3), "progress total {total}");
    }
}

#[test]
fn vertical_loop_wraps_along_the_y_axis() {
    let options = Options::default()
        .with_loop(true)
        .with_direction(Direction::Vertical);
    let (mut carousel, ids) = build(
        options,
        Size::new(200.0, 300.0),
        &[BoxSize::fixed(100.0, 100.0); 8],
    );
    let slider = &carousel.state().slider;
    assert_eq!(slider.slidable_height, 800.0);
    assert_eq!(slider.cells_may_wrap_forward.len(), 2);
    assert!(slider.cells_may_wrap_forward.contains(&ids[7]));
    assert_eq!(slider.cells_should_wrap_forward.first(), Some(&ids[7]));
    let wrapped = carousel.cell_position(ids[7]);
    assert_eq!(wrapped.x, 0.0);
    assert!(wrapped.y < 0.0);

    // Selecting before the first slide shifts the offset one track back on y.
    carousel.select(-1, false);
    assert_eq!(carousel.selected_index(), 7);
    assert!(close(carousel.state().slider.y, -850.0, 1e-9));
    settle(&mut carousel);
    assert!(close(carousel.state().slider.y, -750.0, 0.5));
    assert_eq!(carousel.state().slider.x, 0.0);

    // Drag deltas fold modulo the track on the main axis only.
    carousel.pointer_down();
    carousel.drag_move(Point::new(30.0, -1750.0));
    assert_eq!(carousel.state().drag.dy, -150.0);
    assert_eq!(carousel.state().drag.dx, 30.0);
}

// ── Measurements ────────────────────────────────────────────────────────

#[test]
fn non_finite_cells_are_rejected_and_loop_release_terminates() {
    let (mut carousel, _) = build(
        Options::default().with_loop(true),
        Size::new(300.0, 200.0),
        &[BoxSize::fixed(100.0, 100.0)],
    );
    let err = carousel
        .add_cell_with(1, BoxSize::fixed(f64::NAN, 100.0))
        .unwrap_err();
    assert!(matches!(err, CarouselError::InvalidMeasurement { .. }));
    assert_eq!(carousel.cells_ordered().len(), 1);

    let t0 = Instant::now();
    carousel.pointer_down();
    carousel.drag_start(t0);
    carousel.drag_move(Point::new(-10.0, 0.0));
    carousel.pointer_up();
    carousel.drag_end(t0 + Duration::from_millis(500));
    settle(&mut carousel);
    assert_eq!(carousel.selected_index(), 0);
    assert!(carousel.state().slider.x.is_finite());
}

// ── Non-loop clamping ───────────────────────────────────────────────────

#[test]
fn non_loop_navigation_stops_at_the_ends() {
    let (mut carousel, _) = eight(Options::default());
    carousel.previous();
    assert_eq!(carousel.selected_index(), 0);
    for _ in 0..20 {
        carousel.next();
    }
    assert_eq!(carousel.selected_index(), 7);
    settle(&mut carousel);
    assert!(close(carousel.state().slider.x, -750.0, 0.5));
    assert!(carousel.slide_progress(7) > 0.99);
}

// ── Options ─────────────────────────────────────────────────────────────

#[test]
fn switching_alignment_moves_targets_and_keeps_selection() {
    let (mut carousel, _) = eight(Options::default().with_initial_index(2));
    let patch = OptionsPatch {
        cell_align: Some(CellAlign::Left),
        ..OptionsPatch::default()
    };
    assert!(carousel.update_options(&patch).expect("valid patch"));
    assert_eq!(carousel.selected_index(), 2);
    assert_eq!(carousel.slides().get(2).map(|s| s.target), Some(200.0));
    settle(&mut carousel);
    assert!(close(carousel.slider_position().x, -200.0, 0.5));
}

#[test]
fn turning_loop_off_clears_wrapped_cells() {
    let (mut carousel, ids) = eight(Options::default().with_loop(true));
    assert!(!carousel.state().slider.cells_should_wrap_forward.is_empty());
    let patch = OptionsPatch {
        looping: Some(false),
        ..OptionsPatch::default()
    };
    carousel.update_options(&patch).expect("valid patch");
    assert!(carousel.state().slider.cells_may_wrap_forward.is_empty());
    assert!(carousel.state().slider.cells_should_wrap_forward.is_empty());
    assert_eq!(carousel.cell_position(ids[7]), Point::new(700.0, 0.0));
}

#[test]
fn viewport_cross_size_follows_the_selected_slide() {
    let sizes = [
        BoxSize::fixed(100.0, 80.0),
        BoxSize::fixed(100.0, 120.0),
        BoxSize::fixed(100.0, 90.0),
    ];
    let (mut carousel, _) = build(Options::default(), Size::new(300.0, 0.0), &sizes);
    assert_eq!(carousel.viewport_cross_size(), Some(80.0));
    carousel.select(1, true);
    assert_eq!(carousel.viewport_cross_size(), Some(120.0));
    assert_eq!(carousel.state().viewport.max_cell_height, 120.0);
}

#[test]
fn resize_re_centers_the_selection() {
    let (mut carousel, _) = eight(Options::default().with_initial_index(3));
    carousel
        .set_container_size(Size::new(500.0, 200.0))
        .expect("finite container");
    settle(&mut carousel);
    // Anchor moved from 150 to 250; offset is unchanged at -350.
    assert!(close(carousel.slider_position().x, -100.0, 0.5));
}

#[test]
fn front_slide_follows_the_animation() {
    let (mut carousel, _) = eight(Options::default());
    assert_eq!(carousel.front_slide_index(), Some(0));
    carousel.select(4, false);
    settle(&mut carousel);
    assert_eq!(carousel.front_slide_index(), Some(4));
}

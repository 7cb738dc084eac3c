#![no_main]

use std::time::Duration;

use arbitrary::{Arbitrary, Unstructured};
use fcarousel_core::{
    BoxSize, Carousel, CellAlign, CellId, Direction, Instant, Options, Point, ReLayoutReason,
    Size,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Select(i8, bool),
    Next,
    Previous,
    AddCell(u8, u8),
    RemoveCell(u8),
    ResizeCell(u8, u8),
    PointerDown,
    PointerMove(i16, i16),
    DragMove(i16, i16),
    PointerUp,
    DragEnd,
    Wait(u8),
    Frames(u8),
    Resize(u16, u16),
    Toggle(u8),
}

fn align(byte: u8) -> CellAlign {
    match byte % 3 {
        0 => CellAlign::Left,
        1 => CellAlign::Center,
        _ => CellAlign::Right,
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(flags) = u.arbitrary::<u8>() else {
        return;
    };
    let options = Options::default()
        .with_loop(flags & 1 != 0)
        .with_free_scroll(flags & 2 != 0)
        .with_direction(if flags & 4 != 0 {
            Direction::Vertical
        } else {
            Direction::Horizontal
        })
        .with_cell_align(align(flags >> 3))
        .with_group_cells(usize::from((flags >> 5) % 4) + 1);
    let Ok(mut carousel) = Carousel::new(options) else {
        return;
    };
    if carousel.set_container_size(Size::new(300.0, 300.0)).is_err() {
        return;
    }
    let Ok(mut ids) = (0..5)
        .map(|i| carousel.add_cell_with(i, BoxSize::fixed(100.0, 100.0)))
        .collect::<Result<Vec<CellId>, _>>()
    else {
        return;
    };
    carousel.activate();

    let mut clock = Instant::now();
    let Ok(ops) = u.arbitrary::<Vec<Op>>() else {
        return;
    };
    for op in ops.into_iter().take(256) {
        match op {
            Op::Select(index, instant) => carousel.select(i64::from(index), instant),
            Op::Next => carousel.next(),
            Op::Previous => carousel.previous(),
            Op::AddCell(w, h) => {
                let size = BoxSize::fixed(f64::from(w), f64::from(h));
                if let Ok(id) = carousel.add_cell_with(ids.len() as i64, size) {
                    ids.push(id);
                    carousel.re_layout(ReLayoutReason::CellsChanged);
                }
            }
            Op::RemoveCell(slot) => {
                if !ids.is_empty() {
                    let id = ids.remove(usize::from(slot) % ids.len());
                    let _ = carousel.remove_cell(id);
                    carousel.re_layout(ReLayoutReason::CellsChanged);
                }
            }
            Op::ResizeCell(slot, w) => {
                if !ids.is_empty() {
                    let id = ids[usize::from(slot) % ids.len()];
                    let _ = carousel.update_cell_size(id, BoxSize::fixed(f64::from(w), 100.0));
                    carousel.re_layout(ReLayoutReason::CellsChanged);
                }
            }
            Op::PointerDown => carousel.pointer_down(),
            Op::PointerMove(dx, dy) => {
                carousel.pointer_move(Point::new(f64::from(dx), f64::from(dy)), clock);
            }
            Op::DragMove(dx, dy) => carousel.drag_move(Point::new(f64::from(dx), f64::from(dy))),
            Op::PointerUp => carousel.pointer_up(),
            Op::DragEnd => carousel.drag_end(clock),
            Op::Wait(ms) => clock += Duration::from_millis(u64::from(ms)),
            Op::Frames(n) => {
                for _ in 0..n {
                    if !carousel.scheduler_mut().take() {
                        break;
                    }
                    clock += Duration::from_millis(16);
                    carousel.tick();
                }
            }
            Op::Resize(w, h) => {
                let _ = carousel.set_container_size(Size::new(f64::from(w), f64::from(h)));
            }
            Op::Toggle(bits) => {
                let patch = fcarousel_core::OptionsPatch {
                    looping: Some(bits & 1 != 0),
                    free_scroll: Some(bits & 2 != 0),
                    cell_align: Some(align(bits >> 2)),
                    ..Default::default()
                };
                let _ = carousel.update_options(&patch);
            }
        }

        // Post-conditions that must always hold:
        let slides = carousel.slides().len();
        assert!(
            carousel.selected_index() < slides.max(1),
            "selection out of range"
        );
        let position = carousel.slider_position();
        assert!(position.x.is_finite() && position.y.is_finite(), "non-finite slider");
        for i in 0..slides {
            let progress = carousel.slide_progress(i);
            assert!((0.0..=1.0).contains(&progress), "progress out of range");
        }
    }
});

//! Runs the info ticker through auto-advance, a fling across the loop seam
//! and an expand/collapse, logging index and offsets along the way.

use std::time::Duration;

use cardmorph::prelude::*;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn report(carousel: &mut CarouselController, now: Duration) {
    let offsets: Vec<String> = carousel
        .slots()
        .map(|slot| format!("{:.0}", carousel.header_offset(slot, now)))
        .collect();
    let current = carousel.current_index();
    let fill = carousel.indicator_fill(current, now);
    log::info!(
        "{:>6.2}s item {} ({}) fill {:.2} headers [{}]",
        now.as_secs_f32(),
        current,
        carousel.current_item().title,
        fill,
        offsets.join(", ")
    );
}

fn main() -> Result<(), cardmorph::Error> {
    env_logger::init();

    let mut carousel = CarouselController::with_default_items(360.0)?;
    carousel.mount(ms(0));
    for (index, item) in carousel.items().to_vec().iter().enumerate() {
        let width = item.row_text().chars().count() as f32 * 7.5;
        carousel.measure_item(index, width, ms(0));
    }

    // two auto-advance ticks
    for t in (0..=12_500).step_by(2_500) {
        carousel.process(ms(t));
        report(&mut carousel, ms(t));
    }

    // fling forward from the last item
    carousel.drag_changed(-50.0, ms(13_000));
    carousel.drag_ended(-50.0, -420.0, ms(13_100));
    for t in [13_100, 13_300, 13_500] {
        carousel.process(ms(t));
        report(&mut carousel, ms(t));
    }

    carousel.toggle_expanded(ms(14_000));
    for t in [14_000, 14_100, 14_200, 14_400, 14_600] {
        carousel.process(ms(t));
        log::info!(
            "{:>6.2}s {:?} opacity {:.2} posture {:.2}",
            ms(t).as_secs_f32(),
            carousel.layout_mode(),
            carousel.content_opacity(ms(t)),
            carousel.posture(ms(t))
        );
    }

    carousel.unmount(ms(15_000));
    log::info!("unmounted, next deadline {:?}", carousel.next_deadline());
    Ok(())
}

//! Drives the card morph with a simulated 60 Hz clock and logs what a host
//! would draw. Run with `RUST_LOG=debug` to see the controller's own logs.

use std::time::Duration;

use cardmorph::prelude::*;
use cardmorph::transition::list;

const FRAME: Duration = Duration::from_micros(16_667);

fn main() {
    env_logger::init();

    let mut morph = TransitionController::default();
    let mut anchors = AnchorRegistry::new();
    let selected = 2;

    for key in AnchorKey::all_for(selected) {
        anchors.record(AnchorSide::List, key, Rect::new(20.0, 300.0, 350.0, 220.0));
        anchors.record(AnchorSide::Detail, key, Rect::new(0.0, 0.0, 390.0, 500.0));
    }

    let mut now = Duration::ZERO;
    morph.select(selected, now);
    for intent in morph.drain_intents() {
        log::info!("host: {:?}", intent);
    }

    while morph.is_animating() {
        now += FRAME;
        morph.process(now);
        let progress = morph.appear_progress(now);
        let content = AnchorKey::new(AnchorRole::Content, selected);
        if let Some(frame) = anchors.interpolate(content, progress) {
            log::info!(
                "{:>6.3}s {:?} progress {:.3} frame {:?} body {:.1}",
                now.as_secs_f32(),
                morph.phase(),
                progress,
                frame,
                morph.detail_body_offset_y(now)
            );
        }
    }

    // scroll the detail down, then pull it past the dismiss threshold
    for offset in [-20.0, -60.0, -10.0, 40.0, 90.0, 140.0, 160.0] {
        now += Duration::from_millis(50);
        morph.scroll(offset, now);
        let chrome = morph.chrome();
        log::info!(
            "offset {:>6.1}: chevron {:?} scale {:.2} rotation {:.0} shadow {:.2} scale {:.3}",
            offset,
            chrome.chevron_foreground,
            chrome.chevron_scale,
            chrome.chevron_rotation,
            chrome.shadow_opacity,
            chrome.content_scale
        );
        for intent in morph.drain_intents() {
            log::info!("host: {:?}", intent);
        }
    }

    while let Some(deadline) = morph.next_deadline() {
        now = deadline;
        morph.process(now);
        for intent in morph.drain_intents() {
            log::info!("host at {:.3}s: {:?}", now.as_secs_f32(), intent);
        }
    }

    let header = list::header_appearance(morph.selected_index());
    log::info!("back in the list, header {:?}", header);
}

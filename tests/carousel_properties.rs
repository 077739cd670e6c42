//! Index, timer and seam properties of the ticker carousel over arbitrary
//! input sequences.

use std::time::Duration;

use cardmorph::prelude::*;
use proptest::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[derive(Clone, Debug)]
enum Input {
    Tap,
    Fling { translation: f32, predicted: f32 },
    Wait(u64),
    ToggleExpanded,
}

fn arb_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        Just(Input::Tap),
        (-400.0f32..400.0, -3_000.0f32..3_000.0)
            .prop_map(|(translation, predicted)| Input::Fling { translation, predicted }),
        (0u64..15_000).prop_map(Input::Wait),
        Just(Input::ToggleExpanded),
    ]
}

fn items(count: usize) -> Vec<TickerItem> {
    (0..count)
        .map(|index| {
            TickerItem::new(format!("Item {}", index), "circle", Color::BLACK)
                .segment(InfoSegment::new(format!("value {}", index)))
        })
        .collect()
}

proptest! {
    #[test]
    fn index_stays_in_range(
        count in 2usize..7,
        width in 100.0f32..800.0,
        inputs in prop::collection::vec(arb_input(), 0..40),
    ) {
        init_logger();
        let mut carousel = CarouselController::new(items(count), width, CarouselConfig::default())
            .unwrap();
        let mut now = ms(0);
        carousel.mount(now);

        for input in inputs {
            now += ms(16);
            match input {
                Input::Tap => carousel.tap(now),
                Input::Fling { translation, predicted } => {
                    carousel.drag_changed(translation, now);
                    prop_assert!(!carousel.auto_advance_scheduled());
                    carousel.drag_ended(translation, predicted, now + ms(16));
                    let expected = if carousel.is_expand_running() { 0 } else { 1 };
                    prop_assert_eq!(carousel.auto_advance_timers(), expected);
                }
                Input::Wait(wait) => {
                    now += ms(wait);
                    carousel.process(now);
                }
                Input::ToggleExpanded => carousel.toggle_expanded(now),
            }
            if carousel.is_expand_running() {
                prop_assert!(!carousel.auto_advance_scheduled());
            }
            prop_assert!(carousel.current_index() < count);
            prop_assert!(carousel.auto_advance_timers() <= 1);
        }

        // once everything settles the position sits on the current index
        let settled = now + ms(5_000);
        prop_assert_eq!(carousel.position(settled), carousel.current_index() as f32);
    }

    #[test]
    fn drag_change_always_cancels_timer(
        translations in prop::collection::vec(-500.0f32..500.0, 1..10),
    ) {
        let mut carousel = CarouselController::with_default_items(320.0).unwrap();
        carousel.mount(ms(0));
        for (step, translation) in translations.iter().enumerate() {
            carousel.drag_changed(*translation, ms(100 + step as u64 * 16));
            prop_assert_eq!(carousel.auto_advance_timers(), 0);
        }
        carousel.process(ms(60_000));
        prop_assert_eq!(carousel.current_index(), 0);
    }
}

#[test]
fn advance_from_last_item_wraps_without_jump() {
    for count in 2..6 {
        let mut carousel = CarouselController::new(items(count), 300.0, CarouselConfig::default())
            .unwrap();
        carousel.mount(ms(0));
        for step in 0..count - 1 {
            carousel.tap(ms(step as u64 * 1_000));
        }
        let now = ms(count as u64 * 1_000);
        assert_eq!(carousel.current_index(), count - 1);
        assert_eq!(carousel.position(now), (count - 1) as f32);

        carousel.tap(now);
        assert_eq!(carousel.current_index(), 0);
        // the last item keeps its place, now drawn in the leading virtual slot
        assert_eq!(carousel.position(now), -1.0);
        assert_eq!(carousel.slot_item(-1), count - 1);
        assert_eq!(carousel.position(now + ms(600)), 0.0);
    }
}

#[test]
fn fling_from_last_item_lands_on_first() {
    init_logger();
    let mut carousel = CarouselController::with_default_items(400.0).unwrap();
    carousel.mount(ms(0));
    carousel.tap(ms(0));
    carousel.tap(ms(1_000));
    assert_eq!(carousel.current_index(), 2);

    carousel.drag_changed(-50.0, ms(2_000));
    carousel.drag_ended(-50.0, -420.0, ms(2_050));
    assert_eq!(carousel.current_index(), 0);
    assert!(!carousel.is_dragging());
    assert_eq!(carousel.auto_advance_timers(), 1);
}

#[test]
fn unmount_cancels_pending_callbacks() {
    let mut carousel = CarouselController::with_default_items(300.0).unwrap();
    carousel.mount(ms(0));
    carousel.measure_item(0, 900.0, ms(0));
    carousel.toggle_expanded(ms(50));
    carousel.unmount(ms(60));

    assert_eq!(carousel.next_deadline(), None);
    carousel.process(ms(120_000));
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(carousel.marquee_offset(0, ms(120_000)), 0.0);
    assert_eq!(carousel.indicator_fill(0, ms(120_000)), 0.0);
}

#[test]
fn remount_restarts_auto_advance() {
    let mut carousel = CarouselController::with_default_items(300.0).unwrap();
    carousel.mount(ms(0));
    carousel.unmount(ms(1_000));
    carousel.mount(ms(2_000));
    carousel.process(ms(7_999));
    assert_eq!(carousel.current_index(), 0);
    carousel.process(ms(8_000));
    assert_eq!(carousel.current_index(), 1);
}

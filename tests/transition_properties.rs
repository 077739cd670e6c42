//! Properties of the card morph controller that must hold for any scroll
//! input, including extreme and non-finite offsets.

use std::time::Duration;

use cardmorph::prelude::*;
use cardmorph::transition::chrome;
use proptest::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn arb_offset() -> impl Strategy<Value = f32> {
    prop_oneof![
        -10_000.0f32..10_000.0,
        Just(-10_000.0),
        Just(10_000.0),
        Just(0.0),
        Just(130.0),
        Just(f32::NAN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
    ]
}

proptest! {
    #[test]
    fn clamped_parameters_stay_in_range(offset in arb_offset()) {
        let chrome = ScrollChrome::at(offset);
        prop_assert!((0.0..=1.0).contains(&chrome.chevron_background_opacity));
        prop_assert!((0.0..=1.0).contains(&chrome.shadow_opacity));
        prop_assert!((0.0..=1.0).contains(&chrome.gradient_opacity));
        prop_assert!((1.0..=1.5).contains(&chrome.chevron_scale));
        prop_assert!((0.0..=90.0).contains(&chrome.chevron_rotation));
        prop_assert!((0.0..=10.0).contains(&chrome.header_offset_x));
        prop_assert!((0.0..=1.0).contains(&chrome.content_text_opacity_clamped()));
        prop_assert!(chrome.content_scale > 0.0 && chrome.content_scale <= 1.0);
        prop_assert!(chrome.content_offset_y >= -42.0);
    }

    #[test]
    fn dismiss_triggers_exactly_once(
        offsets in prop::collection::vec(130.001f32..10_000.0, 1..20)
    ) {
        init_logger();
        let mut morph = TransitionController::default();
        morph.select(0, ms(0));
        morph.process(ms(600));
        morph.drain_intents();

        for (step, offset) in offsets.iter().enumerate() {
            morph.scroll(*offset, ms(600 + step as u64));
        }
        morph.dismiss(ms(700));

        let begins = morph
            .drain_intents()
            .into_iter()
            .filter(|intent| matches!(intent, PresentationIntent::BeginDismiss(_)))
            .count();
        prop_assert_eq!(begins, 1);
        prop_assert_eq!(morph.phase(), Phase::Closing(0));
    }

    #[test]
    fn offset_has_no_effect_without_selection(offset in arb_offset()) {
        let mut morph = TransitionController::default();
        morph.scroll(offset, ms(0));
        prop_assert_eq!(morph.scroll_offset(), 0.0);
        prop_assert_eq!(morph.phase(), Phase::Idle);
    }
}

#[test]
fn rational_ease_fixed_points() {
    assert_eq!(ease_rational(0.0), 0.0);
    assert_eq!(ease_rational(0.5), 0.5);
    assert_eq!(ease_rational(1.0), 1.0);
    assert!((ease_rational(0.7) - 0.49 / 0.58).abs() < 1e-5);
    assert!((chrome::content_scale(-60.0) - ease_rational(0.7)).abs() < 1e-5);
}

#[test]
fn teardown_never_fires_after_unmount() {
    init_logger();
    let mut morph = TransitionController::default();
    morph.select(4, ms(0));
    morph.scroll(200.0, ms(100));
    assert!(morph.is_animating_out());
    morph.unmount(ms(200));
    morph.drain_intents();

    morph.process(ms(10_000));
    assert!(morph.drain_intents().is_empty());
    assert_eq!(morph.phase(), Phase::Idle);
}

#[test]
fn select_while_closing_is_ignored() {
    let mut morph = TransitionController::default();
    morph.select(1, ms(0));
    morph.dismiss(ms(300));
    morph.select(2, ms(400));
    assert_eq!(morph.phase(), Phase::Closing(1));

    morph.process(ms(850));
    morph.select(2, ms(900));
    assert_eq!(morph.phase(), Phase::Opening(2));
}

#[test]
fn anchors_follow_appear_progress() {
    let mut morph = TransitionController::default();
    let mut anchors = AnchorRegistry::new();
    let key = AnchorKey::new(AnchorRole::Title, 3);
    assert_eq!(key.to_string(), "title3");

    anchors.record(AnchorSide::List, key, Rect::new(0.0, 100.0, 200.0, 40.0));
    anchors.record(AnchorSide::Detail, key, Rect::new(20.0, 60.0, 300.0, 40.0));
    morph.select(3, ms(0));

    let start = morph.appear_progress(ms(0));
    assert_eq!(anchors.interpolate(key, start), Some(Rect::new(0.0, 100.0, 200.0, 40.0)));
    let settled = morph.appear_progress(ms(3000));
    assert_eq!(anchors.interpolate(key, settled), Some(Rect::new(20.0, 60.0, 300.0, 40.0)));
}

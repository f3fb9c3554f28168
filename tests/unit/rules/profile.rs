use super::*;
use crate::rules::model::EffectKind;

#[test]
fn reveal_families_use_quarter_threshold() {
    for kind in [
        EffectKind::Blur,
        EffectKind::FadeIn,
        EffectKind::FadeOut,
        EffectKind::Stairs,
        EffectKind::Floating,
        EffectKind::ColorTransition,
    ] {
        let p = EffectProfile::for_effect(&Effect::default_for(kind));
        assert_eq!(p.rebuild_threshold(), REVEAL_THRESHOLD);
        assert!(!p.is_scroll_linked());
    }
}

#[test]
fn scroll_families_rebuild_on_any_visibility() {
    for kind in [EffectKind::FadeScroll, EffectKind::ColorScroll] {
        let p = EffectProfile::for_effect(&Effect::default_for(kind));
        assert_eq!(p.rebuild_threshold(), 0.0);
        assert!(p.is_scroll_linked());
        assert_eq!(p.delay_mode, DelayMode::None);
    }
}

#[test]
fn floating_is_layered_and_color_transition_is_scheduled() {
    let floating = EffectProfile::for_effect(&Effect::default_for(EffectKind::Floating));
    assert_eq!(floating.layout, SpanLayout::Layered);
    let color = EffectProfile::for_effect(&Effect::default_for(EffectKind::ColorTransition));
    assert_eq!(color.delay_mode, DelayMode::ScheduledActivation);
}

#[test]
fn terminal_values_follow_the_wipe() {
    let p = EffectProfile::for_effect(&Effect::default_for(EffectKind::FadeScroll));
    let TriggerKind::ScrollLinked { terminal, .. } = p.trigger else {
        panic!("expected scroll-linked");
    };
    assert_eq!(terminal.css_property(), "opacity");
    assert_eq!(terminal.css_value(false), "0.2");
    assert_eq!(terminal.css_value(true), "1");
}

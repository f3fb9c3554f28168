use super::*;

fn blur_json() -> &'static str {
    r#"{
        "id": 7,
        "animationIdentifier": "js-text-animation-blur-1",
        "effect": "blur",
        "blurAmount": "5px",
        "animationSpeed": "0.3s",
        "animationDelay": 0.05,
        "delayBeforeStart": "0s",
        "slowdownEffect": false,
        "endSlowdownEffect": false
    }"#
}

#[test]
fn parses_wire_format() {
    let rule: AnimationRule = serde_json::from_str(blur_json()).unwrap();
    assert_eq!(rule.id, Some(RuleId(7)));
    assert_eq!(rule.identifier.as_str(), "js-text-animation-blur-1");
    assert_eq!(rule.timing.speed.as_str(), "0.3s");
    assert_eq!(rule.timing.delay, 0.05);
    assert_eq!(rule.effect.kind(), EffectKind::Blur);
    let Effect::Blur(p) = &rule.effect else {
        panic!("expected blur");
    };
    assert_eq!(p.blur_amount.as_str(), "5px");
    rule.validate().unwrap();
}

#[test]
fn serialization_strips_id_and_keeps_everything_else() {
    let rule: AnimationRule = serde_json::from_str(blur_json()).unwrap();
    let value = serde_json::to_value(&rule).unwrap();
    let obj = value.as_object().unwrap();
    assert!(!obj.contains_key("id"));
    assert_eq!(obj["effect"], "blur");
    assert_eq!(obj["animationSpeed"], "0.3s");
    assert_eq!(obj["blurAmount"], "5px");

    let back: AnimationRule = serde_json::from_value(value).unwrap();
    assert_eq!(back.id, None);
    assert_eq!(back.identifier, rule.identifier);
    assert_eq!(back.timing, rule.timing);
    assert_eq!(back.effect, rule.effect);
}

#[test]
fn optional_timing_fields_default() {
    let rule: AnimationRule = serde_json::from_str(
        r#"{"animationIdentifier":"a","effect":"fadeIn","animationSpeed":"1s","animationDelay":0}"#,
    )
    .unwrap();
    assert!(rule.timing.delay_before_start.is_zero());
    assert_eq!(rule.timing.slowdown(), Slowdown::default());
    assert_eq!(rule.effect, Effect::FadeIn(FadeParams {}));
}

#[test]
fn bad_identifier_is_rejected_at_parse_time() {
    let err = serde_json::from_str::<AnimationRule>(
        r#"{"animationIdentifier":"a b","effect":"fadeIn","animationSpeed":"1s","animationDelay":0}"#,
    );
    assert!(err.is_err());
}

#[test]
fn defaults_validate_for_every_family() {
    for (i, kind) in EffectKind::ALL.into_iter().enumerate() {
        let rule = AnimationRule::with_defaults(kind, i + 1).unwrap();
        assert_eq!(rule.effect.kind(), kind);
        rule.validate().unwrap();
    }
    let rule = AnimationRule::with_defaults(EffectKind::Blur, 1).unwrap();
    assert_eq!(rule.identifier.as_str(), "js-text-animation-blur-1");
}

#[test]
fn scroll_window_requires_start_above_end() {
    let mut rule = AnimationRule::with_defaults(EffectKind::ColorScroll, 1).unwrap();
    if let Effect::ColorScroll(p) = &mut rule.effect {
        p.animation_start = 0.4;
        p.animation_end = 0.4;
    }
    let err = rule.validate().unwrap_err();
    assert!(err.to_string().contains("animationStart"));
}

#[test]
fn delay_range_depends_on_family() {
    let mut blur = AnimationRule::with_defaults(EffectKind::Blur, 1).unwrap();
    blur.timing.delay = 1.5;
    assert!(blur.validate().is_err());

    let mut scroll = AnimationRule::with_defaults(EffectKind::FadeScroll, 1).unwrap();
    scroll.timing.delay = 1.5;
    scroll.validate().unwrap();
}

#[test]
fn fractions_are_bounded() {
    let mut rule = AnimationRule::with_defaults(EffectKind::Floating, 1).unwrap();
    if let Effect::Floating(p) = &mut rule.effect {
        p.opacity_for_double = 1.2;
    }
    assert!(rule.validate().is_err());
}

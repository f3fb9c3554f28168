use super::*;
use crate::{
    codegen::{
        css::{render_stylesheet, render_value},
        effects::rule_styles,
        ir::{CssValue, StyleSheet},
    },
    engine::delay::BUMPS,
    foundation::core::{CssTime, Identifier},
    rules::model::EffectKind,
};

#[test]
fn detects_module_syntax() {
    assert_eq!(ScriptKind::detect("var a = 1;"), ScriptKind::Classic);
    assert_eq!(
        ScriptKind::detect("import lottie from 'lottie-web';"),
        ScriptKind::Module
    );
    assert_eq!(ScriptKind::detect("  export const x = 1;"), ScriptKind::Module);
    assert_eq!(
        ScriptKind::detect("var s = 'important';\nvar e = 'exported';"),
        ScriptKind::Classic
    );
    assert_eq!(ScriptKind::Module.open_tag(), "<script type=\"module\">");
}

#[test]
fn embedded_json_cannot_break_out() {
    let value = serde_json::json!({ "text": "</script><!-- \u{2028}\u{2029}" });
    let out = embed_json(&value).unwrap();
    assert!(!out.contains('<'));
    assert!(!out.contains('\u{2028}'));
    assert!(out.contains("\\u003c/script>"));
    assert!(out.contains("\\u2028"));
    let back: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(back, value);
}

#[test]
fn reveal_config_matches_profile() {
    let rule = AnimationRule::with_defaults(EffectKind::Floating, 3).unwrap();
    let cfg = serde_json::to_value(RuleConfig::for_rule(&rule)).unwrap();
    assert_eq!(cfg["identifier"], "js-text-animation-floating-3");
    assert_eq!(cfg["childClass"], "js-text-animation-floating-3-char");
    assert_eq!(cfg["layout"], "layered");
    assert_eq!(cfg["delayMode"], "animationDelay");
    assert_eq!(cfg["threshold"], 0.25);
    assert!(cfg["scroll"].is_null());
    assert!(cfg["preDelayAnimation"].is_null());
    assert!(cfg.get("id").is_none());
}

#[test]
fn scroll_and_pause_configs() {
    let mut rule = AnimationRule::with_defaults(EffectKind::ColorScroll, 1).unwrap();
    rule.timing.delay_before_start = CssTime::parse("250ms").unwrap();
    let cfg = RuleConfig::for_rule(&rule);
    assert_eq!(
        cfg.pre_delay_animation.as_deref(),
        Some("js-text-animation-color-scroll-1-pre-delay 250ms")
    );
    let scroll = cfg.scroll.unwrap();
    assert_eq!(scroll.property, "color");
    assert_eq!(scroll.before, "#CCCCCCFF");
    assert_eq!(scroll.after, "#000000FF");
    assert_eq!(cfg.threshold, 0.0);
    assert_eq!(cfg.delay_mode, DelayMode::None);
}

#[test]
fn pause_animation_names_the_escaped_keyframes() {
    let mut rule = AnimationRule::with_defaults(EffectKind::Blur, 1).unwrap();
    rule.identifier = Identifier::new("1hero").unwrap();
    rule.timing.delay_before_start = CssTime::parse("800ms").unwrap();

    let cfg = RuleConfig::for_rule(&rule);
    let inline = cfg.pre_delay_animation.unwrap();
    assert_eq!(inline, "\\31 hero-pre-delay 800ms");
    assert_eq!(
        inline,
        render_value(&CssValue::Animation {
            name: rule.identifier.pre_delay_keyframes_name(),
            rest: "800ms".to_string(),
        })
    );

    let css = render_stylesheet(&StyleSheet {
        items: rule_styles(&rule),
    });
    assert!(css.contains("@keyframes \\31 hero-pre-delay {"));
}

#[test]
fn script_boots_every_rule_on_dom_ready() {
    let rules = vec![
        AnimationRule::with_defaults(EffectKind::Blur, 1).unwrap(),
        AnimationRule::with_defaults(EffectKind::FadeScroll, 1).unwrap(),
    ];
    let script = Script::for_rules(&rules).unwrap();
    assert_eq!(script.kind, ScriptKind::Classic);
    assert_eq!(script.blocks.len(), 2);

    let src = script.source().unwrap();
    assert_eq!(src.matches("      run({").count(), 2);
    assert!(src.contains("document.addEventListener('DOMContentLoaded', boot);"));
    assert!(src.contains("function segmentElement(element)"));
    assert!(src.trim_end().ends_with("})();"));
}

fn chunk(name: &str) -> &'static str {
    RUNTIME.iter().find(|c| c.name == name).unwrap().source
}

#[test]
fn runtime_curve_reads_the_engine_bumps() {
    let rules = vec![AnimationRule::with_defaults(EffectKind::Blur, 1).unwrap()];
    let src = Script::for_rules(&rules).unwrap().source().unwrap();
    let bumps = serde_json::to_value(BUMPS).unwrap();
    assert!(src.contains(&format!("  var BUMPS = {};\n", embed_json(&bumps).unwrap())));
    assert!(src.find("var BUMPS").unwrap() < src.find("function slowdownFactor").unwrap());

    let delay = chunk("delay.js");
    let fields = bumps.as_object().unwrap();
    assert_eq!(fields.len(), 9);
    for field in fields.keys() {
        assert!(delay.contains(&format!("BUMPS.{field}")), "{field} unused");
    }
    for literal in ["0.33", "0.17", "0.5", "0.2", "0.7", "0.6", "0.4"] {
        assert!(!delay.contains(literal), "{literal} hard-coded");
    }
    assert!(delay.contains("return index / Math.max(total - 1, 1);"));
    assert!(delay.contains(
        "offsets.push(delay);\n      delay += cfg.delay * (1 + slowdownFactor(curvePosition(i, total), cfg));"
    ));
}

#[test]
fn runtime_scroll_matches_engine_phases() {
    let scroll = chunk("scroll.js");
    assert!(scroll.contains(
        "if (rect.top > start || (window.scrollY === 0 && rect.top >= 0)) {\n      return 0;"
    ));
    assert!(scroll.contains("if (rect.top + rect.height < end) {\n      return 1;"));
    assert!(scroll.contains("return rect.top <= end ? 1 : 0;"));
    assert!(scroll.contains("return 1 - (rect.top - end) / (start - end);"));
    assert!(scroll.contains("var after = progress > i / spans.length;"));
}

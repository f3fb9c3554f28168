use super::*;
use crate::codegen::ir::{KeyframeStep, Selector};

#[test]
fn selectors_escape_each_class() {
    let s = Selector::class("1st")
        .descendant("1st-char")
        .and("active");
    assert_eq!(s.to_css(), r".\31 st .\31 st-char.active");
}

#[test]
fn rule_renders_declarations_in_order() {
    let rule = CssRule {
        selector: Selector::class("hero"),
        declarations: vec![
            Declaration::new("visibility", "hidden"),
            Declaration::animation("hero-keyframes", "0.3s forwards"),
        ],
    };
    assert_eq!(
        render_rule(&rule),
        ".hero {\n  visibility: hidden;\n  animation: hero-keyframes 0.3s forwards;\n}\n"
    );
}

#[test]
fn keyframes_escape_their_name() {
    let k = Keyframes {
        name: "9-keyframes".into(),
        steps: vec![
            KeyframeStep::new("from", vec![Declaration::new("opacity", "0")]),
            KeyframeStep::new("to", vec![Declaration::new("opacity", "1")]),
        ],
    };
    let css = render_keyframes(&k);
    assert!(css.starts_with("@keyframes \\39 -keyframes {\n"));
    assert!(css.contains("  from {\n    opacity: 0;\n  }\n"));
    assert!(css.ends_with("  }\n}\n"));
}

#[test]
fn animation_references_are_escaped() {
    let value = CssValue::Animation {
        name: "0a".into(),
        rest: String::new(),
    };
    assert_eq!(render_value(&value), "\\30 a");
}

#[test]
fn stylesheet_concatenates_items() {
    let sheet = StyleSheet {
        items: vec![
            CssItem::Rule(CssRule {
                selector: Selector::class("a"),
                declarations: vec![],
            }),
            CssItem::Rule(CssRule {
                selector: Selector::class("b"),
                declarations: vec![],
            }),
        ],
    };
    assert_eq!(sheet.to_string(), ".a {\n}\n.b {\n}\n");
}

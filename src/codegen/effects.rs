//! Per-effect CSS.
//!
//! Every rule contributes a hidden container rule, a character rule, and the keyframes its
//! characters run. Only validated literals and plain numbers end up in declaration values.

use crate::{
    codegen::ir::{CssItem, CssRule, Declaration, KeyframeStep, Keyframes, Selector},
    engine::rebuild::{ACTIVE_CLASS, LAYER_CLASSES, SPACE_CLASS},
    rules::model::{AnimationRule, Effect},
};

/// Width reserved for a space character span.
pub const SPACE_WIDTH: &str = "0.25em";

fn rule(selector: Selector, declarations: Vec<Declaration>) -> CssItem {
    CssItem::Rule(CssRule {
        selector,
        declarations,
    })
}

fn keyframes(name: String, steps: Vec<KeyframeStep>) -> CssItem {
    CssItem::Keyframes(Keyframes { name, steps })
}

/// Rules shared by every rule of one snippet.
pub fn shared_styles() -> Vec<CssItem> {
    vec![rule(
        Selector::class(SPACE_CLASS),
        vec![
            Declaration::new("display", "inline-block"),
            Declaration::new("width", SPACE_WIDTH),
        ],
    )]
}

/// Everything `animation_rule` needs in the stylesheet.
pub fn rule_styles(animation_rule: &AnimationRule) -> Vec<CssItem> {
    let id = &animation_rule.identifier;
    let child = id.child_class();
    let speed = animation_rule.timing.speed.as_str();
    let kf = id.keyframes_name();

    let mut items = vec![rule(
        Selector::class(id.as_str()),
        vec![Declaration::new("visibility", "hidden")],
    )];

    match &animation_rule.effect {
        Effect::Blur(p) => {
            let blur = format!("blur({})", p.blur_amount.as_str());
            items.push(rule(
                Selector::class(&child),
                vec![
                    Declaration::new("display", "inline-block"),
                    Declaration::new("opacity", "0"),
                    Declaration::new("filter", blur.clone()),
                    Declaration::animation(&kf, format!("{speed} ease-out forwards")),
                ],
            ));
            items.push(keyframes(
                kf,
                vec![
                    KeyframeStep::new(
                        "from",
                        vec![
                            Declaration::new("opacity", "0"),
                            Declaration::new("filter", blur),
                        ],
                    ),
                    KeyframeStep::new(
                        "to",
                        vec![
                            Declaration::new("opacity", "1"),
                            Declaration::new("filter", "blur(0)"),
                        ],
                    ),
                ],
            ));
        }
        Effect::FadeIn(_) | Effect::FadeOut(_) => {
            let (from, to) = if matches!(animation_rule.effect, Effect::FadeIn(_)) {
                ("0", "1")
            } else {
                ("1", "0")
            };
            items.push(rule(
                Selector::class(&child),
                vec![
                    Declaration::new("display", "inline-block"),
                    Declaration::new("opacity", from),
                    Declaration::animation(&kf, format!("{speed} ease forwards")),
                ],
            ));
            items.push(keyframes(
                kf,
                vec![
                    KeyframeStep::new("from", vec![Declaration::new("opacity", from)]),
                    KeyframeStep::new("to", vec![Declaration::new("opacity", to)]),
                ],
            ));
        }
        Effect::Stairs(p) => {
            let start_opacity = p.start_opacity.to_string();
            items.push(rule(
                Selector::class(&child),
                vec![
                    Declaration::new("display", "inline-block"),
                    Declaration::new("overflow", "hidden"),
                    Declaration::new("vertical-align", "bottom"),
                    Declaration::new("height", "0"),
                    Declaration::new("opacity", start_opacity.clone()),
                    Declaration::animation(&kf, format!("{speed} ease-out forwards")),
                ],
            ));
            items.push(keyframes(
                kf,
                vec![
                    KeyframeStep::new(
                        "from",
                        vec![
                            Declaration::new("height", "0"),
                            Declaration::new("opacity", start_opacity),
                        ],
                    ),
                    KeyframeStep::new(
                        "to",
                        vec![
                            Declaration::new("height", p.text_height.as_str()),
                            Declaration::new("opacity", "1"),
                        ],
                    ),
                ],
            ));
        }
        Effect::Floating(p) => {
            let height = p.text_height.as_str();
            let second = id.second_keyframes_name();
            items.push(rule(
                Selector::class(&child),
                vec![
                    Declaration::new("display", "inline-block"),
                    Declaration::new("position", "relative"),
                    Declaration::new("height", height),
                    Declaration::new("overflow", "hidden"),
                ],
            ));
            items.push(rule(
                Selector::class(&child).descendant(LAYER_CLASSES[0]),
                vec![
                    Declaration::new("display", "inline-block"),
                    Declaration::new("opacity", "0"),
                    Declaration::new("transform", format!("translateY({height})")),
                    Declaration::animation(&kf, format!("{speed} ease-out forwards")),
                ],
            ));
            items.push(rule(
                Selector::class(&child).descendant(LAYER_CLASSES[1]),
                vec![
                    Declaration::new("position", "absolute"),
                    Declaration::new("left", "0"),
                    Declaration::new("top", "0"),
                    Declaration::new("opacity", "0"),
                    Declaration::animation(&second, format!("{speed} ease-out forwards")),
                ],
            ));
            items.push(keyframes(
                kf,
                vec![
                    KeyframeStep::new(
                        "from",
                        vec![
                            Declaration::new("opacity", "0"),
                            Declaration::new("transform", format!("translateY({height})")),
                        ],
                    ),
                    KeyframeStep::new(
                        "to",
                        vec![
                            Declaration::new("opacity", "1"),
                            Declaration::new("transform", "translateY(0)"),
                        ],
                    ),
                ],
            ));
            items.push(keyframes(
                second,
                vec![
                    KeyframeStep::new(
                        "0%",
                        vec![
                            Declaration::new("opacity", "0"),
                            Declaration::new("transform", format!("translateY({height})")),
                        ],
                    ),
                    KeyframeStep::new(
                        "50%",
                        vec![Declaration::new("opacity", p.opacity_for_double.to_string())],
                    ),
                    KeyframeStep::new(
                        "100%",
                        vec![
                            Declaration::new("opacity", "0"),
                            Declaration::new("transform", format!("translateY(-{height})")),
                        ],
                    ),
                ],
            ));
        }
        Effect::ColorTransition(p) => {
            items.push(rule(
                Selector::class(&child),
                vec![
                    Declaration::new("display", "inline-block"),
                    Declaration::new("color", p.color_from.as_str()),
                    Declaration::new("transition", format!("color {speed} ease")),
                ],
            ));
            items.push(rule(
                Selector::class(&child).and(ACTIVE_CLASS),
                vec![Declaration::new("color", p.color_to.as_str())],
            ));
        }
        Effect::FadeScroll(p) => {
            items.push(rule(
                Selector::class(&child),
                vec![
                    Declaration::new("display", "inline-block"),
                    Declaration::new("opacity", p.start_opacity.to_string()),
                    Declaration::new("transition", format!("opacity {speed} ease")),
                ],
            ));
        }
        Effect::ColorScroll(p) => {
            items.push(rule(
                Selector::class(&child),
                vec![
                    Declaration::new("display", "inline-block"),
                    Declaration::new("color", p.color_from.as_str()),
                    Declaration::new("transition", format!("color {speed} ease")),
                ],
            ));
        }
    }

    if !animation_rule.timing.delay_before_start.is_zero() {
        let hold = vec![Declaration::new("opacity", "1")];
        items.push(keyframes(
            id.pre_delay_keyframes_name(),
            vec![
                KeyframeStep::new("from", hold.clone()),
                KeyframeStep::new("to", hold),
            ],
        ));
    }

    items
}

#[cfg(test)]
#[path = "../../tests/unit/codegen/effects.rs"]
mod tests;

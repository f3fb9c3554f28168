use crate::{
    foundation::core::HexColor,
    rules::model::{AnimationRule, Effect, ScrollWindow},
};

/// Visible fraction an element needs before a reveal-once rule fires.
pub const REVEAL_THRESHOLD: f64 = 0.25;

/// Visible fraction that triggers the one-time span rebuild of scroll-linked rules.
pub const SCROLL_REBUILD_THRESHOLD: f64 = 0.0;

#[derive(Clone, Debug, PartialEq)]
/// How a rule is activated on the page.
pub enum TriggerKind {
    /// Rebuild and animate once, the first time the element is visible enough.
    RevealOnce {
        /// Required visible ratio.
        threshold: f64,
    },
    /// Rebuild once on first visibility, then drive each character from scroll position.
    ScrollLinked {
        /// Viewport band of the wipe.
        window: ScrollWindow,
        /// Property toggled per character.
        terminal: TerminalProperty,
    },
}

#[derive(Clone, Debug, PartialEq)]
/// The per-character property a scroll-linked wipe toggles.
pub enum TerminalProperty {
    /// `opacity`.
    Opacity {
        /// Value ahead of the wipe.
        before: f64,
        /// Value behind the wipe.
        after: f64,
    },
    /// `color`.
    Color {
        /// Value ahead of the wipe.
        before: HexColor,
        /// Value behind the wipe.
        after: HexColor,
    },
}

impl TerminalProperty {
    /// CSS property name.
    pub fn css_property(&self) -> &'static str {
        match self {
            Self::Opacity { .. } => "opacity",
            Self::Color { .. } => "color",
        }
    }

    /// CSS value for a character ahead of (`false`) or behind (`true`) the wipe.
    pub fn css_value(&self, after: bool) -> String {
        match self {
            Self::Opacity { before, after: a } => {
                if after {
                    a.to_string()
                } else {
                    before.to_string()
                }
            }
            Self::Color { before, after: a } => {
                if after {
                    a.as_str().to_string()
                } else {
                    before.as_str().to_string()
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Node structure generated per character.
pub enum SpanLayout {
    /// One span holding the character.
    Single,
    /// One span holding two stacked inner spans (`first`, `second`) with the character.
    Layered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// How the per-character delay is applied.
pub enum DelayMode {
    /// Inline `animation-delay` on the character (and its layers).
    AnimationDelay,
    /// A timer that adds the `active` class after the delay, starting a CSS transition.
    ScheduledActivation,
    /// No per-character delay; scroll position drives the visuals.
    None,
}

#[derive(Clone, Debug, PartialEq)]
/// Everything the runtime needs to know about an effect family, beyond the timing.
pub struct EffectProfile {
    /// Activation mechanism.
    pub trigger: TriggerKind,
    /// Per-character node structure.
    pub layout: SpanLayout,
    /// Delay application.
    pub delay_mode: DelayMode,
}

impl EffectProfile {
    /// Profile of `effect`.
    pub fn for_effect(effect: &Effect) -> Self {
        let reveal = TriggerKind::RevealOnce {
            threshold: REVEAL_THRESHOLD,
        };
        match effect {
            Effect::Blur(_) | Effect::FadeIn(_) | Effect::FadeOut(_) | Effect::Stairs(_) => Self {
                trigger: reveal,
                layout: SpanLayout::Single,
                delay_mode: DelayMode::AnimationDelay,
            },
            Effect::Floating(_) => Self {
                trigger: reveal,
                layout: SpanLayout::Layered,
                delay_mode: DelayMode::AnimationDelay,
            },
            Effect::ColorTransition(_) => Self {
                trigger: reveal,
                layout: SpanLayout::Single,
                delay_mode: DelayMode::ScheduledActivation,
            },
            Effect::FadeScroll(p) => Self {
                trigger: TriggerKind::ScrollLinked {
                    window: ScrollWindow {
                        start: p.animation_start,
                        end: p.animation_end,
                    },
                    terminal: TerminalProperty::Opacity {
                        before: p.start_opacity,
                        after: 1.0,
                    },
                },
                layout: SpanLayout::Single,
                delay_mode: DelayMode::None,
            },
            Effect::ColorScroll(p) => Self {
                trigger: TriggerKind::ScrollLinked {
                    window: ScrollWindow {
                        start: p.animation_start,
                        end: p.animation_end,
                    },
                    terminal: TerminalProperty::Color {
                        before: p.color_from.clone(),
                        after: p.color_to.clone(),
                    },
                },
                layout: SpanLayout::Single,
                delay_mode: DelayMode::None,
            },
        }
    }

    /// Profile of `rule`'s effect.
    pub fn for_rule(rule: &AnimationRule) -> Self {
        Self::for_effect(&rule.effect)
    }

    /// Visible ratio that fires the rule's one-time rebuild.
    pub fn rebuild_threshold(&self) -> f64 {
        match &self.trigger {
            TriggerKind::RevealOnce { threshold } => *threshold,
            TriggerKind::ScrollLinked { .. } => SCROLL_REBUILD_THRESHOLD,
        }
    }

    /// True for scroll-linked rules.
    pub fn is_scroll_linked(&self) -> bool {
        matches!(self.trigger, TriggerKind::ScrollLinked { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rules/profile.rs"]
mod tests;

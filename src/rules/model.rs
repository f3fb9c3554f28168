use crate::foundation::{
    core::{CssLength, CssTime, HexColor, Identifier},
    error::{LetterfxError, LetterfxResult},
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Client-side identity of a rule card. Never emitted into generated code.
pub struct RuleId(pub u64);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One user-configured animation effect bound to one CSS class.
///
/// Serialization always produces the clean view: `id` is skipped, so a serialized rule can be
/// embedded into emitted script as-is.
pub struct AnimationRule {
    /// Editor identity; stripped on serialization.
    #[serde(default, skip_serializing)]
    pub id: Option<RuleId>,
    /// Class on the target element(s).
    #[serde(rename = "animationIdentifier")]
    pub identifier: Identifier,
    /// Timing shared by every effect family.
    #[serde(flatten)]
    pub timing: Timing,
    /// Effect family and its payload.
    #[serde(flatten)]
    pub effect: Effect,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Timing parameters common to all effects.
pub struct Timing {
    /// Duration of one character's animation or transition.
    #[serde(rename = "animationSpeed")]
    pub speed: CssTime,
    /// Base stagger, in seconds, between consecutive characters.
    #[serde(rename = "animationDelay")]
    pub delay: f64,
    /// Pause before the whole element starts.
    #[serde(default = "CssTime::zero")]
    pub delay_before_start: CssTime,
    /// Enables the middle slowdown bump of the delay curve.
    #[serde(default)]
    pub slowdown_effect: bool,
    /// Enables the end slowdown bump of the delay curve.
    #[serde(default)]
    pub end_slowdown_effect: bool,
}

impl Timing {
    /// Timing with the given speed and stagger and no slowdown or pre-start pause.
    pub fn new(speed: CssTime, delay: f64) -> Self {
        Self {
            speed,
            delay,
            delay_before_start: CssTime::zero(),
            slowdown_effect: false,
            end_slowdown_effect: false,
        }
    }

    /// Slowdown toggles as a value.
    pub fn slowdown(&self) -> Slowdown {
        Slowdown {
            middle: self.slowdown_effect,
            end: self.end_slowdown_effect,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Which additive bumps of the delay curve are enabled.
pub struct Slowdown {
    /// Bump over the 33%..70% band.
    pub middle: bool,
    /// Ramp over the 60%..100% band.
    pub end: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "effect", rename_all = "camelCase")]
/// Effect family, discriminated by the `effect` field on the wire.
pub enum Effect {
    /// Characters sharpen out of a blur.
    Blur(BlurParams),
    /// Characters fade in.
    FadeIn(FadeParams),
    /// Characters fade out.
    FadeOut(FadeParams),
    /// Character wrappers grow from zero height.
    Stairs(StairsParams),
    /// Two stacked layers per character float into place.
    Floating(FloatingParams),
    /// Characters transition between two colours.
    ColorTransition(ColorTransitionParams),
    /// Scroll position wipes characters from a start opacity to opaque.
    FadeScroll(FadeScrollParams),
    /// Scroll position wipes characters from one colour to another.
    ColorScroll(ColorScrollParams),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Payload of [`Effect::Blur`].
pub struct BlurParams {
    /// Initial blur radius.
    pub blur_amount: CssLength,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Payload of [`Effect::FadeIn`] and [`Effect::FadeOut`]; no extra fields.
pub struct FadeParams {}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Payload of [`Effect::Stairs`].
pub struct StairsParams {
    /// Full height of a character wrapper.
    pub text_height: CssLength,
    /// Opacity at the start of the grow.
    pub start_opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Payload of [`Effect::Floating`].
pub struct FloatingParams {
    /// Vertical travel reserved for the float.
    pub text_height: CssLength,
    /// Peak opacity of the second (shadow) layer.
    pub opacity_for_double: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Payload of [`Effect::ColorTransition`].
pub struct ColorTransitionParams {
    /// Colour before activation.
    pub color_from: HexColor,
    /// Colour after activation.
    pub color_to: HexColor,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Payload of [`Effect::FadeScroll`].
pub struct FadeScrollParams {
    /// Opacity of characters the wipe has not reached yet.
    pub start_opacity: f64,
    /// Viewport fraction where the wipe starts.
    pub animation_start: f64,
    /// Viewport fraction where the wipe ends.
    pub animation_end: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Payload of [`Effect::ColorScroll`].
pub struct ColorScrollParams {
    /// Colour of characters the wipe has not reached yet.
    pub color_from: HexColor,
    /// Colour of characters behind the wipe.
    pub color_to: HexColor,
    /// Viewport fraction where the wipe starts.
    pub animation_start: f64,
    /// Viewport fraction where the wipe ends.
    pub animation_end: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Fractions of the viewport height that bound a scroll-linked wipe.
///
/// `start` must be greater than `end`: the wipe begins when the element's top reaches
/// `start * viewport_height` and completes when its bottom passes `end * viewport_height`.
pub struct ScrollWindow {
    /// Start threshold (0..1 of viewport height, from the top).
    pub start: f64,
    /// End threshold (0..1 of viewport height, from the top).
    pub end: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Effect family without payload.
pub enum EffectKind {
    /// See [`Effect::Blur`].
    Blur,
    /// See [`Effect::FadeIn`].
    FadeIn,
    /// See [`Effect::FadeOut`].
    FadeOut,
    /// See [`Effect::Stairs`].
    Stairs,
    /// See [`Effect::Floating`].
    Floating,
    /// See [`Effect::ColorTransition`].
    ColorTransition,
    /// See [`Effect::FadeScroll`].
    FadeScroll,
    /// See [`Effect::ColorScroll`].
    ColorScroll,
}

impl EffectKind {
    /// Every family, in editor order.
    pub const ALL: [EffectKind; 8] = [
        Self::Blur,
        Self::FadeIn,
        Self::FadeOut,
        Self::Stairs,
        Self::Floating,
        Self::ColorTransition,
        Self::FadeScroll,
        Self::ColorScroll,
    ];

    /// Kebab-case slug used in default identifiers.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::FadeIn => "fade-in",
            Self::FadeOut => "fade-out",
            Self::Stairs => "stairs",
            Self::Floating => "floating",
            Self::ColorTransition => "color-transition",
            Self::FadeScroll => "fade-scroll",
            Self::ColorScroll => "color-scroll",
        }
    }

    /// Upper bound of `animationDelay` accepted for this family.
    pub fn max_delay(self) -> f64 {
        match self {
            Self::ColorTransition | Self::FadeScroll | Self::ColorScroll => 2.0,
            _ => 1.0,
        }
    }

    /// True for families driven by scroll position rather than a one-shot reveal.
    pub fn is_scroll_linked(self) -> bool {
        matches!(self, Self::FadeScroll | Self::ColorScroll)
    }
}

impl Effect {
    /// The payload-free family of this effect.
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Blur(_) => EffectKind::Blur,
            Self::FadeIn(_) => EffectKind::FadeIn,
            Self::FadeOut(_) => EffectKind::FadeOut,
            Self::Stairs(_) => EffectKind::Stairs,
            Self::Floating(_) => EffectKind::Floating,
            Self::ColorTransition(_) => EffectKind::ColorTransition,
            Self::FadeScroll(_) => EffectKind::FadeScroll,
            Self::ColorScroll(_) => EffectKind::ColorScroll,
        }
    }

    /// Scroll window of scroll-linked effects.
    pub fn scroll_window(&self) -> Option<ScrollWindow> {
        match self {
            Self::FadeScroll(p) => Some(ScrollWindow {
                start: p.animation_start,
                end: p.animation_end,
            }),
            Self::ColorScroll(p) => Some(ScrollWindow {
                start: p.animation_start,
                end: p.animation_end,
            }),
            _ => None,
        }
    }

    /// Payload with the editor's default values.
    pub fn default_for(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Blur => Self::Blur(BlurParams {
                blur_amount: CssLength::px(5.0),
            }),
            EffectKind::FadeIn => Self::FadeIn(FadeParams {}),
            EffectKind::FadeOut => Self::FadeOut(FadeParams {}),
            EffectKind::Stairs => Self::Stairs(StairsParams {
                text_height: CssLength::px(48.0),
                start_opacity: 0.0,
            }),
            EffectKind::Floating => Self::Floating(FloatingParams {
                text_height: CssLength::px(48.0),
                opacity_for_double: 0.3,
            }),
            EffectKind::ColorTransition => Self::ColorTransition(ColorTransitionParams {
                color_from: HexColor::from_rgba([0x99, 0x99, 0x99, 0xFF]),
                color_to: HexColor::from_rgba([0x00, 0x00, 0x00, 0xFF]),
            }),
            EffectKind::FadeScroll => Self::FadeScroll(FadeScrollParams {
                start_opacity: 0.2,
                animation_start: 0.8,
                animation_end: 0.4,
            }),
            EffectKind::ColorScroll => Self::ColorScroll(ColorScrollParams {
                color_from: HexColor::from_rgba([0xCC, 0xCC, 0xCC, 0xFF]),
                color_to: HexColor::from_rgba([0x00, 0x00, 0x00, 0xFF]),
                animation_start: 0.8,
                animation_end: 0.4,
            }),
        }
    }
}

impl AnimationRule {
    /// A rule as the editor creates it when a card of `kind` is added.
    ///
    /// The identifier is `js-text-animation-<slug>-<ordinal>`.
    pub fn with_defaults(kind: EffectKind, ordinal: usize) -> LetterfxResult<Self> {
        let identifier = Identifier::new(format!("js-text-animation-{}-{ordinal}", kind.slug()))?;
        let (speed, delay) = match kind {
            EffectKind::Blur | EffectKind::ColorTransition => (0.3, 0.05),
            EffectKind::FadeIn | EffectKind::FadeOut => (0.5, 0.05),
            EffectKind::Stairs => (0.4, 0.04),
            EffectKind::Floating => (0.6, 0.06),
            EffectKind::FadeScroll | EffectKind::ColorScroll => (0.3, 0.0),
        };
        Ok(Self {
            id: None,
            identifier,
            timing: Timing::new(CssTime::from_seconds(speed), delay),
            effect: Effect::default_for(kind),
        })
    }

    /// Validate the rule's ranges and cross-field invariants.
    pub fn validate(&self) -> LetterfxResult<()> {
        let kind = self.effect.kind();
        let who = self.identifier.as_str();

        let max = kind.max_delay();
        if !self.timing.delay.is_finite() || !(0.0..=max).contains(&self.timing.delay) {
            return Err(LetterfxError::validation(format!(
                "rule '{who}': animationDelay must be within 0..={max}"
            )));
        }
        if self.timing.speed.is_zero() && !kind.is_scroll_linked() {
            return Err(LetterfxError::validation(format!(
                "rule '{who}': animationSpeed must be > 0"
            )));
        }

        match &self.effect {
            Effect::Blur(p) => {
                if p.blur_amount.value() <= 0.0 {
                    return Err(LetterfxError::validation(format!(
                        "rule '{who}': blurAmount must be > 0"
                    )));
                }
            }
            Effect::FadeIn(_) | Effect::FadeOut(_) | Effect::ColorTransition(_) => {}
            Effect::Stairs(p) => {
                validate_positive_length(&p.text_height, "textHeight", who)?;
                validate_fraction(p.start_opacity, "startOpacity", who)?;
            }
            Effect::Floating(p) => {
                validate_positive_length(&p.text_height, "textHeight", who)?;
                validate_fraction(p.opacity_for_double, "opacityForDouble", who)?;
            }
            Effect::FadeScroll(p) => {
                validate_fraction(p.start_opacity, "startOpacity", who)?;
            }
            Effect::ColorScroll(_) => {}
        }

        if let Some(window) = self.effect.scroll_window() {
            validate_fraction(window.start, "animationStart", who)?;
            validate_fraction(window.end, "animationEnd", who)?;
            if window.start <= window.end {
                return Err(LetterfxError::validation(format!(
                    "rule '{who}': animationStart ({}) must be greater than animationEnd ({})",
                    window.start, window.end
                )));
            }
        }

        Ok(())
    }
}

fn validate_fraction(v: f64, field: &str, who: &str) -> LetterfxResult<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(LetterfxError::validation(format!(
            "rule '{who}': {field} must be within 0..=1"
        )));
    }
    Ok(())
}

fn validate_positive_length(v: &CssLength, field: &str, who: &str) -> LetterfxResult<()> {
    if v.value() <= 0.0 {
        return Err(LetterfxError::validation(format!(
            "rule '{who}': {field} must be > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/rules/model.rs"]
mod tests;

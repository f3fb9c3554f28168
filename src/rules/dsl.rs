use crate::{
    foundation::core::{CssTime, Identifier},
    foundation::error::LetterfxResult,
    rules::model::{AnimationRule, Effect, Timing},
};

/// Programmatic construction of an [`AnimationRule`].
pub struct RuleBuilder {
    identifier: String,
    effect: Effect,
    speed: CssTime,
    delay: f64,
    delay_before_start: CssTime,
    slowdown_effect: bool,
    end_slowdown_effect: bool,
}

impl RuleBuilder {
    /// Start a rule for elements carrying `identifier`.
    pub fn new(identifier: impl Into<String>, effect: Effect) -> Self {
        Self {
            identifier: identifier.into(),
            effect,
            speed: CssTime::from_seconds(0.3),
            delay: 0.05,
            delay_before_start: CssTime::zero(),
            slowdown_effect: false,
            end_slowdown_effect: false,
        }
    }

    /// Per-character animation duration.
    pub fn speed(mut self, speed: CssTime) -> Self {
        self.speed = speed;
        self
    }

    /// Base stagger between characters, in seconds.
    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    /// Pause before the element starts animating.
    pub fn delay_before_start(mut self, pause: CssTime) -> Self {
        self.delay_before_start = pause;
        self
    }

    /// Toggle the middle and end slowdown bumps.
    pub fn slowdown(mut self, middle: bool, end: bool) -> Self {
        self.slowdown_effect = middle;
        self.end_slowdown_effect = end;
        self
    }

    /// Validate and produce the rule.
    pub fn build(self) -> LetterfxResult<AnimationRule> {
        let rule = AnimationRule {
            id: None,
            identifier: Identifier::new(self.identifier)?,
            timing: Timing {
                speed: self.speed,
                delay: self.delay,
                delay_before_start: self.delay_before_start,
                slowdown_effect: self.slowdown_effect,
                end_slowdown_effect: self.end_slowdown_effect,
            },
            effect: self.effect,
        };
        rule.validate()?;
        Ok(rule)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rules/dsl.rs"]
mod tests;

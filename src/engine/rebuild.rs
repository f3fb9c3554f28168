use crate::{
    engine::{
        delay::DelayCurve,
        dom::{Document, NodeId},
        host::{FrameTask, Host, RuleSlot, TimerTask},
        segment::{Unit, char_count},
    },
    foundation::{core::format_seconds, error::LetterfxResult},
    rules::{
        model::AnimationRule,
        profile::{DelayMode, EffectProfile, SpanLayout},
    },
};

/// Class shared by every space character span.
pub const SPACE_CLASS: &str = "space-char";
/// Class added when a scheduled colour transition starts.
pub const ACTIVE_CLASS: &str = "active";
/// Classes of the two stacked layers of a layered span.
pub const LAYER_CLASSES: [&str; 2] = ["first", "second"];

#[derive(Clone, Debug, PartialEq)]
/// How one rule turns units into nodes.
pub struct RebuildPlan {
    /// Class put on every character span.
    pub child_class: String,
    /// Node structure per character.
    pub layout: SpanLayout,
    /// How the stagger is applied.
    pub delay_mode: DelayMode,
    /// The stagger itself.
    pub curve: DelayCurve,
}

impl RebuildPlan {
    /// Plan for `rule` under its effect profile.
    pub fn for_rule(rule: &AnimationRule, profile: &EffectProfile) -> Self {
        Self {
            child_class: rule.identifier.child_class(),
            layout: profile.layout,
            delay_mode: profile.delay_mode,
            curve: DelayCurve::new(rule.timing.delay, rule.timing.slowdown()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One generated character span.
pub struct CharSpan {
    /// The span.
    pub node: NodeId,
    /// Its character.
    pub ch: char,
    /// Start offset in seconds.
    pub offset: f64,
    /// Inner layer spans, for layered layouts.
    pub layers: Vec<NodeId>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A deferred class activation.
pub struct Activation {
    /// Span that will receive [`ACTIVE_CLASS`].
    pub node: NodeId,
    /// Seconds after the rebuild.
    pub at: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// What one rebuild produced.
pub struct RebuildReport {
    /// Character spans in document order.
    pub spans: Vec<CharSpan>,
    /// Number of `<br>` elements emitted.
    pub line_breaks: usize,
    /// Scheduled activations, for [`DelayMode::ScheduledActivation`].
    pub activations: Vec<Activation>,
}

/// Replace `element`'s content with one node per unit, then ask for a reveal on the next frame.
///
/// The reveal is requested even when `units` holds no characters.
pub fn rebuild(
    doc: &mut Document,
    host: &mut Host,
    owner: RuleSlot,
    element: NodeId,
    units: &[Unit],
    plan: &RebuildPlan,
) -> LetterfxResult<RebuildReport> {
    doc.remove_children(element)?;

    let offsets = plan.curve.start_offsets(char_count(units));
    let mut report = RebuildReport::default();

    for unit in units {
        let ch = match unit {
            Unit::LineBreak => {
                let br = doc.create_element("br");
                doc.append_child(element, br)?;
                report.line_breaks += 1;
                continue;
            }
            Unit::Char(c) => *c,
        };
        let offset = offsets[report.spans.len()];
        let text = ch.to_string();

        let span = doc.create_element("span");
        doc.add_class(span, &plan.child_class)?;
        if ch == ' ' {
            doc.add_class(span, SPACE_CLASS)?;
        }

        let mut layers = Vec::new();
        match plan.layout {
            SpanLayout::Single => doc.set_text_content(span, &text)?,
            SpanLayout::Layered => {
                for class in LAYER_CLASSES {
                    let layer = doc.create_element("span");
                    doc.add_class(layer, class)?;
                    doc.set_text_content(layer, &text)?;
                    doc.append_child(span, layer)?;
                    layers.push(layer);
                }
            }
        }

        match plan.delay_mode {
            DelayMode::AnimationDelay => {
                let value = format_seconds(offset);
                let targets = if layers.is_empty() {
                    std::slice::from_ref(&span)
                } else {
                    layers.as_slice()
                };
                for target in targets {
                    doc.set_style(*target, "animation-delay", &value)?;
                }
            }
            DelayMode::ScheduledActivation => {
                host.set_timeout(
                    owner,
                    offset,
                    TimerTask::Activate {
                        node: span,
                        class: ACTIVE_CLASS.to_string(),
                    },
                );
                report.activations.push(Activation { node: span, at: offset });
            }
            DelayMode::None => {}
        }

        doc.append_child(element, span)?;
        report.spans.push(CharSpan {
            node: span,
            ch,
            offset,
            layers,
        });
    }

    host.request_animation_frame(owner, FrameTask::Reveal { element });
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/rebuild.rs"]
mod tests;

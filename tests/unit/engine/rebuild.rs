use super::*;
use crate::{
    engine::{host::Viewport, segment::segment},
    rules::model::{EffectKind, Slowdown},
};

fn setup(html: &str) -> (Document, Host, NodeId, Vec<Unit>) {
    let mut doc = Document::from_html(html).unwrap();
    let el = doc.elements_by_class("t")[0];
    let units = segment(&mut doc, el).unwrap();
    (doc, Host::new(Viewport::new(800.0, 600.0)), el, units)
}

fn plan(layout: SpanLayout, delay_mode: DelayMode) -> RebuildPlan {
    RebuildPlan {
        child_class: "t-char".into(),
        layout,
        delay_mode,
        curve: DelayCurve::new(0.05, Slowdown::default()),
    }
}

#[test]
fn one_span_per_character_with_staggered_delay() {
    let (mut doc, mut host, el, units) = setup(r#"<p class="t">Hi there</p>"#);
    let plan = plan(SpanLayout::Single, DelayMode::AnimationDelay);
    let report = rebuild(&mut doc, &mut host, RuleSlot(0), el, &units, &plan).unwrap();

    assert_eq!(report.spans.len(), 8);
    let children = doc.children(el).to_vec();
    assert_eq!(children.len(), 8);
    assert_eq!(doc.text_content(el), "Hi there");
    assert!(doc.has_class(children[2], SPACE_CLASS));
    assert!(!doc.has_class(children[1], SPACE_CLASS));
    assert_eq!(doc.style(children[0], "animation-delay"), Some("0s"));
    assert_eq!(doc.style(children[1], "animation-delay"), Some("0.05s"));
    assert_eq!(doc.style(children[7], "animation-delay"), Some("0.35s"));
    assert!(report.activations.is_empty());
}

#[test]
fn line_breaks_do_not_advance_the_curve() {
    let (mut doc, mut host, el, units) = setup(r#"<p class="t">ab<br>c</p>"#);
    let plan = plan(SpanLayout::Single, DelayMode::AnimationDelay);
    let report = rebuild(&mut doc, &mut host, RuleSlot(0), el, &units, &plan).unwrap();

    assert_eq!(report.line_breaks, 1);
    assert_eq!(doc.tag(doc.children(el)[2]), Some("br"));
    assert!((report.spans[2].offset - 0.1).abs() < 1e-12);
    assert_eq!(doc.inner_html(el).matches("<br>").count(), 1);
}

#[test]
fn layered_layout_duplicates_each_character() {
    let (mut doc, mut host, el, units) = setup(r#"<p class="t">ok</p>"#);
    let plan = plan(SpanLayout::Layered, DelayMode::AnimationDelay);
    let report = rebuild(&mut doc, &mut host, RuleSlot(0), el, &units, &plan).unwrap();

    let second = &report.spans[1];
    assert_eq!(second.layers.len(), 2);
    assert!(doc.has_class(second.layers[0], "first"));
    assert!(doc.has_class(second.layers[1], "second"));
    for layer in &second.layers {
        assert_eq!(doc.text_content(*layer), "k");
        assert_eq!(doc.style(*layer, "animation-delay"), Some("0.05s"));
    }
    assert!(doc.style(second.node, "animation-delay").is_none());
}

#[test]
fn scheduled_activation_uses_timers() {
    let (mut doc, mut host, el, units) = setup(r#"<p class="t">abc</p>"#);
    let plan = plan(SpanLayout::Single, DelayMode::ScheduledActivation);
    let report = rebuild(&mut doc, &mut host, RuleSlot(4), el, &units, &plan).unwrap();

    assert_eq!(report.activations.len(), 3);
    assert!(doc.style(report.spans[0].node, "animation-delay").is_none());
    let fired = host.advance_clock(0.06);
    assert_eq!(fired.len(), 2);
    assert!(fired.iter().all(|e| matches!(
        e,
        crate::engine::host::HostEvent::Timer {
            owner: RuleSlot(4),
            ..
        }
    )));
}

#[test]
fn reveal_is_requested_even_for_empty_content() {
    let (mut doc, mut host, el, units) = setup(r#"<p class="t">   </p>"#);
    let plan = plan(SpanLayout::Single, DelayMode::AnimationDelay);
    let report = rebuild(&mut doc, &mut host, RuleSlot(0), el, &units, &plan).unwrap();

    assert!(report.spans.is_empty());
    assert!(doc.children(el).is_empty());
    assert_eq!(
        host.take_frame_tasks(),
        vec![(RuleSlot(0), FrameTask::Reveal { element: el })]
    );
}

#[test]
fn plan_reads_rule_and_profile() {
    let rule = AnimationRule::with_defaults(EffectKind::Floating, 2).unwrap();
    let plan = RebuildPlan::for_rule(&rule, &EffectProfile::for_rule(&rule));
    assert_eq!(plan.child_class, "js-text-animation-floating-2-char");
    assert_eq!(plan.layout, SpanLayout::Layered);
    assert_eq!(plan.curve.base, 0.06);
}

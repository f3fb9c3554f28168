use super::*;
use crate::{
    foundation::core::{CssTime, Rect},
    rules::model::EffectKind,
};

fn rule(kind: EffectKind, id: &str) -> AnimationRule {
    let mut r = AnimationRule::with_defaults(kind, 1).unwrap();
    r.identifier = crate::foundation::core::Identifier::new(id).unwrap();
    r
}

fn page(html: &str, rules: Vec<AnimationRule>) -> Runtime {
    let doc = Document::from_html(html).unwrap();
    Runtime::new(doc, Viewport::new(800.0, 600.0), rules)
}

fn place(rt: &mut Runtime, class: &str, y: f64) -> NodeId {
    let el = rt.document().elements_by_class(class)[0];
    rt.document_mut()
        .set_rect(el, Rect::new(0.0, y, 800.0, y + 40.0))
        .unwrap();
    el
}

#[test]
fn install_hides_and_captures_original_markup() {
    let mut rt = page(
        r#"<p class="a">Hello <b>you</b></p>"#,
        vec![rule(EffectKind::Blur, "a")],
    );
    let el = place(&mut rt, "a", 2000.0);
    rt.dom_content_loaded().unwrap();

    assert_eq!(rt.document().style(el, "visibility"), Some("hidden"));
    let state = rt.element_state(RuleSlot(0), el).unwrap();
    assert_eq!(state.original_html, "Hello <b>you</b>");
    assert_eq!(state.reveal, RevealState::Pending);
    assert_eq!(rt.host().observation_count(), 1);

    rt.settle().unwrap();
    assert!(rt.spans(RuleSlot(0), el).is_empty());
}

#[test]
fn visible_element_rebuilds_and_reveals_next_frame() {
    let mut rt = page(r#"<p class="a">abc</p>"#, vec![rule(EffectKind::FadeIn, "a")]);
    let el = place(&mut rt, "a", 100.0);
    rt.dom_content_loaded().unwrap();

    assert_eq!(rt.deliver_intersections().unwrap(), 1);
    assert_eq!(rt.spans(RuleSlot(0), el).len(), 3);
    assert_eq!(rt.document().style(el, "visibility"), Some("hidden"));
    assert_eq!(rt.advance_frame().unwrap(), 1);
    assert_eq!(rt.document().style(el, "visibility"), Some("visible"));
}

#[test]
fn second_intersection_is_ignored() {
    let mut rt = page(r#"<p class="a">abc</p>"#, vec![rule(EffectKind::Blur, "a")]);
    let el = place(&mut rt, "a", 100.0);
    rt.dom_content_loaded().unwrap();
    let entry = IntersectionEntry {
        target: el,
        is_intersecting: true,
        ratio: 1.0,
    };
    assert!(rt.intersect(RuleSlot(0), entry).unwrap());
    let first = rt.spans(RuleSlot(0), el);
    assert!(!rt.intersect(RuleSlot(0), entry).unwrap());
    assert_eq!(rt.spans(RuleSlot(0), el), first);
}

#[test]
fn pre_start_pause_gates_the_rebuild() {
    let mut r = rule(EffectKind::Blur, "a");
    r.timing.delay_before_start = CssTime::parse("1s").unwrap();
    let mut rt = page(r#"<p class="a">ab</p>"#, vec![r]);
    let el = place(&mut rt, "a", 0.0);
    rt.dom_content_loaded().unwrap();
    rt.deliver_intersections().unwrap();

    assert_eq!(rt.document().style(el, "animation"), Some("a-pre-delay 1s"));
    assert!(rt.spans(RuleSlot(0), el).is_empty());
    rt.advance_time(0.5).unwrap();
    assert!(rt.spans(RuleSlot(0), el).is_empty());
    rt.advance_time(0.5).unwrap();
    assert_eq!(rt.spans(RuleSlot(0), el).len(), 2);
}

#[test]
fn pause_on_digit_leading_identifier_uses_escaped_name() {
    let mut r = rule(EffectKind::Blur, "1a");
    r.timing.delay_before_start = CssTime::parse("1s").unwrap();
    let mut rt = page(r#"<p class="1a">ab</p>"#, vec![r]);
    let el = place(&mut rt, "1a", 0.0);
    rt.dom_content_loaded().unwrap();
    rt.deliver_intersections().unwrap();

    assert_eq!(
        rt.document().style(el, "animation"),
        Some("\\31 a-pre-delay 1s")
    );
    rt.advance_time(1.0).unwrap();
    assert_eq!(rt.spans(RuleSlot(0), el).len(), 2);
}

#[test]
fn color_transition_activates_in_stagger_order() {
    let mut rt = page(
        r#"<p class="a">xyz</p>"#,
        vec![rule(EffectKind::ColorTransition, "a")],
    );
    let el = place(&mut rt, "a", 0.0);
    rt.dom_content_loaded().unwrap();
    rt.deliver_intersections().unwrap();

    let spans = rt.spans(RuleSlot(0), el);
    rt.advance_time(0.0).unwrap();
    assert!(rt.document().has_class(spans[0], "active"));
    assert!(!rt.document().has_class(spans[1], "active"));
    rt.settle().unwrap();
    assert!(spans.iter().all(|s| rt.document().has_class(*s, "active")));
}

#[test]
fn scroll_rule_rebuilds_then_follows_scroll() {
    let mut rt = page(
        r#"<p class="s">abcd</p>"#,
        vec![rule(EffectKind::FadeScroll, "s")],
    );
    let el = place(&mut rt, "s", 500.0);
    rt.dom_content_loaded().unwrap();
    rt.settle().unwrap();

    let spans = rt.spans(RuleSlot(0), el);
    assert_eq!(spans.len(), 4);
    assert!(spans
        .iter()
        .all(|s| rt.document().style(*s, "opacity") == Some("0.2")));

    rt.scroll_to(1000.0).unwrap();
    assert!(spans
        .iter()
        .all(|s| rt.document().style(*s, "opacity") == Some("1")));
}

#[test]
fn missing_targets_are_not_errors() {
    let mut rt = page(r#"<p>nothing</p>"#, vec![rule(EffectKind::Blur, "a")]);
    rt.dom_content_loaded().unwrap();
    rt.settle().unwrap();
    assert!(rt.matched_elements(RuleSlot(0)).is_empty());
    assert!(rt.snapshot().is_empty());
}

#[test]
fn teardown_stops_pending_work() {
    let mut rt = page(r#"<p class="a">ab</p>"#, vec![rule(EffectKind::Blur, "a")]);
    let el = place(&mut rt, "a", 5000.0);
    rt.dom_content_loaded().unwrap();
    rt.deliver_intersections().unwrap();
    rt.teardown();

    rt.scroll_to(5000.0).unwrap();
    assert!(rt.spans(RuleSlot(0), el).is_empty());
    assert!(rt.host().is_idle());
    assert_eq!(rt.host().observation_count(), 0);
}

#[test]
fn rules_do_not_share_state() {
    let mut rt = page(
        r#"<p class="a">one</p><p class="b">two</p>"#,
        vec![rule(EffectKind::Blur, "a"), rule(EffectKind::FadeIn, "b")],
    );
    let a = place(&mut rt, "a", 0.0);
    let b = place(&mut rt, "b", 3000.0);
    rt.dom_content_loaded().unwrap();
    rt.settle().unwrap();

    assert_eq!(rt.spans(RuleSlot(0), a).len(), 3);
    assert!(rt.spans(RuleSlot(1), b).is_empty());
    assert!(rt.element_state(RuleSlot(0), b).is_none());

    let snap = rt.snapshot();
    assert_eq!(snap.len(), 2);
    assert_eq!(snap[0].visibility.as_deref(), Some("visible"));
    assert_eq!(snap[1].visibility.as_deref(), Some("hidden"));
}

#[test]
fn resize_reruns_scroll_listeners() {
    let mut rt = page(r#"<p class="s">ab</p>"#, vec![rule(EffectKind::FadeScroll, "s")]);
    let el = place(&mut rt, "s", 700.0);
    rt.dom_content_loaded().unwrap();
    rt.scroll_to(200.0).unwrap();
    rt.settle().unwrap();

    // client top stays at 500; the window lines move with the viewport height
    let spans = rt.spans(RuleSlot(0), el);
    assert_eq!(rt.document().style(spans[0], "opacity"), Some("0.2"));
    rt.resize(800.0, 1200.0).unwrap();
    assert!(spans
        .iter()
        .all(|s| rt.document().style(*s, "opacity") == Some("1")));
    rt.resize(800.0, 400.0).unwrap();
    assert!(spans
        .iter()
        .all(|s| rt.document().style(*s, "opacity") == Some("0.2")));
}

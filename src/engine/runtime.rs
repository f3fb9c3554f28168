//! Multi-rule orchestration over one [`Document`].
//!
//! Each rule gets its own slot with private per-element state; rules never look at each
//! other's state. The only shared things are the document and the host event loop.

use std::collections::BTreeMap;

use crate::{
    engine::{
        dom::{Document, NodeId},
        host::{FrameTask, Host, HostEvent, IntersectionEntry, RuleSlot, TimerTask, Viewport},
        rebuild::{RebuildPlan, rebuild},
        segment::{Unit, segment},
        trigger::{RevealState, apply_scroll},
    },
    foundation::error::LetterfxResult,
    rules::{
        editor::RuleSet,
        model::AnimationRule,
        profile::{EffectProfile, TriggerKind},
    },
};

const SETTLE_LIMIT: usize = 100_000;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Bookkeeping for one matched element.
pub struct ElementState {
    /// Markup captured at install time. Kept for restoration; the engine never reads it back.
    pub original_html: String,
    /// Reveal-once progress.
    pub reveal: RevealState,
    /// Units waiting behind the pre-start animation.
    #[serde(skip)]
    pub pending: Option<Vec<Unit>>,
    /// Character spans created by the rebuild.
    pub span_count: usize,
}

#[derive(Clone, Debug)]
struct RuleInstance {
    rule: AnimationRule,
    profile: EffectProfile,
    plan: RebuildPlan,
    elements: Vec<NodeId>,
    state: BTreeMap<NodeId, ElementState>,
    active: bool,
}

impl RuleInstance {
    fn new(rule: AnimationRule) -> Self {
        let profile = EffectProfile::for_rule(&rule);
        let plan = RebuildPlan::for_rule(&rule, &profile);
        Self {
            rule,
            profile,
            plan,
            elements: Vec::new(),
            state: BTreeMap::new(),
            active: true,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Serializable view of one character span.
pub struct SpanSnapshot {
    /// Text content.
    pub text: String,
    /// Class list.
    pub classes: Vec<String>,
    /// Inline style.
    pub style: BTreeMap<String, String>,
}

#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Serializable view of one matched element.
pub struct ElementSnapshot {
    /// Identifier of the owning rule.
    pub rule: String,
    /// The element.
    pub element: NodeId,
    /// Inline `visibility`, if set.
    pub visibility: Option<String>,
    /// Reveal-once progress.
    pub reveal: RevealState,
    /// Character spans in document order.
    pub spans: Vec<SpanSnapshot>,
}

#[derive(Clone, Debug)]
/// A page running every rule of one generated snippet.
pub struct Runtime {
    doc: Document,
    host: Host,
    rules: Vec<RuleInstance>,
    loaded: bool,
}

impl Runtime {
    /// Runtime over `doc` for `rules`, in script order. Nothing runs until
    /// [`Runtime::dom_content_loaded`].
    pub fn new(
        doc: Document,
        viewport: Viewport,
        rules: impl IntoIterator<Item = AnimationRule>,
    ) -> Self {
        Self {
            doc,
            host: Host::new(viewport),
            rules: rules.into_iter().map(RuleInstance::new).collect(),
            loaded: false,
        }
    }

    /// Runtime for every rule of `set`.
    pub fn from_rule_set(doc: Document, viewport: Viewport, set: &RuleSet) -> Self {
        for dup in set.duplicate_identifiers() {
            tracing::warn!(identifier = %dup, "several rules share one animation identifier");
        }
        Self::new(doc, viewport, set.rules().iter().cloned())
    }

    /// The page.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The page, for placing elements before load.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The event loop.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Number of rule slots.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Elements matched by the rule in `slot` at install time.
    pub fn matched_elements(&self, slot: RuleSlot) -> &[NodeId] {
        self.rules
            .get(slot.0)
            .map(|r| r.elements.as_slice())
            .unwrap_or_default()
    }

    /// State of `element` under the rule in `slot`.
    pub fn element_state(&self, slot: RuleSlot, element: NodeId) -> Option<&ElementState> {
        self.rules.get(slot.0)?.state.get(&element)
    }

    /// Current character spans of `element` under the rule in `slot`.
    pub fn spans(&self, slot: RuleSlot, element: NodeId) -> Vec<NodeId> {
        match self.rules.get(slot.0) {
            Some(r) => self.doc.descendants_by_class(element, &r.plan.child_class),
            None => Vec::new(),
        }
    }

    #[tracing::instrument(skip(self))]
    /// Run every rule block once, in order: match elements, hide them, and start observing.
    ///
    /// Idempotent; the page loads once.
    pub fn dom_content_loaded(&mut self) -> LetterfxResult<()> {
        if self.loaded {
            return Ok(());
        }
        self.loaded = true;
        for i in 0..self.rules.len() {
            self.install(RuleSlot(i))?;
        }
        Ok(())
    }

    fn install(&mut self, slot: RuleSlot) -> LetterfxResult<()> {
        let Self {
            doc, host, rules, ..
        } = self;
        let instance = &mut rules[slot.0];
        let elements = doc.elements_by_class(instance.rule.identifier.as_str());
        if elements.is_empty() {
            tracing::debug!(
                identifier = instance.rule.identifier.as_str(),
                "no matching elements"
            );
            return Ok(());
        }

        let threshold = instance.profile.rebuild_threshold();
        for el in &elements {
            doc.set_style(*el, "visibility", "hidden")?;
            let mut reveal = RevealState::default();
            reveal.observe();
            instance.state.insert(
                *el,
                ElementState {
                    original_html: doc.inner_html(*el),
                    reveal,
                    pending: None,
                    span_count: 0,
                },
            );
            host.observe(slot, *el, threshold);
        }
        tracing::debug!(
            identifier = instance.rule.identifier.as_str(),
            count = elements.len(),
            "rule installed"
        );
        instance.elements = elements;

        if instance.profile.is_scroll_linked() {
            host.add_scroll_listener(slot);
            self.update_scroll(slot)?;
        }
        Ok(())
    }

    /// Hand one observer callback to the rule in `slot`. Returns whether it started a rebuild.
    pub fn intersect(&mut self, slot: RuleSlot, entry: IntersectionEntry) -> LetterfxResult<bool> {
        let Some(instance) = self.rules.get_mut(slot.0) else {
            return Ok(false);
        };
        if !instance.active {
            return Ok(false);
        }
        let threshold = instance.profile.rebuild_threshold();
        let Some(state) = instance.state.get_mut(&entry.target) else {
            return Ok(false);
        };
        if !state.reveal.on_intersection(&entry, threshold) {
            return Ok(false);
        }
        self.trigger(slot, entry.target)?;
        Ok(true)
    }

    /// Deliver whatever the observers have queued. Returns how many rebuilds started.
    pub fn deliver_intersections(&mut self) -> LetterfxResult<usize> {
        let entries = self.host.take_intersections(&self.doc);
        let mut started = 0;
        for (slot, entry) in entries {
            if self.intersect(slot, entry)? {
                started += 1;
            }
        }
        Ok(started)
    }

    fn trigger(&mut self, slot: RuleSlot, element: NodeId) -> LetterfxResult<()> {
        let units = segment(&mut self.doc, element)?;
        let instance = &mut self.rules[slot.0];
        let pause = instance.rule.timing.delay_before_start.clone();

        if pause.is_zero() {
            return self.rebuild_element(slot, element, units);
        }

        let animation = instance.rule.identifier.pre_delay_animation(&pause);
        if let Some(state) = instance.state.get_mut(&element) {
            state.pending = Some(units);
        }
        self.doc.set_style(element, "animation", &animation)?;
        self.host.on_animation_end_once(slot, element, pause.seconds());
        Ok(())
    }

    fn rebuild_element(
        &mut self,
        slot: RuleSlot,
        element: NodeId,
        units: Vec<Unit>,
    ) -> LetterfxResult<()> {
        let Self {
            doc, host, rules, ..
        } = self;
        let instance = &mut rules[slot.0];
        let report = rebuild(doc, host, slot, element, &units, &instance.plan)?;
        if let Some(state) = instance.state.get_mut(&element) {
            state.span_count = report.spans.len();
        }
        tracing::trace!(
            identifier = instance.rule.identifier.as_str(),
            spans = report.spans.len(),
            "element rebuilt"
        );
        if instance.profile.is_scroll_linked() {
            self.update_scroll_element(slot, element)?;
        }
        Ok(())
    }

    fn update_scroll(&mut self, slot: RuleSlot) -> LetterfxResult<()> {
        let elements = self.rules[slot.0].elements.clone();
        for el in elements {
            self.update_scroll_element(slot, el)?;
        }
        Ok(())
    }

    fn update_scroll_element(&mut self, slot: RuleSlot, element: NodeId) -> LetterfxResult<()> {
        let instance = &self.rules[slot.0];
        if let TriggerKind::ScrollLinked { window, terminal } = &instance.profile.trigger {
            let viewport = self.host.viewport();
            apply_scroll(
                &mut self.doc,
                element,
                &instance.plan.child_class,
                &viewport,
                *window,
                terminal,
            )?;
        }
        Ok(())
    }

    fn dispatch_scroll(&mut self) -> LetterfxResult<()> {
        for slot in self.host.scroll_listeners() {
            self.update_scroll(slot)?;
        }
        self.deliver_intersections()?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    /// Scroll the page to `y` and fire scroll listeners, then observers.
    pub fn scroll_to(&mut self, y: f64) -> LetterfxResult<()> {
        self.host.viewport_mut().scroll_y = y.max(0.0);
        self.dispatch_scroll()
    }

    /// Resize the viewport and fire resize listeners, then observers.
    pub fn resize(&mut self, width: f64, height: f64) -> LetterfxResult<()> {
        let vp = self.host.viewport_mut();
        vp.width = width;
        vp.height = height;
        self.dispatch_scroll()
    }

    /// Run one animation frame. Returns how many frame tasks ran.
    pub fn advance_frame(&mut self) -> LetterfxResult<usize> {
        let tasks = self.host.take_frame_tasks();
        for (_, task) in &tasks {
            match task {
                FrameTask::Reveal { element } => {
                    self.doc.set_style(*element, "visibility", "visible")?;
                }
            }
        }
        Ok(tasks.len())
    }

    /// Advance the clock by `dt` seconds, firing due timers and `animationend` listeners.
    pub fn advance_time(&mut self, dt: f64) -> LetterfxResult<usize> {
        let events = self.host.advance_clock(dt);
        let fired = events.len();
        for event in events {
            match event {
                HostEvent::Timer {
                    task: TimerTask::Activate { node, class },
                    ..
                } => {
                    // Spans removed since scheduling are skipped.
                    if self.doc.is_connected(node) {
                        self.doc.add_class(node, &class)?;
                    }
                }
                HostEvent::AnimationEnd { owner, element } => {
                    let pending = self
                        .rules
                        .get_mut(owner.0)
                        .and_then(|r| r.state.get_mut(&element))
                        .and_then(|s| s.pending.take());
                    if let Some(units) = pending {
                        self.rebuild_element(owner, element, units)?;
                    }
                }
            }
        }
        Ok(fired)
    }

    /// Pump observers, frames and the clock until nothing is left to do.
    pub fn settle(&mut self) -> LetterfxResult<()> {
        for _ in 0..SETTLE_LIMIT {
            self.deliver_intersections()?;
            self.advance_frame()?;
            match self.host.next_due_in() {
                Some(dt) => {
                    self.advance_time(dt)?;
                }
                None if self.host.is_idle() => return Ok(()),
                None => {}
            }
        }
        tracing::warn!("settle gave up with work still queued");
        Ok(())
    }

    /// Stop the rule in `slot`: drop its observations, listeners, timers and gates.
    ///
    /// Spans already built stay as they are.
    pub fn teardown_rule(&mut self, slot: RuleSlot) {
        if let Some(instance) = self.rules.get_mut(slot.0) {
            instance.active = false;
            self.host.release(slot);
        }
    }

    /// Stop every rule.
    pub fn teardown(&mut self) {
        for i in 0..self.rules.len() {
            self.teardown_rule(RuleSlot(i));
        }
    }

    /// Snapshot of every matched element, rule by rule.
    pub fn snapshot(&self) -> Vec<ElementSnapshot> {
        let mut out = Vec::new();
        for instance in &self.rules {
            for el in &instance.elements {
                let spans = self
                    .doc
                    .descendants_by_class(*el, &instance.plan.child_class)
                    .into_iter()
                    .filter_map(|s| {
                        let e = self.doc.element(s)?;
                        Some(SpanSnapshot {
                            text: self.doc.text_content(s),
                            classes: e.classes.clone(),
                            style: e.style.clone(),
                        })
                    })
                    .collect();
                out.push(ElementSnapshot {
                    rule: instance.rule.identifier.as_str().to_string(),
                    element: *el,
                    visibility: self.doc.style(*el, "visibility").map(str::to_string),
                    reveal: instance
                        .state
                        .get(el)
                        .map(|s| s.reveal)
                        .unwrap_or_default(),
                    spans,
                });
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/runtime.rs"]
mod tests;

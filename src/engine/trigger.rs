use crate::{
    engine::{
        dom::{Document, NodeId},
        host::{IntersectionEntry, Viewport},
    },
    foundation::error::LetterfxResult,
    rules::{model::ScrollWindow, profile::TerminalProperty},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Reveal-once state of one element.
pub enum RevealState {
    /// Not yet handed to an observer.
    #[default]
    Unobserved,
    /// Observed, waiting for enough visibility.
    Pending,
    /// Rebuilt; every later callback is ignored.
    Triggered,
}

impl RevealState {
    /// Register with an observer.
    pub fn observe(&mut self) {
        if *self == Self::Unobserved {
            *self = Self::Pending;
        }
    }

    /// Feed one observer callback. Returns `true` exactly once, on the transition to
    /// [`RevealState::Triggered`].
    pub fn on_intersection(&mut self, entry: &IntersectionEntry, threshold: f64) -> bool {
        if *self != Self::Pending {
            return false;
        }
        if entry.is_intersecting && entry.ratio >= threshold {
            *self = Self::Triggered;
            return true;
        }
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Where a container sits relative to its scroll window.
pub enum ScrollPhase {
    /// Not yet at the start line: every character shows the "before" value.
    Before,
    /// Past the end line: every character shows the "after" value.
    After,
    /// Between the lines, with linear progress in `0..=1`.
    Partial(f64),
}

/// Phase of a container whose client rect starts at `rect_top` and is `rect_height` tall.
pub fn scroll_phase(
    rect_top: f64,
    rect_height: f64,
    viewport: &Viewport,
    window: ScrollWindow,
) -> ScrollPhase {
    let start = viewport.height * window.start;
    let end = viewport.height * window.end;

    if rect_top > start || (viewport.scroll_y == 0.0 && rect_top >= 0.0) {
        return ScrollPhase::Before;
    }
    if rect_top + rect_height < end {
        return ScrollPhase::After;
    }
    if start <= end {
        return if rect_top <= end {
            ScrollPhase::After
        } else {
            ScrollPhase::Before
        };
    }
    ScrollPhase::Partial(1.0 - (rect_top - end) / (start - end))
}

/// Whether character `index` of `count` shows the "after" value in `phase`.
pub fn char_is_after(index: usize, count: usize, phase: ScrollPhase) -> bool {
    match phase {
        ScrollPhase::Before => false,
        ScrollPhase::After => true,
        ScrollPhase::Partial(progress) => progress > index as f64 / count.max(1) as f64,
    }
}

/// Restyle every character span of `container` for the current scroll position.
///
/// Returns how many spans show the "after" value. A container without spans is left alone.
pub fn apply_scroll(
    doc: &mut Document,
    container: NodeId,
    child_class: &str,
    viewport: &Viewport,
    window: ScrollWindow,
    terminal: &TerminalProperty,
) -> LetterfxResult<usize> {
    let spans = doc.descendants_by_class(container, child_class);
    if spans.is_empty() {
        return Ok(0);
    }

    let rect = viewport.client_rect(doc.rect(container));
    let phase = scroll_phase(rect.y0, rect.height(), viewport, window);
    let property = terminal.css_property();
    let before = terminal.css_value(false);
    let after = terminal.css_value(true);

    let mut shown = 0;
    for (i, span) in spans.iter().enumerate() {
        if char_is_after(i, spans.len(), phase) {
            doc.set_style(*span, property, &after)?;
            shown += 1;
        } else {
            doc.set_style(*span, property, &before)?;
        }
    }
    tracing::trace!(?phase, shown, total = spans.len(), "scroll update");
    Ok(shown)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/trigger.rs"]
mod tests;

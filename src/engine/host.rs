//! The browser primitives the character engine depends on, modelled as explicit queues.
//!
//! Nothing here runs on its own: the [`crate::Runtime`] drains frames, timers, animation-end
//! gates and intersection entries and routes each one to the rule that registered it.

use crate::{engine::dom::{Document, NodeId}, foundation::core::Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
/// Index of the rule that owns a registration.
pub struct RuleSlot(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visible area of the page.
pub struct Viewport {
    /// Viewport width in px.
    pub width: f64,
    /// Viewport height in px (`window.innerHeight`).
    pub height: f64,
    /// Vertical scroll offset in px (`window.scrollY`).
    pub scroll_y: f64,
}

impl Viewport {
    /// Unscrolled viewport of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Visible region in page coordinates.
    pub fn page_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.scroll_y + self.height)
    }

    /// `getBoundingClientRect()` of a page-space rectangle.
    pub fn client_rect(&self, page: Rect) -> Rect {
        Rect::new(
            page.x0,
            page.y0 - self.scroll_y,
            page.x1,
            page.y1 - self.scroll_y,
        )
    }

    /// Visible ratio of `page` and whether it intersects at all.
    ///
    /// Zero-area targets count as fully visible while their top edge is inside the viewport.
    pub fn intersection(&self, page: Rect) -> (bool, f64) {
        let view = self.page_rect();
        if page.area() <= 0.0 {
            let inside = page.y0 >= view.y0 && page.y0 <= view.y1;
            return (inside, if inside { 1.0 } else { 0.0 });
        }
        let overlap = page.intersect(view);
        let touching = page.y0 <= view.y1 && page.y1 >= view.y0 && overlap.width() > 0.0;
        (touching, overlap.area() / page.area())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// One `IntersectionObserverEntry`.
pub struct IntersectionEntry {
    /// Observed element.
    pub target: NodeId,
    /// Whether the element overlaps the viewport.
    pub is_intersecting: bool,
    /// Visible fraction of the element's area.
    pub ratio: f64,
}

#[derive(Clone, Debug, PartialEq)]
/// Work queued with `requestAnimationFrame`.
pub enum FrameTask {
    /// `element.style.visibility = 'visible'`.
    Reveal {
        /// Element to reveal.
        element: NodeId,
    },
}

#[derive(Clone, Debug, PartialEq)]
/// Work queued with `setTimeout`.
pub enum TimerTask {
    /// Add a class to a character span, starting its CSS transition.
    Activate {
        /// Span to activate.
        node: NodeId,
        /// Class to add.
        class: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
/// Something that became due while the clock advanced.
pub enum HostEvent {
    /// A timer fired.
    Timer {
        /// Owner of the timer.
        owner: RuleSlot,
        /// The queued work.
        task: TimerTask,
    },
    /// A one-shot `animationend` listener fired.
    AnimationEnd {
        /// Owner of the listener.
        owner: RuleSlot,
        /// Element whose animation ended.
        element: NodeId,
    },
}

#[derive(Clone, Debug)]
struct Timer {
    due: f64,
    seq: u64,
    owner: RuleSlot,
    task: TimerTask,
}

#[derive(Clone, Debug)]
struct Gate {
    ends_at: f64,
    seq: u64,
    owner: RuleSlot,
    element: NodeId,
}

#[derive(Clone, Debug)]
struct Observation {
    owner: RuleSlot,
    target: NodeId,
    threshold: f64,
    last: Option<bool>,
}

#[derive(Clone, Debug)]
/// Event loop state of one simulated page.
pub struct Host {
    viewport: Viewport,
    now: f64,
    seq: u64,
    frames: Vec<(RuleSlot, FrameTask)>,
    timers: Vec<Timer>,
    gates: Vec<Gate>,
    observations: Vec<Observation>,
    scroll_listeners: Vec<RuleSlot>,
}

impl Host {
    /// Fresh event loop at time 0.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            now: 0.0,
            seq: 0,
            frames: Vec::new(),
            timers: Vec::new(),
            gates: Vec::new(),
            observations: Vec::new(),
            scroll_listeners: Vec::new(),
        }
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Mutable viewport (scrolling, resizing).
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Seconds since the page loaded.
    pub fn now(&self) -> f64 {
        self.now
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// `requestAnimationFrame`.
    pub fn request_animation_frame(&mut self, owner: RuleSlot, task: FrameTask) {
        self.frames.push((owner, task));
    }

    /// `setTimeout`, in seconds.
    pub fn set_timeout(&mut self, owner: RuleSlot, delay: f64, task: TimerTask) {
        let seq = self.next_seq();
        self.timers.push(Timer {
            due: self.now + delay.max(0.0),
            seq,
            owner,
            task,
        });
    }

    /// Start an animation of `duration` seconds on `element` with a one-shot `animationend` listener.
    pub fn on_animation_end_once(&mut self, owner: RuleSlot, element: NodeId, duration: f64) {
        let seq = self.next_seq();
        self.gates.push(Gate {
            ends_at: self.now + duration.max(0.0),
            seq,
            owner,
            element,
        });
    }

    /// `IntersectionObserver.observe`; the first delivery always reports the current state.
    pub fn observe(&mut self, owner: RuleSlot, target: NodeId, threshold: f64) {
        self.observations.push(Observation {
            owner,
            target,
            threshold,
            last: None,
        });
    }

    /// `addEventListener('scroll'|'resize', ...)`.
    pub fn add_scroll_listener(&mut self, owner: RuleSlot) {
        if !self.scroll_listeners.contains(&owner) {
            self.scroll_listeners.push(owner);
        }
    }

    /// Owners with a live scroll/resize listener, in registration order.
    pub fn scroll_listeners(&self) -> Vec<RuleSlot> {
        self.scroll_listeners.clone()
    }

    /// Number of live observations.
    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    /// True when no frame, timer or gate is waiting.
    pub fn is_idle(&self) -> bool {
        self.frames.is_empty() && self.timers.is_empty() && self.gates.is_empty()
    }

    /// Drain the frame queue. Tasks queued while running them wait for the next frame.
    pub fn take_frame_tasks(&mut self) -> Vec<(RuleSlot, FrameTask)> {
        std::mem::take(&mut self.frames)
    }

    /// Entries the observers would deliver now: every new observation, plus any whose
    /// threshold state flipped since the last delivery.
    pub fn take_intersections(&mut self, doc: &Document) -> Vec<(RuleSlot, IntersectionEntry)> {
        let viewport = self.viewport;
        let mut out = Vec::new();
        for obs in &mut self.observations {
            let (is_intersecting, ratio) = viewport.intersection(doc.rect(obs.target));
            let crossed = is_intersecting && ratio >= obs.threshold;
            if obs.last == Some(crossed) {
                continue;
            }
            obs.last = Some(crossed);
            out.push((
                obs.owner,
                IntersectionEntry {
                    target: obs.target,
                    is_intersecting,
                    ratio,
                },
            ));
        }
        out
    }

    /// Seconds until the next timer or gate, if any.
    pub fn next_due_in(&self) -> Option<f64> {
        self.timers
            .iter()
            .map(|t| t.due)
            .chain(self.gates.iter().map(|g| g.ends_at))
            .min_by(f64::total_cmp)
            .map(|due| (due - self.now).max(0.0))
    }

    /// Move the clock forward and return what became due, in firing order.
    pub fn advance_clock(&mut self, dt: f64) -> Vec<HostEvent> {
        self.now += dt.max(0.0);
        let now = self.now;

        let mut due: Vec<(f64, u64, HostEvent)> = Vec::new();
        self.timers.retain(|t| {
            if t.due <= now {
                due.push((
                    t.due,
                    t.seq,
                    HostEvent::Timer {
                        owner: t.owner,
                        task: t.task.clone(),
                    },
                ));
                false
            } else {
                true
            }
        });
        self.gates.retain(|g| {
            if g.ends_at <= now {
                due.push((
                    g.ends_at,
                    g.seq,
                    HostEvent::AnimationEnd {
                        owner: g.owner,
                        element: g.element,
                    },
                ));
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, e)| e).collect()
    }

    /// Drop every registration owned by `owner`.
    pub fn release(&mut self, owner: RuleSlot) {
        self.frames.retain(|(o, _)| *o != owner);
        self.timers.retain(|t| t.owner != owner);
        self.gates.retain(|g| g.owner != owner);
        self.observations.retain(|o| o.owner != owner);
        self.scroll_listeners.retain(|o| *o != owner);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/host.rs"]
mod tests;

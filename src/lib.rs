//! letterfx turns a list of per-character text animation rules into a paste-ready
//! `<style>` + `<script>` snippet, and runs the same animation model against an in-memory DOM.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: a [`RuleSet`] of [`AnimationRule`]s, one per target CSS class, loaded from
//!    JSON or built with [`RuleBuilder`].
//! 2. **Generate**: [`generate_snippet`] validates the rules and builds a [`Snippet`] (structured
//!    CSS + static runtime + one JSON config per rule); [`Snippet::to_html`] renders it.
//! 3. **Simulate** (optional): [`Runtime`] executes the rules over a [`Document`] with an explicit
//!    event loop ([`Host`]): segmentation, the delay curve, span rebuilding, reveal-once and
//!    scroll-linked triggers.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same rules always produce byte-identical snippets and span layouts.
//! - **Escaping is centralised**: user data reaches CSS only as escaped identifiers or validated
//!   literals, and reaches the script only as escaped JSON.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod codegen;
mod engine;
mod foundation;
mod rules;

pub use codegen::css::{render_keyframes, render_rule, render_stylesheet, render_value};
pub use codegen::effects::{SPACE_WIDTH, rule_styles, shared_styles};
pub use codegen::generate::generate_snippet;
pub use codegen::ir::{
    CssItem, CssRule, CssValue, Declaration, KeyframeStep, Keyframes, RuleBlock, RuntimeChunk,
    Script, ScriptKind, Selector, Snippet, StyleSheet,
};
pub use codegen::script::{RUNTIME, RuleConfig, ScrollConfig, embed_json};
pub use engine::delay::{BUMPS, BumpShape, DelayCurve, position, slowdown_factor};
pub use engine::dom::{Document, Element, NodeData, NodeId};
pub use engine::host::{
    FrameTask, Host, HostEvent, IntersectionEntry, RuleSlot, TimerTask, Viewport,
};
pub use engine::rebuild::{
    ACTIVE_CLASS, Activation, CharSpan, LAYER_CLASSES, RebuildPlan, RebuildReport, SPACE_CLASS,
    rebuild,
};
pub use engine::runtime::{ElementSnapshot, ElementState, Runtime, SpanSnapshot};
pub use engine::segment::{Unit, char_count, segment, segment_detached};
pub use engine::trigger::{RevealState, ScrollPhase, apply_scroll, char_is_after, scroll_phase};
pub use foundation::core::{
    CssLength, CssTime, HexColor, Identifier, Rect, escape_css_ident, format_seconds,
};
pub use foundation::error::{LetterfxError, LetterfxResult};
pub use rules::dsl::RuleBuilder;
pub use rules::editor::RuleSet;
pub use rules::model::{
    AnimationRule, BlurParams, ColorScrollParams, ColorTransitionParams, Effect, EffectKind,
    FadeParams, FadeScrollParams, FloatingParams, RuleId, ScrollWindow, Slowdown, StairsParams,
    Timing,
};
pub use rules::profile::{
    DelayMode, EffectProfile, REVEAL_THRESHOLD, SCROLL_REBUILD_THRESHOLD, SpanLayout,
    TerminalProperty, TriggerKind,
};

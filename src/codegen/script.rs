//! Script side of the snippet: the static runtime plus one JSON-configured call per rule.

use crate::{
    codegen::ir::{RuleBlock, RuntimeChunk, Script, ScriptKind},
    engine::{
        delay::BUMPS,
        rebuild::{ACTIVE_CLASS, LAYER_CLASSES, SPACE_CLASS},
    },
    foundation::error::{LetterfxError, LetterfxResult},
    rules::{
        model::AnimationRule,
        profile::{DelayMode, EffectProfile, SpanLayout, TriggerKind},
    },
};

/// The runtime, in load order.
pub const RUNTIME: [RuntimeChunk; 5] = [
    RuntimeChunk {
        name: "segment.js",
        source: include_str!("runtime/segment.js"),
    },
    RuntimeChunk {
        name: "delay.js",
        source: include_str!("runtime/delay.js"),
    },
    RuntimeChunk {
        name: "rebuild.js",
        source: include_str!("runtime/rebuild.js"),
    },
    RuntimeChunk {
        name: "scroll.js",
        source: include_str!("runtime/scroll.js"),
    },
    RuntimeChunk {
        name: "run.js",
        source: include_str!("runtime/run.js"),
    },
];

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Configuration handed to `run()` for one rule.
pub struct RuleConfig {
    /// Class on the target elements.
    pub identifier: String,
    /// Class on each character span.
    pub child_class: String,
    /// Class on space spans.
    pub space_class: &'static str,
    /// Class added by scheduled activations.
    pub active_class: &'static str,
    /// Classes of the layered spans.
    pub layer_classes: [&'static str; 2],
    /// Span structure.
    pub layout: SpanLayout,
    /// How the stagger is applied.
    pub delay_mode: DelayMode,
    /// Base stagger in seconds.
    pub delay: f64,
    /// Middle slowdown bump.
    pub slowdown_effect: bool,
    /// End slowdown bump.
    pub end_slowdown_effect: bool,
    /// Inline `animation` that gates the rebuild, if the rule pauses first.
    pub pre_delay_animation: Option<String>,
    /// Visible ratio that starts the rebuild.
    pub threshold: f64,
    /// Scroll-linked settings, if any.
    pub scroll: Option<ScrollConfig>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Scroll-linked part of a [`RuleConfig`].
pub struct ScrollConfig {
    /// Start fraction of the viewport height.
    pub start: f64,
    /// End fraction of the viewport height.
    pub end: f64,
    /// Property toggled per character.
    pub property: &'static str,
    /// Value ahead of the wipe.
    pub before: String,
    /// Value behind the wipe.
    pub after: String,
}

impl RuleConfig {
    /// Configuration of `rule`.
    pub fn for_rule(rule: &AnimationRule) -> Self {
        let profile = EffectProfile::for_rule(rule);
        let timing = &rule.timing;
        let pre_delay_animation = (!timing.delay_before_start.is_zero())
            .then(|| rule.identifier.pre_delay_animation(&timing.delay_before_start));
        let scroll = match &profile.trigger {
            TriggerKind::RevealOnce { .. } => None,
            TriggerKind::ScrollLinked { window, terminal } => Some(ScrollConfig {
                start: window.start,
                end: window.end,
                property: terminal.css_property(),
                before: terminal.css_value(false),
                after: terminal.css_value(true),
            }),
        };
        Self {
            identifier: rule.identifier.as_str().to_string(),
            child_class: rule.identifier.child_class(),
            space_class: SPACE_CLASS,
            active_class: ACTIVE_CLASS,
            layer_classes: LAYER_CLASSES,
            layout: profile.layout,
            delay_mode: profile.delay_mode,
            delay: timing.delay,
            slowdown_effect: timing.slowdown_effect,
            end_slowdown_effect: timing.end_slowdown_effect,
            pre_delay_animation,
            threshold: profile.rebuild_threshold(),
            scroll,
        }
    }
}

impl RuleBlock {
    /// Block calling the runtime for `rule`.
    pub fn for_rule(rule: &AnimationRule) -> LetterfxResult<Self> {
        Ok(Self {
            identifier: rule.identifier.as_str().to_string(),
            config: serde_json::to_value(RuleConfig::for_rule(rule))?,
        })
    }
}

impl ScriptKind {
    /// `Module` when `source` has `import`/`export` statements or a `from '...'` clause.
    pub fn detect(source: &str) -> Self {
        let module = source.lines().any(|line| {
            let line = line.trim_start();
            line.starts_with("import ")
                || line.starts_with("import{")
                || line.starts_with("export ")
                || line.starts_with("export{")
                || line.contains(" from '")
                || line.contains(" from \"")
        });
        if module { Self::Module } else { Self::Classic }
    }

    /// Opening tag.
    pub fn open_tag(self) -> &'static str {
        match self {
            Self::Classic => "<script>",
            Self::Module => "<script type=\"module\">",
        }
    }
}

/// JSON text safe to embed inside `<script>`.
///
/// `<` becomes `\u003c`, so neither `</script>` nor `<!--` can appear, and the two line
/// terminators JSON allows raw are escaped.
pub fn embed_json(value: &serde_json::Value) -> LetterfxResult<String> {
    let raw = serde_json::to_string(value)?;
    Ok(raw
        .replace('<', "\\u003c")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

impl Script {
    /// Script for `rules`, in order.
    pub fn for_rules(rules: &[AnimationRule]) -> LetterfxResult<Self> {
        let blocks = rules
            .iter()
            .map(RuleBlock::for_rule)
            .collect::<LetterfxResult<Vec<_>>>()?;
        let mut script = Self {
            kind: ScriptKind::Classic,
            runtime: RUNTIME.to_vec(),
            blocks,
        };
        script.kind = ScriptKind::detect(&script.source()?);
        Ok(script)
    }

    /// Body of the `<script>` element.
    pub fn source(&self) -> LetterfxResult<String> {
        let mut out = String::from("(function () {\n  'use strict';\n\n");
        let bumps = serde_json::to_value(BUMPS)?;
        out.push_str(&format!("  var BUMPS = {};\n\n", embed_json(&bumps)?));
        for chunk in &self.runtime {
            out.push_str(chunk.source);
            out.push('\n');
        }
        out.push_str("  function boot() {\n    var handles = [\n");
        for (i, block) in self.blocks.iter().enumerate() {
            let sep = if i + 1 == self.blocks.len() { "" } else { "," };
            out.push_str(&format!("      run({}){sep}\n", embed_json(&block.config)?));
        }
        out.push_str(concat!(
            "    ];\n",
            "    window.addEventListener('pagehide', function (event) {\n",
            "      if (event.persisted) {\n",
            "        return;\n",
            "      }\n",
            "      handles.forEach(function (handle) {\n",
            "        if (handle) {\n",
            "          handle.teardown();\n",
            "        }\n",
            "      });\n",
            "    });\n",
            "  }\n\n",
            "  if (document.readyState === 'loading') {\n",
            "    document.addEventListener('DOMContentLoaded', boot);\n",
            "  } else {\n",
            "    boot();\n",
            "  }\n",
            "})();\n",
        ));

        if out.to_ascii_lowercase().contains("</script") {
            return Err(LetterfxError::generation(
                "script body would close its own <script> element",
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codegen/script.rs"]
mod tests;

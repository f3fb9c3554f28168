//! Structured description of the emitted artifact.
//!
//! Nothing in here is text yet: user data sits in typed fields and only the CSS and script
//! serializers decide how it is escaped.

use crate::foundation::core::escape_css_ident;

#[derive(Clone, Debug, PartialEq)]
/// A generated `<style>` + `<script>` pair.
pub struct Snippet {
    /// Stylesheet.
    pub style: StyleSheet,
    /// Script.
    pub script: Script,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Ordered list of CSS items.
pub struct StyleSheet {
    /// Items in output order.
    pub items: Vec<CssItem>,
}

#[derive(Clone, Debug, PartialEq)]
/// One top-level CSS item.
pub enum CssItem {
    /// A style rule.
    Rule(CssRule),
    /// An `@keyframes` block.
    Keyframes(Keyframes),
}

#[derive(Clone, Debug, PartialEq)]
/// A selector and its declarations.
pub struct CssRule {
    /// Target elements.
    pub selector: Selector,
    /// Declarations in output order.
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Descendant chain of class-only compound selectors (`.a.b .c`).
pub struct Selector {
    /// Compounds, outermost first; each compound is a list of raw (unescaped) class names.
    pub compounds: Vec<Vec<String>>,
}

impl Selector {
    /// `.class`
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            compounds: vec![vec![name.into()]],
        }
    }

    /// Append a descendant compound: `self .name`.
    pub fn descendant(mut self, name: impl Into<String>) -> Self {
        self.compounds.push(vec![name.into()]);
        self
    }

    /// Add a class to the innermost compound: `self.name`.
    pub fn and(mut self, name: impl Into<String>) -> Self {
        match self.compounds.last_mut() {
            Some(last) => last.push(name.into()),
            None => self.compounds.push(vec![name.into()]),
        }
        self
    }

    /// CSS text with every class escaped.
    pub fn to_css(&self) -> String {
        self.compounds
            .iter()
            .map(|compound| {
                compound
                    .iter()
                    .map(|c| format!(".{}", escape_css_ident(c)))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Debug, PartialEq)]
/// `property: value`
pub struct Declaration {
    /// Property name.
    pub property: &'static str,
    /// Value.
    pub value: CssValue,
}

impl Declaration {
    /// Declaration with a literal value.
    pub fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: CssValue::Literal(value.into()),
        }
    }

    /// `animation: <name> <rest>`, with the keyframes name escaped at render time.
    pub fn animation(name: impl Into<String>, rest: impl Into<String>) -> Self {
        Self {
            property: "animation",
            value: CssValue::Animation {
                name: name.into(),
                rest: rest.into(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A declaration value.
pub enum CssValue {
    /// Already valid CSS: a validated literal, a number or a keyword.
    Literal(String),
    /// An animation shorthand referencing keyframes by (unescaped) name.
    Animation {
        /// Keyframes name.
        name: String,
        /// Duration, timing function and fill mode.
        rest: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
/// `@keyframes name { ... }`
pub struct Keyframes {
    /// Raw (unescaped) name.
    pub name: String,
    /// Steps in output order.
    pub steps: Vec<KeyframeStep>,
}

#[derive(Clone, Debug, PartialEq)]
/// One keyframe selector and its declarations.
pub struct KeyframeStep {
    /// `from`, `to` or a percentage.
    pub offset: &'static str,
    /// Declarations.
    pub declarations: Vec<Declaration>,
}

impl KeyframeStep {
    /// Step at `offset`.
    pub fn new(offset: &'static str, declarations: Vec<Declaration>) -> Self {
        Self {
            offset,
            declarations,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// `<script>` flavour.
pub enum ScriptKind {
    /// Plain script.
    Classic,
    /// `type="module"`.
    Module,
}

#[derive(Clone, Debug, PartialEq)]
/// A piece of the static JavaScript runtime.
pub struct RuntimeChunk {
    /// File name, for diagnostics.
    pub name: &'static str,
    /// Source text.
    pub source: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
/// One rule's call into the runtime.
pub struct RuleBlock {
    /// Identifier of the rule, for diagnostics.
    pub identifier: String,
    /// Configuration passed to the runtime, embedded as a JSON literal.
    pub config: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq)]
/// The emitted script.
pub struct Script {
    /// Flavour of the `<script>` tag.
    pub kind: ScriptKind,
    /// Static runtime, in order.
    pub runtime: Vec<RuntimeChunk>,
    /// Rule blocks, in script order.
    pub blocks: Vec<RuleBlock>,
}

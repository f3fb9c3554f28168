use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::core::Identifier,
    foundation::error::{LetterfxError, LetterfxResult},
    rules::model::{AnimationRule, EffectKind, RuleId},
};

#[derive(Clone, Debug, Default, PartialEq)]
/// The ordered rule list of one generator instance.
///
/// Mirrors the editor's reactive state: rules are added with defaults, replaced wholesale when a
/// field changes, and removed individually or all at once when the editor unmounts.
pub struct RuleSet {
    rules: Vec<AnimationRule>,
    next_id: u64,
}

impl RuleSet {
    /// Empty rule list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt existing rules, assigning fresh ids in order.
    pub fn from_rules(rules: impl IntoIterator<Item = AnimationRule>) -> Self {
        let mut set = Self::new();
        for rule in rules {
            set.push(rule);
        }
        set
    }

    /// Parse a JSON rule list: a bare array, or an object with a `rules` array.
    pub fn from_json_str(s: &str) -> LetterfxResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::from_json_value(value)
    }

    /// Like [`RuleSet::from_json_str`], starting from a parsed value.
    pub fn from_json_value(value: serde_json::Value) -> LetterfxResult<Self> {
        let list = match value {
            serde_json::Value::Array(_) => value,
            serde_json::Value::Object(mut obj) => obj.remove("rules").ok_or_else(|| {
                LetterfxError::serde("rule document must be an array or contain a 'rules' array")
            })?,
            _ => {
                return Err(LetterfxError::serde(
                    "rule document must be an array or contain a 'rules' array",
                ));
            }
        };
        let rules: Vec<AnimationRule> = serde_json::from_value(list)?;
        Ok(Self::from_rules(rules))
    }

    /// Load a rule document from disk.
    pub fn from_path(path: &Path) -> LetterfxResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read rule document '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Append a rule with the defaults for `kind` and return its id.
    ///
    /// The identifier ordinal is the first one not already used by a rule of the same family.
    pub fn add(&mut self, kind: EffectKind) -> LetterfxResult<RuleId> {
        let mut ordinal = self
            .rules
            .iter()
            .filter(|r| r.effect.kind() == kind)
            .count()
            + 1;
        let rule = loop {
            let candidate = AnimationRule::with_defaults(kind, ordinal)?;
            if !self.rules.iter().any(|r| r.identifier == candidate.identifier) {
                break candidate;
            }
            ordinal += 1;
        };
        Ok(self.push(rule))
    }

    /// Append `rule`, overwriting any id it carries.
    pub fn push(&mut self, mut rule: AnimationRule) -> RuleId {
        self.next_id += 1;
        let id = RuleId(self.next_id);
        rule.id = Some(id);
        self.rules.push(rule);
        id
    }

    /// Replace the rule with `id`, keeping its position and id.
    pub fn replace(&mut self, id: RuleId, mut rule: AnimationRule) -> LetterfxResult<()> {
        let slot = self
            .rules
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| LetterfxError::validation(format!("no rule with id {}", id.0)))?;
        rule.id = Some(id);
        *slot = rule;
        Ok(())
    }

    /// Remove and return the rule with `id`.
    pub fn remove(&mut self, id: RuleId) -> LetterfxResult<AnimationRule> {
        let idx = self
            .rules
            .iter()
            .position(|r| r.id == Some(id))
            .ok_or_else(|| LetterfxError::validation(format!("no rule with id {}", id.0)))?;
        Ok(self.rules.remove(idx))
    }

    /// Drop every rule.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Rule with `id`, if present.
    pub fn get(&self, id: RuleId) -> Option<&AnimationRule> {
        self.rules.iter().find(|r| r.id == Some(id))
    }

    /// Rules in editor order.
    pub fn rules(&self) -> &[AnimationRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Identifiers used by more than one rule, sorted.
    pub fn duplicate_identifiers(&self) -> Vec<Identifier> {
        let mut counts = BTreeMap::<&Identifier, usize>::new();
        for rule in &self.rules {
            *counts.entry(&rule.identifier).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Check the list before generation.
    ///
    /// Duplicate identifiers are legal but make both rules drive the same elements, so they are
    /// only reported through `tracing`.
    pub fn validate(&self) -> LetterfxResult<()> {
        if self.rules.is_empty() {
            return Err(LetterfxError::validation(
                "add at least one rule before generating code",
            ));
        }
        for rule in &self.rules {
            rule.validate()?;
        }
        for dup in self.duplicate_identifiers() {
            tracing::warn!(identifier = %dup, "several rules share one animation identifier");
        }
        Ok(())
    }

    /// The rules as JSON with editor ids stripped.
    pub fn clean_json(&self) -> LetterfxResult<serde_json::Value> {
        Ok(serde_json::to_value(&self.rules)?)
    }
}

impl serde::Serialize for RuleSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.rules.serialize(serializer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rules/editor.rs"]
mod tests;

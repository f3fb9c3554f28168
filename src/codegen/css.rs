use std::fmt::Write as _;

use crate::{
    codegen::ir::{CssItem, CssRule, CssValue, Declaration, Keyframes, StyleSheet},
    foundation::core::escape_css_ident,
};

/// Render a declaration value.
pub fn render_value(value: &CssValue) -> String {
    match value {
        CssValue::Literal(v) => v.clone(),
        CssValue::Animation { name, rest } => {
            if rest.is_empty() {
                escape_css_ident(name)
            } else {
                format!("{} {rest}", escape_css_ident(name))
            }
        }
    }
}

fn write_declarations(out: &mut String, declarations: &[Declaration], indent: &str) {
    for d in declarations {
        let _ = writeln!(out, "{indent}{}: {};", d.property, render_value(&d.value));
    }
}

/// Render one style rule.
pub fn render_rule(rule: &CssRule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {{", rule.selector.to_css());
    write_declarations(&mut out, &rule.declarations, "  ");
    out.push_str("}\n");
    out
}

/// Render one `@keyframes` block.
pub fn render_keyframes(keyframes: &Keyframes) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "@keyframes {} {{", escape_css_ident(&keyframes.name));
    for step in &keyframes.steps {
        let _ = writeln!(out, "  {} {{", step.offset);
        write_declarations(&mut out, &step.declarations, "    ");
        out.push_str("  }\n");
    }
    out.push_str("}\n");
    out
}

/// Render the whole stylesheet.
pub fn render_stylesheet(sheet: &StyleSheet) -> String {
    sheet
        .items
        .iter()
        .map(|item| match item {
            CssItem::Rule(r) => render_rule(r),
            CssItem::Keyframes(k) => render_keyframes(k),
        })
        .collect()
}

impl std::fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render_stylesheet(self))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codegen/css.rs"]
mod tests;

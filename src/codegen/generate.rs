use crate::{
    codegen::{
        css::render_stylesheet,
        effects::{rule_styles, shared_styles},
        ir::{Script, Snippet, StyleSheet},
    },
    foundation::error::LetterfxResult,
    rules::editor::RuleSet,
};

#[tracing::instrument(skip(rules), fields(rules = rules.len()))]
/// Validate `rules` and build the snippet for them, in list order.
pub fn generate_snippet(rules: &RuleSet) -> LetterfxResult<Snippet> {
    rules.validate()?;

    let mut style = StyleSheet {
        items: shared_styles(),
    };
    for rule in rules.rules() {
        style.items.extend(rule_styles(rule));
    }
    let script = Script::for_rules(rules.rules())?;
    tracing::debug!(
        css_items = style.items.len(),
        blocks = script.blocks.len(),
        "snippet built"
    );

    Ok(Snippet { style, script })
}

impl Snippet {
    /// `<style>` followed by `<script>`, ready to paste into a page.
    pub fn to_html(&self) -> LetterfxResult<String> {
        let css = render_stylesheet(&self.style);
        let js = self.script.source()?;
        Ok(format!(
            "<style>\n{css}</style>\n{}\n{js}</script>\n",
            self.script.kind.open_tag()
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codegen/generate.rs"]
mod tests;

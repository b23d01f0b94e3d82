//! String template rendering utilities.
//!
//! Placeholders are `{{name}}`. Sections `{{#name}}...{{/name}}` render their
//! body when `name` is truthy, inverted sections `{{^name}}...{{/name}}` when
//! it is not. A section tag alone on its line consumes that line. Names are
//! identifiers with no inner whitespace, so `{{ vm.title }}` style expressions
//! meant for the generated code pass through untouched.
//!
//! Rendering is strict: referencing a variable missing from the bag is an error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([#^/]?)([A-Za-z_][A-Za-z0-9_]*)\}\}").unwrap());

static STANDALONE_SECTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(\{\{[#^/][A-Za-z_][A-Za-z0-9_]*\}\})[ \t]*\r?\n").unwrap()
});

/// A single value in a [`TemplateVars`] bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

impl TemplateValue {
    fn is_truthy(&self) -> bool {
        match self {
            TemplateValue::Text(s) => s == "true",
            TemplateValue::List(items) => !items.is_empty(),
            TemplateValue::Flag(b) => *b,
        }
    }

    fn to_text(&self) -> String {
        match self {
            TemplateValue::Text(s) => s.clone(),
            TemplateValue::List(items) => items.join(", "),
            TemplateValue::Flag(b) => b.to_string(),
        }
    }
}

/// Variables scoped to a single render call.
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    values: BTreeMap<String, TemplateValue>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values
            .insert(key.to_string(), TemplateValue::Text(value.into()));
        self
    }

    pub fn list<I, S>(mut self, key: &str, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items.into_iter().map(Into::into).collect();
        self.values
            .insert(key.to_string(), TemplateValue::List(items));
        self
    }

    pub fn flag(mut self, key: &str, value: bool) -> Self {
        self.values.insert(key.to_string(), TemplateValue::Flag(value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.values.get(key)
    }
}

/// Render `template` against `vars`. `template_id` is only used for error reporting.
pub fn render(template_id: &str, template: &str, vars: &TemplateVars) -> Result<String> {
    // Checked up front so a variable used only inside a skipped section still fails.
    if let Some(missing) = referenced_variables(template)
        .into_iter()
        .find(|name| vars.get(name).is_none())
    {
        return Err(Error::template_undefined_variable(template_id, missing));
    }

    let normalized = STANDALONE_SECTION_LINE.replace_all(template, "$1");
    let mut out = String::with_capacity(normalized.len());
    render_into(template_id, &normalized, vars, &mut out)?;
    Ok(out)
}

fn render_into(template_id: &str, template: &str, vars: &TemplateVars, out: &mut String) -> Result<()> {
    let mut rest = template;

    while let Some(caps) = TAG_PATTERN.captures(rest) {
        let (Some(tag), Some(sigil), Some(name)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            break;
        };
        let name = name.as_str();

        out.push_str(&rest[..tag.start()]);
        let after = &rest[tag.end()..];

        let value = vars
            .get(name)
            .ok_or_else(|| Error::template_undefined_variable(template_id, name))?;

        match sigil.as_str() {
            "" => {
                out.push_str(&value.to_text());
                rest = after;
            }
            "#" | "^" => {
                let close = format!("{{{{/{}}}}}", name);
                let end = after.find(&close).ok_or_else(|| {
                    Error::template_invalid(template_id, format!("Unclosed section '{}'", name))
                })?;

                let wanted = sigil.as_str() == "#";
                if value.is_truthy() == wanted {
                    render_into(template_id, &after[..end], vars, out)?;
                }
                rest = &after[end + close.len()..];
            }
            _ => {
                return Err(Error::template_invalid(
                    template_id,
                    format!("Unexpected closing tag '{}'", name),
                ));
            }
        }
    }

    out.push_str(rest);
    Ok(())
}

/// Names of all variables a template references, in order of first use.
pub fn referenced_variables(template: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in TAG_PATTERN.captures_iter(template) {
        let name = caps[2].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_text_placeholders() {
        let vars = TemplateVars::new().text("kebabPluginName", "my-plugin");
        let out = render("t", "rootProject.name = '{{kebabPluginName}}'", &vars).unwrap();
        assert_eq!(out, "rootProject.name = 'my-plugin'");
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let err = render("t", "hello {{who}}", &TemplateVars::new()).unwrap_err();
        assert_eq!(err.code.as_str(), "template.undefined_variable");
        assert_eq!(err.details["variable"], "who");
    }

    #[test]
    fn sections_follow_truthiness() {
        let vars = TemplateVars::new()
            .flag("karma", true)
            .list("frameworks", Vec::<String>::new());
        let tpl = "{{#karma}}K{{/karma}}{{^karma}}no-K{{/karma}}{{#frameworks}}F{{/frameworks}}{{^frameworks}}none{{/frameworks}}";
        assert_eq!(render("t", tpl, &vars).unwrap(), "Knone");
    }

    #[test]
    fn standalone_section_lines_are_consumed() {
        let vars = TemplateVars::new().flag("karma", false).flag("unittest", true);
        let tpl = "deps {\n    {{#karma}}\n    karma\n    {{/karma}}\n{{#unittest}}\n    jython\n{{/unittest}}\n}\n";
        assert_eq!(render("t", tpl, &vars).unwrap(), "deps {\n    jython\n}\n");
    }

    #[test]
    fn undefined_variable_inside_skipped_section_is_an_error() {
        let vars = TemplateVars::new().flag("karma", false);
        let err = render("t", "{{#karma}}{{karmaVersion}}{{/karma}}", &vars).unwrap_err();
        assert_eq!(err.details["variable"], "karmaVersion");
    }

    #[test]
    fn lists_render_comma_separated() {
        let vars = TemplateVars::new().list("items", ["karma", "unittest"]);
        assert_eq!(render("t", "[{{items}}]", &vars).unwrap(), "[karma, unittest]");
    }

    #[test]
    fn spaced_expressions_pass_through() {
        let out = render("t", "<h1>{{ vm.title }}</h1>", &TemplateVars::new()).unwrap();
        assert_eq!(out, "<h1>{{ vm.title }}</h1>");
    }

    #[test]
    fn unclosed_section_is_invalid() {
        let vars = TemplateVars::new().flag("karma", true);
        let err = render("t", "{{#karma}}oops", &vars).unwrap_err();
        assert_eq!(err.code.as_str(), "template.invalid");
    }

    #[test]
    fn stray_closing_tag_is_invalid() {
        let vars = TemplateVars::new().flag("karma", true);
        let err = render("t", "oops{{/karma}}", &vars).unwrap_err();
        assert_eq!(err.code.as_str(), "template.invalid");
    }

    #[test]
    fn referenced_variables_are_deduplicated() {
        let names = referenced_variables("{{a}} {{#b}}{{a}}{{/b}}");
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}

use crate::utils::error::{BlogError, Result};
use lol_html::html_content::Element;
use lol_html::{element, rewrite_str, RewriteStrSettings};
use serde::{Deserialize, Serialize};

/// Classes appended to every element with a matching tag name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRule {
    pub tag: String,
    pub classes: String,
}

impl ClassRule {
    pub fn new(tag: &str, classes: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: classes.to_string(),
        }
    }
}

pub fn default_rules() -> Vec<ClassRule> {
    vec![
        ClassRule::new("h2", "text-2xl font-bold"),
        ClassRule::new("p", "text-red-400 mb-4 text-center"),
        ClassRule::new("img", "items-center rounded-lg"),
    ]
}

/// Rewrites post bodies, visiting each element once and appending the
/// presentation classes of the first rule whose tag matches.
#[derive(Debug, Clone)]
pub struct MarkupTransform {
    rules: Vec<ClassRule>,
}

impl Default for MarkupTransform {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl MarkupTransform {
    pub fn new(rules: Vec<ClassRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ClassRule] {
        &self.rules
    }

    pub fn classes_for(&self, tag: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.tag.eq_ignore_ascii_case(tag))
            .map(|rule| rule.classes.as_str())
    }

    /// Mutates a single element in place. Unmatched tags are left untouched.
    pub fn decorate(&self, el: &mut Element<'_, '_>) -> Result<()> {
        let Some(classes) = self.classes_for(&el.tag_name()) else {
            return Ok(());
        };

        let class = append_classes(el.get_attribute("class").as_deref(), classes);
        el.set_attribute("class", &class)
            .map_err(|e| BlogError::MarkupError {
                message: e.to_string(),
            })
    }

    pub fn apply(&self, html: &str) -> Result<String> {
        rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("*", |el| {
                    self.decorate(el)?;
                    Ok(())
                })],
                ..RewriteStrSettings::default()
            },
        )
        .map_err(|e| BlogError::MarkupError {
            message: e.to_string(),
        })
    }
}

pub fn append_classes(existing: Option<&str>, classes: &str) -> String {
    match existing.map(str::trim_end) {
        Some(current) if !current.trim().is_empty() => format!("{} {}", current, classes),
        _ => classes.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_gets_classes_once() {
        let transform = MarkupTransform::default();
        let output = transform.apply("<h2>Hello</h2>").unwrap();

        assert_eq!(output, r#"<h2 class="text-2xl font-bold">Hello</h2>"#);
        assert_eq!(output.matches("text-2xl font-bold").count(), 1);
    }

    #[test]
    fn test_unrelated_tag_is_unchanged() {
        let transform = MarkupTransform::default();
        let input = r#"<span id="note" data-x="1">aside</span>"#;

        assert_eq!(transform.apply(input).unwrap(), input);
    }

    #[test]
    fn test_existing_class_is_preserved() {
        let transform = MarkupTransform::default();
        let output = transform.apply(r#"<p class="lead">x</p>"#).unwrap();

        assert_eq!(output, r#"<p class="lead text-red-400 mb-4 text-center">x</p>"#);
    }

    #[test]
    fn test_image_and_nested_elements() {
        let transform = MarkupTransform::default();
        let output = transform
            .apply(r#"<div><p>one <img src="a.png"></p><h3>sub</h3></div>"#)
            .unwrap();

        assert_eq!(
            output,
            r#"<div><p class="text-red-400 mb-4 text-center">one <img src="a.png" class="items-center rounded-lg"></p><h3>sub</h3></div>"#
        );
    }

    #[test]
    fn test_uppercase_tag_matches() {
        let transform = MarkupTransform::default();
        let output = transform.apply("<H2>Loud</H2>").unwrap();

        assert!(output.contains(r#"class="text-2xl font-bold""#));
    }

    #[test]
    fn test_custom_rules_replace_defaults() {
        let transform = MarkupTransform::new(vec![ClassRule::new("blockquote", "italic")]);
        let output = transform
            .apply("<blockquote>q</blockquote><h2>t</h2>")
            .unwrap();

        assert_eq!(output, r#"<blockquote class="italic">q</blockquote><h2>t</h2>"#);
        assert_eq!(transform.classes_for("h2"), None);
    }

    #[test]
    fn test_append_classes() {
        assert_eq!(append_classes(None, "a b"), "a b");
        assert_eq!(append_classes(Some(""), "a b"), "a b");
        assert_eq!(append_classes(Some("  "), "a b"), "a b");
        assert_eq!(append_classes(Some("x "), "a b"), "x a b");
    }

    #[test]
    fn test_plain_text_passes_through() {
        let transform = MarkupTransform::default();
        assert_eq!(transform.apply("no tags here").unwrap(), "no tags here");
    }
}

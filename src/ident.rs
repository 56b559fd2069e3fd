//! Identifier synthesis: component names, element class names, file names.
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::node::Node;

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_\s]+(.)?").unwrap());
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());
static NON_SLUG_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());
static KEBAB_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_]+").unwrap());
static NON_KEBAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9-]").unwrap());

/// Length of the id suffix on generated class names.
const CLASS_ID_CHARS: usize = 8;
pub const DEFAULT_COMPONENT_DIR: &str = "src/components";

/// `"my component-name"` → `"MyComponentName"`. Idempotent.
pub fn to_pascal_case(s: &str) -> String {
    let camel = SEPARATOR_RUN.replace_all(s, |caps: &Captures| {
        caps.get(1).map(|m| m.as_str().to_uppercase()).unwrap_or_default()
    });
    let stripped = NON_ALNUM.replace_all(&camel, "");
    upper_first(&stripped)
}

/// A usable JS identifier for the generated component.
pub fn component_identifier(name: &str) -> String {
    let pascal = to_pascal_case(name);
    match pascal.chars().next() {
        None => "Component".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Component{pascal}"),
        Some(_) => pascal,
    }
}

/// Class name for an element: slug of the node name (or type) plus a short id
/// suffix. Distinct nodes may still collide when both parts match.
pub fn slugify(node: &Node) -> String {
    let base = match node.name.as_deref() {
        Some(name) if !name.is_empty() => {
            NON_SLUG_RUN.replace_all(&name.to_lowercase(), "-").into_owned()
        }
        _ => node.kind.as_str().to_lowercase(),
    };
    let id: String = node
        .id
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(CLASS_ID_CHARS)
        .collect();
    format!("{base}-{id}")
}

/// `"PrimaryButton v2"` → `"primary-button-v2"`.
pub fn to_kebab_case(s: &str) -> String {
    let split = CAMEL_BOUNDARY.replace_all(s, "$1-$2");
    let dashed = KEBAB_SEPARATORS.replace_all(&split, "-");
    NON_KEBAB.replace_all(&dashed, "").to_lowercase()
}

/// Where a generated component would live: `{dir}/{kebab-name}.tsx`.
pub fn suggest_file_path(dir: Option<&str>, component_name: &str) -> String {
    let dir = dir
        .map(|d| d.trim_end_matches('/'))
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_COMPONENT_DIR);
    let stem = match to_kebab_case(component_name) {
        stem if stem.is_empty() => "component".to_string(),
        stem => stem,
    };
    format!("{dir}/{stem}.tsx")
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    #[test]
    fn pascal_case_examples() {
        assert_eq!(to_pascal_case("my component-name"), "MyComponentName");
        assert_eq!(to_pascal_case("primary_button"), "PrimaryButton");
        assert_eq!(to_pascal_case("  card  /  header "), "CardHeader");
        assert_eq!(to_pascal_case("Icon/24px"), "Icon24px");
        assert_eq!(to_pascal_case("!bang"), "Bang");
        assert_eq!(to_pascal_case("trailing-"), "Trailing");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn pascal_case_is_idempotent() {
        let samples = [
            "my component-name",
            "!bang",
            "__private__thing",
            "Ünïcödé name",
            "a-!b",
            "42 things",
            "already PascalCase",
            "émoji 🎉 button",
        ];
        for s in samples {
            let once = to_pascal_case(s);
            assert_eq!(to_pascal_case(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn component_identifier_is_always_valid() {
        assert_eq!(component_identifier("button"), "Button");
        assert_eq!(component_identifier("🎉"), "Component");
        assert_eq!(component_identifier("404 page"), "Component404Page");
    }

    #[test]
    fn slug_uses_name_then_type() {
        let node = Node::new("12:345", "Primary Button!", NodeType::Frame);
        assert_eq!(slugify(&node), "primary-button--12345");

        let mut unnamed = Node::new("I1:2;3:4", "", NodeType::Rectangle);
        assert_eq!(slugify(&unnamed), "rectangle-I1234");
        unnamed.id = "abcdefghijkl".into();
        assert_eq!(slugify(&unnamed), "rectangle-abcdefgh");
    }

    #[test]
    fn kebab_and_file_path() {
        assert_eq!(to_kebab_case("PrimaryButton v2"), "primary-button-v2");
        assert_eq!(to_kebab_case("card_header/Title"), "card-headertitle");
        assert_eq!(suggest_file_path(None, "PrimaryButton"), "src/components/primary-button.tsx");
        assert_eq!(suggest_file_path(Some("ui/"), "Card"), "ui/card.tsx");
        assert_eq!(suggest_file_path(Some(""), "🎉"), "src/components/component.tsx");
    }
}

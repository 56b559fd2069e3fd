//! Per-node style resolution.
//!
//! Each rule reads one group of visual attributes and writes camelCase CSS
//! properties into a [`StyleMap`]. Rules are independent; insertion order is the
//! rule order, which is also the order the emitted `style={…}` object lists them.
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::color::{color_to_css, gradient_to_css, num, px, shadow_to_css};
use crate::node::{EffectKind, LayoutMode, Node, NodeType, PaintKind};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Property value. Numbers stay numbers so the inline style object reads
/// `fontWeight: 700` rather than `"700"`.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Text(String),
    Number(f64),
}

impl StyleValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }
}

impl std::fmt::Display for StyleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleValue::Text(s) => f.write_str(s),
            StyleValue::Number(n) => f.write_str(&num(*n)),
        }
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleValue::Text(s) => serializer.serialize_str(s),
            StyleValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            StyleValue::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

/// Flat property → value map for one node. Read-only once resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleMap(IndexMap<&'static str, StyleValue>);

impl StyleMap {
    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.0.get(property)
    }

    /// Text value of a property; `None` when absent or numeric.
    pub fn text(&self, property: &str) -> Option<&str> {
        self.get(property).and_then(StyleValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Object literal for a JSX `style={…}` attribute.
    pub fn to_inline_object(&self) -> String {
        // string keys and finite-or-null values; serialization cannot fail
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    fn set(&mut self, property: &'static str, value: impl Into<StyleValue>) {
        self.0.insert(property, value.into());
    }
}

// ————————————————————————————————————————————————————————————————————————————
// RESOLUTION
// ————————————————————————————————————————————————————————————————————————————

pub fn resolve(node: &Node) -> StyleMap {
    let mut styles = StyleMap::default();
    geometry(node, &mut styles);
    layout(node, &mut styles);
    padding(node, &mut styles);
    fill(node, &mut styles);
    stroke(node, &mut styles);
    corner_radius(node, &mut styles);
    effects(node, &mut styles);
    text(node, &mut styles);
    if let Some(opacity) = node.opacity.filter(|o| *o != 1.0) {
        styles.set("opacity", opacity);
    }
    styles
}

/// Auto-layout alignment token to a flexbox keyword. Unknown tokens fall back
/// to `flex-start`.
pub fn map_alignment(token: &str) -> &'static str {
    match token {
        "MIN" => "flex-start",
        "CENTER" => "center",
        "MAX" => "flex-end",
        "SPACE_BETWEEN" => "space-between",
        "SPACE_AROUND" => "space-around",
        "SPACE_EVENLY" => "space-evenly",
        _ => "flex-start",
    }
}

fn geometry(node: &Node, styles: &mut StyleMap) {
    if let Some(bbox) = &node.bounding_box {
        styles.set("width", px(bbox.width));
        styles.set("height", px(bbox.height));
    }
}

fn layout(node: &Node, styles: &mut StyleMap) {
    match node.layout_mode {
        None | Some(LayoutMode::None) => {}
        Some(mode) => {
            styles.set("display", "flex");
            let direction = if mode == LayoutMode::Vertical { "column" } else { "row" };
            styles.set("flexDirection", direction);
            // the primary axis feeds alignItems and the counter axis justifyContent
            if let Some(token) = &node.primary_axis_align_items {
                styles.set("alignItems", map_alignment(token));
            }
            if let Some(token) = &node.counter_axis_align_items {
                styles.set("justifyContent", map_alignment(token));
            }
        }
    }
}

fn padding(node: &Node, styles: &mut StyleMap) {
    let sides = [
        ("paddingTop", node.padding_top),
        ("paddingBottom", node.padding_bottom),
        ("paddingLeft", node.padding_left),
        ("paddingRight", node.padding_right),
    ];
    for (property, value) in sides {
        if let Some(value) = value {
            styles.set(property, px(value));
        }
    }
}

fn fill(node: &Node, styles: &mut StyleMap) {
    let Some(paint) = node.fills.first() else { return };
    match (&paint.kind, &paint.color) {
        (PaintKind::Solid, Some(color)) => {
            styles.set("backgroundColor", color_to_css(color, paint.opacity));
        }
        (PaintKind::GradientLinear, _) => styles.set("background", gradient_to_css(paint)),
        _ => {}
    }
}

fn stroke(node: &Node, styles: &mut StyleMap) {
    let Some(paint) = node.strokes.first() else { return };
    if let (PaintKind::Solid, Some(color)) = (&paint.kind, &paint.color) {
        let weight = node.stroke_weight.filter(|w| *w != 0.0).unwrap_or(1.0);
        let color = color_to_css(color, paint.opacity);
        styles.set("border", format!("{} solid {color}", px(weight)));
    }
}

fn corner_radius(node: &Node, styles: &mut StyleMap) {
    match (node.corner_radius, &node.rectangle_corner_radii) {
        (Some(radius), _) if radius != 0.0 => styles.set("borderRadius", px(radius)),
        (_, Some(radii)) => {
            let value = radii.iter().map(|r| px(*r)).collect::<Vec<_>>().join(" ");
            styles.set("borderRadius", value);
        }
        _ => {}
    }
}

fn effects(node: &Node, styles: &mut StyleMap) {
    let shadows = node
        .effects
        .iter()
        .filter(|e| e.kind == EffectKind::DropShadow && e.visible != Some(false))
        .map(shadow_to_css)
        .collect::<Vec<_>>();
    if !shadows.is_empty() {
        styles.set("boxShadow", shadows.join(", "));
    }
}

fn text(node: &Node, styles: &mut StyleMap) {
    if node.kind != NodeType::Text {
        return;
    }
    let Some(style) = &node.style else { return };
    // zero sizes and spacings count as unset
    let nonzero = |v: Option<f64>| v.filter(|n| *n != 0.0);

    if let Some(family) = style.font_family.as_deref().filter(|f| !f.is_empty()) {
        styles.set("fontFamily", family);
    }
    if let Some(size) = nonzero(style.font_size) {
        styles.set("fontSize", px(size));
    }
    if let Some(weight) = nonzero(style.font_weight) {
        styles.set("fontWeight", weight);
    }
    if let Some(spacing) = nonzero(style.letter_spacing) {
        styles.set("letterSpacing", px(spacing));
    }
    if let Some(line_height) = nonzero(style.line_height_px) {
        styles.set("lineHeight", px(line_height));
    }
    if let Some(align) = style.text_align_horizontal.as_deref().filter(|a| !a.is_empty()) {
        styles.set("textAlign", align.to_lowercase());
    }
}

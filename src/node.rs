//! Strongly-typed design tree.
//!
//! Field names follow the design tool's document JSON; anything we don't model is
//! ignored on the way in. `children` are owned by their parent, so the tree can
//! never share a node between two parents.
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

// ————————————————————————————————————————————————————————————————————————————
// NODE
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    #[serde(rename = "absoluteBoundingBox", default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Paint>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rectangle_corner_radii: Option<[f64; 4]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<LayoutMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_axis_align_items: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_axis_align_items: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,

    /// TEXT only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    /// TEXT only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TypeStyle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Node {
    /// Minimal node; everything optional left absent.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeType) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            kind,
            children: Vec::new(),
            bounding_box: None,
            fills: Vec::new(),
            strokes: Vec::new(),
            effects: Vec::new(),
            stroke_weight: None,
            corner_radius: None,
            rectangle_corner_radii: None,
            layout_mode: None,
            primary_axis_align_items: None,
            counter_axis_align_items: None,
            padding_top: None,
            padding_right: None,
            padding_bottom: None,
            padding_left: None,
            characters: None,
            style: None,
            opacity: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Name as shown in catalogs; blank or missing names become `Unnamed`.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Unnamed",
        }
    }

    /// Node types the emitter renders as a `<div>` wrapping its children.
    pub fn is_container(&self) -> bool {
        matches!(
            self.kind,
            NodeType::Frame | NodeType::Group | NodeType::Component | NodeType::Instance
        )
    }
}

// ————————————————————————————————————————————————————————————————————————————
// NODE TYPE
// ————————————————————————————————————————————————————————————————————————————

/// Type tag of a node. `Other` keeps the raw tag so tools can still name it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Document,
    /// `CANVAS` in the file API, `PAGE` in the plugin API; both tags round-trip.
    Canvas,
    Page,
    Frame,
    Group,
    Component,
    ComponentSet,
    Instance,
    Text,
    Rectangle,
    Ellipse,
    Vector,
    Other(String),
}

impl NodeType {
    pub fn is_page(&self) -> bool {
        matches!(self, NodeType::Canvas | NodeType::Page)
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Document => "DOCUMENT",
            NodeType::Canvas => "CANVAS",
            NodeType::Page => "PAGE",
            NodeType::Frame => "FRAME",
            NodeType::Group => "GROUP",
            NodeType::Component => "COMPONENT",
            NodeType::ComponentSet => "COMPONENT_SET",
            NodeType::Instance => "INSTANCE",
            NodeType::Text => "TEXT",
            NodeType::Rectangle => "RECTANGLE",
            NodeType::Ellipse => "ELLIPSE",
            NodeType::Vector => "VECTOR",
            NodeType::Other(raw) => raw,
        }
    }
}

impl From<String> for NodeType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DOCUMENT" => NodeType::Document,
            "CANVAS" => NodeType::Canvas,
            "PAGE" => NodeType::Page,
            "FRAME" => NodeType::Frame,
            "GROUP" => NodeType::Group,
            "COMPONENT" => NodeType::Component,
            "COMPONENT_SET" => NodeType::ComponentSet,
            "INSTANCE" => NodeType::Instance,
            "TEXT" => NodeType::Text,
            "RECTANGLE" => NodeType::Rectangle,
            "ELLIPSE" => NodeType::Ellipse,
            "VECTOR" => NodeType::Vector,
            _ => NodeType::Other(raw),
        }
    }
}

impl From<NodeType> for String {
    fn from(kind: NodeType) -> Self {
        kind.as_str().to_string()
    }
}

impl std::str::FromStr for NodeType {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NodeType::from(s.to_ascii_uppercase()))
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ATTRIBUTES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    None,
    Horizontal,
    Vertical,
    #[serde(other)]
    Unknown,
}

/// Channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub gradient_stops: Vec<GradientStop>,
}

impl Paint {
    pub fn solid(color: Color, opacity: Option<f64>) -> Self {
        Self { kind: PaintKind::Solid, color: Some(color), opacity, gradient_stops: Vec::new() }
    }

    pub fn linear_gradient(stops: Vec<GradientStop>) -> Self {
        Self { kind: PaintKind::GradientLinear, color: None, opacity: None, gradient_stops: stops }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    Emoji,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Color,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Effect {
    pub fn drop_shadow(x: f64, y: f64, radius: f64, color: Color) -> Self {
        Self {
            kind: EffectKind::DropShadow,
            visible: None,
            offset: Some(Vector { x, y }),
            radius: Some(radius),
            spread: None,
            color: Some(color),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// FILE ENVELOPE
// ————————————————————————————————————————————————————————————————————————————

/// Response shape of the design tool's file endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub document: Node,
    /// Published components keyed by node id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: IndexMap<String, ComponentMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMeta {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_type_keeps_raw_tag() {
        let node: Node = serde_json::from_value(json!({
            "id": "1:2", "name": "Note", "type": "STICKY"
        })).unwrap();
        assert_eq!(node.kind, NodeType::Other("STICKY".to_string()));
        assert_eq!(node.kind.to_string(), "STICKY");
    }

    #[test]
    fn canvas_is_a_page() {
        let node: Node = serde_json::from_value(json!({
            "id": "0:1", "name": "Page 1", "type": "CANVAS", "children": null
        })).unwrap();
        assert_eq!(node.kind, NodeType::Canvas);
        assert!(node.kind.is_page());
        assert!(node.children.is_empty());
    }

    #[test]
    fn page_tags_round_trip() {
        for tag in ["CANVAS", "PAGE"] {
            let node: Node = serde_json::from_value(json!({ "id": "0:1", "type": tag })).unwrap();
            assert!(node.kind.is_page());
            assert_eq!(serde_json::to_value(&node).unwrap()["type"], json!(tag));
        }
    }

    #[test]
    fn decodes_visual_attributes() {
        let node: Node = serde_json::from_value(json!({
            "id": "1:3",
            "name": "Card",
            "type": "FRAME",
            "absoluteBoundingBox": { "x": 0, "y": 0, "width": 320, "height": 200 },
            "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1, "a": 1 } }],
            "strokes": [{ "type": "IMAGE" }],
            "effects": [{ "type": "DROP_SHADOW", "visible": true, "radius": 4 }],
            "layoutMode": "VERTICAL",
            "rectangleCornerRadii": [1, 2, 3, 4],
            "someFutureField": { "ignored": true }
        })).unwrap();
        assert_eq!(node.bounding_box.unwrap().width, 320.0);
        assert_eq!(node.fills[0].kind, PaintKind::Solid);
        assert_eq!(node.strokes[0].kind, PaintKind::Image);
        assert_eq!(node.effects[0].kind, EffectKind::DropShadow);
        assert_eq!(node.layout_mode, Some(LayoutMode::Vertical));
        assert_eq!(node.rectangle_corner_radii, Some([1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn display_name_falls_back() {
        let mut node = Node::new("1", "", NodeType::Frame);
        assert_eq!(node.display_name(), "Unnamed");
        node.name = None;
        assert_eq!(node.display_name(), "Unnamed");
    }
}

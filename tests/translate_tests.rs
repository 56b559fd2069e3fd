use design_jsx::catalog::enumerate_exportable;
use design_jsx::config::{ExportableTypes, TranslateOptions};
use design_jsx::ident::to_pascal_case;
use design_jsx::path_de::node_from_value;
use design_jsx::traverse::{collect_ids, find_by_id, NodeIndex};
use design_jsx::{resolve_style, translate, translate_value, DesignInput, Emitter, TranslateError};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn button_document() -> Value {
    json!({
        "name": "Kit",
        "document": {
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": [{
                "id": "0:1",
                "name": "Page1",
                "type": "CANVAS",
                "children": [{
                    "id": "1:1",
                    "name": "Button",
                    "type": "FRAME",
                    "absoluteBoundingBox": { "x": 0, "y": 0, "width": 120, "height": 40 },
                    "layoutMode": "HORIZONTAL",
                    "primaryAxisAlignItems": "CENTER",
                    "counterAxisAlignItems": "CENTER",
                    "paddingTop": 8, "paddingRight": 16, "paddingBottom": 8, "paddingLeft": 16,
                    "fills": [{ "type": "SOLID", "color": { "r": 0.2, "g": 0.4, "b": 1, "a": 1 } }],
                    "cornerRadius": 8,
                    "effects": [{
                        "type": "DROP_SHADOW",
                        "visible": true,
                        "offset": { "x": 0, "y": 2 },
                        "radius": 4,
                        "color": { "r": 0, "g": 0, "b": 0, "a": 0.25 }
                    }],
                    "children": [{
                        "id": "1:2",
                        "name": "Label",
                        "type": "TEXT",
                        "characters": "Hello",
                        "style": {
                            "fontFamily": "Inter",
                            "fontSize": 14,
                            "fontWeight": 600,
                            "textAlignHorizontal": "CENTER"
                        }
                    }]
                }]
            }]
        },
        "components": {}
    })
}

fn document_input() -> DesignInput {
    DesignInput::from_value(button_document()).unwrap()
}

#[test]
fn exportable_catalog_of_single_button() {
    let input = document_input();
    let entries = enumerate_exportable(input.root(), &ExportableTypes::default(), 48).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Button");
    assert_eq!(entries[0].kind.to_string(), "FRAME");
    assert_eq!(entries[0].path, "Page1 / Button");
    assert_eq!(
        serde_json::to_value(&entries[0]).unwrap(),
        json!({ "id": "1:1", "name": "Button", "type": "FRAME", "path": "Page1 / Button" })
    );
}

#[test]
fn frame_markup_contains_text_leaf() {
    let input = document_input();
    let frame = find_by_id(input.root(), "1:1", 48).unwrap().unwrap();
    let markup = Emitter::new(TranslateOptions::default()).emit_markup(frame, 0).unwrap();
    let lines = markup.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].trim_start().starts_with(r#"<div className="button-11""#));
    assert!(lines[1].trim_start().starts_with(r#"<span className="label-12""#));
    assert_eq!(lines[2].trim(), "Hello");
    assert_eq!(lines[3].trim(), "</span>");
    assert_eq!(lines[4].trim(), "</div>");
}

#[test]
fn full_component_source() {
    let input = document_input();
    let frame = find_by_id(input.root(), "1:1", 48).unwrap().unwrap();
    let emission = translate(frame, Some("primary-button"), &TranslateOptions::default()).unwrap();
    let expected = r##"import React from 'react';

interface PrimaryButtonProps {
  children?: React.ReactNode;
  className?: string;
  onClick?: () => void;
}

export const PrimaryButton: React.FC<PrimaryButtonProps> = ({
  children,
  className = '',
  onClick
}) => {
  return (
    <div className="button-11" style={{"width":"120px","height":"40px","display":"flex","flexDirection":"row","alignItems":"center","justifyContent":"center","paddingTop":"8px","paddingBottom":"8px","paddingLeft":"16px","paddingRight":"16px","backgroundColor":"#3366ff","borderRadius":"8px","boxShadow":"0px 2px 4px 0px #00000040"}}>
      <span className="label-12" style={{"fontFamily":"Inter","fontSize":"14px","fontWeight":600,"textAlign":"center"}}>
        Hello
      </span>
    </div>
  );
};

export default PrimaryButton;
"##;
    assert_eq!(emission.component_name, "PrimaryButton");
    assert_eq!(emission.source_text, expected);
}

#[test]
fn ids_and_lookup_agree() {
    let input = document_input();
    let root = input.root();
    let ids = collect_ids(root, 48).unwrap();
    assert_eq!(ids, vec!["0:0", "0:1", "1:1", "1:2"]);

    let index = NodeIndex::build(root, 48).unwrap();
    for id in &ids {
        assert_eq!(find_by_id(root, id, 48).unwrap().unwrap().id, *id);
        assert_eq!(index.get(id).unwrap().id, *id);
    }
    assert!(find_by_id(root, "9:9", 48).unwrap().is_none());
    assert!(index.get("9:9").is_none());
}

#[test]
fn collect_ids_counts_every_node() {
    let leaves = (0..25)
        .map(|i| json!({ "id": format!("L{}", i % 5), "type": "RECTANGLE" }))
        .collect::<Vec<_>>();
    let root = node_from_value(json!({ "id": "root", "type": "FRAME", "children": leaves })).unwrap();
    let ids = collect_ids(&root, 48).unwrap();
    assert_eq!(ids.len(), 26);
    assert_eq!(ids.iter().filter(|id| **id == "L0").count(), 5);
}

#[test]
fn corner_radius_forms() {
    let rect = node_from_value(json!({ "id": "r", "type": "RECTANGLE", "cornerRadius": 8 })).unwrap();
    assert_eq!(resolve_style(&rect).text("borderRadius"), Some("8px"));

    let rect = node_from_value(json!({
        "id": "r", "type": "RECTANGLE", "rectangleCornerRadii": [1, 2, 3, 4]
    }))
    .unwrap();
    assert_eq!(resolve_style(&rect).text("borderRadius"), Some("1px 2px 3px 4px"));
}

#[test]
fn unknown_type_keeps_siblings() {
    let emission = translate_value(
        json!({
            "id": "1:0",
            "name": "Board",
            "type": "FRAME",
            "children": [
                { "id": "1:1", "name": "Sticky", "type": "STICKY" },
                { "id": "1:2", "name": "Caption", "type": "TEXT", "characters": "after" }
            ]
        }),
        None,
        &TranslateOptions::default(),
    )
    .unwrap();
    assert!(emission.source_text.contains("STICKY"));
    assert!(emission.source_text.contains("after"));
    assert_eq!(emission.component_name, "Board");
}

#[test]
fn malformed_tree_fails_with_path() {
    let err = translate_value(
        json!({
            "id": "1:0",
            "type": "FRAME",
            "children": [{ "id": "1:1", "type": "GROUP", "children": [{ "name": "orphan" }] }]
        }),
        Some("Broken"),
        &TranslateOptions::default(),
    )
    .unwrap_err();
    match err {
        TranslateError::Structure { path, .. } => assert_eq!(path, "children[0].children[0]"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn deep_trees_are_rejected() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut value = json!({ "id": "leaf", "type": "TEXT" });
    for i in 0..20 {
        value = json!({ "id": format!("f{i}"), "type": "FRAME", "children": [value] });
    }
    let options = TranslateOptions { max_depth: 10, ..TranslateOptions::default() };
    let err = translate_value(value.clone(), None, &options).unwrap_err();
    assert!(matches!(err, TranslateError::TooDeep { limit: 10, .. }));
    assert!(translate_value(value, None, &TranslateOptions::default()).is_ok());
}

#[test]
fn pascal_case_properties() {
    assert_eq!(to_pascal_case("my component-name"), "MyComponentName");
    for s in ["", "x", "hello world", "--a--b--", "123 go", "Ä b_c", "mixed/Case\tname"] {
        let once = to_pascal_case(s);
        assert_eq!(to_pascal_case(&once), once);
    }
}

use flatschema_core::ir::IdlSchema;
use flatschema_core::{parse, transform};
use flatschema_json_schema::emitters::document::{SCHEMA_DRAFT, emit_document};
use flatschema_json_schema::generate_json_schema;
use serde_json::Value;

fn load(yaml: &str) -> IdlSchema {
    let doc = parse::from_yaml(yaml).expect("fixture should parse");
    transform::transform(&doc).expect("fixture should resolve")
}

fn render(yaml: &str, file_name: &str) -> (String, Value) {
    let text = emit_document(&load(yaml), file_name).expect("render should succeed");
    let value = serde_json::from_str(&text).expect("output should be valid JSON");
    (text, value)
}

fn collect_refs(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                if key == "$ref" {
                    if let Value::String(s) = v {
                        out.push(s.clone());
                    }
                } else {
                    collect_refs(v, out);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_refs(v, out)),
        _ => {}
    }
}

fn assert_refs_closed(value: &Value) {
    let mut refs = Vec::new();
    collect_refs(value, &mut refs);
    assert!(!refs.is_empty());
    for r in refs {
        let key = r
            .strip_prefix("#/definitions/")
            .unwrap_or_else(|| panic!("unexpected ref {r}"));
        assert!(
            value["definitions"].get(key).is_some(),
            "dangling ref {r}"
        );
    }
}

// --- Scenarios ---

#[test]
fn test_single_table() {
    let (_, value) = render(include_str!("fixtures/point.yaml"), "point");
    let point = &value["definitions"]["Point"];

    assert_eq!(point["type"], "object");
    assert_eq!(point["namespace"], "");
    assert_eq!(point["name"], "Point");
    assert_eq!(point["properties"]["x"]["$ref"], "#/definitions/float");
    assert_eq!(point["properties"]["y"]["$ref"], "#/definitions/float");
    assert_eq!(point["table"], true);
    assert_eq!(point["additionalProperties"], false);
    assert!(point.get("required").is_none());
    assert!(point.get("key").is_none());
    assert!(point.get("struct").is_none());
    assert_eq!(value["$ref"], "#/definitions/Point");
}

#[test]
fn test_enum_in_namespace() {
    let (_, value) = render(include_str!("fixtures/color.yaml"), "color");
    let color = &value["definitions"]["a_b_Color"];

    assert_eq!(color["type"], "string");
    assert_eq!(color["namespace"], "a.b");
    assert_eq!(color["name"], "Color");
    assert_eq!(color["isEnum"], "true");
    assert_eq!(color["enum"], serde_json::json!(["Red", "Green", "Blue"]));
    assert_eq!(color["enum_values"], serde_json::json!([0, 1, 2]));

    let palette = &value["definitions"]["a_b_Palette"]["properties"];
    assert_eq!(palette["primary"]["$ref"], "#/definitions/a_b_Color");
    assert_eq!(palette["swatches"]["type"], "array");
    assert_eq!(palette["swatches"]["items"]["$ref"], "#/definitions/a_b_Color");
    assert_eq!(value["$ref"], "#/definitions/a_b_Palette");
}

#[test]
fn test_key_and_required() {
    let (_, value) = render(include_str!("fixtures/user.yaml"), "user");
    let user = &value["definitions"]["User"];

    assert_eq!(user["key"], "id");
    assert_eq!(user["required"], serde_json::json!(["name"]));
    assert_eq!(user["properties"]["id"]["type"], "string");
    assert_eq!(user["properties"]["name"]["type"], "string");
}

#[test]
fn test_vectors() {
    let (_, value) = render(include_str!("fixtures/vectors.yaml"), "vectors");
    let props = &value["definitions"]["C"]["properties"];

    assert_eq!(props["items"]["type"], "array");
    assert_eq!(props["items"]["items"]["$ref"], "#/definitions/V");
    assert_eq!(props["bytes"]["items"]["$ref"], "#/definitions/uchar");
    assert_eq!(props["flags"]["items"]["type"], "boolean");
    assert_eq!(props["names"]["items"]["type"], "string");

    let v = &value["definitions"]["V"];
    assert_eq!(v["struct"], true);
    assert!(v.get("table").is_none());
}

#[test]
fn test_union() {
    let (text, value) = render(include_str!("fixtures/union.yaml"), "union");
    let defs = &value["definitions"];

    assert_eq!(defs["U"]["enum"], serde_json::json!(["NONE", "A", "B"]));
    assert_eq!(defs["U"]["enum_values"], serde_json::json!([0, 1, 2]));
    assert_eq!(defs["UUnion"]["isUnion"], "true");
    assert_eq!(
        defs["UUnion"]["anyOf"],
        serde_json::json!([
            { "$ref": "#/definitions/A" },
            { "$ref": "#/definitions/B" }
        ])
    );

    let props = &defs["Root"]["properties"];
    assert_eq!(props["choice_type"]["$ref"], "#/definitions/U");
    assert_eq!(props["choice"]["$ref"], "#/definitions/UUnion");

    // Discriminator precedes the value field, companion follows its enum
    let tag = text.find("\"choice_type\" :").unwrap();
    let payload = text.find("\"choice\" :").unwrap();
    assert!(tag < payload);
    let enum_pos = text.find("    \"U\" : {").unwrap();
    let companion_pos = text.find("    \"UUnion\" : {").unwrap();
    assert!(enum_pos < companion_pos);
}

#[test]
fn test_documentation_and_attributes() {
    let (_, value) = render(include_str!("fixtures/documented.yaml"), "documented");
    let doc = &value["definitions"]["Doc"];

    assert_eq!(doc["description"], "line1line2");
    assert_eq!(doc["attributes"], serde_json::json!({ "foo": "bar" }));
    assert_eq!(doc["properties"], serde_json::json!({}));
}

// --- Document-wide properties ---

#[test]
fn test_envelope() {
    let (text, value) = render(include_str!("fixtures/monster.yaml"), "monster");
    let top = value.as_object().unwrap();

    assert_eq!(top.len(), 3);
    assert_eq!(value["$schema"], SCHEMA_DRAFT);
    assert_eq!(value["$ref"], "#/definitions/MyGame_Sample_Monster");
    assert!(text.ends_with("}\n"));
}

#[test]
fn test_references_are_closed() {
    for (yaml, name) in [
        (include_str!("fixtures/point.yaml"), "point"),
        (include_str!("fixtures/color.yaml"), "color"),
        (include_str!("fixtures/user.yaml"), "user"),
        (include_str!("fixtures/vectors.yaml"), "vectors"),
        (include_str!("fixtures/union.yaml"), "union"),
        (include_str!("fixtures/documented.yaml"), "documented"),
        (include_str!("fixtures/monster.yaml"), "monster"),
    ] {
        let (_, value) = render(yaml, name);
        assert_refs_closed(&value);
    }
}

#[test]
fn test_definition_keys_are_unique() {
    for (yaml, name) in [
        (include_str!("fixtures/union.yaml"), "union"),
        (include_str!("fixtures/monster.yaml"), "monster"),
    ] {
        let (text, value) = render(yaml, name);
        // Entry headers are the only lines indented by exactly four spaces
        let headers: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("    \"") && l.ends_with("\" : {"))
            .collect();
        assert_eq!(
            headers.len(),
            value["definitions"].as_object().unwrap().len(),
            "{name}"
        );
    }
}

#[test]
fn test_primitive_catalog() {
    let (text, value) = render(include_str!("fixtures/point.yaml"), "point");
    let defs = &value["definitions"];

    let bounds: [(&str, i64, u64); 8] = [
        ("char", -128, 127),
        ("uchar", 0, 255),
        ("short", -32768, 32767),
        ("ushort", 0, 65535),
        ("int", -2147483648, 2147483647),
        ("uint", 0, 4294967295),
        ("long", i64::MIN, i64::MAX as u64),
        ("ulong", 0, u64::MAX),
    ];
    for (name, min, max) in bounds {
        assert_eq!(defs[name]["type"], "integer", "{name}");
        assert_eq!(defs[name]["name"], name);
        assert_eq!(defs[name]["minimum"].as_i64(), Some(min), "{name}");
        assert_eq!(defs[name]["maximum"].as_u64(), Some(max), "{name}");
    }
    assert_eq!(defs["float"]["type"], "number");
    assert_eq!(defs["float"]["bits"], 32);
    assert_eq!(defs["double"]["type"], "number");
    assert_eq!(defs["double"]["bits"], 64);

    // Catalog comes first, in fixed order
    let positions: Vec<usize> = [
        "char", "uchar", "short", "ushort", "int", "uint", "long", "ulong", "float", "double",
        "Point",
    ]
    .iter()
    .map(|k| text.find(&format!("    \"{k}\" : {{")).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_monster_definitions() {
    let (_, value) = render(include_str!("fixtures/monster.yaml"), "monster");
    let defs = &value["definitions"];

    let color = &defs["MyGame_Sample_Color"];
    assert_eq!(color["enum"], serde_json::json!(["Red", "Green", "Blue"]));
    assert_eq!(color["enum_values"], serde_json::json!([0, 1, 8]));
    assert_eq!(color["description"], " Composite color of the monster.");

    // String members have no schema reference of their own
    let equipment = &defs["MyGame_Sample_Equipment"];
    assert_eq!(equipment["enum"], serde_json::json!(["NONE", "Weapon", "Note"]));
    assert_eq!(
        defs["MyGame_Sample_EquipmentUnion"]["anyOf"],
        serde_json::json!([{ "$ref": "#/definitions/MyGame_Sample_Weapon" }])
    );

    let vec3 = &defs["MyGame_Math_Vec3"];
    assert_eq!(vec3["namespace"], "MyGame.Math");
    assert_eq!(vec3["struct"], true);
    assert_eq!(vec3["attributes"]["force_align"], "16");

    let monster = &defs["MyGame_Sample_Monster"];
    assert_eq!(monster["description"], " The root table.");
    assert_eq!(monster["attributes"]["priority"], "1");
    assert_eq!(monster["attributes"]["deprecated_since"], "2.0");
    assert_eq!(monster["required"], serde_json::json!(["name", "weapons"]));
    assert_eq!(
        monster["properties"]["pos"]["$ref"],
        "#/definitions/MyGame_Math_Vec3"
    );
    assert_eq!(
        monster["properties"]["path"]["items"]["$ref"],
        "#/definitions/MyGame_Math_Vec3"
    );
    assert_eq!(
        monster["properties"]["equipped_type"]["$ref"],
        "#/definitions/MyGame_Sample_Equipment"
    );
    assert_eq!(
        monster["properties"]["equipped"]["$ref"],
        "#/definitions/MyGame_Sample_EquipmentUnion"
    );
    assert_eq!(defs["MyGame_Sample_Weapon"]["key"], "name");
}

#[test]
fn test_enum_arrays_have_equal_length() {
    let (_, value) = render(include_str!("fixtures/monster.yaml"), "monster");
    for (key, def) in value["definitions"].as_object().unwrap() {
        if def.get("isEnum").is_some() {
            let names = def["enum"].as_array().unwrap();
            let values = def["enum_values"].as_array().unwrap();
            assert_eq!(names.len(), values.len(), "{key}");
        }
    }
}

#[test]
fn test_every_object_is_closed() {
    let (_, value) = render(include_str!("fixtures/monster.yaml"), "monster");
    for (key, def) in value["definitions"].as_object().unwrap() {
        let is_struct = def.get("struct").is_some() || def.get("table").is_some();
        assert_eq!(def["type"] == "object", is_struct, "{key}");
        if is_struct {
            assert_eq!(def["additionalProperties"], false, "{key}");
            for name in def
                .get("required")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
            {
                let name = name.as_str().unwrap();
                assert!(def["properties"].get(name).is_some(), "{key}.{name}");
            }
        }
    }
}

#[test]
fn test_empty_union_keeps_companion() {
    let (text, value) = render(include_str!("fixtures/monster.yaml"), "monster");
    let nothing = &value["definitions"]["MyGame_Empty_NothingUnion"];

    assert_eq!(nothing["anyOf"], serde_json::json!([]));
    assert_eq!(nothing["namespace"], "MyGame.Empty");
    assert!(text.contains("\"anyOf\" : []"));
    assert_eq!(
        value["definitions"]["MyGame_Empty_Nothing"]["enum"],
        serde_json::json!(["NONE"])
    );
}

#[test]
fn test_exclusive_definition_tracks_primary_file() {
    let (_, value) = render(include_str!("fixtures/monster.yaml"), "monster");
    let defs = &value["definitions"];

    assert_eq!(defs["MyGame_Sample_Monster"]["exclusiveDefinition"], true);
    assert_eq!(defs["MyGame_Sample_Color"]["exclusiveDefinition"], true);
    assert_eq!(defs["MyGame_Math_Vec3"]["exclusiveDefinition"], false);

    // Primitive catalog entries carry no metadata
    assert!(defs["int"].get("exclusiveDefinition").is_none());

    let (_, other) = render(include_str!("fixtures/monster.yaml"), "math");
    assert_eq!(
        other["definitions"]["MyGame_Math_Vec3"]["exclusiveDefinition"],
        true
    );
    assert_eq!(
        other["definitions"]["MyGame_Sample_Monster"]["exclusiveDefinition"],
        false
    );
}

#[test]
fn test_output_is_deterministic() {
    let schema = load(include_str!("fixtures/monster.yaml"));
    let first = emit_document(&schema, "monster").unwrap();
    let second = emit_document(&schema, "monster").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_json_and_yaml_inputs_agree() {
    let yaml = parse::from_yaml(include_str!("fixtures/point.yaml")).unwrap();
    let json = parse::from_json(&serde_json::to_string(&yaml).unwrap()).unwrap();
    let from_yaml = emit_document(&transform::transform(&yaml).unwrap(), "point").unwrap();
    let from_json = emit_document(&transform::transform(&json).unwrap(), "point").unwrap();
    assert_eq!(from_yaml, from_json);
}

// --- Filesystem ---

#[test]
fn test_generate_json_schema_writes_file() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = load(include_str!("fixtures/monster.yaml"));

    let path = generate_json_schema(&schema, tmp.path(), "monster").unwrap();
    assert_eq!(path, tmp.path().join("monster.schema.json"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, emit_document(&schema, "monster").unwrap());
}

#[test]
fn test_generate_json_schema_creates_output_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("deeply").join("nested");
    let schema = load(include_str!("fixtures/point.yaml"));

    let path = generate_json_schema(&schema, &out, "point").unwrap();
    assert!(path.exists());
    assert!(out.join("point.schema.json").is_file());
}

use crate::ir::QualifiedName;

/// Suffix of the companion key holding a union's payload types.
pub const UNION_SUFFIX: &str = "Union";

/// Flatten namespace components and a local name into a single `_`-joined identifier.
///
/// - `([], "Point")` → `"Point"`
/// - `(["a", "b"], "Color")` → `"a_b_Color"`
pub fn qualify(namespace: &[String], name: &str) -> String {
    let mut full_name = String::new();
    for component in namespace {
        full_name.push_str(component);
        full_name.push('_');
    }
    full_name.push_str(name);
    full_name
}

/// Key of the companion definition of a union, e.g. `a_b_EquipmentUnion`.
pub fn union_companion(qualified: &str) -> String {
    format!("{qualified}{UNION_SUFFIX}")
}

/// Build a `QualifiedName` with the flattened form pre-computed.
pub fn qualified_name(namespace: Vec<String>, name: &str) -> QualifiedName {
    QualifiedName {
        qualified: qualify(&namespace, name),
        name: name.to_string(),
        namespace,
    }
}

/// Split a dotted namespace (`a.b`) into its components, ignoring empty segments.
pub fn split_namespace(dotted: &str) -> Vec<String> {
    dotted
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

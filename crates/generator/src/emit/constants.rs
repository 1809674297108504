//! Renders a package's constants file: one enum per constant type.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::schema::ConstantDefinition;
use crate::util::pascal_case;

/// Renders the constants file, or `None` when the package has no constants.
/// Types and members come out sorted by name so regeneration from the same
/// input is byte-identical.
pub fn render_constants(constants: &BTreeMap<String, ConstantDefinition>) -> Option<String> {
    if constants.is_empty() {
        return None;
    }

    let mut out = String::from("use serde::{Deserialize, Serialize};\n");

    for (constant_name, definition) in constants {
        out.push('\n');
        if definition.case_insensitive {
            let _ = writeln!(out, "/// Values are matched case-insensitively by the service.");
        }
        let _ = writeln!(
            out,
            "#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]"
        );
        let _ = writeln!(out, "pub enum {constant_name} {{");
        for (member, literal) in &definition.values {
            let _ = writeln!(out, "    #[serde(rename = {literal:?})]");
            let _ = writeln!(out, "    {},", pascal_case(member));
        }
        out.push_str("}\n");
    }

    Some(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn constant(values: Vec<(&str, &str)>, case_insensitive: bool) -> ConstantDefinition {
        ConstantDefinition {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            case_insensitive,
        }
    }

    #[test]
    fn no_constants_renders_no_file() {
        assert!(render_constants(&BTreeMap::new()).is_none());
    }

    #[test]
    fn members_are_sorted_and_keep_their_wire_value() {
        let mut constants = BTreeMap::new();
        constants.insert(
            "SkuName".to_string(),
            constant(vec![("Standard", "Standard"), ("Basic", "Basic")], false),
        );

        let out = render_constants(&constants).unwrap();
        let basic = out.find("Basic,").unwrap();
        let standard = out.find("Standard,").unwrap();
        assert!(basic < standard);
        assert!(out.contains("#[serde(rename = \"Basic\")]"));
        assert!(out.contains("pub enum SkuName {"));
    }

    #[test]
    fn case_insensitive_flag_is_documented() {
        let mut constants = BTreeMap::new();
        constants.insert(
            "SkuTier".to_string(),
            constant(vec![("Basic", "basic")], true),
        );

        let out = render_constants(&constants).unwrap();
        assert!(out.contains("case-insensitively"));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let mut constants = BTreeMap::new();
        constants.insert(
            "SkuName".to_string(),
            constant(vec![("Basic", "Basic"), ("Standard", "Standard")], false),
        );
        constants.insert(
            "SkuTier".to_string(),
            constant(vec![("Premium", "Premium")], false),
        );

        assert_eq!(render_constants(&constants), render_constants(&constants));
    }
}

//! Renders a package's typed resource-identifier file.
//!
//! The identifier stores one field per segment except `subscriptionId`:
//! that value is supplied by the client at call time, so it only reappears
//! when the identifier is rendered to a path.

use std::fmt::Write as _;

use crate::error::Error;
use crate::schema::ResourceIdDefinition;
use crate::util::snake_case;

const SUBSCRIPTION_ID_SEGMENT: &str = "subscriptionId";

/// Renders the identifier struct, its constructor, and its `ResourceId`
/// impl for one package.
pub fn render_resource_id(
    type_name: &str,
    resource_id: &ResourceIdDefinition,
) -> Result<String, Error> {
    let placeholders = parse_placeholders(&resource_id.format);

    let stored_segments: Vec<&str> = resource_id
        .segments
        .iter()
        .map(String::as_str)
        .filter(|segment| *segment != SUBSCRIPTION_ID_SEGMENT)
        .collect();

    let stored_placeholders = placeholders
        .iter()
        .filter(|p| *p != SUBSCRIPTION_ID_SEGMENT)
        .count();
    if stored_placeholders != stored_segments.len() {
        return Err(Error::InvalidResourceIdFormat {
            format: resource_id.format.clone(),
            reason: format!(
                "{} placeholders but {} segments",
                stored_placeholders,
                stored_segments.len()
            ),
        });
    }

    let uses_subscription_id = placeholders
        .iter()
        .any(|p| p == SUBSCRIPTION_ID_SEGMENT);

    let fields: Vec<String> = stored_segments.iter().map(|s| snake_case(s)).collect();

    let mut out = String::from("use strata_sdk::ResourceId;\n\n");
    let _ = writeln!(out, "#[derive(Clone, Debug, PartialEq, Eq)]");
    let _ = writeln!(out, "pub struct {type_name}Id {{");
    for field in &fields {
        let _ = writeln!(out, "    pub {field}: String,");
    }
    out.push_str("}\n\n");

    // constructor takes the stored segments in declared order
    let _ = writeln!(out, "impl {type_name}Id {{");
    let arguments: Vec<String> = fields
        .iter()
        .map(|f| format!("{f}: impl Into<String>"))
        .collect();
    let _ = writeln!(out, "    pub fn new({}) -> Self {{", arguments.join(", "));
    out.push_str("        Self {\n");
    for field in &fields {
        let _ = writeln!(out, "            {field}: {field}.into(),");
    }
    out.push_str("        }\n    }\n}\n\n");

    let _ = writeln!(out, "impl ResourceId for {type_name}Id {{");
    let subscription_param = if uses_subscription_id {
        "subscription_id"
    } else {
        "_subscription_id"
    };
    let _ = writeln!(out, "    fn id(&self, {subscription_param}: &str) -> String {{");
    out.push_str(&render_body(&resource_id.format, &placeholders, &fields));
    out.push_str("    }\n}\n");

    Ok(out)
}

/// Substitutes the subscription id plus each stored segment, in declared
/// order, into the format string.
fn render_body(format: &str, placeholders: &[String], fields: &[String]) -> String {
    let mut template = format.to_string();
    for placeholder in placeholders {
        template = template.replacen(&format!("{{{placeholder}}}"), "{}", 1);
    }

    let mut arguments = Vec::new();
    let mut next_field = fields.iter();
    for placeholder in placeholders {
        if placeholder == SUBSCRIPTION_ID_SEGMENT {
            arguments.push("subscription_id".to_string());
        } else if let Some(field) = next_field.next() {
            arguments.push(format!("self.{field}"));
        }
    }

    if arguments.is_empty() {
        return format!("        {template:?}.to_string()\n");
    }

    format!(
        "        format!(\n            {:?},\n            {}\n        )\n",
        template,
        arguments.join(", ")
    )
}

fn parse_placeholders(format: &str) -> Vec<String> {
    let mut placeholders = Vec::new();
    let mut current = String::new();
    let mut in_placeholder = false;

    for c in format.chars() {
        match c {
            '{' => {
                in_placeholder = true;
                current.clear();
            }
            '}' if in_placeholder => {
                placeholders.push(current.clone());
                in_placeholder = false;
            }
            _ if in_placeholder => current.push(c),
            _ => {}
        }
    }

    placeholders
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn subscription_id_is_elided_from_fields_but_rendered_in_place() {
        let resource_id = ResourceIdDefinition {
            format: "/subscriptions/{subscriptionId}/resourceGroups/{name}/providers/Microsoft.EventHub/namespaces/{namespace}".to_string(),
            segments: vec!["resourceGroup".to_string(), "namespace".to_string()],
        };

        let out = render_resource_id("EventHubNamespace", &resource_id).unwrap();

        assert!(out.contains("pub struct EventHubNamespaceId {"));
        assert!(out.contains("pub resource_group: String,"));
        assert!(out.contains("pub namespace: String,"));
        assert!(!out.contains("subscription_id: String"));
        assert!(out.contains(
            "pub fn new(resource_group: impl Into<String>, namespace: impl Into<String>)"
        ));
        assert!(out.contains("subscription_id, self.resource_group, self.namespace"));
        assert!(out.contains(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.EventHub/namespaces/{}"
        ));
    }

    #[test]
    fn single_segment_identifier() {
        let resource_id = ResourceIdDefinition {
            format: "/subscriptions/{subscriptionId}/resourceGroups/{name}".to_string(),
            segments: vec!["name".to_string()],
        };

        let out = render_resource_id("ResourceGroup", &resource_id).unwrap();
        assert!(out.contains("pub fn new(name: impl Into<String>) -> Self {"));
        assert!(out.contains("subscription_id, self.name"));
    }

    #[test]
    fn identifier_without_subscription_marks_the_parameter_unused() {
        let resource_id = ResourceIdDefinition {
            format: "{configurationEndpoint}/keys?name={keyName}".to_string(),
            segments: vec!["configurationEndpoint".to_string(), "keyName".to_string()],
        };

        let out = render_resource_id("Keys", &resource_id).unwrap();
        assert!(out.contains("fn id(&self, _subscription_id: &str) -> String {"));
        assert!(out.contains("self.configuration_endpoint, self.key_name"));
    }

    #[test]
    fn mismatched_placeholders_and_segments_fail() {
        let resource_id = ResourceIdDefinition {
            format: "/subscriptions/{subscriptionId}/resourceGroups/{name}".to_string(),
            segments: vec!["name".to_string(), "extra".to_string()],
        };

        let err = render_resource_id("ResourceGroup", &resource_id).unwrap_err();
        assert!(matches!(err, Error::InvalidResourceIdFormat { .. }));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let resource_id = ResourceIdDefinition {
            format: "/subscriptions/{subscriptionId}/resourceGroups/{name}".to_string(),
            segments: vec!["name".to_string()],
        };

        assert_eq!(
            render_resource_id("ResourceGroup", &resource_id).unwrap(),
            render_resource_id("ResourceGroup", &resource_id).unwrap()
        );
    }
}

//! Schema-service payload structs for serde deserialization.
//!
//! This is the minimal subset of the metadata service's JSON shapes the
//! generator consumes: the API catalog, per-API version lists, per-version
//! operation catalogs, per-operation metadata, and per-operation schemas.
//! Maps are `BTreeMap` so iteration — and therefore everything emitted from
//! these payloads — is deterministic.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Catalog of APIs: `{"apis": {"eventhubs": {"uri": ..., "generate": true}}}`.
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    pub apis: BTreeMap<String, CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogEntry {
    pub uri: String,
    #[serde(default)]
    pub generate: bool,
}

/// Version list for one API, with the resource provider present only for
/// control-plane services.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionsResponse {
    pub versions: BTreeMap<String, VersionDetails>,
    #[serde(default)]
    pub resource_provider: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionDetails {
    pub uri: String,
    #[serde(default)]
    pub generate: bool,
    #[serde(default)]
    pub preview: bool,
}

/// Operation catalog for one API version: one entry per resource type.
#[derive(Debug, Deserialize)]
pub struct TypesResponse {
    pub types: BTreeMap<String, TypeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEntry {
    pub uri: String,
    pub resource_id: ResourceIdDefinition,
}

/// A path template with `{segment}` placeholders plus the ordered list of
/// segments that fill them.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdDefinition {
    pub format: String,
    pub segments: Vec<String>,
}

/// Per-type metadata: where to find its operation set and its schema.
#[derive(Debug, Deserialize)]
pub struct OperationMetaData {
    pub name: String,
    #[serde(rename = "operations")]
    pub operations_uri: String,
    #[serde(rename = "schema")]
    pub schema_uri: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsResponse {
    pub operations: BTreeMap<String, OperationDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDefinition {
    pub method: String,
    #[serde(default)]
    pub content_type: Option<String>,
    pub expected_status_codes: Vec<u16>,
    #[serde(default)]
    pub long_running: bool,
    #[serde(default)]
    pub request_object: Option<String>,
    #[serde(default)]
    pub response_object: Option<String>,
}

/// Models and constants for one resource type.
#[derive(Debug, Deserialize)]
pub struct SchemaResponse {
    #[serde(default)]
    pub constants: BTreeMap<String, ConstantDefinition>,
    #[serde(default)]
    pub models: BTreeMap<String, ModelDefinition>,
}

/// An enumerated type; members map to string literals on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantDefinition {
    pub values: BTreeMap<String, String>,
    #[serde(default)]
    pub case_insensitive: bool,
}

/// A model is a map of property name to property definition.
pub type ModelDefinition = BTreeMap<String, PropertyDefinition>;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub json_name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub list_element_type: Option<PropertyType>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub validation: Option<ValidationDefinition>,
    #[serde(default)]
    pub constant_reference: Option<String>,
    #[serde(default)]
    pub model_reference: Option<String>,
}

/// The closed set of abstract property kinds the schema service emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyType {
    Boolean,
    Constant,
    Integer,
    List,
    /// Semantic alias for `String`; affects documentation, not wire shape.
    Location,
    Object,
    String,
    Tags,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationDefinition {
    #[serde(rename = "type")]
    pub validation_type: ValidationType,
    #[serde(default)]
    pub values: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ValidationType {
    Range,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn property_definition_decodes_camel_case_fields() {
        let raw = r#"{
            "jsonName": "sku",
            "type": "Object",
            "required": true,
            "modelReference": "/apis/v1/resource-manager/eventhubs/schema#Sku"
        }"#;
        let property: PropertyDefinition =
            serde_json::from_str(raw).expect("property should decode");
        assert_eq!(property.json_name, "sku");
        assert_eq!(property.property_type, PropertyType::Object);
        assert!(property.required);
        assert!(!property.optional);
        assert!(property.model_reference.is_some());
        assert!(property.constant_reference.is_none());
    }

    #[test]
    fn unknown_property_type_is_rejected() {
        let raw = r#"{"jsonName": "x", "type": "Decimal"}"#;
        assert!(serde_json::from_str::<PropertyDefinition>(raw).is_err());
    }
}

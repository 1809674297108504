//! Maps abstract schema property types onto concrete emitted types, and
//! prepares per-model render plans with names resolved and fields sorted.

use std::collections::BTreeMap;

use crate::error::Error;
use crate::reference::parse_reference;
use crate::schema::{ModelDefinition, PropertyDefinition, PropertyType, ValidationType};
use crate::util::{pascal_case, snake_case};

/// A model ready for rendering: emitted names resolved, fields sorted by
/// emitted field name.
#[derive(Debug, Clone)]
pub struct ModelPlan {
    pub name: String,
    pub wire_name: String,
    pub fields: Vec<FieldPlan>,
}

impl ModelPlan {
    pub fn has_validation(&self) -> bool {
        self.fields.iter().any(FieldPlan::needs_validation)
    }
}

#[derive(Debug, Clone)]
pub struct FieldPlan {
    /// Emitted field name (snake_case).
    pub name: String,
    /// Name preserved for serialization.
    pub wire_name: String,
    /// Concrete emitted type, `Option`-wrapped when the property is optional.
    pub rust_type: String,
    pub optional: bool,
    /// Drives the "must not be empty" check.
    pub required_string: bool,
    /// Range validation is carried but not implemented.
    pub range_validation: bool,
    /// The constant type this field refers to, when it does; the models
    /// file imports these from the constants file.
    pub constant_type: Option<String>,
}

impl FieldPlan {
    pub fn needs_validation(&self) -> bool {
        self.required_string || self.range_validation
    }
}

/// Builds render plans for every model in a package, sorted by model name.
pub fn build_model_plans(
    models: &BTreeMap<String, ModelDefinition>,
) -> Result<Vec<ModelPlan>, Error> {
    let mut plans = Vec::new();

    for (model_name, properties) in models {
        let mut fields = Vec::new();
        for (property_name, property) in properties {
            fields.push(build_field_plan(model_name, property_name, property)?);
        }
        fields.sort_by(|a, b| a.name.cmp(&b.name));

        plans.push(ModelPlan {
            name: pascal_case(model_name),
            wire_name: model_name.clone(),
            fields,
        });
    }

    Ok(plans)
}

fn build_field_plan(
    model_name: &str,
    property_name: &str,
    property: &PropertyDefinition,
) -> Result<FieldPlan, Error> {
    if property.required && property.optional {
        return Err(Error::ConflictingPresence {
            model: model_name.to_string(),
            property: property_name.to_string(),
        });
    }

    let base_type = map_base_type(property_name, property)?;
    let required_string = property.required && base_type == "String";

    let rust_type = if property.optional {
        format!("Option<{base_type}>")
    } else {
        base_type
    };

    let range_validation = property
        .validation
        .as_ref()
        .is_some_and(|v| v.validation_type == ValidationType::Range);

    let references_constant = property.property_type == PropertyType::Constant
        || property.list_element_type == Some(PropertyType::Constant);
    let constant_type = if references_constant {
        property
            .constant_reference
            .as_deref()
            .map(|reference| parse_reference(reference).map(|r| r.type_name))
            .transpose()?
    } else {
        None
    };

    Ok(FieldPlan {
        name: snake_case(property_name),
        wire_name: property.json_name.clone(),
        rust_type,
        optional: property.optional,
        required_string,
        range_validation,
        constant_type,
    })
}

/// Maps a property to its concrete type, before the optionality wrapper.
fn map_base_type(property_name: &str, property: &PropertyDefinition) -> Result<String, Error> {
    if property.property_type == PropertyType::List {
        let element = property
            .list_element_type
            .ok_or_else(|| Error::MissingListElementType {
                property: property_name.to_string(),
            })?;
        let inner = map_kind(property_name, element, property)?;
        return Ok(format!("Vec<{inner}>"));
    }

    map_kind(property_name, property.property_type, property)
}

fn map_kind(
    property_name: &str,
    kind: PropertyType,
    property: &PropertyDefinition,
) -> Result<String, Error> {
    match kind {
        PropertyType::Constant => {
            let reference = property.constant_reference.as_deref().ok_or_else(|| {
                Error::MissingConstantReference {
                    property: property_name.to_string(),
                }
            })?;
            Ok(parse_reference(reference)?.type_name)
        }
        PropertyType::Object => {
            let reference = property.model_reference.as_deref().ok_or_else(|| {
                Error::MissingModelReference {
                    property: property_name.to_string(),
                }
            })?;
            Ok(parse_reference(reference)?.type_name)
        }
        PropertyType::Boolean => Ok("bool".to_string()),
        PropertyType::Integer => Ok("i64".to_string()),
        // Location is a documentation-level alias for String
        PropertyType::String | PropertyType::Location => Ok("String".to_string()),
        PropertyType::Tags => Ok("BTreeMap<String, String>".to_string()),
        PropertyType::List => Err(Error::NestedListsUnsupported {
            property: property_name.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::schema::ValidationDefinition;

    fn property(property_type: PropertyType) -> PropertyDefinition {
        PropertyDefinition {
            json_name: "example".to_string(),
            property_type,
            list_element_type: None,
            required: false,
            optional: false,
            validation: None,
            constant_reference: None,
            model_reference: None,
        }
    }

    #[test]
    fn primitives_map_to_fixed_types() {
        assert_eq!(
            map_base_type("a", &property(PropertyType::Boolean)).unwrap(),
            "bool"
        );
        assert_eq!(
            map_base_type("a", &property(PropertyType::Integer)).unwrap(),
            "i64"
        );
        assert_eq!(
            map_base_type("a", &property(PropertyType::String)).unwrap(),
            "String"
        );
        assert_eq!(
            map_base_type("a", &property(PropertyType::Location)).unwrap(),
            "String"
        );
        assert_eq!(
            map_base_type("a", &property(PropertyType::Tags)).unwrap(),
            "BTreeMap<String, String>"
        );
    }

    #[test]
    fn lists_wrap_their_element_type() {
        let mut p = property(PropertyType::List);
        p.list_element_type = Some(PropertyType::String);
        assert_eq!(map_base_type("a", &p).unwrap(), "Vec<String>");
    }

    #[test]
    fn list_without_element_type_is_an_error() {
        let p = property(PropertyType::List);
        let err = map_base_type("a", &p).unwrap_err();
        assert!(matches!(err, Error::MissingListElementType { .. }));
    }

    #[test]
    fn constant_resolves_through_its_reference() {
        let mut p = property(PropertyType::Constant);
        p.constant_reference = Some("/apis/v1/x/schema#SkuName".to_string());
        assert_eq!(map_base_type("a", &p).unwrap(), "SkuName");
    }

    #[test]
    fn constant_without_reference_is_an_error() {
        let err = map_base_type("a", &property(PropertyType::Constant)).unwrap_err();
        assert!(matches!(err, Error::MissingConstantReference { .. }));
    }

    #[test]
    fn object_without_reference_is_an_error() {
        let err = map_base_type("a", &property(PropertyType::Object)).unwrap_err();
        assert!(matches!(err, Error::MissingModelReference { .. }));
    }

    #[test]
    fn malformed_reference_is_an_error() {
        let mut p = property(PropertyType::Object);
        p.model_reference = Some("no-separator".to_string());
        let err = map_base_type("a", &p).unwrap_err();
        assert!(matches!(err, Error::MalformedReference { .. }));
    }

    #[test]
    fn optional_wraps_after_mapping() {
        let mut properties: ModelDefinition = ModelDefinition::new();
        let mut p = property(PropertyType::Integer);
        p.optional = true;
        properties.insert("capacity".to_string(), p);

        let mut models = BTreeMap::new();
        models.insert("Sku".to_string(), properties);

        let plans = build_model_plans(&models).unwrap();
        assert_eq!(plans[0].fields[0].rust_type, "Option<i64>");
    }

    #[test]
    fn required_and_optional_together_fail() {
        let mut properties: ModelDefinition = ModelDefinition::new();
        let mut p = property(PropertyType::String);
        p.required = true;
        p.optional = true;
        properties.insert("name".to_string(), p);

        let mut models = BTreeMap::new();
        models.insert("Sku".to_string(), properties);

        let err = build_model_plans(&models).unwrap_err();
        assert!(matches!(
            err,
            Error::ConflictingPresence { model, property }
                if model == "Sku" && property == "name"
        ));
    }

    #[test]
    fn required_location_gets_the_string_emptiness_check() {
        let mut properties: ModelDefinition = ModelDefinition::new();
        let mut p = property(PropertyType::Location);
        p.required = true;
        properties.insert("location".to_string(), p);

        let mut models = BTreeMap::new();
        models.insert("CreateInput".to_string(), properties);

        let plans = build_model_plans(&models).unwrap();
        assert!(plans[0].fields[0].required_string);
        assert!(plans[0].has_validation());
    }

    #[test]
    fn fields_sort_by_emitted_name() {
        let mut properties: ModelDefinition = ModelDefinition::new();
        properties.insert("zone".to_string(), property(PropertyType::String));
        properties.insert("alpha".to_string(), property(PropertyType::String));

        let mut models = BTreeMap::new();
        models.insert("M".to_string(), properties);

        let plans = build_model_plans(&models).unwrap();
        let names: Vec<_> = plans[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zone"]);
    }

    #[test]
    fn range_validation_is_carried() {
        let mut properties: ModelDefinition = ModelDefinition::new();
        let mut p = property(PropertyType::Integer);
        p.validation = Some(ValidationDefinition {
            validation_type: ValidationType::Range,
            values: None,
        });
        properties.insert("capacity".to_string(), p);

        let mut models = BTreeMap::new();
        models.insert("Sku".to_string(), properties);

        let plans = build_model_plans(&models).unwrap();
        assert!(plans[0].fields[0].range_validation);
    }
}

//! Cross-entity reference strings embedded in schema payloads.

use crate::error::Error;

/// A parsed reference, e.g.
/// `/apis/v1/resource-manager/eventhubs/2018-01-01-preview/namespaces/schema#Sku`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// The path of the operation the referenced type is defined under.
    /// Exists to allow cross-package references later; unused today but
    /// parsed from the start so lookups stay possible.
    pub operation_path: String,
    /// The referenced type name.
    pub type_name: String,
}

/// Splits a reference on `#`. Exactly two segments are required; there is
/// no normalization or case folding.
pub fn parse_reference(input: &str) -> Result<Reference, Error> {
    let segments: Vec<&str> = input.split('#').collect();
    if segments.len() != 2 {
        return Err(Error::MalformedReference {
            input: input.to_string(),
            segments: segments.len(),
        });
    }

    Ok(Reference {
        operation_path: segments[0].to_string(),
        type_name: segments[1].to_string(),
    })
}

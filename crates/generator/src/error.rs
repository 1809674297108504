//! Error taxonomy for the generator pipeline.
//!
//! Schema-fetch failures abort the whole run; reference, mapping, and
//! operation-shape failures abort the enclosing package. Nothing is
//! retried, and no partial output is committed beyond the initial clearing
//! of the output directory.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A schema-service fetch failed: network error, non-200 status, or a
    /// body that did not decode as the expected shape.
    #[error("fetching {uri}: {message}")]
    SchemaFetch { uri: String, message: String },

    /// No API version in the version list was flagged for generation.
    #[error("service {service:?}: no version was marked to generate")]
    NoVersionToGenerate { service: String },

    /// More than one API version was flagged for generation; exactly one is
    /// required so the chosen version never depends on iteration order.
    #[error("service {service:?}: multiple versions marked to generate: {versions:?}")]
    AmbiguousVersions {
        service: String,
        versions: Vec<String>,
    },

    /// A cross-entity reference string did not split into exactly two
    /// `#`-separated segments.
    #[error("reference {input:?}: expected 2 segments but got {segments}")]
    MalformedReference { input: String, segments: usize },

    /// A list-typed property without an element type.
    #[error("property {property:?}: `listElementType` cannot be empty for a `List`")]
    MissingListElementType { property: String },

    /// A list whose element type is itself a list; nested lists are not
    /// modeled.
    #[error("property {property:?}: lists of lists are not supported")]
    NestedListsUnsupported { property: String },

    /// A constant-typed property without a constant reference.
    #[error("property {property:?}: constant without a reference")]
    MissingConstantReference { property: String },

    /// An object-typed property without a model reference.
    #[error("property {property:?}: model without a reference")]
    MissingModelReference { property: String },

    /// A property flagged both required and optional.
    #[error("model {model:?}: property {property:?} is both required and optional")]
    ConflictingPresence { model: String, property: String },

    /// The operation's shape cannot be emitted (e.g. a long-running GET).
    #[error("operation {operation:?}: {reason}")]
    UnsupportedOperation { operation: String, reason: String },

    /// The resource-identifier format string and segment list disagree.
    #[error("resource id format {format:?}: {reason}")]
    InvalidResourceIdFormat { format: String, reason: String },

    /// A package failed to generate; names the package the failure belongs
    /// to. Generation is fail-fast, so this still aborts the run.
    #[error("generating package {package:?}: {source}")]
    Package {
        package: String,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

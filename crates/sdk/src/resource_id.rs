//! Traits implemented by generated identifier and model types.

/// A typed resource identifier that renders to a request path.
///
/// The subscription id is supplied by the client at call time rather than
/// stored on the identifier, so one identifier value can be reused across
/// subscriptions.
pub trait ResourceId {
    fn id(&self, subscription_id: &str) -> String;
}

/// A generated model carrying request-side validation.
pub trait ModelWithValidation {
    /// Returns every violated constraint, or `Ok(())` when the model is
    /// acceptable to send.
    fn validate(&self) -> Result<(), Vec<String>>;
}

/// Renders the full resource-manager URI for an identifier, including the
/// API version query parameter.
pub fn build_resource_manager_uri<T: ResourceId>(
    id: &T,
    subscription_id: &str,
    api_version: &str,
) -> String {
    format!("{}?api-version={}", id.id(subscription_id), api_version)
}

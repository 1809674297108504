//! The authorization seam between generated clients and a token provider.
//!
//! Token acquisition itself (OAuth flows, managed identities, CLI caches)
//! lives outside this crate; callers hand the client anything implementing
//! [`Authorizer`].

/// A bearer token plus its scheme, as returned by a token provider.
#[derive(Debug, Clone)]
pub struct Token {
    access_token: String,
    kind: String,
}

impl Token {
    pub fn new(kind: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            kind: kind.into(),
        }
    }

    /// The value for an `Authorization` header, e.g. `Bearer eyJ0...`.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.kind, self.access_token)
    }
}

/// Supplies tokens for requests against a given resource endpoint.
pub trait Authorizer: Send + Sync {
    fn token(&self, resource: &str) -> Token;
}

/// An authorizer that always returns the same token.
///
/// Useful for tests and for callers that manage token refresh themselves.
#[derive(Debug, Clone)]
pub struct StaticTokenAuthorizer {
    token: Token,
}

impl StaticTokenAuthorizer {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: Token::new("Bearer", access_token),
        }
    }
}

impl Authorizer for StaticTokenAuthorizer {
    fn token(&self, _resource: &str) -> Token {
        self.token.clone()
    }
}

//! Runtime support for generated cloud management API clients.
//!
//! Generated clients are thin: each method builds a request against a typed
//! resource identifier, hands it to [`BaseClient`], and either decodes the
//! response or returns a [`Poller`] the caller waits on when the operation
//! completes asynchronously on the server side.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod poller;
pub mod resource_id;

pub use auth::{Authorizer, StaticTokenAuthorizer, Token};
pub use client::{
    ApiClient, BaseClient, ClientMetaData, DeleteRequest, GetRequest, JsonResponse, PatchRequest,
    PutRequest,
};
pub use error::Error;
pub use poller::{PollState, Poller};
pub use resource_id::{build_resource_manager_uri, ModelWithValidation, ResourceId};

/// The transport-level response type, re-exported for generated clients.
pub use reqwest::Response;

//! Renders a package's operation client: one method per operation, with
//! the emitted shape selected by HTTP method and whether the operation is
//! long-running.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::builder::{PackageDefinition, ServiceDefinition};
use crate::emit::status_code_comment;
use crate::error::Error;
use crate::reference::parse_reference;

/// One operation with its cross-references resolved to emitted type names.
#[derive(Debug, Clone)]
struct ClientOperation {
    name: String,
    method: String,
    long_running: bool,
    expected_status_codes: Vec<u16>,
    request_object: Option<String>,
    response_object: Option<String>,
}

/// Renders the client file for one package. The resource-manager and
/// data-plane shapes differ only in the metadata the client reports.
pub fn render_client(
    service: &ServiceDefinition,
    package: &PackageDefinition,
) -> Result<String, Error> {
    let mut operations = Vec::new();
    for (name, operation) in &package.operations {
        let request_object = operation
            .request_object
            .as_deref()
            .map(|r| parse_reference(r).map(|parsed| parsed.type_name))
            .transpose()?;
        let response_object = operation
            .response_object
            .as_deref()
            .map(|r| parse_reference(r).map(|parsed| parsed.type_name))
            .transpose()?;

        operations.push(ClientOperation {
            name: name.clone(),
            method: operation.method.to_uppercase(),
            long_running: operation.long_running,
            expected_status_codes: operation.expected_status_codes.clone(),
            request_object,
            response_object,
        });
    }

    let client_name = format!("{}Client", package.type_name);
    let id_type = format!("{}Id", package.type_name);

    let mut methods = String::new();
    for operation in &operations {
        methods.push('\n');
        methods.push_str(&render_method(operation, &id_type)?);
    }

    let mut out = render_imports(&operations, &id_type);
    out.push('\n');
    out.push_str(&render_struct_and_constructors(
        &client_name,
        &service.api_version,
    ));
    let _ = writeln!(out, "\nimpl {client_name} {{");
    out.push_str(&methods);
    out.push_str("}\n");
    out.push('\n');
    out.push_str(&render_metadata(
        &client_name,
        service.resource_provider.as_deref(),
    ));

    Ok(out)
}

fn render_imports(operations: &[ClientOperation], id_type: &str) -> String {
    let has_get = operations.iter().any(|op| op.method == "GET");
    let has_put = operations.iter().any(|op| op.method == "PUT");
    let has_patch = operations.iter().any(|op| op.method == "PATCH");
    let has_delete = operations.iter().any(|op| op.method == "DELETE");
    let has_poller = operations.iter().any(|op| op.long_running);
    let has_raw_response = operations
        .iter()
        .any(|op| op.method != "GET" && !op.long_running);

    let mut sdk_items = vec![
        "build_resource_manager_uri".to_string(),
        "ApiClient".to_string(),
        "Authorizer".to_string(),
        "BaseClient".to_string(),
        "ClientMetaData".to_string(),
        "Error".to_string(),
    ];
    if has_delete {
        sdk_items.push("DeleteRequest".to_string());
    }
    if has_get {
        sdk_items.push("GetRequest".to_string());
        sdk_items.push("JsonResponse".to_string());
    }
    if has_patch {
        sdk_items.push("PatchRequest".to_string());
    }
    if has_poller {
        sdk_items.push("Poller".to_string());
    }
    if has_put {
        sdk_items.push("PutRequest".to_string());
    }
    if has_raw_response {
        sdk_items.push("Response".to_string());
    }
    sdk_items.sort();

    let model_imports: BTreeSet<&str> = operations
        .iter()
        .flat_map(|op| {
            op.request_object
                .as_deref()
                .into_iter()
                .chain(op.response_object.as_deref())
        })
        .collect();

    let mut out = String::from("use std::sync::Arc;\n\n");
    out.push_str("use strata_sdk::endpoints::DEFAULT_MANAGEMENT_ENDPOINT;\n");
    let _ = writeln!(out, "use strata_sdk::{{{}}};", sdk_items.join(", "));
    out.push('\n');
    let _ = writeln!(out, "use super::ids::{id_type};");
    if !model_imports.is_empty() {
        let names: Vec<&str> = model_imports.into_iter().collect();
        let _ = writeln!(out, "use super::models::{{{}}};", names.join(", "));
    }
    out
}

fn render_struct_and_constructors(client_name: &str, api_version: &str) -> String {
    format!(
        r#"#[derive(Clone, Debug)]
pub struct {client_name} {{
    api_version: String,
    base_client: BaseClient,
    subscription_id: String,
}}

impl {client_name} {{
    pub fn new(subscription_id: impl Into<String>, authorizer: Arc<dyn Authorizer>) -> Self {{
        Self::with_base_uri(DEFAULT_MANAGEMENT_ENDPOINT, subscription_id, authorizer)
    }}

    pub fn with_base_uri(
        endpoint: impl Into<String>,
        subscription_id: impl Into<String>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {{
        Self {{
            api_version: {api_version:?}.to_string(),
            base_client: BaseClient::new(endpoint, authorizer),
            subscription_id: subscription_id.into(),
        }}
    }}
}}
"#
    )
}

fn render_metadata(client_name: &str, resource_provider: Option<&str>) -> String {
    match resource_provider {
        Some(provider) => format!(
            r#"impl ApiClient for {client_name} {{
    fn meta_data(&self) -> ClientMetaData {{
        ClientMetaData {{
            resource_provider: Some({provider:?}.to_string()),
        }}
    }}
}}
"#
        ),
        None => format!(
            r#"impl ApiClient for {client_name} {{
    fn meta_data(&self) -> ClientMetaData {{
        ClientMetaData::default()
    }}
}}
"#
        ),
    }
}

fn render_method(operation: &ClientOperation, id_type: &str) -> Result<String, Error> {
    match operation.method.as_str() {
        "DELETE" => {
            if operation.request_object.is_some() {
                return Err(unsupported(operation, "`DELETE` operations do not support request objects"));
            }
            Ok(render_delete(operation, id_type))
        }
        "GET" => {
            if operation.long_running {
                return Err(unsupported(operation, "`GET` operations cannot be long-running"));
            }
            if operation.request_object.is_some() {
                return Err(unsupported(operation, "`GET` operations do not support request objects"));
            }
            let Some(response_object) = operation.response_object.as_deref() else {
                return Err(unsupported(operation, "`GET` operations must have a response object"));
            };
            Ok(render_get(operation, id_type, response_object))
        }
        "PATCH" | "PUT" => {
            let Some(request_object) = operation.request_object.as_deref() else {
                return Err(unsupported(
                    operation,
                    "`PUT`/`PATCH` operations must have a request object",
                ));
            };
            Ok(render_write(operation, id_type, request_object))
        }
        other => Err(unsupported(operation, &format!("unsupported method {other:?}"))),
    }
}

fn unsupported(operation: &ClientOperation, reason: &str) -> Error {
    Error::UnsupportedOperation {
        operation: operation.name.clone(),
        reason: reason.to_string(),
    }
}

fn render_get(operation: &ClientOperation, id_type: &str, response_object: &str) -> String {
    format!(
        r#"    pub async fn {name}(
        &self,
        id: &{id_type},
    ) -> Result<JsonResponse<{response_object}>, Error> {{
        let req = GetRequest {{
            expected_status_codes: vec![
{status_codes}
            ],
            uri: build_resource_manager_uri(id, &self.subscription_id, &self.api_version),
        }};

        self.base_client.get_json(req).await
    }}
"#,
        name = method_name(&operation.name),
        status_codes = status_codes(operation),
    )
}

fn render_delete(operation: &ClientOperation, id_type: &str) -> String {
    let (return_type, call) = if operation.long_running {
        ("Poller", "delete_then_poll")
    } else {
        ("Response", "delete")
    };

    format!(
        r#"    pub async fn {name}(&self, id: &{id_type}) -> Result<{return_type}, Error> {{
        let req = DeleteRequest {{
            expected_status_codes: vec![
{status_codes}
            ],
            uri: build_resource_manager_uri(id, &self.subscription_id, &self.api_version),
        }};

        self.base_client.{call}(req).await
    }}
"#,
        name = method_name(&operation.name),
        status_codes = status_codes(operation),
    )
}

fn render_write(operation: &ClientOperation, id_type: &str, request_object: &str) -> String {
    let request_type = if operation.method == "PUT" {
        "PutRequest"
    } else {
        "PatchRequest"
    };
    let call = match (operation.method.as_str(), operation.long_running) {
        ("PUT", true) => "put_json_then_poll",
        ("PUT", false) => "put_json",
        (_, true) => "patch_json_then_poll",
        (_, false) => "patch_json",
    };
    let return_type = if operation.long_running {
        "Poller"
    } else {
        "Response"
    };

    format!(
        r#"    pub async fn {name}(
        &self,
        id: &{id_type},
        input: &{request_object},
    ) -> Result<{return_type}, Error> {{
        let req = {request_type} {{
            body: input,
            expected_status_codes: vec![
{status_codes}
            ],
            uri: build_resource_manager_uri(id, &self.subscription_id, &self.api_version),
        }};

        self.base_client.{call}(req).await
    }}
"#,
        name = method_name(&operation.name),
        status_codes = status_codes(operation),
    )
}

fn status_codes(operation: &ClientOperation) -> String {
    operation
        .expected_status_codes
        .iter()
        .map(|code| {
            format!(
                "                {}, // {}",
                code,
                status_code_comment(*code, &operation.method, operation.long_running)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn method_name(operation_name: &str) -> String {
    crate::util::snake_case(operation_name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::schema::{OperationDefinition, ResourceIdDefinition};
    use std::collections::BTreeMap;

    fn operation(
        method: &str,
        long_running: bool,
        request: Option<&str>,
        response: Option<&str>,
    ) -> OperationDefinition {
        OperationDefinition {
            method: method.to_string(),
            content_type: None,
            expected_status_codes: vec![200],
            long_running,
            request_object: request.map(|r| format!("/apis/v1/x/schema#{r}")),
            response_object: response.map(|r| format!("/apis/v1/x/schema#{r}")),
        }
    }

    fn package(operations: Vec<(&str, OperationDefinition)>) -> PackageDefinition {
        PackageDefinition {
            package_name: "namespaces".to_string(),
            type_name: "Namespaces".to_string(),
            resource_id: ResourceIdDefinition {
                format: "/subscriptions/{subscriptionId}/x/{name}".to_string(),
                segments: vec!["name".to_string()],
            },
            models: BTreeMap::new(),
            constants: BTreeMap::new(),
            operations: operations
                .into_iter()
                .map(|(name, op)| (name.to_string(), op))
                .collect(),
        }
    }

    fn service(resource_provider: Option<&str>) -> ServiceDefinition {
        ServiceDefinition {
            service_name: "eventhubs".to_string(),
            api_version: "2018-01-01-preview".to_string(),
            resource_provider: resource_provider.map(ToString::to_string),
            packages: Vec::new(),
        }
    }

    #[test]
    fn long_running_get_is_rejected() {
        let pkg = package(vec![("Get", operation("GET", true, None, Some("GetThing")))]);
        let err = render_client(&service(Some("Microsoft.EventHub")), &pkg).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation { .. }));
    }

    #[test]
    fn delete_with_request_object_is_rejected() {
        let pkg = package(vec![(
            "Delete",
            operation("DELETE", false, Some("DeleteInput"), None),
        )]);
        let err = render_client(&service(Some("Microsoft.EventHub")), &pkg).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation { .. }));
    }

    #[test]
    fn put_without_request_object_is_rejected() {
        let pkg = package(vec![("Create", operation("PUT", true, None, None))]);
        let err = render_client(&service(Some("Microsoft.EventHub")), &pkg).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation { .. }));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let pkg = package(vec![("Post", operation("POST", false, None, None))]);
        let err = render_client(&service(Some("Microsoft.EventHub")), &pkg).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation { .. }));
    }

    #[test]
    fn long_running_put_returns_a_poller() {
        let pkg = package(vec![(
            "Create",
            operation("PUT", true, Some("CreateInput"), None),
        )]);
        let out = render_client(&service(Some("Microsoft.EventHub")), &pkg).unwrap();
        assert!(out.contains("pub async fn create("));
        assert!(out.contains("-> Result<Poller, Error>"));
        assert!(out.contains("put_json_then_poll"));
        assert!(out.contains("use super::models::{CreateInput};"));
    }

    #[test]
    fn get_returns_the_decoded_body_with_the_transport_response() {
        let pkg = package(vec![(
            "Get",
            operation("GET", false, None, Some("GetNamespace")),
        )]);
        let out = render_client(&service(Some("Microsoft.EventHub")), &pkg).unwrap();
        assert!(out.contains("-> Result<JsonResponse<GetNamespace>, Error>"));
        assert!(out.contains("get_json"));
    }

    #[test]
    fn long_running_delete_status_codes_are_documented() {
        let mut op = operation("DELETE", true, None, None);
        op.expected_status_codes = vec![200, 202, 418];
        let pkg = package(vec![("Delete", op)]);
        let out = render_client(&service(Some("Microsoft.EventHub")), &pkg).unwrap();
        assert!(out.contains("200, // deletion started"));
        assert!(out.contains("202, // deletion accepted"));
        assert!(out.contains("418, // undocumented"));
    }

    #[test]
    fn resource_manager_clients_report_their_provider() {
        let pkg = package(vec![(
            "Get",
            operation("GET", false, None, Some("GetNamespace")),
        )]);
        let out = render_client(&service(Some("Microsoft.EventHub")), &pkg).unwrap();
        assert!(out.contains("resource_provider: Some(\"Microsoft.EventHub\".to_string())"));
    }

    #[test]
    fn data_plane_clients_report_empty_metadata() {
        let pkg = package(vec![(
            "Get",
            operation("GET", false, None, Some("GetKeys")),
        )]);
        let out = render_client(&service(None), &pkg).unwrap();
        assert!(out.contains("ClientMetaData::default()"));
        assert!(!out.contains("resource_provider: Some"));
    }

    #[test]
    fn methods_are_sorted_by_operation_name() {
        let pkg = package(vec![
            ("Update", operation("PATCH", false, Some("PatchInput"), None)),
            ("Get", operation("GET", false, None, Some("GetNamespace"))),
        ]);
        let out = render_client(&service(Some("Microsoft.EventHub")), &pkg).unwrap();
        let get = out.find("pub async fn get(").unwrap();
        let update = out.find("pub async fn update(").unwrap();
        assert!(get < update);
    }
}

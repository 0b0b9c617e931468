//! Mapping from a (resource, operation) pair to a GraphQL request, and interpretation
//! of the response for each operation shape.

pub mod connector;
pub mod device;
pub mod group;
pub mod params;
pub mod queries;
pub mod remote_network;
pub mod resource;
pub mod security_policy;
pub mod service_account;
pub mod user;

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::client::{GraphQLClient, RequestContext, Variables};
use crate::constants::DEFAULT_LIMIT;
use crate::error::{TwingateError, TwingateResult};
use crate::twingate_error;

pub use params::{parse_port_ranges, split_ids, Params, PortRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Connector,
    Device,
    Group,
    RemoteNetwork,
    Resource,
    SecurityPolicy,
    ServiceAccount,
    User,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Connector,
        ResourceKind::Device,
        ResourceKind::Group,
        ResourceKind::RemoteNetwork,
        ResourceKind::Resource,
        ResourceKind::SecurityPolicy,
        ResourceKind::ServiceAccount,
        ResourceKind::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Connector => "connector",
            ResourceKind::Device => "device",
            ResourceKind::Group => "group",
            ResourceKind::RemoteNetwork => "remoteNetwork",
            ResourceKind::Resource => "resource",
            ResourceKind::SecurityPolicy => "securityPolicy",
            ResourceKind::ServiceAccount => "serviceAccount",
            ResourceKind::User => "user",
        }
    }

    /// Command-line spelling, e.g. `remote-network`.
    pub fn cli_name(&self) -> &'static str {
        match self {
            ResourceKind::RemoteNetwork => "remote-network",
            ResourceKind::SecurityPolicy => "security-policy",
            ResourceKind::ServiceAccount => "service-account",
            other => other.as_str(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Connector => "Connector",
            ResourceKind::Device => "Device",
            ResourceKind::Group => "Group",
            ResourceKind::RemoteNetwork => "Remote Network",
            ResourceKind::Resource => "Resource",
            ResourceKind::SecurityPolicy => "Security Policy",
            ResourceKind::ServiceAccount => "Service Account",
            ResourceKind::User => "User",
        }
    }

    /// Name of the parameter holding the entity ID for single-entity operations.
    pub fn id_param(&self) -> &'static str {
        match self {
            ResourceKind::Connector => "connectorId",
            ResourceKind::Device => "deviceId",
            ResourceKind::Group => "groupId",
            ResourceKind::RemoteNetwork => "remoteNetworkId",
            ResourceKind::Resource => "resourceId",
            ResourceKind::SecurityPolicy => "securityPolicyId",
            ResourceKind::ServiceAccount => "serviceAccountId",
            ResourceKind::User => "userId",
        }
    }

    pub fn operations(&self) -> &'static [Operation] {
        use Operation::*;
        match self {
            ResourceKind::RemoteNetwork | ResourceKind::Resource | ResourceKind::Group => {
                &[Create, Delete, Get, GetAll, Update]
            }
            ResourceKind::Connector => &[Create, Delete, GenerateTokens, Get, GetAll, Update],
            ResourceKind::User => &[Delete, Get, GetAll, Update],
            ResourceKind::Device => &[Get, GetAll, UpdateTrust],
            ResourceKind::ServiceAccount => {
                &[Create, CreateKey, Delete, Get, GetAll, RevokeKey, Update]
            }
            ResourceKind::SecurityPolicy => &[Get, GetAll],
        }
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.operations().contains(&operation)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = TwingateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        ResourceKind::ALL
            .into_iter()
            .find(|kind| normalize(kind.as_str()) == wanted)
            .ok_or_else(|| twingate_error!(InvalidInput, "unknown resource '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    CreateKey,
    Delete,
    GenerateTokens,
    Get,
    GetAll,
    RevokeKey,
    Update,
    UpdateTrust,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::Create,
        Operation::CreateKey,
        Operation::Delete,
        Operation::GenerateTokens,
        Operation::Get,
        Operation::GetAll,
        Operation::RevokeKey,
        Operation::Update,
        Operation::UpdateTrust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::CreateKey => "createKey",
            Operation::Delete => "delete",
            Operation::GenerateTokens => "generateTokens",
            Operation::Get => "get",
            Operation::GetAll => "getAll",
            Operation::RevokeKey => "revokeKey",
            Operation::Update => "update",
            Operation::UpdateTrust => "updateTrust",
        }
    }

    pub fn cli_name(&self) -> &'static str {
        match self {
            Operation::CreateKey => "create-key",
            Operation::GenerateTokens => "generate-tokens",
            Operation::GetAll => "get-all",
            Operation::RevokeKey => "revoke-key",
            Operation::UpdateTrust => "update-trust",
            other => other.as_str(),
        }
    }

    pub fn about(&self) -> &'static str {
        match self {
            Operation::Create => "Create a new entity",
            Operation::CreateKey => "Create a service key",
            Operation::Delete => "Delete an entity",
            Operation::GenerateTokens => "Generate access and refresh tokens",
            Operation::Get => "Get one entity by ID",
            Operation::GetAll => "Get many entities",
            Operation::RevokeKey => "Revoke a service key",
            Operation::Update => "Update an entity",
            Operation::UpdateTrust => "Mark a device trusted or untrusted",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = TwingateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Operation::ALL
            .into_iter()
            .find(|op| normalize(op.as_str()) == wanted)
            .ok_or_else(|| twingate_error!(InvalidInput, "unknown operation '{}'", s))
    }
}

// camelCase, kebab-case and snake_case spellings compare equal
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// How many nodes a list request should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFetch {
    All,
    Limit(u32),
}

/// What a successful mutation hands back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutput {
    /// The payload's `entity` object.
    Entity,
    /// A named field of the payload, e.g. `connectorTokens`.
    Field(&'static str),
    /// `{"success": true}`.
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Object { root: &'static str },
    List { root: &'static str, fetch: ListFetch },
    Mutation { root: &'static str, output: MutationOutput },
}

/// Fully assembled request for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    pub query: &'static str,
    pub variables: Variables,
    pub shape: ResponseShape,
}

impl OperationRequest {
    pub fn new(query: &'static str, variables: Variables, shape: ResponseShape) -> Self {
        Self {
            query,
            variables,
            shape,
        }
    }
}

pub fn build_request(
    resource: ResourceKind,
    operation: Operation,
    params: &Params,
) -> TwingateResult<OperationRequest> {
    if !resource.supports(operation) {
        return Err(unsupported(resource, operation));
    }

    match resource {
        ResourceKind::Connector => connector::build(operation, params),
        ResourceKind::Device => device::build(operation, params),
        ResourceKind::Group => group::build(operation, params),
        ResourceKind::RemoteNetwork => remote_network::build(operation, params),
        ResourceKind::Resource => resource::build(operation, params),
        ResourceKind::SecurityPolicy => security_policy::build(operation, params),
        ResourceKind::ServiceAccount => service_account::build(operation, params),
        ResourceKind::User => user::build(operation, params),
    }
}

/// Build and execute one operation, returning the output objects it produces.
pub async fn run_operation(
    client: &GraphQLClient,
    resource: ResourceKind,
    operation: Operation,
    params: &Params,
    ctx: RequestContext<'_>,
) -> TwingateResult<Vec<Map<String, Value>>> {
    let request = build_request(resource, operation, params)?;
    debug!(%resource, %operation, item_index = ctx.item_index, "running operation");
    execute_request(client, &request, ctx).await
}

pub async fn execute_request(
    client: &GraphQLClient,
    request: &OperationRequest,
    ctx: RequestContext<'_>,
) -> TwingateResult<Vec<Map<String, Value>>> {
    match request.shape {
        ResponseShape::Object { root } => {
            let mut data = client.execute(request.query, &request.variables, ctx).await?;
            match data.remove(root) {
                Some(Value::Object(entity)) => Ok(vec![entity]),
                None | Some(Value::Null) => Ok(Vec::new()),
                Some(other) => Err(TwingateError::malformed(
                    format!("'{}' should be an object, got {}", root, other),
                    ctx.item_index,
                )),
            }
        }
        ResponseShape::List { root, fetch: ListFetch::All } => {
            client.fetch_all(request.query, root, &request.variables, ctx).await
        }
        ResponseShape::List { root, fetch: ListFetch::Limit(limit) } => {
            client
                .fetch_first(request.query, root, limit, &request.variables, ctx)
                .await
        }
        ResponseShape::Mutation { root, output } => {
            let mut data = client.execute(request.query, &request.variables, ctx).await?;
            let payload = match data.remove(root) {
                Some(Value::Object(payload)) => payload,
                _ => {
                    return Err(TwingateError::malformed(
                        format!("mutation result '{}' is missing", root),
                        ctx.item_index,
                    ))
                }
            };
            interpret_mutation(root, payload, output, ctx.item_index)
        }
    }
}

fn interpret_mutation(
    root: &str,
    mut payload: Map<String, Value>,
    output: MutationOutput,
    item_index: usize,
) -> TwingateResult<Vec<Map<String, Value>>> {
    let ok = payload.get("ok").and_then(Value::as_bool).unwrap_or(false);
    if !ok {
        let message = payload
            .get("error")
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} reported failure", root));
        return Err(TwingateError::BusinessRule {
            message,
            item_index,
        });
    }

    let field = match output {
        MutationOutput::Success => {
            let mut success = Map::new();
            success.insert("success".to_string(), json!(true));
            return Ok(vec![success]);
        }
        MutationOutput::Entity => "entity",
        MutationOutput::Field(name) => name,
    };

    match payload.remove(field) {
        Some(Value::Object(entity)) => Ok(vec![entity]),
        _ => Err(TwingateError::malformed(
            format!("'{}' succeeded without returning '{}'", root, field),
            item_index,
        )),
    }
}

fn unsupported(resource: ResourceKind, operation: Operation) -> TwingateError {
    TwingateError::UnsupportedOperation {
        resource: resource.to_string(),
        operation: operation.to_string(),
    }
}

// Builders shared by the per-resource modules

pub(crate) fn get_request(
    query: &'static str,
    root: &'static str,
    resource: ResourceKind,
    params: &Params,
) -> TwingateResult<OperationRequest> {
    let mut variables = Variables::new();
    variables.insert("id".to_string(), json!(params.required_str(resource.id_param())?));
    Ok(OperationRequest::new(query, variables, ResponseShape::Object { root }))
}

/// `returnAll` pages through everything; otherwise a single page of `limit` nodes.
pub(crate) fn list_request(
    query: &'static str,
    root: &'static str,
    params: &Params,
) -> TwingateResult<OperationRequest> {
    let fetch = if params.optional_bool("returnAll")?.unwrap_or(false) {
        ListFetch::All
    } else {
        let limit = params.optional_u32("limit")?.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            return Err(twingate_error!(InvalidInput, "parameter 'limit' must be at least 1"));
        }
        ListFetch::Limit(limit)
    };

    Ok(OperationRequest::new(query, Variables::new(), ResponseShape::List { root, fetch }))
}

pub(crate) fn delete_request(
    query: &'static str,
    root: &'static str,
    id_param: &str,
    params: &Params,
) -> TwingateResult<OperationRequest> {
    let mut variables = Variables::new();
    variables.insert("id".to_string(), json!(params.required_str(id_param)?));
    Ok(OperationRequest::new(
        query,
        variables,
        ResponseShape::Mutation {
            root,
            output: MutationOutput::Success,
        },
    ))
}

pub(crate) fn entity_mutation(
    query: &'static str,
    root: &'static str,
    variables: Variables,
) -> OperationRequest {
    OperationRequest::new(
        query,
        variables,
        ResponseShape::Mutation {
            root,
            output: MutationOutput::Entity,
        },
    )
}

pub(crate) fn insert_str(variables: &mut Variables, params: &Params, name: &str) -> TwingateResult<()> {
    if let Some(value) = params.optional_str(name)? {
        variables.insert(name.to_string(), json!(value));
    }
    Ok(())
}

pub(crate) fn insert_bool(variables: &mut Variables, params: &Params, name: &str) -> TwingateResult<()> {
    if let Some(value) = params.optional_bool(name)? {
        variables.insert(name.to_string(), json!(value));
    }
    Ok(())
}

pub(crate) fn insert_ids(variables: &mut Variables, params: &Params, name: &str) -> TwingateResult<()> {
    if let Some(ids) = params.id_list(name)? {
        variables.insert(name.to_string(), json!(ids));
    }
    Ok(())
}

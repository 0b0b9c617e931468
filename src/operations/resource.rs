use serde_json::{json, Map, Value};

use super::params::parse_port_ranges;
use super::queries::*;
use super::{
    delete_request, entity_mutation, get_request, insert_bool, insert_ids, insert_str, list_request,
    unsupported, Operation, OperationRequest, Params, ResourceKind,
};
use crate::client::Variables;
use crate::error::TwingateResult;

const KIND: ResourceKind = ResourceKind::Resource;

pub fn build(operation: Operation, params: &Params) -> TwingateResult<OperationRequest> {
    match operation {
        Operation::Create => {
            let additional = params.collection("additionalFields")?;
            let mut variables = Variables::new();
            variables.insert("name".to_string(), json!(params.required_str("name")?));
            variables.insert("address".to_string(), json!(params.required_str("address")?));
            variables.insert(
                "remoteNetworkId".to_string(),
                json!(params.required_str("remoteNetworkId")?),
            );
            insert_bool(&mut variables, &additional, "isActive")?;
            insert_ids(&mut variables, &additional, "groupIds")?;
            insert_ids(&mut variables, &additional, "serviceAccountIds")?;
            if let Some(protocols) = protocols(&additional)? {
                variables.insert("protocols".to_string(), protocols);
            }
            Ok(entity_mutation(CREATE_RESOURCE, "resourceCreate", variables))
        }
        Operation::Get => get_request(GET_RESOURCE, "resource", KIND, params),
        Operation::GetAll => list_request(GET_RESOURCES, "resources", params),
        Operation::Update => {
            let fields = params.collection("updateFields")?;
            let mut variables = Variables::new();
            variables.insert("id".to_string(), json!(params.required_str(KIND.id_param())?));
            insert_str(&mut variables, &fields, "name")?;
            insert_str(&mut variables, &fields, "address")?;
            insert_str(&mut variables, &fields, "remoteNetworkId")?;
            insert_bool(&mut variables, &fields, "isActive")?;
            insert_ids(&mut variables, &fields, "groupIds")?;
            insert_ids(&mut variables, &fields, "serviceAccountIds")?;
            Ok(entity_mutation(UPDATE_RESOURCE, "resourceUpdate", variables))
        }
        Operation::Delete => delete_request(DELETE_RESOURCE, "resourceDelete", KIND.id_param(), params),
        other => Err(unsupported(KIND, other)),
    }
}

/// `ProtocolsInput` from the flat `allowIcmp`/`tcpPolicy`/`tcpPorts`/`udpPolicy`/`udpPorts`
/// fields. `None` when none of them is set.
fn protocols(fields: &Params) -> TwingateResult<Option<Value>> {
    let mut protocols = Map::new();

    if let Some(allow_icmp) = fields.optional_bool("allowIcmp")? {
        protocols.insert("allowIcmp".to_string(), json!(allow_icmp));
    }
    if let Some(tcp) = protocol_rule(fields, "tcpPolicy", "tcpPorts")? {
        protocols.insert("tcp".to_string(), tcp);
    }
    if let Some(udp) = protocol_rule(fields, "udpPolicy", "udpPorts")? {
        protocols.insert("udp".to_string(), udp);
    }

    Ok(if protocols.is_empty() {
        None
    } else {
        Some(Value::Object(protocols))
    })
}

// Ports only apply to the RESTRICTED policy
fn protocol_rule(fields: &Params, policy_param: &str, ports_param: &str) -> TwingateResult<Option<Value>> {
    let Some(policy) = fields.optional_str(policy_param)? else {
        return Ok(None);
    };

    let mut rule = Map::new();
    rule.insert("policy".to_string(), json!(policy));
    if policy == "RESTRICTED" {
        if let Some(ports) = fields.optional_str(ports_param)? {
            rule.insert("ports".to_string(), json!(parse_port_ranges(&ports)?));
        }
    }
    Ok(Some(Value::Object(rule)))
}

use serde_json::json;

use super::queries::*;
use super::{
    delete_request, entity_mutation, get_request, insert_bool, list_request, unsupported, Operation,
    OperationRequest, Params, ResourceKind,
};
use crate::client::Variables;
use crate::error::TwingateResult;

const KIND: ResourceKind = ResourceKind::RemoteNetwork;

pub fn build(operation: Operation, params: &Params) -> TwingateResult<OperationRequest> {
    match operation {
        Operation::Create => {
            let additional = params.collection("additionalFields")?;
            let mut variables = Variables::new();
            variables.insert("name".to_string(), json!(params.required_str("name")?));
            insert_bool(&mut variables, &additional, "isActive")?;
            Ok(entity_mutation(CREATE_REMOTE_NETWORK, "remoteNetworkCreate", variables))
        }
        Operation::Get => get_request(GET_REMOTE_NETWORK, "remoteNetwork", KIND, params),
        Operation::GetAll => list_request(GET_REMOTE_NETWORKS, "remoteNetworks", params),
        Operation::Update => {
            // update fields are forwarded as given
            let mut variables = params.collection("updateFields")?.into_variables();
            variables.insert("id".to_string(), json!(params.required_str(KIND.id_param())?));
            Ok(entity_mutation(UPDATE_REMOTE_NETWORK, "remoteNetworkUpdate", variables))
        }
        Operation::Delete => delete_request(DELETE_REMOTE_NETWORK, "remoteNetworkDelete", KIND.id_param(), params),
        other => Err(unsupported(KIND, other)),
    }
}

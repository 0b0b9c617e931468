use serde_json::json;

use super::queries::*;
use super::{entity_mutation, get_request, list_request, unsupported, Operation, OperationRequest, Params, ResourceKind};
use crate::client::Variables;
use crate::error::TwingateResult;

const KIND: ResourceKind = ResourceKind::Device;

pub fn build(operation: Operation, params: &Params) -> TwingateResult<OperationRequest> {
    match operation {
        Operation::Get => get_request(GET_DEVICE, "device", KIND, params),
        Operation::GetAll => list_request(GET_DEVICES, "devices", params),
        Operation::UpdateTrust => {
            let mut variables = Variables::new();
            variables.insert("id".to_string(), json!(params.required_str(KIND.id_param())?));
            variables.insert("isTrusted".to_string(), json!(params.required_bool("isTrusted")?));
            Ok(entity_mutation(UPDATE_DEVICE_TRUST, "deviceUpdate", variables))
        }
        other => Err(unsupported(KIND, other)),
    }
}

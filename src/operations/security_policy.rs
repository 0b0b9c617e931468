use super::queries::{GET_SECURITY_POLICIES, GET_SECURITY_POLICY};
use super::{get_request, list_request, unsupported, Operation, OperationRequest, Params, ResourceKind};
use crate::error::TwingateResult;

const KIND: ResourceKind = ResourceKind::SecurityPolicy;

pub fn build(operation: Operation, params: &Params) -> TwingateResult<OperationRequest> {
    match operation {
        Operation::Get => get_request(GET_SECURITY_POLICY, "securityPolicy", KIND, params),
        Operation::GetAll => list_request(GET_SECURITY_POLICIES, "securityPolicies", params),
        other => Err(unsupported(KIND, other)),
    }
}

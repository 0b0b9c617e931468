use serde_json::json;

use super::queries::*;
use super::{
    delete_request, entity_mutation, get_request, insert_bool, insert_ids, insert_str, list_request,
    unsupported, Operation, OperationRequest, Params, ResourceKind,
};
use crate::client::Variables;
use crate::error::TwingateResult;

const KIND: ResourceKind = ResourceKind::Group;

pub fn build(operation: Operation, params: &Params) -> TwingateResult<OperationRequest> {
    match operation {
        Operation::Create => {
            let additional = params.collection("additionalFields")?;
            let mut variables = Variables::new();
            variables.insert("name".to_string(), json!(params.required_str("name")?));
            insert_ids(&mut variables, &additional, "userIds")?;
            insert_ids(&mut variables, &additional, "resourceIds")?;
            Ok(entity_mutation(CREATE_GROUP, "groupCreate", variables))
        }
        Operation::Get => get_request(GET_GROUP, "group", KIND, params),
        Operation::GetAll => list_request(GET_GROUPS, "groups", params),
        Operation::Update => {
            let fields = params.collection("updateFields")?;
            let mut variables = Variables::new();
            variables.insert("id".to_string(), json!(params.required_str(KIND.id_param())?));
            insert_str(&mut variables, &fields, "name")?;
            insert_bool(&mut variables, &fields, "isActive")?;
            for list in ["addedUserIds", "removedUserIds", "addedResourceIds", "removedResourceIds"] {
                insert_ids(&mut variables, &fields, list)?;
            }
            Ok(entity_mutation(UPDATE_GROUP, "groupUpdate", variables))
        }
        Operation::Delete => delete_request(DELETE_GROUP, "groupDelete", KIND.id_param(), params),
        other => Err(unsupported(KIND, other)),
    }
}

use serde_json::json;

use super::queries::*;
use super::{
    delete_request, entity_mutation, get_request, insert_ids, insert_str, list_request, unsupported,
    Operation, OperationRequest, Params, ResourceKind,
};
use crate::client::Variables;
use crate::error::TwingateResult;

const KIND: ResourceKind = ResourceKind::ServiceAccount;

pub fn build(operation: Operation, params: &Params) -> TwingateResult<OperationRequest> {
    match operation {
        Operation::Create => {
            let additional = params.collection("additionalFields")?;
            let mut variables = Variables::new();
            variables.insert("name".to_string(), json!(params.required_str("name")?));
            insert_ids(&mut variables, &additional, "resourceIds")?;
            Ok(entity_mutation(CREATE_SERVICE_ACCOUNT, "serviceAccountCreate", variables))
        }
        Operation::Get => get_request(GET_SERVICE_ACCOUNT, "serviceAccount", KIND, params),
        Operation::GetAll => list_request(GET_SERVICE_ACCOUNTS, "serviceAccounts", params),
        Operation::Update => {
            let fields = params.collection("updateFields")?;
            let mut variables = Variables::new();
            variables.insert("id".to_string(), json!(params.required_str(KIND.id_param())?));
            insert_str(&mut variables, &fields, "name")?;
            insert_ids(&mut variables, &fields, "addedResourceIds")?;
            insert_ids(&mut variables, &fields, "removedResourceIds")?;
            Ok(entity_mutation(UPDATE_SERVICE_ACCOUNT, "serviceAccountUpdate", variables))
        }
        Operation::Delete => {
            delete_request(DELETE_SERVICE_ACCOUNT, "serviceAccountDelete", KIND.id_param(), params)
        }
        Operation::CreateKey => {
            let key_fields = params.collection("keyAdditionalFields")?;
            let mut variables = Variables::new();
            variables.insert(
                "serviceAccountId".to_string(),
                json!(params.required_str(KIND.id_param())?),
            );
            variables.insert("name".to_string(), json!(params.required_str("keyName")?));
            // days until expiry; 0 or absent leaves the server default
            if let Some(days) = key_fields.optional_u32("expirationTime")?.filter(|d| *d > 0) {
                variables.insert("expirationTime".to_string(), json!(days));
            }
            Ok(entity_mutation(CREATE_SERVICE_KEY, "serviceAccountKeyCreate", variables))
        }
        Operation::RevokeKey => {
            delete_request(REVOKE_SERVICE_KEY, "serviceAccountKeyRevoke", "serviceKeyId", params)
        }
        other => Err(unsupported(KIND, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{MutationOutput, ResponseShape};

    #[test]
    fn create_key_with_expiry() {
        let params = Params::new()
            .with("serviceAccountId", "sa_1")
            .with("keyName", "ci")
            .with("keyAdditionalFields", json!({ "expirationTime": 30 }));
        let request = build(Operation::CreateKey, &params).unwrap();
        assert_eq!(
            json!(request.variables),
            json!({ "serviceAccountId": "sa_1", "name": "ci", "expirationTime": 30 })
        );
    }

    #[test]
    fn create_key_without_expiry() {
        let params = Params::new().with("serviceAccountId", "sa_1").with("keyName", "ci");
        let request = build(Operation::CreateKey, &params).unwrap();
        assert!(request.variables.get("expirationTime").is_none());
    }

    #[test]
    fn revoke_key_uses_service_key_id() {
        let params = Params::new().with("serviceKeyId", "key_9");
        let request = build(Operation::RevokeKey, &params).unwrap();
        assert_eq!(json!(request.variables), json!({ "id": "key_9" }));
        assert_eq!(
            request.shape,
            ResponseShape::Mutation {
                root: "serviceAccountKeyRevoke",
                output: MutationOutput::Success
            }
        );
    }
}

use serde_json::json;

use super::queries::*;
use super::{
    delete_request, entity_mutation, get_request, insert_bool, insert_str, list_request, unsupported,
    MutationOutput, Operation, OperationRequest, Params, ResourceKind, ResponseShape,
};
use crate::client::Variables;
use crate::error::TwingateResult;

const KIND: ResourceKind = ResourceKind::Connector;

pub fn build(operation: Operation, params: &Params) -> TwingateResult<OperationRequest> {
    match operation {
        Operation::Create => {
            let additional = params.collection("additionalFields")?;
            let mut variables = Variables::new();
            variables.insert(
                "remoteNetworkId".to_string(),
                json!(params.required_str("remoteNetworkId")?),
            );
            insert_str(&mut variables, &additional, "name")?;
            insert_bool(&mut variables, &additional, "hasStatusNotificationsEnabled")?;
            Ok(entity_mutation(CREATE_CONNECTOR, "connectorCreate", variables))
        }
        Operation::Get => get_request(GET_CONNECTOR, "connector", KIND, params),
        Operation::GetAll => list_request(GET_CONNECTORS, "connectors", params),
        Operation::Update => {
            let mut variables = params.collection("updateFields")?.into_variables();
            variables.insert("id".to_string(), json!(params.required_str(KIND.id_param())?));
            Ok(entity_mutation(UPDATE_CONNECTOR, "connectorUpdate", variables))
        }
        Operation::Delete => delete_request(DELETE_CONNECTOR, "connectorDelete", KIND.id_param(), params),
        Operation::GenerateTokens => {
            let mut variables = Variables::new();
            variables.insert(
                "connectorId".to_string(),
                json!(params.required_str(KIND.id_param())?),
            );
            Ok(OperationRequest::new(
                GENERATE_CONNECTOR_TOKENS,
                variables,
                ResponseShape::Mutation {
                    root: "connectorGenerateTokens",
                    output: MutationOutput::Field("connectorTokens"),
                },
            ))
        }
        other => Err(unsupported(KIND, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_with_optional_name() {
        let params = Params::new()
            .with("remoteNetworkId", "rn_1")
            .with("additionalFields", json!({ "name": "edge-1", "hasStatusNotificationsEnabled": "true" }));
        let request = build(Operation::Create, &params).unwrap();
        assert_eq!(
            json!(request.variables),
            json!({ "remoteNetworkId": "rn_1", "name": "edge-1", "hasStatusNotificationsEnabled": true })
        );
    }

    #[test]
    fn generate_tokens_reads_connector_tokens() {
        let params = Params::new().with("connectorId", "c_1");
        let request = build(Operation::GenerateTokens, &params).unwrap();
        assert_eq!(json!(request.variables), json!({ "connectorId": "c_1" }));
        assert_eq!(
            request.shape,
            ResponseShape::Mutation {
                root: "connectorGenerateTokens",
                output: MutationOutput::Field("connectorTokens")
            }
        );
    }
}

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::client::{Credentials, GraphQLClient, RequestContext};
use crate::error::{TwingateError, TwingateResult};
use crate::operations::{run_operation, Operation, Params, ResourceKind};

/// One output object, tagged with the index of the input item that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutput {
    pub json: Map<String, Value>,
    pub paired_item: usize,
}

impl ItemOutput {
    pub fn new(json: Map<String, Value>, paired_item: usize) -> Self {
        Self { json, paired_item }
    }

    fn failure(error: &TwingateError, paired_item: usize) -> Self {
        let mut json = Map::new();
        json.insert("error".to_string(), json!(error.to_string()));
        Self { json, paired_item }
    }

    pub fn is_error(&self) -> bool {
        self.json.len() == 1 && self.json.contains_key("error")
    }
}

/// Run one operation for every item, in order.
///
/// With `continue_on_fail` a failing item yields `{"error": message}` and the batch moves
/// on; otherwise the first failure aborts the batch, tagged with the item's index.
pub async fn run_batch(
    client: &GraphQLClient,
    credentials: &Credentials,
    resource: ResourceKind,
    operation: Operation,
    items: &[Params],
    continue_on_fail: bool,
) -> TwingateResult<Vec<ItemOutput>> {
    if !resource.supports(operation) {
        return Err(TwingateError::UnsupportedOperation {
            resource: resource.to_string(),
            operation: operation.to_string(),
        });
    }

    let mut outputs = Vec::new();

    for (index, params) in items.iter().enumerate() {
        let ctx = RequestContext::for_item(credentials, index);
        match run_operation(client, resource, operation, params, ctx).await {
            Ok(objects) => {
                debug!(index, count = objects.len(), "item completed");
                outputs.extend(objects.into_iter().map(|json| ItemOutput::new(json, index)));
            }
            Err(err) if continue_on_fail => {
                warn!(index, error = %err, "item failed, continuing");
                outputs.push(ItemOutput::failure(&err, index));
            }
            Err(err) => return Err(err.at_item(index)),
        }
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn creds() -> Credentials {
        Credentials::new("acme", "tg-test-key-0001").unwrap()
    }

    async fn client_for(server: &MockServer) -> GraphQLClient {
        GraphQLClient::new()
            .unwrap()
            .with_endpoint(format!("{}/api/graphql/", server.uri()))
    }

    #[tokio::test]
    async fn outputs_are_paired_with_their_item() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "variables": { "id": "g_1" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "group": { "id": "g_1", "name": "Eng" } }
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "variables": { "id": "g_2" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "group": { "id": "g_2", "name": "Ops" } }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let items = vec![
            Params::new().with("groupId", "g_1"),
            Params::new().with("groupId", "g_2"),
        ];
        let outputs = run_batch(&client, &creds(), ResourceKind::Group, Operation::Get, &items, false)
            .await
            .unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].paired_item, 0);
        assert_eq!(outputs[0].json["name"], json!("Eng"));
        assert_eq!(outputs[1].paired_item, 1);
        assert_eq!(outputs[1].json["name"], json!("Ops"));
    }

    #[tokio::test]
    async fn continue_on_fail_records_error_and_keeps_going() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "remoteNetworkDelete": { "ok": true, "error": null } }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        // second item has no id and fails before any request
        let items = vec![
            Params::new().with("remoteNetworkId", "rn_1"),
            Params::new(),
            Params::new().with("remoteNetworkId", "rn_3"),
        ];
        let outputs = run_batch(
            &client,
            &creds(),
            ResourceKind::RemoteNetwork,
            Operation::Delete,
            &items,
            true,
        )
        .await
        .unwrap();

        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[0].json, json!({ "success": true }).as_object().unwrap().clone());
        assert!(outputs[1].is_error());
        assert_eq!(outputs[1].paired_item, 1);
        assert!(outputs[1].json["error"].as_str().unwrap().contains("remoteNetworkId"));
        assert_eq!(outputs[2].paired_item, 2);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn first_failure_aborts_without_continue() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "not authorized" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let items = vec![
            Params::new().with("userId", "u_1"),
            Params::new().with("userId", "u_2"),
        ];
        let err = run_batch(&client, &creds(), ResourceKind::User, Operation::Get, &items, false)
            .await
            .unwrap_err();

        assert_eq!(err.item_index(), Some(0));
        assert!(matches!(err, TwingateError::GraphQLApi { ref message, .. } if message == "not authorized"));
    }

    #[tokio::test]
    async fn input_errors_are_tagged_with_index() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;
        let items = vec![Params::new().with("name", "")];

        let err = run_batch(&client, &creds(), ResourceKind::Group, Operation::Create, &items, false)
            .await
            .unwrap_err();

        assert_eq!(err.item_index(), Some(0));
        assert!(matches!(err, TwingateError::Item { .. }));
    }

    #[tokio::test]
    async fn unsupported_pair_fails_before_any_item() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        let err = run_batch(
            &client,
            &creds(),
            ResourceKind::SecurityPolicy,
            Operation::Delete,
            &[Params::new()],
            true,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, TwingateError::UnsupportedOperation { .. }));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn serializes_paired_item_in_camel_case() {
        let output = ItemOutput::new(Map::new(), 3);
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({ "json": {}, "pairedItem": 3 })
        );
    }
}

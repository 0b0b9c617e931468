use serde_json::{json, Value};
use twingate_cli::{
    Credentials, GraphQLClient, PageLimit, RequestContext, TransportError, TwingateError, Variables,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_NETWORKS: &str = "query($first: Int, $after: String) { remoteNetworks(first: $first, after: $after) { edges { node { id } } pageInfo { hasNextPage endCursor } } }";

fn credentials() -> Credentials {
    Credentials::new("acme", "tg-integration-key").unwrap()
}

async fn client(server: &MockServer) -> GraphQLClient {
    GraphQLClient::new()
        .unwrap()
        .with_endpoint(format!("{}/api/graphql/", server.uri()))
}

#[tokio::test]
async fn data_is_returned_unchanged_and_paged_nodes_flattened() {
    let server = MockServer::start().await;
    let data = json!({
        "remoteNetworks": {
            "edges": [{ "node": { "id": "rn_1" } }],
            "pageInfo": { "hasNextPage": false, "endCursor": null }
        }
    });
    Mock::given(method("POST"))
        .and(path("/api/graphql/"))
        .and(header("X-API-KEY", "tg-integration-key"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let creds = credentials();
    let ctx = RequestContext::new(&creds);

    let result = client.execute(LIST_NETWORKS, &Variables::new(), ctx).await.unwrap();
    assert_eq!(Value::Object(result), data);

    let nodes = client
        .fetch_all(LIST_NETWORKS, "remoteNetworks", &Variables::new(), ctx)
        .await
        .unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].get("id"), Some(&json!("rn_1")));
}

#[tokio::test]
async fn api_errors_keep_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "not authorized" }]
        })))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let creds = credentials();
    let err = client
        .execute(LIST_NETWORKS, &Variables::new(), RequestContext::for_item(&creds, 5))
        .await
        .unwrap_err();

    match err {
        TwingateError::GraphQLApi {
            message,
            envelope,
            item_index,
        } => {
            assert_eq!(message, "not authorized");
            assert_eq!(item_index, 5);
            assert_eq!(envelope["errors"][0]["message"], json!("not authorized"));
        }
        other => panic!("Expected GraphQLApi, got {:?}", other),
    }
}

#[tokio::test]
async fn html_error_page_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let creds = credentials();
    let err = client
        .execute(LIST_NETWORKS, &Variables::new(), RequestContext::new(&creds))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TwingateError::Transport {
            source: TransportError::Status { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn runaway_pagination_stops_at_the_cap() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "remoteNetworks": {
                    "edges": [{ "node": { "id": "rn_loop" } }],
                    "pageInfo": { "hasNextPage": true, "endCursor": "same" }
                }
            }
        })))
        .expect(4)
        .mount(&server)
        .await;

    let client = client(&server).await.with_page_limit(Some(PageLimit::new(4)));
    let creds = credentials();
    let err = client
        .fetch_all(LIST_NETWORKS, "remoteNetworks", &Variables::new(), RequestContext::new(&creds))
        .await
        .unwrap_err();

    match err {
        TwingateError::PageLimitExceeded { root_key, max_pages, .. } => {
            assert_eq!(root_key, "remoteNetworks");
            assert_eq!(max_pages, 4);
        }
        other => panic!("Expected PageLimitExceeded, got {:?}", other),
    }
}

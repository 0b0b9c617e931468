use serde_json::json;

use crate::error::{ErrorContext, TransportError, TwingateError};
use crate::twingate_error;

#[test]
fn test_error_context_on_result() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "file not found",
    ));

    match result.context("Failed to read input file") {
        Err(TwingateError::Unknown(msg)) => {
            assert!(msg.contains("Failed to read input file"));
            assert!(msg.contains("file not found"));
        }
        _ => panic!("Expected TwingateError::Unknown"),
    }
}

#[test]
fn test_error_context_on_option() {
    let option: Option<String> = None;
    match option.with_context(|| format!("no value for {}", "subdomain")) {
        Err(TwingateError::Unknown(msg)) => assert_eq!(msg, "no value for subdomain"),
        _ => panic!("Expected TwingateError::Unknown"),
    }
}

#[test]
fn test_twingate_error_macro() {
    let error = twingate_error!(ConfigError, "bad timeout");
    match error {
        TwingateError::ConfigError(msg) => assert_eq!(msg, "bad timeout"),
        _ => panic!("Expected TwingateError::ConfigError"),
    }

    let error = twingate_error!(InvalidInput, "port '{}' is out of range", 70000);
    match error {
        TwingateError::InvalidInput(msg) => assert_eq!(msg, "port '70000' is out of range"),
        _ => panic!("Expected TwingateError::InvalidInput"),
    }
}

#[test]
fn test_item_index_is_kept_once_set() {
    let err = TwingateError::BusinessRule {
        message: "Name already taken".to_string(),
        item_index: 2,
    };
    let err = err.at_item(7);
    assert_eq!(err.item_index(), Some(2));
    assert_eq!(err.to_string(), "Name already taken");
}

#[test]
fn test_item_index_wraps_untagged_errors() {
    let err = TwingateError::InvalidInput("parameter 'name' is required".to_string()).at_item(3);
    assert_eq!(err.item_index(), Some(3));
    assert_eq!(err.to_string(), "Item 3: Invalid input: parameter 'name' is required");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_api_error_carries_envelope() {
    let envelope = json!({ "data": null, "errors": [{ "message": "not authorized" }] });
    let err = TwingateError::GraphQLApi {
        message: "not authorized".to_string(),
        envelope: envelope.clone(),
        item_index: 0,
    };
    assert_eq!(err.to_string(), "GraphQL error: not authorized");
    match err {
        TwingateError::GraphQLApi { envelope: kept, .. } => assert_eq!(kept, envelope),
        _ => unreachable!(),
    }
}

#[test]
fn test_transport_error_display() {
    let err = TwingateError::Transport {
        source: TransportError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "<html>".to_string(),
        },
        item_index: 1,
    };
    assert_eq!(err.item_index(), Some(1));
    assert!(err.to_string().starts_with("Transport error: HTTP 502"));
}

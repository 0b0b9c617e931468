use serde_json::json;

use crate::error::TwingateError;
use crate::operations::{parse_port_ranges, split_ids, Params, PortRange};

#[test]
fn test_split_ids_drops_blanks() {
    assert_eq!(split_ids(" a, b ,,c , "), vec!["a", "b", "c"]);
    assert!(split_ids("").is_empty());
}

#[test]
fn test_port_ranges() {
    assert_eq!(
        parse_port_ranges("22, 8000 - 8080,").unwrap(),
        vec![
            PortRange { start: 22, end: 22 },
            PortRange { start: 8000, end: 8080 }
        ]
    );
    assert!(parse_port_ranges("").unwrap().is_empty());
}

#[test]
fn test_port_ranges_reject_bad_input() {
    for bad in ["ssh", "22-", "443-80", "65536", "-1"] {
        assert!(
            matches!(parse_port_ranges(bad), Err(TwingateError::InvalidInput(_))),
            "accepted '{}'",
            bad
        );
    }
}

#[test]
fn test_set_pair_parses_json_values() {
    let mut params = Params::new();
    params.set_pair("isTrusted=true").unwrap();
    params.set_pair("limit=10").unwrap();
    params.set_pair("name=Office VPN").unwrap();
    params.set_pair("additionalFields.groupIds=[\"g_1\"]").unwrap();

    assert_eq!(
        json!(params),
        json!({
            "isTrusted": true,
            "limit": 10,
            "name": "Office VPN",
            "additionalFields": { "groupIds": ["g_1"] }
        })
    );
    assert!(params.set_pair("no-equals-sign").is_err());
    assert!(params.set_pair("name.inner=x").is_err());
}

#[test]
fn test_optional_values() {
    let params = Params::new()
        .with("empty", "")
        .with("flag", "FALSE")
        .with("number", 7)
        .with("list", json!(["a", " ", "b"]));

    assert_eq!(params.optional_str("empty").unwrap(), None);
    assert_eq!(params.optional_str("number").unwrap(), Some("7".to_string()));
    assert_eq!(params.optional_bool("flag").unwrap(), Some(false));
    assert_eq!(params.optional_u32("number").unwrap(), Some(7));
    assert_eq!(
        params.id_list("list").unwrap(),
        Some(vec!["a".to_string(), "b".to_string()])
    );
    assert!(params.optional_bool("number").is_err());
    assert!(params.collection("flag").is_err());
}

#[test]
fn test_from_value_requires_object() {
    assert!(Params::from_value(json!({ "a": 1 })).is_ok());
    assert!(Params::from_value(json!("a")).is_err());
}

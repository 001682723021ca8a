//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected results or errors. Bodies are compared as parsed JSON so
//! field ordering does not matter.

use console_dns_client::{
    ApiError, ClientConfig, HttpMethod, HttpRequest, HttpResponse, Zone, ZoneClient,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8090";

fn client() -> ZoneClient<()> {
    ZoneClient::with_transport(ClientConfig::new(BASE_URL, "test-token"), ())
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

/// Compare a built request against `expected_request`.
fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Check an error against `expected_error`.
fn check_error(name: &str, err: ApiError, expected: &Value) {
    match expected["kind"].as_str().unwrap() {
        "Status" => {
            let status = expected["status"].as_u64().unwrap() as u16;
            assert_eq!(err.status(), Some(status), "{name}: status");
            assert!(matches!(err, ApiError::Status { .. }), "{name}: expected Status");
            assert_eq!(err.to_string(), expected["message"].as_str().unwrap(), "{name}: message");
        }
        "Decode" => assert!(matches!(err, ApiError::Decode(_)), "{name}: expected Decode"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

fn input_str<'a>(case: &'a Value, field: &str) -> &'a str {
    case["input"][field].as_str().unwrap()
}

// ---------------------------------------------------------------------------
// List zones
// ---------------------------------------------------------------------------

#[test]
fn list_zones_test_vectors() {
    let raw = include_str!("../../test-vectors/list_zones.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        check_request(name, &c.build_list_zones(), &case["expected_request"]);

        let result = c.parse_list_zones(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
        } else {
            let zones = result.unwrap().into_value();
            let expected: Vec<&str> = case["expected_result"]
                .as_array()
                .unwrap()
                .iter()
                .map(|z| z.as_str().unwrap())
                .collect();
            assert_eq!(zones.names(), expected, "{name}: zone names");
        }
    }
}

// ---------------------------------------------------------------------------
// List zone
// ---------------------------------------------------------------------------

#[test]
fn list_zone_test_vectors() {
    let raw = include_str!("../../test-vectors/list_zone.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_zone(input_str(case, "zone"));
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_list_zone(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Zone = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap().into_value(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create / delete
// ---------------------------------------------------------------------------

#[test]
fn create_record_test_vectors() {
    let raw = include_str!("../../test-vectors/create_record.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c
            .build_create_record(
                input_str(case, "zone"),
                input_str(case, "record_name"),
                input_str(case, "record_type"),
                &case["input"]["record"],
            )
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_mutation(simulated(case));
        match case.get("expected_error") {
            Some(expected_error) => check_error(name, result.unwrap_err(), expected_error),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}

#[test]
fn delete_record_test_vectors() {
    let raw = include_str!("../../test-vectors/delete_record.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c
            .build_delete_record(
                input_str(case, "zone"),
                input_str(case, "record_name"),
                input_str(case, "record_type"),
                &case["input"]["record"],
            )
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_mutation(simulated(case));
        match case.get("expected_error") {
            Some(expected_error) => check_error(name, result.unwrap_err(), expected_error),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_record_test_vectors() {
    let raw = include_str!("../../test-vectors/update_record.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c
            .build_update_record(
                input_str(case, "zone"),
                input_str(case, "record_name"),
                input_str(case, "record_type"),
                &case["input"]["old"],
                &case["input"]["next"],
            )
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_mutation(simulated(case));
        match case.get("expected_error") {
            Some(expected_error) => check_error(name, result.unwrap_err(), expected_error),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}

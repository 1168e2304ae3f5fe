use compound_convert::{Config, ConversionOutcome, Direction, PubChemClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PubChemClient {
    let config = Config {
        api_base_url: server.uri(),
        ..Config::default()
    };
    PubChemClient::new(&config).unwrap()
}

async fn mount_smiles_cids(server: &MockServer, smiles_form: &str, cids: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/compound/smiles/cids/JSON"))
        .and(body_string(smiles_form))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IdentifierList": { "CID": cids }
        })))
        .mount(server)
        .await;
}

async fn mount_property(server: &MockServer, cid: u64, property: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/compound/cid/{}/property/{}/JSON", cid, property)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn error_of(outcome: &ConversionOutcome) -> &str {
    assert!(outcome.output.is_none(), "expected failure, got {:?}", outcome);
    outcome.error.as_deref().unwrap()
}

#[tokio::test]
async fn smiles_resolves_to_iupac_name_using_first_cid() {
    let server = MockServer::start().await;
    mount_smiles_cids(&server, "smiles=CCO", json!([702, 9999])).await;
    mount_property(
        &server,
        702,
        "IUPACName",
        json!({ "PropertyTable": { "Properties": [{ "CID": 702, "IUPACName": "ethanol" }] } }),
    )
    .await;

    let outcome = client_for(&server).lookup(" CCO ", Direction::SmilesToIupac).await;
    assert_eq!(outcome, ConversionOutcome::success("CCO", "ethanol"));
}

#[tokio::test]
async fn name_resolves_to_smiles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/compound/name/ethanol/cids/JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IdentifierList": { "CID": [702] }
        })))
        .mount(&server)
        .await;
    mount_property(
        &server,
        702,
        "CanonicalSMILES",
        json!({ "PropertyTable": { "Properties": [{ "CID": 702, "CanonicalSMILES": "CCO" }] } }),
    )
    .await;

    let outcome = client_for(&server).lookup("ethanol", Direction::IupacToSmiles).await;
    assert_eq!(outcome, ConversionOutcome::success("ethanol", "CCO"));
}

#[tokio::test]
async fn newer_smiles_property_name_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/compound/name/benzene/cids/JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IdentifierList": { "CID": [241] }
        })))
        .mount(&server)
        .await;
    mount_property(
        &server,
        241,
        "CanonicalSMILES",
        json!({ "PropertyTable": { "Properties": [{ "CID": 241, "ConnectivitySMILES": "C1=CC=CC=C1" }] } }),
    )
    .await;

    let outcome = client_for(&server).lookup("benzene", Direction::IupacToSmiles).await;
    assert_eq!(outcome.output.as_deref(), Some("C1=CC=CC=C1"));
}

#[tokio::test]
async fn names_are_escaped_into_the_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/compound/name/.+/cids/JSON$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IdentifierList": { "CID": [176] }
        })))
        .mount(&server)
        .await;
    mount_property(
        &server,
        176,
        "CanonicalSMILES",
        json!({ "PropertyTable": { "Properties": [{ "CID": 176, "CanonicalSMILES": "CC(=O)O" }] } }),
    )
    .await;

    let outcome = client_for(&server).lookup("acetic acid", Direction::IupacToSmiles).await;
    assert!(outcome.is_success());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.path().contains("acetic%20acid"));
}

#[tokio::test]
async fn resolve_status_error_is_reported_with_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let outcome = client_for(&server).lookup("CCO", Direction::SmilesToIupac).await;
    assert_eq!(error_of(&outcome), "API error: 503");
}

#[tokio::test]
async fn empty_cid_list_is_no_compound_found() {
    let server = MockServer::start().await;
    mount_smiles_cids(&server, "smiles=CCO", json!([])).await;

    let outcome = client_for(&server).lookup("CCO", Direction::SmilesToIupac).await;
    assert_eq!(error_of(&outcome), "No compound found");
}

#[tokio::test]
async fn missing_identifier_list_is_no_compound_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Waiting": {} })))
        .mount(&server)
        .await;

    let outcome = client_for(&server).lookup("CCO", Direction::SmilesToIupac).await;
    assert_eq!(error_of(&outcome), "No compound found");
}

#[tokio::test]
async fn property_status_error_names_the_target() {
    let server = MockServer::start().await;
    mount_smiles_cids(&server, "smiles=CCO", json!([702])).await;
    Mock::given(method("GET"))
        .and(path("/compound/cid/702/property/IUPACName/JSON"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = client_for(&server).lookup("CCO", Direction::SmilesToIupac).await;
    assert_eq!(error_of(&outcome), "Failed to get IUPAC name: 500");
}

#[tokio::test]
async fn empty_property_table_is_no_properties_found() {
    let server = MockServer::start().await;
    mount_smiles_cids(&server, "smiles=CCO", json!([702])).await;
    mount_property(&server, 702, "IUPACName", json!({ "PropertyTable": { "Properties": [] } })).await;

    let outcome = client_for(&server).lookup("CCO", Direction::SmilesToIupac).await;
    assert_eq!(error_of(&outcome), "No properties found");
}

#[tokio::test]
async fn blank_property_value_is_not_available() {
    let server = MockServer::start().await;
    mount_smiles_cids(&server, "smiles=CCO", json!([702])).await;
    mount_property(
        &server,
        702,
        "IUPACName",
        json!({ "PropertyTable": { "Properties": [{ "CID": 702, "IUPACName": "" }] } }),
    )
    .await;

    let outcome = client_for(&server).lookup("CCO", Direction::SmilesToIupac).await;
    assert_eq!(error_of(&outcome), "IUPAC name not available");
}

#[tokio::test]
async fn malformed_body_becomes_item_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let outcome = client_for(&server).lookup("CCO", Direction::SmilesToIupac).await;
    assert!(error_of(&outcome).starts_with("Error: "));
}

#[tokio::test]
async fn slow_response_hits_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "IdentifierList": { "CID": [702] } }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = Config {
        api_base_url: server.uri(),
        request_timeout_secs: 1,
        ..Config::default()
    };
    let client = PubChemClient::new(&config).unwrap();

    let outcome = client.lookup("CCO", Direction::SmilesToIupac).await;
    assert!(error_of(&outcome).starts_with("Error: "));
}

#[tokio::test]
async fn unreachable_service_becomes_item_error() {
    let config = Config {
        api_base_url: "http://127.0.0.1:9".to_string(),
        ..Config::default()
    };
    let client = PubChemClient::new(&config).unwrap();

    let outcome = client.lookup("ethanol", Direction::IupacToSmiles).await;
    assert!(error_of(&outcome).starts_with("Error: "));
}

#[tokio::test]
async fn blank_item_fails_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = client_for(&server).lookup("   ", Direction::SmilesToIupac).await;
    assert_eq!(error_of(&outcome), "Empty SMILES string");
}

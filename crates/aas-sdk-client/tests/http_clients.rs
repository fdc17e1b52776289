use aas_sdk_client::{
    encode_asset_id, AasDiscoveryApi, AasDiscoveryClient, AasRegistryApi, AasRegistryClient,
    AasRepositoryApi, AasRepositoryClient, ClientError, Configuration, HttpClient,
    SubmodelRepositoryApi, SubmodelRepositoryClient,
};
use aas_sdk_core::{
    AssetAdministrationShell, AssetAdministrationShellDescriptor, Endpoint, PageRequest,
    SpecificAssetId, Submodel, AAS_INTERFACE,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHELL_ID: &str = "https://example.com/ids/aas/test-123";
const SHELL_SEGMENT: &str = "aHR0cHM6Ly9leGFtcGxlLmNvbS9pZHMvYWFzL3Rlc3QtMTIz";

fn http() -> HttpClient {
    HttpClient::new().unwrap()
}

#[tokio::test]
async fn get_shell_encodes_id_and_sends_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/shells/{SHELL_SEGMENT}")))
        .and(header("Authorization", "Bearer secret"))
        .and(header("X-Tenant", "plant-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "modelType": "AssetAdministrationShell",
            "id": SHELL_ID,
            "idShort": "Pump"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = Configuration::new(server.uri())
        .with_bearer_token("secret")
        .with_header("X-Tenant", "plant-1");
    let client = AasRepositoryClient::new(http());

    let shell = client.get_shell_by_id(&config, SHELL_ID).await.unwrap();
    assert_eq!(shell.id, SHELL_ID);
    assert_eq!(shell.id_short.as_deref(), Some("Pump"));
}

#[tokio::test]
async fn not_found_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such shell"))
        .mount(&server)
        .await;

    let client = AasRepositoryClient::new(http());
    let err = client
        .get_shell_by_id(&Configuration::new(server.uri()), SHELL_ID)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        err,
        ClientError::Api {
            status: 404,
            message: "no such shell".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\": 42"))
        .mount(&server)
        .await;

    let client = SubmodelRepositoryClient::new(http());
    let err = client
        .get_submodel_by_id(&Configuration::new(server.uri()), "urn:sm:1")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Parse(_)), "{err:?}");
}

#[tokio::test]
async fn list_passes_paging_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shells"))
        .and(query_param("limit", "2"))
        .and(query_param("cursor", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paging_metadata": {"cursor": "page-3"},
            "result": [
                {"modelType": "AssetAdministrationShell", "id": "urn:aas:1"},
                {"modelType": "AssetAdministrationShell", "id": "urn:aas:2"}
            ]
        })))
        .mount(&server)
        .await;

    let client = AasRepositoryClient::new(http());
    let page = client
        .get_all_shells(
            &Configuration::new(server.uri()),
            &PageRequest {
                limit: Some(2),
                cursor: Some("page-2".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(page.result.len(), 2);
    assert_eq!(page.paging_metadata.cursor.as_deref(), Some("page-3"));
}

#[tokio::test]
async fn put_without_body_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/submodels/dXJuOnNtOjE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = SubmodelRepositoryClient::new(http());
    let returned = client
        .put_submodel_by_id(
            &Configuration::new(server.uri()),
            "urn:sm:1",
            &Submodel::new("urn:sm:1"),
        )
        .await
        .unwrap();

    assert!(returned.is_none());
}

#[tokio::test]
async fn post_descriptor_sends_json_body() {
    let server = MockServer::start().await;
    let descriptor = AssetAdministrationShellDescriptor {
        id: SHELL_ID.to_string(),
        endpoints: Some(vec![Endpoint::http(
            AAS_INTERFACE,
            format!("http://repo:8081/shells/{SHELL_SEGMENT}"),
        )]),
        ..Default::default()
    };
    let expected = serde_json::to_value(&descriptor).unwrap();

    Mock::given(method("POST"))
        .and(path("/shell-descriptors"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(201).set_body_json(&expected))
        .expect(1)
        .mount(&server)
        .await;

    let client = AasRegistryClient::new(http());
    let created = client
        .post_shell_descriptor(&Configuration::new(server.uri()), &descriptor)
        .await
        .unwrap();

    assert_eq!(created, descriptor);
}

#[tokio::test]
async fn delete_reports_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/shell-descriptors/{SHELL_SEGMENT}")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = AasRegistryClient::new(http());
    let err = client
        .delete_shell_descriptor_by_id(&Configuration::new(server.uri()), SHELL_ID)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn discovery_encodes_asset_ids() {
    let server = MockServer::start().await;
    let asset_id = SpecificAssetId::new("serialNumber", "SN-1");
    let encoded = encode_asset_id(&asset_id).unwrap();

    Mock::given(method("GET"))
        .and(path("/lookup/shells"))
        .and(query_param("assetIds", encoded.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paging_metadata": {},
            "result": ["urn:aas:1", "urn:aas:2"]
        })))
        .mount(&server)
        .await;

    let client = AasDiscoveryClient::new(http());
    let ids = client
        .get_all_aas_ids_by_asset_link(&Configuration::new(server.uri()), &[asset_id])
        .await
        .unwrap();

    assert_eq!(ids, vec!["urn:aas:1".to_string(), "urn:aas:2".to_string()]);
}

#[tokio::test]
async fn unreachable_host_is_request_error() {
    let client = AasRepositoryClient::new(http());
    let err = client
        .post_shell(
            &Configuration::new("http://127.0.0.1:1"),
            &AssetAdministrationShell::new(SHELL_ID),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Request(_)), "{err:?}");
}

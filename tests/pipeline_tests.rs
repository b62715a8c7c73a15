//! Integration tests for the briefing pipeline using wiremock.
//!
//! All three upstream services are mocked on a single server; the
//! distinct request paths keep them apart and let us assert call order.

use serde_json::json;
use skycast::{AppConfig, Pipeline};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> AppConfig {
    AppConfig {
        openweather_api_key: "owm_key".to_string(),
        ip_api_key: "ip_token".to_string(),
        inference_api_key: "inference_key".to_string(),
        prompt: "Summarize this forecast: ".to_string(),
    }
}

fn forecast_payload() -> serde_json::Value {
    json!({
        "cod": "200",
        "cnt": 3,
        "list": [
            {"dt": 1700000000, "main": {"temp": 18.2}},
            {"dt": 1700010800, "main": {"temp": 17.1}},
            {"dt": 1700021600, "main": {"temp": 16.4}}
        ],
        "city": {"name": "Sydney"}
    })
}

async fn mock_all_services(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("token", "ip_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "203.0.113.7",
            "city": "Sydney",
            "loc": "-33.8688,151.2093"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", "-33.8688"))
        .and(query_param("lon", "151.2093"))
        .and(query_param("cnt", "3"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "owm_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer inference_key"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "gen-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Mild evening, light rain later."}}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pipeline_makes_three_calls_in_order() {
    let server = MockServer::start().await;
    mock_all_services(&server).await;

    let config = test_config();
    let pipeline =
        Pipeline::with_endpoints(&config, &server.uri(), &server.uri(), &server.uri()).unwrap();

    let briefing = pipeline.run().await.unwrap();

    assert_eq!(briefing.location.city, "Sydney");
    // Verbatim first-choice content, no post-processing
    assert_eq!(briefing.summary, "Mild evening, light rain later.");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].url.path(), "/json");
    assert_eq!(requests[1].url.path(), "/data/2.5/forecast");
    assert_eq!(requests[2].url.path(), "/chat/completions");
}

#[tokio::test]
async fn test_completion_request_embeds_prompt_and_forecast() {
    let server = MockServer::start().await;
    mock_all_services(&server).await;

    let config = test_config();
    let pipeline =
        Pipeline::with_endpoints(&config, &server.uri(), &server.uri(), &server.uri()).unwrap();
    pipeline.run().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let completion_body: serde_json::Value = requests[2].body_json().unwrap();
    let content = completion_body["messages"][0]["content"].as_str().unwrap();

    // Prompt followed directly by the serialized forecast, no delimiter
    assert!(content.starts_with("Summarize this forecast: {"));
    assert!(content.contains("\"cnt\":3"));
    assert_eq!(completion_body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(completion_body["messages"][0]["role"], "user");
}

#[tokio::test]
async fn test_malformed_coordinates_stop_before_forecast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "203.0.113.7",
            "city": "Nowhere",
            "loc": "no comma here"
        })))
        .mount(&server)
        .await;

    let config = test_config();
    let pipeline =
        Pipeline::with_endpoints(&config, &server.uri(), &server.uri(), &server.uri()).unwrap();

    let err = pipeline.run().await.unwrap_err();
    assert!(err.to_string().contains("malformed coordinates"));

    // Only the geolocation call happened
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_empty_completion_choices_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "203.0.113.7",
            "city": "Sydney",
            "loc": "-33.8688,151.2093"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let config = test_config();
    let pipeline =
        Pipeline::with_endpoints(&config, &server.uri(), &server.uri(), &server.uri()).unwrap();

    let err = pipeline.run().await.unwrap_err();
    assert!(err.to_string().contains("No choices"));
}

#[tokio::test]
async fn test_upstream_failure_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = test_config();
    let pipeline =
        Pipeline::with_endpoints(&config, &server.uri(), &server.uri(), &server.uri()).unwrap();

    let err = pipeline.run().await.unwrap_err();
    assert!(format!("{err:#}").contains("Geolocation"));
}

#[tokio::test]
async fn test_missing_config_means_no_network_calls() {
    let server = MockServer::start().await;

    // SAFETY: Test environment, clearing one required variable
    unsafe {
        std::env::remove_var("OPENWEATHER_API_KEY");
    }

    // The shell only builds a pipeline after configuration loads, so a
    // missing value means no client is ever constructed.
    if AppConfig::from_env().is_ok() {
        panic!("config load should fail with OPENWEATHER_API_KEY unset");
    }

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

//! Integration tests for the HTTP providers using wiremock.

use umbrella_core::{
    Coordinates, ForecastProvider, LocationProvider, Outcome, check_weather,
    provider::{ipinfo::IpInfoProvider, openweather::OpenWeatherProvider},
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SF: Coordinates = Coordinates { latitude: 37.77, longitude: -122.42 };

fn onecall_body(daily: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "lat": 37.77,
        "lon": -122.42,
        "timezone": "America/Los_Angeles",
        "daily": daily
    })
}

async fn mount_loc(server: &MockServer, reply: &str) {
    Mock::given(method("GET"))
        .and(path("/loc"))
        .and(header("authorization", "Bearer ip-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(reply))
        .mount(server)
        .await;
}

async fn mount_onecall(server: &MockServer, daily: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .and(query_param("lat", "37.770000"))
        .and(query_param("lon", "-122.420000"))
        .and(query_param("appid", "ow-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(onecall_body(daily)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn ipinfo_resolves_coordinates() {
    let server = MockServer::start().await;
    mount_loc(&server, "37.77,-122.42\n").await;

    let provider = IpInfoProvider::with_base_url("ip-token".into(), server.uri());
    let coords = provider.current_location().await.unwrap();

    assert_eq!(coords, SF);
}

#[tokio::test]
async fn ipinfo_rejects_reply_without_comma() {
    let server = MockServer::start().await;
    mount_loc(&server, "37.77").await;

    let provider = IpInfoProvider::with_base_url("ip-token".into(), server.uri());
    let err = provider.current_location().await.unwrap_err();

    assert_eq!(err.to_string(), "invalid location format: 37.77");
}

#[tokio::test]
async fn ipinfo_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loc"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Unknown token"))
        .mount(&server)
        .await;

    let provider = IpInfoProvider::with_base_url("bad".into(), server.uri());
    let err = provider.current_location().await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("403"), "unexpected error: {msg}");
    assert!(msg.contains("Unknown token"));
}

#[tokio::test]
async fn openweather_returns_first_daily_entry() {
    let server = MockServer::start().await;
    mount_onecall(
        &server,
        serde_json::json!([
            { "dt": 1_700_000_000, "pop": 0.06, "uvi": 2.5, "summary": "Light rain" },
            { "dt": 1_700_086_400, "pop": 0.9, "uvi": 7.0 }
        ]),
    )
    .await;

    let provider = OpenWeatherProvider::new("ow-key".into(), server.uri());
    let today = provider.daily_forecast(&SF).await.unwrap();

    assert_eq!(today.dt, 1_700_000_000);
    assert_eq!(today.pop, 0.06);
    assert_eq!(today.uvi, 2.5);
}

#[tokio::test]
async fn openweather_empty_daily_list_errors() {
    let server = MockServer::start().await;
    mount_onecall(&server, serde_json::json!([])).await;

    let provider = OpenWeatherProvider::new("ow-key".into(), server.uri());
    let err = provider.daily_forecast(&SF).await.unwrap_err();

    assert_eq!(err.to_string(), "no daily forecast available");
}

#[tokio::test]
async fn openweather_null_daily_list_errors() {
    let server = MockServer::start().await;
    mount_onecall(&server, serde_json::Value::Null).await;

    let provider = OpenWeatherProvider::new("ow-key".into(), server.uri());
    let err = provider.daily_forecast(&SF).await.unwrap_err();

    assert_eq!(err.to_string(), "no daily forecast available");
}

#[tokio::test]
async fn openweather_malformed_json_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new("ow-key".into(), server.uri());
    let err = provider.daily_forecast(&SF).await.unwrap_err();

    assert!(err.to_string().contains("Failed to parse OpenWeather one call JSON"));
}

#[tokio::test]
async fn openweather_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "cod": 401,
                "message": "Invalid API key."
            })),
        )
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new("ow-key".into(), server.uri());
    let err = provider.daily_forecast(&SF).await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("401"), "unexpected error: {msg}");
    assert!(msg.contains("Invalid API key."));
}

#[tokio::test]
async fn full_check_against_mock_services() {
    let server = MockServer::start().await;
    mount_loc(&server, "37.77,-122.42").await;
    mount_onecall(&server, serde_json::json!([{ "dt": 1_700_000_000, "pop": 0.0, "uvi": 3.1 }]))
        .await;

    let location = IpInfoProvider::with_base_url("ip-token".into(), server.uri());
    let forecast = OpenWeatherProvider::new("ow-key".into(), server.uri());

    let outcome = check_weather("shine", &location, &forecast).await.unwrap();

    assert!(matches!(outcome, Outcome::Assessed(_)));
    assert_eq!(outcome.lines(), vec!["UV Index today: 3.1", "Bring sunscreen!"]);
}

#[tokio::test]
async fn invalid_mode_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let location = IpInfoProvider::with_base_url("ip-token".into(), server.uri());
    let forecast = OpenWeatherProvider::new("ow-key".into(), server.uri());

    let outcome = check_weather("cloudy", &location, &forecast).await.unwrap();

    assert_eq!(outcome, Outcome::InvalidMode);
    server.verify().await;
}

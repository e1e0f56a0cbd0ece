//! Forecast provider client tests
//!
//! Runs the short-term and mid-term clients against a wiremock server:
//! - retry on rate limiting and server errors
//! - both credential forms
//! - partial mid-term failures

use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveTime};
use rain_check_server::config::ServiceKey;
use rain_check_server::external::{
    MidTermClient, RetryPolicy, ShortTermClient, UpstreamForecastError,
};
use serde_json::{json, Value};
use shared::forecast::{IssueTime, ShortTermCategory};
use shared::{GridPoint, MidTermRegions};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn envelope(items: Value) -> Value {
    json!({
        "response": {
            "header": {"resultCode": "00", "resultMsg": "NORMAL_SERVICE"},
            "body": {"dataType": "JSON", "items": {"item": items}, "pageNo": 1, "totalCount": 3}
        }
    })
}

fn short_term_body() -> Value {
    envelope(json!([
        {"baseDate": "20260510", "baseTime": "0500", "category": "TMP", "fcstDate": "20260510", "fcstTime": "0600", "fcstValue": "14", "nx": 60, "ny": 127},
        {"baseDate": "20260510", "baseTime": "0500", "category": "POP", "fcstDate": "20260510", "fcstTime": "1500", "fcstValue": "60", "nx": 60, "ny": 127},
        {"baseDate": "20260510", "baseTime": "0500", "category": "PTY", "fcstDate": "20260510", "fcstTime": "1800", "fcstValue": 1, "nx": 60, "ny": 127}
    ]))
}

fn short_term_client(server: &MockServer, key: ServiceKey) -> ShortTermClient {
    ShortTermClient::with_base_url(key, server.uri(), Duration::from_secs(5)).unwrap()
}

fn issue() -> IssueTime {
    IssueTime::new(date("2026-05-10"), 5)
}

// ============================================================================
// Short-term client
// ============================================================================

#[tokio::test]
async fn test_short_term_decodes_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getVilageFcst"))
        .and(query_param("base_date", "20260510"))
        .and(query_param("base_time", "0500"))
        .and(query_param("nx", "60"))
        .and(query_param("ny", "127"))
        .and(query_param("dataType", "JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(short_term_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = short_term_client(&server, ServiceKey::Raw("key".to_string()))
        .with_retry_policy(RetryPolicy::immediate(3));
    let items = client.get_forecast(GridPoint::new(60, 127), issue()).await.unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].category, ShortTermCategory::Tmp);
    assert_eq!(items[0].value, "14");
    assert_eq!(items[2].category, ShortTermCategory::Pty);
    assert_eq!(items[2].value, "1");
}

#[tokio::test]
async fn test_short_term_numeric_times_keep_their_rows() {
    let server = MockServer::start().await;
    let body = envelope(json!([
        {"category": "PTY", "fcstDate": 20260510, "fcstTime": 600, "fcstValue": 1},
        {"category": "TMP", "fcstDate": "20260510", "fcstTime": 0, "fcstValue": 12},
        {"category": "POP", "fcstDate": "20260510", "fcstTime": 1500, "fcstValue": 70}
    ]));

    Mock::given(method("GET"))
        .and(path("/getVilageFcst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = short_term_client(&server, ServiceKey::Raw("key".to_string()))
        .with_retry_policy(RetryPolicy::immediate(3));
    let items = client.get_forecast(GridPoint::new(60, 127), issue()).await.unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].date, date("2026-05-10"));
    assert_eq!(items[0].time, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
    assert_eq!(items[1].time, NaiveTime::MIN);
    assert_eq!(items[2].time, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
}

#[tokio::test]
async fn test_short_term_retries_rate_limit_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getVilageFcst"))
        .respond_with(ResponseTemplate::new(429).set_body_string("LIMITED_NUMBER_OF_SERVICE_REQUESTS"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/getVilageFcst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(short_term_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = short_term_client(&server, ServiceKey::Raw("key".to_string()));

    let start = Instant::now();
    let items = client.get_forecast(GridPoint::new(60, 127), issue()).await.unwrap();

    assert_eq!(items.len(), 3);
    // two backoffs of at least one second each
    assert!(start.elapsed() >= Duration::from_secs(2));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_short_term_gives_up_after_three_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getVilageFcst"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let client = short_term_client(&server, ServiceKey::Raw("key".to_string()))
        .with_retry_policy(RetryPolicy::immediate(3));
    let err = client
        .get_forecast(GridPoint::new(60, 127), issue())
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamForecastError::RetriesExhausted { attempts: 3, .. }));
}

#[tokio::test]
async fn test_short_term_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getVilageFcst"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let client = short_term_client(&server, ServiceKey::Raw("key".to_string()))
        .with_retry_policy(RetryPolicy::immediate(3));
    let err = client
        .get_forecast(GridPoint::new(60, 127), issue())
        .await
        .unwrap_err();

    match err {
        UpstreamForecastError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "Unauthorized");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_short_term_result_code_is_checked() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getVilageFcst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"header": {"resultCode": "10", "resultMsg": "INVALID_REQUEST_PARAMETER_ERROR"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = short_term_client(&server, ServiceKey::Raw("key".to_string()))
        .with_retry_policy(RetryPolicy::immediate(3));
    let err = client
        .get_forecast(GridPoint::new(60, 127), issue())
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamForecastError::ResultCode { ref code, .. } if code == "10"));
}

// ============================================================================
// Credentials
// ============================================================================

#[tokio::test]
async fn test_encoded_key_is_sent_verbatim() {
    let server = MockServer::start().await;

    // wiremock decodes query values before matching
    Mock::given(method("GET"))
        .and(path("/getVilageFcst"))
        .and(query_param("serviceKey", "abc+def/=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(short_term_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = short_term_client(&server, ServiceKey::Encoded("abc%2Bdef%2F%3D%3D".to_string()))
        .with_retry_policy(RetryPolicy::immediate(1));
    assert!(client.get_forecast(GridPoint::new(60, 127), issue()).await.is_ok());
}

#[tokio::test]
async fn test_raw_key_is_encoded_by_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getVilageFcst"))
        .and(query_param("serviceKey", "abc+def/=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(short_term_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = short_term_client(&server, ServiceKey::Raw("abc+def/==".to_string()))
        .with_retry_policy(RetryPolicy::immediate(1));
    assert!(client.get_forecast(GridPoint::new(60, 127), issue()).await.is_ok());
}

// ============================================================================
// Mid-term client
// ============================================================================

fn mid_term_client(server: &MockServer) -> MidTermClient {
    MidTermClient::with_base_url(
        ServiceKey::Raw("key".to_string()),
        server.uri(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn regions() -> MidTermRegions {
    MidTermRegions::new("11B00000", "11B10101")
}

fn land_body() -> Value {
    envelope(json!({
        "regId": "11B00000",
        "rnSt4Am": 20, "rnSt4Pm": 60,
        "wf4Am": "구름많음", "wf4Pm": "흐리고 비",
        "rnSt8": 30, "wf8": "맑음"
    }))
}

fn temperature_body() -> Value {
    envelope(json!([{
        "regId": "11B10101",
        "taMin4": 12, "taMax4": 21,
        "taMin5": 13, "taMax5": 22
    }]))
}

#[tokio::test]
async fn test_mid_term_both_sub_calls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getMidLandFcst"))
        .and(query_param("regId", "11B00000"))
        .and(query_param("tmFc", "202605100600"))
        .respond_with(ResponseTemplate::new(200).set_body_json(land_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/getMidTa"))
        .and(query_param("regId", "11B10101"))
        .and(query_param("tmFc", "202605100600"))
        .respond_with(ResponseTemplate::new(200).set_body_json(temperature_body()))
        .expect(1)
        .mount(&server)
        .await;

    let issue = IssueTime::new(date("2026-05-10"), 6);
    let payload = mid_term_client(&server).get_forecast(&regions(), issue).await;

    let land = payload.land.expect("land forecast");
    let day4 = land.day(4).unwrap();
    assert_eq!(day4.rain_pm, Some(60));
    assert_eq!(day4.pm.as_deref(), Some("흐리고 비"));
    assert_eq!(land.day(8).unwrap().daily.as_deref(), Some("맑음"));

    let temperature = payload.temperature.expect("temperature forecast");
    assert_eq!(temperature.range_for(5), (Some(13), Some(22)));
}

#[tokio::test]
async fn test_mid_term_failed_sub_call_is_missing_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getMidLandFcst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(land_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/getMidTa"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let issue = IssueTime::new(date("2026-05-09"), 18);
    let payload = mid_term_client(&server).get_forecast(&regions(), issue).await;

    assert!(payload.land.is_some());
    assert!(payload.temperature.is_none());
}

#[tokio::test]
async fn test_mid_term_no_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"header": {"resultCode": "00"}, "body": {"items": ""}}
        })))
        .mount(&server)
        .await;

    let issue = IssueTime::new(date("2026-05-10"), 6);
    let client = mid_term_client(&server);

    assert_eq!(client.get_land_forecast("11B00000", issue).await.unwrap(), None);
    let payload = client.get_forecast(&regions(), issue).await;
    assert!(payload.land.is_none());
    assert!(payload.temperature.is_none());
}

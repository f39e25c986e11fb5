// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::sync::Arc;

use bilive_tools::http::{ANDROID_USER_AGENT, DEFAULT_FORM_CONTENT_TYPE};
use bilive_tools::{
    Body, CookieStore, LegacyOptions, LogRecord, Platform, RequestOptions, RequestShape, Severity,
    Tools, ToolsConfig,
};
use parking_lot::Mutex;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tools() -> (Tools, Arc<Mutex<Vec<LogRecord>>>) {
    let tools = Tools::new(ToolsConfig::quiet()).expect("tools");
    let records = Arc::new(Mutex::new(Vec::new()));
    let target = records.clone();
    tools
        .log_sink()
        .subscribe(Arc::new(move |r: &LogRecord| target.lock().push(r.clone())));
    (tools, records)
}

#[tokio::test]
async fn legacy_json_request_sends_platform_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/room"))
        .and(header("user-agent", ANDROID_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code":0,"msg":"ok"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let (tools, records) = tools();
    let options = LegacyOptions {
        uri: Some(format!("{}/room", server.uri())),
        json: Some(true),
        ..Default::default()
    };
    let result = tools.xhr(options, Platform::Android).await.unwrap();

    assert_eq!(result.response.status_code(), 200);
    assert_eq!(
        result.body,
        Body::Json(serde_json::json!({ "code": 0, "msg": "ok" }))
    );
    assert!(records.lock().is_empty());
}

#[tokio::test]
async fn post_form_gets_default_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/msg/send"))
        .and(header("content-type", DEFAULT_FORM_CONTENT_TYPE))
        .and(body_string("msg=hello&roomid=1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("sent"))
        .expect(1)
        .mount(&server)
        .await;

    let (tools, _) = tools();
    let options = RequestOptions::post(format!("{}/msg/send", server.uri()))
        .form([("msg", "hello"), ("roomid", "1")]);
    let result = tools.xhr(options, Platform::Android).await.unwrap();

    assert_eq!(result.body.as_text(), Some("sent"));
}

#[tokio::test]
async fn raw_body_with_null_encoding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/captcha.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xd8, 0xff]))
        .mount(&server)
        .await;

    let (tools, _) = tools();
    let options = RequestShape::from_json(serde_json::json!({
        "uri": format!("{}/captcha.jpg", server.uri()),
        "encoding": null,
    }))
    .unwrap();
    let result = tools.xhr(options, Platform::Pc).await.unwrap();

    assert_eq!(result.body.as_bytes().map(|b| b.to_vec()), Some(vec![0xff, 0xd8, 0xff]));
}

#[tokio::test]
async fn error_status_is_logged_and_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(412))
        .mount(&server)
        .await;

    let (tools, records) = tools();
    let url = format!("{}/blocked", server.uri());
    let err = tools
        .xhr(RequestOptions::get(url.clone()), Platform::Pc)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status_code(), Some(412));

    let records = records.lock();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity, Severity::Error);
    assert!(records[0].text.starts_with(&url));
    assert!(tools.logs().is_empty());
}

#[tokio::test]
async fn connection_failure_is_logged_and_returned() {
    let (tools, records) = tools();
    let err = tools
        .xhr(RequestOptions::get("http://127.0.0.1:9/unreachable"), Platform::Pc)
        .await
        .unwrap_err();

    assert!(matches!(err, bilive_tools::Error::Http(_)));
    assert_eq!(records.lock().len(), 1);
}

#[tokio::test]
async fn cookie_jar_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "sid=abc; Path=/"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("cookie", "sid=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("me"))
        .expect(1)
        .mount(&server)
        .await;

    let (tools, _) = tools();
    let jar = tools.set_cookie("").unwrap();

    tools
        .xhr(
            RequestOptions::get(format!("{}/login", server.uri())).cookie_jar(jar.clone()),
            Platform::Android,
        )
        .await
        .unwrap();
    assert_eq!(tools.cookie_at(&jar, "sid", &server.uri()), "abc");

    let legacy = LegacyOptions {
        uri: Some(format!("{}/me", server.uri())),
        jar: Some(jar.clone()),
        ..Default::default()
    };
    let result = tools.xhr(legacy, Platform::Pc).await.unwrap();
    assert_eq!(result.body.as_text(), Some("me"));
    assert_eq!(jar.get_all(&url::Url::parse(&server.uri()).unwrap()).len(), 1);
}

#[tokio::test]
async fn out_of_range_max_age_is_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "sid=abc; Max-Age=10000000000000")
                .append_header("set-cookie", "old=x; Max-Age=-9223372036854775808"),
        )
        .mount(&server)
        .await;

    let (tools, records) = tools();
    let jar = tools.set_cookie("").unwrap();
    let result = tools
        .xhr(
            RequestOptions::get(format!("{}/login", server.uri())).cookie_jar(jar.clone()),
            Platform::Pc,
        )
        .await;

    assert!(result.is_ok());
    assert!(records.lock().is_empty());
    assert_eq!(tools.cookie_at(&jar, "sid", &server.uri()), "abc");
    assert_eq!(tools.cookie_at(&jar, "old", &server.uri()), "");
}

#[tokio::test]
async fn typed_json_response() {
    #[derive(serde::Deserialize)]
    struct RoomInfo {
        room_id: u64,
        live_status: u8,
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"room_id":23058,"live_status":1}"#),
        )
        .mount(&server)
        .await;

    let (tools, _) = tools();
    let result = tools
        .xhr_json::<RoomInfo>(RequestOptions::get(format!("{}/info", server.uri())), Platform::WebView)
        .await
        .unwrap();

    assert_eq!(result.body.room_id, 23058);
    assert_eq!(result.body.live_status, 1);
}

use course_picker::{Config, HttpCourseClient, RequestOrchestrator, RequestState};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        api_base_url: server.uri(),
        ..Config::default()
    }
}

fn orchestrator(config: &Config) -> RequestOrchestrator {
    let client = HttpCourseClient::new(config).expect("创建客户端失败");
    RequestOrchestrator::new(Arc::new(client), config)
}

fn course_json() -> serde_json::Value {
    json!({
        "course_code": "CIS 5500",
        "title": "Software Systems",
        "description": "...",
        "prerequisites": "1. **Programming**: CIS 1200 required.",
        "reddit_comments": []
    })
}

fn insight_json() -> serde_json::Value {
    json!({
        "summary": "...",
        "prerequisites_analysis": "...",
        "difficulty_assessment": "...",
        "recommendations": ["Take CIS1200 first"]
    })
}

#[tokio::test]
async fn test_end_to_end_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/courses/CIS(%20| )5500$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(course_json()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/planning/analyze"))
        .and(body_partial_json(json!({
            "query": "What do I need before CIS 5500?",
            "course_info": {"course_code": "CIS 5500", "title": "Software Systems"},
            "reddit_comments": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(insight_json()))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(&config_for(&server));
    let state = orch.submit("What do I need before CIS 5500?").await;

    let RequestState::Success { course, insight } = &state else {
        panic!("应该成功: {:?}", state);
    };
    assert_eq!(insight.recommendations, vec!["Take CIS1200 first"]);

    let sections = course.prerequisite_sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "Programming");
    assert_eq!(sections[0].body, "CIS 1200 required.");

    assert_eq!(orch.snapshot().state, state);
}

#[tokio::test]
async fn test_lookup_404_skips_analysis() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/courses/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Course 9999 not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/planning/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(insight_json()))
        .expect(0)
        .mount(&server)
        .await;

    let orch = orchestrator(&config_for(&server));
    let state = orch.submit("is cis 9999 hard?").await;

    assert_eq!(state.error_message(), Some("Course 9999 not found"));
    assert!(state.course().is_none());
}

#[tokio::test]
async fn test_invalid_query_sends_no_request() {
    let server = MockServer::start().await;
    let orch = orchestrator(&config_for(&server));

    let state = orch.submit("tell me about databases").await;

    assert!(state.error_message().is_some());
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_analysis_server_error_keeps_course() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/courses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(course_json()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/planning/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let orch = orchestrator(&config_for(&server));
    let state = orch.submit("CIS5500").await;

    assert_eq!(state.error_message(), Some("An error occurred"));
    assert_eq!(state.course().map(|c| c.title.as_str()), Some("Software Systems"));
}

#[tokio::test]
async fn test_compact_course_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/CIS5500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(course_json()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/planning/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(insight_json()))
        .mount(&server)
        .await;

    let config = Config {
        compact_course_path: true,
        ..config_for(&server)
    };
    let state = orchestrator(&config).submit("cis 5500").await;

    assert!(state.insight().is_some());
}

#[tokio::test]
async fn test_lookup_timeout_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/courses/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(course_json())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = Config {
        request_timeout_secs: 1,
        ..config_for(&server)
    };
    let state = orchestrator(&config).submit("CIS 5500").await;

    assert_eq!(state.error_message(), Some("Request timed out after 1s"));
}

#[tokio::test]
async fn test_unreachable_service() {
    let config = Config {
        api_base_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };
    let state = orchestrator(&config).submit("CIS 5500").await;

    let message = state.error_message().expect("应该失败");
    assert!(!message.is_empty());
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/courses/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let state = orchestrator(&config_for(&server)).submit("CIS 5500").await;

    assert_eq!(
        state.error_message(),
        Some("Unexpected response from the course service")
    );
}

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use std::sync::Mutex;
use topicdocs_rs::{Breadcrumb, Client, ClientError, Operation, TopicSummary};

type Seen = web::Data<Mutex<Vec<String>>>;

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: &'static str,
}

/// Stub API that answers every request with a canned reply and records the
/// request target (path and query).
struct StubServer {
    base_url: String,
    seen: Seen,
    handle: ServerHandle,
}

impl StubServer {
    async fn start(status: StatusCode, body: &'static str) -> Self {
        let seen: Seen = web::Data::new(Mutex::new(Vec::new()));
        let reply = web::Data::new(Reply { status, body });

        let app_seen = seen.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_seen.clone())
                .app_data(reply.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stub server");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{}", addr),
            seen,
            handle,
        }
    }

    fn client(&self) -> Client {
        Client::new(&self.base_url)
    }

    fn requests(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn respond(req: HttpRequest, seen: Seen, reply: web::Data<Reply>) -> HttpResponse {
    seen.lock().unwrap().push(req.uri().to_string());
    HttpResponse::build(reply.status)
        .content_type("application/json")
        .body(reply.body)
}

const TOPICS: &str = r#"[
    {"slug": "focus", "title": "Focus", "description": "Attention tools", "isDir": true},
    {"slug": "about", "title": "About", "description": "", "isDir": false}
]"#;

#[actix_web::test]
async fn test_list_topics_returns_body_unchanged() {
    let stub = StubServer::start(StatusCode::OK, TOPICS).await;

    let topics = stub.client().list_topics().await.unwrap();
    assert_eq!(
        topics,
        vec![
            TopicSummary {
                slug: "focus".to_string(),
                title: "Focus".to_string(),
                description: "Attention tools".to_string(),
                is_dir: true,
            },
            TopicSummary {
                slug: "about".to_string(),
                title: "About".to_string(),
                description: String::new(),
                is_dir: false,
            },
        ]
    );
    assert_eq!(stub.requests(), vec!["/api/topics".to_string()]);

    stub.stop().await;
}

#[actix_web::test]
async fn test_get_topic_uses_path_verbatim() {
    let body = r#"{
        "title": "Bar",
        "description": "",
        "contentHtml": "<p>bar</p>\n",
        "children": null,
        "breadcrumbs": [
            {"slug": "foo", "title": "Foo", "path": "/foo"},
            {"slug": "bar", "title": "Bar", "path": "/foo/bar"}
        ]
    }"#;
    let stub = StubServer::start(StatusCode::OK, body).await;

    let detail = stub.client().get_topic("foo/bar").await.unwrap();
    assert_eq!(detail.title, "Bar");
    assert_eq!(detail.content_html, "<p>bar</p>\n");
    assert!(detail.children.is_empty());
    assert_eq!(
        detail.breadcrumbs[1],
        Breadcrumb {
            slug: "bar".to_string(),
            title: "Bar".to_string(),
            path: "/foo/bar".to_string(),
        }
    );
    assert_eq!(stub.requests(), vec!["/api/topics/foo/bar".to_string()]);

    stub.stop().await;
}

#[actix_web::test]
async fn test_search_without_scope_omits_scope_key() {
    let body = r#"[{"path": "/focus/pomodoro", "title": "Pomodoro", "snippet": "25 minutes"}]"#;
    let stub = StubServer::start(StatusCode::OK, body).await;
    let client = stub.client();

    let results = client.search_topics("timer", None).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path, "/focus/pomodoro");

    client.search_topics("timer", Some("")).await.unwrap();

    assert_eq!(
        stub.requests(),
        vec![
            "/api/search?q=timer".to_string(),
            "/api/search?q=timer".to_string(),
        ]
    );

    stub.stop().await;
}

#[actix_web::test]
async fn test_search_encodes_query_and_scope() {
    let stub = StubServer::start(StatusCode::OK, "[]").await;

    let results = stub
        .client()
        .search_topics("a b&c=d", Some("focus/deep work"))
        .await
        .unwrap();
    assert!(results.is_empty());

    assert_eq!(
        stub.requests(),
        vec!["/api/search?q=a+b%26c%3Dd&scope=focus%2Fdeep+work".to_string()]
    );

    stub.stop().await;
}

#[actix_web::test]
async fn test_empty_query_is_still_sent() {
    let stub = StubServer::start(StatusCode::OK, "[]").await;

    stub.client().search_topics("", None).await.unwrap();
    assert_eq!(stub.requests(), vec!["/api/search?q=".to_string()]);

    stub.stop().await;
}

#[actix_web::test]
async fn test_non_success_status_yields_fixed_messages() {
    for status in [StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
        let stub = StubServer::start(status, r#"{"error": "Topic not found"}"#).await;
        let client = stub.client();

        let err = client.list_topics().await.unwrap_err();
        assert!(matches!(err, ClientError::RequestFailed(Operation::ListTopics)));
        assert_eq!(err.to_string(), "Failed to fetch topics");

        let err = client.get_topic("missing").await.unwrap_err();
        assert!(matches!(err, ClientError::RequestFailed(Operation::GetTopic)));
        assert_eq!(err.to_string(), "Failed to fetch topic");

        let err = client.search_topics("x", Some("y")).await.unwrap_err();
        assert!(matches!(err, ClientError::RequestFailed(Operation::Search)));
        assert_eq!(err.to_string(), "Failed to search");

        stub.stop().await;
    }
}

#[actix_web::test]
async fn test_malformed_body_is_parse_error() {
    let stub = StubServer::start(StatusCode::OK, "<html>not json</html>").await;
    let client = stub.client();

    assert!(matches!(
        client.list_topics().await,
        Err(ClientError::Parse(_))
    ));
    assert!(matches!(
        client.get_topic("focus").await,
        Err(ClientError::Parse(_))
    ));
    assert!(matches!(
        client.search_topics("x", None).await,
        Err(ClientError::Parse(_))
    ));

    stub.stop().await;
}

#[actix_web::test]
async fn test_wrong_shape_is_parse_error() {
    let stub = StubServer::start(StatusCode::OK, r#"{"topics": []}"#).await;

    let err = stub.client().list_topics().await.unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)));

    stub.stop().await;
}

#[actix_web::test]
async fn test_unreachable_server_is_transport_error() {
    let stub = StubServer::start(StatusCode::OK, "[]").await;
    let base_url = stub.base_url.clone();
    stub.stop().await;

    let err = Client::new(base_url).list_topics().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[test]
fn test_base_url_trailing_slash_is_trimmed() {
    let client = Client::new("http://localhost:8080/");
    assert_eq!(client.base_url(), "http://localhost:8080");
}

use std::fs;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::routing::get;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tower::ServiceExt;

use rax_file_server::protocol::{AppState, router, with_middleware};
use rax_file_server::storage::ServerRoot;
use rax_file_server::{Server, ServerConfig};

const SECRET: &str = "outside-the-root";

// Layout: <tmp>/secret.txt sits next to the served <tmp>/root.
struct Fixture {
    _dir: TempDir,
    root: ServerRoot,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let served = dir.path().join("root");
        fs::create_dir_all(served.join("resume/test")).unwrap();
        fs::create_dir_all(served.join("empty")).unwrap();
        fs::write(served.join("resume/cv.pdf"), b"%PDF-1.4 resume").unwrap();
        fs::write(served.join("notes.txt"), b"hello notes").unwrap();
        fs::write(served.join("archive.bin"), [0u8, 159, 146, 150]).unwrap();
        fs::write(dir.path().join("secret.txt"), SECRET).unwrap();

        let root = ServerRoot::new(&served).expect("server root");
        Self { _dir: dir, root }
    }

    fn app(&self) -> Router {
        router(AppState::new(self.root.clone()))
    }
}

async fn send(app: Router, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();
    (status, headers, body)
}

fn text(body: &[u8]) -> String {
    String::from_utf8_lossy(body).to_string()
}

#[tokio::test]
async fn lists_root_directory() {
    let fixture = Fixture::new();
    let (status, headers, body) = send(fixture.app(), "/?path=/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let html = text(&body);
    assert!(html.contains("Index of /"));
    assert!(html.contains(">resume/<"));
    assert!(html.contains(">empty/<"));
    assert!(html.contains(">notes.txt<"));
    assert!(html.contains("/download?path=%2Fnotes.txt"));
}

#[tokio::test]
async fn missing_or_blank_path_lists_root() {
    let fixture = Fixture::new();
    let (_, _, explicit) = send(fixture.app(), "/?path=/").await;
    let (status, _, implicit) = send(fixture.app(), "/").await;
    let (_, _, blank) = send(fixture.app(), "/?path=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(explicit, implicit);
    assert_eq!(explicit, blank);
}

#[tokio::test]
async fn traversal_within_tree_matches_direct_listing() {
    let fixture = Fixture::new();
    let (status, _, walked) = send(fixture.app(), "/?path=/resume/test/../../resume/").await;
    let (_, _, direct) = send(fixture.app(), "/?path=/resume/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(walked, direct);
    let html = text(&direct);
    assert!(html.contains("Index of /resume/"));
    assert!(html.contains(">cv.pdf<"));
    assert!(html.contains(">test/<"));
    assert!(html.contains(">../<"));
}

#[tokio::test]
async fn listing_missing_directory_is_not_found_with_resolved_path() {
    let fixture = Fixture::new();
    let (status, _, body) = send(fixture.app(), "/?path=/nowhere/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let expected = fixture.root.path().join("nowhere");
    assert!(text(&body).contains(&expected.display().to_string()));
}

#[tokio::test]
async fn listing_a_file_is_not_found() {
    let fixture = Fixture::new();
    let (status, _, _) = send(fixture.app(), "/?path=/notes.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_rejects_invalid_paths() {
    let fixture = Fixture::new();
    for uri in [
        "/?path=resume",
        "/?path=/..",
        "/?path=/../../etc",
        "/?path=/resume/../../etc/",
        "/?path=%2Fa%00b",
    ] {
        let (status, _, body) = send(fixture.app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(text(&body).contains("Invalid path"), "{uri}");
    }
}

#[tokio::test]
async fn downloads_file_as_attachment() {
    let fixture = Fixture::new();
    let (status, headers, body) = send(fixture.app(), "/download?path=/notes.txt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"hello notes");
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain");
    assert_eq!(headers[header::CONTENT_LENGTH], "11");
    assert!(
        headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("attachment; filename=\"notes.txt\"")
    );
}

#[tokio::test]
async fn download_accepts_paths_without_leading_separator() {
    let fixture = Fixture::new();
    let (status, headers, body) = send(fixture.app(), "/download?path=resume/cv.pdf").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"%PDF-1.4 resume");
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
}

#[tokio::test]
async fn download_of_unknown_type_is_octet_stream() {
    let fixture = Fixture::new();
    let (status, headers, body) = send(fixture.app(), "/download?path=/archive.bin").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, vec![0u8, 159, 146, 150]);
    assert_eq!(headers[header::CONTENT_TYPE], "application/octet-stream");
}

#[tokio::test]
async fn download_never_escapes_root() {
    let fixture = Fixture::new();
    for uri in [
        "/download?path=../secret.txt",
        "/download?path=/../secret.txt",
        "/download?path=../../etc/passwd",
        "/download?path=resume/../../secret.txt",
        "/download?path=%2F..%2Fsecret.txt",
    ] {
        let (status, _, body) = send(fixture.app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(!text(&body).contains(SECRET), "{uri}");
    }
}

#[tokio::test]
async fn backslash_and_drive_segments_never_escape_root() {
    let fixture = Fixture::new();
    for uri in [
        "/download?path=resume%5C..%5C..%5Csecret.txt",
        "/download?path=C:%5C..%5Csecret.txt",
        "/?path=%2FD:%2F",
    ] {
        let (status, _, body) = send(fixture.app(), uri).await;
        assert_ne!(status, StatusCode::OK, "{uri}");
        assert!(!text(&body).contains(SECRET), "{uri}");
    }
}

#[cfg(unix)]
#[tokio::test]
async fn listed_backslash_name_downloads() {
    let fixture = Fixture::new();
    fs::write(fixture.root.path().join("a\\b.txt"), b"literal").unwrap();

    let (_, _, listing) = send(fixture.app(), "/").await;
    let html = text(&listing);
    assert!(html.contains(">a\\b.txt<"));
    assert!(html.contains("/download?path=%2Fa%5Cb.txt"));

    let (status, _, body) = send(fixture.app(), "/download?path=%2Fa%5Cb.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"literal");
}

#[tokio::test]
async fn download_traversal_inside_root_is_allowed() {
    let fixture = Fixture::new();
    let (status, _, body) = send(fixture.app(), "/download?path=resume/test/../../notes.txt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"hello notes");
}

#[tokio::test]
async fn download_requires_path_parameter() {
    let fixture = Fixture::new();
    let (status, _, body) = send(fixture.app(), "/download").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text(&body).contains("path"));
}

#[tokio::test]
async fn download_of_missing_file_or_directory_is_not_found() {
    let fixture = Fixture::new();
    for uri in [
        "/download?path=/missing.txt",
        "/download?path=/resume/",
        "/download?path=/",
    ] {
        let (status, _, _) = send(fixture.app(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let fixture = Fixture::new();
    let (status, _, body) = send(fixture.app(), "/upload").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(text(&body).contains("/upload"));
}

#[tokio::test]
async fn handler_panic_becomes_internal_error() {
    async fn explode() -> &'static str {
        panic!("handler exploded")
    }

    let app = with_middleware(Router::new().route("/boom", get(explode)));

    let (status, _, body) = send(app, "/boom").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(text(&body).contains("500"));
}

#[tokio::test]
async fn serves_over_tcp_until_shutdown() {
    let fixture = Fixture::new();
    let config = ServerConfig {
        bind_address: "127.0.0.1".into(),
        port: 0,
        server_root: fixture.root.path().display().to_string(),
    };

    let server = Server::bind(&config).await.expect("bind");
    let addr = server.local_addr();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.run_until(async move {
        let _ = stop_rx.await;
    }));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /?path=/resume/ HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let response = text(&raw);

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("Index of /resume/"));

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn bind_fails_for_missing_root() {
    let dir = TempDir::new().unwrap();
    let config = ServerConfig {
        bind_address: "127.0.0.1".into(),
        port: 0,
        server_root: dir.path().join("absent").display().to_string(),
    };

    assert!(Server::bind(&config).await.is_err());
}

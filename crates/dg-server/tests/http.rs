//! End-to-end HTTP tests against a live listener.

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::net::SocketAddr;

use camino::{Utf8Path, Utf8PathBuf};
use dg_core::{Column, Config, GridConfig, ServerConfig};
use dg_server::{AppState, LISTING_UNAVAILABLE_MESSAGE, build_router};
use serde_json::Value;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

struct Fixture {
    _dir: TempDir,
    base: Utf8PathBuf,
    root: Utf8PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let base = Utf8PathBuf::from_path_buf(fs::canonicalize(dir.path()).unwrap()).unwrap();
        let root = base.join("docs");
        fs::create_dir_all(root.join("2024")).unwrap();

        fs::write(root.join("202401_Invoice.pdf"), "%PDF-1.4").unwrap();
        fs::write(root.join("2024/202403_Invoice.pdf"), "%PDF-1.4").unwrap();
        fs::write(root.join("2024/202403_Invoice.txt"), "<b>march</b>").unwrap();
        fs::write(root.join("202402_Bank.csv"), "date,amount\n2024-02-01,10\n").unwrap();
        fs::write(root.join("202402_Payroll.xlsx"), "xlsx bytes").unwrap();
        fs::write(root.join("202401_Notes.docx"), "docx").unwrap();
        fs::write(root.join("readme.txt"), "hello").unwrap();
        fs::write(base.join("secret.txt"), "top secret").unwrap();

        Self {
            _dir: dir,
            base,
            root,
        }
    }

    fn config(&self) -> Config {
        Config {
            grids: vec![
                GridConfig::new("main", self.root.clone()),
                GridConfig::new("support", self.root.clone()).with_dictionary(vec![
                    Column::new("Invoice", "Invoices"),
                    Column::new("Receipt", "Receipts"),
                ]),
                GridConfig::new("periodic", self.base.join("missing")),
            ],
            ..Config::default()
        }
    }
}

async fn spawn(config: Config) -> SocketAddr {
    let app = build_router(AppState::new(config).unwrap());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn send_raw(addr: SocketAddr, path: &str) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(req.as_bytes()).await.expect("write request");
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.expect("read response");
    let response = String::from_utf8_lossy(&response).into_owned();
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, head.to_owned(), body.to_owned())
}

fn query(path: &Utf8Path) -> String {
    urlencoding::encode(path.as_str()).into_owned()
}

fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.eq_ignore_ascii_case(name).then(|| value.trim())
    })
}

#[tokio::test]
async fn test_status_reports_dynamic_grid() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let (status, head, body) = send_raw(addr, "/api/status?type=main").await;
    assert_eq!(status, 200);
    assert!(header(&head, "content-type").is_some_and(|v| v.starts_with("application/json")));

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["months"], serde_json::json!(["202401", "202402", "202403"]));

    let keys: Vec<&str> = json["columns"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["key"].as_str())
        .collect();
    assert_eq!(keys, ["Bank", "Invoice", "Payroll"]);

    let rows = json["grid"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["month"], "202401");
    assert_eq!(rows[0]["Invoice"]["count"], 1);
    assert_eq!(rows[0]["Bank"]["count"], 0);
    assert_eq!(rows[2]["Invoice"]["count"], 2);
    assert_eq!(rows[2]["Invoice"]["exts"], serde_json::json!([".pdf", ".txt"]));

    let unprocessed = json["unprocessedFiles"].as_array().unwrap();
    assert_eq!(unprocessed.len(), 2);
}

#[tokio::test]
async fn test_status_defaults_to_first_grid() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let (_, _, with_type) = send_raw(addr, "/api/status?type=main").await;
    let (status, _, without) = send_raw(addr, "/api/status").await;
    assert_eq!(status, 200);
    assert_eq!(with_type, without);
}

#[tokio::test]
async fn test_status_dictionary_grid() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let (status, _, body) = send_raw(addr, "/api/status?type=support").await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).unwrap();

    let labels: Vec<&str> = json["columns"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["label"].as_str())
        .collect();
    assert_eq!(labels, ["Invoices", "Receipts"]);
    assert_eq!(json["grid"][2]["Invoice"]["count"], 2);
    assert_eq!(json["grid"][2]["Receipt"]["count"], 0);
}

#[tokio::test]
async fn test_status_unknown_grid_is_bad_request() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let (status, _, body) = send_raw(addr, "/api/status?type=quarterly").await;
    assert_eq!(status, 400);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("quarterly"));
}

#[tokio::test]
async fn test_status_missing_root_is_server_error() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let (status, _, body) = send_raw(addr, "/api/status?type=periodic").await;
    assert_eq!(status, 500);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "error": LISTING_UNAVAILABLE_MESSAGE }));
}

#[tokio::test]
async fn test_grids_lists_configured_grids() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let (status, _, body) = send_raw(addr, "/api/grids").await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|g| g["name"].as_str())
        .collect();
    assert_eq!(names, ["main", "support", "periodic"]);
}

#[tokio::test]
async fn test_view_text_file() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let file = fixture.root.join("2024/202403_Invoice.txt");
    let (status, head, body) = send_raw(addr, &format!("/view?file={}", query(&file))).await;
    assert_eq!(status, 200);
    assert!(header(&head, "content-type").is_some_and(|v| v.starts_with("text/html")));
    assert!(body.contains("&lt;b&gt;march"));
    assert!(!body.contains("<b>march"));
}

#[tokio::test]
async fn test_view_csv_file() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let file = fixture.root.join("202402_Bank.csv");
    let (status, _, body) = send_raw(addr, &format!("/view?file={}", query(&file))).await;
    assert_eq!(status, 200);
    assert!(body.contains("<td>2024-02-01</td>"));
}

#[tokio::test]
async fn test_view_rejects_paths_outside_roots() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let direct = fixture.base.join("secret.txt");
    let (status, _, body) = send_raw(addr, &format!("/view?file={}", query(&direct))).await;
    assert_eq!(status, 403);
    assert!(!body.contains("top secret"));

    let traversal = Utf8PathBuf::from(format!("{}/../secret.txt", fixture.root));
    let (status, _, _) = send_raw(addr, &format!("/file?file={}", query(&traversal))).await;
    assert_eq!(status, 403);

    let missing = fixture.base.join("absent.txt");
    let (status, _, _) = send_raw(addr, &format!("/view?file={}", query(&missing))).await;
    assert_eq!(status, 403);
}

#[tokio::test]
async fn test_view_error_statuses() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let (status, _, _) = send_raw(addr, "/view").await;
    assert_eq!(status, 400);

    let (status, _, _) = send_raw(addr, "/view?file=").await;
    assert_eq!(status, 400);

    let docx = fixture.root.join("202401_Notes.docx");
    let (status, _, _) = send_raw(addr, &format!("/view?file={}", query(&docx))).await;
    assert_eq!(status, 415);

    let missing = fixture.root.join("202412_Invoice.pdf");
    let (status, _, _) = send_raw(addr, &format!("/view?file={}", query(&missing))).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_raw_file_download() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let file = fixture.root.join("202402_Payroll.xlsx");
    let (status, head, body) =
        send_raw(addr, &format!("/file?file={}&download=1", query(&file))).await;
    assert_eq!(status, 200);
    assert_eq!(body, "xlsx bytes");
    assert_eq!(header(&head, "content-length"), Some("10"));
    assert!(
        header(&head, "content-type")
            .is_some_and(|v| v.contains("spreadsheetml") || v.contains("octet-stream"))
    );
    assert!(
        header(&head, "content-disposition")
            .is_some_and(|v| v.contains("202402_Payroll_readonly.xlsx"))
    );
}

#[tokio::test]
async fn test_raw_file_inline() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let file = fixture.root.join("202401_Invoice.pdf");
    let (status, head, body) = send_raw(addr, &format!("/file?file={}", query(&file))).await;
    assert_eq!(status, 200);
    assert_eq!(body, "%PDF-1.4");
    assert_eq!(header(&head, "content-type"), Some("application/pdf"));
    assert!(header(&head, "content-disposition").is_none());
}

#[tokio::test]
async fn test_index_and_assets() {
    let fixture = Fixture::new();
    let addr = spawn(fixture.config()).await;

    let (status, _, body) = send_raw(addr, "/").await;
    assert_eq!(status, 200);
    assert!(body.contains("/app.js"));

    let (status, head, _) = send_raw(addr, "/app.js").await;
    assert_eq!(status, 200);
    assert!(header(&head, "content-type").is_some_and(|v| v.starts_with("text/javascript")));

    let (status, _, body) = send_raw(addr, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn test_routes_nest_under_base_path() {
    let fixture = Fixture::new();
    let config = Config {
        server: ServerConfig {
            base_path: "conta_check_docs/".to_owned(),
            ..ServerConfig::default()
        },
        ..fixture.config()
    };
    let addr = spawn(config).await;

    let (status, _, _) = send_raw(addr, "/conta_check_docs/health").await;
    assert_eq!(status, 200);

    let (status, _, body) = send_raw(addr, "/conta_check_docs/api/status?type=main").await;
    assert_eq!(status, 200);
    assert!(body.contains("\"months\""));

    let (status, _, body) = send_raw(addr, "/conta_check_docs").await;
    assert_eq!(status, 200);
    assert!(body.contains("conta_check_docs"));

    let (status, _, _) = send_raw(addr, "/health").await;
    assert_eq!(status, 404);
}

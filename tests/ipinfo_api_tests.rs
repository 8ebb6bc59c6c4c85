//! IP info endpoint tests
//!
//! Drives the actix app end to end with an in-memory region data source:
//! API key gate → header extraction → name resolution → JSON response.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use async_trait::async_trait;

use ipinfo::api::middleware::AccessLog;
use ipinfo::api::services::ipinfo_routes;
use ipinfo::errors::{IpInfoError, Result};
use ipinfo::services::region_data::{CountryEntry, RegionEntry};
use ipinfo::services::{IpInfo, IpInfoService, RegionDataLoader, RegionDataSource, RegionDataset};

// =============================================================================
// Test Setup
// =============================================================================

const API_KEY: &str = "test-key";

/// 数据源行为
enum Mode {
    Ok,
    HttpError(u16),
    Malformed,
    Broken,
}

/// Mock region data source with a fetch counter
struct MockSource {
    mode: Mode,
    calls: AtomicUsize,
}

impl MockSource {
    fn new(mode: Mode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn region(short_code: &str, name: &str) -> RegionEntry {
    RegionEntry {
        short_code: short_code.to_string(),
        name: name.to_string(),
    }
}

fn sample_dataset() -> RegionDataset {
    RegionDataset::new(vec![
        CountryEntry {
            country_short_code: "US".to_string(),
            country_name: "United States".to_string(),
            regions: vec![region("US-CA", "California"), region("WA", "Washington")],
        },
        CountryEntry {
            country_short_code: "CA".to_string(),
            country_name: "Canada".to_string(),
            regions: vec![region("CA-BC", "British Columbia")],
        },
    ])
}

#[async_trait]
impl RegionDataSource for MockSource {
    async fn fetch(&self) -> Result<RegionDataset> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            Mode::Ok => Ok(sample_dataset()),
            Mode::HttpError(status) => Err(IpInfoError::region_data_fetch(status)),
            Mode::Malformed => RegionDataset::from_json("<html>oops</html>"),
            Mode::Broken => Err(IpInfoError::internal("source invariant violated")),
        }
    }

    fn name(&self) -> &'static str {
        "Mock"
    }
}

/// Create a test app with the ipinfo routes mounted at `/`
macro_rules! ipinfo_app {
    ($source:expr) => {{
        let loader = Arc::new(RegionDataLoader::new($source.clone()));
        let service = Arc::new(IpInfoService::new(loader, API_KEY));

        test::init_service(
            App::new()
                .wrap(AccessLog)
                .app_data(web::Data::new(service))
                .service(ipinfo_routes("/")),
        )
        .await
    }};
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_missing_key_returns_401() {
    let source = MockSource::new(Mode::Ok);
    let app = ipinfo_app!(source);

    let req = TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"error": "Invalid or missing API key"}));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_wrong_key_returns_401_without_fetch() {
    let source = MockSource::new(Mode::Ok);
    let app = ipinfo_app!(source);

    let req = TestRequest::get()
        .uri("/?key=not-the-key")
        .insert_header(("x-vercel-ip-country", "US"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_empty_key_returns_401() {
    let source = MockSource::new(Mode::Ok);
    let app = ipinfo_app!(source);

    let req = TestRequest::get().uri("/?key=").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Resolution
// =============================================================================

#[tokio::test]
async fn test_country_and_region_enriched() {
    let source = MockSource::new(Mode::Ok);
    let app = ipinfo_app!(source);

    let req = TestRequest::get()
        .uri("/?key=test-key")
        .insert_header(("x-forwarded-for", "1.2.3.4, 5.6.7.8"))
        .insert_header(("x-vercel-ip-city", "San Francisco"))
        .insert_header(("x-vercel-ip-country", "us"))
        .insert_header(("x-vercel-ip-country-region", "US-CA"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("Cache-Control").unwrap().to_str().unwrap(),
        "no-store"
    );
    assert!(resp.headers().contains_key("x-request-id"));

    let info: IpInfo = test::read_body_json(resp).await;
    assert_eq!(
        info,
        IpInfo {
            ip: "1.2.3.4".to_string(),
            city: "San Francisco".to_string(),
            country_code: "US".to_string(),
            country_name: "United States".to_string(),
            region_code: "US-CA".to_string(),
            region: "California".to_string(),
        }
    );
}

#[tokio::test]
async fn test_region_suffix_fallback() {
    let source = MockSource::new(Mode::Ok);
    let app = ipinfo_app!(source);

    let req = TestRequest::get()
        .uri("/?key=test-key")
        .insert_header(("x-country", "CA"))
        .insert_header(("x-region", "BC"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let info: IpInfo = test::read_body_json(resp).await;
    assert_eq!(info.country_name, "Canada");
    assert_eq!(info.region_code, "BC");
    assert_eq!(info.region, "British Columbia");
}

#[tokio::test]
async fn test_unmatched_region_returns_normalized_code() {
    let source = MockSource::new(Mode::Ok);
    let app = ipinfo_app!(source);

    let req = TestRequest::get()
        .uri("/?key=test-key")
        .insert_header(("x-country", "US"))
        .insert_header(("x-region", "US-TX"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let info: IpInfo = test::read_body_json(resp).await;
    assert_eq!(info.region_code, "US-TX");
    assert_eq!(info.region, "TX");
}

#[tokio::test]
async fn test_unknown_country_passthrough_without_fetch() {
    let source = MockSource::new(Mode::Ok);
    let app = ipinfo_app!(source);

    let req = TestRequest::get()
        .uri("/?key=test-key")
        .peer_addr("9.9.9.9:40000".parse().unwrap())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let info: IpInfo = test::read_body_json(resp).await;
    assert_eq!(info.ip, "9.9.9.9");
    assert_eq!(info.city, "Unknown");
    assert_eq!(info.country_code, "Unknown");
    assert_eq!(info.country_name, "Unknown");
    assert_eq!(info.region_code, "Unknown");
    assert_eq!(info.region, "Unknown");
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_unmatched_country_passthrough() {
    let source = MockSource::new(Mode::Ok);
    let app = ipinfo_app!(source);

    let req = TestRequest::get()
        .uri("/?key=test-key")
        .insert_header(("x-country", "fr"))
        .insert_header(("x-region", "FR-IDF"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let info: IpInfo = test::read_body_json(resp).await;
    assert_eq!(info.ip, "Unknown");
    assert_eq!(info.country_code, "FR");
    assert_eq!(info.country_name, "FR");
    assert_eq!(info.region, "FR-IDF");
}

// =============================================================================
// Degradation
// =============================================================================

#[tokio::test]
async fn test_upstream_http_error_still_returns_200() {
    let source = MockSource::new(Mode::HttpError(503));
    let app = ipinfo_app!(source);

    let req = TestRequest::get()
        .uri("/?key=test-key")
        .insert_header(("x-country", "US"))
        .insert_header(("x-region", "US-CA"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let info: IpInfo = test::read_body_json(resp).await;
    assert_eq!(info.country_name, "US");
    assert_eq!(info.region, "US-CA");
}

#[tokio::test]
async fn test_malformed_dataset_still_returns_200_and_retries() {
    let source = MockSource::new(Mode::Malformed);
    let app = ipinfo_app!(source);

    for _ in 0..2 {
        let req = TestRequest::get()
            .uri("/?key=test-key")
            .insert_header(("x-country", "CA"))
            .insert_header(("x-region", "CA-BC"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let info: IpInfo = test::read_body_json(resp).await;
        assert_eq!(info.country_name, "CA");
        assert_eq!(info.region, "CA-BC");
    }

    // 失败不缓存，每个请求都会重新尝试
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_non_dataset_error_returns_500() {
    let source = MockSource::new(Mode::Broken);
    let app = ipinfo_app!(source);

    let req = TestRequest::get()
        .uri("/?key=test-key")
        .insert_header(("x-country", "US"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"error": "Internal Server Error"}));
}

#[tokio::test]
async fn test_dataset_fetched_once_across_requests() {
    let source = MockSource::new(Mode::Ok);
    let app = ipinfo_app!(source);

    for _ in 0..5 {
        let req = TestRequest::get()
            .uri("/?key=test-key")
            .insert_header(("x-country", "US"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(source.calls(), 1);
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_legacy_path_is_served() {
    let source = MockSource::new(Mode::Ok);
    let app = ipinfo_app!(source);

    let req = TestRequest::get()
        .uri("/api/ipinfo?key=test-key")
        .insert_header(("x-country", "US"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let info: IpInfo = test::read_body_json(resp).await;
    assert_eq!(info.country_name, "United States");
}

#[tokio::test]
async fn test_unknown_path_returns_404() {
    let source = MockSource::new(Mode::Ok);
    let app = ipinfo_app!(source);

    let req = TestRequest::get().uri("/nope?key=test-key").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

//! Router integration tests.
//!
//! Exercises the HTTP surface in-process with hand-built multipart bodies.
//! Font-dependent endpoints are tested for their failure contract only: the
//! test state points font discovery at an empty directory, so text rendering
//! deterministically reports "no fonts available" regardless of the host.

use std::io::Cursor;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use ukiyo::config::Config;
use ukiyo::server::{build_router, AppState};

const BOUNDARY: &str = "ukiyo-test-boundary";

/// Incremental multipart/form-data body builder.
struct MultipartBody {
    data: Vec<u8>,
}

impl MultipartBody {
    fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn field(mut self, name: &str, value: &str) -> Self {
        self.data
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.data.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.data.extend_from_slice(value.as_bytes());
        self.data.extend_from_slice(b"\r\n");
        self
    }

    fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.data
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.data.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        self.data
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        self.data.extend_from_slice(bytes);
        self.data.extend_from_slice(b"\r\n");
        self
    }

    fn build(mut self) -> Vec<u8> {
        self.data
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.data
    }
}

fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([255, 0, 0, 255])
        } else {
            image::Rgba([0, 0, 255, 255])
        }
    });

    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

/// Router wired to a temp directory: a generated certificate template and an
/// empty font search path.
fn test_router(dir: &tempfile::TempDir) -> Router {
    let template_path = dir.path().join("certificate.png");
    std::fs::write(&template_path, encode_png(200, 100)).unwrap();

    let empty_fonts = dir.path().join("fonts");
    std::fs::create_dir_all(&empty_fonts).unwrap();

    let mut config = Config::default();
    config.assets.certificate_template = template_path;
    config.fonts.search_paths = vec![empty_fonts];
    config.fonts.cache_dir = dir.path().join("font-cache");

    build_router(AppState::new(config).unwrap())
}

fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

#[tokio::test]
async fn hello_returns_plaintext() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let response = router
        .oneshot(Request::get("/hello").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"Hello, world!");
}

#[tokio::test]
async fn index_lists_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("/demo/resize"));
    assert!(body.contains("/demo/certificate"));
}

#[tokio::test]
async fn engine_version_is_plaintext() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let response = router
        .oneshot(Request::get("/engine/version").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.starts_with("ukiyo "));
}

#[tokio::test]
async fn resize_width_only_preserves_aspect_ratio() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .field("width", "4")
        .field("fit", "inside")
        .file("image", "img.png", "image/png", &encode_png(8, 4))
        .build();

    let response = router
        .oneshot(multipart_request("/demo/resize", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );

    let decoded = image::load_from_memory(&body_bytes(response).await).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 2));
}

#[tokio::test]
async fn resize_unknown_fit_degrades_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .field("width", "4")
        .field("fit", "stretchy")
        .file("image", "img.png", "image/png", &encode_png(8, 4))
        .build();

    let response = router
        .oneshot(multipart_request("/demo/resize", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn resize_missing_image_field_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new().field("width", "4").build();

    let response = router
        .oneshot(multipart_request("/demo/resize", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn convert_to_png() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .field("format", "png")
        .field("quality", "90")
        .file("image", "img.png", "image/png", &encode_png(4, 4))
        .build();

    let response = router
        .oneshot(multipart_request("/demo/convert", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let bytes = body_bytes(response).await;
    assert_eq!(&bytes[0..4], &[0x89, 0x50, 0x4E, 0x47]);
}

#[tokio::test]
async fn convert_unknown_format_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .field("format", "tga")
        .file("image", "img.png", "image/png", &encode_png(4, 4))
        .build();

    let response = router
        .oneshot(multipart_request("/demo/convert", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rotate_quarter_turn_swaps_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .field("angle", "90")
        .file("image", "img.png", "image/png", &encode_png(8, 4))
        .build();

    let response = router
        .oneshot(multipart_request("/demo/rotate", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let decoded = image::load_from_memory(&body_bytes(response).await).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 8));
}

#[tokio::test]
async fn rotate_unsupported_angle_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .field("angle", "45")
        .file("image", "img.png", "image/png", &encode_png(8, 4))
        .build();

    let response = router
        .oneshot(multipart_request("/demo/rotate", body))
        .await
        .unwrap();

    // Unsupported angle: HTTP 200 with the image re-encoded unrotated
    assert_eq!(response.status(), StatusCode::OK);
    let decoded = image::load_from_memory(&body_bytes(response).await).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (8, 4));
}

#[tokio::test]
async fn metadata_reports_basic_fields() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .file("image", "img.png", "image/png", &encode_png(6, 4))
        .build();

    let response = router
        .oneshot(multipart_request("/demo/metadata", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).unwrap();

    assert_eq!(json["width"], 6);
    assert_eq!(json["height"], 4);
    assert_eq!(json["channels"], 4);
    assert_eq!(json["hasAlpha"], true);
    assert_eq!(json["format"], "png");
}

#[tokio::test]
async fn api_metadata_reports_extended_fields() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .file("image", "img.png", "image/png", &encode_png(6, 4))
        .build();

    let response = router
        .oneshot(multipart_request("/api/metadata", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).unwrap();

    assert_eq!(json["space"], "srgb");
    assert_eq!(json["pages"], 1);
    assert!(json["orientation"].is_null());
}

#[tokio::test]
async fn composite_blends_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .field("x", "2")
        .field("y", "2")
        .field("mode", "over")
        .field("opacity", "0.5")
        .file("baseImage", "base.png", "image/png", &encode_png(8, 8))
        .file("overlayImage", "overlay.png", "image/png", &encode_png(2, 2))
        .build();

    let response = router
        .oneshot(multipart_request("/demo/composite", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let decoded = image::load_from_memory(&body_bytes(response).await).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (8, 8));
}

#[tokio::test]
async fn process_combines_resize_rotate_convert() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .field("width", "4")
        .field("angle", "90")
        .field("format", "png")
        .file("image", "img.png", "image/png", &encode_png(8, 4))
        .build();

    let response = router
        .oneshot(multipart_request("/api/images/process", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );

    // Resized to 4x2, then rotated 90: 2x4
    let decoded = image::load_from_memory(&body_bytes(response).await).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (2, 4));
}

#[tokio::test]
async fn text_without_fonts_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .field("text", "Hi")
        .file("image", "img.png", "image/png", &encode_png(8, 8))
        .build();

    let response = router
        .oneshot(multipart_request("/demo/text", body))
        .await
        .unwrap();

    // No font/fontUrl supplied and the search path holds no fonts
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(message.contains("font"));
}

#[tokio::test]
async fn text_with_bad_font_url_scheme_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let body = MultipartBody::new()
        .field("text", "Hi")
        .field("fontUrl", "ftp://fonts.example.com/a.ttf")
        .file("image", "img.png", "image/png", &encode_png(8, 8))
        .build();

    let response = router
        .oneshot(multipart_request("/demo/text", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn certificate_without_name_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let response = router
        .oneshot(
            Request::get("/demo/certificate")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn certificate_without_fonts_reports_client_error() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(&dir);

    let response = router
        .oneshot(
            Request::get("/demo/certificate?name=Ada")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The template loads, but the test state has no fonts to draw with
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

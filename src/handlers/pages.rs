//! Informational pages: the demo index, hello, and the engine version.

use axum::response::Html;
use maud::{html, DOCTYPE};

/// GET / - demo landing page listing the available endpoints.
pub async fn index() -> Html<String> {
    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "ukiyo - image manipulation service" }
                style {
                    "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}"
                    "code{background:#f0f0f0;padding:0.1rem 0.3rem;border-radius:3px}"
                    "li{margin:0.4rem 0}"
                }
            }
            body {
                h1 { "ukiyo" }
                p { "Image manipulation over multipart/form-data." }
                h2 { "Demo endpoints" }
                ul {
                    li { code { "POST /demo/text" } " - overlay styled text on an image" }
                    li { code { "POST /demo/resize" } " - resize with cover/fill/inside fit" }
                    li { code { "POST /demo/convert" } " - convert between jpeg/png/webp/gif" }
                    li { code { "POST /demo/rotate" } " - rotate by 90/180/270 degrees" }
                    li { code { "POST /demo/metadata" } " - basic image metadata as JSON" }
                    li { code { "POST /demo/composite" } " - blend an overlay onto a base image" }
                    li { code { "GET /demo/certificate?name=..." } " - render a named certificate" }
                }
                h2 { "API endpoints" }
                ul {
                    li { code { "POST /api/metadata" } " - extended metadata (EXIF, pages)" }
                    li { code { "POST /api/images/process" } " - resize + rotate + convert in one call" }
                }
            }
        }
    };

    Html(markup.into_string())
}

/// GET /hello
pub async fn hello() -> &'static str {
    "Hello, world!"
}

/// GET /engine/version - plaintext version of the service and its imaging
/// engine.
pub async fn engine_version() -> String {
    format!("ukiyo {} (image-rs engine)", env!("CARGO_PKG_VERSION"))
}

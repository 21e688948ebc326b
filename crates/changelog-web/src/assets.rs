//! Embedded stylesheet and script.

use axum::http::header;
use axum::response::IntoResponse;

/// Site stylesheet.
pub const STYLE_CSS: &str = include_str!("../assets/style.css");

/// Search-as-you-type, lightbox keys, and scroll-to-top.
pub const APP_JS: &str = include_str!("../assets/app.js");

const CACHE_CONTROL: &str = "public, max-age=3600";

/// `GET /assets/style.css`
pub async fn style() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        STYLE_CSS,
    )
}

/// `GET /assets/app.js`
pub async fn script() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        APP_JS,
    )
}

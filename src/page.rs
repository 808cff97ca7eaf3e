use axum::response::Html;

/// Browser form for uploading an image and showing its caption.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

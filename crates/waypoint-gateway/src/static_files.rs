use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "ui/"]
struct UiAssets;

const PLAYGROUND: &str = "playground.html";

// GET /graphql
pub async fn playground() -> impl IntoResponse {
    match UiAssets::get(PLAYGROUND) {
        Some(content) => {
            let mime = mime_guess::from_path(PLAYGROUND)
                .first_or_octet_stream()
                .to_string();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime)],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

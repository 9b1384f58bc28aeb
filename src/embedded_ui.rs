use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    routing::get,
    Router,
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "public/"]
#[prefix = ""]
struct EmbeddedUi;

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>404 Not Found</title></head>
<body>
<h1>404 - Not Found</h1>
<p>The requested file was not found.</p>
<p><a href="/">Go to the dashboard</a></p>
</body>
</html>"#;

fn content_type(path: &str) -> String {
    use mime_guess::mime;

    let guessed = mime_guess::from_path(path).first_or_octet_stream();
    if guessed.type_() == mime::TEXT || guessed.subtype() == mime::JAVASCRIPT {
        format!("{guessed}; charset=utf-8")
    } else {
        guessed.to_string()
    }
}

async fn serve_embedded_file(req: Request<Body>) -> Response<Body> {
    let path = req.uri().path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    if let Some(content) = EmbeddedUi::get(file_path) {
        let built = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type(file_path))
            .header(header::CACHE_CONTROL, "no-cache")
            .body(Body::from(content.data.into_owned()));
        if let Ok(response) = built {
            return response;
        }
    }

    let mut response = Response::new(Body::from(NOT_FOUND_PAGE));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

pub fn embedded_ui_router() -> Router {
    Router::new().fallback(get(serve_embedded_file))
}

pub fn has_embedded_ui() -> bool {
    EmbeddedUi::get("index.html").is_some()
}

pub fn list_embedded_files() -> Vec<String> {
    EmbeddedUi::iter().map(|f| f.to_string()).collect()
}

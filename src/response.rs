// src/response.rs
use std::path::Path;

use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use lol_html::{HtmlRewriter, Settings, element, html_content::ContentType};
use maud::Markup;
use tokio::fs;
use tokio_util::bytes::Bytes;

use crate::errors::AppError;

/// Wczytuje szkielet strony i wstawia treść do `#content`.
/// Usuwa atrybuty htmx placeholdera, żeby htmx nie ładował treści drugi raz.
async fn serve_full_page(static_dir: &str, content_markup: Markup) -> Result<Response, AppError> {
    let shell_path = Path::new(static_dir).join("index.html");
    let shell_content = match fs::read(&shell_path).await {
        Ok(bytes) => Bytes::from(bytes),
        Err(e) => {
            tracing::error!(
                "Nie można wczytać pliku szablonu {}: {}",
                shell_path.display(),
                e
            );
            return Err(AppError::InternalServerError(
                "Błąd wczytywania szablonu strony".to_string(),
            ));
        }
    };

    let content_string = content_markup.into_string();
    let mut response_body = Vec::new();

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("#content", |el| {
                el.set_inner_content(&content_string, ContentType::Html);
                el.remove_attribute("hx-trigger");
                el.remove_attribute("hx-get");
                Ok(())
            })],
            ..Settings::default()
        },
        |c: &[u8]| response_body.extend_from_slice(c),
    );

    rewriter.write(&shell_content).map_err(template_error)?;
    rewriter.end().map_err(template_error)?;

    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        response_body,
    )
        .into_response())
}

fn template_error(e: lol_html::errors::RewritingError) -> AppError {
    AppError::InternalServerError(format!("Błąd przetwarzania szablonu strony: {}", e))
}

/// Żądania htmx dostają sam fragment, pełne odświeżenie (F5) całą stronę.
pub async fn build_response(
    headers: &HeaderMap,
    static_dir: &str,
    page_content: Markup,
) -> Result<Response, AppError> {
    if headers.contains_key("HX-Request") {
        Ok(page_content.into_response())
    } else {
        serve_full_page(static_dir, page_content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::HeaderValue;
    use maud::html;
    use std::time::{SystemTime, UNIX_EPOCH};

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    fn temp_static_dir() -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("planets_grid_static_{suffix}"));
        std::fs::create_dir_all(&dir).expect("temp dir");
        dir
    }

    #[tokio::test]
    async fn htmx_request_gets_fragment_only() {
        let mut headers = HeaderMap::new();
        headers.insert("HX-Request", HeaderValue::from_static("true"));

        let response = build_response(&headers, "does-not-exist", html! { p { "fragment" } })
            .await
            .expect("response");
        assert_eq!(body_text(response).await, "<p>fragment</p>");
    }

    #[tokio::test]
    async fn full_page_injects_content_into_shell() {
        let dir = temp_static_dir();
        std::fs::write(
            dir.join("index.html"),
            r#"<html><body><main id="content" hx-get="/htmx/planets" hx-trigger="load"></main></body></html>"#,
        )
        .expect("shell");

        let response = build_response(
            &HeaderMap::new(),
            dir.to_str().expect("path"),
            html! { p { "grid" } },
        )
        .await
        .expect("response");
        let body = body_text(response).await;

        assert!(body.contains("<p>grid</p>"), "{body}");
        assert!(!body.contains("hx-get"), "{body}");
        std::fs::remove_dir_all(dir).expect("cleanup");
    }

    #[tokio::test]
    async fn missing_shell_is_internal_error() {
        let err = build_response(&HeaderMap::new(), "does-not-exist", html! {})
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InternalServerError(_)));
    }
}

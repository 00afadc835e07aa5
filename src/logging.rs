use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Middleware that writes every request and the body of its response to the log.
pub async fn log_exchange(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("{method} {uri} failed to buffer the response body: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log::info!(
        "{method} {uri} {} {}",
        parts.status.as_u16(),
        String::from_utf8_lossy(&bytes)
    );

    Response::from_parts(parts, Body::from(bytes))
}

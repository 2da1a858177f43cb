use axum::{extract::Request, middleware::Next, response::Response};
use relay_core::context::RequestContext;

/// Middleware that injects a `RequestContext` as an axum Extension.
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
    let ctx = RequestContext::new(client_ip(&request));
    request.extensions_mut().insert(ctx);
    next.run(request).await
}

/// First hop of `x-forwarded-for`, else `x-real-ip`.
fn client_ip(request: &Request) -> Option<String> {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or("").trim().to_string())
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            request
                .headers()
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
}

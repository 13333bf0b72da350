use std::panic::AssertUnwindSafe;

use anyhow::anyhow;
use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use futures::FutureExt;

use crate::routes::internal_server_error;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(request: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(_) => internal_server_error(anyhow!("request handler panicked")),
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::StatusCode, routing};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn panic_becomes_internal_server_error() {
        // Arrange
        let sut = add(Router::new().route(
            "/",
            routing::get(|| async {
                if true {
                    panic!("boom");
                }
                "unreachable"
            }),
        ));

        // Act
        let response = sut
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

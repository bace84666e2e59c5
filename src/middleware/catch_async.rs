//! Panic containment for request handlers.
//!
//! A handler that returns `Err` is already forwarded to the error
//! middleware. A handler that panics would otherwise drop the connection
//! without a response or a log line; [`catch_async`] turns the panic into a
//! [`RawError::Unexpected`] and forwards it like any other failure.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use anyhow::anyhow;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bastion_core::RawError;
use futures::FutureExt;

/// Runs `future`, converting both its error and any panic into a
/// [`RawError`].
pub async fn catch_unwind_future<F, T, E>(future: F) -> Result<T, RawError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<RawError>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result.map_err(Into::into),
        Err(payload) => Err(RawError::Unexpected(anyhow!(
            "handler panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

/// Middleware form of [`catch_unwind_future`] wrapping the rest of the chain.
pub async fn catch_async(req: Request, next: Next) -> Response {
    catch_unwind_future(async move { Ok::<_, RawError>(next.run(req).await) })
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// Text of a panic payload; `panic!` produces either a `&str` or a `String`.
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

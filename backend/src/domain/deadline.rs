//! Explicit deadlines around store and collaborator calls.
//!
//! Every port call a domain service makes goes through [`store_call`], so a
//! hung backing store surfaces as a `service_unavailable` error instead of a
//! request that never completes.

use std::future::Future;
use std::time::Duration;

use serde_json::json;
use tokio::time::timeout;

use super::error::Error;

/// Deadline applied to every store/collaborator call.
pub(crate) const STORE_CALL_DEADLINE: Duration = Duration::from_secs(10);

/// Run a fallible port call under [`STORE_CALL_DEADLINE`].
pub(crate) async fn store_call<T, E>(
    fut: impl Future<Output = Result<T, E>>,
    map_err: impl FnOnce(E) -> Error,
) -> Result<T, Error> {
    store_call_with_deadline(STORE_CALL_DEADLINE, fut, map_err).await
}

async fn store_call_with_deadline<T, E>(
    deadline: Duration,
    fut: impl Future<Output = Result<T, E>>,
    map_err: impl FnOnce(E) -> Error,
) -> Result<T, Error> {
    match timeout(deadline, fut).await {
        Ok(result) => result.map_err(map_err),
        Err(_) => Err(Error::service_unavailable("store call exceeded its deadline")
            .with_details(json!({ "code": "store_timeout" }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn passes_through_success() {
        let result = store_call(async { Ok::<_, String>(7) }, Error::internal).await;
        assert_eq!(result.expect("success"), 7);
    }

    #[tokio::test]
    async fn maps_errors_through_the_provided_mapper() {
        let err = store_call(async { Err::<u32, _>("boom".to_owned()) }, Error::internal)
            .await
            .expect_err("mapped error");
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "boom");
    }

    #[tokio::test]
    async fn expiry_surfaces_as_store_timeout() {
        let err = store_call_with_deadline(
            Duration::ZERO,
            std::future::pending::<Result<u32, String>>(),
            Error::internal,
        )
        .await
        .expect_err("deadline must expire");
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
        assert_eq!(err.detail_code(), Some("store_timeout"));
    }
}

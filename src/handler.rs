//! Callback delivery for callers that do not await results directly.

use std::future::Future;

/// Awaits `operation` and hands its result to `handler`.
///
/// The handler sees exactly what awaiting the operation would have
/// returned, validation failures included.
pub async fn respond_to<T, E, F>(operation: impl Future<Output = Result<T, E>>, handler: F)
where
    F: FnOnce(Result<T, E>),
{
    handler(operation.await)
}

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::error::AppError;

/// Applies `apply` to the shared state right away, then awaits `commit`.
///
/// `apply` returns whatever `revert` needs to undo exactly its own change.
/// If `commit` fails or does not finish within `deadline`, `revert` runs
/// against the current state, so changes others made in the meantime stay.
/// `apply` must leave the state untouched when it returns an error.
pub async fn optimistic_update<T, U, R, A, V, F>(
    state: &Mutex<T>,
    apply: A,
    revert: V,
    commit: F,
    deadline: Duration,
) -> Result<R, AppError>
where
    A: FnOnce(&mut T) -> Result<U, AppError>,
    V: FnOnce(&mut T, U),
    F: Future<Output = Result<R, AppError>>,
{
    let undo = {
        let mut guard = state.lock().await;
        apply(&mut *guard)?
    };

    let outcome = match tokio::time::timeout(deadline, commit).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(format!(
            "no response within {} ms",
            deadline.as_millis()
        ))),
    };

    if let Err(e) = &outcome {
        tracing::warn!("rolling back optimistic update: {}", e);
        let mut guard = state.lock().await;
        revert(&mut *guard, undo);
    }

    outcome
}

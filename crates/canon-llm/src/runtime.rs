//! Bridge from the synchronous provider traits to async HTTP

use crate::LlmError;
use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Builder, Handle, Runtime};

static FALLBACK: OnceLock<Runtime> = OnceLock::new();

/// Drive `future` to completion from synchronous code
///
/// On a blocking-pool thread the caller's runtime is reused. Outside any
/// runtime a process-wide current-thread runtime is built on first use.
/// Must not be called from an async worker thread.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, LlmError> {
    if let Ok(handle) = Handle::try_current() {
        return Ok(handle.block_on(future));
    }

    let runtime = match FALLBACK.get() {
        Some(runtime) => runtime,
        None => {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
            FALLBACK.get_or_init(|| runtime)
        }
    };
    Ok(runtime.block_on(future))
}

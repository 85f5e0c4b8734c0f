pub mod aoss;
pub mod iam;
pub mod s3;
pub mod sts;

use std::future::Future;

use aws_sdk_sts::error::DisplayErrorContext;
use kb_lifecycle_core::error::{ServiceError, ServiceErrorKind};

/// Runs an SDK future to completion from synchronous port code. Requires a
/// multi-threaded tokio runtime.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Wraps an SDK failure, keeping the full source chain in the message.
pub(crate) fn sdk_failure(
    operation: &'static str,
    kind: ServiceErrorKind,
    error: &(dyn std::error::Error + 'static),
) -> ServiceError {
    ServiceError::new(operation, kind, DisplayErrorContext(error).to_string())
}

pub(crate) fn kind_when(matches: bool, kind: ServiceErrorKind) -> ServiceErrorKind {
    if matches {
        kind
    } else {
        ServiceErrorKind::Other
    }
}

//! Maestro Executor
//!
//! Runs a normalized workflow definition to completion against an injected
//! [`ActivityInvoker`]. The scheduler is a single logical thread of control
//! that suspends at exactly one kind of point: "wait for the FIRST of the
//! current in-flight set to finish". Newly unblocked successors start the
//! moment their last parent completes, before siblings of the same wave
//! finish, so independent branches overlap without static staging.
//!
//! Failure policy is the opposite of the normalizer's: fail fast. A confused
//! graph risks out-of-order side-effecting remote calls, so a cycle or an
//! unreachable parent aborts the run ([`ExecutionError::DeadlockDetected`])
//! and the first remote failure aborts it too
//! ([`ExecutionError::ActivityFailed`]), without awaiting in-flight siblings.
//!
//! There is no retry, no timeout enforcement, no cancellation, and no
//! concurrency cap here; retryPolicy and timeoutSeconds ride along as
//! advisory data for the invoker.

mod error;
mod executor;
mod input;
mod invoker;
mod result;

pub use error::ExecutionError;
pub use executor::execute;
pub use input::{resolve_inputs, substitute};
pub use invoker::{ActivityCall, ActivityInvoker, InvocationError};
pub use result::{ExecutionResult, ResultTable};

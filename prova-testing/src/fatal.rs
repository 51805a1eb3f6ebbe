//! Process termination for unrecoverable allocation failures
//!
//! The failure-message buffer and the per-suite result buffer are the only
//! two allocations whose failure cannot be reported as a test outcome:
//! reporting itself needs that memory. Both sites call
//! [`allocation_failure`], which never returns.

use tracing::error;

/// Diagnostic printed before exiting.
pub const ALLOCATION_FAILURE_MESSAGE: &str = "(memory allocation failed)";

/// Exit status used for allocation failures (255 on Unix).
pub const ALLOCATION_FAILURE_STATUS: i32 = -1;

/// Where the failed allocation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationSite {
    FailureMessage,
    SuiteResults,
}

impl AllocationSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationSite::FailureMessage => "failure message buffer",
            AllocationSite::SuiteResults => "suite result buffer",
        }
    }
}

/// Print the fixed diagnostic and terminate the process.
pub fn allocation_failure(site: AllocationSite, requested: usize) -> ! {
    error!(
        site = site.as_str(),
        requested, "allocation failed, terminating test run"
    );
    println!("{}", ALLOCATION_FAILURE_MESSAGE);
    std::process::exit(ALLOCATION_FAILURE_STATUS);
}

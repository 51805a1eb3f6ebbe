//! Minimal unit-testing framework
//!
//! Test bodies return a [`Checked`] value instead of panicking, suites run
//! them in order under a [`FailurePolicy`], and the [`Driver`] reports every
//! suite and maps failures to a process exit status.
//!
//! ```
//! use prova_testing::{expect_eq, suite, test, FailurePolicy};
//!
//! let arithmetic = suite(
//!     "arithmetic",
//!     "Integer arithmetic",
//!     FailurePolicy::ContinueOnFailure,
//!     [test("adds", || {
//!         let (a, b) = (2 + 2, 4);
//!         expect_eq!(a, b);
//!         Ok(())
//!     })],
//! );
//!
//! let result = arithmetic.run();
//! assert_eq!(result.passed, 1);
//! assert_eq!(result.pass_rate, 100);
//! ```

#[macro_use]
pub mod assertion;
pub mod config;
pub mod driver;
pub mod error;
pub mod fatal;
pub mod render;
pub mod test_case;
pub mod test_report;
pub mod test_runner;

pub use assertion::{evaluate, Checked, Comparison, Failure, ACTUAL_RESULT_BUFFER_SIZE};
pub use config::{ProvaConfig, ReportFormat};
pub use driver::{run_with_config, Driver};
pub use error::{ProvaError, Result};
pub use render::{Renderable, UNREPRESENTABLE};
pub use test_case::{test, TestCase, TestResult, Verdict};
pub use test_report::{
    reporter_for, ConsoleReporter, JUnitReporter, JsonReporter, RunSummary, TestReporter,
};
pub use test_runner::{suite, FailurePolicy, RunState, SuiteResult, SuiteRun, TestSuite};

//! Report driver
//!
//! Runs suites in order, hands each [`SuiteResult`] to a reporter and then
//! drops it. The driver owns every suite result from the moment the suite
//! finishes until it has been reported.

use std::io::Write;

use tracing::{debug, info};

use crate::assertion;
use crate::config::ProvaConfig;
use crate::error::Result;
use crate::test_report::{reporter_for, RunSummary, TestReporter};
use crate::test_runner::{SuiteResult, TestSuite};

pub struct Driver<R: TestReporter> {
    reporter: R,
}

impl<R: TestReporter> Driver<R> {
    pub fn new(reporter: R) -> Self {
        Self { reporter }
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Run and report every suite, returning the aggregate summary.
    pub fn run(&mut self, suites: &[TestSuite]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for suite in suites {
            debug!(suite = %suite.name, declared = suite.len(), "starting suite");
            let result = suite.run();
            self.report(&result)?;
            summary.record(&result);
        }

        self.reporter.on_run_finish(&summary)?;
        info!(
            suites = summary.suites,
            failed = summary.tests_failed,
            "test run finished"
        );

        Ok(summary)
    }

    fn report(&mut self, result: &SuiteResult) -> Result<()> {
        self.reporter.on_suite_start(result)?;
        for (index, test) in result.results.iter().enumerate() {
            self.reporter.on_test_finish(index, result, test)?;
        }
        self.reporter.on_suite_finish(result)
    }
}

/// Apply `config` and run `suites`, writing the report to `out`.
///
/// Sets the process-wide failure message capacity, so it should be called
/// once per process.
pub fn run_with_config<W: Write + 'static>(
    config: &ProvaConfig,
    suites: &[TestSuite],
    out: W,
) -> Result<RunSummary> {
    config.validate()?;
    assertion::set_buffer_capacity(config.buffer_capacity)?;

    let reporter = reporter_for(config.format, config.color, out);
    Driver::new(reporter).run(suites)
}

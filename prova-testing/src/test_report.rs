//! Test reporting module
//!
//! Reporters receive each suite's results in execution order and write them
//! to any [`Write`] sink.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::config::ReportFormat;
use crate::error::Result;
use crate::test_case::TestResult;
use crate::test_runner::SuiteResult;

const SUITE_RULE: &str = "=======================";
const SUMMARY_RULE: &str = "-----------------------";

/// Aggregate statistics across every suite of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub suites: usize,
    pub failed_suites: usize,
    pub tests_declared: usize,
    pub tests_ran: usize,
    pub tests_passed: usize,
    pub tests_failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, suite: &SuiteResult) {
        self.suites += 1;
        if !suite.is_success() {
            self.failed_suites += 1;
        }
        self.tests_declared += suite.declared;
        self.tests_ran += suite.ran;
        self.tests_passed += suite.passed;
        self.tests_failed += suite.failed;
    }

    pub fn is_success(&self) -> bool {
        self.tests_failed == 0
    }

    /// Process exit status: 0 when no test failed, 1 otherwise.
    pub fn exit_status(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Test reporter trait
pub trait TestReporter {
    /// Called when a suite's results are about to be reported
    fn on_suite_start(&mut self, suite: &SuiteResult) -> Result<()>;

    /// Called for every test that ran, `index` counting from zero
    fn on_test_finish(&mut self, index: usize, suite: &SuiteResult, test: &TestResult)
        -> Result<()>;

    /// Called after the last test of a suite
    fn on_suite_finish(&mut self, suite: &SuiteResult) -> Result<()>;

    /// Called once after every suite has been reported
    fn on_run_finish(&mut self, summary: &RunSummary) -> Result<()>;
}

impl<R: TestReporter + ?Sized> TestReporter for Box<R> {
    fn on_suite_start(&mut self, suite: &SuiteResult) -> Result<()> {
        (**self).on_suite_start(suite)
    }

    fn on_test_finish(
        &mut self,
        index: usize,
        suite: &SuiteResult,
        test: &TestResult,
    ) -> Result<()> {
        (**self).on_test_finish(index, suite, test)
    }

    fn on_suite_finish(&mut self, suite: &SuiteResult) -> Result<()> {
        (**self).on_suite_finish(suite)
    }

    fn on_run_finish(&mut self, summary: &RunSummary) -> Result<()> {
        (**self).on_run_finish(summary)
    }
}

/// Build the reporter for `format` writing to `out`.
pub fn reporter_for<W: Write + 'static>(
    format: ReportFormat,
    color: bool,
    out: W,
) -> Box<dyn TestReporter> {
    match format {
        ReportFormat::Console => Box::new(ConsoleReporter::new(out, color)),
        ReportFormat::Json => Box::new(JsonReporter::new(out)),
        ReportFormat::Junit => Box::new(JUnitReporter::new(out)),
    }
}

/// Console test reporter
pub struct ConsoleReporter<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn status(&self, test: &TestResult) -> String {
        match (test.is_pass(), self.color) {
            (true, true) => "PASSED".green().to_string(),
            (true, false) => "PASSED".to_string(),
            (false, true) => "FAILED".red().to_string(),
            (false, false) => "FAILED".to_string(),
        }
    }
}

impl<W: Write> TestReporter for ConsoleReporter<W> {
    fn on_suite_start(&mut self, suite: &SuiteResult) -> Result<()> {
        write!(self.out, "{}\n{}\n\n", suite.description, SUITE_RULE)?;
        Ok(())
    }

    fn on_test_finish(
        &mut self,
        index: usize,
        suite: &SuiteResult,
        test: &TestResult,
    ) -> Result<()> {
        let status = self.status(test);
        writeln!(
            self.out,
            "Test {}/{}: {} ({})",
            index + 1,
            suite.declared,
            test.label(),
            status
        )?;

        if let Some(failure) = test.failure() {
            write!(
                self.out,
                "\tReason: Expected {} but {}",
                failure.expected, failure.actual
            )?;
            if !failure.detail.is_empty() {
                write!(self.out, ", {}", failure.detail)?;
            }
            writeln!(self.out)?;
        }

        writeln!(self.out)?;
        Ok(())
    }

    fn on_suite_finish(&mut self, suite: &SuiteResult) -> Result<()> {
        write!(
            self.out,
            "{}\n\nSummary: {} tests, {} ran, {} passed, {} failed, {}% pass rate\n\n{}\n\n",
            SUMMARY_RULE,
            suite.declared,
            suite.ran,
            suite.passed,
            suite.failed,
            suite.pass_rate,
            SUITE_RULE
        )?;
        Ok(())
    }

    fn on_run_finish(&mut self, _summary: &RunSummary) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// JSON test reporter
///
/// Collects every suite and writes a single document when the run ends.
pub struct JsonReporter<W: Write> {
    out: W,
    suites: Vec<serde_json::Value>,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            suites: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TestReporter for JsonReporter<W> {
    fn on_suite_start(&mut self, _suite: &SuiteResult) -> Result<()> {
        // No action needed for JSON
        Ok(())
    }

    fn on_test_finish(
        &mut self,
        _index: usize,
        _suite: &SuiteResult,
        _test: &TestResult,
    ) -> Result<()> {
        // No action needed for JSON
        Ok(())
    }

    fn on_suite_finish(&mut self, suite: &SuiteResult) -> Result<()> {
        self.suites.push(serde_json::to_value(suite)?);
        Ok(())
    }

    fn on_run_finish(&mut self, summary: &RunSummary) -> Result<()> {
        let report = serde_json::json!({
            "success": summary.is_success(),
            "summary": summary,
            "suites": std::mem::take(&mut self.suites),
        });

        serde_json::to_writer_pretty(&mut self.out, &report)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// JUnit XML test reporter
pub struct JUnitReporter<W: Write> {
    out: W,
    body: String,
}

impl<W: Write> JUnitReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            body: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TestReporter for JUnitReporter<W> {
    fn on_suite_start(&mut self, suite: &SuiteResult) -> Result<()> {
        self.body.push_str(&format!(
            "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" skipped=\"{}\">\n",
            escape_xml(&suite.name),
            suite.declared,
            suite.failed,
            suite.declared - suite.ran,
        ));
        Ok(())
    }

    fn on_test_finish(
        &mut self,
        _index: usize,
        suite: &SuiteResult,
        test: &TestResult,
    ) -> Result<()> {
        let name = escape_xml(&test.label());
        let classname = escape_xml(&suite.name);

        match test.failure() {
            None => {
                self.body.push_str(&format!(
                    "    <testcase name=\"{}\" classname=\"{}\" />\n",
                    name, classname
                ));
            }
            Some(failure) => {
                self.body.push_str(&format!(
                    "    <testcase name=\"{}\" classname=\"{}\">\n",
                    name, classname
                ));
                self.body.push_str(&format!(
                    "      <failure message=\"{}\" />\n",
                    escape_xml(&failure.to_string())
                ));
                self.body.push_str("    </testcase>\n");
            }
        }
        Ok(())
    }

    fn on_suite_finish(&mut self, _suite: &SuiteResult) -> Result<()> {
        self.body.push_str("  </testsuite>\n");
        Ok(())
    }

    fn on_run_finish(&mut self, summary: &RunSummary) -> Result<()> {
        writeln!(self.out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(
            self.out,
            "<testsuites tests=\"{}\" failures=\"{}\">",
            summary.tests_declared, summary.tests_failed
        )?;
        self.out.write_all(self.body.as_bytes())?;
        writeln!(self.out, "</testsuites>")?;
        self.out.flush()?;
        self.body.clear();
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//! Suite execution
//!
//! A suite runs its tests strictly in order, one at a time. Under
//! [`FailurePolicy::TerminateOnFailure`] the first failing test stops the
//! suite and the remaining tests are never invoked.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::fatal::{self, AllocationSite};
use crate::test_case::{TestCase, TestResult};

/// What to do after a failing test
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Run every test regardless of earlier failures
    #[default]
    ContinueOnFailure,

    /// Stop at the first failing test
    TerminateOnFailure,
}

/// Execution state of a suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    NotStarted,
    /// The next test to run is at this index
    Running(usize),
    StoppedEarly,
    Completed,
}

impl RunState {
    pub fn is_finished(&self) -> bool {
        matches!(self, RunState::StoppedEarly | RunState::Completed)
    }
}

/// A named, ordered batch of tests sharing a failure policy
#[derive(Debug)]
pub struct TestSuite {
    /// Suite name
    pub name: String,

    /// Suite description
    pub description: String,

    pub policy: FailurePolicy,

    /// Tests in execution order
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            policy,
            tests: Vec::new(),
        }
    }

    pub fn test(mut self, case: TestCase) -> Self {
        self.tests.push(case);
        self
    }

    pub fn tests(mut self, cases: impl IntoIterator<Item = TestCase>) -> Self {
        self.tests.extend(cases);
        self
    }

    /// Number of tests declared in the suite
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Start a step-wise run.
    pub fn start(&self) -> SuiteRun<'_> {
        SuiteRun::new(self)
    }

    /// Run the suite to the end.
    pub fn run(&self) -> SuiteResult {
        let mut run = self.start();
        while run.step().is_some() {}
        run.finish()
    }
}

/// Build a suite from its parts.
pub fn suite(
    name: impl Into<String>,
    description: impl Into<String>,
    policy: FailurePolicy,
    cases: impl IntoIterator<Item = TestCase>,
) -> TestSuite {
    TestSuite::new(name, description, policy).tests(cases)
}

/// An in-progress suite run
#[derive(Debug)]
pub struct SuiteRun<'a> {
    suite: &'a TestSuite,
    state: RunState,
    results: Vec<TestResult>,
    passed: usize,
    failed: usize,
}

impl<'a> SuiteRun<'a> {
    fn new(suite: &'a TestSuite) -> Self {
        let declared = suite.len();
        let mut results = Vec::new();
        if results.try_reserve_exact(declared).is_err() {
            fatal::allocation_failure(
                AllocationSite::SuiteResults,
                declared.saturating_mul(std::mem::size_of::<TestResult>()),
            );
        }

        Self {
            suite,
            state: RunState::NotStarted,
            results,
            passed: 0,
            failed: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Results recorded so far
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Run the next test, returning its result, or `None` once the run
    /// has finished.
    pub fn step(&mut self) -> Option<&TestResult> {
        let suite = self.suite;
        let index = match self.state {
            RunState::NotStarted => 0,
            RunState::Running(index) => index,
            RunState::StoppedEarly | RunState::Completed => return None,
        };

        let Some(case) = suite.tests.get(index) else {
            self.state = RunState::Completed;
            return None;
        };

        debug!(suite = %suite.name, test = %case.name, index, "running test");
        let result = case.run();

        if result.is_fail() {
            self.failed += 1;
            debug!(suite = %suite.name, test = %case.name, "test failed");
            self.state = if suite.policy == FailurePolicy::TerminateOnFailure {
                warn!(
                    suite = %suite.name,
                    test = %case.name,
                    skipped = suite.len() - index - 1,
                    "stopping suite on first failure"
                );
                RunState::StoppedEarly
            } else {
                self.next_state(index)
            };
        } else {
            self.passed += 1;
            self.state = self.next_state(index);
        }

        self.results.push(result);
        self.results.last()
    }

    fn next_state(&self, index: usize) -> RunState {
        if index + 1 < self.suite.len() {
            RunState::Running(index + 1)
        } else {
            RunState::Completed
        }
    }

    /// Consume the run and produce its result. An unfinished run is
    /// reported with the tests that ran so far.
    pub fn finish(self) -> SuiteResult {
        let declared = self.suite.len();
        let ran = self.results.len();
        let state = match self.state {
            RunState::NotStarted if declared == 0 => RunState::Completed,
            state => state,
        };

        let result = SuiteResult {
            name: self.suite.name.clone(),
            description: self.suite.description.clone(),
            results: self.results,
            declared,
            ran,
            passed: self.passed,
            failed: self.failed,
            pass_rate: pass_rate(self.passed, declared),
            state,
        };

        info!(
            suite = %result.name,
            declared = result.declared,
            ran = result.ran,
            passed = result.passed,
            failed = result.failed,
            pass_rate = result.pass_rate,
            "suite finished"
        );

        result
    }
}

/// `passed / declared * 100`, truncated; 0 for an empty suite.
pub fn pass_rate(passed: usize, declared: usize) -> u32 {
    if declared == 0 {
        return 0;
    }
    (passed as u128 * 100 / declared as u128) as u32
}

/// Outcome of running one suite
#[derive(Debug, Clone, Serialize)]
pub struct SuiteResult {
    pub name: String,
    pub description: String,

    /// One entry per test that ran, in execution order
    pub results: Vec<TestResult>,

    pub declared: usize,
    pub ran: usize,
    pub passed: usize,
    pub failed: usize,

    /// Integer percentage of declared tests that passed
    pub pass_rate: u32,

    pub state: RunState,
}

impl SuiteResult {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn stopped_early(&self) -> bool {
        self.state == RunState::StoppedEarly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_case::test;
    use std::cell::Cell;
    use std::rc::Rc;

    fn passing(name: &str) -> TestCase {
        test(name, || Ok(()))
    }

    fn failing(name: &str) -> TestCase {
        test(name, || {
            expect_eq!(1, 2);
            Ok(())
        })
    }

    #[test]
    fn test_default_policy_continues() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::ContinueOnFailure);
    }

    #[test]
    fn test_step_walks_state_machine() {
        let suite = suite(
            "steps",
            "",
            FailurePolicy::ContinueOnFailure,
            [passing("a"), failing("b")],
        );
        let mut run = suite.start();
        assert_eq!(run.state(), RunState::NotStarted);

        assert!(run.step().unwrap().is_pass());
        assert_eq!(run.state(), RunState::Running(1));

        assert!(run.step().unwrap().is_fail());
        assert_eq!(run.state(), RunState::Completed);

        assert!(run.step().is_none());
        assert_eq!(run.results().len(), 2);
    }

    #[test]
    fn test_terminate_stops_at_first_failure() {
        let invoked = Rc::new(Cell::new(0));
        let counter = Rc::clone(&invoked);
        let suite = suite(
            "terminate",
            "stops early",
            FailurePolicy::TerminateOnFailure,
            [
                passing("first"),
                failing("second"),
                test("third", move || {
                    counter.set(counter.get() + 1);
                    Ok(())
                }),
            ],
        );

        let result = suite.run();
        assert_eq!(result.declared, 3);
        assert_eq!(result.ran, 2);
        assert_eq!(result.passed, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.pass_rate, 33);
        assert_eq!(result.results.len(), 2);
        assert_eq!(result.state, RunState::StoppedEarly);
        assert!(result.stopped_early());
        assert_eq!(invoked.get(), 0);
    }

    #[test]
    fn test_continue_runs_everything() {
        let suite = suite(
            "continue",
            "",
            FailurePolicy::ContinueOnFailure,
            [passing("first"), failing("second"), passing("third")],
        );

        let result = suite.run();
        assert_eq!(result.ran, 3);
        assert_eq!(result.passed, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.pass_rate, 66);
        assert_eq!(result.state, RunState::Completed);
        assert!(!result.is_success());
    }

    #[test]
    fn test_terminate_without_failures_completes() {
        let suite = suite(
            "clean",
            "",
            FailurePolicy::TerminateOnFailure,
            [passing("a"), passing("b")],
        );

        let result = suite.run();
        assert_eq!(result.state, RunState::Completed);
        assert_eq!(result.pass_rate, 100);
        assert!(result.is_success());
    }

    #[test]
    fn test_empty_suite() {
        let suite = TestSuite::new("empty", "nothing here", FailurePolicy::TerminateOnFailure);
        assert!(suite.is_empty());

        let result = suite.run();
        assert_eq!(result.declared, 0);
        assert_eq!(result.ran, 0);
        assert_eq!(result.passed, 0);
        assert_eq!(result.failed, 0);
        assert_eq!(result.pass_rate, 0);
        assert_eq!(result.state, RunState::Completed);
    }

    #[test]
    fn test_results_keep_order() {
        let suite = TestSuite::new("order", "", FailurePolicy::ContinueOnFailure)
            .test(passing("one"))
            .test(failing("two"))
            .test(passing("three"));

        let names: Vec<String> = suite.run().results.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_pass_rate_truncates() {
        assert_eq!(pass_rate(1, 3), 33);
        assert_eq!(pass_rate(2, 3), 66);
        assert_eq!(pass_rate(0, 5), 0);
        assert_eq!(pass_rate(5, 5), 100);
        assert_eq!(pass_rate(0, 0), 0);
    }

    #[test]
    fn test_policy_deserializes_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: FailurePolicy,
        }

        let parsed: Wrapper = toml::from_str("policy = \"terminate-on-failure\"").unwrap();
        assert_eq!(parsed.policy, FailurePolicy::TerminateOnFailure);
    }
}

//! Test registration and per-test results
//!
//! A test is a name, an optional description and a body returning
//! [`Checked`]. Running it yields a [`TestResult`].

use std::fmt;

use serde::Serialize;

use crate::assertion::{Checked, Failure};

type TestBody = Box<dyn Fn() -> Checked>;

/// A registered test
pub struct TestCase {
    /// Test name
    pub name: String,

    /// Free-form description, empty when none was attached
    pub description: String,

    body: TestBody,
}

impl TestCase {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn() -> Checked + 'static,
    {
        Self {
            name: name.into(),
            description: String::new(),
            body: Box::new(body),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Invoke the body once and record its outcome.
    pub fn run(&self) -> TestResult {
        let verdict = match (self.body)() {
            Ok(()) => Verdict::Pass,
            Err(failure) => Verdict::Fail(failure),
        };

        TestResult {
            name: self.name.clone(),
            description: self.description.clone(),
            verdict,
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Shorthand for [`TestCase::new`].
pub fn test<F>(name: impl Into<String>, body: F) -> TestCase
where
    F: Fn() -> Checked + 'static,
{
    TestCase::new(name, body)
}

/// Pass or fail; a failure carries every failure field at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail(Failure),
}

/// Outcome of one test invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        matches!(self.verdict, Verdict::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self.verdict, Verdict::Fail(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.verdict {
            Verdict::Pass => None,
            Verdict::Fail(failure) => Some(failure),
        }
    }

    /// Name followed by `, description` when a description is attached.
    pub fn label(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.description)
        }
    }
}

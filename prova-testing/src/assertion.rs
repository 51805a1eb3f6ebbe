//! Relational assertions
//!
//! An assertion either holds, producing `Ok(())` without allocating, or
//! produces a [`Failure`] describing the expected condition and the actual
//! operand values. Failures are ordinary return values; the `expect_*`
//! macros return them early from the enclosing test body.

use std::fmt::{self, Write as _};

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::error::{ProvaError, Result};
use crate::fatal::{self, AllocationSite};
use crate::render::Renderable;

/// Default capacity, in bytes, of the failure message buffer.
pub const ACTUAL_RESULT_BUFFER_SIZE: usize = 512;

static BUFFER_CAPACITY: OnceCell<usize> = OnceCell::new();

/// Set the process-wide failure message capacity.
///
/// May be called once; repeating the same value is accepted.
pub fn set_buffer_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(ProvaError::invalid_config(
            "buffer_capacity must be at least 1 byte",
        ));
    }

    let current = *BUFFER_CAPACITY.get_or_init(|| capacity);
    if current != capacity {
        return Err(ProvaError::invalid_config(format!(
            "buffer_capacity already set to {}",
            current
        )));
    }

    Ok(())
}

/// Capacity used for failure messages built by the `expect_*` macros.
pub fn buffer_capacity() -> usize {
    BUFFER_CAPACITY
        .get()
        .copied()
        .unwrap_or(ACTUAL_RESULT_BUFFER_SIZE)
}

/// Outcome of a test body.
pub type Checked = std::result::Result<(), Failure>;

/// The four relational comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Eq,
    Ne,
    Gt,
    Lt,
}

impl Comparison {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Eq => "==",
            Comparison::Ne => "!=",
            Comparison::Gt => ">",
            Comparison::Lt => "<",
        }
    }

    pub fn holds<T: PartialOrd + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            Comparison::Eq => is_eq(lhs, rhs),
            Comparison::Ne => is_ne(lhs, rhs),
            Comparison::Gt => is_gt(lhs, rhs),
            Comparison::Lt => is_lt(lhs, rhs),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// `>` and `<` hold only for operands ordered that way, so unordered values
// such as NaN fail both.

#[doc(hidden)]
pub fn is_eq<T: PartialEq + ?Sized>(lhs: &T, rhs: &T) -> bool {
    lhs == rhs
}

#[doc(hidden)]
pub fn is_ne<T: PartialEq + ?Sized>(lhs: &T, rhs: &T) -> bool {
    lhs != rhs
}

#[doc(hidden)]
pub fn is_gt<T: PartialOrd + ?Sized>(lhs: &T, rhs: &T) -> bool {
    lhs > rhs
}

#[doc(hidden)]
pub fn is_lt<T: PartialOrd + ?Sized>(lhs: &T, rhs: &T) -> bool {
    lhs < rhs
}

/// A failed assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Caller-supplied detail, possibly empty.
    pub detail: String,
    /// The condition that should have held, e.g. `a == b`.
    pub expected: String,
    /// Operands and their values, e.g. `a = 3 and b = 5`.
    pub actual: String,
}

impl Failure {
    /// Build a failure using the process-wide buffer capacity.
    pub fn build(
        kind: Comparison,
        lhs_expr: &str,
        lhs: &dyn Renderable,
        rhs_expr: &str,
        rhs: &dyn Renderable,
        detail: impl Into<String>,
    ) -> Self {
        Self::build_with_capacity(
            kind,
            lhs_expr,
            lhs,
            rhs_expr,
            rhs,
            detail,
            buffer_capacity(),
        )
    }

    pub fn build_with_capacity(
        kind: Comparison,
        lhs_expr: &str,
        lhs: &dyn Renderable,
        rhs_expr: &str,
        rhs: &dyn Renderable,
        detail: impl Into<String>,
        capacity: usize,
    ) -> Self {
        Self {
            detail: detail.into(),
            expected: format!("{} {} {}", lhs_expr, kind.symbol(), rhs_expr),
            actual: render_actual(lhs_expr, lhs, rhs_expr, rhs, capacity),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} but {}", self.expected, self.actual)?;
        if !self.detail.is_empty() {
            write!(f, ", {}", self.detail)?;
        }
        Ok(())
    }
}

/// Evaluate a comparison between two renderable operands.
pub fn evaluate<T: PartialOrd + Renderable + ?Sized>(
    kind: Comparison,
    lhs_expr: &str,
    lhs: &T,
    rhs_expr: &str,
    rhs: &T,
    detail: &str,
) -> Checked {
    if kind.holds(lhs, rhs) {
        return Ok(());
    }

    Err(Failure::build(kind, lhs_expr, &lhs, rhs_expr, &rhs, detail))
}

/// Render `"<lhs_expr> = <lhs_value> and <rhs_expr> = <rhs_value>"` into a
/// buffer of `capacity` bytes.
///
/// Operands are written straight into the buffer and rendering stops once
/// it is full, so no more than `capacity` bytes are held for the message.
pub fn render_actual(
    lhs_expr: &str,
    lhs: &dyn Renderable,
    rhs_expr: &str,
    rhs: &dyn Renderable,
    capacity: usize,
) -> String {
    let mut buffer = BoundedBuffer::with_capacity(capacity);
    // Err only signals a full buffer; what was written is kept.
    let _ = write_actual(&mut buffer, lhs_expr, lhs, rhs_expr, rhs);
    buffer.into_string()
}

fn write_actual(
    out: &mut BoundedBuffer,
    lhs_expr: &str,
    lhs: &dyn Renderable,
    rhs_expr: &str,
    rhs: &dyn Renderable,
) -> fmt::Result {
    out.write_str(lhs_expr)?;
    out.write_str(" = ")?;
    lhs.render(out)?;
    out.write_str(" and ")?;
    out.write_str(rhs_expr)?;
    out.write_str(" = ")?;
    rhs.render(out)
}

/// Fixed-capacity text buffer.
///
/// Holds at most `capacity - 1` bytes, keeping the last byte for the
/// terminator of the C layout, and never reallocates after construction.
#[derive(Debug)]
pub struct BoundedBuffer {
    buf: String,
    limit: usize,
    truncated: bool,
}

impl BoundedBuffer {
    /// Reserve the buffer, terminating the process if the reservation fails.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = String::new();
        if buf.try_reserve_exact(capacity).is_err() {
            fatal::allocation_failure(AllocationSite::FailureMessage, capacity);
        }

        Self {
            buf,
            limit: capacity.saturating_sub(1),
            truncated: false,
        }
    }

    pub fn push_str(&mut self, text: &str) {
        if self.truncated {
            return;
        }

        let room = self.limit - self.buf.len();
        if text.len() <= room {
            self.buf.push_str(text);
            return;
        }

        let mut cut = room;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        self.buf.push_str(&text[..cut]);
        self.truncated = true;
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Writes fail once the buffer has been truncated, which ends any
/// formatting in progress.
impl fmt::Write for BoundedBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        if self.truncated {
            Err(fmt::Error)
        } else {
            Ok(())
        }
    }
}

/// Shared template behind the four `expect_*` macros.
#[doc(hidden)]
#[macro_export]
macro_rules! __expect {
    ($kind:ident, $pred:ident, $a:expr, $b:expr, $detail:expr) => {
        match (&$a, &$b) {
            (lhs, rhs) => {
                if !$crate::assertion::$pred(lhs, rhs) {
                    return ::core::result::Result::Err(::core::convert::From::from(
                        $crate::assertion::Failure::build(
                            $crate::assertion::Comparison::$kind,
                            ::core::stringify!($a),
                            $crate::as_renderable!(lhs),
                            ::core::stringify!($b),
                            $crate::as_renderable!(rhs),
                            $detail,
                        ),
                    ));
                }
            }
        }
    };
}

/// Return a failure from the enclosing test unless `a == b`.
#[macro_export]
macro_rules! expect_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__expect!(Eq, is_eq, $a, $b, "")
    };
    ($a:expr, $b:expr, $detail:expr $(,)?) => {
        $crate::__expect!(Eq, is_eq, $a, $b, $detail)
    };
}

/// Return a failure from the enclosing test unless `a != b`.
#[macro_export]
macro_rules! expect_ne {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__expect!(Ne, is_ne, $a, $b, "")
    };
    ($a:expr, $b:expr, $detail:expr $(,)?) => {
        $crate::__expect!(Ne, is_ne, $a, $b, $detail)
    };
}

/// Return a failure from the enclosing test unless `a > b`.
#[macro_export]
macro_rules! expect_gt {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__expect!(Gt, is_gt, $a, $b, "")
    };
    ($a:expr, $b:expr, $detail:expr $(,)?) => {
        $crate::__expect!(Gt, is_gt, $a, $b, $detail)
    };
}

/// Return a failure from the enclosing test unless `a < b`.
#[macro_export]
macro_rules! expect_lt {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__expect!(Lt, is_lt, $a, $b, "")
    };
    ($a:expr, $b:expr, $detail:expr $(,)?) => {
        $crate::__expect!(Lt, is_lt, $a, $b, $detail)
    };
}

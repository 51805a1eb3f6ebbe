//! Value rendering for assertion messages
//!
//! The rendering rule for a value is chosen by its static type. Supported
//! primitives implement [`Renderable`] below; any other type renders as
//! [`UNREPRESENTABLE`], either by implementing the trait with an empty body
//! or, when it does not implement the trait at all, through the
//! [`as_renderable!`](crate::as_renderable) macro, which picks the fallback
//! during method resolution.
//!
//! Values are written straight into the caller's sink, so a bounded sink
//! bounds the memory spent on rendering.

use std::fmt::{self, Write};

/// Placeholder for values of unsupported types.
pub const UNREPRESENTABLE: &str = "(unable to represent value)";

/// Capability to write a display form of a value into a text sink.
///
/// The provided method writes [`UNREPRESENTABLE`], so `impl Renderable for
/// MyType {}` opts a type into the placeholder. An error from the sink ends
/// the rendering early and is passed back to the caller.
pub trait Renderable {
    fn render(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str(UNREPRESENTABLE)
    }
}

macro_rules! render_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Renderable for $ty {
                fn render(&self, out: &mut dyn Write) -> fmt::Result {
                    write!(out, "{}", self)
                }
            }
        )*
    };
}

render_integers!(u8, u16, u32, u64, u128, usize);
render_integers!(i8, i16, i32, i64, i128, isize);

impl Renderable for char {
    fn render(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_char(*self)
    }
}

impl Renderable for str {
    fn render(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str(self)
    }
}

impl Renderable for String {
    fn render(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str(self)
    }
}

// Fixed notation with six fractional digits, matching printf's %f.
impl Renderable for f32 {
    fn render(&self, out: &mut dyn Write) -> fmt::Result {
        write!(out, "{:.6}", self)
    }
}

impl Renderable for f64 {
    fn render(&self, out: &mut dyn Write) -> fmt::Result {
        write!(out, "{:.6}", self)
    }
}

impl<T: ?Sized> Renderable for *const T {
    fn render(&self, out: &mut dyn Write) -> fmt::Result {
        write!(out, "{:p}", *self)
    }
}

impl<T: ?Sized> Renderable for *mut T {
    fn render(&self, out: &mut dyn Write) -> fmt::Result {
        write!(out, "{:p}", *self)
    }
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn render(&self, out: &mut dyn Write) -> fmt::Result {
        (**self).render(out)
    }
}

impl<T: Renderable + ?Sized> Renderable for &mut T {
    fn render(&self, out: &mut dyn Write) -> fmt::Result {
        (**self).render(out)
    }
}

/// Stand-in for operands whose type has no [`Renderable`] impl.
#[doc(hidden)]
pub struct Unrepresentable;

impl Renderable for Unrepresentable {}

/// Borrowed operand used by [`as_renderable!`](crate::as_renderable) to
/// choose between [`RenderSupported`] and [`RenderFallback`].
///
/// `(&Probe(&value)).as_renderable()` resolves to `RenderSupported` when the
/// value's type is `Renderable` (receiver `&Probe<T>` matches by value) and
/// to `RenderFallback` otherwise (receiver `&&Probe<T>`, one autoref later).
pub struct Probe<'a, T: ?Sized>(pub &'a T);

#[doc(hidden)]
pub trait RenderSupported<'a> {
    fn as_renderable(&self) -> &'a dyn Renderable;
}

impl<'a, T: Renderable + 'a> RenderSupported<'a> for Probe<'a, T> {
    fn as_renderable(&self) -> &'a dyn Renderable {
        self.0
    }
}

#[doc(hidden)]
pub trait RenderFallback<'a> {
    fn as_renderable(&self) -> &'a dyn Renderable;
}

impl<'a, T: ?Sized> RenderFallback<'a> for &Probe<'a, T> {
    fn as_renderable(&self) -> &'a dyn Renderable {
        &Unrepresentable
    }
}

/// View any value as `&dyn Renderable`, substituting [`UNREPRESENTABLE`] for
/// types that do not implement [`Renderable`].
///
/// The argument must be a reference to the value.
#[macro_export]
macro_rules! as_renderable {
    ($value:expr) => {{
        #[allow(unused_imports)]
        use $crate::render::{RenderFallback as _, RenderSupported as _};
        (&$crate::render::Probe($value)).as_renderable()
    }};
}

//! What a scope guard accepts as its callback.
//!
//! The acceptability predicate is layered:
//!
//! * [`Callback`]: invocable once with no arguments, returning `()`.
//! * [`Nothrow`]: a `Callback` whose invocation and drop are declared not to
//!   panic.
//! * [`Acceptable`]: whichever of the two the build requires. Without the
//!   `strict` feature every `Callback` is acceptable, with it only `Nothrow`
//!   ones are.

/// A zero-argument action returning nothing.
///
/// Every `FnOnce()` is a `Callback`. Closures returning a value are not,
/// since `FnOnce()` fixes the output to `()`. Function objects can implement
/// the trait themselves:
///
/// ```
/// use scope_exit::{create_guard, Callback, Nothrow};
///
/// struct Unlock<'a>(&'a std::cell::Cell<bool>);
///
/// impl Callback for Unlock<'_> {
///     fn invoke(self) {
///         self.0.set(false);
///     }
/// }
///
/// impl Nothrow for Unlock<'_> {}
///
/// let locked = std::cell::Cell::new(true);
/// {
///     let _guard = create_guard(Unlock(&locked));
/// }
/// assert!(!locked.get());
/// ```
pub trait Callback {
    fn invoke(self);
}

impl<F: FnOnce()> Callback for F {
    #[inline]
    fn invoke(self) {
        self()
    }
}

/// Marker for callbacks that never panic, neither when invoked nor when
/// dropped.
///
/// Implementing it is a promise checked only by the type system. If the
/// promise is broken at runtime the guard still aborts the process, exactly
/// as in permissive builds.
///
/// Type-erased callables such as `Box<dyn FnOnce()>` can never carry this
/// marker: the box is a foreign type, so nothing outside `std` can implement
/// a trait for it. Wrap them in [`no_panic`] instead.
pub trait Nothrow: Callback {}

/// The bound [`create_guard`](crate::create_guard) puts on its callback.
pub trait Acceptable: Callback {}

#[cfg(not(feature = "strict"))]
impl<T: Callback> Acceptable for T {}

#[cfg(feature = "strict")]
impl<T: Nothrow> Acceptable for T {}

/// A closure declared panic-free. Build it with [`no_panic`].
pub struct NoPanic<F> {
    f: F,
}

/// Declares `f` panic-free, making it acceptable in strict builds.
///
/// ```
/// use scope_exit::{create_guard, no_panic};
///
/// let released = std::cell::Cell::new(false);
/// {
///     let _guard = create_guard(no_panic(|| released.set(true)));
/// }
/// assert!(released.get());
/// ```
#[inline]
pub fn no_panic<F: FnOnce()>(f: F) -> NoPanic<F> {
    NoPanic { f }
}

impl<F: FnOnce()> Callback for NoPanic<F> {
    #[inline]
    fn invoke(self) {
        (self.f)()
    }
}

impl<F: FnOnce()> Nothrow for NoPanic<F> {}

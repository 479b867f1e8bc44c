//! Trying to build a guard without committing to it.
//!
//! Generic code that wraps arbitrary user values sometimes wants a guard
//! when the value is a proper callback and something else when it is not.
//! A plain `create_guard(value)` makes an unacceptable value a hard compile
//! error. The macros here turn it into a choice made by method resolution
//! instead:
//!
//! ```
//! use scope_exit::{accepts_callback, try_create_guard};
//!
//! let mut said = Vec::new();
//! {
//!     let say = |word: &'static str| said.push(word);
//!     // Takes an argument, so not a callback: the value comes back.
//!     assert!(try_create_guard!(say).is_err());
//! }
//! assert!(!accepts_callback!(|| 7));
//! assert!(accepts_callback!(type scope_exit::NoPanic<fn()>));
//! ```
//!
//! Both macros look at the concrete type at the call site. The preferred
//! method lives on `Probe<T>` and requires `T: Acceptable`; the fallback
//! lives on `&Probe<T>` without bounds. Calling through `&Probe<T>` reaches
//! the preferred method first and only falls back to the auto-referenced one
//! when the bound does not hold. Inside a generic function the type is not
//! concrete yet, so the fallback is always chosen there.

use std::cell::Cell;
use std::convert::Infallible;

use crate::guard::callback::Acceptable;
use crate::guard::{create_guard, ScopeGuard};

#[doc(hidden)]
pub struct Probe<T> {
    slot: Cell<Option<T>>,
}

impl<T> Probe<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Cell::new(Some(value)),
        }
    }

    /// An empty probe, only good for asking about `T`.
    pub fn of() -> Self {
        Self {
            slot: Cell::new(None),
        }
    }

    /// An empty probe for the type of `value`.
    pub fn like(_: &T) -> Self {
        Self::of()
    }

    fn take(&self) -> T {
        self.slot
            .take()
            .expect("probe holds its value until the first creation attempt")
    }
}

/// Resolution taken when the probed type is an acceptable callback.
#[doc(hidden)]
pub trait Accepted {
    type Callback: Acceptable;

    fn create(&self) -> Result<ScopeGuard<Self::Callback>, Infallible>;

    fn accepts(&self) -> bool {
        true
    }
}

impl<F: Acceptable> Accepted for Probe<F> {
    type Callback = F;

    fn create(&self) -> Result<ScopeGuard<F>, Infallible> {
        Ok(create_guard(self.take()))
    }
}

/// Resolution taken for everything else.
#[doc(hidden)]
pub trait Rejected {
    type Value;

    fn create(&self) -> Result<Infallible, Self::Value>;

    fn accepts(&self) -> bool {
        false
    }
}

impl<T> Rejected for &Probe<T> {
    type Value = T;

    fn create(&self) -> Result<Infallible, T> {
        trace!(ty = std::any::type_name::<T>(), "not a guard callback, falling back");
        Err(self.take())
    }
}

/// Creates a guard if the value is an acceptable callback.
///
/// Evaluates to `Ok(guard)` (typed `Result<ScopeGuard<F>, Infallible>`) for
/// acceptable values and to `Err(value)` (typed `Result<Infallible, T>`) for
/// anything else, handing the value back untouched.
///
/// ```
/// use std::cell::Cell;
/// use scope_exit::{no_panic, try_create_guard};
///
/// let closed = Cell::new(false);
/// {
///     let _guard = match try_create_guard!(no_panic(|| closed.set(true))) {
///         Ok(guard) => guard,
///         Err(never) => match never {},
///     };
/// }
/// assert!(closed.get());
///
/// match try_create_guard!(|| "a value nobody would read") {
///     Ok(_) => unreachable!(),
///     Err(back) => assert_eq!(back(), "a value nobody would read"),
/// }
/// ```
#[macro_export]
macro_rules! try_create_guard {
    ($value:expr $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::probe::{Accepted as _, Rejected as _};
        (&$crate::probe::Probe::new($value)).create()
    }};
}

/// Whether a value, or a type, would be accepted by `create_guard`.
///
/// The value form only borrows its argument.
///
/// ```
/// use scope_exit::accepts_callback;
///
/// fn takes_one(_: u8) {}
///
/// assert!(!accepts_callback!(takes_one));
/// assert!(!accepts_callback!(type Box<dyn FnOnce() -> bool>));
/// assert!(accepts_callback!(type scope_exit::NoPanic<fn()>));
/// ```
#[macro_export]
macro_rules! accepts_callback {
    (type $ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::probe::{Accepted as _, Rejected as _};
        (&$crate::probe::Probe::<$ty>::of()).accepts()
    }};
    ($value:expr $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::probe::{Accepted as _, Rejected as _};
        (&$crate::probe::Probe::like(&$value)).accepts()
    }};
}

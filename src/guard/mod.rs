use std::fmt;

use crate::utils::fatal;

pub mod callback;

use callback::Acceptable;

/// Runs its callback exactly once when dropped, unless dismissed.
///
/// Only [`create_guard`] builds one. A guard has no `Clone`, and moving it
/// hands the pending callback to the new owner together with its state.
///
/// Guards drop in reverse declaration order, so the callbacks of several
/// guards in one scope run last-in, first-out.
///
/// ```compile_fail
/// let guard = scope_exit::create_guard(scope_exit::no_panic(|| {}));
/// let copy = guard.clone();
/// ```
///
/// ```compile_fail
/// let guard = scope_exit::create_guard(scope_exit::no_panic(|| {}));
/// let moved = guard;
/// drop(guard);
/// ```
#[must_use = "a guard that is not bound to a name runs its callback immediately"]
pub struct ScopeGuard<F: Acceptable> {
    callback: Option<F>,
    active: bool,
}

/// Creates an active guard around `callback`.
///
/// ```
/// use std::cell::Cell;
///
/// let count = Cell::new(0);
/// {
///     let _guard = scope_exit::create_guard(scope_exit::no_panic(|| count.set(count.get() + 1)));
///     assert_eq!(count.get(), 0);
/// }
/// assert_eq!(count.get(), 1);
/// ```
///
/// Callbacks must take no arguments and return `()`:
///
/// ```compile_fail
/// let _guard = scope_exit::create_guard(|| 42);
/// ```
///
/// ```compile_fail
/// let _guard = scope_exit::create_guard(|step: u32| drop(step));
/// ```
#[inline]
pub fn create_guard<F: Acceptable>(callback: F) -> ScopeGuard<F> {
    ScopeGuard::new(callback)
}

impl<F: Acceptable> ScopeGuard<F> {
    fn new(callback: F) -> Self {
        Self {
            callback: Some(callback),
            active: true,
        }
    }

    /// Cancels the callback. Dismissing twice is the same as dismissing once.
    ///
    /// Needs a mutable binding:
    ///
    /// ```compile_fail
    /// let guard = scope_exit::create_guard(scope_exit::no_panic(|| {}));
    /// guard.dismiss();
    /// ```
    pub fn dismiss(&mut self) {
        if self.active {
            debug!("scope guard dismissed");
        }
        self.active = false;
    }

    /// Whether the callback will still run when the guard drops.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<F: Acceptable> Drop for ScopeGuard<F> {
    fn drop(&mut self) {
        let Some(callback) = self.callback.take() else {
            return;
        };
        if self.active {
            trace!(unwinding = std::thread::panicking(), "scope guard firing");
            fatal::abort_on_panic("scope guard callback", || callback.invoke());
        } else {
            trace!("dismissed scope guard dropped");
            fatal::abort_on_panic("dismissed scope guard callback", || drop(callback));
        }
    }
}

impl<F: Acceptable> fmt::Debug for ScopeGuard<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

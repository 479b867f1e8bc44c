//! Run a callback when leaving a scope, however the scope is left.
//!
//! ```
//! use std::cell::RefCell;
//! use scope_exit::{create_guard, no_panic};
//!
//! fn stage(log: &RefCell<Vec<&'static str>>, commit: bool) -> Result<(), &'static str> {
//!     log.borrow_mut().push("staged");
//!     let mut rollback = create_guard(no_panic(|| log.borrow_mut().push("rolled back")));
//!     if !commit {
//!         return Err("not committing");
//!     }
//!     rollback.dismiss();
//!     log.borrow_mut().push("committed");
//!     Ok(())
//! }
//!
//! let log = RefCell::new(Vec::new());
//! assert!(stage(&log, false).is_err());
//! stage(&log, true).unwrap();
//! assert_eq!(*log.borrow(), ["staged", "rolled back", "staged", "committed"]);
//! ```
//!
//! A guard fires on normal fall-through, on early `return` or `?`, and while
//! a panic unwinds through its scope. The callback must take no arguments
//! and return `()`. It runs at most once; [`ScopeGuard::dismiss`] cancels it.
//!
//! # Panicking callbacks
//!
//! A callback must not panic. If one does, the panic is caught on the drop
//! path, logged through `tracing`, and the process is aborted. This happens
//! whether or not another panic is already unwinding.
//!
//! # Strict mode
//!
//! With the `strict` cargo feature, callbacks must also implement
//! [`Nothrow`], turning "must not panic" into a compile-time requirement.
//! Plain closures and function pointers do not qualify; [`no_panic`] declares
//! a closure panic-free. Type-erased callables like `Box<dyn FnOnce()>` can
//! never qualify on their own.
//!
//! To make a guard only when a value qualifies, and do something else when
//! it does not, see [`try_create_guard!`] in the [`probe`] module.

#[macro_use]
extern crate tracing;

mod guard;
pub mod probe;
mod utils;

pub use guard::callback::{no_panic, Acceptable, Callback, NoPanic, Nothrow};
pub use guard::{create_guard, ScopeGuard};

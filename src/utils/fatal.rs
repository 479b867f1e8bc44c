use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::process;

/// Runs `f`, aborting the process if it panics.
///
/// Used on drop paths, where a panic must never escape.
pub(crate) fn abort_on_panic<R>(what: &str, f: impl FnOnce() -> R) -> R {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(ret) => ret,
        Err(payload) => {
            error!(
                unwinding = std::thread::panicking(),
                "{what} panicked: {}; aborting",
                payload_message(payload.as_ref()),
            );
            process::abort()
        }
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}

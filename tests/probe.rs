mod common;

use std::cell::Cell;

use scope_exit::{accepts_callback, create_guard, no_panic, try_create_guard, Callback, NoPanic};

use common::{inc, init_tracing};

/// Guards `value` if it qualifies, otherwise guards a bump of `fallbacks`.
macro_rules! guard_or_fall_back {
    ($value:expr, $fallbacks:expr) => {
        match try_create_guard!($value) {
            Ok(guard) => drop(guard),
            Err(_rejected) => drop(create_guard(no_panic(|| inc($fallbacks)))),
        }
    };
}

#[test]
fn prefers_the_given_callback() {
    init_tracing();
    let count = Cell::new(0);
    let fallbacks = Cell::new(0);

    guard_or_fall_back!(no_panic(|| {}), &fallbacks);
    assert_eq!(count.get(), 0);
    guard_or_fall_back!(no_panic(|| count.set(999)), &fallbacks);
    assert_eq!(count.get(), 999);
    assert_eq!(fallbacks.get(), 0);
}

#[test]
fn plain_closure_depends_on_mode() {
    let count = Cell::new(0);
    let fallbacks = Cell::new(0);

    guard_or_fall_back!(|| count.set(10101), &fallbacks);
    if cfg!(feature = "strict") {
        assert_eq!((count.get(), fallbacks.get()), (0, 1));
    } else {
        assert_eq!((count.get(), fallbacks.get()), (10101, 0));
    }
}

#[test]
fn non_callables_fall_back() {
    let count = Cell::new(0);
    let fallbacks = Cell::new(0);

    guard_or_fall_back!(123_i32, &fallbacks);
    assert_eq!(fallbacks.get(), 1);
    guard_or_fall_back!(false, &fallbacks);
    assert_eq!(fallbacks.get(), 2);
    guard_or_fall_back!("rubbish", &fallbacks);
    assert_eq!(fallbacks.get(), 3);
    guard_or_fall_back!(&count, &fallbacks);
    assert_eq!(fallbacks.get(), 4);
    assert_eq!(count.get(), 0);
}

#[test]
fn callables_taking_arguments_fall_back() {
    let fallbacks = Cell::new(0);

    guard_or_fall_back!(inc, &fallbacks);
    assert_eq!(fallbacks.get(), 1);
    guard_or_fall_back!(|_: f32, _: bool| {}, &fallbacks);
    assert_eq!(fallbacks.get(), 2);
}

#[test]
fn callables_returning_values_fall_back() {
    let fallbacks = Cell::new(0);

    guard_or_fall_back!(|| "returning", &fallbacks);
    assert_eq!(fallbacks.get(), 1);
    guard_or_fall_back!(|| true, &fallbacks);
    assert_eq!(fallbacks.get(), 2);
}

#[test]
fn function_object_without_nothrow_depends_on_mode() {
    struct Unmarked<'a>(&'a Cell<u32>);

    impl Callback for Unmarked<'_> {
        fn invoke(self) {
            inc(self.0);
        }
    }

    let count = Cell::new(0);
    let fallbacks = Cell::new(0);
    guard_or_fall_back!(Unmarked(&count), &fallbacks);
    if cfg!(feature = "strict") {
        assert_eq!((count.get(), fallbacks.get()), (0, 1));
    } else {
        assert_eq!((count.get(), fallbacks.get()), (1, 0));
    }
}

/// Never fails to close.
#[derive(Default)]
struct LogFile {
    closed: Cell<u32>,
}

impl LogFile {
    fn close(&self) {
        inc(&self.closed);
    }
}

/// Reports whether the peer acknowledged the close.
#[derive(Default)]
struct Socket {
    closed: Cell<u32>,
}

impl Socket {
    fn close(&self) -> bool {
        inc(&self.closed);
        true
    }
}

/// May panic on close, and nobody has said otherwise.
#[derive(Default)]
struct Pipe {
    closed: Cell<u32>,
}

impl Pipe {
    fn close(&self) {
        inc(&self.closed);
    }
}

#[test]
fn closing_streams_on_scope_exit() {
    let fallbacks = Cell::new(0);

    let log = LogFile::default();
    guard_or_fall_back!(no_panic(|| log.close()), &fallbacks);
    assert_eq!((log.closed.get(), fallbacks.get()), (1, 0));

    let socket = Socket::default();
    guard_or_fall_back!(|| socket.close(), &fallbacks);
    assert_eq!((socket.closed.get(), fallbacks.get()), (0, 1));

    let pipe = Pipe::default();
    guard_or_fall_back!(|| pipe.close(), &fallbacks);
    if cfg!(feature = "strict") {
        assert_eq!((pipe.closed.get(), fallbacks.get()), (0, 2));
    } else {
        assert_eq!((pipe.closed.get(), fallbacks.get()), (1, 1));
    }
}

#[test]
fn rejected_value_is_handed_back() {
    match try_create_guard!(String::from("not a callback")) {
        Ok(never) => match never {},
        Err(value) => assert_eq!(value, "not a callback"),
    }

    let answer = || 42;
    match try_create_guard!(answer) {
        Ok(never) => match never {},
        Err(answer) => assert_eq!(answer(), 42),
    }
}

#[test]
fn accepted_guard_is_live() {
    let count = Cell::new(0);
    {
        let mut guard = match try_create_guard!(no_panic(|| inc(&count))) {
            Ok(guard) => guard,
            Err(never) => match never {},
        };
        assert!(guard.is_active());
        guard.dismiss();
    }
    assert_eq!(count.get(), 0);
}

#[test]
fn acceptance_by_type() {
    assert!(accepts_callback!(type NoPanic<fn()>));
    assert!(accepts_callback!(type NoPanic<Box<dyn FnOnce()>>));
    assert!(!accepts_callback!(type fn() -> u8));
    assert!(!accepts_callback!(type fn(u8)));
    assert!(!accepts_callback!(type String));

    // Type-erased callables can never be declared panic-free themselves.
    assert_eq!(accepts_callback!(type Box<dyn FnOnce()>), !cfg!(feature = "strict"));
    assert_eq!(accepts_callback!(type fn()), !cfg!(feature = "strict"));
}

#[test]
fn acceptance_by_value_only_borrows() {
    let count = Cell::new(0);
    let callback = || inc(&count);
    assert_eq!(accepts_callback!(callback), !cfg!(feature = "strict"));
    callback();
    assert_eq!(count.get(), 1);

    let wrapped = no_panic(|| inc(&count));
    assert!(accepts_callback!(wrapped));
    assert!(!accepts_callback!(count));
}

fn accepts_in_generic_context<T>(value: T) -> bool {
    accepts_callback!(value)
}

#[test]
fn generic_context_always_falls_back() {
    assert!(!accepts_in_generic_context(no_panic(|| {})));
    assert!(!accepts_in_generic_context(123_u8));
}

#![allow(dead_code)]

use std::cell::Cell;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init()
        .ok();
}

pub fn inc(count: &Cell<u32>) {
    count.set(count.get() + 1);
}

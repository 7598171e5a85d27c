//! Common utilities for tests

use std::cell::Cell;
use std::rc::Rc;

use quark::{Clock, Config, FileSystem, MemDisk};

pub const ORANGE: &str = "\x1b[38;5;214m";
pub const RESET: &str = "\x1b[0m";

/// Provides a macro for logging messages during tests.
/// e.g. log!("placeholder") -> println!("[test] placeholder");
#[macro_export]
macro_rules! log {
    ($msg:expr, $($arg:tt)*) => {
        println!("{}[test] {}{}", crate::common::ORANGE, format!($msg, $($arg)*), crate::common::RESET)
    };
}

/// Clock the test drives by hand, so timestamps and checksums are predictable.
#[derive(Clone)]
pub struct ManualClock(Rc<Cell<i64>>);

impl ManualClock {
    pub fn new(start: i64) -> Self {
        ManualClock(Rc::new(Cell::new(start)))
    }

    pub fn set(&self, now: i64) {
        self.0.set(now);
    }

    pub fn advance(&self, secs: i64) {
        self.0.set(self.0.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.0.get()
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn manual_fs(config: Config, start: i64) -> (FileSystem<MemDisk>, ManualClock) {
    init_tracing();
    let clock = ManualClock::new(start);
    let fs = FileSystem::format(MemDisk::new(config.max_blocks), config, Box::new(clock.clone()))
        .unwrap();
    (fs, clock)
}

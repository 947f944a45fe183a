pub mod broker;
pub mod import;
pub mod tracing;
pub mod util;

extern crate lazy_static;

#[cfg(any(test, feature = "testlib"))]
pub mod testlib;

#[cfg(feature = "cliapp")]
pub mod cmd;

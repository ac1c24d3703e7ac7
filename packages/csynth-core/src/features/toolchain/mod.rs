//! External toolchain
//!
//! Profiler, compilers, the instrumented binary and the optional CompCert
//! interpreter, each run as a child process with a wall-clock timeout.

pub mod infrastructure;
pub mod ports;

pub use infrastructure::{CommandRunner, CompcertValidator, ProcessBackend};
pub use ports::{ExecutionBackend, MutantValidator};

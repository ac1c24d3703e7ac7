//! Instrumentation Engine
//!
//! Attaches environment variables to each tag, emits the tag-check
//! functions and splices before/inline/after calls into the source so one
//! run of the program reports every tag's values.

pub mod domain;
pub mod infrastructure;

pub use domain::{select_environment, tag_check_call_args, tag_check_definition};
pub use infrastructure::{instrument, InstrumentOptions, INSTRUMENTATION_PRELUDE};

//! Pure instrumentation logic: environment choice and tag-check text

mod env_selector;
mod tag_check;

pub use env_selector::select_environment;
pub use tag_check::{tag_check_call_args, tag_check_definition};

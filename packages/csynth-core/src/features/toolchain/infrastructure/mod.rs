mod command_runner;
mod compcert;
mod process_backend;

pub use command_runner::CommandRunner;
pub use compcert::CompcertValidator;
pub use process_backend::ProcessBackend;

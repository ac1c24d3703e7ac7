mod loader;

pub use loader::FunctionDb;

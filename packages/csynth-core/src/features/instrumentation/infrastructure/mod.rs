mod instrumenter;

pub use instrumenter::{instrument, InstrumentOptions, INSTRUMENTATION_PRELUDE};

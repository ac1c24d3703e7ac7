//! Constants shared by instrumentation, tracking and synthesis

/// Value printed by a tag-check guard instead of dereferencing a null address
pub const INVALID_TAG_VALUE: i128 = 111;

/// Largest literal magnitude some verification backends accept (2^62)
pub const BACKEND_CONST_LIMIT: i128 = 1 << 62;

/// Loop-induction names that seeds commonly leave uninitialized before their loop
pub const RESERVED_LOOP_NAMES: [&str; 3] = ["i", "j", "k"];

/// Standard-width typedefs a seed already declares; re-emitting them would redefine
pub const IGNORED_TYPEDEFS: [&str; 9] = [
    "int8_t", "uint8_t", "int16_t", "uint16_t", "int32_t", "uint32_t", "int64_t", "uint64_t",
    "char",
];

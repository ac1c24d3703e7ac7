mod profile_parser;
mod tracker;

pub use profile_parser::parse_profile;
pub use tracker::track_stability;

//! Stability domain types

/// One `Tag<id>:<primary>[:<env>...]` line of profiler output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub tag_id: u32,
    pub primary: i128,
    pub environment: Vec<i128>,
}

/// Outcome of tracking one profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StabilityReport {
    /// Tags that printed at least once, in first-seen (execution) order
    pub alive_tags: Vec<u32>,
    /// Alive tags observed at least twice
    pub corroborated_tags: Vec<u32>,
    /// Lines naming a tag absent from the table
    pub unknown_lines: usize,
}

impl StabilityReport {
    pub fn is_alive(&self, tag_id: u32) -> bool {
        self.alive_tags.contains(&tag_id)
    }
}

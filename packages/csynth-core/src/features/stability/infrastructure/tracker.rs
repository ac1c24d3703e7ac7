//! Value-stability tracking
//!
//! First value wins; any later difference or a sentinel reading degrades a
//! variable for good. Environment values are trusted only when their tag
//! printed at least twice, so a tag seen once loses its whole environment.

use super::super::domain::StabilityReport;
use super::profile_parser::parse_profile;
use crate::shared::models::TagTable;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Feed profiler `output` into `tags` and report which tags ran
pub fn track_stability(tags: &mut TagTable, output: &str) -> StabilityReport {
    let mut report = StabilityReport::default();
    let mut seen: HashMap<u32, usize> = HashMap::new();

    for observation in parse_profile(output) {
        let Some(tag) = tags.get_mut(observation.tag_id) else {
            report.unknown_lines += 1;
            continue;
        };

        let count = seen.entry(observation.tag_id).or_insert(0);
        *count += 1;
        match *count {
            1 => report.alive_tags.push(observation.tag_id),
            2 => report.corroborated_tags.push(observation.tag_id),
            _ => {}
        }

        tag.primary_var.record_observation(observation.primary);

        if observation.environment.len() != tag.environment.len() {
            debug!(
                tag = observation.tag_id,
                printed = observation.environment.len(),
                expected = tag.environment.len(),
                "environment arity mismatch"
            );
        }
        for (var, value) in tag.environment.iter_mut().zip(&observation.environment) {
            var.record_observation(*value);
        }
    }

    for &tag_id in &report.alive_tags {
        if seen.get(&tag_id).copied().unwrap_or(0) >= 2 {
            continue;
        }
        if let Some(tag) = tags.get_mut(tag_id) {
            tag.environment.iter_mut().for_each(|var| var.mark_unstable());
        }
    }

    if report.unknown_lines > 0 {
        warn!(
            lines = report.unknown_lines,
            "profile mentions tags missing from the analysis"
        );
    }
    debug!(
        alive = report.alive_tags.len(),
        corroborated = report.corroborated_tags.len(),
        "stability tracked"
    );
    report
}

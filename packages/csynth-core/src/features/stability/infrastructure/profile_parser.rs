//! Profiler output parsing
//!
//! Output is split on whitespace; tokens that are not a well-formed tag
//! line (the seed's own prints, checksums) are ignored.

use super::super::domain::Observation;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static TAG_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Tag(\d+)((?::-?\d+)+)$").expect("tag line regex"));

/// Observations in emission order
pub fn parse_profile(output: &str) -> Vec<Observation> {
    output
        .split_whitespace()
        .filter_map(|token| {
            let parsed = parse_token(token);
            if parsed.is_none() && token.contains("Tag") {
                trace!(token, "skipping malformed tag token");
            }
            parsed
        })
        .collect()
}

fn parse_token(token: &str) -> Option<Observation> {
    let caps = TAG_LINE.captures(token)?;
    let tag_id = caps.get(1)?.as_str().parse().ok()?;
    let values = caps
        .get(2)?
        .as_str()
        .split(':')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i128>().ok())
        .collect::<Option<Vec<_>>>()?;
    let (primary, environment) = values.split_first()?;
    Some(Observation {
        tag_id,
        primary: *primary,
        environment: environment.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_lines() {
        let out = "Tag3:5\nTag4:-1:200:18446744073709551615\nchecksum = 9A\nTag3:6\n";
        let obs = parse_profile(out);
        assert_eq!(
            obs,
            vec![
                Observation {
                    tag_id: 3,
                    primary: 5,
                    environment: vec![]
                },
                Observation {
                    tag_id: 4,
                    primary: -1,
                    environment: vec![200, 18_446_744_073_709_551_615]
                },
                Observation {
                    tag_id: 3,
                    primary: 6,
                    environment: vec![]
                },
            ]
        );
    }

    #[test]
    fn test_malformed_tokens_ignored() {
        let out = "Tag Tag5 Tag5: Tag5:x Tagx:1 MyTag1:2 Tag6:1:2";
        let obs = parse_profile(out);
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].tag_id, 6);
    }
}

//! SRT-style caption parsing and time-based selection.
//!
//! The parser is deliberately forgiving: blocks without a time-range
//! line are dropped, malformed timestamps fall back to zero, and cue
//! index lines are filtered out. Nothing here raises an error for bad
//! input — a caption file that fails to parse simply yields fewer
//! (or zero) captions.

use serde::{Deserialize, Serialize};

/// A single timed caption, immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    /// Start of the display interval, in seconds.
    pub start: f64,
    /// End of the display interval, in seconds.
    pub end: f64,
    /// Caption text; simultaneous source lines are joined with `\n`.
    pub text: String,
}

/// Converts an `H:MM:SS[.,mmm]` timestamp to total seconds.
///
/// Accepts either a comma or a period as the fractional separator.
/// Anything that does not split into exactly three colon-separated
/// components yields 0.0.
pub fn to_seconds(time: &str) -> f64 {
    let normalized = time.replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();
    if parts.len() != 3 {
        return 0.0;
    }
    let field = |s: &str| s.trim().parse::<f64>().unwrap_or(0.0);
    field(parts[0]) * 3600.0 + field(parts[1]) * 60.0 + field(parts[2])
}

fn is_index_line(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

/// Parses raw SRT text into an ordered list of [`Caption`]s.
///
/// Blocks are separated by one or more blank lines. Within a block,
/// pure-index lines are discarded, the first line containing `-->` is
/// the time range, and every line after it is caption text. Blocks
/// with no time-range line are silently skipped. Input block order is
/// preserved; monotonicity is not enforced.
pub fn parse_srt(data: &str) -> Vec<Caption> {
    let data = data.replace('\r', "");
    let data = data.trim();

    // Runs of more than one blank line produce empty pseudo-blocks,
    // which fall out below for lack of a time-range line.
    let mut captions = Vec::new();
    for block in data.split("\n\n") {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !is_index_line(l))
            .collect();

        let Some(time_idx) = lines.iter().position(|l| l.contains("-->")) else {
            continue;
        };

        let mut range = lines[time_idx].split("-->");
        let start = range.next().map(to_seconds).unwrap_or(0.0);
        let end = range.next().map(to_seconds).unwrap_or(0.0);

        captions.push(Caption {
            start,
            end,
            text: lines[time_idx + 1..].join("\n"),
        });
    }
    captions
}

/// Returns the captions whose interval contains `t`, inclusive at both
/// endpoints, in original order.
pub fn active_captions(captions: &[Caption], t: f64) -> Vec<&Caption> {
    captions
        .iter()
        .filter(|c| t >= c.start && t <= c.end)
        .collect()
}

/// Joins simultaneously-active captions with a line break between them.
pub fn joined_text(captions: &[Caption], t: f64) -> String {
    active_captions(captions, t)
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BLOCKS: &str = "1\n00:00:01,500 --> 00:00:03,000\nhello\n\n2\n00:00:04,000 --> 00:00:05,250\nworld\nagain\n";

    #[test]
    fn test_parse_two_blocks() {
        let caps = parse_srt(TWO_BLOCKS);
        assert_eq!(caps.len(), 2);
        assert_eq!(caps[0].start, 1.5);
        assert_eq!(caps[0].end, 3.0);
        assert_eq!(caps[0].text, "hello");
        assert_eq!(caps[1].start, 4.0);
        assert_eq!(caps[1].end, 5.25);
        assert_eq!(caps[1].text, "world\nagain");
    }

    #[test]
    fn test_index_lines_never_in_text() {
        let caps = parse_srt(TWO_BLOCKS);
        for c in &caps {
            assert!(!c.text.contains('1') && !c.text.contains('2'));
        }
    }

    #[test]
    fn test_block_without_time_line_dropped() {
        let input = "just some text\nwith no range\n\n1\n00:00:01,000 --> 00:00:02,000\nkept";
        let caps = parse_srt(input);
        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0].text, "kept");
    }

    #[test]
    fn test_period_fraction_separator() {
        let caps = parse_srt("00:00:01.500 --> 00:00:03.000\nhi");
        assert_eq!(caps[0].start, 1.5);
        assert_eq!(caps[0].end, 3.0);
    }

    #[test]
    fn test_crlf_input() {
        let caps = parse_srt("1\r\n00:00:01,000 --> 00:00:02,000\r\nhi\r\n");
        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0].text, "hi");
    }

    #[test]
    fn test_malformed_timestamp_is_zero() {
        assert_eq!(to_seconds("1:2"), 0.0);
        assert_eq!(to_seconds(""), 0.0);
        assert_eq!(to_seconds("a:b:c"), 0.0);
    }

    #[test]
    fn test_timestamp_hours() {
        assert_eq!(to_seconds("01:02:03,250"), 3723.25);
    }

    #[test]
    fn test_selection_inclusive_endpoints() {
        let caps = parse_srt("00:00:01,000 --> 00:00:02,000\nhi");
        assert_eq!(active_captions(&caps, 1.0).len(), 1);
        assert_eq!(active_captions(&caps, 2.0).len(), 1);
        assert_eq!(active_captions(&caps, 0.999).len(), 0);
        assert_eq!(active_captions(&caps, 2.001).len(), 0);
    }

    #[test]
    fn test_overlapping_captions_concatenate_in_order() {
        let input = "00:00:01,000 --> 00:00:05,000\nfirst\n\n00:00:02,000 --> 00:00:04,000\nsecond";
        let caps = parse_srt(input);
        assert_eq!(joined_text(&caps, 3.0), "first\nsecond");
    }

    #[test]
    fn test_no_active_caption_is_empty() {
        let caps = parse_srt(TWO_BLOCKS);
        assert_eq!(joined_text(&caps, 3.5), "");
    }
}

//! Barrage send gating and remote fan-in planning.
//!
//! A barrage is keyed by `(video, integer playback second, type)`. The
//! sender renders its own emoji immediately and records what it sent;
//! the fan-in pass then subtracts that one contribution so the sender
//! never sees its own emission twice.

use serde::{Deserialize, Serialize};

/// Per-type ceiling applied to a single second's remote count.
pub const MAX_EMISSIONS_PER_TYPE: u32 = 3;

/// Minimum milliseconds between two accepted local sends.
pub const SEND_DEBOUNCE_MS: f64 = 200.0;

/// Upper bound of the random release jitter, in milliseconds.
pub const RELEASE_JITTER_MS: f64 = 1500.0;

/// What the local viewer last sent: playback second plus type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarrageSignal {
    pub second: i64,
    pub kind: String,
}

/// Global debounce over local barrage sends.
///
/// Not per-type: two different emoji inside the window still count as
/// one spam attempt.
#[derive(Debug, Default)]
pub struct SendGate {
    last_accepted_ms: Option<f64>,
}

impl SendGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and arms the gate if `now_ms` is outside the
    /// debounce window of the previous accepted send.
    pub fn try_accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms - last < SEND_DEBOUNCE_MS {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }
}

/// Tracks the last integer second already fetched, so polling faster
/// than once per second never fetches the same second twice.
#[derive(Debug, Default)]
pub struct SecondTracker {
    last_checked: Option<i64>,
}

impl SecondTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once per distinct second value.
    pub fn advance(&mut self, second: i64) -> bool {
        if self.last_checked == Some(second) {
            return false;
        }
        self.last_checked = Some(second);
        true
    }
}

/// One planned burst: render `count` copies of the type's glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub kind: String,
    pub count: u32,
}

/// Turns one second's remote aggregate into render instructions.
///
/// Counts are clamped to [`MAX_EMISSIONS_PER_TYPE`]; if `last_sent`
/// matches this second and type, one emission is subtracted (the local
/// echo already showed it), floored at zero. Zero-count entries are
/// omitted. Input order is preserved.
pub fn plan_emissions(
    second: i64,
    counts: &[(String, u32)],
    last_sent: Option<&BarrageSignal>,
) -> Vec<Emission> {
    counts
        .iter()
        .filter_map(|(kind, raw)| {
            let mut count = (*raw).min(MAX_EMISSIONS_PER_TYPE);
            let is_own = last_sent.is_some_and(|s| s.second == second && s.kind == *kind);
            if is_own {
                count = count.saturating_sub(1);
            }
            (count > 0).then(|| Emission {
                kind: kind.clone(),
                count,
            })
        })
        .collect()
}

/// The read-modify-write applied to a shared barrage counter.
pub fn bump_transform(current: Option<i64>) -> i64 {
    current.unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u32)]) -> Vec<(String, u32)> {
        pairs.iter().map(|(k, n)| ((*k).to_string(), *n)).collect()
    }

    #[test]
    fn test_send_gate_debounces() {
        let mut gate = SendGate::new();
        assert!(gate.try_accept(1000.0));
        assert!(!gate.try_accept(1100.0));
        assert!(gate.try_accept(1200.0));
    }

    #[test]
    fn test_send_gate_is_global_not_per_type() {
        // one gate serves every type, so the window applies across them
        let mut gate = SendGate::new();
        assert!(gate.try_accept(0.0));
        assert!(!gate.try_accept(150.0));
    }

    #[test]
    fn test_second_tracker_fires_once_per_second() {
        let mut tracker = SecondTracker::new();
        assert!(tracker.advance(10));
        assert!(!tracker.advance(10));
        assert!(tracker.advance(11));
        // going backwards (seek) is a distinct second too
        assert!(tracker.advance(10));
    }

    #[test]
    fn test_plan_clamps_to_ceiling() {
        let plan = plan_emissions(5, &counts(&[("like", 9)]), None);
        assert_eq!(plan, vec![Emission { kind: "like".into(), count: 3 }]);
    }

    #[test]
    fn test_plan_subtracts_own_send() {
        let sent = BarrageSignal { second: 5, kind: "like".into() };
        let plan = plan_emissions(5, &counts(&[("like", 2)]), Some(&sent));
        assert_eq!(plan, vec![Emission { kind: "like".into(), count: 1 }]);
    }

    #[test]
    fn test_plan_own_only_send_renders_nothing() {
        let sent = BarrageSignal { second: 5, kind: "like".into() };
        let plan = plan_emissions(5, &counts(&[("like", 1)]), Some(&sent));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_dedup_requires_matching_second_and_type() {
        let sent = BarrageSignal { second: 4, kind: "like".into() };
        let plan = plan_emissions(5, &counts(&[("like", 2), ("clap", 1)]), Some(&sent));
        assert_eq!(
            plan,
            vec![
                Emission { kind: "like".into(), count: 2 },
                Emission { kind: "clap".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_bump_transform_counts_from_zero() {
        assert_eq!(bump_transform(None), 1);
        assert_eq!(bump_transform(Some(3)), 4);
    }
}

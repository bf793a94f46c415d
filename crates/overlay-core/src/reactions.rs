//! Reaction type registries and counter transforms.
//!
//! Two fixed registries share the identifier space: the wall set is
//! small and counted, the barrage set is the full display-only palette
//! shown in the emoji drawer. Any identifier that reaches the UI must
//! resolve through [`glyph_for`], which searches both.

use serde::{Deserialize, Serialize};

/// One entry of a reaction registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionKind {
    /// Stable identifier, used in store paths and storage keys.
    pub id: &'static str,
    /// Display glyph.
    pub icon: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

/// Counted wall reactions, rendered as toggle buttons with live totals.
pub const WALL_REACTIONS: &[ReactionKind] = &[
    ReactionKind { id: "like", icon: "\u{1F44D}", label: "讚" },
    ReactionKind { id: "clap", icon: "\u{1F44F}", label: "拍手" },
    ReactionKind { id: "love", icon: "\u{2764}\u{FE0F}", label: "愛心" },
    ReactionKind { id: "laugh", icon: "\u{1F602}", label: "笑死" },
    ReactionKind { id: "wow", icon: "\u{1F62E}", label: "驚訝" },
    ReactionKind { id: "fire", icon: "\u{1F525}", label: "火" },
];

/// Uncounted barrage palette shown in the emoji drawer.
pub const BARRAGE_REACTIONS: &[ReactionKind] = &[
    ReactionKind { id: "rabbit", icon: "\u{1F430}", label: "兔子" },
    ReactionKind { id: "laugh", icon: "\u{1F602}", label: "笑死" },
    ReactionKind { id: "smitten", icon: "\u{1F970}", label: "喜歡" },
    ReactionKind { id: "hearteyes", icon: "\u{1F60D}", label: "愛死" },
    ReactionKind { id: "rofl", icon: "\u{1F923}", label: "爆笑" },
    ReactionKind { id: "cool", icon: "\u{1F60E}", label: "酷" },
    ReactionKind { id: "wow", icon: "\u{1F62E}", label: "驚訝" },
    ReactionKind { id: "like", icon: "\u{1F44D}", label: "讚" },
    ReactionKind { id: "clap", icon: "\u{1F44F}", label: "拍手" },
    ReactionKind { id: "pray", icon: "\u{1F64F}", label: "祈禱" },
    ReactionKind { id: "fire", icon: "\u{1F525}", label: "火" },
    ReactionKind { id: "love", icon: "\u{2764}\u{FE0F}", label: "愛心" },
];

/// Resolves an identifier to its glyph through the combined registries.
pub fn glyph_for(id: &str) -> Option<&'static str> {
    WALL_REACTIONS
        .iter()
        .chain(BARRAGE_REACTIONS.iter())
        .find(|k| k.id == id)
        .map(|k| k.icon)
}

/// The read-modify-write applied to a shared reaction counter.
///
/// `current` is the value read inside the transaction (`None` when the
/// path does not exist yet). A member toggling off decrements, floored
/// at zero; anyone else increments.
pub fn toggle_transform(current: Option<i64>, is_member: bool) -> i64 {
    let val = current.unwrap_or(0);
    if is_member { (val - 1).max(0) } else { val + 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_wall_id_resolves() {
        for kind in WALL_REACTIONS {
            assert!(glyph_for(kind.id).is_some(), "unresolved id {}", kind.id);
        }
    }

    #[test]
    fn test_every_barrage_id_resolves() {
        for kind in BARRAGE_REACTIONS {
            assert_eq!(glyph_for(kind.id), Some(kind.icon));
        }
    }

    #[test]
    fn test_unknown_id_has_no_glyph() {
        assert_eq!(glyph_for("nope"), None);
    }

    #[test]
    fn test_toggle_pair_is_idempotent() {
        // click: not a member yet -> increment
        let after_on = toggle_transform(Some(4), false);
        assert_eq!(after_on, 5);
        // click again: member -> decrement
        let after_off = toggle_transform(Some(after_on), true);
        assert_eq!(after_off, 4);
    }

    #[test]
    fn test_counter_never_negative() {
        assert_eq!(toggle_transform(Some(0), true), 0);
        assert_eq!(toggle_transform(None, true), 0);
    }

    #[test]
    fn test_missing_path_counts_from_zero() {
        assert_eq!(toggle_transform(None, false), 1);
    }
}

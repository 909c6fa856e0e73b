//! Avalanche danger scale
//!
//! Read-only for the life of the process. Levels run 1..=5; the aggregator
//! only ever emits 0..=4, so level 0 has no entry and level 5 is never an
//! aggregator output.

/// Description used when an assessment lands on level 0
pub const UNRATED_DESCRIPTION: &str =
    "Unrated - Combined factors fall below the lowest danger level";

/// Levels 1..=5 and their descriptions
pub const DANGER_SCALE: [(u8, &str); 5] = [
    (
        1,
        "Low - Isolated avalanches possible, especially on very steep slopes",
    ),
    (
        2,
        "Moderate - Avalanches possible on certain slopes and aspects",
    ),
    (3, "Considerable - Dangerous avalanche conditions widespread"),
    (
        4,
        "High - Very dangerous avalanche conditions, travel in avalanche terrain strongly discouraged",
    ),
    (
        5,
        "Extreme - Extremely dangerous avalanche conditions, travel in avalanche terrain prohibited",
    ),
];

/// Look up the description for a danger level
///
/// Returns `None` for any level without a scale entry, including 0.
pub fn describe(level: u8) -> Option<&'static str> {
    DANGER_SCALE
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, description)| *description)
}

/// Short label for a level ("low", "moderate", ...)
pub fn label(level: u8) -> &'static str {
    match level {
        1 => "low",
        2 => "moderate",
        3 => "considerable",
        4 => "high",
        5 => "extreme",
        _ => "unrated",
    }
}

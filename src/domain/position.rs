//! Fractional positioning for card ordering.
//!
//! Cards within a column are ordered by a floating-point sort position.
//! Moving a card computes a new position from its intended neighbors, so
//! no other card ever needs renumbering: dropping between two cards takes
//! the arithmetic midpoint of their positions, dropping at either end
//! leaves headroom for further insertions.

/// Position assigned to a card dropped into a column with no neighbors.
pub const DEFAULT_POSITION: f64 = 10.0;

/// Spacing left after the last card of a column, and between cards
/// appended in bulk. Each full step can be subdivided by later moves.
pub const POSITION_STEP: f64 = 10.0;

/// Computes the sort position for a card placed between two neighbors.
///
/// `previous` and `next` are the sort positions of the cards that should
/// end up immediately before and after the moved card, or `None` when the
/// card becomes the first or last of its column.
///
/// Repeated insertions into the same gap halve it each time, so after
/// enough moves two positions can collide within floating-point
/// precision. That is an accepted limitation of the scheme.
///
/// # Examples
/// ```
/// use taskboard_core::domain::position::position_between;
///
/// // Between two cards: the midpoint.
/// assert_eq!(position_between(Some(10.0), Some(20.0)), 15.0);
///
/// // Into an empty column.
/// assert_eq!(position_between(None, None), 10.0);
/// ```
pub fn position_between(previous: Option<f64>, next: Option<f64>) -> f64 {
    match (previous, next) {
        (None, None) => DEFAULT_POSITION,
        (Some(previous), Some(next)) => previous + (next - previous) / 2.0,
        (Some(previous), None) => previous + POSITION_STEP,
        // Halves toward an implicit lower bound of 0. Positions are
        // non-negative by construction (DEFAULT_POSITION and POSITION_STEP
        // only ever add above zero), so this matches (0 + next) / 2. If
        // negative positions are ever introduced this case must change.
        (None, Some(next)) => next / 2.0,
    }
}

/// Yields `POSITION_STEP, 2 * POSITION_STEP, ...` for the given length.
///
/// Offsets for appending a batch of cards after an existing position, and
/// for respacing a column whose gaps have been exhausted by repeated
/// midpoint insertion.
pub fn step_offsets(len: usize) -> impl Iterator<Item = f64> {
    (1..=len).map(|i| i as f64 * POSITION_STEP)
}

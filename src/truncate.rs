//! Length-budget truncation over tokenized template segments.

use crate::segment::TokenSegment;
use crate::{PetError, Result};

/// Total token count of `parts`, optionally restricted to shortenable
/// segments.
pub fn seq_length(parts: &[TokenSegment], only_shortenable: bool) -> usize {
    parts
        .iter()
        .filter(|p| !only_shortenable || p.shortenable)
        .map(|p| p.ids.len())
        .sum()
}

/// Drop the last token of the rightmost non-empty shortenable segment.
fn remove_last(parts: &mut [TokenSegment]) -> Result<()> {
    let last = parts
        .iter()
        .rposition(|p| p.shortenable && !p.ids.is_empty())
        .ok_or(PetError::NothingToTruncate)?;
    parts[last].ids.pop();
    Ok(())
}

/// Shorten `parts_a`/`parts_b` until their combined token count plus
/// `reserved` special-token slots fits within `max_length`.
///
/// One token is removed per round from whichever side currently has the
/// strictly greater shortenable token count; an exact tie removes from part
/// B. Removal always happens at the end of a segment, so earlier context
/// survives. Fails when the selected side has no shortenable token left.
pub fn truncate(
    parts_a: &mut [TokenSegment],
    parts_b: &mut [TokenSegment],
    reserved: usize,
    max_length: usize,
) -> Result<()> {
    let total = seq_length(parts_a, false) + seq_length(parts_b, false) + reserved;
    if total <= max_length {
        return Ok(());
    }

    for _ in 0..total - max_length {
        if seq_length(parts_a, true) > seq_length(parts_b, true) {
            remove_last(parts_a)?;
        } else {
            remove_last(parts_b)?;
        }
    }
    Ok(())
}

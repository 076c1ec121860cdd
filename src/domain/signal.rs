//! Crossover detection over trailing series values.

use crate::domain::error::BacksimError;

/// True iff `a` transitions from below `b` to above `b` over the trailing two
/// elements of each slice: one step ago `a < b`, now `a > b`.
///
/// Both slices need at least two elements, otherwise
/// [`BacksimError::InsufficientHistory`] is returned. NaN in any compared
/// slot (an indicator still warming up) compares false, so it yields
/// `Ok(false)` rather than an error.
pub fn crossover(a: &[f64], b: &[f64]) -> Result<bool, BacksimError> {
    let available = a.len().min(b.len());
    if available < 2 {
        return Err(BacksimError::InsufficientHistory {
            needed: 2,
            available,
        });
    }

    let (a_prev, a_curr) = (a[a.len() - 2], a[a.len() - 1]);
    let (b_prev, b_curr) = (b[b.len() - 2], b[b.len() - 1]);
    Ok(a_prev < b_prev && a_curr > b_curr)
}

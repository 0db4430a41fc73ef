use failure::Fail;

/// Everything that can go wrong while hunting for a seam.  The set is
/// deliberately tiny: the computation is pure, so the only failures
/// are bad input and a caller-imposed deadline expiring.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum SeamError {
    /// The grid failed its preconditions: zero dimensions, ragged
    /// rows, or a negative/non-finite energy value.  Raised before
    /// any dynamic-programming work begins.
    #[fail(display = "invalid energy grid: {}", reason)]
    InvalidGrid { reason: String },

    /// The caller's deadline expired.  Checked only between row
    /// iterations, so no partially-built seam ever escapes.
    #[fail(display = "seam search cancelled before row {}", row)]
    Cancelled { row: u32 },
}

impl SeamError {
    pub(crate) fn invalid<S: Into<String>>(reason: S) -> Self {
        SeamError::InvalidGrid {
            reason: reason.into(),
        }
    }
}

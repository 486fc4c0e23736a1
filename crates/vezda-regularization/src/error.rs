use thiserror::Error;

/// An error type for regularized solves.
#[derive(Error, Debug, PartialEq)]
pub enum RegularizationError {
    /// Two operands of the matrix chain are not conformable.
    #[error("Shape mismatch: {left} {left_shape:?} is not conformable with {right} {right_shape:?}")]
    ShapeMismatch {
        /// Label of the left-hand operand.
        left: &'static str,
        /// Shape (rows, cols) of the left-hand operand.
        left_shape: (usize, usize),
        /// Label of the right-hand operand.
        right: &'static str,
        /// Shape (rows, cols) of the right-hand operand.
        right_shape: (usize, usize),
    },

    /// The number of singular values does not fit the generalized diagonal.
    #[error("Got {count} singular values for a {nrows}x{ncols} diagonal, expected min({nrows}, {ncols})")]
    SingularValueCount {
        /// Number of singular values provided.
        count: usize,
        /// Rows of the diagonal matrix.
        nrows: usize,
        /// Columns of the diagonal matrix.
        ncols: usize,
    },

    /// The regularization parameter is negative or NaN.
    #[error("The regularization parameter must be non-negative")]
    InvalidAlpha,
}

#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Generalized diagonal helpers for the regularized pseudoinverse.
///
/// Filters the singular values with the Tikhonov factors and embeds them into
/// rectangular diagonal matrices conformable with the SVD factors.
pub mod diag;

/// Error types for regularized solves.
///
/// Defines [`RegularizationError`] for shape and parameter failures.
pub mod error;

/// Tikhonov-regularized solution of linear systems.
///
/// Provides the [`tikhonov()`] free function and the reusable [`TikhonovSolver`]
/// that validates one set of SVD factors and solves many right-hand sides.
pub mod tikhonov;

pub use diag::{diagsvd, regularized_singular_values};
pub use error::RegularizationError;
pub use tikhonov::{tikhonov, tikhonov_col, TikhonovParams, TikhonovSolver};

use faer::{linalg::matmul::matmul, Col, ColRef, ComplexField, Mat, MatRef, Parallelism};

use crate::diag::{diagsvd, regularized_singular_values};
use crate::error::RegularizationError;

/// Parameters of a Tikhonov solve.
#[derive(Debug, Clone, Copy)]
pub struct TikhonovParams<'p, R> {
    /// Regularization parameter, must be non-negative.
    pub alpha: R,
    /// Parallelism used by the matrix products.
    pub parallelism: Parallelism<'p>,
}

impl<R: ComplexField> Default for TikhonovParams<'_, R> {
    fn default() -> Self {
        Self {
            alpha: R::faer_zero(),
            parallelism: Parallelism::None,
        }
    }
}

/// Tikhonov solver over a fixed singular value decomposition.
///
/// Given `A = U diag(s) V^H`, the solver computes the regularized solution
///
/// ```text
/// x_alpha = V diag(s_i / (alpha + s_i^2)) U^H b
/// ```
///
/// The factors are borrowed and checked once on construction, so the same solver
/// can be reused for any number of right-hand sides and regularization parameters.
/// Both full (`U: m x m`, `V: n x n`) and thin (`U: m x k`, `V: n x k`) factors are
/// accepted.
///
/// # Example
///
/// ```
/// use vezda_regularization::TikhonovSolver;
///
/// let uh = faer::Mat::<f64>::identity(3, 3);
/// let v = faer::Mat::<f64>::identity(3, 3);
/// let s = faer::col![3.0, 2.0, 1.0];
/// let solver = TikhonovSolver::new(uh.as_ref(), s.as_ref(), v.as_ref()).unwrap();
///
/// let b = faer::col![1.0, 1.0, 1.0];
/// let x = solver.solve_col(b.as_ref(), 1.0).unwrap();
/// assert!((x.read(0) - 0.3).abs() < 1e-12);
/// assert!((x.read(1) - 0.4).abs() < 1e-12);
/// assert!((x.read(2) - 0.5).abs() < 1e-12);
/// ```
#[derive(Clone, Copy)]
pub struct TikhonovSolver<'a, E: ComplexField> {
    uh: MatRef<'a, E>,
    s: ColRef<'a, E::Real>,
    v: MatRef<'a, E>,
}

impl<'a, E: ComplexField> TikhonovSolver<'a, E> {
    /// Create a solver from the factors of `A = U diag(s) V^H`.
    ///
    /// # Arguments
    ///
    /// * `uh` - The Hermitian transpose of the left singular vectors.
    /// * `s` - The singular values.
    /// * `v` - The right singular vectors.
    ///
    /// # Errors
    ///
    /// Returns [`RegularizationError::SingularValueCount`] if the number of singular
    /// values does not fit the `v.ncols() x uh.nrows()` pseudoinverse diagonal.
    pub fn new(
        uh: MatRef<'a, E>,
        s: ColRef<'a, E::Real>,
        v: MatRef<'a, E>,
    ) -> Result<Self, RegularizationError> {
        let (nrows, ncols) = (v.ncols(), uh.nrows());
        if s.nrows() != nrows.min(ncols) {
            return Err(RegularizationError::SingularValueCount {
                count: s.nrows(),
                nrows,
                ncols,
            });
        }

        Ok(Self { uh, s, v })
    }

    /// Number of rows of the operator `A`, i.e. the length of a right-hand side.
    pub fn nrows(&self) -> usize {
        self.uh.ncols()
    }

    /// Number of columns of the operator `A`, i.e. the length of a solution.
    pub fn ncols(&self) -> usize {
        self.v.nrows()
    }

    /// The singular values the solver was built with.
    pub fn singular_values(&self) -> ColRef<'a, E::Real> {
        self.s
    }

    /// Solve for every column of `b` with the regularization parameter `alpha`.
    ///
    /// # Arguments
    ///
    /// * `b` - The right-hand sides with shape (m, p).
    /// * `alpha` - The regularization parameter.
    ///
    /// # Returns
    ///
    /// The regularized solutions with shape (n, p).
    pub fn solve(
        &self,
        b: MatRef<'_, E>,
        alpha: E::Real,
    ) -> Result<Mat<E>, RegularizationError> {
        self.solve_with(
            b,
            &TikhonovParams {
                alpha,
                ..Default::default()
            },
        )
    }

    /// Solve for every column of `b` with the given parameters.
    pub fn solve_with(
        &self,
        b: MatRef<'_, E>,
        params: &TikhonovParams<'_, E::Real>,
    ) -> Result<Mat<E>, RegularizationError> {
        // also rejects NaN
        if !(params.alpha >= <E::Real as ComplexField>::faer_zero()) {
            return Err(RegularizationError::InvalidAlpha);
        }

        if self.uh.ncols() != b.nrows() {
            return Err(RegularizationError::ShapeMismatch {
                left: "uh",
                left_shape: (self.uh.nrows(), self.uh.ncols()),
                right: "b",
                right_shape: (b.nrows(), b.ncols()),
            });
        }

        log::debug!(
            "tikhonov solve: alpha {:?}, uh {:?}, s {}, v {:?}, b {:?}",
            params.alpha,
            (self.uh.nrows(), self.uh.ncols()),
            self.s.nrows(),
            (self.v.nrows(), self.v.ncols()),
            (b.nrows(), b.ncols()),
        );

        let sigma = regularized_singular_values(self.s, params.alpha);
        let sp = diagsvd::<E>(sigma.as_ref(), self.v.ncols(), self.uh.nrows())?;

        // right to left so the intermediates are only as wide as b
        let uh_b = product(self.uh, b, params.parallelism);
        let sp_uh_b = product(sp.as_ref(), uh_b.as_ref(), params.parallelism);

        Ok(product(self.v, sp_uh_b.as_ref(), params.parallelism))
    }

    /// Solve for a single right-hand side.
    ///
    /// # Arguments
    ///
    /// * `b` - The right-hand side with length m.
    /// * `alpha` - The regularization parameter.
    ///
    /// # Returns
    ///
    /// The regularized solution with length n.
    pub fn solve_col(
        &self,
        b: ColRef<'_, E>,
        alpha: E::Real,
    ) -> Result<Col<E>, RegularizationError> {
        let x = self.solve(b.as_2d(), alpha)?;
        Ok(x.col(0).to_owned())
    }

    /// Solve for a single right-hand side with the given parameters.
    pub fn solve_col_with(
        &self,
        b: ColRef<'_, E>,
        params: &TikhonovParams<'_, E::Real>,
    ) -> Result<Col<E>, RegularizationError> {
        let x = self.solve_with(b.as_2d(), params)?;
        Ok(x.col(0).to_owned())
    }
}

/// Compute the Tikhonov-regularized solution of `A x = b` from the SVD of `A`.
///
/// With `A = U diag(s) V^H`, returns `V diag(s_i / (alpha + s_i^2)) U^H b`.
/// `alpha = 0` gives the pseudoinverse solution; a zero singular value then
/// produces `NaN` in the result.
///
/// # Arguments
///
/// * `uh` - The Hermitian transpose of the left singular vectors.
/// * `s` - The singular values.
/// * `v` - The right singular vectors.
/// * `b` - The right-hand side with shape (m, p).
/// * `alpha` - The regularization parameter.
///
/// # Returns
///
/// The regularized solution with shape (n, p).
///
/// # Errors
///
/// * [`RegularizationError::ShapeMismatch`] if `b` is not conformable with `uh`.
/// * [`RegularizationError::SingularValueCount`] if `s` does not fit `uh` and `v`.
/// * [`RegularizationError::InvalidAlpha`] if `alpha` is negative or NaN.
pub fn tikhonov<E: ComplexField>(
    uh: MatRef<'_, E>,
    s: ColRef<'_, E::Real>,
    v: MatRef<'_, E>,
    b: MatRef<'_, E>,
    alpha: E::Real,
) -> Result<Mat<E>, RegularizationError> {
    TikhonovSolver::new(uh, s, v)?.solve(b, alpha)
}

/// Compute the Tikhonov-regularized solution for a single right-hand side.
///
/// See [`tikhonov`].
pub fn tikhonov_col<E: ComplexField>(
    uh: MatRef<'_, E>,
    s: ColRef<'_, E::Real>,
    v: MatRef<'_, E>,
    b: ColRef<'_, E>,
    alpha: E::Real,
) -> Result<Col<E>, RegularizationError> {
    TikhonovSolver::new(uh, s, v)?.solve_col(b, alpha)
}

fn product<E: ComplexField>(
    lhs: MatRef<'_, E>,
    rhs: MatRef<'_, E>,
    parallelism: Parallelism<'_>,
) -> Mat<E> {
    let mut out = Mat::<E>::zeros(lhs.nrows(), rhs.ncols());
    matmul(&mut out.as_mut(), lhs, rhs, None, E::faer_one(), parallelism);
    out
}

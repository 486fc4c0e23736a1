use faer::{Col, ColRef, ComplexField, Mat, RealField};

use crate::error::RegularizationError;

/// Filter the singular values with the Tikhonov factors.
///
/// Computes `sigma_i = s_i / (alpha + s_i^2)` element-wise. With `alpha = 0` a zero
/// singular value yields `NaN` (0/0), which is returned as is.
///
/// # Arguments
///
/// * `s` - The singular values of the operator.
/// * `alpha` - The regularization parameter.
///
/// # Returns
///
/// The regularized inverse singular values, with the same length as `s`.
pub fn regularized_singular_values<R: RealField>(s: ColRef<'_, R>, alpha: R) -> Col<R> {
    Col::from_fn(s.nrows(), |i| {
        let s_i = s.read(i);
        s_i.faer_div(alpha.faer_add(s_i.faer_mul(s_i)))
    })
}

/// Embed real values into the leading diagonal of a `nrows x ncols` matrix.
///
/// The number of values must be `min(nrows, ncols)`; the remaining rows or columns
/// are filled with zeros.
///
/// # Arguments
///
/// * `sigma` - The values to place on the diagonal.
/// * `nrows` - The number of rows of the output matrix.
/// * `ncols` - The number of columns of the output matrix.
///
/// # Errors
///
/// Returns [`RegularizationError::SingularValueCount`] if the length of `sigma` does
/// not match the shorter side of the output.
///
/// # Example
///
/// ```
/// use vezda_regularization::diagsvd;
///
/// let sigma = faer::col![1.0, 2.0];
/// let d = diagsvd::<f64>(sigma.as_ref(), 2, 3).unwrap();
/// assert_eq!(d.nrows(), 2);
/// assert_eq!(d.ncols(), 3);
/// assert_eq!(d.read(1, 1), 2.0);
/// assert_eq!(d.read(1, 2), 0.0);
/// ```
pub fn diagsvd<E: ComplexField>(
    sigma: ColRef<'_, E::Real>,
    nrows: usize,
    ncols: usize,
) -> Result<Mat<E>, RegularizationError> {
    let count = sigma.nrows();
    if count != nrows.min(ncols) {
        return Err(RegularizationError::SingularValueCount {
            count,
            nrows,
            ncols,
        });
    }

    let mut out = Mat::<E>::zeros(nrows, ncols);
    for i in 0..count {
        out.write(i, i, E::faer_from_real(sigma.read(i)));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_regularized_singular_values() {
        let s = faer::col![3.0, 2.0, 1.0];

        let sigma = regularized_singular_values(s.as_ref(), 0.0);
        assert_relative_eq!(sigma.read(0), 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(sigma.read(1), 0.5, epsilon = 1e-12);
        assert_relative_eq!(sigma.read(2), 1.0, epsilon = 1e-12);

        let sigma = regularized_singular_values(s.as_ref(), 1.0);
        assert_relative_eq!(sigma.read(0), 0.3, epsilon = 1e-12);
        assert_relative_eq!(sigma.read(1), 0.4, epsilon = 1e-12);
        assert_relative_eq!(sigma.read(2), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_regularized_zero_singular_value() {
        let s = faer::col![2.0_f64, 0.0];

        // 0 / (0 + 0) is left untouched
        let sigma = regularized_singular_values(s.as_ref(), 0.0);
        assert_relative_eq!(sigma.read(0), 0.5);
        assert!(sigma.read(1).is_nan());

        let sigma = regularized_singular_values(s.as_ref(), 0.5);
        assert_eq!(sigma.read(1), 0.0);
    }

    #[test]
    fn test_regularized_infinite_alpha() {
        let s = faer::col![3.0_f32, 1.0];
        let sigma = regularized_singular_values(s.as_ref(), f32::INFINITY);
        assert_eq!(sigma.read(0), 0.0);
        assert_eq!(sigma.read(1), 0.0);
    }

    #[test]
    fn test_diagsvd_tall() -> Result<(), RegularizationError> {
        let sigma = faer::col![1.0, 2.0];
        let d = diagsvd::<f64>(sigma.as_ref(), 4, 2)?;
        assert_eq!((d.nrows(), d.ncols()), (4, 2));
        for i in 0..4 {
            for j in 0..2 {
                let expected = if i == j { sigma.read(i) } else { 0.0 };
                assert_eq!(d.read(i, j), expected);
            }
        }
        Ok(())
    }

    #[test]
    fn test_diagsvd_wide() -> Result<(), RegularizationError> {
        let sigma = faer::col![5.0, 6.0];
        let d = diagsvd::<f64>(sigma.as_ref(), 2, 3)?;
        assert_eq!((d.nrows(), d.ncols()), (2, 3));
        assert_eq!(d.read(0, 0), 5.0);
        assert_eq!(d.read(1, 1), 6.0);
        assert_eq!(d.read(0, 2), 0.0);
        assert_eq!(d.read(1, 2), 0.0);
        assert_eq!(d.read(1, 0), 0.0);
        Ok(())
    }

    #[test]
    fn test_diagsvd_complex() -> Result<(), RegularizationError> {
        use faer::complex_native::c64;

        let sigma = faer::col![0.25, 4.0];
        let d = diagsvd::<c64>(sigma.as_ref(), 2, 2)?;
        assert_eq!(d.read(0, 0), c64::new(0.25, 0.0));
        assert_eq!(d.read(1, 1), c64::new(4.0, 0.0));
        assert_eq!(d.read(0, 1), c64::new(0.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_diagsvd_bad_count() {
        let sigma = faer::col![1.0, 2.0, 3.0];

        let res = diagsvd::<f64>(sigma.as_ref(), 3, 2);
        assert_eq!(
            res.err(),
            Some(RegularizationError::SingularValueCount {
                count: 3,
                nrows: 3,
                ncols: 2,
            })
        );

        let res = diagsvd::<f64>(sigma.as_ref(), 4, 4);
        assert!(res.is_err());
    }
}

//! Kernel functions for the support-vector classifier.
//!
//! - Linear kernel: k(x, y) = x·y
//! - RBF kernel: k(x, y) = exp(-γ||x-y||²)
//!
//! linfa parameterises the gaussian kernel as exp(-||x-y||²/eps), so the RBF
//! kernel is handed to the solver with `eps = 1/γ`.

use ndarray::{Array2, ArrayView1};

/// How gamma is chosen for the RBF kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gamma {
    /// `1 / (n_features * variance of every training value)`
    Scale,
    /// Fixed gamma
    Value(f64),
}

/// Kernel requested by the caller, before training data is known
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelSpec {
    Linear,
    Rbf(Gamma),
}

impl Default for KernelSpec {
    fn default() -> Self {
        KernelSpec::Rbf(Gamma::Scale)
    }
}

impl KernelSpec {
    /// Resolve the spec against the training matrix.
    pub(crate) fn resolve(&self, records: &Array2<f64>) -> Kernel {
        match *self {
            KernelSpec::Linear => Kernel::Linear,
            KernelSpec::Rbf(Gamma::Value(gamma)) => Kernel::Rbf { gamma },
            KernelSpec::Rbf(Gamma::Scale) => Kernel::Rbf {
                gamma: scale_gamma(records),
            },
        }
    }
}

/// A kernel with all parameters fixed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    Linear,
    Rbf { gamma: f64 },
}

impl Kernel {
    #[inline]
    pub fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        match *self {
            Kernel::Linear => x.dot(&y),
            Kernel::Rbf { gamma } => {
                let sq_dist: f64 = x.iter().zip(y.iter()).map(|(a, b)| (a - b) * (a - b)).sum();
                (-gamma * sq_dist).exp()
            }
        }
    }
}

/// Gamma used by `Gamma::Scale`.
///
/// Variance is taken over the whole matrix; a constant matrix falls back
/// to 1.0.
fn scale_gamma(records: &Array2<f64>) -> f64 {
    if records.is_empty() {
        return 1.0;
    }

    let variance = records.var(0.0);
    if variance > 0.0 {
        1.0 / (records.ncols() as f64 * variance)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rbf_kernel_identity_is_one() {
        let kernel = Kernel::Rbf { gamma: 0.5 };
        let x = array![1.0, 2.0, 3.0];
        assert_eq!(kernel.compute(x.view(), x.view()), 1.0);
    }

    #[test]
    fn test_rbf_kernel_decreases_with_distance() {
        let kernel = Kernel::Rbf { gamma: 0.1 };
        let origin = array![0.0, 0.0];
        let near = kernel.compute(origin.view(), array![1.0, 0.0].view());
        let far = kernel.compute(origin.view(), array![3.0, 0.0].view());
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn test_linear_kernel_is_dot_product() {
        let x = array![1.0, 2.0];
        let y = array![3.0, 4.0];
        assert_eq!(Kernel::Linear.compute(x.view(), y.view()), 11.0);
    }

    #[test]
    fn test_scale_gamma() {
        // Values 0, 2, 0, 2 -> mean 1, variance 1 -> gamma = 1 / (2 * 1)
        let records = array![[0.0, 2.0], [0.0, 2.0]];
        assert_eq!(scale_gamma(&records), 0.5);
    }

    #[test]
    fn test_scale_gamma_constant_matrix() {
        let records = array![[3.0, 3.0], [3.0, 3.0]];
        assert_eq!(scale_gamma(&records), 1.0);
    }

    #[test]
    fn test_resolve_fixed_gamma() {
        let kernel = KernelSpec::Rbf(Gamma::Value(0.25)).resolve(&array![[1.0]]);
        assert_eq!(kernel, Kernel::Rbf { gamma: 0.25 });
    }
}

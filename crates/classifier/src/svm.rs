//! Support-vector classifier with one-vs-one multi-class voting.
//!
//! One binary C-SVC is trained per pair of classes. At prediction time every
//! machine votes for one side of its pair and the class with most votes wins.
//!
//! - Decision function per pair: f(x) = Σ(αᵢ·yᵢ·k(x, xᵢ)) - rho
//! - Positive f(x) votes for the first class of the pair (smaller label)

use linfa::Dataset;
use linfa_svm::{Svm, SvmError};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{ClassifierError, Result};
use crate::kernel::{Gamma, Kernel, KernelSpec};
use crate::traits::{Classifier, Label};

/// Binary machine separating class `positive` (y = +1) from `negative` (y = -1)
#[derive(Debug, Clone)]
struct PairwiseMachine {
    /// Index into `FittedModel::classes`
    positive: usize,
    negative: usize,
    /// One row per support vector
    support_vectors: Array2<f64>,
    /// αᵢ·yᵢ for each support vector
    coefficients: Array1<f64>,
    rho: f64,
}

impl PairwiseMachine {
    fn decision_function(&self, kernel: &Kernel, x: ArrayView1<f64>) -> f64 {
        let sum: f64 = self
            .support_vectors
            .outer_iter()
            .zip(self.coefficients.iter())
            .map(|(sv, coef)| coef * kernel.compute(sv, x))
            .sum();
        sum - self.rho
    }
}

#[derive(Debug, Clone)]
struct FittedModel {
    kernel: Kernel,
    n_features: usize,
    /// Sorted, deduplicated labels
    classes: Vec<Label>,
    machines: Vec<PairwiseMachine>,
}

/// Multi-class C-SVC.
///
/// ## Usage
/// ```ignore
/// let mut svc = SupportVectorClassifier::new().with_c(1.0);
/// svc.fit(&samples, &labels)?;
/// let label = svc.predict(&[8.0, 3.0, 4.0, 1.0, 2000.0, 1.0])?;
/// ```
#[derive(Debug, Clone)]
pub struct SupportVectorClassifier {
    c: f64,
    kernel: KernelSpec,
    tolerance: f64,
    fitted: Option<FittedModel>,
}

impl SupportVectorClassifier {
    /// RBF kernel with scaled gamma, C = 1.0, tolerance 1e-3
    pub fn new() -> Self {
        Self {
            c: 1.0,
            kernel: KernelSpec::default(),
            tolerance: 1e-3,
            fitted: None,
        }
    }

    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn with_kernel(mut self, kernel: KernelSpec) -> Self {
        self.kernel = kernel;
        self
    }

    /// Stopping tolerance of the SVM solver
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Labels seen during `fit`, in ascending order.
    pub fn classes(&self) -> &[Label] {
        self.fitted
            .as_ref()
            .map(|m| m.classes.as_slice())
            .unwrap_or(&[])
    }

    /// Kernel resolved during `fit` (gamma is known only after training).
    pub fn kernel(&self) -> Option<Kernel> {
        self.fitted.as_ref().map(|m| m.kernel)
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Pairwise decision values.
    ///
    /// One value per class pair, ordered `(0,1), (0,2), …, (k-2,k-1)` over
    /// `classes()`. Positive values favour the first class of the pair.
    pub fn decision_function(&self, sample: &[f64]) -> Result<Vec<f64>> {
        let model = self.fitted.as_ref().ok_or(ClassifierError::NotFitted)?;
        if sample.len() != model.n_features {
            return Err(ClassifierError::DimensionMismatch {
                expected: model.n_features,
                found: sample.len(),
            });
        }

        let x = ArrayView1::from(sample);
        Ok(model
            .machines
            .iter()
            .map(|machine| machine.decision_function(&model.kernel, x))
            .collect())
    }

    fn validate_params(&self) -> Result<()> {
        if !(self.c > 0.0 && self.c.is_finite()) {
            return Err(ClassifierError::InvalidParameter {
                name: "c",
                value: self.c,
            });
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(ClassifierError::InvalidParameter {
                name: "tolerance",
                value: self.tolerance,
            });
        }
        if let KernelSpec::Rbf(Gamma::Value(gamma)) = self.kernel {
            if !(gamma > 0.0 && gamma.is_finite()) {
                return Err(ClassifierError::InvalidParameter {
                    name: "gamma",
                    value: gamma,
                });
            }
        }
        Ok(())
    }

    /// Train the machine for classes `positive` vs `negative`.
    fn fit_pair(
        &self,
        kernel: Kernel,
        records: &Array2<f64>,
        labels: &[Label],
        classes: &[Label],
        positive: usize,
        negative: usize,
    ) -> Result<PairwiseMachine> {
        let rows: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, label)| **label == classes[positive] || **label == classes[negative])
            .map(|(idx, _)| idx)
            .collect();
        let pair_records = records.select(Axis(0), &rows);
        let targets: Array1<bool> = rows
            .iter()
            .map(|&idx| labels[idx] == classes[positive])
            .collect();

        let params = Svm::<f64, bool>::params()
            .pos_neg_weights(self.c, self.c)
            .eps(self.tolerance);
        let params = match kernel {
            Kernel::Linear => params.linear_kernel(),
            Kernel::Rbf { gamma } => params.gaussian_kernel(1.0 / gamma),
        };

        let dataset = Dataset::new(pair_records.clone(), targets);
        let svm = linfa::traits::Fit::fit(&params, &dataset)
            .map_err(|e: SvmError| ClassifierError::Training(e.to_string()))?;

        // linfa returns signed coefficients, one per training row
        let support: Vec<usize> = svm
            .alpha
            .iter()
            .take(pair_records.nrows())
            .enumerate()
            .filter(|(_, alpha)| **alpha != 0.0)
            .map(|(idx, _)| idx)
            .collect();
        debug!(
            "Pair ({}, {}) fitted with {} support vectors (rho = {:.6})",
            classes[positive],
            classes[negative],
            support.len(),
            svm.rho
        );

        Ok(PairwiseMachine {
            positive,
            negative,
            support_vectors: pair_records.select(Axis(0), &support),
            coefficients: support.iter().map(|&idx| svm.alpha[idx]).collect(),
            rho: svm.rho,
        })
    }
}

impl Default for SupportVectorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for SupportVectorClassifier {
    fn name(&self) -> &str {
        "SupportVectorClassifier"
    }

    fn fit(&mut self, samples: &[Vec<f64>], labels: &[Label]) -> Result<()> {
        self.validate_params()?;
        let n_features = validate_training_set(samples, labels)?;

        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() < 2 {
            return Err(ClassifierError::TooFewClasses(classes.len()));
        }

        let records = Array2::from_shape_vec(
            (samples.len(), n_features),
            samples.iter().flatten().copied().collect(),
        )
        .map_err(|e| ClassifierError::Training(e.to_string()))?;

        let kernel = self.kernel.resolve(&records);
        debug!("Resolved kernel {:?} for {} classes", kernel, classes.len());

        let pairs: Vec<(usize, usize)> = (0..classes.len())
            .flat_map(|i| ((i + 1)..classes.len()).map(move |j| (i, j)))
            .collect();

        // Indexed parallel iterator keeps the pair order on collect
        let machines = pairs
            .par_iter()
            .map(|&(i, j)| self.fit_pair(kernel, &records, labels, &classes, i, j))
            .collect::<Result<Vec<_>>>()?;

        self.fitted = Some(FittedModel {
            kernel,
            n_features,
            classes,
            machines,
        });
        Ok(())
    }

    fn predict(&self, sample: &[f64]) -> Result<Label> {
        let decisions = self.decision_function(sample)?;
        let model = self.fitted.as_ref().ok_or(ClassifierError::NotFitted)?;

        let outcomes: Vec<(usize, usize, f64)> = model
            .machines
            .iter()
            .zip(decisions)
            .map(|(machine, value)| (machine.positive, machine.negative, value))
            .collect();
        Ok(model.classes[vote(model.classes.len(), &outcomes)])
    }
}

/// Majority vote over `(positive, negative, decision)` outcomes.
///
/// A decision above zero votes for `positive`, anything else for `negative`.
/// Ties go to the lowest class index.
fn vote(n_classes: usize, outcomes: &[(usize, usize, f64)]) -> usize {
    let mut votes = vec![0u32; n_classes];
    for &(positive, negative, value) in outcomes {
        if value > 0.0 {
            votes[positive] += 1;
        } else {
            votes[negative] += 1;
        }
    }

    let mut best = 0;
    for (idx, count) in votes.iter().enumerate() {
        if *count > votes[best] {
            best = idx;
        }
    }
    best
}

/// Checks shape and values of the training data and returns the sample width.
fn validate_training_set(samples: &[Vec<f64>], labels: &[Label]) -> Result<usize> {
    if samples.is_empty() {
        return Err(ClassifierError::EmptyTrainingSet);
    }
    if samples.len() != labels.len() {
        return Err(ClassifierError::LabelCountMismatch {
            samples: samples.len(),
            labels: labels.len(),
        });
    }

    let n_features = samples[0].len();
    for (index, sample) in samples.iter().enumerate() {
        if sample.is_empty() || sample.len() != n_features {
            return Err(ClassifierError::RaggedSample {
                index,
                expected: n_features,
                found: sample.len(),
            });
        }
        if sample.iter().any(|v| !v.is_finite()) {
            return Err(ClassifierError::NonFiniteValue { index });
        }
    }
    Ok(n_features)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_clusters() -> (Vec<Vec<f64>>, Vec<Label>) {
        let samples = vec![
            vec![0.0, 0.0],
            vec![0.5, 0.0],
            vec![10.0, 10.0],
            vec![10.5, 10.0],
            vec![-10.0, 10.0],
            vec![-10.5, 10.0],
        ];
        let labels = vec![1, 1, 2, 2, 3, 3];
        (samples, labels)
    }

    #[test]
    fn test_fit_and_predict_clusters() {
        let (samples, labels) = three_clusters();
        let mut svc = SupportVectorClassifier::new();
        svc.fit(&samples, &labels).unwrap();

        assert_eq!(svc.classes(), &[1, 2, 3]);
        assert_eq!(svc.predict(&[0.2, 0.1]).unwrap(), 1);
        assert_eq!(svc.predict(&[9.8, 10.1]).unwrap(), 2);
        assert_eq!(svc.predict(&[-9.9, 9.9]).unwrap(), 3);
    }

    #[test]
    fn test_decision_function_has_one_value_per_pair() {
        let (samples, labels) = three_clusters();
        let mut svc = SupportVectorClassifier::new();
        svc.fit(&samples, &labels).unwrap();

        let values = svc.decision_function(&[0.0, 0.0]).unwrap();
        assert_eq!(values.len(), 3);
        // Pairs (1,2) and (1,3) both favour class 1
        assert!(values[0] > 0.0);
        assert!(values[1] > 0.0);
    }

    #[test]
    fn test_one_sample_per_class_recalls_training_points() {
        let samples = vec![vec![1.0, 1.0], vec![5.0, 1.0], vec![1.0, 5.0], vec![5.0, 5.0]];
        let labels = vec![4, 3, 2, 1];
        let mut svc = SupportVectorClassifier::new().with_kernel(KernelSpec::Rbf(Gamma::Value(0.5)));
        svc.fit(&samples, &labels).unwrap();

        for (sample, label) in samples.iter().zip(&labels) {
            assert_eq!(svc.predict(sample).unwrap(), *label);
        }
    }

    #[test]
    fn test_zero_decision_votes_for_second_class() {
        assert_eq!(vote(2, &[(0, 1, 0.0)]), 1);
        assert_eq!(vote(2, &[(0, 1, 1e-9)]), 0);
        assert_eq!(vote(2, &[(0, 1, -0.3)]), 1);
    }

    #[test]
    fn test_vote_tie_goes_to_lowest_class() {
        // Each class wins exactly one pair
        let outcomes = [(0, 1, -1.0), (0, 2, 1.0), (1, 2, -1.0)];
        assert_eq!(vote(3, &outcomes), 0);
    }

    #[test]
    fn test_two_points_split_at_midpoint() {
        let samples = vec![vec![0.0], vec![2.0]];
        let labels = vec![1, 2];
        let mut svc = SupportVectorClassifier::new();
        svc.fit(&samples, &labels).unwrap();

        assert_eq!(svc.predict(&[0.9]).unwrap(), 1);
        assert_eq!(svc.predict(&[1.1]).unwrap(), 2);
        assert!(svc.decision_function(&[1.0]).unwrap()[0].abs() < 1e-6);
    }

    #[test]
    fn test_linear_kernel() {
        let samples = vec![vec![0.0], vec![1.0], vec![4.0], vec![5.0]];
        let labels = vec![7, 7, 9, 9];
        let mut svc = SupportVectorClassifier::new()
            .with_kernel(KernelSpec::Linear)
            .with_c(10.0);
        svc.fit(&samples, &labels).unwrap();

        assert_eq!(svc.kernel(), Some(Kernel::Linear));
        assert_eq!(svc.predict(&[-3.0]).unwrap(), 7);
        assert_eq!(svc.predict(&[8.0]).unwrap(), 9);
    }

    #[test]
    fn test_predict_before_fit() {
        let svc = SupportVectorClassifier::new();
        assert!(!svc.is_fitted());
        assert_eq!(svc.predict(&[1.0]), Err(ClassifierError::NotFitted));
    }

    #[test]
    fn test_dimension_mismatch() {
        let (samples, labels) = three_clusters();
        let mut svc = SupportVectorClassifier::new();
        svc.fit(&samples, &labels).unwrap();

        assert_eq!(
            svc.predict(&[1.0, 2.0, 3.0]),
            Err(ClassifierError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_invalid_training_data() {
        let mut svc = SupportVectorClassifier::new();

        assert_eq!(svc.fit(&[], &[]), Err(ClassifierError::EmptyTrainingSet));
        assert_eq!(
            svc.fit(&[vec![1.0]], &[1, 2]),
            Err(ClassifierError::LabelCountMismatch {
                samples: 1,
                labels: 2
            })
        );
        assert_eq!(
            svc.fit(&[vec![1.0], vec![1.0, 2.0]], &[1, 2]),
            Err(ClassifierError::RaggedSample {
                index: 1,
                expected: 1,
                found: 2
            })
        );
        assert_eq!(
            svc.fit(&[vec![1.0], vec![f64::NAN]], &[1, 2]),
            Err(ClassifierError::NonFiniteValue { index: 1 })
        );
        assert_eq!(
            svc.fit(&[vec![1.0], vec![2.0]], &[5, 5]),
            Err(ClassifierError::TooFewClasses(1))
        );
        assert!(!svc.is_fitted());
    }

    #[test]
    fn test_invalid_parameters() {
        let mut svc = SupportVectorClassifier::new().with_c(0.0);
        let result = svc.fit(&[vec![0.0], vec![1.0]], &[1, 2]);
        assert!(matches!(
            result,
            Err(ClassifierError::InvalidParameter { name: "c", .. })
        ));

        let mut svc = SupportVectorClassifier::new().with_kernel(KernelSpec::Rbf(Gamma::Value(-1.0)));
        let result = svc.fit(&[vec![0.0], vec![1.0]], &[1, 2]);
        assert!(matches!(
            result,
            Err(ClassifierError::InvalidParameter { name: "gamma", .. })
        ));
    }

    #[test]
    fn test_refit_is_deterministic() {
        let (samples, labels) = three_clusters();
        let mut first = SupportVectorClassifier::new();
        let mut second = SupportVectorClassifier::new();
        first.fit(&samples, &labels).unwrap();
        second.fit(&samples, &labels).unwrap();

        let query = [3.0, 4.0];
        assert_eq!(
            first.decision_function(&query).unwrap(),
            second.decision_function(&query).unwrap()
        );
    }
}

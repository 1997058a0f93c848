use crate::error::ConfigurationError;

const SIMPLEX_TOLERANCE: f64 = 1e-9;

/// Reference directions on the unit simplex used for niching.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDirections {
    pub reference_directions: Vec<Vec<f64>>,
}

impl ReferenceDirections {
    /// All lattice points of the `dimension`-objective simplex with
    /// `n_partition` divisions per axis: `C(p + M - 1, M - 1)` points.
    pub fn new(dimension: usize, n_partition: usize) -> Result<Self, ConfigurationError> {
        if n_partition == 0 {
            return Err(ConfigurationError::ZeroDivisions);
        }

        if dimension == 0 {
            return Err(ConfigurationError::ReferencePointDimension { expected: 1, found: 0 });
        }

        Ok(Self {
            reference_directions: Self::das_dennis(n_partition, dimension),
        })
    }

    /// User supplied directions; each must be non-negative and sum to 1.
    pub fn from_points(dimension: usize, points: Vec<Vec<f64>>) -> Result<Self, ConfigurationError> {
        for (index, point) in points.iter().enumerate() {
            if point.len() != dimension {
                return Err(ConfigurationError::ReferencePointDimension { expected: dimension, found: point.len() });
            }

            let sum: f64 = point.iter().sum();
            if point.iter().any(|&c| c < 0.0) || (sum - 1.0).abs() > SIMPLEX_TOLERANCE {
                return Err(ConfigurationError::ReferencePointOffSimplex { index });
            }
        }

        if points.is_empty() {
            return Err(ConfigurationError::ZeroCapacity { name: "Reference point set" });
        }

        Ok(Self { reference_directions: points })
    }

    pub fn len(&self) -> usize {
        self.reference_directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference_directions.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.reference_directions.first().map(Vec::len).unwrap_or(0)
    }

    fn das_dennis(n_partitions: usize, n_dim: usize) -> Vec<Vec<f64>> {
        let mut ref_dirs = vec![];
        let mut ref_dir = vec![0.0; n_dim];

        Self::das_dennis_recursion(&mut ref_dirs, &mut ref_dir, n_partitions, n_partitions, 0);

        ref_dirs
    }

    fn das_dennis_recursion(
        ref_dirs: &mut Vec<Vec<f64>>,
        ref_dir: &mut Vec<f64>,
        n_partitions: usize,
        beta: usize,
        depth: usize,
    ) {
        if depth == ref_dir.len() - 1 {
            ref_dir[depth] = beta as f64 / n_partitions as f64;
            ref_dirs.push(ref_dir.clone());
        } else {
            for i in 0..=beta {
                ref_dir[depth] = i as f64 / n_partitions as f64;
                Self::das_dennis_recursion(ref_dirs, ref_dir, n_partitions, beta - i, depth + 1);
            }
        }
    }
}

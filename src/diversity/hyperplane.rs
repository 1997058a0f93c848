use ndarray::{Array1, Array2};

const ASF_EPSILON: f64 = 1e-6;
const PIVOT_EPSILON: f64 = 1e-12;
const MIN_INTERCEPT: f64 = 1e-10;

/// Normalization of objective space: translation to the ideal point and
/// scaling by the intercepts of the hyperplane through the extreme points.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperplane {
    pub ideal_point: Vec<f64>,
    pub intercepts: Vec<f64>,
    /// True when the extreme-point system could not be used and the
    /// intercepts fell back to the per-objective maximum.
    pub degenerate: bool,
}

impl Hyperplane {
    /// Fits the hyperplane to `points` (objective vectors, all of the same length).
    pub fn fit(points: &[Vec<f64>]) -> Self {
        let dimension = points.first().map(Vec::len).unwrap_or(0);

        let mut ideal_point = vec![f64::INFINITY; dimension];
        for point in points {
            for (ideal, &value) in ideal_point.iter_mut().zip(point) {
                *ideal = ideal.min(value);
            }
        }

        let translated: Vec<Vec<f64>> = points
            .iter()
            .map(|point| point.iter().zip(&ideal_point).map(|(v, z)| v - z).collect())
            .collect();

        let extreme_points = Self::extreme_points(&translated, dimension);

        let (intercepts, degenerate) = match Self::intercepts_from_extremes(&extreme_points) {
            Some(intercepts) => (intercepts, false),
            None => {
                log::debug!("Degenerate hyperplane, normalizing by per-objective maximum");
                (Self::max_per_objective(&translated, dimension), true)
            }
        };

        let intercepts = intercepts.into_iter().map(|a| a.max(MIN_INTERCEPT)).collect();

        Hyperplane {
            ideal_point,
            intercepts,
            degenerate,
        }
    }

    pub fn normalize(&self, point: &[f64]) -> Vec<f64> {
        point
            .iter()
            .zip(&self.ideal_point)
            .zip(&self.intercepts)
            .map(|((value, ideal), intercept)| (value - ideal) / intercept)
            .collect()
    }

    /// One extreme point per objective: the translated point minimizing the
    /// achievement scalarization `max_i(f_i / w_i)` with weight 1 on the axis
    /// and `ASF_EPSILON` elsewhere. Ties go to the first point.
    fn extreme_points(translated: &[Vec<f64>], dimension: usize) -> Array2<f64> {
        let mut extremes = Array2::<f64>::zeros((dimension, dimension));

        for axis in 0..dimension {
            let mut best: Option<(usize, f64)> = None;

            for (index, point) in translated.iter().enumerate() {
                let asf = point
                    .iter()
                    .enumerate()
                    .map(|(i, &value)| if i == axis { value } else { value / ASF_EPSILON })
                    .fold(f64::NEG_INFINITY, f64::max);

                if best.map_or(true, |(_, best_asf)| asf < best_asf) {
                    best = Some((index, asf));
                }
            }

            if let Some((index, _)) = best {
                for (i, &value) in translated[index].iter().enumerate() {
                    extremes[[axis, i]] = value;
                }
            }
        }

        extremes
    }

    /// Solves `E a = 1` and returns the intercepts `1 / a_i`, or `None` when
    /// the system is singular or an intercept is not positive.
    fn intercepts_from_extremes(extremes: &Array2<f64>) -> Option<Vec<f64>> {
        let ones = Array1::<f64>::ones(extremes.nrows());
        let plane = gauss_solve(extremes.clone(), ones)?;

        let intercepts: Vec<f64> = plane.iter().map(|a| 1.0 / a).collect();

        if intercepts.iter().all(|a| a.is_finite() && *a > MIN_INTERCEPT) {
            Some(intercepts)
        } else {
            None
        }
    }

    fn max_per_objective(translated: &[Vec<f64>], dimension: usize) -> Vec<f64> {
        let mut max = vec![0.0f64; dimension];
        for point in translated {
            for (m, &value) in max.iter_mut().zip(point) {
                *m = m.max(value);
            }
        }
        max
    }
}

/// Gaussian elimination with partial pivoting.
fn gauss_solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();

    for column in 0..n {
        let pivot = (column..n).max_by(|&i, &j| {
            a[[i, column]]
                .abs()
                .partial_cmp(&a[[j, column]].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

        if !(a[[pivot, column]].abs() > PIVOT_EPSILON) {
            return None;
        }

        if pivot != column {
            for k in 0..n {
                a.swap([pivot, k], [column, k]);
            }
            b.swap(pivot, column);
        }

        for row in column + 1..n {
            let factor = a[[row, column]] / a[[column, column]];
            for k in column..n {
                a[[row, k]] -= factor * a[[column, k]];
            }
            b[row] -= factor * b[column];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }

    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}

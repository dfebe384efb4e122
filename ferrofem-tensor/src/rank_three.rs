use crate::Real;
use nalgebra::Matrix3x6;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Voigt column for each (row, column) pair of a symmetric second-order index pair.
const VOIGT_INDEX: [[usize; 3]; 3] = [[0, 5, 4], [5, 1, 3], [4, 3, 2]];

/// A rank-three tensor $T_{ijk}$ in three dimensions.
///
/// Used for the piezostrictive tensor, where $i$ is the test-space component and $(j, k)$ is the
/// strain index pair. Minor symmetry refers to $T_{ijk} = T_{ikj}$.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankThreeTensor<T> {
    data: [[[T; 3]; 3]; 3],
}

impl<T: Real> Default for RankThreeTensor<T> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Real> RankThreeTensor<T> {
    pub fn zeros() -> Self {
        Self {
            data: [[[T::zero(); 3]; 3]; 3],
        }
    }

    pub fn from_array(data: [[[T; 3]; 3]; 3]) -> Self {
        Self { data }
    }

    pub fn from_fn(mut f: impl FnMut(usize, usize, usize) -> T) -> Self {
        let mut tensor = Self::zeros();
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    tensor.data[i][j][k] = f(i, j, k);
                }
            }
        }
        tensor
    }

    /// Construct the tensor from a $3 \times 6$ matrix in Voigt notation.
    ///
    /// Voigt columns are ordered `xx, yy, zz, yz, xz, xy`. Shear columns carry engineering
    /// shear coefficients and are halved when expanded, so that
    /// $T_{ijk} = d_{iJ}$ for $j = k$ and $T_{ijk} = d_{iJ} / 2$ otherwise.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn from_voigt(d: &Matrix3x6<T>) -> Self {
        Self::from_fn(|i, j, k| {
            let value = d[(i, VOIGT_INDEX[j][k])];
            if j == k {
                value
            } else {
                0.5 * value
            }
        })
    }

    pub fn as_array(&self) -> &[[[T; 3]; 3]; 3] {
        &self.data
    }

    /// Returns the tensor with its last two indices symmetrized, $\frac{1}{2}(T_{ijk} + T_{ikj})$.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn minor_symmetrized(&self) -> Self {
        Self::from_fn(|i, j, k| 0.5 * (self.data[i][j][k] + self.data[i][k][j]))
    }

    /// Checks whether $|T_{ijk} - T_{ikj}| \leq \text{tol}$ for all indices.
    pub fn has_minor_symmetry(&self, tol: T) -> bool {
        (0..3).all(|i| {
            (0..3).all(|j| (0..3).all(|k| (self.data[i][j][k] - self.data[i][k][j]).abs() <= tol))
        })
    }

    pub fn scale(&self, factor: T) -> Self {
        Self::from_fn(|i, j, k| factor * self.data[i][j][k])
    }
}

impl<T> Index<(usize, usize, usize)> for RankThreeTensor<T> {
    type Output = T;

    fn index(&self, (i, j, k): (usize, usize, usize)) -> &Self::Output {
        &self.data[i][j][k]
    }
}

impl<T> IndexMut<(usize, usize, usize)> for RankThreeTensor<T> {
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut Self::Output {
        &mut self.data[i][j][k]
    }
}

use crate::Real;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A rank-four tensor $Q_{ijkl}$ in three dimensions.
///
/// Used for the electrostrictive coupling tensor. Minor symmetry refers to exchange of the last
/// two indices, $Q_{ijkl} = Q_{ijlk}$.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankFourTensor<T> {
    data: [[[[T; 3]; 3]; 3]; 3],
}

impl<T: Real> Default for RankFourTensor<T> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Real> RankFourTensor<T> {
    pub fn zeros() -> Self {
        Self {
            data: [[[[T::zero(); 3]; 3]; 3]; 3],
        }
    }

    pub fn from_array(data: [[[[T; 3]; 3]; 3]; 3]) -> Self {
        Self { data }
    }

    pub fn from_fn(mut f: impl FnMut(usize, usize, usize, usize) -> T) -> Self {
        let mut tensor = Self::zeros();
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    for l in 0..3 {
                        tensor.data[i][j][k][l] = f(i, j, k, l);
                    }
                }
            }
        }
        tensor
    }

    /// Construct a tensor with cubic symmetry from its three independent coefficients.
    ///
    /// The non-zero entries are
    /// $Q_{iiii} = a_{11}$,
    /// $Q_{iijj} = a_{12}$ and
    /// $Q_{ijij} = Q_{ijji} = a_{44}$
    /// for $i \neq j$.
    pub fn from_cubic(a11: T, a12: T, a44: T) -> Self {
        Self::from_fn(|i, j, k, l| {
            if i == j && k == l {
                if i == k {
                    a11
                } else {
                    a12
                }
            } else if (i == k && j == l) || (i == l && j == k) {
                a44
            } else {
                T::zero()
            }
        })
    }

    pub fn as_array(&self) -> &[[[[T; 3]; 3]; 3]; 3] {
        &self.data
    }

    /// Computes the double contraction $C_{ijkl} = A_{ijmn} B_{mnkl}$.
    pub fn double_contract(&self, other: &Self) -> Self {
        Self::from_fn(|i, j, k, l| {
            let mut sum = T::zero();
            for m in 0..3 {
                for n in 0..3 {
                    sum += self.data[i][j][m][n] * other.data[m][n][k][l];
                }
            }
            sum
        })
    }

    /// Returns the tensor with its last two indices symmetrized, $\frac{1}{2}(Q_{ijkl} + Q_{ijlk})$.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn minor_symmetrized(&self) -> Self {
        Self::from_fn(|i, j, k, l| 0.5 * (self.data[i][j][k][l] + self.data[i][j][l][k]))
    }

    /// Checks whether $|Q_{ijkl} - Q_{ijlk}| \leq \text{tol}$ for all indices.
    pub fn has_minor_symmetry(&self, tol: T) -> bool {
        (0..3).all(|i| {
            (0..3).all(|j| {
                (0..3).all(|k| (0..3).all(|l| (self.data[i][j][k][l] - self.data[i][j][l][k]).abs() <= tol))
            })
        })
    }

    pub fn scale(&self, factor: T) -> Self {
        Self::from_fn(|i, j, k, l| factor * self.data[i][j][k][l])
    }
}

impl<T> Index<(usize, usize, usize, usize)> for RankFourTensor<T> {
    type Output = T;

    fn index(&self, (i, j, k, l): (usize, usize, usize, usize)) -> &Self::Output {
        &self.data[i][j][k][l]
    }
}

impl<T> IndexMut<(usize, usize, usize, usize)> for RankFourTensor<T> {
    fn index_mut(&mut self, (i, j, k, l): (usize, usize, usize, usize)) -> &mut Self::Output {
        &mut self.data[i][j][k][l]
    }
}

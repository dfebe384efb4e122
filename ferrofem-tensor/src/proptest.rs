//! `proptest` strategies for material tensors.
use crate::{RankFourTensor, RankThreeTensor};
use ::proptest::collection::vec;
use ::proptest::prelude::*;

/// Strategy producing rank-three tensors with entries in `[-10, 10]`.
pub fn rank_three_tensor() -> impl Strategy<Value = RankThreeTensor<f64>> {
    vec(-10.0..10.0, 27).prop_map(|entries| RankThreeTensor::from_fn(|i, j, k| entries[9 * i + 3 * j + k]))
}

/// Strategy producing rank-three tensors satisfying $T_{ijk} = T_{ikj}$.
pub fn minor_symmetric_rank_three_tensor() -> impl Strategy<Value = RankThreeTensor<f64>> {
    rank_three_tensor().prop_map(|tensor| tensor.minor_symmetrized())
}

/// Strategy producing rank-four tensors with entries in `[-10, 10]`.
pub fn rank_four_tensor() -> impl Strategy<Value = RankFourTensor<f64>> {
    vec(-10.0..10.0, 81)
        .prop_map(|entries| RankFourTensor::from_fn(|i, j, k, l| entries[27 * i + 9 * j + 3 * k + l]))
}

/// Strategy producing rank-four tensors satisfying $Q_{ijkl} = Q_{ijlk}$.
pub fn minor_symmetric_rank_four_tensor() -> impl Strategy<Value = RankFourTensor<f64>> {
    rank_four_tensor().prop_map(|tensor| tensor.minor_symmetrized())
}

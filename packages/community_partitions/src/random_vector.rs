// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use rand::seq::SliceRandom;
use rand::Rng;

/// A uniformly random ordering of `0..length` (Fisher-Yates).
pub fn random_permutation<T>(
    length: usize,
    rng: &mut T,
) -> Vec<usize>
where
    T: Rng,
{
    let mut permutation: Vec<usize> = Vec::with_capacity(length);
    permutation.extend(0..length);
    permutation.shuffle(rng);
    return permutation;
}

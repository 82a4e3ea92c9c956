//! [`PermutationMatrix`] and its builder — the `PermutationMatrix Builder`
//! collaborator of `spec.md` §6, recording the row swaps performed by a
//! pivoting factorization as column swaps so that `A = P L D U`.

use super::operator::LinearOperator;

#[derive(Debug, Clone)]
pub struct PermutationMatrix {
    /// `apply(v)[i] == v[forward[i]]`.
    forward: Vec<usize>,
    /// `backward[forward[i]] == i`; used for `apply_transpose` / `inverse`.
    backward: Vec<usize>,
    sign: i8,
}

impl PermutationMatrix {
    pub fn unit_builder(n: usize) -> PermutationMatrixBuilder {
        PermutationMatrixBuilder {
            forward: (0..n).collect(),
            sign: 1,
        }
    }

    pub fn n(&self) -> usize {
        self.forward.len()
    }

    pub fn sign_of_determinant(&self) -> i8 {
        self.sign
    }

    /// `P^-1`. For a permutation matrix this equals `P^T`, which `.build()`
    /// also exposes directly via [`PermutationMatrix::transpose`].
    pub fn inverse(&self) -> PermutationMatrix {
        PermutationMatrix {
            forward: self.backward.clone(),
            backward: self.forward.clone(),
            sign: self.sign,
        }
    }

    pub fn transpose(&self) -> PermutationMatrix {
        self.inverse()
    }
}

impl LinearOperator for PermutationMatrix {
    fn dim(&self) -> usize {
        self.forward.len()
    }

    fn apply(&self, v: &[f64]) -> Vec<f64> {
        self.forward.iter().map(|&src| v[src]).collect()
    }

    fn apply_transpose(&self, v: &[f64]) -> Vec<f64> {
        self.backward.iter().map(|&src| v[src]).collect()
    }
}

pub struct PermutationMatrixBuilder {
    forward: Vec<usize>,
    sign: i8,
}

impl PermutationMatrixBuilder {
    /// Records a column swap. Toggles the recorded determinant sign unless
    /// `i == j`.
    pub fn swap_columns(&mut self, i: usize, j: usize) {
        if i != j {
            self.forward.swap(i, j);
            self.sign = -self.sign;
        }
    }

    pub fn build(self) -> PermutationMatrix {
        let n = self.forward.len();
        let mut backward = vec![0usize; n];
        for (i, &src) in self.forward.iter().enumerate() {
            backward[src] = i;
        }
        PermutationMatrix {
            forward: self.forward,
            backward,
            sign: self.sign,
        }
    }
}

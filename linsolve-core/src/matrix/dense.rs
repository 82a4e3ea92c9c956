//! [`DenseMatrix`]: the `EntryReadableMatrix` collaborator (`spec.md` §6) for
//! the general square/non-square dense case.

use super::operator::LinearOperator;
use super::shape::HasShape;
use crate::dim::MatrixDimension;

/// A dense, row-major `f64` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    symmetric: bool,
}

impl DenseMatrix {
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), rows * cols, "row-major data length must equal rows * cols");
        let symmetric = rows == cols && is_symmetric(&data, rows);
        Self {
            rows,
            cols,
            data,
            symmetric,
        }
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            assert_eq!(row.len(), ncols, "all rows must have the same length");
            data.extend_from_slice(row);
        }
        Self::from_row_major(nrows, ncols, data)
    }

    /// Marks this matrix as carrying the `Symmetric` capability regardless of
    /// whether its entries happen to be numerically symmetric. Used in tests
    /// to exercise the symmetric-only executors against malformed input.
    pub fn with_symmetric_marker(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    pub fn value_at(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    pub fn matrix_dimension(&self) -> MatrixDimension {
        MatrixDimension::new(self.rows, self.cols)
    }

    pub fn entry_norm_max(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, &v| acc.max(v.abs()))
    }

    /// The `Symmetric` capability marker from `spec.md` §6's collaborator
    /// table: declares the matrix equal to its own transpose.
    pub fn is_marked_symmetric(&self) -> bool {
        self.symmetric
    }
}

fn is_symmetric(data: &[f64], n: usize) -> bool {
    for i in 0..n {
        for j in (i + 1)..n {
            if data[i * n + j] != data[j * n + i] {
                return false;
            }
        }
    }
    true
}

impl HasShape for DenseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }
    fn cols(&self) -> usize {
        self.cols
    }
}

impl LinearOperator for DenseMatrix {
    fn dim(&self) -> usize {
        self.rows
    }

    fn apply(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.cols);
        (0..self.rows)
            .map(|i| (0..self.cols).map(|j| self.value_at(i, j) * v[j]).sum())
            .collect()
    }

    fn apply_transpose(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.rows);
        (0..self.cols)
            .map(|j| (0..self.rows).map(|i| self.value_at(i, j) * v[i]).sum())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_symmetry() {
        let sym = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 3.0]]);
        assert!(sym.is_marked_symmetric());

        let asym = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!(!asym.is_marked_symmetric());
    }

    #[test]
    fn apply_is_ordinary_matrix_vector_multiply() {
        let m = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(m.apply(&[1.0, 1.0]), vec![3.0, 7.0]);
        assert_eq!(m.apply_transpose(&[1.0, 1.0]), vec![4.0, 6.0]);
    }

    #[test]
    fn entry_norm_max_is_largest_magnitude() {
        let m = DenseMatrix::from_rows(&[vec![1.0, -7.0], vec![3.0, 4.0]]);
        assert_eq!(m.entry_norm_max(), 7.0);
    }
}

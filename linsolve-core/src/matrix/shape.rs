//! The minimal shape contract every matrix collaborator exposes to the
//! executor base (C5), independent of how it is stored (dense vs banded).

/// Exposes the row/column extent of a matrix-like collaborator.
pub trait HasShape {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }
}

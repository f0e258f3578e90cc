//! Pass topologies: which cells may precede a cell on a warping path.

/// Backward offsets `(di, dj)` of the classical recurrence, in tie-break
/// order: diagonal, left, up.
const NEIGHBOR_MOVES: [(usize, usize); 3] = [(1, 1), (0, 1), (1, 0)];

/// Backward offsets of the slope-bounded recurrence, in tie-break order:
/// diagonal, left skip `(i-1, j-2)`, up skip `(i-2, j-1)`.
const DIAGONAL_MOVES: [(usize, usize); 3] = [(1, 1), (1, 2), (2, 1)];

/// Topology of allowed moves between cells of the cost matrix.
///
/// The move order is also the tie-break order: when two predecessors carry
/// the same accumulated cost, the one listed first wins, both while filling
/// the matrix and while backtracking the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PassType {
    /// Predecessors `(i-1, j-1)`, `(i, j-1)`, `(i-1, j)`.
    #[default]
    Neighbors,

    /// Predecessors `(i-1, j-1)`, `(i-1, j-2)`, `(i-2, j-1)`.
    ///
    /// Forbids horizontal and vertical runs, bounding the path slope to
    /// `[1/2, 2]`. Cells in the first two rows or columns, where the skip
    /// moves would leave the grid, fall back to the [`Neighbors`] moves so
    /// every cell stays reachable.
    ///
    /// [`Neighbors`]: PassType::Neighbors
    Diagonals,
}

impl PassType {
    /// Return the backward offsets `(di, dj)` that apply at `(row, col)`,
    /// in tie-break order. Offsets may point outside the grid.
    #[must_use]
    pub fn moves(self, row: usize, col: usize) -> &'static [(usize, usize)] {
        match self {
            Self::Diagonals if row >= 2 && col >= 2 => &DIAGONAL_MOVES,
            Self::Neighbors | Self::Diagonals => &NEIGHBOR_MOVES,
        }
    }

    /// Iterate the in-grid predecessors of `(row, col)`, in tie-break order.
    ///
    /// Yields nothing for the origin.
    pub fn predecessors(self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        self.moves(row, col)
            .iter()
            .filter_map(move |&(di, dj)| Some((row.checked_sub(di)?, col.checked_sub(dj)?)))
    }

    /// Return true if a path may step directly from `from` to `to`.
    #[must_use]
    pub fn allows(self, from: (usize, usize), to: (usize, usize)) -> bool {
        self.predecessors(to.0, to.1).any(|p| p == from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preds(pass: PassType, row: usize, col: usize) -> Vec<(usize, usize)> {
        pass.predecessors(row, col).collect()
    }

    #[test]
    fn default_is_neighbors() {
        assert_eq!(PassType::default(), PassType::Neighbors);
    }

    #[test]
    fn origin_has_no_predecessor() {
        assert!(preds(PassType::Neighbors, 0, 0).is_empty());
        assert!(preds(PassType::Diagonals, 0, 0).is_empty());
    }

    #[test]
    fn neighbors_borders_have_single_predecessor() {
        assert_eq!(preds(PassType::Neighbors, 0, 4), vec![(0, 3)]);
        assert_eq!(preds(PassType::Neighbors, 4, 0), vec![(3, 0)]);
    }

    #[test]
    fn neighbors_interior_order() {
        assert_eq!(preds(PassType::Neighbors, 3, 5), vec![(2, 4), (3, 4), (2, 5)]);
    }

    #[test]
    fn diagonals_interior_uses_skip_moves() {
        assert_eq!(preds(PassType::Diagonals, 3, 5), vec![(2, 4), (2, 3), (1, 4)]);
        assert_eq!(preds(PassType::Diagonals, 2, 2), vec![(1, 1), (1, 0), (0, 1)]);
    }

    #[test]
    fn diagonals_falls_back_near_borders() {
        assert_eq!(preds(PassType::Diagonals, 1, 5), vec![(0, 4), (1, 4), (0, 5)]);
        assert_eq!(preds(PassType::Diagonals, 5, 1), vec![(4, 0), (5, 0), (4, 1)]);
        assert_eq!(preds(PassType::Diagonals, 0, 3), vec![(0, 2)]);
    }

    #[test]
    fn allows_matches_predecessors() {
        assert!(PassType::Neighbors.allows((2, 2), (2, 3)));
        assert!(!PassType::Neighbors.allows((1, 1), (2, 3)));
        assert!(PassType::Diagonals.allows((1, 1), (2, 3)));
        assert!(!PassType::Diagonals.allows((2, 2), (2, 3)));
        assert!(!PassType::Diagonals.allows((0, 0), (0, 0)));
    }
}

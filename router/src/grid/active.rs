use rsmt_common::db::core::{Grid, Node, NodeKind};
use rsmt_common::error::InvariantViolation;
use rsmt_common::geom::coord::GridCoord;

/// Read-only view of the nodes a spanning tree must connect: everything
/// placed on the grid plus at most one tentatively active pseudo-node.
///
/// Trial evaluation goes through this view instead of inserting and removing
/// pseudo-nodes on the grid, so a trial can never leave the grid modified.
#[derive(Clone, Copy)]
pub struct ActiveSet<'a> {
    grid: &'a Grid,
    tentative: Option<GridCoord>,
}

impl<'a> ActiveSet<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            tentative: None,
        }
    }

    /// View with an extra pseudo-node at `pos`, which must be vacant.
    pub fn with_tentative(grid: &'a Grid, pos: GridCoord) -> Result<Self, InvariantViolation> {
        if !grid.contains(pos) {
            return Err(InvariantViolation::OutOfGrid { at: pos });
        }
        if !grid.is_vacant(pos) {
            return Err(InvariantViolation::Occupied { at: pos });
        }
        Ok(Self {
            grid,
            tentative: Some(pos),
        })
    }

    pub fn size(&self) -> u32 {
        self.grid.size()
    }

    pub fn len(&self) -> usize {
        self.grid.num_nodes() + usize::from(self.tentative.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First node in insertion order; tree growth always starts here.
    pub fn seed(&self) -> Option<Node> {
        self.grid
            .nodes()
            .first()
            .copied()
            .or(self.tentative.map(Node::pseudo))
    }

    #[inline]
    pub fn node_at(&self, c: GridCoord) -> Option<Node> {
        match self.grid.kind(c) {
            NodeKind::Pin => Some(Node::pin(c)),
            NodeKind::Pseudo => Some(Node::pseudo(c)),
            NodeKind::Empty if self.tentative == Some(c) => Some(Node::pseudo(c)),
            NodeKind::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tentative_node_is_visible_only_in_its_view() {
        let mut grid = Grid::new(10);
        grid.add_pin(GridCoord::new(0, 0)).unwrap();
        let pos = GridCoord::new(5, 5);

        let trial = ActiveSet::with_tentative(&grid, pos).unwrap();
        assert_eq!(trial.len(), 2);
        assert_eq!(trial.node_at(pos), Some(Node::pseudo(pos)));

        let plain = ActiveSet::new(&grid);
        assert_eq!(plain.len(), 1);
        assert_eq!(plain.node_at(pos), None);
        assert!(grid.is_vacant(pos));
    }

    #[test]
    fn tentative_node_needs_a_vacant_point() {
        let mut grid = Grid::new(10);
        grid.add_pin(GridCoord::new(2, 2)).unwrap();
        assert!(matches!(
            ActiveSet::with_tentative(&grid, GridCoord::new(2, 2)),
            Err(InvariantViolation::Occupied { .. })
        ));
        assert!(matches!(
            ActiveSet::with_tentative(&grid, GridCoord::new(10, 2)),
            Err(InvariantViolation::OutOfGrid { .. })
        ));
    }

    #[test]
    fn seed_is_first_pin() {
        let mut grid = Grid::new(10);
        grid.add_pin(GridCoord::new(7, 1)).unwrap();
        grid.add_pin(GridCoord::new(0, 0)).unwrap();
        let view = ActiveSet::with_tentative(&grid, GridCoord::new(3, 3)).unwrap();
        assert_eq!(view.seed(), Some(Node::pin(GridCoord::new(7, 1))));
    }
}

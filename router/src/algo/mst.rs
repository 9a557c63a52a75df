use crate::algo::closest::{InTree, closest_pair};
use crate::grid::ActiveSet;
use crate::tree::Tree;
use rsmt_common::error::InvariantViolation;

/// Prim-style spanning tree over the active set, grown from the first pin.
///
/// Each step joins the nearest outside node found by the radius search; no
/// priority queue is kept since the search radius is bounded by the grid.
/// Zero or one active node yields an empty tree.
pub fn build_mst(active: &ActiveSet<'_>) -> Result<Tree, InvariantViolation> {
    let mut tree = Tree::default();
    let total = active.len();
    let Some(seed) = active.seed() else {
        return Ok(tree);
    };

    let mut in_tree = InTree::new(active.size(), total);
    in_tree.push(seed);

    while in_tree.len() < total {
        let (from, to) = closest_pair(active, &in_tree)?;
        in_tree.push(to);
        tree.push(from, to);
    }

    log::trace!("MST: {} edges, weight {}", tree.len(), tree.weight());
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsmt_common::db::core::{Grid, Node};
    use rsmt_common::geom::coord::GridCoord;

    fn c(x: u32, y: u32) -> GridCoord {
        GridCoord::new(x, y)
    }

    fn grid_with(size: u32, pins: &[(u32, u32)]) -> Grid {
        let mut grid = Grid::new(size);
        for &(x, y) in pins {
            grid.add_pin(c(x, y)).unwrap();
        }
        grid
    }

    #[test]
    fn single_pin_gives_empty_tree() {
        let grid = grid_with(10, &[(3, 3)]);
        let tree = build_mst(&ActiveSet::new(&grid)).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.weight(), 0);
    }

    #[test]
    fn empty_grid_gives_empty_tree() {
        let grid = Grid::new(10);
        let tree = build_mst(&ActiveSet::new(&grid)).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn right_angle_corner() {
        let grid = grid_with(150, &[(0, 0), (0, 10), (10, 0)]);
        let tree = build_mst(&ActiveSet::new(&grid)).unwrap();
        assert_eq!(tree.weight(), 20);
        assert_eq!(
            tree.edges(),
            &[
                (Node::pin(c(0, 0)), Node::pin(c(0, 10))),
                (Node::pin(c(0, 0)), Node::pin(c(10, 0))),
            ]
        );
    }

    #[test]
    fn growth_starts_from_first_pin_not_closest_pair() {
        // (20, 20) is far from the tight pair but still seeds the tree.
        let grid = grid_with(30, &[(20, 20), (0, 0), (1, 0)]);
        let tree = build_mst(&ActiveSet::new(&grid)).unwrap();
        assert_eq!(tree.edges()[0].0.pos, c(20, 20));
        assert_eq!(tree.edges()[0].1.pos, c(1, 0));
        assert_eq!(tree.edges()[1], (Node::pin(c(1, 0)), Node::pin(c(0, 0))));
        assert_eq!(tree.weight(), 40);
    }

    #[test]
    fn tentative_node_joins_the_tree() {
        let grid = grid_with(20, &[(5, 0), (0, 5), (10, 5), (5, 10)]);
        let plain = build_mst(&ActiveSet::new(&grid)).unwrap();
        assert_eq!(plain.weight(), 30);

        let trial = build_mst(&ActiveSet::with_tentative(&grid, c(5, 5)).unwrap()).unwrap();
        assert_eq!(trial.len(), 4);
        assert_eq!(trial.weight(), 20);
        assert_eq!(trial.edges()[0], (Node::pin(c(5, 0)), Node::pseudo(c(5, 5))));
    }
}

pub mod algo;
pub mod grid;
pub mod tree;

use rsmt_common::db::core::Grid;
use rsmt_common::db::pins::PinSet;
use rsmt_common::error::InvariantViolation;
use rsmt_common::geom::coord::GridCoord;
use rsmt_common::util::config::Config;
use tree::Tree;

/// A net after tree construction and materialization.
pub struct RoutedNet {
    pub grid: Grid,
    pub tree: Tree,
    pub pseudo_nodes: Vec<GridCoord>,
    pub mst_weight: u64,
}

pub fn route(pins: &PinSet, config: &Config) -> Result<RoutedNet, InvariantViolation> {
    let mut grid = Grid::new(pins.size());
    for &p in pins.pins() {
        grid.add_pin(p)?;
    }

    let outcome = algo::steiner::build_tree(&mut grid, &config.steiner)?;
    algo::path::materialize(&mut grid, &outcome.tree)?;

    Ok(RoutedNet {
        grid,
        tree: outcome.tree,
        pseudo_nodes: outcome.committed,
        mst_weight: outcome.mst_weight,
    })
}

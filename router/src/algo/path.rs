use crate::tree::Tree;
use rsmt_common::db::core::Grid;
use rsmt_common::error::InvariantViolation;
use rsmt_common::geom::coord::GridCoord;

/// Routes one tree edge as an L: vertical leg at `from.x` first, then the
/// horizontal leg at `to.y`. Occupancy of the bend point is not checked.
pub fn make_path(grid: &mut Grid, from: GridCoord, to: GridCoord) -> Result<(), InvariantViolation> {
    let mut curr = from;

    while curr.y != to.y {
        let y = if curr.y < to.y { curr.y + 1 } else { curr.y - 1 };
        let next = GridCoord::new(curr.x, y);
        grid.set_connection(curr, next)?;
        curr = next;
    }

    while curr.x != to.x {
        let x = if curr.x < to.x { curr.x + 1 } else { curr.x - 1 };
        let next = GridCoord::new(x, curr.y);
        grid.set_connection(curr, next)?;
        curr = next;
    }
    Ok(())
}

pub fn materialize(grid: &mut Grid, tree: &Tree) -> Result<(), InvariantViolation> {
    for (from, to) in tree.edges() {
        make_path(grid, from.pos, to.pos)?;
    }
    log::info!(
        "Materialized {} edges into {} unit wires",
        tree.len(),
        grid.wire_length()
    );
    Ok(())
}

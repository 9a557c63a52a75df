use crate::db::core::Grid;
use crate::geom::coord::GridCoord;
use std::collections::VecDeque;

/// Post-route verification of a materialized net.
///
/// Flood-fills set connections from the first node and reports an open net
/// when any pin or pseudo-node stays unreached. Also rejects wire that is
/// longer than the tree it was materialized from.
pub fn run(grid: &Grid, tree_weight: u64) -> Result<(), String> {
    log::info!("Starting Route Verification (opens / wirelength)");

    let mut msgs = Vec::new();

    match check_opens(grid) {
        Err(e) => {
            log::error!("\x1b[31mFAIL\x1b[0m: Open Net (Disconnected) Detected");
            log::error!("{}", e);
            msgs.push(e);
        }
        Ok(_) => log::info!("\x1b[32mPASS\x1b[0m: All pins are connected."),
    }

    match check_wirelength(grid, tree_weight) {
        Err(e) => {
            log::error!("\x1b[31mFAIL\x1b[0m: Wirelength Exceeds Tree Weight");
            log::error!("{}", e);
            msgs.push(e);
        }
        Ok(_) => log::info!("\x1b[32mPASS\x1b[0m: Wirelength within tree weight."),
    }

    if msgs.is_empty() {
        log::info!("\x1b[32mSUCCESS\x1b[0m: VALID NET");
        Ok(())
    } else {
        log::error!("\x1b[31mFAILURE\x1b[0m: INVALID NET ({} Errors)", msgs.len());
        Err(msgs.join("; "))
    }
}

fn check_opens(grid: &Grid) -> Result<(), String> {
    let Some(start) = grid.nodes().first().map(|n| n.pos) else {
        return Ok(());
    };

    let size = grid.size() as usize;
    let mut visited = vec![false; size * size];
    let idx = |c: GridCoord| (c.y as usize) * size + (c.x as usize);

    let mut queue = VecDeque::new();
    visited[idx(start)] = true;
    queue.push_back(start);

    while let Some(curr) = queue.pop_front() {
        for next in grid.connected_neighbors(curr) {
            if !visited[idx(next)] {
                visited[idx(next)] = true;
                queue.push_back(next);
            }
        }
    }

    let unreached: Vec<String> = grid
        .nodes()
        .iter()
        .filter(|n| !visited[idx(n.pos)])
        .map(|n| n.pos.to_string())
        .collect();

    if unreached.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "OPEN: {} node(s) unreachable from {}: {}",
            unreached.len(),
            start,
            unreached.join(", ")
        ))
    }
}

fn check_wirelength(grid: &Grid, tree_weight: u64) -> Result<(), String> {
    let wire = grid.wire_length();
    if wire <= tree_weight {
        Ok(())
    } else {
        Err(format!(
            "WIRELENGTH: {} unit edges routed for a tree of weight {}",
            wire, tree_weight
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: u32, y: u32) -> GridCoord {
        GridCoord::new(x, y)
    }

    #[test]
    fn connected_net_passes() {
        let mut grid = Grid::new(5);
        grid.add_pin(c(0, 0)).unwrap();
        grid.add_pin(c(1, 1)).unwrap();
        grid.set_connection(c(0, 0), c(0, 1)).unwrap();
        grid.set_connection(c(0, 1), c(1, 1)).unwrap();
        assert!(run(&grid, 2).is_ok());
    }

    #[test]
    fn unreached_pin_is_an_open() {
        let mut grid = Grid::new(5);
        grid.add_pin(c(0, 0)).unwrap();
        grid.add_pin(c(3, 3)).unwrap();
        grid.set_connection(c(0, 0), c(1, 0)).unwrap();
        let err = run(&grid, 6).unwrap_err();
        assert!(err.contains("OPEN"));
        assert!(err.contains("(3, 3)"));
    }

    #[test]
    fn excess_wire_is_reported() {
        let mut grid = Grid::new(5);
        grid.add_pin(c(0, 0)).unwrap();
        grid.add_pin(c(1, 0)).unwrap();
        grid.set_connection(c(0, 0), c(1, 0)).unwrap();
        grid.set_connection(c(1, 0), c(2, 0)).unwrap();
        let err = run(&grid, 1).unwrap_err();
        assert!(err.contains("WIRELENGTH"));
    }

    #[test]
    fn single_pin_is_trivially_valid() {
        let mut grid = Grid::new(5);
        grid.add_pin(c(2, 2)).unwrap();
        assert!(run(&grid, 0).is_ok());
    }
}

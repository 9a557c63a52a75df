use crate::algo::mst::build_mst;
use crate::grid::ActiveSet;
use crate::tree::Tree;
use rayon::prelude::*;
use rsmt_common::db::core::Grid;
use rsmt_common::error::InvariantViolation;
use rsmt_common::geom::coord::GridCoord;
use rsmt_common::util::config::SteinerConfig;
use std::collections::HashSet;
use std::time::Instant;

pub struct SteinerOutcome {
    pub tree: Tree,
    /// Weight of the plain pin MST before any pseudo-node was committed.
    pub mst_weight: u64,
    /// Committed pseudo-nodes in commit order.
    pub committed: Vec<GridCoord>,
    /// Set when `max_passes` stopped the loop while an improving candidate
    /// was still left.
    pub capped: bool,
}

/// Hanan-grid junction candidates: for every pin pair `(p1, p2)` the points
/// `(p1.x, p2.y)` and `(p2.x, p1.y)`, kept when vacant, first occurrence only.
pub fn hanan_candidates(grid: &Grid) -> Vec<GridCoord> {
    let pins: Vec<GridCoord> = grid.pins().collect();
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for (i, p1) in pins.iter().enumerate() {
        for p2 in &pins[i + 1..] {
            for c in [GridCoord::new(p1.x, p2.y), GridCoord::new(p2.x, p1.y)] {
                if grid.is_vacant(c) && seen.insert(c) {
                    candidates.push(c);
                }
            }
        }
    }
    candidates
}

/// Greedy Steiner augmentation.
///
/// Starts from the pin MST; each pass trials every remaining candidate as a
/// tentative pseudo-node and commits the one giving the strictly lowest
/// tree weight (earliest candidate on ties). Stops when a pass finds no
/// improvement or `max_passes` commits have been made.
pub fn build_tree(
    grid: &mut Grid,
    config: &SteinerConfig,
) -> Result<SteinerOutcome, InvariantViolation> {
    let mut tree = build_mst(&ActiveSet::new(grid))?;
    let mst_weight = tree.weight();
    let mut committed = Vec::new();
    let mut capped = false;

    log::info!(
        "MST over {} pins: {} edges, weight {}",
        grid.num_nodes(),
        tree.len(),
        mst_weight
    );

    if !config.augment || grid.num_nodes() < 3 {
        return Ok(SteinerOutcome {
            tree,
            mst_weight,
            committed,
            capped,
        });
    }

    let mut candidates = hanan_candidates(grid);
    log::info!("Steiner: {} Hanan candidates", candidates.len());

    let mut pass = 0;
    loop {
        let start = Instant::now();
        let mut trials = evaluate_candidates(grid, &candidates, config.parallel)?;

        let Some(best) = select_best(&trials, tree.weight()) else {
            log::info!(
                "Steiner Converged at pass {}: weight {} ({} pseudo-nodes)",
                pass,
                tree.weight(),
                committed.len()
            );
            break;
        };

        if config.max_passes != 0 && pass == config.max_passes {
            log::warn!(
                "Steiner: stopped after max_passes = {} with weight {} still reducible to {}",
                config.max_passes,
                tree.weight(),
                trials[best].weight()
            );
            capped = true;
            break;
        }

        let pos = candidates.remove(best);
        grid.add_pseudo(pos)?;
        tree = trials.swap_remove(best);
        committed.push(pos);

        log::info!(
            "Steiner Pass {}: committed {}, weight {}, remaining {}, Time: {}ms",
            pass,
            pos,
            tree.weight(),
            candidates.len(),
            start.elapsed().as_millis()
        );
        pass += 1;
    }

    Ok(SteinerOutcome {
        tree,
        mst_weight,
        committed,
        capped,
    })
}

/// Builds the MST for each candidate as a tentative pseudo-node. The grid is
/// only read, so trials are independent and may run in parallel.
fn evaluate_candidates(
    grid: &Grid,
    candidates: &[GridCoord],
    parallel: bool,
) -> Result<Vec<Tree>, InvariantViolation> {
    let trial = |&pos: &GridCoord| -> Result<Tree, InvariantViolation> {
        let tree = build_mst(&ActiveSet::with_tentative(grid, pos)?)?;
        log::trace!("Trial {}: weight {}", pos, tree.weight());
        Ok(tree)
    };

    if parallel {
        candidates.par_iter().map(trial).collect()
    } else {
        candidates.iter().map(trial).collect()
    }
}

/// Index of the strictly lightest trial below `current`, earliest on ties.
fn select_best(trials: &[Tree], current: u64) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (i, t) in trials.iter().enumerate() {
        let bar = best.map_or(current, |(_, w)| w);
        if t.weight() < bar {
            best = Some((i, t.weight()));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsmt_common::db::core::Node;

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

    fn sequential() -> SteinerConfig {
        SteinerConfig {
            parallel: false,
            ..SteinerConfig::default()
        }
    }

    #[test]
    fn candidates_skip_occupied_and_duplicate_points() {
        let grid = grid_with(150, &[(0, 0), (0, 10), (10, 0)]);
        assert_eq!(hanan_candidates(&grid), vec![c(10, 10)]);
    }

    #[test]
    fn candidates_follow_pair_order() {
        let grid = grid_with(20, &[(5, 0), (0, 5), (10, 5), (5, 10)]);
        assert_eq!(
            hanan_candidates(&grid),
            vec![c(5, 5), c(0, 0), c(10, 0), c(0, 10), c(10, 10)]
        );
    }

    #[test]
    fn corner_needs_no_pseudo_node() {
        let mut grid = grid_with(150, &[(0, 0), (0, 10), (10, 0)]);
        let outcome = build_tree(&mut grid, &sequential()).unwrap();
        assert!(outcome.committed.is_empty());
        assert_eq!(outcome.tree.weight(), 20);
        assert_eq!(outcome.mst_weight, 20);
        assert!(grid.pseudo_nodes().is_empty());
    }

    #[test]
    fn plus_pattern_commits_its_center() {
        let mut grid = grid_with(20, &[(5, 0), (0, 5), (10, 5), (5, 10)]);
        let outcome = build_tree(&mut grid, &sequential()).unwrap();
        assert_eq!(outcome.committed, vec![c(5, 5)]);
        assert_eq!(outcome.mst_weight, 30);
        assert!(!outcome.capped);
        assert_eq!(outcome.tree.weight(), 20);
        assert_eq!(outcome.tree.len(), 4);
        assert!(grid.is_pseudo(c(5, 5)));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let pins = [(3, 1), (12, 4), (7, 13), (1, 9), (14, 14), (9, 0)];
        let mut a = grid_with(16, &pins);
        let mut b = grid_with(16, &pins);
        let seq = build_tree(&mut a, &sequential()).unwrap();
        let par = build_tree(&mut b, &SteinerConfig::default()).unwrap();
        assert_eq!(seq.committed, par.committed);
        assert_eq!(seq.tree, par.tree);
    }

    #[test]
    fn disabled_augmentation_keeps_the_mst() {
        let mut grid = grid_with(20, &[(5, 0), (0, 5), (10, 5), (5, 10)]);
        let config = SteinerConfig {
            augment: false,
            ..sequential()
        };
        let outcome = build_tree(&mut grid, &config).unwrap();
        assert!(outcome.committed.is_empty());
        assert_eq!(outcome.tree.weight(), 30);
    }

    #[test]
    fn max_passes_caps_commits() {
        // Two separate plus patterns each want a center.
        let pins = [
            (5, 0),
            (0, 5),
            (10, 5),
            (5, 10),
            (25, 20),
            (20, 25),
            (30, 25),
            (25, 30),
        ];
        let mut grid = grid_with(40, &pins);
        let config = SteinerConfig {
            max_passes: 1,
            ..sequential()
        };
        let outcome = build_tree(&mut grid, &config).unwrap();
        assert_eq!(outcome.committed.len(), 1);
        assert!(outcome.tree.weight() < outcome.mst_weight);
        assert!(outcome.capped);
    }

    #[test]
    fn cap_reached_at_convergence_is_not_capped() {
        let mut grid = grid_with(20, &[(5, 0), (0, 5), (10, 5), (5, 10)]);
        let config = SteinerConfig {
            max_passes: 1,
            ..sequential()
        };
        let outcome = build_tree(&mut grid, &config).unwrap();
        assert_eq!(outcome.committed, vec![c(5, 5)]);
        assert_eq!(outcome.tree.weight(), 20);
        assert!(!outcome.capped);
    }

    #[test]
    fn select_best_requires_strict_improvement() {
        let mut heavy = Tree::default();
        heavy.push(Node::pin(c(0, 0)), Node::pin(c(0, 9)));
        assert_eq!(select_best(&[heavy.clone()], 9), None);
        assert_eq!(select_best(&[heavy.clone()], 10), Some(0));

        let mut light = Tree::default();
        light.push(Node::pin(c(0, 0)), Node::pin(c(0, 5)));
        let trials = [heavy, light.clone(), light];
        assert_eq!(select_best(&trials, 10), Some(1));
    }
}

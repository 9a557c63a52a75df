use crate::grid::ActiveSet;
use rsmt_common::db::core::Node;
use rsmt_common::error::InvariantViolation;
use rsmt_common::geom::coord::GridCoord;

/// Nodes already connected by a growing tree, in the order they joined.
pub struct InTree {
    order: Vec<Node>,
    member: Vec<bool>,
    size: u32,
}

impl InTree {
    pub fn new(size: u32, capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            member: vec![false; (size as usize) * (size as usize)],
            size,
        }
    }

    #[inline(always)]
    fn index(&self, c: GridCoord) -> usize {
        (c.y as usize) * (self.size as usize) + (c.x as usize)
    }

    pub fn push(&mut self, node: Node) {
        let idx = self.index(node.pos);
        if !self.member[idx] {
            self.member[idx] = true;
            self.order.push(node);
        }
    }

    #[inline]
    pub fn contains(&self, c: GridCoord) -> bool {
        self.member[self.index(c)]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Scans the diamond of points exactly `dist` away from `pos` and returns the
/// first active node not yet in the tree.
///
/// Scan order is fixed: for `dx = 0..=dist` (with `dy = dist - dx`) the
/// column `x + dx` is probed before `x - dx`, and within a column `y - dy`
/// before `y + dy`.
pub fn check_pins_on_dist(
    active: &ActiveSet<'_>,
    pos: GridCoord,
    dist: u32,
    in_tree: &InTree,
) -> Option<Node> {
    if dist == 0 {
        return None;
    }

    let last = active.size().saturating_sub(1);
    let probe = |x: u32, y: u32| {
        let c = GridCoord::new(x, y);
        active.node_at(c).filter(|_| !in_tree.contains(c))
    };

    for dx in 0..=dist {
        let dy = dist - dx;
        let below = pos.y >= dy;
        let above = dy > 0 && last.saturating_sub(pos.y) >= dy;

        let right = (last.saturating_sub(pos.x) >= dx).then(|| pos.x + dx);
        let left = (dx > 0 && pos.x >= dx).then(|| pos.x - dx);

        for x in [right, left].into_iter().flatten() {
            if below && let Some(n) = probe(x, pos.y - dy) {
                return Some(n);
            }
            if above && let Some(n) = probe(x, pos.y + dy) {
                return Some(n);
            }
        }
    }
    None
}

/// Nearest `(in_tree, outside)` pair, growing the search radius from 1.
///
/// At each radius the tree members are tried in the order they joined, so
/// among equal-distance pairs the earliest member and the first scanned
/// point win.
pub fn closest_pair(
    active: &ActiveSet<'_>,
    in_tree: &InTree,
) -> Result<(Node, Node), InvariantViolation> {
    let max_dist = 2 * active.size().saturating_sub(1);
    for dist in 1..=max_dist {
        for &member in in_tree.nodes() {
            if let Some(found) = check_pins_on_dist(active, member.pos, dist, in_tree) {
                return Ok((member, found));
            }
        }
    }
    Err(InvariantViolation::NoClosestPin {
        size: active.size(),
    })
}

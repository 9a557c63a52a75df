use crate::error::InvariantViolation;
use crate::geom::coord::GridCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    #[default]
    Empty,
    Pin,
    Pseudo,
}

/// An occupied grid point: a pin or a pseudo-node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    pub pos: GridCoord,
    pub kind: NodeKind,
}

impl Node {
    pub fn pin(pos: GridCoord) -> Self {
        Self {
            pos,
            kind: NodeKind::Pin,
        }
    }

    pub fn pseudo(pos: GridCoord) -> Self {
        Self {
            pos,
            kind: NodeKind::Pseudo,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WireLayer {
    Horizontal,
    Vertical,
}

/// A merged straight run of unit edges, `p1` to `p2` inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteSegment {
    pub layer: WireLayer,
    pub p1: GridCoord,
    pub p2: GridCoord,
}

/// Bounded square routing plane.
///
/// Holds the kind of every grid point, the active nodes in insertion order
/// (pins first, then committed pseudo-nodes) and two connectivity matrices:
/// `horizontal` links `(x, y)-(x + 1, y)` and `vertical` links `(x, y)-(x, y + 1)`.
#[derive(Clone, Debug)]
pub struct Grid {
    size: u32,
    kinds: Vec<NodeKind>,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
    nodes: Vec<Node>,
}

impl Grid {
    pub fn new(size: u32) -> Self {
        let points = (size as usize) * (size as usize);
        let links = (size.saturating_sub(1) as usize) * (size as usize);

        if points > 16_000_000 {
            log::warn!("Allocating large Grid: {} points.", points);
        }

        Self {
            size,
            kinds: vec![NodeKind::Empty; points],
            horizontal: vec![false; links],
            vertical: vec![false; links],
            nodes: Vec::new(),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline(always)]
    pub fn contains(&self, c: GridCoord) -> bool {
        c.x < self.size && c.y < self.size
    }

    #[inline(always)]
    fn index(&self, c: GridCoord) -> usize {
        (c.y as usize) * (self.size as usize) + (c.x as usize)
    }

    #[inline(always)]
    fn horizontal_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.size as usize - 1) + (x as usize)
    }

    #[inline(always)]
    fn vertical_index(&self, x: u32, y: u32) -> usize {
        (x as usize) * (self.size as usize - 1) + (y as usize)
    }

    /// Kind at `c`; points outside the grid read as `Empty`.
    #[inline]
    pub fn kind(&self, c: GridCoord) -> NodeKind {
        if !self.contains(c) {
            return NodeKind::Empty;
        }
        self.kinds[self.index(c)]
    }

    pub fn is_pin(&self, c: GridCoord) -> bool {
        self.kind(c) == NodeKind::Pin
    }

    pub fn is_pseudo(&self, c: GridCoord) -> bool {
        self.kind(c) == NodeKind::Pseudo
    }

    pub fn is_vacant(&self, c: GridCoord) -> bool {
        self.contains(c) && self.kind(c) == NodeKind::Empty
    }

    /// Active nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn pins(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Pin)
            .map(|n| n.pos)
    }

    pub fn pseudo_nodes(&self) -> Vec<GridCoord> {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Pseudo)
            .map(|n| n.pos)
            .collect()
    }

    /// Marks `c` as a pin. Re-adding an existing pin is a no-op.
    pub fn add_pin(&mut self, c: GridCoord) -> Result<(), InvariantViolation> {
        self.check_inside(c)?;
        match self.kind(c) {
            NodeKind::Pin => Ok(()),
            NodeKind::Pseudo => Err(InvariantViolation::Occupied { at: c }),
            NodeKind::Empty => {
                let idx = self.index(c);
                self.kinds[idx] = NodeKind::Pin;
                self.nodes.push(Node::pin(c));
                Ok(())
            }
        }
    }

    pub fn add_pseudo(&mut self, c: GridCoord) -> Result<(), InvariantViolation> {
        self.check_inside(c)?;
        if self.kind(c) != NodeKind::Empty {
            return Err(InvariantViolation::Occupied { at: c });
        }
        let idx = self.index(c);
        self.kinds[idx] = NodeKind::Pseudo;
        self.nodes.push(Node::pseudo(c));
        Ok(())
    }

    pub fn remove_pseudo(&mut self, c: GridCoord) -> Result<(), InvariantViolation> {
        if self.kind(c) != NodeKind::Pseudo {
            return Err(InvariantViolation::NotPseudo { at: c });
        }
        let idx = self.index(c);
        self.kinds[idx] = NodeKind::Empty;
        self.nodes.retain(|n| n.pos != c);
        Ok(())
    }

    pub fn is_free_connection(
        &self,
        a: GridCoord,
        b: GridCoord,
    ) -> Result<bool, InvariantViolation> {
        let set = match self.link(a, b)? {
            Link::Horizontal(idx) => self.horizontal[idx],
            Link::Vertical(idx) => self.vertical[idx],
        };
        Ok(!set)
    }

    /// Connects two adjacent points. Connections are never cleared.
    pub fn set_connection(&mut self, a: GridCoord, b: GridCoord) -> Result<(), InvariantViolation> {
        match self.link(a, b)? {
            Link::Horizontal(idx) => self.horizontal[idx] = true,
            Link::Vertical(idx) => self.vertical[idx] = true,
        }
        Ok(())
    }

    /// Raw bit for the link `(x, y)-(x + 1, y)`; false outside the grid.
    #[inline]
    pub fn get_horizontal(&self, x: u32, y: u32) -> bool {
        if x.saturating_add(1) >= self.size || y >= self.size {
            return false;
        }
        self.horizontal[self.horizontal_index(x, y)]
    }

    /// Raw bit for the link `(x, y)-(x, y + 1)`; false outside the grid.
    #[inline]
    pub fn get_vertical(&self, x: u32, y: u32) -> bool {
        if x >= self.size || y.saturating_add(1) >= self.size {
            return false;
        }
        self.vertical[self.vertical_index(x, y)]
    }

    /// Whether any horizontal link ends at `c`.
    pub fn touches_horizontal(&self, c: GridCoord) -> bool {
        self.get_horizontal(c.x, c.y) || (c.x > 0 && self.get_horizontal(c.x - 1, c.y))
    }

    /// Whether any vertical link ends at `c`.
    pub fn touches_vertical(&self, c: GridCoord) -> bool {
        self.get_vertical(c.x, c.y) || (c.y > 0 && self.get_vertical(c.x, c.y - 1))
    }

    /// Points linked to `c` by a set connection.
    pub fn connected_neighbors(&self, c: GridCoord) -> Vec<GridCoord> {
        let mut n = Vec::with_capacity(4);
        if c.x > 0 && self.get_horizontal(c.x - 1, c.y) {
            n.push(GridCoord::new(c.x - 1, c.y));
        }
        if self.get_horizontal(c.x, c.y) {
            n.push(GridCoord::new(c.x + 1, c.y));
        }
        if c.y > 0 && self.get_vertical(c.x, c.y - 1) {
            n.push(GridCoord::new(c.x, c.y - 1));
        }
        if self.get_vertical(c.x, c.y) {
            n.push(GridCoord::new(c.x, c.y + 1));
        }
        n
    }

    /// Number of set unit links on both axes.
    pub fn wire_length(&self) -> u64 {
        let h = self.horizontal.iter().filter(|&&b| b).count();
        let v = self.vertical.iter().filter(|&&b| b).count();
        (h + v) as u64
    }

    fn check_inside(&self, c: GridCoord) -> Result<(), InvariantViolation> {
        if self.contains(c) {
            Ok(())
        } else {
            Err(InvariantViolation::OutOfGrid { at: c })
        }
    }

    fn link(&self, a: GridCoord, b: GridCoord) -> Result<Link, InvariantViolation> {
        self.check_inside(a)?;
        self.check_inside(b)?;
        if !a.is_adjacent(b) {
            return Err(InvariantViolation::NotAdjacent { a, b });
        }
        if a.y == b.y {
            Ok(Link::Horizontal(self.horizontal_index(a.x.min(b.x), a.y)))
        } else {
            Ok(Link::Vertical(self.vertical_index(a.x, a.y.min(b.y))))
        }
    }
}

enum Link {
    Horizontal(usize),
    Vertical(usize),
}

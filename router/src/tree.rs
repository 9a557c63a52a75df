use rsmt_common::db::core::Node;

/// Spanning tree over the active nodes, edges in growth order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tree {
    edges: Vec<(Node, Node)>,
    weight: u64,
}

impl Tree {
    pub fn push(&mut self, from: Node, to: Node) {
        self.weight += from.pos.manhattan(to.pos) as u64;
        self.edges.push((from, to));
    }

    pub fn edges(&self) -> &[(Node, Node)] {
        &self.edges
    }

    /// Sum of the Manhattan lengths of all edges.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

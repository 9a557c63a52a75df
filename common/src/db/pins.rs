use crate::error::DescriptorError;
use crate::geom::coord::GridCoord;
use std::collections::HashSet;

/// Ordered, deduplicated list of required terminals.
///
/// Insertion order matters downstream: the first pin seeds tree growth and
/// the order breaks distance ties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinSet {
    size: u32,
    pins: Vec<GridCoord>,
    seen: HashSet<GridCoord>,
}

impl PinSet {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            pins: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn from_coords(
        size: u32,
        coords: impl IntoIterator<Item = (u32, u32)>,
    ) -> Result<Self, DescriptorError> {
        let mut set = Self::new(size);
        for (x, y) in coords {
            set.add_pin(GridCoord::new(x, y))?;
        }
        Ok(set)
    }

    /// Appends a pin. Returns `Ok(false)` when the coordinate was already present.
    pub fn add_pin(&mut self, c: GridCoord) -> Result<bool, DescriptorError> {
        if c.x >= self.size || c.y >= self.size {
            return Err(DescriptorError::OutOfBounds {
                x: c.x,
                y: c.y,
                size: self.size,
            });
        }
        if !self.seen.insert(c) {
            return Ok(false);
        }
        self.pins.push(c);
        Ok(true)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pins(&self) -> &[GridCoord] {
        &self.pins
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

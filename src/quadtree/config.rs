use crate::{Error, Result};

/// Nodes at this depth stop subdividing and let their bucket grow instead.
///
/// Halving a region 48 times leaves cells of about `4e-15` times the root size.
pub const DEFAULT_MAX_DEPTH: u32 = 48;

const DEFAULT_CAPACITY: usize = 4;

/// Settings shared by every node of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of points a node holds before it subdivides.
    pub capacity: usize,
    /// Depth (root = 0) at which nodes no longer subdivide.
    pub max_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(())
    }
}

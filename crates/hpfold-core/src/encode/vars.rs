/// Hands out contiguous blocks of 1-based variable numbers in call order.
///
/// Every clause generator takes the allocator by mutable reference and numbers
/// its literals through the block it receives, so generators can be combined in
/// any pipeline (or tested in isolation) without implicit numbering agreements.
/// Variable numbers strictly increase and are never reused.
#[derive(Debug, Default, Clone)]
pub struct VarAllocator {
    allocated: u32,
}

impl VarAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of variables allocated so far. This is the `nvars` value
    /// reported in the DIMACS header once encoding is complete.
    pub fn allocated(&self) -> u32 {
        self.allocated
    }

    /// Reserves the next `count` variable numbers and returns the block.
    pub fn block(&mut self, count: u32) -> VarBlock {
        let first = self.allocated + 1;
        self.allocated += count;
        VarBlock { first, count }
    }
}

/// A contiguous run of allocated variable numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarBlock {
    first: u32,
    count: u32,
}

impl VarBlock {
    pub fn len(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Variable number at a zero-based offset into the block.
    pub fn var(&self, index: u32) -> u32 {
        debug_assert!(index < self.count);
        self.first + index
    }

    /// Positive literal for the variable at `index`.
    pub fn lit(&self, index: u32) -> i32 {
        self.var(index) as i32
    }

    /// Negative literal for the variable at `index`.
    pub fn neg(&self, index: u32) -> i32 {
        -(self.var(index) as i32)
    }
}

/// A square 2D lattice of `width × width` cells.
///
/// Cells are numbered 1 through `width²` in row-major order, matching the
/// 1-based numbering used throughout the CNF encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    width: u32,
}

impl Lattice {
    pub fn new(width: u32) -> Self {
        debug_assert!(width >= 1);
        Self { width }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn cell_count(&self) -> u32 {
        self.width * self.width
    }

    /// Zero-based row of a 1-based cell number.
    pub fn row(&self, cell: u32) -> u32 {
        (cell - 1) / self.width
    }

    /// Zero-based column of a 1-based cell number.
    pub fn col(&self, cell: u32) -> u32 {
        (cell - 1) % self.width
    }

    /// The right neighbor of `cell`, if the cell is not in the last column.
    pub fn right_neighbor(&self, cell: u32) -> Option<u32> {
        (self.col(cell) + 1 < self.width).then(|| cell + 1)
    }

    /// The neighbor below `cell`, if the cell is not in the last row.
    pub fn down_neighbor(&self, cell: u32) -> Option<u32> {
        (self.row(cell) + 1 < self.width).then(|| cell + self.width)
    }

    /// All orthogonal neighbors of `cell`, in right, left, down, up order.
    /// Corner cells have two, other boundary cells three, interior cells four.
    pub fn neighbors(&self, cell: u32) -> Vec<u32> {
        let mut neighbors = Vec::with_capacity(4);
        if self.col(cell) + 1 < self.width {
            neighbors.push(cell + 1);
        }
        if self.col(cell) > 0 {
            neighbors.push(cell - 1);
        }
        if self.row(cell) + 1 < self.width {
            neighbors.push(cell + self.width);
        }
        if self.row(cell) > 0 {
            neighbors.push(cell - self.width);
        }
        neighbors
    }
}

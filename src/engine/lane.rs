use std::collections::VecDeque;

/// One or more code points rendered as a single world slot.
/// Themes may use multi-char glyphs (the default rail is `".."`).
pub type Glyph = String;

/// A world slot: either a glyph or empty. Copied by value, no identity.
pub type Cell = Option<Glyph>;

/// Fixed-width scroll buffer. Length is always exactly the display width;
/// the only mutation is `advance`, which shifts everything one slot toward
/// the head and appends one new cell at the tail.
#[derive(Clone, Debug)]
pub struct Lane {
    cells: VecDeque<Cell>,
}

impl Lane {
    pub fn new(width: usize) -> Self {
        assert!(width > 0, "lane width must be non-zero");
        Self {
            cells: (0..width).map(|_| None).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Drop the head cell, append `cell` at the tail, return the evicted
    /// cell. Callers that track a count keyed on a glyph (the cloud cap)
    /// compare the return value against their glyph.
    pub fn advance(&mut self, cell: Cell) -> Cell {
        let evicted = self
            .cells
            .pop_front()
            .expect("lane is never empty by construction");
        self.cells.push_back(cell);
        evicted
    }

    pub fn get(&self, index: usize) -> Option<&Glyph> {
        self.cells.get(index).and_then(|c| c.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Number of slots currently holding `glyph`.
    pub fn count_of(&self, glyph: &str) -> usize {
        self.cells
            .iter()
            .filter(|c| c.as_deref() == Some(glyph))
            .count()
    }
}

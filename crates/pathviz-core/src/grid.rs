//! The [`Grid`] type: an immutable snapshot of the search grid.
//!
//! Every edit returns a *new* `Grid`; the receiver is left untouched.
//! Snapshots share their backing buffer through an [`Arc`] until one of
//! them is edited, so handing a grid to a running search is a pointer copy
//! and later edits can never be observed by that search.

use std::fmt;
use std::sync::Arc;

use crate::cell::{Cell, Marker};
use crate::geom::{Point, Range};

/// Rows of the default grid.
pub const DEFAULT_ROWS: i32 = 20;
/// Columns of the default grid.
pub const DEFAULT_COLS: i32 = 40;
/// Start marker position of the default grid.
pub const DEFAULT_START: Point = Point::new(5, 5);
/// End marker position of the default grid.
pub const DEFAULT_END: Point = Point::new(15, 35);

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows × cols` rectangle of [`Cell`]s with at most one start and one
/// end marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Arc<Vec<Cell>>,
    bounds: Range,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create a grid with both markers placed.
    pub fn new(rows: i32, cols: i32, start: Point, end: Point) -> Result<Self, GridError> {
        let grid = Self::blank(rows, cols)?;
        if !grid.contains(start) {
            return Err(GridError::MarkerOutOfBounds(start));
        }
        if !grid.contains(end) {
            return Err(GridError::MarkerOutOfBounds(end));
        }
        if start == end {
            return Err(GridError::DuplicateMarker(end));
        }
        Ok(grid.with_marker(Marker::Start, start).with_marker(Marker::End, end))
    }

    /// Create a grid of open cells with no markers.
    pub fn blank(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidSize { rows, cols });
        }
        Ok(Self::filled(Range::sized(rows, cols)))
    }

    /// The 20×40 grid with start at (5, 5) and end at (15, 35).
    pub fn standard() -> Self {
        Self::filled(Range::sized(DEFAULT_ROWS, DEFAULT_COLS))
            .with_marker(Marker::Start, DEFAULT_START)
            .with_marker(Marker::End, DEFAULT_END)
    }

    fn filled(bounds: Range) -> Self {
        Self {
            cells: Arc::new(vec![Cell::OPEN; bounds.len()]),
            bounds,
            start: None,
            end: None,
        }
    }

    // Only used on freshly built grids where `p` is known to be in bounds
    // and unoccupied.
    fn with_marker(mut self, marker: Marker, p: Point) -> Self {
        if let Some(i) = self.bounds.index(p) {
            Arc::make_mut(&mut self.cells)[i].set_marker(Some(marker));
            match marker {
                Marker::Start => self.start = Some(p),
                Marker::End => self.end = Some(p),
            }
        }
        self
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.bounds.index(p).map(|i| self.cells[i])
    }

    /// Start marker position, if placed.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// End marker position, if placed.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_traversable(&self, p: Point) -> bool {
        self.at(p).is_some_and(Cell::is_traversable)
    }

    /// Traversal weight at `p` (1 outside the grid).
    #[inline]
    pub fn weight(&self, p: Point) -> i32 {
        self.at(p).map_or(crate::cell::MIN_WEIGHT, Cell::weight)
    }

    /// The up-to-four in-bounds orthogonal neighbours of `p`, in the order
    /// up, down, left, right. Walls are included.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.contains(n))
    }

    /// Whether at least one neighbour of `p` is traversable.
    pub fn has_open_neighbor(&self, p: Point) -> bool {
        self.neighbors(p).any(|n| self.is_traversable(n))
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    // -----------------------------------------------------------------------
    // Edits (each returns a new snapshot)
    // -----------------------------------------------------------------------

    fn edit(&self, p: Point, f: impl FnOnce(&mut Cell)) -> Result<Grid, EditError> {
        let i = self.bounds.index(p).ok_or(EditError::OutOfBounds(p))?;
        let mut next = self.clone();
        f(&mut Arc::make_mut(&mut next.cells)[i]);
        Ok(next)
    }

    fn cell_or_err(&self, p: Point) -> Result<Cell, EditError> {
        self.at(p).ok_or(EditError::OutOfBounds(p))
    }

    /// Place or remove a wall. Marker cells are rejected. Placing a wall
    /// resets the cell's weight to 1.
    pub fn set_wall(&self, p: Point, wall: bool) -> Result<Grid, EditError> {
        let cell = self.cell_or_err(p)?;
        if let Some(marker) = cell.marker() {
            return Err(EditError::Occupied { pos: p, marker });
        }
        self.edit(p, |c| c.set_wall(wall))
    }

    /// Flip the wall flag at `p`.
    pub fn toggle_wall(&self, p: Point) -> Result<Grid, EditError> {
        let cell = self.cell_or_err(p)?;
        self.set_wall(p, !cell.is_wall())
    }

    /// Set the weight at `p`, clamped to `[1, 10]`. Marker and wall cells
    /// are rejected.
    pub fn set_weight(&self, p: Point, weight: i32) -> Result<Grid, EditError> {
        let cell = self.cell_or_err(p)?;
        if let Some(marker) = cell.marker() {
            return Err(EditError::Occupied { pos: p, marker });
        }
        if cell.is_wall() {
            return Err(EditError::Wall(p));
        }
        self.edit(p, |c| c.set_weight(weight))
    }

    /// Move the start marker to `p`. Walls and the end marker are rejected.
    pub fn move_start(&self, p: Point) -> Result<Grid, EditError> {
        self.move_marker(Marker::Start, p)
    }

    /// Move the end marker to `p`. Walls and the start marker are rejected.
    pub fn move_end(&self, p: Point) -> Result<Grid, EditError> {
        self.move_marker(Marker::End, p)
    }

    fn move_marker(&self, marker: Marker, p: Point) -> Result<Grid, EditError> {
        let cell = self.cell_or_err(p)?;
        if cell.is_wall() {
            return Err(EditError::Wall(p));
        }
        match cell.marker() {
            Some(m) if m == marker => return Ok(self.clone()),
            Some(other) => return Err(EditError::Occupied { pos: p, marker: other }),
            None => {}
        }

        let old = match marker {
            Marker::Start => self.start,
            Marker::End => self.end,
        };
        let mut next = self.clone();
        let cells = Arc::make_mut(&mut next.cells);
        if let Some(i) = old.and_then(|o| self.bounds.index(o)) {
            cells[i].set_marker(None);
        }
        if let Some(i) = self.bounds.index(p) {
            cells[i].set_marker(Some(marker));
            cells[i].set_weight(crate::cell::MIN_WEIGHT);
        }
        match marker {
            Marker::Start => next.start = Some(p),
            Marker::End => next.end = Some(p),
        }
        Ok(next)
    }

    /// The same grid with every wall removed and every weight back to 1.
    /// Markers stay where they are.
    pub fn cleared(&self) -> Grid {
        let mut next = self.clone();
        for c in Arc::make_mut(&mut next.cells).iter_mut() {
            c.set_wall(false);
            c.set_weight(crate::cell::MIN_WEIGHT);
        }
        next
    }

    /// Whether two snapshots share the same backing buffer.
    #[inline]
    pub fn shares_storage(&self, other: &Grid) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }

    // Used by the ASCII parser, which validates positions itself.
    pub(crate) fn from_parts(bounds: Range, cells: Vec<Cell>, start: Option<Point>, end: Option<Point>) -> Self {
        Self {
            cells: Arc::new(cells),
            bounds,
            start,
            end,
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while building a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Rows and columns must both be positive.
    InvalidSize { rows: i32, cols: i32 },
    /// A marker was placed outside the grid.
    MarkerOutOfBounds(Point),
    /// Two markers of the same kind, or start and end on one cell.
    DuplicateMarker(Point),
    /// Map lines have differing widths.
    InconsistentWidth { line: usize },
    /// A character outside the map alphabet.
    InvalidRune { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { rows, cols } => {
                write!(f, "grid: invalid size {rows}x{cols}")
            }
            Self::MarkerOutOfBounds(p) => write!(f, "grid: marker at {p} is out of bounds"),
            Self::DuplicateMarker(p) => write!(f, "grid: duplicate marker at {p}"),
            Self::InconsistentWidth { line } => {
                write!(f, "grid: line {line} has inconsistent width")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "grid: invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Why an edit was rejected. Rejected edits leave the grid unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// The target is outside the grid.
    OutOfBounds(Point),
    /// The target holds a marker that the edit may not overwrite.
    Occupied { pos: Point, marker: Marker },
    /// The target is a wall.
    Wall(Point),
    /// A search is in flight; edits wait until it finishes.
    Busy,
    /// Weights can only be painted while weighting is enabled.
    Unweighted,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "edit: {p} is out of bounds"),
            Self::Occupied { pos, marker } => {
                write!(f, "edit: {pos} holds the {marker:?} marker")
            }
            Self::Wall(p) => write!(f, "edit: {p} is a wall"),
            Self::Busy => f.write_str("edit: a search is running"),
            Self::Unweighted => f.write_str("edit: weighting is disabled"),
        }
    }
}

impl std::error::Error for EditError {}

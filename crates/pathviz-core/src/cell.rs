//! The [`Cell`] type: one node of the search grid.

/// Lowest traversal weight a cell can carry.
pub const MIN_WEIGHT: i32 = 1;
/// Highest traversal weight a cell can carry.
pub const MAX_WEIGHT: i32 = 10;

/// Clamp a requested weight into `[MIN_WEIGHT, MAX_WEIGHT]`.
#[inline]
pub const fn clamp_weight(w: i32) -> i32 {
    if w < MIN_WEIGHT {
        MIN_WEIGHT
    } else if w > MAX_WEIGHT {
        MAX_WEIGHT
    } else {
        w
    }
}

/// Which endpoint marker a cell holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    Start,
    End,
}

/// A grid cell: wall and marker flags plus a traversal weight.
///
/// Fields are private so that the weight is clamped on every write and a
/// wall never coexists with a marker. Only [`Grid`](crate::Grid) mutates
/// cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCell"))]
pub struct Cell {
    marker: Option<Marker>,
    wall: bool,
    weight: i32,
}

/// Wire form of a [`Cell`], checked on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCell {
    marker: Option<Marker>,
    wall: bool,
    weight: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCell> for Cell {
    type Error = &'static str;

    fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
        if raw.wall && raw.marker.is_some() {
            return Err("a wall cell cannot hold a marker");
        }
        let mut cell = Cell::OPEN;
        cell.set_weight(raw.weight);
        cell.set_wall(raw.wall);
        cell.set_marker(raw.marker);
        Ok(cell)
    }
}

impl Cell {
    /// An open cell of weight 1.
    pub const OPEN: Self = Self {
        marker: None,
        wall: false,
        weight: MIN_WEIGHT,
    };

    #[inline]
    pub fn is_start(self) -> bool {
        self.marker == Some(Marker::Start)
    }

    #[inline]
    pub fn is_end(self) -> bool {
        self.marker == Some(Marker::End)
    }

    #[inline]
    pub fn marker(self) -> Option<Marker> {
        self.marker
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self.wall
    }

    /// Whether a search may step onto this cell.
    #[inline]
    pub fn is_traversable(self) -> bool {
        !self.wall
    }

    /// Traversal weight, always in `[MIN_WEIGHT, MAX_WEIGHT]`.
    #[inline]
    pub fn weight(self) -> i32 {
        self.weight
    }

    #[inline]
    pub(crate) fn set_wall(&mut self, wall: bool) {
        self.wall = wall;
        if wall {
            self.weight = MIN_WEIGHT;
        }
    }

    #[inline]
    pub(crate) fn set_weight(&mut self, w: i32) {
        self.weight = clamp_weight(w);
    }

    #[inline]
    pub(crate) fn set_marker(&mut self, marker: Option<Marker>) {
        self.marker = marker;
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::OPEN
    }
}

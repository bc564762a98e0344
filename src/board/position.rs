//! Position definitions and metadata for the Yut-nori board.
//!
//! The board has 29 stations: 20 on the outer square (the four corner hubs
//! included) and 9 inside it, forming two diagonals that cross at the center.
//! Perimeter stations are enumerated counter-clockwise starting at the
//! finishing hub, followed by the diagonal stations in travel order and the
//! center. Metadata is stored in a compile-time table indexed by the
//! `Position` discriminant.

/// The number of stations on the board.
pub const POSITION_COUNT: usize = 29;

/// The number of stations on the outer square, corner hubs included.
pub const PERIMETER_COUNT: usize = 20;

/// A station on the Yut-nori board.
///
/// Diagonal stations are numbered in the direction pieces travel: `1` is the
/// station entered first. The `#[repr(u8)]` attribute enables use as an
/// array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Position {
    BottomRight = 0, // finishing hub, also where new pieces enter
    Right1 = 1,
    Right2 = 2,
    Right3 = 3,
    Right4 = 4,
    TopRight = 5,
    Top1 = 6,
    Top2 = 7,
    Top3 = 8,
    Top4 = 9,
    TopLeft = 10,
    Left1 = 11,
    Left2 = 12,
    Left3 = 13,
    Left4 = 14,
    BottomLeft = 15,
    Bottom1 = 16,
    Bottom2 = 17,
    Bottom3 = 18,
    Bottom4 = 19,
    TopRightDiag1 = 20,
    TopRightDiag2 = 21,
    TopLeftDiag1 = 22,
    TopLeftDiag2 = 23,
    BottomLeftDiag1 = 24,
    BottomLeftDiag2 = 25,
    BottomRightDiag1 = 26,
    BottomRightDiag2 = 27,
    Center = 28,
}

/// All position variants in index order.
pub const ALL_POSITIONS: [Position; POSITION_COUNT] = [
    Position::BottomRight, Position::Right1, Position::Right2, Position::Right3,
    Position::Right4, Position::TopRight, Position::Top1, Position::Top2,
    Position::Top3, Position::Top4, Position::TopLeft, Position::Left1,
    Position::Left2, Position::Left3, Position::Left4, Position::BottomLeft,
    Position::Bottom1, Position::Bottom2, Position::Bottom3, Position::Bottom4,
    Position::TopRightDiag1, Position::TopRightDiag2, Position::TopLeftDiag1,
    Position::TopLeftDiag2, Position::BottomLeftDiag1, Position::BottomLeftDiag2,
    Position::BottomRightDiag1, Position::BottomRightDiag2, Position::Center,
];

/// The position pieces enter from and must come back to.
pub const FINISH: Position = Position::BottomRight;

/// One of the four half-diagonals between a corner hub and the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagonal {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

/// Classifies a station by where it sits on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// One of the four corners of the outer square.
    Corner,
    /// A non-corner station on the outer square.
    Side,
    /// A station on one of the inner shortcuts.
    Diagonal(Diagonal),
    Center,
}

/// Static metadata for a single position.
#[derive(Debug, Clone, Copy)]
pub struct PositionInfo {
    pub abbr: &'static str,
    pub name: &'static str,
    pub region: Region,
}

const fn corner(abbr: &'static str, name: &'static str) -> PositionInfo {
    PositionInfo { abbr, name, region: Region::Corner }
}
const fn side(abbr: &'static str, name: &'static str) -> PositionInfo {
    PositionInfo { abbr, name, region: Region::Side }
}
const fn diag(abbr: &'static str, name: &'static str, d: Diagonal) -> PositionInfo {
    PositionInfo { abbr, name, region: Region::Diagonal(d) }
}

/// Metadata for every position, indexed by `Position as usize`.
pub static POSITION_INFO: [PositionInfo; POSITION_COUNT] = [
    corner("br", "bottom-right hub"),
    side("r1", "right side 1"),
    side("r2", "right side 2"),
    side("r3", "right side 3"),
    side("r4", "right side 4"),
    corner("tr", "top-right hub"),
    side("t1", "top side 1"),
    side("t2", "top side 2"),
    side("t3", "top side 3"),
    side("t4", "top side 4"),
    corner("tl", "top-left hub"),
    side("l1", "left side 1"),
    side("l2", "left side 2"),
    side("l3", "left side 3"),
    side("l4", "left side 4"),
    corner("bl", "bottom-left hub"),
    side("b1", "bottom side 1"),
    side("b2", "bottom side 2"),
    side("b3", "bottom side 3"),
    side("b4", "bottom side 4"),
    diag("tr1", "top-right diagonal 1", Diagonal::TopRight),
    diag("tr2", "top-right diagonal 2", Diagonal::TopRight),
    diag("tl1", "top-left diagonal 1", Diagonal::TopLeft),
    diag("tl2", "top-left diagonal 2", Diagonal::TopLeft),
    diag("bl1", "bottom-left diagonal 1", Diagonal::BottomLeft),
    diag("bl2", "bottom-left diagonal 2", Diagonal::BottomLeft),
    diag("br1", "bottom-right diagonal 1", Diagonal::BottomRight),
    diag("br2", "bottom-right diagonal 2", Diagonal::BottomRight),
    PositionInfo { abbr: "c", name: "center", region: Region::Center },
];

impl Position {
    /// Returns the short notation for this position.
    pub const fn abbr(self) -> &'static str {
        POSITION_INFO[self as usize].abbr
    }

    /// Returns the full display name for this position.
    pub const fn name(self) -> &'static str {
        POSITION_INFO[self as usize].name
    }

    pub const fn region(self) -> Region {
        POSITION_INFO[self as usize].region
    }

    /// Returns the position at the given index, if in range.
    pub const fn from_index(idx: usize) -> Option<Position> {
        if idx < POSITION_COUNT {
            Some(ALL_POSITIONS[idx])
        } else {
            None
        }
    }

    /// Looks up a position by its short notation.
    pub fn from_abbr(abbr: &str) -> Option<Position> {
        ALL_POSITIONS.iter().copied().find(|p| p.abbr() == abbr)
    }

    /// True for stations on the outer square, corners included.
    pub const fn is_perimeter(self) -> bool {
        matches!(self.region(), Region::Corner | Region::Side)
    }

    /// True for the four corners of the outer square.
    pub const fn is_hub(self) -> bool {
        matches!(self.region(), Region::Corner)
    }

    /// True for the two far corners where a shortcut begins.
    pub const fn is_top_hub(self) -> bool {
        matches!(self, Position::TopRight | Position::TopLeft)
    }

    pub const fn is_finish(self) -> bool {
        matches!(self, Position::BottomRight)
    }

    pub const fn is_center(self) -> bool {
        matches!(self, Position::Center)
    }

    /// True for the eight shortcut stations, the center excluded.
    pub const fn is_inner_diagonal(self) -> bool {
        matches!(self.region(), Region::Diagonal(_))
    }

    /// True for any station inside the outer square.
    pub const fn is_inner(self) -> bool {
        !self.is_perimeter()
    }

    /// Returns the half-diagonal this station lies on, if any.
    pub const fn diagonal(self) -> Option<Diagonal> {
        match self.region() {
            Region::Diagonal(d) => Some(d),
            _ => None,
        }
    }

    pub const fn is_top_right_diagonal(self) -> bool {
        matches!(self.region(), Region::Diagonal(Diagonal::TopRight))
    }

    pub const fn is_top_left_diagonal(self) -> bool {
        matches!(self.region(), Region::Diagonal(Diagonal::TopLeft))
    }

    pub const fn is_bottom_left_diagonal(self) -> bool {
        matches!(self.region(), Region::Diagonal(Diagonal::BottomLeft))
    }

    pub const fn is_bottom_right_diagonal(self) -> bool {
        matches!(self.region(), Region::Diagonal(Diagonal::BottomRight))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbr())
    }
}

/// A set of positions packed into the low 29 bits of a `u32`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PositionSet(u32);

impl PositionSet {
    pub const fn empty() -> Self {
        PositionSet(0)
    }

    pub const fn contains(self, p: Position) -> bool {
        self.0 & (1 << p as u32) != 0
    }

    /// Returns a copy of the set with `p` added.
    #[must_use]
    pub const fn with(self, p: Position) -> Self {
        PositionSet(self.0 | (1 << p as u32))
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

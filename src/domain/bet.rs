use serde::{Serialize, Serializer};
use std::fmt;

/// A sum that can be backed as a point bet. Seven is never a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointNumber(u8);

impl PointNumber {
    pub const ALL: [PointNumber; 10] = [
        PointNumber(2),
        PointNumber(3),
        PointNumber(4),
        PointNumber(5),
        PointNumber(6),
        PointNumber(8),
        PointNumber(9),
        PointNumber(10),
        PointNumber(11),
        PointNumber(12),
    ];

    pub fn new(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|point| point.0 == value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Profit multiple on a win, stake excluded, as `(numerator, denominator)`.
    pub fn ratio(self) -> (u32, u32) {
        match self.0 {
            2 | 12 => (11, 2),
            3 | 11 => (11, 4),
            4 | 10 => (9, 5),
            5 | 9 => (7, 5),
            _ => (7, 6),
        }
    }
}

/// Every bet the table recognizes.
///
/// The identifiers match the keys clients send in their wager maps, so
/// `BetKind` serializes as that identifier and can key JSON objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BetKind {
    Point(PointNumber),
    Field,
    LowField,
    HighField,
    Seven,
}

const POINT_IDS: [&str; 13] = [
    "", "", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
];

impl BetKind {
    pub const ALL: [BetKind; 14] = [
        BetKind::Point(PointNumber(2)),
        BetKind::Point(PointNumber(3)),
        BetKind::Point(PointNumber(4)),
        BetKind::Point(PointNumber(5)),
        BetKind::Point(PointNumber(6)),
        BetKind::Point(PointNumber(8)),
        BetKind::Point(PointNumber(9)),
        BetKind::Point(PointNumber(10)),
        BetKind::Point(PointNumber(11)),
        BetKind::Point(PointNumber(12)),
        BetKind::Field,
        BetKind::LowField,
        BetKind::HighField,
        BetKind::Seven,
    ];

    /// The wager-map key for this bet.
    pub fn id(self) -> &'static str {
        match self {
            BetKind::Point(point) => POINT_IDS[point.value() as usize],
            BetKind::Field => "field",
            BetKind::LowField => "lowField",
            BetKind::HighField => "highField",
            BetKind::Seven => "seven",
        }
    }

    /// Looks up a bet by its exact identifier. Unknown identifiers yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn is_point(self) -> bool {
        matches!(self, BetKind::Point(_))
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for BetKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.id())
    }
}

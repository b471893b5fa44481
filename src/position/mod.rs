use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical position groups used as percentile peer groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    OL,
    DL,
    LB,
    DB,
    K,
    P,
}

impl Position {
    pub const ALL: [Position; 10] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::OL,
        Position::DL,
        Position::LB,
        Position::DB,
        Position::K,
        Position::P,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::OL => "OL",
            Position::DL => "DL",
            Position::LB => "LB",
            Position::DB => "DB",
            Position::K => "K",
            Position::P => "P",
        }
    }

    fn from_canonical(label: &str) -> Option<Position> {
        Position::ALL.into_iter().find(|p| p.as_str() == label)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized position label.
///
/// Labels outside the alias table are carried through verbatim so they still
/// form their own peer group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PositionGroup {
    Canonical(Position),
    Unmapped(String),
}

impl PositionGroup {
    pub fn as_str(&self) -> &str {
        match self {
            PositionGroup::Canonical(p) => p.as_str(),
            PositionGroup::Unmapped(label) => label,
        }
    }

    pub fn canonical(&self) -> Option<Position> {
        match self {
            PositionGroup::Canonical(p) => Some(*p),
            PositionGroup::Unmapped(_) => None,
        }
    }
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Alias targets are always canonical labels, so normalizing is idempotent.
const ALIASES: &[(&str, Position)] = &[
    ("HB", Position::RB),
    ("FB", Position::RB),
    ("SE", Position::WR),
    ("FL", Position::WR),
    ("C", Position::OL),
    ("G", Position::OL),
    ("T", Position::OL),
    ("OG", Position::OL),
    ("OT", Position::OL),
    ("LG", Position::OL),
    ("RG", Position::OL),
    ("LT", Position::OL),
    ("RT", Position::OL),
    ("DE", Position::DL),
    ("DT", Position::DL),
    ("NT", Position::DL),
    ("NG", Position::DL),
    ("LE", Position::DL),
    ("RE", Position::DL),
    ("LDE", Position::DL),
    ("RDE", Position::DL),
    ("MLB", Position::LB),
    ("OLB", Position::LB),
    ("ILB", Position::LB),
    ("LOLB", Position::LB),
    ("ROLB", Position::LB),
    ("WLB", Position::LB),
    ("SLB", Position::LB),
    ("S", Position::DB),
    ("CB", Position::DB),
    ("SS", Position::DB),
    ("FS", Position::DB),
    ("SAF", Position::DB),
    ("LCB", Position::DB),
    ("RCB", Position::DB),
    ("NCB", Position::DB),
    ("PK", Position::K),
    ("LS", Position::P),
];

/// Map a raw roster label onto its canonical group.
///
/// Returns `None` for a missing label. Unknown labels pass through unchanged.
pub fn normalize_position(raw: Option<&str>) -> Option<PositionGroup> {
    let raw = raw?;
    if let Some(position) = Position::from_canonical(raw) {
        return Some(PositionGroup::Canonical(position));
    }
    let group = ALIASES
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map(|(_, position)| PositionGroup::Canonical(*position))
        .unwrap_or_else(|| PositionGroup::Unmapped(raw.to_string()));
    Some(group)
}

//! Purpose: Classify TIGER/Line version codes into known format epochs.
//! Exports: `TigerVersion`.
//! Role: Picks which static record schema applies to a whole dataset.
//! Invariants: Classification is pure and never fails; unmatched codes are `Unknown`.
//! Invariants: Version ranges are half-open over the normalized YYMM code and disjoint.

use tracing::debug;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TigerVersion {
    Tiger1990Precensus,
    Tiger1990,
    Tiger1992,
    Tiger1994,
    Tiger1995,
    Tiger1997,
    Tiger1998,
    Tiger1999,
    Tiger2000Redistricting,
    Tiger2000Census,
    TigerUa2000,
    Tiger2002,
    Tiger2003,
    Tiger2004,
    Unknown,
}

// Codes are published as MMYY; ranges are over YYMM so epochs sort by date.
const VERSION_RANGES: &[(u32, u32, TigerVersion)] = &[
    (0, 1, TigerVersion::Tiger1990Precensus),
    (2, 3, TigerVersion::Tiger1990),
    (3, 4, TigerVersion::Tiger1992),
    (5, 6, TigerVersion::Tiger1992),
    (6, 9, TigerVersion::Tiger1999),
    (10, 12, TigerVersion::Tiger2000Redistricting),
    (21, 22, TigerVersion::Tiger1994),
    (24, 25, TigerVersion::Tiger1995),
    (103, 109, TigerVersion::Tiger2000Census),
    (203, 206, TigerVersion::TigerUa2000),
    (210, 307, TigerVersion::Tiger2002),
    (312, 404, TigerVersion::Tiger2003),
    // everything from 0404 on that the 1997/1998 windows do not claim
    (404, 9706, TigerVersion::Tiger2004),
    (9706, 9811, TigerVersion::Tiger1997),
    (9811, 9812, TigerVersion::Tiger2004),
    (9812, 9905, TigerVersion::Tiger1998),
    (9905, 10000, TigerVersion::Tiger2004),
];

pub const KNOWN_VERSIONS: &[TigerVersion] = &[
    TigerVersion::Tiger1990Precensus,
    TigerVersion::Tiger1990,
    TigerVersion::Tiger1992,
    TigerVersion::Tiger1994,
    TigerVersion::Tiger1995,
    TigerVersion::Tiger1997,
    TigerVersion::Tiger1998,
    TigerVersion::Tiger1999,
    TigerVersion::Tiger2000Redistricting,
    TigerVersion::Tiger2000Census,
    TigerVersion::TigerUa2000,
    TigerVersion::Tiger2002,
    TigerVersion::Tiger2003,
    TigerVersion::Tiger2004,
];

impl TigerVersion {
    /// Classify the raw `MMYY` code found in columns 2-5 of an RT1 record.
    pub fn classify(raw_code: u32) -> Self {
        if raw_code >= 10_000 {
            debug!(code = raw_code, "version code out of range");
            return TigerVersion::Unknown;
        }
        let normalized = (raw_code % 100) * 100 + raw_code / 100;
        Self::classify_normalized(normalized).unwrap_or_else(|| {
            debug!(code = raw_code, normalized, "did not recognise TIGER version code");
            TigerVersion::Unknown
        })
    }

    fn classify_normalized(code: u32) -> Option<Self> {
        VERSION_RANGES
            .iter()
            .find(|(lo, hi, _)| code >= *lo && code < *hi)
            .map(|(_, _, version)| *version)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TigerVersion::Tiger1990Precensus => "TIGER_1990_Precensus",
            TigerVersion::Tiger1990 => "TIGER_1990",
            TigerVersion::Tiger1992 => "TIGER_1992",
            TigerVersion::Tiger1994 => "TIGER_1994",
            TigerVersion::Tiger1995 => "TIGER_1995",
            TigerVersion::Tiger1997 => "TIGER_1997",
            TigerVersion::Tiger1998 => "TIGER_1998",
            TigerVersion::Tiger1999 => "TIGER_1999",
            TigerVersion::Tiger2000Redistricting => "TIGER_2000_Redistricting",
            TigerVersion::Tiger2000Census => "TIGER_2000_Census",
            TigerVersion::TigerUa2000 => "TIGER_UA2000",
            TigerVersion::Tiger2002 => "TIGER_2002",
            TigerVersion::Tiger2003 => "TIGER_2003",
            TigerVersion::Tiger2004 => "TIGER_2004",
            TigerVersion::Unknown => "TIGER_Unknown",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        KNOWN_VERSIONS
            .iter()
            .copied()
            .find(|version| version.as_str().eq_ignore_ascii_case(name))
    }

    /// Version whose tables are used for decoding; `Unknown` decodes as the newest.
    pub fn schema_version(self) -> Self {
        match self {
            TigerVersion::Unknown => TigerVersion::Tiger2004,
            known => known,
        }
    }

    pub fn is_unknown(self) -> bool {
        self == TigerVersion::Unknown
    }
}

impl std::fmt::Display for TigerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

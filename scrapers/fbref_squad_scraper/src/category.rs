use serde::Serialize;
use std::{fmt, str::FromStr};

use crate::error::{Result, ScrapeError};

/// Column names that are never prefixed; downstream joins key on them.
pub const SQUAD: &str = "SQUAD";
pub const SEASON: &str = "SEASON";
pub const RESERVED_COLUMNS: [&str; 2] = [SQUAD, SEASON];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Shooting,
    Passing,
    PassTypes,
    GoalAndShotCreation,
    DefensiveActions,
    Possession,
    Miscellaneous,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Shooting,
        Category::Passing,
        Category::PassTypes,
        Category::GoalAndShotCreation,
        Category::DefensiveActions,
        Category::Possession,
        Category::Miscellaneous,
    ];

    /// Key used by the mapping tables, e.g. `goal_and_shot_creation`.
    pub fn key(self) -> &'static str {
        match self {
            Category::Shooting => "shooting",
            Category::Passing => "passing",
            Category::PassTypes => "pass_types",
            Category::GoalAndShotCreation => "goal_and_shot_creation",
            Category::DefensiveActions => "defensive_actions",
            Category::Possession => "possession",
            Category::Miscellaneous => "miscellaneous",
        }
    }

    /// Prefix put in front of every non-reserved column of this category.
    pub fn short_code(self) -> &'static str {
        match self {
            Category::Shooting => "SHOOT",
            Category::Passing => "PASS",
            Category::PassTypes => "PT",
            Category::GoalAndShotCreation => "GSC",
            Category::DefensiveActions => "DA",
            Category::Possession => "POSS",
            Category::Miscellaneous => "MISC",
        }
    }

    /// Raw header names selected from the source table, in table order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Category::Shooting => &["Squad", "Sh", "Dist"],
            Category::Passing => &["Squad", "TotDist", "PrgDist", "Att", "KP"],
            Category::PassTypes => &["Squad", "Crs", "CK"],
            Category::GoalAndShotCreation => {
                &["Squad", "PassLive", "PassDead", "TO", "Sh", "Fld", "Def"]
            }
            Category::DefensiveActions => &["Squad", "Tkl", "Att", "Blocks", "Int"],
            Category::Possession => &["Squad", "Poss"],
            Category::Miscellaneous => &["Squad", "CrdY", "CrdR", "Fls", "Recov"],
        }
    }

    /// Identifier of the stats page for this category, as it appears in the site's URLs.
    pub fn page_id(self) -> &'static str {
        match self {
            Category::Shooting => "shooting",
            Category::Passing => "passing",
            Category::PassTypes => "passing_types",
            Category::GoalAndShotCreation => "gca",
            Category::DefensiveActions => "defense",
            Category::Possession => "possession",
            Category::Miscellaneous => "misc",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| ScrapeError::unknown_category(key))
    }

    pub fn from_page_id(page_id: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.page_id() == page_id)
            .ok_or_else(|| ScrapeError::unknown_category(page_id))
    }
}

impl FromStr for Category {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_COLUMNS.contains(&name)
}

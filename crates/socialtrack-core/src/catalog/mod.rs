//! The plan catalog: three fixed subscription tiers and their quotas.
//!
//! The catalog is pure data. Lookup is total over the closed [`PlanId`]
//! enum, so there is no runtime "unknown plan" error path; an identifier
//! outside the enum cannot be constructed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanId {
    Basic,
    Growth,
    Authority,
}

impl PlanId {
    /// All plans, in display order.
    pub const ALL: [PlanId; 3] = [PlanId::Basic, PlanId::Growth, PlanId::Authority];

    /// Return the immutable configuration for this plan.
    pub fn config(self) -> &'static PlanConfig {
        match self {
            PlanId::Basic => &BASIC,
            PlanId::Growth => &GROWTH,
            PlanId::Authority => &AUTHORITY,
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Basic => "basic",
            Self::Growth => "growth",
            Self::Authority => "authority",
        };
        f.write_str(s)
    }
}

impl FromStr for PlanId {
    type Err = PlanIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "growth" => Ok(Self::Growth),
            "authority" => Ok(Self::Authority),
            other => Err(PlanIdParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PlanId`] string.
#[derive(Debug, Clone)]
pub struct PlanIdParseError(pub String);

impl fmt::Display for PlanIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid plan {:?} (expected basic, growth, or authority)",
            self.0
        )
    }
}

impl std::error::Error for PlanIdParseError {}

// ---------------------------------------------------------------------------

/// Immutable configuration of one subscription tier.
///
/// `name` and `price` are display attributes and never enter the progress
/// calculation. `posts_per_week` caps how many post slots the UI exposes
/// per week; it is not a validation rule anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanConfig {
    pub id: PlanId,
    pub name: &'static str,
    /// Monthly price in USD, display only.
    pub price: u32,
    /// Monthly post quota.
    pub total_posts: u32,
    /// UI cap on post slots shown per week.
    pub posts_per_week: usize,
    /// Monthly reel quota.
    pub total_reels: usize,
    /// Feature list for the plan selection screen, display only.
    pub features: &'static [&'static str],
}

static BASIC: PlanConfig = PlanConfig {
    id: PlanId::Basic,
    name: "Digital Presence",
    price: 99,
    total_posts: 8,
    posts_per_week: 2,
    total_reels: 0,
    features: &[
        "8 pro designs (2 per week)",
        "Copywriting for every post",
        "Post scheduling",
    ],
};

static GROWTH: PlanConfig = PlanConfig {
    id: PlanId::Growth,
    name: "Brand Growth",
    price: 250,
    total_posts: 12,
    posts_per_week: 3,
    total_reels: 2,
    features: &[
        "12 posts (3 per week)",
        "2 reels (short videos)",
        "Interactive stories",
        "Comment replies",
    ],
};

static AUTHORITY: PlanConfig = PlanConfig {
    id: PlanId::Authority,
    name: "Market Authority",
    price: 450,
    total_posts: 15,
    posts_per_week: 4,
    total_reels: 4,
    features: &[
        "15 mixed publications",
        "4 reels (pro editing)",
        "Ads management",
        "Monthly strategy meeting",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_three_plans() {
        assert_eq!(PlanId::ALL.len(), 3);
    }

    #[test]
    fn quotas_match_the_tier_table() {
        let basic = PlanId::Basic.config();
        assert_eq!((basic.total_posts, basic.posts_per_week, basic.total_reels), (8, 2, 0));

        let growth = PlanId::Growth.config();
        assert_eq!((growth.total_posts, growth.posts_per_week, growth.total_reels), (12, 3, 2));

        let authority = PlanId::Authority.config();
        assert_eq!(
            (authority.total_posts, authority.posts_per_week, authority.total_reels),
            (15, 4, 4)
        );
    }

    #[test]
    fn config_id_round_trips() {
        for id in PlanId::ALL {
            assert_eq!(id.config().id, id);
        }
    }

    #[test]
    fn plan_id_display_parse_round_trip() {
        for id in PlanId::ALL {
            let parsed: PlanId = id.to_string().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn unknown_plan_string_is_rejected() {
        let err = "platinum".parse::<PlanId>().unwrap_err();
        assert!(err.to_string().contains("platinum"), "unexpected error: {err}");
    }

    #[test]
    fn every_plan_has_features() {
        for id in PlanId::ALL {
            assert!(!id.config().features.is_empty());
        }
    }
}

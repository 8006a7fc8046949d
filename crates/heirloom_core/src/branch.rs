//! Memory branches: named topical groupings of fragments and stories.

use crate::{BranchId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Topic a memory branch covers.
///
/// # Examples
///
/// ```
/// use heirloom_core::BranchType;
/// use std::str::FromStr;
///
/// assert_eq!(BranchType::from_str("life_stories").unwrap(), BranchType::LifeStories);
/// assert_eq!(BranchType::Childhood.to_string(), "childhood");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BranchType {
    /// Early years
    Childhood,
    /// School and study
    Education,
    /// Working life
    Career,
    /// Family life
    Family,
    /// Journeys
    Travel,
    /// Pastimes
    Hobbies,
    /// Friendships and partnerships
    Relationships,
    /// Things learned
    Learnings,
    /// Adventures
    Adventures,
    /// Skills acquired
    Skills,
    /// General life stories
    LifeStories,
    /// Advice for the family
    Tips,
    /// Achievements
    Accomplishments,
    /// Setbacks
    Failures,
    /// Hard times
    Challenges,
    /// Gratitude
    Grateful,
    /// Anything else
    General,
}

/// A named grouping of fragments and stories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBranch {
    /// Identifier
    pub id: BranchId,
    /// Owning storyteller
    pub user_id: UserId,
    /// Topic tag
    pub branch_type: BranchType,
    /// User-facing title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl MemoryBranch {
    /// One-line framing used as generation context, e.g.
    /// `Memory Branch: Growing up in Ohio (childhood)`.
    pub fn context_line(&self) -> String {
        format!("Memory Branch: {} ({})", self.title, self.branch_type)
    }
}

/// Fields supplied when creating a memory branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBranch {
    /// Owning storyteller
    pub user_id: UserId,
    /// Topic tag
    pub branch_type: BranchType,
    /// User-facing title
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_branch_type_round_trips_through_serde_names() {
        for branch_type in BranchType::iter() {
            let json = serde_json::to_string(&branch_type).unwrap();
            assert_eq!(json, format!("\"{}\"", branch_type));
        }
        assert_eq!(BranchType::iter().count(), 17);
    }

    #[test]
    fn test_context_line() {
        let now = Utc::now();
        let branch = MemoryBranch {
            id: BranchId(1),
            user_id: UserId(1),
            branch_type: BranchType::Career,
            title: "The Mill Years".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(branch.context_line(), "Memory Branch: The Mill Years (career)");
    }
}

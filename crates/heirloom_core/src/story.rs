//! Generated stories and their version chain.

use crate::{BranchId, InputId, StoryId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A narrative synthesized from a set of fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Identifier
    pub id: StoryId,
    /// Owning storyteller
    pub user_id: UserId,
    /// Branch the story belongs to
    pub branch_id: Option<BranchId>,
    /// Human-friendly title
    pub title: String,
    /// Generated narrative
    pub content: String,
    /// One-sentence summary
    pub summary: Option<String>,
    /// Key themes
    pub themes: Vec<String>,
    /// Era or life stage
    pub time_period: Option<String>,
    /// Names of people mentioned
    pub people: Vec<String>,
    /// Fragments that contributed; fixed at creation
    pub source_input_ids: Vec<InputId>,
    /// Position in the version chain, starting at 1
    pub version: u32,
    /// Story this one was regenerated from
    pub parent_story_id: Option<StoryId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A story ready to be persisted.
///
/// # Examples
///
/// ```
/// use heirloom_core::{InputId, NewStoryBuilder, UserId};
///
/// let story = NewStoryBuilder::default()
///     .user_id(UserId(1))
///     .title("Summer on the Farm")
///     .content("We woke before dawn...")
///     .source_input_ids(vec![InputId(3), InputId(4)])
///     .build()
///     .unwrap();
///
/// assert_eq!(story.version, 1);
/// assert!(story.parent_story_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct NewStory {
    /// Owning storyteller
    pub user_id: UserId,
    /// Branch the story belongs to
    #[builder(default)]
    pub branch_id: Option<BranchId>,
    /// Human-friendly title
    pub title: String,
    /// Generated narrative
    pub content: String,
    /// One-sentence summary
    #[builder(default)]
    pub summary: Option<String>,
    /// Key themes
    #[builder(default)]
    pub themes: Vec<String>,
    /// Era or life stage
    #[builder(default)]
    pub time_period: Option<String>,
    /// Names of people mentioned
    #[builder(default)]
    pub people: Vec<String>,
    /// Fragments that contributed
    #[builder(default)]
    pub source_input_ids: Vec<InputId>,
    /// Position in the version chain
    #[builder(default = "1")]
    pub version: u32,
    /// Story this one was regenerated from
    #[builder(default)]
    pub parent_story_id: Option<StoryId>,
}

impl NewStory {
    /// Materialize the record with its assigned id and timestamps.
    pub fn into_story(self, id: StoryId, now: DateTime<Utc>) -> Story {
        Story {
            id,
            user_id: self.user_id,
            branch_id: self.branch_id,
            title: self.title,
            content: self.content,
            summary: self.summary,
            themes: self.themes,
            time_period: self.time_period,
            people: self.people,
            source_input_ids: self.source_input_ids,
            version: self.version,
            parent_story_id: self.parent_story_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial edit of a story. Unset fields are left alone; provenance
/// (`source_input_ids`, version chain) cannot be edited.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoryUpdate {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New content
    #[serde(default)]
    pub content: Option<String>,
    /// New summary
    #[serde(default)]
    pub summary: Option<String>,
    /// New themes
    #[serde(default)]
    pub themes: Option<Vec<String>>,
    /// New time period
    #[serde(default)]
    pub time_period: Option<String>,
    /// New people list
    #[serde(default)]
    pub people: Option<Vec<String>>,
}

impl StoryUpdate {
    /// Apply the set fields to `story` and bump its update timestamp.
    pub fn apply(self, story: &mut Story, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            story.title = title;
        }
        if let Some(content) = self.content {
            story.content = content;
        }
        if let Some(summary) = self.summary {
            story.summary = Some(summary);
        }
        if let Some(themes) = self.themes {
            story.themes = themes;
        }
        if let Some(time_period) = self.time_period {
            story.time_period = Some(time_period);
        }
        if let Some(people) = self.people {
            story.people = people;
        }
        story.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_touches_only_set_fields() {
        let created = Utc::now();
        let mut story = NewStoryBuilder::default()
            .user_id(UserId(1))
            .title("Old")
            .content("Body")
            .source_input_ids(vec![InputId(1)])
            .build()
            .unwrap()
            .into_story(StoryId(5), created);

        let update = StoryUpdate {
            title: Some("New".to_string()),
            themes: Some(vec!["family".to_string()]),
            ..Default::default()
        };
        update.apply(&mut story, created + chrono::Duration::seconds(5));

        assert_eq!(story.title, "New");
        assert_eq!(story.content, "Body");
        assert_eq!(story.themes, vec!["family"]);
        assert_eq!(story.source_input_ids, vec![InputId(1)]);
        assert!(story.updated_at > story.created_at);
    }
}

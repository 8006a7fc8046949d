//! Persistence seam for fragments, branches, and stories.

use async_trait::async_trait;
use heirloom_core::{
    BranchId, InputId, MemoryBranch, NewBranch, NewRawInput, NewStory, NewUser, RawInput, Story,
    StoryId, StoryUpdate, User, UserId,
};
use heirloom_error::HeirloomResult;
use serde::{Deserialize, Serialize};

/// Offset pagination for newest-first listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Records to skip
    pub skip: usize,
    /// Maximum records to return
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

/// Store for users, memory branches, raw inputs, and stories.
///
/// Lookups that may legitimately miss return `Option`; mutations of a
/// missing record fail with a not-found `RepositoryError`. Deleting a user
/// or branch cascades to the fragments and stories it owns.
#[async_trait]
pub trait FragmentRepository: Send + Sync {
    /// Register a storyteller.
    async fn create_user(&self, user: NewUser) -> HeirloomResult<User>;

    /// Look up a storyteller.
    async fn get_user(&self, id: UserId) -> HeirloomResult<Option<User>>;

    /// Delete a storyteller and everything they own.
    async fn delete_user(&self, id: UserId) -> HeirloomResult<()>;

    /// Create a memory branch for an existing user.
    async fn create_branch(&self, branch: NewBranch) -> HeirloomResult<MemoryBranch>;

    /// Look up a memory branch.
    async fn get_branch(&self, id: BranchId) -> HeirloomResult<Option<MemoryBranch>>;

    /// All branches owned by a user.
    async fn list_branches(&self, user_id: UserId) -> HeirloomResult<Vec<MemoryBranch>>;

    /// Delete a branch together with its fragments and stories.
    async fn delete_branch(&self, id: BranchId) -> HeirloomResult<()>;

    /// Record a fragment for an existing user (and branch, if given).
    async fn create_input(&self, input: NewRawInput) -> HeirloomResult<RawInput>;

    /// Look up a fragment.
    async fn get_input(&self, id: InputId) -> HeirloomResult<Option<RawInput>>;

    /// Fragments among `ids` owned by `user_id`. Ids that do not resolve or
    /// belong to someone else are silently left out.
    async fn inputs_for_user(
        &self,
        user_id: UserId,
        ids: &[InputId],
    ) -> HeirloomResult<Vec<RawInput>>;

    /// A user's fragments, newest first.
    async fn list_inputs(&self, user_id: UserId, page: Page) -> HeirloomResult<Vec<RawInput>>;

    /// A branch's fragments, newest first.
    async fn list_branch_inputs(&self, branch_id: BranchId) -> HeirloomResult<Vec<RawInput>>;

    /// Delete a fragment.
    async fn delete_input(&self, id: InputId) -> HeirloomResult<()>;

    /// Persist a story and return it with its assigned id.
    async fn create_story(&self, story: NewStory) -> HeirloomResult<Story>;

    /// Look up a story.
    async fn get_story(&self, id: StoryId) -> HeirloomResult<Option<Story>>;

    /// A user's stories, newest first.
    async fn list_stories(&self, user_id: UserId, page: Page) -> HeirloomResult<Vec<Story>>;

    /// A branch's stories, newest first.
    async fn list_branch_stories(&self, branch_id: BranchId) -> HeirloomResult<Vec<Story>>;

    /// Apply a partial edit to a story.
    async fn update_story(&self, id: StoryId, update: StoryUpdate) -> HeirloomResult<Story>;

    /// Delete a story.
    async fn delete_story(&self, id: StoryId) -> HeirloomResult<()>;

    /// Stories regenerated directly from `id`, oldest version first.
    async fn story_versions(&self, id: StoryId) -> HeirloomResult<Vec<Story>>;
}

//! In-memory implementation of [`FragmentRepository`].
//!
//! All records live in one map set behind a single `RwLock`, so each
//! operation sees a consistent snapshot. Data is lost when the last clone
//! of the repository is dropped.

use async_trait::async_trait;
use chrono::Utc;
use heirloom_core::{
    BranchId, InputId, MemoryBranch, NewBranch, NewRawInput, NewStory, NewUser, RawInput, Story,
    StoryId, StoryUpdate, User, UserId,
};
use heirloom_error::{HeirloomResult, RepositoryError, RepositoryErrorKind};
use heirloom_interface::{FragmentRepository, Page};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// HashMap-backed repository for users, branches, fragments, and stories.
///
/// Cloning shares the underlying storage.
///
/// # Example
///
/// ```no_run
/// use heirloom_core::{NewRawInput, NewUser};
/// use heirloom_interface::FragmentRepository;
/// use heirloom_story::InMemoryFragmentRepository;
///
/// #[tokio::main]
/// async fn main() {
///     let repo = InMemoryFragmentRepository::new();
///     let user = repo
///         .create_user(NewUser { name: "Ada".into(), email: "ada@example.com".into(), phone_number: None })
///         .await
///         .unwrap();
///     repo.create_input(NewRawInput::text(user.id, "I grew up on a farm.")).await.unwrap();
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryFragmentRepository {
    store: Arc<RwLock<Store>>,
}

#[derive(Debug, Default)]
struct Store {
    users: HashMap<UserId, User>,
    branches: HashMap<BranchId, MemoryBranch>,
    inputs: HashMap<InputId, RawInput>,
    stories: HashMap<StoryId, Story>,
    next_id: i64,
}

impl Store {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn require_user(&self, id: UserId) -> HeirloomResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::not_found("user", id.get()).into())
        }
    }

    fn require_branch_of(&self, id: BranchId, owner: UserId) -> HeirloomResult<()> {
        match self.branches.get(&id) {
            None => Err(RepositoryError::not_found("memory branch", id.get()).into()),
            Some(branch) if branch.user_id != owner => Err(RepositoryError::new(
                RepositoryErrorKind::Conflict(format!(
                    "memory branch {} does not belong to user {}",
                    id, owner
                )),
            )
            .into()),
            Some(_) => Ok(()),
        }
    }
}

/// Newest first; ids break ties between records created in the same instant.
fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, i64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn paginate<T>(items: Vec<T>, page: Page) -> Vec<T> {
    items.into_iter().skip(page.skip).take(page.limit).collect()
}

impl InMemoryFragmentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored stories (for testing).
    pub async fn story_count(&self) -> usize {
        self.store.read().await.stories.len()
    }

    /// Number of stored fragments (for testing).
    pub async fn input_count(&self) -> usize {
        self.store.read().await.inputs.len()
    }

    /// Remove every record and restart id allocation.
    pub async fn clear(&self) {
        *self.store.write().await = Store::default();
    }
}

#[async_trait]
impl FragmentRepository for InMemoryFragmentRepository {
    async fn create_user(&self, user: NewUser) -> HeirloomResult<User> {
        let mut store = self.store.write().await;
        if store.users.values().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::new(RepositoryErrorKind::Conflict(format!(
                "email {} already registered",
                user.email
            )))
            .into());
        }

        let now = Utc::now();
        let id = UserId(store.allocate_id());
        let created = User {
            id,
            name: user.name,
            email: user.email,
            phone_number: user.phone_number,
            created_at: now,
            updated_at: now,
        };
        store.users.insert(id, created.clone());
        debug!(user_id = %id, "Created user");
        Ok(created)
    }

    async fn get_user(&self, id: UserId) -> HeirloomResult<Option<User>> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn delete_user(&self, id: UserId) -> HeirloomResult<()> {
        let mut store = self.store.write().await;
        store
            .users
            .remove(&id)
            .ok_or_else(|| RepositoryError::not_found("user", id.get()))?;
        store.branches.retain(|_, branch| branch.user_id != id);
        store.inputs.retain(|_, input| input.user_id != id);
        store.stories.retain(|_, story| story.user_id != id);
        debug!(user_id = %id, "Deleted user and owned records");
        Ok(())
    }

    async fn create_branch(&self, branch: NewBranch) -> HeirloomResult<MemoryBranch> {
        let mut store = self.store.write().await;
        store.require_user(branch.user_id)?;

        let now = Utc::now();
        let id = BranchId(store.allocate_id());
        let created = MemoryBranch {
            id,
            user_id: branch.user_id,
            branch_type: branch.branch_type,
            title: branch.title,
            description: branch.description,
            created_at: now,
            updated_at: now,
        };
        store.branches.insert(id, created.clone());
        Ok(created)
    }

    async fn get_branch(&self, id: BranchId) -> HeirloomResult<Option<MemoryBranch>> {
        Ok(self.store.read().await.branches.get(&id).cloned())
    }

    async fn list_branches(&self, user_id: UserId) -> HeirloomResult<Vec<MemoryBranch>> {
        let store = self.store.read().await;
        let mut branches: Vec<MemoryBranch> = store
            .branches
            .values()
            .filter(|branch| branch.user_id == user_id)
            .cloned()
            .collect();
        branches.sort_by_key(|branch| branch.id);
        Ok(branches)
    }

    async fn delete_branch(&self, id: BranchId) -> HeirloomResult<()> {
        let mut store = self.store.write().await;
        store
            .branches
            .remove(&id)
            .ok_or_else(|| RepositoryError::not_found("memory branch", id.get()))?;
        store.inputs.retain(|_, input| input.branch_id != Some(id));
        store.stories.retain(|_, story| story.branch_id != Some(id));
        Ok(())
    }

    async fn create_input(&self, input: NewRawInput) -> HeirloomResult<RawInput> {
        let mut store = self.store.write().await;
        store.require_user(input.user_id)?;
        if let Some(branch_id) = input.branch_id {
            store.require_branch_of(branch_id, input.user_id)?;
        }

        let id = InputId(store.allocate_id());
        let created = RawInput {
            id,
            user_id: input.user_id,
            branch_id: input.branch_id,
            kind: input.kind,
            text: input.text,
            confidence: input.confidence,
            call_id: input.call_id,
            audio_url: input.audio_url,
            metadata: input.metadata,
            created_at: Utc::now(),
        };
        store.inputs.insert(id, created.clone());
        debug!(input_id = %id, user_id = %created.user_id, "Created input");
        Ok(created)
    }

    async fn get_input(&self, id: InputId) -> HeirloomResult<Option<RawInput>> {
        Ok(self.store.read().await.inputs.get(&id).cloned())
    }

    async fn inputs_for_user(
        &self,
        user_id: UserId,
        ids: &[InputId],
    ) -> HeirloomResult<Vec<RawInput>> {
        let store = self.store.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| store.inputs.get(id))
            .filter(|input| input.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_inputs(&self, user_id: UserId, page: Page) -> HeirloomResult<Vec<RawInput>> {
        let store = self.store.read().await;
        let mut inputs: Vec<RawInput> = store
            .inputs
            .values()
            .filter(|input| input.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut inputs, |input| (input.created_at, input.id.get()));
        Ok(paginate(inputs, page))
    }

    async fn list_branch_inputs(&self, branch_id: BranchId) -> HeirloomResult<Vec<RawInput>> {
        let store = self.store.read().await;
        let mut inputs: Vec<RawInput> = store
            .inputs
            .values()
            .filter(|input| input.branch_id == Some(branch_id))
            .cloned()
            .collect();
        newest_first(&mut inputs, |input| (input.created_at, input.id.get()));
        Ok(inputs)
    }

    async fn delete_input(&self, id: InputId) -> HeirloomResult<()> {
        self.store
            .write()
            .await
            .inputs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("input", id.get()).into())
    }

    async fn create_story(&self, story: NewStory) -> HeirloomResult<Story> {
        let mut store = self.store.write().await;
        store.require_user(story.user_id)?;
        if let Some(branch_id) = story.branch_id {
            store.require_branch_of(branch_id, story.user_id)?;
        }

        let id = StoryId(store.allocate_id());
        let created = story.into_story(id, Utc::now());
        store.stories.insert(id, created.clone());
        debug!(story_id = %id, version = created.version, "Created story");
        Ok(created)
    }

    async fn get_story(&self, id: StoryId) -> HeirloomResult<Option<Story>> {
        Ok(self.store.read().await.stories.get(&id).cloned())
    }

    async fn list_stories(&self, user_id: UserId, page: Page) -> HeirloomResult<Vec<Story>> {
        let store = self.store.read().await;
        let mut stories: Vec<Story> = store
            .stories
            .values()
            .filter(|story| story.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut stories, |story| (story.created_at, story.id.get()));
        Ok(paginate(stories, page))
    }

    async fn list_branch_stories(&self, branch_id: BranchId) -> HeirloomResult<Vec<Story>> {
        let store = self.store.read().await;
        let mut stories: Vec<Story> = store
            .stories
            .values()
            .filter(|story| story.branch_id == Some(branch_id))
            .cloned()
            .collect();
        newest_first(&mut stories, |story| (story.created_at, story.id.get()));
        Ok(stories)
    }

    async fn update_story(&self, id: StoryId, update: StoryUpdate) -> HeirloomResult<Story> {
        let mut store = self.store.write().await;
        let story = store
            .stories
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("story", id.get()))?;
        update.apply(story, Utc::now());
        Ok(story.clone())
    }

    async fn delete_story(&self, id: StoryId) -> HeirloomResult<()> {
        self.store
            .write()
            .await
            .stories
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("story", id.get()).into())
    }

    async fn story_versions(&self, id: StoryId) -> HeirloomResult<Vec<Story>> {
        let store = self.store.read().await;
        let mut versions: Vec<Story> = store
            .stories
            .values()
            .filter(|story| story.parent_story_id == Some(id))
            .cloned()
            .collect();
        versions.sort_by_key(|story| (story.version, story.id));
        Ok(versions)
    }
}

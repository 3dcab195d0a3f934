//! # Resource Cache
//!
//! Holds the latest fetched snapshot of every remote collection.
//!
//! ## Responsibilities:
//! - One [`Resource`] per [`ResourceKey`], each `Idle`, `Loading`, `Ready` or `Failed`
//! - Monotonic revisions so memoized list views know when to recompute
//! - Invalidation after mutations, and seeding from returned records
//!
//! ## Purpose:
//! Snapshots are immutable once stored. A mutation never patches a snapshot
//! in place: the cache is either invalidated and refetched, or a new snapshot
//! with a fresh revision is seeded from the record the API returned.

use shared::{Budget, CareerGoal, Expense, MiniAssistant, MoodEntry, Task};

use crate::backend::domain::ListRecord;

/// Named remote collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Expenses,
    Tasks,
    Goals,
    Moods,
    Budgets,
    Assistant,
}

impl ResourceKey {
    pub const ALL: [ResourceKey; 6] = [
        ResourceKey::Expenses,
        ResourceKey::Tasks,
        ResourceKey::Goals,
        ResourceKey::Moods,
        ResourceKey::Budgets,
        ResourceKey::Assistant,
    ];
}

/// Immutable copy of a collection as last fetched
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub data: T,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    Idle,
    /// A fetch is in flight; the previous snapshot stays readable meanwhile
    Loading { stale: Option<Snapshot<T>> },
    Ready(Snapshot<T>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource<T> {
    state: ResourceState<T>,
    invalidated: bool,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            state: ResourceState::Idle,
            invalidated: false,
        }
    }
}

impl<T> Resource<T> {
    pub fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    /// Latest usable snapshot, including the stale one kept while reloading
    pub fn snapshot(&self) -> Option<&Snapshot<T>> {
        match &self.state {
            ResourceState::Ready(snapshot) => Some(snapshot),
            ResourceState::Loading { stale } => stale.as_ref(),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.snapshot().map(|snapshot| &snapshot.data)
    }

    pub fn revision(&self) -> Option<u64> {
        self.snapshot().map(|snapshot| snapshot.revision)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ResourceState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ResourceState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the collection should be (re)fetched
    pub fn needs_fetch(&self) -> bool {
        match self.state {
            ResourceState::Idle => true,
            ResourceState::Loading { .. } => false,
            _ => self.invalidated,
        }
    }

    pub fn begin_loading(&mut self) {
        let stale = match std::mem::replace(&mut self.state, ResourceState::Idle) {
            ResourceState::Ready(snapshot) => Some(snapshot),
            ResourceState::Loading { stale } => stale,
            _ => None,
        };
        self.state = ResourceState::Loading { stale };
    }

    fn complete(&mut self, data: T, revision: u64) {
        self.state = ResourceState::Ready(Snapshot { data, revision });
        self.invalidated = false;
    }

    fn fail(&mut self, message: String) {
        self.state = ResourceState::Failed(message);
    }

    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

/// Snapshots of every collection shown by the dashboard
#[derive(Debug, Default)]
pub struct ResourceCache {
    pub expenses: Resource<Vec<Expense>>,
    pub tasks: Resource<Vec<Task>>,
    pub goals: Resource<Vec<CareerGoal>>,
    pub moods: Resource<Vec<MoodEntry>>,
    pub budgets: Resource<Vec<Budget>>,
    pub assistant: Resource<Option<MiniAssistant>>,
    last_revision: u64,
}

/// Dispatches a statement to the resource behind a key
macro_rules! with_resource {
    ($cache:expr, $key:expr, |$resource:ident| $body:expr) => {
        match $key {
            ResourceKey::Expenses => {
                let $resource = &mut $cache.expenses;
                $body
            }
            ResourceKey::Tasks => {
                let $resource = &mut $cache.tasks;
                $body
            }
            ResourceKey::Goals => {
                let $resource = &mut $cache.goals;
                $body
            }
            ResourceKey::Moods => {
                let $resource = &mut $cache.moods;
                $body
            }
            ResourceKey::Budgets => {
                let $resource = &mut $cache.budgets;
                $body
            }
            ResourceKey::Assistant => {
                let $resource = &mut $cache.assistant;
                $body
            }
        }
    };
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_revision(&mut self) -> u64 {
        self.last_revision += 1;
        self.last_revision
    }

    pub fn begin_loading(&mut self, key: ResourceKey) {
        with_resource!(self, key, |resource| resource.begin_loading())
    }

    pub fn invalidate(&mut self, key: ResourceKey) {
        with_resource!(self, key, |resource| resource.invalidate())
    }

    pub fn fail(&mut self, key: ResourceKey, message: impl Into<String>) {
        let message = message.into();
        with_resource!(self, key, |resource| resource.fail(message))
    }

    pub fn needs_fetch(&mut self, key: ResourceKey) -> bool {
        with_resource!(self, key, |resource| resource.needs_fetch())
    }

    /// Keys whose collections are idle or invalidated
    pub fn pending_fetches(&mut self) -> Vec<ResourceKey> {
        ResourceKey::ALL.into_iter().filter(|key| self.needs_fetch(*key)).collect()
    }

    pub fn store_expenses(&mut self, data: Vec<Expense>) {
        let revision = self.next_revision();
        self.expenses.complete(data, revision);
    }

    pub fn store_tasks(&mut self, data: Vec<Task>) {
        let revision = self.next_revision();
        self.tasks.complete(data, revision);
    }

    pub fn store_goals(&mut self, data: Vec<CareerGoal>) {
        let revision = self.next_revision();
        self.goals.complete(data, revision);
    }

    pub fn store_moods(&mut self, data: Vec<MoodEntry>) {
        let revision = self.next_revision();
        self.moods.complete(data, revision);
    }

    pub fn store_budgets(&mut self, data: Vec<Budget>) {
        let revision = self.next_revision();
        self.budgets.complete(data, revision);
    }

    pub fn store_assistant(&mut self, data: Option<MiniAssistant>) {
        let revision = self.next_revision();
        self.assistant.complete(data, revision);
    }

    /// Seed the expense snapshot with a record returned by a create or update
    pub fn seed_expense(&mut self, expense: Expense) {
        let revision = self.next_revision();
        seed_record(&mut self.expenses, expense, revision);
    }

    pub fn seed_task(&mut self, task: Task) {
        let revision = self.next_revision();
        seed_record(&mut self.tasks, task, revision);
    }

    pub fn seed_mood(&mut self, entry: MoodEntry) {
        let revision = self.next_revision();
        seed_record(&mut self.moods, entry, revision);
    }
}

/// New snapshot with `record` replacing the one with the same id, or appended.
/// Without a current snapshot the resource is invalidated instead.
fn seed_record<R: ListRecord + Clone>(resource: &mut Resource<Vec<R>>, record: R, revision: u64) {
    let Some(current) = resource.data() else {
        resource.invalidate();
        return;
    };

    let mut data = current.clone();
    match data.iter_mut().find(|existing| existing.record_id() == record.record_id()) {
        Some(slot) => *slot = record,
        None => data.push(record),
    }
    resource.complete(data, revision);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i64, description: &str) -> Expense {
        serde_json::from_value(serde_json::json!({"id": id, "description": description, "amount": 10}))
            .unwrap()
    }

    #[test]
    fn test_new_cache_needs_every_collection() {
        let mut cache = ResourceCache::new();

        assert_eq!(cache.pending_fetches(), ResourceKey::ALL.to_vec());
        assert!(cache.expenses.data().is_none());
    }

    #[test]
    fn test_revisions_increase_on_every_store() {
        let mut cache = ResourceCache::new();

        cache.store_expenses(vec![expense(1, "lunch")]);
        let first = cache.expenses.revision().unwrap();
        cache.store_expenses(vec![expense(1, "lunch")]);
        let second = cache.expenses.revision().unwrap();

        assert!(second > first);
        assert!(!cache.needs_fetch(ResourceKey::Expenses));
    }

    #[test]
    fn test_loading_keeps_stale_snapshot() {
        let mut cache = ResourceCache::new();
        cache.store_expenses(vec![expense(1, "lunch")]);

        cache.invalidate(ResourceKey::Expenses);
        assert!(cache.needs_fetch(ResourceKey::Expenses));

        cache.begin_loading(ResourceKey::Expenses);
        assert!(cache.expenses.is_loading());
        assert!(!cache.needs_fetch(ResourceKey::Expenses));
        assert_eq!(cache.expenses.data().map(Vec::len), Some(1));
    }

    #[test]
    fn test_failure_records_message() {
        let mut cache = ResourceCache::new();
        cache.begin_loading(ResourceKey::Tasks);

        cache.fail(ResourceKey::Tasks, "offline");

        assert_eq!(cache.tasks.error(), Some("offline"));
        assert!(cache.tasks.data().is_none());
    }

    #[test]
    fn test_seed_replaces_or_appends_by_id() {
        let mut cache = ResourceCache::new();
        cache.store_expenses(vec![expense(1, "lunch"), expense(2, "bus")]);
        let before = cache.expenses.revision().unwrap();

        cache.seed_expense(expense(2, "metro"));
        cache.seed_expense(expense(3, "tea"));

        let data = cache.expenses.data().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[1].description, "metro");
        assert!(cache.expenses.revision().unwrap() > before);
    }

    #[test]
    fn test_seed_without_snapshot_invalidates() {
        let mut cache = ResourceCache::new();
        cache.store_tasks(Vec::new());
        cache.begin_loading(ResourceKey::Expenses);
        cache.fail(ResourceKey::Expenses, "boom");

        cache.seed_expense(expense(1, "lunch"));

        assert!(cache.expenses.data().is_none());
        assert!(cache.needs_fetch(ResourceKey::Expenses));
    }
}

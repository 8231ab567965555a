use tokio::sync::RwLock;
use uuid::Uuid;

/// A record that can live in a [`MemoryStore`]
pub trait Entity: Clone + Send + Sync {
    fn id(&self) -> Uuid;
}

/// In-memory collection of records keyed by id.
///
/// Each feature store wraps one of these and adds its own create/update
/// rules. Reads return cloned snapshots; writes are last-write-wins.
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub async fn insert(&self, record: T) -> T {
        self.records.write().await.push(record.clone());
        record
    }

    /// Snapshot of all records in insertion order
    pub async fn all(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    pub async fn find(&self, id: Uuid) -> Option<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    /// First record matching `pred`
    pub async fn find_by<P>(&self, pred: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.read().await.iter().find(|r| pred(r)).cloned()
    }

    /// Apply `f` to the record with `id` under the write lock.
    ///
    /// `f` sees the current record and returns its replacement, or an error
    /// that aborts the write. `Ok(None)` means no such record.
    pub async fn replace_with<E, F>(&self, id: Uuid, f: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&T, &[T]) -> Result<T, E>,
    {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };

        let updated = f(&records[index], &records)?;
        records[index] = updated.clone();
        Ok(Some(updated))
    }

    /// Replace the record with `id` by `f(record)`; `None` when missing
    pub async fn modify<F>(&self, id: Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&T) -> T,
    {
        let mut records = self.records.write().await;
        let record = records.iter_mut().find(|r| r.id() == id)?;
        let updated = f(record);
        *record = updated.clone();
        Some(updated)
    }

    pub async fn remove(&self, id: Uuid) -> Option<T> {
        let mut records = self.records.write().await;
        let index = records.iter().position(|r| r.id() == id)?;
        Some(records.remove(index))
    }

    /// Insert after checking `guard` against the current records, atomically
    pub async fn insert_checked<E, F>(&self, record: T, guard: F) -> Result<T, E>
    where
        F: FnOnce(&[T]) -> Result<(), E>,
    {
        let mut records = self.records.write().await;
        guard(&records)?;
        records.push(record.clone());
        Ok(record)
    }

    /// Drop every record
    #[allow(dead_code)]
    pub async fn reset(&self) {
        self.records.write().await.clear();
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

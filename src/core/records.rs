//! High-level record operations: open a day's container, run one mutation,
//! wait for the write to land.

use crate::core::mutations::{self, DurationInput};
use crate::core::persistent::PersistentStore;
use crate::db::adapter::KeyValueStore;
use crate::db::keyed_store::KeyedStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Keyed, TimeRecord};
use crate::utils::date::record_key;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

pub struct RecordLogic {
    adapter: Arc<dyn KeyValueStore>,
}

impl RecordLogic {
    pub fn new(adapter: Arc<dyn KeyValueStore>) -> Self {
        Self { adapter }
    }

    fn keyed(&self) -> KeyedStore<TimeRecord> {
        KeyedStore::new(Arc::clone(&self.adapter))
    }

    /// Container for `date`, already synchronized with storage.
    /// Holds an empty record for that day when nothing is stored yet.
    pub async fn open(&self, date: NaiveDate) -> AppResult<PersistentStore<TimeRecord>> {
        let store = PersistentStore::new(
            Arc::clone(&self.adapter),
            record_key(date),
            TimeRecord::new(date),
        )?;
        store.ready().await;
        Ok(store)
    }

    pub async fn load(&self, date: NaiveDate) -> AppResult<Option<Keyed<TimeRecord>>> {
        self.keyed().get(&record_key(date)).await
    }

    /// Stored records, sorted by key, optionally restricted to `[from, to]`.
    pub async fn list(
        &self,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<Keyed<TimeRecord>>> {
        let all = self.keyed().load_all().await?;
        Ok(match bounds {
            Some((from, to)) => all
                .into_iter()
                .filter(|r| r.date >= from && r.date <= to)
                .collect(),
            None => all,
        })
    }

    async fn require(&self, date: NaiveDate) -> AppResult<PersistentStore<TimeRecord>> {
        let key = record_key(date);
        if self.adapter.get(&key).await?.is_none() {
            return Err(AppError::RecordNotFound(key));
        }
        self.open(date).await
    }

    /// Run `mutation` against the record and persist it, or report `failure`.
    async fn mutate<F>(
        &self,
        store: PersistentStore<TimeRecord>,
        mutation: F,
        failure: impl FnOnce() -> AppError,
    ) -> AppResult<TimeRecord>
    where
        F: FnOnce(&mut Keyed<TimeRecord>) -> bool,
    {
        if !store.apply_keyed(mutation) {
            return Err(failure());
        }
        store.flush().await?;
        info!(key = store.key(), "record updated");
        Ok(store.get())
    }

    /// Edit interval `index` (0-based) of an existing record.
    pub async fn edit_interval(
        &self,
        date: NaiveDate,
        index: usize,
        start: Option<&str>,
        end: Option<&str>,
    ) -> AppResult<TimeRecord> {
        let store = self.require(date).await?;
        if index >= store.get().durations.len() {
            return Err(AppError::InvalidIndex(index + 1));
        }
        self.mutate(
            store,
            |rec| mutations::update_single_duration(rec, Some(index), start, end),
            || match start {
                Some(s) => AppError::InvalidTime(s.to_string()),
                None => AppError::Validation("interval start time is missing".into()),
            },
        )
        .await
    }

    /// Append an interval, creating the record when needed.
    pub async fn add_interval(
        &self,
        date: NaiveDate,
        start: &str,
        end: Option<&str>,
    ) -> AppResult<TimeRecord> {
        let store = self.open(date).await?;
        self.mutate(
            store,
            |rec| mutations::push_duration(rec, Some(start), end),
            || AppError::InvalidTime(start.to_string()),
        )
        .await
    }

    pub async fn replace_intervals(
        &self,
        date: NaiveDate,
        inputs: &[DurationInput],
    ) -> AppResult<TimeRecord> {
        let store = self.open(date).await?;
        self.mutate(
            store,
            |rec| mutations::replace_durations(rec, inputs),
            // Never taken: bad inputs are dropped, not rejected.
            || AppError::Other("interval replacement rejected".into()),
        )
        .await
    }

    pub async fn set_lunch(
        &self,
        date: NaiveDate,
        start: Option<&str>,
        end: Option<&str>,
    ) -> AppResult<TimeRecord> {
        let store = self.open(date).await?;
        self.mutate(
            store,
            |rec| mutations::update_lunch(rec, start, end),
            || AppError::Validation("lunch needs a valid start time (HH:MM)".into()),
        )
        .await
    }

    pub async fn set_internal(
        &self,
        date: NaiveDate,
        hours: Option<&str>,
    ) -> AppResult<TimeRecord> {
        let store = self.open(date).await?;
        self.mutate(
            store,
            |rec| mutations::update_internal(rec, hours),
            // Never taken: unparsable hours store zero.
            || AppError::Other("internal time update rejected".into()),
        )
        .await
    }

    pub async fn delete(&self, date: NaiveDate) -> AppResult<()> {
        let key = record_key(date);
        if self.adapter.get(&key).await?.is_none() {
            return Err(AppError::RecordNotFound(key));
        }
        self.keyed().delete_key(&key).await?;
        info!(%key, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::models::Duration;

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    fn logic() -> (MemoryStore, RecordLogic) {
        let mem = MemoryStore::new();
        (mem.clone(), RecordLogic::new(Arc::new(mem)))
    }

    #[tokio::test]
    async fn add_then_edit_then_reload() {
        let (_, logic) = logic();

        logic.add_interval(d(), "09:00", Some("12:00")).await.unwrap();
        logic.add_interval(d(), "13:00", None).await.unwrap();
        let rec = logic
            .edit_interval(d(), 1, Some("13:00"), Some("17:30"))
            .await
            .unwrap();
        assert_eq!(rec.worked_minutes(), 180 + 270);

        let loaded = logic.load(d()).await.unwrap().unwrap();
        assert_eq!(loaded.key(), "2025-09-01");
        assert_eq!(loaded.durations.len(), 2);
        assert_eq!(loaded.into_inner(), rec);
    }

    #[tokio::test]
    async fn edit_errors() {
        let (_, logic) = logic();

        let err = logic.edit_interval(d(), 0, Some("09:00"), None).await.unwrap_err();
        assert!(matches!(err, AppError::RecordNotFound(_)));

        logic.add_interval(d(), "09:00", None).await.unwrap();
        let err = logic.edit_interval(d(), 3, Some("09:00"), None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidIndex(4)));

        let err = logic.edit_interval(d(), 0, Some("9h"), None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidTime(_)));

        let err = logic.edit_interval(d(), 0, None, Some("12:00")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("missing")));
    }

    #[tokio::test]
    async fn replace_and_internal_accept_unparsable_input() {
        let (mem, logic) = logic();

        let rec = logic
            .replace_intervals(d(), &[DurationInput::from_pair("nope-12:00")])
            .await
            .unwrap();
        assert!(rec.durations.is_empty());

        let rec = logic.set_internal(d(), Some("abc")).await.unwrap();
        assert_eq!(rec.internal_company_time, Some(0));
        assert!(mem.snapshot("2025-09-01").await.is_some());
    }

    #[tokio::test]
    async fn lunch_and_internal() {
        let (mem, logic) = logic();

        let err = logic.set_lunch(d(), None, None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(mem.snapshot("2025-09-01").await, None);

        let rec = logic.set_lunch(d(), Some("12:00"), Some("12:40")).await.unwrap();
        assert_eq!(rec.lunch_minutes(), 40);

        let rec = logic.set_internal(d(), Some("1,5")).await.unwrap();
        assert_eq!(rec.internal_company_time, Some(5_400_000));
        assert_eq!(rec.lunch_minutes(), 40);
    }

    #[tokio::test]
    async fn replace_list_delete() {
        let (_, logic) = logic();
        let other = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();

        let rec = logic
            .replace_intervals(
                d(),
                &[
                    DurationInput::from_pair("08:00-12:00"),
                    DurationInput::from_pair("x-13:00"),
                ],
            )
            .await
            .unwrap();
        let at = |h| d().and_hms_opt(h, 0, 0).unwrap();
        assert_eq!(rec.durations, vec![Duration::new(at(8), Some(at(12)))]);

        logic.add_interval(other, "10:00", None).await.unwrap();

        assert_eq!(logic.list(None).await.unwrap().len(), 2);
        let september = logic.list(Some((d(), d()))).await.unwrap();
        assert_eq!(september.len(), 1);
        assert_eq!(september[0].key(), "2025-09-01");

        logic.delete(d()).await.unwrap();
        assert!(logic.load(d()).await.unwrap().is_none());
        assert!(matches!(
            logic.delete(d()).await.unwrap_err(),
            AppError::RecordNotFound(_)
        ));
    }
}

//! A domain value tagged with the storage key it lives under.

use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// `T` plus its storage identity.
///
/// The key is fixed at construction: there is no setter, and the mutation
/// functions only reach the inner value through `DerefMut`. Serialized flat,
/// with `key` merged next to the fields of `T`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyed<T> {
    key: String,
    #[serde(flatten)]
    value: T,
}

impl<T> Keyed<T> {
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Keyed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Keyed<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time_record::TimeRecord;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn key_is_merged_into_the_payload() {
        let rec = TimeRecord::new(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        let keyed = Keyed::new("2025-01-02", rec);

        let v = serde_json::to_value(&keyed).unwrap();
        assert_eq!(v, json!({ "key": "2025-01-02", "date": "2025-01-02" }));

        let back: Keyed<TimeRecord> = serde_json::from_value(v).unwrap();
        assert_eq!(back.key(), "2025-01-02");
        assert_eq!(back, keyed);
    }

    #[test]
    fn mutation_through_deref_keeps_the_key() {
        let rec = TimeRecord::new(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        let mut keyed = Keyed::new("k", rec);
        keyed.internal_company_time = Some(60_000);

        assert_eq!(keyed.key(), "k");
        assert_eq!(keyed.value().internal_company_time, Some(60_000));
    }
}

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::db::HabitStore;
use crate::error::{Error, Result};
use crate::models::{Completion, Habit};

/// In-memory store with the same contract as the SQLite backend.
///
/// Ids come from a per-store counter, so two stores never share id state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    habits: BTreeMap<i64, Habit>,
    completions: BTreeMap<i64, BTreeSet<NaiveDate>>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn require_habit(&self, id: i64) -> Result<&Habit> {
        self.habits.get(&id).ok_or(Error::HabitNotFound(id))
    }
}

impl HabitStore for MemoryStore {
    fn insert_habit(&mut self, mut habit: Habit) -> Result<Habit> {
        self.next_id += 1;
        habit.id = Some(self.next_id);
        self.habits.insert(self.next_id, habit.clone());
        self.completions.insert(self.next_id, BTreeSet::new());
        Ok(habit)
    }

    fn find_habit(&self, id: i64) -> Result<Habit> {
        self.require_habit(id).cloned()
    }

    fn update_habit(&mut self, habit: &Habit) -> Result<()> {
        let id = habit.id.ok_or(Error::HabitNotFound(0))?;
        let existing = self.habits.get_mut(&id).ok_or(Error::HabitNotFound(id))?;
        existing.name = habit.name.clone();
        existing.description = habit.description.clone();
        existing.frequency = habit.frequency;
        Ok(())
    }

    fn delete_habit(&mut self, id: i64) -> Result<()> {
        self.habits.remove(&id).ok_or(Error::HabitNotFound(id))?;
        self.completions.remove(&id);
        Ok(())
    }

    fn habits_for_owner(&self, owner_id: i64) -> Result<Vec<Habit>> {
        Ok(self
            .habits
            .values()
            .filter(|h| h.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn completion_dates(&self, habit_id: i64) -> Result<BTreeSet<NaiveDate>> {
        self.require_habit(habit_id)?;
        Ok(self.completions.get(&habit_id).cloned().unwrap_or_default())
    }

    fn completions(&self, habit_id: i64) -> Result<Vec<Completion>> {
        let dates = self.completion_dates(habit_id)?;
        Ok(dates
            .into_iter()
            .map(|date| Completion {
                id: None,
                habit_id,
                date,
            })
            .collect())
    }

    fn record_completion(&mut self, habit_id: i64, date: NaiveDate) -> Result<Completion> {
        self.require_habit(habit_id)?;
        let dates = self.completions.entry(habit_id).or_default();
        if !dates.insert(date) {
            return Err(Error::DuplicateCompletion { habit_id, date });
        }
        Ok(Completion::new(habit_id, date))
    }

    fn move_completion(&mut self, habit_id: i64, from: NaiveDate, to: NaiveDate) -> Result<bool> {
        self.require_habit(habit_id)?;
        let dates = self.completions.entry(habit_id).or_default();
        if !dates.contains(&from) {
            return Ok(false);
        }
        if from != to && dates.contains(&to) {
            return Err(Error::DuplicateCompletion {
                habit_id,
                date: to,
            });
        }
        dates.remove(&from);
        dates.insert(to);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_habit() -> Habit {
        Habit::new("Journal", "One page", Frequency::Daily, 1, d(2024, 10, 1))
    }

    #[test]
    fn ids_are_assigned_per_store() {
        let mut a = MemoryStore::new();
        let mut b = MemoryStore::new();
        assert_eq!(a.insert_habit(sample_habit()).unwrap().id, Some(1));
        assert_eq!(a.insert_habit(sample_habit()).unwrap().id, Some(2));
        assert_eq!(b.insert_habit(sample_habit()).unwrap().id, Some(1));
    }

    #[test]
    fn duplicate_completion_is_rejected() {
        let mut store = MemoryStore::new();
        let id = store.insert_habit(sample_habit()).unwrap().id.unwrap();
        store.record_completion(id, d(2024, 10, 2)).unwrap();
        assert!(matches!(
            store.record_completion(id, d(2024, 10, 2)),
            Err(Error::DuplicateCompletion { .. })
        ));
    }

    #[test]
    fn delete_cascades_completions() {
        let mut store = MemoryStore::new();
        let id = store.insert_habit(sample_habit()).unwrap().id.unwrap();
        store.record_completion(id, d(2024, 10, 2)).unwrap();
        store.delete_habit(id).unwrap();
        assert!(matches!(
            store.completion_dates(id),
            Err(Error::HabitNotFound(_))
        ));
    }

    #[test]
    fn unknown_habit_is_not_found_everywhere() {
        let mut store = MemoryStore::new();
        assert!(matches!(store.find_habit(3), Err(Error::HabitNotFound(3))));
        assert!(matches!(
            store.record_completion(3, d(2024, 10, 2)),
            Err(Error::HabitNotFound(3))
        ));
        assert!(matches!(
            store.move_completion(3, d(2024, 10, 2), d(2024, 10, 3)),
            Err(Error::HabitNotFound(3))
        ));
    }

    #[test]
    fn move_completion_behaves_like_sqlite() {
        let mut store = MemoryStore::new();
        let id = store.insert_habit(sample_habit()).unwrap().id.unwrap();
        store.record_completion(id, d(2024, 10, 2)).unwrap();

        assert!(store.move_completion(id, d(2024, 10, 2), d(2024, 10, 4)).unwrap());
        assert!(!store.move_completion(id, d(2024, 10, 2), d(2024, 10, 5)).unwrap());
        let dates = store.completion_dates(id).unwrap();
        assert_eq!(dates.into_iter().collect::<Vec<_>>(), vec![d(2024, 10, 4)]);
    }
}

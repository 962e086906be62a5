//! Clock-in / clock-out state machine over a [`ShiftStore`].
//!
//! A user is off shift until `start` records a clock-in time, and back off
//! shift once `end` turns that time into a completed session. Every
//! mutating action persists the whole store before returning.

use crate::database::models::{ShiftSession, UserShiftRecord, hours_between};
use crate::database::{ShiftStore, StoreBackend};
use crate::error::ShiftError;
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ClockIn {
    pub clock_in_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClockOut {
    pub started_at: DateTime<Utc>,
    pub clock_out_time: DateTime<Utc>,
    pub duration_hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserTotal {
    pub user_id: String,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveShift {
    pub user_id: String,
    pub since: DateTime<Utc>,
}

pub struct ShiftTracker<B> {
    store: ShiftStore<B>,
}

impl<B: StoreBackend> ShiftTracker<B> {
    pub fn new(store: ShiftStore<B>) -> Self {
        Self { store }
    }

    /// Clock `user_id` in at `now`. A second clock-in while already on shift is rejected.
    pub async fn start(&mut self, user_id: &str, now: DateTime<Utc>) -> Result<ClockIn, ShiftError> {
        let record = self.store.get(user_id);

        if let Some(since) = record.current_start {
            warn!("Rejected start for user {}: already on shift since {}", user_id, since);
            return Err(ShiftError::ShiftAlreadyActive { since });
        }

        record.current_start = Some(now);
        self.persist().await?;

        info!("User {} clocked in at {}", user_id, now);
        Ok(ClockIn { clock_in_time: now })
    }

    /// Clock `user_id` out at `now`, closing the open session and adding its hours to the total.
    pub async fn end(&mut self, user_id: &str, now: DateTime<Utc>) -> Result<ClockOut, ShiftError> {
        let record = self.store.get(user_id);

        let Some(started_at) = record.current_start else {
            warn!("Rejected end for user {}: no active shift", user_id);
            return Err(ShiftError::NoActiveShift);
        };

        if now < started_at {
            warn!(
                "Rejected end for user {}: clock-out {} precedes clock-in {}",
                user_id, now, started_at
            );
            return Err(ShiftError::ClockSkew {
                start: started_at,
                end: now,
            });
        }

        let duration_hours = hours_between(started_at, now);
        record.sessions.push(ShiftSession {
            start: started_at,
            end: now,
        });
        record.total += duration_hours;
        record.current_start = None;

        self.persist().await?;

        info!(
            "User {} clocked out at {} after {:.2}h",
            user_id, now, duration_hours
        );
        Ok(ClockOut {
            started_at,
            clock_out_time: now,
            duration_hours,
        })
    }

    /// Users with a positive total, highest first. Ties keep user id order.
    pub fn totals(&self) -> impl Iterator<Item = UserTotal> + '_ {
        let mut ranked: Vec<(&str, &UserShiftRecord)> = self
            .store
            .records()
            .filter(|(_, record)| record.total > 0.0)
            .collect();
        ranked.sort_by(|a, b| b.1.total.total_cmp(&a.1.total));

        ranked.into_iter().map(|(user_id, record)| UserTotal {
            user_id: user_id.to_string(),
            total_hours: record.total,
        })
    }

    /// Users currently on shift, in no particular order
    pub fn active(&self) -> Vec<ActiveShift> {
        self.store
            .records()
            .filter_map(|(user_id, record)| {
                record.current_start.map(|since| ActiveShift {
                    user_id: user_id.to_string(),
                    since,
                })
            })
            .collect()
    }

    pub fn record(&self, user_id: &str) -> Option<&UserShiftRecord> {
        self.store.find(user_id)
    }

    /// Reset every user's history, total and open shift. Returns how many records were reset.
    pub async fn clear_all(&mut self) -> Result<usize, ShiftError> {
        let count = self.store.reset_all();
        self.persist().await?;

        info!("Cleared shift records for {} users", count);
        Ok(count)
    }

    // The in-memory mapping keeps the change even when the write fails;
    // the next successful save persists it.
    async fn persist(&self) -> Result<(), ShiftError> {
        self.store.save().await.map_err(|e| {
            error!("Failed to persist shift records: {}", e);
            ShiftError::Persistence(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::json_file::JsonFileBackend;
    use chrono::TimeZone;
    use tempfile::{TempDir, tempdir};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 14, h, m, s).unwrap()
    }

    async fn tracker() -> (TempDir, ShiftTracker<JsonFileBackend>) {
        let dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("data.json"));
        let store = ShiftStore::load(backend).await.unwrap();
        (dir, ShiftTracker::new(store))
    }

    async fn reload(dir: &TempDir) -> ShiftTracker<JsonFileBackend> {
        let backend = JsonFileBackend::new(dir.path().join("data.json"));
        ShiftTracker::new(ShiftStore::load(backend).await.unwrap())
    }

    #[tokio::test]
    async fn test_start_then_end_half_hour() {
        let (_dir, mut tracker) = tracker().await;

        let clock_in = tracker.start("A", at(10, 0, 0)).await.unwrap();
        assert_eq!(clock_in.clock_in_time, at(10, 0, 0));

        let clock_out = tracker.end("A", at(10, 30, 0)).await.unwrap();
        assert_eq!(clock_out.started_at, at(10, 0, 0));
        assert_eq!(clock_out.clock_out_time, at(10, 30, 0));
        assert_eq!(clock_out.duration_hours, 0.5);

        let record = tracker.record("A").unwrap();
        assert_eq!(record.total, 0.5);
        assert_eq!(record.sessions.len(), 1);
        assert!(!record.is_on_shift());
    }

    #[tokio::test]
    async fn test_open_shift_not_counted_in_totals() {
        let (_dir, mut tracker) = tracker().await;

        tracker.start("A", at(10, 0, 0)).await.unwrap();
        tracker.end("A", at(10, 30, 0)).await.unwrap();
        tracker.start("A", at(11, 0, 0)).await.unwrap();

        assert_eq!(
            tracker.active(),
            vec![ActiveShift {
                user_id: "A".to_string(),
                since: at(11, 0, 0),
            }]
        );
        let totals: Vec<UserTotal> = tracker.totals().collect();
        assert_eq!(
            totals,
            vec![UserTotal {
                user_id: "A".to_string(),
                total_hours: 0.5,
            }]
        );
    }

    #[tokio::test]
    async fn test_end_without_start_is_rejected() {
        let (_dir, mut tracker) = tracker().await;

        let result = tracker.end("B", at(9, 0, 0)).await;
        assert!(matches!(result, Err(ShiftError::NoActiveShift)));

        let record = tracker.record("B").cloned().unwrap_or_default();
        assert!(record.sessions.is_empty());
        assert_eq!(record.total, 0.0);
        assert_eq!(tracker.totals().count(), 0);
    }

    #[tokio::test]
    async fn test_total_is_sum_of_durations() {
        let (_dir, mut tracker) = tracker().await;
        let pairs = [
            (at(8, 0, 0), at(8, 45, 0)),
            (at(9, 0, 0), at(11, 0, 0)),
            (at(12, 0, 0), at(12, 0, 36)),
            (at(13, 15, 0), at(17, 30, 0)),
        ];

        let mut expected = 0.0;
        for (start, end) in pairs {
            tracker.start("A", start).await.unwrap();
            let out = tracker.end("A", end).await.unwrap();
            assert_eq!(out.duration_hours, hours_between(start, end));
            expected += out.duration_hours;
        }

        let record = tracker.record("A").unwrap();
        assert_eq!(record.sessions.len(), pairs.len());
        assert!((record.total - expected).abs() < 1e-9);
        assert!((record.total - 7.01).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_double_start_keeps_original_clock_in() {
        let (_dir, mut tracker) = tracker().await;

        tracker.start("A", at(10, 0, 0)).await.unwrap();
        let result = tracker.start("A", at(10, 5, 0)).await;

        match result {
            Err(ShiftError::ShiftAlreadyActive { since }) => assert_eq!(since, at(10, 0, 0)),
            other => panic!("expected ShiftAlreadyActive, got {:?}", other),
        }
        assert_eq!(tracker.record("A").unwrap().current_start, Some(at(10, 0, 0)));
    }

    #[tokio::test]
    async fn test_end_before_start_is_clock_skew() {
        let (_dir, mut tracker) = tracker().await;

        tracker.start("A", at(10, 0, 0)).await.unwrap();
        let result = tracker.end("A", at(9, 59, 0)).await;

        assert!(matches!(result, Err(ShiftError::ClockSkew { .. })));
        let record = tracker.record("A").unwrap();
        assert_eq!(record.current_start, Some(at(10, 0, 0)));
        assert!(record.sessions.is_empty());
        assert_eq!(record.total, 0.0);
    }

    #[tokio::test]
    async fn test_clear_all_resets_everyone() {
        let (dir, mut tracker) = tracker().await;

        tracker.start("A", at(8, 0, 0)).await.unwrap();
        tracker.end("A", at(9, 0, 0)).await.unwrap();
        tracker.start("B", at(8, 30, 0)).await.unwrap();

        assert_eq!(tracker.clear_all().await.unwrap(), 2);

        assert_eq!(tracker.totals().count(), 0);
        assert!(tracker.active().is_empty());
        for user in ["A", "B"] {
            assert_eq!(*tracker.record(user).unwrap(), UserShiftRecord::default());
        }

        let reloaded = reload(&dir).await;
        assert!(reloaded.active().is_empty());
        assert_eq!(reloaded.totals().count(), 0);
    }

    #[tokio::test]
    async fn test_totals_sorted_descending() {
        let (_dir, mut tracker) = tracker().await;

        for (user, minutes) in [("a", 30), ("b", 90), ("c", 60), ("d", 90)] {
            tracker.start(user, at(8, 0, 0)).await.unwrap();
            tracker
                .end(user, at(8, 0, 0) + chrono::Duration::minutes(minutes))
                .await
                .unwrap();
        }
        tracker.start("idle", at(9, 0, 0)).await.unwrap();

        let order: Vec<String> = tracker.totals().map(|t| t.user_id).collect();
        assert_eq!(order, vec!["b", "d", "c", "a"]);
    }

    #[tokio::test]
    async fn test_every_action_is_persisted() {
        let (dir, mut tracker) = tracker().await;

        tracker.start("A", at(10, 0, 0)).await.unwrap();
        assert_eq!(reload(&dir).await.active().len(), 1);

        tracker.end("A", at(12, 0, 0)).await.unwrap();
        let reloaded = reload(&dir).await;
        assert!(reloaded.active().is_empty());
        assert_eq!(reloaded.record("A").unwrap().total, 2.0);
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_memory_state() {
        let dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("missing").join("data.json"));
        let mut tracker = ShiftTracker::new(ShiftStore::load(backend).await.unwrap());

        let result = tracker.start("A", at(10, 0, 0)).await;

        assert!(matches!(result, Err(ShiftError::Persistence(_))));
        assert_eq!(tracker.active().len(), 1);
    }
}

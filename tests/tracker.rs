#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{DateTime, Duration, Local, TimeZone};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use workpulse::db::activities::{Activities, ActivityStore};
    use workpulse::libs::activity::{ActivityInterval, ActivityKind};
    use workpulse::libs::error::TrackerError;
    use workpulse::libs::tracker::Tracker;

    /// In-memory store whose writes can be made to fail on demand.
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<Vec<ActivityInterval>>,
        saves: AtomicUsize,
        fail_save: AtomicBool,
        fail_close: AtomicBool,
    }

    impl ActivityStore for MemoryStore {
        fn save(&self, interval: &ActivityInterval) -> Result<i64> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail_save.load(Ordering::SeqCst) {
                anyhow::bail!("database is locked");
            }
            let mut rows = self.rows.lock();
            let id = rows.len() as i64 + 1;
            rows.push(ActivityInterval {
                id: Some(id),
                ..interval.clone()
            });
            Ok(id)
        }

        fn close(&self, id: i64, end: DateTime<Local>) -> Result<()> {
            if self.fail_close.load(Ordering::SeqCst) {
                anyhow::bail!("disk I/O error");
            }
            let mut rows = self.rows.lock();
            match rows.iter_mut().find(|row| row.id == Some(id)) {
                Some(row) => {
                    row.end = Some(end);
                    Ok(())
                }
                None => anyhow::bail!("no row {}", id),
            }
        }

        fn list_all(&self) -> Result<Vec<ActivityInterval>> {
            let mut rows = self.rows.lock().clone();
            rows.sort_by(|a, b| b.start.cmp(&a.start));
            Ok(rows)
        }

        fn list_range(&self, start: DateTime<Local>, end: DateTime<Local>) -> Result<Vec<ActivityInterval>> {
            let mut rows: Vec<ActivityInterval> =
                self.rows.lock().iter().filter(|row| row.start >= start && row.start < end).cloned().collect();
            rows.sort_by(|a, b| a.start.cmp(&b.start));
            Ok(rows)
        }

        fn delete_open(&self) -> Result<usize> {
            let mut rows = self.rows.lock();
            let before = rows.len();
            rows.retain(|row| row.end.is_some());
            Ok(before - rows.len())
        }
    }

    fn at(secs: i64) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 12, 10, 0, 0).unwrap() + Duration::seconds(secs)
    }

    fn memory_tracker(threshold: u64) -> (Arc<MemoryStore>, Tracker) {
        let store = Arc::new(MemoryStore::default());
        let tracker = Tracker::new(store.clone(), threshold);
        (store, tracker)
    }

    struct TrackerTestContext {
        _temp_dir: TempDir,
        activities: Activities,
    }

    impl TestContext for TrackerTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let activities = Activities::open(temp_dir.path().join("workpulse.db")).unwrap();
            TrackerTestContext {
                _temp_dir: temp_dir,
                activities,
            }
        }
    }

    #[test]
    fn test_first_input_opens_interval() {
        let (store, tracker) = memory_tracker(15);

        assert!(!tracker.is_active());
        assert!(tracker.record_input_at(ActivityKind::Mouse, at(0)).unwrap());
        assert!(tracker.is_active());
        assert_eq!(tracker.last_input(), Some(at(0)));

        let rows = store.rows.lock();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].start, at(0));
        assert!(rows[0].end.is_none());
        assert_eq!(rows[0].kind, ActivityKind::Mouse);
    }

    #[test]
    fn test_inputs_while_active_only_move_last_input() {
        let (store, tracker) = memory_tracker(15);

        tracker.record_input_at(ActivityKind::Mouse, at(0)).unwrap();
        assert!(!tracker.record_input_at(ActivityKind::Keyboard, at(3)).unwrap());
        assert!(!tracker.record_input_at(ActivityKind::Mouse, at(7)).unwrap());

        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.last_input(), Some(at(7)));
        // The kind that started the session is kept.
        assert_eq!(tracker.intervals()[0].kind, ActivityKind::Mouse);
    }

    #[test]
    fn test_last_input_never_moves_backwards() {
        let (_store, tracker) = memory_tracker(15);

        tracker.record_input_at(ActivityKind::Mouse, at(10)).unwrap();
        tracker.record_input_at(ActivityKind::Mouse, at(4)).unwrap();

        assert_eq!(tracker.last_input(), Some(at(10)));
    }

    #[test]
    fn test_idle_check_closes_at_last_input() {
        let (store, tracker) = memory_tracker(15);

        tracker.record_input_at(ActivityKind::Mouse, at(0)).unwrap();
        tracker.record_input_at(ActivityKind::Keyboard, at(10)).unwrap();

        assert!(tracker.idle_check_at(at(26)));
        assert!(!tracker.is_active());

        let rows = store.rows.lock();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].start, at(0));
        assert_eq!(rows[0].end, Some(at(10)));
        assert_eq!(rows[0].kind, ActivityKind::Mouse);
        assert_eq!(tracker.intervals()[0].duration(), Some(Duration::seconds(10)));
    }

    #[test]
    fn test_single_input_session_has_zero_duration() {
        let (store, tracker) = memory_tracker(15);

        tracker.record_input_at(ActivityKind::Mouse, at(0)).unwrap();
        assert!(tracker.idle_check_at(at(16)));

        let rows = store.rows.lock();
        assert_eq!(rows[0].end, Some(at(0)));
        assert_eq!(rows[0].duration(), Some(Duration::zero()));
    }

    #[test]
    fn test_idle_check_within_threshold_keeps_session() {
        let (_store, tracker) = memory_tracker(15);

        tracker.record_input_at(ActivityKind::Mouse, at(0)).unwrap();

        assert!(!tracker.idle_check_at(at(5)));
        // Exactly at the threshold is not yet idle.
        assert!(!tracker.idle_check_at(at(15)));
        assert!(tracker.is_active());
        assert!(tracker.idle_check_at(at(16)));
    }

    #[test]
    fn test_idle_check_when_idle_is_noop() {
        let (store, tracker) = memory_tracker(15);

        assert!(!tracker.idle_check_at(at(100)));
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_input_after_idle_opens_new_interval() {
        let (store, tracker) = memory_tracker(15);

        tracker.record_input_at(ActivityKind::Mouse, at(0)).unwrap();
        tracker.idle_check_at(at(20));
        assert!(tracker.record_input_at(ActivityKind::Keyboard, at(30)).unwrap());

        let rows = store.rows.lock();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].start, at(30));
        assert_eq!(rows[1].kind, ActivityKind::Keyboard);
    }

    #[test]
    fn test_failed_open_leaves_tracker_idle() {
        let (store, tracker) = memory_tracker(15);
        store.fail_save.store(true, Ordering::SeqCst);

        let result = tracker.record_input_at(ActivityKind::Mouse, at(0));

        assert!(matches!(result, Err(TrackerError::Persistence(_))));
        assert!(!tracker.is_active());
        assert!(tracker.intervals().is_empty());
        assert_eq!(tracker.last_input(), None);

        store.fail_save.store(false, Ordering::SeqCst);
        assert!(tracker.record_input_at(ActivityKind::Mouse, at(1)).unwrap());
        assert_eq!(tracker.intervals().len(), 1);
    }

    #[test]
    fn test_failed_close_still_goes_idle() {
        let (store, tracker) = memory_tracker(15);

        tracker.record_input_at(ActivityKind::Mouse, at(0)).unwrap();
        store.fail_close.store(true, Ordering::SeqCst);

        assert!(tracker.idle_check_at(at(30)));
        assert!(!tracker.is_active());
        assert!(store.rows.lock()[0].end.is_none());
    }

    #[test]
    fn test_update_threshold_applies_to_next_check() {
        let (_store, tracker) = memory_tracker(15);

        tracker.record_input_at(ActivityKind::Mouse, at(0)).unwrap();
        assert!(tracker.update_threshold(60));
        assert!(!tracker.update_threshold(60));
        assert_eq!(tracker.threshold(), Duration::seconds(60));

        assert!(!tracker.idle_check_at(at(30)));
        assert!(tracker.is_active());

        tracker.update_threshold(5);
        assert!(tracker.idle_check_at(at(30)));
    }

    #[test]
    fn test_shutdown_closes_running_session() {
        let (store, tracker) = memory_tracker(15);

        tracker.record_input_at(ActivityKind::Keyboard, at(0)).unwrap();
        tracker.record_input_at(ActivityKind::Keyboard, at(8)).unwrap();

        assert!(tracker.shutdown());
        assert!(!tracker.shutdown());
        assert_eq!(store.rows.lock()[0].end, Some(at(8)));
    }

    #[test]
    fn test_aggregates_measure_open_interval_to_now() {
        let (_store, tracker) = memory_tracker(15);

        tracker.record_input_at(ActivityKind::Mouse, at(0)).unwrap();
        tracker.record_input_at(ActivityKind::Mouse, at(5)).unwrap();

        let days = tracker.daily_aggregates_at(at(12));
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].total, Duration::seconds(12));
        assert_eq!(days[0].mouse, Duration::seconds(12));

        tracker.idle_check_at(at(30));
        let days = tracker.daily_aggregates_at(at(40));
        assert_eq!(days[0].total, Duration::seconds(5));
    }

    #[test]
    fn test_concurrent_inputs_open_one_interval() {
        let (store, tracker) = memory_tracker(15);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let tracker = tracker.clone();
                thread::spawn(move || {
                    let kind = if i % 2 == 0 { ActivityKind::Mouse } else { ActivityKind::Keyboard };
                    for step in 0..50 {
                        tracker.record_input_at(kind, at(step)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
        assert_eq!(store.rows.lock().len(), 1);
        assert!(tracker.is_active());
        assert_eq!(tracker.last_input(), Some(at(49)));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_cleanup_unfinished_removes_open_rows(ctx: &mut TrackerTestContext) {
        let mut closed = ActivityInterval::open(at(0), ActivityKind::Mouse);
        closed.close(at(30));
        ctx.activities.save(&closed).unwrap();
        ctx.activities.save(&ActivityInterval::open(at(60), ActivityKind::Keyboard)).unwrap();

        let tracker = Tracker::new(Arc::new(ctx.activities.clone()), 15);
        assert_eq!(tracker.cleanup_unfinished().unwrap(), 1);

        let intervals = tracker.intervals();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].end, Some(at(30)));
        assert!(!tracker.is_active());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_session_persists_through_sqlite(ctx: &mut TrackerTestContext) {
        let tracker = Tracker::new(Arc::new(ctx.activities.clone()), 15);

        tracker.record_input_at(ActivityKind::Keyboard, at(0)).unwrap();
        tracker.record_input_at(ActivityKind::Mouse, at(9)).unwrap();
        tracker.idle_check_at(at(40));

        let stored = ctx.activities.list_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].start, at(0));
        assert_eq!(stored[0].end, Some(at(9)));
        assert_eq!(stored[0].kind, ActivityKind::Keyboard);

        let fresh = Tracker::new(Arc::new(ctx.activities.clone()), 15);
        assert_eq!(fresh.load_activities().unwrap(), 1);
        let days = fresh.daily_aggregates_at(at(100));
        assert_eq!(days[0].keyboard, Duration::seconds(9));
        assert_eq!(days[0].mouse, Duration::zero());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_intervals_for_date(ctx: &mut TrackerTestContext) {
        let tracker = Tracker::new(Arc::new(ctx.activities.clone()), 15);
        let yesterday = at(0) - Duration::days(1);

        let mut old = ActivityInterval::open(yesterday, ActivityKind::Mouse);
        old.close(yesterday + Duration::minutes(5));
        ctx.activities.save(&old).unwrap();
        tracker.record_input_at(ActivityKind::Keyboard, at(0)).unwrap();

        let today = tracker.intervals_for_date(at(0).date_naive()).unwrap();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].kind, ActivityKind::Keyboard);
        assert!(today[0].is_open());
    }
}

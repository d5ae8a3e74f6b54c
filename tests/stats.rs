#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
    use workpulse::libs::activity::{ActivityInterval, ActivityKind};
    use workpulse::libs::stats::{aggregate, day_bounds, effective_duration};

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn closed(start: DateTime<Local>, secs: i64, kind: ActivityKind) -> ActivityInterval {
        ActivityInterval {
            id: None,
            start,
            end: Some(start + Duration::seconds(secs)),
            kind,
        }
    }

    fn open(start: DateTime<Local>, kind: ActivityKind) -> ActivityInterval {
        ActivityInterval {
            id: None,
            start,
            end: None,
            kind,
        }
    }

    #[test]
    fn test_empty_input_gives_no_days() {
        let now = local(2024, 6, 12, 12, 0, 0);
        assert!(aggregate(&[], now, false, None).is_empty());
    }

    #[test]
    fn test_groups_by_start_date_newest_first() {
        let now = local(2024, 6, 12, 12, 0, 0);
        let intervals = vec![
            closed(local(2024, 6, 10, 9, 0, 0), 600, ActivityKind::Mouse),
            closed(local(2024, 6, 12, 9, 0, 0), 120, ActivityKind::Keyboard),
            closed(local(2024, 6, 10, 14, 0, 0), 300, ActivityKind::Keyboard),
            closed(local(2024, 6, 12, 10, 0, 0), 60, ActivityKind::Mouse),
        ];

        let days = aggregate(&intervals, now, false, None);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        assert_eq!(days[0].total, Duration::seconds(180));
        assert_eq!(days[0].mouse, Duration::seconds(60));
        assert_eq!(days[0].keyboard, Duration::seconds(120));

        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(days[1].total, Duration::seconds(900));
        for day in &days {
            assert_eq!(day.total, day.mouse + day.keyboard);
        }
    }

    #[test]
    fn test_busy_day_and_empty_day() {
        let now = local(2024, 6, 12, 12, 0, 0);
        let intervals = vec![
            closed(local(2024, 6, 11, 9, 0, 0), 3600, ActivityKind::Mouse),
            closed(local(2024, 6, 11, 13, 0, 0), 1800, ActivityKind::Keyboard),
            closed(local(2024, 6, 12, 9, 0, 0), 0, ActivityKind::Mouse),
        ];

        let days = aggregate(&intervals, now, false, None);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        assert_eq!(days[0].total, Duration::zero());
        assert_eq!(days[1].total, Duration::seconds(5400));
        assert_eq!(days[1].mouse, Duration::seconds(3600));
        assert_eq!(days[1].keyboard, Duration::seconds(1800));
    }

    #[test]
    fn test_interval_crossing_midnight_counts_on_start_date() {
        let now = local(2024, 6, 12, 12, 0, 0);
        let intervals = vec![closed(local(2024, 6, 10, 23, 50, 0), 1200, ActivityKind::Mouse)];

        let days = aggregate(&intervals, now, false, None);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(days[0].total, Duration::minutes(20));
    }

    #[test]
    fn test_implausible_and_negative_intervals_are_ignored() {
        let now = local(2024, 6, 12, 12, 0, 0);
        let start = local(2024, 6, 12, 9, 0, 0);
        let backwards = ActivityInterval {
            id: None,
            start,
            end: Some(start - Duration::seconds(30)),
            kind: ActivityKind::Mouse,
        };
        let intervals = vec![
            closed(local(1999, 12, 31, 10, 0, 0), 600, ActivityKind::Mouse),
            backwards,
            closed(start, 45, ActivityKind::Keyboard),
        ];

        let days = aggregate(&intervals, now, false, None);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].total, Duration::seconds(45));
        assert_eq!(days[0].mouse, Duration::zero());
    }

    #[test]
    fn test_zero_length_interval_still_lists_its_date() {
        let now = local(2024, 6, 12, 12, 0, 0);
        let intervals = vec![closed(local(2024, 6, 11, 8, 0, 0), 0, ActivityKind::Keyboard)];

        let days = aggregate(&intervals, now, false, None);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].total, Duration::zero());
    }

    #[test]
    fn test_open_interval_measurement() {
        let start = local(2024, 6, 12, 9, 0, 0);
        let now = local(2024, 6, 12, 9, 10, 0);
        let last_input = Some(local(2024, 6, 12, 9, 4, 0));
        let interval = open(start, ActivityKind::Mouse);

        assert_eq!(effective_duration(&interval, now, true, last_input), Some(Duration::minutes(10)));
        assert_eq!(effective_duration(&interval, now, false, last_input), Some(Duration::minutes(4)));
        assert_eq!(effective_duration(&interval, now, false, None), None);
        assert_eq!(effective_duration(&interval, start - Duration::seconds(1), true, None), None);
    }

    #[test]
    fn test_open_interval_without_reference_is_skipped() {
        let now = local(2024, 6, 12, 12, 0, 0);
        let intervals = vec![
            open(local(2024, 6, 12, 11, 0, 0), ActivityKind::Keyboard),
            closed(local(2024, 6, 12, 10, 0, 0), 30, ActivityKind::Mouse),
        ];

        let days = aggregate(&intervals, now, false, None);

        assert_eq!(days[0].total, Duration::seconds(30));
        assert_eq!(days[0].keyboard, Duration::zero());
    }

    #[test]
    fn test_aggregate_is_repeatable() {
        let now = local(2024, 6, 12, 12, 0, 0);
        let last_input = Some(local(2024, 6, 12, 11, 30, 0));
        let intervals = vec![
            open(local(2024, 6, 12, 11, 0, 0), ActivityKind::Keyboard),
            closed(local(2024, 6, 11, 10, 0, 0), 30, ActivityKind::Mouse),
        ];

        let first = aggregate(&intervals, now, false, last_input);
        let second = aggregate(&intervals, now, false, last_input);

        assert_eq!(first, second);
        assert_eq!(first[0].keyboard, Duration::minutes(30));
    }

    #[test]
    fn test_day_bounds_span_one_day() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let (start, end) = day_bounds(date).unwrap();

        assert_eq!(start, local(2024, 6, 12, 0, 0, 0));
        assert_eq!(end, local(2024, 6, 13, 0, 0, 0));
    }
}

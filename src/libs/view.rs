use super::formatter::{format_duration, FormattedInterval};
use super::stats::DailyAggregate;
use super::timeline::Timeline;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Daily totals, one row per date.
    pub fn stats(days: &[DailyAggregate]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "TOTAL", "MOUSE", "KEYBOARD"]);
        for day in days {
            table.add_row(row![
                day.date.format("%Y-%m-%d"),
                format_duration(&day.total),
                format_duration(&day.mouse),
                format_duration(&day.keyboard),
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn intervals(intervals: &[FormattedInterval], total: &chrono::Duration) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "START", "END", "KIND", "DURATION"]);
        for interval in intervals {
            table.add_row(row![interval.id, interval.start, interval.end, interval.kind, interval.duration]);
        }
        table.add_row(row!["", "", "", "TOTAL", format_duration(total)]);
        table.printstd();

        Ok(())
    }

    pub fn timeline(timeline: &Timeline) -> Result<()> {
        println!("{}", Timeline::ruler());
        println!("{}", timeline.bar());
        Ok(())
    }
}

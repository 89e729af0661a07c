//! Derived read models: the hour-bucketed grid and the per-day listing

use std::ops::Range;

use chrono::Timelike;

use super::types::{TimeSpan, WeekPlan, Weekday};

/// Hour-bucketed placement of one week's tasks.
///
/// Occupancy is deliberately hour-granular: a task fills every cell from its
/// start hour up to, but not including, its end hour, with minutes ignored.
/// A task that ends exactly on the hour does not reach into that hour, and a
/// task contained within a single hour only shows up when it starts on the
/// full hour. This mirrors the rendering rule the planner has always had;
/// a minute-accurate overlap test would change what users see.
pub struct WeekGrid<'a> {
    hours: Range<u32>,
    // columns[day][row], cell contents in stored order
    columns: Vec<Vec<Vec<&'a TimeSpan>>>,
}

pub fn layout_week(plan: &WeekPlan, hours: Range<u32>) -> WeekGrid<'_> {
    let columns = Weekday::ALL
        .iter()
        .map(|&day| {
            hours
                .clone()
                .map(|hour| {
                    plan.day(day)
                        .iter()
                        .filter(|span| occupies(span, hour))
                        .collect()
                })
                .collect()
        })
        .collect();

    WeekGrid { hours, columns }
}

fn occupies(span: &TimeSpan, hour: u32) -> bool {
    let start = span.start();
    (start.hour() <= hour && hour < span.end().hour())
        || (start.hour() == hour && start.minute() == 0)
}

impl<'a> WeekGrid<'a> {
    pub fn hours(&self) -> Range<u32> {
        self.hours.clone()
    }

    pub fn cell(&self, day: Weekday, hour: u32) -> &[&'a TimeSpan] {
        if !self.hours.contains(&hour) {
            return &[];
        }
        let row = (hour - self.hours.start) as usize;
        &self.columns[day.index()][row]
    }

    /// Largest cell in the given hour row, for sizing grid rows
    pub fn row_depth(&self, hour: u32) -> usize {
        Weekday::ALL
            .iter()
            .map(|&day| self.cell(day, hour).len())
            .max()
            .unwrap_or(0)
    }
}

/// One weekday's tasks sorted by start time, with a count for the header
pub struct DayListing<'a> {
    pub day: Weekday,
    pub count: usize,
    pub tasks: Vec<&'a TimeSpan>,
}

pub fn week_listing(plan: &WeekPlan) -> Vec<DayListing<'_>> {
    Weekday::ALL
        .iter()
        .map(|&day| {
            let tasks: Vec<&TimeSpan> = plan.sorted(day).collect();
            DayListing {
                day,
                count: tasks.len(),
                tasks,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{parse_hhmm, TimeSpan};

    fn span(start: &str, end: &str, label: &str) -> TimeSpan {
        TimeSpan::new(parse_hhmm(start).unwrap(), parse_hhmm(end).unwrap(), label).unwrap()
    }

    fn labels<'a>(grid: &'a WeekGrid<'a>, day: Weekday, hour: u32) -> Vec<&'a str> {
        grid.cell(day, hour).iter().map(|s| s.label()).collect()
    }

    #[test]
    fn span_fills_start_hour_through_hour_before_end() {
        let mut plan = WeekPlan::new();
        plan.add(Weekday::Monday, span("08:00", "10:00", "X"));

        let grid = layout_week(&plan, 6..23);
        assert_eq!(labels(&grid, Weekday::Monday, 7), Vec::<&str>::new());
        assert_eq!(labels(&grid, Weekday::Monday, 8), ["X"]);
        assert_eq!(labels(&grid, Weekday::Monday, 9), ["X"]);
        assert_eq!(labels(&grid, Weekday::Monday, 10), Vec::<&str>::new());
        // Other days stay empty
        assert_eq!(labels(&grid, Weekday::Tuesday, 8), Vec::<&str>::new());
    }

    #[test]
    fn minutes_are_ignored_for_cell_boundaries() {
        let mut plan = WeekPlan::new();
        plan.add(Weekday::Thursday, span("08:30", "09:30", "Y"));

        let grid = layout_week(&plan, 6..23);
        assert_eq!(labels(&grid, Weekday::Thursday, 8), ["Y"]);
        assert_eq!(labels(&grid, Weekday::Thursday, 9), Vec::<&str>::new());
    }

    #[test]
    fn on_the_hour_span_within_one_hour_occupies_that_hour() {
        let mut plan = WeekPlan::new();
        plan.add(Weekday::Friday, span("08:00", "08:30", "short"));
        // Off-the-hour span inside one hour falls through the grid entirely
        plan.add(Weekday::Friday, span("09:15", "09:45", "invisible"));

        let grid = layout_week(&plan, 6..23);
        assert_eq!(labels(&grid, Weekday::Friday, 8), ["short"]);
        assert_eq!(labels(&grid, Weekday::Friday, 9), Vec::<&str>::new());
    }

    #[test]
    fn cells_keep_stored_order_not_start_order() {
        let mut plan = WeekPlan::new();
        plan.add(Weekday::Monday, span("09:00", "11:00", "second start"));
        plan.add(Weekday::Monday, span("08:00", "11:00", "first start"));

        let grid = layout_week(&plan, 6..23);
        assert_eq!(
            labels(&grid, Weekday::Monday, 9),
            ["second start", "first start"]
        );
    }

    #[test]
    fn cells_outside_the_hour_range_are_empty() {
        let mut plan = WeekPlan::new();
        plan.add(Weekday::Monday, span("05:00", "23:00", "marathon"));

        let grid = layout_week(&plan, 6..23);
        assert_eq!(labels(&grid, Weekday::Monday, 5), Vec::<&str>::new());
        assert_eq!(labels(&grid, Weekday::Monday, 23), Vec::<&str>::new());
        assert_eq!(labels(&grid, Weekday::Monday, 6), ["marathon"]);
        assert_eq!(labels(&grid, Weekday::Monday, 22), ["marathon"]);
    }

    #[test]
    fn row_depth_is_the_widest_cell() {
        let mut plan = WeekPlan::new();
        plan.add(Weekday::Monday, span("09:00", "10:00", "a"));
        plan.add(Weekday::Monday, span("09:00", "10:00", "b"));
        plan.add(Weekday::Sunday, span("09:30", "10:30", "c"));

        let grid = layout_week(&plan, 6..23);
        assert_eq!(grid.row_depth(9), 2);
        assert_eq!(grid.row_depth(11), 0);
    }

    #[test]
    fn listing_sorts_by_start_and_counts() {
        let mut plan = WeekPlan::new();
        plan.add(Weekday::Monday, span("14:00", "15:00", "late"));
        plan.add(Weekday::Monday, span("08:00", "09:00", "early"));

        let listing = week_listing(&plan);
        assert_eq!(listing.len(), 7);
        assert_eq!(listing[0].day, Weekday::Monday);
        assert_eq!(listing[0].count, 2);
        let labels: Vec<&str> = listing[0].tasks.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["early", "late"]);
        assert_eq!(listing[6].count, 0);
    }
}

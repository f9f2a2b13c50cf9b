use owo_colors::OwoColorize;
use piley_core::stats::{PileSummary, WeeklyHistogram};

const BAR_WIDTH: usize = 30;

/// Bar length for `count`, scaled so that `max` fills the full width.
/// Non-zero counts always get at least one block.
fn bar_width(count: u32, max: u32) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    (count as usize * BAR_WIDTH / max as usize).max(1)
}

pub fn histogram_lines(histogram: &WeeklyHistogram) -> Vec<String> {
    let max = histogram.counts.iter().copied().max().unwrap_or(0);
    histogram
        .days()
        .map(|(day, count)| {
            format!(
                "{} {:>3} {}",
                day.format("%a %d"),
                count,
                "█".repeat(bar_width(count, max))
            )
        })
        .collect()
}

/// Counts after the pile name. Deleted tasks show those still on record and
/// the pile's running total.
fn summary_counts(summary: &PileSummary) -> String {
    format!(
        "active: {}  done: {}  deleted: {} ({} total)",
        summary.active, summary.done, summary.deleted, summary.deleted_total
    )
}

pub fn display_summary(summary: &PileSummary) {
    println!("{}  {}", summary.pile_name.bold(), summary_counts(summary));
    display_histogram(&summary.weekly);
}

pub fn display_histogram(histogram: &WeeklyHistogram) {
    for line in histogram_lines(histogram) {
        println!("  {}", line.green());
    }
    println!("  {} completions this week", histogram.total());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case(0, 5, 0)]
    #[case(5, 5, BAR_WIDTH)]
    #[case(1, 100, 1)]
    #[case(2, 4, BAR_WIDTH / 2)]
    fn test_bar_width(#[case] count: u32, #[case] max: u32, #[case] expected: usize) {
        assert_eq!(bar_width(count, max), expected);
    }

    #[test]
    fn test_summary_counts_show_recorded_and_total_deletions() {
        let summary = PileSummary {
            pile_name: "Home".to_string(),
            active: 2,
            done: 1,
            deleted: 1,
            deleted_total: 4,
            weekly: WeeklyHistogram {
                end: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
                counts: [0; 7],
            },
        };
        assert_eq!(summary_counts(&summary), "active: 2  done: 1  deleted: 1 (4 total)");
    }

    #[test]
    fn test_histogram_lines_are_oldest_first() {
        let histogram = WeeklyHistogram {
            end: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
            counts: [0, 0, 0, 0, 0, 1, 2],
        };
        let lines = histogram_lines(&histogram);

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Thu 08   0 ");
        assert!(lines[6].starts_with("Wed 14   2 "));
        assert_eq!(lines[6].chars().filter(|&c| c == '█').count(), BAR_WIDTH);
    }
}

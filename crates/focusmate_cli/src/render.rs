//! Text renderers for the list view and the performance chart.

use focusmate_core::{DailyTotal, Entry, StoreSummary};

const BAR_WIDTH: u64 = 40;
const NO_REMARK: &str = "—";

/// One list row: subject, date, minutes and remark (or a dash).
pub fn entry_row(entry: &Entry) -> String {
    format!(
        "{:<36}  {:<14}  {:<10}  {:>7}  {}",
        entry.id,
        entry.subject,
        entry.date,
        format!("{} min", entry.minutes),
        entry.remark().unwrap_or(NO_REMARK)
    )
}

pub fn summary_lines(summary: &StoreSummary) -> [String; 2] {
    [
        format!("Total: {} min", summary.total_minutes),
        format!("Sessions: {}", summary.session_count),
    ]
}

/// Horizontal bar chart, one line per day, scaled to the busiest day.
pub fn bar_chart(series: &[DailyTotal]) -> String {
    let peak = series.iter().map(|day| day.minutes).max().unwrap_or(0);
    series
        .iter()
        .map(|day| {
            let width = if peak == 0 {
                0
            } else {
                (day.minutes * BAR_WIDTH).div_ceil(peak)
            };
            format!(
                "{} | {:<bar$} {}",
                day.label,
                "#".repeat(width as usize),
                day.minutes,
                bar = BAR_WIDTH as usize
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{bar_chart, entry_row};
    use chrono::NaiveDate;
    use focusmate_core::{DailyTotal, Entry};

    #[test]
    fn entry_row_uses_dash_for_missing_remark() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let row = entry_row(&Entry::new("e1", "Maths", 25, "", date));
        assert!(row.contains("25 min"));
        assert!(row.ends_with("—"));
    }

    #[test]
    fn bar_chart_scales_to_peak_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let series = vec![
            DailyTotal {
                date,
                label: "01-09".to_string(),
                minutes: 0,
            },
            DailyTotal {
                date,
                label: "01-10".to_string(),
                minutes: 55,
            },
        ];
        let chart = bar_chart(&series);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(!lines[0].contains('#'));
        assert_eq!(lines[1].matches('#').count(), 40);
        assert!(lines[1].ends_with("55"));
    }
}

use chrono::NaiveDate;
use focusmate_core::{analyze_progress, canned_response, Entry, USAGE_PROMPT};

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
}

fn entry(subject: &str, minutes: u32, day: &str) -> Entry {
    Entry {
        id: format!("{subject}-{day}-{minutes}"),
        subject: subject.to_string(),
        minutes,
        remarks: String::new(),
        date: day.to_string(),
    }
}

#[test]
fn blank_question_returns_usage_prompt() {
    assert_eq!(canned_response(""), USAGE_PROMPT);
    assert_eq!(canned_response("   "), USAGE_PROMPT);
}

#[test]
fn exam_question_returns_active_recall_tip() {
    let answer = canned_response("How to study for exams?");
    assert!(answer.contains("active recall"));
}

#[test]
fn keyword_groups_match_case_insensitively_in_priority_order() {
    assert!(canned_response("I can't CONCENTRATE").contains("Pomodoro"));
    assert!(canned_response("Need motivation").contains("tiny habits"));
    assert!(canned_response("Help me schedule my week").contains("Block your calendar"));
    // "focus" outranks "exams".
    assert!(canned_response("focus during exams").contains("Pomodoro"));
}

#[test]
fn unmatched_question_returns_fallback_tip() {
    assert!(canned_response("what is the weather").contains("Consistency beats intensity"));
}

#[test]
fn analyze_without_entries_asks_for_first_session() {
    assert!(analyze_progress(&[], reference()).starts_with("No entries yet"));
}

#[test]
fn analyze_with_only_old_entries_reports_no_recent_sessions() {
    let entries = vec![entry("Maths", 25, "2024-01-01"), entry("Art", 10, "2024-02-15")];
    assert_eq!(
        analyze_progress(&entries, reference()),
        "No sessions in the last 30 days."
    );
}

#[test]
fn analyze_averages_per_active_day() {
    let entries = vec![
        entry("Maths", 50, "2024-03-31"),
        entry("Physics", 15, "2024-03-31"),
        entry("Chemistry", 20, "2024-03-30"),
        entry("Maths", 10, "2023-12-01"),
    ];

    let message = analyze_progress(&entries, reference());
    assert_eq!(
        message,
        "In the last 30 days you logged 85 minutes (avg 43 min/day). \
         Your most-studied subject: Maths. \
         Consider adding short daily sessions for subjects you study less: Physics, Chemistry. \
         Keep using short focused sessions and review weekly."
    );
}

#[test]
fn analyze_with_single_subject_lists_it_as_weak_too() {
    let entries = vec![entry("Maths", 25, "2024-03-31")];
    let message = analyze_progress(&entries, reference());

    assert!(message.contains("most-studied subject: Maths."));
    assert!(message.contains("subjects you study less: Maths."));
    assert!(message.contains("avg 25 min/day"));
}

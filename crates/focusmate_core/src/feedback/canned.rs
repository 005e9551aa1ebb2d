//! Keyword-matched study tips.

/// Shown when the question is blank.
pub const USAGE_PROMPT: &str =
    "Type a question like 'How to study for exams?' or press Analyze progress.";

const FALLBACK_TIP: &str = "Here's a tip: set one clear goal per session, track time, and write one sentence of reflection. Consistency beats intensity.";

/// Keyword groups in priority order. The first group with any keyword
/// contained in the normalized question wins.
const KEYWORD_TIPS: &[(&[&str], &str)] = &[
    (
        &["focus", "concentr"],
        "Try the Pomodoro method: 25 min focused, 5 min break. Remove distractions, put phone in another room, and set a clear goal for each session.",
    ),
    (
        &["motiva", "habit"],
        "Build tiny habits: start with just 10 minutes daily. Gradually increase. Celebrate small wins and review weekly.",
    ),
    (
        &["exams"],
        "Prioritize active recall: quiz yourself, use flashcards, and practice past papers under timed conditions.",
    ),
    (
        &["schedule"],
        "Block your calendar: assign subjects to time blocks. Alternate difficult and easy subjects for mental variety.",
    ),
];

/// Returns the canned tip for `query`.
///
/// The query is trimmed and lower-cased before substring matching; a blank
/// query returns [`USAGE_PROMPT`].
pub fn canned_response(query: &str) -> String {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        return USAGE_PROMPT.to_string();
    }

    KEYWORD_TIPS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| normalized.contains(keyword)))
        .map_or(FALLBACK_TIP, |(_, tip)| *tip)
        .to_string()
}

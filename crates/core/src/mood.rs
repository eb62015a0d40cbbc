//! The 1-10 mood scale: validation, emoji labels, and weekly averages.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest valid mood rating.
pub const MOOD_MIN: i32 = 1;

/// Highest valid mood rating.
pub const MOOD_MAX: i32 = 10;

/// Emoji labels for ratings 1 through 10, in order.
const MOOD_LABELS: [&str; 10] = [
    "\u{1F630} Terrible",   // 😰
    "\u{1F61E} Bad",        // 😞
    "\u{1F610} Meh",        // 😐
    "\u{1F642} Okay",       // 🙂
    "\u{1F60A} Good",       // 😊
    "\u{1F604} Great",      // 😄
    "\u{1F929} Amazing",    // 🤩
    "\u{1F973} Fantastic",  // 🥳
    "\u{2728} Incredible",  // ✨
    "\u{1F31F} Perfect",    // 🌟
];

/// Label shown when no mood has been recorded.
pub const NO_MOOD_LABEL: &str = "\u{1F636} No mood set"; // 😶

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// Validate that a mood rating is within the 1-10 scale.
pub fn validate_mood_rating(rating: i32) -> Result<(), String> {
    if (MOOD_MIN..=MOOD_MAX).contains(&rating) {
        Ok(())
    } else {
        Err(format!(
            "Mood rating must be between {MOOD_MIN} and {MOOD_MAX}, got {rating}."
        ))
    }
}

/// The emoji label for a mood rating, or [`NO_MOOD_LABEL`] when absent.
///
/// Out-of-range ratings also fall back to [`NO_MOOD_LABEL`]; the database
/// check constraint makes that unreachable for persisted entries.
pub fn mood_emoji(rating: Option<i32>) -> &'static str {
    match rating {
        Some(r) if (MOOD_MIN..=MOOD_MAX).contains(&r) => MOOD_LABELS[(r - 1) as usize],
        _ => NO_MOOD_LABEL,
    }
}

/// Arithmetic mean of mood ratings, rounded to one decimal place.
///
/// Returns `None` for an empty slice -- a week with no rated entries has
/// no average, which is not the same as an average of zero.
pub fn average_mood(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    let mean = sum as f64 / ratings.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

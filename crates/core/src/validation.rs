//! Field validation for accounts, categories, and daily entries.
//!
//! These checks mirror the storage-level constraints so users get a clear
//! message instead of a raw constraint violation. Everything here returns
//! `Result<(), String>` with a user-facing explanation.

use std::sync::OnceLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 30;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum category name length (after trimming).
pub const MIN_CATEGORY_NAME_LENGTH: usize = 2;

/// Maximum category name length.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Minimum entry title length, enforced only when a title is present.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Maximum entry title length.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Minimum win content length, enforced only when content is present.
pub const MIN_CONTENT_LENGTH: usize = 5;

/// Minimum gratitude text length, enforced only when present.
pub const MIN_GRATITUDE_LENGTH: usize = 5;

fn username_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid regex"))
}

fn hex_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid regex"))
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Validate a username: letters, numbers, and underscores, 3-30 characters.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(format!(
            "Username must be at least {MIN_USERNAME_LENGTH} characters long."
        ));
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(format!(
            "Username cannot be longer than {MAX_USERNAME_LENGTH} characters."
        ));
    }
    if !username_regex().is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores (_).".to_string());
    }
    Ok(())
}

/// Validate a password: at least 8 characters, with a letter and a number.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long."
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number (0-9).".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err("Password must contain at least one letter (a-z or A-Z).".to_string());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Validate and normalize a category name. Returns the trimmed name.
pub fn validate_category_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.len() < MIN_CATEGORY_NAME_LENGTH {
        return Err(format!(
            "Category name must be at least {MIN_CATEGORY_NAME_LENGTH} characters long."
        ));
    }
    if trimmed.len() > MAX_CATEGORY_NAME_LENGTH {
        return Err(format!(
            "Category name cannot be longer than {MAX_CATEGORY_NAME_LENGTH} characters."
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a hex color string like `#007bff`.
pub fn validate_hex_color(color: &str) -> Result<(), String> {
    if hex_color_regex().is_match(color) {
        Ok(())
    } else {
        Err(format!(
            "Color must be a valid hex code (e.g., #007bff), got '{color}'."
        ))
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Validate the content fields of a daily entry.
///
/// An entry must carry at least one of: title, content, gratitude text, or
/// a mood rating. Minimum lengths apply only to fields that are non-empty,
/// measured after trimming.
pub fn validate_entry_fields(
    title: Option<&str>,
    content: Option<&str>,
    gratitude_text: Option<&str>,
    mood_rating: Option<i32>,
) -> Result<(), String> {
    let title = title.map(str::trim).unwrap_or("");
    let content = content.map(str::trim).unwrap_or("");
    let gratitude = gratitude_text.map(str::trim).unwrap_or("");

    if title.is_empty() && content.is_empty() && gratitude.is_empty() && mood_rating.is_none() {
        return Err(
            "Your entry seems to be empty! Please add at least one of the following: \
             a title, your wins, a gratitude note, or your mood."
                .to_string(),
        );
    }

    if !title.is_empty() && title.len() < MIN_TITLE_LENGTH {
        return Err(format!(
            "Title should be at least {MIN_TITLE_LENGTH} characters long."
        ));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title cannot be longer than {MAX_TITLE_LENGTH} characters."
        ));
    }
    if !content.is_empty() && content.len() < MIN_CONTENT_LENGTH {
        return Err(format!(
            "Please write at least {MIN_CONTENT_LENGTH} characters about your wins."
        ));
    }
    if !gratitude.is_empty() && gratitude.len() < MIN_GRATITUDE_LENGTH {
        return Err(format!(
            "Please write at least {MIN_GRATITUDE_LENGTH} characters about what you're grateful for."
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

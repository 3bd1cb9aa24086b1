use crate::error::{CoreError, CoreResult};
use regex::Regex;
use std::sync::OnceLock;

pub const MIN_IDENTIFIER_LEN: usize = 2;
pub const MAX_IDENTIFIER_LEN: usize = 255;

// Naming rule of the downstream template format.
const IDENTIFIER_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9]{1,254}$";

fn identifier_regex() -> CoreResult<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IDENTIFIER_PATTERN).ok())
        .as_ref()
        .ok_or_else(|| CoreError::InvalidInput("Regex compilation failed".to_string()))
}

pub fn is_valid_identifier(id: &str) -> bool {
    identifier_regex().map(|re| re.is_match(id)).unwrap_or(false)
}

pub fn validate_identifier(id: &str) -> CoreResult<()> {
    if identifier_regex()?.is_match(id) {
        return Ok(());
    }
    Err(CoreError::InvalidIdentifierFormat {
        identifier: id.to_string(),
        reason: rejection_reason(id).to_string(),
    })
}

fn rejection_reason(id: &str) -> &'static str {
    let len = id.chars().count();
    if len < MIN_IDENTIFIER_LEN {
        "too short (minimum 2 characters)"
    } else if len > MAX_IDENTIFIER_LEN {
        "too long (maximum 255 characters)"
    } else if !id.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        "must start with a letter"
    } else {
        "only ASCII letters and digits are allowed"
    }
}

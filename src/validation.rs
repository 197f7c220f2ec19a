use crate::model::{IngredientEntry, IngredientErrors, StepEntry};

pub const TITLE_MAX_CHARS: usize = 100;
pub const COOKING_TIME_MIN: f64 = 1.0;
/// Minutes in a day
pub const COOKING_TIME_MAX: f64 = 1440.0;
pub const SERVINGS_MIN: f64 = 1.0;
pub const SERVINGS_MAX: f64 = 100.0;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*";

pub fn validate_title(value: &str) -> String {
    if value.trim().is_empty() {
        return "Recipe title is required".to_string();
    }
    if value.chars().count() > TITLE_MAX_CHARS {
        return format!("Title must not exceed {} characters", TITLE_MAX_CHARS);
    }
    String::new()
}

pub fn validate_category(value: &str) -> String {
    if value.trim().is_empty() {
        return "Category is required".to_string();
    }
    String::new()
}

pub fn validate_cooking_time(value: &str) -> String {
    if value.trim().is_empty() {
        return "Cooking time is required".to_string();
    }
    let Some(minutes) = parse_number(value) else {
        return "Enter a number".to_string();
    };
    if minutes < COOKING_TIME_MIN {
        return "Cooking time must be at least 1 minute".to_string();
    }
    if minutes > COOKING_TIME_MAX {
        return "Cooking time cannot exceed 24 hours (1440 minutes)".to_string();
    }
    String::new()
}

pub fn validate_servings(value: &str) -> String {
    if value.trim().is_empty() {
        return "Number of servings is required".to_string();
    }
    let Some(servings) = parse_number(value) else {
        return "Enter a number".to_string();
    };
    if servings < SERVINGS_MIN {
        return "There must be at least 1 serving".to_string();
    }
    if servings > SERVINGS_MAX {
        return "No more than 100 servings".to_string();
    }
    String::new()
}

/// Checks length, uppercase, digit and special character in that order and
/// reports the first one that fails.
pub fn validate_password(password: &str) -> String {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN_CHARS
        );
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return "Password must contain at least one uppercase letter".to_string();
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return "Password must contain at least one digit".to_string();
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        return format!(
            "Password must contain at least one special character ({})",
            PASSWORD_SPECIAL_CHARS
        );
    }
    String::new()
}

pub fn validate_confirm_password(password: &str, confirm_password: &str) -> String {
    if password != confirm_password {
        return "Passwords do not match".to_string();
    }
    String::new()
}

pub fn validate_username(value: &str) -> String {
    if value.trim().is_empty() {
        return "Username is required".to_string();
    }
    String::new()
}

/// Same acceptance rule as a browser `type=email` input: something before
/// and after a single `@`, no whitespace.
pub fn validate_email(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return "Email is required".to_string();
    }
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return "Please enter a valid email".to_string();
    }
    String::new()
}

pub fn validate_ingredient(entry: &IngredientEntry) -> IngredientErrors {
    let mut errors = IngredientErrors::default();
    if entry.name.trim().is_empty() {
        errors.name = "Ingredient name is required".to_string();
    }
    if !parse_number(&entry.amount).is_some_and(|amount| amount > 0.0) {
        errors.amount = "Enter a valid amount".to_string();
    }
    errors
}

pub fn validate_step(step: &StepEntry) -> String {
    if step.description.trim().is_empty() {
        return "Step description is required".to_string();
    }
    String::new()
}

/// Read the leading decimal number of `value`, ignoring trailing text
/// (`"12 min"` reads as 12). An exponent is read only when digits follow it.
/// `None` when no number leads the string.
pub fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let mut end = usize::from(value.starts_with(['+', '-']));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end).copied(), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1).copied(), Some(b'+' | b'-')));
        let exp_digits = count_digits(bytes.get(end + 1 + sign..).unwrap_or_default());
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }
    value[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Integer prefix of a number input, or an empty string when there is none.
/// Digit runs too long for an `i64` are kept as typed so range checks still
/// reject them.
pub fn normalize_integer_input(value: &str) -> String {
    let trimmed = value.trim_start();
    let negative = trimmed.starts_with('-');
    let digits_start = usize::from(trimmed.starts_with(['+', '-']));
    let digits: String = trimmed[digits_start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return String::new();
    }
    match digits.parse::<i64>() {
        Ok(n) if negative => (-n).to_string(),
        Ok(n) => n.to_string(),
        Err(_) => {
            let digits = digits.trim_start_matches('0');
            if negative {
                format!("-{}", digits)
            } else {
                digits.to_string()
            }
        }
    }
}

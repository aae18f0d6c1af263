//! Field Validators
//!
//! Pure checks shared by the auth forms and the onboarding wizard.
//!
//! There is a single password policy for every password the client creates:
//! at least 8 characters with an uppercase letter, a lowercase letter, a digit
//! and one of `!@#$%^&*(),.?":{}|<>`. Login does not apply it; existing
//! credentials are the backend's concern.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("username regex is valid"));

/// Characters accepted as "special" by the password policy
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const PASSWORD_MIN_LENGTH: usize = 8;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 3-20 characters of letters, digits and underscores
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// A positive, finite amount
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Parse user input as an amount, accepting only valid ones
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| is_valid_amount(*amount))
}

/// One rule of the password policy, in the order they are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    Length,
    Uppercase,
    Lowercase,
    Number,
    Special,
}

impl PasswordRule {
    pub const ALL: [PasswordRule; 5] = [
        PasswordRule::Length,
        PasswordRule::Uppercase,
        PasswordRule::Lowercase,
        PasswordRule::Number,
        PasswordRule::Special,
    ];

    /// Message shown when this rule is the first one violated
    pub fn message(self) -> &'static str {
        match self {
            PasswordRule::Length => "Password must be at least 8 characters long",
            PasswordRule::Uppercase => "Password must contain at least one uppercase letter",
            PasswordRule::Lowercase => "Password must contain at least one lowercase letter",
            PasswordRule::Number => "Password must contain at least one number",
            PasswordRule::Special => "Password must contain at least one special character",
        }
    }

    /// Checklist label
    pub fn label(self) -> &'static str {
        match self {
            PasswordRule::Length => "At least 8 characters",
            PasswordRule::Uppercase => "One uppercase letter",
            PasswordRule::Lowercase => "One lowercase letter",
            PasswordRule::Number => "One number",
            PasswordRule::Special => "One special character",
        }
    }
}

/// Which policy rules a password satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordRequirements {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub special: bool,
}

impl PasswordRequirements {
    pub fn check(password: &str) -> Self {
        Self {
            length: password.chars().count() >= PASSWORD_MIN_LENGTH,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| PASSWORD_SPECIALS.contains(c)),
        }
    }

    pub fn is_met(&self, rule: PasswordRule) -> bool {
        match rule {
            PasswordRule::Length => self.length,
            PasswordRule::Uppercase => self.uppercase,
            PasswordRule::Lowercase => self.lowercase,
            PasswordRule::Number => self.number,
            PasswordRule::Special => self.special,
        }
    }

    pub fn met_count(&self) -> usize {
        PasswordRule::ALL.iter().filter(|rule| self.is_met(**rule)).count()
    }

    pub fn first_violation(&self) -> Option<PasswordRule> {
        PasswordRule::ALL.into_iter().find(|rule| !self.is_met(*rule))
    }

    pub fn all_met(&self) -> bool {
        self.first_violation().is_none()
    }
}

/// Check a new password against the policy, returning the message to display.
pub fn validate_new_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password is required");
    }
    match PasswordRequirements::check(password).first_violation() {
        Some(rule) => Err(rule.message()),
        None => Ok(()),
    }
}

/// Strength meter bucket derived from the number of met requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl PasswordStrength {
    pub fn of(password: &str) -> Self {
        match PasswordRequirements::check(password).met_count() {
            0 | 1 => PasswordStrength::Weak,
            2 | 3 => PasswordStrength::Medium,
            4 => PasswordStrength::Strong,
            _ => PasswordStrength::VeryStrong,
        }
    }

    /// Fill percentage of the meter
    pub fn percentage(self) -> u8 {
        match self {
            PasswordStrength::Weak => 20,
            PasswordStrength::Medium => 60,
            PasswordStrength::Strong => 80,
            PasswordStrength::VeryStrong => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PasswordStrength::Weak => "Weak password",
            PasswordStrength::Medium => "Medium strength",
            PasswordStrength::Strong => "Strong password",
            PasswordStrength::VeryStrong => "Very strong password",
        }
    }
}

//! Wizard steps, their fields and per-step validation.
//!
//! Validation is a pure function of the current field values and the latest
//! uniqueness-check results; nothing here remembers earlier runs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::shared::validation::{is_valid_email, is_valid_username, validate_new_password};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    PersonalInfo = 1,
    Password = 2,
    Referral = 3,
    Preferences = 4,
    Welcome = 5,
}

impl Step {
    pub const TOTAL: u8 = 5;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::PersonalInfo => Some(Step::Password),
            Step::Password => Some(Step::Referral),
            Step::Referral => Some(Step::Preferences),
            Step::Preferences => Some(Step::Welcome),
            Step::Welcome => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::PersonalInfo => None,
            Step::Password => Some(Step::PersonalInfo),
            Step::Referral => Some(Step::Password),
            Step::Preferences => Some(Step::Referral),
            Step::Welcome => Some(Step::Preferences),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::PersonalInfo => "Tell us about yourself",
            Step::Password => "Secure your account",
            Step::Referral => "How did you hear about us?",
            Step::Preferences => "Set up your budget",
            Step::Welcome => "Welcome to Steward!",
        }
    }

    /// Fields collected on this step, in display order
    pub fn fields(self) -> &'static [Field] {
        match self {
            Step::PersonalInfo => &[
                Field::FirstName,
                Field::LastName,
                Field::Email,
                Field::Username,
                Field::Country,
                Field::PreferredName,
            ],
            Step::Password => &[Field::Password, Field::ConfirmPassword],
            Step::Referral => &[Field::ReferralSource, Field::ReferralDetails],
            Step::Preferences => &[
                Field::Currency,
                Field::Categories,
                Field::AcceptTerms,
                Field::AcceptPrivacy,
            ],
            Step::Welcome => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Username,
    Country,
    PreferredName,
    Password,
    ConfirmPassword,
    ReferralSource,
    ReferralDetails,
    Currency,
    Categories,
    AcceptTerms,
    AcceptPrivacy,
}

impl Field {
    /// Key used in the completion payload
    pub fn form_key(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Username => "username",
            Field::Country => "country",
            Field::PreferredName => "preferredName",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::ReferralSource => "referralSource",
            Field::ReferralDetails => "referralDetailsText",
            Field::Currency => "currency",
            Field::Categories => "categories",
            Field::AcceptTerms => "acceptTerms",
            Field::AcceptPrivacy => "acceptPrivacy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Email => "Email address",
            Field::Username => "Username (optional)",
            Field::Country => "Country",
            Field::PreferredName => "Preferred name (optional)",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
            Field::ReferralSource => "How did you hear about us?",
            Field::ReferralDetails => "Please specify",
            Field::Currency => "Currency",
            Field::Categories => "Spending categories",
            Field::AcceptTerms => "I accept the Terms and Conditions",
            Field::AcceptPrivacy => "I accept the Privacy Policy",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

/// `(value, label)` pairs offered on step 3
pub const REFERRAL_SOURCES: &[(&str, &str)] = &[
    ("search_engine", "Search engine"),
    ("social_media", "Social media"),
    ("friend", "Friend or family"),
    ("church", "Church or community group"),
    ("advertisement", "Advertisement"),
    ("other", "Other"),
];

/// `(key, label)` pairs offered on step 4
pub const CATEGORIES: &[(&str, &str)] = &[
    ("giving", "Giving"),
    ("groceries", "Groceries and Food"),
    ("home", "Home Expenses"),
    ("commitments", "Monthly Commitments"),
    ("travel", "Car and Travel"),
    ("personal_care", "Personal Care"),
    ("leisure", "Leisure"),
    ("other", "Other"),
];

pub const COUNTRIES: &[&str] = &[
    "South Africa",
    "Botswana",
    "Zambia",
    "Nigeria",
    "Kenya",
    "Ghana",
    "Uganda",
    "Tanzania",
    "Ethiopia",
    "Rwanda",
    "Malawi",
    "United States",
    "Canada",
    "United Kingdom",
    "Australia",
    "Brazil",
    "Mexico",
    "Philippines",
    "India",
    "Japan",
    "Other",
];

/// Everything the user has typed or picked so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub country: String,
    pub preferred_name: String,
    pub password: String,
    pub confirm_password: String,
    pub referral_source: String,
    pub referral_details: String,
    pub currency: String,
    pub categories: Vec<String>,
    pub accept_terms: bool,
    pub accept_privacy: bool,
}

impl OnboardingFields {
    /// Text value of a field; list and flag fields read as empty.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Username => &self.username,
            Field::Country => &self.country,
            Field::PreferredName => &self.preferred_name,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::ReferralSource => &self.referral_source,
            Field::ReferralDetails => &self.referral_details,
            Field::Currency => &self.currency,
            Field::Categories | Field::AcceptTerms | Field::AcceptPrivacy => "",
        }
    }

    /// Set a text field. Returns false for list and flag fields.
    pub fn set_text(&mut self, field: Field, value: String) -> bool {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Username => &mut self.username,
            Field::Country => &mut self.country,
            Field::PreferredName => &mut self.preferred_name,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
            Field::ReferralSource => &mut self.referral_source,
            Field::ReferralDetails => &mut self.referral_details,
            Field::Currency => &mut self.currency,
            Field::Categories | Field::AcceptTerms | Field::AcceptPrivacy => return false,
        };
        *slot = value;
        true
    }

    pub fn set_flag(&mut self, field: Field, value: bool) -> bool {
        match field {
            Field::AcceptTerms => self.accept_terms = value,
            Field::AcceptPrivacy => self.accept_privacy = value,
            _ => return false,
        }
        true
    }

    pub fn toggle_category(&mut self, key: &str) {
        if let Some(pos) = self.categories.iter().position(|c| c == key) {
            self.categories.remove(pos);
        } else {
            self.categories.push(key.to_string());
        }
    }

    pub fn has_category(&self, key: &str) -> bool {
        self.categories.iter().any(|c| c == key)
    }

    /// Payload values contributed by one step
    pub fn step_values(&self, step: Step) -> Vec<(&'static str, FieldValue)> {
        step.fields()
            .iter()
            .map(|field| {
                let value = match field {
                    Field::Categories => FieldValue::List(self.categories.clone()),
                    Field::AcceptTerms => FieldValue::Flag(self.accept_terms),
                    Field::AcceptPrivacy => FieldValue::Flag(self.accept_privacy),
                    Field::Password | Field::ConfirmPassword => {
                        FieldValue::Text(self.text(*field).to_string())
                    }
                    _ => FieldValue::Text(self.text(*field).trim().to_string()),
                };
                (field.form_key(), value)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

/// Outcome of the last uniqueness check for the email or username field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckState {
    #[default]
    Idle,
    Pending(String),
    Done { value: String, taken: bool },
}

impl CheckState {
    /// Whether the backend reported `value` as already registered
    pub fn is_taken(&self, value: &str) -> bool {
        matches!(self, CheckState::Done { value: checked, taken: true } if checked == value)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, CheckState::Pending(_))
    }

    /// Already checking or checked exactly this value
    pub fn covers(&self, value: &str) -> bool {
        match self {
            CheckState::Idle => false,
            CheckState::Pending(pending) => pending == value,
            CheckState::Done { value: checked, .. } => checked == value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniquenessChecks {
    pub email: CheckState,
    pub username: CheckState,
}

pub type FieldErrors = BTreeMap<Field, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepValidation {
    pub valid: bool,
    pub errors: FieldErrors,
}

pub const EMAIL_TAKEN: &str = "An account with this email already exists";
pub const USERNAME_TAKEN: &str = "This username is already taken";
pub const USERNAME_FORMAT: &str =
    "Username must be 3-20 characters, letters, numbers, and underscores only";

/// Validate one step against the current values.
pub fn validate_step(
    step: Step,
    fields: &OnboardingFields,
    checks: &UniquenessChecks,
) -> StepValidation {
    let mut errors = FieldErrors::new();
    let mut require = |field: Field, ok: bool, message: &str| {
        if !ok {
            errors.entry(field).or_insert_with(|| message.to_string());
        }
    };

    match step {
        Step::PersonalInfo => {
            require(
                Field::FirstName,
                !fields.first_name.trim().is_empty(),
                "First name is required",
            );
            require(
                Field::LastName,
                !fields.last_name.trim().is_empty(),
                "Last name is required",
            );

            let email = fields.email.trim();
            require(Field::Email, !email.is_empty(), "Email address is required");
            require(
                Field::Email,
                is_valid_email(email),
                "Please enter a valid email address",
            );
            require(Field::Email, !checks.email.is_taken(email), EMAIL_TAKEN);

            let username = fields.username.trim();
            if !username.is_empty() {
                require(Field::Username, is_valid_username(username), USERNAME_FORMAT);
                require(
                    Field::Username,
                    !checks.username.is_taken(username),
                    USERNAME_TAKEN,
                );
            }

            require(
                Field::Country,
                !fields.country.is_empty(),
                "Please select your country",
            );
        }
        Step::Password => {
            if let Err(message) = validate_new_password(&fields.password) {
                require(Field::Password, false, message);
            }
            require(
                Field::ConfirmPassword,
                !fields.confirm_password.is_empty(),
                "Please confirm your password",
            );
            require(
                Field::ConfirmPassword,
                fields.password == fields.confirm_password,
                "Passwords do not match",
            );
        }
        Step::Referral => {
            require(
                Field::ReferralSource,
                !fields.referral_source.is_empty(),
                "Please select how you heard about us",
            );
            if fields.referral_source == "other" {
                require(
                    Field::ReferralDetails,
                    !fields.referral_details.trim().is_empty(),
                    "Please specify how you heard about us",
                );
            }
        }
        Step::Preferences => {
            require(
                Field::Currency,
                !fields.currency.is_empty(),
                "Please select your currency",
            );
            require(
                Field::Categories,
                !fields.categories.is_empty(),
                "Please select at least one spending category",
            );
            require(
                Field::AcceptTerms,
                fields.accept_terms,
                "You must accept the Terms and Conditions",
            );
            require(
                Field::AcceptPrivacy,
                fields.accept_privacy,
                "You must accept the Privacy Policy",
            );
        }
        Step::Welcome => {}
    }

    StepValidation {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_one() -> OnboardingFields {
        OnboardingFields {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            country: "United Kingdom".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_step_one_valid_without_optional_fields() {
        let result = validate_step(Step::PersonalInfo, &step_one(), &UniquenessChecks::default());
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn test_step_one_first_message_wins() {
        let mut fields = step_one();
        fields.email.clear();
        let result = validate_step(Step::PersonalInfo, &fields, &UniquenessChecks::default());
        assert!(!result.valid);
        assert_eq!(result.errors[&Field::Email], "Email address is required");
    }

    #[test]
    fn test_taken_email_only_blocks_matching_value() {
        let fields = step_one();
        let mut checks = UniquenessChecks::default();
        checks.email = CheckState::Done {
            value: "someone@else.com".to_string(),
            taken: true,
        };
        assert!(validate_step(Step::PersonalInfo, &fields, &checks).valid);

        checks.email = CheckState::Done {
            value: "ada@example.com".to_string(),
            taken: true,
        };
        let result = validate_step(Step::PersonalInfo, &fields, &checks);
        assert_eq!(result.errors[&Field::Email], EMAIL_TAKEN);
    }

    #[test]
    fn test_username_format_when_present() {
        let mut fields = step_one();
        fields.username = "a!".to_string();
        let result = validate_step(Step::PersonalInfo, &fields, &UniquenessChecks::default());
        assert_eq!(result.errors[&Field::Username], USERNAME_FORMAT);
    }

    #[test]
    fn test_password_step_messages() {
        let fields = OnboardingFields {
            password: "weakpass".to_string(),
            confirm_password: "weakpas".to_string(),
            ..Default::default()
        };
        let result = validate_step(Step::Password, &fields, &UniquenessChecks::default());
        assert_eq!(
            result.errors[&Field::Password],
            "Password must contain at least one uppercase letter"
        );
        assert_eq!(result.errors[&Field::ConfirmPassword], "Passwords do not match");
    }

    #[test]
    fn test_referral_other_requires_details() {
        let mut fields = OnboardingFields {
            referral_source: "other".to_string(),
            ..Default::default()
        };
        let result = validate_step(Step::Referral, &fields, &UniquenessChecks::default());
        assert_eq!(
            result.errors[&Field::ReferralDetails],
            "Please specify how you heard about us"
        );

        fields.referral_source = "friend".to_string();
        assert!(validate_step(Step::Referral, &fields, &UniquenessChecks::default()).valid);
    }

    #[test]
    fn test_preferences_need_a_category() {
        let mut fields = OnboardingFields {
            currency: "ZAR".to_string(),
            accept_terms: true,
            accept_privacy: true,
            ..Default::default()
        };
        let result = validate_step(Step::Preferences, &fields, &UniquenessChecks::default());
        assert_eq!(
            result.errors[&Field::Categories],
            "Please select at least one spending category"
        );

        fields.toggle_category("giving");
        assert!(validate_step(Step::Preferences, &fields, &UniquenessChecks::default()).valid);
        fields.toggle_category("giving");
        assert!(fields.categories.is_empty());
    }

    #[test]
    fn test_step_values_use_form_keys() {
        let values = step_one().step_values(Step::PersonalInfo);
        let keys: Vec<&str> = values.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["firstName", "lastName", "email", "username", "country", "preferredName"]
        );
    }
}

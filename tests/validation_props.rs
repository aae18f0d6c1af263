//! Property-based tests for validators, formatting and the wizard state machine

use proptest::prelude::*;
use steward::egui_app::onboarding::{progress, transition, Field, WizardEvent, WizardState};
use steward::shared::api::LoginRequest;
use steward::shared::format::{currency_symbol, format_currency, CURRENCIES};
use steward::shared::validation::{
    is_valid_username, validate_new_password, PasswordRequirements, PasswordStrength,
};

fn currency_code() -> impl Strategy<Value = &'static str> {
    prop::sample::select(CURRENCIES.iter().map(|(code, _)| *code).collect::<Vec<_>>())
}

fn wizard_event() -> impl Strategy<Value = WizardEvent> {
    let text_field = prop::sample::select(vec![
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Username,
        Field::Country,
        Field::Password,
        Field::ConfirmPassword,
        Field::ReferralSource,
        Field::Currency,
    ]);
    prop_oneof![
        (text_field.clone(), "[a-zA-Z0-9@._!]{0,16}")
            .prop_map(|(field, value)| WizardEvent::Input { field, value }),
        text_field.prop_map(WizardEvent::Blur),
        Just(WizardEvent::Next),
        Just(WizardEvent::Back),
        Just(WizardEvent::Finish),
        Just(WizardEvent::DismissError),
        "[a-z]{3,8}".prop_map(WizardEvent::ToggleCategory),
    ]
}

proptest! {
    #[test]
    fn test_currency_always_has_symbol_and_two_decimals(
        amount in -1.0e9f64..1.0e9,
        code in currency_code(),
    ) {
        let formatted = format_currency(amount, code);
        prop_assert!(formatted.starts_with(currency_symbol(code)));
        let decimals = formatted.rsplit('.').next().unwrap_or("");
        prop_assert_eq!(decimals.len(), 2);
        prop_assert!(decimals.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_password_policy_matches_requirements(password in "\\PC{0,24}") {
        let requirements = PasswordRequirements::check(&password);
        let accepted = validate_new_password(&password).is_ok();
        prop_assert_eq!(accepted, !password.is_empty() && requirements.all_met());
    }

    #[test]
    fn test_strength_grows_with_met_rules(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        let met_a = PasswordRequirements::check(&a).met_count();
        let met_b = PasswordRequirements::check(&b).met_count();
        let pct_a = PasswordStrength::of(&a).percentage();
        let pct_b = PasswordStrength::of(&b).percentage();
        if met_a <= met_b {
            prop_assert!(pct_a <= pct_b);
        }
    }

    #[test]
    fn test_well_formed_usernames_accepted(name in "[a-zA-Z0-9_]{3,20}") {
        prop_assert!(is_valid_username(&name));
    }

    #[test]
    fn test_overlong_usernames_rejected(name in "[a-zA-Z0-9_]{21,40}") {
        prop_assert!(!is_valid_username(&name));
    }

    #[test]
    fn test_login_identifier_routing(identifier in "[a-z0-9@.]{1,20}") {
        let request = LoginRequest::from_identifier(&identifier, "pw");
        prop_assert_eq!(request.email.is_some(), identifier.contains('@'));
        prop_assert_eq!(request.username.is_some(), !identifier.contains('@'));
    }

    #[test]
    fn test_wizard_progress_stays_in_bounds(events in prop::collection::vec(wizard_event(), 0..40)) {
        let mut state = WizardState::new();
        for event in events {
            let (next, _effects) = transition(state, event);
            state = next;
            let (current, total, percent) = progress(&state);
            prop_assert!((1..=total).contains(&current));
            prop_assert!(percent > 0.0 && percent <= 100.0);
            prop_assert!(!state.submitting || state.current_step().is_some());
        }
    }
}

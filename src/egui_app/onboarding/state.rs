//! Pure wizard state machine.
//!
//! [`transition`] takes the current [`WizardState`] and one [`WizardEvent`]
//! and returns the next state plus the [`Effect`]s the driver must run. It
//! never performs I/O, so every flow can be tested without a UI or network.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use super::steps::{
    validate_step, CheckState, Field, FieldValue, OnboardingFields, Step, StepValidation,
    UniquenessChecks,
};
use crate::egui_app::navigation::Route;
use crate::shared::api::ApiResponse;
use crate::shared::error::ClientError;
use crate::shared::validation::{is_valid_email, is_valid_username};

pub const ACCOUNT_CREATION_FAILED: &str = "Account creation failed";
pub const NETWORK_FAILURE: &str = "Network error. Please check your connection and try again.";
const VERIFICATION_DEFAULT: &str =
    "Account created! Please check your email to verify your account.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RemoteField {
    Email,
    Username,
}

impl RemoteField {
    pub fn field(self) -> Field {
        match self {
            RemoteField::Email => Field::Email,
            RemoteField::Username => Field::Username,
        }
    }

    pub fn for_field(field: Field) -> Option<RemoteField> {
        match field {
            Field::Email => Some(RemoteField::Email),
            Field::Username => Some(RemoteField::Username),
            _ => None,
        }
    }

    /// Whether `value` is well-formed enough to ask the backend about
    fn is_checkable(self, value: &str) -> bool {
        match self {
            RemoteField::Email => is_valid_email(value),
            RemoteField::Username => is_valid_username(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStage {
    Step(Step),
    /// Terminal state replacing the welcome step when the backend wants the
    /// email verified first
    EmailVerification { email: String, message: String },
}

impl Default for WizardStage {
    fn default() -> Self {
        WizardStage::Step(Step::PersonalInfo)
    }
}

/// Accumulated completion payload, keyed by form key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OnboardingDraft(BTreeMap<&'static str, FieldValue>);

impl OnboardingDraft {
    fn merge(&mut self, values: Vec<(&'static str, FieldValue)>) {
        self.0.extend(values);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub stage: WizardStage,
    pub fields: OnboardingFields,
    pub draft: OnboardingDraft,
    pub checks: UniquenessChecks,
    /// Validation of the current step, recomputed after every event
    pub validation: StepValidation,
    /// Fields whose errors are shown; filled by input, blur and a blocked advance
    pub touched: BTreeSet<Field>,
    pub submitting: bool,
    pub resending: bool,
    pub banner_error: Option<String>,
    pub notice: Option<String>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default().revalidated()
    }

    pub fn current_step(&self) -> Option<Step> {
        match self.stage {
            WizardStage::Step(step) => Some(step),
            WizardStage::EmailVerification { .. } => None,
        }
    }

    pub fn can_advance(&self) -> bool {
        self.validation.valid && !self.submitting
    }

    /// Error to display for a field, if it has been touched
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if !self.touched.contains(&field) {
            return None;
        }
        self.validation.errors.get(&field).map(String::as_str)
    }

    fn check_mut(&mut self, field: RemoteField) -> &mut CheckState {
        match field {
            RemoteField::Email => &mut self.checks.email,
            RemoteField::Username => &mut self.checks.username,
        }
    }

    fn check(&self, field: RemoteField) -> &CheckState {
        match field {
            RemoteField::Email => &self.checks.email,
            RemoteField::Username => &self.checks.username,
        }
    }

    fn revalidated(mut self) -> Self {
        self.validation = match self.stage {
            WizardStage::Step(step) => validate_step(step, &self.fields, &self.checks),
            WizardStage::EmailVerification { .. } => StepValidation {
                valid: true,
                errors: BTreeMap::new(),
            },
        };
        self
    }
}

#[derive(Debug, Clone)]
pub enum WizardEvent {
    Input { field: Field, value: String },
    SetFlag { field: Field, value: bool },
    ToggleCategory(String),
    Blur(Field),
    Next,
    Back,
    Finish,
    UniquenessChecked {
        field: RemoteField,
        value: String,
        taken: bool,
    },
    SubmitCompleted(Result<ApiResponse, ClientError>),
    ResendVerification,
    ResendCompleted(Result<String, String>),
    GoToLogin,
    GoToDashboard,
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScheduleUniquenessCheck { field: RemoteField, value: String },
    CancelUniquenessCheck(RemoteField),
    SubmitOnboarding(OnboardingDraft),
    StoreSessionToken(String),
    ResendVerification { email: String },
    Navigate(Route),
}

/// Advance the wizard by one event.
pub fn transition(mut state: WizardState, event: WizardEvent) -> (WizardState, Vec<Effect>) {
    let mut effects = Vec::new();

    match event {
        WizardEvent::Input { field, value } => {
            if state.fields.set_text(field, value) {
                state.touched.insert(field);
                if let Some(remote) = RemoteField::for_field(field) {
                    effects.extend(recheck(&mut state, remote, false));
                }
            }
        }
        WizardEvent::SetFlag { field, value } => {
            if state.fields.set_flag(field, value) {
                state.touched.insert(field);
            }
        }
        WizardEvent::ToggleCategory(key) => {
            state.fields.toggle_category(&key);
            state.touched.insert(Field::Categories);
        }
        WizardEvent::Blur(field) => {
            state.touched.insert(field);
            if let Some(remote) = RemoteField::for_field(field) {
                effects.extend(recheck(&mut state, remote, true));
            }
        }
        WizardEvent::Next => {
            if let WizardStage::Step(step) = state.stage {
                if step < Step::Preferences {
                    state = advance(state, step);
                }
            }
        }
        WizardEvent::Back => {
            if let WizardStage::Step(step) = state.stage {
                if step != Step::Welcome {
                    if let Some(previous) = step.previous() {
                        debug!(from = step.number(), to = previous.number(), "wizard back");
                        state.stage = WizardStage::Step(previous);
                    }
                }
            }
        }
        WizardEvent::Finish => {
            if state.stage == WizardStage::Step(Step::Preferences) && !state.submitting {
                let validation = validate_step(Step::Preferences, &state.fields, &state.checks);
                if validation.valid {
                    state.draft.merge(state.fields.step_values(Step::Preferences));
                    state.submitting = true;
                    state.banner_error = None;
                    effects.push(Effect::SubmitOnboarding(state.draft.clone()));
                } else {
                    state.touched.extend(validation.errors.keys().copied());
                }
            }
        }
        WizardEvent::UniquenessChecked {
            field,
            value,
            taken,
        } => {
            let current = state.fields.text(field.field()).trim().to_string();
            if current == value {
                *state.check_mut(field) = CheckState::Done { value, taken };
            } else {
                debug!(?field, "discarding stale uniqueness result");
            }
        }
        WizardEvent::SubmitCompleted(result) => {
            state.submitting = false;
            effects.extend(complete(&mut state, result));
        }
        WizardEvent::ResendVerification => {
            if let WizardStage::EmailVerification { email, .. } = &state.stage {
                if !state.resending {
                    state.resending = true;
                    state.notice = None;
                    state.banner_error = None;
                    effects.push(Effect::ResendVerification {
                        email: email.clone(),
                    });
                }
            }
        }
        WizardEvent::ResendCompleted(result) => {
            state.resending = false;
            match result {
                Ok(message) => state.notice = Some(message),
                Err(message) => state.banner_error = Some(message),
            }
        }
        WizardEvent::GoToLogin => effects.push(Effect::Navigate(Route::Login)),
        WizardEvent::GoToDashboard => effects.push(Effect::Navigate(Route::Dashboard)),
        WizardEvent::DismissError => state.banner_error = None,
    }

    (state.revalidated(), effects)
}

/// Step progress as `(current, total, percent)`
pub fn progress(state: &WizardState) -> (u8, u8, f32) {
    let current = state.current_step().map_or(Step::TOTAL, Step::number);
    (
        current,
        Step::TOTAL,
        current as f32 * 100.0 / Step::TOTAL as f32,
    )
}

/// Which wizard navigation controls are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButtons {
    pub back: bool,
    pub next: bool,
    pub finish: bool,
}

impl NavButtons {
    pub fn any(self) -> bool {
        self.back || self.next || self.finish
    }
}

pub fn nav_buttons(state: &WizardState) -> NavButtons {
    match state.current_step() {
        Some(Step::Welcome) | None => NavButtons {
            back: false,
            next: false,
            finish: false,
        },
        Some(step) => NavButtons {
            back: step != Step::PersonalInfo,
            next: step < Step::Preferences,
            finish: step == Step::Preferences,
        },
    }
}

fn advance(mut state: WizardState, step: Step) -> WizardState {
    let validation = validate_step(step, &state.fields, &state.checks);
    if !validation.valid {
        state.touched.extend(validation.errors.keys().copied());
        return state;
    }
    state.draft.merge(state.fields.step_values(step));
    if let Some(next) = step.next() {
        debug!(from = step.number(), to = next.number(), "wizard forward");
        state.stage = WizardStage::Step(next);
    }
    state
}

/// Decide whether a remote field needs a new uniqueness check.
///
/// On input every change reschedules; on blur only a value that is neither
/// pending nor already checked is sent.
fn recheck(state: &mut WizardState, field: RemoteField, on_blur: bool) -> Vec<Effect> {
    let value = state.fields.text(field.field()).trim().to_string();

    if !field.is_checkable(&value) {
        let was_active = *state.check(field) != CheckState::Idle;
        *state.check_mut(field) = CheckState::Idle;
        return if on_blur && !was_active {
            Vec::new()
        } else {
            vec![Effect::CancelUniquenessCheck(field)]
        };
    }

    if on_blur && state.check(field).covers(&value) {
        return Vec::new();
    }

    *state.check_mut(field) = CheckState::Pending(value.clone());
    vec![Effect::ScheduleUniquenessCheck { field, value }]
}

fn complete(state: &mut WizardState, result: Result<ApiResponse, ClientError>) -> Vec<Effect> {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "onboarding submission failed");
            state.banner_error = Some(NETWORK_FAILURE.to_string());
            return Vec::new();
        }
    };

    let body = &response.body;
    if !body.success.unwrap_or_else(|| response.is_success()) {
        state.banner_error = Some(body.message().unwrap_or(ACCOUNT_CREATION_FAILED).to_string());
        return Vec::new();
    }

    state.draft = OnboardingDraft::default();
    if body.requires_verification() {
        let email = body
            .verification_email()
            .map(str::to_string)
            .unwrap_or_else(|| state.fields.email.trim().to_string());
        state.stage = WizardStage::EmailVerification {
            email,
            message: body.message().unwrap_or(VERIFICATION_DEFAULT).to_string(),
        };
        return Vec::new();
    }

    state.stage = WizardStage::Step(Step::Welcome);
    body.token()
        .map(|token| vec![Effect::StoreSessionToken(token.to_string())])
        .unwrap_or_default()
}

//! Onboarding Wizard
//!
//! Five-step account setup: personal info, password, referral source,
//! currency and categories, then a welcome screen (or an email verification
//! screen when the backend asks for one).
//!
//! - **`steps`** - step/field definitions and pure per-step validation
//! - **`state`** - the pure `transition(state, event) -> (state, effects)`
//! - **`debounce`** - cancel-and-replace scheduling of uniqueness checks
//! - **`controller`** - runs effects on tokio and feeds results back

pub mod controller;
pub mod debounce;
pub mod state;
pub mod steps;

pub use controller::OnboardingController;
pub use debounce::Debouncer;
pub use state::{
    nav_buttons, progress, transition, Effect, NavButtons, OnboardingDraft, RemoteField,
    WizardEvent, WizardStage, WizardState,
};
pub use steps::{validate_step, CheckState, Field, FieldValue, OnboardingFields, Step};

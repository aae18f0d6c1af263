use eframe::egui;

use crate::egui_app::onboarding::steps::{CATEGORIES, COUNTRIES, REFERRAL_SOURCES};
use crate::egui_app::onboarding::{
    nav_buttons, progress, Field, Step, WizardEvent, WizardStage,
};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::format::CURRENCIES;
use crate::shared::validation::{PasswordRequirements, PasswordRule, PasswordStrength};

const INPUT_WIDTH: f32 = 420.0;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.set_max_width(560.0);
            render_progress(ui, state);
            ui.add_space(16.0);

            styles::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                render_banner(ui, state);

                match state.onboarding.state().stage.clone() {
                    WizardStage::Step(step) => {
                        ui.heading(egui::RichText::new(step.title()).color(colors::TEXT_PRIMARY));
                        ui.add_space(12.0);
                        match step {
                            Step::PersonalInfo => render_personal_info(ui, state),
                            Step::Password => render_password(ui, state),
                            Step::Referral => render_referral(ui, state),
                            Step::Preferences => render_preferences(ui, state),
                            Step::Welcome => render_welcome(ui, state),
                        }
                    }
                    WizardStage::EmailVerification { email, message } => {
                        render_verification(ui, state, &email, &message);
                    }
                }

                render_navigation(ui, state);
            });
        });
    });
}

fn render_progress(ui: &mut egui::Ui, state: &AppState) {
    let (current, total, percent) = progress(state.onboarding.state());
    ui.label(
        egui::RichText::new(format!("Step {} of {}", current, total))
            .color(colors::TEXT_SECONDARY),
    );
    ui.add(
        egui::ProgressBar::new(percent / 100.0)
            .fill(colors::ACCENT)
            .desired_height(8.0),
    );
}

fn render_banner(ui: &mut egui::Ui, state: &mut AppState) {
    let wizard = state.onboarding.state();
    if let Some(error) = wizard.banner_error.clone() {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(error).color(colors::ERROR));
            if ui.small_button("✖").clicked() {
                state.onboarding.dispatch(WizardEvent::DismissError);
            }
        });
        ui.add_space(8.0);
    } else if let Some(notice) = &wizard.notice {
        ui.label(egui::RichText::new(notice).color(colors::SUCCESS));
        ui.add_space(8.0);
    }
}

/// Single-line input bound to a wizard field
fn text_field(ui: &mut egui::Ui, state: &mut AppState, field: Field, hint: &str) {
    ui.label(egui::RichText::new(field.label()).color(colors::TEXT_SECONDARY));
    let mut value = state.onboarding.state().fields.text(field).to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut value)
            .password(field.is_secret())
            .hint_text(hint)
            .desired_width(INPUT_WIDTH),
    );
    if response.changed() {
        state.onboarding.dispatch(WizardEvent::Input { field, value });
    }
    if response.lost_focus() {
        state.onboarding.dispatch(WizardEvent::Blur(field));
    }
    field_error(ui, state, field);
    ui.add_space(6.0);
}

fn field_error(ui: &mut egui::Ui, state: &AppState, field: Field) {
    if let Some(message) = state.onboarding.state().visible_error(field) {
        styles::field_error(ui, message);
    }
}

fn select_field(
    ui: &mut egui::Ui,
    state: &mut AppState,
    field: Field,
    options: impl Iterator<Item = (String, String)>,
) {
    ui.label(egui::RichText::new(field.label()).color(colors::TEXT_SECONDARY));
    let current = state.onboarding.state().fields.text(field).to_string();
    let options: Vec<(String, String)> = options.collect();
    let selected_label = options
        .iter()
        .find(|(value, _)| *value == current)
        .map(|(_, label)| label.clone())
        .unwrap_or_else(|| "Select...".to_string());

    let mut picked = None;
    egui::ComboBox::from_id_salt(field.form_key())
        .selected_text(selected_label)
        .width(INPUT_WIDTH)
        .show_ui(ui, |ui| {
            for (value, label) in &options {
                if ui.selectable_label(*value == current, label.as_str()).clicked() {
                    picked = Some(value.clone());
                }
            }
        });
    if let Some(value) = picked {
        state.onboarding.dispatch(WizardEvent::Input { field, value });
    }
    field_error(ui, state, field);
    ui.add_space(6.0);
}

fn render_personal_info(ui: &mut egui::Ui, state: &mut AppState) {
    text_field(ui, state, Field::FirstName, "Ada");
    text_field(ui, state, Field::LastName, "Lovelace");
    text_field(ui, state, Field::Email, "you@example.com");
    text_field(ui, state, Field::Username, "letters, numbers, underscores");
    select_field(
        ui,
        state,
        Field::Country,
        COUNTRIES.iter().map(|c| (c.to_string(), c.to_string())),
    );
    text_field(ui, state, Field::PreferredName, "What should we call you?");
}

fn render_password(ui: &mut egui::Ui, state: &mut AppState) {
    text_field(ui, state, Field::Password, "");

    let password = state.onboarding.state().fields.password.clone();
    if !password.is_empty() {
        let strength = PasswordStrength::of(&password);
        ui.add(
            egui::ProgressBar::new(f32::from(strength.percentage()) / 100.0)
                .fill(styles::strength_color(strength))
                .desired_height(6.0),
        );
        ui.label(egui::RichText::new(strength.label()).color(styles::strength_color(strength)));
    }

    let requirements = PasswordRequirements::check(&password);
    for rule in PasswordRule::ALL {
        let (mark, color) = if requirements.is_met(rule) {
            ("✔", colors::SUCCESS)
        } else {
            ("○", colors::TEXT_SECONDARY)
        };
        ui.label(egui::RichText::new(format!("{} {}", mark, rule.label())).color(color));
    }
    ui.add_space(8.0);

    text_field(ui, state, Field::ConfirmPassword, "");
}

fn render_referral(ui: &mut egui::Ui, state: &mut AppState) {
    let current = state.onboarding.state().fields.referral_source.clone();
    for (value, label) in REFERRAL_SOURCES {
        if ui.radio(current == *value, *label).clicked() {
            state.onboarding.dispatch(WizardEvent::Input {
                field: Field::ReferralSource,
                value: value.to_string(),
            });
        }
    }
    field_error(ui, state, Field::ReferralSource);

    if state.onboarding.state().fields.referral_source == "other" {
        ui.add_space(8.0);
        text_field(ui, state, Field::ReferralDetails, "Tell us more");
    }
}

fn render_preferences(ui: &mut egui::Ui, state: &mut AppState) {
    select_field(
        ui,
        state,
        Field::Currency,
        CURRENCIES
            .iter()
            .map(|(code, symbol)| (code.to_string(), format!("{} ({})", code, symbol))),
    );

    ui.label(egui::RichText::new(Field::Categories.label()).color(colors::TEXT_SECONDARY));
    ui.horizontal_wrapped(|ui| {
        for (key, label) in CATEGORIES {
            let selected = state.onboarding.state().fields.has_category(key);
            if ui.selectable_label(selected, *label).clicked() {
                state
                    .onboarding
                    .dispatch(WizardEvent::ToggleCategory(key.to_string()));
            }
        }
    });
    field_error(ui, state, Field::Categories);
    ui.add_space(8.0);

    for field in [Field::AcceptTerms, Field::AcceptPrivacy] {
        let fields = &state.onboarding.state().fields;
        let mut checked = match field {
            Field::AcceptTerms => fields.accept_terms,
            _ => fields.accept_privacy,
        };
        if ui.checkbox(&mut checked, field.label()).changed() {
            state.onboarding.dispatch(WizardEvent::SetFlag {
                field,
                value: checked,
            });
        }
        field_error(ui, state, field);
    }
}

fn render_welcome(ui: &mut egui::Ui, state: &mut AppState) {
    let name = {
        let fields = &state.onboarding.state().fields;
        if fields.preferred_name.trim().is_empty() {
            fields.first_name.trim().to_string()
        } else {
            fields.preferred_name.trim().to_string()
        }
    };
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("🎉").size(48.0));
        ui.label(
            egui::RichText::new(format!("You're all set, {}!", name))
                .size(20.0)
                .color(colors::TEXT_PRIMARY),
        );
        ui.add_space(16.0);
        if ui.add(styles::primary_button("Go to Dashboard")).clicked() {
            state.onboarding.dispatch(WizardEvent::GoToDashboard);
        }
    });
}

fn render_verification(ui: &mut egui::Ui, state: &mut AppState, email: &str, message: &str) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("📧").size(48.0));
        ui.heading(egui::RichText::new("Check Your Email").color(colors::TEXT_PRIMARY));
        ui.add_space(8.0);
        ui.label(egui::RichText::new(message).color(colors::TEXT_SECONDARY));
        ui.add_space(8.0);
        ui.label(egui::RichText::new("We've sent a verification link to:").color(colors::TEXT_SECONDARY));
        ui.label(egui::RichText::new(email).strong().color(colors::TEXT_PRIMARY));
        ui.label(
            egui::RichText::new(
                "Please check your inbox and click the verification link to complete your account setup.",
            )
            .color(colors::TEXT_SECONDARY),
        );
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            let resending = state.onboarding.state().resending;
            if ui
                .add_enabled(!resending, styles::secondary_button("Resend Verification Email"))
                .clicked()
            {
                state.onboarding.dispatch(WizardEvent::ResendVerification);
            }
            if ui.add(styles::primary_button("Go to Login")).clicked() {
                state.onboarding.dispatch(WizardEvent::GoToLogin);
            }
        });
    });
}

fn render_navigation(ui: &mut egui::Ui, state: &mut AppState) {
    let wizard = state.onboarding.state();
    let buttons = nav_buttons(wizard);
    if !buttons.any() {
        return;
    }
    let can_advance = wizard.can_advance();
    let submitting = wizard.submitting;

    ui.add_space(16.0);
    ui.separator();
    ui.horizontal(|ui| {
        if buttons.back && ui.add(styles::secondary_button("Back")).clicked() {
            state.onboarding.dispatch(WizardEvent::Back);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if buttons.next
                && ui
                    .add_enabled(can_advance, styles::primary_button("Next"))
                    .clicked()
            {
                state.onboarding.dispatch(WizardEvent::Next);
            }
            if buttons.finish {
                let label = if submitting { "Creating Account..." } else { "Finish" };
                if ui
                    .add_enabled(can_advance, styles::primary_button(label))
                    .clicked()
                {
                    state.onboarding.dispatch(WizardEvent::Finish);
                }
            }
        });
    });
}

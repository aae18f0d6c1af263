use eframe::egui;

use crate::egui_app::auth::AuthPanel;
use crate::egui_app::modal::ModalId;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

const INPUT_WIDTH: f32 = 360.0;

/// Login/registration form, or the verification panel that replaces it.
pub fn render_auth_modal(ui: &mut egui::Ui, state: &mut AppState) {
    if let AuthPanel::Verification { message, email } = state.auth_state.panel.clone() {
        render_verification_panel(ui, state, &message, email.as_deref());
        return;
    }

    let focus = state.modals.take_focus_request() == Some(ModalId::Auth);

    if let Some(ref error) = state.auth_state.error {
        ui.label(egui::RichText::new(error).color(colors::ERROR));
        ui.add_space(8.0);
    }

    let submitted = if state.is_signup_mode {
        render_register_fields(ui, state, focus)
    } else {
        render_login_fields(ui, state, focus)
    };

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        let label = if state.is_signup_mode { "Sign Up" } else { "Login" };
        let submit = ui.add_enabled(!state.auth_state.loading, styles::primary_button(label));
        if submit.clicked() || submitted {
            if state.is_signup_mode {
                state.handle_register();
            } else {
                state.handle_login();
            }
        }

        let toggle = if state.is_signup_mode { "Back to Login" } else { "Create Account" };
        if ui.add(styles::secondary_button(toggle)).clicked() {
            state.is_signup_mode = !state.is_signup_mode;
            state.auth_state.clear_error();
        }

        if state.auth_state.loading {
            ui.spinner();
        }
    });

    if !state.is_signup_mode {
        ui.add_space(8.0);
        if ui.link("Forgot your password?").clicked() {
            state.open_forgot_password();
        }
    }
}

/// Returns true when Enter was pressed in the last field.
fn render_login_fields(ui: &mut egui::Ui, state: &mut AppState, focus: bool) -> bool {
    ui.label(egui::RichText::new("Username or email").color(colors::TEXT_SECONDARY));
    let identifier = ui.add(
        egui::TextEdit::singleline(&mut state.login_form.identifier)
            .hint_text("alice or alice@example.com")
            .desired_width(INPUT_WIDTH),
    );
    if focus {
        identifier.request_focus();
    }
    show_field_error(ui, state, "identifier");

    ui.add_space(8.0);
    ui.label(egui::RichText::new("Password").color(colors::TEXT_SECONDARY));
    let password = ui.add(
        egui::TextEdit::singleline(&mut state.login_form.password)
            .password(true)
            .desired_width(INPUT_WIDTH),
    );

    password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

fn render_register_fields(ui: &mut egui::Ui, state: &mut AppState, focus: bool) -> bool {
    let form = &mut state.register_form;
    let rows: [(&str, &'static str, &mut String, bool); 6] = [
        ("Username", "username", &mut form.username, false),
        ("First name", "first_name", &mut form.first_name, false),
        ("Last name", "last_name", &mut form.last_name, false),
        ("Email", "email", &mut form.email, false),
        ("Password", "password", &mut form.password, true),
        ("Confirm password", "confirm_password", &mut form.confirm_password, true),
    ];

    let mut enter = false;
    let errors = state.auth_state.field_errors.clone();
    for (index, (label, key, value, secret)) in rows.into_iter().enumerate() {
        ui.label(egui::RichText::new(label).color(colors::TEXT_SECONDARY));
        let response = ui.add(
            egui::TextEdit::singleline(value)
                .password(secret)
                .desired_width(INPUT_WIDTH),
        );
        if focus && index == 0 {
            response.request_focus();
        }
        if let Some(message) = errors.get(key) {
            styles::field_error(ui, message);
        }
        ui.add_space(4.0);
        enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    }
    enter
}

fn show_field_error(ui: &mut egui::Ui, state: &AppState, key: &str) {
    if let Some(message) = state.auth_state.field_errors.get(key) {
        styles::field_error(ui, message);
    }
}

fn render_verification_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    message: &str,
    email: Option<&str>,
) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("📧").size(40.0));
        ui.add_space(8.0);
        ui.label(egui::RichText::new(message).color(colors::TEXT_SECONDARY));
        if let Some(email) = email {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(email).strong().color(colors::TEXT_PRIMARY));
        }
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            if ui.add(styles::primary_button("Resend Verification Email")).clicked() {
                state.handle_resend_verification();
            }
            if ui.add(styles::secondary_button("Back to login")).clicked() {
                state.auth_state.back_to_login();
            }
        });
    });
}

pub fn render_forgot_password(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(
        egui::RichText::new("Enter your email and we'll send you a link to reset your password.")
            .color(colors::TEXT_SECONDARY),
    );
    ui.add_space(8.0);

    let response = ui.add(
        egui::TextEdit::singleline(&mut state.forgot_form.email)
            .hint_text("you@example.com")
            .desired_width(INPUT_WIDTH),
    );
    if state.modals.take_focus_request() == Some(ModalId::ForgotPassword) {
        response.request_focus();
    }
    if let Some(ref error) = state.forgot_form.error {
        styles::field_error(ui, error);
    }

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        let send = ui.add_enabled(
            !state.forgot_form.loading,
            styles::primary_button("Send Reset Link"),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if send.clicked() || enter {
            state.handle_forgot_password();
        }
        if state.forgot_form.loading {
            ui.spinner();
        }
    });
}

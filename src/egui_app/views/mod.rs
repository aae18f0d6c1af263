use eframe::egui;

use crate::egui_app::modal::ModalId;
use crate::egui_app::navigation::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub mod auth_view;
pub mod landing_view;
pub mod onboarding_view;
pub mod page_view;

/// Below this width the nav links collapse into a menu toggle
const COMPACT_WIDTH: f32 = 760.0;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            let compact = ui.available_width() < COMPACT_WIDTH;
            let signed_in = state.session().is_authenticated();
            let mut toggle_rect = None;

            ui.horizontal(|ui| {
                let brand = ui.add(
                    egui::Label::new(
                        egui::RichText::new("💰 Steward")
                            .size(20.0)
                            .strong()
                            .color(colors::TEXT_LIGHT),
                    )
                    .sense(egui::Sense::click()),
                );
                if brand.clicked() {
                    state.open_path(Route::Entry.path());
                }

                if signed_in && !compact {
                    ui.add_space(24.0);
                    render_nav_links(ui, state);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if signed_in {
                        if ui.add(styles::secondary_button("Logout")).clicked() {
                            state.logout();
                        }
                        if compact {
                            let toggle = ui.button(egui::RichText::new("☰").size(18.0));
                            if toggle.clicked() {
                                state.nav.toggle_menu();
                            }
                            toggle_rect = Some(toggle.rect);
                        }
                    } else if state.nav.current() != Route::Onboarding {
                        if ui.add(styles::primary_button("Get Started")).clicked() {
                            state.navigate(Route::Onboarding);
                        }
                        if ui.add(styles::secondary_button("Log In")).clicked() {
                            state.open_login();
                        }
                    }
                });
            });

            if signed_in && compact && state.nav.menu_open() {
                render_mobile_menu(ctx, state, toggle_rect);
            }
        });
}

fn render_nav_links(ui: &mut egui::Ui, state: &mut AppState) {
    for link in state.nav.links() {
        let text = egui::RichText::new(format!("{} {}", link.route.icon(), link.route.label()))
            .color(colors::TEXT_LIGHT);
        let button = egui::Button::new(if link.active { text.strong() } else { text })
            .fill(if link.active {
                colors::ACCENT
            } else {
                egui::Color32::TRANSPARENT
            });
        if ui.add(button).clicked() {
            state.navigate(link.route);
        }
    }
}

fn render_mobile_menu(ctx: &egui::Context, state: &mut AppState, toggle_rect: Option<egui::Rect>) {
    let area = egui::Area::new(egui::Id::new("mobile_menu"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 52.0])
        .show(ctx, |ui| {
            styles::card_frame().show(ui, |ui| {
                ui.vertical(|ui| render_nav_links(ui, state));
            });
        });

    let clicked_outside = ctx.input(|i| {
        i.pointer.any_pressed()
            && i.pointer.interact_pos().is_some_and(|pos| {
                !area.response.rect.contains(pos)
                    && !toggle_rect.is_some_and(|rect| rect.contains(pos))
            })
    });
    if clicked_outside {
        state.nav.click_outside();
    }
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::page_frame())
        .show(ctx, |ui| match state.nav.current() {
            Route::Entry | Route::Login => landing_view::render(ui, state),
            Route::Onboarding => onboarding_view::render(ui, state),
            route => page_view::render(ui, state, route),
        });
}

/// Open modals, topmost last. Escape closes every visible modal.
pub fn render_modals(ctx: &egui::Context, state: &mut AppState) {
    if state.modals.body_locked() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.close_all_modals();
        return;
    }

    for id in [ModalId::Auth, ModalId::ForgotPassword, ModalId::HowItWorks] {
        if !state.modals.is_open(id) {
            continue;
        }
        let title = state.modal_title(id);
        let response = egui::Modal::new(egui::Id::new(("modal", id.title())))
            .frame(styles::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(380.0);
                let close_clicked = ui
                    .horizontal(|ui| {
                        ui.heading(egui::RichText::new(title).color(colors::TEXT_PRIMARY));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.button("✖").clicked()
                        })
                        .inner
                    })
                    .inner;
                ui.add_space(12.0);
                match id {
                    ModalId::Auth => auth_view::render_auth_modal(ui, state),
                    ModalId::ForgotPassword => auth_view::render_forgot_password(ui, state),
                    ModalId::HowItWorks => landing_view::render_how_it_works(ui),
                }
                close_clicked
            });
        if response.inner || response.should_close() {
            state.close_modal(id);
        }
    }
}

/// Current toast, if any, in the top-right corner
pub fn render_notification(ctx: &egui::Context, state: &mut AppState) {
    let Some(notification) = state.notifier.current(std::time::Instant::now()).cloned() else {
        return;
    };

    egui::Area::new(egui::Id::new("toast"))
        .order(egui::Order::Tooltip)
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 60.0])
        .show(ctx, |ui| {
            styles::toast_frame(notification.kind).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&notification.message).color(colors::TEXT_LIGHT));
                    if ui.small_button("✖").clicked() {
                        state.notifier.dismiss();
                    }
                });
            });
        });
}

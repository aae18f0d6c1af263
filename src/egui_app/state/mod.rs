use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::egui_app::api_client::ApiClient;
use crate::egui_app::auth::{
    self, AuthOutcome, AuthPanel, AuthState, LoginForm, RegisterForm, LOGIN_SUCCESS,
};
use crate::egui_app::config::Config;
use crate::egui_app::modal::{ModalController, ModalId};
use crate::egui_app::navigation::{NavState, Route};
use crate::egui_app::notification::Notifier;
use crate::egui_app::onboarding::{OnboardingController, Step};
use crate::egui_app::session::{ClientStorage, SessionStore};
use crate::egui_app::settings::{self, SettingsContext};
use crate::shared::api::UserSettings;
use crate::shared::error::ClientError;

/// Results of background work, applied on the UI thread
#[derive(Debug)]
pub enum AppEvent {
    LoginFinished(AuthOutcome),
    RegisterFinished(AuthOutcome),
    ForgotPasswordFinished(Result<String, String>),
    ResendFinished(Result<String, String>),
    SettingsLoaded(Result<UserSettings, ClientError>),
}

/// Forgot-password modal form
#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
    pub error: Option<String>,
    pub loading: bool,
}

/// Central application state shared across egui views.
pub struct AppState {
    runtime: Runtime,
    pub config: Config,
    pub api: ApiClient,
    pub nav: NavState,
    pub modals: ModalController,
    pub notifier: Notifier,
    pub auth_state: AuthState,
    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    pub is_signup_mode: bool,
    pub forgot_form: ForgotPasswordForm,
    pub onboarding: OnboardingController,
    pub settings: SettingsContext,
    pending_redirect: Option<(Route, Instant)>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("steward-io")
            .enable_all()
            .build()?;

        let storage = match ClientStorage::open(config.data_dir()) {
            Ok(storage) => storage,
            Err(e) => {
                warn!(error = %e, "client storage unavailable, keeping session in memory");
                ClientStorage::in_memory()
            }
        };
        Ok(Self::with_runtime(runtime, config, SessionStore::new(Arc::new(storage))))
    }

    pub fn with_runtime(runtime: Runtime, config: Config, session: SessionStore) -> Self {
        let api = ApiClient::new(config.clone(), session);
        let onboarding = OnboardingController::new(api.clone(), runtime.handle().clone());
        let (events_tx, events_rx) = unbounded_channel();

        let mut state = Self {
            notifier: Notifier::new(config.notification_ttl()),
            runtime,
            config,
            api,
            nav: NavState::default(),
            modals: ModalController::new(),
            auth_state: AuthState::new(),
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            is_signup_mode: false,
            forgot_form: ForgotPasswordForm::default(),
            onboarding,
            settings: SettingsContext::new(),
            pending_redirect: None,
            events_tx,
            events_rx,
        };
        state.open_path(Route::Entry.path());
        state.prefetch_csrf_token();
        info!(
            server = %state.config.server_url(),
            authenticated = state.is_authenticated(),
            "AppState initialized"
        );
        state
    }

    pub fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// Signed in means a token is stored, however it got there.
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// Title of a modal; the auth modal follows the panel it shows.
    pub fn modal_title(&self, id: ModalId) -> &'static str {
        match id {
            ModalId::Auth => match self.auth_state.panel {
                AuthPanel::Verification { .. } => "Verify Your Email",
                AuthPanel::LoginForm if self.is_signup_mode => "Create Account",
                AuthPanel::LoginForm => id.title(),
            },
            _ => id.title(),
        }
    }

    /// Resolve a path the way a page load would: apply the entry and auth
    /// redirects before showing anything.
    pub fn open_path(&mut self, path: &str) {
        if let Some(route) = self.session().entry_redirect(path) {
            info!(to = route.path(), "already signed in, skipping entry page");
            self.navigate(route);
            return;
        }
        if let Some(route) = self.session().require_auth(path) {
            self.navigate(route);
            return;
        }
        match Route::from_path(path) {
            Some(route) => self.navigate(route),
            None => {
                warn!(path, "unknown path");
                self.navigate(Route::Entry);
            }
        }
    }

    pub fn navigate(&mut self, route: Route) {
        if route.requires_auth() && !self.session().is_authenticated() {
            warn!(to = route.path(), "not signed in, redirecting to entry");
            self.nav.navigate(Route::Entry);
            return;
        }

        match route {
            Route::Login => {
                self.nav.navigate(Route::Entry);
                self.open_login();
            }
            Route::Onboarding => {
                self.modals.close_all();
                // A finished wizard starts over; an unfinished one keeps its data
                if matches!(
                    self.onboarding.state().current_step(),
                    None | Some(Step::Welcome)
                ) {
                    self.onboarding.reset();
                }
                self.nav.navigate(route);
            }
            _ => {
                self.nav.navigate(route);
                if route.requires_auth() {
                    // Signed-in pages never sit behind the entry page's modals
                    self.close_all_modals();
                    self.load_settings();
                }
            }
        }
    }

    /// Apply finished background work. Called once per frame.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }

        self.onboarding.poll();
        if let Some(route) = self.onboarding.take_navigation() {
            self.navigate(route);
        }

        if let Some((route, at)) = self.pending_redirect {
            if Instant::now() >= at {
                self.pending_redirect = None;
                self.navigate(route);
            }
        }
    }

    fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoginFinished(outcome) | AppEvent::RegisterFinished(outcome) => {
                self.auth_state.apply(&outcome);
                if outcome == AuthOutcome::LoggedIn {
                    self.notifier.success(LOGIN_SUCCESS);
                    self.login_form.password.clear();
                    self.register_form.password.clear();
                    self.register_form.confirm_password.clear();
                    self.pending_redirect =
                        Some((Route::Dashboard, Instant::now() + self.config.redirect_delay()));
                }
            }
            AppEvent::ForgotPasswordFinished(result) => {
                self.forgot_form.loading = false;
                match result {
                    Ok(message) => {
                        self.notifier.success(message);
                        self.close_forgot_password();
                    }
                    Err(message) => self.forgot_form.error = Some(message),
                }
            }
            AppEvent::ResendFinished(result) => match result {
                Ok(message) => self.notifier.success(message),
                Err(message) => self.notifier.error(message),
            },
            AppEvent::SettingsLoaded(result) => {
                if let Some(route) = self.settings.apply(result) {
                    self.nav.navigate(route);
                }
            }
        }
    }

    pub fn open_login(&mut self) {
        self.auth_state.clear_error();
        self.auth_state.back_to_login();
        self.is_signup_mode = false;
        self.modals.open(ModalId::Auth);
    }

    pub fn open_forgot_password(&mut self) {
        self.modals.open(ModalId::ForgotPassword);
    }

    /// Closing the forgot-password modal resets its form.
    pub fn close_forgot_password(&mut self) {
        self.modals.close(ModalId::ForgotPassword);
        self.forgot_form = ForgotPasswordForm::default();
    }

    pub fn close_modal(&mut self, id: ModalId) {
        if id == ModalId::ForgotPassword {
            self.close_forgot_password();
        } else {
            self.modals.close(id);
        }
    }

    pub fn close_all_modals(&mut self) {
        if self.modals.close_all().contains(&ModalId::ForgotPassword) {
            self.forgot_form = ForgotPasswordForm::default();
        }
    }

    pub fn handle_login(&mut self) {
        if self.auth_state.loading {
            return;
        }
        if let Err(errors) = self.login_form.validate() {
            self.auth_state.apply(&AuthOutcome::Invalid(errors));
            return;
        }

        self.auth_state.loading = true;
        self.auth_state.clear_error();

        let api = self.api.clone();
        let form = self.login_form.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let outcome = auth::submit_login(&api, &form).await;
            let _ = tx.send(AppEvent::LoginFinished(outcome));
        });
    }

    pub fn handle_register(&mut self) {
        if self.auth_state.loading {
            return;
        }
        if let Err(errors) = self.register_form.validate() {
            self.auth_state.apply(&AuthOutcome::Invalid(errors));
            return;
        }

        self.auth_state.loading = true;
        self.auth_state.clear_error();

        let api = self.api.clone();
        let form = self.register_form.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let outcome = auth::submit_registration(&api, &form).await;
            let _ = tx.send(AppEvent::RegisterFinished(outcome));
        });
    }

    pub fn handle_forgot_password(&mut self) {
        if self.forgot_form.loading {
            return;
        }
        if self.forgot_form.email.trim().is_empty() {
            self.forgot_form.error = Some(auth::FORGOT_EMAIL_REQUIRED.to_string());
            return;
        }

        self.forgot_form.loading = true;
        self.forgot_form.error = None;

        let api = self.api.clone();
        let email = self.forgot_form.email.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = auth::submit_forgot_password(&api, &email).await;
            let _ = tx.send(AppEvent::ForgotPasswordFinished(result));
        });
    }

    /// Resend from the login modal's verification panel
    pub fn handle_resend_verification(&mut self) {
        let AuthPanel::Verification {
            email: Some(email), ..
        } = &self.auth_state.panel
        else {
            self.notifier.error("No email address to send the verification to");
            return;
        };

        let api = self.api.clone();
        let email = email.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = auth::resend_verification(&api, &email).await;
            let _ = tx.send(AppEvent::ResendFinished(result));
        });
    }

    /// Ask the backend for a CSRF token when none was configured.
    fn prefetch_csrf_token(&self) {
        if self.api.csrf_token().is_some() {
            return;
        }
        let api = self.api.clone();
        self.runtime.spawn(async move {
            match api.fetch_csrf_token().await {
                Ok(_) => debug!("csrf token fetched"),
                Err(e) => warn!(error = %e, "could not fetch csrf token"),
            }
        });
    }

    fn load_settings(&mut self) {
        if !self.settings.needs_load() {
            return;
        }
        self.settings.begin_loading();

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = settings::load_settings(&api).await;
            let _ = tx.send(AppEvent::SettingsLoaded(result));
        });
    }

    pub fn logout(&mut self) {
        self.session().clear_token();
        let api = self.api.clone();
        self.runtime.spawn(async move {
            api.logout().await;
        });

        self.auth_state = AuthState::new();
        self.login_form = LoginForm::default();
        self.settings.reset();
        self.pending_redirect = None;
        self.close_all_modals();
        self.nav.navigate(Route::Entry);
        info!("logged out");
    }

    pub fn pending_redirect(&self) -> Option<Route> {
        self.pending_redirect.map(|(route, _)| route)
    }
}

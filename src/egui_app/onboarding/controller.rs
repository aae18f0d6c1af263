use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

use super::debounce::Debouncer;
use super::state::{transition, Effect, RemoteField, WizardEvent, WizardState};
use crate::egui_app::api_client::ApiClient;
use crate::egui_app::auth;
use crate::egui_app::navigation::Route;

/// Runs the effects of the pure wizard on the tokio runtime and feeds their
/// results back as events.
///
/// All state changes happen in [`dispatch`](Self::dispatch) and
/// [`poll`](Self::poll), which the UI calls on its own thread.
pub struct OnboardingController {
    state: WizardState,
    api: ApiClient,
    runtime: Handle,
    checks: Debouncer<RemoteField>,
    events_tx: UnboundedSender<WizardEvent>,
    events_rx: UnboundedReceiver<WizardEvent>,
    navigation: Option<Route>,
}

impl OnboardingController {
    pub fn new(api: ApiClient, runtime: Handle) -> Self {
        let delay = api.config().debounce();
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            state: WizardState::new(),
            checks: Debouncer::new(runtime.clone(), delay),
            api,
            runtime,
            events_tx,
            events_rx,
            navigation: None,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Apply one event and run the resulting effects.
    pub fn dispatch(&mut self, event: WizardEvent) {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = transition(state, event);
        self.state = next;
        for effect in effects {
            self.run(effect);
        }
    }

    /// Drain finished background work. Returns how many events were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    /// Route requested by the wizard since the last call
    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    /// Start over with an empty wizard.
    pub fn reset(&mut self) {
        self.checks.cancel_all();
        self.state = WizardState::new();
        self.navigation = None;
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleUniquenessCheck { field, value } => {
                let api = self.api.clone();
                let tx = self.events_tx.clone();
                self.checks.schedule(field, async move {
                    let result = match field {
                        RemoteField::Email => api.email_exists(&value).await,
                        RemoteField::Username => api.username_exists(&value).await,
                    };
                    let taken = result.unwrap_or_else(|e| {
                        warn!(?field, error = %e, "uniqueness check failed, treating as available");
                        false
                    });
                    let _ = tx.send(WizardEvent::UniquenessChecked { field, value, taken });
                });
            }
            Effect::CancelUniquenessCheck(field) => {
                self.checks.cancel(field);
            }
            Effect::SubmitOnboarding(draft) => {
                info!(fields = draft.len(), "submitting onboarding");
                let api = self.api.clone();
                let tx = self.events_tx.clone();
                self.runtime.spawn(async move {
                    let result = api.complete_onboarding(&draft).await;
                    let _ = tx.send(WizardEvent::SubmitCompleted(result));
                });
            }
            Effect::StoreSessionToken(token) => {
                if let Err(e) = self.api.session().set_token(&token) {
                    error!(error = %e, "failed to persist session token");
                }
            }
            Effect::ResendVerification { email } => {
                let api = self.api.clone();
                let tx = self.events_tx.clone();
                self.runtime.spawn(async move {
                    let result = auth::resend_verification(&api, &email).await;
                    let _ = tx.send(WizardEvent::ResendCompleted(result));
                });
            }
            Effect::Navigate(route) => {
                self.navigation = Some(route);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::config::Config;
    use crate::egui_app::onboarding::Field;
    use crate::egui_app::session::SessionStore;
    use crate::shared::config::AppConfig;

    fn controller() -> OnboardingController {
        let config =
            Config::with_builder(AppConfig::builder().server_url("http://127.0.0.1:9")).unwrap();
        let api = ApiClient::new(config, SessionStore::in_memory());
        OnboardingController::new(api, Handle::current())
    }

    #[tokio::test]
    async fn test_go_to_login_requests_navigation() {
        let mut ctl = controller();
        ctl.dispatch(WizardEvent::GoToLogin);
        assert_eq!(ctl.take_navigation(), Some(Route::Login));
        assert_eq!(ctl.take_navigation(), None);
    }

    #[tokio::test]
    async fn test_store_token_effect_writes_session() {
        let mut ctl = controller();
        ctl.run(Effect::StoreSessionToken("jwt".to_string()));
        assert_eq!(ctl.api.session().token().as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn test_reset_clears_wizard() {
        let mut ctl = controller();
        ctl.dispatch(WizardEvent::Input {
            field: Field::FirstName,
            value: "Ada".to_string(),
        });
        ctl.reset();
        assert_eq!(ctl.state(), &WizardState::new());
    }
}

//! Modal Controller
//!
//! Tracks which overlay panels are open and whether the page body is locked
//! behind them. Views ask for a pending focus request after a modal opens so
//! the first input of that modal can grab keyboard focus.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModalId {
    /// Login form (and the verification panel that replaces it)
    Auth,
    ForgotPassword,
    HowItWorks,
}

impl ModalId {
    pub fn title(self) -> &'static str {
        match self {
            ModalId::Auth => "Welcome Back",
            ModalId::ForgotPassword => "Reset Password",
            ModalId::HowItWorks => "How It Works",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModalController {
    /// Open modals in opening order; the last one is on top
    open: Vec<ModalId>,
    focus_request: Option<ModalId>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, id: ModalId) {
        if !self.open.contains(&id) {
            self.open.push(id);
        }
        self.focus_request = Some(id);
        debug!(modal = ?id, "modal opened");
    }

    /// Close one modal, returning whether it was open.
    pub fn close(&mut self, id: ModalId) -> bool {
        let before = self.open.len();
        self.open.retain(|m| *m != id);
        if self.focus_request == Some(id) {
            self.focus_request = None;
        }
        let closed = self.open.len() != before;
        if closed {
            debug!(modal = ?id, "modal closed");
        }
        closed
    }

    /// Close every visible modal, returning the ones that were open.
    pub fn close_all(&mut self) -> Vec<ModalId> {
        self.focus_request = None;
        std::mem::take(&mut self.open)
    }

    /// A click landed on the backdrop of `id` rather than its content.
    pub fn click_backdrop(&mut self, id: ModalId) -> bool {
        self.close(id)
    }

    /// Escape closes whatever is visible.
    pub fn escape(&mut self) -> Vec<ModalId> {
        self.close_all()
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.open.contains(&id)
    }

    pub fn top(&self) -> Option<ModalId> {
        self.open.last().copied()
    }

    /// Body-level "modal-open" state
    pub fn body_locked(&self) -> bool {
        !self.open.is_empty()
    }

    /// Consume the pending request to focus the first input of a modal.
    pub fn take_focus_request(&mut self) -> Option<ModalId> {
        self.focus_request.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_locks_body_and_requests_focus() {
        let mut modals = ModalController::new();
        assert!(!modals.body_locked());

        modals.open(ModalId::Auth);
        assert!(modals.is_open(ModalId::Auth));
        assert!(modals.body_locked());
        assert_eq!(modals.take_focus_request(), Some(ModalId::Auth));
        assert_eq!(modals.take_focus_request(), None);
    }

    #[test]
    fn test_close_unlocks_body() {
        let mut modals = ModalController::new();
        modals.open(ModalId::HowItWorks);
        assert!(modals.close(ModalId::HowItWorks));
        assert!(!modals.body_locked());
        assert!(!modals.close(ModalId::HowItWorks));
    }

    #[test]
    fn test_escape_closes_everything() {
        let mut modals = ModalController::new();
        modals.open(ModalId::Auth);
        modals.open(ModalId::ForgotPassword);
        assert_eq!(modals.top(), Some(ModalId::ForgotPassword));

        let closed = modals.escape();
        assert_eq!(closed, vec![ModalId::Auth, ModalId::ForgotPassword]);
        assert!(!modals.body_locked());
    }

    #[test]
    fn test_backdrop_click_closes_only_that_modal() {
        let mut modals = ModalController::new();
        modals.open(ModalId::Auth);
        modals.open(ModalId::ForgotPassword);
        assert!(modals.click_backdrop(ModalId::ForgotPassword));
        assert!(modals.is_open(ModalId::Auth));
        assert!(modals.body_locked());
    }

    #[test]
    fn test_reopen_does_not_duplicate() {
        let mut modals = ModalController::new();
        modals.open(ModalId::Auth);
        modals.open(ModalId::Auth);
        assert_eq!(modals.close_all(), vec![ModalId::Auth]);
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::model::{AcademicRecord, Credentials};
use crate::scorecard::{ScorecardRenderer, ScorecardView};

pub const LOGIN_LABEL: &str = "Login";
pub const LOGGING_IN_LABEL: &str = "Logging in...";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";
pub const TOAST_LIFETIME_MS: i64 = 2500;

/// Result of asking the server to check credentials.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Success,
    /// The server turned the credentials down, optionally saying why.
    Rejected(Option<String>),
    /// The request never got a usable answer.
    TransportFailure,
}

#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> AuthOutcome;
    async fn fetch_profile(&self) -> Result<AcademicRecord>;
    async fn logout(&self) -> Result<()>;
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LoginForm {
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub error: Option<String>,
    /// Assistive focus should move to the error message.
    pub focus_error: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        LoginForm {
            submit_enabled: true,
            submit_label: LOGIN_LABEL,
            error: None,
            focus_error: false,
        }
    }
}

impl LoginForm {
    fn begin_submit(&mut self) {
        self.error = None;
        self.focus_error = false;
        self.submit_enabled = false;
        self.submit_label = LOGGING_IN_LABEL;
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.focus_error = true;
        self.submit_enabled = true;
        self.submit_label = LOGIN_LABEL;
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

impl Notification {
    fn new(message: &str) -> Self {
        Notification {
            message: message.to_string(),
            shown_at: Utc::now(),
        }
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now - self.shown_at < Duration::milliseconds(TOAST_LIFETIME_MS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated {
        record: AcademicRecord,
        view: ScorecardView,
    },
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoginOutcome {
    Authenticated,
    Rejected,
    NetworkError,
}

/// Snapshot handed to the rendering surface.
#[derive(Debug, Serialize, Clone)]
pub struct SessionView {
    pub authenticated: bool,
    pub login: LoginForm,
    pub scorecard: Option<ScorecardView>,
    pub notification: Option<String>,
}

pub struct SessionController {
    backend: Arc<dyn DashboardBackend>,
    renderer: ScorecardRenderer,
    state: SessionState,
    login: LoginForm,
    notification: Option<Notification>,
}

impl SessionController {
    pub fn new(backend: Arc<dyn DashboardBackend>, renderer: ScorecardRenderer) -> Self {
        SessionController {
            backend,
            renderer,
            state: SessionState::Unauthenticated,
            login: LoginForm::default(),
            notification: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub async fn submit(&mut self, credentials: &Credentials) -> LoginOutcome {
        self.login.begin_submit();
        info!("Submitting login for {}", credentials.username);

        match self.backend.authenticate(credentials).await {
            AuthOutcome::Success => self.load_scorecard().await,
            AuthOutcome::Rejected(message) => {
                let message = message.unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
                warn!("Login rejected for {}: {}", credentials.username, message);
                self.login.fail(message);
                LoginOutcome::Rejected
            }
            AuthOutcome::TransportFailure => {
                warn!("Login for {} failed in transport", credentials.username);
                self.login.fail(NETWORK_ERROR_MESSAGE.to_string());
                LoginOutcome::NetworkError
            }
        }
    }

    async fn load_scorecard(&mut self) -> LoginOutcome {
        let record = match self.backend.fetch_profile().await {
            Ok(record) => record,
            Err(e) => return self.profile_failed(&e.to_string()),
        };

        // The renderer requires a latest semester; never hand it an empty history
        if record.semesters.is_empty() {
            return self.profile_failed(&format!("profile for {} has no semesters", record.username));
        }

        match self.renderer.render(&record) {
            Ok(view) => {
                info!(
                    "{} authenticated with {} semesters",
                    record.username,
                    record.semesters.len()
                );
                self.state = SessionState::Authenticated { record, view };
                self.login = LoginForm::default();
                self.notification = Some(Notification::new(LOGIN_SUCCESS_MESSAGE));
                LoginOutcome::Authenticated
            }
            Err(e) => self.profile_failed(&e.to_string()),
        }
    }

    fn profile_failed(&mut self, reason: &str) -> LoginOutcome {
        warn!("Could not load scorecard after login: {}", reason);
        self.login.fail(NETWORK_ERROR_MESSAGE.to_string());
        LoginOutcome::NetworkError
    }

    /// Always lands back on the login view, whatever the server says.
    pub async fn logout(&mut self) {
        if let Err(e) = self.backend.logout().await {
            warn!("Logout request failed: {}", e);
        }
        self.state = SessionState::Unauthenticated;
        self.login = LoginForm::default();
        self.notification = None;
        info!("Session reset to login view");
    }

    pub fn view(&self) -> SessionView {
        let now = Utc::now();
        SessionView {
            authenticated: self.is_authenticated(),
            login: self.login.clone(),
            scorecard: match &self.state {
                SessionState::Authenticated { view, .. } => Some(view.clone()),
                SessionState::Unauthenticated => None,
            },
            notification: self
                .notification
                .as_ref()
                .filter(|n| n.is_visible(now))
                .map(|n| n.message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartRenderer, ChartSeries};
    use crate::error::DashboardError;
    use crate::model::SemesterRecord;
    use crate::ring::RingSpec;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedBackend {
        outcome: AuthOutcome,
        record: AcademicRecord,
        fetches: AtomicUsize,
        logouts: AtomicUsize,
        logout_fails: bool,
        fetch_fails: bool,
    }

    impl ScriptedBackend {
        fn new(outcome: AuthOutcome) -> Self {
            ScriptedBackend {
                outcome,
                record: record(),
                fetches: AtomicUsize::new(0),
                logouts: AtomicUsize::new(0),
                logout_fails: false,
                fetch_fails: false,
            }
        }
    }

    #[async_trait]
    impl DashboardBackend for ScriptedBackend {
        async fn authenticate(&self, _credentials: &Credentials) -> AuthOutcome {
            self.outcome.clone()
        }

        async fn fetch_profile(&self) -> Result<AcademicRecord> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fetch_fails {
                return Err(DashboardError::config("dashboard endpoint unavailable"));
            }
            Ok(self.record.clone())
        }

        async fn logout(&self) -> Result<()> {
            self.logouts.fetch_add(1, Ordering::SeqCst);
            if self.logout_fails {
                Err(DashboardError::config("logout endpoint unavailable"))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct CountingChart {
        series: Mutex<Vec<ChartSeries>>,
    }

    impl ChartRenderer for CountingChart {
        fn render(&self, series: &ChartSeries) {
            self.series.lock().push(series.clone());
        }
    }

    fn record() -> AcademicRecord {
        AcademicRecord {
            username: "aarav".to_string(),
            sgpa: 7.4,
            semesters: vec![SemesterRecord {
                sgpa: 7.4,
                total: 370.0,
                subjects: vec!["CS101".into(), "CS102".into(), "CS103".into(), "CS104".into(), "CS105".into()],
                marks: vec![70.0, 75.0, 72.0, 78.0, 75.0],
                timestamp: None,
            }],
            current_semester: Some(1),
            growth: vec![7.4],
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "aarav".to_string(),
            password: "Secret123".to_string(),
            current_semester: 1,
        }
    }

    fn controller(backend: Arc<ScriptedBackend>) -> (SessionController, Arc<CountingChart>) {
        let chart = Arc::new(CountingChart::default());
        let renderer = ScorecardRenderer::new(RingSpec::default(), chart.clone());
        (SessionController::new(backend, renderer), chart)
    }

    #[tokio::test]
    async fn test_initial_state_is_unauthenticated() {
        let (session, _) = controller(Arc::new(ScriptedBackend::new(AuthOutcome::Success)));
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert!(session.login_form().submit_enabled);
        assert!(session.view().scorecard.is_none());
    }

    #[tokio::test]
    async fn test_success_fetches_once_and_renders_once() {
        let backend = Arc::new(ScriptedBackend::new(AuthOutcome::Success));
        let (mut session, chart) = controller(backend.clone());

        let outcome = session.submit(&credentials()).await;

        assert_eq!(outcome, LoginOutcome::Authenticated);
        assert_eq!(backend.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(chart.series.lock().len(), 1);
        match session.state() {
            SessionState::Authenticated { record, view } => {
                assert_eq!(record.username, "aarav");
                assert_eq!(view.latest.label, "Sem 1");
            }
            other => panic!("expected authenticated, got {:?}", other),
        }

        let view = session.view();
        assert!(view.authenticated);
        assert_eq!(view.notification.as_deref(), Some(LOGIN_SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn test_rejection_keeps_login_and_skips_fetch() {
        let backend = Arc::new(ScriptedBackend::new(AuthOutcome::Rejected(Some(
            "Invalid username or password.".to_string(),
        ))));
        let (mut session, chart) = controller(backend.clone());

        let outcome = session.submit(&credentials()).await;

        assert_eq!(outcome, LoginOutcome::Rejected);
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert_eq!(backend.fetches.load(Ordering::SeqCst), 0);
        assert!(chart.series.lock().is_empty());

        let form = session.login_form();
        assert_eq!(form.error.as_deref(), Some("Invalid username or password."));
        assert!(form.submit_enabled);
        assert_eq!(form.submit_label, LOGIN_LABEL);
        assert!(form.focus_error);
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_fallback() {
        let backend = Arc::new(ScriptedBackend::new(AuthOutcome::Rejected(None)));
        let (mut session, _) = controller(backend);

        session.submit(&credentials()).await;
        assert_eq!(session.login_form().error.as_deref(), Some(LOGIN_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_transport_failure_shows_network_error() {
        let backend = Arc::new(ScriptedBackend::new(AuthOutcome::TransportFailure));
        let (mut session, _) = controller(backend.clone());

        let outcome = session.submit(&credentials()).await;

        assert_eq!(outcome, LoginOutcome::NetworkError);
        assert!(!session.is_authenticated());
        assert_eq!(backend.fetches.load(Ordering::SeqCst), 0);
        assert_eq!(session.login_form().error.as_deref(), Some(NETWORK_ERROR_MESSAGE));
        assert!(session.login_form().submit_enabled);
    }

    #[tokio::test]
    async fn test_retry_after_rejection_clears_error() {
        let backend = Arc::new(ScriptedBackend::new(AuthOutcome::Rejected(None)));
        let (mut session, _) = controller(backend);
        session.submit(&credentials()).await;

        let accepting: Arc<dyn DashboardBackend> = Arc::new(ScriptedBackend::new(AuthOutcome::Success));
        session.backend = accepting;
        let outcome = session.submit(&credentials()).await;

        assert_eq!(outcome, LoginOutcome::Authenticated);
        assert_eq!(session.login_form().error, None);
    }

    #[tokio::test]
    async fn test_empty_profile_stays_unauthenticated() {
        let mut backend = ScriptedBackend::new(AuthOutcome::Success);
        backend.record.semesters.clear();
        let (mut session, chart) = controller(Arc::new(backend));

        let outcome = session.submit(&credentials()).await;

        assert_eq!(outcome, LoginOutcome::NetworkError);
        assert!(!session.is_authenticated());
        assert_eq!(session.login_form().error.as_deref(), Some(NETWORK_ERROR_MESSAGE));
        assert!(chart.series.lock().is_empty());
    }

    #[tokio::test]
    async fn test_profile_fetch_failure_shows_network_error() {
        let mut backend = ScriptedBackend::new(AuthOutcome::Success);
        backend.fetch_fails = true;
        let backend = Arc::new(backend);
        let (mut session, chart) = controller(backend.clone());

        let outcome = session.submit(&credentials()).await;

        assert_eq!(outcome, LoginOutcome::NetworkError);
        assert_eq!(backend.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert_eq!(session.login_form().error.as_deref(), Some(NETWORK_ERROR_MESSAGE));
        assert!(session.login_form().submit_enabled);
        assert_eq!(session.login_form().submit_label, LOGIN_LABEL);
        assert!(chart.series.lock().is_empty());
        assert!(session.notification().is_none());
    }

    #[tokio::test]
    async fn test_logout_resets_even_when_request_fails() {
        let mut backend = ScriptedBackend::new(AuthOutcome::Success);
        backend.logout_fails = true;
        let backend = Arc::new(backend);
        let (mut session, _) = controller(backend.clone());
        session.submit(&credentials()).await;
        assert!(session.is_authenticated());

        session.logout().await;

        assert_eq!(backend.logouts.load(Ordering::SeqCst), 1);
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert_eq!(session.login_form(), &LoginForm::default());
        assert!(session.notification().is_none());
    }

    #[test]
    fn test_toast_expires() {
        let toast = Notification::new(LOGIN_SUCCESS_MESSAGE);
        assert!(toast.is_visible(toast.shown_at));
        assert!(!toast.is_visible(toast.shown_at + Duration::milliseconds(TOAST_LIFETIME_MS)));
    }
}

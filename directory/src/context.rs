// directory/src/context.rs

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use storage_gateway::{AuthGateway, Gateway, SessionEvent};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("Unknown theme: {other}")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        })
    }
}

/// Process-wide handles, created once at start-up and passed explicitly.
/// Two contexts never share state.
pub struct AppContext {
    gateway: Arc<dyn Gateway>,
    auth: Arc<dyn AuthGateway>,
    theme: Mutex<Theme>,
    session_changes: watch::Receiver<Option<SessionEvent>>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl AppContext {
    /// Builds the context and starts forwarding the auth provider's session
    /// events. Must be called inside a tokio runtime.
    pub fn start(gateway: Arc<dyn Gateway>, auth: Arc<dyn AuthGateway>) -> Self {
        let mut events = auth.subscribe();
        let (tx, rx) = watch::channel(None);
        let listener = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        debug!(user_id = %event.user_id(), "session changed");
                        if tx.send(Some(event)).is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "session listener lagged behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!("session listener stopped");
        });
        info!("application context started");

        Self {
            gateway,
            auth,
            theme: Mutex::new(Theme::default()),
            session_changes: rx,
            listener: Mutex::new(Some(listener)),
        }
    }

    pub fn gateway(&self) -> Arc<dyn Gateway> {
        Arc::clone(&self.gateway)
    }

    pub fn auth(&self) -> Arc<dyn AuthGateway> {
        Arc::clone(&self.auth)
    }

    /// The latest session event; `changed()` on the receiver waits for the
    /// next one.
    pub fn session_changes(&self) -> watch::Receiver<Option<SessionEvent>> {
        self.session_changes.clone()
    }

    pub fn theme(&self) -> Theme {
        *lock(&self.theme)
    }

    pub fn set_theme(&self, theme: Theme) {
        *lock(&self.theme) = theme;
    }

    pub fn is_listening(&self) -> bool {
        lock(&self.listener).as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the session subscription. Safe to call more than once.
    pub fn shutdown(&self) {
        if let Some(task) = lock(&self.listener).take() {
            task.abort();
            info!("application context shut down");
        }
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use storage_gateway::{InMemoryAuth, InMemoryGateway};

    fn context() -> (AppContext, Arc<InMemoryAuth>) {
        let auth = Arc::new(InMemoryAuth::new(b"test-secret".to_vec(), 3600));
        let ctx = AppContext::start(Arc::new(InMemoryGateway::new()), auth.clone());
        (ctx, auth)
    }

    #[tokio::test]
    async fn forwards_session_events() {
        let (ctx, auth) = context();
        let mut changes = ctx.session_changes();
        auth.register("admin@example.com", "secret-pass").await.unwrap();

        let session = auth.sign_in_with_password("admin@example.com", "secret-pass").await.unwrap();

        tokio::time::timeout(Duration::from_secs(1), changes.changed())
            .await
            .unwrap()
            .unwrap();
        let latest = changes.borrow().clone();
        assert_eq!(latest, Some(SessionEvent::SignedIn { user_id: session.user_id }));
    }

    #[tokio::test]
    async fn contexts_do_not_share_theme() {
        let (first, _) = context();
        let (second, _) = context();
        first.set_theme(Theme::Dark);
        assert_eq!(first.theme(), Theme::Dark);
        assert_eq!(second.theme(), Theme::System);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn shutdown_stops_the_listener() {
        let (ctx, _) = context();
        assert!(ctx.is_listening());
        ctx.shutdown();
        assert!(!ctx.is_listening());
        ctx.shutdown();
    }
}

//! The logged-in user of the dashboard.

use std::cell::RefCell;

use thiserror::Error;

use crate::{
    entities::*,
    gateways::{AuthGateway, GatewayError},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Session store: {0}")]
pub struct StoreError(pub String);

/// Persistence of the session across restarts.
pub trait SessionStore {
    fn load(&self) -> Result<Option<Session>, StoreError>;
    fn save(&self, session: &Session) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Please fill in all fields")]
    MissingCredentials,
    #[error("You are not logged in")]
    NotLoggedIn,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct SessionManager<S> {
    store: S,
    current: RefCell<Option<Session>>,
}

impl<S: SessionStore> SessionManager<S> {
    /// Restores the persisted session.
    ///
    /// An unreadable session is dropped as if nobody was logged in.
    pub fn load(store: S) -> Self {
        let current = store.load().unwrap_or_else(|err| {
            log::warn!("Unable to restore the session: {err}");
            None
        });
        if let Some(session) = &current {
            log::debug!("Restored session of {}", session.user.email);
        }
        Self {
            store,
            current: RefCell::new(current),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub async fn login<A>(&self, auth: &A, credentials: Credentials) -> Result<Session, Error>
    where
        A: AuthGateway,
    {
        let credentials = Credentials {
            email: credentials.email.trim().to_owned(),
            password: credentials.password,
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(Error::MissingCredentials);
        }
        let user = auth
            .login(&credentials)
            .await
            .inspect_err(|err| log::info!("Login of {} failed: {err}", credentials.email))?;
        let session = Session::new(user);
        self.store.save(&session)?;
        log::info!("Logged in as {}", session.user.email);
        *self.current.borrow_mut() = Some(session.clone());
        Ok(session)
    }

    pub fn logout(&self) -> Result<(), Error> {
        self.store.clear()?;
        if let Some(session) = self.current.borrow_mut().take() {
            log::info!("Logged out {}", session.user.email);
        }
        Ok(())
    }

    /// Remembers the URL of a freshly uploaded profile image.
    pub fn set_profile_image(&self, url: impl Into<String>) -> Result<Session, Error> {
        let mut session = self.current().ok_or(Error::NotLoggedIn)?;
        session.profile_image = Some(url.into());
        self.store.save(&session)?;
        *self.current.borrow_mut() = Some(session.clone());
        Ok(session)
    }
}

/// Keeps the session in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStore(RefCell<Option<Session>>);

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        Ok(self.0.borrow().clone())
    }
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        *self.0.borrow_mut() = Some(session.clone());
        Ok(())
    }
    fn clear(&self) -> Result<(), StoreError> {
        self.0.borrow_mut().take();
        Ok(())
    }
}

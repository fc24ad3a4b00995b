//! Ports to the world outside of the core.

use thiserror::Error;

use crate::{entities::*, kinds::EntityKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend could not be reached or the response could not be read.
    #[error("{0}")]
    Transport(String),
    /// The backend refused the request.
    #[error("{0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

// The admin runs on a single (browser) thread:
// none of the futures need to be `Send`.

/// REST access to the resource of one entity kind.
#[allow(async_fn_in_trait)]
pub trait EntityGateway<K: EntityKind> {
    async fn fetch_all(&self) -> Result<Vec<K::Record>>;
    async fn create(&self, payload: &K::Payload) -> Result<()>;
    async fn update(&self, id: &Id, payload: &K::Payload) -> Result<()>;
    async fn delete(&self, id: &Id) -> Result<()>;
}

impl<K, G> EntityGateway<K> for &G
where
    K: EntityKind,
    G: EntityGateway<K>,
{
    async fn fetch_all(&self) -> Result<Vec<K::Record>> {
        (**self).fetch_all().await
    }
    async fn create(&self, payload: &K::Payload) -> Result<()> {
        (**self).create(payload).await
    }
    async fn update(&self, id: &Id, payload: &K::Payload) -> Result<()> {
        (**self).update(id, payload).await
    }
    async fn delete(&self, id: &Id) -> Result<()> {
        (**self).delete(id).await
    }
}

/// Asks the user for a yes/no decision.
#[allow(async_fn_in_trait)]
pub trait ConfirmGate {
    async fn confirm(&self, message: &str) -> bool;
}

/// Signals that the aggregate counters are outdated.
pub trait StatsRefresh {
    fn refresh(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

pub trait Notify {
    fn notify(&self, notification: Notification);
}

#[allow(async_fn_in_trait)]
pub trait StatsGateway {
    async fn fetch_stats(&self) -> Result<Stats>;
}

#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<SessionUser>;
}

#[allow(async_fn_in_trait)]
pub trait AssistantGateway {
    async fn natural_query(&self, question: &str) -> Result<Answer>;
}

/// The owner of an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Transport,
    Event,
    Profile,
}

impl ImageTarget {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Event => "event",
            Self::Profile => "profile",
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ImageGateway {
    /// Uploads the image and returns its public URL.
    async fn upload_image(&self, target: ImageTarget, file_name: &str, data: Vec<u8>)
        -> Result<String>;
}

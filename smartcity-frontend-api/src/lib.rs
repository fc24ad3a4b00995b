//! HTTP adapter of the Smart City REST API.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use smartcity_core::gateways::GatewayError;

mod resources;
mod services;

pub use self::{resources::*, services::*};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Fetch(String),

    #[error("{0}")]
    Api(#[from] smartcity_boundary::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(format!("{err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Fetch(format!("Invalid response: {err}"))
    }
}

impl From<Error> for GatewayError {
    fn from(err: Error) -> Self {
        match err {
            Error::Fetch(msg) => Self::Transport(msg),
            Error::Api(err) => Self::Rejected(err.message().to_owned()),
        }
    }
}

pub async fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.bytes().await?;
    parse_json(status, &body)
}

/// Accepts any 2xx response unless it explicitly reports a failure.
pub async fn into_ack(response: Response) -> Result<()> {
    let status = response.status();
    let body = response.bytes().await?;
    parse_ack(status, &body)
}

fn parse_json<T>(status: StatusCode, body: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    // ensure we've got 2xx status
    if status.is_success() {
        Ok(serde_json::from_slice(body)?)
    } else {
        Err(parse_error(status, body))
    }
}

fn parse_ack(status: StatusCode, body: &[u8]) -> Result<()> {
    if !status.is_success() {
        return Err(parse_error(status, body));
    }
    // The body is usually the created or updated record.
    match serde_json::from_slice::<smartcity_boundary::Error>(body) {
        Ok(err) if err.success == Some(false) => {
            log::warn!("Backend reported a failure with status {status}: {err}");
            Err(err.into())
        }
        _ => Ok(()),
    }
}

fn parse_error(status: StatusCode, body: &[u8]) -> Error {
    match serde_json::from_slice::<smartcity_boundary::Error>(body) {
        Ok(err) if err.error.is_some() => err.into(),
        _ => smartcity_boundary::Error {
            success: Some(false),
            error: Some(format!("Request failed with status {status}")),
        }
        .into(),
    }
}

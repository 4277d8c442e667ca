// src/api/authenticator.rs
//! Exchanges credentials for a portal session.

use super::{parser, PortalRequest, PortalTransport};
use crate::config::PortalConfig;
use crate::error::AppError;
use crate::types::{Credentials, Session};

pub struct Authenticator<'a> {
    transport: &'a dyn PortalTransport,
    portal: &'a PortalConfig,
}

impl<'a> Authenticator<'a> {
    pub fn new(transport: &'a dyn PortalTransport, portal: &'a PortalConfig) -> Self {
        Self { transport, portal }
    }

    /// Logs in once. A failed login is final: there is no retry.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AppError> {
        log::info!("Authenticating as {}", credentials.email);

        let body = serde_json::json!({
            "email": credentials.email.as_str(),
            "password": credentials.password.expose(),
        });
        let response = self
            .transport
            .send(PortalRequest::post_json(self.portal.login_url()?, body))
            .await?;

        let session = parser::parse_login_response(response)?;
        log::info!("Successfully logged in");
        Ok(session)
    }
}

use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use tapcard_core::config::Settings;
use tapcard_core::error::CoreError;
use tapcard_service::email::{EmailSender, EmailValidator};
use tapcard_service::photo::{HttpPhotoInliner, PhotoInliner};
use tapcard_service::profile::ProfileClient;

/// Shared network collaborators, built once at startup from settings and
/// injected into the depot for handlers.
pub struct ServiceClients {
    pub profiles: ProfileClient,
    pub validator: EmailValidator,
    pub sender: EmailSender,
    pub inliner: Arc<dyn PhotoInliner>,
}

impl ServiceClients {
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let client = reqwest::Client::new();
        Self {
            profiles: ProfileClient::new(client.clone(), settings.backend.base_url.clone()),
            validator: EmailValidator::new(
                client.clone(),
                settings.email.validation_url.clone(),
                settings.email.validation_api_key.clone(),
            ),
            sender: EmailSender::new(client.clone(), settings.email.send_url.clone()),
            inliner: Arc::new(HttpPhotoInliner::new(client)),
        }
    }
}

pub struct ClientsHandler {
    pub clients: Arc<ServiceClients>,
}

#[async_trait]
impl salvo::Handler for ClientsHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let clients: Arc<ServiceClients> = self.clients.clone();
        depot.inject(clients);
    }
}

/// ## Summary
/// Retrieves the shared service clients from the depot.
///
/// ## Errors
/// Returns an error if the clients are not found in the depot.
pub fn get_clients_from_depot(depot: &salvo::Depot) -> AppResult<Arc<ServiceClients>> {
    depot
        .obtain::<Arc<ServiceClients>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Service clients not found in depot").into())
}

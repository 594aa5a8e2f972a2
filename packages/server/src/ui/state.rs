//! Shared application state.

use std::sync::Arc;

use relay_shared::time::Clock;

use crate::{
    config::RelayConfig,
    domain::{Authenticator, CredentialStore},
    infrastructure::ConnectionRegistry,
    usecase::{AuthorizeConnectionUseCase, EventRouter, IssueCredentialUseCase},
};

use super::origin::OriginPolicy;

pub struct AppState {
    pub config: RelayConfig,
    /// Live connections
    pub registry: Arc<ConnectionRegistry>,
    /// Inbound event dispatch
    pub router: Arc<EventRouter>,
    pub origin_policy: OriginPolicy,
    pub issue_credential_usecase: Arc<IssueCredentialUseCase>,
    pub authorize_connection_usecase: Arc<AuthorizeConnectionUseCase>,
}

impl AppState {
    /// Wire the registry, router and usecases around the given collaborators.
    pub fn new(
        config: RelayConfig,
        credentials: Arc<dyn CredentialStore>,
        authenticator: Arc<dyn Authenticator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let router = Arc::new(EventRouter::with_default_handlers(registry.clone(), clock));
        let origin_policy = OriginPolicy::new(config.allowed_origins.iter().cloned());

        Self {
            registry,
            router,
            origin_policy,
            issue_credential_usecase: Arc::new(IssueCredentialUseCase::new(
                authenticator,
                credentials.clone(),
            )),
            authorize_connection_usecase: Arc::new(AuthorizeConnectionUseCase::new(credentials)),
            config,
        }
    }
}

use waypoint_core::config::{AppConfig, Credentials};
use waypoint_graphql::Dispatcher;

/// Shared application state for axum handlers.
pub struct AppState {
    pub config: AppConfig,
    pub dispatcher: Dispatcher,
    /// When set, used instead of resolving credentials per request.
    pub fixed_credentials: Option<Credentials>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let dispatcher = Dispatcher::from_config(&config);
        Self::with_dispatcher(config, dispatcher)
    }

    pub fn with_dispatcher(config: AppConfig, dispatcher: Dispatcher) -> Self {
        Self {
            config,
            dispatcher,
            fixed_credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.fixed_credentials = Some(credentials);
        self
    }

    /// Credentials for the current request: config keys, then environment.
    pub fn credentials(&self) -> Credentials {
        self.fixed_credentials
            .clone()
            .unwrap_or_else(|| Credentials::resolve(&self.config))
    }
}

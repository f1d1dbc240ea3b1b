// ABOUTME: Shared application state handed to every function handler
// ABOUTME: Built once at startup; read-only afterwards

use std::sync::Arc;

use pulse_ai::ChatGateway;

use crate::mailer::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn ChatGateway>,
    pub model: String,
    pub access_code: Option<String>,
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ChatGateway>, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: model.into(),
            access_code: None,
            mailer: None,
        }
    }

    pub fn with_access_code(mut self, code: Option<String>) -> Self {
        self.access_code = code.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }
}

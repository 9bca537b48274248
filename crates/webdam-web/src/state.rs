use std::sync::Arc;

use webdam_core::{BrowserWidget, WebdamClient};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub widget: Arc<BrowserWidget>,
}

impl AppState {
    pub fn new(config: ServerConfig, client: Arc<dyn WebdamClient>) -> Self {
        let widget = BrowserWidget::new(
            client,
            config.core.widget.clone(),
            config.core.bundles.clone(),
        );
        Self {
            config: Arc::new(config),
            widget: Arc::new(widget),
        }
    }
}

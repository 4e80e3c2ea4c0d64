//! The slice of a host web application the rewriter needs: static file
//! layout and a template filter registry.

pub mod config;
pub mod registry;

pub use config::StaticConfig;
pub use registry::{FilterRegistry, TemplateFilter};

/// Host application a [`crate::rewriter::Versioned`] binds to.
pub trait Application {
    fn static_config(&self) -> &StaticConfig;

    fn template_filters(&mut self) -> &mut FilterRegistry;
}

/// Minimal standalone host: a static layout plus its filters.
#[derive(Debug, Clone)]
pub struct App {
    pub config: StaticConfig,
    pub filters: FilterRegistry,
}

impl App {
    pub fn new(config: StaticConfig) -> Self {
        Self {
            config,
            filters: FilterRegistry::new(),
        }
    }
}

impl Application for App {
    fn static_config(&self) -> &StaticConfig {
        &self.config
    }

    fn template_filters(&mut self) -> &mut FilterRegistry {
        &mut self.filters
    }
}

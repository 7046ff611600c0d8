use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// Forwards business-layer log lines to `tracing`, tagged with the component
/// that emitted them.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new("storefront")
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "storefront", component = self.component, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "storefront", component = self.component, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "storefront", component = self.component, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "storefront", component = self.component, "{}", message);
    }
}

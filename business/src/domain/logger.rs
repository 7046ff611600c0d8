/// Logging port used by the business layer.
///
/// Adapters decide where messages go; the business layer only picks the level.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}

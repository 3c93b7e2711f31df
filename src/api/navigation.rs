use tracing::info;

/// Path unauthorized users are sent to
pub const LOGIN_PATH: &str = "/login";

/// Whatever owns the current page or screen
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Records the redirect in the log and does nothing else.
/// Used when no UI is attached, e.g. from the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn redirect(&self, path: &str) {
        info!(path = %path, "Redirect requested");
    }
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn redirect(&self, path: &str) {
        self(path)
    }
}

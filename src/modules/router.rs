use log::info;

/// Navigation collaborator. The auth service only ever points it at the
/// login view after a logout; everything else about routing lives with the
/// front-end.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

/// Navigator for headless front-ends: records the intent in the log and
/// nothing else.
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate_to(&self, path: &str) {
        info!("Navigating to {}", path);
    }
}

use std::future::Future;

use siscotek_models::theme::Theme;

/// Stores the site wide theme preference.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ThemeRepository: Send + Sync + 'static {
    /// Return the stored theme, or `None` if no preference has been stored yet.
    fn get(&self) -> impl Future<Output = anyhow::Result<Option<Theme>>> + Send;

    fn set(&self, theme: Theme) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockThemeRepository {
    pub fn with_get(mut self, result: Option<Theme>) -> Self {
        self.expect_get()
            .once()
            .return_once(move || Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_set(mut self, theme: Theme) -> Self {
        self.expect_set()
            .once()
            .with(mockall::predicate::eq(theme))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }
}

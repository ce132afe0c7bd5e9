use std::future::Future;

use siscotek_models::theme::Theme;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ThemeFeatureService: Send + Sync + 'static {
    /// Return the current theme, falling back to the configured default.
    fn get_theme(&self) -> impl Future<Output = anyhow::Result<Theme>> + Send;

    fn set_theme(&self, theme: Theme) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Switch between light and dark and return the new theme.
    fn toggle_theme(&self) -> impl Future<Output = anyhow::Result<Theme>> + Send;
}

#[cfg(feature = "mock")]
impl MockThemeFeatureService {
    pub fn with_get_theme(mut self, result: Theme) -> Self {
        self.expect_get_theme()
            .once()
            .return_once(move || Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_set_theme(mut self, theme: Theme) -> Self {
        self.expect_set_theme()
            .once()
            .with(mockall::predicate::eq(theme))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_toggle_theme(mut self, result: Theme) -> Self {
        self.expect_toggle_theme()
            .once()
            .return_once(move || Box::pin(std::future::ready(Ok(result))));
        self
    }
}

use std::sync::Arc;

use anyhow::Context;
use siscotek_core_theme_contracts::ThemeFeatureService;
use siscotek_models::theme::Theme;
use siscotek_persistence_contracts::theme::ThemeRepository;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ThemeFeatureServiceImpl<ThemeRepo> {
    theme_repo: ThemeRepo,
    config: ThemeFeatureConfig,
    toggle_lock: Arc<Mutex<()>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ThemeFeatureConfig {
    pub default_theme: Theme,
}

impl Default for ThemeFeatureConfig {
    fn default() -> Self {
        Self {
            default_theme: Theme::Dark,
        }
    }
}

impl<ThemeRepo> ThemeFeatureServiceImpl<ThemeRepo> {
    pub fn new(theme_repo: ThemeRepo, config: ThemeFeatureConfig) -> Self {
        Self {
            theme_repo,
            config,
            toggle_lock: Default::default(),
        }
    }
}

impl<ThemeRepo> ThemeFeatureService for ThemeFeatureServiceImpl<ThemeRepo>
where
    ThemeRepo: ThemeRepository,
{
    async fn get_theme(&self) -> anyhow::Result<Theme> {
        self.theme_repo
            .get()
            .await
            .map(|theme| theme.unwrap_or(self.config.default_theme))
            .context("Failed to load theme preference")
    }

    async fn set_theme(&self, theme: Theme) -> anyhow::Result<()> {
        let _guard = self.toggle_lock.lock().await;
        self.theme_repo
            .set(theme)
            .await
            .context("Failed to store theme preference")
    }

    async fn toggle_theme(&self) -> anyhow::Result<Theme> {
        let _guard = self.toggle_lock.lock().await;
        let theme = self.get_theme().await?.toggled();
        self.theme_repo
            .set(theme)
            .await
            .context("Failed to store theme preference")?;
        info!(%theme, "theme toggled");
        Ok(theme)
    }
}

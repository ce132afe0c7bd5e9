use std::sync::Arc;

use siscotek_models::theme::Theme;
use siscotek_persistence_contracts::theme::ThemeRepository;
use tokio::sync::RwLock;
use tracing::debug;

/// Keeps the theme preference for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeRepository {
    theme: Arc<RwLock<Option<Theme>>>,
}

impl ThemeRepository for MemoryThemeRepository {
    async fn get(&self) -> anyhow::Result<Option<Theme>> {
        Ok(*self.theme.read().await)
    }

    async fn set(&self, theme: Theme) -> anyhow::Result<()> {
        debug!(%theme, "storing theme preference");
        *self.theme.write().await = Some(theme);
        Ok(())
    }
}

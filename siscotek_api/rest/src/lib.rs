use std::net::IpAddr;

use anyhow::Context;
use axum::Router;
use siscotek_core_contact_contracts::ContactFeatureService;
use siscotek_core_theme_contracts::ThemeFeatureService;
use tokio::net::TcpListener;
use tracing::info;

mod extractors;
mod middlewares;
mod models;
mod routes;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct RestServer<Contact, Theme> {
    contact: Contact,
    theme: Theme,
}

impl<Contact, Theme> RestServer<Contact, Theme> {
    pub fn new(contact: Contact, theme: Theme) -> Self {
        Self { contact, theme }
    }
}

impl<Contact, Theme> RestServer<Contact, Theme>
where
    Contact: ContactFeatureService,
    Theme: ThemeFeatureService,
{
    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::contact::router(self.contact.into()))
            .merge(routes::theme::router(self.theme.into()))
            .fallback(routes::not_found)
            .method_not_allowed_fallback(routes::method_not_allowed);

        // The request id must be assigned before the trace span is created.
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use siscotek_core_theme_contracts::ThemeFeatureService;
use siscotek_models::theme::Theme;

use super::internal_server_error;
use crate::extractors::ApiJson;

pub fn router(service: Arc<impl ThemeFeatureService>) -> Router<()> {
    Router::new()
        .route("/theme", routing::get(get_theme).put(set_theme))
        .route("/theme/toggle", routing::post(toggle_theme))
        .with_state(service)
}

async fn get_theme(service: State<Arc<impl ThemeFeatureService>>) -> Response {
    match service.get_theme().await {
        Ok(theme) => Json(theme).into_response(),
        Err(err) => internal_server_error(err),
    }
}

async fn set_theme(
    service: State<Arc<impl ThemeFeatureService>>,
    ApiJson(theme): ApiJson<Theme>,
) -> Response {
    match service.set_theme(theme).await {
        Ok(()) => Json(theme).into_response(),
        Err(err) => internal_server_error(err),
    }
}

async fn toggle_theme(service: State<Arc<impl ThemeFeatureService>>) -> Response {
    match service.toggle_theme().await {
        Ok(theme) => Json(theme).into_response(),
        Err(err) => internal_server_error(err),
    }
}

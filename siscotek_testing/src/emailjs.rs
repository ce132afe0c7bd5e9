//! A stand-in for the EmailJS REST API.
//!
//! Accepts messages for exactly one configured account and remembers the
//! template parameters of every accepted message.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use url::Url;

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";
pub const RECEIVED_ROUTE: &str = "/api/v1.0/email/received";

#[derive(Debug, Clone)]
pub struct EmailJsAccount {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub access_token: Option<String>,
}

pub async fn start_server(host: IpAddr, port: u16, account: EmailJsAccount) -> anyhow::Result<()> {
    info!("Starting EmailJS testing server on {host}:{port}");
    info!("Send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Accepted messages: http://{host}:{port}{RECEIVED_ROUTE}");
    info!(
        "Service id: {:?}, template id: {:?}, user id: {:?}",
        account.service_id, account.template_id, account.user_id
    );

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(Arc::new(StateInner::new(account))))
        .await
        .context("Failed to start HTTP server")
}

/// Serves the testing api on an ephemeral localhost port in the background.
pub async fn spawn(account: EmailJsAccount) -> anyhow::Result<TestServer> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind to an ephemeral port")?;
    let addr = listener.local_addr()?;

    let state = Arc::new(StateInner::new(account));
    let router = router(Arc::clone(&state));
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            warn!("EmailJS testing server stopped: {err}");
        }
    });

    Ok(TestServer { addr, state })
}

pub struct TestServer {
    addr: SocketAddr,
    state: Arc<StateInner>,
}

impl TestServer {
    pub fn send_endpoint(&self) -> anyhow::Result<Url> {
        format!("http://{}{SEND_ROUTE}", self.addr)
            .parse()
            .context("Failed to build send endpoint url")
    }

    /// The template parameters of all accepted messages, oldest first.
    pub async fn received(&self) -> Vec<serde_json::Value> {
        self.state.received.read().await.clone()
    }
}

fn router(state: Arc<StateInner>) -> Router<()> {
    Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .route(RECEIVED_ROUTE, routing::get(received))
        .with_state(state)
}

struct StateInner {
    account: EmailJsAccount,
    received: RwLock<Vec<serde_json::Value>>,
}

impl StateInner {
    fn new(account: EmailJsAccount) -> Self {
        Self {
            account,
            received: Default::default(),
        }
    }
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    template_params: serde_json::Value,
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
}

async fn send(state: State<Arc<StateInner>>, Json(request): Json<SendRequest>) -> Response {
    let account = &state.account;

    if request.user_id != account.user_id {
        return (StatusCode::BAD_REQUEST, "The Public Key is invalid").into_response();
    }
    if request.service_id != account.service_id {
        return (StatusCode::BAD_REQUEST, "The service ID is invalid").into_response();
    }
    if request.template_id != account.template_id {
        return (StatusCode::BAD_REQUEST, "The template ID is invalid").into_response();
    }
    if account.access_token.is_some() && request.access_token != account.access_token {
        return (StatusCode::FORBIDDEN, "The access token is invalid").into_response();
    }

    info!("Accepted message: {}", request.template_params);
    state.received.write().await.push(request.template_params);

    (StatusCode::OK, "OK").into_response()
}

async fn received(state: State<Arc<StateInner>>) -> Json<Vec<serde_json::Value>> {
    Json(state.received.read().await.clone())
}

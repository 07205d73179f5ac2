//! Web layer: the index page, the results page, and the two POST trigger
//! endpoints, one per load strategy.

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::loader::LoadService;

pub mod handlers;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LoadService>,
}

pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, service: LoadService) -> Result<Self> {
        let state = AppState {
            service: Arc::new(service),
        };
        let app = Self::create_router(state);
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;

        Ok(Self { app, addr })
    }

    fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/results", get(handlers::results))
            .route("/load/copy-from", post(handlers::load_copy_from))
            .route("/load/bulk-insert", post(handlers::load_bulk_insert))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }
}

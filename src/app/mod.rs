use std::{
    io,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{http::Request, http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::Settings,
    notify::{self, Notifier},
    submission::Submitter,
};

use self::{
    error::{AppError, AppResult},
    page_view::PageViews,
};

mod api;
mod error;
mod page_view;
mod ui;

#[derive(Clone)]
pub struct AppState {
    notifier: Arc<dyn Notifier>,
    page_views: PageViews,
    repository_url: String,
}

fn app_router() -> Router<AppState> {
    Router::new()
        .route("/health_check", get(health_check))
        .nest_service("/assets", ServeDir::new("assets"))
        .merge(ui::router())
        .merge(api::router())
        .fallback(ui::not_found::not_found_page)
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

pub struct App {
    listener: TcpListener,
    addr: SocketAddr,
    state: AppState,
}

impl App {
    pub async fn with(config: Settings) -> Result<Self, io::Error> {
        let page_view_ttl = config.page_view_ttl();
        let notifier = notify::from_settings(&config.notify, reqwest::Client::new());

        let listener = tokio::net::TcpListener::bind(format!(
            "{}:{}",
            config.application.host, config.application.port
        ))
        .await?;
        let addr = listener.local_addr()?;

        Ok(Self {
            listener,
            addr,
            state: AppState {
                page_views: PageViews::new(notifier.clone(), page_view_ttl),
                notifier,
                repository_url: config.application.repository_url,
            },
        })
    }

    pub fn host(&self) -> IpAddr {
        self.addr.ip()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub async fn serve(self) -> Result<(), io::Error> {
        let app = app_router().with_state(self.state).layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let id = uuid::Uuid::new_v4();
                tracing::info_span!(
                    "request",
                    method = ?request.method(),
                    uri = ?request.uri(),
                    %id,
                )
            }),
        );

        axum::serve(self.listener, app.into_make_service()).await
    }
}

/// Runs a submission on its own task so that a dropped connection cannot leave
/// the form stuck in `Sending`.
async fn submit_to_completion(submitter: Arc<Submitter>, email: String) -> AppResult<String> {
    tokio::spawn(async move { submitter.submit(email).await })
        .await
        .context("The submission task should run to completion")?
        .map_err(AppError::from)
}

//! Local Library
//!
//! A server-rendered catalog for a small lending library: authors, genres, books
//! and the physical copies of those books, browsed and edited through HTML forms.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub views: Arc<views::Views>,
}

impl AppState {
    pub fn new(config: AppConfig, services: services::Services, views: views::Views) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
            views: Arc::new(views),
        }
    }
}

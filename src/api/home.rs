//! Dashboard endpoints

use axum::{
    extract::State,
    response::{Html, Redirect},
};
use tera::Context;

use crate::{
    error::{AppError, AppResult},
    models::CATALOG_PREFIX,
    AppState,
};

pub async fn redirect_to_catalog() -> Redirect {
    Redirect::to(CATALOG_PREFIX)
}

/// Catalog home page with record counts
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    // A failed count is shown as a not-found page rather than a partial dashboard
    let counts = state.services.stats.counts().await.map_err(|e| {
        tracing::error!("Failed to count catalog records: {}", e);
        AppError::NotFound("Catalog counts are unavailable".to_string())
    })?;

    let mut context = Context::new();
    context.insert("title", "Local Library Home");
    context.insert("counts", &counts);
    state.views.render("index.html", &context)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{
        config::AppConfig,
        error::AppError,
        repository::{
            MockAuthorStore, MockBookInstanceStore, MockBookStore, MockGenreStore, Repository,
        },
        services::Services,
        views::Views,
        AppState,
    };

    #[tokio::test]
    async fn test_failed_count_renders_not_found_view() {
        let mut authors = MockAuthorStore::new();
        authors.expect_count().returning(|| Ok(3));
        let mut genres = MockGenreStore::new();
        genres
            .expect_count()
            .returning(|| Err(AppError::Internal("genres unavailable".to_string())));
        let mut books = MockBookStore::new();
        books.expect_count().returning(|_| Ok(5));
        let mut instances = MockBookInstanceStore::new();
        instances.expect_count().returning(|_| Ok(7));

        let repository = Repository::from_stores(
            Arc::new(authors),
            Arc::new(genres),
            Arc::new(books),
            Arc::new(instances),
        );
        let state = AppState::new(
            AppConfig::default(),
            Services::new(repository),
            Views::new().unwrap(),
        );

        let response = crate::api::create_router(state)
            .oneshot(Request::builder().uri("/catalog").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("Catalog counts are unavailable"));
        assert!(!body.contains("<strong>Books:</strong>"));
    }
}

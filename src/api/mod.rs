//! HTTP handlers and routing for the catalog

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod home;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ErrorPage},
    models::CATALOG_PREFIX,
    AppState,
};

/// Parse a path identifier. Anything that is not a UUID cannot name a document,
/// so it is reported as not found.
pub(crate) fn parse_id(raw: &str, kind: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("{} not found", kind)))
}

pub(crate) fn catalog_path(path: &str) -> String {
    format!("{}{}", CATALOG_PREFIX, path)
}

/// Render the error view for responses carrying an [`ErrorPage`]
pub async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    let details = page
        .details
        .as_deref()
        .filter(|_| state.config.expose_error_details());
    match state.views.render_error(&page.message, details) {
        Ok(html) => (response.status(), html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            response
        }
    }
}

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(home::index))
        // Books
        .route("/books", get(books::book_list))
        .route("/book/create", get(books::book_create_get).post(books::book_create_post))
        .route("/book/:id", get(books::book_detail))
        .route("/book/:id/delete", get(books::book_delete_get).post(books::book_delete_post))
        .route("/book/:id/update", get(books::book_update_get).post(books::book_update_post))
        // Authors
        .route("/authors", get(authors::author_list))
        .route(
            "/author/create",
            get(authors::author_create_get).post(authors::author_create_post),
        )
        .route("/author/:id", get(authors::author_detail))
        .route(
            "/author/:id/delete",
            get(authors::author_delete_get).post(authors::author_delete_post),
        )
        .route(
            "/author/:id/update",
            get(authors::author_update_get).post(authors::author_update_post),
        )
        // Genres
        .route("/genres", get(genres::genre_list))
        .route("/genre/create", get(genres::genre_create_get).post(genres::genre_create_post))
        .route("/genre/:id", get(genres::genre_detail))
        .route("/genre/:id/delete", get(genres::genre_delete_get).post(genres::genre_delete_post))
        .route("/genre/:id/update", get(genres::genre_update_get).post(genres::genre_update_post))
        // Book instances
        .route("/book-instances", get(book_instances::book_instance_list))
        .route(
            "/book-instance/create",
            get(book_instances::book_instance_create_get)
                .post(book_instances::book_instance_create_post),
        )
        .route("/book-instance/:id", get(book_instances::book_instance_detail))
        .route(
            "/book-instance/:id/delete",
            get(book_instances::book_instance_delete_get)
                .post(book_instances::book_instance_delete_post),
        )
        .route(
            "/book-instance/:id/update",
            get(book_instances::book_instance_update_get)
                .post(book_instances::book_instance_update_post),
        );

    Router::new()
        .route("/", get(home::redirect_to_catalog))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route(&format!("{}/", CATALOG_PREFIX), get(home::redirect_to_catalog))
        .nest(CATALOG_PREFIX, catalog)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), render_error_pages))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

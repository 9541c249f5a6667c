//! Genre pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tera::Context;

use crate::{
    error::AppResult,
    forms::{FieldError, FormFields, GenreForm},
    services::{genres::GenreDetail, DeleteOutcome},
    views::context::{views, BookView, GenreView},
    AppState,
};

use super::{catalog_path, parse_id};

fn render_form(
    state: &AppState,
    title: &str,
    form: &GenreForm,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("genre", form);
    context.insert("errors", errors);
    state.views.render("genre_form.html", &context)
}

fn detail_context(title: &str, detail: &GenreDetail) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("genre", &GenreView::from(&detail.genre));
    context.insert("genre_books", &views::<_, BookView>(&detail.books));
    context
}

pub async fn genre_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;

    let mut context = Context::new();
    context.insert("title", "Genre List");
    context.insert("genre_list", &views::<_, GenreView>(&genres));
    state.views.render("genre_list.html", &context)
}

pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Genre")?;
    let detail = state.services.genres.detail(id).await?;
    state
        .views
        .render("genre_detail.html", &detail_context("Genre Detail", &detail))
}

pub async fn genre_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_form(&state, "Create Genre", &GenreForm::default(), &[])
}

/// Create a genre, or redirect to the one that already carries the name
pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let submission = GenreForm::from_fields(&FormFields::from(pairs)).submit();
    match submission.outcome {
        Ok(data) => {
            let created = state.services.genres.create(&data).await?;
            Ok(Redirect::to(&created.genre().url()).into_response())
        }
        Err(errors) => {
            Ok(render_form(&state, "Create Genre", &submission.form, &errors)?.into_response())
        }
    }
}

pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Genre")?;
    let genre = state.services.genres.get(id).await?;
    render_form(&state, "Update Genre", &GenreForm::from(&genre), &[])
}

pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Genre")?;
    let submission = GenreForm::from_fields(&FormFields::from(pairs)).submit();
    match submission.outcome {
        Ok(data) => {
            let genre = state.services.genres.update(id, &data).await?;
            Ok(Redirect::to(&genre.url()).into_response())
        }
        Err(errors) => {
            Ok(render_form(&state, "Update Genre", &submission.form, &errors)?.into_response())
        }
    }
}

pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Genre")?;
    let Some(detail) = state.services.genres.find_detail(id).await? else {
        return Ok(Redirect::to(&catalog_path("/genres")).into_response());
    };
    let html = state
        .views
        .render("genre_delete.html", &detail_context("Delete Genre", &detail))?;
    Ok(html.into_response())
}

pub async fn genre_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Genre")?;
    match state.services.genres.delete(id).await? {
        DeleteOutcome::Blocked(detail) => {
            let html = state
                .views
                .render("genre_delete.html", &detail_context("Delete Genre", &detail))?;
            Ok(html.into_response())
        }
        DeleteOutcome::Deleted | DeleteOutcome::Missing => {
            Ok(Redirect::to(&catalog_path("/genres")).into_response())
        }
    }
}

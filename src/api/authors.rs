//! Author pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tera::Context;

use crate::{
    error::AppResult,
    forms::{AuthorForm, FieldError, FormFields},
    services::{authors::AuthorDetail, DeleteOutcome},
    views::context::{views, AuthorView, BookView},
    AppState,
};

use super::{catalog_path, parse_id};

fn render_form(
    state: &AppState,
    title: &str,
    form: &AuthorForm,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("author", form);
    context.insert("errors", errors);
    state.views.render("author_form.html", &context)
}

fn detail_context(title: &str, detail: &AuthorDetail) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("author", &AuthorView::from(&detail.author));
    context.insert("author_books", &views::<_, BookView>(&detail.books));
    context
}

/// All authors, by family name
pub async fn author_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;

    let mut context = Context::new();
    context.insert("title", "Author List");
    context.insert("author_list", &views::<_, AuthorView>(&authors));
    state.views.render("author_list.html", &context)
}

/// Author with their books
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Author")?;
    let detail = state.services.authors.detail(id).await?;
    state
        .views
        .render("author_detail.html", &detail_context("Author Detail", &detail))
}

pub async fn author_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_form(&state, "Create Author", &AuthorForm::default(), &[])
}

pub async fn author_create_post(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let submission = AuthorForm::from_fields(&FormFields::from(pairs)).submit();
    match submission.outcome {
        Ok(data) => {
            let author = state.services.authors.create(&data).await?;
            Ok(Redirect::to(&author.url()).into_response())
        }
        Err(errors) => {
            Ok(render_form(&state, "Create Author", &submission.form, &errors)?.into_response())
        }
    }
}

pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Author")?;
    let author = state.services.authors.get(id).await?;
    render_form(&state, "Update Author", &AuthorForm::from(&author), &[])
}

pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Author")?;
    let submission = AuthorForm::from_fields(&FormFields::from(pairs)).submit();
    match submission.outcome {
        Ok(data) => {
            let author = state.services.authors.update(id, &data).await?;
            Ok(Redirect::to(&author.url()).into_response())
        }
        Err(errors) => {
            Ok(render_form(&state, "Update Author", &submission.form, &errors)?.into_response())
        }
    }
}

/// Delete confirmation, listing the books that block the delete
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Author")?;
    let Some(detail) = state.services.authors.find_detail(id).await? else {
        return Ok(Redirect::to(&catalog_path("/authors")).into_response());
    };
    let html = state
        .views
        .render("author_delete.html", &detail_context("Delete Author", &detail))?;
    Ok(html.into_response())
}

pub async fn author_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Author")?;
    match state.services.authors.delete(id).await? {
        DeleteOutcome::Blocked(detail) => {
            let html = state
                .views
                .render("author_delete.html", &detail_context("Delete Author", &detail))?;
            Ok(html.into_response())
        }
        DeleteOutcome::Deleted | DeleteOutcome::Missing => {
            Ok(Redirect::to(&catalog_path("/authors")).into_response())
        }
    }
}

//! Book pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tera::Context;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{BookForm, FieldError, FormFields},
    services::{
        books::{BookDetail, BookFormOptions},
        DeleteOutcome,
    },
    views::context::{views, AuthorView, BookInstanceView, BookView, GenreOption},
    AppState,
};

use super::{catalog_path, parse_id};

fn render_form(
    state: &AppState,
    title: &str,
    form: &BookForm,
    options: &BookFormOptions,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("book", form);
    context.insert("authors", &views::<_, AuthorView>(&options.authors));
    context.insert("genres", &GenreOption::list(&options.genres, |id| form.has_genre(id)));
    context.insert("errors", errors);
    state.views.render("book_form.html", &context)
}

fn detail_context(title: &str, detail: &BookDetail) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("book", &BookView::from(&detail.book));
    context.insert("book_instances", &views::<_, BookInstanceView>(&detail.instances));
    context
}

/// Validate the submission and its references, then create or update the book.
/// Any failure re-renders the form with fresh option lists.
async fn submit(
    state: &AppState,
    title: &str,
    target: Option<Uuid>,
    pairs: Vec<(String, String)>,
) -> AppResult<Response> {
    let service = &state.services.books;
    let submission = BookForm::from_fields(&FormFields::from(pairs)).submit();
    let errors = match submission.outcome {
        Ok(data) => {
            let errors = service.check_references(&data).await?;
            if errors.is_empty() {
                let book = match target {
                    Some(id) => service.update(id, &data).await?,
                    None => service.create(&data).await?,
                };
                return Ok(Redirect::to(&book.url()).into_response());
            }
            errors
        }
        Err(errors) => errors,
    };

    let options = service.form_options().await?;
    Ok(render_form(state, title, &submission.form, &options, &errors)?.into_response())
}

/// All books, by title, with their authors
pub async fn book_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.books.list().await?;

    let mut context = Context::new();
    context.insert("title", "Book List");
    context.insert("book_list", &views::<_, BookView>(&books));
    state.views.render("book_list.html", &context)
}

/// Book with author, genres and copies
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book")?;
    let detail = state.services.books.detail(id).await?;
    state
        .views
        .render("book_detail.html", &detail_context("Book Detail", &detail))
}

pub async fn book_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let options = state.services.books.form_options().await?;
    render_form(&state, "Create Book", &BookForm::default(), &options, &[])
}

pub async fn book_create_post(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    submit(&state, "Create Book", None, pairs).await
}

pub async fn book_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book")?;
    let (book, options) = state.services.books.edit(id).await?;
    render_form(&state, "Update Book", &BookForm::from(&book), &options, &[])
}

pub async fn book_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book")?;
    submit(&state, "Update Book", Some(id), pairs).await
}

/// Delete confirmation, listing the copies that block the delete
pub async fn book_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book")?;
    let Some(detail) = state.services.books.find_detail(id).await? else {
        return Ok(Redirect::to(&catalog_path("/books")).into_response());
    };
    let html = state
        .views
        .render("book_delete.html", &detail_context("Delete Book", &detail))?;
    Ok(html.into_response())
}

pub async fn book_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book")?;
    match state.services.books.delete(id).await? {
        DeleteOutcome::Blocked(detail) => {
            let html = state
                .views
                .render("book_delete.html", &detail_context("Delete Book", &detail))?;
            Ok(html.into_response())
        }
        DeleteOutcome::Deleted | DeleteOutcome::Missing => {
            Ok(Redirect::to(&catalog_path("/books")).into_response())
        }
    }
}

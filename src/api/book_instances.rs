//! Book copy pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tera::Context;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{BookInstanceForm, FieldError, FormFields},
    models::{Book, BookInstance},
    views::context::{status_options, views, BookInstanceView, BookView},
    AppState,
};

use super::{catalog_path, parse_id};

fn render_form(
    state: &AppState,
    title: &str,
    form: &BookInstanceForm,
    books: &[Book],
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("book_instance", form);
    context.insert("book_list", &views::<_, BookView>(books));
    context.insert("statuses", &status_options());
    context.insert("errors", errors);
    state.views.render("book_instance_form.html", &context)
}

fn render_instance(
    state: &AppState,
    template: &str,
    title: &str,
    instance: &BookInstance,
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("book_instance", &BookInstanceView::from(instance));
    state.views.render(template, &context)
}

/// Validate the submission and its book reference, then create or update the copy
async fn submit(
    state: &AppState,
    title: &str,
    target: Option<Uuid>,
    pairs: Vec<(String, String)>,
) -> AppResult<Response> {
    let service = &state.services.book_instances;
    let submission = BookInstanceForm::from_fields(&FormFields::from(pairs)).submit();
    let errors = match submission.outcome {
        Ok(data) => {
            let errors = service.check_references(&data).await?;
            if errors.is_empty() {
                let instance = match target {
                    Some(id) => service.update(id, &data).await?,
                    None => service.create(&data).await?,
                };
                return Ok(Redirect::to(&instance.url()).into_response());
            }
            errors
        }
        Err(errors) => errors,
    };

    let books = service.book_options().await?;
    Ok(render_form(state, title, &submission.form, &books, &errors)?.into_response())
}

/// All copies with their book titles
pub async fn book_instance_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let instances = state.services.book_instances.list().await?;

    let mut context = Context::new();
    context.insert("title", "Book Instance List");
    context.insert("book_instance_list", &views::<_, BookInstanceView>(&instances));
    state.views.render("book_instance_list.html", &context)
}

pub async fn book_instance_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book copy")?;
    let instance = state.services.book_instances.detail(id).await?;
    render_instance(&state, "book_instance_detail.html", "Book", &instance)
}

pub async fn book_instance_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.book_instances.book_options().await?;
    render_form(&state, "Create BookInstance", &BookInstanceForm::default(), &books, &[])
}

pub async fn book_instance_create_post(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    submit(&state, "Create BookInstance", None, pairs).await
}

pub async fn book_instance_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book copy")?;
    let (instance, books) = state.services.book_instances.edit(id).await?;
    render_form(&state, "Update BookInstance", &BookInstanceForm::from(&instance), &books, &[])
}

pub async fn book_instance_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book copy")?;
    submit(&state, "Update BookInstance", Some(id), pairs).await
}

pub async fn book_instance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book copy")?;
    let Some(instance) = state.services.book_instances.find(id).await? else {
        return Ok(Redirect::to(&catalog_path("/book-instances")).into_response());
    };
    let html = render_instance(
        &state,
        "book_instance_delete.html",
        "Delete BookInstance",
        &instance,
    )?;
    Ok(html.into_response())
}

pub async fn book_instance_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book copy")?;
    state.services.book_instances.delete(id).await?;
    Ok(Redirect::to(&catalog_path("/book-instances")).into_response())
}

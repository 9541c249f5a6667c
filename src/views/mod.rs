//! HTML rendering with Tera
//!
//! Templates are compiled into the binary. Autoescaping is off: every user-supplied
//! string is HTML-escaped when the form is sanitized, before it is stored.

pub mod context;

use axum::response::Html;
use tera::{Context, Tera};

use crate::error::AppResult;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("error.html", include_str!("../../templates/error.html")),
    ("author_list.html", include_str!("../../templates/author_list.html")),
    ("author_detail.html", include_str!("../../templates/author_detail.html")),
    ("author_form.html", include_str!("../../templates/author_form.html")),
    ("author_delete.html", include_str!("../../templates/author_delete.html")),
    ("genre_list.html", include_str!("../../templates/genre_list.html")),
    ("genre_detail.html", include_str!("../../templates/genre_detail.html")),
    ("genre_form.html", include_str!("../../templates/genre_form.html")),
    ("genre_delete.html", include_str!("../../templates/genre_delete.html")),
    ("book_list.html", include_str!("../../templates/book_list.html")),
    ("book_detail.html", include_str!("../../templates/book_detail.html")),
    ("book_form.html", include_str!("../../templates/book_form.html")),
    ("book_delete.html", include_str!("../../templates/book_delete.html")),
    ("book_instance_list.html", include_str!("../../templates/book_instance_list.html")),
    ("book_instance_detail.html", include_str!("../../templates/book_instance_detail.html")),
    ("book_instance_form.html", include_str!("../../templates/book_instance_form.html")),
    ("book_instance_delete.html", include_str!("../../templates/book_instance_delete.html")),
];

/// Template engine wrapper
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        tera.autoescape_on(vec![]);
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> AppResult<Html<String>> {
        Ok(Html(self.tera.render(template, context)?))
    }

    /// Render the error view
    pub fn render_error(&self, message: &str, details: Option<&str>) -> AppResult<Html<String>> {
        let mut context = Context::new();
        context.insert("title", "Error");
        context.insert("message", message);
        context.insert("details", &details);
        self.render("error.html", &context)
    }
}

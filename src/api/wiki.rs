//! Wiki page handlers
//!
//! `view`, `edit` and `save` over the page store, rendered through the
//! `view.html` and `edit.html` templates.

use crate::error::AppError;
use crate::services::pages::{validate_name, Page, PageStore};
use askama::Template;
use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

/// Shared page store handle
pub type SharedPages = Arc<PageStore>;

/// Read-only page view
#[derive(Template)]
#[template(path = "view.html")]
pub struct ViewTemplate<'a> {
    /// Page name
    pub name: &'a str,
    /// Page body as text
    pub body: String,
}

/// Edit form for a page
#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate<'a> {
    /// Page name
    pub name: &'a str,
    /// Current body, empty for a new page
    pub body: String,
}

/// Form posted by the edit page
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    /// New page body; a missing field saves an empty page
    #[serde(default)]
    pub body: String,
}

/// GET /view/:name - Render a page, or send the client to its edit form
pub async fn view_page(
    State(store): State<SharedPages>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    validate_name(&name)?;

    let page = match store.load(&name).await {
        Ok(page) => page,
        Err(e) => {
            tracing::debug!(page = %name, error = %e, "page missing, redirecting to editor");
            return found("/edit/", &name);
        }
    };

    let html = render(&ViewTemplate {
        name: &page.name,
        body: page.body_text(),
    })?;
    Ok(html.into_response())
}

/// GET /edit/:name - Render the edit form, empty if the page is new
pub async fn edit_page(
    State(store): State<SharedPages>,
    Path(name): Path<String>,
) -> Result<Html<String>, AppError> {
    validate_name(&name)?;

    let page = store.load(&name).await.unwrap_or_else(|e| {
        tracing::debug!(page = %name, error = %e, "editing new page");
        Page::empty(name.as_str())
    });

    render(&EditTemplate {
        name: &page.name,
        body: page.body_text(),
    })
}

/// POST /save/:name - Persist the posted body and show the page
///
/// A request without a form content type saves an empty page.
pub async fn save_page(
    State(store): State<SharedPages>,
    Path(name): Path<String>,
    form: Result<Form<SaveForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(FormRejection::InvalidFormContentType(_)) => SaveForm::default(),
        Err(rejection) => return Err(AppError::InvalidForm(rejection.body_text())),
    };

    let page = Page::new(name, form.body);
    store.save(&page).await?;

    tracing::info!(page = %page.name, bytes = page.body.len(), "page saved");
    found("/view/", &page.name)
}

fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// `302 Found` pointing at `prefix` followed by the encoded page name
fn found(prefix: &str, name: &str) -> Result<Response, AppError> {
    let location = format!("{}{}", prefix, askama::filters::urlencode_strict(name)?);
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

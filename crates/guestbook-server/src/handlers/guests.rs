//! Guest list pages: sign-up form, add, list, delete, clear.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::response::Html;
use chrono::SecondsFormat;
use guestbook_core::{Guest, GuestbookError};

use crate::error::ServerError;
use crate::handlers::{blocking, storage_failure};
use crate::params::{self, IdParams, NameParams};
use crate::render::{self, escape};
use crate::state::AppState;

/// Handle GET /fom.
pub(crate) async fn form() -> Html<String> {
    render::page(
        "Sign the guestbook",
        "<h1>Sign the guestbook</h1>
<form method=\"post\" action=\"/add\">
<label for=\"name\">Your name</label>
<input id=\"name\" name=\"name\" type=\"text\" required>
<button type=\"submit\">Add</button>
</form>",
    )
}

/// Handle GET /add?name=X.
pub(crate) async fn add_from_query(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, ServerError> {
    let params: NameParams = params::decode_query(query.as_deref());
    add(state, params).await
}

/// Handle POST /add with a `name=X` form body.
///
/// The body is read completely before it is decoded.
pub(crate) async fn add_from_form(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Html<String>, ServerError> {
    let params: NameParams = params::decode(&body);
    add(state, params).await
}

async fn add(state: Arc<AppState>, params: NameParams) -> Result<Html<String>, ServerError> {
    let name = params.name.unwrap_or_default();
    match blocking(move || state.guests.add(&name)).await? {
        Ok(guest) => Ok(render::page(
            "Guest added",
            &format!(
                "<h1>Guest added!</h1>\n<p>Added: <strong>{}</strong></p>\n<p><a href=\"/list\">See the guest list</a></p>",
                escape(&guest.name)
            ),
        )),
        Err(GuestbookError::Validation { .. }) => Ok(render::page(
            "Error",
            "<h1>Error</h1>\n<p>You must provide a non-empty <code>name</code> parameter, e.g. <a href=\"/add?name=Jan\">/add?name=Jan</a>, or use the <a href=\"/fom\">form</a>.</p>",
        )),
        Err(GuestbookError::Storage(err)) => Ok(storage_failure("save the guest", &err)),
        Err(err) => Err(err.into()),
    }
}

/// Handle GET /list.
pub(crate) async fn list(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    match blocking(move || state.guests.list()).await? {
        Ok(guests) => Ok(list_page(&guests)),
        Err(GuestbookError::Storage(err)) => Ok(storage_failure("read the guest list", &err)),
        Err(err) => Err(err.into()),
    }
}

fn list_page(guests: &[Guest]) -> Html<String> {
    let mut body = String::from("<h1>Guest list</h1>\n");
    if guests.is_empty() {
        body.push_str(
            "<p>The guest list is empty.</p>\n<p><a href=\"/fom\">Be the first to sign</a></p>",
        );
        return render::page("Guest list", &body);
    }

    body.push_str("<ul>\n");
    for guest in guests {
        let added_at = guest.added_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let _ = writeln!(
            body,
            "<li>{name} <small>(<time datetime=\"{added_at}\">{added_at}</time>)</small> <a href=\"/delete?{query}\">Delete</a></li>",
            name = escape(&guest.name),
            query = escape(&params::encode_pair("id", &guest.id)),
        );
    }
    body.push_str("</ul>\n<p><a href=\"/clear\">Clear the list</a></p>");

    render::page("Guest list", &body)
}

/// Handle GET /delete?id=Y.
pub(crate) async fn delete(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, ServerError> {
    let params: IdParams = params::decode_query(query.as_deref());
    let id = params.id.unwrap_or_default();
    let key = id.clone();

    match blocking(move || state.guests.delete_by_id(&key)).await? {
        Ok(guest) => Ok(render::page(
            "Guest deleted",
            &format!(
                "<h1>Guest deleted</h1>\n<p>Removed: <strong>{}</strong></p>\n<p><a href=\"/list\">Back to the guest list</a></p>",
                escape(&guest.name)
            ),
        )),
        Err(GuestbookError::Validation { .. }) => Ok(render::page(
            "Error",
            "<h1>Error</h1>\n<p>You must provide an <code>id</code> parameter.</p>\n<p><a href=\"/list\">Back to the guest list</a></p>",
        )),
        Err(GuestbookError::NotFound(_)) => Ok(render::page(
            "Guest not found",
            &format!(
                "<h1>Guest not found</h1>\n<p>No guest with id <code>{}</code>.</p>\n<p><a href=\"/list\">Back to the guest list</a></p>",
                escape(&id)
            ),
        )),
        Err(GuestbookError::Storage(err)) => Ok(storage_failure("delete the guest", &err)),
    }
}

/// Handle GET /clear.
pub(crate) async fn clear(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    match blocking(move || state.guests.clear()).await? {
        Ok(()) => Ok(render::page(
            "Guest list cleared",
            "<h1>The guest list has been cleared!</h1>\n<p><a href=\"/list\">Check the list</a></p>",
        )),
        Err(GuestbookError::Storage(err)) => Ok(storage_failure("clear the guest list", &err)),
        Err(err) => Err(err.into()),
    }
}

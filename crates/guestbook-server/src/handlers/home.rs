//! Home page.
//!
//! Every GET of `/` counts as one visit from the requesting address.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use guestbook_core::{GuestbookError, VisitCount};

use crate::client_addr::ClientAddr;
use crate::error::ServerError;
use crate::handlers::{blocking, storage_failure};
use crate::render::{self, escape};
use crate::state::AppState;

/// Handle GET /.
pub(crate) async fn home(
    State(state): State<Arc<AppState>>,
    ClientAddr(address): ClientAddr,
) -> Result<Html<String>, ServerError> {
    let key = address.clone();
    let recorded = blocking(move || state.ledger.record_visit(&key)).await?;

    match recorded {
        Ok(count) => Ok(home_page(&address, count)),
        Err(GuestbookError::Storage(err)) => Ok(storage_failure("record your visit", &err)),
        Err(err) => Err(err.into()),
    }
}

fn home_page(address: &str, count: VisitCount) -> Html<String> {
    render::page(
        "Home",
        &format!(
            "<h1>Welcome!</h1>
<p>Total visits: <strong>{total}</strong></p>
<p>Your address <code>{address}</code> has visited <strong>{mine}</strong> time(s).</p>
<p><a href=\"/fom\">Sign the guestbook</a> or <a href=\"/list\">see the guest list</a>.</p>",
            total = count.total,
            address = escape(address),
            mine = count.address,
        ),
    )
}

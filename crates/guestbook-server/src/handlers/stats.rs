//! Visit statistics page.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use guestbook_core::{GuestbookError, VisitLedger};

use crate::error::ServerError;
use crate::handlers::{blocking, storage_failure};
use crate::render::{self, escape};
use crate::state::AppState;

/// Handle GET /stats.
pub(crate) async fn stats(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    match blocking(move || state.ledger.snapshot()).await? {
        Ok(ledger) => Ok(stats_page(&ledger)),
        Err(GuestbookError::Storage(err)) => Ok(storage_failure("read visit statistics", &err)),
        Err(err) => Err(err.into()),
    }
}

fn stats_page(ledger: &VisitLedger) -> Html<String> {
    let ranked = ledger.ranked();

    let mut body = String::from("<h1>Visit statistics</h1>\n");
    if ranked.is_empty() {
        body.push_str("<p>No visits recorded yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Address</th><th>Visits</th></tr></thead>\n<tbody>\n",
        );
        for (address, count) in ranked {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{count}</td></tr>",
                escape(address)
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }
    let _ = write!(body, "<p>Total visits: <strong>{}</strong></p>", ledger.total);

    render::page("Statistics", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_page_empty() {
        let Html(html) = stats_page(&VisitLedger::default());

        assert!(html.contains("No visits recorded yet."));
        assert!(html.contains("Total visits: <strong>0</strong>"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_stats_page_sorted_descending() {
        let mut ledger = VisitLedger {
            total: 6,
            ..VisitLedger::default()
        };
        ledger.by_address.insert("10.0.0.1".to_owned(), 1);
        ledger.by_address.insert("10.0.0.2".to_owned(), 5);

        let Html(html) = stats_page(&ledger);

        let busy = html.find("<td>10.0.0.2</td><td>5</td>").unwrap();
        let quiet = html.find("<td>10.0.0.1</td><td>1</td>").unwrap();
        assert!(busy < quiet);
        assert!(html.contains("Total visits: <strong>6</strong>"));
    }

    #[test]
    fn test_stats_page_escapes_addresses() {
        let mut ledger = VisitLedger {
            total: 1,
            ..VisitLedger::default()
        };
        ledger.by_address.insert("<img src=x>".to_owned(), 1);

        let Html(html) = stats_page(&ledger);

        assert!(html.contains("<td>&lt;img src=x&gt;</td>"));
    }
}

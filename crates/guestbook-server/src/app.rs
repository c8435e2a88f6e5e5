//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, guests, home, stats};
use crate::middleware::{headers, panic};
use crate::state::AppState;

/// Create the application router.
///
/// Routes match on exact paths. A wrong method on `/add` yields 405; on any
/// other route it yields 404, same as an unknown path.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` so
/// visits can fall back to the peer address.
pub fn create_router(state: AppState) -> Router {
    let not_found = handlers::not_found;

    let routes = Router::new()
        .route("/", get(home::home).fallback(not_found))
        .route("/stats", get(stats::stats).fallback(not_found))
        .route("/fom", get(guests::form).fallback(not_found))
        .route(
            "/add",
            get(guests::add_from_query)
                .post(guests::add_from_form)
                .fallback(handlers::method_not_allowed),
        )
        .route("/list", get(guests::list).fallback(not_found))
        .route("/delete", get(guests::delete).fallback(not_found))
        .route("/clear", get(guests::clear).fallback(not_found))
        .fallback(not_found)
        .with_state(Arc::new(state));

    with_middleware(routes)
}

/// Wrap `router` in the response headers, tracing and panic recovery.
///
/// Panics are caught innermost, so their 500 page still gets every header.
fn with_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(headers::content_type_layer())
            .layer(headers::csp_layer())
            .layer(headers::content_type_options_layer())
            .layer(headers::frame_options_layer())
            .layer(TraceLayer::new_for_http())
            .layer(panic::catch_panic_layer()),
    )
}

//! HTML Pages
//!
//! The Telegram Mini App and the admin panel. Templates are compiled in and
//! filled by plain placeholder substitution.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
    routing::get,
    Router,
};

use super::state::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");
const ADMIN_TEMPLATE: &str = include_str!("../../assets/admin.html");

pub fn page_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/admin", get(admin_handler).post(admin_handler))
        .with_state(state)
}

async fn index_handler(Query(params): Query<HashMap<String, String>>) -> Html<String> {
    let user_id = params.get("user_id").map(String::as_str).unwrap_or_default();
    Html(render_index(user_id))
}

async fn admin_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Html<String> {
    Html(render_admin(state.is_admin(&headers)))
}

pub fn render_index(user_id: &str) -> String {
    INDEX_TEMPLATE.replace("{{USER_ID}}", &escape_html(user_id))
}

pub fn render_admin(logged_in: bool) -> String {
    ADMIN_TEMPLATE.replace("{{ADMIN_LOGGED}}", if logged_in { "true" } else { "false" })
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

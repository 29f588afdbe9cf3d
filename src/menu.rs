use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// One sidebar action and the route that serves it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MenuAction {
    pub key: &'static str,
    pub label: &'static str,
    pub method: &'static str,
    pub path: &'static str,
}

pub static MENU: [MenuAction; 4] = [
    MenuAction {
        key: "view_analytics",
        label: "View Analytics",
        method: "POST",
        path: "/api/v1/analytics/run",
    },
    MenuAction {
        key: "add_listing",
        label: "Add Food Listing",
        method: "POST",
        path: "/api/v1/listings",
    },
    MenuAction {
        key: "update_listing",
        label: "Update Food Listing",
        method: "POST",
        path: "/api/v1/listings/update",
    },
    MenuAction {
        key: "delete_listing",
        label: "Delete Food Listing",
        method: "POST",
        path: "/api/v1/listings/delete",
    },
];

pub fn router() -> Router<AppState> {
    Router::new().route("/menu", get(menu))
}

pub async fn menu() -> Json<&'static [MenuAction]> {
    Json(&MENU[..])
}

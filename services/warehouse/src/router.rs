use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::{Router, response::IntoResponse};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use warehouse_core::envelope::Envelope;
use warehouse_core::health::healthz;
use warehouse_core::middleware::{
    catch_panic_layer, cors_layer, propagate_request_id_layer, request_id_layer,
};
use warehouse_domain::role::RoleName;

use crate::domain::repository::Repositories;
use crate::handlers::{
    auth::{sign_in, sign_out},
    health::readyz,
    item::{create_item, delete_item, get_item, list_items, update_item},
    order::{create_order, delete_order, get_order, list_orders, update_order},
    role::{create_role, delete_role, get_role, list_roles, update_role},
    truck::{create_truck, delete_truck, get_truck, list_trucks, update_truck},
    user::{create_user, delete_user, get_user, list_users, update_user},
};
use crate::middleware::{RoleGate, authorize};
use crate::state::AppState;

const SYS_ADMIN: &[RoleName] = &[RoleName::SysAdmin];
const ADMIN: &[RoleName] = &[RoleName::Admin];
const USER: &[RoleName] = &[RoleName::User];

pub fn build_router<R: Repositories>(state: AppState<R>) -> Router {
    let keys = state.tokens.clone();

    let sys_admin = Router::new()
        // Users
        .route("/users", get(list_users::<R>).post(create_user::<R>))
        .route(
            "/users/{id}",
            get(get_user::<R>)
                .put(update_user::<R>)
                .delete(delete_user::<R>),
        )
        // Roles
        .route("/roles", get(list_roles::<R>).post(create_role::<R>))
        .route(
            "/roles/{id}",
            get(get_role::<R>)
                .put(update_role::<R>)
                .delete(delete_role::<R>),
        )
        .route_layer(from_fn_with_state(
            RoleGate::new(keys.clone(), SYS_ADMIN),
            authorize,
        ));

    let items = Router::new()
        .route("/items", get(list_items::<R>).post(create_item::<R>))
        .route(
            "/items/{id}",
            get(get_item::<R>)
                .put(update_item::<R>)
                .delete(delete_item::<R>),
        )
        .route_layer(from_fn_with_state(
            RoleGate::any_role(keys.clone()),
            authorize,
        ));

    let trucks = Router::new()
        .route("/trucks", get(list_trucks::<R>).post(create_truck::<R>))
        .route(
            "/trucks/{id}",
            get(get_truck::<R>)
                .put(update_truck::<R>)
                .delete(delete_truck::<R>),
        )
        .route_layer(from_fn_with_state(RoleGate::new(keys.clone(), ADMIN), authorize));

    let orders = Router::new()
        .route("/orders", get(list_orders::<R>).post(create_order::<R>))
        .route(
            "/orders/{id}",
            get(get_order::<R>)
                .put(update_order::<R>)
                .delete(delete_order::<R>),
        )
        .route_layer(from_fn_with_state(RoleGate::new(keys, USER), authorize));

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<R>))
        // Auth
        .route("/signIn", post(sign_in::<R>))
        .route("/signOut", post(sign_out::<R>))
        .merge(sys_admin)
        .merge(items)
        .merge(trucks)
        .merge(orders)
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(catch_panic_layer()),
        )
        // CORS is applied as a separate, outermost layer so its inner
        // response body is axum's `Body` (which implements `Default`).
        .layer(cors_layer())
        .with_state(state)
}

async fn route_not_found() -> impl IntoResponse {
    Envelope::failure(
        StatusCode::NOT_FOUND,
        "route not found",
        Some(json!({ "kind": "ROUTE_NOT_FOUND" })),
    )
}

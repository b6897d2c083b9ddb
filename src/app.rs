use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::{Customer, CustomerAccount, Entity, Order, Product};
use crate::handlers::{entity, home, relations};
use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let mut app = Router::new()
        // Public
        .route("/", get(home::home))
        .route("/health", get(home::health))
        // Entities
        .merge(entity_routes::<Customer>("/customers"))
        .merge(entity_routes::<CustomerAccount>("/customer_accounts"))
        .merge(entity_routes::<Product>("/products"))
        .merge(entity_routes::<Order>("/orders"))
        // Relationships
        .merge(relation_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if let Some(cors) = cors_layer(config) {
        app = app.layer(cors);
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

fn entity_routes<E: Entity>(collection: &str) -> Router<AppState> {
    Router::new()
        .route(
            collection,
            get(entity::list::<E>).post(entity::create::<E>),
        )
        .route(
            &format!("{}/:id", collection),
            get(entity::show::<E>)
                .put(entity::update::<E>)
                .delete(entity::delete::<E>),
        )
}

fn relation_routes() -> Router<AppState> {
    Router::new()
        .route("/customers/:id/orders", get(relations::customer_orders))
        .route("/customers/:id/account", get(relations::customer_account))
        .route("/orders/:id/products", get(relations::order_products))
        .route(
            "/orders/:id/products/:product_id",
            put(relations::link_product).delete(relations::unlink_product),
        )
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }

    let origins = &config.security.cors_origins;
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

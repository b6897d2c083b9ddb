use axum::extract::{rejection::PathRejection, Path, State};
use tracing::info;

use crate::api::{ApiResponse, ApiResult, Message};
use crate::database::{Customer, CustomerAccount, DatabaseError, Entity, Order, Product};
use crate::state::AppState;

/// GET /customers/:id/orders
pub async fn customer_orders(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<Order>> {
    let Path(customer_id) = id?;
    state.repository::<Customer>().get(customer_id).await?;

    let orders = state
        .repository::<Order>()
        .list_by("customer_id", customer_id)
        .await?;
    Ok(ApiResponse::success(orders))
}

/// GET /customers/:id/account
pub async fn customer_account(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<CustomerAccount> {
    let Path(customer_id) = id?;
    state.repository::<Customer>().get(customer_id).await?;

    // customer_id is unique, so there is at most one
    let account = state
        .repository::<CustomerAccount>()
        .list_by("customer_id", customer_id)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            DatabaseError::NotFound(format!(
                "{} {} has no {}",
                Customer::LABEL,
                customer_id,
                CustomerAccount::LABEL
            ))
        })?;
    Ok(ApiResponse::success(account))
}

/// GET /orders/:id/products
pub async fn order_products(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<Product>> {
    let Path(order_id) = id?;
    state.repository::<Order>().get(order_id).await?;

    let products = state.order_products().products_for_order(order_id).await?;
    Ok(ApiResponse::success(products))
}

/// PUT /orders/:id/products/:product_id
pub async fn link_product(
    State(state): State<AppState>,
    ids: Result<Path<(i32, i32)>, PathRejection>,
) -> ApiResult<Message> {
    let Path((order_id, product_id)) = ids?;

    // Explicit lookups give a 404 naming the missing side instead of a
    // foreign-key conflict
    state.repository::<Order>().get(order_id).await?;
    state.repository::<Product>().get(product_id).await?;

    state.order_products().link(order_id, product_id).await?;

    info!("Linked Product {} to Order {}", product_id, order_id);
    Ok(ApiResponse::created(Message::new(format!(
        "Product {} added to Order {}",
        product_id, order_id
    ))))
}

/// DELETE /orders/:id/products/:product_id
pub async fn unlink_product(
    State(state): State<AppState>,
    ids: Result<Path<(i32, i32)>, PathRejection>,
) -> ApiResult<Message> {
    let Path((order_id, product_id)) = ids?;
    state.order_products().unlink(order_id, product_id).await?;

    info!("Unlinked Product {} from Order {}", product_id, order_id);
    Ok(ApiResponse::success(Message::new(format!(
        "Product {} removed from Order {}",
        product_id, order_id
    ))))
}

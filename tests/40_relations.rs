//! Relationship routes against a real PostgreSQL database.
//! Skipped when DATABASE_URL is unset.

mod common;

use anyhow::Result;
use serde_json::{json, Value};

use common::TestServer;

const IDS: std::ops::RangeInclusive<i32> = 2000..=2999;

macro_rules! server_or_skip {
    () => {
        match TestServer::start(IDS).await? {
            Some(server) => server,
            None => return Ok(()),
        }
    };
}

async fn seed(server: &TestServer) -> Result<()> {
    let rows: [(&str, Value); 6] = [
        ("/customers", json!({"id": 2001, "name": "Ada", "email": "ada@example.com", "phone": "555-0100"})),
        ("/customers", json!({"id": 2002, "name": "Bob", "email": "bob@example.com", "phone": "555-0101"})),
        ("/orders", json!({"id": 2011, "date": "2024-01-05", "customer_id": 2001})),
        ("/orders", json!({"id": 2010, "date": "2024-01-04", "customer_id": 2001})),
        ("/products", json!({"id": 2021, "name": "Widget", "price": 500, "inventory": 10})),
        ("/products", json!({"id": 2022, "name": "Gadget", "price": 250, "inventory": 3})),
    ];
    for (collection, body) in rows {
        let (status, body) = server.post(collection, &body).await?;
        anyhow::ensure!(status == 201, "seeding {} failed: {}", collection, body);
    }
    Ok(())
}

#[tokio::test]
async fn customer_orders_are_listed_by_id() -> Result<()> {
    let server = server_or_skip!();
    seed(&server).await?;

    let (status, body) = server.get("/customers/2001/orders").await?;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([
            {"id": 2010, "date": "2024-01-04", "customer_id": 2001},
            {"id": 2011, "date": "2024-01-05", "customer_id": 2001}
        ])
    );

    let (status, body) = server.get("/customers/2002/orders").await?;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    let (status, _) = server.get("/customers/2999/orders").await?;
    assert_eq!(status, 404);
    Ok(())
}

#[tokio::test]
async fn customer_account_lookup() -> Result<()> {
    let server = server_or_skip!();
    seed(&server).await?;

    let (status, body) = server.get("/customers/2001/account").await?;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Customer 2001 has no Customer Account");

    server
        .post("/customer_accounts", &json!({"username": "ada", "password": "pw", "id": 2031, "customer_id": 2001}))
        .await?;

    let (status, body) = server.get("/customers/2001/account").await?;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"username": "ada", "id": 2031, "customer_id": 2001}));

    let (status, body) = server.get("/customers/2999/account").await?;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Customer 2999 not found");
    Ok(())
}

#[tokio::test]
async fn products_link_and_unlink() -> Result<()> {
    let server = server_or_skip!();
    seed(&server).await?;

    let (status, body) = server.get("/orders/2010/products").await?;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    for product in [2022, 2021] {
        let (status, body) = server.put_empty(&format!("/orders/2010/products/{}", product)).await?;
        assert_eq!(status, 201);
        assert_eq!(body["message"], format!("Product {} added to Order 2010", product));
    }

    let (_, body) = server.get("/orders/2010/products").await?;
    let ids: Vec<i64> = body
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["id"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![2021, 2022]);

    // Linking twice conflicts
    let (status, _) = server.put_empty("/orders/2010/products/2021").await?;
    assert_eq!(status, 409);

    let (status, body) = server.delete("/orders/2010/products/2021").await?;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Product 2021 removed from Order 2010");

    let (status, _) = server.delete("/orders/2010/products/2021").await?;
    assert_eq!(status, 404);

    let (_, body) = server.get("/orders/2010/products").await?;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn linking_requires_both_sides() -> Result<()> {
    let server = server_or_skip!();
    seed(&server).await?;

    let (status, body) = server.put_empty("/orders/2999/products/2021").await?;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Order 2999 not found");

    let (status, body) = server.put_empty("/orders/2010/products/2999").await?;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Product 2999 not found");

    let (status, _) = server.get("/orders/2999/products").await?;
    assert_eq!(status, 404);
    Ok(())
}

#[tokio::test]
async fn linked_rows_are_protected() -> Result<()> {
    let server = server_or_skip!();
    seed(&server).await?;
    server.put_empty("/orders/2011/products/2022").await?;

    let (status, _) = server.delete("/products/2022").await?;
    assert_eq!(status, 409);
    let (status, _) = server.delete("/orders/2011").await?;
    assert_eq!(status, 409);

    // Re-identifying a referenced row is refused too
    let (status, _) = server
        .put("/products/2022", &json!({"id": 2023, "name": "Gadget", "price": 250, "inventory": 3}))
        .await?;
    assert_eq!(status, 409);

    server.delete("/orders/2011/products/2022").await?;
    let (status, _) = server.delete("/products/2022").await?;
    assert_eq!(status, 200);
    Ok(())
}

#[tokio::test]
async fn health_is_ok_with_database() -> Result<()> {
    let server = server_or_skip!();

    let (status, body) = server.get("/health").await?;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    Ok(())
}

//! Integration tests for order placement and the admin order routes.
//!
//! These tests require a running API server, a migrated database, and the
//! seeded admin account; see the crate docs for setup.

use serde_json::{Value, json};

use loja_integration_tests::{
    admin_token, base_url, client, create_address, create_product, ensure_category,
    fresh_user_token,
};

/// The worked pricing example: 2 × 10.00 + 1 × 5.50 = 25.50.
#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_order_total_is_snapshot_sum() {
    let client = client();
    let token = fresh_user_token(&client).await;
    let category_id = ensure_category(&client, "Testes de Pedido").await;

    let p1 = create_product(
        &client,
        &token,
        &format!("p1-{}", uuid::Uuid::new_v4()),
        10.00,
        &category_id,
    )
    .await;
    let p2 = create_product(
        &client,
        &token,
        &format!("p2-{}", uuid::Uuid::new_v4()),
        5.50,
        &category_id,
    )
    .await;
    let address_id = create_address(&client, &token).await;

    let resp = client
        .post(format!("{}/order/create", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "address_id": address_id,
            "items": [
                { "product_id": p1, "quantity": 2 },
                { "product_id": p2, "quantity": 1 },
            ],
        }))
        .send()
        .await
        .expect("Failed to create order");

    assert_eq!(resp.status(), 201);
    let order: Value = resp.json().await.expect("Failed to read order");

    assert_eq!(order["status"], "PENDING");
    assert!((order["total"].as_f64().expect("total") - 25.50).abs() < 1e-9);
    assert_eq!(order["address"]["id"], json!(address_id));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_price_change_does_not_touch_stored_order() {
    let client = client();
    let token = fresh_user_token(&client).await;
    let category_id = ensure_category(&client, "Testes de Pedido").await;

    let name = format!("congelado-{}", uuid::Uuid::new_v4());
    let product_id = create_product(&client, &token, &name, 10.00, &category_id).await;
    let address_id = create_address(&client, &token).await;

    let resp = client
        .post(format!("{}/order/create", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "address_id": address_id,
            "items": [{ "product_id": product_id, "quantity": 3 }],
        }))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), 201);

    // Double the catalog price after the order was placed
    let resp = client
        .put(format!("{}/products/update/{product_id}", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "name": name,
            "description": "Produto de teste",
            "price": 20.00,
            "category_id": category_id,
        }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), 200);

    // The stored order still shows the snapshot price and total
    let orders: Value = client
        .get(format!("{}/order/list", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to read orders");

    let order = orders
        .as_array()
        .expect("orders should be an array")
        .iter()
        .find(|o| {
            o["items"]
                .as_array()
                .is_some_and(|items| items.iter().any(|i| i["product_id"] == json!(product_id)))
        })
        .expect("placed order should be listed");

    assert!((order["total"].as_f64().expect("total") - 30.00).abs() < 1e-9);
    let item = &order["items"][0];
    assert!((item["price"].as_f64().expect("price") - 10.00).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unknown_product_rejects_entire_order() {
    let client = client();
    let token = fresh_user_token(&client).await;
    let category_id = ensure_category(&client, "Testes de Pedido").await;

    let product_id = create_product(
        &client,
        &token,
        &format!("existente-{}", uuid::Uuid::new_v4()),
        7.00,
        &category_id,
    )
    .await;
    let address_id = create_address(&client, &token).await;

    let before: Value = client
        .get(format!("{}/order/list", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to read orders");

    let resp = client
        .post(format!("{}/order/create", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "address_id": address_id,
            "items": [
                { "product_id": product_id, "quantity": 1 },
                { "product_id": uuid::Uuid::new_v4().to_string(), "quantity": 1 },
            ],
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.expect("Failed to read body");
    assert_eq!(body["message"], "Um ou mais produtos não foram encontrados.");

    // No partial order was created
    let after: Value = client
        .get(format!("{}/order/list", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to read orders");

    assert_eq!(
        before.as_array().expect("array").len(),
        after.as_array().expect("array").len()
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_empty_item_list_is_rejected() {
    let client = client();
    let token = fresh_user_token(&client).await;
    let address_id = create_address(&client, &token).await;

    let resp = client
        .post(format!("{}/order/create", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "address_id": address_id, "items": [] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running API server, database and admin account"]
async fn test_admin_routes_reject_non_admin_tokens() {
    let client = client();
    let token = fresh_user_token(&client).await;

    let resp = client
        .get(format!("{}/order/admin/list-all", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), 401);

    let admin = admin_token(&client).await;
    let resp = client
        .get(format!("{}/order/admin/list-all", base_url()))
        .bearer_auth(admin)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[ignore = "Requires running API server, database and admin account"]
async fn test_admin_can_move_order_between_statuses() {
    let client = client();
    let token = fresh_user_token(&client).await;
    let category_id = ensure_category(&client, "Testes de Pedido").await;

    let product_id = create_product(
        &client,
        &token,
        &format!("status-{}", uuid::Uuid::new_v4()),
        5.00,
        &category_id,
    )
    .await;
    let address_id = create_address(&client, &token).await;

    let order: Value = client
        .post(format!("{}/order/create", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "address_id": address_id,
            "items": [{ "product_id": product_id, "quantity": 1 }],
        }))
        .send()
        .await
        .expect("Failed to create order")
        .json()
        .await
        .expect("Failed to read order");
    let order_id = order["id"].as_str().expect("order id");

    let admin = admin_token(&client).await;

    // No transition graph: DELIVERED and back to PENDING are both accepted
    for status in ["DELIVERED", "PENDING"] {
        let resp = client
            .put(format!("{}/order/admin/update/{order_id}", base_url()))
            .bearer_auth(&admin)
            .json(&json!({ "status": status }))
            .send()
            .await
            .expect("Failed to update status");

        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.expect("Failed to read body");
        assert_eq!(body["status"], status);
    }

    // Unknown status values are rejected
    let resp = client
        .put(format!("{}/order/admin/update/{order_id}", base_url()))
        .bearer_auth(&admin)
        .json(&json!({ "status": "SHIPPED" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_order_listing_is_scoped_to_the_caller() {
    let client = client();
    let first = fresh_user_token(&client).await;
    let second = fresh_user_token(&client).await;
    let category_id = ensure_category(&client, "Testes de Pedido").await;

    let product_id = create_product(
        &client,
        &first,
        &format!("escopo-{}", uuid::Uuid::new_v4()),
        3.00,
        &category_id,
    )
    .await;
    let address_id = create_address(&client, &first).await;

    let resp = client
        .post(format!("{}/order/create", base_url()))
        .bearer_auth(&first)
        .json(&json!({
            "address_id": address_id,
            "items": [{ "product_id": product_id, "quantity": 1 }],
        }))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), 201);

    // The second user sees none of the first user's orders
    let others: Value = client
        .get(format!("{}/order/list", base_url()))
        .bearer_auth(&second)
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to read orders");

    assert!(others.as_array().expect("array").is_empty());
}

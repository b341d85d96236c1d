//! Integration tests for the category and product catalog routes.

use serde_json::{Value, json};

use loja_integration_tests::{
    base_url, client, create_product, ensure_category, fresh_user_token,
};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_duplicate_category_name_is_rejected() {
    let client = client();
    let name = format!("Categoria-{}", uuid::Uuid::new_v4());

    let resp = client
        .post(format!("{}/category/create", base_url()))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create category");
    assert_eq!(resp.status(), 201);

    let resp = client
        .post(format!("{}/category/create", base_url()))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.expect("Failed to read body");
    assert_eq!(body["message"], "Erro ao criar a categoria, categoria já existe.");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_duplicate_product_name_is_rejected() {
    let client = client();
    let token = fresh_user_token(&client).await;
    let category_id = ensure_category(&client, "Testes de Catálogo").await;

    let name = format!("produto-{}", uuid::Uuid::new_v4());
    create_product(&client, &token, &name, 9.90, &category_id).await;

    let resp = client
        .post(format!("{}/products/create", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "name": name,
            "description": "Produto duplicado",
            "price": 9.90,
            "category_id": category_id,
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.expect("Failed to read body");
    assert_eq!(body["message"], "Produto já existe");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_with_unknown_category_is_rejected() {
    let client = client();
    let token = fresh_user_token(&client).await;

    let resp = client
        .post(format!("{}/products/create", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "name": format!("orfao-{}", uuid::Uuid::new_v4()),
            "description": "Sem categoria",
            "price": 1.00,
            "category_id": uuid::Uuid::new_v4().to_string(),
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_listing_embeds_category() {
    let client = client();
    let token = fresh_user_token(&client).await;
    let category_id = ensure_category(&client, "Testes de Catálogo").await;

    create_product(
        &client,
        &token,
        &format!("listado-{}", uuid::Uuid::new_v4()),
        4.20,
        &category_id,
    )
    .await;

    let body: Value = client
        .get(format!("{}/products/list", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to read products");

    let products = body["products"].as_array().expect("products array");
    assert!(!products.is_empty());
    let listed = products
        .iter()
        .find(|p| p["category"]["id"] == json!(category_id))
        .expect("created product should be listed");
    assert_eq!(listed["category"]["name"], "Testes de Catálogo");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_get_product_by_malformed_id_is_rejected() {
    let client = client();

    let resp = client
        .get(format!("{}/products/get/nao-e-um-uuid", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.expect("Failed to read body");
    assert_eq!(
        body["message"],
        "Erro ao buscar o produto, verifique os dados informados."
    );
}

//! Integration tests for the address book routes.

use serde_json::{Value, json};

use loja_integration_tests::{base_url, client, create_address, fresh_user_token};

/// Create → get → full update → get: the second read must return exactly
/// the updated fields.
#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_address_round_trip() {
    let client = client();
    let token = fresh_user_token(&client).await;

    let address_id = create_address(&client, &token).await;

    let fetched: Value = client
        .get(format!("{}/address/{address_id}", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get address")
        .json()
        .await
        .expect("Failed to read address");

    assert_eq!(fetched["address"]["street"], "Rua das Flores");
    assert_eq!(fetched["address"]["zip_code"], "01310-100");

    // Overwrite every field
    let resp = client
        .put(format!("{}/address/{address_id}", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "street": "Avenida Atlântica",
            "number": "456B",
            "city": "Rio de Janeiro",
            "state": "RJ",
            "zipCode": "22021-001",
        }))
        .send()
        .await
        .expect("Failed to update address");
    assert_eq!(resp.status(), 200);

    let fetched: Value = client
        .get(format!("{}/address/{address_id}", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get address")
        .json()
        .await
        .expect("Failed to read address");

    let address = &fetched["address"];
    assert_eq!(address["street"], "Avenida Atlântica");
    assert_eq!(address["number"], "456B");
    assert_eq!(address["city"], "Rio de Janeiro");
    assert_eq!(address["state"], "RJ");
    assert_eq!(address["zip_code"], "22021-001");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_malformed_zip_code_is_rejected() {
    let client = client();
    let token = fresh_user_token(&client).await;

    let resp = client
        .post(format!("{}/address", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "street": "Rua das Flores",
            "number": "123",
            "city": "São Paulo",
            "state": "SP",
            "zipCode": "01310100",
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_address_listing_is_scoped_to_the_caller() {
    let client = client();
    let first = fresh_user_token(&client).await;
    let second = fresh_user_token(&client).await;

    create_address(&client, &first).await;

    let own: Value = client
        .get(format!("{}/address", base_url()))
        .bearer_auth(&first)
        .send()
        .await
        .expect("Failed to list addresses")
        .json()
        .await
        .expect("Failed to read addresses");
    assert_eq!(own["address"].as_array().expect("array").len(), 1);

    let others: Value = client
        .get(format!("{}/address", base_url()))
        .bearer_auth(&second)
        .send()
        .await
        .expect("Failed to list addresses")
        .json()
        .await
        .expect("Failed to read addresses");
    assert!(others["address"].as_array().expect("array").is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_get_unknown_address_is_not_found() {
    let client = client();
    let token = fresh_user_token(&client).await;

    let resp = client
        .get(format!("{}/address/{}", base_url(), uuid::Uuid::new_v4()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 404);
}

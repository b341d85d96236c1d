//! Integration tests for registration and sign-in.
//!
//! These tests require a running API server and database; see the crate
//! docs for setup. Run with: `cargo test -- --ignored`

use serde_json::{Value, json};

use loja_integration_tests::{base_url, client, register_user, sign_in, unique_email};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_and_sign_in() {
    let client = client();
    let email = unique_email("cadastro");

    register_user(&client, &email, "senha-123456").await;

    let token = sign_in(&client, &email, "senha-123456").await;
    assert!(token.is_some(), "fresh user should receive a token");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_duplicate_email_is_rejected() {
    let client = client();
    let email = unique_email("duplicado");

    register_user(&client, &email, "senha-123456").await;

    // Second registration with the same email must fail
    let resp = client
        .post(format!("{}/users/create", base_url()))
        .json(&json!({ "name": "Outro Nome", "email": email, "password": "outra-senha-1" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.expect("Failed to read body");
    assert_eq!(
        body["message"],
        "O email que você está tentando cadastrar já existe."
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_wrong_password_and_unknown_email_look_identical() {
    let client = client();
    let email = unique_email("sigilo");

    register_user(&client, &email, "senha-123456").await;

    // Wrong password for an existing account
    let wrong_password = client
        .post(format!("{}/auth/sign-in", base_url()))
        .json(&json!({ "email": email, "password": "senha-errada" }))
        .send()
        .await
        .expect("Failed to send request");
    let wrong_password_status = wrong_password.status();
    let wrong_password_body: Value = wrong_password.json().await.expect("Failed to read body");

    // Account that does not exist at all
    let unknown = client
        .post(format!("{}/auth/sign-in", base_url()))
        .json(&json!({ "email": unique_email("inexistente"), "password": "senha-errada" }))
        .send()
        .await
        .expect("Failed to send request");
    let unknown_status = unknown.status();
    let unknown_body: Value = unknown.json().await.expect("Failed to read body");

    // Identical status and body: no user-existence leakage
    assert_eq!(wrong_password_status, unknown_status);
    assert_eq!(wrong_password_body, unknown_body);
    assert_eq!(wrong_password_body["message"], "E-mail ou senha inválidos.");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_missing_token_is_unauthorized() {
    let client = client();

    let resp = client
        .get(format!("{}/products/list", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_garbage_token_is_unauthorized() {
    let client = client();

    let resp = client
        .get(format!("{}/products/list", base_url()))
        .bearer_auth("token-invalido")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 401);
}

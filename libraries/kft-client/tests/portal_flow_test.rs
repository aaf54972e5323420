//! Integration tests for complete portal flows.
//!
//! These tests chain several client operations against one mock server and
//! check the session state the store is left in after each step.

use kft_client::{
    AdminClient, ClientConfig, FileStore, MemoryStore, MerchantClient, ProductInput,
    SessionStore, SignupRequest,
};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a mock product response
fn create_mock_product(id: i64, name: &str, price: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": "",
        "price": price,
        "owner": 7,
        "owner_username": "shop@example.com",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

// =============================================================================
// Merchant Onboarding Flow Tests
// =============================================================================

mod merchant_onboarding {
    use super::*;

    /// Signup, OTP verification, then a protected call with the new session.
    #[tokio::test]
    async fn test_signup_verify_and_use_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/users/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "OTP sent to your email. Please verify to complete registration."
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/users/verify-otp/"))
            .and(body_json(serde_json::json!({"email": "shop@example.com", "otp_code": "424242"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "message": "Account verified and created successfully. You can now log in.",
                "user": {"id": 7, "username": "shop@example.com", "email": "shop@example.com"},
                "access": "fresh_access",
                "refresh": "fresh_refresh"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/merchant/profile/"))
            .and(header("Authorization", "Bearer fresh_access"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 7,
                "username": "shop@example.com",
                "email": "shop@example.com",
                "balance": "0.00"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let client =
            MerchantClient::new(ClientConfig::new(mock_server.uri()), store.clone()).unwrap();

        client
            .signup(&SignupRequest {
                username: "shop@example.com".into(),
                email: "shop@example.com".into(),
                password: "secret".into(),
                first_name: None,
                last_name: None,
            })
            .await
            .unwrap();
        assert!(!client.is_authenticated());

        let email = client.pending_signup_email().unwrap();
        client.verify_otp(&email, "424242").await.unwrap();
        client.clear_signup_email();

        assert!(client.is_authenticated());
        assert!(client.pending_signup_email().is_none());
        assert_eq!(client.user().unwrap().id, 7);

        let profile = client.profile().await.unwrap();
        assert_eq!(profile.balance, "0.00");
    }
}

// =============================================================================
// Product Management Flow Tests
// =============================================================================

mod product_management {
    use super::*;

    /// Deleting a product and listing again never shows the deleted id.
    #[tokio::test]
    async fn test_delete_then_relist() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/token/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access": "a",
                "refresh": "r",
                "user": {"id": 7, "username": "shop@example.com"}
            })))
            .mount(&mock_server)
            .await;

        // First listing still has both products, later ones only the survivor.
        Mock::given(method("GET"))
            .and(path("/api/merchant/my-products/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                create_mock_product(1, "Tea", "4.50"),
                create_mock_product(2, "Coffee", "12.00"),
            ])))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/merchant/my-products/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                create_mock_product(2, "Coffee", "12.00"),
            ])))
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/api/merchant/products/1/"))
            .and(header("Authorization", "Bearer a"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = MerchantClient::new(
            ClientConfig::new(mock_server.uri()),
            Arc::new(MemoryStore::new()),
        )
        .unwrap();
        client.login("shop@example.com", "secret").await.unwrap();

        let before = client.list_products().await.unwrap();
        assert_eq!(before.len(), 2);

        client.delete_product(before[0].id).await.unwrap();

        let after = client.list_products().await.unwrap();
        assert!(after.iter().all(|p| p.id != 1));
        assert_eq!(after.len(), 1);
    }

    /// Editing sends the full field set taken from the existing product.
    #[tokio::test]
    async fn test_edit_existing_product() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/merchant/products/2/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(create_mock_product(2, "Coffee", "12.00")),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/api/merchant/products/2/"))
            .and(body_json(serde_json::json!({
                "name": "Coffee",
                "description": "",
                "price": "13.00"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(create_mock_product(2, "Coffee", "13.00")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemoryStore::new());
        store.set("accessToken", "a").unwrap();
        store.set("user", r#"{"id":7,"username":"shop"}"#).unwrap();
        let client = MerchantClient::new(ClientConfig::new(mock_server.uri()), store).unwrap();

        let product = client.get_product(2).await.unwrap();
        let mut input = ProductInput::from(&product);
        input.price = "13.00".into();

        let updated = client.update_product(product.id, &input).await.unwrap();
        assert_eq!(updated.price, "13.00");
    }
}

// =============================================================================
// Persistent Session Flow Tests
// =============================================================================

mod persistent_session {
    use super::*;

    /// A session stored in a file survives into a new client.
    #[tokio::test]
    async fn test_session_survives_restart() {
        let mock_server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let session_path = dir.path().join("session.json");

        Mock::given(method("POST"))
            .and(path("/api/auth/token/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access": "persisted_access",
                "refresh": "persisted_refresh",
                "user": {"id": 1, "username": "root", "is_superuser": true}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/auth/users/"))
            .and(header("Authorization", "Bearer persisted_access"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "username": "root", "is_superuser": true}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        {
            let client = AdminClient::new(
                ClientConfig::new(mock_server.uri()),
                Arc::new(FileStore::new(&session_path)),
            )
            .unwrap();
            client.login("root", "pw").await.unwrap();
        }

        let client = AdminClient::new(
            ClientConfig::new(mock_server.uri()),
            Arc::new(FileStore::new(&session_path)),
        )
        .unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.user().unwrap().username, "root");

        let users = client.list_users().await.unwrap();
        assert_eq!(users[0].role_label(), "Superuser");

        client.logout();
        let reopened = AdminClient::new(
            ClientConfig::new(mock_server.uri()),
            Arc::new(FileStore::new(&session_path)),
        )
        .unwrap();
        assert!(!reopened.is_authenticated());
    }

    /// Admin and merchant sessions share one file without clobbering each other.
    #[tokio::test]
    async fn test_portals_share_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path().join("session.json")));

        store.set("adminAccessToken", "admin").unwrap();
        store.set("adminUser", r#"{"id":1,"username":"root"}"#).unwrap();
        store.set("accessToken", "merchant").unwrap();
        store.set("user", r#"{"id":7,"username":"shop"}"#).unwrap();

        let admin = AdminClient::new(ClientConfig::default(), store.clone()).unwrap();
        let merchant = MerchantClient::new(ClientConfig::default(), store.clone()).unwrap();

        assert_eq!(admin.access_token().as_deref(), Some("admin"));
        assert_eq!(merchant.access_token().as_deref(), Some("merchant"));

        merchant.logout();
        assert!(admin.is_authenticated());
        assert!(!merchant.is_authenticated());
    }
}

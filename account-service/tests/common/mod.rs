use std::sync::Arc;
use std::time::Duration;

use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use auth::Authenticator;
use auth::SigningKey;

const TEST_SIGNING_KEY: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
///
/// Uses the in-memory repository so the full router and middleware
/// stack runs without external infrastructure.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let signing_key = SigningKey::from_bytes(TEST_SIGNING_KEY).expect("Invalid test key");
        let authenticator = Arc::new(Authenticator::new(&signing_key));

        let account_repository = Arc::new(InMemoryAccountRepository::new());
        let account_service = Arc::new(AccountService::new(
            account_repository,
            Arc::clone(&authenticator),
            Duration::from_secs(5),
        ));

        let router = create_router(account_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Sign up an account and return (account id, access token, refresh token)
    pub async fn signup(&self, email: &str, password: &str, role: &str) -> (String, String, String) {
        let response = self
            .post("/api/auth/signup")
            .json(&serde_json::json!({
                "first_name": "Ann",
                "last_name": "Lee",
                "email": email,
                "password": password,
                "phone": "555-0100",
                "role": role
            }))
            .send()
            .await
            .expect("Failed to execute signup request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["account"]["id"].as_str().unwrap().to_string(),
            body["data"]["access_token"].as_str().unwrap().to_string(),
            body["data"]["refresh_token"].as_str().unwrap().to_string(),
        )
    }
}

//! Integration tests for Orderdesk.
//!
//! Tests drive the complete admin router in-process with
//! `tower::ServiceExt::oneshot`. Orders live in an
//! [`InMemoryOrderStore`] and the caller's identity is fixed per test, so
//! no content store or identity provider account is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p orderdesk-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `access_gate` - Route access policy through the middleware
//! - `dashboard` - Listing, aggregates, caching and the delete flow
//! - `delete_api` - `POST /api/deleteOrder`

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;
use tower::ServiceExt;

use orderdesk_admin::config::{AdminConfig, AuthConfig, SanityConfig};
use orderdesk_admin::models::Identity;
use orderdesk_admin::routes;
use orderdesk_admin::services::FixedIdentityProvider;
use orderdesk_admin::state::AppState;
use orderdesk_admin::store::InMemoryOrderStore;
use orderdesk_core::{CartItem, Order, OrderId, Price};

/// Configuration that never touches the environment.
#[must_use]
pub fn test_config() -> AdminConfig {
    AdminConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://admin.test".to_string(),
        sanity: SanityConfig {
            project_id: "testproj".to_string(),
            dataset: "test".to_string(),
            api_version: "2024-12-30".to_string(),
            api_url: Some("http://127.0.0.1:9".to_string()),
            token: SecretString::from("skq8Zr2Lm4Tp7Xv1Nb6Wd3Hf9Jc5Gs0"),
        },
        auth: AuthConfig {
            jwt_key_pem: String::new(),
            authorized_parties: vec![],
            sign_in_url: Some("https://accounts.example.test/sign-in".to_string()),
        },
        listing_cache_ttl: Duration::from_secs(60),
        json_logs: false,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A price from whole cents.
#[must_use]
pub fn price(cents: i64) -> Price {
    Price::new(Decimal::new(cents, 2))
}

/// An order created at noon UTC on the given day.
#[must_use]
pub fn order(id: &str, (year, month, day): (i32, u32, u32), total: Option<Price>) -> Order {
    Order {
        id: OrderId::from(id),
        name: Some(format!("Customer {id}")),
        email: Some(format!("{id}@example.test")),
        phone: None,
        total_price: total,
        cart_items: vec![CartItem {
            key: Some(format!("{id}-item")),
            title: Some("Chair".to_string()),
            quantity: Some(2),
            price: Some(price(1200)),
            image: None,
        }],
        created_at: Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
    }
}

/// The admin app wired to an in-memory store and a fixed identity.
pub struct TestContext {
    pub store: Arc<InMemoryOrderStore>,
    pub state: AppState,
}

impl TestContext {
    #[must_use]
    pub fn new(identity: FixedIdentityProvider, orders: Vec<Order>) -> Self {
        let store = Arc::new(InMemoryOrderStore::new(orders));
        let state = AppState::new(test_config(), store.clone(), Arc::new(identity));
        Self { store, state }
    }

    /// Signed in with `isAdmin: true`.
    #[must_use]
    pub fn admin(orders: Vec<Order>) -> Self {
        Self::new(
            FixedIdentityProvider::SignedIn(Identity::new("user_admin", Some(true))),
            orders,
        )
    }

    /// Signed in with `isAdmin: false`.
    #[must_use]
    pub fn member(orders: Vec<Order>) -> Self {
        Self::new(
            FixedIdentityProvider::SignedIn(Identity::new("user_member", Some(false))),
            orders,
        )
    }

    #[must_use]
    pub fn anonymous(orders: Vec<Order>) -> Self {
        Self::new(FixedIdentityProvider::Anonymous, orders)
    }

    #[must_use]
    pub fn app(&self) -> Router {
        routes::app(self.state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, uri: &str) -> Response<Body> {
        self.send(Request::post(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> Response<Body> {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

/// Value of the `Location` header.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

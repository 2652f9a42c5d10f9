// HTTP action dispatcher - Forwards navigation requests to the host application
use crate::application::errors::DispatchError;
use crate::application::navigation_service::ActionDispatcher;
use crate::domain::navigation::NavigationRequest;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpActionDispatcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpActionDispatcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ActionDispatcher for HttpActionDispatcher {
    async fn dispatch(&self, request: &NavigationRequest) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|source| DispatchError::Transport {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Rejected { status, body });
        }

        tracing::debug!("Host accepted {}", request.display_name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
    use chrono::NaiveDate;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<Value>>>;

    async fn accept(State(seen): State<Seen>, Json(body): Json<Value>) -> StatusCode {
        seen.lock().unwrap().push(body);
        StatusCode::NO_CONTENT
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/web/action", addr)
    }

    #[tokio::test]
    async fn test_dispatch_posts_request_body() {
        let seen = Seen::default();
        let app = Router::new()
            .route("/web/action", post(accept))
            .with_state(seen.clone());
        let endpoint = serve(app).await;
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let request = NavigationRequest::about_to_expire(today);

        HttpActionDispatcher::new(endpoint).dispatch(&request).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], serde_json::to_value(&request).unwrap());
        assert_eq!(seen[0]["display_name"], "About to Expire");
    }

    #[tokio::test]
    async fn test_client_error_is_rejected() {
        let app = Router::new().route(
            "/web/action",
            post(|| async { (StatusCode::FORBIDDEN, "Access Denied") }),
        );
        let endpoint = serve(app).await;

        let result = HttpActionDispatcher::new(endpoint)
            .dispatch(&NavigationRequest::active_memberships())
            .await;

        match result {
            Err(DispatchError::Rejected { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "Access Denied");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = HttpActionDispatcher::new(format!("http://{}/web/action", addr))
            .dispatch(&NavigationRequest::expired_memberships())
            .await;
        assert!(matches!(result, Err(DispatchError::Transport { .. })));
    }
}

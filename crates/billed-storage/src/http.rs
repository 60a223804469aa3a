//! REST gateway
//!
//! Talks to the Billed API: `GET /bills`, `POST /bills` (multipart for
//! receipts, JSON for records) and `PATCH /bills/{id}`.

use async_trait::async_trait;
use billed_core::constants::BILLS_COLLECTION;
use billed_core::models::{Bill, CreateBillRequest, CreatedBill};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::traits::{require_id, BillsGateway, GatewayError, GatewayResult};

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// No credentials (public or test endpoints)
    Anonymous,
    /// `Authorization: Bearer {token}`
    Bearer(String),
}

/// HTTP `BillsGateway`
#[derive(Clone, Debug)]
pub struct HttpBillsGateway {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl HttpBillsGateway {
    pub fn new(base_url: String, auth: Auth, timeout: Duration) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, BILLS_COLLECTION)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), urlencoding::encode(id))
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::Anonymous => request,
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
        }
    }

    /// Send the request and deserialize a JSON body.
    ///
    /// Non-success statuses become `Rejected("Erreur {status}")`, which the
    /// bills page displays as is.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<T> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("Failed to send request: {}", e)))?;

        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(format!("Failed to parse response as JSON: {}", e)))
    }

    async fn check_status(response: Response) -> GatewayResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::warn!(
            status = status.as_u16(),
            body = %error_text,
            "Bills API request failed"
        );

        Err(GatewayError::Rejected(format!("Erreur {}", status.as_u16())))
    }
}

#[async_trait]
impl BillsGateway for HttpBillsGateway {
    async fn list(&self) -> GatewayResult<Vec<Bill>> {
        self.send(self.client.get(self.collection_url())).await
    }

    async fn create(&self, request: CreateBillRequest) -> GatewayResult<CreatedBill> {
        let url = self.collection_url();
        tracing::debug!(email = %request.email(), "Creating bill through the API");
        match request {
            CreateBillRequest::Receipt { email, file } => {
                let mut part = reqwest::multipart::Part::bytes(file.data.to_vec())
                    .file_name(file.name.clone());
                if let Some(content_type) = file.content_type.as_deref() {
                    part = part.mime_str(content_type).map_err(|e| {
                        GatewayError::InvalidPayload(format!("Invalid content type: {}", e))
                    })?;
                }
                let form = reqwest::multipart::Form::new()
                    .part("file", part)
                    .text("email", email);

                let mut created: CreatedBill =
                    self.send(self.client.post(&url).multipart(form)).await?;
                // The API answers with the storage reference only.
                created.file_name.get_or_insert(file.name);
                Ok(created)
            }
            CreateBillRequest::Record(bill) => self.send(self.client.post(&url).json(&bill)).await,
        }
    }

    async fn update(&self, bill: &Bill) -> GatewayResult<Bill> {
        let id = require_id(bill)?;
        self.send(self.client.patch(self.record_url(id)).json(bill))
            .await
    }
}

//! Client for the internal documents API.
//!
//! The caller's own bearer token is forwarded, so the API applies the same
//! access rules it would for the mobile app.

use serde::Deserialize;

use crate::{clients::check_status, common::error::AppError, models::envelope::Envelope};

#[derive(Clone)]
pub struct EnvelopeClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct EnvelopeList {
    #[serde(default)]
    envelopes: Vec<Envelope>,
}

impl EnvelopeClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_for_customer(
        &self,
        bearer: &str,
        customer_id: i64,
    ) -> Result<Vec<Envelope>, AppError> {
        let resp = self
            .client
            .get(format!("{}/envelopes", self.base_url))
            .bearer_auth(bearer)
            .query(&[("customerId", customer_id)])
            .send()
            .await?;

        let list: EnvelopeList = check_status(resp).await?.json().await?;
        Ok(list.envelopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_envelope_listing() {
        let list: EnvelopeList = serde_json::from_value(json!({
            "envelopes": [
                { "id": "env_1", "status": "sent", "subject": "Contract", "sentAt": "2024-06-01T12:00:00Z" },
                { "id": "env_2", "status": "draft", "subject": null, "sentAt": null }
            ]
        }))
        .unwrap();

        assert_eq!(list.envelopes.len(), 2);
        assert!(list.envelopes[1].sent_at.is_none());
    }

    #[test]
    fn missing_listing_is_empty() {
        let list: EnvelopeList = serde_json::from_value(json!({})).unwrap();
        assert!(list.envelopes.is_empty());
    }
}

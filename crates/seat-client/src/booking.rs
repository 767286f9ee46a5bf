//! Public booking API client: tenant lookup, availability, holds,
//! reservations, and policies.

use chrono::{DateTime, NaiveDate, Utc};
use seat_config::BookingConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ClientError;
use crate::http::{IDEMPOTENCY_KEY, build_client, check_response, join_url, read_json};

// ── Types ──────────────────────────────────────────────────────────

/// A restaurant tenant as exposed by the public API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    /// IANA zone name, e.g. `Europe/Dublin`.
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub tenant_id: Uuid,
    pub date: NaiveDate,
    pub party_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub table_ids: Vec<Uuid>,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldRequest {
    pub tenant_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub party_size: u32,
}

/// A short-lived claim on a slot, converted into a reservation on confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hold {
    pub id: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub hold_id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub status: String,
    pub starts_at: DateTime<Utc>,
    pub party_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPolicies {
    #[serde(default)]
    pub cancellation_hours: u32,
    #[serde(default)]
    pub deposit_required: bool,
    #[serde(default)]
    pub max_party_size: Option<u32>,
    #[serde(default)]
    pub hold_minutes: Option<u32>,
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the public booking API.
pub struct BookingClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl BookingClient {
    /// Build a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotConfigured` for an empty base URL, or
    /// `ClientError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        if base_url.trim().is_empty() {
            return Err(ClientError::NotConfigured { service: "booking" });
        }
        Ok(Self {
            http: build_client(timeout_secs)?,
            base_url: base_url.to_string(),
            api_key: None,
        })
    }

    /// Build a client from the `[booking]` config section.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &BookingConfig) -> Result<Self, ClientError> {
        let mut client = Self::new(&config.base_url, config.timeout_secs)?;
        if !config.api_key.is_empty() {
            client.api_key = Some(config.api_key.clone());
        }
        Ok(client)
    }

    /// Look up a tenant by its public slug.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, status, or parse failure.
    pub async fn tenant(&self, slug: &str) -> Result<Tenant, ClientError> {
        let url = self.tenant_url(slug);
        self.send_json(self.http.get(url)).await
    }

    /// Open slots for a party on a given day.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, status, or parse failure.
    pub async fn availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<Vec<AvailabilitySlot>, ClientError> {
        let url = self.availability_url(query);
        self.send_json(self.http.get(url)).await
    }

    /// Place a temporary hold on a slot.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, status, or parse failure.
    pub async fn create_hold(&self, request: &HoldRequest) -> Result<Hold, ClientError> {
        let url = join_url(&self.base_url, "holds");
        self.send_json(self.http.post(url).json(request)).await
    }

    /// Turn a hold into a reservation. Retrying with the same
    /// `idempotency_key` never books twice.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, status, or parse failure.
    pub async fn confirm_reservation(
        &self,
        request: &ReservationRequest,
        idempotency_key: Uuid,
    ) -> Result<Reservation, ClientError> {
        let url = join_url(&self.base_url, "reservations");
        let builder = self
            .http
            .post(url)
            .header(IDEMPOTENCY_KEY, idempotency_key.to_string())
            .json(request);
        self.send_json(builder).await
    }

    /// Booking policies for a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, status, or parse failure.
    pub async fn policies(&self, tenant_id: Uuid) -> Result<BookingPolicies, ClientError> {
        let url = join_url(&self.base_url, &format!("tenants/{tenant_id}/policies"));
        self.send_json(self.http.get(url)).await
    }

    fn tenant_url(&self, slug: &str) -> String {
        join_url(
            &self.base_url,
            &format!("tenants/by-slug/{}", urlencoding::encode(slug)),
        )
    }

    fn availability_url(&self, query: &AvailabilityQuery) -> String {
        join_url(
            &self.base_url,
            &format!(
                "availability?tenantId={}&date={}&partySize={}",
                query.tenant_id, query.date, query.party_size
            ),
        )
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        mut builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let resp = check_response(builder.send().await?).await?;
        let body = read_json(resp).await?;
        serde_json::from_value(body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> BookingClient {
        BookingClient::new("https://book.example.com/api/", 5).unwrap()
    }

    #[test]
    fn unconfigured_booking_is_rejected() {
        let err = BookingClient::from_config(&BookingConfig::default()).err();
        assert!(matches!(
            err,
            Some(ClientError::NotConfigured { service: "booking" })
        ));
    }

    #[test]
    fn tenant_slug_is_percent_encoded() {
        assert_eq!(
            client().tenant_url("café del mar"),
            "https://book.example.com/api/tenants/by-slug/caf%C3%A9%20del%20mar"
        );
    }

    #[test]
    fn availability_query_uses_camel_case_params() {
        let query = AvailabilityQuery {
            tenant_id: Uuid::nil(),
            date: NaiveDate::from_ymd_opt(2026, 10, 24).unwrap(),
            party_size: 4,
        };
        assert_eq!(
            client().availability_url(&query),
            "https://book.example.com/api/availability?tenantId=00000000-0000-0000-0000-000000000000&date=2026-10-24&partySize=4"
        );
    }

    #[test]
    fn reservation_request_omits_absent_optionals() {
        let request = ReservationRequest {
            hold_id: Uuid::nil(),
            guest_name: "Ada".into(),
            guest_email: "ada@example.com".into(),
            guest_phone: None,
            notes: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "holdId": Uuid::nil(),
                "guestName": "Ada",
                "guestEmail": "ada@example.com"
            })
        );
    }

    #[test]
    fn policies_parse_with_defaults() {
        let policies: BookingPolicies =
            serde_json::from_str(r#"{"depositRequired": true}"#).unwrap();
        assert!(policies.deposit_required);
        assert_eq!(policies.cancellation_hours, 0);
        assert_eq!(policies.max_party_size, None);
    }

    #[test]
    fn availability_slots_parse() {
        let slots: Vec<AvailabilitySlot> = serde_json::from_str(
            r#"[{"startsAt": "2026-10-24T19:00:00Z", "available": true}]"#,
        )
        .unwrap();
        assert_eq!(slots.len(), 1);
        assert!(slots[0].table_ids.is_empty());
    }
}

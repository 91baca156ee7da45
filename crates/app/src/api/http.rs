//! HTTP+JSON client for the booking backend.

use std::time::Duration;

use async_trait::async_trait;
use encore::{add_ons::AddOn, offerings::Offering, promotions::PromotionCode};
use jiff::Timestamp;
use reqwest::{Client, RequestBuilder, StatusCode};
use rusty_money::{Money, iso::Currency};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    api::{ApiError, BookingApi, ServerRejection},
    bookings::BookingResult,
    config::ApiConfig,
    dto::{
        BookingRequest, Envelope, RawAddOn, RawBooking, RawErrorBody, RawOffering, RawPromotion,
        normalize_add_on, normalize_booking, normalize_offering, normalize_promotion,
        promotions::ValidatePromotionRequest,
    },
    session::SessionContext,
};

/// [`BookingApi`] over HTTP, authenticated with the session's bearer token.
#[derive(Debug, Clone)]
pub struct HttpBookingApi {
    http: Client,
    base_url: String,
    session: SessionContext,
    currency: &'static Currency,
}

impl HttpBookingApi {
    /// Create a client for `config.base_url`, pricing everything in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: &ApiConfig,
        session: SessionContext,
        currency: &'static Currency,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(10)))
            .user_agent(concat!("encore/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            currency,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.session.token())
    }

    async fn execute(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, ApiError> {
        debug!(method, path, "sending request");

        let response = self.authorized(request).send().await.inspect_err(|error| {
            warn!(method, path, %error, "request failed to complete");
        })?;

        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let rejection =
                ServerRejection::from_response(status.as_u16(), &RawErrorBody::parse(&body));

            warn!(
                method,
                path,
                status = status.as_u16(),
                kind = ?rejection.kind(),
                "request rejected"
            );

            return Err(rejection.into());
        }

        debug!(
            method,
            path,
            status = status.as_u16(),
            bytes = body.len(),
            "request succeeded"
        );

        Ok(body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, ApiError> {
        let request = self.http.get(self.url(path));
        let body = self.execute("GET", path, request).await?;

        decode(&body)?.ok_or_else(|| missing_body(path))
    }
}

/// Decode a possibly empty, possibly enveloped JSON body.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    Ok(serde_json::from_slice::<Option<Envelope<T>>>(body)?.map(Envelope::into_inner))
}

fn missing_body(path: &str) -> ApiError {
    ApiError::Decode(serde::de::Error::custom(format!(
        "empty response body from {path}"
    )))
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn fetch_offerings(&self) -> Result<Vec<Offering<'static>>, ApiError> {
        let raw: Vec<RawOffering> = self.get("offerings").await?;

        raw.into_iter()
            .map(|offering| normalize_offering(offering, self.currency).map_err(ApiError::from))
            .collect()
    }

    async fn fetch_add_ons(&self) -> Result<Vec<AddOn<'static>>, ApiError> {
        let raw: Vec<RawAddOn> = self.get("add-ons").await?;

        raw.into_iter()
            .map(|add_on| normalize_add_on(add_on, self.currency).map_err(ApiError::from))
            .collect()
    }

    async fn fetch_bookings(&self) -> Result<Vec<BookingResult>, ApiError> {
        let raw: Vec<RawBooking> = self.get("bookings").await?;

        raw.into_iter()
            .map(|booking| normalize_booking(booking, self.currency).map_err(ApiError::from))
            .collect()
    }

    async fn validate_promotion(
        &self,
        code: &str,
        subtotal: Money<'static, Currency>,
        when: Timestamp,
    ) -> Result<Option<PromotionCode<'static>>, ApiError> {
        let path = "promotions/validate";
        let request = self
            .http
            .post(self.url(path))
            .json(&ValidatePromotionRequest::new(code, subtotal, when));

        let body = match self.execute("POST", path, request).await {
            Ok(body) => body,
            Err(ApiError::Rejected(rejection))
                if rejection.status() == StatusCode::NOT_FOUND.as_u16() =>
            {
                debug!(code, "promotion code not found");

                return Ok(None);
            }
            Err(error) => return Err(error),
        };

        let Some(raw) = decode::<RawPromotion>(&body)? else {
            return Ok(None);
        };

        Ok(Some(normalize_promotion(raw, self.currency)?))
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingResult, ApiError> {
        let path = "bookings";
        let builder = self
            .http
            .post(self.url(path))
            .header("Idempotency-Key", request.idempotency_key.to_string())
            .json(request);

        let body = self.execute("POST", path, builder).await?;
        let raw: RawBooking = decode(&body)?.ok_or_else(|| missing_body(path))?;

        Ok(normalize_booking(raw, self.currency)?)
    }
}

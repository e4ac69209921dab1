use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{Address, AddressSearch, CityLookup, PostalCodeLookup, PostalCodeSearch};

/// Errors raised while building a [`ViaCepClient`].
#[derive(Debug, Error)]
pub enum LookupClientError {
    #[error("invalid lookup base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// HTTP client for a ViaCEP-compatible postal-code API.
///
/// Requests go to `{base}/{cep}/json/` and `{base}/{state}/{city}/{street}/json/`.
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: Client,
    base_url: Url,
}

impl ViaCepClient {
    /// Build a client whose every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, LookupClientError> {
        let invalid = |reason: String| LookupClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let base_url = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("url cannot be a base".to_string()));
        }

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `with_client`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("json").push("");
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| format!("request failed: {err}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("unexpected status {status}"));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| format!("malformed response: {err}"))
    }
}

#[async_trait]
impl PostalCodeLookup for ViaCepClient {
    async fn resolve_city(&self, postal_code: &str) -> CityLookup {
        let url = self.endpoint(&[postal_code]);
        log::debug!("Resolving postal code {postal_code} via {url}");

        let address = match self.fetch::<Address>(url).await {
            Ok(address) => address,
            Err(reason) => {
                log::warn!("Postal code lookup for {postal_code} failed: {reason}");
                return CityLookup::LookupFailed(reason);
            }
        };

        match address.city() {
            Some(city) => CityLookup::Resolved(city.to_string()),
            None => {
                let reason = if address.erro {
                    "postal code not found".to_string()
                } else {
                    "response has no city".to_string()
                };
                log::warn!("Postal code lookup for {postal_code} failed: {reason}");
                CityLookup::LookupFailed(reason)
            }
        }
    }
}

#[async_trait]
impl AddressSearch for ViaCepClient {
    async fn search_postal_code(
        &self,
        state: &str,
        city: &str,
        street: &str,
    ) -> PostalCodeSearch {
        let url = self.endpoint(&[state, city, street]);
        log::debug!("Searching postal code via {url}");

        match self.fetch::<Vec<Address>>(url).await {
            Ok(addresses) => addresses
                .into_iter()
                .find_map(|address| address.cep.filter(|cep| !cep.trim().is_empty()))
                .map(PostalCodeSearch::Found)
                .unwrap_or(PostalCodeSearch::NoMatch),
            Err(reason) => {
                log::warn!("Address search for {state}/{city}/{street} failed: {reason}");
                PostalCodeSearch::LookupFailed(reason)
            }
        }
    }
}

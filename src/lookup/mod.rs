//! Outbound postal-code lookups.
//!
//! The traits here are the seams used by the services; [`viacep::ViaCepClient`]
//! is the HTTP implementation wired in by `main`.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

pub mod viacep;

pub use viacep::{LookupClientError, ViaCepClient};

/// Outcome of resolving a postal code to a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityLookup {
    /// The lookup succeeded and returned the city name.
    Resolved(String),
    /// Transport, status or payload failure, with a human-readable reason.
    LookupFailed(String),
}

/// Outcome of searching a postal code by state, city and street.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeSearch {
    Found(String),
    NoMatch,
    LookupFailed(String),
}

/// Resolves the city served by a postal code.
#[async_trait]
pub trait PostalCodeLookup: Send + Sync {
    async fn resolve_city(&self, postal_code: &str) -> CityLookup;
}

/// Finds the postal code of a street address.
#[async_trait]
pub trait AddressSearch: Send + Sync {
    async fn search_postal_code(&self, state: &str, city: &str, street: &str)
    -> PostalCodeSearch;
}

/// Address payload returned by the lookup API. Never persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub cep: Option<String>,
    /// Street name.
    #[serde(default)]
    pub logradouro: Option<String>,
    /// Neighbourhood.
    #[serde(default)]
    pub bairro: Option<String>,
    /// City.
    #[serde(default)]
    pub localidade: Option<String>,
    /// State abbreviation.
    #[serde(default)]
    pub uf: Option<String>,
    /// Set by the API when the postal code does not exist.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub erro: bool,
}

impl Address {
    /// City name, if the payload carries a usable one.
    pub fn city(&self) -> Option<&str> {
        if self.erro {
            return None;
        }
        self.localidade
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

// The API has sent the error flag both as `true` and as `"true"`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(flag)) => flag,
        Some(serde_json::Value::String(text)) => text.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

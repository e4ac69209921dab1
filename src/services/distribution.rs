//! Checks a product's distribution center against the city of a postal code.

use crate::forms::products::{AddressSearchQuery, DistributionQuery};
use crate::lookup::{AddressSearch, CityLookup, PostalCodeLookup, PostalCodeSearch};
use crate::repository::ProductReader;
use crate::services::{ServiceError, ServiceResult};

/// Result of comparing a resolved city with a distribution center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionMatch {
    /// The postal code belongs to the distribution center's city.
    Match,
    /// The postal code resolved to a different city.
    Mismatch { city: String },
    /// The postal code could not be resolved.
    LookupFailed(String),
}

impl DistributionMatch {
    pub fn is_match(&self) -> bool {
        matches!(self, DistributionMatch::Match)
    }
}

/// Compares a lookup outcome with a distribution center, ignoring case.
pub fn compare_distribution_center(
    lookup: CityLookup,
    distribution_center: Option<&str>,
) -> DistributionMatch {
    let city = match lookup {
        CityLookup::Resolved(city) => city,
        CityLookup::LookupFailed(reason) => return DistributionMatch::LookupFailed(reason),
    };

    let Some(center) = distribution_center else {
        return DistributionMatch::Mismatch { city };
    };

    if city.trim().to_lowercase() == center.trim().to_lowercase() {
        DistributionMatch::Match
    } else {
        DistributionMatch::Mismatch { city }
    }
}

/// `true` only when `postal_code` resolves to the city named by `distribution_center`.
///
/// A failed lookup or a missing center yields `false`.
pub async fn matches<L>(lookup: &L, postal_code: &str, distribution_center: Option<&str>) -> bool
where
    L: PostalCodeLookup + ?Sized,
{
    let resolved = lookup.resolve_city(postal_code).await;
    compare_distribution_center(resolved, distribution_center).is_match()
}

/// Resolves the postal code and compares it with the product's distribution center.
pub async fn check_product_distribution<R, L>(
    repo: &R,
    lookup: &L,
    query: DistributionQuery,
) -> ServiceResult<DistributionMatch>
where
    R: ProductReader + ?Sized,
    L: PostalCodeLookup + ?Sized,
{
    let (postal_code, product_id) = query.into_parts()?;

    let product = repo
        .get_product_by_id(&product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let resolved = lookup.resolve_city(&postal_code).await;
    let outcome = compare_distribution_center(resolved, Some(&product.distribution_center));

    log::debug!(
        "Distribution check for product {} and postal code {postal_code}: {outcome:?}",
        product.id
    );

    Ok(outcome)
}

/// Finds the postal code of a street address.
pub async fn search_postal_code<S>(search: &S, query: AddressSearchQuery) -> ServiceResult<String>
where
    S: AddressSearch + ?Sized,
{
    let (state, city, street) = query.into_parts()?;

    match search.search_postal_code(&state, &city, &street).await {
        PostalCodeSearch::Found(cep) => Ok(cep),
        PostalCodeSearch::NoMatch => Err(ServiceError::NotFound),
        PostalCodeSearch::LookupFailed(reason) => Err(ServiceError::Upstream(reason)),
    }
}

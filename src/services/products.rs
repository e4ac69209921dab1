use crate::domain::product::{Product, ProductListQuery};
use crate::forms::products::{AddProductForm, CategoryQuery, EditProductForm, sanitize_product_id};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Number of products returned by the price ranking endpoint.
pub const TOP_PRODUCTS_LIMIT: usize = 5;

/// Lists every active product in store order.
pub fn list_active_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    repo.list_products(ProductListQuery::new())
        .map_err(ServiceError::from)
}

/// Lists active products whose category equals the requested one.
///
/// Deactivated products are hidden here, the same as in every other listing.
pub fn list_products_in_category<R>(repo: &R, query: CategoryQuery) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let category = query.into_category()?;

    repo.list_products(ProductListQuery::new().category(category))
        .map_err(ServiceError::from)
}

/// Loads one product by id regardless of its active flag.
pub fn get_product<R>(repo: &R, product_id: &str) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let product_id = sanitize_product_id(product_id).map_err(|_| ServiceError::NotFound)?;

    repo.get_product_by_id(&product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Returns at most `limit` active products ordered by descending price.
///
/// Equal prices keep store order.
pub fn top_products_by_price<R>(repo: &R, limit: usize) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let mut products = list_active_products(repo)?;
    products.sort_by(|a, b| b.price.cmp(&a.price));
    products.truncate(limit);
    Ok(products)
}

/// Validates the payload and stores a new active product.
pub fn create_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let new_product = form.into_new_product()?;

    let created = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;
    log::info!("Created product {} ({})", created.id, created.name);

    Ok(created)
}

/// Applies a name and price change to an existing product.
pub fn update_product<R>(repo: &R, form: EditProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let (product_id, updates) = form.into_update_product()?;

    repo.update_product(&product_id, &updates)
        .map_err(ServiceError::from)
}

/// Marks a product inactive. The record stays fetchable by id.
pub fn deactivate_product<R>(repo: &R, product_id: &str) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let product_id = sanitize_product_id(product_id).map_err(|_| ServiceError::NotFound)?;

    repo.deactivate_product(&product_id)
        .map_err(ServiceError::from)?;
    log::info!("Deactivated product {product_id}");

    Ok(())
}

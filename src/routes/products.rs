use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::products::{
    AddProductForm, AddressSearchQuery, CategoryQuery, DistributionQuery, EditProductForm,
};
use crate::lookup::{AddressSearch, PostalCodeLookup};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::distribution::{self, DistributionMatch};
use crate::services::products::{self, TOP_PRODUCTS_LIMIT};

#[get("/product")]
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match products::list_active_products(repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response(err, "list products"),
    }
}

#[get("/product/cep")]
/// Return the postal code of the given street address as plain text.
pub async fn search_postal_code(
    params: web::Query<AddressSearchQuery>,
    search: web::Data<dyn AddressSearch>,
) -> impl Responder {
    match distribution::search_postal_code(search.get_ref(), params.into_inner()).await {
        Ok(cep) => HttpResponse::Ok().content_type("text/plain").body(cep),
        Err(err) => error_response(err, "search postal code"),
    }
}

#[get("/product/distribution")]
/// Return `true` when the postal code lies in the product's distribution center city.
///
/// An unreachable lookup API yields `502 Bad Gateway` instead of `false`.
pub async fn check_distribution(
    params: web::Query<DistributionQuery>,
    repo: web::Data<DieselRepository>,
    lookup: web::Data<dyn PostalCodeLookup>,
) -> impl Responder {
    match distribution::check_product_distribution(
        repo.get_ref(),
        lookup.get_ref(),
        params.into_inner(),
    )
    .await
    {
        Ok(DistributionMatch::LookupFailed(reason)) => {
            error_response(ServiceError::Upstream(reason), "check distribution center")
        }
        Ok(outcome) => HttpResponse::Ok().json(outcome.is_match()),
        Err(err) => error_response(err, "check distribution center"),
    }
}

#[get("/product/endpoint1")]
pub async fn list_products_by_category(
    params: web::Query<CategoryQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products_in_category(repo.get_ref(), params.into_inner()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response(err, "list products by category"),
    }
}

#[get("/product/endpoint2/{id}")]
pub async fn show_product(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::get_product(repo.get_ref(), &product_id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "load product"),
    }
}

#[get("/product/endpoint3/top5byprice")]
pub async fn top_products_by_price(repo: web::Data<DieselRepository>) -> impl Responder {
    match products::top_products_by_price(repo.get_ref(), TOP_PRODUCTS_LIMIT) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response(err, "rank products by price"),
    }
}

#[get("/product/category/{categoryAsPath}")]
/// Same listing as `/product/endpoint1`; the category comes from `categoryAsParam`.
pub async fn list_products_by_category_path(
    params: web::Query<CategoryQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products_in_category(repo.get_ref(), params.into_inner()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response(err, "list products by category"),
    }
}

#[post("/product")]
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), form.into_inner()) {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(err) => error_response(err, "create product"),
    }
}

#[put("/product")]
pub async fn edit_product(
    repo: web::Data<DieselRepository>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    match products::update_product(repo.get_ref(), form.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "update product"),
    }
}

#[delete("/product/{id}")]
pub async fn delete_product(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::deactivate_product(repo.get_ref(), &product_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "delete product"),
    }
}

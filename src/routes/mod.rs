use actix_web::{HttpRequest, HttpResponse, error, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod products;

/// JSON body returned with every error status.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Maps a service failure to its HTTP response, logging server-side failures.
pub fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody::new("not found")),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(ErrorBody::new(message)),
        ServiceError::Upstream(reason) => {
            log::warn!("Failed to {action}: upstream lookup failed: {reason}");
            HttpResponse::BadGateway().json(ErrorBody::new("address lookup failed"))
        }
        ServiceError::Internal(reason) => {
            log::error!("Failed to {action}: {reason}");
            HttpResponse::InternalServerError().json(ErrorBody::new("internal server error"))
        }
    }
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
    error::InternalError::from_response(err, response).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
    error::InternalError::from_response(err, response).into()
}

/// Registers the product endpoints and extractor settings on an app.
///
/// The repository and lookup handles are expected as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(products::list_products)
        .service(products::search_postal_code)
        .service(products::check_distribution)
        .service(products::list_products_by_category)
        .service(products::show_product)
        .service(products::top_products_by_price)
        .service(products::list_products_by_category_path)
        .service(products::add_product)
        .service(products::edit_product)
        .service(products::delete_product);
}

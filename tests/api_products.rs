use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use inventory_products::domain::product::Product;
use inventory_products::lookup::{
    AddressSearch, CityLookup, PostalCodeLookup, PostalCodeSearch,
};
use inventory_products::repository::{DieselRepository, ProductWriter};
use inventory_products::routes;

mod common;

/// Lookup stub answering every request with the same outcome.
struct StubLookup {
    city: CityLookup,
    search: PostalCodeSearch,
}

#[async_trait]
impl PostalCodeLookup for StubLookup {
    async fn resolve_city(&self, _postal_code: &str) -> CityLookup {
        self.city.clone()
    }
}

#[async_trait]
impl AddressSearch for StubLookup {
    async fn search_postal_code(&self, _: &str, _: &str, _: &str) -> PostalCodeSearch {
        self.search.clone()
    }
}

fn resolving_to(city: &str) -> Arc<StubLookup> {
    Arc::new(StubLookup {
        city: CityLookup::Resolved(city.to_string()),
        search: PostalCodeSearch::Found("01001-000".to_string()),
    })
}

macro_rules! init_app {
    ($repo:expr, $lookup:expr) => {{
        let lookup = $lookup;
        let postal: Arc<dyn PostalCodeLookup> = lookup.clone();
        let search: Arc<dyn AddressSearch> = lookup;
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo.clone()))
                .app_data(web::Data::from(postal))
                .app_data(web::Data::from(search))
                .configure(routes::configure),
        )
        .await
    }};
}

fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[actix_web::test]
async fn post_then_list_by_category() {
    let test_db = common::TestDb::new("api_post_then_list_by_category.db");
    let repo = test_db.repo();
    let app = init_app!(repo, resolving_to("Springfield"));

    let req = test::TestRequest::post()
        .uri("/product")
        .set_json(json!({
            "name": "Widget",
            "price": 100,
            "category": "tools",
            "distribution_center": "Springfield"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::get()
        .uri("/product/endpoint1?categoryAsParam=tools")
        .to_request();
    let products: Vec<Product> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&products), vec!["Widget"]);
    assert!(products[0].active);
    assert_eq!(products[0].distribution_center, "Springfield");
}

#[actix_web::test]
async fn post_rejects_invalid_body() {
    let test_db = common::TestDb::new("api_post_rejects_invalid_body.db");
    let repo = test_db.repo();
    let app = init_app!(repo, resolving_to("Springfield"));

    let missing_field = test::TestRequest::post()
        .uri("/product")
        .set_json(json!({ "name": "Widget", "price": 100, "category": "tools" }))
        .to_request();
    let resp = test::call_service(&app, missing_field).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let negative_price = test::TestRequest::post()
        .uri("/product")
        .set_json(json!({
            "name": "Widget",
            "price": -1,
            "category": "tools",
            "distribution_center": "Springfield"
        }))
        .to_request();
    let resp = test::call_service(&app, negative_price).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());

    let req = test::TestRequest::get().uri("/product").to_request();
    let products: Vec<Product> = test::call_and_read_body_json(&app, req).await;
    assert!(products.is_empty());
}

#[actix_web::test]
async fn delete_hides_product_from_listings_but_keeps_it_fetchable() {
    let test_db = common::TestDb::new("api_delete_soft.db");
    let repo = test_db.repo();
    let widget = common::seed_product(&repo, "Widget", 100, "tools", "Springfield");
    common::seed_product(&repo, "Wrench", 80, "tools", "Springfield");
    let app = init_app!(repo, resolving_to("Springfield"));

    let req = test::TestRequest::delete()
        .uri(&format!("/product/{}", widget.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/product").to_request();
    let products: Vec<Product> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&products), vec!["Wrench"]);

    let req = test::TestRequest::get()
        .uri(&format!("/product/endpoint2/{}", widget.id))
        .to_request();
    let product: Product = test::call_and_read_body_json(&app, req).await;
    assert_eq!(product.id, widget.id);
    assert!(!product.active);

    // Category listings hide inactive products as well.
    for uri in [
        "/product/endpoint1?categoryAsParam=tools",
        "/product/category/anything?categoryAsParam=tools",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let products: Vec<Product> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&products), vec!["Wrench"], "{uri}");
    }
}

#[actix_web::test]
async fn unknown_ids_are_not_found() {
    let test_db = common::TestDb::new("api_unknown_ids.db");
    let repo = test_db.repo();
    let app = init_app!(repo, resolving_to("Springfield"));
    let missing = uuid::Uuid::new_v4().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/product/endpoint2/{missing}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::get()
        .uri("/product/endpoint2/not-a-uuid")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/product/{missing}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::put()
        .uri("/product")
        .set_json(json!({ "id": missing, "name": "Ghost", "price": 1 }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn put_updates_only_name_and_price() {
    let test_db = common::TestDb::new("api_put_updates.db");
    let repo = test_db.repo();
    let widget = common::seed_product(&repo, "Widget", 100, "tools", "Springfield");
    let app = init_app!(repo, resolving_to("Springfield"));

    let req = test::TestRequest::put()
        .uri("/product")
        .set_json(json!({
            "id": widget.id,
            "name": "Gadget",
            "price": 150,
            "category": "toys",
            "distribution_center": "Shelbyville"
        }))
        .to_request();
    let updated: Product = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.name, "Gadget");
    assert_eq!(updated.price, 150);

    let req = test::TestRequest::get()
        .uri(&format!("/product/endpoint2/{}", widget.id))
        .to_request();
    let stored: Product = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored.name, "Gadget");
    assert_eq!(stored.price, 150);
    assert_eq!(stored.category, "tools");
    assert_eq!(stored.distribution_center, "Springfield");
    assert!(stored.active);
}

#[actix_web::test]
async fn top5_returns_highest_priced_active_products() {
    let test_db = common::TestDb::new("api_top5.db");
    let repo = test_db.repo();
    for (name, price) in [
        ("A", 10),
        ("B", 70),
        ("C", 30),
        ("D", 90),
        ("E", 50),
        ("F", 5),
        ("G", 40),
    ] {
        common::seed_product(&repo, name, price, "misc", "Springfield");
    }
    let expensive = common::seed_product(&repo, "H", 1000, "misc", "Springfield");
    repo.deactivate_product(&expensive.id).unwrap();
    let app = init_app!(repo, resolving_to("Springfield"));

    let req = test::TestRequest::get()
        .uri("/product/endpoint3/top5byprice")
        .to_request();
    let products: Vec<Product> = test::call_and_read_body_json(&app, req).await;

    let prices: Vec<i64> = products.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![90, 70, 50, 40, 30]);
}

#[actix_web::test]
async fn category_path_endpoint_requires_query_parameter() {
    let test_db = common::TestDb::new("api_category_path.db");
    let repo = test_db.repo();
    common::seed_product(&repo, "Widget", 100, "tools", "Springfield");
    common::seed_product(&repo, "Apple", 5, "food", "Springfield");
    let app = init_app!(repo, resolving_to("Springfield"));

    // The path segment is not read; the query parameter decides.
    let req = test::TestRequest::get()
        .uri("/product/category/food?categoryAsParam=tools")
        .to_request();
    let products: Vec<Product> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&products), vec!["Widget"]);

    let req = test::TestRequest::get()
        .uri("/product/category/tools")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn distribution_check_compares_cities() {
    let test_db = common::TestDb::new("api_distribution.db");
    let repo = test_db.repo();
    let widget = common::seed_product(&repo, "Widget", 100, "tools", "Springfield");

    let app = init_app!(repo, resolving_to("Shelbyville"));
    let req = test::TestRequest::get()
        .uri(&format!(
            "/product/distribution?cep=00000000&productId={}",
            widget.id
        ))
        .to_request();
    let same_city: bool = test::call_and_read_body_json(&app, req).await;
    assert!(!same_city);

    let app = init_app!(repo, resolving_to("SPRINGFIELD"));
    let req = test::TestRequest::get()
        .uri(&format!(
            "/product/distribution?cep=00000-000&productId={}",
            widget.id
        ))
        .to_request();
    let same_city: bool = test::call_and_read_body_json(&app, req).await;
    assert!(same_city);
}

#[actix_web::test]
async fn distribution_check_reports_failed_lookup_as_bad_gateway() {
    let test_db = common::TestDb::new("api_distribution_failure.db");
    let repo = test_db.repo();
    let widget = common::seed_product(&repo, "Widget", 100, "tools", "Springfield");
    let app = init_app!(
        repo,
        Arc::new(StubLookup {
            city: CityLookup::LookupFailed("timeout".to_string()),
            search: PostalCodeSearch::LookupFailed("timeout".to_string()),
        })
    );

    let req = test::TestRequest::get()
        .uri(&format!(
            "/product/distribution?cep=00000000&productId={}",
            widget.id
        ))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_GATEWAY
    );

    let req = test::TestRequest::get()
        .uri("/product/distribution?cep=abc&productId=whatever")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/product/cep?state=RS&city=Gravatai&street=Barroso")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_GATEWAY
    );
}

#[actix_web::test]
async fn postal_code_search_returns_plain_string() {
    let test_db = common::TestDb::new("api_postal_code_search.db");
    let repo: DieselRepository = test_db.repo();
    let app = init_app!(repo, resolving_to("Springfield"));

    let req = test::TestRequest::get()
        .uri("/product/cep?state=SP&city=Sao%20Paulo&street=Praca%20da%20Se")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), b"01001-000");

    let req = test::TestRequest::get()
        .uri("/product/cep?state=SP&city=Sao%20Paulo")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

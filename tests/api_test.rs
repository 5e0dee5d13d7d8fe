//! HTTP-level tests: the storefront routes mounted on an in-process actix app.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use storefront_service::application::storefront_service::StorefrontService;
use storefront_service::configure;
use storefront_service::domain::category::default_categories;
use storefront_service::infrastructure::catalog::StaticCatalog;
use storefront_service::infrastructure::session_repo::InMemorySessionRepository;
use storefront_service::Storefront;

const CATALOG: &str = r#"[
    {"id": 1, "name": "Red Shirt", "price": "500", "category": "clothes",
     "image": "/img/shirt.jpg", "rating": 4.6, "reviews": 31, "in_stock": true},
    {"id": 2, "name": "Электрический чайник", "price": "1200", "original_price": "1500",
     "category": "home", "image": "/img/kettle.jpg", "rating": 4.8, "reviews": 7, "in_stock": true},
    {"id": 3, "name": "Desk Lamp", "price": "900", "category": "home",
     "image": "/img/lamp.jpg", "rating": 3.9, "reviews": 2, "in_stock": false}
]"#;

fn storefront(catalog: &str) -> web::Data<Storefront> {
    let catalog = StaticCatalog::from_json(catalog).expect("valid catalog");
    web::Data::new(StorefrontService::new(
        catalog,
        InMemorySessionRepository::new(),
        default_categories(),
    ))
}

macro_rules! app {
    ($catalog:expr) => {
        test::init_service(
            App::new()
                .app_data(storefront($catalog))
                .configure(configure),
        )
        .await
    };
}

macro_rules! start_session {
    ($app:expr) => {{
        let req = test::TestRequest::post().uri("/sessions").to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["id"].as_str().expect("session id").to_string()
    }};
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn categories_listed_with_glyphs() {
    let app = app!(CATALOG);
    let req = test::TestRequest::get().uri("/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let categories = body.as_array().expect("array");
    assert_eq!(categories.len(), 7);
    assert_eq!(categories[0]["id"], "all");
    assert_eq!(categories[0]["icon"], "Grid3X3");
    assert_eq!(categories[4]["name"], "Одежда");
}

#[actix_web::test]
async fn browse_defaults_to_everything() {
    let app = app!(CATALOG);
    let req = test::TestRequest::get().uri("/products").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 3);
    let ids: Vec<i64> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(body["no_results"].is_null());
}

#[actix_web::test]
async fn browse_renders_card_details() {
    let app = app!(CATALOG);
    let req = test::TestRequest::get()
        .uri("/products?category=home")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let kettle = &body["products"][0];
    assert_eq!(kettle["price"], "1200");
    assert_eq!(kettle["price_display"], "1\u{a0}200 ₽");
    assert_eq!(kettle["discount_percent"], 20);
    assert_eq!(kettle["filled_stars"], 4);
    assert_eq!(kettle["availability_label"], "В корзину");

    let lamp = &body["products"][1];
    assert_eq!(lamp["in_stock"], false);
    assert_eq!(lamp["availability_label"], "Нет в наличии");
    assert!(lamp["discount_percent"].is_null());
}

#[actix_web::test]
async fn browse_search_is_case_insensitive() {
    let app = app!(CATALOG);
    let req = test::TestRequest::get()
        .uri("/products?q=%D0%A7%D0%90%D0%99%D0%9D%D0%98%D0%9A") // "ЧАЙНИК"
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["products"][0]["id"], 2);
}

#[actix_web::test]
async fn browse_without_matches_shows_no_results_block() {
    let app = app!(CATALOG);
    let req = test::TestRequest::get().uri("/products?q=telescope").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 0);
    assert_eq!(body["no_results"]["title"], "Товары не найдены");
}

#[actix_web::test]
async fn browse_empty_catalog_counts_zero() {
    let app = app!("[]");
    let req = test::TestRequest::get().uri("/products").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 0);
}

#[actix_web::test]
async fn browse_unknown_category_is_bad_request() {
    let app = app!(CATALOG);
    let req = test::TestRequest::get().uri("/products?category=toys").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Sessions ──────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn new_session_page() {
    let app = app!(CATALOG);
    let id = start_session!(app);

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["session_id"], id.as_str());
    assert_eq!(body["selected_category"], "all");
    assert_eq!(body["heading"], "Все товары");
    assert_eq!(body["grid"]["count"], 3);
    assert_eq!(body["cart_visible"], false);
    assert_eq!(body["cart"]["total_items"], 0);
    assert_eq!(body["cart"]["empty_message"], "Корзина пуста");
}

#[actix_web::test]
async fn unknown_session_is_not_found() {
    let app = app!(CATALOG);
    let req = test::TestRequest::get()
        .uri("/sessions/00000000-0000-0000-0000-000000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[actix_web::test]
async fn ended_session_is_gone() {
    let app = app!(CATALOG);
    let id = start_session!(app);

    let req = test::TestRequest::delete()
        .uri(&format!("/sessions/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn category_and_search_narrow_the_grid() {
    let app = app!(CATALOG);
    let id = start_session!(app);

    let req = test::TestRequest::put()
        .uri(&format!("/sessions/{id}/category"))
        .set_json(json!({ "category": "home" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["heading"], "Дом и быт");
    assert_eq!(body["grid"]["count"], 2);

    let req = test::TestRequest::put()
        .uri(&format!("/sessions/{id}/search"))
        .set_json(json!({ "query": "lamp" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["search_query"], "lamp");
    assert_eq!(body["grid"]["count"], 1);
    assert_eq!(body["grid"]["products"][0]["id"], 3);
}

#[actix_web::test]
async fn selecting_unknown_category_is_bad_request() {
    let app = app!(CATALOG);
    let id = start_session!(app);
    let req = test::TestRequest::put()
        .uri(&format!("/sessions/{id}/category"))
        .set_json(json!({ "category": "toys" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn cart_panel_toggles_and_closes() {
    let app = app!(CATALOG);
    let id = start_session!(app);

    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{id}/cart/toggle"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["visible"], true);

    let req = test::TestRequest::put()
        .uri(&format!("/sessions/{id}/cart/visibility"))
        .set_json(json!({ "visible": false }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["visible"], false);
}

// ── Cart ──────────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn add_twice_then_set_quantity_zero() {
    let app = app!(CATALOG);
    let id = start_session!(app);

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{id}/cart/items"))
            .set_json(json!({ "product_id": 1 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{id}/cart"))
        .to_request();
    let cart: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["lines"][0]["quantity"], 2);
    assert_eq!(cart["lines"][0]["line_total"], "1000");
    assert_eq!(cart["total_price"], "1000");
    assert_eq!(cart["total_price_display"], "1\u{a0}000 ₽");
    assert_eq!(cart["total_items"], 2);
    assert!(cart["empty_message"].is_null());

    let req = test::TestRequest::put()
        .uri(&format!("/sessions/{id}/cart/items/1"))
        .set_json(json!({ "quantity": 0 }))
        .to_request();
    let cart: Value = test::call_and_read_body_json(&app, req).await;
    assert!(cart["lines"].as_array().unwrap().is_empty());
    assert_eq!(cart["total_items"], 0);
}

#[actix_web::test]
async fn lines_keep_insertion_order() {
    let app = app!(CATALOG);
    let id = start_session!(app);

    for product_id in [2, 1, 2] {
        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{id}/cart/items"))
            .set_json(json!({ "product_id": product_id }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{id}/cart"))
        .to_request();
    let cart: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cart["lines"][0]["product_id"], 2);
    assert_eq!(cart["lines"][0]["quantity"], 2);
    assert_eq!(cart["lines"][1]["product_id"], 1);
    assert_eq!(cart["total_price"], "2900");
}

#[actix_web::test]
async fn out_of_stock_add_is_conflict() {
    let app = app!(CATALOG);
    let id = start_session!(app);
    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{id}/cart/items"))
        .set_json(json!({ "product_id": 3 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn unknown_product_add_is_not_found() {
    let app = app!(CATALOG);
    let id = start_session!(app);
    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{id}/cart/items"))
        .set_json(json!({ "product_id": 404 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn remove_is_idempotent() {
    let app = app!(CATALOG);
    let id = start_session!(app);

    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{id}/cart/items"))
        .set_json(json!({ "product_id": 1 }))
        .to_request();
    test::call_service(&app, req).await;

    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri(&format!("/sessions/{id}/cart/items/1"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{id}/cart"))
        .to_request();
    let cart: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cart["total_items"], 0);
}

#[actix_web::test]
async fn set_quantity_on_missing_line_adds_nothing() {
    let app = app!(CATALOG);
    let id = start_session!(app);
    let req = test::TestRequest::put()
        .uri(&format!("/sessions/{id}/cart/items/2"))
        .set_json(json!({ "quantity": 4 }))
        .to_request();
    let cart: Value = test::call_and_read_body_json(&app, req).await;
    assert!(cart["lines"].as_array().unwrap().is_empty());
}

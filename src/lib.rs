pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::storefront_service::StorefrontService;
use handlers::storefront;
use infrastructure::catalog::StaticCatalog;
use infrastructure::session_repo::InMemorySessionRepository;

/// The service as wired for HTTP: static catalog, in-memory sessions.
pub type Storefront = StorefrontService<StaticCatalog, InMemorySessionRepository>;

#[derive(OpenApi)]
#[openapi(
    paths(
        storefront::list_categories,
        storefront::browse_products,
        storefront::start_session,
        storefront::get_page,
        storefront::end_session,
        storefront::select_category,
        storefront::search,
        storefront::toggle_cart,
        storefront::set_cart_visibility,
        storefront::get_cart,
        storefront::add_to_cart,
        storefront::set_quantity,
        storefront::remove_from_cart,
    ),
    components(schemas(
        storefront::CategoryResponse,
        storefront::ProductResponse,
        storefront::NoResultsResponse,
        storefront::ProductGridResponse,
        storefront::CartLineResponse,
        storefront::CartResponse,
        storefront::SessionResponse,
        storefront::PageResponse,
        storefront::CartVisibilityResponse,
        storefront::SelectCategoryRequest,
        storefront::SearchRequest,
        storefront::CartVisibilityRequest,
        storefront::AddToCartRequest,
        storefront::SetQuantityRequest,
    )),
    tags((name = "storefront", description = "Catalog browsing, sessions and cart"))
)]
pub struct ApiDoc;

/// Register the storefront routes. Shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/categories", web::get().to(storefront::list_categories))
        .route("/products", web::get().to(storefront::browse_products))
        .service(
            web::scope("/sessions")
                .route("", web::post().to(storefront::start_session))
                .route("/{id}", web::get().to(storefront::get_page))
                .route("/{id}", web::delete().to(storefront::end_session))
                .route("/{id}/category", web::put().to(storefront::select_category))
                .route("/{id}/search", web::put().to(storefront::search))
                .route("/{id}/cart", web::get().to(storefront::get_cart))
                .route("/{id}/cart/toggle", web::post().to(storefront::toggle_cart))
                .route(
                    "/{id}/cart/visibility",
                    web::put().to(storefront::set_cart_visibility),
                )
                .route("/{id}/cart/items", web::post().to(storefront::add_to_cart))
                .route(
                    "/{id}/cart/items/{product_id}",
                    web::put().to(storefront::set_quantity),
                )
                .route(
                    "/{id}/cart/items/{product_id}",
                    web::delete().to(storefront::remove_from_cart),
                ),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    storefront: Storefront,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let storefront = web::Data::new(storefront);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(storefront.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}

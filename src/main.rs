use std::io;

use chrono::Duration;
use dotenvy::dotenv;
use storefront_service::application::storefront_service::StorefrontService;
use storefront_service::build_server;
use storefront_service::config::Config;
use storefront_service::domain::category::default_categories;
use storefront_service::infrastructure::catalog::StaticCatalog;
use storefront_service::infrastructure::session_repo::InMemorySessionRepository;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(io::Error::other)?;

    let catalog = match &config.catalog_path {
        Some(path) => StaticCatalog::load(path).map_err(io::Error::other)?,
        None => {
            log::warn!("CATALOG_PATH not set, serving an empty catalog");
            StaticCatalog::empty()
        }
    };

    let storefront = StorefrontService::new(
        catalog,
        InMemorySessionRepository::with_idle_timeout(Duration::seconds(
            config.session_idle_secs.into(),
        )),
        default_categories(),
    );

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(storefront, &config.host, config.port)?.await
}

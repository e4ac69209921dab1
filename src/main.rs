use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use inventory_products::config::ServerConfig;
use inventory_products::db::establish_connection_pool;
use inventory_products::lookup::{AddressSearch, PostalCodeLookup, ViaCepClient};
use inventory_products::repository::DieselRepository;
use inventory_products::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let viacep = match ViaCepClient::new(&config.postal_lookup_url, config.lookup_timeout) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build postal code client: {e}");
            std::process::exit(1);
        }
    };
    let postal_lookup: Arc<dyn PostalCodeLookup> = Arc::new(viacep.clone());
    let address_search: Arc<dyn AddressSearch> = Arc::new(viacep);

    log::info!(
        "Listening on {}:{} (postal lookups via {})",
        config.address,
        config.port,
        config.postal_lookup_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::from(postal_lookup.clone()))
            .app_data(web::Data::from(address_search.clone()))
            .configure(routes::configure)
    })
    .bind((config.address.clone(), config.port))?
    .run()
    .await
}

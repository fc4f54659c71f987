use std::sync::Arc;

use actix_web::{App, HttpServer, web};

use software_catalog::blobstore::{BlobStore, FsBlobStore};
use software_catalog::db::establish_connection_pool;
use software_catalog::models::config::AppConfig;
use software_catalog::repository::DieselRepository;
use software_catalog::routes;
use software_catalog::services;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config: AppConfig = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .build()
        .and_then(config::Config::try_deserialize)
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    let pool = establish_connection_pool(&config.database_url).map_err(|e| {
        std::io::Error::other(format!(
            "Failed to connect to {}: {e}",
            config.database_url
        ))
    })?;
    let repo = DieselRepository::new(pool);

    services::categories::seed_default_categories(&repo)
        .map_err(|e| std::io::Error::other(format!("Failed to seed default categories: {e}")))?;

    let store: Arc<dyn BlobStore> =
        Arc::new(FsBlobStore::new(&config.media_root, config.media_base_url.clone())?);

    log::info!("Starting catalog server on {}:{}", config.host, config.port);

    let bind_address = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(store.clone()))
            .service(
                web::scope("/api/v1")
                    .service(routes::categories::list_categories)
                    .service(routes::categories::add_category)
                    .service(routes::categories::update_category)
                    .service(routes::categories::delete_category)
                    .service(routes::subcategories::list_subcategories_by_category)
                    .service(routes::subcategories::top_subcategories)
                    .service(routes::subcategories::browse_subcategories)
                    .service(routes::subcategories::list_subcategories)
                    .service(routes::subcategories::add_subcategory)
                    .service(routes::subcategories::update_subcategory)
                    .service(routes::subcategories::delete_subcategory)
                    .service(routes::software::list_software_by_subcategory)
                    .service(routes::software::top_software)
                    .service(routes::software::add_software)
                    .service(routes::software::update_software)
                    .service(routes::software::delete_software)
                    .service(routes::search::banner_search)
                    .service(routes::search::search_subcategories)
                    .service(routes::search::search_catalog),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}

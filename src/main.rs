use std::process;

use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use env_logger::Env;

use resource_directory::db::establish_connection_pool;
use resource_directory::models::config::ServerConfig;
use resource_directory::repository::DieselRepository;
use resource_directory::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            process::exit(1);
        }
    };

    let secret_key = match Key::try_from(server_config.secret_key.as_bytes()) {
        Ok(key) => key,
        Err(e) => {
            log::error!("Invalid secret_key: {e}");
            process::exit(1);
        }
    };

    let cookie_domain =
        (!server_config.domain.is_empty()).then(|| server_config.domain.clone());
    let repo = DieselRepository::new(pool);
    let bind_address = server_config.bind_address();

    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .cookie_domain(cookie_domain.clone())
                    .build(),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .service(web::scope("/api/v1").configure(routes::configure))
    })
    .bind(bind_address)?
    .run()
    .await
}

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;

use mediahub_backend::config::Config;
use mediahub_backend::controllers;
use mediahub_backend::handler::Handler;
use mediahub_backend::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    let port = config.port;

    let state = web::Data::new(AppState {
        handler: Handler::from_config(&config),
    });

    log::info!("Starting MediaHub backend on port {}", port);
    log::info!("Listings available at /api?action=users|media|documents|messages");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(controllers::health::config)
            .configure(controllers::api::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

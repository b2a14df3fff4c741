mod auth;
mod config;
mod db;
mod error;
mod services;

use crate::config::Config;
use crate::db::Database;
use crate::error::ApiError;
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;

async fn not_found() -> Result<actix_web::HttpResponse, ApiError> {
    Err(ApiError::NotFound("Route not found".into()))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let db = Database::open(&config.database_path).map_err(io::Error::other)?;
    info!("Using database {}", config.database_path);

    let bind = (config.host.clone(), config.port);
    let json_limit = config.json_limit_bytes;
    let db = web::Data::new(db);
    let config = web::Data::new(config);

    info!("Server running at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(db.clone())
            .app_data(config.clone())
            .service(services::persons::configure_routes())
            .service(services::fokontany::configure_routes())
            .service(services::taxes::configure_routes())
            .service(services::voters::configure_routes())
            .default_service(web::route().to(not_found))
    })
    .bind(bind)?
    .run()
    .await
}

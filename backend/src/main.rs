mod config;
mod db;
mod error;
mod job_controller;
mod services;

use crate::config::AppConfig;
use crate::job_controller::state::JobsState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AppConfig::from_env()?;

    // Create the tables up front so a bad database path fails at startup.
    db::open(&config.database_path).map_err(std::io::Error::other)?;
    info!("Using database {}", config.database_path.display());

    let (jobs_state, rx) = JobsState::new(100);
    tokio::spawn(job_controller::state::start_job_updater(
        jobs_state.jobs.clone(),
        rx,
    ));

    let bind = (config.host.clone(), config.port);
    info!("Server running at {}", config.url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(config.json_limit))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(jobs_state.clone()))
            .service(services::templates::configure_routes())
            .service(services::url_templates::configure_routes())
            .service(services::contents::configure_routes())
    })
    .bind(bind)?
    .run()
    .await
}

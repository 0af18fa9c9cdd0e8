// src/main.rs
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use conjure_harness::api::{configure_routes, AppState};
use conjure_harness::banner;
use conjure_harness::cli::ServerCli;
use conjure_harness::config::ServerConfig;
use conjure_harness::tls;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = ServerCli::parse();

    banner::print_banner();

    // A missing .env is normal; everything has a default.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("⚠️  Warning: Could not load .env file: {}", e);
        }
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::load()
        .map_err(std::io::Error::other)?
        .with_conjure_path(cli.conjure_exec);

    let tls_config = if config.tls.enabled {
        Some(tls::load_rustls_config(&config.tls).map_err(std::io::Error::other)?)
    } else {
        None
    };

    let bind = (config.host.clone(), config.port);
    let scheme = if tls_config.is_some() { "https" } else { "http" };
    log::info!("Using conjure at {}", config.conjure_path.display());
    log::info!("Temporary files go to {}", config.work_dir.display());

    let state = AppState::new(config);

    println!("🚀 Starting server...");
    println!("📊 Frontend available at {}://{}:{}", scheme, bind.0, bind.1);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    });

    let server = match tls_config {
        Some(tls_config) => server.bind_rustls_0_23(bind, tls_config)?,
        None => server.bind(bind)?,
    };

    server.run().await
}

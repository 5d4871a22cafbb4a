use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qoyod_bonus::config::Config;
use qoyod_bonus::modules::{bonus, health, qoyod::QoyodClient};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qoyod_bonus=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Qoyod Bonus System");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Qoyod endpoint: {}", config.qoyod.base_url);

    let qoyod_client =
        web::Data::new(QoyodClient::new(&config.qoyod).expect("Failed to build Qoyod client"));

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(qoyod_client.clone())
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .configure(bonus::controllers::configure)
            .configure(health::controllers::configure)
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

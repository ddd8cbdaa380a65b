use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use authgate::adapters::users_memory::InMemoryUserStore;
use authgate::config::app::Config;
use authgate::logging::pii::redact_email;
use authgate::logging::telemetry;
use authgate::middleware::authenticate::Authenticate;
use authgate::middleware::request_trace::RequestTrace;
use authgate::middleware::structured_logger::StructuredLogger;
use authgate::middleware::trace_span::TraceSpan;
use authgate::routes;
use authgate::state::app_state::AppState;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let users = InMemoryUserStore::new();
    if let Err(e) = users.create(&config.seed_email, &config.seed_password) {
        error!(error = %e, "failed to seed user store");
        std::process::exit(1);
    }
    info!(email = %redact_email(&config.seed_email), "seeded demo user");

    let app_state = AppState::new(Arc::new(users), config.security());
    info!(
        token_ttl_secs = config.token_ttl.as_secs(),
        host = %config.host,
        port = config.port,
        "starting authgate"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(Authenticate)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use authgate::adapters::users_memory::InMemoryUserStore;
use authgate::middleware::authenticate::Authenticate;
use authgate::middleware::request_trace::RequestTrace;
use authgate::middleware::structured_logger::StructuredLogger;
use authgate::middleware::trace_span::TraceSpan;
use authgate::repos::users::User;
use authgate::routes;
use authgate::state::app_state::AppState;
use authgate::state::security_config::SecurityConfig;

use crate::common::{SEED_EMAIL, SEED_PASSWORD, TEST_SECRET};

/// Type alias for route configuration functions
type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// State over a fresh store seeded with the demo user.
///
/// Returns the store handle too so tests can add or remove users.
pub fn seeded_state() -> (AppState, Arc<InMemoryUserStore>, User) {
    let users = Arc::new(InMemoryUserStore::new());
    let seed = users
        .create(SEED_EMAIL, SEED_PASSWORD)
        .expect("seed user should be created");
    let state = AppState::new(users.clone(), SecurityConfig::new(TEST_SECRET));
    (state, users, seed)
}

/// Builder for creating test Actix service instances
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// Configure the app to use production routes
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure) as RouteConfigFn);
        self
    }

    /// Configure the app with custom routes
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    /// Build the test service with the production middleware stack
    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;
        let configure = move |cfg: &mut web::ServiceConfig| {
            if let Some(config_fn) = &route_config {
                config_fn(cfg);
            }
        };

        test::init_service(
            App::new()
                .wrap(Authenticate)
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(configure),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}

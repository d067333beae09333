#[macro_use]
extern crate rocket;
#[macro_use]
extern crate serde;

use error::BackendError;
use rocket::figment::Figment;
use rocket::http::Method;
use rocket::Rocket;
use rocket_cors::{AllowedHeaders, AllowedOrigins, Cors};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::error::ConfigurationError;
use crate::route::mount_api;
use crate::store::Storage;

pub mod config;
pub mod data;
pub mod error;
pub mod resp;
pub mod route;
pub mod seed;
pub mod store;
pub mod util;

fn init_logging(level: Level) {
    if tracing_log::LogTracer::init().is_err() {
        eprintln!("Unable to forward log records to tracing.");
    }

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Unable to set global logger: {}", err);
    };
}

fn load_config() -> Result<Config, ConfigurationError> {
    match Config::load() {
        Ok(c) => {
            tracing::info!("Configuration loaded.");
            Ok(c)
        }
        Err(ConfigurationError::NotFound(dir)) => {
            tracing::info!(
                "No configuration file in '{}', using environment.",
                dir.display()
            );
            Ok(Config::default())
        }
        Err(other) => {
            tracing::error!("Configuration error: {}", other);
            Err(other)
        }
    }
}

/// Any origin, any header, credentials allowed.
pub fn cors() -> Cors {
    let allowed_origins = AllowedOrigins::All;

    rocket_cors::CorsOptions {
        allowed_origins,
        allowed_methods: vec![
            Method::Get,
            Method::Put,
            Method::Post,
            Method::Delete,
            Method::Patch,
            Method::Options,
            Method::Head,
        ]
        .into_iter()
        .map(From::from)
        .collect(),
        allowed_headers: AllowedHeaders::All,
        allow_credentials: true,
        ..Default::default()
    }
    .to_cors()
    .expect("static CORS options are valid")
}

/// Listener settings: `0.0.0.0` on the configured port.
pub fn figment(c: &Config) -> Figment {
    rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", c.port))
}

/// Assembles the application around an already connected store.
pub fn build(figment: Figment, c: Config, storage: Storage) -> Rocket<rocket::Build> {
    let mut r = rocket::custom(figment).manage(c).manage(storage);

    r = r.attach(cors());
    r = mount_api(r);

    r
}

pub async fn create(log_level: Option<Level>) -> Result<Rocket<rocket::Build>, BackendError> {
    if let Some(l) = log_level {
        init_logging(l);
    }

    tracing::info!("Reading .env file...");
    if dotenv::dotenv().is_err() {
        tracing::warn!("Unable to load .env file.");
    }

    tracing::info!("Loading configuration...");
    let c = load_config()?;

    let storage = Storage::connect(&c).await;

    tracing::info!("Seeding demo data...");
    seed::seed_demo(&storage).await;

    tracing::info!("Starting HTTP server on port {}...", c.port);
    Ok(build(figment(&c), c, storage))
}

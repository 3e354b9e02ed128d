#[macro_use]
extern crate rocket;

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

use rocket::{Build, Rocket};

/// Assemble the server: the public operation routes, the config/platform
/// fairing, and request logging.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(config::PlatformFairing)
        .attach(logging::LoggerFairing)
}

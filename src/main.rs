use std::sync::Arc;

use dotenvy::dotenv;
use leads_dashboard::models::config::ServerConfig;
use leads_dashboard::repository::api::ApiLeadRepository;

fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    // The blocking client owns its own runtime, so build it before Actix starts.
    let store = ApiLeadRepository::new(server_config.api_endpoint.clone())
        .map_err(|e| std::io::Error::other(format!("Failed to build record store client: {e}")))?;
    let store = Arc::new(store);

    actix_web::rt::System::new().block_on(leads_dashboard::run(server_config, store.clone()))
}

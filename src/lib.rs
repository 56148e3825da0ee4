//! Leads dashboard: a server-rendered CRUD view over a spreadsheet-backed
//! record store.

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod pagination;
pub mod pipeline;
pub mod repository;
pub mod services;

#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;

#[cfg(feature = "server")]
pub use server::{configure, run};

#[cfg(feature = "server")]
mod server {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_files::Files;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::models::config::ServerConfig;
    use crate::repository::LeadStore;
    use crate::routes::dashboard::{filter, go_to_page, reload, show_dashboard, sort};
    use crate::routes::leads::{
        cancel_delete, close_modal, confirm_delete, open_add, open_edit, request_delete,
        save_lead,
    };
    use crate::services::registry::DashboardRegistry;

    /// Registers every dashboard route.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(show_dashboard)
            .service(reload)
            .service(filter)
            .service(sort)
            .service(go_to_page)
            .service(open_add)
            .service(close_modal)
            .service(save_lead)
            .service(confirm_delete)
            .service(cancel_delete)
            .service(open_edit)
            .service(request_delete);
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig, store: Arc<dyn LeadStore>) -> std::io::Result<()> {
        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid session secret: {e}")))?;

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        // One registry for all workers so a session keeps its dashboard.
        let registry = web::Data::new(
            DashboardRegistry::new(store, server_config.page_size).with_limits(
                server_config.max_sessions,
                Duration::from_secs(server_config.session_idle_secs),
            ),
        );

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Serving leads from {} on {}:{}",
            server_config.api_endpoint,
            bind_address.0,
            bind_address.1
        );

        HttpServer::new(move || {
            App::new()
                .wrap(message_framework.clone())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false)
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .configure(configure)
                .app_data(registry.clone())
                .app_data(web::Data::new(tera.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}

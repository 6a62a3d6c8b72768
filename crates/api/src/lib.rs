mod error;
mod notification;
mod reminder;
mod scheduler;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use error::ReminderApiError;
pub use scheduler::{ListenerToken, ReminderListener, ReminderScheduler};
use std::net::TcpListener;
use std::sync::Arc;
use surgery_reminders_infra::ReminderContext;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    notification::configure_routes(cfg);
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    scheduler: Arc<ReminderScheduler>,
}

impl Application {
    pub async fn new(context: ReminderContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let scheduler = Application::start_scheduler(context).await;

        Ok(Self {
            server,
            port,
            scheduler,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn scheduler(&self) -> Arc<ReminderScheduler> {
        self.scheduler.clone()
    }

    async fn start_scheduler(context: ReminderContext) -> Arc<ReminderScheduler> {
        let scheduler = ReminderScheduler::new(context);
        if scheduler.request_permission().await {
            info!("Native notifications are enabled");
        } else {
            warn!("Native notifications are not available, reminders are only broadcast in-process");
        }
        scheduler
    }

    async fn configure_server(context: ReminderContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(web::JsonConfig::default().error_handler(|err, _| {
                    ReminderApiError::BadClientData(err.to_string()).into()
                }))
                .app_data(web::PathConfig::default().error_handler(|err, _| {
                    ReminderApiError::BadClientData(err.to_string()).into()
                }))
                .service(web::scope("/api/v1").configure(configure_server_api))
                .default_service(web::route().to(|| async {
                    Err::<actix_web::HttpResponse, _>(ReminderApiError::NotFound(
                        "Resource does not exist".into(),
                    ))
                }))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Starts scanning for due reminders and runs the server until it
    /// stops. Listeners should be subscribed before this is called so the
    /// first scan reaches them
    pub async fn start(self) -> Result<(), std::io::Error> {
        self.scheduler.initialize().await;
        let res = self.server.await;
        self.scheduler.shutdown();
        res
    }
}

use crate::configuration::Settings;
use crate::domain::NotificationRouting;
use crate::email_client::EmailSender;
use crate::routes::{early_access, health_check};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let email_client = config.email_client.client()?;
        let routing = config.email_client.routing();

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, Arc::new(email_client), routing)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    email_client: Arc<dyn EmailSender>,
    routing: NotificationRouting,
) -> Result<Server, anyhow::Error> {
    let email_client: web::Data<dyn EmailSender> = web::Data::from(email_client);
    let routing = web::Data::new(routing);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/api/early-access", web::post().to(early_access))
            .app_data(email_client.clone())
            .app_data(routing.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

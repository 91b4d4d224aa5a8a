mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use services::mail_service::Mailer;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3002".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    log::info!("🚀 Starting WebData Service...");

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    // Mailer para convites de compartilhamento (opcional em dev)
    let mailer = web::Data::new(Mailer::from_env());

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(mailer.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Rotas públicas: landing e fluxo de login
            .route("/", web::get().to(api::auth::landing))
            .route("/login", web::get().to(api::auth::login))
            .route("/auth", web::get().to(api::auth::authorize))
            // Rotas com escopo de conta: exigem sessão viva
            .service(
                web::scope("")
                    .wrap(middleware::SessionAuth)
                    .route("/setup", web::get().to(api::setup::get_setup))
                    .route("/setup", web::post().to(api::setup::post_setup))
                    .route("/dashboard", web::get().to(api::dashboard::get_dashboard))
                    .route("/dashboard", web::post().to(api::dashboard::post_dashboard))
                    .route("/history", web::get().to(api::history::get_history))
                    .route("/share", web::post().to(api::share::post_share))
                    .route("/shared", web::get().to(api::shared::get_shared))
                    .route("/logout", web::get().to(api::auth::logout)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}

/// Blog service - main entry point
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use sqlx::postgres::PgPoolOptions;
use tracing_actix_web::TracingLogger;

use blog_service::{config::Config, handlers, security::jwt, telemetry, AppState};

/// Liveness endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "blog-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Starting blog-service on {}:{}",
        config.app.host,
        config.app.port
    );

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("Database connection pool initialized");

    jwt::initialize_keys(&config.auth.jwt_secret);

    let state = AppState { db: db_pool };
    let allowed_origins = config.cors.allowed_origins.clone();
    let host = config.app.host.clone();
    let port = config.app.port;

    HttpServer::new(move || {
        let cors = if allowed_origins.trim() == "*" {
            Cors::permissive()
        } else {
            let mut cors = Cors::default()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);
            for origin in allowed_origins.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(handlers::register))
                    .route("/login", web::post().to(handlers::login))
                    .route("/check-username", web::post().to(handlers::check_username)),
            )
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::list_posts))
                            .route(web::post().to(handlers::create_post)),
                    )
                    // Registered before /{id} so "user" never parses as an id.
                    .route("/user", web::get().to(handlers::list_user_posts))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(handlers::get_post))
                            .route(web::put().to(handlers::update_post))
                            .route(web::delete().to(handlers::delete_post)),
                    )
                    .service(
                        web::resource("/{id}/comments")
                            .route(web::get().to(handlers::list_comments))
                            .route(web::post().to(handlers::create_comment)),
                    ),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}

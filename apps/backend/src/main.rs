use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use chess_teams_backend::routes;
use chess_teams_backend::{connect_db, db_url, telemetry, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: via compose env_file
    // - Local dev: source env files manually (set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let url = match db_url() {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Failed to resolve database URL: {e}");
            std::process::exit(1);
        }
    };
    let db = match connect_db(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(AppState::new(db));

    tracing::info!(host = %host, port, "starting chess-teams backend");

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

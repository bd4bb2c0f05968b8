use scout_demo_server::{AppState, serve};

const DEFAULT_PORT: u16 = 3003;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring .env: {e}");
        }
    }
    tracing_subscriber::fmt::init();

    let port = match std::env::var("PORT") {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(%raw, "invalid PORT; using default");
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(%port, "scout demo api listening");
    serve(listener, AppState::new()).await
}

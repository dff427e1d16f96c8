use google_login_bridge::{
    config::Config,
    routes::{AppState, router},
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
    info!("Listening on 0.0.0.0:8000");
    axum::serve(listener, app).await?;
    anyhow::Ok(())
}

use tokio::net::TcpListener;

use mock_server::MockConfig;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let client_id = std::env::var("ONBO_CLIENT_ID").unwrap_or_else(|_| "mock-client".to_string());
    let secret = std::env::var("ONBO_SECRET").unwrap_or_else(|_| "mock-secret".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    mock_server::run(listener, MockConfig::new(client_id, secret)).await
}

use std::env;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use mock::{create_route, MockImageApi};
use tracing::info;

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::fmt().json().finish();
    tracing::subscriber::set_global_default(subscriber).expect("Could not init tracing.");

    let delay = env::var("MOCK_DELAY_MILLIS").ok().and_then(|delay| delay.parse::<u64>().ok()).unwrap_or(2000);
    let app = create_route(MockImageApi::succeeding(Duration::from_millis(delay)));

    let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)), 8001);
    info!("listening on {}", &addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("Server stopped unexpectedly.");
}

use order_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv + logging)
    dotenv::dotenv().ok();
    init_logger();

    print_banner();

    tracing::info!("Oakline order server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Server state (work dir + store)
    let state = ServerState::initialize(&config).await;

    // 4. Serve
    let server = Server::with_state(config, state);
    server.run().await
}

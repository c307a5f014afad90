use book_service::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    tracing::info!(
        environment = %config.service.environment,
        "Using in-memory book store; data is lost on restart"
    );
    let state = AppState::new(config.clone(), InMemoryBookStore::new());

    Server::new(config).serve(app(state)).await
}

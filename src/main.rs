/// Polaris Router - Delegated Content-Routing Directory
///
/// A small HTTP directory service for peer-to-peer content routing: peers
/// announce what they provide, other peers ask who provides it.

use polaris_router::{config::ServerConfig, context::AppContext, error::RouterResult, jobs, server};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> RouterResult<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polaris_router=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    print_banner();

    // Load configuration
    let config = ServerConfig::from_env()?;

    // Create application context
    let ctx = AppContext::new(config)?;

    // Start background jobs
    let scheduler = Arc::new(jobs::JobScheduler::new(ctx.clone()));
    scheduler.start();

    // Start server
    server::serve(ctx).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ____        __            _
   / __ \____  / /___ ______(_)____
  / /_/ / __ \/ / __ `/ ___/ / ___/
 / ____/ /_/ / / /_/ / /  / (__  )
/_/    \____/_/\__,_/_/  /_/____/

        Delegated Routing Directory v{}
        "#,
        env!("CARGO_PKG_VERSION")
    );
}

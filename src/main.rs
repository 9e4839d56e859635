use flatroute::dispatcher::Dispatcher;
use flatroute::registry;
use flatroute::router::RouteTable;
use flatroute::runtime_config::RuntimeConfig;
use flatroute::server::{AppService, HttpServer};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = RuntimeConfig::from_env();
    may::config().set_stack_size(config.stack_size);

    let mut table = RouteTable::new();
    unsafe {
        registry::register_all(&mut table);
    }

    let dispatcher = Arc::new(Dispatcher::new(Arc::new(table)));
    let service = AppService::new(dispatcher);

    let handle = HttpServer(service)
        .start("0.0.0.0:8080")
        .map_err(|e| anyhow::anyhow!("failed to bind 0.0.0.0:8080: {e}"))?;
    handle.wait_ready()?;
    println!("flatroute HTTP server is running at port 8080");

    handle
        .join()
        .map_err(|e| anyhow::anyhow!("server failed: {e:?}"))?;
    Ok(())
}

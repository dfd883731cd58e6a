use rpc_server::{app, configs, handler::HandlerRegistry, logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[allow(clippy::expect_used)]
    let config = configs::Config::new().expect("Failed while parsing config");
    logger::setup(&config.log);

    let mut registry = HandlerRegistry::new();
    registry.register("grpc.health.v1.Health", "Check", |_| async {
        Ok(b"SERVING".to_vec())
    });

    app::server_builder(config, registry).await?;

    Ok(())
}

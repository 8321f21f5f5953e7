// Entry point when running `cargo run -p web-server`; the `tradescope serve`
// command does the same from the main binary.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config()?;
    let _guard = configuration::init_tracing(&config.logging);
    web_server::run_server(config).await
}

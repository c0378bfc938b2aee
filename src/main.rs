use dotenv::dotenv;
use taskdesk::commands::Cli;
use taskdesk::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();
    Cli::menu().await
}

fn init_tracing() {
    if !is_debug_mode() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskdesk=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

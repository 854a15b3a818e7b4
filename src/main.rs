// Household-registration report server

use clap::Parser;
use tabien::config::Config;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::info!(
        "Template {}, output directory {}",
        config.template.display(),
        config.output_dir.display()
    );

    if let Err(e) = tabien::server::run(config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

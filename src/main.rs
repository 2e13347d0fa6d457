use log::info;
use tableau::{app::TableauApp, config::ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = ViewerConfig::from_env();
    if let Some(dir) = std::env::args_os().nth(1) {
        config = config.with_asset_dir(dir);
    }
    info!("Loading models from {}", config.asset_dir.display());

    TableauApp::new(config)?.run()
}

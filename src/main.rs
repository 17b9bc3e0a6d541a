use std::sync::Arc;

use teloxide::prelude::*;

use yt_saver_bot::{
    config::Config,
    dispatcher::AppState,
    schema::schema,
    session::InMemorySessionStore,
    telegram::TelegramMessenger,
    utils::clear_dir,
    youtube::YtDlp,
};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
    log::info!("Starting YouTube saver bot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("Loaded {:?}", config);

    if let Err(e) = tokio::fs::create_dir_all(&config.download_dir).await {
        log::error!(
            "Cannot create download directory {}: {}",
            config.download_dir.display(),
            e
        );
        std::process::exit(1);
    }

    let bot = Bot::new(&config.bot_token);
    let state = Arc::new(AppState::new(
        Arc::new(TelegramMessenger::new(bot.clone())),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(YtDlp::new(&config.ytdlp_path, config.download_timeout)),
        &config,
    ));

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    if let Err(e) = clear_dir(&config.download_dir).await {
        log::warn!("Failed to clear {}: {}", config.download_dir.display(), e);
    }
}

// Copyright 2024-2025 Felipe Torres González
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Main file of the CampusBot

use campusbot::{
    CampusBot, Command, PgDirectory, TelegramGateway,
    configuration::Settings,
    directory::seed::{SampleData, seed_database},
    endpoints::health_router,
    handlers,
    telemetry::configure_tracing,
};
use secrecy::ExposeSecret;
use std::{net::SocketAddr, process::exit, str::FromStr, sync::Arc};
use teloxide::{
    adaptors::throttle::Limits, prelude::*, requests::RequesterExt, update_listeners::webhooks,
    utils::command::BotCommands,
};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load the settings.
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to parse configuration files: {e}");
            exit(78)
        }
    };

    // Initialize the tracing subsystem.
    configure_tracing(settings.tracing_level.as_str());

    // Set up the directory DB.
    let directory = match PgDirectory::connect_backend(&settings.database).await {
        Ok(directory) => directory,
        Err(e) => {
            error!("An error occurred while attempting to connect to the directory DB:\n{e}");
            exit(69)
        }
    };
    directory.migrate().await?;

    if settings.seed_sample_data {
        seed_database(directory.pool(), &SampleData::new()).await?;
    }

    // Instance a throttled bot, to avoid reaching the message limits of Telegram.
    let bot = Bot::new(settings.application.api_token.expose_secret()).throttle(Limits::default());

    let campus_bot = Arc::new(CampusBot::new(
        directory.clone(),
        TelegramGateway::new(bot.clone()),
    ));
    let health = health_router(Arc::new(directory));

    let http_server_address = SocketAddr::from_str(&format!(
        "{}:{}",
        &settings.application.http_server_host, settings.application.http_server_port
    ))?;

    let tcp_listener = TcpListener::bind(http_server_address).await?;

    info!("Started CampusBot server");

    debug!("Setting up commands of the bot");
    bot.set_my_commands(Command::bot_commands()).await?;

    let mut dispatcher = Dispatcher::builder(bot.clone(), handlers::schema())
        .dependencies(dptree::deps![campus_bot])
        .enable_ctrlc_handler()
        .build();

    match &settings.application.webhook_url {
        Some(webhook_url) => {
            // Build a listener based on the axum server.
            let (listener, stop_future, bot_router) = webhooks::axum_to_router(
                bot,
                webhooks::Options::new(http_server_address, webhook_url.parse()?),
            )
            .await?;

            let app = health.fallback_service(bot_router);

            tokio::task::spawn(async move {
                axum::serve(tcp_listener, app)
                    .with_graceful_shutdown(stop_future)
                    .await
            });
            debug!("Axum server started, receiving updates through {webhook_url}");

            info!("Dispatching");
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("campusbot"),
                )
                .await;
        }
        None => {
            tokio::task::spawn(async move { axum::serve(tcp_listener, health).await });
            debug!("Axum server started, receiving updates through long polling");

            info!("Dispatching");
            dispatcher.dispatch().await;
        }
    }

    info!("Gracefully closed CampusBot server");

    Ok(())
}

// Copyright 2025 Felipe Torres González
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

//! Library of the CampusBot crate.

use teloxide::utils::command::BotCommands;

pub mod configuration;
pub mod directory;
pub mod errors;
pub mod flows;
pub mod gateway;
pub mod keyboards;
pub mod payload;
pub mod router;
pub mod session;
pub mod telemetry;

// Bring all the endpoints to the main context.
pub mod endpoints {
    mod callback;
    mod healthz;
    mod help;
    mod start;
    mod text;

    pub use callback::callback;
    pub use healthz::{PING_TIMEOUT, health_router, healthz};
    pub use help::help;
    pub use start::start;
    pub use text::text;
}

// Bring all the handlers to the main context.
pub mod handlers {
    mod schema;

    pub use schema::*;
}

pub use directory::{DirectoryStore, MemoryDirectory, PgDirectory};
pub use gateway::{MessagingGateway, Peer, Reply, TelegramGateway};
pub use router::CampusBot;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// The bot as deployed: PostgreSQL directory and Telegram gateway.
pub type CampusBotService = CampusBot<PgDirectory, TelegramGateway>;

/// Commands of the bot.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "главное меню")]
    Start,
    #[command(description = "справка")]
    Help,
}

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

//! Handler for the /help command.

use crate::{CampusBotService, HandlerResult, gateway::telegram::peer_of_chat};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;

/// Help handler.
#[tracing::instrument(
    name = "Help handler",
    skip(msg, campus_bot),
    fields(
        chat_id = %msg.chat.id,
    )
)]
pub async fn help(msg: Message, campus_bot: Arc<CampusBotService>) -> HandlerResult {
    info!("Command /help called");

    campus_bot
        .help(peer_of_chat(&msg.chat, msg.from.as_ref()))
        .await;

    Ok(())
}

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

//! Handler for the buttons of the inline keyboards.

use crate::{CampusBotService, HandlerResult, gateway::telegram::inbound_callback};
use std::sync::Arc;
use teloxide::{adaptors::Throttle, prelude::*};
use tracing::{debug, warn};

#[tracing::instrument(
    name = "Callback handler",
    skip(bot, q, campus_bot),
    fields(
        user_id = %q.from.id,
    )
)]
pub async fn callback(
    bot: Throttle<Bot>,
    q: CallbackQuery,
    campus_bot: Arc<CampusBotService>,
) -> HandlerResult {
    // Stop the spinner of the button before doing any work.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!("Failed to answer the callback query: {e}");
    }

    let Some(update) = inbound_callback(&q) else {
        debug!("Ignoring a callback query without data");
        return Ok(());
    };

    campus_bot.handle(update).await?;

    Ok(())
}

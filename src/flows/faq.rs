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

//! Frequently asked questions.

use super::Turn;
use crate::{
    directory::{DirectoryStore, FaqEntry, SEARCH_LIMIT},
    errors::DbError,
    gateway::{MessagingGateway, Reply},
    keyboards::{back_to_menu_keyboard, faq_keyboard},
};
use tracing::debug;

const EMPTY_TEXT: &str = "Раздел частых вопросов пока пуст.";
const NOT_FOUND_TEXT: &str = "Вопрос не найден.";

/// List the questions, one button each.
pub async fn show_questions<D: DirectoryStore, G: MessagingGateway>(
    turn: &Turn<'_, D, G>,
) -> Result<(), DbError> {
    let entries = turn.query(turn.directory.faq_entries(SEARCH_LIMIT)).await?;
    debug!("Listing {} FAQ entries", entries.len());

    let reply = if entries.is_empty() {
        Reply::text(EMPTY_TEXT).with_keyboard(back_to_menu_keyboard())
    } else {
        Reply::text("❓ Частые вопросы:").with_keyboard(faq_keyboard(&entries))
    };
    turn.reply(reply).await;

    Ok(())
}

pub async fn show_answer<D: DirectoryStore, G: MessagingGateway>(
    turn: &Turn<'_, D, G>,
    id: i64,
) -> Result<(), DbError> {
    let reply = match turn.query(turn.directory.faq_entry(id)).await? {
        Some(entry) => Reply::text(format_answer(&entry)),
        None => Reply::text(NOT_FOUND_TEXT),
    };
    turn.reply(reply.with_keyboard(back_to_menu_keyboard())).await;

    Ok(())
}

pub fn format_answer(entry: &FaqEntry) -> String {
    format!("❓ {}\n\n{}", entry.question, entry.answer)
}

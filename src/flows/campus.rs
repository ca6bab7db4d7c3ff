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

//! Campus guide. Stateless: every step is driven by a button or by the name of a campus.

use super::Turn;
use crate::{
    directory::{Campus, DirectoryStore},
    errors::DbError,
    gateway::{MessagingGateway, Reply},
    keyboards::{campus_info_keyboard, campus_list_keyboard},
    payload::Payload,
};
use tracing::debug;

pub const NO_CAMPUSES_TEXT: &str = "Информация о корпусах временно недоступна.";
pub const CAMPUS_NOT_FOUND_TEXT: &str = "Корпус не найден.";
const NO_LOCATION_TEXT: &str = "Информация о расположении корпуса временно недоступна.";

pub async fn show_selection<D: DirectoryStore, G: MessagingGateway>(
    turn: &Turn<'_, D, G>,
) -> Result<(), DbError> {
    let campuses = turn.query(turn.directory.campuses()).await?;

    let reply = if campuses.is_empty() {
        Reply::text(NO_CAMPUSES_TEXT)
    } else {
        Reply::text("🏫 Выберите корпус:").with_keyboard(campus_list_keyboard(&campuses, Payload::Campus))
    };
    turn.reply(reply).await;

    Ok(())
}

pub async fn show_campus<D: DirectoryStore, G: MessagingGateway>(
    turn: &Turn<'_, D, G>,
    id: i64,
) -> Result<(), DbError> {
    match turn.query(turn.directory.campus(id)).await? {
        Some(campus) => send_campus(turn, &campus).await,
        None => {
            debug!("Campus {id} not found");
            turn.reply(Reply::text(CAMPUS_NOT_FOUND_TEXT)).await;
        }
    }

    Ok(())
}

/// Photo first, when there is one, then the details with the keyboard.
async fn send_campus<D: DirectoryStore, G: MessagingGateway>(turn: &Turn<'_, D, G>, campus: &Campus) {
    if !campus.image_url.is_empty() {
        turn.reply(Reply::photo(campus.image_url.as_str(), campus.full_name.as_str()))
            .await;
    }

    turn.reply(Reply::text(format_campus(campus)).with_keyboard(campus_info_keyboard(campus.id)))
        .await
}

pub async fn show_map<D: DirectoryStore, G: MessagingGateway>(
    turn: &Turn<'_, D, G>,
    id: i64,
) -> Result<(), DbError> {
    let reply = match turn.query(turn.directory.campus(id)).await? {
        Some(campus) if !campus.map_image_url.is_empty() => Reply::photo(
            campus.map_image_url.as_str(),
            format!("🗺️ {} на карте", campus.full_name),
        ),
        Some(campus) => Reply::text(format!(
            "🗺️ {}\n📍 {}\n🚇 {}",
            campus.full_name, campus.address, campus.metro
        )),
        None => Reply::text(NO_LOCATION_TEXT),
    };
    turn.reply(reply).await;

    Ok(())
}

/// Show the campus named by the text, if any.
pub async fn on_message<D: DirectoryStore, G: MessagingGateway>(
    turn: &Turn<'_, D, G>,
    text: &str,
) -> Result<bool, DbError> {
    let name = text.trim();
    if name.is_empty() {
        return Ok(false);
    }

    match turn.query(turn.directory.find_campus(name)).await? {
        Some(campus) => {
            send_campus(turn, &campus).await;
            Ok(true)
        }
        None => Ok(false),
    }
}

pub fn format_campus(campus: &Campus) -> String {
    format!(
        "🏫 {} ({})\n\n📍 Адрес: {}\n🚇 Метро: {}\n\nЧто находится внутри:\n{}",
        campus.full_name, campus.short_name, campus.address, campus.metro, campus.description
    )
}

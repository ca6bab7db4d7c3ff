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

//! Canteens, buffets and copy centres.
//!
//! # Description
//!
//! Campus → kinds of places available in it → places of one kind. The canteen gets a detailed card with the
//! menu of the day, buffets and copy centres are listed together.

use super::{
    Turn,
    campus::{CAMPUS_NOT_FOUND_TEXT, NO_CAMPUSES_TEXT},
};
use crate::{
    directory::{Campus, DirectoryStore, Place, PlaceKind},
    errors::DbError,
    gateway::{MessagingGateway, Reply},
    keyboards::{campus_list_keyboard, place_kinds_keyboard, places_keyboard},
    payload::Payload,
};
use std::fmt::Write;
use tracing::debug;

/// Words that open the guide when typed anywhere in a message.
const KEYWORDS: [&str; 7] = [
    "столовая",
    "буфет",
    "копирка",
    "копир",
    "еда",
    "печать",
    "распечатать",
];

pub fn mentions_places(text: &str) -> bool {
    let text = text.to_lowercase();
    KEYWORDS.iter().any(|k| text.contains(k))
}

pub async fn show_campus_selection<D: DirectoryStore, G: MessagingGateway>(
    turn: &Turn<'_, D, G>,
) -> Result<(), DbError> {
    let campuses = turn.query(turn.directory.campuses()).await?;

    let reply = if campuses.is_empty() {
        Reply::text(NO_CAMPUSES_TEXT)
    } else {
        Reply::text("🏢 О каком корпусе идет речь?")
            .with_keyboard(campus_list_keyboard(&campuses, Payload::PlacesCampus))
    };
    turn.reply(reply).await;

    Ok(())
}

pub async fn show_kinds<D: DirectoryStore, G: MessagingGateway>(
    turn: &Turn<'_, D, G>,
    campus_id: i64,
) -> Result<(), DbError> {
    let Some(campus) = turn.query(turn.directory.campus(campus_id)).await? else {
        turn.reply(Reply::text(CAMPUS_NOT_FOUND_TEXT)).await;
        return Ok(());
    };
    let kinds = turn.query(turn.directory.place_kinds(campus_id)).await?;

    let text = if kinds.is_empty() {
        format!(
            "🏢 {}\n\nВ этом корпусе пока нет информации о столовых, буфетах или копирках.",
            campus.full_name
        )
    } else {
        format!("🏢 {}\n\nЧто вас интересует?", campus.full_name)
    };
    turn.reply(Reply::text(text).with_keyboard(place_kinds_keyboard(campus_id, &kinds)))
        .await;

    Ok(())
}

pub async fn show_places<D: DirectoryStore, G: MessagingGateway>(
    turn: &Turn<'_, D, G>,
    kind: PlaceKind,
    campus_id: i64,
) -> Result<(), DbError> {
    let places = turn.query(turn.directory.places(campus_id, kind)).await?;
    debug!("{} places of kind {kind} in campus {campus_id}", places.len());

    if places.is_empty() {
        turn.reply(Reply::text(format!("В этом корпусе нет {}.", kind_genitive(kind))))
            .await;
        return Ok(());
    }

    let Some(campus) = turn.query(turn.directory.campus(campus_id)).await? else {
        turn.reply(Reply::text(CAMPUS_NOT_FOUND_TEXT)).await;
        return Ok(());
    };

    let reply = match kind {
        PlaceKind::Canteen => {
            let kinds = turn.query(turn.directory.place_kinds(campus_id)).await?;
            let others = kinds.iter().any(|k| *k != PlaceKind::Canteen);

            Reply::text(format_canteen(&places[0], &campus))
                .with_keyboard(places_keyboard(campus_id, others))
        }
        PlaceKind::Buffet | PlaceKind::Copy => {
            Reply::text(format_list(kind, &places, &campus)).with_keyboard(places_keyboard(campus_id, false))
        }
    };
    turn.reply(reply).await;

    Ok(())
}

/// Open the guide when the text mentions food or printing.
pub async fn on_message<D: DirectoryStore, G: MessagingGateway>(
    turn: &Turn<'_, D, G>,
    text: &str,
) -> Result<bool, DbError> {
    if !mentions_places(text) {
        return Ok(false);
    }

    show_campus_selection(turn).await?;

    Ok(true)
}

fn kind_genitive(kind: PlaceKind) -> &'static str {
    match kind {
        PlaceKind::Canteen => "столовых",
        PlaceKind::Buffet => "буфетов",
        PlaceKind::Copy => "копировальных центров",
    }
}

pub fn format_canteen(place: &Place, campus: &Campus) -> String {
    format!(
        "🍽️ {} ({})\n📍 Расположение: {}\n🕐 Режим работы: {}\n\n📋 Меню на сегодня:\n{}",
        place.name, campus.short_name, place.location, place.schedule, place.menu_today
    )
}

/// Numbered list with the first line of the menu (or of the services) of every place.
pub fn format_list(kind: PlaceKind, places: &[Place], campus: &Campus) -> String {
    let (title, icon) = match kind {
        PlaceKind::Copy => ("Копировальные центры", "📄"),
        _ => ("Буфеты", "🍽️"),
    };

    let mut text = format!("📋 {title} в {}:\n\n", campus.short_name);
    for (i, place) in places.iter().enumerate() {
        let _ = writeln!(text, "{}. {}", i + 1, place.name);
        let _ = writeln!(text, "   📍 {}", place.location);
        let _ = writeln!(text, "   🕐 {}", place.schedule);
        if let Some(first) = place.menu_today.lines().next() {
            let _ = writeln!(text, "   {icon} {first}");
        }
        text.push('\n');
    }

    text
}

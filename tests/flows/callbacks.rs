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

use crate::helpers::{FailingDirectory, PEER, test_app, test_app_with};
use campusbot::{
    errors::error_message,
    flows::menu::{UNKNOWN_COMMAND_TEXT, main_menu},
    gateway::Inbound,
    payload::{Payload, SearchMode},
    session::{DeanStep, SessionStore},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// TC: a payload that matches no handler.
///
/// # Description
///
/// Unknown or malformed payloads get exactly one "unknown command" reply and leave the conversation state
/// alone.
#[rstest]
#[case("hello")]
#[case("campus_")]
#[case("campus_show_map_x")]
#[case("svc_unknown")]
#[tokio::test]
async fn unknown_payloads(#[case] raw: &str) {
    let app = test_app();
    app.teacher_sessions.set(PEER, SearchMode::Faculty);

    app.bot
        .dispatch_callback(PEER, raw)
        .await
        .expect("Unknown payloads are not errors");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, UNKNOWN_COMMAND_TEXT);
    assert_eq!(app.teacher_sessions.get(&PEER), Some(SearchMode::Faculty));
}

/// TC: a campus that does not exist.
#[tokio::test]
async fn missing_campus() {
    let app = test_app();
    app.dean_sessions.set(PEER, DeanStep::AwaitingFacultyName);

    app.bot
        .handle(Inbound::Callback {
            peer: PEER,
            payload: String::from("campus_999"),
        })
        .await
        .expect("A missing campus is not an error");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, "Корпус не найден.");
    assert_eq!(app.dean_sessions.get(&PEER), Some(DeanStep::AwaitingFacultyName));
    assert!(app.teacher_sessions.is_empty());
}

/// TC: the map of a campus is not mistaken for the campus itself.
#[tokio::test]
async fn show_map_is_not_campus_selection() {
    let app = test_app();

    app.bot
        .dispatch_callback(PEER, "campus_show_map_1")
        .await
        .expect("Failed to show the map");

    let replies = app.gateway().take();
    assert_eq!(replies.len(), 1);
    assert_eq!(
        replies[0].photo_url.as_deref(),
        Some("https://example.com/maps/guk_map.jpg")
    );
    assert_eq!(replies[0].text, "🗺️ Главный учебный корпус на карте");

    // No map picture: address and metro instead.
    app.bot
        .dispatch_callback(PEER, "campus_show_map_2")
        .await
        .expect("Failed to show the map");

    let replies = app.gateway().take();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].photo_url.is_none());
    assert!(replies[0].text.starts_with("🗺️ Второй учебный корпус\n📍 ул. Академическая"));
}

#[tokio::test]
async fn campus_details_come_after_the_photo() {
    let app = test_app();

    app.bot
        .dispatch_callback(PEER, "campus_1")
        .await
        .expect("Failed to show the campus");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 2);
    assert_eq!(
        replies[0].photo_url.as_deref(),
        Some("https://example.com/images/guk.jpg")
    );
    assert!(replies[1].text.starts_with("🏫 Главный учебный корпус (ГУК)\n\n📍 Адрес:"));

    let keyboard = replies[1].keyboard.as_ref().expect("Missing keyboard");
    assert_eq!(keyboard.rows[0][0].payload, Payload::CampusShowMap(1));
}

#[tokio::test]
async fn campus_list_is_paired() {
    let app = test_app();

    app.bot
        .dispatch_callback(PEER, "svc_campus_info")
        .await
        .expect("Failed to list the campuses");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    let keyboard = replies[0].keyboard.as_ref().expect("Missing keyboard");
    // Two campuses in one row, then the row to go back.
    assert_eq!(keyboard.rows.len(), 2);
    assert_eq!(keyboard.rows[0].len(), 2);
    assert_eq!(keyboard.rows[1][0].payload, Payload::BackToMenu);
}

/// TC: the main menu resets every dialog in progress.
#[tokio::test]
async fn back_to_menu_clears_every_flow() {
    let app = test_app();
    app.teacher_sessions.set(PEER, SearchMode::FullName);
    app.dean_sessions.set(PEER, DeanStep::AwaitingFacultyName);

    app.bot
        .dispatch_callback(PEER, "back_to_menu")
        .await
        .expect("Failed to show the main menu");
    app.bot
        .dispatch_callback(PEER, "back_to_menu")
        .await
        .expect("Failed to show the main menu");

    let replies = app.gateway().replies();
    assert_eq!(replies, vec![main_menu(), main_menu()]);
    assert!(app.teacher_sessions.is_empty());
    assert!(app.dean_sessions.is_empty());
}

/// TC: entering one input step cancels the other flow.
#[tokio::test]
async fn input_steps_supersede_each_other() {
    let app = test_app();

    app.bot
        .dispatch_callback(PEER, "find_by_department")
        .await
        .expect("Failed to enter the teacher search");
    assert_eq!(app.teacher_sessions.get(&PEER), Some(SearchMode::Department));

    app.bot
        .dispatch_callback(PEER, "svc_dean_schedule")
        .await
        .expect("Failed to enter the dean lookup");
    assert_eq!(app.dean_sessions.get(&PEER), Some(DeanStep::AwaitingFacultyName));
    assert!(!app.teacher_sessions.contains(&PEER));

    app.bot
        .dispatch_callback(PEER, "find_by_fio")
        .await
        .expect("Failed to enter the teacher search");
    assert_eq!(app.teacher_sessions.get(&PEER), Some(SearchMode::FullName));
    assert!(!app.dean_sessions.contains(&PEER));

    let texts: Vec<String> = app.gateway().replies().into_iter().map(|r| r.text).collect();
    assert_eq!(
        texts,
        vec![
            "Введите название кафедры:",
            "Введите название факультета (например, «ИУ»):",
            "Введите часть ФИО (например, «иванов»):",
        ]
    );
}

#[tokio::test]
async fn canteen_links_to_the_other_places() {
    let app = test_app();

    app.bot
        .dispatch_callback(PEER, "places_canteen_1")
        .await
        .expect("Failed to show the canteen");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.starts_with("🍽️ Столовая №1 (ГУК)\n📍 Расположение: 1 этаж"));
    assert!(replies[0].text.contains("📋 Меню на сегодня:\nБорщ"));

    let keyboard = replies[0].keyboard.as_ref().expect("Missing keyboard");
    assert_eq!(keyboard.rows[0][0].payload, Payload::PlacesBackToCampus(1));
    assert_eq!(keyboard.rows[1][0].payload, Payload::PlacesCampus(1));
}

#[rstest]
#[case("places_canteen_2", "В этом корпусе нет столовых.")]
#[case("places_buffet_999", "В этом корпусе нет буфетов.")]
#[tokio::test]
async fn no_places_of_a_kind(#[case] raw: &str, #[case] expected: &str) {
    let app = test_app();

    app.bot
        .dispatch_callback(PEER, raw)
        .await
        .expect("Failed to list the places");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, expected);
}

#[tokio::test]
async fn kinds_menu_lists_what_the_campus_has() {
    let app = test_app();

    app.bot
        .dispatch_callback(PEER, "places_back_to_campus_2")
        .await
        .expect("Failed to show the kinds");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, "🏢 Второй учебный корпус\n\nЧто вас интересует?");

    let payloads: Vec<Payload> = replies[0]
        .keyboard
        .as_ref()
        .expect("Missing keyboard")
        .buttons()
        .map(|b| b.payload)
        .collect();
    assert!(payloads.contains(&Payload::PlacesOfKind {
        kind: campusbot::directory::PlaceKind::Copy,
        campus_id: 2
    }));
    assert!(!payloads.contains(&Payload::PlacesOfKind {
        kind: campusbot::directory::PlaceKind::Canteen,
        campus_id: 2
    }));
}

#[tokio::test]
async fn faq_questions_and_answers() {
    let app = test_app();

    app.bot
        .dispatch_callback(PEER, "svc_faq")
        .await
        .expect("Failed to list the questions");
    let replies = app.gateway().take();
    let keyboard = replies[0].keyboard.as_ref().expect("Missing keyboard");
    // Three questions and the main menu.
    assert_eq!(keyboard.rows.len(), 4);
    assert_eq!(keyboard.rows[1][0].payload, Payload::FaqEntry(2));

    app.bot
        .dispatch_callback(PEER, "faq_2")
        .await
        .expect("Failed to show the answer");
    let replies = app.gateway().take();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.starts_with("❓ Где восстановить студенческий билет?\n\n"));
}

/// TC: the directory is down.
///
/// # Description
///
/// The peer gets the generic error message, the error reaches the caller and the state is untouched.
#[tokio::test]
async fn store_failures_are_reported() {
    let app = test_app_with(FailingDirectory);
    app.teacher_sessions.set(PEER, SearchMode::Faculty);

    let result = app.bot.dispatch_callback(PEER, "svc_campus_info").await;

    assert!(result.is_err());
    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, error_message());
    assert_eq!(app.teacher_sessions.get(&PEER), Some(SearchMode::Faculty));
}

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

use crate::helpers::{
    BrokenGateway, FailingDirectory, PEER, data_with_namesakes, test_app, test_app_with,
};
use campusbot::{
    CampusBot, MemoryDirectory,
    directory::{Faculty, seed::SampleData},
    errors::error_message,
    flows::menu::main_menu,
    gateway::{Inbound, Peer},
    payload::{Payload, SearchMode},
    session::{DeanStep, SessionStore},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// TC: free text from an idle peer.
///
/// # Description
///
/// No flow claims the text, so the peer gets the main menu and no state is created.
#[rstest]
#[case("привет")]
#[case("ИУ")]
#[case("   ")]
#[tokio::test]
async fn idle_text_falls_through(#[case] text: &str) {
    let app = test_app();

    app.bot
        .handle(Inbound::Message {
            peer: PEER,
            text: text.to_owned(),
        })
        .await
        .expect("Failed to handle the message");

    assert_eq!(app.gateway().replies(), vec![main_menu()]);
    assert!(app.teacher_sessions.is_empty());
    assert!(app.dean_sessions.is_empty());
}

/// TC: dean office lookup with a single matching faculty.
#[tokio::test]
async fn dean_lookup_resolves_a_single_faculty() {
    let app = test_app();
    app.dean_sessions.set(PEER, DeanStep::AwaitingFacultyName);

    app.bot
        .dispatch_message(PEER, "ИУ")
        .await
        .expect("Failed to look up the dean office");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert!(
        replies[0]
            .text
            .starts_with("📅 Расписание деканата факультета ИУ\n\nПн–Чт: 10:00–17:00")
    );
    assert!(replies[0].text.contains("Иванова Елена Сергеевна"));
    assert!(replies[0].text.contains("Документы/ссылки: https://example.edu/iu/dean/docs"));

    let keyboard = replies[0].keyboard.as_ref().expect("Missing keyboard");
    assert_eq!(keyboard.rows[0][0].payload, Payload::DeanBackToFacultyMenu);
    assert_eq!(keyboard.rows[0][1].payload, Payload::BackToMenu);

    assert!(!app.dean_sessions.contains(&PEER));
}

fn data_with_similar_faculties() -> SampleData {
    let mut data = SampleData::new();
    data.faculties.push(Faculty {
        id: 4,
        name: String::from("РКТ"),
        institute_id: 1,
    });

    data
}

#[tokio::test]
async fn dean_lookup_prefers_the_exact_name() {
    let app = test_app_with(MemoryDirectory::new(data_with_similar_faculties()));
    app.dean_sessions.set(PEER, DeanStep::AwaitingFacultyName);

    app.bot
        .dispatch_message(PEER, "рк")
        .await
        .expect("Failed to look up the dean office");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.starts_with("📅 Расписание деканата факультета РК\n"));
    assert!(!app.dean_sessions.contains(&PEER));
}

#[tokio::test]
async fn dean_lookup_asks_to_refine() {
    let app = test_app_with(MemoryDirectory::new(data_with_similar_faculties()));
    app.dean_sessions.set(PEER, DeanStep::AwaitingFacultyName);

    app.bot
        .dispatch_message(PEER, "р")
        .await
        .expect("Failed to look up the dean office");

    let replies = app.gateway().take();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.starts_with("Нашлось несколько факультетов:\n1) РК\n2) РКТ\n"));
    assert_eq!(app.dean_sessions.get(&PEER), Some(DeanStep::AwaitingFacultyName));

    // The faculty without a dean office.
    app.bot
        .dispatch_message(PEER, "ркт")
        .await
        .expect("Failed to look up the dean office");

    let replies = app.gateway().take();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, "Для факультета «РКТ» расписание не заполнено.");
    assert!(!app.dean_sessions.contains(&PEER));
}

#[rstest]
#[case("Биология", "Факультеты не найдены. Попробуйте иначе.")]
#[case("  ", "Введите название факультета.")]
#[tokio::test]
async fn dean_lookup_keeps_waiting(#[case] text: &str, #[case] expected: &str) {
    let app = test_app();
    app.dean_sessions.set(PEER, DeanStep::AwaitingFacultyName);

    app.bot
        .dispatch_message(PEER, text)
        .await
        .expect("Failed to look up the dean office");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, expected);
    assert_eq!(app.dean_sessions.get(&PEER), Some(DeanStep::AwaitingFacultyName));
}

/// TC: teacher search by name with three matches.
///
/// # Description
///
/// All the matches are listed in a single reply with their hierarchy, empty fields get placeholders and the
/// peer goes back to idle.
#[tokio::test]
async fn teacher_search_lists_every_match() {
    let app = test_app_with(MemoryDirectory::new(data_with_namesakes()));
    app.teacher_sessions.set(PEER, SearchMode::FullName);

    app.bot
        .dispatch_message(PEER, "Петров")
        .await
        .expect("Failed to search teachers");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);

    let text = &replies[0].text;
    assert!(text.starts_with("Найдено:\n"));
    assert_eq!(text.matches("• ").count(), 3);
    assert!(text.contains(
        "• Петров Игорь Олегович\n  Институт: Институт информатики и систем управления\n  Факультет: ИУ\n  Кафедра: ИУ1\n  Почта: petrov_io@example.edu\n  Расписание: Пн 10:00–11:40"
    ));
    assert!(text.contains("• Петрова Анна Сергеевна\n  Институт: Институт информатики и систем управления\n  Факультет: Э\n  Кафедра: Э1\n"));
    assert!(text.contains("• Петровский Олег Ильич\n"));
    assert!(text.contains("  Почта: —\n  Расписание: расписание не добавлено"));

    assert!(!app.teacher_sessions.contains(&PEER));
}

#[rstest]
#[case(SearchMode::FullName, "Эйнштейн", "Совпадений не найдено. Попробуйте иначе.")]
#[case(SearchMode::Department, "", "Введите текст запроса.")]
#[tokio::test]
async fn teacher_search_keeps_waiting(
    #[case] mode: SearchMode,
    #[case] text: &str,
    #[case] expected: &str,
) {
    let app = test_app();
    app.teacher_sessions.set(PEER, mode);

    app.bot
        .dispatch_message(PEER, text)
        .await
        .expect("Failed to search teachers");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, expected);
    assert_eq!(app.teacher_sessions.get(&PEER), Some(mode));
}

#[tokio::test]
async fn teacher_search_takes_priority_over_keywords() {
    let app = test_app();
    app.teacher_sessions.set(PEER, SearchMode::Department);

    // «столовая» would open the places guide for an idle peer.
    app.bot
        .dispatch_message(PEER, "столовая")
        .await
        .expect("Failed to search teachers");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, "Совпадений не найдено. Попробуйте иначе.");
}

#[tokio::test]
async fn keywords_open_the_places_guide() {
    let app = test_app();

    app.bot
        .dispatch_message(PEER, "Где можно распечатать курсовую?")
        .await
        .expect("Failed to open the places guide");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, "🏢 О каком корпусе идет речь?");
    let keyboard = replies[0].keyboard.as_ref().expect("Missing keyboard");
    assert_eq!(keyboard.rows[0][0].payload, Payload::PlacesCampus(1));
}

#[tokio::test]
async fn campus_by_name() {
    let app = test_app();

    app.bot
        .dispatch_message(PEER, "корпус 2")
        .await
        .expect("Failed to show the campus");

    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 2);
    assert!(replies[1].text.starts_with("🏫 Второй учебный корпус (Корпус 2)"));
}

#[tokio::test]
async fn peers_do_not_share_state() {
    let app = test_app();
    let other = Peer::Chat(-1001);
    app.dean_sessions.set(PEER, DeanStep::AwaitingFacultyName);

    app.bot
        .dispatch_message(other, "ИУ")
        .await
        .expect("Failed to handle the message");

    assert_eq!(app.gateway().replies_to(other), vec![main_menu()]);
    assert!(app.gateway().replies_to(PEER).is_empty());
    assert_eq!(app.dean_sessions.get(&PEER), Some(DeanStep::AwaitingFacultyName));
}

#[tokio::test]
async fn store_failures_keep_the_dialog() {
    let app = test_app_with(FailingDirectory);
    app.teacher_sessions.set(PEER, SearchMode::FullName);

    let result = app.bot.dispatch_message(PEER, "Иванов").await;

    assert!(result.is_err());
    let replies = app.gateway().replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, error_message());
    assert_eq!(app.teacher_sessions.get(&PEER), Some(SearchMode::FullName));
}

/// TC: replies that can't be delivered.
///
/// # Description
///
/// Delivery failures are logged and swallowed; the flow still completes and clears its state.
#[tokio::test]
async fn delivery_failures_are_swallowed() {
    let bot = CampusBot::new(MemoryDirectory::default(), BrokenGateway);
    bot.dispatch_callback(PEER, "find_by_fio")
        .await
        .expect("Delivery failures are not errors");
    assert_eq!(bot.teacher_search().pending(&PEER), Some(SearchMode::FullName));

    bot.dispatch_message(PEER, "иванов")
        .await
        .expect("Delivery failures are not errors");
    assert_eq!(bot.teacher_search().pending(&PEER), None);
}

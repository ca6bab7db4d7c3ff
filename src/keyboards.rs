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

//! Keyboards module
//!
//! # Description
//!
//! This module includes all the keyboards that are used within the flows of the bot. Keyboards are plain data:
//! rows of [Button] bound to a [Payload]. The messenger adapter renders them into its own markup.

use crate::{
    directory::{Campus, FaqEntry, PlaceKind},
    payload::{Payload, SearchMode, Service},
};

/// How many buttons to show per row in the dynamic lists.
const BUTTONS_PER_ROW: usize = 2;

/// Visual hint of a button. Messengers that can't render it ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonStyle {
    #[default]
    Default,
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub payload: Payload,
    pub style: ButtonStyle,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: Payload) -> Self {
        Button {
            label: label.into(),
            payload,
            style: ButtonStyle::Default,
        }
    }

    pub fn styled(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Keyboard { rows }
    }

    pub fn row(mut self, row: Vec<Button>) -> Self {
        self.rows.push(row);
        self
    }

    /// Iterate over every button, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

/// Group the buttons in rows of two. An odd trailing button gets a row on its own.
pub fn pair_rows(buttons: Vec<Button>) -> Vec<Vec<Button>> {
    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| chunk.to_vec())
        .collect()
}

fn main_menu_button() -> Button {
    Button::new("🏠 Главное меню", Payload::BackToMenu).styled(ButtonStyle::Negative)
}

fn positive(label: &str, payload: Payload) -> Button {
    Button::new(label, payload).styled(ButtonStyle::Positive)
}

/// Entry keyboard of the bot.
pub fn main_menu_keyboard() -> Keyboard {
    Keyboard::new(vec![
        vec![
            positive("1) Поиск препода", Payload::Service(Service::FindTeacher)),
            positive("2) Деканат", Payload::Service(Service::DeanSchedule)),
        ],
        vec![
            positive("3) Корпуса", Payload::Service(Service::CampusInfo)),
            positive("4) Столовые/копирки", Payload::Service(Service::FoodAndCopy)),
        ],
        vec![
            Button::new("5) Частые вопросы", Payload::Service(Service::Faq))
                .styled(ButtonStyle::Negative),
        ],
    ])
}

pub fn search_mode_keyboard() -> Keyboard {
    Keyboard::new(vec![
        vec![
            positive("По факультету", Payload::TeacherSearch(SearchMode::Faculty)),
            positive("По кафедре", Payload::TeacherSearch(SearchMode::Department)),
        ],
        vec![positive("По ФИО", Payload::TeacherSearch(SearchMode::FullName))],
        vec![main_menu_button()],
    ])
}

/// Keyboard shown along with a dean office schedule.
pub fn dean_result_keyboard() -> Keyboard {
    Keyboard::new(vec![
        vec![
            Button::new("◀️ К выбору факультета", Payload::DeanBackToFacultyMenu)
                .styled(ButtonStyle::Positive),
            main_menu_button(),
        ],
    ])
}

/// One button per campus, two per row, followed by a row to go back.
pub fn campus_list_keyboard(campuses: &[Campus], select: fn(i64) -> Payload) -> Keyboard {
    let buttons = campuses
        .iter()
        .map(|c| positive(&c.short_name, select(c.id)))
        .collect();

    Keyboard::new(pair_rows(buttons)).row(vec![
        Button::new("◀️ Назад", Payload::BackToMenu).styled(ButtonStyle::Negative),
    ])
}

pub fn campus_info_keyboard(campus_id: i64) -> Keyboard {
    Keyboard::new(vec![
        vec![Button::new(
            "🗺️ Показать на карте",
            Payload::CampusShowMap(campus_id),
        )],
        vec![
            Button::new(
                "◀️ К списку корпусов",
                Payload::Service(Service::CampusInfo),
            ),
            main_menu_button(),
        ],
    ])
}

/// One row per kind of place available in the campus.
pub fn place_kinds_keyboard(campus_id: i64, kinds: &[PlaceKind]) -> Keyboard {
    let mut keyboard = Keyboard::default();

    for kind in kinds {
        let label = match kind {
            PlaceKind::Canteen => "🍽️ Столовая",
            PlaceKind::Buffet => "☕ Буфеты",
            PlaceKind::Copy => "📄 Копирки",
        };
        keyboard = keyboard.row(vec![Button::new(
            label,
            Payload::PlacesOfKind {
                kind: *kind,
                campus_id,
            },
        )]);
    }

    keyboard.row(vec![
        Button::new(
            "◀️ К выбору корпуса",
            Payload::Service(Service::FoodAndCopy),
        ),
        main_menu_button(),
    ])
}

/// Keyboard shown under a list of places.
pub fn places_keyboard(campus_id: i64, show_other_kinds: bool) -> Keyboard {
    let mut keyboard = Keyboard::default();

    if show_other_kinds {
        keyboard = keyboard.row(vec![Button::new(
            "📋 Буфеты и копирки в этом корпусе",
            Payload::PlacesBackToCampus(campus_id),
        )]);
    }

    keyboard.row(vec![
        Button::new("◀️ К выбору типа", Payload::PlacesCampus(campus_id)),
        main_menu_button(),
    ])
}

pub fn faq_keyboard(entries: &[FaqEntry]) -> Keyboard {
    let mut keyboard = Keyboard::default();

    for entry in entries {
        keyboard = keyboard.row(vec![Button::new(
            entry.question.as_str(),
            Payload::FaqEntry(entry.id),
        )]);
    }

    keyboard.row(vec![main_menu_button()])
}

/// Single button back to the main menu.
pub fn back_to_menu_keyboard() -> Keyboard {
    Keyboard::new(vec![vec![main_menu_button()]])
}

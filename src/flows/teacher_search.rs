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

//! Teacher search flow.
//!
//! # Description
//!
//! The peer picks a field to search by ([SearchMode]) and then types a query. Every match is listed in a single
//! reply and the flow goes back to idle. When nothing matches the peer stays in the input step and may retry.

use super::Turn;
use crate::{
    directory::{DirectoryStore, SEARCH_LIMIT, TeacherCard},
    errors::DbError,
    gateway::{MessagingGateway, Peer, Reply},
    keyboards::search_mode_keyboard,
    payload::SearchMode,
    session::SessionStore,
};
use std::{fmt::Write, sync::Arc};
use tracing::{debug, info};

const MISSING: &str = "—";
const NO_SCHEDULE: &str = "расписание не добавлено";

pub struct TeacherSearch {
    sessions: Arc<dyn SessionStore<SearchMode>>,
}

impl TeacherSearch {
    pub fn new(sessions: Arc<dyn SessionStore<SearchMode>>) -> Self {
        TeacherSearch { sessions }
    }

    /// Search mode the peer is waiting to type a query for.
    pub fn pending(&self, peer: &Peer) -> Option<SearchMode> {
        self.sessions.get(peer)
    }

    pub fn reset(&self, peer: &Peer) {
        if self.sessions.clear(peer).is_some() {
            debug!("Teacher search cancelled for {peer}");
        }
    }

    pub async fn show_modes<D: DirectoryStore, G: MessagingGateway>(&self, turn: &Turn<'_, D, G>) {
        turn.reply(Reply::text("Как будем искать?").with_keyboard(search_mode_keyboard()))
            .await
    }

    /// Enter the input step for the given mode.
    pub async fn ask_for_query<D: DirectoryStore, G: MessagingGateway>(
        &self,
        turn: &Turn<'_, D, G>,
        mode: SearchMode,
    ) {
        self.sessions.set(turn.peer, mode);
        debug!("{} searches teachers by {mode}", turn.peer);

        turn.reply(Reply::text(prompt(mode))).await
    }

    /// Consume free text when the peer is in the input step.
    pub async fn on_message<D: DirectoryStore, G: MessagingGateway>(
        &self,
        turn: &Turn<'_, D, G>,
        text: &str,
    ) -> Result<bool, DbError> {
        let Some(mode) = self.sessions.get(&turn.peer) else {
            return Ok(false);
        };

        let query = text.trim();
        if query.is_empty() {
            turn.reply(Reply::text("Введите текст запроса.")).await;
            return Ok(true);
        }

        let teachers = turn
            .query(turn.directory.search_teachers(mode, query, SEARCH_LIMIT))
            .await?;

        if teachers.is_empty() {
            turn.reply(Reply::text("Совпадений не найдено. Попробуйте иначе."))
                .await;
            return Ok(true);
        }

        info!("Found {} teachers by {mode}", teachers.len());
        turn.reply(Reply::text(format_results(&teachers))).await;
        self.sessions.clear(&turn.peer);

        Ok(true)
    }
}

fn prompt(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Faculty => "Введите название факультета:",
        SearchMode::Department => "Введите название кафедры:",
        SearchMode::FullName => "Введите часть ФИО (например, «иванов»):",
    }
}

fn or_missing<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

/// Card of a single teacher. Missing data is replaced by a placeholder.
pub fn format_teacher(teacher: &TeacherCard) -> String {
    format!(
        "• {}\n  Институт: {}\n  Факультет: {}\n  Кафедра: {}\n  Почта: {}\n  Расписание: {}",
        teacher.full_name,
        or_missing(teacher.institute.as_deref(), MISSING),
        or_missing(teacher.faculty.as_deref(), MISSING),
        or_missing(teacher.department.as_deref(), MISSING),
        or_missing(Some(teacher.email.as_str()), MISSING),
        or_missing(Some(teacher.schedule.as_str()), NO_SCHEDULE),
    )
}

pub fn format_results(teachers: &[TeacherCard]) -> String {
    let mut text = String::from("Найдено:\n");

    for teacher in teachers {
        let _ = writeln!(text, "{}", format_teacher(teacher));
    }

    text
}

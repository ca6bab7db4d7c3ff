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

//! Dean office schedule flow.
//!
//! # Description
//!
//! The peer types the name of a faculty. A single match, or an exact (case-insensitive) match among several,
//! resolves the lookup: the schedule of the dean office is shown and the flow goes back to idle. No match or an
//! ambiguous match keeps the peer in the input step.

use super::Turn;
use crate::{
    directory::{DeanOffice, DirectoryStore, Faculty, SEARCH_LIMIT},
    errors::DbError,
    gateway::{MessagingGateway, Peer, Reply},
    keyboards::dean_result_keyboard,
    session::{DeanStep, SessionStore},
};
use std::{fmt::Write, sync::Arc};
use tracing::{debug, info};

pub struct DeanSchedule {
    sessions: Arc<dyn SessionStore<DeanStep>>,
}

impl DeanSchedule {
    pub fn new(sessions: Arc<dyn SessionStore<DeanStep>>) -> Self {
        DeanSchedule { sessions }
    }

    pub fn pending(&self, peer: &Peer) -> Option<DeanStep> {
        self.sessions.get(peer)
    }

    pub fn reset(&self, peer: &Peer) {
        if self.sessions.clear(peer).is_some() {
            debug!("Dean office lookup cancelled for {peer}");
        }
    }

    /// Enter the input step.
    pub async fn ask_for_faculty<D: DirectoryStore, G: MessagingGateway>(
        &self,
        turn: &Turn<'_, D, G>,
    ) {
        self.sessions.set(turn.peer, DeanStep::AwaitingFacultyName);

        turn.reply(Reply::text(
            "Введите название факультета (например, «ИУ»):",
        ))
        .await
    }

    pub async fn on_message<D: DirectoryStore, G: MessagingGateway>(
        &self,
        turn: &Turn<'_, D, G>,
        text: &str,
    ) -> Result<bool, DbError> {
        if self.sessions.get(&turn.peer) != Some(DeanStep::AwaitingFacultyName) {
            return Ok(false);
        }

        let query = text.trim();
        if query.is_empty() {
            turn.reply(Reply::text("Введите название факультета."))
                .await;
            return Ok(true);
        }

        let faculties = turn
            .query(turn.directory.search_faculties(query, SEARCH_LIMIT))
            .await?;

        let Some(faculty) = resolve(&faculties, query) else {
            let reply = if faculties.is_empty() {
                String::from("Факультеты не найдены. Попробуйте иначе.")
            } else {
                format_candidates(&faculties)
            };
            turn.reply(Reply::text(reply)).await;
            return Ok(true);
        };

        info!("Showing the dean office of {}", faculty.name);
        let reply = match turn.query(turn.directory.dean_office(faculty.id)).await? {
            Some(office) => {
                Reply::text(format_schedule(faculty, &office)).with_keyboard(dean_result_keyboard())
            }
            None => Reply::text(format!(
                "Для факультета «{}» расписание не заполнено.",
                faculty.name
            )),
        };
        turn.reply(reply).await;
        self.sessions.clear(&turn.peer);

        Ok(true)
    }
}

/// Pick the faculty the query refers to, if it is unambiguous.
pub fn resolve<'a>(faculties: &'a [Faculty], query: &str) -> Option<&'a Faculty> {
    match faculties {
        [single] => Some(single),
        _ => {
            let query = query.to_lowercase();
            faculties.iter().find(|f| f.name.to_lowercase() == query)
        }
    }
}

fn format_candidates(faculties: &[Faculty]) -> String {
    let mut text = String::from("Нашлось несколько факультетов:\n");

    for (i, faculty) in faculties.iter().enumerate() {
        let _ = writeln!(text, "{}) {}", i + 1, faculty.name);
    }
    text.push_str("\nУточните название (например, полное наименование).");

    text
}

pub fn format_schedule(faculty: &Faculty, office: &DeanOffice) -> String {
    let mut text = format!("📅 Расписание деканата факультета {}\n\n", faculty.name);

    if office.schedule.trim().is_empty() {
        text.push_str("Расписание не указано.\n\n");
    } else {
        let _ = write!(text, "{}\n\n", office.schedule);
    }
    if !office.contacts.trim().is_empty() {
        let _ = writeln!(text, "Контакты: {}", office.contacts);
    }
    if !office.docs_link.trim().is_empty() {
        let _ = writeln!(text, "Документы/ссылки: {}", office.docs_link);
    }

    text
}

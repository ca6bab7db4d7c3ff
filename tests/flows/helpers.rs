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

use campusbot::{
    CampusBot, MemoryDirectory,
    directory::{
        Campus, DeanOffice, DirectoryStore, Faculty, FaqEntry, Place, PlaceKind, TeacherCard,
        seed::SampleData,
    },
    errors::{DbError, GatewayError},
    gateway::{MessagingGateway, Peer, Reply},
    payload::SearchMode,
    session::{DeanStep, InMemSessionStore},
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{Level, level_filters::LevelFilter};
use tracing_subscriber::{Layer, filter::Targets, fmt, prelude::*};

pub static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let level = std::env::var("TEST_LOG").expect("Failed to read the content of TEST_LOG var");

        let (tracing_level, tracing_levelfilter) = match level.as_str() {
            "info" => (Level::INFO, LevelFilter::INFO),
            "debug" => (Level::DEBUG, LevelFilter::DEBUG),
            "warn" => (Level::WARN, LevelFilter::WARN),
            "error" => (Level::ERROR, LevelFilter::ERROR),
            &_ => (Level::TRACE, LevelFilter::TRACE),
        };

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(tracing_levelfilter),
            )
            .with(Targets::new().with_target("campusbot", tracing_level))
            .init();
    }
});

pub const PEER: Peer = Peer::User(4242);

/// Gateway that keeps every reply instead of sending it.
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<(Peer, Reply)>>,
}

impl RecordingGateway {
    pub fn replies(&self) -> Vec<Reply> {
        self.sent.lock().iter().map(|(_, r)| r.clone()).collect()
    }

    pub fn replies_to(&self, peer: Peer) -> Vec<Reply> {
        self.sent
            .lock()
            .iter()
            .filter(|(p, _)| *p == peer)
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Forget what was recorded so far.
    pub fn take(&self) -> Vec<Reply> {
        self.sent.lock().drain(..).map(|(_, r)| r).collect()
    }
}

impl MessagingGateway for RecordingGateway {
    async fn send(&self, peer: Peer, reply: Reply) -> Result<(), GatewayError> {
        self.sent.lock().push((peer, reply));
        Ok(())
    }
}

/// Gateway whose deliveries always fail.
pub struct BrokenGateway;

impl MessagingGateway for BrokenGateway {
    async fn send(&self, _peer: Peer, _reply: Reply) -> Result<(), GatewayError> {
        Err(GatewayError::Delivery(String::from("network unreachable")))
    }
}

/// Directory whose backend is down.
pub struct FailingDirectory;

fn down<T>() -> Result<T, DbError> {
    Err(DbError::Connection(String::from("connection refused")))
}

impl DirectoryStore for FailingDirectory {
    async fn campuses(&self) -> Result<Vec<Campus>, DbError> {
        down()
    }

    async fn campus(&self, _id: i64) -> Result<Option<Campus>, DbError> {
        down()
    }

    async fn find_campus(&self, _name: &str) -> Result<Option<Campus>, DbError> {
        down()
    }

    async fn place_kinds(&self, _campus_id: i64) -> Result<Vec<PlaceKind>, DbError> {
        down()
    }

    async fn places(&self, _campus_id: i64, _kind: PlaceKind) -> Result<Vec<Place>, DbError> {
        down()
    }

    async fn search_teachers(
        &self,
        _mode: SearchMode,
        _query: &str,
        _limit: i64,
    ) -> Result<Vec<TeacherCard>, DbError> {
        down()
    }

    async fn search_faculties(&self, _query: &str, _limit: i64) -> Result<Vec<Faculty>, DbError> {
        down()
    }

    async fn dean_office(&self, _faculty_id: i64) -> Result<Option<DeanOffice>, DbError> {
        down()
    }

    async fn faq_entries(&self, _limit: i64) -> Result<Vec<FaqEntry>, DbError> {
        down()
    }

    async fn faq_entry(&self, _id: i64) -> Result<Option<FaqEntry>, DbError> {
        down()
    }

    async fn ping(&self) -> Result<(), DbError> {
        down()
    }
}

/// Bot under test with its session stores exposed.
pub struct TestApp<D> {
    pub bot: CampusBot<D, RecordingGateway>,
    pub teacher_sessions: Arc<InMemSessionStore<SearchMode>>,
    pub dean_sessions: Arc<InMemSessionStore<DeanStep>>,
}

impl<D: DirectoryStore> TestApp<D> {
    pub fn gateway(&self) -> &RecordingGateway {
        self.bot.gateway()
    }
}

pub fn test_app_with<D: DirectoryStore>(directory: D) -> TestApp<D> {
    Lazy::force(&TRACING);

    let teacher_sessions = Arc::new(InMemSessionStore::new());
    let dean_sessions = Arc::new(InMemSessionStore::new());

    TestApp {
        bot: CampusBot::with_sessions(
            directory,
            RecordingGateway::default(),
            teacher_sessions.clone(),
            dean_sessions.clone(),
        ),
        teacher_sessions,
        dean_sessions,
    }
}

pub fn test_app() -> TestApp<MemoryDirectory> {
    test_app_with(MemoryDirectory::default())
}

/// Sample data plus a few teachers whose name contains «Петров».
pub fn data_with_namesakes() -> SampleData {
    let mut data = SampleData::new();
    data.teachers
        .retain(|t| !t.full_name.to_lowercase().contains("петров"));

    let next_id = data.teachers.iter().map(|t| t.id).max().unwrap_or_default() + 1;
    let namesakes = [
        ("Петров Игорь Олегович", "petrov_io@example.edu", "Пн 10:00–11:40", 1),
        ("Петрова Анна Сергеевна", "petrova@example.edu", "Ср 12:00–13:40", 6),
        ("Петровский Олег Ильич", "", "", 11),
    ];
    for (i, (name, email, schedule, department_id)) in namesakes.into_iter().enumerate() {
        data.teachers.push(campusbot::directory::Teacher {
            id: next_id + i as i64,
            full_name: name.to_owned(),
            email: email.to_owned(),
            subject: String::from("Физика"),
            schedule: schedule.to_owned(),
            department_id,
        });
    }

    data
}

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

//! Update router.
//!
//! # Description
//!
//! [CampusBot] owns the flows and dispatches every [Inbound] update to them:
//!
//! - Button presses are decoded into a [Payload] and matched on its variant. Undecodable payloads get the
//!   "unknown command" reply and change nothing.
//! - Free text is offered to the flows in a fixed order: teacher search, dean office lookup, places keywords
//!   and campus names. The first flow that consumes it wins. When no flow does, the main menu is shown.

use crate::{
    directory::DirectoryStore,
    errors::DbError,
    flows::{
        DeanSchedule, TeacherSearch, Turn, campus, faq,
        menu::{self, UNKNOWN_COMMAND_TEXT},
        places,
    },
    gateway::{Inbound, MessagingGateway, Peer, Reply},
    payload::{Payload, SearchMode, Service},
    session::{DeanStep, InMemSessionStore, SessionStore},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct CampusBot<D, G> {
    directory: D,
    gateway: G,
    teacher_search: TeacherSearch,
    dean: DeanSchedule,
}

impl<D: DirectoryStore, G: MessagingGateway> CampusBot<D, G> {
    /// Bot with in-memory conversation state.
    pub fn new(directory: D, gateway: G) -> Self {
        CampusBot::with_sessions(
            directory,
            gateway,
            Arc::new(InMemSessionStore::new()),
            Arc::new(InMemSessionStore::new()),
        )
    }

    pub fn with_sessions(
        directory: D,
        gateway: G,
        teacher_sessions: Arc<dyn SessionStore<SearchMode>>,
        dean_sessions: Arc<dyn SessionStore<DeanStep>>,
    ) -> Self {
        CampusBot {
            directory,
            gateway,
            teacher_search: TeacherSearch::new(teacher_sessions),
            dean: DeanSchedule::new(dean_sessions),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn teacher_search(&self) -> &TeacherSearch {
        &self.teacher_search
    }

    pub fn dean(&self) -> &DeanSchedule {
        &self.dean
    }

    fn turn(&self, peer: Peer) -> Turn<'_, D, G> {
        Turn::new(&self.directory, &self.gateway, peer)
    }

    pub async fn handle(&self, update: Inbound) -> Result<(), DbError> {
        match update {
            Inbound::Message { peer, text } => self.dispatch_message(peer, &text).await,
            Inbound::Callback { peer, payload } => self.dispatch_callback(peer, &payload).await,
        }
    }

    /// Send the main menu and drop any dialog in progress.
    pub async fn main_menu(&self, peer: Peer) {
        self.reset(&peer);
        menu::show_main_menu(&self.turn(peer)).await
    }

    pub async fn help(&self, peer: Peer) {
        self.turn(peer)
            .reply(Reply::text(menu::help_text()))
            .await
    }

    fn reset(&self, peer: &Peer) {
        self.teacher_search.reset(peer);
        self.dean.reset(peer);
    }

    pub async fn dispatch_callback(&self, peer: Peer, raw: &str) -> Result<(), DbError> {
        let payload = match raw.parse::<Payload>() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("{e}");
                self.turn(peer)
                    .reply(Reply::text(UNKNOWN_COMMAND_TEXT))
                    .await;
                return Ok(());
            }
        };
        debug!("{peer} pressed {payload}");

        let turn = self.turn(peer);

        match payload {
            Payload::BackToMenu => {
                self.main_menu(peer).await;
                Ok(())
            }
            Payload::Service(Service::FindTeacher) => {
                self.teacher_search.show_modes(&turn).await;
                Ok(())
            }
            Payload::TeacherSearch(mode) => {
                self.dean.reset(&peer);
                self.teacher_search.ask_for_query(&turn, mode).await;
                Ok(())
            }
            Payload::Service(Service::DeanSchedule)
            | Payload::DeanFindByFaculty
            | Payload::DeanBackToFacultyMenu => {
                self.teacher_search.reset(&peer);
                self.dean.ask_for_faculty(&turn).await;
                Ok(())
            }
            Payload::Service(Service::CampusInfo) => campus::show_selection(&turn).await,
            Payload::Campus(id) => campus::show_campus(&turn, id).await,
            Payload::CampusShowMap(id) => campus::show_map(&turn, id).await,
            Payload::Service(Service::FoodAndCopy) => places::show_campus_selection(&turn).await,
            Payload::PlacesCampus(id) | Payload::PlacesBackToCampus(id) => {
                places::show_kinds(&turn, id).await
            }
            Payload::PlacesOfKind { kind, campus_id } => {
                places::show_places(&turn, kind, campus_id).await
            }
            Payload::Service(Service::Faq) => faq::show_questions(&turn).await,
            Payload::FaqEntry(id) => faq::show_answer(&turn, id).await,
        }
    }

    pub async fn dispatch_message(&self, peer: Peer, text: &str) -> Result<(), DbError> {
        let turn = self.turn(peer);

        let handled = self.teacher_search.on_message(&turn, text).await?
            || self.dean.on_message(&turn, text).await?
            || places::on_message(&turn, text).await?
            || campus::on_message(&turn, text).await?;

        if !handled {
            info!("No flow took the message of {peer}, showing the main menu");
            menu::show_main_menu(&turn).await;
        }

        Ok(())
    }
}

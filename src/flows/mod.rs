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

//! Flows of the bot.
//!
//! # Description
//!
//! A flow is a self-contained dialog: the teacher search, the dean office lookup, the campus guide, the canteen
//! and copy centre guide and the FAQ. Flows receive a [Turn] with the collaborators of the current update and
//! answer through [Turn::reply].
//!
//! Flows that take free text expose an `on_message` operation that returns `Ok(true)` when the text was
//! consumed. A failed directory query is reported to the peer with [error_message] and propagated, so the
//! caller can log it.

use crate::{
    directory::DirectoryStore,
    errors::{DbError, error_message},
    gateway::{MessagingGateway, Peer, Reply},
};
use std::future::Future;
use tracing::error;

pub mod campus;
pub mod dean;
pub mod faq;
pub mod menu;
pub mod places;
pub mod teacher_search;

pub use dean::DeanSchedule;
pub use teacher_search::TeacherSearch;

/// Collaborators of a single update.
pub struct Turn<'a, D, G> {
    pub directory: &'a D,
    pub gateway: &'a G,
    pub peer: Peer,
}

impl<'a, D: DirectoryStore, G: MessagingGateway> Turn<'a, D, G> {
    pub fn new(directory: &'a D, gateway: &'a G, peer: Peer) -> Self {
        Turn {
            directory,
            gateway,
            peer,
        }
    }

    pub async fn reply(&self, reply: Reply) {
        self.gateway.deliver(self.peer, reply).await
    }

    /// Await a directory query. On failure the peer is told that the request failed and the error is handed
    /// back.
    pub async fn query<T>(
        &self,
        query: impl Future<Output = Result<T, DbError>>,
    ) -> Result<T, DbError> {
        match query.await {
            Ok(value) => Ok(value),
            Err(e) => {
                error!("Directory query failed for {}: {e}", self.peer);
                self.reply(Reply::text(error_message())).await;
                Err(e)
            }
        }
    }
}

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

//! Messaging gateway module.
//!
//! # Description
//!
//! The flows of the bot never talk to the messenger directly. They address a [Peer] and hand a [Reply] to an
//! implementation of [MessagingGateway]. The Telegram implementation lives in [telegram]; tests plug their own
//! recording gateway.

use crate::{errors::GatewayError, keyboards::Keyboard};
use std::{fmt, future::Future};
use tracing::error;

pub mod telegram;

pub use telegram::TelegramGateway;

/// The counterpart of a conversation.
///
/// # Description
///
/// Group chats are addressed by their chat ID, private conversations by the ID of the user. Conversation state
/// is keyed by this value, so both the message and the callback paths must derive the same peer for the same
/// conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Peer {
    Chat(i64),
    User(u64),
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Peer::Chat(id) => write!(f, "chat:{id}"),
            Peer::User(id) => write!(f, "user:{id}"),
        }
    }
}

/// Outbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
    /// URL of a picture to send along with the text, which then becomes its caption.
    pub photo_url: Option<String>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            keyboard: None,
            photo_url: None,
        }
    }

    pub fn photo(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Reply {
            text: caption.into(),
            keyboard: None,
            photo_url: Some(url.into()),
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Inbound update already stripped of the messenger specifics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Free text typed by the peer.
    Message { peer: Peer, text: String },
    /// Button pressed by the peer.
    Callback { peer: Peer, payload: String },
}

pub trait MessagingGateway: Send + Sync {
    fn send(
        &self,
        peer: Peer,
        reply: Reply,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Send a reply and log a delivery failure instead of propagating it.
    ///
    /// # Description
    ///
    /// There is no retry policy: once the message is lost, the conversation state may be ahead of what the
    /// user saw.
    fn deliver(&self, peer: Peer, reply: Reply) -> impl Future<Output = ()> + Send {
        async move {
            if let Err(e) = self.send(peer, reply).await {
                error!("Failed to send a reply to {peer}: {e}");
            }
        }
    }
}

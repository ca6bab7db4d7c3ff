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

//! Telegram implementation of the [MessagingGateway].

use super::{Inbound, MessagingGateway, Peer, Reply};
use crate::{errors::GatewayError, keyboards::Keyboard};
use teloxide::{
    adaptors::Throttle,
    prelude::*,
    types::{Chat, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, User},
};
use tracing::trace;
use url::Url;

#[derive(Clone)]
pub struct TelegramGateway {
    bot: Throttle<Bot>,
}

impl TelegramGateway {
    pub fn new(bot: Throttle<Bot>) -> Self {
        TelegramGateway { bot }
    }
}

/// Chat in which the replies to a peer are sent.
pub fn chat_id(peer: Peer) -> ChatId {
    match peer {
        Peer::Chat(id) => ChatId(id),
        Peer::User(id) => ChatId::from(UserId(id)),
    }
}

/// Peer of a conversation held in `chat`. Private chats are keyed by the user.
pub fn peer_of_chat(chat: &Chat, user: Option<&User>) -> Peer {
    match user {
        Some(user) if chat.is_private() => Peer::User(user.id.0),
        _ => Peer::Chat(chat.id.0),
    }
}

/// Free text of a message. Messages without text are ignored.
pub fn inbound_message(msg: &Message) -> Option<Inbound> {
    msg.text().map(|text| Inbound::Message {
        peer: peer_of_chat(&msg.chat, msg.from.as_ref()),
        text: text.to_owned(),
    })
}

/// Button press. The peer comes from the chat of the message that carried the keyboard when Telegram
/// still gives it, from the user who pressed it otherwise.
pub fn inbound_callback(q: &CallbackQuery) -> Option<Inbound> {
    let peer = match &q.message {
        Some(message) => peer_of_chat(message.chat(), Some(&q.from)),
        None => Peer::User(q.from.id.0),
    };

    q.data.as_ref().map(|payload| Inbound::Callback {
        peer,
        payload: payload.clone(),
    })
}

/// Render a [Keyboard] as inline buttons. Button styles have no counterpart in Telegram and are dropped.
pub fn inline_keyboard(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.payload.to_string()))
            .collect::<Vec<_>>()
    }))
}

impl MessagingGateway for TelegramGateway {
    async fn send(&self, peer: Peer, reply: Reply) -> Result<(), GatewayError> {
        let chat_id = chat_id(peer);
        let markup = reply.keyboard.as_ref().map(inline_keyboard);

        match reply.photo_url {
            Some(photo_url) => {
                let url = Url::parse(&photo_url)
                    .map_err(|e| GatewayError::InvalidMediaUrl(format!("{photo_url}: {e}")))?;
                let mut request = self.bot.send_photo(chat_id, InputFile::url(url));
                if !reply.text.is_empty() {
                    request = request.caption(reply.text);
                }
                if let Some(markup) = markup {
                    request = request.reply_markup(markup);
                }
                request
                    .await
                    .map_err(|e| GatewayError::Delivery(e.to_string()))?;
            }
            None => {
                let mut request = self.bot.send_message(chat_id, reply.text);
                if let Some(markup) = markup {
                    request = request.reply_markup(markup);
                }
                request
                    .await
                    .map_err(|e| GatewayError::Delivery(e.to_string()))?;
            }
        }

        trace!("Reply sent to {peer}");

        Ok(())
    }
}

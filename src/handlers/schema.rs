// Copyright 2024-2025 Felipe Torres González
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

//! Main handler of the CampusBot.
//!
//! # Description
//!
//! The handler implemented herein shall be passed to the [teloxide::dispatching::Dispatcher::builder]
//! instance of the main application. Commands are served first, any other text message goes to the
//! router of the flows, and button presses go to the callback endpoint.

use crate::{Command, endpoints::*};
use teloxide::{dispatching::UpdateHandler, prelude::*};

/// Main handler of the CampusBot application.
pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start))
        .branch(case![Command::Help].endpoint(help));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(dptree::endpoint(text));

    let query_handler = Update::filter_callback_query().endpoint(callback);

    dptree::entry()
        .branch(message_handler)
        .branch(query_handler)
}

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

//! Main menu and fixed texts.

use super::Turn;
use crate::{
    directory::DirectoryStore, gateway::MessagingGateway, gateway::Reply,
    keyboards::main_menu_keyboard,
};

pub const WELCOME_TEXT: &str = "Выбери раздел 👇";
pub const UNKNOWN_COMMAND_TEXT: &str = "Неизвестная команда. Нажми одну из кнопок меню.";

/// The main menu, ready to be sent.
pub fn main_menu() -> Reply {
    Reply::text(WELCOME_TEXT).with_keyboard(main_menu_keyboard())
}

pub async fn show_main_menu<D: DirectoryStore, G: MessagingGateway>(turn: &Turn<'_, D, G>) {
    turn.reply(main_menu()).await
}

pub fn help_text() -> String {
    String::from(
        "Я помогаю ориентироваться в университете:\n\
         • поиск преподавателей по факультету, кафедре или ФИО;\n\
         • расписание деканатов;\n\
         • информация о корпусах;\n\
         • столовые, буфеты и копирки;\n\
         • ответы на частые вопросы.\n\n\
         /start — главное меню\n\
         /help — эта справка",
    )
}

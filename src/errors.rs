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

//! Custom error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("unable to connect to the DB server: {0}")]
    Connection(String),
    #[error("failed to migrate the DB schema: {0}")]
    Migration(String),
    #[error("malformed record in the DB: {0}")]
    MalformedRecord(String),
    #[error("unknown db error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for DbError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DbError::Connection(value.to_string())
            }
            _ => DbError::Unknown(value.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("failed to deliver the message: {0}")]
    Delivery(String),
    #[error("invalid media URL: {0}")]
    InvalidMediaUrl(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PayloadError {
    #[error("unrecognised callback payload: {0}")]
    Unrecognised(String),
    #[error("invalid entity id in callback payload: {0}")]
    InvalidId(String),
}

/// Text sent to the user when a request could not be served.
pub fn error_message() -> &'static str {
    "🚒 Произошла ошибка, попробуйте позже."
}

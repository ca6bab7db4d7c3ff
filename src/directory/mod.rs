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

//! Campus directory.
//!
//! # Description
//!
//! The directory holds the Institute → Faculty → Department → Teacher hierarchy, the campuses and the places
//! inside them, the dean offices and the FAQ. The flows only see the [DirectoryStore] trait: [PgDirectory] is
//! the production backend and [MemoryDirectory] serves the same queries from memory.

use crate::{errors::DbError, payload::SearchMode};
use std::{fmt, future::Future, str::FromStr};

mod memory;
mod postgres;
pub mod seed;

pub use memory::MemoryDirectory;
pub use postgres::PgDirectory;

/// Maximum number of rows returned by the substring searches.
pub const SEARCH_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Institute {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Faculty {
    pub id: i64,
    pub name: String,
    pub institute_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub faculty_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub subject: String,
    pub schedule: String,
    pub department_id: i64,
}

/// A teacher joined with the names of its department, faculty and institute.
///
/// # Description
///
/// Missing links of the hierarchy are reported as `None`, the formatter shows a placeholder for them.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TeacherCard {
    pub full_name: String,
    pub email: String,
    pub schedule: String,
    pub department: Option<String>,
    pub faculty: Option<String>,
    pub institute: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DeanOffice {
    pub faculty_id: i64,
    pub schedule: String,
    pub contacts: String,
    pub docs_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Campus {
    pub id: i64,
    pub short_name: String,
    pub full_name: String,
    pub address: String,
    pub metro: String,
    pub description: String,
    pub image_url: String,
    pub map_image_url: String,
}

/// Closed set of place kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlaceKind {
    Canteen,
    Buffet,
    Copy,
}

impl PlaceKind {
    pub const ALL: [PlaceKind; 3] = [PlaceKind::Canteen, PlaceKind::Buffet, PlaceKind::Copy];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceKind::Canteen => "canteen",
            PlaceKind::Buffet => "buffet",
            PlaceKind::Copy => "copy",
        }
    }
}

impl fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlaceKind {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "canteen" => Ok(PlaceKind::Canteen),
            "buffet" => Ok(PlaceKind::Buffet),
            "copy" => Ok(PlaceKind::Copy),
            _ => Err(DbError::MalformedRecord(format!("unknown place kind: {s}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub id: i64,
    pub campus_id: i64,
    pub kind: PlaceKind,
    pub name: String,
    pub location: String,
    pub schedule: String,
    /// Today's menu for food places, list of services for copy centres. One item per line.
    pub menu_today: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FaqEntry {
    pub id: i64,
    pub question: String,
    pub answer: String,
}

/// Queries the flows run against the directory.
///
/// # Description
///
/// Substring searches are case-insensitive and unanchored; the query is matched literally, so `%` or `_`
/// typed by a user are not wildcards. Lookups by ID return `None` when the row does not exist.
pub trait DirectoryStore: Send + Sync {
    fn campuses(&self) -> impl Future<Output = Result<Vec<Campus>, DbError>> + Send;

    fn campus(&self, id: i64) -> impl Future<Output = Result<Option<Campus>, DbError>> + Send;

    /// Campus whose short name equals `name` or whose full name contains it.
    fn find_campus(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Campus>, DbError>> + Send;

    /// Distinct kinds of the places of a campus.
    fn place_kinds(
        &self,
        campus_id: i64,
    ) -> impl Future<Output = Result<Vec<PlaceKind>, DbError>> + Send;

    fn places(
        &self,
        campus_id: i64,
        kind: PlaceKind,
    ) -> impl Future<Output = Result<Vec<Place>, DbError>> + Send;

    fn search_teachers(
        &self,
        mode: SearchMode,
        query: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<TeacherCard>, DbError>> + Send;

    /// Faculties whose name contains `query`, ordered by name.
    fn search_faculties(
        &self,
        query: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Faculty>, DbError>> + Send;

    fn dean_office(
        &self,
        faculty_id: i64,
    ) -> impl Future<Output = Result<Option<DeanOffice>, DbError>> + Send;

    fn faq_entries(&self, limit: i64)
    -> impl Future<Output = Result<Vec<FaqEntry>, DbError>> + Send;

    fn faq_entry(&self, id: i64) -> impl Future<Output = Result<Option<FaqEntry>, DbError>> + Send;

    /// Check that the backend answers.
    fn ping(&self) -> impl Future<Output = Result<(), DbError>> + Send;
}

/// Build an `ILIKE` pattern that matches `query` literally anywhere in the column.
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');

    pattern
}

/// Case-insensitive substring test with the same semantics as [contains_pattern].
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

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

//! Callback payloads.
//!
//! # Description
//!
//! Buttons carry a short string that comes back when the user presses them. The bot never matches on those
//! strings beyond this module: they are decoded into a [Payload] at the boundary and encoded back through its
//! [std::fmt::Display] implementation when a keyboard is built.
//!
//! Payloads that carry an entity ID are namespaced by prefix. Some prefixes overlap (`campus_` is a prefix of
//! `campus_show_map_`), so decoding picks the longest prefix whose remainder is a valid ID, independently of
//! the order of [ID_PREFIXES].

use crate::{directory::PlaceKind, errors::PayloadError};
use std::{fmt, str::FromStr};

/// Top-level sections of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    FindTeacher,
    DeanSchedule,
    CampusInfo,
    FoodAndCopy,
    Faq,
}

/// Field used by the teacher search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    Faculty,
    Department,
    FullName,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Faculty => "faculty",
            SearchMode::Department => "department",
            SearchMode::FullName => "fio",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decoded callback payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Payload {
    BackToMenu,
    Service(Service),
    TeacherSearch(SearchMode),
    DeanFindByFaculty,
    DeanBackToFacultyMenu,
    Campus(i64),
    CampusShowMap(i64),
    PlacesCampus(i64),
    PlacesOfKind { kind: PlaceKind, campus_id: i64 },
    PlacesBackToCampus(i64),
    FaqEntry(i64),
}

/// Kinds of payloads that carry an entity ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPayload {
    Campus,
    CampusShowMap,
    PlacesCampus,
    PlacesOfKind(PlaceKind),
    PlacesBackToCampus,
    FaqEntry,
}

impl IdPayload {
    fn with_id(self, id: i64) -> Payload {
        match self {
            IdPayload::Campus => Payload::Campus(id),
            IdPayload::CampusShowMap => Payload::CampusShowMap(id),
            IdPayload::PlacesCampus => Payload::PlacesCampus(id),
            IdPayload::PlacesOfKind(kind) => Payload::PlacesOfKind {
                kind,
                campus_id: id,
            },
            IdPayload::PlacesBackToCampus => Payload::PlacesBackToCampus(id),
            IdPayload::FaqEntry => Payload::FaqEntry(id),
        }
    }
}

/// Payloads without arguments.
pub const CONSTANT_PAYLOADS: [(&str, Payload); 11] = [
    ("back_to_menu", Payload::BackToMenu),
    ("svc_find_teacher", Payload::Service(Service::FindTeacher)),
    ("svc_dean_schedule", Payload::Service(Service::DeanSchedule)),
    ("svc_campus_info", Payload::Service(Service::CampusInfo)),
    ("svc_food_copy", Payload::Service(Service::FoodAndCopy)),
    ("svc_faq", Payload::Service(Service::Faq)),
    ("find_by_faculty", Payload::TeacherSearch(SearchMode::Faculty)),
    ("find_by_department", Payload::TeacherSearch(SearchMode::Department)),
    ("find_by_fio", Payload::TeacherSearch(SearchMode::FullName)),
    ("dean_find_by_faculty", Payload::DeanFindByFaculty),
    ("dean_back_to_faculty_menu", Payload::DeanBackToFacultyMenu),
];

/// Prefixes of the payloads that carry an entity ID.
pub const ID_PREFIXES: [(&str, IdPayload); 8] = [
    ("campus_", IdPayload::Campus),
    ("campus_show_map_", IdPayload::CampusShowMap),
    ("places_campus_", IdPayload::PlacesCampus),
    ("places_canteen_", IdPayload::PlacesOfKind(PlaceKind::Canteen)),
    ("places_buffet_", IdPayload::PlacesOfKind(PlaceKind::Buffet)),
    ("places_copy_", IdPayload::PlacesOfKind(PlaceKind::Copy)),
    ("places_back_to_campus_", IdPayload::PlacesBackToCampus),
    ("faq_", IdPayload::FaqEntry),
];

impl Payload {
    /// Decode a payload using the given prefix table.
    ///
    /// # Description
    ///
    /// Constants are matched exactly first. Then every prefix of `prefixes` that matches the start of `raw` is
    /// considered, longest first, and the first one whose remainder parses as an ID wins.
    pub fn parse_with(raw: &str, prefixes: &[(&str, IdPayload)]) -> Result<Self, PayloadError> {
        if let Some((_, payload)) = CONSTANT_PAYLOADS.iter().find(|(name, _)| *name == raw) {
            return Ok(*payload);
        }

        let mut candidates: Vec<&(&str, IdPayload)> = prefixes
            .iter()
            .filter(|(prefix, _)| raw.starts_with(prefix))
            .collect();

        if candidates.is_empty() {
            return Err(PayloadError::Unrecognised(raw.to_owned()));
        }

        candidates.sort_by_key(|(prefix, _)| std::cmp::Reverse(prefix.len()));

        candidates
            .into_iter()
            .find_map(|(prefix, kind)| {
                raw[prefix.len()..]
                    .parse::<i64>()
                    .ok()
                    .map(|id| kind.with_id(id))
            })
            .ok_or_else(|| PayloadError::InvalidId(raw.to_owned()))
    }
}

impl FromStr for Payload {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Payload::parse_with(s, &ID_PREFIXES)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::BackToMenu => write!(f, "back_to_menu"),
            Payload::Service(Service::FindTeacher) => write!(f, "svc_find_teacher"),
            Payload::Service(Service::DeanSchedule) => write!(f, "svc_dean_schedule"),
            Payload::Service(Service::CampusInfo) => write!(f, "svc_campus_info"),
            Payload::Service(Service::FoodAndCopy) => write!(f, "svc_food_copy"),
            Payload::Service(Service::Faq) => write!(f, "svc_faq"),
            Payload::TeacherSearch(SearchMode::Faculty) => write!(f, "find_by_faculty"),
            Payload::TeacherSearch(SearchMode::Department) => write!(f, "find_by_department"),
            Payload::TeacherSearch(SearchMode::FullName) => write!(f, "find_by_fio"),
            Payload::DeanFindByFaculty => write!(f, "dean_find_by_faculty"),
            Payload::DeanBackToFacultyMenu => write!(f, "dean_back_to_faculty_menu"),
            Payload::Campus(id) => write!(f, "campus_{id}"),
            Payload::CampusShowMap(id) => write!(f, "campus_show_map_{id}"),
            Payload::PlacesCampus(id) => write!(f, "places_campus_{id}"),
            Payload::PlacesOfKind { kind, campus_id } => write!(f, "places_{kind}_{campus_id}"),
            Payload::PlacesBackToCampus(id) => write!(f, "places_back_to_campus_{id}"),
            Payload::FaqEntry(id) => write!(f, "faq_{id}"),
        }
    }
}

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

//! In-memory directory.

use super::{
    Campus, DeanOffice, DirectoryStore, Faculty, FaqEntry, Place, PlaceKind, TeacherCard,
    contains_ignore_case, seed::SampleData,
};
use crate::{errors::DbError, payload::SearchMode};
use std::sync::Arc;

/// [DirectoryStore] that answers from a [SampleData] set kept in memory.
///
/// # Description
///
/// Queries follow the semantics of [super::PgDirectory]: same filters, same limits, faculties sorted by name.
/// Rows are returned in insertion order where the DB gives no ordering guarantee.
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    data: Arc<SampleData>,
}

impl MemoryDirectory {
    pub fn new(data: SampleData) -> Self {
        MemoryDirectory {
            data: Arc::new(data),
        }
    }

    fn teacher_card(&self, teacher: &super::Teacher) -> TeacherCard {
        let department = self
            .data
            .departments
            .iter()
            .find(|d| d.id == teacher.department_id);
        let faculty = department.and_then(|d| self.data.faculties.iter().find(|f| f.id == d.faculty_id));
        let institute =
            faculty.and_then(|f| self.data.institutes.iter().find(|i| i.id == f.institute_id));

        TeacherCard {
            full_name: teacher.full_name.clone(),
            email: teacher.email.clone(),
            schedule: teacher.schedule.clone(),
            department: department.map(|d| d.name.clone()),
            faculty: faculty.map(|f| f.name.clone()),
            institute: institute.map(|i| i.name.clone()),
        }
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        MemoryDirectory::new(SampleData::new())
    }
}

fn limit(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or_default()
}

impl DirectoryStore for MemoryDirectory {
    async fn campuses(&self) -> Result<Vec<Campus>, DbError> {
        Ok(self.data.campuses.clone())
    }

    async fn campus(&self, id: i64) -> Result<Option<Campus>, DbError> {
        Ok(self.data.campuses.iter().find(|c| c.id == id).cloned())
    }

    async fn find_campus(&self, name: &str) -> Result<Option<Campus>, DbError> {
        let name = name.to_lowercase();

        Ok(self
            .data
            .campuses
            .iter()
            .find(|c| c.short_name.to_lowercase() == name || contains_ignore_case(&c.full_name, &name))
            .cloned())
    }

    async fn place_kinds(&self, campus_id: i64) -> Result<Vec<PlaceKind>, DbError> {
        let mut kinds: Vec<PlaceKind> = self
            .data
            .places
            .iter()
            .filter(|p| p.campus_id == campus_id)
            .map(|p| p.kind)
            .collect();
        kinds.sort();
        kinds.dedup();

        Ok(kinds)
    }

    async fn places(&self, campus_id: i64, kind: PlaceKind) -> Result<Vec<Place>, DbError> {
        Ok(self
            .data
            .places
            .iter()
            .filter(|p| p.campus_id == campus_id && p.kind == kind)
            .cloned()
            .collect())
    }

    async fn search_teachers(
        &self,
        mode: SearchMode,
        query: &str,
        max: i64,
    ) -> Result<Vec<TeacherCard>, DbError> {
        Ok(self
            .data
            .teachers
            .iter()
            .map(|t| self.teacher_card(t))
            .filter(|card| match mode {
                SearchMode::FullName => contains_ignore_case(&card.full_name, query),
                SearchMode::Department => card
                    .department
                    .as_deref()
                    .is_some_and(|d| contains_ignore_case(d, query)),
                SearchMode::Faculty => card
                    .faculty
                    .as_deref()
                    .is_some_and(|f| contains_ignore_case(f, query)),
            })
            .take(limit(max))
            .collect())
    }

    async fn search_faculties(&self, query: &str, max: i64) -> Result<Vec<Faculty>, DbError> {
        let mut faculties: Vec<Faculty> = self
            .data
            .faculties
            .iter()
            .filter(|f| contains_ignore_case(&f.name, query))
            .cloned()
            .collect();
        faculties.sort_by(|a, b| a.name.cmp(&b.name));
        faculties.truncate(limit(max));

        Ok(faculties)
    }

    async fn dean_office(&self, faculty_id: i64) -> Result<Option<DeanOffice>, DbError> {
        Ok(self
            .data
            .dean_offices
            .iter()
            .find(|d| d.faculty_id == faculty_id)
            .cloned())
    }

    async fn faq_entries(&self, max: i64) -> Result<Vec<FaqEntry>, DbError> {
        Ok(self.data.faq.iter().take(limit(max)).cloned().collect())
    }

    async fn faq_entry(&self, id: i64) -> Result<Option<FaqEntry>, DbError> {
        Ok(self.data.faq.iter().find(|e| e.id == id).cloned())
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

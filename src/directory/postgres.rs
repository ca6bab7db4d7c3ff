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

//! Module with the PostgreSQL backend of the campus directory.

use super::{
    Campus, DeanOffice, DirectoryStore, Faculty, FaqEntry, Place, PlaceKind, TeacherCard,
    contains_pattern,
};
use crate::{configuration::DatabaseSettings, errors::DbError, payload::SearchMode};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{debug, error, instrument, trace, warn};

/// How long to wait for a free connection of the pool.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Columns of the teacher search. The hierarchy is joined with `LEFT JOIN` so a broken link still lists
/// the teacher.
const TEACHER_CARD_QUERY: &str = r#"
    SELECT t.full_name, t.email, t.schedule,
           d.name AS department, f.name AS faculty, i.name AS institute
    FROM teachers t
    LEFT JOIN departments d ON d.id = t.department_id
    LEFT JOIN faculties f ON f.id = d.faculty_id
    LEFT JOIN institutes i ON i.id = f.institute_id
"#;

const CAMPUS_COLUMNS: &str =
    "id, short_name, full_name, address, metro, description, image_url, map_image_url";

/// [DirectoryStore] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgDirectory {
    db_pool: PgPool,
}

impl PgDirectory {
    #[instrument(name = "Connect the directory DB", skip(settings))]
    pub async fn connect_backend(settings: &DatabaseSettings) -> Result<Self, DbError> {
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections())
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(settings.connect_options()?)
            .await
            .map_err(|e| {
                error!("{e}");
                DbError::Connection(e.to_string())
            })?;

        trace!("PostgreSQL database server succesfully connected");

        Ok(Self { db_pool })
    }

    pub fn from_pool(db_pool: PgPool) -> Self {
        PgDirectory { db_pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db_pool
    }

    /// Apply the embedded migrations.
    pub async fn migrate(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations")
            .run(&self.db_pool)
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;

        debug!("Directory schema up to date");

        Ok(())
    }
}

/// Row of the `places` table. The kind is kept as text in the DB.
#[derive(Debug, sqlx::FromRow)]
struct PlaceBd {
    id: i64,
    campus_id: i64,
    kind: String,
    name: String,
    location: String,
    schedule: String,
    menu_today: String,
}

impl TryFrom<PlaceBd> for Place {
    type Error = DbError;

    fn try_from(value: PlaceBd) -> Result<Self, Self::Error> {
        Ok(Place {
            kind: value.kind.parse()?,
            id: value.id,
            campus_id: value.campus_id,
            name: value.name,
            location: value.location,
            schedule: value.schedule,
            menu_today: value.menu_today,
        })
    }
}

impl DirectoryStore for PgDirectory {
    async fn campuses(&self) -> Result<Vec<Campus>, DbError> {
        let campuses = sqlx::query_as::<_, Campus>(&format!(
            "SELECT {CAMPUS_COLUMNS} FROM campuses ORDER BY id"
        ))
        .fetch_all(&self.db_pool)
        .await?;

        debug!("Obtained {} campuses from the DB", campuses.len());

        Ok(campuses)
    }

    async fn campus(&self, id: i64) -> Result<Option<Campus>, DbError> {
        Ok(sqlx::query_as::<_, Campus>(&format!(
            "SELECT {CAMPUS_COLUMNS} FROM campuses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn find_campus(&self, name: &str) -> Result<Option<Campus>, DbError> {
        Ok(sqlx::query_as::<_, Campus>(&format!(
            "SELECT {CAMPUS_COLUMNS} FROM campuses
             WHERE LOWER(short_name) = LOWER($1) OR full_name ILIKE $2
             ORDER BY id LIMIT 1"
        ))
        .bind(name)
        .bind(contains_pattern(name))
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn place_kinds(&self, campus_id: i64) -> Result<Vec<PlaceKind>, DbError> {
        let kinds: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT kind FROM places WHERE campus_id = $1")
                .bind(campus_id)
                .fetch_all(&self.db_pool)
                .await?;

        let mut kinds: Vec<PlaceKind> = kinds
            .iter()
            .filter_map(|k| match k.parse::<PlaceKind>() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    warn!("Skipping place of campus {campus_id}: {e}");
                    None
                }
            })
            .collect();
        kinds.sort();

        Ok(kinds)
    }

    async fn places(&self, campus_id: i64, kind: PlaceKind) -> Result<Vec<Place>, DbError> {
        let places = sqlx::query_as::<_, PlaceBd>(
            r#"
            SELECT id, campus_id, kind, name, location, schedule, menu_today
            FROM places
            WHERE campus_id = $1 AND kind = $2
            ORDER BY id
            "#,
        )
        .bind(campus_id)
        .bind(kind.as_str())
        .fetch_all(&self.db_pool)
        .await?;

        places.into_iter().map(Place::try_from).collect()
    }

    #[instrument(name = "Search teachers", skip(self))]
    async fn search_teachers(
        &self,
        mode: SearchMode,
        query: &str,
        limit: i64,
    ) -> Result<Vec<TeacherCard>, DbError> {
        let filter = match mode {
            SearchMode::Faculty => "f.name",
            SearchMode::Department => "d.name",
            SearchMode::FullName => "t.full_name",
        };

        let teachers = sqlx::query_as::<_, TeacherCard>(&format!(
            "{TEACHER_CARD_QUERY} WHERE {filter} ILIKE $1 LIMIT $2"
        ))
        .bind(contains_pattern(query))
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?;

        debug!("Found {} teachers", teachers.len());

        Ok(teachers)
    }

    async fn search_faculties(&self, query: &str, limit: i64) -> Result<Vec<Faculty>, DbError> {
        Ok(sqlx::query_as::<_, Faculty>(
            "SELECT id, name, institute_id FROM faculties WHERE name ILIKE $1 ORDER BY name LIMIT $2",
        )
        .bind(contains_pattern(query))
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn dean_office(&self, faculty_id: i64) -> Result<Option<DeanOffice>, DbError> {
        Ok(sqlx::query_as::<_, DeanOffice>(
            "SELECT faculty_id, schedule, contacts, docs_link FROM dean_offices WHERE faculty_id = $1",
        )
        .bind(faculty_id)
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn faq_entries(&self, limit: i64) -> Result<Vec<FaqEntry>, DbError> {
        Ok(sqlx::query_as::<_, FaqEntry>(
            "SELECT id, question, answer FROM faqs ORDER BY id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn faq_entry(&self, id: i64) -> Result<Option<FaqEntry>, DbError> {
        Ok(
            sqlx::query_as::<_, FaqEntry>("SELECT id, question, answer FROM faqs WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.db_pool).await?;

        Ok(())
    }
}

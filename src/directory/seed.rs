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

//! Sample campus directory.
//!
//! # Description
//!
//! One institute with the faculties ИУ, Э and РК, five departments per faculty and three teachers per
//! department, a dean office per faculty, two campuses with their canteens, buffets and copy centres, and a
//! few FAQ entries.
//!
//! IDs are fixed so the same data set can be loaded into PostgreSQL (see [seed_database]) or served from
//! memory by [super::MemoryDirectory]. Seeding is idempotent: existing rows are updated in place.

use super::{
    Campus, DeanOffice, Department, Faculty, FaqEntry, Institute, Place, PlaceKind, Teacher,
};
use crate::errors::DbError;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

const FACULTIES: [&str; 3] = ["ИУ", "Э", "РК"];
const DEPARTMENTS_PER_FACULTY: usize = 5;

const FIRST_NAMES: [&str; 10] = [
    "Иван", "Пётр", "Анна", "Екатерина", "Сергей", "Мария", "Дмитрий", "Ольга", "Алексей", "Наталья",
];
const LAST_NAMES: [&str; 10] = [
    "Иванов", "Петров", "Сидорова", "Кузнецов", "Смирнова", "Попов", "Лебедев", "Козлова", "Новикова",
    "Морозов",
];
const MIDDLE_NAMES: [&str; 6] = [
    "Иванович",
    "Петрович",
    "Сергеевна",
    "Андреевна",
    "Алексеевич",
    "Владимировна",
];

/// Subject, days and room of the three teachers of every department.
const COURSES: [(&str, &str, &str); 3] = [
    (
        "Алгоритмы и структуры данных",
        "Пн 10:00–11:40; Ср 12:00–13:40",
        "А-101",
    ),
    ("Базы данных", "Вт 14:00–15:40; Чт 10:00–11:40", "Б-203"),
    (
        "Операционные системы",
        "Пт 09:00–10:40; Ср 16:00–17:40",
        "В-317",
    ),
];

/// Complete sample data set.
#[derive(Debug, Clone, Default)]
pub struct SampleData {
    pub institutes: Vec<Institute>,
    pub faculties: Vec<Faculty>,
    pub departments: Vec<Department>,
    pub teachers: Vec<Teacher>,
    pub dean_offices: Vec<DeanOffice>,
    pub campuses: Vec<Campus>,
    pub places: Vec<Place>,
    pub faq: Vec<FaqEntry>,
}

impl SampleData {
    pub fn new() -> Self {
        let mut data = SampleData::default();

        data.institutes.push(Institute {
            id: 1,
            name: String::from("Институт информатики и систем управления"),
        });

        for (i, name) in FACULTIES.iter().enumerate() {
            let faculty_id = i as i64 + 1;
            data.faculties.push(Faculty {
                id: faculty_id,
                name: name.to_string(),
                institute_id: 1,
            });
            data.dean_offices.push(dean_office_for(faculty_id, name));

            for dep_index in 1..=DEPARTMENTS_PER_FACULTY {
                let department = Department {
                    id: data.departments.len() as i64 + 1,
                    name: format!("{name}{dep_index}"),
                    faculty_id,
                };
                let first_teacher_id = data.teachers.len() as i64 + 1;
                data.teachers
                    .extend(teachers_for(&department, dep_index, first_teacher_id));
                data.departments.push(department);
            }
        }

        data.campuses = campuses();
        data.places = places();
        data.faq = faq();

        data
    }
}

fn dean_office_for(faculty_id: i64, faculty: &str) -> DeanOffice {
    let secretary = match faculty {
        "ИУ" => "Иванова Елена Сергеевна",
        "Э" => "Петров Алексей Владимирович",
        "РК" => "Сидорова Наталья Ивановна",
        _ => "Неизвестен",
    };

    DeanOffice {
        faculty_id,
        schedule: format!(
            "Пн–Чт: 10:00–17:00 (обед 13:00–14:00)\nПт: 10:00–16:00\nСб–Вс: выходной\n\nОтветственный секретарь: {secretary}"
        ),
        contacts: format!(
            "Тел.: +7 (495) 000-00-{:03}, каб. {faculty}-204",
            faculty_id + 100
        ),
        docs_link: format!(
            "https://example.edu/{}/dean/docs",
            transliterate(&faculty.to_lowercase())
        ),
    }
}

/// Three teachers for a department. Names rotate through the tables with a different stride each, which
/// keeps repetitions low.
fn teachers_for(department: &Department, dep_index: usize, first_id: i64) -> Vec<Teacher> {
    COURSES
        .iter()
        .enumerate()
        .map(|(i, (subject, days, room))| {
            let first = FIRST_NAMES[(dep_index + i) % FIRST_NAMES.len()];
            let last = LAST_NAMES[(dep_index * 2 + i) % LAST_NAMES.len()];
            let middle = MIDDLE_NAMES[(dep_index + i / 2) % MIDDLE_NAMES.len()];

            Teacher {
                id: first_id + i as i64,
                full_name: format!("{last} {first} {middle}"),
                email: format!(
                    "{}_{}@example.edu",
                    transliterate(&department.name.to_lowercase()),
                    transliterate(&last.to_lowercase())
                ),
                subject: subject.to_string(),
                schedule: format!("{days}; Аудитория: {room}"),
                department_id: department.id,
            }
        })
        .collect()
}

fn campuses() -> Vec<Campus> {
    vec![
        Campus {
            id: 1,
            short_name: String::from("ГУК"),
            full_name: String::from("Главный учебный корпус"),
            address: String::from("ул. Студенческая, д. 35"),
            metro: String::from("«Университетская» (5 мин. пешком)"),
            description: String::from(
                "• Аудитории 100-499\n• Деканат ФМиЕН\n• Столовая №1\n• Библиотека",
            ),
            image_url: String::from("https://example.com/images/guk.jpg"),
            map_image_url: String::from("https://example.com/maps/guk_map.jpg"),
        },
        Campus {
            id: 2,
            short_name: String::from("Корпус 2"),
            full_name: String::from("Второй учебный корпус"),
            address: String::from("ул. Академическая, д. 15"),
            metro: String::from("«Научная» (10 мин. пешком)"),
            description: String::from(
                "• Аудитории 500-799\n• Лаборатории физики\n• Буфет №2\n• Спортивный зал",
            ),
            image_url: String::from("https://example.com/images/corpus2.jpg"),
            map_image_url: String::new(),
        },
    ]
}

fn places() -> Vec<Place> {
    vec![
        Place {
            id: 1,
            campus_id: 1,
            kind: PlaceKind::Canteen,
            name: String::from("Столовая №1"),
            location: String::from("1 этаж, левое крыло"),
            schedule: String::from("Пн–Пт 09:00–18:00, Сб 10:00–15:00"),
            menu_today: String::from(
                "Борщ — 120 ₽\nКотлета с пюре — 190 ₽\nСалат «Витаминный» — 80 ₽\nКомпот — 40 ₽",
            ),
        },
        Place {
            id: 2,
            campus_id: 1,
            kind: PlaceKind::Buffet,
            name: String::from("Буфет у библиотеки"),
            location: String::from("3 этаж, рядом с читальным залом"),
            schedule: String::from("Пн–Пт 08:30–19:00"),
            menu_today: String::from("Выпечка и кофе\nСэндвичи"),
        },
        Place {
            id: 3,
            campus_id: 1,
            kind: PlaceKind::Copy,
            name: String::from("Копицентр ГУК"),
            location: String::from("цокольный этаж, ауд. 012"),
            schedule: String::from("Пн–Сб 09:00–20:00"),
            menu_today: String::from("Печать и копирование А4/А3\nПереплёт\nСканирование"),
        },
        Place {
            id: 4,
            campus_id: 2,
            kind: PlaceKind::Buffet,
            name: String::from("Буфет №2"),
            location: String::from("2 этаж, холл"),
            schedule: String::from("Пн–Пт 09:00–17:00"),
            menu_today: String::from("Блины с начинкой\nЧай, кофе, морс"),
        },
        Place {
            id: 5,
            campus_id: 2,
            kind: PlaceKind::Copy,
            name: String::from("Принт-точка"),
            location: String::from("1 этаж, у гардероба"),
            schedule: String::from("Пн–Пт 10:00–18:00"),
            menu_today: String::from("Печать с флешки и почты\nЛаминирование"),
        },
    ]
}

fn faq() -> Vec<FaqEntry> {
    vec![
        FaqEntry {
            id: 1,
            question: String::from("Как получить справку об обучении?"),
            answer: String::from(
                "Закажите справку в деканате своего факультета. Обычно она готова в течение трёх рабочих дней.",
            ),
        },
        FaqEntry {
            id: 2,
            question: String::from("Где восстановить студенческий билет?"),
            answer: String::from(
                "Напишите заявление в деканате и приложите фото 3×4. Новый билет выдают через неделю.",
            ),
        },
        FaqEntry {
            id: 3,
            question: String::from("Как попасть в библиотеку?"),
            answer: String::from(
                "Библиотека находится в ГУК. Для входа нужен студенческий билет.",
            ),
        },
    ]
}

/// Latin rendering of a lowercase Cyrillic string, used to build e-mail addresses and URLs.
pub fn transliterate(input: &str) -> String {
    let mut output = String::with_capacity(input.len());

    for c in input.chars() {
        match latin(c) {
            Some(latin) => output.push_str(latin),
            None => output.push(c),
        }
    }

    output
}

fn latin(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'э' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' | 'ы' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ю' => "yu",
        'я' => "ya",
        'ъ' | 'ь' | ' ' => "",
        _ => return None,
    };

    Some(latin)
}

/// Load [SampleData] into the DB.
#[instrument(name = "Seed the directory DB", skip(pool, data))]
pub async fn seed_database(pool: &PgPool, data: &SampleData) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    for institute in &data.institutes {
        sqlx::query(
            "INSERT INTO institutes (id, name) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name",
        )
        .bind(institute.id)
        .bind(&institute.name)
        .execute(&mut *tx)
        .await?;
    }

    for faculty in &data.faculties {
        sqlx::query(
            "INSERT INTO faculties (id, name, institute_id) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, institute_id = EXCLUDED.institute_id",
        )
        .bind(faculty.id)
        .bind(&faculty.name)
        .bind(faculty.institute_id)
        .execute(&mut *tx)
        .await?;
    }

    for department in &data.departments {
        sqlx::query(
            "INSERT INTO departments (id, name, faculty_id) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, faculty_id = EXCLUDED.faculty_id",
        )
        .bind(department.id)
        .bind(&department.name)
        .bind(department.faculty_id)
        .execute(&mut *tx)
        .await?;
    }

    for teacher in &data.teachers {
        sqlx::query(
            "INSERT INTO teachers (id, full_name, email, subject, schedule, department_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET full_name = EXCLUDED.full_name, email = EXCLUDED.email,
                 subject = EXCLUDED.subject, schedule = EXCLUDED.schedule,
                 department_id = EXCLUDED.department_id",
        )
        .bind(teacher.id)
        .bind(&teacher.full_name)
        .bind(&teacher.email)
        .bind(&teacher.subject)
        .bind(&teacher.schedule)
        .bind(teacher.department_id)
        .execute(&mut *tx)
        .await?;
    }

    for office in &data.dean_offices {
        sqlx::query(
            "INSERT INTO dean_offices (faculty_id, schedule, contacts, docs_link) VALUES ($1, $2, $3, $4)
             ON CONFLICT (faculty_id) DO UPDATE SET schedule = EXCLUDED.schedule,
                 contacts = EXCLUDED.contacts, docs_link = EXCLUDED.docs_link",
        )
        .bind(office.faculty_id)
        .bind(&office.schedule)
        .bind(&office.contacts)
        .bind(&office.docs_link)
        .execute(&mut *tx)
        .await?;
    }

    for campus in &data.campuses {
        sqlx::query(
            "INSERT INTO campuses (id, short_name, full_name, address, metro, description, image_url, map_image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (id) DO UPDATE SET short_name = EXCLUDED.short_name,
                 full_name = EXCLUDED.full_name, address = EXCLUDED.address, metro = EXCLUDED.metro,
                 description = EXCLUDED.description, image_url = EXCLUDED.image_url,
                 map_image_url = EXCLUDED.map_image_url",
        )
        .bind(campus.id)
        .bind(&campus.short_name)
        .bind(&campus.full_name)
        .bind(&campus.address)
        .bind(&campus.metro)
        .bind(&campus.description)
        .bind(&campus.image_url)
        .bind(&campus.map_image_url)
        .execute(&mut *tx)
        .await?;
    }

    for place in &data.places {
        sqlx::query(
            "INSERT INTO places (id, campus_id, kind, name, location, schedule, menu_today)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (id) DO UPDATE SET campus_id = EXCLUDED.campus_id, kind = EXCLUDED.kind,
                 name = EXCLUDED.name, location = EXCLUDED.location, schedule = EXCLUDED.schedule,
                 menu_today = EXCLUDED.menu_today",
        )
        .bind(place.id)
        .bind(place.campus_id)
        .bind(place.kind.as_str())
        .bind(&place.name)
        .bind(&place.location)
        .bind(&place.schedule)
        .bind(&place.menu_today)
        .execute(&mut *tx)
        .await?;
    }

    for entry in &data.faq {
        sqlx::query(
            "INSERT INTO faqs (id, question, answer) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET question = EXCLUDED.question, answer = EXCLUDED.answer",
        )
        .bind(entry.id)
        .bind(&entry.question)
        .bind(&entry.answer)
        .execute(&mut *tx)
        .await?;
    }

    // Explicit IDs don't move the sequences, realign them so later inserts don't collide.
    for table in [
        "institutes",
        "faculties",
        "departments",
        "teachers",
        "campuses",
        "places",
        "faqs",
    ] {
        sqlx::query(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), COALESCE((SELECT MAX(id) FROM {table}), 1))"
        ))
        .execute(&mut *tx)
        .await?;
        debug!("Sequence of {table} realigned");
    }

    tx.commit().await?;

    info!(
        "Sample directory loaded: {} faculties, {} teachers, {} campuses",
        data.faculties.len(),
        data.teachers.len(),
        data.campuses.len()
    );

    Ok(())
}

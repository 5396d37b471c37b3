//! Shared fixtures: throwaway SQLite stores and a small seeded catalog.

#![allow(dead_code)]

use cinesearch::config::{CatalogConfig, SearchLogConfig};
use cinesearch::db::ConnectionManager;
use cinesearch::entities::{
    actor, category, film, film_actor, film_category, prelude::*, search_log,
};
use sea_orm::{EntityTrait, QueryOrder, Set};
use std::collections::HashMap;
use std::path::PathBuf;

/// Seeded categories. Ids follow this order, which is also alphabetical.
pub const GENRES: [&str; 4] = ["Action", "Comedy", "Drama", "Horror"];

pub struct SeedFilm {
    pub title: &'static str,
    pub year: i32,
    pub genres: &'static [&'static str],
    pub actors: &'static [&'static str],
}

impl SeedFilm {
    pub const fn new(title: &'static str, year: i32, genres: &'static [&'static str]) -> Self {
        Self {
            title,
            year,
            genres,
            actors: &[],
        }
    }

    pub const fn with_actors(self, actors: &'static [&'static str]) -> Self {
        Self { actors, ..self }
    }
}

pub fn temp_db_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cinesearch-{label}-{}.db", uuid::Uuid::new_v4()))
}

pub fn temp_sqlite_url(label: &str) -> String {
    format!("sqlite:{}", temp_db_path(label).display())
}

/// A SQLite URL whose parent "directory" is a regular file, so it can never be opened.
pub fn unreachable_sqlite_url() -> String {
    let blocker = temp_db_path("blocker");
    std::fs::write(&blocker, b"not a directory").expect("Failed to create blocker file");
    format!("sqlite:{}", blocker.join("nested").join("store.db").display())
}

pub fn catalog_manager(url: &str) -> ConnectionManager {
    ConnectionManager::catalog(&CatalogConfig {
        url: Some(url.to_string()),
        connect_timeout_seconds: 2,
        bootstrap_schema: true,
        ..CatalogConfig::default()
    })
}

pub fn search_log_manager(url: &str) -> ConnectionManager {
    ConnectionManager::search_log(&SearchLogConfig {
        url: url.to_string(),
        connect_timeout_seconds: 2,
    })
}

pub fn genre_id(name: &str) -> i32 {
    let index = GENRES
        .iter()
        .position(|g| *g == name)
        .unwrap_or_else(|| panic!("Unknown seed genre {name}"));
    i32::try_from(index).unwrap() + 1
}

/// Creates a fresh catalog holding `films`, numbered from 1 in the given order.
pub async fn seeded_catalog(films: &[SeedFilm]) -> ConnectionManager {
    let manager = catalog_manager(&temp_sqlite_url("catalog"));

    manager
        .scoped(async |conn| {
            Category::insert_many(GENRES.iter().map(|name| category::ActiveModel {
                category_id: Set(genre_id(name)),
                name: Set((*name).to_string()),
            }))
            .exec_without_returning(conn)
            .await?;

            let mut actor_ids: HashMap<&str, i32> = HashMap::new();
            for (index, seed) in films.iter().enumerate() {
                let film_id = i32::try_from(index).unwrap() + 1;

                Film::insert(film::ActiveModel {
                    film_id: Set(film_id),
                    title: Set(seed.title.to_string()),
                    description: Set(Some(format!("A story about {}", seed.title))),
                    release_year: Set(Some(seed.year)),
                    length: Set(Some(90 + film_id)),
                })
                .exec_without_returning(conn)
                .await?;

                for genre in seed.genres {
                    FilmCategory::insert(film_category::ActiveModel {
                        film_id: Set(film_id),
                        category_id: Set(genre_id(genre)),
                    })
                    .exec_without_returning(conn)
                    .await?;
                }

                for &name in seed.actors {
                    let actor_id = match actor_ids.get(name) {
                        Some(id) => *id,
                        None => {
                            let id = i32::try_from(actor_ids.len()).unwrap() + 1;
                            let (first, last) = name.split_once(' ').unwrap_or((name, ""));
                            Actor::insert(actor::ActiveModel {
                                actor_id: Set(id),
                                first_name: Set(first.to_string()),
                                last_name: Set(last.to_string()),
                            })
                            .exec_without_returning(conn)
                            .await?;
                            actor_ids.insert(name, id);
                            id
                        }
                    };

                    FilmActor::insert(film_actor::ActiveModel {
                        actor_id: Set(actor_id),
                        film_id: Set(film_id),
                    })
                    .exec_without_returning(conn)
                    .await?;
                }
            }

            Ok(())
        })
        .await
        .expect("Failed to seed catalog");

    manager
}

/// Every stored search-log record, oldest first.
pub async fn logged_searches(manager: &ConnectionManager) -> Vec<search_log::Model> {
    manager
        .scoped(async |conn| {
            SearchLog::find()
                .order_by_asc(search_log::Column::Id)
                .all(conn)
                .await
        })
        .await
        .expect("Failed to read search log")
}

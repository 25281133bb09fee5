mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row};
use serde_json::{Map, Value};

use crate::models::{Hero, HeroId};

/// The roster a fresh backend starts with.
pub const MOCK_HEROES: &[(HeroId, &str)] = &[
    (12, "Dr. Nice"),
    (13, "Bombasto"),
    (14, "Celeritas"),
    (15, "Magneta"),
    (16, "RubberMan"),
    (17, "Dynama"),
    (18, "Dr. IQ"),
    (19, "Magma"),
    (20, "Tornado"),
];

/// Id handed out when the table is empty.
const FIRST_ID: HeroId = 11;

const HERO_COLUMNS: &str = "id, name, attributes";

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "hero-tour")
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;
        Self::open(dirs.data_dir().join("heroes.db"))
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    /// Insert [`MOCK_HEROES`] if the table is empty. Returns how many were added.
    pub fn seed_mock_heroes(&self) -> Result<usize> {
        if self.count_heroes()? > 0 {
            return Ok(0);
        }
        for (id, name) in MOCK_HEROES {
            self.insert_hero(&Hero::with_id(*id, *name))?;
        }
        tracing::info!("Seeded {} heroes", MOCK_HEROES.len());
        Ok(MOCK_HEROES.len())
    }

    pub fn count_heroes(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM heroes", [], |row| row.get(0))?;
        Ok(usize::try_from(count)?)
    }

    // ============================================================
    // Hero operations
    // ============================================================

    pub fn get_all_heroes(&self) -> Result<Vec<Hero>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(&format!("SELECT {HERO_COLUMNS} FROM heroes ORDER BY id"))?;
        let heroes = stmt
            .query_map([], hero_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(heroes)
    }

    pub fn get_hero(&self, id: HeroId) -> Result<Option<Hero>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let hero = conn
            .query_row(
                &format!("SELECT {HERO_COLUMNS} FROM heroes WHERE id = ?"),
                [id],
                hero_from_row,
            )
            .optional()?;
        Ok(hero)
    }

    /// Heroes whose name contains `term`, ignoring case. An empty term matches all.
    pub fn search_heroes(&self, term: &str) -> Result<Vec<Hero>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(&format!(
            "SELECT {HERO_COLUMNS} FROM heroes
             WHERE instr(lower(name), lower(?)) > 0
             ORDER BY id"
        ))?;
        let heroes = stmt
            .query_map([term], hero_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(heroes)
    }

    /// Store a new hero under the next free id. Any id on `input` is ignored.
    pub fn create_hero(&self, input: &Hero) -> Result<Hero> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id: HeroId = conn.query_row(
            "SELECT COALESCE(MAX(id), ?) + 1 FROM heroes",
            [FIRST_ID - 1],
            |row| row.get(0),
        )?;

        let hero = Hero {
            id: Some(id),
            ..input.clone()
        };
        insert(&conn, id, &hero)?;
        Ok(hero)
    }

    /// Store a hero under the id it already carries.
    pub fn insert_hero(&self, hero: &Hero) -> Result<Hero> {
        let id = hero
            .id
            .ok_or_else(|| anyhow!("Hero to insert has no id"))?;
        let conn = self.conn.lock().expect("database lock poisoned");
        insert(&conn, id, hero)?;
        Ok(hero.clone())
    }

    /// Replace name and attributes of an existing hero. Returns false if no
    /// hero has that id.
    pub fn update_hero(&self, hero: &Hero) -> Result<bool> {
        let id = hero
            .id
            .ok_or_else(|| anyhow!("Hero to update has no id"))?;
        let conn = self.conn.lock().expect("database lock poisoned");
        let updated = conn.execute(
            "UPDATE heroes SET name = ?, attributes = ?, updated_at = ? WHERE id = ?",
            (
                &hero.name,
                serde_json::to_string(&hero.attributes)?,
                Utc::now().to_rfc3339(),
                id,
            ),
        )?;
        Ok(updated > 0)
    }

    pub fn delete_hero(&self, id: HeroId) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let deleted = conn.execute("DELETE FROM heroes WHERE id = ?", [id])?;
        Ok(deleted > 0)
    }
}

fn insert(conn: &Connection, id: HeroId, hero: &Hero) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO heroes (id, name, attributes, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        (
            id,
            &hero.name,
            serde_json::to_string(&hero.attributes)?,
            &now,
            &now,
        ),
    )?;
    Ok(())
}

fn hero_from_row(row: &Row<'_>) -> rusqlite::Result<Hero> {
    let attributes_json: String = row.get(2)?;
    let attributes: Map<String, Value> = serde_json::from_str(&attributes_json).unwrap_or_default();

    Ok(Hero {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        attributes,
    })
}

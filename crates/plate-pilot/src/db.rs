// SQLite persistence for the user's collections.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::model::{GroceryItem, Meal, PlannerDay, UserSettings};

pub const FAVORITES_KEY: &str = "favorites";
pub const PLANNER_DAYS_KEY: &str = "planner_days";
pub const GROCERY_ITEMS_KEY: &str = "grocery_items";
pub const USER_SETTINGS_KEY: &str = "user_settings";

const ALL_KEYS: [&str; 4] = [
    FAVORITES_KEY,
    PLANNER_DAYS_KEY,
    GROCERY_ITEMS_KEY,
    USER_SETTINGS_KEY,
];

/// SQLite-backed store holding one JSON document per collection.
///
/// Every write replaces the whole collection. Documents that fail to decode
/// are logged and treated as absent so a corrupt row never blocks startup.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure the schema
    /// exists. Pass `":memory:"` for an ephemeral in-memory database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS collections (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the connection lock.
    ///
    /// Panics if the mutex is poisoned (a thread panicked while holding the
    /// lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    pub fn load_favorites(&self) -> Result<Vec<Meal>> {
        self.load_collection(FAVORITES_KEY)
    }

    pub fn save_favorites(&self, favorites: &[Meal]) -> Result<()> {
        self.save_collection(FAVORITES_KEY, &favorites)
    }

    // ------------------------------------------------------------------
    // Planner
    // ------------------------------------------------------------------

    pub fn load_planner_days(&self) -> Result<Vec<PlannerDay>> {
        self.load_collection(PLANNER_DAYS_KEY)
    }

    pub fn save_planner_days(&self, days: &[PlannerDay]) -> Result<()> {
        self.save_collection(PLANNER_DAYS_KEY, &days)
    }

    // ------------------------------------------------------------------
    // Grocery list
    // ------------------------------------------------------------------

    pub fn load_grocery_items(&self) -> Result<Vec<GroceryItem>> {
        self.load_collection(GROCERY_ITEMS_KEY)
    }

    pub fn save_grocery_items(&self, items: &[GroceryItem]) -> Result<()> {
        self.save_collection(GROCERY_ITEMS_KEY, &items)
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn load_user_settings(&self) -> Result<UserSettings> {
        self.load_collection(USER_SETTINGS_KEY)
    }

    pub fn save_user_settings(&self, settings: &UserSettings) -> Result<()> {
        self.save_collection(USER_SETTINGS_KEY, settings)
    }

    /// Remove every stored collection in a single transaction.
    pub fn clear_all(&self) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn
            .transaction()
            .context("failed to begin clear transaction")?;
        for key in ALL_KEYS {
            tx.execute("DELETE FROM collections WHERE key = ?1", params![key])
                .with_context(|| format!("failed to delete collection {key}"))?;
        }
        tx.commit().context("failed to commit clear transaction")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Raw key/value access
    // ------------------------------------------------------------------

    fn save_collection<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize collection {key}"))?;
        let conn = self.conn();
        conn.execute(
            "INSERT INTO collections (key, value, updated_at)
             VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            updated_at = excluded.updated_at",
            params![key, json],
        )
        .with_context(|| format!("failed to save collection {key}"))?;
        Ok(())
    }

    fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT value FROM collections WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .with_context(|| format!("failed to load collection {key}"))
    }

    fn load_collection<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let Some(json) = self.load_raw(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&json) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("discarding undecodable collection {key}: {e}");
                Ok(T::default())
            }
        }
    }

    /// Make every subsequent read and write fail.
    #[cfg(test)]
    pub(crate) fn drop_collections_table(&self) {
        self.conn()
            .execute_batch("DROP TABLE collections;")
            .expect("drop collections table");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use inventory_products::db::{DbPool, establish_connection_pool};
use inventory_products::domain::product::{NewProduct, Product};
use inventory_products::repository::{DieselRepository, ProductWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Temporary migrated database living in its own directory.
pub struct TestDb {
    // Fields drop in order: close connections before removing the directory.
    pool: DbPool,
    path: PathBuf,
    dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("temp path is valid UTF-8").to_string();

        let pool = establish_connection_pool(&url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb { pool, path, dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Inserts a product directly through the repository.
pub fn seed_product(
    repo: &DieselRepository,
    name: &str,
    price: i64,
    category: &str,
    distribution_center: &str,
) -> Product {
    repo.create_product(&NewProduct::new(name, price, category, distribution_center))
        .expect("seed product")
}

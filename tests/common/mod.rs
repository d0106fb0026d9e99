//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, NaiveDateTime};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use resource_directory::db::{DbPool, establish_connection_pool};
use resource_directory::domain::resource::{ContactDetails, NewResource};
use resource_directory::domain::types::{
    OrganizationName, ProgramName, ResourceCategory, ResourceStatus, Zipcode,
};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Timestamp `secs` seconds after the epoch.
pub fn ts(secs: i64) -> NaiveDateTime {
    DateTime::from_timestamp(secs, 0)
        .expect("valid timestamp")
        .naive_utc()
}

/// A new resource stamped with `updated` as both creation and update time.
pub fn new_resource(
    organization: &str,
    program: Option<&str>,
    category: ResourceCategory,
    zipcode: &str,
    updated: NaiveDateTime,
) -> NewResource {
    NewResource {
        organization: OrganizationName::new(organization).expect("valid organization"),
        program: program.map(|p| ProgramName::new(p).expect("valid program")),
        category,
        status: ResourceStatus::Available,
        contact_details: ContactDetails::default(),
        zipcode: Zipcode::new(zipcode).expect("valid zipcode"),
        created_at: updated,
        last_updated: updated,
    }
}

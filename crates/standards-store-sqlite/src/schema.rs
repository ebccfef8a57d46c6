//! SQL schema for the catalog SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS coins (
    id         TEXT PRIMARY KEY,   -- UUID v4, server-assigned
    coin_name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS duties (
    id                TEXT PRIMARY KEY,
    duty_name         TEXT NOT NULL UNIQUE,
    duty_description  TEXT UNIQUE     -- NULLs never collide
);

CREATE TABLE IF NOT EXISTS ksbs (
    id        TEXT PRIMARY KEY,
    ksb_name  TEXT NOT NULL UNIQUE
);

-- Junction tables carry nothing but the pair; membership is a set.
CREATE TABLE IF NOT EXISTS coins_duties (
    coin_id  TEXT NOT NULL REFERENCES coins(id),
    duty_id  TEXT NOT NULL REFERENCES duties(id),
    PRIMARY KEY (coin_id, duty_id)
);

CREATE TABLE IF NOT EXISTS duties_ksbs (
    duty_id  TEXT NOT NULL REFERENCES duties(id),
    ksb_id   TEXT NOT NULL REFERENCES ksbs(id),
    PRIMARY KEY (duty_id, ksb_id)
);

CREATE INDEX IF NOT EXISTS coins_duties_duty_idx ON coins_duties(duty_id);
CREATE INDEX IF NOT EXISTS duties_ksbs_ksb_idx   ON duties_ksbs(ksb_id);

PRAGMA user_version = 1;
";

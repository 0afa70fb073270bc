//! Infrastructure layer - database and event transport.

mod db;
pub mod migrations;

pub use db::Database;

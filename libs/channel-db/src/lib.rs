pub mod db;
pub mod error;
pub mod listing;
pub mod models;
pub mod repositories;
pub mod store;
pub mod utils;

pub use db::Repositories;
pub use error::{Result, StoreError};

pub mod error;
pub mod models;
pub mod report;
pub mod scan;
pub mod sweep;
pub mod thumbnail;
pub mod uri;

pub use crate::error::{Error, Result};
pub use crate::models::*;

//! ORM Layer
//!
//! Provides the traits entities implement and a query builder that turns
//! them into parameterized SQLite statements:
//! - Table metadata (`DatabaseEntity`)
//! - Schema generation (`DatabaseSchema`, `ColumnDef`)
//! - Row decoding (`FromSqlRow`)
//! - The record-store seam used by the image assigner (`RecordStore`)
//!
//! ```rust,ignore
//! use crate::db::CarRecord;
//! use crate::orm::EntityQuery;
//!
//! let cars = EntityQuery::<CarRecord>::new()
//!     .default_order()
//!     .fetch_all(&pool)
//!     .await?;
//! ```

mod builder;
mod traits;

pub use builder::*;
pub use traits::*;

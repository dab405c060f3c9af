//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - Where the entity is editable, an update DTO

pub mod comment;
pub mod contact_submission;
pub mod section;
pub mod section_translation;
pub mod session;
pub mod setting;
pub mod user;

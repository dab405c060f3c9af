//! Domain logic for the devotional site: ids, roles, languages, input
//! validation and the multi-language fallback rules. Nothing here touches
//! the database or the network.

pub mod bilingual;
pub mod comments;
pub mod contact;
pub mod error;
pub mod hashing;
pub mod language;
pub mod localization;
pub mod roles;
pub mod sections;
pub mod settings;
pub mod types;
pub mod validation;

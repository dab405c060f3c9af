//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod contact_submission_repo;
pub mod section_repo;
pub mod section_translation_repo;
pub mod session_repo;
pub mod setting_repo;
pub mod setting_translation_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use contact_submission_repo::ContactSubmissionRepo;
pub use section_repo::SectionRepo;
pub use section_translation_repo::SectionTranslationRepo;
pub use session_repo::SessionRepo;
pub use setting_repo::SettingRepo;
pub use setting_translation_repo::SettingTranslationRepo;
pub use user_repo::UserRepo;

//! Request handlers.
//!
//! HTML handlers return [`PageResult`](crate::error::PageResult) and answer
//! form posts with a flash message and a 303 redirect. JSON handlers return
//! [`AppResult`](crate::error::AppResult) wrapped in
//! [`DataResponse`](crate::response::DataResponse).

pub mod auth;
pub mod bilingual;
pub mod comments;
pub mod contacts;
pub mod home;
pub mod sections;
pub mod settings;
pub mod translation;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use renungan_api::auth::password::hash_password;
use renungan_core::roles::ROLE_ADMIN;
use renungan_core::settings::{ABOUT_US_TITLE, PAGE_COPY, WELCOME_TITLE};
use renungan_db::models::section::CreateSection;
use renungan_db::models::user::CreateUser;
use renungan_db::repositories::{SectionRepo, SettingRepo, UserRepo};
use renungan_db::DbPool;
use serde::Deserialize;

pub const SEED_ADMIN_EMAIL: &str = "admin@example.com";
const SEED_ADMIN_PASSWORD: &str = "password123";

/// (title, content, display order, published)
const SAMPLE_SECTIONS: &[(&str, &str, i32, bool)] = &[
    (
        "Pengantar",
        "<p>Selamat datang. Setiap bagian membawa kita lebih dekat pada inti bacaan ini.</p>",
        10,
        true,
    ),
    (
        "Bagian 1: Memulai",
        "<p>Bagian pertama meletakkan dasar untuk semua yang mengikutinya.</p>",
        20,
        true,
    ),
    (
        "Bagian 2: Lebih Dalam",
        "<p>Setelah memahami dasarnya, kita menggali lebih dalam dengan contoh nyata.</p>",
        30,
        true,
    ),
    (
        "Segera: Bagian 3",
        "<p>Bagian ini sedang ditulis dan akan segera tersedia.</p>",
        40,
        false,
    ),
];

/// Content export consumed by `content import`.
///
/// ```json
/// {
///   "sections": [{ "title": "Jude", "content": "<p>...</p>", "displayOrder": 0 }],
///   "settings": { "welcome_title": "Miriam's Hope" }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct ContentExport {
    pub sections: Vec<ExportedSection>,
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedSection {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub reflective_question: Option<String>,
    #[serde(default)]
    pub reflective_question_2: Option<String>,
    #[serde(default)]
    pub reflective_question_3: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Defaults to the position in the file.
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_published() -> bool {
    true
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ContentExport {
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let export: ContentExport = serde_json::from_str(json).context("Invalid export file")?;
        for (i, section) in export.sections.iter().enumerate() {
            if section.title.trim().is_empty() || section.content.trim().is_empty() {
                anyhow::bail!("Section #{} needs a title and content", i + 1);
            }
        }
        Ok(export)
    }
}

/// Replace every section with the export's and write its settings, in one
/// transaction: a failure leaves the existing content untouched.
///
/// Comments and cached translations of the old sections go with them.
pub async fn import(pool: &DbPool, file: &Path) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let export = ContentExport::parse(&json)?;
    import_export(pool, export).await
}

pub async fn import_export(pool: &DbPool, export: ContentExport) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    let removed = SectionRepo::delete_all(&mut *tx).await?;
    let total = export.sections.len();
    for (position, section) in export.sections.into_iter().enumerate() {
        SectionRepo::create(
            &mut *tx,
            &CreateSection {
                title: section.title.trim().to_string(),
                content: section.content,
                reflective_question: blank_to_none(section.reflective_question),
                reflective_question_2: blank_to_none(section.reflective_question_2),
                reflective_question_3: blank_to_none(section.reflective_question_3),
                image_url: blank_to_none(section.image_url),
                display_order: section.display_order.unwrap_or(position as i32),
                is_published: section.is_published,
            },
        )
        .await
        .with_context(|| format!("Failed to import section #{}", position + 1))?;
    }
    for (key, value) in &export.settings {
        SettingRepo::set(&mut *tx, key, value).await?;
    }

    tx.commit().await.context("Failed to commit import")?;
    tracing::info!(
        removed,
        sections = total,
        settings = export.settings.len(),
        "Imported content"
    );
    Ok(())
}

/// Create the default admin, sample sections and page-copy defaults,
/// skipping anything that already exists.
pub async fn seed(pool: &DbPool) -> anyhow::Result<()> {
    if UserRepo::find_by_email(pool, SEED_ADMIN_EMAIL).await?.is_some() {
        tracing::info!(email = SEED_ADMIN_EMAIL, "Admin user already exists, skipping");
    } else {
        let password_hash = hash_password(SEED_ADMIN_PASSWORD)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;
        UserRepo::create(
            pool,
            &CreateUser {
                full_name: Some("Admin User".to_string()),
                email: SEED_ADMIN_EMAIL.to_string(),
                password_hash,
                role: ROLE_ADMIN.to_string(),
            },
        )
        .await?;
        tracing::info!(email = SEED_ADMIN_EMAIL, "Created admin user");
    }

    let existing: Vec<String> = SectionRepo::list_all(pool)
        .await?
        .into_iter()
        .map(|s| s.title)
        .collect();
    let mut created = 0;
    for &(title, content, display_order, is_published) in SAMPLE_SECTIONS {
        if existing.iter().any(|t| t == title) {
            continue;
        }
        SectionRepo::create(
            pool,
            &CreateSection {
                title: title.to_string(),
                content: content.to_string(),
                reflective_question: None,
                reflective_question_2: None,
                reflective_question_3: None,
                image_url: None,
                display_order,
                is_published,
            },
        )
        .await?;
        created += 1;
    }
    tracing::info!(count = created, "Seeded sample sections");

    for copy in PAGE_COPY
        .iter()
        .filter(|c| [WELCOME_TITLE, ABOUT_US_TITLE].contains(&c.key))
    {
        SettingRepo::set_if_absent(pool, copy.key, copy.default).await?;
    }
    Ok(())
}

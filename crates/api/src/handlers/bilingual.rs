//! Handlers for the bilingual editor (`/admin/bilingual`), open to admins
//! and contributors.
//!
//! The editor always works from the source language into English. Machine
//! suggestions are shown but never saved until an editor submits them.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::{Form, Json};
use renungan_core::bilingual::parse_translations_form;
use renungan_core::language::ENGLISH;
use renungan_core::localization::{
    editor_needs_refresh, section_key, SectionField, TranslationBatch, TranslationMap,
};
use renungan_core::sections::{next_display_order, validate_section_form, SectionForm};
use renungan_core::settings::PAGE_COPY;
use renungan_core::types::DbId;
use renungan_db::models::section::{CreateSection, Section, UpdateSection};
use renungan_db::repositories::{SectionRepo, SectionTranslationRepo, SettingRepo};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult, PageResult};
use crate::flash::{Flash, IncomingFlash, ERRORS};
use crate::localizer::{load_page_copy, load_page_copy_translations};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views;
use crate::views::bilingual::BilingualPage;

const INDEX: &str = "/admin/bilingual";
const INDEX_REFRESH: &str = "/admin/bilingual?refresh=1";

#[derive(Debug, Deserialize)]
pub struct EditorQuery {
    pub refresh: Option<String>,
}

/// GET /admin/bilingual
///
/// Shows saved English text, or machine suggestions when `?refresh=1` is
/// given or nothing has been saved yet. A failing translation service is
/// reported on the page.
pub async fn index(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<EditorQuery>,
    flash: IncomingFlash,
) -> PageResult<Response> {
    let source = state.source_language();
    let source_copy = load_page_copy(&state.pool).await?;
    let stored_copy = load_page_copy_translations(&state.pool, ENGLISH, source).await?;
    let sections = SectionRepo::list_all(&state.pool).await?;

    let any_stored = stored_copy.values().any(|v| !v.trim().is_empty())
        || sections.iter().any(Section::has_english);
    let refresh = query.refresh.as_deref() == Some("1");

    let mut translation_error = None;
    let translated = if editor_needs_refresh(refresh, any_stored) {
        let mut batch = TranslationBatch::new();
        for copy in PAGE_COPY {
            if let Some(base) = source_copy.get(copy.key) {
                batch.push(copy.key, base);
            }
        }
        for section in &sections {
            for field in SectionField::ALL {
                if let Some(base) = section.base(field) {
                    batch.push(section_key(section.id, field), base);
                }
            }
        }
        match suggest(&state, &batch).await {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, "Bilingual editor translation failed");
                translation_error = Some(e.to_string());
                TranslationMap::new()
            }
        }
    } else {
        stored_translations(&stored_copy, &sections)
    };

    let html = views::bilingual::render(&BilingualPage {
        user: &user,
        flash: &flash.flash,
        source_copy: &source_copy,
        translated: &translated,
        sections: &sections,
        translation_error: translation_error.as_deref(),
        has_stored: any_stored,
    });
    Ok(flash.render(html))
}

/// One source-to-English call for everything in `batch`.
async fn suggest(state: &AppState, batch: &TranslationBatch) -> Result<TranslationMap, AppError> {
    if batch.is_empty() {
        return Ok(TranslationMap::new());
    }
    let list = state
        .translator
        .translate_many(batch.texts(), ENGLISH, state.source_language())
        .await?;
    batch
        .apply(list)
        .map_err(|e| AppError::InternalError(e.to_string()))
}

fn stored_translations(copy: &HashMap<String, String>, sections: &[Section]) -> TranslationMap {
    let mut map = TranslationMap::new();
    for (key, value) in copy {
        map.insert(key.clone(), value.clone());
    }
    for section in sections {
        for field in SectionField::ALL {
            if let Some(text) = section.stored(ENGLISH, field) {
                map.insert(section_key(section.id, field), text);
            }
        }
    }
    map
}

/// POST /admin/bilingual/settings
///
/// Saves source-language page copy. Fields left out of the form are saved
/// empty.
pub async fn update_settings(
    user: AuthUser,
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> PageResult<Response> {
    for copy in PAGE_COPY {
        let value = form.get(copy.key).map(|v| v.trim()).unwrap_or("");
        SettingRepo::set(&state.pool, copy.key, value).await?;
    }
    tracing::info!(user_id = user.user_id, "Page copy updated");
    Ok(Flash::success("Settings updated successfully").redirect(INDEX_REFRESH))
}

/// POST /admin/bilingual/translations
///
/// Saves English page copy and the English section columns.
pub async fn save_translations(
    user: AuthUser,
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> PageResult<Response> {
    let keys: Vec<&str> = PAGE_COPY.iter().map(|c| c.key).collect();
    let parsed = parse_translations_form(
        fields.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        ENGLISH,
        &keys,
    );

    for copy in PAGE_COPY {
        let key = format!("{}_{ENGLISH}", copy.key);
        let value = parsed.settings.get(&key).map(String::as_str).unwrap_or("");
        SettingRepo::set(&state.pool, &key, value).await?;
    }
    let mut saved = 0;
    for input in &parsed.sections {
        if SectionRepo::set_language_columns(&state.pool, ENGLISH, input).await? {
            saved += 1;
        }
    }
    tracing::info!(user_id = user.user_id, sections = saved, "English translations saved");

    Ok(Flash::success("English translations saved successfully").redirect(INDEX))
}

/// POST /admin/bilingual/sections
pub async fn create_section(
    user: AuthUser,
    State(state): State<AppState>,
    Form(form): Form<SectionForm>,
) -> PageResult<Response> {
    let input = match validate_section_form(&form) {
        Ok(input) => input,
        Err(errors) => return Ok(Flash::new().with_errors(ERRORS, errors).redirect(INDEX)),
    };

    let max = SectionRepo::max_display_order(&state.pool).await?;
    let section = SectionRepo::create(
        &state.pool,
        &CreateSection {
            title: input.title,
            content: input.content,
            reflective_question: input.reflective_question,
            reflective_question_2: input.reflective_question_2,
            reflective_question_3: input.reflective_question_3,
            image_url: None,
            display_order: next_display_order(max, 1),
            is_published: input.is_published,
        },
    )
    .await?;
    tracing::info!(user_id = user.user_id, section_id = section.id, "Section created from bilingual editor");

    Ok(Flash::success("New section created successfully").redirect(INDEX_REFRESH))
}

/// POST /admin/bilingual/sections/{id}
///
/// Updates source-language text; the image is kept.
pub async fn update_section(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Form(form): Form<SectionForm>,
) -> PageResult<Response> {
    let input = match validate_section_form(&form) {
        Ok(input) => input,
        Err(errors) => return Ok(Flash::new().with_errors(ERRORS, errors).redirect(INDEX)),
    };

    let updated = SectionRepo::update(
        &state.pool,
        id,
        &UpdateSection {
            title: input.title,
            content: input.content,
            reflective_question: input.reflective_question,
            reflective_question_2: input.reflective_question_2,
            reflective_question_3: input.reflective_question_3,
            image_url: None,
            is_published: input.is_published,
        },
    )
    .await?;
    let Some(section) = updated else {
        return Ok(Flash::error("Section not found").redirect(INDEX));
    };
    SectionTranslationRepo::delete_for_section(&state.pool, id).await?;
    tracing::info!(user_id = user.user_id, section_id = id, "Section updated from bilingual editor");

    Ok(Flash::success(format!("Section \"{}\" updated successfully", section.title))
        .redirect(INDEX_REFRESH))
}

/// POST /admin/bilingual/sections/{id}/delete
pub async fn delete_section(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> PageResult<Response> {
    let Some(section) = SectionRepo::find_by_id(&state.pool, id).await? else {
        return Ok(Flash::error("Section not found").redirect(INDEX));
    };
    SectionRepo::delete(&state.pool, id).await?;
    tracing::info!(user_id = user.user_id, section_id = id, "Section deleted from bilingual editor");

    Ok(Flash::success(format!("Section \"{}\" deleted successfully", section.title)).redirect(INDEX))
}

/// POST /admin/bilingual/refresh
///
/// Body: `{"texts": [...]}`. Responds `{"data": {"translations": [...]}}`
/// in the same order.
pub async fn refresh(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let texts: Vec<String> = body
        .get("texts")
        .and_then(|v| v.as_array())
        .and_then(|items| {
            items
                .iter()
                .map(|t| t.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| AppError::BadRequest("texts must be an array of strings".into()))?;

    let translations = state
        .translator
        .translate_many(&texts, ENGLISH, state.source_language())
        .await?;
    Ok(Json(DataResponse {
        data: json!({ "translations": translations }),
    }))
}

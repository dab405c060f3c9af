//! Handlers for the `/api/v1/translate` JSON API.

use axum::extract::{Path, State};
use axum::Json;
use renungan_core::error::CoreError;
use renungan_core::language::{
    normalize_language_code, validate_language_code, Language, SUPPORTED_LANGUAGES,
};
use renungan_core::localization::{section_key, LocalizationPlan, SectionField};
use renungan_core::settings::{LESSON_INTRODUCTION, LESSON_TITLE};
use renungan_core::types::DbId;
use renungan_db::repositories::{SectionRepo, SettingRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for the page and section endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRequest {
    pub target_language: Option<String>,
}

/// Request body for `POST /api/v1/translate/text`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRequest {
    pub text: Option<String>,
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTranslation {
    pub target_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_introduction: Option<String>,
    pub sections: Vec<TranslatedSection>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedSection {
    pub id: DbId,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflective_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflective_question_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflective_question_3: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TitleAndContent {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTranslationResponse {
    pub original: TitleAndContent,
    pub translated: TitleAndContent,
    pub target_language: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTranslationResponse {
    pub original: String,
    pub translated: String,
    pub target_language: String,
}

/// Normalized, supported target language or 400.
fn require_target(raw: Option<&str>) -> Result<String, AppError> {
    let code = raw
        .map(normalize_language_code)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Target language is required".into()))?;
    validate_language_code(&code).map_err(AppError::BadRequest)?;
    Ok(code)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/translate/languages
pub async fn languages() -> Json<DataResponse<&'static [Language]>> {
    Json(DataResponse {
        data: SUPPORTED_LANGUAGES,
    })
}

/// POST /api/v1/translate/page
///
/// Lesson copy and every published section in the target language, from a
/// single batched call. The source language is answered without a call.
/// Empty optional fields are omitted.
pub async fn translate_page(
    State(state): State<AppState>,
    Json(input): Json<TargetRequest>,
) -> AppResult<Json<DataResponse<PageTranslation>>> {
    let target = require_target(input.target_language.as_deref())?;

    let lesson_title = SettingRepo::get(&state.pool, LESSON_TITLE, "").await?;
    let lesson_intro = SettingRepo::get(&state.pool, LESSON_INTRODUCTION, "").await?;
    let sections = SectionRepo::list_published(&state.pool).await?;

    let mut plan = LocalizationPlan::new(&target, state.source_language());
    for (key, value) in [(LESSON_TITLE, &lesson_title), (LESSON_INTRODUCTION, &lesson_intro)] {
        if let Some(value) = non_empty(Some(value.as_str())) {
            plan.add(key, value, None);
        }
    }
    for section in &sections {
        for field in SectionField::ALL {
            if let Some(base) = non_empty(section.base(field)) {
                plan.add(section_key(section.id, field), base, None);
            }
        }
    }

    let translated = if plan.pending().is_empty() {
        None
    } else {
        let pending = plan.pending();
        Some(
            state
                .translator
                .translate_many(pending.texts(), &target, state.source_language())
                .await?,
        )
    };
    let texts = plan
        .finish(translated)
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .texts;

    let sections = sections
        .iter()
        .map(|s| {
            let text = |field| texts.get_opt(&section_key(s.id, field)).map(str::to_string);
            TranslatedSection {
                id: s.id,
                title: text(SectionField::Title).unwrap_or_default(),
                content: text(SectionField::Content).unwrap_or_default(),
                reflective_question: text(SectionField::Question1),
                reflective_question_2: text(SectionField::Question2),
                reflective_question_3: text(SectionField::Question3),
            }
        })
        .collect();

    tracing::debug!(target_language = %target, "Translated public page");
    Ok(Json(DataResponse {
        data: PageTranslation {
            lesson_title: texts.get_opt(LESSON_TITLE).map(str::to_string),
            lesson_introduction: texts.get_opt(LESSON_INTRODUCTION).map(str::to_string),
            target_language: target,
            sections,
        },
    }))
}

/// POST /api/v1/translate/sections/{id}
///
/// Title and content of one section (any state), for signed-in editors.
pub async fn translate_section(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TargetRequest>,
) -> AppResult<Json<DataResponse<SectionTranslationResponse>>> {
    let section = SectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Section",
            id,
        })?;
    let target = require_target(input.target_language.as_deref())?;

    let texts = [section.title.clone(), section.content.clone()];
    let mut translated = state
        .translator
        .translate_many(&texts, &target, state.source_language())
        .await?
        .into_iter();
    let (Some(title), Some(content)) = (translated.next(), translated.next()) else {
        return Err(AppError::InternalError(
            "Translation returned too few texts".into(),
        ));
    };

    Ok(Json(DataResponse {
        data: SectionTranslationResponse {
            original: TitleAndContent {
                title: section.title,
                content: section.content,
            },
            translated: TitleAndContent { title, content },
            target_language: target,
        },
    }))
}

/// POST /api/v1/translate/text
pub async fn translate_text(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<TextRequest>,
) -> AppResult<Json<DataResponse<TextTranslationResponse>>> {
    let Some(text) = input.text.filter(|t| !t.trim().is_empty()) else {
        return Err(AppError::BadRequest(
            "Text and target language are required".into(),
        ));
    };
    let target = require_target(input.target_language.as_deref())?;

    let translated = state
        .translator
        .translate_one(&text, &target, state.source_language())
        .await?;

    Ok(Json(DataResponse {
        data: TextTranslationResponse {
            original: text,
            translated,
            target_language: target,
        },
    }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn target_is_normalized_and_checked() {
        assert_eq!(require_target(Some(" EN ")).unwrap(), "en");
        assert_eq!(require_target(Some("pt-BR")).unwrap(), "pt");
        assert_matches!(require_target(None), Err(AppError::BadRequest(_)));
        assert_matches!(require_target(Some("  ")), Err(AppError::BadRequest(_)));
        assert_matches!(require_target(Some("xx")), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let body = serde_json::to_value(TranslatedSection {
            id: 1,
            title: "Title".into(),
            content: "Body".into(),
            reflective_question: None,
            reflective_question_2: Some("Why?".into()),
            reflective_question_3: None,
        })
        .unwrap();
        assert!(body.get("reflectiveQuestion").is_none());
        assert_eq!(body["reflectiveQuestion2"], "Why?");
    }
}

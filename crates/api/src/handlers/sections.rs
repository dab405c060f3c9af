//! Admin handlers for `/admin/sections`.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::{Form, Json};
use renungan_core::error::CoreError;
use renungan_core::sections::{next_display_order, validate_section_form, SectionForm};
use renungan_core::settings::{LESSON_IMAGE, LESSON_INTRODUCTION, LESSON_TITLE};
use renungan_core::types::DbId;
use renungan_db::models::section::{CreateSection, UpdateSection};
use renungan_db::repositories::{SectionRepo, SectionTranslationRepo, SettingRepo};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppResult, PageResult};
use crate::flash::{back_url, Flash, IncomingFlash, ERRORS};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views;

const INDEX: &str = "/admin/sections";

/// Form body for `POST /admin/sections/lesson`.
#[derive(Debug, Deserialize)]
pub struct LessonForm {
    pub lesson_title: Option<String>,
    pub lesson_introduction: Option<String>,
    pub lesson_image: Option<String>,
}

/// Request body for `POST /admin/sections/reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<DbId>,
}

/// GET /admin/sections
pub async fn index(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> PageResult<Response> {
    let sections = SectionRepo::list_all(&state.pool).await?;
    let keys = [LESSON_TITLE, LESSON_INTRODUCTION, LESSON_IMAGE].map(String::from);
    let lesson: BTreeMap<String, String> = SettingRepo::get_many(&state.pool, &keys)
        .await?
        .into_iter()
        .collect();
    let html = views::sections::list(&user, &flash.flash, &sections, &lesson);
    Ok(flash.render(html))
}

/// POST /admin/sections/lesson
pub async fn update_lesson(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<LessonForm>,
) -> PageResult<Response> {
    for (key, value) in [
        (LESSON_TITLE, form.lesson_title),
        (LESSON_INTRODUCTION, form.lesson_introduction),
        (LESSON_IMAGE, form.lesson_image),
    ] {
        SettingRepo::set(&state.pool, key, value.unwrap_or_default().trim()).await?;
    }
    tracing::info!(user_id = user.user_id, "Lesson settings updated");
    Ok(Flash::success("Lesson settings updated successfully").redirect(INDEX))
}

/// GET /admin/sections/create
pub async fn create(RequireAdmin(user): RequireAdmin, flash: IncomingFlash) -> Response {
    let html = views::sections::form(&user, &flash.flash, None);
    flash.render(html)
}

/// POST /admin/sections
///
/// New sections go to the end of the list.
pub async fn store(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SectionForm>,
) -> PageResult<Response> {
    let input = match validate_section_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            let back = back_url(&headers, "/admin/sections/create");
            return Ok(Flash::new().with_errors(ERRORS, errors).redirect(&back));
        }
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
            image_url: input.image_url,
            display_order: next_display_order(max, 0),
            is_published: input.is_published,
        },
    )
    .await?;
    tracing::info!(user_id = user.user_id, section_id = section.id, "Section created");

    Ok(Flash::success("Section created successfully").redirect(INDEX))
}

/// GET /admin/sections/{id}/edit
pub async fn edit(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    flash: IncomingFlash,
) -> PageResult<Response> {
    let section = SectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Section",
            id,
        })?;
    let html = views::sections::form(&user, &flash.flash, Some(&section));
    Ok(flash.render(html))
}

/// POST /admin/sections/{id}
///
/// Display order is left as is. Cached machine translations of the old
/// text are dropped.
pub async fn update(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Form(form): Form<SectionForm>,
) -> PageResult<Response> {
    let input = match validate_section_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            let back = back_url(&headers, &format!("/admin/sections/{id}/edit"));
            return Ok(Flash::new().with_errors(ERRORS, errors).redirect(&back));
        }
    };

    SectionRepo::update(
        &state.pool,
        id,
        &UpdateSection {
            title: input.title,
            content: input.content,
            reflective_question: input.reflective_question,
            reflective_question_2: input.reflective_question_2,
            reflective_question_3: input.reflective_question_3,
            image_url: Some(input.image_url),
            is_published: input.is_published,
        },
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "Section",
        id,
    })?;
    SectionTranslationRepo::delete_for_section(&state.pool, id).await?;
    tracing::info!(user_id = user.user_id, section_id = id, "Section updated");

    Ok(Flash::success("Section updated successfully").redirect(INDEX))
}

/// POST /admin/sections/{id}/delete
pub async fn destroy(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> PageResult<Response> {
    if !SectionRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Section",
            id,
        }
        .into());
    }
    tracing::info!(user_id = user.user_id, section_id = id, "Section deleted");
    Ok(Flash::success("Section deleted successfully").redirect(INDEX))
}

/// POST /admin/sections/reorder
///
/// Body: `{"order": [ids...]}`; position `i` becomes display order `i`.
pub async fn reorder(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    SectionRepo::reorder(&state.pool, &input.order).await?;
    tracing::info!(user_id = user.user_id, count = input.order.len(), "Sections reordered");
    Ok(Json(DataResponse {
        data: json!({ "success": true }),
    }))
}

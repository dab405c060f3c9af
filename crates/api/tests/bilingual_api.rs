//! Integration tests for the bilingual editor and the translation JSON API.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    admin_cookie, body_json, body_text, contributor_cookie, flash_of, get, post_form, post_json,
    redirect_target, FakeTranslator,
};
use renungan_api::flash::{ERROR, SUCCESS};
use renungan_db::models::section::{CreateSection, Section};
use renungan_db::repositories::{SectionRepo, SettingRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn section(pool: &PgPool, title: &str, published: bool) -> Section {
    SectionRepo::create(
        pool,
        &CreateSection {
            title: title.to_string(),
            content: format!("<p>{title}Isi</p>"),
            reflective_question: Some(format!("{title}Tanya")),
            reflective_question_2: None,
            reflective_question_3: None,
            image_url: Some("/img/keep.jpg".to_string()),
            display_order: 0,
            is_published: published,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editor_suggests_translations_when_nothing_saved(pool: PgPool) {
    section(&pool, "Kasih", true).await;
    let app = common::build_test_app(pool.clone());
    let cookie = contributor_cookie(&app, &pool).await;

    let response = get(&app, "/admin/bilingual", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("[en]Kasih"));
    assert!(html.contains("[en]KasihTanya"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editor_shows_saved_english_without_refresh(pool: PgPool) {
    let s = section(&pool, "Kasih", true).await;
    sqlx::query("UPDATE sections SET title_en = 'Love' WHERE id = $1")
        .bind(s.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let html = body_text(get(&app, "/admin/bilingual", Some(&cookie)).await).await;
    assert!(html.contains("Love"));
    assert!(!html.contains("[en]Kasih"));

    let html = body_text(get(&app, "/admin/bilingual?refresh=1", Some(&cookie)).await).await;
    assert!(html.contains("[en]Kasih"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editor_reports_translation_failure(pool: PgPool) {
    section(&pool, "Kasih", true).await;
    let app = common::build_test_app_with(pool.clone(), Arc::new(FakeTranslator::failing()));
    let cookie = admin_cookie(&app, &pool).await;

    let response = get(&app, "/admin/bilingual", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Automatic translation unavailable"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_translations(pool: PgPool) {
    let s = section(&pool, "Kasih", true).await;
    let app = common::build_test_app(pool.clone());
    let cookie = contributor_cookie(&app, &pool).await;

    let title = format!("sections[{}][title_en]", s.id);
    let q1 = format!("sections[{}][q1_en]", s.id);
    let response = post_form(
        &app,
        "/admin/bilingual/translations",
        &[
            ("welcome_title_en", "Welcome"),
            (title.as_str(), "Love"),
            (q1.as_str(), ""),
            ("password_en", "ignored"),
        ],
        Some(&cookie),
    )
    .await;
    assert_eq!(redirect_target(&response), "/admin/bilingual");
    assert_eq!(
        flash_of(&response).message(SUCCESS),
        Some("English translations saved successfully")
    );

    let saved = SectionRepo::find_by_id(&pool, s.id).await.unwrap().unwrap();
    assert_eq!(saved.title_en.as_deref(), Some("Love"));
    assert_eq!(saved.reflective_question_en, None);
    assert_eq!(SettingRepo::get(&pool, "welcome_title_en", "x").await.unwrap(), "Welcome");
    // Page copy missing from the form is cleared.
    assert_eq!(SettingRepo::get(&pool, "about_us_title_en", "x").await.unwrap(), "");
    assert!(SettingRepo::find(&pool, "password_en").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_source_page_copy(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = contributor_cookie(&app, &pool).await;

    let response = post_form(
        &app,
        "/admin/bilingual/settings",
        &[("welcome_title", "Shalom"), ("about_us_content", "<p>Kami</p>")],
        Some(&cookie),
    )
    .await;
    assert_eq!(redirect_target(&response), "/admin/bilingual?refresh=1");
    assert_eq!(SettingRepo::get(&pool, "welcome_title", "").await.unwrap(), "Shalom");
    assert_eq!(SettingRepo::get(&pool, "about_us_content", "").await.unwrap(), "<p>Kami</p>");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editor_section_lifecycle(pool: PgPool) {
    let existing = section(&pool, "Kasih", true).await;
    let app = common::build_test_app(pool.clone());
    let cookie = contributor_cookie(&app, &pool).await;

    // Create goes after the current last section.
    let response = post_form(
        &app,
        "/admin/bilingual/sections",
        &[("title", "Iman"), ("content", "<p>Iman</p>"), ("is_published", "on")],
        Some(&cookie),
    )
    .await;
    assert_eq!(redirect_target(&response), "/admin/bilingual?refresh=1");
    let all = SectionRepo::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].display_order, existing.display_order + 1);

    // Update keeps the image.
    let uri = format!("/admin/bilingual/sections/{}", existing.id);
    let response = post_form(&app, &uri, &[("title", "Kasih2"), ("content", "<p>Baru</p>")], Some(&cookie)).await;
    assert_eq!(
        flash_of(&response).message(SUCCESS),
        Some("Section \"Kasih2\" updated successfully")
    );
    let updated = SectionRepo::find_by_id(&pool, existing.id).await.unwrap().unwrap();
    assert_eq!(updated.image_url.as_deref(), Some("/img/keep.jpg"));

    // Delete.
    let uri = format!("/admin/bilingual/sections/{}/delete", existing.id);
    let response = post_form(&app, &uri, &[], Some(&cookie)).await;
    assert_eq!(
        flash_of(&response).message(SUCCESS),
        Some("Section \"Kasih2\" deleted successfully")
    );
    let response = post_form(&app, &uri, &[], Some(&cookie)).await;
    assert_eq!(flash_of(&response).message(ERROR), Some("Section not found"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_endpoint(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = contributor_cookie(&app, &pool).await;

    let response = post_json(
        &app,
        "/admin/bilingual/refresh",
        json!({ "texts": ["Satu", "Dua"] }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["translations"], json!(["[en]Satu", "[en]Dua"]));

    let response = post_json(&app, "/admin/bilingual/refresh", json!({ "texts": "Satu" }), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Translation API
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_languages_list(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/api/v1/translate/languages", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let codes: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|l| l["code"].as_str())
        .collect();
    assert!(codes.contains(&"en"));
    assert!(codes.contains(&"id"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_translate_page(pool: PgPool) {
    section(&pool, "Kasih", true).await;
    section(&pool, "Rahasia", false).await;
    SettingRepo::set(&pool, "lesson_title", "Pelajaran").await.unwrap();
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/translate/page",
        json!({ "targetLanguage": "EN" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["targetLanguage"], "en");
    assert_eq!(data["lessonTitle"], "[en]Pelajaran");
    assert!(data.get("lessonIntroduction").is_none());

    let sections = data["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["title"], "[en]Kasih");
    assert_eq!(sections[0]["reflectiveQuestion"], "[en]KasihTanya");
    assert!(sections[0].get("reflectiveQuestion2").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_translate_page_requires_valid_target(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(&app, "/api/v1/translate/page", json!({}), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = post_json(&app, "/api/v1/translate/page", json!({ "targetLanguage": "xx" }), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_translate_page_service_failure_is_502(pool: PgPool) {
    section(&pool, "Kasih", true).await;
    let app = common::build_test_app_with(pool, Arc::new(FakeTranslator::failing()));

    let response = post_json(&app, "/api/v1/translate/page", json!({ "targetLanguage": "fr" }), None).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "TRANSLATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_translate_section(pool: PgPool) {
    let s = section(&pool, "Rahasia", false).await;
    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/translate/sections/{}", s.id);

    let response = post_json(&app, &uri, json!({ "targetLanguage": "en" }), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = contributor_cookie(&app, &pool).await;
    let response = post_json(&app, &uri, json!({ "targetLanguage": "en" }), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["original"]["title"], "Rahasia");
    assert_eq!(data["translated"]["title"], "[en]Rahasia");
    assert_eq!(data["translated"]["content"], "[en]<p>RahasiaIsi</p>");

    let response = post_json(&app, "/api/v1/translate/sections/9999", json!({}), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(&app, &uri, json!({}), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_translate_text(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let response = post_json(
        &app,
        "/api/v1/translate/text",
        json!({ "text": "Halo", "targetLanguage": "de" }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["original"], "Halo");
    assert_eq!(data["translated"], "[de]Halo");
    assert_eq!(data["targetLanguage"], "de");

    let response = post_json(&app, "/api/v1/translate/text", json!({ "text": " " }), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Text and target language are required"
    );
}

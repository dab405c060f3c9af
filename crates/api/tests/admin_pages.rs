//! Integration tests for login, role checks and the admin-only pages.

mod common;

use axum::http::StatusCode;
use common::{
    admin_cookie, body_json, body_text, contributor_cookie, create_user, flash_of, get,
    post_form, post_json, redirect_target, set_cookie, ADMIN_EMAIL, PASSWORD,
};
use renungan_api::auth::session::SESSION_COOKIE;
use renungan_api::flash::{ERROR, ERRORS, SUCCESS};
use renungan_api::middleware::rbac::PERMISSION_DENIED;
use renungan_core::bilingual::SectionTranslationInput;
use renungan_core::roles::ROLE_ADMIN;
use renungan_db::models::comment::CreateComment;
use renungan_db::models::contact_submission::CreateContactSubmission;
use renungan_db::models::section::{CreateSection, Section};
use renungan_db::repositories::{
    CommentRepo, ContactSubmissionRepo, SectionRepo, SectionTranslationRepo, SettingRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn section(pool: &PgPool, title: &str, order: i32) -> Section {
    SectionRepo::create(
        pool,
        &CreateSection {
            title: title.to_string(),
            content: "<p>Isi</p>".to_string(),
            reflective_question: None,
            reflective_question_2: None,
            reflective_question_3: None,
            image_url: Some("/img/a.jpg".to_string()),
            display_order: order,
            is_published: true,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_redirects_admin_to_sections(pool: PgPool) {
    create_user(&pool, ADMIN_EMAIL, ROLE_ADMIN).await;
    let app = common::build_test_app(pool);

    let response = post_form(
        &app,
        "/login",
        &[("email", ADMIN_EMAIL), ("password", PASSWORD)],
        None,
    )
    .await;
    assert_eq!(redirect_target(&response), "/admin/sections");
    assert!(set_cookie(&response, SESSION_COOKIE).is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_redirects_contributor_to_editor(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = contributor_cookie(&app, &pool).await;

    // Signed-in users skip the login form.
    let response = get(&app, "/login", Some(&cookie)).await;
    assert_eq!(redirect_target(&response), "/admin/bilingual");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrong_password_is_rejected(pool: PgPool) {
    create_user(&pool, ADMIN_EMAIL, ROLE_ADMIN).await;
    let app = common::build_test_app(pool);

    for (email, password) in [(ADMIN_EMAIL, "wrong-password"), ("nobody@example.com", PASSWORD)] {
        let response = post_form(&app, "/login", &[("email", email), ("password", password)], None).await;
        assert_eq!(redirect_target(&response), "/login");
        assert!(set_cookie(&response, SESSION_COOKIE).is_none());
        assert_eq!(flash_of(&response).message(ERROR), Some("Invalid credentials"));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_session(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let response = post_form(&app, "/logout", &[], Some(&cookie)).await;
    assert_eq!(redirect_target(&response), "/login");
    assert_eq!(
        set_cookie(&response, SESSION_COOKIE).as_deref(),
        Some(format!("{SESSION_COOKIE}=").as_str())
    );

    // The old cookie no longer works.
    let response = get(&app, "/admin/sections", Some(&cookie)).await;
    assert_eq!(redirect_target(&response), "/login");
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_users_are_sent_to_login(pool: PgPool) {
    let app = common::build_test_app(pool);

    for uri in ["/admin/sections", "/admin/bilingual", "/admin/comments", "/admin/settings"] {
        let response = get(&app, uri, None).await;
        assert_eq!(redirect_target(&response), "/login", "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contributor_is_kept_out_of_admin_pages(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = contributor_cookie(&app, &pool).await;

    for uri in ["/admin/sections", "/admin/comments", "/admin/contacts", "/admin/settings"] {
        let response = get(&app, uri, Some(&cookie)).await;
        assert_eq!(redirect_target(&response), "/admin/bilingual", "{uri}");
        assert_eq!(flash_of(&response).message(ERROR), Some(PERMISSION_DENIED));
    }

    let response = get(&app, "/admin/bilingual", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contributor_cannot_post_admin_forms(pool: PgPool) {
    let s = section(&pool, "Kasih", 0).await;
    let app = common::build_test_app(pool.clone());
    let cookie = contributor_cookie(&app, &pool).await;

    let uri = format!("/admin/sections/{}/delete", s.id);
    let response = post_form(&app, &uri, &[], Some(&cookie)).await;
    assert_eq!(redirect_target(&response), "/admin/bilingual");
    assert!(SectionRepo::find_by_id(&pool, s.id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_section_list_renders(pool: PgPool) {
    section(&pool, "Kasih", 0).await;
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let response = get(&app, "/admin/sections", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Kasih"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_section_appends_to_end(pool: PgPool) {
    section(&pool, "Pertama", 4).await;
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let response = post_form(
        &app,
        "/admin/sections",
        &[
            ("title", "Kedua"),
            ("content", "<p>Isi</p>"),
            ("reflective_question", "Apa?"),
            ("is_published", "1"),
        ],
        Some(&cookie),
    )
    .await;
    assert_eq!(redirect_target(&response), "/admin/sections");
    assert_eq!(flash_of(&response).message(SUCCESS), Some("Section created successfully"));

    let all = SectionRepo::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].title, "Kedua");
    assert_eq!(all[1].display_order, 5);
    assert!(all[1].is_published);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_section_requires_title_and_content(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let response = post_form(&app, "/admin/sections", &[("title", "")], Some(&cookie)).await;
    assert_eq!(redirect_target(&response), "/admin/sections/create");
    let flash = flash_of(&response);
    let errors = flash.errors(ERRORS).expect("field errors");
    assert!(errors.get("title").is_some());
    assert!(errors.get("content").is_some());
    assert!(SectionRepo::list_all(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_section_drops_cached_translations(pool: PgPool) {
    let s = section(&pool, "Kasih", 3).await;
    SectionTranslationRepo::upsert(
        &pool,
        "fr",
        &s.source_hash(),
        &SectionTranslationInput {
            title: Some("Amour".into()),
            ..SectionTranslationInput::new(s.id)
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let uri = format!("/admin/sections/{}", s.id);
    let response = post_form(
        &app,
        &uri,
        &[("title", "Kasih Baru"), ("content", "<p>Baru</p>"), ("image_url", "")],
        Some(&cookie),
    )
    .await;
    assert_eq!(flash_of(&response).message(SUCCESS), Some("Section updated successfully"));

    let updated = SectionRepo::find_by_id(&pool, s.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Kasih Baru");
    assert_eq!(updated.display_order, 3);
    assert!(!updated.is_published);
    assert_eq!(updated.image_url, None);
    assert!(SectionTranslationRepo::find(&pool, s.id, "fr").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edit_missing_section_is_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let response = get(&app, "/admin/sections/9999/edit", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_section(pool: PgPool) {
    let s = section(&pool, "Kasih", 0).await;
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let uri = format!("/admin/sections/{}/delete", s.id);
    let response = post_form(&app, &uri, &[], Some(&cookie)).await;
    assert_eq!(flash_of(&response).message(SUCCESS), Some("Section deleted successfully"));
    assert!(SectionRepo::find_by_id(&pool, s.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_sections(pool: PgPool) {
    let a = section(&pool, "A", 0).await;
    let b = section(&pool, "B", 1).await;
    let c = section(&pool, "C", 2).await;
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let response = post_json(
        &app,
        "/admin/sections/reorder",
        serde_json::json!({ "order": [c.id, a.id, b.id] }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["success"], true);

    let titles: Vec<_> = SectionRepo::list_all(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, ["C", "A", "B"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_lesson_settings(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let response = post_form(
        &app,
        "/admin/sections/lesson",
        &[
            ("lesson_title", " Pelajaran 1 "),
            ("lesson_introduction", "Pengantar"),
            ("lesson_image", "/img/lesson.jpg"),
        ],
        Some(&cookie),
    )
    .await;
    assert_eq!(
        flash_of(&response).message(SUCCESS),
        Some("Lesson settings updated successfully")
    );
    assert_eq!(SettingRepo::get(&pool, "lesson_title", "").await.unwrap(), "Pelajaran 1");
    assert_eq!(SettingRepo::get(&pool, "lesson_image", "").await.unwrap(), "/img/lesson.jpg");
}

// ---------------------------------------------------------------------------
// Comments, contacts, settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_moderation(pool: PgPool) {
    let s = section(&pool, "Kasih", 0).await;
    let mut ids = Vec::new();
    for content in ["Amin", "Spam"] {
        let comment = CommentRepo::create(
            &pool,
            &CreateComment {
                section_id: s.id,
                author_name: "Ruth".into(),
                author_email: "ruth@example.com".into(),
                content: content.into(),
            },
        )
        .await
        .unwrap();
        ids.push(comment.id);
    }
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let html = body_text(get(&app, "/admin/comments", Some(&cookie)).await).await;
    assert!(html.contains("Amin"));
    assert!(html.contains("Spam"));

    let response = post_form(&app, &format!("/admin/comments/{}/approve", ids[0]), &[], Some(&cookie)).await;
    assert_eq!(redirect_target(&response), "/admin/comments");
    assert_eq!(flash_of(&response).message(SUCCESS), Some("Comment approved successfully"));

    let response = post_form(&app, &format!("/admin/comments/{}/delete", ids[1]), &[], Some(&cookie)).await;
    assert_eq!(flash_of(&response).message(SUCCESS), Some("Comment deleted successfully"));

    assert_eq!(CommentRepo::count_pending(&pool).await.unwrap(), 0);
    assert_eq!(CommentRepo::list_by_status(&pool, true).await.unwrap().len(), 1);

    let response = post_form(&app, "/admin/comments/9999/approve", &[], Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contact_submissions_list_and_delete(pool: PgPool) {
    let submission = ContactSubmissionRepo::create(
        &pool,
        &CreateContactSubmission {
            first_name: "Ruth".into(),
            last_name: None,
            town: "Malang".into(),
            email: "ruth@example.com".into(),
            want_follow_jesus: true,
            want_bible: false,
            want_prayer_request: false,
            want_ask_question: false,
            message: None,
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let html = body_text(get(&app, "/admin/contacts", Some(&cookie)).await).await;
    assert!(html.contains("Malang"));

    let uri = format!("/admin/contacts/{}/delete", submission.id);
    let response = post_form(&app, &uri, &[], Some(&cookie)).await;
    assert_eq!(redirect_target(&response), "/admin/contacts");
    assert!(ContactSubmissionRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_welcome_settings(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&app, &pool).await;

    let html = body_text(get(&app, "/admin/settings", Some(&cookie)).await).await;
    assert!(html.contains("Selamat"));

    let response = post_form(
        &app,
        "/admin/settings",
        &[("welcome_title", "Halo"), ("welcome_subtitle", "Semua")],
        Some(&cookie),
    )
    .await;
    assert_eq!(redirect_target(&response), "/admin/settings");
    assert_eq!(SettingRepo::get(&pool, "welcome_title", "").await.unwrap(), "Halo");
    assert_eq!(SettingRepo::get(&pool, "welcome_subtitle", "").await.unwrap(), "Semua");
}

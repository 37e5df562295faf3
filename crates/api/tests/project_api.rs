//! HTTP-level integration tests for the `/projects` resource: creation
//! with uploads, cover derivation, edits, reordering, and deletion.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, post_multipart_auth, put_json_auth, put_multipart_auth,
    MultipartForm, StubGateway,
};
use sqlx::PgPool;
use vitrine_db::repositories::ProjectMediaRepo;

/// Create a project through the API and return the response JSON
/// (`data` object).
async fn create_project(pool: &PgPool, token: &str, form: &MultipartForm) -> serde_json::Value {
    let response = post_multipart_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/projects",
        token,
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Create with two files: first upload becomes the cover, media are
/// ordered by submission position.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_with_two_files(pool: PgPool) {
    let token = common::create_admin_and_login(&pool, common::build_test_app(pool.clone())).await;

    let form = MultipartForm::new()
        .text("title", "Alpine sketches")
        .text("description", "Charcoal series")
        .file("image", "first.jpg", b"aaa")
        .file("image", "clip.mp4", b"bbb");
    let data = create_project(&pool, &token, &form).await;

    assert_eq!(data["uploaded"], 2);
    assert_eq!(data["failures"].as_array().unwrap().len(), 0);

    let project = &data["project"];
    assert_eq!(project["title"], "Alpine sketches");
    assert_eq!(project["image_url"], "https://media.test/first.jpg");

    let media = project["media"].as_array().unwrap();
    assert_eq!(media.len(), 2);
    assert_eq!(media[0]["url"], "https://media.test/first.jpg");
    assert_eq!(media[0]["media_type"], "image");
    assert_eq!(media[0]["sort_order"], 0);
    assert_eq!(media[1]["url"], "https://media.test/clip.mp4");
    assert_eq!(media[1]["media_type"], "video");
    assert_eq!(media[1]["sort_order"], 1);
}

/// A rejected file is reported but neither blocks the project nor the
/// other files in the batch.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_with_one_rejected_file(pool: PgPool) {
    let token = common::create_admin_and_login(&pool, common::build_test_app(pool.clone())).await;

    let form = MultipartForm::new()
        .text("title", "Mixed batch")
        .file("image", "huge.jpg", b"aaa")
        .file("image", "ok.jpg", b"bbb");
    let response = post_multipart_auth(
        common::build_test_app_with_gateway(pool.clone(), StubGateway::rejecting(&["huge.jpg"])),
        "/api/v1/projects",
        &token,
        &form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let data = body_json(response).await["data"].clone();

    assert_eq!(data["uploaded"], 1);
    let failures = data["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["filename"], "huge.jpg");
    assert!(
        failures[0]["reason"]
            .as_str()
            .unwrap()
            .contains("File size too large"),
        "failure must carry the service-reported reason"
    );

    // The surviving file is the cover.
    assert_eq!(data["project"]["image_url"], "https://media.test/ok.jpg");
    assert_eq!(data["project"]["media"].as_array().unwrap().len(), 1);
}

/// Title is the one required field.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_requires_a_title(pool: PgPool) {
    let token = common::create_admin_and_login(&pool, common::build_test_app(pool.clone())).await;

    let form = MultipartForm::new().text("description", "no title here");
    let response = post_multipart_auth(
        common::build_test_app(pool),
        "/api/v1/projects",
        &token,
        &form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Zero files is fine: the project lands with an empty cover.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_project_without_files(pool: PgPool) {
    let token = common::create_admin_and_login(&pool, common::build_test_app(pool.clone())).await;

    let form = MultipartForm::new().text("title", "Placeholder");
    let data = create_project(&pool, &token, &form).await;

    assert_eq!(data["uploaded"], 0);
    assert_eq!(data["project"]["image_url"], "");
    assert_eq!(data["project"]["media"].as_array().unwrap().len(), 0);
}

/// End-to-end cover rule: reorder so the second file becomes order 0
/// and the cover follows it.
#[sqlx::test(migrations = "../db/migrations")]
async fn reordering_media_moves_the_cover(pool: PgPool) {
    let token = common::create_admin_and_login(&pool, common::build_test_app(pool.clone())).await;

    let form = MultipartForm::new()
        .text("title", "A")
        .file("image", "one.jpg", b"aaa")
        .file("image", "two.jpg", b"bbb");
    let data = create_project(&pool, &token, &form).await;
    let project_id = data["project"]["id"].as_i64().unwrap();
    let media = data["project"]["media"].as_array().unwrap();
    let second_id = media[1]["id"].as_i64().unwrap();

    assert_eq!(data["project"]["image_url"], "https://media.test/one.jpg");

    let edit = MultipartForm::new()
        .text("title", "A")
        .text(
            "media_order",
            &format!(r#"[{{"id": {second_id}, "order": -1}}]"#),
        );
    let response = put_multipart_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}"),
        &token,
        &edit,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();

    assert_eq!(data["project"]["image_url"], "https://media.test/two.jpg");
}

/// Deleting the lowest-order media re-derives the cover from the
/// next-lowest survivor; deleting everything leaves the cover as-is.
#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_media_rederives_or_retains_the_cover(pool: PgPool) {
    let token = common::create_admin_and_login(&pool, common::build_test_app(pool.clone())).await;

    let form = MultipartForm::new()
        .text("title", "B")
        .file("image", "cover.jpg", b"aaa")
        .file("image", "backup.jpg", b"bbb");
    let data = create_project(&pool, &token, &form).await;
    let project_id = data["project"]["id"].as_i64().unwrap();
    let media = data["project"]["media"].as_array().unwrap();
    let first_id = media[0]["id"].as_i64().unwrap();
    let second_id = media[1]["id"].as_i64().unwrap();

    // Delete the lowest-order media: cover moves to the survivor.
    let edit = MultipartForm::new()
        .text("title", "B")
        .text("delete_media", &format!("[{first_id}]"));
    let response = put_multipart_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}"),
        &token,
        &edit,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["project"]["image_url"], "https://media.test/backup.jpg");

    // Delete the last media: the cover retains its last value.
    let edit = MultipartForm::new()
        .text("title", "B")
        .text("delete_media", &format!("[{second_id}]"));
    let response = put_multipart_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}"),
        &token,
        &edit,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["project"]["media"].as_array().unwrap().len(), 0);
    assert_eq!(data["project"]["image_url"], "https://media.test/backup.jpg");
}

/// New uploads during an edit append after the surviving maximum order.
#[sqlx::test(migrations = "../db/migrations")]
async fn edit_appends_new_files_after_existing_media(pool: PgPool) {
    let token = common::create_admin_and_login(&pool, common::build_test_app(pool.clone())).await;

    let form = MultipartForm::new()
        .text("title", "C")
        .file("image", "one.jpg", b"aaa");
    let data = create_project(&pool, &token, &form).await;
    let project_id = data["project"]["id"].as_i64().unwrap();

    let edit = MultipartForm::new()
        .text("title", "C renamed")
        .file("new_images", "two.jpg", b"bbb");
    let response = put_multipart_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}"),
        &token,
        &edit,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();

    assert_eq!(data["project"]["title"], "C renamed");
    let media = data["project"]["media"].as_array().unwrap();
    assert_eq!(media.len(), 2);
    assert!(
        media[1]["sort_order"].as_i64().unwrap() > media[0]["sort_order"].as_i64().unwrap(),
        "appended media must sort after existing media"
    );
}

/// Editing a nonexistent project is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn edit_missing_project_is_not_found(pool: PgPool) {
    let token = common::create_admin_and_login(&pool, common::build_test_app(pool.clone())).await;

    let edit = MultipartForm::new().text("title", "ghost");
    let response = put_multipart_auth(
        common::build_test_app(pool),
        "/api/v1/projects/9999",
        &token,
        &edit,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deletion cascades to media (no orphans) and is a 404 the second time.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_project_cascades_to_media(pool: PgPool) {
    let token = common::create_admin_and_login(&pool, common::build_test_app(pool.clone())).await;

    let form = MultipartForm::new()
        .text("title", "Doomed")
        .file("image", "one.jpg", b"aaa")
        .file("image", "two.jpg", b"bbb");
    let data = create_project(&pool, &token, &form).await;
    let project_id = data["project"]["id"].as_i64().unwrap();

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let orphans = ProjectMediaRepo::list_by_project(&pool, project_id)
        .await
        .unwrap();
    assert!(orphans.is_empty(), "no media rows may survive their project");

    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Public listing is ascending by order, ties broken by id, and open to
/// anonymous readers.
#[sqlx::test(migrations = "../db/migrations")]
async fn public_listing_is_deterministically_ordered(pool: PgPool) {
    let token = common::create_admin_and_login(&pool, common::build_test_app(pool.clone())).await;

    for title in ["first", "second", "third"] {
        let form = MultipartForm::new().text("title", title);
        create_project(&pool, &token, &form).await;
    }

    // first -> 5, second -> 0, third stays 0 (tie with second, older id wins).
    let listing = body_json(get(common::build_test_app(pool.clone()), "/api/v1/projects").await)
        .await["data"]
        .clone();
    let ids: Vec<i64> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();

    let updates = serde_json::json!([
        { "id": ids[0], "order": 5 },
        { "id": ids[1], "order": 0 },
    ]);
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/projects/order",
        &token,
        updates,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listing = body_json(get(common::build_test_app(pool), "/api/v1/projects").await).await
        ["data"]
        .clone();
    let titles: Vec<&str> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "third", "first"]);
}

/// Bulk reorder ignores unknown ids and still applies the rest.
#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_order_ignores_unknown_ids(pool: PgPool) {
    let token = common::create_admin_and_login(&pool, common::build_test_app(pool.clone())).await;

    let form = MultipartForm::new().text("title", "only");
    let data = create_project(&pool, &token, &form).await;
    let id = data["project"]["id"].as_i64().unwrap();

    let updates = serde_json::json!([
        { "id": id, "order": 3 },
        { "id": 424242, "order": 9 },
    ]);
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/projects/order",
        &token,
        updates,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["updated"], 1);

    let listing = body_json(get(common::build_test_app(pool), "/api/v1/projects").await).await
        ["data"]
        .clone();
    assert_eq!(listing[0]["sort_order"], 3);
}

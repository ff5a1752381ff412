//! Integration tests for the revision store and the edit operation.
//!
//! Exercises `PostRepo`, `RevisionRepo` and `UserRepo` against a real database:
//! - `fetch_revisions` returns history oldest first with the live row last
//! - `fetch_historical` and `fetch_live` read each half on its own
//! - `set_content` snapshots the previous state and attributes it correctly
//! - reverting through `set_content` adds exactly one history row
//! - recent edits are listed newest first with edit counts

use assert_matches::assert_matches;
use qa_history_core::revert::select_revert_target;
use qa_history_core::revision::PostType;
use qa_history_db::models::post::CreatePost;
use qa_history_db::repositories::{PostRepo, RevisionRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_question(user_id: i64, title: &str, content: &str) -> CreatePost {
    CreatePost {
        post_type: PostType::Question,
        parent_id: None,
        user_id: Some(user_id),
        title: Some(title.to_string()),
        content: content.to_string(),
        tags: Some("rust".to_string()),
    }
}

// ---------------------------------------------------------------------------
// fetch_revisions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn fetch_revisions_unknown_post_is_none(pool: PgPool) {
    let result = RevisionRepo::fetch_revisions(&pool, 999_999).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn never_edited_post_has_single_revision(pool: PgPool) {
    let alice = UserRepo::create(&pool, "alice").await.unwrap();
    let post = PostRepo::create(&pool, &new_question(alice.id, "Q", "body"))
        .await
        .unwrap();

    let (live, revisions) = RevisionRepo::fetch_revisions(&pool, post.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(live.id, post.id);
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0].content, "body");
    assert_eq!(revisions[0].updated_at, post.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn edits_produce_history_oldest_first(pool: PgPool) {
    let alice = UserRepo::create(&pool, "alice").await.unwrap();
    let bob = UserRepo::create(&pool, "bob").await.unwrap();
    let post = PostRepo::create(&pool, &new_question(alice.id, "Q", "v1"))
        .await
        .unwrap();

    PostRepo::set_content(&pool, post.id, "Q", "v2", Some(bob.id))
        .await
        .unwrap();
    PostRepo::set_content(&pool, post.id, "Q edited", "v3", Some(alice.id))
        .await
        .unwrap();

    let (_, revisions) = RevisionRepo::fetch_revisions(&pool, post.id)
        .await
        .unwrap()
        .unwrap();
    let contents: Vec<_> = revisions.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents, vec!["v1", "v2", "v3"]);

    // History rows are ordered by supersession time.
    assert!(revisions[0].updated_at <= revisions[1].updated_at);

    // Each snapshot is attributed to whoever produced that content.
    assert_eq!(revisions[0].user_id, Some(alice.id));
    assert_eq!(revisions[1].user_id, Some(bob.id));

    // The live row is last and carries the creation time and original author.
    let live = revisions.last().unwrap();
    assert_eq!(live.title, "Q edited");
    assert_eq!(live.updated_at, post.created_at);
    assert_eq!(live.user_id, Some(alice.id));
    assert_eq!(live.post_type, PostType::Question);
}

// ---------------------------------------------------------------------------
// fetch_historical / fetch_live
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn fetch_historical_is_oldest_first(pool: PgPool) {
    let alice = UserRepo::create(&pool, "alice").await.unwrap();
    let bob = UserRepo::create(&pool, "bob").await.unwrap();
    let post = PostRepo::create(&pool, &new_question(alice.id, "Q", "v1"))
        .await
        .unwrap();

    assert!(RevisionRepo::fetch_historical(&pool, post.id)
        .await
        .unwrap()
        .is_empty());

    PostRepo::set_content(&pool, post.id, "Q", "v2", Some(bob.id))
        .await
        .unwrap();
    PostRepo::set_content(&pool, post.id, "Q", "v3", Some(alice.id))
        .await
        .unwrap();

    let rows = RevisionRepo::fetch_historical(&pool, post.id).await.unwrap();
    let contents: Vec<_> = rows.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents, vec!["v1", "v2"]);
    assert!(rows[0].updated_at <= rows[1].updated_at);
    assert!(rows.iter().all(|r| r.post_id == post.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fetch_live_returns_current_row(pool: PgPool) {
    assert!(RevisionRepo::fetch_live(&pool, 999_999)
        .await
        .unwrap()
        .is_none());

    let alice = UserRepo::create(&pool, "alice").await.unwrap();
    let post = PostRepo::create(&pool, &new_question(alice.id, "Q", "v1"))
        .await
        .unwrap();
    PostRepo::set_content(&pool, post.id, "Q2", "v2", None)
        .await
        .unwrap();

    let live = RevisionRepo::fetch_live(&pool, post.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(live.id, post.id);
    assert_eq!(live.title.as_deref(), Some("Q2"));
    assert_eq!(live.content, "v2");
}

// ---------------------------------------------------------------------------
// set_content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_content_unknown_post_fails(pool: PgPool) {
    let result = PostRepo::set_content(&pool, 999_999, "t", "c", None).await;
    assert_matches!(result, Err(sqlx::Error::RowNotFound));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_content_stores_empty_title_as_null(pool: PgPool) {
    let alice = UserRepo::create(&pool, "alice").await.unwrap();
    let question = PostRepo::create(&pool, &new_question(alice.id, "Q", "body"))
        .await
        .unwrap();
    let answer = PostRepo::create(
        &pool,
        &CreatePost {
            post_type: PostType::Answer,
            parent_id: Some(question.id),
            user_id: Some(alice.id),
            title: None,
            content: "first answer".to_string(),
            tags: None,
        },
    )
    .await
    .unwrap();

    let updated = PostRepo::set_content(&pool, answer.id, "", "better answer", None)
        .await
        .unwrap();
    assert_eq!(updated.title, None);
    assert_eq!(updated.content, "better answer");
    assert_eq!(
        RevisionRepo::count_for_post(&pool, answer.id).await.unwrap(),
        1
    );
}

// ---------------------------------------------------------------------------
// Revert through the edit path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn revert_restores_revision_and_adds_one_row(pool: PgPool) {
    let alice = UserRepo::create(&pool, "alice").await.unwrap();
    let post = PostRepo::create(&pool, &new_question(alice.id, "Original", "first"))
        .await
        .unwrap();
    PostRepo::set_content(&pool, post.id, "Changed", "second", Some(alice.id))
        .await
        .unwrap();
    PostRepo::set_content(&pool, post.id, "Changed again", "third", Some(alice.id))
        .await
        .unwrap();

    let (_, before) = RevisionRepo::fetch_revisions(&pool, post.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(before.len(), 3);

    let target = select_revert_target(post.id, &before, 0).unwrap();
    let live = PostRepo::set_content(&pool, post.id, &target.title, &target.content, None)
        .await
        .unwrap();
    assert_eq!(live.title.as_deref(), Some("Original"));
    assert_eq!(live.content, "first");

    let (_, after) = RevisionRepo::fetch_revisions(&pool, post.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.len(), before.len() + 1);
    // The pre-revert live state is now the newest history row.
    assert_eq!(after[after.len() - 2].content, "third");
}

// ---------------------------------------------------------------------------
// UserRepo::handles_for_ids
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn handles_for_ids_skips_unknown(pool: PgPool) {
    let alice = UserRepo::create(&pool, "alice").await.unwrap();
    let bob = UserRepo::create(&pool, "bob").await.unwrap();

    let handles = UserRepo::handles_for_ids(&pool, &[alice.id, bob.id, 999_999])
        .await
        .unwrap();
    assert_eq!(handles.len(), 2);
    assert_eq!(handles[&alice.id], "alice");
    assert_eq!(handles[&bob.id], "bob");

    assert!(UserRepo::handles_for_ids(&pool, &[]).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// list_recent_edits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn recent_edits_newest_first(pool: PgPool) {
    let alice = UserRepo::create(&pool, "alice").await.unwrap();
    let older = PostRepo::create(&pool, &new_question(alice.id, "Older", "a"))
        .await
        .unwrap();
    let newer = PostRepo::create(&pool, &new_question(alice.id, "Newer", "b"))
        .await
        .unwrap();
    let untouched = PostRepo::create(&pool, &new_question(alice.id, "Untouched", "c"))
        .await
        .unwrap();

    PostRepo::set_content(&pool, older.id, "Older", "a2", None)
        .await
        .unwrap();
    PostRepo::set_content(&pool, older.id, "Older", "a3", None)
        .await
        .unwrap();
    PostRepo::set_content(&pool, newer.id, "Newer", "b2", None)
        .await
        .unwrap();

    let edits = RevisionRepo::list_recent_edits(&pool, 20, 0).await.unwrap();
    let ids: Vec<_> = edits.iter().map(|e| e.post_id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert!(!ids.contains(&untouched.id));
    assert_eq!(edits[1].edit_count, 2);

    let paged = RevisionRepo::list_recent_edits(&pool, 1, 1).await.unwrap();
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].post_id, older.id);
}

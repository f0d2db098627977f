//! End-to-end snippet board scenarios driven through the full middleware
//! stack with in-memory storage.

mod support;

use actix_web::http::StatusCode;

use support::{Browser, spawn_app, url_attr};

const ALICE_PASSWORD: &str = "alice-password";
const BOB_PASSWORD: &str = "bob-password!";

#[actix_web::test]
async fn owner_edits_while_other_user_is_forbidden() {
    let (app, query) = spawn_app().await;
    let mut alice = Browser::default();
    let mut bob = Browser::default();
    alice.sign_up(&app, "alice", ALICE_PASSWORD).await;
    bob.sign_up(&app, "bob", BOB_PASSWORD).await;

    let created = alice
        .post(&app, "/snippets/create", &[("description", "buy milk")])
        .await;
    assert_eq!(created.location.as_deref(), Some("/snippets"));

    let listing = query.list(None).await.expect("list");
    let id = listing.others.first().expect("one snippet").id.clone();

    let board = bob.get(&app, "/snippets").await;
    assert!(board.body.contains("Other snippets"));
    assert!(board.body.contains("buy milk"));
    assert!(board.body.contains("by alice"));
    assert!(!board.body.contains(&url_attr(&format!("snippets/{id}/edit"))));
    assert!(!board.body.contains(&url_attr(&format!("snippets/{id}/remove"))));
    assert!(!board.body.contains(&id));

    let own_board = alice.get(&app, "/snippets").await;
    assert!(own_board.body.contains(&url_attr(&format!("snippets/{id}/edit"))));
    assert!(own_board.body.contains(&url_attr(&format!("snippets/{id}/remove"))));

    let edit = bob.get(&app, &format!("/snippets/{id}/edit")).await;
    assert_eq!(edit.status, StatusCode::FORBIDDEN);
    let update = bob
        .post(
            &app,
            &format!("/snippets/{id}/update"),
            &[("description", "bob was here")],
        )
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);

    let update = alice
        .post(
            &app,
            &format!("/snippets/{id}/update"),
            &[("description", "buy oat milk")],
        )
        .await;
    assert_eq!(update.location.as_deref(), Some("/snippets"));
    let board = alice.get(&app, "/snippets").await;
    assert!(board.body.contains("The snippet was updated successfully."));
    assert!(board.body.contains("buy oat milk"));
    assert!(!board.body.contains("bob was here"));
}

#[actix_web::test]
async fn anonymous_gated_pages_are_not_found() {
    let (app, query) = spawn_app().await;
    let mut alice = Browser::default();
    alice.sign_up(&app, "alice", ALICE_PASSWORD).await;
    alice
        .post(&app, "/snippets/create", &[("description", "buy milk")])
        .await;
    let id = query
        .list(None)
        .await
        .expect("list")
        .others
        .first()
        .expect("one snippet")
        .id
        .clone();

    let mut anonymous = Browser::default();
    let existing = anonymous.get(&app, &format!("/snippets/{id}/edit")).await;
    let missing = anonymous
        .get(&app, "/snippets/00000000-0000-0000-0000-000000000000/edit")
        .await;
    assert_eq!(existing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(existing.body, missing.body);

    let new_form = anonymous.get(&app, "/snippets/new").await;
    assert_eq!(new_form.status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unknown_user_and_wrong_password_look_identical() {
    let (app, _) = spawn_app().await;
    let mut alice = Browser::default();
    alice.sign_up(&app, "alice", ALICE_PASSWORD).await;

    let mut stranger = Browser::default();
    let unknown = stranger
        .post(
            &app,
            "/user/userlogin",
            &[("user", "mallory"), ("password", ALICE_PASSWORD)],
        )
        .await;
    let unknown_page = stranger.get(&app, "/user/login").await;

    let mut guesser = Browser::default();
    let wrong = guesser
        .post(
            &app,
            "/user/userlogin",
            &[("user", "alice"), ("password", "not-her-password")],
        )
        .await;
    let wrong_page = guesser.get(&app, "/user/login").await;

    assert_eq!(unknown.location, wrong.location);
    assert!(unknown_page.body.contains("Invalid login attempt."));
    assert_eq!(unknown_page.body, wrong_page.body);
}

#[actix_web::test]
async fn empty_description_is_rejected_and_not_stored() {
    let (app, query) = spawn_app().await;
    let mut alice = Browser::default();
    alice.sign_up(&app, "alice", ALICE_PASSWORD).await;

    let rejected = alice
        .post(&app, "/snippets/create", &[("description", "   ")])
        .await;
    assert_eq!(rejected.location.as_deref(), Some("/snippets/new"));
    let form = alice.get(&app, "/snippets/new").await;
    assert!(form.body.contains("The description must not be empty."));

    let listing = query.list(None).await.expect("list");
    assert!(listing.mine.is_empty());
    assert!(listing.others.is_empty());
}

#[actix_web::test]
async fn delete_removes_snippet_from_list() {
    let (app, query) = spawn_app().await;
    let mut alice = Browser::default();
    alice.sign_up(&app, "alice", ALICE_PASSWORD).await;
    alice
        .post(&app, "/snippets/create", &[("description", "buy milk")])
        .await;
    let id = query
        .list(None)
        .await
        .expect("list")
        .others
        .first()
        .expect("one snippet")
        .id
        .clone();

    let confirm = alice.get(&app, &format!("/snippets/{id}/remove")).await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert!(confirm.body.contains(&url_attr(&format!("snippets/{id}/delete"))));

    let deleted = alice
        .post(&app, &format!("/snippets/{id}/delete"), &[])
        .await;
    assert_eq!(deleted.location.as_deref(), Some("/snippets"));
    let board = alice.get(&app, "/snippets").await;
    assert!(board.body.contains("The snippet was deleted successfully."));
    assert!(!board.body.contains("buy milk"));
    assert!(query.list(None).await.expect("list").others.is_empty());
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let (app, _) = spawn_app().await;
    let mut alice = Browser::default();
    alice.sign_up(&app, "alice", ALICE_PASSWORD).await;

    let confirm = alice.get(&app, "/user/logout").await;
    assert_eq!(confirm.status, StatusCode::OK);
    let out = alice.post(&app, "/user/userlogout", &[]).await;
    assert_eq!(out.location.as_deref(), Some("/"));

    let home = alice.get(&app, "/").await;
    assert!(home.body.contains("You logged out successfully."));
    let after = alice.get(&app, "/user/logout").await;
    assert_eq!(after.status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn duplicate_registration_is_flashed() {
    let (app, _) = spawn_app().await;
    let mut first = Browser::default();
    first.sign_up(&app, "alice", ALICE_PASSWORD).await;

    let mut second = Browser::default();
    let again = second
        .post(
            &app,
            "/user/register",
            &[("user", "alice"), ("password", "another-password")],
        )
        .await;
    assert_eq!(again.location.as_deref(), Some("/user/registration"));
    let form = second.get(&app, "/user/registration").await;
    assert!(form.body.contains("The user name is already taken."));
}

#[actix_web::test]
async fn form_without_description_field_is_flashed_not_failed() {
    let (app, query) = spawn_app().await;
    let mut alice = Browser::default();
    alice.sign_up(&app, "alice", ALICE_PASSWORD).await;

    let rejected = alice.post(&app, "/snippets/create", &[]).await;
    assert_eq!(rejected.status, StatusCode::FOUND);
    assert_eq!(rejected.location.as_deref(), Some("/snippets/new"));
    let form = alice.get(&app, "/snippets/new").await;
    assert!(form.body.contains("The description must not be empty."));
    assert!(query.list(None).await.expect("list").others.is_empty());
}

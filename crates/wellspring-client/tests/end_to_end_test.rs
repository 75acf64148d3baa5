//! Client against a live server on an ephemeral port.

use std::time::Duration;

use tokio::net::TcpListener;
use wellspring_auth::AuthConfig;
use wellspring_client::{
    ApiClient, ClientError, Draft, DraftEditor, SaveDraftRequest, SaveStatus, UpdateSessionRequest,
};
use wellspring_core::models::session::SessionStatus;
use wellspring_db::{DbConfig, DbManager, run_migrations};
use wellspring_server::{AppState, build_router};

async fn spawn_server() -> String {
    let db = DbManager::connect(&DbConfig::default()).await.unwrap();
    run_migrations(db.client()).await.unwrap();
    let app = build_router(AppState::new(
        db.client().clone(),
        AuthConfig::with_secret("client-test-secret"),
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn register_save_publish_and_browse() {
    let base = spawn_server().await;
    let client = ApiClient::new(&base).unwrap();

    let registered = client.register("u@x.com", "secret1").await.unwrap();
    assert_eq!(registered.user.email, "u@x.com");

    client.clear_token();
    let logged_in = client.login("u@x.com", "secret1").await.unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);
    assert_eq!(client.verify().await.unwrap().email, "u@x.com");

    let draft = client
        .save_draft(&SaveDraftRequest {
            title: "Test".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(draft.status, SessionStatus::Draft);

    let published = client.publish(draft.id).await.unwrap();
    assert_eq!(published.status, SessionStatus::Published);

    let anonymous = ApiClient::new(&base).unwrap();
    let catalog = anonymous.list_published().await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].title, "Test");
    assert_eq!(catalog[0].user_email.as_deref(), Some("u@x.com"));
}

#[tokio::test]
async fn api_errors_carry_status_and_message() {
    let base = spawn_server().await;
    let client = ApiClient::new(&base).unwrap();
    client.register("e@x.com", "secret1").await.unwrap();

    let err = client.login("e@x.com", "wrong-pw").await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let anonymous = ApiClient::new(&base).unwrap();
    let err = anonymous.my_sessions().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn update_get_and_delete() {
    let base = spawn_server().await;
    let client = ApiClient::new(&base).unwrap();
    client.register("crud@x.com", "secret1").await.unwrap();

    let session = client
        .save_draft(&SaveDraftRequest {
            title: "Breathing".into(),
            tags: vec!["calm".into()],
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = client
        .update_session(
            session.id,
            &UpdateSessionRequest {
                json_file_url: Some("https://example.com/b.json".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Breathing");
    assert_eq!(updated.json_file_url, "https://example.com/b.json");

    let fetched = client.get_session(session.id).await.unwrap();
    assert_eq!(fetched.tags, vec!["calm".to_string()]);

    client.delete_session(session.id).await.unwrap();
    let err = client.get_session(session.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn editor_auto_saves_after_pause() {
    let base = spawn_server().await;
    let client = ApiClient::new(&base).unwrap();
    client.register("auto@x.com", "secret1").await.unwrap();

    let editor =
        DraftEditor::with_delay(client.clone(), Draft::default(), Duration::from_millis(100));
    editor.set_title("Morning");
    editor.set_title("Morning Flow");
    editor.set_tags(vec!["yoga".into()]);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(editor.status(), SaveStatus::Saved);
    let id = editor.session_id().expect("first save records the id");

    editor.set_json_file_url("https://example.com/flow.json");
    tokio::time::sleep(Duration::from_millis(600)).await;

    let mine = client.my_sessions().await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, id);
    assert_eq!(mine[0].title, "Morning Flow");
    assert_eq!(mine[0].tags, vec!["yoga".to_string()]);
    assert_eq!(mine[0].json_file_url, "https://example.com/flow.json");
}

#[tokio::test]
async fn manual_save_reuses_endpoint() {
    let base = spawn_server().await;
    let client = ApiClient::new(&base).unwrap();
    client.register("manual@x.com", "secret1").await.unwrap();

    let editor = DraftEditor::new(client.clone());
    editor.set_title("Body Scan");
    assert!(editor.is_pending());

    let saved = editor.save().await.unwrap();
    assert!(!editor.is_pending());
    assert_eq!(editor.session_id(), Some(saved.id));

    let reopened = DraftEditor::open(client.clone(), &saved);
    reopened.set_title("Body Scan II");
    reopened.save().await.unwrap();

    let mine = client.my_sessions().await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Body Scan II");
}

#[tokio::test]
async fn manual_save_during_auto_save_keeps_one_session() {
    let base = spawn_server().await;
    let client = ApiClient::new(&base).unwrap();
    client.register("race@x.com", "secret1").await.unwrap();

    let editor =
        DraftEditor::with_delay(client.clone(), Draft::default(), Duration::from_millis(50));
    editor.set_title("Race");
    while editor.is_pending() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let saved = editor.save().await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    let mine = client.my_sessions().await.unwrap();
    assert_eq!(mine.len(), 1, "one draft produced {} sessions", mine.len());
    assert_eq!(mine[0].id, saved.id);
    assert_eq!(editor.session_id(), Some(saved.id));
}

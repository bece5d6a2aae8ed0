//! The client stores driven against a live server on an ephemeral port.

use classboard_client::engine::{AttendStatus, ImageUpload, NewPost, NewUser, PostPatch};
use classboard_client::{ClientConfig, RootStore, Settlement, StudentsCommand};
use classboard_server::config::Config;
use classboard_server::{build_app, AppState};
use tempfile::TempDir;

async fn spawn_server() -> (String, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        upload_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let app = build_app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), dir)
}

async fn connect(base_url: &str) -> RootStore {
    RootStore::connect(&ClientConfig::new(base_url).unwrap()).unwrap()
}

#[tokio::test]
async fn test_student_roster_round() {
    let (url, _dir) = spawn_server().await;
    let store = connect(&url).await;

    assert!(store.dispatch(StudentsCommand::Fetch).await.is_fulfilled());
    assert_eq!(store.snapshot().students.len(), 5);

    store.students().update_attend(1, AttendStatus::Present).await;
    store.students().update_online(1, true).await;
    let settled = store.students().update_grade(1, 13).await;

    assert_eq!(
        settled,
        Settlement::Rejected("grade must be between 0 and 12".into())
    );
    let snapshot = store.snapshot();
    let first = snapshot.students.get(&1).unwrap();
    assert_eq!(first.attend, AttendStatus::Present);
    assert!(first.online);
    assert_eq!(first.grade, 0);
    assert_eq!(
        snapshot.students.error(),
        Some("grade must be between 0 and 12")
    );
}

#[tokio::test]
async fn test_users_round() {
    let (url, _dir) = spawn_server().await;
    let store = connect(&url).await;

    let ann = store
        .users()
        .add(NewUser::new("Ann", "ann@school.test"))
        .await
        .ok()
        .unwrap();
    let dup = store
        .users()
        .add(NewUser::new("Other Ann", "ann@school.test"))
        .await;
    assert_eq!(
        dup.rejection(),
        Some("a user with this email already exists")
    );

    store.users().clear_error();
    let mut renamed = ann.clone();
    renamed.name = "Annie".into();
    store.users().update(renamed).await;
    assert_eq!(store.snapshot().user_by_id(ann.id).unwrap().name, "Annie");

    assert!(store.users().delete(ann.id).await.is_fulfilled());
    let missing = store.users().delete(ann.id).await;
    assert_eq!(missing.rejection(), Some("user not found"));
    assert!(store.users().state().is_empty());
}

#[tokio::test]
async fn test_posts_with_uploads() {
    let (url, dir) = spawn_server().await;
    let store = connect(&url).await;

    let plain = store
        .posts()
        .add(NewPost::new("Plain", "text only", "ms. k"), None)
        .await
        .ok()
        .unwrap();
    let image = ImageUpload::new("board.png", b"png".to_vec()).with_content_type("image/png");
    let pictured = store
        .posts()
        .add(NewPost::new("Pictured", "see image", "ms. k"), Some(image))
        .await
        .ok()
        .unwrap();

    // Newest first locally.
    let local: Vec<String> = store
        .posts()
        .state()
        .items()
        .iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(local, vec![pictured.id.clone(), plain.id.clone()]);

    let file = pictured.image_file.clone().unwrap();
    let served = reqwest::get(format!("{url}/uploads/{file}"))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(&served[..], b"png");

    store.posts().set_editing_id(Some(pictured.id.clone()));
    let patch = PostPatch {
        image_url: Some(Some("https://example.com/board.jpg".into())),
        ..PostPatch::default()
    };
    store.posts().update(pictured.id.clone(), patch, None).await;

    let state = store.posts().state();
    assert_eq!(state.editing_id(), None);
    let updated = state.get(&pictured.id).unwrap();
    assert_eq!(updated.image_file, None);
    assert_eq!(
        updated.image_url.as_deref(),
        Some("https://example.com/board.jpg")
    );
    assert!(!dir.path().join(&file).exists());

    // The server lists oldest first; a fetch adopts its order.
    store.posts().fetch().await;
    let listed: Vec<String> = store
        .posts()
        .state()
        .items()
        .iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(listed, vec![plain.id, pictured.id]);
}

#[tokio::test]
async fn test_wrong_credentials() {
    let (url, _dir) = spawn_server().await;
    let config = ClientConfig::new(&url)
        .unwrap()
        .with_credentials("admin", "wrong");
    let store = RootStore::connect(&config).unwrap();

    let settled = store.students().fetch().await;

    assert_eq!(settled.rejection(), Some("invalid username or password"));
    assert!(store.students().state().is_empty());
}

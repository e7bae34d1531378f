use std::sync::Arc;
use std::time::Duration;

use cp_core::ports::{
    AuthGatewayPort, KeyValueStorePort, ONBOARDING_PROGRESS_KEY, SESSION_AUTH_KEY,
};
use cp_core::user::User;
use cp_infra::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use cp_infra::{DemoAuthGateway, FileKeyValueStore, SystemClock};
use tempfile::TempDir;

#[tokio::test]
async fn demo_user_written_by_one_process_is_read_by_the_next() {
    let temp_dir = TempDir::new().unwrap();
    let gateway = DemoAuthGateway::new(Duration::ZERO, Arc::new(SystemClock));
    let user = gateway.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

    let first = FileKeyValueStore::with_defaults(temp_dir.path().to_path_buf());
    first
        .set(SESSION_AUTH_KEY, &serde_json::to_string(&user).unwrap())
        .unwrap();
    first.set(ONBOARDING_PROGRESS_KEY, "{}").unwrap();

    let second = FileKeyValueStore::with_defaults(temp_dir.path().to_path_buf());
    let raw = second.get(SESSION_AUTH_KEY).unwrap().unwrap();
    let restored: User = serde_json::from_str(&raw).unwrap();

    assert_eq!(restored, user);
    assert!(raw.contains("\"isOnboarded\":true"));
    assert_eq!(second.get(ONBOARDING_PROGRESS_KEY).unwrap().as_deref(), Some("{}"));
}

#[test]
fn concurrent_writers_in_one_process_keep_every_key() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileKeyValueStore::with_defaults(temp_dir.path().to_path_buf()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.set(&format!("key-{i}"), &i.to_string()).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..8 {
        assert_eq!(store.get(&format!("key-{i}")).unwrap(), Some(i.to_string()));
    }
}

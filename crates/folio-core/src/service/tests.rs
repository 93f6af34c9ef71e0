use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::{BlogCollection, BlogPost, PostInput, TagInput};
use crate::error::{DomainError, StoreError};
use crate::ports::{BlogStore, Clock, Loaded};
use crate::service::BlogService;

const SECRET: &str = "s3cret";

/// Store fake that yields between load and save so unserialized writers
/// would interleave.
#[derive(Default)]
struct FakeStore {
    state: StdMutex<Option<Loaded>>,
    saves: AtomicUsize,
    fail_io: bool,
}

impl FakeStore {
    fn with_state(loaded: Loaded) -> Self {
        Self {
            state: StdMutex::new(Some(loaded)),
            ..Default::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail_io: true,
            ..Default::default()
        }
    }

    fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn persisted(&self) -> BlogCollection {
        self.state
            .lock()
            .unwrap()
            .clone()
            .map(Loaded::into_collection)
            .unwrap_or_default()
    }
}

#[async_trait]
impl BlogStore for FakeStore {
    async fn load(&self) -> Result<Loaded, StoreError> {
        if self.fail_io {
            return Err(StoreError::Io("permission denied".into()));
        }
        let loaded = {
            let mut state = self.state.lock().unwrap();
            match state.as_ref() {
                Some(loaded) => loaded.clone(),
                None => {
                    *state = Some(Loaded::Existing(BlogCollection::new()));
                    Loaded::Initialized
                }
            }
        };
        tokio::task::yield_now().await;
        Ok(loaded)
    }

    async fn save(&self, collection: &BlogCollection) -> Result<(), StoreError> {
        if self.fail_io {
            return Err(StoreError::Io("disk full".into()));
        }
        *self.state.lock().unwrap() = Some(Loaded::Existing(collection.clone()));
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Clock that advances by a fixed step on every reading.
struct StepClock {
    next_millis: AtomicI64,
    step_millis: i64,
}

impl StepClock {
    fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next_millis: AtomicI64::new(start.timestamp_millis()),
            step_millis: step.num_milliseconds(),
        }
    }

    fn frozen(at: DateTime<Utc>) -> Self {
        Self::new(at, Duration::zero())
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.next_millis.fetch_add(self.step_millis, Ordering::SeqCst);
        Utc.timestamp_millis_opt(millis).unwrap()
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

fn service_with(store: Arc<FakeStore>, clock: StepClock, secret: Option<&str>) -> BlogService {
    BlogService::new(store, Arc::new(clock), secret.map(String::from))
}

fn service(store: Arc<FakeStore>) -> BlogService {
    service_with(store, StepClock::new(t0(), Duration::seconds(1)), Some(SECRET))
}

fn input(title: &str, content: &str, tags: Option<TagInput>) -> PostInput {
    PostInput {
        title: title.to_string(),
        summary: None,
        content: content.to_string(),
        tags,
    }
}

#[tokio::test]
async fn test_create_normalizes_and_stamps() {
    let store = Arc::new(FakeStore::default());
    let svc = service(store.clone());

    let post = svc
        .create_post(input(" Hello ", "World", Some("a, b ,, c".into())), Some(SECRET))
        .await
        .unwrap();

    assert_eq!(post.title, "Hello");
    assert_eq!(post.summary, "");
    assert_eq!(post.content, "World");
    assert_eq!(post.tags, vec!["a", "b", "c"]);
    assert_eq!(post.created_at, post.updated_at);
    assert_eq!(store.persisted().len(), 1);
    assert_eq!(svc.get_post(&post.id).await.unwrap(), post);
}

#[tokio::test]
async fn test_created_ids_are_unique_and_stable() {
    let store = Arc::new(FakeStore::default());
    let svc = service(store.clone());

    let mut ids = Vec::new();
    for n in 0..5 {
        let post = svc
            .create_post(input(&format!("Post {n}"), "Body", None), Some(SECRET))
            .await
            .unwrap();
        ids.push(post.id);
    }

    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());

    for id in &ids {
        assert_eq!(&svc.get_post(id).await.unwrap().id, id);
    }
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let store = Arc::new(FakeStore::default());
    let svc = service(store);

    let mut created = Vec::new();
    for n in 0..4 {
        let post = svc
            .create_post(input(&format!("Post {n}"), "Body", None), Some(SECRET))
            .await
            .unwrap();
        created.push(post.id);
    }

    let listed: Vec<String> = svc.list_posts().await.unwrap().into_iter().map(|p| p.id).collect();
    created.reverse();
    assert_eq!(listed, created);
}

#[tokio::test]
async fn test_list_breaks_timestamp_ties_by_later_append() {
    let store = Arc::new(FakeStore::default());
    let svc = service_with(store, StepClock::frozen(t0()), Some(SECRET));

    let first = svc.create_post(input("First", "Body", None), Some(SECRET)).await.unwrap();
    let second = svc.create_post(input("Second", "Body", None), Some(SECRET)).await.unwrap();
    assert_eq!(first.created_at, second.created_at);

    let listed = svc.list_posts().await.unwrap();
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn test_update_preserves_identity_and_advances_updated_at() {
    let store = Arc::new(FakeStore::default());
    let svc = service(store.clone());

    let original = svc
        .create_post(input("Title", "Body", Some("x".into())), Some(SECRET))
        .await
        .unwrap();

    let updated = svc
        .update_post(
            &original.id,
            input("New Title", "New Body", Some(TagInput::List(Vec::new()))),
            Some(SECRET),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);
    assert_eq!(updated.title, "New Title");
    assert_eq!(updated.content, "New Body");
    assert!(updated.tags.is_empty());
    assert_eq!(store.persisted().get(&original.id), Some(&updated));
}

#[tokio::test]
async fn test_update_with_backwards_clock_keeps_updated_at() {
    let store = Arc::new(FakeStore::default());
    let svc = service_with(
        store,
        StepClock::new(t0(), Duration::hours(-1)),
        Some(SECRET),
    );

    let original = svc.create_post(input("T", "C", None), Some(SECRET)).await.unwrap();
    let updated = svc
        .update_post(&original.id, input("T2", "C2", None), Some(SECRET))
        .await
        .unwrap();

    assert!(updated.updated_at >= original.updated_at);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let store = Arc::new(FakeStore::default());
    let svc = service(store.clone());

    let err = svc
        .update_post("missing", input("T", "C", None), Some(SECRET))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(store.saves(), 0);
}

#[tokio::test]
async fn test_blank_title_or_content_is_rejected_without_writing() {
    let store = Arc::new(FakeStore::default());
    let svc = service(store.clone());
    let existing = svc.create_post(input("T", "C", None), Some(SECRET)).await.unwrap();
    let before = store.persisted();

    let err = svc.create_post(input("", "Body", None), Some(SECRET)).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = svc
        .update_post(&existing.id, input("Title", "  \t", None), Some(SECRET))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    assert_eq!(store.saves(), 1);
    assert_eq!(store.persisted(), before);
}

#[tokio::test]
async fn test_writes_fail_closed_without_secret() {
    for secret in [None, Some(""), Some("   ")] {
        let store = Arc::new(FakeStore::default());
        let svc = service_with(store.clone(), StepClock::frozen(t0()), secret);
        assert!(!svc.writes_enabled());

        let err = svc.create_post(input("T", "C", None), Some("anything")).await.unwrap_err();
        assert!(matches!(err, DomainError::ServiceMisconfigured));

        let err = svc.update_post("id", input("T", "C", None), None).await.unwrap_err();
        assert!(matches!(err, DomainError::ServiceMisconfigured));

        assert_eq!(store.saves(), 0);
        assert!(store.persisted().is_empty());
    }
}

#[tokio::test]
async fn test_wrong_or_missing_credential_is_unauthorized() {
    let store = Arc::new(FakeStore::default());
    let svc = service(store.clone());
    let existing = svc.create_post(input("T", "C", None), Some(SECRET)).await.unwrap();
    let before = store.persisted();

    for credential in [None, Some(""), Some("wrong"), Some("s3cret ")] {
        let err = svc.create_post(input("T", "C", None), credential).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));

        let err = svc
            .update_post(&existing.id, input("X", "Y", None), credential)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }

    assert_eq!(store.persisted(), before);
}

#[tokio::test]
async fn test_authorization_is_checked_before_validation() {
    let store = Arc::new(FakeStore::default());
    let svc = service(store);

    let err = svc.create_post(input("", "", None), Some("wrong")).await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));
}

#[tokio::test]
async fn test_get_on_fresh_store_is_not_found() {
    let store = Arc::new(FakeStore::default());
    let svc = service(store);

    let err = svc.get_post("nonexistent-id").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { ref id, .. } if id == "nonexistent-id"));
}

#[tokio::test]
async fn test_reads_need_no_credential() {
    let store = Arc::new(FakeStore::default());
    let svc = service_with(store, StepClock::frozen(t0()), None);

    assert!(svc.list_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_collection_is_served_as_empty() {
    let store = Arc::new(FakeStore::with_state(Loaded::CorruptFallback {
        reason: "expected value at line 1 column 1".into(),
    }));
    let svc = service(store.clone());

    assert!(svc.list_posts().await.unwrap().is_empty());

    // Writing after a fallback starts a fresh collection.
    svc.create_post(input("T", "C", None), Some(SECRET)).await.unwrap();
    assert_eq!(store.persisted().len(), 1);
}

#[tokio::test]
async fn test_store_failure_is_store_unavailable() {
    let store = Arc::new(FakeStore::failing());
    let svc = service(store);

    let err = svc.list_posts().await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable(StoreError::Io(_))));

    let err = svc.create_post(input("T", "C", None), Some(SECRET)).await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable(_)));
}

#[tokio::test]
async fn test_concurrent_creates_are_both_persisted() {
    let store = Arc::new(FakeStore::default());
    let svc = Arc::new(service(store.clone()));

    let (a, b) = tokio::join!(
        svc.create_post(input("A", "Body", None), Some(SECRET)),
        svc.create_post(input("B", "Body", None), Some(SECRET)),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    let persisted = store.persisted();
    assert_eq!(persisted.len(), 2);
    assert!(persisted.contains(&a.id));
    assert!(persisted.contains(&b.id));
}

#[tokio::test]
async fn test_seeded_posts_are_listed() {
    let older = BlogPost::new(
        "older".into(),
        input("Old", "Body", None).validate().unwrap(),
        t0() - Duration::days(3),
    );
    let newer = BlogPost::new(
        "newer".into(),
        input("New", "Body", None).validate().unwrap(),
        t0() - Duration::days(1),
    );
    let store = Arc::new(FakeStore::with_state(Loaded::Existing(
        BlogCollection::from_posts(vec![older, newer]),
    )));
    let svc = service(store);

    let listed: Vec<String> = svc.list_posts().await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(listed, vec!["newer", "older"]);
}

use twin_kernel::repository::{MemoryRepository, Repository};

#[tokio::test]
async fn create_retrieve_replace_delete() {
    let repo = MemoryRepository::<String>::new();
    let id = "https://smartfactory.de/submodels/abc";

    let created = repo.create(id, "v1".to_owned()).await;
    assert!(created.success);
    assert_eq!(created.entity.as_deref(), Some("v1"));

    let duplicate = repo.create(id, "v2".to_owned()).await;
    assert!(!duplicate.success);
    assert!(duplicate.messages.is_some());

    let replaced = repo.replace(id, "v2".to_owned()).await;
    assert!(replaced.success);
    assert_eq!(repo.retrieve(id).await.entity.as_deref(), Some("v2"));

    assert!(repo.delete(id).await.success);
    assert_eq!(repo.len(), 0);
    assert!(!repo.retrieve(id).await.success);
}

#[tokio::test]
async fn replace_unknown_identifier_fails() {
    let repo = MemoryRepository::<u32>::new();
    let result = repo.replace("urn:missing", 7).await;
    assert!(!result.success);
    assert!(result.entity.is_none());
}

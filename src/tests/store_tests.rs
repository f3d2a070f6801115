#[cfg(test)]
mod tests {
    use crate::models::Client;
    use crate::store::{memory::MemoryStore, DocumentStore, StoreError};
    use crate::tests::helpers::{account, madoff};

    #[tokio::test]
    async fn put_generates_an_id_when_given_an_empty_one() {
        let store = MemoryStore::new();
        let stored = store.put(madoff()).await.unwrap();
        assert!(!stored.id.is_empty());
    }

    #[tokio::test]
    async fn put_keeps_a_supplied_id() {
        let store = MemoryStore::new();
        let mut client = madoff();
        client.id = "bernie-1".to_string();

        let stored = store.put(client).await.unwrap();
        assert_eq!(stored.id, "bernie-1");
    }

    #[tokio::test]
    async fn put_with_a_taken_id_is_a_duplicate_error() {
        let store = MemoryStore::new();
        let mut client = madoff();
        client.id = "bernie-1".to_string();
        let stored = store.put(client).await.unwrap();

        // Bump the revision so a clobbering insert would be detectable.
        let versioned = store.get_versioned(&stored.id).await.unwrap();
        let mut replaced = versioned.client.clone();
        replaced.first_name = "Bernard".to_string();
        store
            .replace(&stored.id, &replaced, versioned.revision)
            .await
            .unwrap();

        let mut second = madoff();
        second.id = "bernie-1".to_string();
        let err = store.put(second).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        // The stored document and its revision survived the rejected insert.
        let versioned = store.get_versioned(&stored.id).await.unwrap();
        assert_eq!(versioned.client.first_name, "Bernard");
        assert_eq!(versioned.revision, 2);
    }

    #[tokio::test]
    async fn get_of_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get("nobody").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn replace_bumps_the_revision() {
        let store = MemoryStore::new();
        let stored = store.put(madoff()).await.unwrap();

        let versioned = store.get_versioned(&stored.id).await.unwrap();
        assert_eq!(versioned.revision, 1);

        let mut client = versioned.client;
        client.accounts.push(account("Getaway Fund", 1));
        store
            .replace(&stored.id, &client, versioned.revision)
            .await
            .unwrap();

        let versioned = store.get_versioned(&stored.id).await.unwrap();
        assert_eq!(versioned.revision, 2);
        assert_eq!(versioned.client.accounts.len(), 5);
    }

    #[tokio::test]
    async fn replace_with_a_stale_revision_is_a_conflict() {
        let store = MemoryStore::new();
        let stored = store.put(madoff()).await.unwrap();

        let versioned = store.get_versioned(&stored.id).await.unwrap();
        store
            .replace(&stored.id, &versioned.client, versioned.revision)
            .await
            .unwrap();

        // Same token again: another writer already bumped it.
        let err = store
            .replace(&stored.id, &versioned.client, versioned.revision)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn replace_of_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let err = store.replace("nobody", &madoff(), 1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_of_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete("nobody").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_all_returns_every_document() {
        let store = MemoryStore::new();
        store.put(madoff()).await.unwrap();
        store
            .put(Client {
                id: String::new(),
                first_name: "Charles".to_string(),
                last_name: "Ponzi".to_string(),
                accounts: vec![],
            })
            .await
            .unwrap();

        let clients = store.list_all().await.unwrap();
        assert_eq!(clients.len(), 2);
    }

    #[tokio::test]
    async fn list_all_keeps_insertion_order() {
        let store = MemoryStore::new();
        for id in ["first", "second", "third"] {
            let mut client = madoff();
            client.id = id.to_string();
            store.put(client).await.unwrap();
        }

        let ids: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|client| client.id)
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }
}

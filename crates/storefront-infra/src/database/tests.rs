use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use storefront_core::ports::UserRepository;

use super::entity::{favorite, order, store, user};
use super::user_repo::{PostgresUserRepository, mask_email};

fn user_model(id: Uuid, email: &str) -> user::Model {
    let now = chrono::Utc::now();
    user::Model {
        id,
        email: email.to_owned(),
        name: Some("Test User".to_owned()),
        password_hash: Some("$argon2id$stub".to_owned()),
        picture: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_user_by_id_includes_relations() {
    let user_id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_model(user_id, "test@example.com")]])
        .append_query_results([vec![favorite::Model {
            id: Uuid::new_v4(),
            user_id,
            product_id: Uuid::new_v4(),
            created_at: now.into(),
        }]])
        .append_query_results([Vec::<order::Model>::new()])
        .append_query_results([vec![store::Model {
            id: Uuid::new_v4(),
            user_id,
            title: "My Store".to_owned(),
            created_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let found = repo.find_by_id(user_id).await.unwrap().unwrap();

    assert_eq!(found.user.id, user_id);
    assert_eq!(found.user.email, "test@example.com");
    assert_eq!(found.favorites.len(), 1);
    assert!(found.orders.is_empty());
    assert_eq!(found.stores[0].title, "My Store");
}

#[tokio::test]
async fn test_find_user_by_email() {
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_model(user_id, "a@x.com")]])
        .append_query_results([Vec::<favorite::Model>::new()])
        .append_query_results([Vec::<order::Model>::new()])
        .append_query_results([Vec::<store::Model>::new()])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();

    assert_eq!(found.user.id, user_id);
    assert!(found.favorites.is_empty());
}

#[tokio::test]
async fn test_find_missing_user_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[test]
fn test_mask_email_hides_local_part() {
    assert_eq!(mask_email("alice@example.com"), "a***@example.com");
    assert_eq!(mask_email("a@example.com"), "***@example.com");
    assert_eq!(mask_email("not-an-email"), "***");
}

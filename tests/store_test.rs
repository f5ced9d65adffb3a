//! SeaORM store tests against a migrated in-memory SQLite database.

use chrono::Utc;
use sea_orm::{ConnectOptions, DatabaseConnection};

use credence::domain::{CreateCertificate, NewUser, UpdateCertificate, UserChanges, UserRole};
use credence::infra::{CertificateRepository, CertificateStore, Database, UserRepository, UserStore};
use credence::AppError;

async fn connection() -> DatabaseConnection {
    let options = ConnectOptions::new("sqlite::memory:")
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false)
        .to_owned();
    let database = Database::from_connection(sea_orm::Database::connect(options).await.unwrap());
    database.run_migrations().await.unwrap();
    database.get_connection()
}

fn ada() -> NewUser {
    NewUser {
        first_name: Some("Ada".to_string()),
        middle_name: None,
        last_name: Some("Lovelace".to_string()),
        email: "ada@example.com".to_string(),
        password_hash: "hashed".to_string(),
        vanity_slug: "ada-lovelace".to_string(),
        role: UserRole::Professional,
        current_employer: None,
        current_position: None,
        birth_year: None,
        country: None,
        city: None,
        zip_code: None,
        bio: None,
        website_url: None,
        fb_url: None,
        linkedin_url: None,
        x_url: None,
    }
}

#[tokio::test]
async fn test_user_update_skips_deleted_row() {
    let store = UserStore::new(connection().await);
    let user = store.create(ada()).await.unwrap();
    store.delete(&user.id).await.unwrap();

    let result = store
        .update(
            &user.id,
            UserChanges {
                last_login: Some(Utc::now()),
                first_name: Some("Augusta".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound("User"))));

    let restored = store.restore(&user.id).await.unwrap();
    assert_eq!(restored.first_name.as_deref(), Some("Ada"));
    assert!(restored.last_login.is_none());
}

#[tokio::test]
async fn test_user_update_missing_row() {
    let store = UserStore::new(connection().await);

    let result = store
        .update(
            "01HV4Z2WQXKJNM8GPQY6VBKC3D",
            UserChanges {
                bio: Some("Analyst".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound("User"))));
}

#[tokio::test]
async fn test_user_update_touches_only_given_columns() {
    let store = UserStore::new(connection().await);
    let user = store.create(ada()).await.unwrap();

    let updated = store
        .update(
            &user.id,
            UserChanges {
                city: Some("London".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.city.as_deref(), Some("London"));
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.vanity_slug, user.vanity_slug);
    assert_eq!(updated.created_at, user.created_at);
    assert!(updated.deleted_at.is_none());
}

#[tokio::test]
async fn test_certificate_update_skips_deleted_row() {
    let store = CertificateStore::new(connection().await);
    let certificate = store
        .create(CreateCertificate {
            name: "Certified Analyst".to_string(),
            description: None,
            criteria: vec!["Pass the written exam".to_string()],
            skills: vec!["sql".to_string()],
            image: None,
        })
        .await
        .unwrap();
    store.delete(&certificate.id).await.unwrap();

    let result = store
        .update(
            &certificate.id,
            UpdateCertificate {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound("Certificate"))));

    let restored = store.restore(&certificate.id).await.unwrap();
    assert_eq!(restored.name, "Certified Analyst");
}

//! User service unit tests.

mod common;

use std::sync::Arc;

use chrono::Utc;

use credence::config::{
    MSG_EMAIL_TAKEN, MSG_NO_FIELDS, MSG_SLUG_EXHAUSTED, MSG_SLUG_TAKEN, SLUG_MAX_ATTEMPTS,
};
use credence::domain::{LoginUser, NewUser, PasswordHashed, RegisterUser, UpdateUser, User};
use credence::errors::AppError;
use credence::infra::MockBlobStore;
use credence::services::{UserManager, UserService};

use common::{user, TestUnitOfWork, OTHER_USER_ID, USER_ID};

fn service(uow: TestUnitOfWork) -> UserManager<common::FrozenUnitOfWork> {
    UserManager::new(uow.build(), Arc::new(MockBlobStore::new()))
}

fn ada() -> RegisterUser {
    RegisterUser {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        email: "ada@example.com".to_string(),
        password: "secret1".to_string(),
        ..RegisterUser::default()
    }
}

fn persisted(new_user: NewUser) -> User {
    User {
        email: new_user.email,
        password_hash: new_user.password_hash,
        vanity_slug: new_user.vanity_slug,
        ..user(USER_ID)
    }
}

#[tokio::test]
async fn test_register_uses_name_slug_when_free() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_email_owner().returning(|_| Ok(None));
    uow.users
        .expect_slug_owner()
        .withf(|slug| slug == "ada-lovelace")
        .times(1)
        .returning(|_| Ok(None));
    uow.users
        .expect_create()
        .withf(|new_user| new_user.password_hash != "secret1")
        .times(1)
        .returning(|new_user| Ok(persisted(new_user)));

    let registered = service(uow).register(ada()).await.unwrap();

    assert_eq!(registered.vanity_slug, "ada-lovelace");
    assert!(PasswordHashed::from_hash(registered.password_hash).verify("secret1"));
}

#[tokio::test]
async fn test_register_suffixes_taken_slug() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_email_owner().returning(|_| Ok(None));
    uow.users
        .expect_slug_owner()
        .withf(|slug| slug == "ada-lovelace")
        .times(1)
        .returning(|_| Ok(Some(OTHER_USER_ID.to_string())));
    uow.users
        .expect_slug_owner()
        .withf(|slug| slug.starts_with("ada-lovelace-"))
        .times(1)
        .returning(|_| Ok(None));
    uow.users
        .expect_create()
        .times(1)
        .returning(|new_user| Ok(persisted(new_user)));

    let registered = service(uow).register(ada()).await.unwrap();

    let suffix = registered.vanity_slug.strip_prefix("ada-lovelace-").unwrap();
    assert_eq!(suffix.len(), 12);
}

#[tokio::test]
async fn test_register_gives_up_without_persisting() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_email_owner().returning(|_| Ok(None));
    uow.users
        .expect_slug_owner()
        .times(SLUG_MAX_ATTEMPTS)
        .returning(|_| Ok(Some(OTHER_USER_ID.to_string())));
    uow.users.expect_create().never();

    let err = service(uow).register(ada()).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref msg) if msg == MSG_SLUG_EXHAUSTED));
}

#[tokio::test]
async fn test_register_rejects_taken_email_before_slug_work() {
    let mut uow = TestUnitOfWork::default();
    uow.users
        .expect_email_owner()
        .withf(|email| email == "ada@example.com")
        .returning(|_| Ok(Some(OTHER_USER_ID.to_string())));
    uow.users.expect_slug_owner().never();
    uow.users.expect_create().never();

    let err = service(uow).register(ada()).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref msg) if msg == MSG_EMAIL_TAKEN));
}

#[tokio::test]
async fn test_register_rejects_future_birth_year() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_email_owner().never();

    let req = RegisterUser {
        birth_year: Some(3000),
        ..ada()
    };
    let err = service(uow).register(req).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_login_unknown_email() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_find_by_email().returning(|_| Ok(None));
    uow.users.expect_update().never();

    let err = service(uow)
        .login(LoginUser {
            email: "nobody@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let hash = PasswordHashed::new("secret1").unwrap().into_string();

    let mut uow = TestUnitOfWork::default();
    uow.users.expect_find_by_email().returning(move |_| {
        Ok(Some(User {
            password_hash: hash.clone(),
            ..user(USER_ID)
        }))
    });
    uow.users.expect_update().never();

    let err = service(uow)
        .login(LoginUser {
            email: "ada@example.com".to_string(),
            password: "wrong-one".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_stamps_last_login() {
    let hash = PasswordHashed::new("secret1").unwrap().into_string();

    let mut uow = TestUnitOfWork::default();
    uow.users.expect_find_by_email().returning(move |_| {
        Ok(Some(User {
            password_hash: hash.clone(),
            ..user(USER_ID)
        }))
    });
    uow.users
        .expect_update()
        .withf(|id, changes| id == USER_ID && changes.last_login.is_some())
        .times(1)
        .returning(|_, changes| {
            Ok(User {
                last_login: changes.last_login,
                ..user(USER_ID)
            })
        });

    let logged_in = service(uow)
        .login(LoginUser {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    assert!(logged_in.last_login.unwrap() <= Utc::now());
}

#[tokio::test]
async fn test_get_user_rejects_malformed_id() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_find_by_id().never();

    let err = service(uow).get_user("42").await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_find_by_id().returning(|_| Ok(None));

    let err = service(uow).get_user(USER_ID).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound("User")));
}

#[tokio::test]
async fn test_update_with_empty_body() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_find_by_id().never();

    let err = service(uow)
        .update_user(USER_ID, UpdateUser::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_NO_FIELDS));
}

#[tokio::test]
async fn test_update_rejects_slug_owned_by_another_user() {
    let mut uow = TestUnitOfWork::default();
    uow.users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    uow.users
        .expect_slug_owner()
        .withf(|slug| slug == "grace-hopper")
        .returning(|_| Ok(Some(OTHER_USER_ID.to_string())));
    uow.users.expect_update().never();

    let req = UpdateUser {
        vanity_slug: Some("Grace Hopper".to_string()),
        ..UpdateUser::default()
    };
    let err = service(uow).update_user(USER_ID, req).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref msg) if msg == MSG_SLUG_TAKEN));
}

#[tokio::test]
async fn test_update_keeps_own_email() {
    let mut uow = TestUnitOfWork::default();
    uow.users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    uow.users
        .expect_email_owner()
        .returning(|_| Ok(Some(USER_ID.to_string())));
    uow.users
        .expect_update()
        .withf(|_, changes| changes.email.as_deref() == Some("ada@example.com"))
        .times(1)
        .returning(|id, _| Ok(user(id)));

    let req = UpdateUser {
        email: Some("ada@example.com".to_string()),
        ..UpdateUser::default()
    };
    assert!(service(uow).update_user(USER_ID, req).await.is_ok());
}

#[tokio::test]
async fn test_resolve_by_identifier() {
    let mut uow = TestUnitOfWork::default();
    uow.users
        .expect_find_by_identifier()
        .withf(|identifier| identifier == "ada-lovelace")
        .returning(|_| Ok(Some(user(USER_ID))));

    let id = service(uow).resolve_user_id("ada-lovelace").await.unwrap();

    assert_eq!(id, USER_ID);
}

#[tokio::test]
async fn test_resolve_rejects_malformed_email() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_find_by_identifier().never();

    let result = service(uow).resolve_user_id("foo@").await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ref msg)) if msg == "\"email\" must be a valid email"
    ));
}

#[tokio::test]
async fn test_delete_missing_user() {
    let mut uow = TestUnitOfWork::default();
    uow.users
        .expect_delete()
        .returning(|_| Err(AppError::NotFound("User")));

    let err = service(uow).delete_user(USER_ID).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound("User")));
}

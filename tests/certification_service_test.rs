//! Certification service unit tests.

mod common;

use chrono::Utc;

use credence::config::MSG_CERTIFICATION_EXISTS;
use credence::domain::{Certification, CreateCertification, UpdateCertification};
use credence::errors::AppError;
use credence::services::{CertificationManager, CertificationService};

use common::{
    certificate, certification, user, TestUnitOfWork, CERTIFICATE_ID, CERTIFICATION_ID,
    OTHER_CERTIFICATION_ID, OTHER_USER_ID, USER_ID,
};

fn service(uow: TestUnitOfWork) -> CertificationManager<common::FrozenUnitOfWork> {
    CertificationManager::new(uow.build())
}

fn award() -> CreateCertification {
    CreateCertification {
        user_id: USER_ID.to_string(),
        certificate_id: CERTIFICATE_ID.to_string(),
        ..CreateCertification::default()
    }
}

#[tokio::test]
async fn test_create_checks_user_before_certificate() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_find_by_id().returning(|_| Ok(None));
    uow.certificates.expect_find_by_id().never();
    uow.certifications.expect_create().never();

    let err = service(uow).create_certification(award()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound("User")));
}

#[tokio::test]
async fn test_create_with_deleted_certificate() {
    let mut uow = TestUnitOfWork::default();
    uow.users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    uow.certificates.expect_find_by_id().returning(|_| Ok(None));
    uow.certifications.expect_active_pair_owner().never();

    let err = service(uow).create_certification(award()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound("Certificate")));
}

#[tokio::test]
async fn test_create_rejects_active_duplicate() {
    let mut uow = TestUnitOfWork::default();
    uow.users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    uow.certificates
        .expect_find_by_id()
        .returning(|id| Ok(Some(certificate(id))));
    uow.certifications
        .expect_active_pair_owner()
        .withf(|user_id, certificate_id| user_id == USER_ID && certificate_id == CERTIFICATE_ID)
        .returning(|_, _| Ok(Some(OTHER_CERTIFICATION_ID.to_string())));
    uow.certifications.expect_create().never();

    let err = service(uow).create_certification(award()).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref msg) if msg == MSG_CERTIFICATION_EXISTS));
}

#[tokio::test]
async fn test_create_defaults_public_and_issue_date() {
    let before = Utc::now();

    let mut uow = TestUnitOfWork::default();
    uow.users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    uow.certificates
        .expect_find_by_id()
        .returning(|id| Ok(Some(certificate(id))));
    uow.certifications
        .expect_active_pair_owner()
        .returning(|_, _| Ok(None));
    uow.certifications
        .expect_create()
        .withf(move |new_cert| new_cert.is_public && new_cert.issued_at >= before)
        .times(1)
        .returning(|_| Ok(certification(CERTIFICATION_ID)));

    let created = service(uow).create_certification(award()).await.unwrap();

    assert_eq!(created.id, CERTIFICATION_ID);
}

#[tokio::test]
async fn test_list_by_deleted_user() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_find_by_id().returning(|_| Ok(None));
    uow.certifications.expect_list_by_user().never();

    let err = service(uow).list_by_user(USER_ID).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound("User")));
}

#[tokio::test]
async fn test_get_populates_both_relations() {
    let mut uow = TestUnitOfWork::default();
    uow.certifications
        .expect_find_by_id()
        .returning(|id| Ok(Some(certification(id))));
    uow.users
        .expect_find_many_with_deleted()
        .withf(|ids| ids == &vec![USER_ID.to_string()])
        .returning(|_| Ok(vec![user(USER_ID)]));
    uow.certificates
        .expect_find_many_with_deleted()
        .returning(|_| Ok(vec![certificate(CERTIFICATE_ID)]));

    let response = service(uow).get_certification(CERTIFICATION_ID).await.unwrap();
    let json = serde_json::to_value(response).unwrap();

    assert_eq!(json["user"]["id"], USER_ID);
    assert_eq!(json["certificate"]["name"], "Data Analyst");
    assert!(json.get("userId").is_none());
}

#[tokio::test]
async fn test_list_by_certificate_populates_user_only() {
    let mut uow = TestUnitOfWork::default();
    uow.certificates
        .expect_find_by_id()
        .returning(|id| Ok(Some(certificate(id))));
    uow.certifications
        .expect_list_by_certificate()
        .returning(|_| Ok(vec![certification(CERTIFICATION_ID)]));
    uow.users
        .expect_find_many_with_deleted()
        .returning(|_| Ok(vec![user(USER_ID)]));
    uow.certificates
        .expect_find_many_with_deleted()
        .withf(|ids| ids.is_empty())
        .returning(|_| Ok(vec![]));

    let listed = service(uow).list_by_certificate(CERTIFICATE_ID).await.unwrap();
    let json = serde_json::to_value(&listed[0]).unwrap();

    assert_eq!(json["user"]["email"], "ada@example.com");
    assert_eq!(json["certificateId"], CERTIFICATE_ID);
}

#[tokio::test]
async fn test_update_moving_to_held_pair() {
    let mut uow = TestUnitOfWork::default();
    uow.certifications
        .expect_find_by_id()
        .returning(|id| Ok(Some(certification(id))));
    uow.users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id))));
    uow.certifications
        .expect_active_pair_owner()
        .withf(|user_id, _| user_id == OTHER_USER_ID)
        .returning(|_, _| Ok(Some(OTHER_CERTIFICATION_ID.to_string())));
    uow.certifications.expect_update().never();

    let req = UpdateCertification {
        user_id: Some(OTHER_USER_ID.to_string()),
        ..UpdateCertification::default()
    };
    let err = service(uow)
        .update_certification(CERTIFICATION_ID, req)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_without_reference_change_skips_checks() {
    let mut uow = TestUnitOfWork::default();
    uow.certifications
        .expect_find_by_id()
        .returning(|id| Ok(Some(certification(id))));
    uow.users.expect_find_by_id().never();
    uow.certifications.expect_active_pair_owner().never();
    uow.certifications
        .expect_update()
        .withf(|_, changes| changes.grade == Some(None))
        .times(1)
        .returning(|id, _| {
            Ok(Certification {
                grade: None,
                ..certification(id)
            })
        });

    let req = UpdateCertification {
        user_id: Some(USER_ID.to_string()),
        grade: Some(None),
        ..UpdateCertification::default()
    };
    let updated = service(uow)
        .update_certification(CERTIFICATION_ID, req)
        .await
        .unwrap();

    assert_eq!(updated.grade, None);
}

#[tokio::test]
async fn test_restore_blocked_by_newer_active_pair() {
    let mut uow = TestUnitOfWork::default();
    uow.certifications
        .expect_find_by_id_with_deleted()
        .returning(|id| {
            Ok(Some(Certification {
                deleted_at: Some(Utc::now()),
                ..certification(id)
            }))
        });
    uow.certifications
        .expect_active_pair_owner()
        .returning(|_, _| Ok(Some(OTHER_CERTIFICATION_ID.to_string())));
    uow.certifications.expect_restore().never();

    let err = service(uow)
        .restore_certification(CERTIFICATION_ID)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref msg) if msg == MSG_CERTIFICATION_EXISTS));
}

#[tokio::test]
async fn test_restore_active_certification() {
    let mut uow = TestUnitOfWork::default();
    uow.certifications
        .expect_find_by_id_with_deleted()
        .returning(|id| Ok(Some(certification(id))));
    uow.certifications.expect_restore().never();

    let err = service(uow)
        .restore_certification(CERTIFICATION_ID)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound("Certification")));
}

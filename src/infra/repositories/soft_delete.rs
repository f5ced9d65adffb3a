//! Shared soft-delete lifecycle for every collection.
//!
//! Two scopes are named here and nowhere else: the *visibility* scope
//! (rows with `deleted_at IS NULL`), used by every read, update and
//! relationship query, and the *uniqueness* scope (the whole table),
//! used only by the email and vanity-slug checks.
//!
//! State changes are a single conditional `UPDATE ... WHERE id = ? AND
//! deleted_at IS [NOT] NULL`; zero affected rows means the entity was
//! absent or already in the target state. Field updates carry the same
//! `deleted_at IS NULL` condition in their `UPDATE`.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Select,
};

use super::entities::{certificate, certification, organization, user};
use crate::errors::{AppError, AppResult};

/// Entities carrying `id`, `updated_at` and nullable `deleted_at` columns.
pub trait SoftDeletable: EntityTrait {
    fn id_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;
}

/// Visibility scope: active rows only.
pub fn active<E: SoftDeletable>() -> Select<E> {
    E::find().filter(E::deleted_at_column().is_null())
}

/// Uniqueness scope: every row, whatever its delete state.
pub fn whole_collection<E: EntityTrait>() -> Select<E> {
    E::find()
}

/// Error mapper for single-row updates filtered on the visibility scope.
///
/// A row that vanished or was soft-deleted after it was read matches
/// nothing, which SeaORM reports as `RecordNotUpdated`.
pub fn missing_as_not_found(entity: &'static str) -> impl FnOnce(DbErr) -> AppError {
    move |err| match err {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => AppError::NotFound(entity),
        err => AppError::from(err),
    }
}

/// Atomic state transitions, shared by all stores.
#[async_trait]
pub trait SoftDeleteRepository<E: SoftDeletable>: Send + Sync {
    /// Get database connection reference
    fn db(&self) -> &DatabaseConnection;

    /// Active -> Deleted. Returns false when no active row matched.
    async fn mark_deleted(&self, id: &str) -> AppResult<bool> {
        let now = Utc::now();
        let result = E::update_many()
            .col_expr(E::deleted_at_column(), Expr::value(now))
            .col_expr(E::updated_at_column(), Expr::value(now))
            .filter(E::id_column().eq(id))
            .filter(E::deleted_at_column().is_null())
            .exec(self.db())
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deleted -> Active. Returns false when no deleted row matched.
    async fn mark_restored(&self, id: &str) -> AppResult<bool> {
        let result = E::update_many()
            .col_expr(
                E::deleted_at_column(),
                Expr::value(Option::<chrono::DateTime<Utc>>::None),
            )
            .col_expr(E::updated_at_column(), Expr::value(Utc::now()))
            .filter(E::id_column().eq(id))
            .filter(E::deleted_at_column().is_not_null())
            .exec(self.db())
            .await?;

        Ok(result.rows_affected > 0)
    }
}

impl SoftDeletable for user::Entity {
    fn id_column() -> Self::Column {
        user::Column::Id
    }
    fn updated_at_column() -> Self::Column {
        user::Column::UpdatedAt
    }
    fn deleted_at_column() -> Self::Column {
        user::Column::DeletedAt
    }
}

impl SoftDeletable for organization::Entity {
    fn id_column() -> Self::Column {
        organization::Column::Id
    }
    fn updated_at_column() -> Self::Column {
        organization::Column::UpdatedAt
    }
    fn deleted_at_column() -> Self::Column {
        organization::Column::DeletedAt
    }
}

impl SoftDeletable for certificate::Entity {
    fn id_column() -> Self::Column {
        certificate::Column::Id
    }
    fn updated_at_column() -> Self::Column {
        certificate::Column::UpdatedAt
    }
    fn deleted_at_column() -> Self::Column {
        certificate::Column::DeletedAt
    }
}

impl SoftDeletable for certification::Entity {
    fn id_column() -> Self::Column {
        certification::Column::Id
    }
    fn updated_at_column() -> Self::Column {
        certification::Column::UpdatedAt
    }
    fn deleted_at_column() -> Self::Column {
        certification::Column::DeletedAt
    }
}

//! Data access objects, one per collection.
//!
//! Every method issues exactly one driver call. Mutation outcomes are
//! translated into [`UpdateOutcome`]/[`DeleteOutcome`] so the HTTP contract
//! does not leak the driver's result shapes.
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::results::{DeleteResult, UpdateResult};
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use crate::models::{InDB, Tuit, User};
use crate::server::{ApiError, ApiResult};

/// Outcome of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    /// A document matched the queried id.
    pub matched: bool,
    /// The matched document actually changed.
    pub modified: bool,
}

impl From<UpdateResult> for UpdateOutcome {
    fn from(res: UpdateResult) -> Self {
        Self {
            matched: res.matched_count > 0,
            modified: res.modified_count > 0,
        }
    }
}

/// Outcome of a delete. Zero deleted documents is a valid outcome, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteOutcome {
    fn from(res: DeleteResult) -> Self {
        Self {
            deleted_count: res.deleted_count,
        }
    }
}

/// Storage operations for the tuits collection.
#[derive(Debug, Clone)]
pub struct TuitDao {
    col: Collection<Tuit>,
}

impl TuitDao {
    pub const fn new(col: Collection<Tuit>) -> Self {
        Self { col }
    }

    /// View of the same collection that carries document ids on reads.
    fn with_id(&self) -> Collection<InDB<Tuit>> {
        self.col.clone_with_type()
    }

    /// All tuits, unbounded.
    ///
    /// # Errors
    /// Fails on database error.
    pub async fn find_all(&self) -> ApiResult<Vec<InDB<Tuit>>> {
        Ok(self.with_id().find(None, None).await?.try_collect().await?)
    }

    /// # Errors
    /// Fails on database error. An unknown id is `None`, not an error.
    pub async fn find_by_id(&self, tid: ObjectId) -> ApiResult<Option<InDB<Tuit>>> {
        Ok(self.with_id().find_one(doc! { "_id": tid }, None).await?)
    }

    /// All tuits whose `postedBy` equals the given user key.
    ///
    /// # Errors
    /// Fails on database error. A user with no tuits yields an empty vec.
    pub async fn find_by_user(&self, uid: &str) -> ApiResult<Vec<InDB<Tuit>>> {
        Ok(self
            .with_id()
            .find(doc! { "postedBy": uid }, None)
            .await?
            .try_collect()
            .await?)
    }

    /// Insert a new tuit authored by `uid`. The route's user key always wins
    /// over whatever `postedBy` the payload carried.
    ///
    /// # Errors
    /// Fails on empty tuit text or database error.
    pub async fn create(&self, uid: &str, mut tuit: Tuit) -> ApiResult<InDB<Tuit>> {
        if tuit.tuit.is_empty() {
            return Err(ApiError::bad_request("Tuit text must not be empty"));
        }
        tuit.posted_by = uid.to_owned();

        let inserted = self.col.insert_one(&tuit, None).await?;
        let id = inserted.inserted_id.as_object_id().ok_or_else(|| {
            tracing::error!(id = ?inserted.inserted_id, "Inserted id is not an ObjectId");
            ApiError::internal()
        })?;

        Ok(InDB::new(id, tuit))
    }

    /// `$set` exactly the supplied fields; omitted fields keep their stored
    /// values.
    ///
    /// # Errors
    /// Fails on database error.
    pub async fn update(&self, tid: ObjectId, changes: Document) -> ApiResult<UpdateOutcome> {
        Ok(self
            .col
            .update_one(doc! { "_id": tid }, doc! { "$set": changes }, None)
            .await?
            .into())
    }

    /// # Errors
    /// Fails on database error.
    pub async fn delete(&self, tid: ObjectId) -> ApiResult<DeleteOutcome> {
        Ok(self.col.delete_one(doc! { "_id": tid }, None).await?.into())
    }
}

/// Storage operations for the users collection.
#[derive(Debug, Clone)]
pub struct UserDao {
    col: Collection<User>,
}

impl UserDao {
    pub const fn new(col: Collection<User>) -> Self {
        Self { col }
    }

    fn with_id(&self) -> Collection<InDB<User>> {
        self.col.clone_with_type()
    }

    /// # Errors
    /// Fails on database error.
    pub async fn find_all(&self) -> ApiResult<Vec<InDB<User>>> {
        Ok(self.with_id().find(None, None).await?.try_collect().await?)
    }

    /// # Errors
    /// Fails on database error.
    pub async fn find_by_id(&self, uid: ObjectId) -> ApiResult<Option<InDB<User>>> {
        Ok(self.with_id().find_one(doc! { "_id": uid }, None).await?)
    }

    /// First user with the given username, if any.
    ///
    /// # Errors
    /// Fails on database error.
    pub async fn find_by_username(&self, username: &str) -> ApiResult<Option<InDB<User>>> {
        Ok(self
            .with_id()
            .find_one(doc! { "username": username }, None)
            .await?)
    }

    /// Equality match on both fields. Passwords are stored as-is, so this is
    /// a straight document lookup.
    ///
    /// # Errors
    /// Fails on database error.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> ApiResult<Option<InDB<User>>> {
        Ok(self
            .with_id()
            .find_one(doc! { "username": username, "password": password }, None)
            .await?)
    }

    /// Insert the supplied user record verbatim.
    ///
    /// # Errors
    /// Fails on database error.
    pub async fn create(&self, user: User) -> ApiResult<InDB<User>> {
        let inserted = self.col.insert_one(&user, None).await?;
        let id = inserted.inserted_id.as_object_id().ok_or_else(|| {
            tracing::error!(id = ?inserted.inserted_id, "Inserted id is not an ObjectId");
            ApiError::internal()
        })?;

        Ok(InDB::new(id, user))
    }

    /// # Errors
    /// Fails on database error.
    pub async fn update(&self, uid: ObjectId, changes: Document) -> ApiResult<UpdateOutcome> {
        Ok(self
            .col
            .update_one(doc! { "_id": uid }, doc! { "$set": changes }, None)
            .await?
            .into())
    }

    /// # Errors
    /// Fails on database error.
    pub async fn delete(&self, uid: ObjectId) -> ApiResult<DeleteOutcome> {
        Ok(self.col.delete_one(doc! { "_id": uid }, None).await?.into())
    }

    /// Unconditional bulk delete.
    ///
    /// # Errors
    /// Fails on database error.
    pub async fn delete_all(&self) -> ApiResult<DeleteOutcome> {
        Ok(self.col.delete_many(doc! {}, None).await?.into())
    }

    /// Bulk delete of every user with the given username.
    ///
    /// # Errors
    /// Fails on database error.
    pub async fn delete_by_username(&self, username: &str) -> ApiResult<DeleteOutcome> {
        Ok(self
            .col
            .delete_many(doc! { "username": username }, None)
            .await?
            .into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, to_value};

    use super::*;

    #[test]
    fn outcomes_serialize_with_wire_names() {
        let update = UpdateOutcome {
            matched: true,
            modified: false,
        };
        assert_eq!(
            to_value(update).unwrap(),
            json!({ "matched": true, "modified": false })
        );

        let delete = DeleteOutcome { deleted_count: 2 };
        assert_eq!(to_value(delete).unwrap(), json!({ "deletedCount": 2 }));
    }
}

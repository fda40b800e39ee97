//! Models for the tuits and users collections.
//!
//! These are passive document shapes: serde attributes carry the wire names
//! and the insert-time defaults, nothing here touches the database.
use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};

/// A short text post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tuit {
    /// Body of the post. Required: a payload without it is rejected.
    pub tuit: String,
    /// Key of the posting user. Weak reference: deleting the user leaves
    /// their tuits in place.
    #[serde(default)]
    pub posted_by: String,
    /// Instant the post was created.
    #[serde(default = "Utc::now")]
    pub posted_on: DateTime<Utc>,
    /// Attached image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Embedded youtube link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_overlay: Option<String>,
    /// Engagement counters.
    #[serde(default)]
    pub stats: TuitStats,
}

/// Counters embedded in every tuit. All start at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuitStats {
    pub replies: i64,
    pub retuits: i64,
    pub likes: i64,
    pub dislikes: i64,
    /// Whether the viewing user has liked the tuit. Kept as a counter to
    /// match the stored document shape.
    pub current_user_like: i64,
    pub current_user_dislike: i64,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    /// Stored verbatim; credential lookup is a plain equality match.
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    /// Instant the account was created.
    #[serde(default = "Utc::now")]
    pub joined: DateTime<Utc>,
}

/// Credential pair for the login lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Wrapper for a model stored in `MongoDB`, carrying its assigned `ObjectId`.
///
/// The id serializes to JSON as a plain hex string rather than the extended
/// JSON `{"$oid": ..}` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InDB<T> {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    id: ObjectId,
    #[serde(flatten)]
    inner: T,
}

impl<T> InDB<T> {
    pub const fn new(id: ObjectId, inner: T) -> Self {
        Self { id, inner }
    }

    /// Get the `ObjectId`.
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Get the inner body.
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> Deref for InDB<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> DerefMut for InDB<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{from_document, to_document};
    use serde_json::{from_value, json, to_value, Value};

    use super::*;

    #[test]
    fn partial_payload_gets_defaults() {
        let before = Utc::now();
        let tuit: Tuit = from_value(json!({ "tuit": "hello" })).unwrap();

        assert_eq!(tuit.tuit, "hello");
        assert_eq!(tuit.posted_by, "");
        assert_eq!(tuit.stats, TuitStats::default());
        assert!(tuit.posted_on >= before);
        assert!(tuit.image.is_none() && tuit.youtube.is_none());
    }

    #[test]
    fn stats_default_to_zero() {
        let stats = TuitStats::default();
        assert_eq!(
            to_value(stats).unwrap(),
            json!({
                "replies": 0,
                "retuits": 0,
                "likes": 0,
                "dislikes": 0,
                "currentUserLike": 0,
                "currentUserDislike": 0,
            })
        );
    }

    #[test]
    fn text_is_required() {
        assert!(from_value::<Tuit>(json!({ "postedBy": "u1" })).is_err());
    }

    #[test]
    fn absent_media_fields_are_omitted() {
        let tuit: Tuit = from_value(json!({ "tuit": "hi" })).unwrap();
        let value = to_value(tuit).unwrap();
        let object = value.as_object().unwrap();

        for key in ["tuit", "postedBy", "postedOn", "stats"] {
            assert!(object.contains_key(key), "missing `{key}`");
        }
        assert_eq!(object.len(), 4, "media fields should be omitted");
    }

    #[test]
    fn in_db_id_renders_as_hex_string() {
        let id = ObjectId::parse_str("62a1d1cbf4b9d2a0e8c5b000").unwrap();
        let wrapped = InDB::new(id, Credentials {
            username: "nasa".to_owned(),
            password: "space".to_owned(),
        });

        assert_eq!(
            to_value(&wrapped).unwrap(),
            json!({
                "_id": "62a1d1cbf4b9d2a0e8c5b000",
                "username": "nasa",
                "password": "space",
            })
        );
    }

    #[test]
    fn in_db_roundtrips_through_bson() {
        let tuit: Tuit = from_value(json!({ "tuit": "hello", "postedBy": "u1" })).unwrap();
        let id = ObjectId::new();
        let mut document = to_document(&tuit).unwrap();
        document.insert("_id", id);

        let read: InDB<Tuit> = from_document(document).unwrap();
        assert_eq!(read.id(), id);
        assert_eq!(read.into_inner(), tuit);
    }

    #[test]
    fn user_roundtrips_with_profile_fields() {
        let user: User = from_value(json!({
            "username": "nasa",
            "password": "space",
            "email": "nasa@nasa.gov",
        }))
        .unwrap();

        let value = to_value(&user).unwrap();
        assert_eq!(value["username"], Value::from("nasa"));
        assert_eq!(value["email"], Value::from("nasa@nasa.gov"));
        assert!(value.as_object().unwrap().get("firstName").is_none());

        let read: User = from_document(to_document(&user).unwrap()).unwrap();
        assert_eq!(read, user);
    }
}

//! Record types mirrored from the remote service.

use crate::{error::Result, Error, PostId, StudentId, UserId};
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Highest grade a student can receive.
pub const MAX_GRADE: u8 = 12;

/// Image file extensions the remote service accepts.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Where a newly created record lands in its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    /// Most recent first (feed ordering)
    Head,
    /// Registration order
    Tail,
}

/// A record kept in a collection.
///
/// The identifier is assigned by the remote service and never changes locally.
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Id: Clone
        + fmt::Debug
        + fmt::Display
        + Eq
        + Hash
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Collection key used in snapshots and logs.
    const COLLECTION: &'static str;

    /// Placement policy for created records.
    const INSERT_AT: InsertAt;

    fn id(&self) -> &Self::Id;
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Entity for User {
    type Id = UserId;
    const COLLECTION: &'static str = "users";
    const INSERT_AT: InsertAt = InsertAt::Tail;

    fn id(&self) -> &UserId {
        &self.id
    }
}

/// Attendance mark for a student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendStatus {
    Present,
    Late,
    #[default]
    None,
}

impl AttendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendStatus::Present => "present",
            AttendStatus::Late => "late",
            AttendStatus::None => "none",
        }
    }
}

impl fmt::Display for AttendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "present" => Ok(AttendStatus::Present),
            "late" => Ok(AttendStatus::Late),
            "none" => Ok(AttendStatus::None),
            other => Err(Error::UnknownAttendStatus(other.to_string())),
        }
    }
}

/// A student on the class roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub attend: AttendStatus,
    #[serde(default)]
    pub grade: u8,
    #[serde(default)]
    pub online: bool,
}

impl Student {
    /// A freshly enrolled student: unmarked, grade 0, offline.
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attend: AttendStatus::None,
            grade: 0,
            online: false,
        }
    }
}

impl Entity for Student {
    type Id = StudentId;
    const COLLECTION: &'static str = "students";
    const INSERT_AT: InsertAt = InsertAt::Tail;

    fn id(&self) -> &StudentId {
        &self.id
    }
}

/// Check a grade before issuing an update.
///
/// Stores apply whatever the service returns, so range checks belong to the caller.
pub fn validate_grade(grade: i64) -> Result<u8> {
    match u8::try_from(grade) {
        Ok(g) if g <= MAX_GRADE => Ok(g),
        _ => Err(Error::GradeOutOfRange(grade)),
    }
}

/// A post in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    /// External image link
    #[serde(default)]
    pub image_url: Option<String>,
    /// Name of an uploaded image served under `/uploads`
    #[serde(default)]
    pub image_file: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Entity for Post {
    type Id = PostId;
    const COLLECTION: &'static str = "posts";
    const INSERT_AT: InsertAt = InsertAt::Head;

    fn id(&self) -> &PostId {
        &self.id
    }
}

/// Payload for creating a post.
///
/// No field is checked locally: empty titles reach the service as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Partial update for a post. Unset fields are left untouched by the service.
///
/// `image_url: Some(None)` clears the link (and any uploaded file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "explicit_null"
    )]
    pub image_url: Option<Option<String>>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.author.is_none()
            && self.image_url.is_none()
    }
}

/// Distinguish `"image_url": null` from a missing key.
fn explicit_null<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// An image attached to a post create or update.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Lowercased extension, if it is one the service accepts.
    pub fn extension(&self) -> Result<String> {
        image_extension(&self.file_name)
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Lowercased extension of an image file name, validated against [`IMAGE_EXTENSIONS`].
pub fn image_extension(file_name: &str) -> Result<String> {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(Error::UnsupportedImage(file_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn student_wire_format() {
        let student: Student = serde_json::from_value(json!({
            "id": 1,
            "name": "Ann",
            "attend": "late",
            "grade": 9,
            "online": true
        }))
        .unwrap();

        assert_eq!(student.attend, AttendStatus::Late);
        assert_eq!(student.grade, 9);
        assert!(student.online);

        let defaults: Student = serde_json::from_value(json!({"id": 2, "name": "Bo"})).unwrap();
        assert_eq!(defaults, Student::new(2, "Bo"));
    }

    #[test]
    fn attend_status_parse() {
        assert_eq!("present".parse::<AttendStatus>(), Ok(AttendStatus::Present));
        assert_eq!("none".parse::<AttendStatus>(), Ok(AttendStatus::None));
        assert!(matches!(
            "absent".parse::<AttendStatus>(),
            Err(Error::UnknownAttendStatus(_))
        ));
        assert_eq!(AttendStatus::Late.to_string(), "late");
    }

    #[test]
    fn grade_bounds() {
        assert_eq!(validate_grade(0), Ok(0));
        assert_eq!(validate_grade(12), Ok(12));
        assert_eq!(validate_grade(13), Err(Error::GradeOutOfRange(13)));
        assert_eq!(validate_grade(-1), Err(Error::GradeOutOfRange(-1)));
    }

    #[test]
    fn post_patch_serializes_only_set_fields() {
        let patch = PostPatch {
            title: Some("New".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"title": "New"}));

        let clear = PostPatch {
            image_url: Some(None),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&clear).unwrap(), json!({"image_url": null}));

        let parsed: PostPatch = serde_json::from_value(json!({"image_url": null})).unwrap();
        assert_eq!(parsed.image_url, Some(None));
        let parsed: PostPatch = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn image_extensions() {
        assert_eq!(image_extension("Cat.JPG"), Ok("jpg".to_string()));
        assert_eq!(ImageUpload::new("a.webp", vec![1, 2]).extension(), Ok("webp".into()));
        assert!(image_extension("notes.txt").is_err());
        assert!(image_extension("no_extension").is_err());
    }

    #[test]
    fn insert_policies() {
        assert_eq!(Post::INSERT_AT, InsertAt::Head);
        assert_eq!(User::INSERT_AT, InsertAt::Tail);
        assert_eq!(Student::COLLECTION, "students");
    }
}

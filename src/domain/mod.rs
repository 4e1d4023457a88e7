//! Gallery domain model
//!
//! Entities are plain records. Query code reaches their columns through
//! [`Record::field`] and their associations through [`Relation`], never
//! through the concrete struct.

mod album;
mod photo;
mod tag;
mod user;

pub use album::Album;
pub use photo::Photo;
pub use tag::Tag;
pub use user::User;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::filter::Value;

/// Queryable entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    User,
    Album,
    Photo,
    Tag,
}

impl EntityKind {
    /// Returns the singular entity name
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Album => "album",
            EntityKind::Photo => "photo",
            EntityKind::Tag => "tag",
        }
    }

    /// Returns the collection name used in REST paths
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Album => "albums",
            EntityKind::Photo => "photos",
            EntityKind::Tag => "tags",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Association cardinality as seen from the source entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Direct reference held by the source row
    ManyToOne,
    /// Membership through a link table
    ManyToMany,
}

/// Joinable associations between entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    /// Album.user
    AlbumUser,
    /// Photo.album
    PhotoAlbum,
    /// Photo.tags (owning side of the photo/tag link)
    PhotoTags,
    /// Tag.photos (inverse side of the photo/tag link)
    TagPhotos,
}

impl Relation {
    /// Returns the association name on the source entity
    pub fn name(&self) -> &'static str {
        match self {
            Relation::AlbumUser => "user",
            Relation::PhotoAlbum => "album",
            Relation::PhotoTags => "tags",
            Relation::TagPhotos => "photos",
        }
    }

    /// Returns the entity the association starts from
    pub fn source(&self) -> EntityKind {
        match self {
            Relation::AlbumUser => EntityKind::Album,
            Relation::PhotoAlbum | Relation::PhotoTags => EntityKind::Photo,
            Relation::TagPhotos => EntityKind::Tag,
        }
    }

    /// Returns the entity the association joins to
    pub fn target(&self) -> EntityKind {
        match self {
            Relation::AlbumUser => EntityKind::User,
            Relation::PhotoAlbum => EntityKind::Album,
            Relation::PhotoTags => EntityKind::Tag,
            Relation::TagPhotos => EntityKind::Photo,
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            Relation::AlbumUser | Relation::PhotoAlbum => Cardinality::ManyToOne,
            Relation::PhotoTags | Relation::TagPhotos => Cardinality::ManyToMany,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.source(), self.name())
    }
}

/// Column access for condition evaluation.
///
/// `None` stands for SQL NULL. Unknown column names also read as NULL.
pub trait Record {
    fn field(&self, name: &str) -> Option<Value>;
}

/// A persistent gallery entity
pub trait Entity:
    Record + Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: EntityKind;

    /// Returns the identifier, `None` until first saved
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// Fills server-assigned columns of a new entity
    fn on_create(&mut self, _now: DateTime<Utc>) {}

    /// Checks column constraints before a write
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

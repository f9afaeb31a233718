//! Hero record - the single entity managed by the hero API
//!
//! Heroes are created by the backing store (which assigns the id), read,
//! replaced in full, and removed. Nothing here enforces id uniqueness; the
//! store owns that invariant.

use serde::{Deserialize, Serialize};

use crate::HeroId;

/// A hero as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
}

impl Hero {
    pub fn new(id: impl Into<HeroId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Partial hero used for creation; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHero {
    pub name: String,
}

impl NewHero {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Target of a delete: either a full record or a bare identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroRef {
    Record(Hero),
    Id(HeroId),
}

impl HeroRef {
    pub fn id(&self) -> HeroId {
        match self {
            HeroRef::Record(hero) => hero.id,
            HeroRef::Id(id) => *id,
        }
    }
}

impl From<Hero> for HeroRef {
    fn from(hero: Hero) -> Self {
        HeroRef::Record(hero)
    }
}

impl From<&Hero> for HeroRef {
    fn from(hero: &Hero) -> Self {
        HeroRef::Record(hero.clone())
    }
}

impl From<HeroId> for HeroRef {
    fn from(id: HeroId) -> Self {
        HeroRef::Id(id)
    }
}

impl From<i64> for HeroRef {
    fn from(id: i64) -> Self {
        HeroRef::Id(HeroId::new(id))
    }
}

//! Resource kinds and per-kind storage.
//!
//! Every player holds a stockpile and a production rate for each of the
//! three resource kinds. `ResourceMap` keeps the three values together and
//! is indexed by `ResourceKind`, so effect code never branches on the kind.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// The three resource kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Bricks,
    Gems,
    Recruits,
}

impl ResourceKind {
    /// All kinds, in canonical order.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Bricks,
        ResourceKind::Gems,
        ResourceKind::Recruits,
    ];

    /// Name of the building that produces this resource.
    #[must_use]
    pub const fn producer(self) -> &'static str {
        match self {
            ResourceKind::Bricks => "quarry",
            ResourceKind::Gems => "magic",
            ResourceKind::Recruits => "dungeon",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Bricks => "bricks",
            ResourceKind::Gems => "gems",
            ResourceKind::Recruits => "recruits",
        };
        f.write_str(name)
    }
}

/// One value per resource kind.
///
/// ```
/// use rust_arcomag::core::{ResourceKind, ResourceMap};
///
/// let mut stock = ResourceMap::uniform(5);
/// stock[ResourceKind::Gems] += 3;
///
/// assert_eq!(stock[ResourceKind::Gems], 8);
/// assert_eq!(stock.iter().map(|(_, v)| *v).sum::<i32>(), 18);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceMap<T> {
    pub bricks: T,
    pub gems: T,
    pub recruits: T,
}

impl<T> ResourceMap<T> {
    /// Create a map from explicit values.
    pub const fn new(bricks: T, gems: T, recruits: T) -> Self {
        Self {
            bricks,
            gems,
            recruits,
        }
    }

    /// Create a map with every kind set to the same value.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value.clone(), value)
    }

    /// Iterate over (kind, &value) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &T)> {
        [
            (ResourceKind::Bricks, &self.bricks),
            (ResourceKind::Gems, &self.gems),
            (ResourceKind::Recruits, &self.recruits),
        ]
        .into_iter()
    }
}

impl<T> Index<ResourceKind> for ResourceMap<T> {
    type Output = T;

    fn index(&self, kind: ResourceKind) -> &Self::Output {
        match kind {
            ResourceKind::Bricks => &self.bricks,
            ResourceKind::Gems => &self.gems,
            ResourceKind::Recruits => &self.recruits,
        }
    }
}

impl<T> IndexMut<ResourceKind> for ResourceMap<T> {
    fn index_mut(&mut self, kind: ResourceKind) -> &mut Self::Output {
        match kind {
            ResourceKind::Bricks => &mut self.bricks,
            ResourceKind::Gems => &mut self.gems,
            ResourceKind::Recruits => &mut self.recruits,
        }
    }
}

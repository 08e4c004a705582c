//! In-memory model the tool can run against without a modelling host.

mod workspace;

pub use workspace::{AppliedOperation, Workspace, WorkspaceConfig};

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{Result, SceneError};
use crate::math::{transform_point, Matrix4, Point3};

slotmap::new_key_type! {
    /// Unique identifier for an entity in the scene.
    pub struct EntityId;
}

/// A piece of geometry, stored as its vertex positions.
#[derive(Debug, Clone)]
pub struct EntityData {
    pub vertices: Vec<Point3>,
}

impl EntityData {
    /// Creates an entity from its vertices.
    #[must_use]
    pub fn new(vertices: Vec<Point3>) -> Self {
        Self { vertices }
    }
}

/// A set of entities the tool transforms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entities: Vec<EntityId>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity, ignoring duplicates.
    pub fn add(&mut self, id: EntityId) {
        if !self.entities.contains(&id) {
            self.entities.push(id);
        }
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().copied()
    }
}

impl FromIterator<EntityId> for Selection {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.add(id);
        }
        selection
    }
}

/// Arena that owns all entities.
#[derive(Debug, Default)]
pub struct Scene {
    entities: SlotMap<EntityId, EntityData>,
}

impl Scene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entity and returns its ID.
    pub fn add_entity(&mut self, data: EntityData) -> EntityId {
        self.entities.insert(data)
    }

    /// Returns a reference to the entity data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn entity(&self, id: EntityId) -> Result<&EntityData> {
        self.entities
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound(format!("{id:?}")).into())
    }

    /// Iterates over every vertex in the scene.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3> {
        self.entities.values().flat_map(|e| e.vertices.iter())
    }

    /// Transforms every vertex of every selected entity.
    ///
    /// Nothing is modified unless every selected entity exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection names a missing entity.
    pub fn transform_entities(&mut self, matrix: &Matrix4, selection: &Selection) -> Result<()> {
        for id in selection.iter() {
            self.entity(id)?;
        }

        for id in selection.iter() {
            if let Some(entity) = self.entities.get_mut(id) {
                for vertex in &mut entity.vertices {
                    *vertex = transform_point(matrix, vertex);
                }
            }
        }
        debug!(entities = selection.len(), "transformed selection");
        Ok(())
    }
}

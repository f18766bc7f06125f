//! Scene object list and render-pass snapshots.
//!
//! The scene is the only owner of its objects. A render pass never reads the
//! live list; it reads a [`SceneSnapshot`] taken before work is distributed,
//! so adding or removing objects while a pass is in flight cannot race with
//! the tracer.

use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use crate::description::{SceneDescription, SceneError};
use crate::shape::Shape;

/// Immutable view of a scene's objects for one render pass.
///
/// Cloning is cheap: snapshots share their object storage.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSnapshot {
    objects: Arc<[Shape]>,
}

impl SceneSnapshot {
    /// Create a snapshot from a list of objects.
    pub fn new(objects: Vec<Shape>) -> Self {
        Self {
            objects: objects.into(),
        }
    }

    /// A snapshot with no objects.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Objects in scene insertion order.
    pub fn objects(&self) -> &[Shape] {
        &self.objects
    }
}

impl Deref for SceneSnapshot {
    type Target = [Shape];

    fn deref(&self) -> &[Shape] {
        &self.objects
    }
}

impl From<Vec<Shape>> for SceneSnapshot {
    fn from(objects: Vec<Shape>) -> Self {
        Self::new(objects)
    }
}

/// An ordered collection of scene objects.
///
/// Insertion order is preserved and duplicates are allowed.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    objects: Vec<Shape>,

    // Invalidated on every structural change.
    snapshot: OnceLock<SceneSnapshot>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build a scene from a parsed description, validating every object.
    pub fn from_description<R>(description: &SceneDescription<R>) -> Result<Self, SceneError> {
        let mut scene = Scene::new(description.name.clone());
        for (index, shape) in description.objects.iter().enumerate() {
            let shape = shape
                .clone()
                .validated()
                .map_err(|source| SceneError::InvalidShape { index, source })?;
            log::debug!("Scene '{}' object #{}: {}", scene.name, index, shape.kind());
            scene.add(shape);
        }

        log::info!("Built scene '{}' with {} objects", scene.name, scene.len());
        Ok(scene)
    }

    /// Append an object to the scene.
    pub fn add(&mut self, object: impl Into<Shape>) {
        self.objects.push(object.into());
        self.invalidate();
    }

    /// Remove the first object equal to `object`.
    ///
    /// Returns false (and leaves the scene untouched) if no such object exists.
    pub fn remove(&mut self, object: &Shape) -> bool {
        match self.objects.iter().position(|o| o == object) {
            Some(index) => {
                self.objects.remove(index);
                self.invalidate();
                true
            }
            None => false,
        }
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.invalidate();
    }

    /// Take an immutable snapshot of the current objects.
    ///
    /// Later calls to [`Scene::add`] or [`Scene::remove`] never affect a
    /// snapshot already handed out. Repeated snapshots of an unchanged scene
    /// share storage.
    pub fn snapshot(&self) -> SceneSnapshot {
        self.snapshot
            .get_or_init(|| {
                log::debug!("Snapshotting scene '{}' ({} objects)", self.name, self.objects.len());
                SceneSnapshot::new(self.objects.clone())
            })
            .clone()
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> &[Shape] {
        &self.objects
    }

    /// Get object count.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn invalidate(&mut self) {
        self.snapshot = OnceLock::new();
    }
}

//! Host document: named mount points a surface can be attached to.

use std::collections::HashMap;

/// A named location in the host where a widget lays itself out.
#[derive(Debug, Clone, PartialEq)]
pub struct MountPoint {
    id: String,
    /// Client-coordinate origin of the mount's content box
    origin: (f64, f64),
}

impl MountPoint {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }
}

/// Registry of mount points, keyed by id.
#[derive(Debug, Default, Clone)]
pub struct Document {
    mounts: HashMap<String, MountPoint>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or moves) a mount point at the given client origin.
    pub fn add_mount(&mut self, id: impl Into<String>, x: f64, y: f64) -> &MountPoint {
        let id = id.into();
        log::debug!("Registering mount point '{id}' at ({x}, {y})");
        self.mounts
            .entry(id.clone())
            .and_modify(|mount| mount.origin = (x, y))
            .or_insert(MountPoint {
                id,
                origin: (x, y),
            })
    }

    /// Builder form of [`Document::add_mount`].
    pub fn with_mount(mut self, id: impl Into<String>, x: f64, y: f64) -> Self {
        self.add_mount(id, x, y);
        self
    }

    pub fn mount_point(&self, id: &str) -> Option<&MountPoint> {
        self.mounts.get(id)
    }
}

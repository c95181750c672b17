use super::mesh::RibbonMesh;

/// Holds the live ribbon geometry.
///
/// `replace` drops the previous mesh before installing the new one, so at
/// most one buffer set is alive between ticks. The generation counter tells
/// the renderer when to re-upload.
#[derive(Debug, Default)]
pub struct GeometrySlot {
    current: Option<RibbonMesh>,
    generation: u64,
    released: u64,
}

impl GeometrySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, mesh: RibbonMesh) {
        if let Some(old) = self.current.take() {
            drop(old);
            self.released += 1;
        }
        self.current = Some(mesh);
        self.generation += 1;
        log::trace!("ribbon geometry generation {}", self.generation);
    }

    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            self.released += 1;
            self.generation += 1;
        }
    }

    pub fn current(&self) -> Option<&RibbonMesh> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Meshes dropped so far.
    pub fn released(&self) -> u64 {
        self.released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_releases_previous_mesh() {
        let mut slot = GeometrySlot::new();
        assert!(slot.current().is_none());
        slot.replace(RibbonMesh::default());
        assert_eq!((slot.generation(), slot.released()), (1, 0));
        for _ in 0..10 {
            slot.replace(RibbonMesh::default());
        }
        assert_eq!((slot.generation(), slot.released()), (11, 10));
        // live meshes = replaced - released
        assert_eq!(slot.generation() - slot.released(), 1);
    }

    #[test]
    fn clear_drops_current() {
        let mut slot = GeometrySlot::new();
        slot.replace(RibbonMesh::default());
        slot.clear();
        assert!(slot.current().is_none());
        assert_eq!(slot.released(), 1);
        slot.clear();
        assert_eq!(slot.released(), 1);
    }
}

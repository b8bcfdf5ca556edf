use std::collections::HashMap;

use crate::marker::{Marker, MarkerId};

/// Markers for each background image, keyed by image index. Insertion order
/// is both paint order and hit-test priority.
#[derive(Default)]
pub struct AnnotationStore {
    lists: HashMap<usize, Vec<Marker>>,
}

impl AnnotationStore {
    /// The list for `image`, created empty on first access. Lists are never
    /// dropped, even once emptied.
    pub fn list_for(&mut self, image: usize) -> &mut Vec<Marker> {
        self.lists.entry(image).or_default()
    }

    pub fn get(&self, image: usize) -> &[Marker] {
        self.lists.get(&image).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find_mut(&mut self, image: usize, id: MarkerId) -> Option<&mut Marker> {
        self.lists.get_mut(&image)?.iter_mut().find(|m| m.id() == id)
    }

    /// Remove by identity, wherever the marker currently sits in the list.
    pub fn remove(&mut self, image: usize, id: MarkerId) -> Option<Marker> {
        let list = self.lists.get_mut(&image)?;
        let index = list.iter().position(|m| m.id() == id)?;
        Some(list.remove(index))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut Vec<Marker>)> {
        self.lists.iter_mut().map(|(image, list)| (*image, list))
    }

    #[cfg(test)]
    pub fn has_list(&self, image: usize) -> bool {
        self.lists.contains_key(&image)
    }
}

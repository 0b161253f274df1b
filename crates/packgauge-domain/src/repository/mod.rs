//! Repository trait definitions for data persistence
//!
//! The constraint engine never writes through these traits itself. Adding
//! contents takes an admission check that the implementation runs against
//! the container as stored at the moment of the write, so competing writers
//! cannot both pass on a stale total.

use packgauge_types::Error;

use crate::model::{Container, ContentLink, Item};

/// Repository for containers and the items packed into them
pub trait ContainerRepository {
    /// Find a container with its contents resolved into item snapshots
    fn find_container(&self, id: &str) -> Result<Option<Container>, Error>;

    /// Find all containers, ordered by name
    fn find_all_containers(&self) -> Result<Vec<Container>, Error>;

    /// Save container attributes. Existing contents are preserved.
    fn save_container(&self, container: &Container) -> Result<(), Error>;

    /// Find an item in the catalogue
    fn find_item(&self, id: &str) -> Result<Option<Item>, Error>;

    /// Find all catalogue items, ordered by name
    fn find_all_items(&self) -> Result<Vec<Item>, Error>;

    /// Save a catalogue item
    fn save_item(&self, item: &Item) -> Result<(), Error>;

    /// Associate items with a container in one write, adding to any quantity
    /// already held.
    ///
    /// `admit` is called with the current container, atomically with the
    /// write; an error from it aborts the write and is returned unchanged.
    fn add_contents(
        &self,
        container_id: &str,
        links: &[ContentLink],
        admit: &dyn Fn(&Container) -> Result<(), Error>,
    ) -> Result<(), Error>;

    /// Reduce the quantity held, dropping the association when it reaches 0.
    /// Returns `false` when the container does not hold the item.
    fn remove_contents(&self, container_id: &str, link: &ContentLink) -> Result<bool, Error>;
}

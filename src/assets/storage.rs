//! Asset storage and management
//!
//! One generic, name-keyed registry, instantiated once per payload type.

use std::fs::File;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::error::AssetError;
use super::kind::classify;
use super::resource::{AssetResource, CollisionPolicy, Payload};

/// Name-keyed storage for all assets of one payload type
///
/// Entries are created only by a successful load (or an explicit
/// [`Registry::replace`]) and destroyed only by [`Registry::remove`] or
/// [`Registry::clear`]. Iteration order is unspecified.
pub struct Registry<P: Payload> {
    /// Assets indexed by their name
    assets: FxHashMap<String, AssetResource<P>>,
    /// Directory relative paths are opened from
    root: Option<PathBuf>,
}

impl<P: Payload> Registry<P> {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: FxHashMap::default(),
            root: None,
        }
    }

    /// Create an empty registry that opens relative paths from `root`
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            assets: FxHashMap::default(),
            root: Some(root.into()),
        }
    }

    /// Set or clear the root directory
    pub fn set_root(&mut self, root: Option<PathBuf>) {
        self.root = root;
    }

    /// The root directory, if any
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// What happens when a load reuses a name
    #[must_use]
    pub const fn collision_policy(&self) -> CollisionPolicy {
        P::ON_COLLISION
    }

    /// Load an asset with explicit decoder options and store it under `name`.
    ///
    /// A failed load leaves the registry exactly as it was. A successful
    /// load over an existing name drops the displaced entry, which closes
    /// a displaced stream's file handle.
    ///
    /// # Errors
    ///
    /// - [`AssetError::InvalidFileFormat`] if the extension is unknown
    /// - [`AssetError::UnsupportedAssetType`] if this category cannot decode the kind
    /// - [`AssetError::AssetAlreadyExists`] on a duplicate name under reject-on-collision
    /// - [`AssetError::Io`] if the file cannot be opened
    /// - [`AssetError::Decode`] if the content is malformed
    pub fn load_with(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
        options: &P::Options,
    ) -> Result<&AssetResource<P>, AssetError> {
        let name = name.into();
        let path = path.as_ref();

        let classified = classify(path)?;
        let kind = P::accept(classified).ok_or(AssetError::UnsupportedAssetType {
            kind: classified,
            category: P::CATEGORY,
        })?;

        if P::ON_COLLISION == CollisionPolicy::RejectOnCollision && self.assets.contains_key(&name)
        {
            return Err(AssetError::AssetAlreadyExists { name });
        }

        let file = File::open(self.resolve(path))?;
        let data = P::decode(kind, Box::new(file), options)?;

        log::debug!(
            "Loaded {} '{name}' ({kind}) from {}",
            P::CATEGORY,
            path.display()
        );

        let resource =
            AssetResource::from_parts(kind, name.clone(), path.to_string_lossy().into_owned(), data);
        self.assets.insert(name.clone(), resource);
        Ok(&self.assets[&name])
    }

    /// Get an asset by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AssetResource<P>> {
        self.assets.get(name)
    }

    /// Get a mutable reference to an asset by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut AssetResource<P>> {
        self.assets.get_mut(name)
    }

    /// The live backing map
    #[must_use]
    pub const fn get_all(&self) -> &FxHashMap<String, AssetResource<P>> {
        &self.assets
    }

    /// Check if an asset exists by name
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    /// Remove an asset by name and hand it back.
    ///
    /// A stream payload is returned still open; closing it is up to the caller.
    pub fn remove(&mut self, name: &str) -> Option<AssetResource<P>> {
        let removed = self.assets.remove(name);
        if removed.is_some() {
            log::debug!("Removed {} '{name}'", P::CATEGORY);
        }
        removed
    }

    /// Store `resource` under `name`, overwriting any previous entry.
    ///
    /// The envelope's name is set to `name`. Returns the replaced entry.
    pub fn replace(
        &mut self,
        name: impl Into<String>,
        mut resource: AssetResource<P>,
    ) -> Option<AssetResource<P>> {
        let name = name.into();
        resource.set_name(name.clone());
        self.assets.insert(name, resource)
    }

    /// Move the entry stored under `old` to `new`, keeping kind, path and data.
    ///
    /// An existing entry under `new` is overwritten. Returns `false` and
    /// does nothing if `old` is absent.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> bool {
        let new = new.into();
        if old == new {
            return self.assets.contains_key(old);
        }
        let Some(mut resource) = self.assets.remove(old) else {
            return false;
        };
        log::debug!("Renamed {} '{old}' to '{new}'", P::CATEGORY);
        resource.set_name(new.clone());
        self.assets.insert(new, resource);
        true
    }

    /// Visit every entry once, in unspecified order
    pub fn for_each(&self, mut visitor: impl FnMut(&str, &AssetResource<P>)) {
        for (name, resource) in &self.assets {
            visitor(name, resource);
        }
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetResource<P>)> + '_ {
        self.assets
            .iter()
            .map(|(name, resource)| (name.as_str(), resource))
    }

    /// Iterate over all names
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.assets.keys().map(String::as_str)
    }

    /// Get the number of stored assets
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if storage is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Clear all assets
    pub fn clear(&mut self) {
        if !self.assets.is_empty() {
            log::debug!("Cleared {} {} assets", self.assets.len(), P::CATEGORY);
        }
        self.assets.clear();
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl<P: Payload> Registry<P>
where
    P::Options: Default,
{
    /// Load an asset with default decoder options.
    ///
    /// # Errors
    ///
    /// See [`Registry::load_with`].
    pub fn load(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<&AssetResource<P>, AssetError> {
        self.load_with(name, path, &P::Options::default())
    }
}

impl<P: Payload> Default for Registry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload> std::fmt::Debug for Registry<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("category", &P::CATEGORY)
            .field("len", &self.assets.len())
            .field("root", &self.root)
            .finish()
    }
}

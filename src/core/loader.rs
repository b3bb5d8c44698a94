//! The composite asset loader
//!
//! [`AssetLoader`] owns one [`Registry`] per category and forwards to it.
//! Names are scoped per category, so `"click"` may be both a clip and a
//! texture. The category-agnostic operations build their flat views on
//! demand.

use std::path::Path;

use super::config::LoaderConfig;
use super::manifest::AssetManifest;
use crate::assets::{AssetError, AssetKind, AssetResource, Category, Payload, Registry};
use crate::audio::{AudioClipAsset, AudioStreamAsset};
use crate::font::{FontAsset, FontOptions};
use crate::texture::TextureAsset;

/// A borrowed asset of any category
#[derive(Debug, Clone, Copy)]
pub enum AssetRef<'a> {
    Texture(&'a AssetResource<TextureAsset>),
    AudioClip(&'a AssetResource<AudioClipAsset>),
    AudioStream(&'a AssetResource<AudioStreamAsset>),
    Font(&'a AssetResource<FontAsset>),
}

impl AssetRef<'_> {
    /// Category of the referenced asset
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Texture(_) => Category::Texture,
            Self::AudioClip(_) => Category::AudioClip,
            Self::AudioStream(_) => Category::AudioStream,
            Self::Font(_) => Category::Font,
        }
    }

    /// Media type of the referenced asset
    #[must_use]
    pub const fn kind(&self) -> AssetKind {
        match self {
            Self::Texture(r) => r.kind(),
            Self::AudioClip(r) => r.kind(),
            Self::AudioStream(r) => r.kind(),
            Self::Font(r) => r.kind(),
        }
    }

    /// Name of the referenced asset
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Texture(r) => r.name(),
            Self::AudioClip(r) => r.name(),
            Self::AudioStream(r) => r.name(),
            Self::Font(r) => r.name(),
        }
    }

    /// Path the referenced asset was loaded from
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Texture(r) => r.path(),
            Self::AudioClip(r) => r.path(),
            Self::AudioStream(r) => r.path(),
            Self::Font(r) => r.path(),
        }
    }
}

/// Payload types an [`AssetLoader`] has a registry for
pub trait Stored: Payload {
    /// The loader's registry for this payload
    fn registry(loader: &AssetLoader) -> &Registry<Self>;

    /// Mutable access to the loader's registry for this payload
    fn registry_mut(loader: &mut AssetLoader) -> &mut Registry<Self>;
}

impl Stored for TextureAsset {
    fn registry(loader: &AssetLoader) -> &Registry<Self> {
        &loader.textures
    }

    fn registry_mut(loader: &mut AssetLoader) -> &mut Registry<Self> {
        &mut loader.textures
    }
}

impl Stored for AudioClipAsset {
    fn registry(loader: &AssetLoader) -> &Registry<Self> {
        &loader.audio_clips
    }

    fn registry_mut(loader: &mut AssetLoader) -> &mut Registry<Self> {
        &mut loader.audio_clips
    }
}

impl Stored for AudioStreamAsset {
    fn registry(loader: &AssetLoader) -> &Registry<Self> {
        &loader.audio_streams
    }

    fn registry_mut(loader: &mut AssetLoader) -> &mut Registry<Self> {
        &mut loader.audio_streams
    }
}

impl Stored for FontAsset {
    fn registry(loader: &AssetLoader) -> &Registry<Self> {
        &loader.fonts
    }

    fn registry_mut(loader: &mut AssetLoader) -> &mut Registry<Self> {
        &mut loader.fonts
    }
}

/// Generates the named per-category operations
macro_rules! family_methods {
    ($payload:ty, $field:ident, $label:literal, $get:ident, $remove:ident, $each:ident) => {
        #[doc = concat!("Get ", $label, " by name")]
        #[must_use]
        pub fn $get(&self, name: &str) -> Option<&AssetResource<$payload>> {
            self.$field.get(name)
        }

        #[doc = concat!("Remove ", $label, " and hand it back")]
        pub fn $remove(&mut self, name: &str) -> Option<AssetResource<$payload>> {
            self.$field.remove(name)
        }

        #[doc = concat!("Visit every entry of the ", stringify!($field), " registry")]
        pub fn $each(&self, visitor: impl FnMut(&str, &AssetResource<$payload>)) {
            self.$field.for_each(visitor);
        }

        #[doc = concat!("The ", stringify!($field), " registry")]
        #[must_use]
        pub const fn $field(&self) -> &Registry<$payload> {
            &self.$field
        }
    };
}

/// All asset registries behind one object
#[derive(Debug, Default)]
pub struct AssetLoader {
    textures: Registry<TextureAsset>,
    audio_clips: Registry<AudioClipAsset>,
    audio_streams: Registry<AudioStreamAsset>,
    fonts: Registry<FontAsset>,
    /// Options used by [`AssetLoader::load_font`]
    font_options: FontOptions,
}

impl AssetLoader {
    /// Create an empty loader with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty loader from a configuration
    #[must_use]
    pub fn with_config(config: LoaderConfig) -> Self {
        let mut loader = Self {
            font_options: config.font,
            ..Self::default()
        };
        loader.set_root(config.root.as_deref());
        loader
    }

    /// Set or clear the root directory of every registry
    pub fn set_root(&mut self, root: Option<&Path>) {
        let root = root.map(Path::to_path_buf);
        self.textures.set_root(root.clone());
        self.audio_clips.set_root(root.clone());
        self.audio_streams.set_root(root.clone());
        self.fonts.set_root(root);
    }

    /// Options `load_font` decodes with
    #[must_use]
    pub const fn font_options(&self) -> &FontOptions {
        &self.font_options
    }

    /// Load a texture.
    ///
    /// # Errors
    ///
    /// See [`Registry::load_with`]. Textures reject duplicate names.
    pub fn load_texture(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<&AssetResource<TextureAsset>, AssetError> {
        self.textures.load(name, path)
    }

    /// Load a fully buffered audio clip.
    ///
    /// # Errors
    ///
    /// See [`Registry::load_with`].
    pub fn load_audio_clip(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<&AssetResource<AudioClipAsset>, AssetError> {
        self.audio_clips.load(name, path)
    }

    /// Open a streamed audio asset.
    ///
    /// # Errors
    ///
    /// See [`Registry::load_with`].
    pub fn load_audio_stream(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<&AssetResource<AudioStreamAsset>, AssetError> {
        self.audio_streams.load(name, path)
    }

    /// Load a font with the loader's configured options.
    ///
    /// # Errors
    ///
    /// See [`Registry::load_with`].
    pub fn load_font(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<&AssetResource<FontAsset>, AssetError> {
        self.fonts.load_with(name, path, &self.font_options)
    }

    /// Load a font with explicit options.
    ///
    /// # Errors
    ///
    /// See [`Registry::load_with`].
    pub fn load_font_with(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
        options: &FontOptions,
    ) -> Result<&AssetResource<FontAsset>, AssetError> {
        self.fonts.load_with(name, path, options)
    }

    family_methods!(TextureAsset, textures, "a texture", get_texture, remove_texture, each_texture);
    family_methods!(
        AudioClipAsset,
        audio_clips,
        "an audio clip",
        get_audio_clip,
        remove_audio_clip,
        each_audio_clip
    );
    family_methods!(
        AudioStreamAsset,
        audio_streams,
        "an audio stream",
        get_audio_stream,
        remove_audio_stream,
        each_audio_stream
    );
    family_methods!(FontAsset, fonts, "a font", get_font, remove_font, each_font);

    /// Load every entry of a manifest, in order.
    ///
    /// Returns the number of assets loaded. Entries loaded before a
    /// failure stay loaded.
    ///
    /// # Errors
    ///
    /// Returns the first load error.
    pub fn load_manifest(&mut self, manifest: &AssetManifest) -> Result<usize, AssetError> {
        for entry in &manifest.textures {
            self.textures.load(entry.name.as_str(), &entry.path)?;
        }
        for entry in &manifest.audio_clips {
            self.audio_clips.load(entry.name.as_str(), &entry.path)?;
        }
        for entry in &manifest.audio_streams {
            self.audio_streams.load(entry.name.as_str(), &entry.path)?;
        }
        for entry in &manifest.fonts {
            let options = entry.options.as_ref().unwrap_or(&self.font_options);
            self.fonts.load_with(entry.name.as_str(), &entry.path, options)?;
        }
        log::debug!("Loaded manifest with {} assets", manifest.len());
        Ok(manifest.len())
    }

    /// The registry for payload `P`
    #[must_use]
    pub fn registry<P: Stored>(&self) -> &Registry<P> {
        P::registry(self)
    }

    /// Mutable access to the registry for payload `P`
    pub fn registry_mut<P: Stored>(&mut self) -> &mut Registry<P> {
        P::registry_mut(self)
    }

    /// Get an entry of payload type `P` by name
    #[must_use]
    pub fn get_as<P: Stored>(&self, name: &str) -> Option<&AssetResource<P>> {
        P::registry(self).get(name)
    }

    /// Get a mutable entry of payload type `P` by name
    pub fn get_as_mut<P: Stored>(&mut self, name: &str) -> Option<&mut AssetResource<P>> {
        P::registry_mut(self).get_mut(name)
    }

    /// Store `resource` under `name` in its category's registry,
    /// returning the entry it replaced
    pub fn replace<P: Stored>(
        &mut self,
        name: impl Into<String>,
        resource: AssetResource<P>,
    ) -> Option<AssetResource<P>> {
        P::registry_mut(self).replace(name, resource)
    }

    /// Find an entry of any category.
    ///
    /// Categories are searched in the order texture, audio clip, audio
    /// stream, font.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<AssetRef<'_>> {
        self.textures
            .get(name)
            .map(AssetRef::Texture)
            .or_else(|| self.audio_clips.get(name).map(AssetRef::AudioClip))
            .or_else(|| self.audio_streams.get(name).map(AssetRef::AudioStream))
            .or_else(|| self.fonts.get(name).map(AssetRef::Font))
    }

    /// Whether any category holds `name`
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.textures.contains(name)
            || self.audio_clips.contains(name)
            || self.audio_streams.contains(name)
            || self.fonts.contains(name)
    }

    /// Total number of entries across all categories
    #[must_use]
    pub fn count(&self) -> usize {
        self.textures.len() + self.audio_clips.len() + self.audio_streams.len() + self.fonts.len()
    }

    /// Check if every registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Names of all entries, one per entry
    ///
    /// A name used in two categories appears twice.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.count());
        names.extend(self.textures.names());
        names.extend(self.audio_clips.names());
        names.extend(self.audio_streams.names());
        names.extend(self.fonts.names());
        names
    }

    /// Remove `name` from every category.
    ///
    /// Returns the number of entries removed. Removed streams are dropped,
    /// which releases their file handles.
    pub fn remove(&mut self, name: &str) -> usize {
        usize::from(self.textures.remove(name).is_some())
            + usize::from(self.audio_clips.remove(name).is_some())
            + usize::from(self.audio_streams.remove(name).is_some())
            + usize::from(self.fonts.remove(name).is_some())
    }

    /// Rename `old` to `new` in every category holding `old`.
    ///
    /// Returns `false` and changes nothing if no category holds `old`.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> bool {
        let new = new.into();
        let textures = self.textures.rename(old, new.as_str());
        let clips = self.audio_clips.rename(old, new.as_str());
        let streams = self.audio_streams.rename(old, new.as_str());
        let fonts = self.fonts.rename(old, new);
        textures || clips || streams || fonts
    }

    /// Visit every entry of every category
    pub fn each(&self, mut visitor: impl FnMut(&str, AssetRef<'_>)) {
        self.textures
            .for_each(|name, r| visitor(name, AssetRef::Texture(r)));
        self.audio_clips
            .for_each(|name, r| visitor(name, AssetRef::AudioClip(r)));
        self.audio_streams
            .for_each(|name, r| visitor(name, AssetRef::AudioStream(r)));
        self.fonts.for_each(|name, r| visitor(name, AssetRef::Font(r)));
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.textures.clear();
        self.audio_clips.clear();
        self.audio_streams.clear();
        self.fonts.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::core::manifest::{FontEntry, ManifestEntry};
    use crate::test_support::fixture;

    fn loaded() -> AssetLoader {
        let mut loader = AssetLoader::new();
        loader.load_texture("bg", fixture("test-image.png")).unwrap();
        loader.load_audio_clip("click", fixture("audio.wav")).unwrap();
        loader.load_audio_stream("theme", fixture("stereo.wav")).unwrap();
        loader.load_font("label", fixture("sans.ttf")).unwrap();
        loader
    }

    #[test]
    fn test_load_each_family() {
        let loader = loaded();
        assert_eq!(loader.count(), 4);
        assert_eq!(loader.get_texture("bg").unwrap().data().width(), 4);
        assert_eq!(loader.get_audio_clip("click").unwrap().kind(), AssetKind::WavAudio);
        assert_eq!(
            loader.get_audio_stream("theme").unwrap().kind(),
            AssetKind::WavAudioStream
        );
        assert!(loader.get_font("label").is_some());
        assert_eq!(loader.textures().len(), 1);
    }

    #[test]
    fn test_get_across_categories() {
        let loader = loaded();
        let found = loader.get("theme").unwrap();
        assert_eq!(found.category(), Category::AudioStream);
        assert_eq!(found.kind(), AssetKind::WavAudioStream);
        assert_eq!(found.name(), "theme");
        assert_eq!(found.path(), fixture("stereo.wav"));
        assert!(loader.get("missing").is_none());
        assert!(loader.has("label"));
        assert!(!loader.has("missing"));
    }

    #[test]
    fn test_names_are_scoped_per_category() {
        let mut loader = AssetLoader::new();
        loader.load_texture("shared", fixture("test-image.png")).unwrap();
        loader.load_audio_clip("shared", fixture("audio.wav")).unwrap();

        assert_eq!(loader.count(), 2);
        assert_eq!(loader.list(), vec!["shared", "shared"]);
        assert_eq!(loader.get("shared").unwrap().category(), Category::Texture);

        assert_eq!(loader.remove("shared"), 2);
        assert!(loader.is_empty());
        assert_eq!(loader.remove("shared"), 0);
    }

    #[test]
    fn test_each_visits_everything() {
        let loader = loaded();
        let mut seen = HashMap::new();
        loader.each(|name, asset| {
            seen.insert(name.to_string(), asset.category());
        });
        assert_eq!(seen.len(), 4);
        assert_eq!(seen["click"], Category::AudioClip);
        assert_eq!(seen["label"], Category::Font);

        let mut textures = 0;
        loader.each_texture(|_, _| textures += 1);
        assert_eq!(textures, 1);
    }

    #[test]
    fn test_rename() {
        let mut loader = loaded();
        assert!(loader.rename("bg", "background"));
        assert!(!loader.has("bg"));
        let texture = loader.get_texture("background").unwrap();
        assert_eq!(texture.name(), "background");
        assert_eq!(texture.path(), fixture("test-image.png"));

        assert!(!loader.rename("missing", "other"));
        assert_eq!(loader.count(), 4);
    }

    #[test]
    fn test_typed_access() {
        let mut loader = loaded();
        assert_eq!(loader.registry::<FontAsset>().len(), 1);
        assert!(loader.get_as::<AudioClipAsset>("click").is_some());
        assert!(loader.get_as::<TextureAsset>("click").is_none());

        let stream = loader.get_as_mut::<AudioStreamAsset>("theme").unwrap();
        stream.data_mut().close();
        assert!(loader.get_audio_stream("theme").unwrap().data().is_closed());

        let resource = loader.remove_texture("bg").unwrap();
        assert!(loader.replace("copy", resource).is_none());
        assert_eq!(loader.get_texture("copy").unwrap().name(), "copy");
        assert!(loader.registry_mut::<TextureAsset>().remove("copy").is_some());
    }

    #[test]
    fn test_texture_collision_through_loader() {
        let mut loader = loaded();
        let err = loader.load_texture("bg", fixture("test-image.png")).unwrap_err();
        assert!(matches!(err, AssetError::AssetAlreadyExists { .. }));
        assert_eq!(loader.count(), 4);
    }

    #[test]
    fn test_with_config() {
        let config = LoaderConfig::default()
            .with_root(fixture(""))
            .with_font_options(FontOptions::default().with_size(24.0));
        let mut loader = AssetLoader::with_config(config);

        loader.load_texture("bg", "test-image.png").unwrap();
        let font = loader.load_font("label", "sans.ttf").unwrap();
        assert_eq!(font.path(), "sans.ttf");
        assert_eq!(loader.font_options().size, 24.0);
        assert_eq!(loader.audio_clips().root(), Some(Path::new(&fixture(""))));
    }

    #[test]
    fn test_load_manifest() {
        let manifest = AssetManifest {
            textures: vec![ManifestEntry {
                name: "bg".to_string(),
                path: fixture("test-image.png"),
            }],
            audio_clips: vec![ManifestEntry {
                name: "click".to_string(),
                path: fixture("audio.wav"),
            }],
            audio_streams: Vec::new(),
            fonts: vec![FontEntry {
                name: "title".to_string(),
                path: fixture("sans.ttf"),
                options: Some(FontOptions::default().with_size(32.0)),
            }],
        };

        let mut loader = AssetLoader::new();
        assert_eq!(loader.load_manifest(&manifest).unwrap(), 3);
        assert_eq!(loader.count(), 3);
    }

    #[test]
    fn test_load_manifest_stops_at_first_error() {
        let manifest = AssetManifest {
            textures: vec![
                ManifestEntry {
                    name: "bg".to_string(),
                    path: fixture("test-image.png"),
                },
                ManifestEntry {
                    name: "broken".to_string(),
                    path: fixture("corrupt.png"),
                },
            ],
            audio_clips: vec![ManifestEntry {
                name: "click".to_string(),
                path: fixture("audio.wav"),
            }],
            ..AssetManifest::default()
        };

        let mut loader = AssetLoader::new();
        let err = loader.load_manifest(&manifest).unwrap_err();
        assert!(matches!(err, AssetError::Decode(_)));
        assert!(loader.has("bg"));
        assert!(!loader.has("click"));
    }

    #[test]
    fn test_clear() {
        let mut loader = loaded();
        loader.clear();
        assert!(loader.is_empty());
        assert!(loader.list().is_empty());
    }
}

//! Loads an asset manifest and reports what was loaded
//!
//! Usage: `asset-loader <manifest.ron> [loader-config.ron]`

use asset_loader::prelude::*;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(manifest_path) = args.next() else {
        return Err("usage: asset-loader <manifest.ron> [loader-config.ron]".into());
    };

    let config = match args.next() {
        Some(path) => LoaderConfig::from_file(path)?,
        None => LoaderConfig::default(),
    };

    let manifest = AssetManifest::from_file(&manifest_path)?;
    let mut loader = AssetLoader::with_config(config);
    let loaded = loader.load_manifest(&manifest)?;
    log::info!("Loaded {loaded} assets from {manifest_path}");

    loader.each(|name, asset| match asset {
        AssetRef::Texture(texture) => {
            let (width, height) = texture.data().dimensions();
            log::info!("{name}: {} {width}x{height}", texture.kind());
        }
        AssetRef::AudioClip(clip) => {
            let format = clip.data().format();
            log::info!(
                "{name}: {} {} Hz, {} ch, {:.2?}",
                clip.kind(),
                format.sample_rate,
                format.channels,
                clip.data().duration()
            );
        }
        AssetRef::AudioStream(stream) => {
            log::info!(
                "{name}: {} length {:?}",
                stream.kind(),
                stream.data().total_duration()
            );
        }
        AssetRef::Font(font) => {
            log::info!(
                "{name}: {} {:?} with {} glyphs",
                font.kind(),
                font.data().face().family(),
                font.data().layout().len()
            );
        }
    });

    let names: Vec<String> = loader.audio_streams().names().map(str::to_owned).collect();
    for name in names {
        if let Some(stream) = loader.get_as_mut::<AudioStreamAsset>(&name) {
            stream.data_mut().close();
        }
    }
    loader.clear();

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("Asset loader error: {e}");
        std::process::exit(1);
    }
}

//! Loads the files the settings menus save: time controls and the two
//! stimulus pools.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reflex_core::{Configuration, StimulusId, StimulusPools};
use serde::Deserialize;
use thiserror::Error;

pub const TIME_CONTROLS_FILE: &str = "SavedTimeControls.json";
pub const VISUAL_STIMULI_FILE: &str = "SavedVisualStimuli.json";
pub const AUDIO_STIMULI_FILE: &str = "SavedAudioStimuli.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Pool files are either a bare list or the wrapper object the menus write.
#[derive(Deserialize)]
#[serde(untagged)]
enum PoolFile {
    Bare(Vec<StimulusId>),
    Wrapped {
        #[serde(rename = "Items")]
        items: Vec<StimulusId>,
    },
}

impl PoolFile {
    fn into_items(self) -> Vec<StimulusId> {
        match self {
            Self::Bare(items) | Self::Wrapped { items } => items,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Missing file means the menus were never saved; defaults apply.
    pub fn load_configuration(&self) -> Result<Configuration, StoreError> {
        Ok(self.read_json(TIME_CONTROLS_FILE)?.unwrap_or_default())
    }

    /// Missing pool files are empty pools.
    pub fn load_pools(&self) -> Result<StimulusPools, StoreError> {
        let visual = self.read_pool(VISUAL_STIMULI_FILE)?;
        let audio = self.read_pool(AUDIO_STIMULI_FILE)?;
        Ok(StimulusPools::new(visual, audio))
    }

    fn read_pool(&self, name: &str) -> Result<Vec<StimulusId>, StoreError> {
        Ok(self
            .read_json::<PoolFile>(name)?
            .map(PoolFile::into_items)
            .unwrap_or_default())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<Option<T>, StoreError> {
        let path = self.root.join(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("{} not found, using defaults", path.display());
                return Ok(None);
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scratch(PathBuf);

    impl Scratch {
        fn new(tag: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("reflex-store-{tag}-{}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, name: &str, contents: &str) {
            fs::write(self.0.join(name), contents).unwrap();
        }

        fn data(&self) -> DataDir {
            DataDir::new(&self.0)
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn empty_directory_yields_defaults() {
        let dir = Scratch::new("empty");
        let config = dir.data().load_configuration().unwrap();
        assert_eq!(config, Configuration::default());
        assert!(dir.data().load_pools().unwrap().is_empty());
    }

    #[test]
    fn saved_time_controls_load_with_pascal_case_names() {
        let dir = Scratch::new("controls");
        dir.write(
            TIME_CONTROLS_FILE,
            r#"{"Duration": 1.5, "Delay": 0.5, "UnlimitedRounds": false,
                "NumberOfRounds": 4, "SimultaneousVisualAudioStimuli": true}"#,
        );
        let config = dir.data().load_configuration().unwrap();
        assert_eq!(config.duration, 1.5);
        assert_eq!(config.delay, 0.5);
        assert_eq!(config.round_limit(), Some(4));
        assert!(config.simultaneous_visual_audio_stimuli);
        assert_eq!(config.max_delay, 7.0);
    }

    #[test]
    fn pools_accept_bare_and_wrapped_lists() {
        let dir = Scratch::new("pools");
        dir.write(VISUAL_STIMULI_FILE, r#"["UpArrowButton", "RedColorButton"]"#);
        dir.write(AUDIO_STIMULI_FILE, r#"{"Items": ["BeepNoiseButton"]}"#);
        let pools = dir.data().load_pools().unwrap();
        assert_eq!(
            pools.visual,
            vec![StimulusId::from("UpArrowButton"), StimulusId::from("RedColorButton")]
        );
        assert_eq!(pools.audio, vec![StimulusId::from("BeepNoiseButton")]);
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = Scratch::new("malformed");
        dir.write(TIME_CONTROLS_FILE, "{ not json");
        let err = dir.data().load_configuration().unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
        assert!(err.to_string().contains(TIME_CONTROLS_FILE));
    }
}

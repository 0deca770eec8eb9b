//! Persisted snapshots of the trainable TD3 networks
//!
//! A checkpoint is a MessagePack file with named entries `version`, `actor` and
//! `critic`. Target networks and optimizer state are not part of it.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use burn::{
    module::Module,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Record, Recorder},
    tensor::backend::Backend,
};
use tracing::{info, warn};

use super::config::Td3Config;
use crate::{
    error::{Error, Result},
    nn::{actor::ActorRecord, critic::TwinCriticRecord, Actor, TwinCritic},
};

/// Bumped whenever the layout of [`CheckpointRecord`] changes
pub const CHECKPOINT_VERSION: u32 = 1;

type CheckpointRecorder = NamedMpkFileRecorder<FullPrecisionSettings>;

/// Extension the recorder forces onto every file it touches
const EXTENSION: &str = "mpk";

#[derive(Record)]
pub struct CheckpointRecord<B: Backend> {
    pub version: u32,
    pub actor: ActorRecord<B>,
    pub critic: TwinCriticRecord<B>,
}

/// Name identifying a run by its hyperparameters
///
/// Stable for a given configuration; used for checkpoint and log file names.
pub fn run_name(config: &Td3Config) -> String {
    format!(
        "TD3_lr[{:.4}]_b[{}]_tau[{:.4}]_uf[{}]",
        config.actor_lr, config.batch_size, config.tau, config.policy_update_freq
    )
}

/// File a checkpoint saved under `path` ends up in
///
/// Run names contain dots, so the extension is appended rather than
/// substituted.
pub fn checkpoint_file(path: &Path) -> PathBuf {
    if path.extension() == Some(OsStr::new(EXTENSION)) {
        return path.to_path_buf();
    }
    let mut file = path.as_os_str().to_owned();
    file.push(".");
    file.push(EXTENSION);
    file.into()
}

pub(crate) fn save<B: Backend>(path: &Path, actor: Actor<B>, critic: TwinCritic<B>) -> Result<()> {
    let record = CheckpointRecord {
        version: CHECKPOINT_VERSION,
        actor: actor.into_record(),
        critic: critic.into_record(),
    };

    let file = checkpoint_file(path);
    Recorder::<B>::record(&CheckpointRecorder::new(), record, file.clone())?;
    info!(path = %file.display(), "saved checkpoint");
    Ok(())
}

pub(crate) fn load<B: Backend>(
    path: &Path,
    actor: Actor<B>,
    critic: TwinCritic<B>,
    device: &B::Device,
) -> Result<(Actor<B>, TwinCritic<B>)> {
    let file = checkpoint_file(path);
    if !file.exists() {
        warn!(path = %file.display(), "checkpoint not found, keeping current weights");
        return Err(Error::CheckpointNotFound(file));
    }

    let record: CheckpointRecord<B> =
        Recorder::<B>::load(&CheckpointRecorder::new(), file.clone(), device)?;
    if record.version != CHECKPOINT_VERSION {
        return Err(Error::CheckpointVersion {
            found: record.version,
            expected: CHECKPOINT_VERSION,
        });
    }

    info!(path = %file.display(), "loaded checkpoint");
    Ok((actor.load_record(record.actor), critic.load_record(record.critic)))
}

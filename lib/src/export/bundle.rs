// lib/src/export/bundle.rs
//
// The serialized results bundle: everything a run produced, in one
// MessagePack file, for later sessions and downstream reporting tools.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use models::errors::{GraphError, GraphResult};
use models::stats::{GrowthStats, NodeStats, SnapshotStats, TopKChange};

use crate::engine::snapshot::SnapshotTable;
use crate::pipeline::PipelineReport;

/// The complete output of one pipeline run, in serializable form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultsBundle {
    pub snapshots: Vec<SnapshotTable>,
    pub stats: Vec<SnapshotStats>,
    pub node_stats: Vec<Vec<NodeStats>>,
    pub growth: Vec<GrowthStats>,
    pub top_k_changes: Vec<TopKChange>,
    pub report: PipelineReport,
}

/// Writes a results bundle as MessagePack at `path`.
pub fn write_bundle(bundle: &ResultsBundle, path: &Path) -> GraphResult<()> {
    let encoded = rmp_serde::to_vec_named(bundle)
        .map_err(|err| GraphError::Serialization(format!("bundle encode failed: {}", err)))?;
    let file = File::create(path)
        .map_err(|err| GraphError::Export(format!("cannot create '{}': {}", path.display(), err)))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&encoded)?;
    writer.flush()?;
    Ok(())
}

/// Reads a results bundle back from `path`.
pub fn read_bundle(path: &Path) -> GraphResult<ResultsBundle> {
    let file = File::open(path)
        .map_err(|err| GraphError::Export(format!("cannot open '{}': {}", path.display(), err)))?;
    rmp_serde::from_read(BufReader::new(file))
        .map_err(|err| GraphError::Serialization(format!("bundle decode failed: {}", err)))
}

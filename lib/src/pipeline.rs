// lib/src/pipeline.rs
//
// The batch orchestrator: records -> snapshots -> statistics -> files.
// Configuration errors abort before any work; data-quality defects are
// tolerated, counted and surfaced next to the normal output.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use models::errors::GraphResult;

use crate::analyzer::{analyze, AnalysisOutput};
use crate::config::PipelineConfig;
use crate::engine::snapshot::GraphSnapshot;
use crate::export::bundle::{write_bundle, ResultsBundle};
use crate::export::csv_report;
use crate::export::gexf::export_gexf;
use crate::graph_evolution::snapshot_builder::{build_snapshots, BuildReport};
use crate::store::RecordStore;

/// Combined data-quality tally of one run, surfaced alongside the
/// outputs so the analyst can judge input quality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub records_seen: usize,
    pub records_folded: u64,
    pub records_outside: usize,

    /// Malformed rows skipped during extraction/ingest.
    pub ingest_defects: u64,

    /// Snapshots analyzed with sentinel metrics because they were empty.
    pub empty_snapshots: u64,
}

impl PipelineReport {
    fn new(build: &BuildReport, analysis: &AnalysisOutput) -> Self {
        Self {
            records_seen: build.records_seen,
            records_folded: build.records_folded,
            records_outside: build.records_outside,
            ingest_defects: build.ingest_defects,
            empty_snapshots: analysis.report.empty_snapshots,
        }
    }
}

/// Everything one run produced.
#[derive(Debug)]
pub struct PipelineOutput {
    pub snapshots: Vec<GraphSnapshot>,
    pub analysis: AnalysisOutput,
    pub report: PipelineReport,
}

/// Runs the whole batch pipeline over an extracted record store.
///
/// # Errors
/// Returns `GraphError::InvalidWindowConfiguration` before any record is
/// processed when the windowing configuration is unusable, and
/// `GraphError::Export`/`GraphError::Io` when a requested file output
/// cannot be written.
pub fn run_pipeline(config: &PipelineConfig, store: &RecordStore) -> GraphResult<PipelineOutput> {
    config.window.validate()?;

    info!(records = store.len(), "pipeline starting");
    let build = build_snapshots(store, &config.window)?;
    let analysis = analyze(&build.snapshots, config.top_k);
    let report = PipelineReport::new(&build.report, &analysis);

    if let Some(ref output_dir) = config.output_dir {
        export_outputs(config, &build.snapshots, &analysis, &report, output_dir)?;
    }

    info!(
        snapshots = build.snapshots.len(),
        defects = report.ingest_defects,
        outside = report.records_outside,
        "pipeline complete"
    );
    Ok(PipelineOutput {
        snapshots: build.snapshots,
        analysis,
        report,
    })
}

fn export_outputs(
    config: &PipelineConfig,
    snapshots: &[GraphSnapshot],
    analysis: &AnalysisOutput,
    report: &PipelineReport,
    output_dir: &Path,
) -> GraphResult<()> {
    fs::create_dir_all(output_dir)?;
    let tables: Vec<_> = snapshots.iter().map(|s| s.to_table()).collect();

    if config.export_gexf {
        // The final snapshot is the one explored in Gephi.
        if let Some(last) = tables.last() {
            export_gexf(last, &output_dir.join("graph.gexf"))?;
        }
    }

    if config.export_csv {
        let stats: Vec<_> = analysis.snapshots.iter().map(|a| a.stats.clone()).collect();
        let stats_file = fs::File::create(output_dir.join("stats.csv"))?;
        csv_report::write_snapshot_stats(&stats, stats_file)?;

        let per_snapshot: Vec<_> = analysis
            .snapshots
            .iter()
            .map(|a| (a.stats.clone(), a.nodes.clone()))
            .collect();
        let nodes_file = fs::File::create(output_dir.join("node_stats.csv"))?;
        csv_report::write_node_stats(&per_snapshot, nodes_file)?;

        for table in &tables {
            // Keyed by window end: cumulative windows share their start.
            let suffix = table.window.end.format("%Y%m%dT%H%M%S");
            let edges_file = fs::File::create(output_dir.join(format!("edges_{}.csv", suffix)))?;
            csv_report::write_edge_list(table, edges_file)?;
        }
    }

    if config.export_bundle {
        let bundle = ResultsBundle {
            snapshots: tables,
            stats: analysis.snapshots.iter().map(|a| a.stats.clone()).collect(),
            node_stats: analysis.snapshots.iter().map(|a| a.nodes.clone()).collect(),
            growth: analysis.growth.clone(),
            top_k_changes: analysis.top_k_changes.clone(),
            report: *report,
        };
        write_bundle(&bundle, &output_dir.join("results.msgpack"))?;
    }

    info!(dir = %output_dir.display(), "exports written");
    Ok(())
}

/// Wires a process-wide tracing subscriber honoring `RUST_LOG`. Callers
/// embedding the pipeline in a larger binary can skip this and install
/// their own.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

//! Headless bulk-generate front end.
//!
//! Builds an editor [`State`] from settings plus command-line overrides,
//! runs one bulk-generate action through the normal action/effect queues,
//! and renders the result.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use linkgraph::generator::non_negative;
use linkgraph::GenerateError;
use tracing::info;

use crate::actions::Action;
use crate::settings::{EditorSettings, SettingsError};
use crate::state::State;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Node, link and component counts
    Summary,
    /// The full `{nodes, links}` snapshot
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "netgen",
    about = "Generate a random connected network diagram"
)]
pub struct Cli {
    /// JSON settings file; missing fields use the defaults
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Number of nodes (default 1000)
    #[arg(long, allow_negative_numbers = true)]
    pub nodes: Option<i64>,
    /// Extra link attempts per node (default 1)
    #[arg(long, allow_negative_numbers = true)]
    pub extra_links_per_node: Option<i64>,
    /// Seed for a reproducible graph
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("failed to encode graph: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Merge command-line overrides into the loaded settings.
pub fn resolve_settings(cli: &Cli) -> Result<EditorSettings, CliError> {
    let mut settings = match &cli.settings {
        Some(path) => EditorSettings::load(path)?,
        None => EditorSettings::default(),
    };
    if let Some(nodes) = cli.nodes {
        settings.bulk_node_count = non_negative("nodes", nodes)?;
    }
    if let Some(extra) = cli.extra_links_per_node {
        settings.bulk_extra_links_per_node =
            non_negative("extra_links_per_node", extra)?;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    Ok(settings)
}

pub fn run_cli(cli: &Cli) -> Result<State, CliError> {
    let settings = resolve_settings(cli)?;
    info!(
        nodes = settings.bulk_node_count,
        extra_links_per_node = settings.bulk_extra_links_per_node,
        seed = ?settings.seed,
        "bulk generate requested"
    );

    let mut state = State::new(Store::new(settings));
    let action = Action::bulk_generate(&state.store);
    state.dispatch(action);
    state.flush();
    Ok(state)
}

pub fn render(
    state: &mut State,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Summary => {
            let stats = *state.cache.stats.get(&state.store);
            writeln!(out, "nodes: {}", stats.node_count)?;
            writeln!(out, "links: {}", stats.link_count)?;
            writeln!(out, "weak components: {}", stats.weak_components)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &state.store.graph_snapshot())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkgraph::Graph;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("netgen").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults_match_bulk_action() {
        let settings = resolve_settings(&parse(&[])).unwrap();
        assert_eq!(settings, EditorSettings::default());
        assert_eq!(settings.bulk_node_count, 1000);
    }

    #[rstest]
    #[case(&["--nodes", "-5"], "nodes")]
    #[case(&["--extra-links-per-node", "-1"], "extra_links_per_node")]
    fn test_negative_counts_are_rejected(
        #[case] args: &[&str],
        #[case] field: &str,
    ) {
        let err = resolve_settings(&parse(args)).unwrap_err();
        assert!(matches!(
            err,
            CliError::Generate(GenerateError::InvalidArgument { name, .. })
                if name == field
        ));
    }

    #[test]
    fn test_summary_output() {
        let cli = parse(&["--nodes", "12", "--seed", "4"]);
        let mut state = run_cli(&cli).unwrap();

        let mut out = Vec::new();
        render(&mut state, OutputFormat::Summary, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("nodes: 12\n"));
        assert!(text.contains("weak components: 1"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let cli = parse(&["--nodes", "6", "--extra-links-per-node", "0"]);
        let mut state = run_cli(&cli).unwrap();

        let mut out = Vec::new();
        render(&mut state, OutputFormat::Json, &mut out).unwrap();
        let graph: Graph = serde_json::from_slice(&out).unwrap();
        assert_eq!(graph.nodes.len(), 6);
        assert_eq!(graph.links.len(), 5);
        assert_eq!(graph, state.store.graph_snapshot());
    }
}

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use pomgraph::config::{Config, DEFAULT_REPO_URL};
use pomgraph::export::{self, ExportData, ExportFormat};
use pomgraph::graph::{DependencyGraph, DEFAULT_MAX_DEPTH};
use pomgraph::logging;
use pomgraph::resolver::{DependencyResolver, HttpResolver};

#[derive(Parser)]
#[command(name = "pomgraph")]
#[command(version)]
#[command(about = "Transitive dependency graphs and cycle detection for Maven packages", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the direct dependencies of a package
    Deps {
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// Build the dependency graph and report it
    Graph {
        #[command(flatten)]
        remote: RemoteArgs,

        /// Read the graph from a flat description instead of the repository
        #[arg(long, requires = "test_repo_path")]
        test_mode: bool,

        /// Flat description file used in test mode
        #[arg(long)]
        test_repo_path: Option<PathBuf>,

        /// Maximum traversal depth
        #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Report format: text, json or dot
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RemoteArgs {
    /// Root package as groupId:artifactId
    #[arg(short, long)]
    package: Option<String>,

    /// Version of the root package
    #[arg(long = "version")]
    version: Option<String>,

    /// Base URL of the Maven-layout repository
    #[arg(long, env = "POMGRAPH_REPO_URL", default_value = DEFAULT_REPO_URL)]
    repo_url: String,

    /// Per-request timeout in seconds (1-10)
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
}

impl RemoteArgs {
    fn into_config(self) -> Config {
        Config {
            package: self.package,
            version: self.version,
            repo_url: self.repo_url,
            timeout: Duration::from_secs(self.timeout_secs),
            ..Config::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;

    match cli.command {
        Commands::Deps { remote } => {
            let config = remote.into_config();
            config.validate()?;
            log_params(&config);
            run_deps(&config)
        }
        Commands::Graph {
            remote,
            test_mode,
            test_repo_path,
            max_depth,
            format,
            output,
        } => {
            let config = Config {
                test_mode,
                test_repo_path,
                max_depth,
                format,
                output,
                ..remote.into_config()
            };
            config.validate()?;
            log_params(&config);
            run_graph(&config)
        }
    }
}

fn log_params(config: &Config) {
    for (key, value) in config.params() {
        info!("{} = {}", key, value);
    }
}

fn run_deps(config: &Config) -> Result<()> {
    let root = config.root_coordinate()?;
    let resolver = HttpResolver::new(config.resolver_config())?;

    let deps = resolver.resolve(&root, &config.repo_url);

    println!("Direct dependencies of {}:", root);
    if deps.is_empty() {
        println!("No dependencies found");
    } else {
        for (i, dep) in deps.iter().enumerate() {
            println!("{}. {}", i + 1, dep);
        }
        println!("Total: {} dependencies", deps.len());
    }

    Ok(())
}

fn run_graph(config: &Config) -> Result<()> {
    let mut graph = DependencyGraph::with_max_depth(config.max_depth);

    let root = if config.test_mode {
        let path = config
            .test_repo_path
            .as_deref()
            .context("test mode requires a flat description path")?;
        graph
            .load_flat_description(path)
            .context("Failed to load test repository")?;
        None
    } else {
        let coordinate = config.root_coordinate()?;
        let resolver = HttpResolver::new(config.resolver_config())?;
        graph.build_from_root(&coordinate, &resolver, &config.repo_url);
        Some(coordinate.id())
    };

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        cycles = graph.cycles().len(),
        "Graph built"
    );

    let data = ExportData::new(root.as_deref(), &graph);

    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            export::export(config.format, &data, &mut writer)
                .and_then(|()| writer.flush())
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export::export(config.format, &data, &mut writer)
                .context("Failed to write report")?;
        }
    }

    Ok(())
}

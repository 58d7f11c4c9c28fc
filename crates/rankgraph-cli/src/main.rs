use rankgraph_core::error::CoreError;
use rankgraph_core::graph::Graph;
use rustc_hash::FxHashMap;
use std::path::PathBuf;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(CoreError),
    GraphMl(rankgraph_graphml::GraphMlError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::GraphMl(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<CoreError> for CliError {
    fn from(value: CoreError) -> Self {
        Self::Core(value)
    }
}

impl From<rankgraph_graphml::GraphMlError> for CliError {
    fn from(value: rankgraph_graphml::GraphMlError) -> Self {
        Self::GraphMl(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Load,
    PageRank,
    Convert,
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    output: Option<String>,
    damping: f64,
    tolerance: f64,
    max_iterations: usize,
    top: Option<usize>,
    personalization: FxHashMap<String, f64>,
    init_score: FxHashMap<String, f64>,
    dangling_weight: FxHashMap<String, f64>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::default(),
            input: None,
            output: None,
            damping: 0.85,
            tolerance: 1.0e-6,
            max_iterations: 100,
            top: None,
            personalization: FxHashMap::default(),
            init_score: FxHashMap::default(),
            dangling_weight: FxHashMap::default(),
        }
    }
}

fn usage() -> &'static str {
    "rankgraph-cli\n\
\n\
USAGE:\n\
  rankgraph load <path.graphml|path.graphmlz>\n\
  rankgraph pagerank [--damping <d>] [--tolerance <t>] [--max-iterations <n>] [--top <k>]\n\
                      [--personalize NAME=WEIGHT]... [--init-score NAME=WEIGHT]...\n\
                      [--dangling-weight NAME=WEIGHT]... <path>\n\
  rankgraph convert <in-path> <out-path>\n\
\n\
NOTES:\n\
  - File format (plain GraphML vs gzip .graphmlz) is chosen by extension.\n\
  - pagerank prints `name\\tscore` lines sorted by descending score.\n\
  - --personalize/--init-score/--dangling-weight may each be repeated; names not given default\n\
    to zero. Omitting --dangling-weight entirely reuses --personalize for dangling mass.\n\
"
}

fn parse_name_weight(raw: &str) -> Result<(String, f64), CliError> {
    let (name, weight) = raw.split_once('=').ok_or(CliError::Usage(usage()))?;
    let weight = weight.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    Ok((name.to_string(), weight))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut it = argv.iter().skip(1).peekable();
    let mut positionals = Vec::new();

    match it.peek().map(|s| s.as_str()) {
        Some("load") => {
            args.command = Command::Load;
            it.next();
        }
        Some("pagerank") => {
            args.command = Command::PageRank;
            it.next();
        }
        Some("convert") => {
            args.command = Command::Convert;
            it.next();
        }
        Some("--help") | Some("-h") => return Err(CliError::Usage(usage())),
        _ => {}
    }

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--damping" => {
                let v = it.next().ok_or(CliError::Usage(usage()))?;
                args.damping = v.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--tolerance" => {
                let v = it.next().ok_or(CliError::Usage(usage()))?;
                args.tolerance = v.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--max-iterations" => {
                let v = it.next().ok_or(CliError::Usage(usage()))?;
                args.max_iterations = v.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--top" => {
                let v = it.next().ok_or(CliError::Usage(usage()))?;
                args.top = Some(v.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--personalize" => {
                let v = it.next().ok_or(CliError::Usage(usage()))?;
                let (name, weight) = parse_name_weight(v)?;
                args.personalization.insert(name, weight);
            }
            "--init-score" => {
                let v = it.next().ok_or(CliError::Usage(usage()))?;
                let (name, weight) = parse_name_weight(v)?;
                args.init_score.insert(name, weight);
            }
            "--dangling-weight" => {
                let v = it.next().ok_or(CliError::Usage(usage()))?;
                let (name, weight) = parse_name_weight(v)?;
                args.dangling_weight.insert(name, weight);
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            other => positionals.push(other.to_string()),
        }
    }

    match args.command {
        Command::Load | Command::PageRank => {
            args.input = positionals.first().cloned();
            if args.input.is_none() {
                return Err(CliError::Usage(usage()));
            }
        }
        Command::Convert => {
            args.input = positionals.first().cloned();
            args.output = positionals.get(1).cloned();
            if args.input.is_none() || args.output.is_none() {
                return Err(CliError::Usage(usage()));
            }
        }
    }

    Ok(args)
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Load => {
            let path = PathBuf::from(args.input.expect("validated in parse_args"));
            let graph = rankgraph_graphml::read_path(&path)?;
            println!(
                "loaded {} nodes, {} edges from {}",
                graph.num_nodes(),
                graph.num_edges(),
                path.display()
            );
            Ok(())
        }
        Command::PageRank => {
            let path = PathBuf::from(args.input.expect("validated in parse_args"));
            let graph = rankgraph_graphml::read_path(&path)?;
            run_pagerank(&graph, &args)
        }
        Command::Convert => {
            let in_path = PathBuf::from(args.input.expect("validated in parse_args"));
            let out_path = PathBuf::from(args.output.expect("validated in parse_args"));
            let graph = rankgraph_graphml::read_path(&in_path)?;
            rankgraph_graphml::write_path(&graph, &out_path)?;
            println!("wrote {} to {}", graph.num_nodes(), out_path.display());
            Ok(())
        }
    }
}

fn run_pagerank(graph: &Graph, args: &Args) -> Result<(), CliError> {
    let personalization = (!args.personalization.is_empty()).then_some(&args.personalization);
    let init_score = (!args.init_score.is_empty()).then_some(&args.init_score);
    let dangling_weight = (!args.dangling_weight.is_empty()).then_some(&args.dangling_weight);

    let (scores, converged, iterations) = graph.run_pagerank(
        args.damping,
        args.tolerance,
        args.max_iterations,
        personalization,
        init_score,
        dangling_weight,
    )?;

    if !converged {
        eprintln!(
            "warning: pagerank did not converge after {iterations} iterations (tolerance {})",
            args.tolerance
        );
    }

    let mut ranked: Vec<(&str, f64)> = scores.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    if let Some(top) = args.top {
        ranked.truncate(top);
    }
    for (name, score) in ranked {
        println!("{name}\t{score:.6}");
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

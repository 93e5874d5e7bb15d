use atnviz::{Automaton, DirectorySink, GenerateOptions, generate, write_documents};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Atn(atnviz::Error),
    /// Some documents could not be written; every document was still attempted.
    PartialWrite(atnviz::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Atn(err) => write!(f, "invalid ATN snapshot: {err}"),
            CliError::PartialWrite(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<atnviz::Error> for CliError {
    fn from(value: atnviz::Error) -> Self {
        Self::Atn(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Names,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out_dir: Option<String>,
    title: Option<String>,
    no_focused: bool,
    no_full: bool,
    no_rules: bool,
}

fn usage() -> &'static str {
    "atnviz-cli\n\
\n\
USAGE:\n\
  atnviz-cli [render] [--out-dir <dir>] [--title <text>] [--no-focused] [--no-full] [--no-rules] [<path>|-]\n\
  atnviz-cli names [--no-focused] [--no-full] [--no-rules] [<path>|-]\n\
\n\
NOTES:\n\
  - <path> is a JSON ATN snapshot; if omitted or '-', it is read from stdin.\n\
  - render writes clusters_for_<rule>.dot, atn.dot and atn_<index>.dot into --out-dir (default: .).\n\
  - names prints the document names render would write, one per line.\n\
  - Set RUST_LOG (e.g. RUST_LOG=atnviz=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "names" => args.command = Command::Names,
            "--no-focused" => args.no_focused = true,
            "--no-full" => args.no_full = true,
            "--no-rules" => args.no_rules = true,
            "--out-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_dir = Some(dir.clone());
            }
            "--title" => {
                let Some(title) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.title = Some(title.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn generate_options(args: &Args) -> GenerateOptions {
    let mut options = GenerateOptions {
        include_focused: !args.no_focused,
        include_full: !args.no_full,
        include_rule_flat: !args.no_rules,
        ..Default::default()
    };
    if let Some(title) = &args.title {
        options.full_title = title.clone();
    }
    options
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let atn = Automaton::from_json_str(&text)?;
    tracing::info!(
        states = atn.states().len(),
        rules = atn.rule_count(),
        "loaded ATN snapshot"
    );
    let docs = generate(&atn, &generate_options(&args));

    match args.command {
        Command::Names => {
            for doc in &docs {
                println!("{}", doc.name);
            }
            Ok(())
        }
        Command::Render => {
            let mut sink = DirectorySink::new(args.out_dir.as_deref().unwrap_or("."));
            let written = write_documents(&docs, &mut sink)
                .into_result()
                .map_err(CliError::PartialWrite)?;
            tracing::info!(
                count = written.len(),
                dir = %sink.root().display(),
                "documents written"
            );
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

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

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::PartialWrite(_)) => {
            eprintln!("{err}");
            std::process::exit(4);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

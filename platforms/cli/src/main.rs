use clap::Parser;
use std::io::{self, BufRead};
use std::path::Path;
use std::process;
use tracetm::{
    validate_input, Level, MachineCatalog, MachineDefinition, MachineLoader, Report, Step,
    TraceError, TuringMachine, DEFAULT_STEP_BUDGET,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tracetm -p machines/zero-n-one-n.tm -i 0011
  tracetm -m a-plus -i aaa -b 50 --json
  echo abab | tracetm -m contains-aa")]
struct Cli {
    /// The machine definition file to trace
    #[clap(short, long, conflicts_with = "machine")]
    program: Option<String>,

    /// Trace a bundled machine by name instead of a file
    #[clap(short, long)]
    machine: Option<String>,

    /// The input string. Read from stdin when omitted and stdin is piped
    #[clap(short, long)]
    input: Option<String>,

    /// Maximum number of transitions to simulate
    #[clap(short, long, env = "TRACETM_BUDGET", default_value_t = DEFAULT_STEP_BUDGET)]
    budget: usize,

    /// Print every explored level
    #[clap(short = 'd', long, conflicts_with = "json")]
    debug: bool,

    /// Print the report as JSON
    #[clap(long)]
    json: bool,

    /// List the bundled machines and exit
    #[clap(long)]
    list: bool,

    /// Enable debug logging on stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        let code = match e {
            TraceError::InvalidInput(_) => 2,
            _ => 1,
        };
        process::exit(code);
    }
}

fn run(cli: &Cli) -> Result<(), TraceError> {
    if cli.list {
        for name in MachineCatalog::list_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let definition = load_definition(cli)?;
    let input = read_input(cli)?;
    let symbols = validate_input(&definition, &input)?;

    tracing::info!(
        machine = %definition.name,
        input = %input,
        budget = cli.budget,
        "tracing machine"
    );

    let mut machine = TuringMachine::new(&definition, &symbols, cli.budget);

    if cli.debug {
        let mut printed = 0;
        print_level(printed, &machine);

        while let Step::Continue = machine.step() {
            printed += 1;
            print_level(printed, &machine);
        }

        // The accepting level is appended by the halting step itself
        let last = machine.tree().len() - 1;
        if last > printed {
            print_level(last, &machine);
        }
        println!();
    }

    let result = machine.run();
    let report = Report::new(&definition, &input, &result)?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(())
}

/// Loads the definition named on the command line, from a file or the bundled catalog.
fn load_definition(cli: &Cli) -> Result<MachineDefinition, TraceError> {
    match (&cli.program, &cli.machine) {
        (Some(path), _) => MachineLoader::load_definition(Path::new(path)),
        (None, Some(name)) => MachineCatalog::get_by_name(name),
        (None, None) => Err(TraceError::FileError(
            "Either --program or --machine is required".to_string(),
        )),
    }
}

/// Reads the input string from the arguments, or from the first line of piped stdin.
fn read_input(cli: &Cli) -> Result<String, TraceError> {
    if let Some(input) = &cli.input {
        return Ok(input.clone());
    }

    if atty::is(atty::Stream::Stdin) {
        return Ok(String::new());
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| TraceError::FileError(format!("Failed to read from stdin: {}", e)))?;

    Ok(line.trim().to_string())
}

fn print_level(index: usize, machine: &TuringMachine) {
    let configurations = machine
        .tree()
        .level(index)
        .map(Level::configurations)
        .unwrap_or_default()
        .iter()
        .map(|config| config.to_string())
        .collect::<Vec<String>>()
        .join(" | ");

    println!(
        "Level: {}, Steps: {}, Configurations: [{}]",
        index,
        machine.step_count(),
        configurations
    );
}

use clap::Parser; // clap crate for CLI argument parsing
use driver::playground::{compile_source, run_source, sample, samples};
use driver::CompileError;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};

/*
Without a mode flag the source is compiled and the playground's compile
response is printed as JSON: {"ok":true,"astSize":N} or {"ok":false,"error":..}.
The mode flags stop the pipeline early or swap in the run stub.
*/

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the C source file, or `-` to read stdin
    #[arg(required_unless_present_any = ["sample", "list_samples"])]
    input_path: Option<PathBuf>,

    /// Use a built-in sample program instead of a file
    #[arg(long, conflicts_with = "input_path")]
    sample: Option<String>,

    /// Print the built-in samples as JSON and exit
    #[arg(long)]
    list_samples: bool,

    /// Run lexer only and print the tokens
    #[arg(short, long)]
    lex: bool,

    /// Run lexer and parser only and print the AST
    #[arg(short, long, conflicts_with = "lex")]
    parse: bool,

    /// Print the run response instead of the compile response
    #[arg(short, long, conflicts_with_all = ["lex", "parse"])]
    run: bool,

    /// Print tokens or AST as JSON
    #[arg(long)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.log_json);

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "toyc failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, json: bool) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().with_current_span(false).init();
    } else {
        builder.init();
    }
}

fn run(args: &Args) -> Result<ExitCode, CompileError> {
    if args.list_samples {
        println!("{}", to_json(&samples()));
        return Ok(ExitCode::SUCCESS);
    }

    let source = read_source(args)?;
    info!(bytes = source.len(), "loaded source");

    // --lex: we should only lex
    if args.lex {
        let tokens = lexer::lex(&source)?;
        if args.json {
            println!("{}", to_json(&tokens));
        } else {
            for token in &tokens {
                println!("{}\t{}", token.position, token.kind);
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    // --parse: we should lex and parse
    if args.parse {
        let program = driver::compile(&source)?;
        if args.json {
            println!("{}", to_json(&program));
        } else {
            println!("{:#?}", program);
        }
        return Ok(ExitCode::SUCCESS);
    }

    // --run: the playground's run stub; otherwise the compile response
    let (json, ok) = if args.run {
        let response = run_source(&source);
        (to_json(&response), response.ok)
    } else {
        let response = compile_source(&source);
        (to_json(&response), response.ok)
    };
    println!("{json}");
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn read_source(args: &Args) -> Result<String, CompileError> {
    if let Some(name) = &args.sample {
        return sample(name)
            .map(str::to_string)
            .ok_or_else(|| CompileError::UnknownSample { name: name.clone() });
    }

    match args.input_path.as_deref() {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("{{\"ok\":false,\"error\":\"{err}\"}}"))
}

extern crate clap;

use std::{
    collections::HashSet,
    io::{self, Write},
    process::ExitCode,
    time::Instant,
};

use clap::{CommandFactory, Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tapeworm::{
    interpreter::{tree_interpreter::Interpreter, Runtime},
    lexer::lexer::Lexer,
    optimizer::optimize,
    parser,
};

/// Optimizing interpreter for the eight symbol tape language
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to run
    #[arg()]
    file: Option<String>,

    /// Dump intermediate stages to stderr
    #[arg(short, long, value_enum)]
    emit: Vec<Emit>,

    /// Run the program exactly as parsed, skipping the optimizer
    #[arg(short, long)]
    unoptimized: bool,

    /// Stop after this many steps
    #[arg(short, long)]
    max_steps: Option<u64>,

    /// Flush stdout after every `.`
    #[arg(short, long)]
    flush: bool,

    /// Print stage timings and optimizer logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Emit {
    /// Output the lexer tokens
    Tokens,
    /// Output the tree as parsed
    Ast,
    /// Output the optimized tree
    Ir,
}

/// Colored stage reporting, only shown with `--verbose`
struct Stages {
    verbose: bool,
}

impl Stages {
    fn time<T>(&self, stage: &str, f: impl FnOnce() -> T) -> T {
        if !self.verbose {
            return f();
        }
        eprintln!("{} {}", "Starting".blue(), stage);
        let now = Instant::now();
        let result = f();
        eprintln!("{} {} in {:.2?}", "Finished".green(), stage, now.elapsed());
        result
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("{}: {}", "Error".red(), message);
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(file) = args.file else {
        // running without a file is not an error, just tell them how to use it
        let mut command = Args::command();
        println!("{}", command.render_usage());
        return ExitCode::SUCCESS;
    };

    init_logging(args.verbose);
    let emit: HashSet<Emit> = HashSet::from_iter(args.emit);
    let stages = Stages { verbose: args.verbose };

    let source = match std::fs::read(&file) {
        Ok(source) => source,
        Err(e) => return fail(format!("failed to read {}: {}", file, e)),
    };

    if emit.contains(&Emit::Tokens) {
        match Lexer::new(source.as_slice()).collect_results() {
            Ok(tokens) => {
                let rendered: String = tokens.iter().map(|token| token.symbol()).collect();
                eprintln!("{}", rendered);
            }
            Err(e) => return fail(e),
        }
    }

    let program = match stages.time("parsing", || {
        parser::parser::Parser::new(Lexer::new(source.as_slice())).parse_program()
    }) {
        Ok(program) => program,
        Err(e) => return fail(e),
    };

    if emit.contains(&Emit::Ast) {
        eprintln!("{:#?}", program);
    }

    let program = if args.unoptimized {
        program
    } else {
        let optimized = stages.time("optimizations", || optimize(&program));
        if emit.contains(&Emit::Ir) {
            eprintln!("{:#?}", optimized);
        }
        optimized
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut runtime = Runtime::new(Box::new(stdin.lock()), Box::new(stdout.lock()))
        .with_flush_each_write(args.flush);
    let mut interpreter = Interpreter::new().with_step_limit(args.max_steps);

    let result = stages.time("interpreter", || interpreter.interpret(&mut runtime, &program));
    drop(runtime);
    if let Err(e) = result {
        // keep the error on its own line after any partial output
        let _ = io::stdout().flush();
        eprintln!();
        return fail(e);
    }

    if args.verbose {
        eprintln!("{} {}", "Steps taken".green(), interpreter.steps());
    }

    ExitCode::SUCCESS
}

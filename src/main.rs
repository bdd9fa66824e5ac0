use std::{env, fs::read_to_string, process::ExitCode, sync::Once, time::Instant};

use frontend::{
    ast::printer::{pretty_print, pretty_print_typed},
    errors::errors::Error,
    format_error,
    lexer::lexer::tokenize,
    options::CompileOptions,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Installs a subscriber only when `RUST_LOG` asks for output.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            return;
        }

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    });
}

fn main() -> ExitCode {
    init_tracing();

    let options = match CompileOptions::from_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    let source = match read_to_string(&options.file_name) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read `{}`: {}", options.file_name, error);
            return ExitCode::FAILURE;
        }
    };

    match run(&options, &source) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprint!("{}", format_error(&error, &options.file_name, &source));
            ExitCode::FAILURE
        }
    }
}

fn run(options: &CompileOptions, source: &str) -> Result<String, Error> {
    let start = Instant::now();

    let tokens = tokenize(source.to_string())?;
    tracing::info!(elapsed = ?start.elapsed(), tokens = tokens.len(), "tokenized");

    if options.dump_tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    let parse_start = Instant::now();
    let mut root = parse(tokens, source)?;
    tracing::info!(elapsed = ?parse_start.elapsed(), "parsed");

    if options.dump_ast {
        println!("{}", pretty_print(&root));
    }

    let type_check_start = Instant::now();
    let context = type_check(&mut root, options.mode)?;
    tracing::info!(elapsed = ?type_check_start.elapsed(), "type checked");
    tracing::info!(elapsed = ?start.elapsed(), "total");

    Ok(pretty_print_typed(&root, &context))
}

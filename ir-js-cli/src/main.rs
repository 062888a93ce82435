use clap::Parser;
use ir_js::compile_json;
use ir_js::CompileOptions;
use ir_js::EmitMode;
use std::fs::File;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
  name = "ir-js",
  about = "Optimizes ESTree JSON programs and prints them as JavaScript"
)]
struct Cli {
  /// JSON file holding an ESTree `Program` or an array of
  /// `{name, declaration, program}` files; omit for stdin.
  #[arg(short, long)]
  input: Option<PathBuf>,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Print without optional whitespace.
  #[arg(short, long)]
  minify: bool,

  /// Give variables, functions and labels short names. Top-level
  /// declarations are script globals and get renamed too; names that other
  /// scripts use must come from a declaration file.
  #[arg(long)]
  rename: bool,

  /// Skip constant inlining and mangling.
  #[arg(long)]
  no_optimize: bool,
}

impl Cli {
  fn options(&self) -> CompileOptions {
    let mode = if self.minify {
      EmitMode::Minified
    } else {
      EmitMode::Normal
    };
    CompileOptions::new(mode)
      .with_optimize(!self.no_optimize)
      .with_rename(self.rename)
  }
}

fn exit_with_error(name: &str, message: impl std::fmt::Display) -> ! {
  eprintln!("error: {name}: {message}");
  process::exit(1);
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let args = Cli::parse();
  let input_name = args
    .input
    .as_ref()
    .map(|p| p.to_string_lossy().into_owned())
    .unwrap_or_else(|| "<stdin>".to_string());
  let mut input = Vec::new();
  let mut input_file: Box<dyn Read> = match args.input.as_ref() {
    Some(p) => match File::open(p) {
      Ok(f) => Box::new(f),
      Err(err) => exit_with_error(&input_name, format!("failed to open: {err}")),
    },
    None => Box::new(stdin()),
  };
  if let Err(err) = input_file.read_to_end(&mut input) {
    exit_with_error(&input_name, format!("failed to read: {err}"));
  }
  debug!(input = %input_name, bytes = input.len(), "read input");

  let output = match compile_json(&input, &args.options()) {
    Ok(output) => output,
    Err(err) => exit_with_error(&input_name, err),
  };
  let write_result = match args.output.as_ref() {
    Some(p) => File::create(p)
      .and_then(|mut file| file.write_all(output.as_bytes()))
      .map_err(|err| (p.display().to_string(), err)),
    None => stdout()
      .write_all(output.as_bytes())
      .map_err(|err| ("<stdout>".to_string(), err)),
  };
  if let Err((dest, err)) = write_result {
    exit_with_error(&dest, format!("failed to write output: {err}"));
  }
}

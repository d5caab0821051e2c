//! Purpose: `api-updates` CLI entry point; drives every public entry point.
//! Role: Binary crate root; parses args, calls pinned or current generations, prints results.
//! Invariants: Human output is one line per call; `--format json` emits one JSON object.
//! Invariants: Errors are emitted as JSON on stderr; exit code comes from `to_exit_code`.
//! Invariants: Logging goes to stderr through `tracing`, filtered by `RUST_LOG`.
use std::ffi::OsString;
use std::io::{self, IsTerminal};

use api_updates::report::{DemoReport, demo_report_json, generations_json, now_rfc3339};
use api_updates::{
    ContractGroup, Error, ErrorKind, ExposedInternalClass, SomeClass, Tag, inline, to_exit_code,
    use_some_class, v0, v1,
};
use clap::{Args, Parser, Subcommand, ValueEnum, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "api-updates",
    version,
    about = "Exercise every generation of a versioned library API",
    long_about = None,
    after_help = r#"EXAMPLES
  $ api-updates demo
  $ api-updates demo --generation v_0 --bar-tag inline_v_0 --format json
  $ api-updates init --generation v_1 --name John --age 42
  $ api-updates generations"#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Call every public entry point once.
    Demo(DemoArgs),
    /// Call `init` through a pinned public generation.
    Init(InitArgs),
    /// Call `foo`, or `foo_with` when `--arg` is given.
    Foo {
        #[arg(long, allow_negative_numbers = true)]
        arg: Option<i32>,
    },
    /// Call `bar` through a pinned inline tag.
    Bar {
        #[arg(long, default_value_t = Tag::current(ContractGroup::Inline))]
        tag: Tag,
    },
    /// Create an internal instance through the opaque handle factory.
    Internal {
        #[arg(long, allow_negative_numbers = true)]
        value: i32,
    },
    /// List published tags per contract group.
    Generations,
}

#[derive(Args)]
struct InitArgs {
    #[arg(long, default_value_t = Tag::current(ContractGroup::Public))]
    generation: Tag,
    #[arg(long, default_value = "John")]
    name: String,
    /// Only available from v_1 on.
    #[arg(long)]
    age: Option<u32>,
}

#[derive(Args)]
struct DemoArgs {
    #[command(flatten)]
    init: InitArgs,
    #[arg(long, allow_negative_numbers = true)]
    foo_arg: Option<i32>,
    #[arg(long, default_value_t = Tag::current(ContractGroup::Inline))]
    bar_tag: Tag,
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    a: i32,
    #[arg(long, default_value_t = 6, allow_negative_numbers = true)]
    b: i32,
    #[arg(long, default_value_t = 25, allow_negative_numbers = true)]
    value: i32,
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

fn main() {
    init_tracing();
    let exit_code = match run(std::env::args_os()) {
        Ok(code) => code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run(args: impl IntoIterator<Item = OsString>) -> Result<i32, Error> {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let code = if err.kind() == ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                {
                    2
                } else {
                    0
                };
                return Ok(code);
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Run `api-updates --help` for usage."));
            }
        },
    };

    match cli.command {
        Command::Demo(args) => {
            let report = run_demo(&args)?;
            match args.format {
                OutputFormat::Human => {
                    println!("{}", report.init);
                    println!("{}", report.foo);
                    println!("bar(): {}", report.bar);
                    println!("{}", report.use_some_class);
                    println!("exposed_internal_class.get_value(): {}", report.internal_value);
                }
                OutputFormat::Json => emit_json(&demo_report_json(&report)),
            }
        }
        Command::Init(args) => println!("{}", run_init(&args)?),
        Command::Foo { arg } => println!("{}", run_foo(arg)),
        Command::Bar { tag } => println!("bar(): {}", inline::bar_for(tag)?),
        Command::Internal { value } => {
            let instance = ExposedInternalClass::new(value)?;
            println!("exposed_internal_class.get_value(): {}", instance.get_value());
        }
        Command::Generations => emit_json(&generations_json()),
    }
    Ok(0)
}

fn run_demo(args: &DemoArgs) -> Result<DemoReport, Error> {
    let init = run_init(&args.init)?;
    let foo = run_foo(args.foo_arg);
    let bar = inline::bar_for(args.bar_tag)?;
    let use_some_class = use_some_class(&SomeClass::new(args.a, args.b));
    let internal_value = ExposedInternalClass::new(args.value)?.get_value();
    Ok(DemoReport {
        time: now_rfc3339()?,
        init_tag: args.init.generation,
        init,
        foo,
        bar_tag: args.bar_tag,
        bar,
        use_some_class,
        internal_value,
    })
}

fn run_init(args: &InitArgs) -> Result<String, Error> {
    let tag = args.generation;
    if tag.group() != ContractGroup::Public {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(format!("{tag} is not a public generation"))
            .with_hint("Use v_0 or v_1."));
    }
    if tag == Tag::V0 {
        if args.age.is_some() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("--age is not part of v_0 params")
                .with_hint("Drop --age or use --generation v_1."));
        }
        return Ok(v0::init(&v0::Params::new(args.name.as_str())));
    }
    let mut params = v1::Params::new(args.name.as_str());
    if let Some(age) = args.age {
        params = params.with_age(age);
    }
    Ok(v1::init(&params))
}

fn run_foo(arg: Option<i32>) -> String {
    match arg {
        Some(arg) => v0::foo_with(arg),
        None => v0::foo(),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn emit_json(value: &Value) {
    let json = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_error(err: &Error) {
    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert(
        "message".to_string(),
        json!(err.message().unwrap_or("error")),
    );
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("error: ").to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, run_foo, run_init};
    use api_updates::{ErrorKind, Tag};
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("api-updates").chain(args.iter().copied()))
            .expect("parse")
    }

    #[test]
    fn init_defaults_to_current_generation() {
        let Command::Init(args) = parse(&["init"]).command else {
            panic!("expected init");
        };
        assert_eq!(args.generation, Tag::V1);
        assert_eq!(args.name, "John");
        assert_eq!(run_init(&args).unwrap(), "hello from init: name: John, age: 0");
    }

    #[test]
    fn age_is_rejected_for_v0() {
        let Command::Init(args) = parse(&["init", "--generation", "v_0", "--age", "3"]).command
        else {
            panic!("expected init");
        };
        assert_eq!(run_init(&args).unwrap_err().kind(), ErrorKind::Usage);
    }

    #[test]
    fn inline_tag_is_not_a_public_generation() {
        let Command::Init(args) = parse(&["init", "--generation", "inline_v_0"]).command else {
            panic!("expected init");
        };
        assert_eq!(run_init(&args).unwrap_err().kind(), ErrorKind::Usage);
    }

    #[test]
    fn foo_without_arg_matches_default() {
        assert_eq!(run_foo(None), run_foo(Some(0)));
    }

    #[test]
    fn unknown_tag_fails_to_parse() {
        let parsed = Cli::try_parse_from(["api-updates", "bar", "--tag", "inline_v_7"]);
        assert!(parsed.is_err());
    }
}

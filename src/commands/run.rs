use clap::Args;
use std::env;
use std::fs;
use std::io::{self, IsTerminal, Write};
use crate::cli_util::print_interpreter_error;
use crate::config;
use crate::{Interpreter, StepControl};

/// Fallback for `--max-steps`.
pub const MAX_STEPS_ENV: &str = "BEFUNGE_MAX_STEPS";
/// Fallback for `--seed`.
pub const SEED_ENV: &str = "BEFUNGE_SEED";

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Print the program source before executing it
    #[arg(short = 'e', long = "echo")]
    pub echo: bool,

    /// Run CODE instead of loading a file
    #[arg(short = 'c', long = "code", value_name = "CODE")]
    pub code: Option<String>,

    /// Path to the Befunge source file
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Maximum interpreter steps before abort (fallback BEFUNGE_MAX_STEPS; default unlimited)
    #[arg(long = "max-steps", value_name = "N")]
    pub max_steps: Option<u64>,

    /// Seed for the random direction instruction (fallback BEFUNGE_SEED)
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs {
        echo,
        code,
        path,
        max_steps,
        seed,
        ..
    } = args;

    let source = match (path, code) {
        (None, None) => usage_and_exit(program, 2),
        (Some(_), Some(_)) => {
            eprintln!("{program}: cannot use PATH together with --code");
            usage_and_exit(program, 2);
        }
        (None, Some(code)) => code,
        (Some(path), None) => match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{program}: failed to read {path} as UTF-8: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        },
    };

    // Resolve settings: flags -> env -> config file -> defaults
    let settings = config::settings();
    let max_steps = max_steps
        .or_else(|| env_u64(MAX_STEPS_ENV))
        .or(settings.run.max_steps);
    let seed = seed.or_else(|| env_u64(SEED_ENV)).or(settings.run.seed);
    let echo = echo || settings.run.echo_source;

    // Install SIGINT (ctrl+c) handler to flush and exit immediately
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(130);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    if echo {
        println!("{source}");
    }

    let mut vm = Interpreter::new(&source);
    if let Some(seed) = seed {
        vm = vm.with_seed(seed);
    }

    let result = match max_steps {
        Some(limit) => {
            let limit = usize::try_from(limit).unwrap_or(usize::MAX);
            vm.execute_with_control(StepControl::new(Some(limit)))
        }
        None => vm.execute(),
    };

    let exit_code = match result {
        Ok(()) => 0,
        Err(err) => {
            let colors = use_color().then_some(&settings.colors);
            print_interpreter_error(Some(program), vm.grid(), &err, colors);
            1
        }
    };

    // For readability, ensure output ends with a newline
    println!();
    let _ = io::stdout().flush();
    exit_code
}

fn env_u64(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|s| s.trim().parse::<u64>().ok())
}

fn use_color() -> bool {
    io::stderr().is_terminal() && env::var_os("NO_COLOR").is_none()
}

pub fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [OPTIONS] <PATH>
  {0} run [OPTIONS] --code "<code>"

Options:
  --code,  -c <CODE>  Run CODE instead of loading PATH (use real newlines between rows)
  --echo,  -e         Print the program source before executing it
  --max-steps <N>     Abort after N instructions (fallback BEFUNGE_MAX_STEPS)
  --seed <N>          Seed the random direction instruction `?` (fallback BEFUNGE_SEED)
  --help,  -h         Show this help

Notes:
- `&` reads a line from stdin and parses it as an integer; `~` reads a line and
  takes its first character. Running out of input is an error.
- Popping an empty stack, dividing by zero and leaving the grid are errors.
- Defaults can be set in befunge.toml in your config directory (or the file
  named by BEFUNGE_CONFIG).

Examples:
- Run a program from a file:
    {0} run ./hello.bf
- Feed numbers to `&` from a file:
    {0} run ./sum.bf < numbers.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

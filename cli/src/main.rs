use std::error::Error;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use steam_switcher::{
    set_active_account, unix_now, Launched, LoginUsersFile, Rewrite, RewriteOptions, SteamHost,
    SteamPaths, SwitchOptions, Switcher, WindowsHost,
};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "STEAM_SWITCH_LOG";

#[derive(Parser, Debug)]
#[command(name = "steam-switch", version, about = "Switch the Steam auto-login account")]
struct Args {
    /// Steam install directory (default: registry, then $STEAM_PATH).
    #[arg(long, global = true, value_name = "dir")]
    steam_path: Option<PathBuf>,

    /// Fail on an unreadable trailing record instead of dropping it.
    #[arg(long, global = true)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the accounts known to Steam.
    List {
        /// Print the accounts as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the account Steam logs into automatically.
    Current,
    /// Make an account the auto-login account.
    Switch {
        account: String,

        /// Start Steam afterwards without asking.
        #[arg(short = 'y', long = "yes", conflicts_with = "no_launch")]
        yes: bool,

        /// Never start Steam afterwards.
        #[arg(long)]
        no_launch: bool,

        /// Custom launch command; STEAM_PATH is replaced with steam.exe's path.
        #[arg(long, value_name = "cmd")]
        command: Option<String>,
    },
    /// Rewrite a login users file without touching Steam or the registry.
    Rewrite {
        input: PathBuf,

        account: String,

        /// Output file path (prints to stdout if omitted).
        #[arg(short, long, value_name = "file", conflicts_with = "in_place")]
        output: Option<String>,

        /// Replace the input file.
        #[arg(long)]
        in_place: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let rewrite_options = RewriteOptions::new().with_strict(args.strict);

    match &args.command {
        Command::List { json } => {
            let switcher = switcher(&args, SwitchOptions::new().with_rewrite(rewrite_options))?;
            let accounts = switcher.accounts()?;
            if *json {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                serde_json::to_writer_pretty(&mut handle, &accounts)?;
                writeln!(handle)?;
            } else {
                println!("Accounts:");
                for account in &accounts {
                    println!(" - {}", account.account_name);
                }
            }
        }
        Command::Current => {
            let current = WindowsHost::new().auto_login_user()?.unwrap_or_default();
            println!("{current}");
        }
        Command::Switch {
            account,
            yes,
            no_launch,
            command,
        } => {
            let options = SwitchOptions::new()
                .with_rewrite(rewrite_options)
                .with_launch_command(command.clone());
            run_switch(&switcher(&args, options)?, account, *yes, *no_launch)?;
        }
        Command::Rewrite {
            input,
            account,
            output,
            in_place,
        } => run_rewrite(input, account, output.as_deref(), *in_place, &rewrite_options)?,
    }
    Ok(())
}

fn switcher(args: &Args, options: SwitchOptions) -> Result<Switcher<WindowsHost>, Box<dyn Error>> {
    let host = WindowsHost::new();
    let paths = SteamPaths::resolve(args.steam_path.as_deref(), &host)?;
    Ok(Switcher::new(host, paths, options))
}

fn run_switch(
    switcher: &Switcher<WindowsHost>,
    account: &str,
    yes: bool,
    no_launch: bool,
) -> Result<(), Box<dyn Error>> {
    println!("Switching to account: {account}");
    let report = switcher.switch_to(account)?;
    if !report.login_file_updated {
        println!(
            "No users section in {}; file left unchanged.",
            switcher.login_file().path().display()
        );
    }

    let launch = if yes {
        true
    } else if no_launch {
        false
    } else {
        confirm("Should I start Steam now? (y/n)")?
    };

    if launch {
        println!("Starting Steam...");
        if let Launched::Command { output, .. } = switcher.launch_steam()? {
            print!("{}", output.combined);
        }
    } else {
        println!("Steam will not be started. You can start it manually.");
    }

    println!("Account switched successfully!");
    Ok(())
}

fn run_rewrite(
    input: &Path,
    account: &str,
    output: Option<&str>,
    in_place: bool,
    options: &RewriteOptions,
) -> Result<(), Box<dyn Error>> {
    let source = LoginUsersFile::new(input);
    let text = source.read()?;
    let rewritten = match set_active_account(&text, account, unix_now(), options)? {
        Rewrite::Rewritten(rewritten) => {
            if rewritten.activation.matched == 0 {
                tracing::warn!(account, "no record carries this account name");
            }
            rewritten.text
        }
        Rewrite::SectionMissing => {
            tracing::warn!(key = %options.section_key, "section not found; output equals input");
            text
        }
    };

    if in_place {
        source.write(&rewritten)?;
        return Ok(());
    }
    let target = OutputTarget::from_arg(output);
    write_output(target.path(), &rewritten)?;
    if let OutputTarget::File(path) = &target {
        println!("✔ Rewrote {} → {path}", input.display());
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, Box<dyn Error>> {
    println!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .compact()
        .init();
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn write_output(path: Option<&str>, data: &[u8]) -> Result<(), Box<dyn Error>> {
    match path {
        Some(path) => fs::write(path, data)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(data)?;
            handle.flush()?;
        }
    }
    Ok(())
}

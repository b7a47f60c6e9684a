use bosstally_cli::commands;
use bosstally_cli::readline;
use bosstally_cli::CliContext;
use clap::{Parser, Subcommand};
use std::io::Write;

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("bosstally v{} ready", env!("CARGO_PKG_VERSION"));

    let mut ctx = CliContext::new();
    commands::load_config(None, &mut ctx);

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "boss damage tally console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the boss configuration, optionally from a new path
    LoadConfig {
        #[arg(short, long)]
        path: Option<String>,
    },
    /// Re-read the boss configuration and swap the snapshot
    Reload,
    /// Record a damaging hit against a boss instance
    Hit {
        #[arg(short, long)]
        boss: i64,
        #[arg(short = 't', long = "type")]
        boss_type: String,
        #[arg(short, long)]
        contributor: i64,
        #[arg(short, long)]
        amount: f64,
        #[arg(short, long, default_value_t = 0.0)]
        max_health: f64,
    },
    /// Signal a boss instance's death
    Kill {
        #[arg(short, long)]
        boss: i64,
        #[arg(short = 't', long = "type")]
        boss_type: String,
        #[arg(short, long)]
        name: String,
    },
    /// A contributor's total damage across live bosses
    Damage {
        #[arg(short, long)]
        contributor: i64,
    },
    /// Top damage dealers across all live bosses
    Top {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Register a contributor's display name
    Name {
        #[arg(short, long)]
        contributor: i64,
        #[arg(short, long)]
        name: String,
    },
    Status,
    Exit,
}

fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "bosstally".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::LoadConfig { path }) => commands::load_config(path.as_deref(), ctx),
        Some(Commands::Reload) => commands::load_config(None, ctx),
        Some(Commands::Hit {
            boss,
            boss_type,
            contributor,
            amount,
            max_health,
        }) => commands::hit(*boss, boss_type, *contributor, *amount, *max_health, ctx),
        Some(Commands::Kill {
            boss,
            boss_type,
            name,
        }) => commands::kill(*boss, boss_type, name, ctx),
        Some(Commands::Damage { contributor }) => commands::damage(*contributor, ctx),
        Some(Commands::Top { limit }) => commands::top(*limit, ctx),
        Some(Commands::Name { contributor, name }) => {
            commands::register_name(*contributor, name, ctx)
        }
        Some(Commands::Status) => commands::status(ctx),
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

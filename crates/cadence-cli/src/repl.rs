//! Interactive merge session (REPL mode).

use crate::cli::{ClonesArgs, DnaArgs, ProfileAction, ProfileArgs};
use crate::commands::{self, parse_ids};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::{MergeSession, SourceReport};
use cadence_domain::{Category, CloneId};
use cadence_sdk::{CadenceClient, Transport};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl<T: Transport>(
    client: &CadenceClient<T>,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    println!("{}", formatter.info("Cadence merge session - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut session = MergeSession::new();

    loop {
        let prompt = match session.sources().len() {
            0 => "cadence> ".to_string(),
            1 => "cadence [1 source]> ".to_string(),
            n => format!("cadence [{} sources]> ", n),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut session, client, config, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Add(Vec<CloneId>),
    Remove(CloneId),
    Set {
        clone_id: CloneId,
        category: Category,
        value: f64,
    },
    Show,
    Submit(String),
    Clear,
    Clones { all: bool },
    Dna(Vec<String>),
    Profile(Option<String>),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    let args = &parts[1..];
    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "add" => {
            if args.is_empty() {
                return Err(usage("add <id> [id2] ..."));
            }
            Ok(ReplCommand::Add(parse_ids(args)?))
        }
        "remove" | "rm" => match args {
            [id] => Ok(ReplCommand::Remove(parse_id(id)?)),
            _ => Err(usage("remove <id>")),
        },
        "set" => match args {
            [id, category, value] => Ok(ReplCommand::Set {
                clone_id: parse_id(id)?,
                category: category.parse().map_err(CliError::InvalidInput)?,
                value: value
                    .parse()
                    .map_err(|_| CliError::InvalidInput(format!("Invalid weight '{}'", value)))?,
            }),
            _ => Err(usage("set <id> <category> <value>")),
        },
        "show" | "ls" => Ok(ReplCommand::Show),
        "submit" => {
            if args.is_empty() {
                return Err(usage("submit <name>"));
            }
            Ok(ReplCommand::Submit(args.join(" ")))
        }
        "clear" => Ok(ReplCommand::Clear),
        "clones" => Ok(ReplCommand::Clones {
            all: args.first() == Some(&"all"),
        }),
        "dna" => {
            if args.is_empty() {
                return Err(usage("dna <id> [id2] ..."));
            }
            Ok(ReplCommand::Dna(args.iter().map(|s| s.to_string()).collect()))
        }
        "profile" => match args {
            [] | ["show"] => Ok(ReplCommand::Profile(None)),
            ["list"] => Ok(ReplCommand::Profile(Some("list".to_string()))),
            _ => Err(usage("profile [list|show]")),
        },
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Execute a REPL command.
async fn execute_repl_command<T: Transport>(
    cmd: ReplCommand,
    session: &mut MergeSession,
    client: &CadenceClient<T>,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Add(ids) => {
            for report in session.add_sources(client, &ids).await {
                match report {
                    SourceReport::Loaded(id) => {
                        println!("{}", formatter.success(&format!("Added {}", id)));
                    }
                    SourceReport::Defaulted(id) => {
                        println!(
                            "{}",
                            formatter.warning(&format!("Added {} with default weights (no DNA yet)", id))
                        );
                    }
                    SourceReport::AlreadySelected(id) => {
                        println!("{}", formatter.info(&format!("{} is already selected", id)));
                    }
                    failed => {
                        if let Err(e) = failed.into_result() {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                }
            }
        }
        ReplCommand::Remove(id) => {
            if session.remove_source(&id) {
                println!("{}", formatter.success(&format!("Removed {}", id)));
            } else {
                println!("{}", formatter.warning(&format!("{} is not selected", id)));
            }
        }
        ReplCommand::Set {
            clone_id,
            category,
            value,
        } => {
            let stored = session.set_weight(&clone_id, category, value)?;
            println!(
                "{}",
                formatter.success(&format!("{} {} = {}", clone_id, category.label(), stored))
            );
        }
        ReplCommand::Show => {
            println!("{}", formatter.format_matrix(session.matrix())?);
        }
        ReplCommand::Submit(name) => {
            let created = session.submit(client, &name).await?;
            println!("{}", formatter.clone_created(&created)?);
        }
        ReplCommand::Clear => {
            session.clear();
            println!("{}", formatter.info("Session cleared"));
        }
        ReplCommand::Clones { all } => {
            commands::execute_clones(ClonesArgs { all }, client, formatter).await?;
        }
        ReplCommand::Dna(ids) => {
            commands::execute_dna(DnaArgs { ids }, client, formatter).await?;
        }
        ReplCommand::Profile(action) => {
            let action = match action.as_deref() {
                Some("list") => ProfileAction::List,
                _ => ProfileAction::Show,
            };
            commands::execute_profile(ProfileArgs { action }, config, formatter)?;
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

fn parse_id(raw: &str) -> Result<CloneId> {
    CloneId::new(raw).map_err(CliError::InvalidInput)
}

fn usage(text: &str) -> CliError {
    CliError::InvalidInput(format!("Usage: {}", text))
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::home_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  add <id> [id2] ...             - Add sources (up to 5)");
    println!("  remove <id>                    - Remove a source");
    println!("  set <id> <category> <value>    - Set a weight (0-100)");
    println!("  show                           - Show weights and shares");
    println!("  submit <name>                  - Create the merged clone");
    println!("  clear                          - Remove all sources");
    println!("  clones [all]                   - List clones");
    println!("  dna <id> [id2] ...             - Show DNA profiles");
    println!("  profile [list|show]            - Show connection profiles");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
    println!("  Categories:");
    for category in Category::ALL {
        println!("    {:<24} {}", category.as_str(), category.label());
    }
    println!();
}

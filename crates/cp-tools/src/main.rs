//! cp-tools CLI - Numbered solution files from templates

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use cp_core::tui::{discover_workspace, TerminalHost};
use cp_core::workbench::TEMPLATE_NAME_PLACEHOLDER;
use cp_core::{FileSettingsStore, Notifier, Outcome, Prompter, SettingsStore, Workbench};
use std::path::{Path, PathBuf};

type Bench = Workbench<TerminalHost, FileSettingsStore>;

#[derive(Parser, Debug)]
#[command(name = "cp-tools")]
#[command(about = "Create numbered solution files from templates")]
#[command(version)]
pub struct Args {
    /// Workspace root (defaults to $CP_WORKSPACE, then the nearest directory containing .cp/)
    #[arg(short, long, global = true)]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the .cp/ template directory in the current directory (or --workspace)
    Init,
    /// List the templates in .cp/
    List,
    /// Pick the default template or create a new one (interactive)
    Configure,
    /// Create an empty template and make it the default
    CreateTemplate(CreateTemplateArgs),
    /// Make an existing template the default for this workspace
    Select(SelectArgs),
    /// Copy the default template into the next free numbered file
    New(NewArgs),
    /// Show where settings are stored and their current values
    Config,
}

#[derive(Parser, Debug)]
pub struct CreateTemplateArgs {
    /// Template file name, e.g. template-main.cpp (prompted when omitted)
    pub name: Option<String>,
}

#[derive(Parser, Debug)]
pub struct SelectArgs {
    /// Template file name inside .cp/
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct NewArgs {
    /// File name prefix, overriding cp.fileNamePrefix
    #[arg(short, long)]
    pub prefix: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Configure);

    // `init` creates a workspace, so it never searches parent directories
    let workspace = match command {
        Command::Init => {
            let current_dir = std::env::current_dir()?;
            discover_workspace(Some(args.workspace.unwrap_or(current_dir)))
        }
        _ => discover_workspace(args.workspace),
    };

    let mut host = TerminalHost::new(workspace.clone());
    let settings = match FileSettingsStore::for_workspace(workspace.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            host.report_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let mut bench = Workbench::new(host, settings);
    let result = run(&mut bench, command).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match bench.report(result) {
        Some(()) => Ok(()),
        None => std::process::exit(1),
    }
}

async fn run(bench: &mut Bench, command: Command) -> cp_core::Result<()> {
    match command {
        Command::Init => {
            let outcome = bench.init().await?;
            print_outcome(&outcome);
        }
        Command::List => {
            let templates = bench.list_templates().await?;
            print_templates(&bench.template_dir()?, &templates, bench.settings());
        }
        Command::Configure => {
            let _ = cliclack::intro("cp-tools");
            let outcome = bench.configure_template().await?;
            print_outcome(&outcome);
        }
        Command::CreateTemplate(args) => {
            let dir = bench.template_dir()?;
            let name = match args.name {
                Some(name) => Some(name),
                None => bench.host_mut().ask_text(TEMPLATE_NAME_PLACEHOLDER)?,
            };
            let outcome = bench.create_template(&dir, name.as_deref()).await?;
            print_outcome(&outcome);
        }
        Command::Select(args) => {
            let candidates = bench.list_templates().await?;
            let outcome = bench.select_template(&candidates, &args.name).await?;
            print_outcome(&outcome);
        }
        Command::New(args) => {
            let outcome = bench.open_new_file(args.prefix.as_deref()).await?;
            print_outcome(&outcome);
        }
        Command::Config => print_settings(bench.settings()),
    }

    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    let message = match outcome {
        Outcome::Cancelled => return,
        Outcome::Initialized(dir) => format!("Template directory: {}", dir.display()),
        Outcome::TemplateCreated(path) => {
            format!("Created template {} (now the default)", path.display())
        }
        Outcome::TemplateSelected(path) => format!("Default template: {}", path.display()),
        Outcome::FileCreated(path) => format!("Created {}", path.display()),
    };

    if cliclack::log::success(&message).is_err() {
        println!("{}", message);
    }
}

fn print_templates(dir: &Path, templates: &[String], settings: &FileSettingsStore) {
    if templates.is_empty() {
        println!(
            "{} No templates in {}",
            "Note:".yellow(),
            dir.display()
        );
        println!("  Run {} to add one.", "cp-tools create-template".cyan());
        return;
    }

    let default = settings.default_template();
    println!("{}", format!("Templates in {}", dir.display()).cyan().bold());
    println!();
    for name in templates {
        let is_default = default.as_deref() == Some(dir.join(name).as_path());
        if is_default {
            println!("  {} {} {}", "*".green(), name.green().bold(), "(default)".dimmed());
        } else {
            println!("    {}", name);
        }
    }
}

fn print_settings(settings: &FileSettingsStore) {
    let unset = || "(unset)".dimmed().to_string();

    println!("{}", "Settings".cyan().bold());
    println!();
    println!("  {:<22} {}", "global file", settings.global_path().display());
    println!(
        "  {:<22} {}",
        "folder file",
        settings
            .folder_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(unset)
    );
    println!(
        "  {:<22} {}",
        cp_core::config::DEFAULT_TEMPLATE_KEY,
        settings
            .default_template()
            .map(|p| p.display().to_string())
            .unwrap_or_else(unset)
    );
    println!(
        "  {:<22} {}",
        cp_core::config::FILE_NAME_PREFIX_KEY,
        settings.file_name_prefix()
    );
}

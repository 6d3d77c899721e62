use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use termage::{set_theme, strip_shortcodes, AlertKind, OutputMode, Termage, Theme};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "termage", version, about = "Styled terminal output from shortcodes")]
struct Cli {
    /// YAML theme merged over the built-in one
    #[arg(long, global = true, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Layout width in columns (default: terminal width)
    #[arg(long, global = true, value_name = "N")]
    width: Option<usize>,

    /// auto, term or text
    #[arg(long, global = true, default_value = "auto")]
    output: OutputMode,

    /// More logging on stderr (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand shortcodes in TEXT (or stdin)
    Render { text: Option<String> },

    /// Remove shortcode markup from TEXT (or stdin)
    Strip { text: Option<String> },

    /// Print TEXT in an alert box
    Alert {
        text: String,
        #[arg(long, default_value = "info")]
        kind: AlertKind,
        /// Box width in columns
        #[arg(long, short = 'w')]
        box_width: Option<usize>,
        /// Box as wide as the terminal
        #[arg(long, conflicts_with = "box_width")]
        full: bool,
        #[arg(long)]
        right: bool,
    },

    /// Print TEXT as a heading
    Heading {
        text: String,
        /// 1 (largest) to 5 (default: the theme's heading.size)
        #[arg(long, short)]
        size: Option<u8>,
    },

    /// Print a horizontal rule
    Rule {
        label: Option<String>,
        /// Line character
        #[arg(long)]
        character: Option<char>,
        #[arg(long)]
        right: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut term = Termage::new().output_mode(cli.output);
    if let Some(path) = &cli.theme {
        let user = Theme::from_file(path)
            .with_context(|| format!("loading theme {}", path.display()))?;
        let theme = Theme::default().merge(user);
        set_theme(theme.clone());
        term = term.theme(theme);
    }
    if let Some(width) = cli.width {
        term = term.terminal_width(width);
    }
    tracing::debug!(target: "termage.cli", command = ?cli.command, mode = %cli.output, "start");

    run(cli.command, &mut term)?;
    term.flush().context("flushing output")
}

fn run(command: Command, term: &mut Termage) -> Result<()> {
    match command {
        Command::Render { text } => {
            let text = text_or_stdin(text)?;
            term.writeln(text.trim_end_matches('\n'))?;
        }
        Command::Strip { text } => {
            let text = text_or_stdin(text)?;
            let stripped = strip_shortcodes(text.trim_end_matches('\n'));
            term.write_text(&format!("{}\n", stripped))?;
        }
        Command::Alert {
            text,
            kind,
            box_width,
            full,
            right,
        } => {
            let mut alert = term.alert(text).kind(kind);
            if let Some(columns) = box_width {
                alert = alert.w(columns);
            }
            if full {
                alert = alert.w_full();
            }
            if right {
                alert = alert.text_align_right();
            }
            term.write(&alert)?;
        }
        Command::Heading { text, size } => {
            let mut heading = term.heading(text);
            if let Some(size) = size {
                heading = heading.size(size);
            }
            term.write(&heading)?;
        }
        Command::Rule {
            label,
            character,
            right,
        } => {
            let mut rule = term.rule().label(label.unwrap_or_default());
            if let Some(c) = character {
                rule = rule.character(c);
            }
            if right {
                rule = rule.text_align_right();
            }
            term.write(&rule)?;
        }
    }
    Ok(())
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let stdin = io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("no TEXT given and stdin is a terminal");
    }
    let mut buf = String::new();
    stdin.lock().read_to_string(&mut buf).context("reading stdin")?;
    Ok(buf)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // a subscriber may already be installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

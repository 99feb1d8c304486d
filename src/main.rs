use clap::Parser;
use std::io::BufRead;
use tokio::sync::mpsc;

use cityglance::app::{App, Command};
use cityglance::catalog;
use cityglance::settings::{SettingsStore, Unit};
use cityglance::surface::TerminalSurface;
use cityglance::weather::WeatherClient;

/// cityglance - city clock and weather widget for the terminal
///
/// Shows the local time, current weather, and a map link for a chosen
/// city. The clock redraws every second and the weather refreshes every
/// ten minutes; the chosen city and unit are remembered across runs.
///
/// While running, these commands are read from stdin:
///   city <key>     switch city (see --list for keys)
///   unit <c|f>     switch temperature unit
///   cities         list the city keys
///   quit           exit
///
/// Examples:
///   cityglance
///   cityglance --city london
///   cityglance --city nyc --unit celsius
///   cityglance --once
#[derive(Parser)]
#[command(name = "cityglance", version, about, long_about = None)]
struct Cli {
    /// City key to select at startup. Example: --city london
    #[arg(long)]
    city: Option<String>,

    /// Temperature unit: "celsius" or "fahrenheit" (or c/f).
    #[arg(long, value_parser = parse_unit)]
    unit: Option<Unit>,

    /// Render one frame, wait for the weather, then exit.
    #[arg(long)]
    once: bool,

    /// List the available cities and exit.
    #[arg(long)]
    list: bool,
}

fn parse_unit(s: &str) -> Result<Unit, String> {
    s.parse()
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list {
        print_catalog();
        return;
    }

    // ── Resolve startup overrides ───────────────────────────────

    let city = cli.city.as_deref().map(|key| {
        catalog::lookup(key).unwrap_or_else(|| {
            eprintln!(
                "Error: Unknown city '{}'. Run `cityglance --list` for the catalog.",
                key
            );
            std::process::exit(1);
        })
    });

    // ── Build the widget ────────────────────────────────────────

    let client = WeatherClient::new().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let mut app = App::new(TerminalSurface::new(), SettingsStore::open(), client);
    app.preselect(city, cli.unit);

    if cli.once {
        app.render_once().await;
        return;
    }

    // ── Interactive loop ────────────────────────────────────────

    let (commands_tx, commands_rx) = mpsc::channel(8);
    spawn_stdin_reader(commands_tx);
    app.run(commands_rx).await;
}

fn print_catalog() {
    println!("Available cities:");
    for city in catalog::CITIES {
        println!("  {:<10} {:<18} {}", city.key, city.label, city.tz);
    }
}

/// Read selection commands from stdin and forward them to the loop.
///
/// Runs on a plain thread. Stdin reads cannot be cancelled; parked on the
/// runtime's blocking pool they would hold shutdown until one more line
/// arrives after `quit`. A detached thread dies with the process instead.
fn spawn_stdin_reader(tx: mpsc::Sender<Command>) {
    std::thread::spawn(move || forward_commands(std::io::stdin().lock(), &tx));
}

/// Translate lines from `input` into commands until quit, EOF, or a read
/// error. EOF counts as a quit so piped input terminates the widget.
fn forward_commands(input: impl BufRead, tx: &mpsc::Sender<Command>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if let Some(command) = parse_command(line.trim()) {
            let quit = matches!(command, Command::Quit);
            if tx.blocking_send(command).is_err() || quit {
                return;
            }
        }
    }
    let _ = tx.blocking_send(Command::Quit);
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => None,
        Some("quit") | Some("exit") => Some(Command::Quit),
        Some("cities") => {
            let keys: Vec<&str> = catalog::CITIES.iter().map(|c| c.key).collect();
            eprintln!("cities: {}", keys.join(", "));
            None
        }
        Some("city") => match parts.next() {
            Some(key) => match catalog::lookup(key) {
                Some(entry) => Some(Command::SelectCity(entry)),
                None => {
                    eprintln!("Unknown city '{}'. Try `cities` for the catalog.", key);
                    None
                }
            },
            None => {
                eprintln!("Usage: city <key>");
                None
            }
        },
        Some("unit") => match parts.next().map(str::parse::<Unit>) {
            Some(Ok(unit)) => Some(Command::SelectUnit(unit)),
            _ => {
                eprintln!("Usage: unit <celsius|fahrenheit>");
                None
            }
        },
        Some(other) => {
            eprintln!(
                "Unknown command '{}'. Commands: city <key>, unit <c|f>, cities, quit",
                other
            );
            None
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_command_translates_selections() {
        assert!(matches!(
            parse_command("city london"),
            Some(Command::SelectCity(city)) if city.key == "london"
        ));
        assert!(matches!(
            parse_command("unit celsius"),
            Some(Command::SelectUnit(Unit::Celsius))
        ));
        assert!(matches!(parse_command("quit"), Some(Command::Quit)));
        assert!(matches!(parse_command("exit"), Some(Command::Quit)));
    }

    #[test]
    fn test_parse_command_rejects_incomplete_and_unknown_input() {
        assert!(parse_command("").is_none());
        assert!(parse_command("city").is_none());
        assert!(parse_command("city atlantis").is_none());
        assert!(parse_command("unit").is_none());
        assert!(parse_command("unit kelvin").is_none());
        assert!(parse_command("weather").is_none());
    }

    #[test]
    fn test_forward_commands_delivers_lines_and_quits_on_eof() {
        let (tx, mut rx) = mpsc::channel(8);
        forward_commands(Cursor::new("city london\nunit c\nnonsense\n"), &tx);
        assert!(matches!(
            rx.try_recv(),
            Ok(Command::SelectCity(city)) if city.key == "london"
        ));
        assert!(matches!(
            rx.try_recv(),
            Ok(Command::SelectUnit(Unit::Celsius))
        ));
        assert!(matches!(rx.try_recv(), Ok(Command::Quit)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_forward_commands_stops_reading_after_quit() {
        let (tx, mut rx) = mpsc::channel(8);
        forward_commands(Cursor::new("quit\ncity nyc\n"), &tx);
        assert!(matches!(rx.try_recv(), Ok(Command::Quit)));
        assert!(rx.try_recv().is_err());
    }
}

use dunesand::build_info;
use dunesand::character::{Player, PlayerClass};
use dunesand::core::config::{parse_args, CLI_USAGE};
use dunesand::core::{parse_command, parse_trade, GameEvent, Response, Session};
use dunesand::world::{generate_map, CellView, MapView, Tile};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, BufRead, Write};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Logs go to stderr so they never mix with game text. `RUST_LOG`
/// overrides the default `warn` filter.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(true)
            .compact();
        let _ = subscriber.try_init();
    });
}

fn tile_symbol(tile: Tile) -> char {
    match tile {
        Tile::Empty => '.',
        Tile::Combat => 'W',
        Tile::Loot => 'L',
        Tile::Npc => 'N',
        Tile::Boss => 'B',
        Tile::Oasis => 'O',
        Tile::Trap => 'T',
    }
}

fn render_map(view: &MapView) -> String {
    let mut out = String::from("Map:");
    for row in &view.rows {
        out.push('\n');
        for cell in row {
            out.push(match cell {
                CellView::Player => '@',
                CellView::Known(tile) => tile_symbol(*tile),
                CellView::Hidden => '?',
            });
            out.push(' ');
        }
    }
    out.push_str("\n@ you  W enemy  L loot  N NPC  B boss  O oasis  T trap  . empty  ? unknown");
    out
}

fn print_response(out: &mut impl Write, response: &Response, json: bool) -> io::Result<()> {
    if json {
        match serde_json::to_string(response) {
            Ok(line) => writeln!(out, "{line}")?,
            Err(err) => tracing::warn!(%err, "could not serialize response"),
        }
        return out.flush();
    }
    for event in &response.events {
        match event {
            GameEvent::Map(view) => writeln!(out, "{}", render_map(view))?,
            other => writeln!(out, "{other}")?,
        }
    }
    out.flush()
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn choose_class(
    preset: Option<PlayerClass>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<PlayerClass>> {
    if let Some(class) = preset {
        return Ok(Some(class));
    }
    writeln!(out, "Welcome to the Fenrir wastes. A fight for survival awaits.")?;
    loop {
        writeln!(out, "Choose a class: [Wojownik/Warrior] [Technik/Technician] [Nomada/Nomad] [Snajper/Sniper]")?;
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match PlayerClass::from_alias(&line) {
            Some(class) => return Ok(Some(class)),
            None => writeln!(out, "I don't recognise that class. Try again.")?,
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("dunesand: {err}\n\n{CLI_USAGE}");
            std::process::exit(2);
        }
    };
    if options.show_help {
        println!("{CLI_USAGE}");
        return Ok(());
    }
    if options.show_version {
        println!("{}", build_info::version_line());
        return Ok(());
    }

    init_tracing();
    let config = options.config;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let Some(map) = generate_map(config.map_width, config.map_height, &mut rng) else {
        eprintln!("dunesand: map {}x{} is too small", config.map_width, config.map_height);
        std::process::exit(2);
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let Some(class) = choose_class(options.class, &mut input, &mut out)? else {
        return Ok(());
    };
    if !config.json_output {
        writeln!(out, "You chose the {class}. Prepare for the journey!")?;
        writeln!(out, "Type 'pomoc' or 'help' for a list of commands.")?;
    }

    let player = Player::new(class).with_scan_charges(config.starting_scan_charges);
    let mut session = Session::with_player(player, map, rng);

    loop {
        if !config.json_output {
            write!(out, "\n> ")?;
            out.flush()?;
        }
        let line = read_line(&mut input)?;
        let parsed = match line {
            None => Ok(dunesand::core::Command::Quit),
            Some(line) if session.is_trading() => Ok(parse_trade(&line)),
            Some(line) => parse_command(&line),
        };
        let response = match parsed {
            Ok(command) => session.handle(command),
            Err(err) => Response {
                events: vec![GameEvent::Rejected(err)],
                status: session.status(),
            },
        };
        print_response(&mut out, &response, config.json_output)?;
        if response.is_over() {
            break;
        }
    }

    Ok(())
}

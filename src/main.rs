use log::{LevelFilter, Log, Metadata, Record};
use pokemon_duel::config::BattleConfig;
use std::env;
use std::path::PathBuf;

/// Writes log records to stderr so they stay apart from the battle text on stdout.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let level = env::var("POKEMON_DUEL_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() {
    init_logging();

    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/demo_battle.ron"));

    let config = match BattleConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Error loading {}: {}", config_path.display(), e);
            return;
        }
    };

    let mut runner = match config.build_runner() {
        Ok(runner) => runner,
        Err(e) => {
            println!("Error setting up battle: {}", e);
            return;
        }
    };

    let player = runner.battle().trainer(pokemon_duel::Side::Player);
    let enemy = runner.battle().trainer(pokemon_duel::Side::Enemy);
    println!("{} vs {}", player, enemy);
    println!();

    let mut rng = config.rng();
    let report = match runner.run(&mut rng) {
        Ok(report) => report,
        Err(e) => {
            println!("Battle error: {}", e);
            return;
        }
    };

    for (turn, summary) in report.summaries.iter().enumerate() {
        summary.print_debug_with_message(&format!("Action {}:", turn + 1));
    }

    println!();
    println!("Outcome after {} rounds: {:?}", report.rounds, report.outcome);

    match serde_json::to_string_pretty(runner.battle()) {
        Ok(snapshot) => println!("{}", snapshot),
        Err(e) => println!("Error serializing final battle state: {}", e),
    }
}

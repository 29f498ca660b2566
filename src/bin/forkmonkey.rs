//! ForkMonkey CLI — create, breed and evolve your monkey
//!
//! Commands:
//!   forkmonkey init     — create a new monkey (or breed one from a parent record)
//!   forkmonkey evolve   — run one evolution step
//!   forkmonkey breed    — breed a child from a parent record and print it
//!   forkmonkey show     — show the current monkey
//!   forkmonkey history  — list evolution history
//!   forkmonkey streak   — show the daily evolution streak
//!   forkmonkey locked   — list gen-locked traits for a generation
//!   forkmonkey odds     — show the rarity table
//!   forkmonkey demo     — run an in-memory demo

use chrono::Utc;
use forkmonkey_core::genome::{catalog, extinction, from_record, rarity, to_record};
use forkmonkey_core::{
    BreedingRules, DnaRecord, GeneticsEngine, MonkeyDna, MonkeyStore, Rarity, TraitCategory,
};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_DATA_DIR: &str = "monkey_data";
const RULES_ENV: &str = "FORKMONKEY_RULES";

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn print_usage() {
    println!(
        r#"
ForkMonkey — procedural genetics for your digital pet

Usage: forkmonkey [--data-dir <dir>] [--rules <file>] [--preset <name>] [--seed <n>] <command> [args]

Commands:
  init     [--force] [--parent <record.json>]   Create a new monkey
  evolve   [strength]                           Evolve the current monkey
  breed    <parent.json> [mutation_rate]        Print a child bred from a parent record
  show                                          Show the current monkey
  history  [limit]                              Show evolution history
  streak                                        Show the evolution streak
  locked   <generation>                         List gen-locked traits for a generation
  odds                                          Show the rarity table
  demo                                          Run an in-memory demo

Rules are read from --rules or ${}; missing fields use defaults.
Without a rules file, --preset picks stable, volatile or default.

Examples:
  forkmonkey init
  forkmonkey --seed 7 evolve 0.3
  forkmonkey --preset volatile evolve
  forkmonkey init --force --parent upstream/dna.json
  forkmonkey locked 4
"#,
        RULES_ENV
    );
}

/// Options shared by every command
struct Options {
    data_dir: PathBuf,
    rules: Option<PathBuf>,
    preset: Option<String>,
    seed: Option<u64>,
    force: bool,
    parent: Option<PathBuf>,
    positional: Vec<String>,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = Options {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            rules: env::var_os(RULES_ENV).map(PathBuf::from),
            preset: None,
            seed: None,
            force: false,
            parent: None,
            positional: Vec::new(),
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--data-dir" => opts.data_dir = PathBuf::from(value_of(&mut iter, arg)?),
                "--rules" => opts.rules = Some(PathBuf::from(value_of(&mut iter, arg)?)),
                "--preset" => opts.preset = Some(value_of(&mut iter, arg)?.clone()),
                "--parent" => opts.parent = Some(PathBuf::from(value_of(&mut iter, arg)?)),
                "--seed" => {
                    let raw = value_of(&mut iter, arg)?;
                    opts.seed = Some(raw.parse().map_err(|_| format!("--seed must be a number, got '{}'", raw))?);
                }
                "--force" | "-f" => opts.force = true,
                _ => opts.positional.push(arg.clone()),
            }
        }
        Ok(opts)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn engine(&self) -> Result<GeneticsEngine, Box<dyn std::error::Error>> {
        let rules = match (&self.rules, self.preset.as_deref()) {
            (Some(path), _) => BreedingRules::load(path)?,
            (None, None | Some("default")) => BreedingRules::default(),
            (None, Some("stable")) => BreedingRules::stable(),
            (None, Some("volatile")) => BreedingRules::volatile(),
            (None, Some(other)) => return Err(format!("unknown preset '{}'", other).into()),
        };
        Ok(GeneticsEngine::new(rules)?)
    }

    fn store(&self) -> Result<MonkeyStore, Box<dyn std::error::Error>> {
        Ok(MonkeyStore::open(&self.data_dir)?)
    }

    fn arg(&self, idx: usize) -> Option<&str> {
        self.positional.get(idx).map(String::as_str)
    }
}

fn value_of<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a String, String> {
    iter.next().ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_probability(raw: Option<&str>, default: f64, name: &str) -> Result<f64, String> {
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| format!("{} must be a number, got '{}'", name, s)),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let opts = match Options::parse(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("  {}", e);
            print_usage();
            std::process::exit(2);
        }
    };

    let Some(command) = opts.positional.first().cloned() else {
        print_usage();
        return;
    };

    let result = match command.as_str() {
        "init" => cmd_init(&opts),
        "evolve" => cmd_evolve(&opts),
        "breed" => cmd_breed(&opts),
        "show" => cmd_show(&opts),
        "history" => cmd_history(&opts),
        "streak" => cmd_streak(&opts),
        "locked" => cmd_locked(&opts),
        "odds" => cmd_odds(),
        "demo" => cmd_demo(&opts),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("  Error: {}", e);
        std::process::exit(1);
    }
}

fn print_monkey(dna: &MonkeyDna) {
    println!("  Fingerprint:  {}", dna.fingerprint());
    println!("  Generation:   {}", dna.generation());
    println!("  Parent:       {}", dna.parent_fingerprint().unwrap_or("none (founder)"));
    println!("  Mutations:    {}", dna.mutation_count());
    println!("  Rarity score: {:.1}/100", dna.rarity_score());
    if let Some(top) = dna.top_rarity() {
        println!("  Top rarity:   {}", top);
    }
    println!("  Traits:");
    for t in dna.traits() {
        let marker = if extinction::is_extinct(t.category(), t.value(), dna.generation()) {
            "  [extinct]"
        } else if extinction::is_locked(t.category(), t.value()) {
            "  [gen-locked]"
        } else {
            ""
        };
        println!("    - {:<16} {:<16} ({}){}", t.category().as_str(), t.value(), t.rarity(), marker);
    }
}

fn age_days(dna: &MonkeyDna) -> u32 {
    let seconds = (Utc::now().timestamp() - dna.birth_timestamp()).max(0);
    (seconds / 86_400) as u32
}

fn read_parent(path: &Path) -> Result<MonkeyDna, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(from_record(&DnaRecord::from_json(&json)?)?)
}

fn cmd_init(opts: &Options) -> CmdResult {
    let store = opts.store()?;
    let engine = opts.engine()?;
    let mut rng = opts.rng();

    if let Some(existing) = store.load_dna()? {
        println!("\n  Monkey already exists: {}", existing.summary());
        if !opts.force {
            println!("  Use --force to overwrite it.");
            return Ok(());
        }
        warn!("Overwriting existing monkey {}", existing.fingerprint());
    }

    let (dna, story) = match &opts.parent {
        Some(path) => {
            let parent = read_parent(path)?;
            println!("\n  Breeding from parent {} (generation {})", parent.fingerprint(), parent.generation());
            let child = engine.breed(&mut rng, &parent, engine.rules().default_mutation_rate)?;
            (child, format!("Hatched from parent {}", parent.fingerprint()))
        }
        None => (engine.generate(&mut rng, 1, None)?, "Your monkey was born!".to_string()),
    };

    store.save_dna(&dna)?;
    store.save_stats(&dna, 0, Utc::now().date_naive())?;
    store.append_history(&dna, &story)?;

    println!("\n  Monkey initialized!\n");
    print_monkey(&dna);
    Ok(())
}

fn cmd_evolve(opts: &Options) -> CmdResult {
    let store = opts.store()?;
    let engine = opts.engine()?;
    let strength = parse_probability(opts.arg(1), engine.rules().default_evolution_strength, "strength")?;

    let Some(dna) = store.load_dna()? else {
        eprintln!("  No monkey found! Run 'forkmonkey init' first.");
        return Ok(());
    };

    let mut rng = opts.rng();
    let evolved = engine.evolve(&mut rng, &dna, strength)?;
    let changes = dna.diff(&evolved);

    println!("\n  Evolving with strength {:.2}", strength);
    if changes.is_empty() {
        println!("  No changes today");
    }
    for change in &changes {
        let shift = match change.rarity_shift() {
            s if s > 0 => " [rarer]",
            s if s < 0 => " [commoner]",
            _ => "",
        };
        println!(
            "    - {}: {} ({}) -> {} ({}){}",
            change.category,
            change.before.value(),
            change.before.rarity(),
            change.after.value(),
            change.after.rarity(),
            shift
        );
    }

    let story = match changes.len() {
        0 => "Your monkey rested today.".to_string(),
        1 => format!("Your monkey's {} changed!", changes[0].category),
        n => format!("Your monkey evolved {} traits!", n),
    };

    store.save_dna(&evolved)?;
    let stats = store.save_stats(&evolved, age_days(&evolved), Utc::now().date_naive())?;
    store.append_history(&evolved, &story)?;

    println!("\n  New fingerprint:  {}", evolved.fingerprint());
    println!("  Total mutations:  {}", evolved.mutation_count());
    println!("  Streak:           {} days", stats.streak.current);
    Ok(())
}

fn cmd_breed(opts: &Options) -> CmdResult {
    let Some(path) = opts.arg(1) else {
        return Err("usage: forkmonkey breed <parent.json> [mutation_rate]".into());
    };
    let engine = opts.engine()?;
    let rate = parse_probability(opts.arg(2), engine.rules().default_mutation_rate, "mutation_rate")?;

    let parent = read_parent(Path::new(path))?;
    let mut rng = opts.rng();
    let child = engine.breed(&mut rng, &parent, rate)?;
    println!("{}", to_record(&child).to_json()?);
    Ok(())
}

fn cmd_show(opts: &Options) -> CmdResult {
    let store = opts.store()?;
    match store.load_dna()? {
        Some(dna) => {
            println!("\n  Your Monkey\n");
            print_monkey(&dna);
            println!("  Age:          {} days", age_days(&dna));
        }
        None => eprintln!("  No monkey found! Run 'forkmonkey init' first."),
    }
    Ok(())
}

fn cmd_history(opts: &Options) -> CmdResult {
    let limit: usize = match opts.arg(1) {
        None => 10,
        Some(s) => s.parse().map_err(|_| format!("limit must be a number, got '{}'", s))?,
    };
    let log = opts.store()?.history()?;
    if log.entries.is_empty() {
        println!("\n  No history yet.");
        return Ok(());
    }

    println!("\n  History (last {} of {}):", limit.min(log.entries.len()), log.entries.len());
    println!("  {}", "-".repeat(72));
    for entry in log.latest(limit) {
        println!(
            "  {}  {}  gen={} mutations={} rarity={:.1}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.fingerprint,
            entry.generation,
            entry.mutation_count,
            entry.rarity_score,
            entry.story
        );
    }
    Ok(())
}

fn cmd_streak(opts: &Options) -> CmdResult {
    let streak = opts.store()?.streak()?;
    println!("\n  Current streak: {} days", streak.current);
    println!("  Best streak:    {} days", streak.best);
    match streak.last_date {
        Some(date) => println!("  Last evolution: {}", date),
        None => println!("  Last evolution: never"),
    }
    Ok(())
}

fn cmd_locked(opts: &Options) -> CmdResult {
    let generation: u32 = match opts.arg(1).map(str::parse::<u32>) {
        Some(Ok(g)) if g >= 1 => g,
        _ => return Err("usage: forkmonkey locked <generation>  (generation >= 1)".into()),
    };

    println!("\n  Gen-locked traits at generation {}:", generation);
    for category in TraitCategory::ALL {
        let available = extinction::available_locked(category, generation);
        let extinct: Vec<&str> = extinction::all()
            .iter()
            .filter(|l| l.category == category && generation > l.max_gen)
            .map(|l| l.value)
            .collect();
        if available.is_empty() && extinct.is_empty() {
            continue;
        }
        println!("    {:<16} available: {:?}  extinct: {:?}", category.as_str(), available, extinct);
    }
    if generation >= extinction::final_extinction() {
        println!("  Every gen-locked trait is extinct from generation {} on.", extinction::final_extinction());
    }
    Ok(())
}

fn cmd_odds() -> CmdResult {
    println!("\n  Rarity table v{}:", rarity::RARITY_TABLE_VERSION);
    for tier in Rarity::ALL {
        println!("    {:<10} {:>5.1}%  weight {}", tier.as_str(), rarity::tier_chance(tier), tier.weight());
    }
    Ok(())
}

fn cmd_demo(opts: &Options) -> CmdResult {
    let engine = opts.engine()?;
    let mut rng = opts.rng();

    println!("\nStep 1: Generating a founder...");
    println!("{}", "-".repeat(60));
    let founder = engine.generate(&mut rng, 1, None)?;
    print_monkey(&founder);

    println!("\nStep 2: Breeding three generations...");
    println!("{}", "-".repeat(60));
    let mut current = founder.clone();
    for _ in 0..3 {
        let child = engine.breed(&mut rng, &current, engine.rules().default_mutation_rate)?;
        println!("  {}", child.summary());
        current = child;
    }

    println!("\nStep 3: Evolving the youngest...");
    println!("{}", "-".repeat(60));
    let evolved = engine.evolve(&mut rng, &current, 0.5)?;
    for change in current.diff(&evolved) {
        println!("  {}: {} -> {}", change.category, change.before.value(), change.after.value());
    }
    println!("  {}", evolved.summary());

    println!("\nStep 4: Record round trip...");
    println!("{}", "-".repeat(60));
    let restored = from_record(&DnaRecord::from_json(&to_record(&evolved).to_json()?)?)?;
    println!("  Original: {}", evolved.fingerprint());
    println!("  Restored: {}", restored.fingerprint());
    println!("  Match:    {}", restored == evolved);

    let catalog_size: usize = TraitCategory::ALL
        .iter()
        .map(|c| Rarity::ALL.iter().map(|r| catalog::values(*c, *r).len()).sum::<usize>())
        .sum();
    println!("\n  Catalog holds {} trait values across {} categories.", catalog_size, TraitCategory::ALL.len());
    Ok(())
}

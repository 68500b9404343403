use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;
use wordforge::collect::{self, TerminalPrompter};
use wordforge::config::{self, AppConfig, ConfigAdjustment};
use wordforge::generate::{self, BatchJob};
use wordforge::hydra::{self, FormSpec, Service};
use wordforge::profile::{self, Profile};
use wordforge::suggest::{self, Provider};
use wordforge::types::Pool;
use wordforge::{output, persist};

#[derive(Parser)]
#[command(name = "wordforge")]
#[command(about = "Profile-driven wordlist generator for authorized password audits")]
#[command(long_about = "\
Profile-driven wordlist generator for authorized password audits

Builds password candidates from what is known about a target: names,
organization, relations, dates, interests. Candidates are expanded into
case forms, combined, dated, mutated, filtered to a length window, topped
up when short, and cut to the requested count.

Profile files are TOML:

  first_name = \"Alice\"
  last_name = \"Smith\"
  birth_year = 1990
  company_short = \"ACME\"
  interests = [\"chess\", \"hiking\"]

Run 'wordforge gen-profile' for a template with every field and
'wordforge gen-config' for a documented wordforge.toml.

Only use this tool against systems you are authorized to test.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "wordforge.toml", global = true)]
    config: PathBuf,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by everything that generates.
#[derive(clap::Args, Clone)]
struct GenerateArgs {
    /// Profile file; repeat for a batch run
    #[arg(short, long)]
    profile: Vec<PathBuf>,

    /// Directory of *.toml profiles to run as a batch
    #[arg(long)]
    profile_dir: Option<PathBuf>,

    /// Ask for settings and profile interactively
    #[arg(short, long)]
    interactive: bool,

    /// Number of candidates
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    count: Option<i64>,

    /// Shortest candidate kept
    #[arg(long, allow_hyphen_values = true)]
    min_length: Option<i64>,

    /// Longest candidate kept
    #[arg(long, allow_hyphen_values = true)]
    max_length: Option<i64>,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Also prepend "The", "My", "A", "Secret", "Super"
    #[arg(long)]
    prefixes: bool,

    /// Output file (single profile) or directory (batch)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the stage report as JSON instead of the text summary
    #[arg(long)]
    json: bool,

    /// Ask a remote model for extra candidates
    #[arg(long)]
    suggest: bool,

    /// Remote model provider
    #[arg(long, value_enum)]
    provider: Option<Provider>,

    /// Remote model name
    #[arg(long)]
    model: Option<String>,

    /// API key (default: read from the env var named in config)
    #[arg(long)]
    api_key: Option<String>,

    /// Endpoint root override
    #[arg(long)]
    base_url: Option<String>,

    /// Write the collected profile to this file
    #[arg(long)]
    save_profile: Option<PathBuf>,
}

#[derive(clap::Args, Clone)]
struct HydraArgs {
    /// Wordlist to pass as -P
    #[arg(long)]
    wordlist: PathBuf,

    /// Target IP or hostname
    #[arg(long)]
    target: String,

    #[arg(long, value_enum)]
    service: Service,

    /// Profile to derive usernames from (common names are used otherwise)
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Username list to write (default: usernames_<timestamp>.txt)
    #[arg(long)]
    users: Option<PathBuf>,

    /// Login form path, e.g. /login.php (http-post-form)
    #[arg(long)]
    form_path: Option<String>,

    /// Form parameters, e.g. user=^USER^&pass=^PASS^ (http-post-form)
    #[arg(long)]
    form_params: Option<String>,

    /// Text shown on a failed login (http-post-form)
    #[arg(long)]
    failure: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a wordlist from one profile, or a batch from many
    Generate(GenerateArgs),
    /// Derive usernames and print a hydra command for an existing wordlist
    Hydra(HydraArgs),
    /// Print a stock wordforge.toml with all options documented
    GenConfig,
    /// Print an empty profile template with every field
    GenProfile,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate(args) => {
            let app_config = config::load_config(&cli.config)?;
            run_generate(args, app_config)?;
        }
        Command::Hydra(args) => run_hydra(args)?,
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenProfile => {
            print!("{}", profile::stock_profile_toml());
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for summaries and JSON.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Fold CLI flags over the file config.
fn apply_overrides(args: &GenerateArgs, app_config: &mut AppConfig) {
    let generation = &mut app_config.generation;
    if let Some(count) = args.count {
        generation.target_count = count;
    }
    if let Some(min) = args.min_length {
        generation.min_length = min;
    }
    if let Some(max) = args.max_length {
        generation.max_length = max;
    }
    if args.seed.is_some() {
        generation.seed = args.seed;
    }
    if args.prefixes {
        generation.apply_prefixes = true;
    }

    let suggest = &mut app_config.suggest;
    if args.suggest {
        suggest.enabled = true;
    }
    if let Some(provider) = args.provider {
        suggest.provider = provider;
    }
    if args.model.is_some() {
        suggest.model = args.model.clone();
    }
    if args.base_url.is_some() {
        suggest.base_url = args.base_url.clone();
    }
}

/// Every `*.toml` under `dir`, sorted by path, named by file stem.
fn discover_profiles(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "toml")
        {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn job_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn log_adjustments(adjustments: &[ConfigAdjustment]) {
    for adjustment in adjustments {
        warn!("{adjustment}");
    }
}

fn run_generate(
    args: GenerateArgs,
    mut app_config: AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    apply_overrides(&args, &mut app_config);

    let mut profile_paths = args.profile.clone();
    if let Some(dir) = &args.profile_dir {
        profile_paths.extend(discover_profiles(dir)?);
    }

    if profile_paths.len() > 1 || args.profile_dir.is_some() {
        return run_batch(&args, &app_config, &profile_paths);
    }

    let mut adjustments = Vec::new();
    let mut prompter = TerminalPrompter;
    let interactive = args.interactive || profile_paths.is_empty();
    let profile = match profile_paths.first() {
        Some(path) if !args.interactive => Profile::load(path)?,
        _ => {
            let collected = collect::collect(&mut prompter, &app_config.generation)?;
            app_config.generation = collected.settings;
            adjustments.extend(collected.adjustment);
            collected.profile
        }
    };
    if profile.is_empty() {
        warn!("Profile is empty; output will be common patterns and random fill");
    }
    if let Some(path) = &args.save_profile {
        std::fs::write(path, profile.to_toml_string()?)?;
        info!("Profile saved to {}", path.display());
    }

    let (gen_config, normalized) = app_config.generation.validate();
    adjustments.extend(normalized);
    log_adjustments(&adjustments);

    let mut rng = match app_config.generation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let suggested = app_config.suggest.enabled;
    let external = if suggested {
        let api_key =
            suggest::resolve_api_key(args.api_key.as_deref(), &app_config.suggest.api_key_env);
        suggest::gather_configured(&app_config.suggest, api_key, &profile, gen_config.window())
    } else {
        Pool::new()
    };

    let generation = generate::run(
        &profile,
        &gen_config,
        generate::current_year(),
        external,
        &mut rng,
    );

    let now = chrono::Local::now().naive_local();
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(persist::default_wordlist_name(now)));
    persist::write_lines(&output_path, &generation.candidates)?;
    info!(
        "Wordlist saved to {} with {} candidates",
        output_path.display(),
        generation.candidates.len()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&generation.report)?);
    } else {
        output::print_generation_output(
            &gen_config,
            &adjustments,
            &generation.report,
            suggested,
            &output_path,
        );
    }

    if interactive {
        if let Some(request) = collect::collect_hydra_request(&mut prompter)? {
            let users = PathBuf::from(persist::default_usernames_name(now));
            let plan = hydra::prepare(
                &profile,
                &output_path,
                &users,
                &request.target,
                request.service,
                request.form.as_ref(),
            )?;
            println!();
            output::print_hydra_plan(&plan);
        }
    }

    Ok(())
}

fn run_batch(
    args: &GenerateArgs,
    app_config: &AppConfig,
    paths: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    if args.interactive {
        warn!("--interactive is ignored for batch runs");
    }
    if app_config.suggest.enabled {
        warn!("Remote suggestions are not used in batch runs");
    }

    let jobs = paths
        .iter()
        .map(|path| {
            Ok(BatchJob {
                name: job_name(path),
                profile: Profile::load(path)?,
            })
        })
        .collect::<Result<Vec<_>, profile::ProfileError>>()?;

    let (gen_config, adjustments) = app_config.generation.validate();
    log_adjustments(&adjustments);

    let base_seed = app_config.generation.seed.unwrap_or_else(rand::random);
    info!("Generating {} wordlists (base seed {base_seed})", jobs.len());
    let outputs = generate::generate_batch(&jobs, &gen_config, generate::current_year(), base_seed);

    let out_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut written = Vec::with_capacity(outputs.len());
    for out in &outputs {
        let path = out_dir.join(format!("{}.txt", out.name));
        persist::write_lines(&path, &out.generation.candidates)?;
        written.push(path);
    }

    if args.json {
        let reports: Vec<_> = outputs
            .iter()
            .map(|out| {
                serde_json::json!({
                    "name": out.name,
                    "seed": out.seed,
                    "report": out.generation.report,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        output::print_settings(&gen_config, &adjustments);
        println!();
        output::print_batch_output(&outputs, &written);
    }
    Ok(())
}

fn run_hydra(args: HydraArgs) -> Result<(), Box<dyn std::error::Error>> {
    let profile = match &args.profile {
        Some(path) => Profile::load(path)?,
        None => Profile::default(),
    };
    let form = match (args.form_path, args.form_params, args.failure) {
        (Some(path), Some(params), Some(failure)) => Some(FormSpec {
            path,
            params,
            failure,
        }),
        _ => None,
    };
    let users = args.users.unwrap_or_else(|| {
        PathBuf::from(persist::default_usernames_name(
            chrono::Local::now().naive_local(),
        ))
    });
    let plan = hydra::prepare(
        &profile,
        &args.wordlist,
        &users,
        &args.target,
        args.service,
        form.as_ref(),
    )?;
    output::print_hydra_plan(&plan);
    Ok(())
}

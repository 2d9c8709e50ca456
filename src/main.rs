use clap::{Parser, Subcommand};
use eviction_suggestions::{
    Action, Config, ReviewSession, SuggestionCollection, SuggestionKey, VerificationClient,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Review eviction suggestions for CARES properties", long_about = None)]
struct Cli {
    /// Backend base url; overrides SUGGESTIONS_BACKEND_URL
    #[arg(long, global = true)]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List new suggestions by property, then archived ones
    List,
    /// Confirm a suggestion as a real eviction match
    Confirm(Target),
    /// Reject a suggestion as a false match
    Reject(Target),
    /// Undo a previous confirm or reject
    Undo(Target),
    /// Print a directions link between the property and the eviction address
    Map(Target),
}

#[derive(clap::Args)]
struct Target {
    #[arg(long)]
    cares_id: i64,
    #[arg(long)]
    case_id: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> eviction_suggestions::Result<()> {
    let config = Config::from_env(cli.backend_url.as_deref())?;
    let client = VerificationClient::new(&config)?;
    let mut session = ReviewSession::new();

    match cli.command {
        Commands::List => {
            session.load(&client)?;
            print_suggestions(&session);
        }
        Commands::Confirm(t) => verify(&mut session, &client, Action::Confirm, t)?,
        Commands::Reject(t) => verify(&mut session, &client, Action::Reject, t)?,
        Commands::Undo(t) => verify(&mut session, &client, Action::Undo, t)?,
        Commands::Map(t) => {
            let link = session.open_external(&client, t.cares_id, &t.case_id)?;
            println!("{link}");
        }
    }

    session.teardown();
    Ok(())
}

fn verify(
    session: &mut ReviewSession,
    client: &VerificationClient,
    action: Action,
    target: Target,
) -> eviction_suggestions::Result<()> {
    session.load(client)?;
    session.verify(client, action, target.cares_id, &target.case_id)?;

    let key = SuggestionKey::new(target.cares_id, &target.case_id);
    let status = session
        .new_suggestions()
        .status_of(&key)
        .or_else(|| session.archived_suggestions().status_of(&key));

    match status {
        Some(status) => println!("{key} -> {status}"),
        None => println!("{key} -> {} (not listed locally)", action.target()),
    }
    Ok(())
}

fn print_suggestions(session: &ReviewSession) {
    println!("New suggestions ({}):", session.num_suggestions());
    for group in session.new_suggestions().groups() {
        println!(
            "  [{}] {} ({} unverified)",
            group.property_id,
            group.property_name,
            group.unverified_count()
        );
        for s in group.suggestions.iter() {
            println!("      {:<16} {:<11} {}", s.case_id, s.verification, s.address);
        }
    }

    println!("Archived:");
    for s in session.archived_suggestions().iter() {
        println!(
            "  [{}] {:<16} {:<11} {}",
            s.property_id, s.case_id, s.verification, s.address
        );
    }
}

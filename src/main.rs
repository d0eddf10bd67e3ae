use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use pokedex::action::Action;
use pokedex::effect;
use pokedex::reducer::reduce;
use pokedex::state::{display_name, AppState, SortKey};

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the PokeAPI catalog from the terminal")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the catalog and print the revealed slice
    List {
        /// Case-insensitive substring filter on the name
        #[arg(long)]
        search: Option<String>,
        /// Sort order for the list
        #[arg(long, value_enum, default_value = "id-asc")]
        sort: SortArg,
        /// How many entries to reveal
        #[arg(long, default_value_t = 20)]
        reveal: usize,
    },
    /// Aggregate and print one entry's detail view
    Show {
        /// Name or numeric id
        name: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    NameAsc,
    NameDesc,
    IdAsc,
    IdDesc,
    WeightAsc,
    WeightDesc,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::NameAsc => SortKey::NameAsc,
            SortArg::NameDesc => SortKey::NameDesc,
            SortArg::IdAsc => SortKey::IdAsc,
            SortArg::IdDesc => SortKey::IdDesc,
            SortArg::WeightAsc => SortKey::WeightAsc,
            SortArg::WeightDesc => SortKey::WeightDesc,
        }
    }
}

/// Runs one action to quiescence: reduce, execute the returned effects,
/// feed their completion actions back in.
async fn drive(state: &mut AppState, action: Action) {
    let mut pending = reduce(state, action);
    while let Some(effect) = pending.pop() {
        let completion = effect::run(effect).await;
        pending.extend(reduce(state, completion));
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut state = AppState::default();

    match args.command {
        Command::List {
            search,
            sort,
            reveal,
        } => {
            drive(&mut state, Action::CatalogFetch).await;
            if let Some(message) = &state.message {
                eprintln!("{message}");
                std::process::exit(1);
            }
            if let Some(search) = search {
                drive(&mut state, Action::QuerySet(search)).await;
            }
            drive(&mut state, Action::SortSet(sort.into())).await;
            state.revealed = 0;
            drive(&mut state, Action::RevealMore(reveal)).await;

            for entry in state.visible_slice() {
                println!(
                    "#{:<4} {:<20} weight {}",
                    entry.id,
                    display_name(&entry.name),
                    entry.weight
                );
            }
            println!(
                "-- showing {} of {} matching entries",
                state.visible_slice().len(),
                state.visible.len()
            );
        }

        Command::Show { name } => {
            drive(&mut state, Action::DetailFetch { name }).await;
            let Some(detail) = &state.detail else {
                let message = state
                    .message
                    .unwrap_or_else(|| "detail unavailable".to_string());
                eprintln!("{message}");
                std::process::exit(1);
            };

            println!("#{} {}", detail.id, display_name(&detail.name));
            println!(
                "types: {}",
                detail
                    .types
                    .iter()
                    .map(|t| t.to_uppercase())
                    .collect::<Vec<_>>()
                    .join(" / ")
            );
            if let Some(image) = &detail.images.front_default {
                println!("image: {image}");
            }
            if !detail.description.is_empty() {
                println!("\n{}", detail.description);
            }

            println!("\nabilities:");
            for ability in &detail.abilities {
                println!("  {}: {}", display_name(&ability.name), ability.effect);
            }

            println!("\nstats:");
            for stat in &detail.stats {
                println!("  {:<16} {:>3}", stat.name, stat.value);
            }

            if !detail.evolution.is_empty() {
                println!("\nevolution:");
                for stage in &detail.evolution {
                    println!(
                        "  {}{}",
                        "  ".repeat(usize::from(stage.depth)),
                        display_name(&stage.name)
                    );
                }
            }
        }
    }
}

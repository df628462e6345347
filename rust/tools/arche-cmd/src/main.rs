use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "arche-cmd")]
#[command(about = "Command-line utility for archetype bundles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known archetypes, or describe the fields of one
    Describe {
        /// Archetype name, full or short (e.g. `Scalar`)
        archetype: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build the column form of an archetype from a JSON file of field values
    Columns {
        /// Archetype name, full or short
        #[arg(short, long)]
        archetype: String,

        /// JSON object mapping field names to values
        #[arg(short, long)]
        input: String,

        /// Row lengths, e.g. `2,1` (defaults to one value per row)
        #[arg(short, long, value_delimiter = ',')]
        partition: Option<Vec<usize>>,

        /// Timeline name; renders the columns as an indexed record batch
        #[arg(long)]
        timeline: Option<String>,

        /// JSON array with one index value per row (defaults to 0, 1, 2, ...)
        #[arg(long, requires = "timeline")]
        index_file: Option<String>,

        /// Interpretation of the index values
        #[arg(long, value_enum, default_value_t = IndexKindArg::Sequence)]
        index_kind: IndexKindArg,

        /// Entity path of the record batch
        #[arg(long, default_value = "data")]
        entity_path: String,

        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum IndexKindArg {
    Sequence,
    DurationNs,
    TimestampNs,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Describe { archetype, json } => commands::describe::run(archetype, json),
        Commands::Columns {
            archetype,
            input,
            partition,
            timeline,
            index_file,
            index_kind,
            entity_path,
            json,
        } => commands::columns::run(commands::columns::ColumnsArgs {
            archetype,
            input,
            partition,
            timeline,
            index_file,
            index_kind,
            entity_path,
            json,
        }),
    }
}

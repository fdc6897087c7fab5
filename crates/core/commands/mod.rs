mod get;

pub use get::GetOpts;

use clap::Subcommand;
use eyre::WrapErr;

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Get the BibTeX entry of a DBLP record
    ///
    /// Conference papers are merged with their proceedings and tidied up, see the options below
    /// for what can be left alone.
    #[clap(arg_required_else_help = true)]
    Get(GetOpts),

    /// Search for entries in the DBLP database
    #[clap(arg_required_else_help = true)]
    Search {
        /// Search terms
        keywords: String,
    },
}

impl Commands {
    pub fn execute(self) -> eyre::Result<String> {
        match self {
            Commands::Get(opts) => opts.execute(),
            Commands::Search { keywords } => dblp::search_summary(&keywords)
                .wrap_err_with(|| format!("Cannot search DBLP for '{keywords}'")),
        }
    }
}

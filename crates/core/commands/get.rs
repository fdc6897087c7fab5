use dblp::normalize::Options;

use clap::Args;
use eyre::WrapErr;
use log::trace;

#[derive(Debug, Args)]
pub struct GetOpts {
    /// DBLP key, e.g. "journals/corr/FinkbeinerT15"
    id: String,

    /// Do not shorten conference names
    #[clap(long)]
    keep_booktitle: bool,

    /// Print the entries as returned by dblp.org
    #[clap(long)]
    raw: bool,

    /// Remove the month field
    #[clap(long)]
    remove_month: bool,
}

impl GetOpts {
    pub fn execute(self) -> eyre::Result<String> {
        let options = self.options();
        trace!("Getting '{}' with {options:?}, raw: {}", self.id, self.raw);

        dblp::bibtex_by_key(&self.id, self.raw, options)
            .wrap_err_with(|| format!("Cannot get the DBLP record '{}'", self.id))
    }

    fn options(&self) -> Options {
        Options {
            keep_booktitle: self.keep_booktitle,
            remove_month: self.remove_month,
        }
    }
}

//! `shelf build` command implementation.

use std::path::PathBuf;

use clap::Args;
use shelf_corpus::CorpusBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Markdown source directory.
    source_dir: PathBuf,

    /// Corpus file to write.
    #[arg(short, long, default_value = "corpus.json")]
    output: PathBuf,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory cannot be read or the corpus
    /// file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let out = Output::new();

        let corpus = CorpusBuilder::new(&self.source_dir).build()?;
        if corpus.registry().is_empty() {
            out.warning(&format!(
                "No markdown found under {}",
                self.source_dir.display()
            ));
        }

        std::fs::write(&self.output, corpus.to_json_pretty()?)?;

        out.success(&format!(
            "Wrote {} namespaces to {}",
            corpus.registry().len(),
            self.output.display()
        ));
        Ok(())
    }
}

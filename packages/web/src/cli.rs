use std::process::ExitCode;

use clap::Parser;

/// Fragments, a dated-entry journal
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Print the Argon2id hash of SECRET for JOURNAL_ADMIN_SECRET_HASH and exit.
    #[arg(long, value_name = "SECRET")]
    pub hash_secret: Option<String>,
}

impl Cli {
    /// Handle a one-shot command. `None` means start the app.
    pub fn run(self) -> Option<ExitCode> {
        let secret = self.hash_secret?;
        match journal::hash_secret(&secret) {
            Ok(phc) => {
                println!("{phc}");
                Some(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("web: {e}");
                Some(ExitCode::FAILURE)
            }
        }
    }
}

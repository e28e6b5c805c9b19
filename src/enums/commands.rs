use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Load and validate the configuration
    Validate,
    /// Print the file tree of a GitHub repository
    Tree {
        url: String,
    },
    /// Fetch one file and print the issues found in it
    Detect {
        url: String,
        path: String,
        #[clap(long)]
        json: bool,
    },
    /// Interactive browse, review, optimize and apply flow
    Browse {
        url: String,
        /// Review the diff in the browser instead of the terminal
        #[clap(long)]
        web: bool,
    },
    /// Run an editor-extension command against a document
    Host {
        command: String,
        #[clap(short, long)]
        file: String,
        #[clap(long, requires = "end_line")]
        start_line: Option<usize>,
        #[clap(long, requires = "start_line")]
        end_line: Option<usize>,
        #[clap(short, long)]
        prompt: Option<String>,
        #[clap(long)]
        focused: Option<bool>,
    },
}

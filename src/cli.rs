use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "unspf")]
#[command(version)]
#[command(about = "A listing and extraction utility for SPF archives", long_about = None)]
#[command(after_help = "Examples:\n  \
  unspf textures.spf                extract every entry from textures.spf\n  \
  unspf -l textures.spf             list entry paths\n  \
  unspf textures.spf -x thumbs      extract all entries except those matching thumbs\n  \
  unspf -p textures.spf icon.png | display -   pipe one entry into a viewer")]
pub struct Cli {
    /// SPF archive path
    #[arg(value_name = "ARCHIVE")]
    pub archive: String,

    /// Entries to extract (default: all)
    #[arg(value_name = "ENTRIES")]
    pub entries: Vec<String>,

    /// List entries (short format)
    #[arg(short = 'l')]
    pub list: bool,

    /// List verbosely (offset, length, index)
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Extract entries to pipe, no messages
    #[arg(short = 'p')]
    pub pipe: bool,

    /// Extract entries into exdir
    #[arg(short = 'd', value_name = "DIR")]
    pub extract_dir: Option<String>,

    /// Exclude entries that follow
    #[arg(short = 'x', value_name = "ENTRY", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Never overwrite existing files
    #[arg(short = 'n')]
    pub never_overwrite: bool,

    /// Overwrite files WITHOUT prompting
    #[arg(short = 'o')]
    pub overwrite: bool,

    /// Quiet mode
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0 || self.pipe
    }
}

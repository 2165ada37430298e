//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Herald SEO metadata CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: herald.toml)
    #[arg(short = 'C', long, global = true, default_value = "herald.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a commented starter herald.toml
    #[command(visible_alias = "i")]
    Init {
        /// Directory to create the config in (default: current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the config to stdout instead of writing it
        #[arg(long)]
        dry: bool,
    },

    /// Validate the config and report what each site serves
    #[command(visible_alias = "c")]
    Check,

    /// Print the meta-tag block for a URL
    Head {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print the JSON-LD block for a URL
    Schema {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print the meta-tag context for a URL as JSON
    Context {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print robots.txt, ads.txt or security.txt for a site
    Text {
        /// Which file to print
        kind: TextKind,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Serve text files, sitemap, media and page previews over HTTP
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// The page (or site) a render command works on.
#[derive(clap::Args, Debug, Clone)]
pub struct TargetArgs {
    /// Absolute URL, or a path on the default site
    #[arg(default_value = "/", value_hint = clap::ValueHint::Url)]
    pub url: String,

    /// Host header to resolve the site from (`host` or `host:port`)
    #[arg(short = 'H', long)]
    pub host: Option<String>,
}

/// Per-site text files.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Robots,
    Ads,
    Security,
}

impl TextKind {
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Robots => "robots.txt",
            Self::Ads => "ads.txt",
            Self::Security => "security.txt",
        }
    }
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_head_with_host() {
        let cli = Cli::parse_from(["herald", "head", "/blog/", "--host", "example.com:8000"]);
        match cli.command {
            Commands::Head { target } => {
                assert_eq!(target.url, "/blog/");
                assert_eq!(target.host.as_deref(), Some("example.com:8000"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.config, PathBuf::from("herald.toml"));
    }

    #[test]
    fn test_parse_text_defaults_to_root() {
        let cli = Cli::parse_from(["herald", "-C", "site.toml", "text", "security"]);
        match cli.command {
            Commands::Text { kind, target } => {
                assert_eq!(kind, TextKind::Security);
                assert_eq!(kind.file_name(), "security.txt");
                assert_eq!(target.url, "/");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::parse_from(["herald", "init", "mysite", "--dry"]);
        assert!(cli.is_init());
    }
}

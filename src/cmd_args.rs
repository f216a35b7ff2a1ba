use std::ffi::OsString;

use crate::repl::models::VerbCase;
use crate::repl::services::BodyMode;
pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Server host. Overrides the profile; defaults to 'localhost'.
    #[clap(long, help = "server host")]
    host: Option<String>,

    /// Server port. Overrides the profile; defaults to 9200.
    #[clap(long, help = "server port")]
    port: Option<u16>,

    /// Profile name
    /// Profile section to read connection defaults from. Default is 'default'.
    /// A missing profile is not an error.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// How request bodies are sent. Overrides the profile; defaults to 'translate'.
    #[clap(long, value_enum, help = "body mode")]
    mode: Option<BodyMode>,

    /// Shorthand for `--mode raw`
    #[clap(long, conflicts_with = "mode", help = "forward request bodies without translation")]
    raw: bool,

    /// Letter case of the HTTP method on the wire
    #[clap(long, value_enum, help = "verb case on the wire")]
    verb_case: Option<VerbCase>,

    /// Whole-request timeout in seconds. No timeout when omitted.
    #[clap(long, help = "request timeout in seconds")]
    timeout: Option<u64>,

    /// Verbose mode
    /// Optional. Print debug logs to stderr.
    #[clap(
        short = 'v',
        long,
        help = "Print verbose message",
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    host: Option<String>,
    port: Option<u16>,
    profile: String,
    mode: Option<BodyMode>,
    verb_case: Option<VerbCase>,
    timeout: Option<u64>,
    verbose: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            profile: args.profile,
            mode: if args.raw {
                Some(BodyMode::Raw)
            } else {
                args.mode
            },
            verb_case: args.verb_case,
            timeout: args.timeout,
            verbose: args.verbose,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    /// Body mode picked on the command line, if any
    pub fn mode(&self) -> Option<BodyMode> {
        self.mode
    }

    pub fn verb_case(&self) -> Option<VerbCase> {
        self.verb_case
    }

    pub fn timeout(&self) -> Option<u64> {
        self.timeout
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

//! Command line flags

use crate::utils::version_info;

/// An action requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `-i`: install dependencies locally
    Install,
    /// `-u`: upload the existing package
    Upload,
    /// `-c`: create a new remote function
    Create,
    /// `-r`: invoke the remote function
    Run,
    /// `-d`: delete the remote function
    Delete,
    /// `-b`: write the starting template files
    Build,
    /// `-h`: print usage help
    Help,
}

impl Action {
    fn from_short(c: char) -> Option<Self> {
        match c {
            'i' => Some(Action::Install),
            'u' => Some(Action::Upload),
            'c' => Some(Action::Create),
            'r' => Some(Action::Run),
            'd' => Some(Action::Delete),
            'b' => Some(Action::Build),
            'h' => Some(Action::Help),
            _ => None,
        }
    }
}

/// One parsed command line flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    Action(Action),
    Unknown(String),
}

/// Parse arguments into flags, keeping argument order.
///
/// Short flags may be clustered (`-iu` is `-i -u`). Anything that is not a
/// known short flag is kept as [`Flag::Unknown`] so it can be reported
/// without stopping the remaining flags.
pub fn parse_flags<I, S>(args: I) -> Vec<Flag>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut flags = Vec::new();

    for arg in args {
        let arg = arg.as_ref();
        match arg.strip_prefix('-') {
            Some(cluster) if !cluster.is_empty() && !cluster.starts_with('-') => {
                for c in cluster.chars() {
                    match Action::from_short(c) {
                        Some(action) => flags.push(Flag::Action(action)),
                        None => flags.push(Flag::Unknown(format!("-{}", c))),
                    }
                }
            }
            _ => flags.push(Flag::Unknown(arg.to_string())),
        }
    }

    flags
}

/// Usage text
pub fn usage() -> String {
    let version = version_info();
    format!(
        "lambda-deployer {} ({}, built {})

Usage: lambda-deployer [FLAGS]

Flags are evaluated one after another, in the order given.

  -i    install the dependencies from lambda_config.yml into python_modules/
  -u    upload the project as the code of the existing function
  -c    create the function (and its execution role) on the platform
  -r    invoke the function and print its status code and log
  -d    delete the function from the platform
  -b    write a starting lambda_config.yml and example.py
  -h    print this help

When -c finds an existing execution role it asks whether to reuse it. Without
a terminal the answer (y or n) is read from stdin, e.g. `echo y | lambda-deployer -c`.
",
        version.version, version.git_hash, version.build_time
    )
}

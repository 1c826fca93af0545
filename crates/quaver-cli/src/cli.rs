//! Command-line argument parsing

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};

pub(crate) const USAGE: &str = "\
Usage: quaver <command> [options] [args]

Commands:
  generate  [--key K] [--genre G] [--length N] [--seed S] [--format json|notation|labels]
  identify  <pitch|name>...           e.g. quaver identify 60 64 67   or   C4 E4 G4
  quantize  [--scale S] [--tonic K] [file.json]
  encode    [--duration D] [file.json]
  decode    [--steps-per-quarter N] <token>...

JSON input is read from stdin when no file is given.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Generate,
    Identify,
    Quantize,
    Encode,
    Decode,
    Help,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "generate" => Ok(Self::Generate),
            "identify" => Ok(Self::Identify),
            "quantize" => Ok(Self::Quantize),
            "encode" => Ok(Self::Encode),
            "decode" => Ok(Self::Decode),
            "help" | "--help" | "-h" => Ok(Self::Help),
            other => Err(anyhow!("unknown command '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Invocation {
    pub command: Command,
    pub options: HashMap<String, String>,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// Parse an option value, if present
    pub fn parsed<T>(&self, name: &str) -> anyhow::Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.option(name)
            .map(|v| v.parse::<T>().with_context(|| format!("invalid --{} '{}'", name, v)))
            .transpose()
    }
}

/// Parse arguments, excluding the program name.
pub(crate) fn parse_args<I>(args: I) -> anyhow::Result<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = match args.next() {
        Some(c) => c.parse()?,
        None => Command::Help,
    };

    let mut options = HashMap::new();
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(Invocation { command: Command::Help, options, args: positional });
        }
        match arg.strip_prefix("--") {
            Some(name) => {
                let Some(value) = args.next() else {
                    bail!("option --{} needs a value", name);
                };
                options.insert(name.to_string(), value);
            }
            None => positional.push(arg),
        }
    }

    Ok(Invocation { command, options, args: positional })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Invocation> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_options_and_args() {
        let inv = parse(&["generate", "--key", "D", "--length", "8", "extra"]).unwrap();
        assert_eq!(inv.command, Command::Generate);
        assert_eq!(inv.option("key"), Some("D"));
        assert_eq!(inv.parsed::<usize>("length").unwrap(), Some(8));
        assert_eq!(inv.parsed::<usize>("seed").unwrap(), None);
        assert_eq!(inv.args, vec!["extra"]);
    }

    #[test]
    fn test_negative_numbers_are_positional() {
        let inv = parse(&["identify", "-1", "3"]).unwrap();
        assert_eq!(inv.args, vec!["-1", "3"]);
    }

    #[test]
    fn test_help() {
        assert_eq!(parse(&[]).unwrap().command, Command::Help);
        assert_eq!(parse(&["decode", "--help"]).unwrap().command, Command::Help);
    }

    #[test]
    fn test_errors() {
        assert!(parse(&["compose"]).is_err());
        assert!(parse(&["generate", "--key"]).is_err());
        let inv = parse(&["generate", "--length", "many"]).unwrap();
        assert!(inv.parsed::<usize>("length").is_err());
    }
}

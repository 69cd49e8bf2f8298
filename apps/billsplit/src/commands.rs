//! Commands typed into the interactive session. Item and friend numbers are
//! one-based on the command line and zero-based everywhere else.

use shared::domain::PersonIndex;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  tip <percent>                 set tip percentage
  tax <amount>                  set flat tax
  friends <count>               set number of friends
  mode <even|two-person|proportional>
  add <cost> <friend#> <item>   add an order
  cost <item#> <amount>         change an order's cost
  assign <item#> <friend#>      reassign an order
  rename <item#> <item>         rename an order
  remove <item#>                remove an order
  list                          show the bill
  submit                        calculate and suggest a meal
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    SetTip(String),
    SetTax(String),
    SetFriends(String),
    SetMode(String),
    Add {
        cost: String,
        person: PersonIndex,
        item: String,
    },
    SetCost {
        index: usize,
        cost: String,
    },
    Assign {
        index: usize,
        person: PersonIndex,
    },
    Rename {
        index: usize,
        item: String,
    },
    Remove {
        index: usize,
    },
    Show,
    Submit,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a number from 1 up")]
    BadNumber(String),
}

/// Parses one input line; blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<UiCommand>, CommandError> {
    let line = line.trim();
    let Some((verb, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "tip" => UiCommand::SetTip(rest.to_string()),
        "tax" => UiCommand::SetTax(rest.to_string()),
        "friends" => UiCommand::SetFriends(required(rest, "friends <count>")?.to_string()),
        "mode" => UiCommand::SetMode(
            required(rest, "mode <even|two-person|proportional>")?.to_string(),
        ),
        "add" => {
            const USAGE: &str = "add <cost> <friend#> <item>";
            let (cost, rest) = split_word(rest).ok_or(CommandError::Usage(USAGE))?;
            let (friend, item) = split_word(rest).ok_or(CommandError::Usage(USAGE))?;
            UiCommand::Add {
                cost: cost.to_string(),
                person: PersonIndex(one_based(friend)?),
                item: item.to_string(),
            }
        }
        "cost" => {
            let (index, cost) =
                split_word(rest).ok_or(CommandError::Usage("cost <item#> <amount>"))?;
            UiCommand::SetCost {
                index: one_based(index)?,
                cost: cost.to_string(),
            }
        }
        "assign" => {
            const USAGE: &str = "assign <item#> <friend#>";
            let (index, friend) = split_word(rest).ok_or(CommandError::Usage(USAGE))?;
            UiCommand::Assign {
                index: one_based(index)?,
                person: PersonIndex(one_based(required(friend, USAGE)?)?),
            }
        }
        "rename" => {
            const USAGE: &str = "rename <item#> <item>";
            let (index, item) = split_word(rest).ok_or(CommandError::Usage(USAGE))?;
            UiCommand::Rename {
                index: one_based(index)?,
                item: required(item, USAGE)?.to_string(),
            }
        }
        "remove" | "rm" => UiCommand::Remove {
            index: one_based(required(rest, "remove <item#>")?)?,
        },
        "list" | "show" => UiCommand::Show,
        "submit" | "calc" => UiCommand::Submit,
        "help" | "?" => UiCommand::Help,
        "quit" | "exit" => UiCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Parses `<item>:<cost>:<friend#>`; the item itself may contain colons.
pub fn parse_order_arg(raw: &str) -> Result<(String, String, PersonIndex), CommandError> {
    const USAGE: &str = "--order <item>:<cost>:<friend#>";
    let mut parts = raw.rsplitn(3, ':');
    let friend = parts.next().ok_or(CommandError::Usage(USAGE))?;
    let cost = parts.next().ok_or(CommandError::Usage(USAGE))?;
    let item = parts.next().ok_or(CommandError::Usage(USAGE))?;
    Ok((
        item.to_string(),
        cost.to_string(),
        PersonIndex(one_based(friend)?),
    ))
}

fn split_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim())),
        None => Some((input, "")),
    }
}

fn required<'a>(value: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if value.trim().is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(value.trim())
    }
}

fn one_based(raw: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(CommandError::BadNumber(raw.trim().to_string())),
    }
}

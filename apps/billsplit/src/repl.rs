use std::io::Write;

use anyhow::Result;
use shared::error::SplitError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    commands::{parse_command, UiCommand, HELP},
    render::{render_bill, render_orders, render_results, render_summary},
    session::BillSession,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum View {
    Summary,
    Orders,
    Nothing,
}

/// Reads commands line by line until `quit` or end of input.
pub async fn run_interactive<R, W>(session: &mut BillSession, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Bill Splitter. Type 'help' for commands.")?;
    write!(out, "{}", render_summary(session))?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(command)) => {
                if execute(session, command, out).await? == Flow::Quit {
                    break;
                }
            }
            Err(err) => writeln!(out, "{err}")?,
        }
    }
    Ok(())
}

pub async fn execute<W: Write>(
    session: &mut BillSession,
    command: UiCommand,
    out: &mut W,
) -> Result<Flow> {
    let outcome: Result<View, SplitError> = match command {
        UiCommand::SetTip(raw) => session.set_tip(&raw).map(|_| View::Summary),
        UiCommand::SetTax(raw) => session.set_tax(&raw).map(|_| View::Summary),
        UiCommand::SetFriends(raw) => session.set_friends(&raw).map(|_| View::Summary),
        UiCommand::SetMode(raw) => session.set_mode(&raw).map(|_| View::Summary),
        UiCommand::Add { cost, person, item } => session
            .add_order(&item, &cost, person)
            .map(|_| View::Orders),
        UiCommand::SetCost { index, cost } => session.set_cost(index, &cost).map(|_| View::Orders),
        UiCommand::Assign { index, person } => session.assign(index, person).map(|_| View::Orders),
        UiCommand::Rename { index, item } => session.rename(index, &item).map(|_| View::Orders),
        UiCommand::Remove { index } => session.remove_order(index).map(|_| View::Orders),
        UiCommand::Show => {
            write!(out, "{}", render_bill(session))?;
            Ok(View::Nothing)
        }
        UiCommand::Submit => {
            session.submit().await;
            write!(out, "{}", render_results(session))?;
            Ok(View::Nothing)
        }
        UiCommand::Help => {
            writeln!(out, "{HELP}")?;
            Ok(View::Nothing)
        }
        UiCommand::Quit => return Ok(Flow::Quit),
    };

    match outcome {
        Ok(View::Summary) => write!(out, "{}", render_summary(session))?,
        Ok(View::Orders) => {
            write!(out, "{}", render_orders(session))?;
            write!(out, "{}", render_summary(session))?;
        }
        Ok(View::Nothing) => {}
        Err(err) => writeln!(out, "{err}")?,
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use shared::domain::{BillInputs, FriendCount};

    use super::*;

    async fn run(script: &str) -> String {
        let inputs = BillInputs {
            friends: FriendCount::new(2).expect("friends"),
            ..BillInputs::default()
        };
        let mut session = BillSession::new(inputs, None);
        let mut out = Vec::new();
        run_interactive(&mut session, script.as_bytes(), &mut out)
            .await
            .expect("run");
        String::from_utf8(out).expect("utf8")
    }

    #[tokio::test]
    async fn scripted_bill_is_split() {
        let out = run("tip 10\ntax 5\nadd 100 1 Steak\nadd 8 2 Salad\nsubmit\nquit\n").await;
        assert!(out.contains("Item 2: Salad  Cost: $8.00  Assigned to Friend 2"));
        assert!(out.contains("Friend 1: $107.90"));
        assert!(out.contains("Friend 2: $15.90"));
    }

    #[tokio::test]
    async fn invalid_input_is_reported_and_session_continues() {
        let out = run("add 0 1 Tea\nsubmit\nfly away\nremove 4\nadd 2 1 Tea\nlist\n").await;
        assert!(out.contains("Please enter a valid item name and cost."));
        assert!(out.contains("Error: Please add at least one order before calculating."));
        assert!(out.contains("unknown command 'fly'"));
        assert!(out.contains("No order numbered 4."));
        assert!(out.contains("Item 1: Tea  Cost: $2.00"));
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let out = run("quit\nadd 5 1 Late\n").await;
        assert!(!out.contains("Late"));
    }
}

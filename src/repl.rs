//! Interactive conversation loop for the terminal client.
//!
//! Each input line is either a slash command (catalog search, pick, help,
//! quit) or free text submitted as a product name. After every command the
//! loop prints whatever the conversation log gained since the last render.

use std::io::Write;

use session::api::AnalysisApi;
use session::controller::{AnalysisSession, SubmitError};
use session::render::entry_text;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

pub const HELP: &str = "\
Type a product name (or ingredients) and press Enter to analyze it.
  /search <text>  filter the product catalog
  /products       list the filtered catalog
  /pick <n>       analyze product number <n> from the list
  /help           show this help
  /quit           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Submit(String),
    Search(String),
    Products,
    Pick(usize),
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line.
#[must_use]
pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('/') else {
        return ReplCommand::Submit(line.to_owned());
    };
    let (cmd, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let arg = arg.trim();
    match cmd {
        "search" => ReplCommand::Search(arg.to_owned()),
        "products" => ReplCommand::Products,
        "pick" => arg
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map_or_else(|| ReplCommand::Unknown(line.to_owned()), ReplCommand::Pick),
        "help" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_owned()),
    }
}

/// Print the filtered catalog as a numbered list.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn print_products(session: &AnalysisSession, out: &mut impl Write) -> std::io::Result<()> {
    let filtered = session.catalog().filtered();
    if filtered.is_empty() {
        writeln!(out, "(no matching products)")?;
    }
    for (i, product) in filtered.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, product.name)?;
    }
    Ok(())
}

/// Run the loop until `/quit` or end of input.
///
/// # Errors
///
/// Returns I/O errors from reading `input` or writing `out`.
pub async fn run<A, R, W>(session: &mut AnalysisSession, api: &A, mut input: R, out: &mut W) -> std::io::Result<()>
where
    A: AnalysisApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut cursor = session.log().len();
    let mut line = String::new();

    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line).await? == 0 {
            break;
        }

        match parse_line(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Help => writeln!(out, "{HELP}")?,
            ReplCommand::Search(query) => {
                session.catalog_mut().set_query(query);
                print_products(session, out)?;
            }
            ReplCommand::Products => print_products(session, out)?,
            ReplCommand::Pick(n) => {
                let picked = session.catalog().filtered().get(n - 1).map(|p| p.name.clone());
                match picked {
                    Some(name) => report_rejection(session.analyze(api, &name).await, out)?,
                    None => writeln!(out, "no product #{n} in the current list")?,
                }
            }
            ReplCommand::Submit(text) => {
                session.set_draft(text);
                report_rejection(session.submit_draft(api).await, out)?;
            }
            ReplCommand::Unknown(text) => writeln!(out, "unknown command: {text} (try /help)")?,
        }

        for entry in session.log().since(cursor) {
            write!(out, "{}", entry_text(entry))?;
        }
        cursor = session.log().len();
    }
    Ok(())
}

fn report_rejection<T>(result: Result<T, SubmitError>, out: &mut impl Write) -> std::io::Result<()> {
    match result {
        Ok(_) | Err(SubmitError::EmptyInput) => Ok(()),
        Err(e @ SubmitError::Busy) => writeln!(out, "{e}"),
    }
}

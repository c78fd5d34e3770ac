use crate::render::Renderer;
use anyhow::Result;
use session::{Session, SessionError, SessionEvent};
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  categories            list categories
  category <name>       select a category
  subs                  list sub-categories of the selected category
  select <a>, <b>, ...  replace the selected sub-categories
  toggle <name>         add or remove one sub-category
  clear                 deselect all sub-categories
  show                  render the current selection
  help                  show this help
  quit                  leave";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Quit,
    Categories,
    SubCategories,
    Show,
    Event(SessionEvent),
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "categories" => Command::Categories,
        "subs" | "sub-categories" => Command::SubCategories,
        "show" => Command::Show,
        "clear" => Command::Event(SessionEvent::SelectionCleared),
        "category" if rest.is_empty() => return Err("usage: category <name>".to_string()),
        "category" => Command::Event(SessionEvent::CategoryChanged(rest.to_string())),
        "toggle" if rest.is_empty() => return Err("usage: toggle <name>".to_string()),
        "toggle" => Command::Event(SessionEvent::SubCategoryToggled(rest.to_string())),
        "select" => Command::Event(SessionEvent::SubCategoriesChanged(
            rest.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        other => return Err(format!("unknown command '{other}', type 'help' for a list")),
    };
    Ok(Some(command))
}

/// Runs the prompt loop until `quit` or end of input.
///
/// Each line is one interaction: it is applied to `session` and the resulting
/// view is rendered to `out`. Rejected selections are reported and the loop continues.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    renderer: &Renderer,
    input: R,
    mut out: W,
) -> Result<()> {
    writeln!(out, "{HELP}")?;
    write_selection(session, &mut out)?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => writeln!(out, "{HELP}")?,
            Ok(Some(Command::Categories)) => {
                let current = session.selection().category.as_deref();
                for category in session.categories() {
                    let marker = if Some(category.as_str()) == current { "*" } else { " " };
                    writeln!(out, "{marker} {category}")?;
                }
            }
            Ok(Some(Command::SubCategories)) => {
                for sub in session.available_sub_categories() {
                    let marker = if session.selection().sub_categories.contains(sub) { "[x]" } else { "[ ]" };
                    writeln!(out, "{marker} {sub}")?;
                }
            }
            Ok(Some(Command::Show)) => {
                let view = session.evaluate()?;
                writeln!(out, "{}", renderer.selection_view(&view))?;
            }
            Ok(Some(Command::Event(event))) => match session.handle(event) {
                Ok(view) => {
                    write_selection(session, &mut out)?;
                    writeln!(out, "{}", renderer.selection_view(&view))?;
                }
                Err(SessionError::Analytics(e)) => return Err(e.into()),
                Err(e) => writeln!(out, "{e}")?,
            },
            Err(message) => writeln!(out, "{message}")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_selection<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let selection = session.selection();
    let subs: Vec<&str> = selection.sub_categories.iter().map(String::as_str).collect();
    writeln!(
        out,
        "Category: {} | Sub-Categories: {}",
        selection.category.as_deref().unwrap_or("-"),
        if subs.is_empty() { "-".to_string() } else { subs.join(", ") }
    )?;
    Ok(())
}

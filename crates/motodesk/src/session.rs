//! Interactive browsing of one page.
//!
//! A session reads one command per line and redraws the page after every
//! table action and every change to a record. Table commands map directly
//! onto grid actions:
//!
//! | Input | Action |
//! |-------|--------|
//! | `/text` | search for `text` |
//! | `/` | clear the search |
//! | `s KEY` | toggle sorting on column `KEY` |
//! | `n` / `p` | next / previous page |
//! | `f` / `l` | first / last page |
//! | `g N` | go to page `N` (counting from one) |
//! | `?` | list the commands |
//! | `q` | quit |
//!
//! Record commands depend on the page (see [`PageName::record_help`]).
//! Arguments are split like a shell line, so values with spaces are
//! quoted: `add name="KTM 390 Duke" pricePerDay=60`.
//!
//! In structured output modes every response is one JSON document, and
//! neither the heading nor the prompt is written.

use std::io::{BufRead, Write};
use std::str::FromStr;

use console::Style;
use log::{debug, trace};
use motodesk_grid::{Action, DataTable, ViewState};
use motodesk_render::{display_width, pad_right, render_page, render_with, OutputMode, TableRenderer};
use serde_json::json;

use crate::app::{Dashboard, Detail, PageName, RecordCommand};
use crate::domain::Booking;
use crate::error::{AppError, Result};
use crate::notify::Notifier;
use crate::pages::Page;

pub const HELP: &str = "commands: /text search · / clear · s KEY sort · n next · p prev · \
f first · l last · g N go to page · ? help · q quit";

/// Table and record commands available on `page`.
pub fn help(page: PageName) -> String {
    format!("{}\nrecords: {}", HELP, page.record_help())
}

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Table(Action),
    Record(RecordCommand),
    Redraw,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self> {
        let unknown = || AppError::UnknownCommand(line.trim().to_string());

        if let Some(query) = line.trim_start().strip_prefix('/') {
            return Ok(if query.trim().is_empty() {
                Command::Table(Action::ClearQuery)
            } else {
                Command::Table(Action::SetQuery(query.to_string()))
            });
        }

        let words = shell_words::split(line).map_err(|_| unknown())?;
        if let Some(record) = RecordCommand::from_words(&words) {
            return record.map(Command::Record);
        }

        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        let command = match words.as_slice() {
            [] => Command::Redraw,
            ["q"] => Command::Quit,
            ["?"] => Command::Help,
            ["n"] => Command::Table(Action::NextPage),
            ["p"] => Command::Table(Action::PrevPage),
            ["f"] => Command::Table(Action::FirstPage),
            ["l"] => Command::Table(Action::LastPage),
            ["s", key] => Command::Table(Action::ToggleSort(key.to_string())),
            ["g", n] => {
                let n: usize = n.parse().map_err(|_| unknown())?;
                Command::Table(Action::GoToPage(n.saturating_sub(1)))
            }
            _ => return Err(unknown()),
        };
        Ok(command)
    }
}

pub(crate) fn title(text: &str, color: bool) -> String {
    Style::new()
        .bold()
        .force_styling(color)
        .apply_to(text)
        .to_string()
}

/// A record as a heading and aligned label/value lines. A customer also
/// gets a table of their bookings, drawn with `bookings`.
pub fn detail_text(
    detail: &Detail,
    bookings: &DataTable<Booking>,
    renderer: &TableRenderer,
    color: bool,
) -> String {
    let fields = detail.fields();
    let label_width = fields
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);

    let mut lines = vec![title(&detail.heading(), color)];
    if let Detail::Invoice(invoice) = detail {
        lines.push(invoice.tagline.clone());
    }
    lines.push(String::new());
    for (label, value) in fields {
        lines.push(format!("{}  {}", pad_right(label, label_width), value));
    }
    if let Detail::Customer { bookings: rows, .. } = detail {
        let view = bookings.view(rows, &ViewState::new());
        lines.push(String::new());
        lines.push(title("Bookings", color));
        lines.push(renderer.clone().styled(color).render_table(&view));
    }
    lines.join("\n")
}

/// Runs a session on `page` until `q` or end of input, returning the final
/// table state.
pub fn run<R, W>(
    app: &mut Dashboard,
    page: PageName,
    renderer: &TableRenderer,
    mode: OutputMode,
    mut input: R,
    mut output: W,
    notifier: &dyn Notifier,
) -> Result<ViewState>
where
    R: BufRead,
    W: Write,
{
    let structured = mode.is_structured();
    let help = help(page);
    let mut state = ViewState::new();
    if !structured {
        writeln!(output, "{}", app.heading(page))?;
    }
    writeln!(output, "{}", render_page(&app.view(page, &state), renderer, mode)?)?;

    let mut line = String::new();
    loop {
        if !structured {
            write!(output, "> ")?;
            output.flush()?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let result = line
            .trim_end_matches(['\r', '\n'])
            .parse::<Command>()
            .and_then(|command| {
                execute(app, page, command, &mut state, renderer, mode, &help, notifier)
            });
        match result {
            Ok(None) => break,
            Ok(Some(text)) => writeln!(output, "{}", text)?,
            Err(e @ (AppError::Io(_) | AppError::Render(_))) => return Err(e),
            Err(e) => {
                debug!("rejected {:?}: {}", line.trim_end(), e);
                let message = json!({ "error": e.to_string(), "help": help });
                let text = render_with(&message, mode, |_| format!("{}\n{}", e, help))?;
                writeln!(output, "{}", text)?;
            }
        }
    }
    if !structured {
        writeln!(output)?;
    }
    Ok(state)
}

/// Runs one command and returns what to show, or `None` to quit.
#[allow(clippy::too_many_arguments)]
fn execute(
    app: &mut Dashboard,
    page: PageName,
    command: Command,
    state: &mut ViewState,
    renderer: &TableRenderer,
    mode: OutputMode,
    help: &str,
    notifier: &dyn Notifier,
) -> Result<Option<String>> {
    let text = match command {
        Command::Quit => return Ok(None),
        Command::Help => render_with(&json!({ "help": help }), mode, |_| help.to_string())?,
        Command::Redraw => render_page(&app.view(page, state), renderer, mode)?,
        Command::Table(action) => {
            *state = app.dispatch(page, state.clone(), &action)?;
            trace!("{:?} -> {:?}", action, state);
            render_page(&app.view(page, state), renderer, mode)?
        }
        Command::Record(record) => match app.apply(page, &record, notifier)? {
            Some(detail) => render_with(&detail, mode, |color| {
                detail_text(&detail, app.bookings.table(), renderer, color)
            })?,
            None => render_page(&app.view(page, state), renderer, mode)?,
        },
    };
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use crate::domain::BookingStatus;
    use crate::notify::RecordingNotifier;
    use crate::pages::{Page, PaymentsPage};
    use crate::settings::Settings;
    use motodesk_grid::{Dir, SortState};

    fn parse(s: &str) -> Command {
        s.parse().unwrap()
    }

    fn app() -> Dashboard {
        Dashboard::seeded(Settings::default(), "2024-03-10".parse().unwrap()).unwrap()
    }

    fn session(app: &mut Dashboard, page: PageName, mode: OutputMode, input: &str) -> (ViewState, String) {
        let mut out = Vec::new();
        let state = run(
            app,
            page,
            &TableRenderer::new(120),
            mode,
            input.as_bytes(),
            &mut out,
            &RecordingNotifier::new(),
        )
        .unwrap();
        (state, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_table_commands() {
        assert_eq!(parse("/harley"), Command::Table(Action::SetQuery("harley".into())));
        assert_eq!(parse("/ "), Command::Table(Action::ClearQuery));
        assert_eq!(parse("/q"), Command::Table(Action::SetQuery("q".into())));
        assert_eq!(parse("s pricePerDay"), Command::Table(Action::ToggleSort("pricePerDay".into())));
        assert_eq!(parse(" n "), Command::Table(Action::NextPage));
        assert_eq!(parse("g 3"), Command::Table(Action::GoToPage(2)));
        assert_eq!(parse("g 0"), Command::Table(Action::GoToPage(0)));
        assert_eq!(parse(""), Command::Redraw);
        assert_eq!(parse("q"), Command::Quit);
    }

    #[test]
    fn parses_quoted_record_commands() {
        assert_eq!(
            parse(r#"add name="KTM 390 Duke" pricePerDay=60"#),
            Command::Record(RecordCommand::Add(vec![
                ("name".into(), "KTM 390 Duke".into()),
                ("pricePerDay".into(), "60".into()),
            ]))
        );
        assert_eq!(parse("verify 1"), Command::Record(RecordCommand::Verify("1".into())));
    }

    #[test]
    fn rejects_unknown_input() {
        for bad in ["x", "g", "g two", "s", "n 2", "q now", "add \"open", "view"] {
            assert!(
                matches!(bad.parse::<Command>(), Err(AppError::UnknownCommand(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn session_applies_commands_in_order() {
        let mut app = app();
        let input = "/smith\ns totalAmount\ns totalAmount\nbogus\nq\n/ignored\n";
        let (state, out) = session(&mut app, PageName::Bookings, OutputMode::Text, input);

        assert_eq!(state.query, "smith");
        assert_eq!(
            state.sort,
            Some(SortState {
                key: "totalAmount".into(),
                dir: Dir::Desc
            })
        );
        assert!(out.starts_with("Bookings: Manage rental bookings and reservations\n"));
        assert!(out.contains("unknown command 'bogus'"));
        assert!(out.contains("records: view ID"));
        assert!(out.contains("Search: smith"));
    }

    #[test]
    fn unsortable_column_keeps_the_state() {
        let mut app = app();
        let (state, out) = session(&mut app, PageName::Bookings, OutputMode::Text, "s status\n");
        assert_eq!(state.sort, None);
        assert!(out.contains("cannot sort by 'status'"));
    }

    #[test]
    fn record_changes_redraw_the_page() {
        let mut app = app();
        let input = "/BK-003\nstatus BK-003 confirmed\n";
        let (_, out) = session(&mut app, PageName::Bookings, OutputMode::Text, input);

        assert_eq!(app.bookings.get("BK-003").unwrap().status, BookingStatus::Confirmed);
        let last_table = out.rsplit("Search: BK-003").next().unwrap();
        assert!(last_table.contains("Confirmed"));
    }

    #[test]
    fn failed_record_command_leaves_records_alone() {
        let mut app = app();
        let (_, out) = session(&mut app, PageName::Motorcycles, OutputMode::Text, "delete 404\nq\n");
        assert!(out.contains("no motorcycle with id '404'"));
        assert_eq!(app.motorcycles.rows().len(), 8);
    }

    #[test]
    fn structured_sessions_write_only_json() {
        let mut app = app();
        let input = "s name\nview 1\nbogus\n?\nq\n";
        let (_, out) = session(&mut app, PageName::Customers, OutputMode::Json, input);

        let docs: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&out)
            .into_iter()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(docs.len(), 5);
        assert_eq!(docs[1]["headers"][0]["key"], "name");
        assert_eq!(docs[1]["headers"][0]["indicator"], "asc");
        assert_eq!(docs[2]["name"], "John Smith");
        assert_eq!(docs[2]["bookings"][0]["id"], "BK-001");
        assert_eq!(docs[3]["error"], "unknown command 'bogus'");
        assert!(docs[4]["help"].as_str().unwrap().contains("verify ID"));
        assert!(!out.contains("> "));
    }

    #[test]
    fn end_of_input_ends_the_session() {
        let mut app = app();
        let (state, _) = session(&mut app, PageName::Bookings, OutputMode::Text, "n\n");
        assert_eq!(state.page, 0);
    }

    #[test]
    fn invoice_labels_align() {
        let payments = PaymentsPage::new(data::payments()).unwrap();
        let invoice = payments.invoice("PAY-001", "MotoRent").unwrap();
        let app = app();
        let text = detail_text(
            &Detail::Invoice(invoice),
            app.bookings.table(),
            &TableRenderer::new(80),
            false,
        );
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "MotoRent");
        assert_eq!(lines[1], "Premium Motorcycle Rentals");
        assert_eq!(lines[3], "Invoice         PAY-001");
        assert_eq!(lines[9], "Total Amount    $475");
    }

    #[test]
    fn customer_detail_lists_bookings_below_fields() {
        let mut app = app();
        let (_, out) = session(&mut app, PageName::Customers, OutputMode::Text, "view 1\n");
        assert!(out.contains("John Smith\n\nID        1\n"));
        let bookings = out.split("\nBookings\n").nth(1).unwrap();
        assert!(bookings.contains("BK-001"));
        assert!(bookings.contains("BK-007"));
    }
}

//! Interactive session: one line per key press or command, driving the
//! discovery controller until the user quits.

use super::prompts;
use super::session::Session;
use super::ui::{is_interactive, Spinner};
use crate::output::Output;
use crate::render::{print_details, print_notifications, print_screen};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use moodreel_core::keyboard::resolve;
use moodreel_core::{criteria_from_inputs, ActiveQuery, DiscoveryError, Key, KeyContext, Screen, Shortcut, View};
use moodreel_models::{FilterCriteria, Mood, MovieDetails};
use owo_colors::OwoColorize;

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Shortcut(Shortcut),
    Search(String),
    ClearSearch,
    View(View),
    Filters,
    /// Toggle the n-th card, or the open detail when no number is given.
    Toggle(Option<usize>),
    Open(usize),
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

/// Interpret one input line. Search text after `/` is taken verbatim, so
/// shortcuts never fire from inside it.
pub fn parse_command(line: &str, ctx: KeyContext) -> BrowseCommand {
    let line = line.trim();
    if line.is_empty() {
        return BrowseCommand::Nothing;
    }
    if let Some(text) = line.strip_prefix('/') {
        return BrowseCommand::Search(text.to_string());
    }

    let mut words = line.split_whitespace();
    let first = words.next().unwrap_or_default().to_ascii_lowercase();
    let number = words.next().and_then(|w| w.parse::<usize>().ok());

    match (first.as_str(), number) {
        ("q" | "quit" | "exit", _) => return BrowseCommand::Quit,
        ("?" | "h" | "help", _) => return BrowseCommand::Help,
        ("w", _) => return BrowseCommand::View(View::Watchlist),
        ("m", _) => return BrowseCommand::View(View::Movies),
        ("f", _) => return BrowseCommand::Filters,
        ("c", _) => return BrowseCommand::ClearSearch,
        ("t", n) => return BrowseCommand::Toggle(n),
        ("o", Some(n)) => return BrowseCommand::Open(n),
        _ => {}
    }

    if let Ok(key) = line.parse::<Key>() {
        return match resolve(key, ctx) {
            Some(shortcut) => BrowseCommand::Shortcut(shortcut),
            None if key == Key::Escape => BrowseCommand::Nothing,
            None => BrowseCommand::Unknown(line.to_string()),
        };
    }
    if let Ok(mood) = line.parse::<Mood>() {
        return BrowseCommand::Shortcut(Shortcut::SelectMood(mood));
    }
    BrowseCommand::Unknown(line.to_string())
}

fn print_help(output: &Output) {
    output.println(format!("{}", "Keys".bright_cyan().bold()));
    for (idx, mood) in Mood::ALL.iter().enumerate() {
        output.println(format!("  {}      {} ({})", idx + 1, mood, mood.genre_labels()));
    }
    output.println("  r      random pick");
    output.println("  ctrl+m choose a mood from a list");
    output.println("  /text  search by title");
    output.println("  c      clear search");
    output.println("  w / m  watchlist / movies view");
    output.println("  f      set year and rating filters");
    output.println("  o N    open details of card N");
    output.println("  t N    toggle card N in the watchlist (t alone: open detail)");
    output.println("  esc    close details");
    output.println("  q      quit");
}

fn prompt_label(session: &Session) -> String {
    let state = session.discovery.state();
    let scope = match (state.view(), state.query()) {
        (View::Watchlist, _) => "watchlist".to_string(),
        (View::Movies, ActiveQuery::Mood(mood)) => mood.to_string(),
        (View::Movies, ActiveQuery::Search(text)) => format!("/{}", text),
        (View::Movies, ActiveQuery::None) => "discover".to_string(),
    };
    format!("moodreel [{}]", scope)
}

fn render(session: &mut Session, result: Result<Screen, DiscoveryError>, output: &Output) {
    if let Err(e) = &result {
        session.discovery.report(e);
    }
    let notifications = session.discovery.drain_notifications();
    print_notifications(output, &notifications);
    if let Ok(screen) = result {
        print_screen(output, &screen, session.image_style(), |m| session.is_saved(m));
    }
}

fn render_details(
    session: &mut Session,
    result: Result<MovieDetails, DiscoveryError>,
    output: &Output,
) -> Option<MovieDetails> {
    match result {
        Ok(details) => {
            let saved = session.discovery.is_in_watchlist(&details.id);
            print_details(output, &details, session.image_style(), saved);
            output.println("esc to close, t to toggle watchlist".dimmed().to_string());
            Some(details)
        }
        Err(e) => {
            session.discovery.report(&e);
            print_notifications(output, &session.discovery.drain_notifications());
            None
        }
    }
}

fn prompt_filters(current: FilterCriteria) -> Result<FilterCriteria> {
    let year_default = current.year.map(|y| y.to_string()).unwrap_or_default();
    let rating_default = current
        .rating_threshold()
        .map(|r| r.to_string())
        .unwrap_or_default();

    let year = prompts::prompt_string("Year (2014 or 2010-2015, empty for any)", Some(year_default.as_str()))?;
    let rating = prompts::prompt_string("Minimum rating (empty for any)", Some(rating_default.as_str()))?;
    Ok(criteria_from_inputs(Some(&year), Some(&rating)))
}

pub async fn run_browse(startup_mood: Option<String>, criteria: FilterCriteria, output: &Output) -> Result<()> {
    if !is_interactive() {
        return Err(eyre!("browse needs an interactive terminal; use 'mood' or 'search' instead"));
    }

    let mut session = Session::open(startup_mood.as_deref())?;
    session.discovery.apply_filters(criteria);
    print_help(output);

    let spinner = Spinner::start("Loading movies...", output);
    let result = session.discovery.start().await;
    spinner.finish();
    render(&mut session, result, output);

    let mut detail: Option<MovieDetails> = None;
    loop {
        let ctx = KeyContext {
            text_input_focused: false,
            detail_open: session.discovery.state().is_detail_open(),
        };
        let line = prompts::prompt_string(&prompt_label(&session), None)?;

        match parse_command(&line, ctx) {
            BrowseCommand::Quit => break,
            BrowseCommand::Nothing => {}
            BrowseCommand::Help => print_help(output),
            BrowseCommand::Unknown(input) => {
                output.warn(format!("Unknown command '{}'. Type ? for help.", input));
            }
            BrowseCommand::Search(text) => {
                let spinner = Spinner::start("Searching...", output);
                let result = session.discovery.search(&text).await;
                spinner.finish();
                render(&mut session, result, output);
            }
            BrowseCommand::ClearSearch => {
                let screen = session.discovery.clear_search();
                render(&mut session, Ok(screen), output);
            }
            BrowseCommand::View(view) => {
                let screen = session.discovery.switch_view(view);
                render(&mut session, Ok(screen), output);
            }
            BrowseCommand::Filters => {
                let criteria = prompt_filters(session.discovery.state().criteria())?;
                let screen = session.discovery.apply_filters(criteria);
                render(&mut session, Ok(screen), output);
            }
            BrowseCommand::Toggle(Some(n)) => {
                let screen = session.discovery.screen();
                match n.checked_sub(1).and_then(|i| screen.movies().get(i)) {
                    Some(movie) => {
                        let result = session.discovery.toggle_watchlist(movie).map(|_| session.discovery.screen());
                        render(&mut session, result, output);
                    }
                    None => output.warn(format!("No card {} on screen", n)),
                }
            }
            BrowseCommand::Toggle(None) => match &detail {
                Some(details) if ctx.detail_open => {
                    let result = session.discovery.toggle_watchlist(&details.to_summary());
                    if let Err(e) = &result {
                        session.discovery.report(e);
                    }
                    print_notifications(output, &session.discovery.drain_notifications());
                }
                _ => output.warn("Open a movie first, or give a card number: t 3"),
            },
            BrowseCommand::Open(n) => {
                let screen = session.discovery.screen();
                let id = n
                    .checked_sub(1)
                    .and_then(|i| screen.movies().get(i))
                    .and_then(|m| m.id.clone());
                match id {
                    Some(id) => {
                        let spinner = Spinner::start("Loading movie details...", output);
                        let result = session.discovery.show_details(&id).await;
                        spinner.finish();
                        detail = render_details(&mut session, result, output);
                    }
                    None => output.warn(format!("No card {} on screen", n)),
                }
            }
            BrowseCommand::Shortcut(Shortcut::CloseDetail) => {
                session.discovery.close_details();
                detail = None;
                let screen = session.discovery.screen();
                render(&mut session, Ok(screen), output);
            }
            BrowseCommand::Shortcut(Shortcut::SelectMood(mood)) => {
                let spinner = Spinner::start("Loading movies...", output);
                let result = session.discovery.choose_mood(mood).await;
                spinner.finish();
                render(&mut session, result, output);
            }
            BrowseCommand::Shortcut(Shortcut::FocusMoods) => {
                let items: Vec<String> = Mood::ALL
                    .iter()
                    .map(|m| format!("{} ({})", m, m.genre_labels()))
                    .collect();
                let current = session.discovery.state().active_mood().map(|m| m.position() - 1);
                let index = prompts::prompt_select("Mood", &items, current.unwrap_or(0))?;
                if let Some(&mood) = Mood::ALL.get(index) {
                    let spinner = Spinner::start("Loading movies...", output);
                    let result = session.discovery.choose_mood(mood).await;
                    spinner.finish();
                    render(&mut session, result, output);
                }
            }
            BrowseCommand::Shortcut(Shortcut::RandomPick) => {
                let spinner = Spinner::start("Picking a random movie...", output);
                let result = session.discovery.random_pick().await;
                spinner.finish();
                detail = render_details(&mut session, result, output);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> BrowseCommand {
        parse_command(line, KeyContext::default())
    }

    #[test]
    fn test_mood_keys_and_names() {
        assert_eq!(parse("1"), BrowseCommand::Shortcut(Shortcut::SelectMood(Mood::Happy)));
        assert_eq!(parse("6"), BrowseCommand::Shortcut(Shortcut::SelectMood(Mood::Mysterious)));
        assert_eq!(parse("Romantic"), BrowseCommand::Shortcut(Shortcut::SelectMood(Mood::Romantic)));
        assert_eq!(parse("9"), BrowseCommand::Unknown("9".to_string()));
    }

    #[test]
    fn test_search_text_is_verbatim() {
        assert_eq!(parse("/r"), BrowseCommand::Search("r".to_string()));
        assert_eq!(parse("/ the matrix "), BrowseCommand::Search(" the matrix".to_string()));
    }

    #[test]
    fn test_escape_depends_on_detail() {
        assert_eq!(parse("esc"), BrowseCommand::Nothing);
        let ctx = KeyContext { detail_open: true, ..KeyContext::default() };
        assert_eq!(parse_command("esc", ctx), BrowseCommand::Shortcut(Shortcut::CloseDetail));
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse("r"), BrowseCommand::Shortcut(Shortcut::RandomPick));
        assert_eq!(parse("ctrl+m"), BrowseCommand::Shortcut(Shortcut::FocusMoods));
        assert_eq!(parse("w"), BrowseCommand::View(View::Watchlist));
        assert_eq!(parse("m"), BrowseCommand::View(View::Movies));
        assert_eq!(parse("t 3"), BrowseCommand::Toggle(Some(3)));
        assert_eq!(parse("t"), BrowseCommand::Toggle(None));
        assert_eq!(parse("o 2"), BrowseCommand::Open(2));
        assert_eq!(parse("o"), BrowseCommand::Unknown("o".to_string()));
        assert_eq!(parse("Q"), BrowseCommand::Quit);
        assert_eq!(parse("   "), BrowseCommand::Nothing);
    }
}

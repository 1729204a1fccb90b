//! Line-oriented host commands.
//!
//! | Command | Event |
//! |---|---|
//! | `search <text>` | `SearchChanged` (text after the first space, verbatim; empty clears) |
//! | `decade <all\|1990\|1990s>` | `DecadeSelected` |
//! | `country <all\|name>` | `CountrySelected` |
//! | `genre <all\|name>` | `GenreSelected` |
//! | `min-rating <all\|n>` | `MinRatingSelected` |
//! | `years <all\|from-to>` | `YearRangeSelected` (either end may be blank) |
//! | `favorites <on\|off>` | `FavoritesOnly` |
//! | `sort <mode>` | `SortChanged` |
//! | `more` | `LoadMore` |
//! | `fav <id>` | `ToggleFavorite` |
//! | `hover <id>` | pointer `Focus` |
//! | `select <id>` | programmatic `Focus` |
//! | `random` | `RandomPick` |
//! | `theme` | `ToggleTheme` |
//! | `reset` | `ResetFilters` |
//! | `quit` | `Quit` |

use crate::app::Event;
use crate::gallery::{CountryFilter, GenreFilter, ParseCriteriaError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("expected on or off, got {0:?}")]
    InvalidSwitch(String),

    #[error(transparent)]
    InvalidValue(#[from] ParseCriteriaError),
}

fn required<'a>(command: &'static str, rest: &'a str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

/// Parses one input line. Blank lines and `#` comments yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`CommandError`] for unknown commands or malformed arguments.
///
/// # Examples
///
/// ```
/// use marquee::app::Event;
/// use marquee::runtime::parse_command;
///
/// assert_eq!(parse_command("hover tt0468569")?, Some(Event::hover("tt0468569")));
/// assert_eq!(parse_command("  ")?, None);
/// # Ok::<(), marquee::runtime::CommandError>(())
/// ```
pub fn parse_command(line: &str) -> Result<Option<Event>, CommandError> {
    let line = line.trim_start();
    if line.trim_end().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    // `raw` is everything after the first separator, spacing included.
    let (command, raw) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = raw.trim();

    let event = match command.to_ascii_lowercase().as_str() {
        "search" => Event::SearchChanged(raw.to_string()),
        "decade" => Event::DecadeSelected(required("decade", rest)?.parse()?),
        "country" => Event::CountrySelected(CountryFilter::from(required("country", rest)?)),
        "genre" => Event::GenreSelected(GenreFilter::from(required("genre", rest)?)),
        "favorites" => match required("favorites", rest)?.to_ascii_lowercase().as_str() {
            "on" | "true" | "1" => Event::FavoritesOnly(true),
            "off" | "false" | "0" => Event::FavoritesOnly(false),
            other => return Err(CommandError::InvalidSwitch(other.to_string())),
        },
        "min-rating" => Event::MinRatingSelected(required("min-rating", rest)?.parse()?),
        "years" => Event::YearRangeSelected(required("years", rest)?.parse()?),
        "sort" => Event::SortChanged(required("sort", rest)?.parse()?),
        "more" => Event::LoadMore,
        "fav" => Event::ToggleFavorite(required("fav", rest)?.to_string()),
        "hover" => Event::hover(required("hover", rest)?),
        "select" => Event::select(required("select", rest)?),
        "random" => Event::RandomPick,
        "theme" => Event::ToggleTheme,
        "reset" => Event::ResetFilters,
        "quit" | "exit" => Event::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(event))
}

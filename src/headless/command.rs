//! Console command parsing
//!
//! One command per line. Parsing never touches the engine; the runner posts
//! the resulting [`Message`] on the engine channel.

use roadside_app::screen::ActionId;
use roadside_app::Message;
use roadside_core::{Error, LocationAccuracy, LocationAuthorization, Result, Tab};

/// Usage summary printed by `help`
pub const HELP: &str = "commands: connect | disconnect | tab <0-2> | select <n> | yes | no | \
confirm | submit | back | dismiss | login on|off|toggle | \
location authorized|denied|not-determined|restricted | accuracy full|reduced | quit";

/// A parsed console line
#[derive(Debug, Clone)]
pub enum Command {
    /// Post a message to the engine
    Send(Message),

    /// Print usage
    Help,
}

/// Parse one console line.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();
    if let Some(extra) = words.next() {
        return Err(Error::invalid_command(format!(
            "unexpected argument '{}'",
            extra
        )));
    }

    let message = match (command.to_ascii_lowercase().as_str(), argument) {
        ("help", None) => return Ok(Some(Command::Help)),
        ("connect", None) => Message::Connect,
        ("disconnect", None) => Message::Disconnect,
        ("quit" | "q" | "exit", None) => Message::Quit,

        ("tab", Some(index)) => Message::select_tab(Tab::from_index(parse_index(index)?)?),
        ("select", Some(index)) => Message::ItemSelected {
            index: parse_index(index)?,
        },

        ("yes", None) => Message::Action(ActionId::FourWheelDriveYes),
        ("no", None) => Message::Action(ActionId::FourWheelDriveNo),
        ("confirm", None) => Message::Action(ActionId::ConfirmDestination),
        ("submit", None) => Message::Action(ActionId::Submit),
        ("back", None) => Message::Action(ActionId::Back),
        ("dismiss", None) => Message::Action(ActionId::Dismiss),

        ("login", Some("on")) => Message::SetLoggedIn(true),
        ("login", Some("off")) => Message::SetLoggedIn(false),
        ("login", Some("toggle")) => Message::ToggleLogin,

        ("location", Some(status)) => Message::SetLocationAuthorization(match status {
            "authorized" | "when-in-use" => LocationAuthorization::AuthorizedWhenInUse,
            "always" => LocationAuthorization::AuthorizedAlways,
            "denied" => LocationAuthorization::Denied,
            "not-determined" => LocationAuthorization::NotDetermined,
            "restricted" => LocationAuthorization::Restricted,
            other => {
                return Err(Error::invalid_command(format!(
                    "unknown location status '{}'",
                    other
                )))
            }
        }),

        ("accuracy", Some("full")) => Message::SetLocationAccuracy(LocationAccuracy::Full),
        ("accuracy", Some("reduced")) => Message::SetLocationAccuracy(LocationAccuracy::Reduced),

        _ => {
            return Err(Error::invalid_command(format!(
                "'{}' (try 'help')",
                line.trim()
            )))
        }
    };

    Ok(Some(Command::Send(message)))
}

fn parse_index(text: &str) -> Result<usize> {
    text.parse::<usize>()
        .map_err(|_| Error::invalid_command(format!("'{}' is not an index", text)))
}

//! Plain-text view of an edit session.

use std::fmt;

use crate::services::editor::EditSession;
use crate::services::validation::FieldError;

const BOUND_ROUTE_HINT: &str = "Select the application's actions or the plugin's actions and click on the cog icon to display the bound route";

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Role details, every section with its "select all" state and actions, and
/// the bound-route panel for the highlighted action. Collapsed sections show
/// only their header.
pub struct SessionView<'a>(pub &'a EditSession);

impl fmt::Display for SessionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = self.0.draft();
        let tree = &self.0.tree;

        writeln!(f, "{}", role.name)?;
        if !role.description.is_empty() {
            writeln!(f, "{}", role.description)?;
        }

        writeln!(f, "\nPermissions")?;
        for (section, expanded) in tree.sections_with_state() {
            writeln!(f, "\n{}  {}", section.name, section.description)?;
            if !expanded {
                continue;
            }
            writeln!(f, "  {} Select all", checkbox(section.all_enabled()))?;
            for action in &section.actions {
                write!(f, "  {} {}", checkbox(action.enabled), action.handler())?;
                if let Some(route) = &action.bound_route {
                    write!(f, "  ({})", route)?;
                }
                writeln!(f)?;
            }
        }

        writeln!(f, "\nAdvanced settings")?;
        match (tree.selected_action(), tree.selected_route()) {
            (Some(action), Some(route)) => {
                writeln!(f, "Bound route to {}", action.handler())?;
                writeln!(f, "{}", route)
            }
            (Some(action), None) => writeln!(f, "No route bound to {}", action.handler()),
            _ => writeln!(f, "{}", BOUND_ROUTE_HINT),
        }
    }
}

pub fn render_session(session: &EditSession) -> String {
    SessionView(session).to_string()
}

/// One line per field error, e.g. `name: Invalid value`.
pub fn render_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

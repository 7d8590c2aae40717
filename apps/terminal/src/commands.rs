//! Line commands typed at the prompt.

use shared::domain::CompanyIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    FindCompanies,
    /// `None` selects the placeholder entry.
    Select(Option<CompanyIndex>),
    SetResearch(String),
    SetMarket(String),
    SetLanguage(String),
    GenerateContent,
    ResetMemory,
    Status,
    Help,
    Quit,
}

impl UiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            UiCommand::FindCompanies => "find",
            UiCommand::Select(_) => "select",
            UiCommand::SetResearch(_) => "research",
            UiCommand::SetMarket(_) => "market",
            UiCommand::SetLanguage(_) => "language",
            UiCommand::GenerateContent => "generate",
            UiCommand::ResetMemory => "reset",
            UiCommand::Status => "status",
            UiCommand::Help => "help",
            UiCommand::Quit => "quit",
        }
    }
}

pub const HELP: &str = "\
commands:
  find                 find new companies
  select [n]           investigate company n (no number clears the selection)
  research <text>      set the research notes
  market <text>        set the target market
  language <text>      set the output language
  generate             generate content for the selected company
  reset                reset the researched-companies memory
  status               show visible panels
  help                 show this help
  quit                 exit";

pub fn parse_command(line: &str) -> Result<UiCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_ascii_lowercase().as_str() {
        "find" => Ok(UiCommand::FindCompanies),
        "select" if rest.is_empty() => Ok(UiCommand::Select(None)),
        "select" => rest
            .parse::<usize>()
            .map(|n| UiCommand::Select(Some(CompanyIndex(n))))
            .map_err(|_| format!("not a company number: '{rest}'")),
        "research" => Ok(UiCommand::SetResearch(rest.to_string())),
        "market" => Ok(UiCommand::SetMarket(rest.to_string())),
        "language" => Ok(UiCommand::SetLanguage(rest.to_string())),
        "generate" => Ok(UiCommand::GenerateContent),
        "reset" => Ok(UiCommand::ResetMemory),
        "status" => Ok(UiCommand::Status),
        "help" | "?" => Ok(UiCommand::Help),
        "quit" | "exit" => Ok(UiCommand::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selection_with_and_without_index() {
        assert_eq!(
            parse_command("select 1"),
            Ok(UiCommand::Select(Some(CompanyIndex(1))))
        );
        assert_eq!(parse_command("select"), Ok(UiCommand::Select(None)));
        assert!(parse_command("select one").is_err());
    }

    #[test]
    fn text_fields_keep_inner_spacing() {
        assert_eq!(
            parse_command("  research  PAC donations  2023 "),
            Ok(UiCommand::SetResearch("PAC donations  2023".to_string()))
        );
        assert_eq!(
            parse_command("market"),
            Ok(UiCommand::SetMarket(String::new()))
        );
    }

    #[test]
    fn rejects_unknown_and_empty_input() {
        assert!(parse_command("").is_err());
        assert!(parse_command("launch").is_err());
        assert_eq!(parse_command("EXIT"), Ok(UiCommand::Quit));
    }
}

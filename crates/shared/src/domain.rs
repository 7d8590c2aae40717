/// Separator between the display name and the opaque remainder of a company entry.
pub const COMPANY_ENTRY_DELIMITER: &str = "||";

macro_rules! index_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub usize);
    };
}

index_newtype!(CompanyIndex);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub name: String,
    /// Raw backend entry, passed through untouched.
    pub full_info: String,
}

impl CompanyRecord {
    /// Builds a record from a `"<name>||<extra>"` entry. Only the name is
    /// extracted; an entry without the delimiter is treated as all name.
    pub fn from_entry(entry: impl Into<String>) -> Self {
        let full_info = entry.into();
        let name = full_info
            .split(COMPANY_ENTRY_DELIMITER)
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        Self { name, full_info }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Panel {
    CompanyList,
    Step2,
    Step2b,
    Step3,
    Step4,
    Results,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::CompanyList,
        Panel::Step2,
        Panel::Step2b,
        Panel::Step3,
        Panel::Step4,
        Panel::Results,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Panel::CompanyList => "company list",
            Panel::Step2 => "step 2",
            Panel::Step2b => "investigation",
            Panel::Step3 => "step 3",
            Panel::Step4 => "step 4",
            Panel::Results => "results",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BusyIndicator {
    Investigate,
    Generate,
}

/// Anything the controller can toggle between hidden and shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Panel(Panel),
    Busy(BusyIndicator),
}

impl From<Panel> for Element {
    fn from(value: Panel) -> Self {
        Element::Panel(value)
    }
}

impl From<BusyIndicator> for Element {
    fn from(value: BusyIndicator) -> Self {
        Element::Busy(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextSlot {
    InvestigationDetails,
    ResultsOutput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    FindCompanies,
    GenerateContent,
}

/// Free-text fields the user fills in before generating content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentInputs {
    pub research: String,
    pub market: String,
    pub language: String,
}

impl ContentInputs {
    pub fn is_complete(&self) -> bool {
        !self.research.is_empty() && !self.market.is_empty() && !self.language.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_trimmed_name_before_first_delimiter() {
        let record = CompanyRecord::from_entry("  Acme Corp ||Industrial, US||extra");
        assert_eq!(record.name, "Acme Corp");
        assert_eq!(record.full_info, "  Acme Corp ||Industrial, US||extra");
    }

    #[test]
    fn entry_without_delimiter_is_all_name() {
        let record = CompanyRecord::from_entry(" Globex ");
        assert_eq!(record.name, "Globex");
    }

    #[test]
    fn whitespace_only_inputs_count_as_filled() {
        let inputs = ContentInputs {
            research: " ".into(),
            market: "Germany".into(),
            language: "German".into(),
        };
        assert!(inputs.is_complete());
        assert!(!ContentInputs::default().is_complete());
    }
}

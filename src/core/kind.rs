//! Known UiPath activity kinds

/// Classification of an element tag.
///
/// Legacy and modern spellings of the same activity share one variant
/// (`WriteCell` / `WriteCellX`). Anything unrecognized is kept as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind<'a> {
    Sequence,
    Flowchart,
    TryCatch,
    Catch,
    If,
    ForEachRow,
    LogMessage,
    Delay,
    ExcelApplicationCard,
    ExcelProcessScope,
    UseExcelFile,
    ReadRange,
    WriteCell,
    SaveExcelFile,
    NApplicationCard,
    UseApplicationBrowser,
    OpenBrowser,
    AttachBrowser,
    Click,
    NClick,
    TypeInto,
    NTypeInto,
    GetText,
    NGetText,
    TargetAnchorable,
    Variable,
    DatabaseConnect,
    Other(&'a str),
}

impl<'a> ActivityKind<'a> {
    /// Classify a local tag name
    pub fn from_tag(tag: &'a str) -> Self {
        match tag {
            "Sequence" => ActivityKind::Sequence,
            "Flowchart" => ActivityKind::Flowchart,
            "TryCatch" => ActivityKind::TryCatch,
            "Catch" => ActivityKind::Catch,
            "If" => ActivityKind::If,
            "ForEachRow" => ActivityKind::ForEachRow,
            "LogMessage" => ActivityKind::LogMessage,
            "Delay" => ActivityKind::Delay,
            "ExcelApplicationCard" => ActivityKind::ExcelApplicationCard,
            "ExcelProcessScope" | "ExcelProcessScopeX" => ActivityKind::ExcelProcessScope,
            "UseExcelFile" => ActivityKind::UseExcelFile,
            "ReadRange" | "ReadRangeX" => ActivityKind::ReadRange,
            "WriteCell" | "WriteCellX" => ActivityKind::WriteCell,
            "SaveExcelFile" | "SaveExcelFileX" => ActivityKind::SaveExcelFile,
            "NApplicationCard" => ActivityKind::NApplicationCard,
            "UseApplicationBrowser" => ActivityKind::UseApplicationBrowser,
            "OpenBrowser" => ActivityKind::OpenBrowser,
            "AttachBrowser" => ActivityKind::AttachBrowser,
            "Click" => ActivityKind::Click,
            "NClick" => ActivityKind::NClick,
            "TypeInto" => ActivityKind::TypeInto,
            "NTypeInto" => ActivityKind::NTypeInto,
            "GetText" => ActivityKind::GetText,
            "NGetText" => ActivityKind::NGetText,
            "TargetAnchorable" => ActivityKind::TargetAnchorable,
            "Variable" => ActivityKind::Variable,
            "DatabaseConnect" => ActivityKind::DatabaseConnect,
            other => ActivityKind::Other(other),
        }
    }

    /// Tag spellings recognized for this kind
    pub fn tag_names(&self) -> &[&'a str] {
        match self {
            ActivityKind::Sequence => &["Sequence"],
            ActivityKind::Flowchart => &["Flowchart"],
            ActivityKind::TryCatch => &["TryCatch"],
            ActivityKind::Catch => &["Catch"],
            ActivityKind::If => &["If"],
            ActivityKind::ForEachRow => &["ForEachRow"],
            ActivityKind::LogMessage => &["LogMessage"],
            ActivityKind::Delay => &["Delay"],
            ActivityKind::ExcelApplicationCard => &["ExcelApplicationCard"],
            ActivityKind::ExcelProcessScope => &["ExcelProcessScope", "ExcelProcessScopeX"],
            ActivityKind::UseExcelFile => &["UseExcelFile"],
            ActivityKind::ReadRange => &["ReadRange", "ReadRangeX"],
            ActivityKind::WriteCell => &["WriteCell", "WriteCellX"],
            ActivityKind::SaveExcelFile => &["SaveExcelFile", "SaveExcelFileX"],
            ActivityKind::NApplicationCard => &["NApplicationCard"],
            ActivityKind::UseApplicationBrowser => &["UseApplicationBrowser"],
            ActivityKind::OpenBrowser => &["OpenBrowser"],
            ActivityKind::AttachBrowser => &["AttachBrowser"],
            ActivityKind::Click => &["Click"],
            ActivityKind::NClick => &["NClick"],
            ActivityKind::TypeInto => &["TypeInto"],
            ActivityKind::NTypeInto => &["NTypeInto"],
            ActivityKind::GetText => &["GetText"],
            ActivityKind::NGetText => &["NGetText"],
            ActivityKind::TargetAnchorable => &["TargetAnchorable"],
            ActivityKind::Variable => &["Variable"],
            ActivityKind::DatabaseConnect => &["DatabaseConnect"],
            ActivityKind::Other(tag) => std::slice::from_ref(tag),
        }
    }

    /// Browser or UI interaction activities
    pub fn is_web_automation(&self) -> bool {
        matches!(
            self,
            ActivityKind::OpenBrowser
                | ActivityKind::UseApplicationBrowser
                | ActivityKind::Click
                | ActivityKind::NClick
                | ActivityKind::TypeInto
                | ActivityKind::NTypeInto
                | ActivityKind::GetText
                | ActivityKind::NGetText
        )
    }

    /// Spreadsheet scopes and cell/range operations
    pub fn is_spreadsheet(&self) -> bool {
        matches!(
            self,
            ActivityKind::ReadRange
                | ActivityKind::WriteCell
                | ActivityKind::ExcelApplicationCard
                | ActivityKind::ExcelProcessScope
                | ActivityKind::UseExcelFile
        )
    }

    /// Activities that open or hold an Excel workbook for their children
    pub fn is_excel_scope(&self) -> bool {
        matches!(
            self,
            ActivityKind::ExcelApplicationCard | ActivityKind::ExcelProcessScope
        )
    }

    /// UI activities that should carry an explicit timeout
    pub fn is_ui_interaction(&self) -> bool {
        matches!(
            self,
            ActivityKind::Click
                | ActivityKind::TypeInto
                | ActivityKind::NClick
                | ActivityKind::NTypeInto
                | ActivityKind::NGetText
                | ActivityKind::OpenBrowser
                | ActivityKind::AttachBrowser
                | ActivityKind::UseApplicationBrowser
        )
    }

    pub fn is_click(&self) -> bool {
        matches!(self, ActivityKind::Click | ActivityKind::NClick)
    }

    /// Structural containers counted against error handling coverage
    pub fn is_container(&self) -> bool {
        matches!(self, ActivityKind::Sequence | ActivityKind::Flowchart)
    }

    /// Human-readable description of what the activity does
    pub fn purpose(&self) -> &'static str {
        match self {
            ActivityKind::Sequence => "Runs its child activities in order",
            ActivityKind::Flowchart => "Runs activities along flowchart connections",
            ActivityKind::TryCatch => "Catches and handles exceptions",
            ActivityKind::If => "Branches on a condition",
            ActivityKind::ForEachRow => "Loops over every row of a data table",
            ActivityKind::LogMessage => "Writes a log entry",
            ActivityKind::Delay => "Pauses execution",
            ActivityKind::ExcelApplicationCard | ActivityKind::ExcelProcessScope => {
                "Opens an Excel workbook for nested activities"
            }
            ActivityKind::UseExcelFile => "Opens an Excel file for nested activities",
            ActivityKind::ReadRange => "Reads an Excel range",
            ActivityKind::WriteCell => "Writes a value to an Excel cell",
            ActivityKind::SaveExcelFile => "Saves the open Excel workbook",
            ActivityKind::NApplicationCard | ActivityKind::UseApplicationBrowser => {
                "Opens or attaches to an application or browser"
            }
            ActivityKind::OpenBrowser => "Opens a browser session",
            ActivityKind::AttachBrowser => "Attaches to an open browser",
            ActivityKind::Click | ActivityKind::NClick => "Clicks a UI element",
            ActivityKind::TypeInto | ActivityKind::NTypeInto => "Types text into a UI element",
            ActivityKind::GetText | ActivityKind::NGetText => "Reads text from a UI element",
            ActivityKind::DatabaseConnect => "Connects to a database",
            ActivityKind::Catch
            | ActivityKind::TargetAnchorable
            | ActivityKind::Variable
            | ActivityKind::Other(_) => "Unknown activity",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_and_modern_aliases() {
        assert_eq!(ActivityKind::from_tag("WriteCellX"), ActivityKind::WriteCell);
        assert_eq!(ActivityKind::from_tag("WriteCell"), ActivityKind::WriteCell);
        assert_eq!(ActivityKind::from_tag("ExcelProcessScopeX"), ActivityKind::ExcelProcessScope);
    }

    #[test]
    fn test_unknown_tag_is_other() {
        assert_eq!(ActivityKind::from_tag("InvokeWorkflowFile"), ActivityKind::Other("InvokeWorkflowFile"));
        assert_eq!(ActivityKind::from_tag("Sequence.Variables"), ActivityKind::Other("Sequence.Variables"));
    }

    #[test]
    fn test_tag_names_round_trip() {
        for tag in ["Sequence", "WriteCellX", "NClick", "Anything"] {
            let kind = ActivityKind::from_tag(tag);
            assert!(kind.tag_names().contains(&tag));
        }
    }

    #[test]
    fn test_categories() {
        assert!(ActivityKind::NClick.is_web_automation());
        assert!(ActivityKind::ReadRange.is_spreadsheet());
        assert!(ActivityKind::ExcelApplicationCard.is_excel_scope());
        assert!(!ActivityKind::WriteCell.is_excel_scope());
        assert!(ActivityKind::AttachBrowser.is_ui_interaction());
        assert!(!ActivityKind::AttachBrowser.is_web_automation());
        assert!(ActivityKind::Flowchart.is_container());
    }

    #[test]
    fn test_purpose() {
        assert_eq!(ActivityKind::ForEachRow.purpose(), "Loops over every row of a data table");
        assert_eq!(ActivityKind::Other("Foo").purpose(), "Unknown activity");
    }
}

use codespan_reporting::diagnostic::LabelStyle;

use crate::interpreter::RuntimeError;
use crate::parser::ParseError;
use crate::registry::RegistryError;
use crate::CalcError;

pub type Diagnostic = codespan_reporting::diagnostic::Diagnostic<()>;

/// Render an error as a diagnostic that a frontend can display with
/// [`codespan_reporting`].
pub trait ErrorDiagnostic {
    fn diagnostic(&self) -> Diagnostic;
}

impl ErrorDiagnostic for ParseError {
    fn diagnostic(&self) -> Diagnostic {
        Diagnostic::error()
            .with_message("while parsing")
            .with_labels(vec![self
                .span
                .diagnostic_label(LabelStyle::Primary)
                .with_message(self.kind.to_string())])
    }
}

impl ErrorDiagnostic for RuntimeError {
    fn diagnostic(&self) -> Diagnostic {
        let mut notes = vec![self.to_string()];
        if let RuntimeError::RegistryError(RegistryError::UnknownEntry(_, Some(suggestion))) = self
        {
            notes.push(format!("Did you mean '{suggestion}'?"));
        }

        Diagnostic::error()
            .with_message("runtime error")
            .with_notes(notes)
    }
}

impl ErrorDiagnostic for CalcError {
    fn diagnostic(&self) -> Diagnostic {
        match self {
            CalcError::ParseError(e) => e.diagnostic(),
            CalcError::RuntimeError(e) => e.diagnostic(),
        }
    }
}

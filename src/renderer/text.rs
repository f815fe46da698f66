use std::sync::OnceLock;

use regex::Regex;

use crate::schemas::crime_types::{crime_label, Question};
use crate::store::types::{Answer, Submission};

fn iso_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static pattern"))
}

/// Converts an ISO date `yyyy-mm-dd` to `dd/mm/yyyy`. Anything else passes
/// through untouched.
fn format_date_br(value: &str) -> String {
    if iso_date_re().is_match(value) {
        let parts: Vec<&str> = value.split('-').collect();
        format!("{}/{}/{}", parts[2], parts[1], parts[0])
    } else {
        value.to_string()
    }
}

fn display_value(answer: &Answer) -> Option<String> {
    if answer.is_blank() {
        return None;
    }
    match answer {
        Answer::Text(s) => Some(format_date_br(s)),
        Answer::Flag(true) => Some("Sim".to_string()),
        Answer::Flag(false) => Some("Não".to_string()),
        Answer::Missing => None,
    }
}

/// Stateless renderer turning a submission into police-report text.
///
/// Never fails: absent or malformed fields degrade to omission. Sections
/// with no content are dropped entirely, headers included.
pub struct TextRenderer;

impl TextRenderer {
    /// Deterministic multi-section plain-text report.
    pub fn render(submission: &Submission) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!(
            "TIPO DE OCORRÊNCIA: {}",
            crime_label(&submission.crime_type)
        ));
        lines.push(String::new());

        lines.push("DADOS INFORMADOS:".to_string());
        let name = if submission.guest_name.is_empty() {
            "—"
        } else {
            submission.guest_name.as_str()
        };
        lines.push(format!("  Nome: {}", name));
        if let Some(dob) = &submission.dob {
            lines.push(format!("  Data de Nascimento: {}", format_date_br(dob)));
        }
        if let Some(rg) = &submission.rg {
            lines.push(format!("  RG: {}", rg));
        }
        if let Some(cpf) = &submission.cpf {
            lines.push(format!("  CPF: {}", cpf));
        }
        lines.push(String::new());

        if let Some(address) = &submission.address {
            lines.push(format!("ENDEREÇO: {}", address));
            lines.push(String::new());
        }

        let facts: Vec<String> = submission
            .answers
            .iter()
            .filter_map(|(id, answer)| {
                display_value(answer).map(|value| format!("  {}: {}", id, value))
            })
            .collect();
        if !facts.is_empty() {
            lines.push("DOS FATOS:".to_string());
            lines.extend(facts);
            lines.push(String::new());
        }

        if let Some(narrative) = &submission.narrative {
            lines.push("A PARTE RELATA QUE:".to_string());
            lines.push(format!("  {}", narrative));
            lines.push(String::new());
        }

        lines.push(format!("ANEXOS: {} foto(s)", submission.photos.len()));

        lines.join("\n")
    }

    /// Label/value pairs for the structured view, in the order the supplied
    /// schema asks its questions. Unanswered questions are skipped.
    pub fn render_structured(
        submission: &Submission,
        questions: &[Question],
    ) -> Vec<(String, String)> {
        questions
            .iter()
            .filter_map(|question| {
                let answer = submission.answer(question.id)?;
                let value = display_value(answer)?;
                Some((question.label.to_string(), value))
            })
            .collect()
    }
}

//! Prompt construction for episode synthesis and adherence analysis.

use crate::model::{Mission, Recording};

/// Compile the candidate recordings into a single labeled transcript block,
/// in the candidate set's original order.
pub fn compile_transcripts(recordings: &[Recording]) -> String {
    recordings
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "[Report {} - {} at {}, {}]\n{}",
                i + 1,
                r.promoter_name,
                r.store_name,
                r.store_city,
                r.transcript
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the episode-generation prompt. Requests a single JSON object with
/// a fixed four-field schema and a 300-500 word script.
pub fn episode_prompt(mission_title: &str, report_count: usize, transcripts: &str) -> String {
    format!(
        r#"You are a trade-marketing podcast producer. Analyze the field promoter reports below and create a podcast episode.

MISSION: {mission_title}
NUMBER OF REPORTS: {report_count}

REPORT TRANSCRIPTS:
{transcripts}

---

Create a podcast episode following this JSON format:
{{
  "title": "<catchy episode title, max 60 characters>",
  "summary": "<executive summary of 2-3 paragraphs highlighting the main findings>",
  "script": "<full narration script, 2-3 minutes of reading, professional but accessible tone. Include: opening, main insights, relevant details, closing with recommendations>",
  "keyInsights": [<array of 4-6 main insights as short sentences>]
}}

The script must:
- Be between 300-500 words
- Open with an engaging introduction
- Mention specific data from the reports
- Close with actionable recommendations
- Use clear, professional language

Respond ONLY with the JSON, no additional text."#
    )
}

/// Build the guide-adherence analysis prompt for a single transcript.
pub fn analysis_prompt(mission: &Mission, transcript: &str) -> String {
    let guide_list = if mission.guide.is_empty() {
        "No specific guide".to_string()
    } else {
        mission
            .guide
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are a trade-marketing analyst evaluating field promoter reports.

MISSION: {title}
QUESTION: {question}
CATEGORY: {category}

MISSION GUIDE/CHECKLIST (points the promoter should address):
{guide_list}

PROMOTER REPORT TRANSCRIPT:
"{transcript}"

---

Your task is to evaluate the report's ADHERENCE to the mission guide. Compare what the promoter said with each guide point.

Return a JSON object in exactly this format:
{{
  "score": <number from 0 to 100 representing guide adherence>,
  "covered": [<array of strings - guide points the promoter COVERED in the report>],
  "missing": [<array of strings - guide points the promoter DID NOT MENTION and could have addressed>],
  "summary": "<one-sentence summary of what the promoter reported>"
}}

Rules:
- The score must reflect how many guide points were covered
- In "covered", list points addressed in any form (even partially)
- In "missing", list ONLY guide points that were skipped and would be relevant
- Be objective and constructive

Respond ONLY with the JSON, no additional text."#,
        title = mission.title,
        question = mission.question.as_deref().unwrap_or("Free-form report"),
        category = mission.category,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordingStatus;
    use chrono::Utc;

    fn recording(name: &str, store: &str, city: &str, transcript: &str) -> Recording {
        Recording {
            id: "r1".to_string(),
            mission_id: "m1".to_string(),
            mission_title: "Shelf check".to_string(),
            promoter_id: "p1".to_string(),
            promoter_name: name.to_string(),
            store_id: "s1".to_string(),
            store_name: store.to_string(),
            store_city: city.to_string(),
            audio: None,
            transcript: transcript.to_string(),
            duration_seconds: 30.0,
            score: 0,
            status: RecordingStatus::Transcribed,
            created_at: Utc::now(),
            analysis: None,
        }
    }

    #[test]
    fn test_compile_transcripts_labels_and_order() {
        let recs = vec![
            recording("Ana", "Mercado Azul", "Recife", "Shelves were full."),
            recording("Bruno", "Super Verde", "Natal", "Competitor promo running."),
        ];
        let compiled = compile_transcripts(&recs);
        let first = compiled.find("[Report 1 - Ana at Mercado Azul, Recife]").unwrap();
        let second = compiled.find("[Report 2 - Bruno at Super Verde, Natal]").unwrap();
        assert!(first < second);
        assert!(compiled.contains("Shelves were full."));
    }

    #[test]
    fn test_episode_prompt_requests_schema() {
        let prompt = episode_prompt("Shelf check", 2, "[Report 1]\ntext");
        assert!(prompt.contains("\"keyInsights\""));
        assert!(prompt.contains("300-500 words"));
        assert!(prompt.contains("NUMBER OF REPORTS: 2"));
    }

    #[test]
    fn test_analysis_prompt_numbers_guide() {
        let mission = Mission {
            id: "m1".to_string(),
            title: "Shelf check".to_string(),
            question: None,
            category: "execution".to_string(),
            guide: vec!["Check stock".to_string(), "Note prices".to_string()],
            target_responses: 10,
            total_responses: 0,
        };
        let prompt = analysis_prompt(&mission, "All good");
        assert!(prompt.contains("1. Check stock"));
        assert!(prompt.contains("2. Note prices"));
        assert!(prompt.contains("Free-form report"));
    }
}

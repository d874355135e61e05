use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

/// Hand-written because the payload is flattened into the envelope.
const STORED_TYPE: &str = "export type Stored<T> = { id: string; createdAt?: string } & T;\n";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = vec![STORED_TYPE.to_string()];

    // Company types
    types.push(clean_type(CompanyValue::export_to_string()?));
    types.push(clean_type(CompanyManager::export_to_string()?));
    types.push(clean_type(CompanyFinancials::export_to_string()?));
    types.push(clean_type(TechnologyCategory::export_to_string()?));
    types.push(clean_type(CompanyTechnology::export_to_string()?));
    types.push(clean_type(Company::export_to_string()?));

    // Interview types
    types.push(clean_type(InterviewType::export_to_string()?));
    types.push(clean_type(InterviewRound::export_to_string()?));
    types.push(clean_type(InterviewStatus::export_to_string()?));
    types.push(clean_type(Interview::export_to_string()?));

    // Practice session types
    types.push(clean_type(Difficulty::export_to_string()?));
    types.push(clean_type(LeetCodeStatus::export_to_string()?));
    types.push(clean_type(ChallengeStatus::export_to_string()?));
    types.push(clean_type(ComprehensionLevel::export_to_string()?));
    types.push(clean_type(LeetCodeSession::export_to_string()?));
    types.push(clean_type(MiniChallengeSession::export_to_string()?));
    types.push(clean_type(StudySession::export_to_string()?));
    types.push(clean_type(TypingSession::export_to_string()?));
    types.push(clean_type(PracticeSession::export_to_string()?));
    types.push(clean_type(PracticeKind::export_to_string()?));

    // Dashboard types
    types.push(clean_type(InterviewCounts::export_to_string()?));
    types.push(clean_type(PracticeCounts::export_to_string()?));
    types.push(clean_type(LeetCodeProgress::export_to_string()?));

    let output_dir = Path::new("../gui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Everything lands in one file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}

use shared_types::{Company, Interview, PracticeSession};

use super::{Document, Record};

fn require(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(message.to_string());
    }
    Ok(())
}

impl Record for Company {
    const DOCUMENT: Document = Document {
        key: "companies",
        file_name: "companies.json",
    };
    const LABEL: &'static str = "Company";

    fn validate(&self) -> Result<(), String> {
        require(&self.name, "Company name cannot be empty")
    }
}

impl Record for Interview {
    const DOCUMENT: Document = Document {
        key: "interviews",
        file_name: "interviews.json",
    };
    const LABEL: &'static str = "Interview";

    fn validate(&self) -> Result<(), String> {
        require(&self.company, "Company cannot be empty")?;
        require(&self.role, "Role cannot be empty")
    }
}

impl Record for PracticeSession {
    const DOCUMENT: Document = Document {
        key: "sessions",
        file_name: "practice-sessions.json",
    };
    const LABEL: &'static str = "Practice session";
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["type"];

    fn validate(&self) -> Result<(), String> {
        match self {
            PracticeSession::Leetcode(s) => {
                require(&s.title, "Title cannot be empty")?;
                require(&s.category, "Category cannot be empty")
            }
            PracticeSession::MiniChallenge(s) => {
                require(&s.title, "Title cannot be empty")?;
                require(&s.link, "Link cannot be empty")
            }
            PracticeSession::Study(s) => {
                require(&s.topic, "Topic cannot be empty")?;
                require(&s.resources, "Resources cannot be empty")
            }
            PracticeSession::Typing(s) => match s.accuracy {
                Some(accuracy) if !(0.0..=100.0).contains(&accuracy) => {
                    Err("Accuracy must be between 0 and 100".to_string())
                }
                _ => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{ComprehensionLevel, StudySession, TypingSession};

    #[test]
    fn test_company_requires_name() {
        let company: Company = serde_json::from_str(r#"{"name":" "}"#).unwrap();
        assert_eq!(
            company.validate().unwrap_err(),
            "Company name cannot be empty"
        );
    }

    #[test]
    fn test_study_requires_resources() {
        let session = PracticeSession::Study(StudySession {
            topic: "Graphs".to_string(),
            resources: String::new(),
            duration: 20,
            comprehension_level: ComprehensionLevel::Low,
            key_takeaways: None,
            next_steps: None,
        });
        assert!(session.validate().is_err());
    }

    #[test]
    fn test_typing_accuracy_range() {
        let typing = |accuracy| {
            PracticeSession::Typing(TypingSession {
                wpm: Some(70),
                accuracy,
                notes: None,
            })
        };

        assert!(typing(None).validate().is_ok());
        assert!(typing(Some(100.0)).validate().is_ok());
        assert!(typing(Some(100.5)).validate().is_err());
        assert!(typing(Some(-1.0)).validate().is_err());
    }
}

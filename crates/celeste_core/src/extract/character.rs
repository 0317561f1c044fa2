use log::warn;

use crate::core_api::{CharacterField, CharacterStats, ExtractionIssue};
use crate::document::SaveDocument;
use crate::duration::format_ticks;

/// Read the eight global counters. A missing element or text child is
/// recorded in `issues` and leaves that value empty.
pub(crate) fn character_stats(
    document: &SaveDocument,
    issues: &mut Vec<ExtractionIssue>,
) -> CharacterStats {
    let mut stats = CharacterStats::default();

    for field in CharacterField::ALL {
        let value = match leaf_text(document, field.tag()) {
            Ok(text) if field == CharacterField::Time => format_ticks(Some(text)),
            Ok(text) => text.to_string(),
            Err(issue) => {
                warn!("{issue}");
                issues.push(issue);
                String::new()
            }
        };
        stats.set(field, value);
    }

    stats
}

fn leaf_text<'a>(document: &'a SaveDocument, tag: &str) -> Result<&'a str, ExtractionIssue> {
    let element = document
        .first_element(tag)
        .ok_or_else(|| ExtractionIssue::MissingNode {
            tag: tag.to_string(),
        })?;

    element
        .first_child()
        .and_then(|child| child.as_text())
        .ok_or_else(|| ExtractionIssue::MissingText {
            tag: tag.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::character_stats;
    use crate::core_api::{CharacterField, ExtractionIssue};
    use crate::document::SaveDocument;

    const FULL: &str = r#"<SaveData>
  <Name>Madeline</Name>
  <Time>183848520000</Time>
  <TotalDeaths>1523</TotalDeaths>
  <TotalStrawberries>121</TotalStrawberries>
  <TotalGoldenStrawberries>2</TotalGoldenStrawberries>
  <TotalJumps>28711</TotalJumps>
  <TotalWallJumps>4012</TotalWallJumps>
  <TotalDashes>11832</TotalDashes>
</SaveData>"#;

    #[test]
    fn reads_every_counter() {
        let doc = SaveDocument::parse(FULL).expect("document should parse");
        let mut issues = Vec::new();
        let stats = character_stats(&doc, &mut issues);

        assert!(issues.is_empty());
        assert_eq!(stats.value(CharacterField::Name), "Madeline");
        assert_eq!(stats.value(CharacterField::Time), "05:06:24.852");
        assert_eq!(stats.get("Total Deaths"), Some("1523"));
        assert_eq!(stats.get("Total Golden Strawberries"), Some("2"));
        assert_eq!(stats.get("Total Wall Jumps"), Some("4012"));
        assert_eq!(stats.get("Total Dashes"), Some("11832"));
    }

    #[test]
    fn missing_name_is_empty_and_recorded() {
        let doc = SaveDocument::parse(&FULL.replace("<Name>Madeline</Name>", ""))
            .expect("document should parse");
        let mut issues = Vec::new();
        let stats = character_stats(&doc, &mut issues);

        assert_eq!(stats.get("Name"), Some(""));
        assert_eq!(
            issues,
            vec![ExtractionIssue::MissingNode {
                tag: "Name".to_string()
            }]
        );
    }

    #[test]
    fn empty_element_is_missing_text() {
        let doc = SaveDocument::parse(&FULL.replace("<Time>183848520000</Time>", "<Time />"))
            .expect("document should parse");
        let mut issues = Vec::new();
        let stats = character_stats(&doc, &mut issues);

        assert_eq!(stats.value(CharacterField::Time), "");
        assert_eq!(
            issues,
            vec![ExtractionIssue::MissingText {
                tag: "Time".to_string()
            }]
        );
    }

    #[test]
    fn numeric_looking_values_pass_through_untouched() {
        let doc = SaveDocument::parse(&FULL.replace("1523", "0001523"))
            .expect("document should parse");
        let mut issues = Vec::new();
        let stats = character_stats(&doc, &mut issues);

        assert_eq!(stats.value(CharacterField::TotalDeaths), "0001523");
    }
}

use log::{debug, warn};

use super::side::side_stats;
use super::{AREA_MODE_STATS_TAG, AREA_STATS_TAG, AREAS_TAG};
use crate::chapter_name::{MISSING_ID, chapter_name};
use crate::core_api::{ChapterStats, ExtractionIssue, Side, SideStats};
use crate::document::{Element, SaveDocument};

/// One record per `AreaStats` child of the first `Areas` element, in
/// document order.
pub(crate) fn chapter_stats(
    document: &SaveDocument,
    issues: &mut Vec<ExtractionIssue>,
) -> Vec<ChapterStats> {
    let Some(areas) = document.first_element(AREAS_TAG) else {
        record(
            issues,
            ExtractionIssue::MissingContainer {
                tag: AREAS_TAG.to_string(),
            },
        );
        return Vec::new();
    };

    areas
        .child_elements(AREA_STATS_TAG)
        .enumerate()
        .map(|(position, node)| chapter_from_node(position, node, issues))
        .collect()
}

fn chapter_from_node(
    position: usize,
    node: &Element,
    issues: &mut Vec<ExtractionIssue>,
) -> ChapterStats {
    let id = chapter_id(position, node, issues);
    let display_name = chapter_name(id);

    let cassette = match node.attribute("Cassette") {
        Some(value) => value.to_string(),
        None => {
            record(
                issues,
                ExtractionIssue::MissingAttribute {
                    position,
                    attribute: "Cassette".to_string(),
                },
            );
            String::new()
        }
    };

    // Sides are positional: the first three mode nodes are A, B, C whatever
    // they claim to be.
    let mut modes = node.descendants(AREA_MODE_STATS_TAG);
    let [a, b, c] = Side::ALL.map(|side| match modes.next() {
        Some(mode) => side_stats(mode),
        None => {
            record(issues, ExtractionIssue::MissingSide { position, side });
            SideStats::default()
        }
    });

    debug!("chapter {position}: id {id} ({display_name})");

    ChapterStats {
        id,
        display_name,
        cassette,
        a,
        b,
        c,
    }
}

fn chapter_id(position: usize, node: &Element, issues: &mut Vec<ExtractionIssue>) -> i32 {
    let Some(raw) = node.attribute("ID") else {
        record(issues, ExtractionIssue::MissingId { position });
        return MISSING_ID;
    };

    match parse_leading_int(raw) {
        Some(id) => id,
        None => {
            record(
                issues,
                ExtractionIssue::InvalidId {
                    position,
                    raw: raw.to_string(),
                },
            );
            MISSING_ID
        }
    }
}

/// Parse an optionally signed run of leading digits, ignoring anything after
/// it: `"12abc"` is 12, `"abc"` is `None`.
fn parse_leading_int(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digit_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digit_len == 0 {
        return None;
    }
    trimmed[..sign_len + digit_len].parse().ok()
}

fn record(issues: &mut Vec<ExtractionIssue>, issue: ExtractionIssue) {
    warn!("{issue}");
    issues.push(issue);
}

#[cfg(test)]
mod tests {
    use super::{chapter_stats, parse_leading_int};
    use crate::core_api::{ExtractionIssue, Side};
    use crate::document::SaveDocument;

    fn modes(n: usize) -> String {
        (0..n)
            .map(|i| format!(r#"<AreaModeStats Deaths="{i}" Completed="true" />"#))
            .collect()
    }

    #[test]
    fn keeps_document_order_and_positional_sides() {
        let xml = format!(
            r#"<SaveData><Areas>
                <AreaStats ID="9" Cassette="true"><Modes>{m}</Modes></AreaStats>
                <AreaStats ID="0" Cassette="false"><Modes>{m}</Modes></AreaStats>
            </Areas></SaveData>"#,
            m = modes(3)
        );
        let doc = SaveDocument::parse(&xml).expect("document should parse");
        let mut issues = Vec::new();
        let chapters = chapter_stats(&doc, &mut issues);

        assert!(issues.is_empty());
        let ids: Vec<i32> = chapters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![9, 0]);
        assert_eq!(chapters[0].display_name, "Chapter 8");
        assert_eq!(chapters[0].cassette, "true");
        assert_eq!(chapters[1].display_name, "Prologue");
        assert_eq!(chapters[0].side(Side::A).deaths, "0");
        assert_eq!(chapters[0].side(Side::B).deaths, "1");
        assert_eq!(chapters[0].side(Side::C).deaths, "2");
    }

    #[test]
    fn only_first_three_mode_nodes_are_used() {
        let xml = format!(
            r#"<SaveData><Areas><AreaStats ID="1" Cassette="false"><Modes>{}</Modes></AreaStats></Areas></SaveData>"#,
            modes(5)
        );
        let doc = SaveDocument::parse(&xml).expect("document should parse");
        let mut issues = Vec::new();
        let chapters = chapter_stats(&doc, &mut issues);

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].c.deaths, "2");
    }

    #[test]
    fn nested_area_stats_are_not_chapters() {
        let xml = format!(
            r#"<SaveData><Areas>
                <AreaStats ID="1" Cassette="false"><Modes>{m}</Modes></AreaStats>
                <Wrapper><AreaStats ID="2" Cassette="false"><Modes>{m}</Modes></AreaStats></Wrapper>
            </Areas></SaveData>"#,
            m = modes(3)
        );
        let doc = SaveDocument::parse(&xml).expect("document should parse");
        let mut issues = Vec::new();
        let chapters = chapter_stats(&doc, &mut issues);

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].id, 1);
    }

    #[test]
    fn missing_id_uses_sentinel_and_keeps_position() {
        let xml = format!(
            r#"<SaveData><Areas>
                <AreaStats ID="1" Cassette="false"><Modes>{m}</Modes></AreaStats>
                <AreaStats Cassette="false"><Modes>{m}</Modes></AreaStats>
                <AreaStats ID="2" Cassette="false"><Modes>{m}</Modes></AreaStats>
            </Areas></SaveData>"#,
            m = modes(3)
        );
        let doc = SaveDocument::parse(&xml).expect("document should parse");
        let mut issues = Vec::new();
        let chapters = chapter_stats(&doc, &mut issues);

        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[1].id, -1);
        assert_eq!(chapters[1].display_name, "Chapter -1");
        assert_eq!(issues, vec![ExtractionIssue::MissingId { position: 1 }]);
    }

    #[test]
    fn short_and_unlabelled_chapters_are_recovered() {
        let xml = format!(
            r#"<SaveData><Areas><AreaStats ID="x"><Modes>{}</Modes></AreaStats></Areas></SaveData>"#,
            modes(2)
        );
        let doc = SaveDocument::parse(&xml).expect("document should parse");
        let mut issues = Vec::new();
        let chapters = chapter_stats(&doc, &mut issues);

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].id, -1);
        assert_eq!(chapters[0].cassette, "");
        assert_eq!(chapters[0].b.deaths, "1");
        assert_eq!(chapters[0].c.deaths, "");
        assert_eq!(chapters[0].c.time, "");
        assert_eq!(
            issues,
            vec![
                ExtractionIssue::InvalidId {
                    position: 0,
                    raw: "x".to_string()
                },
                ExtractionIssue::MissingAttribute {
                    position: 0,
                    attribute: "Cassette".to_string()
                },
                ExtractionIssue::MissingSide {
                    position: 0,
                    side: Side::C
                },
            ]
        );
    }

    #[test]
    fn missing_container_yields_no_chapters() {
        let doc = SaveDocument::parse("<SaveData><Name>M</Name></SaveData>")
            .expect("document should parse");
        let mut issues = Vec::new();
        let chapters = chapter_stats(&doc, &mut issues);

        assert!(chapters.is_empty());
        assert_eq!(
            issues,
            vec![ExtractionIssue::MissingContainer {
                tag: "Areas".to_string()
            }]
        );
    }

    #[test]
    fn leading_int_parsing() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int(" 7 "), Some(7));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("-1"), Some(-1));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("99999999999"), None);
    }
}

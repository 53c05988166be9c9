//! Turning template text into a record document

use once_cell::sync::Lazy;
use regex::Regex;

use super::Link;
use crate::template::DATE_PLACEHOLDER;

pub const STATUS_HEADING: &str = "## Status";
pub const LINKS_HEADING: &str = "## Links";

static LINK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\* (.*) \[([0-9]+)\]\(([^)]*)\)$").unwrap());

/// Fields substituted into the template
pub(super) struct Substitutions<'a> {
    pub heading: String,
    pub date: &'a str,
    pub status: &'a str,
    /// Each link with the file name it points at
    pub links: Vec<(&'a Link, String)>,
}

pub(super) fn render(mut lines: Vec<String>, subs: &Substitutions<'_>) -> String {
    for line in lines.iter_mut() {
        if line.contains(DATE_PLACEHOLDER) {
            *line = line.replace(DATE_PLACEHOLDER, subs.date);
        }
    }

    let heading_at = match lines.iter().position(|l| l.starts_with("# ")) {
        Some(index) => {
            lines[index] = subs.heading.clone();
            index
        }
        None => {
            lines.splice(0..0, [subs.heading.clone(), String::new()]);
            0
        }
    };

    set_status(&mut lines, heading_at, subs.status);

    if !subs.links.is_empty() {
        add_links(&mut lines, &subs.links);
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Overwrite the first non-blank line of the status section, creating the
/// section or the line when the template lacks them.
fn set_status(lines: &mut Vec<String>, heading_at: usize, status: &str) {
    let Some(section) = lines.iter().position(|l| l.trim() == STATUS_HEADING) else {
        lines.splice(
            heading_at + 1..heading_at + 1,
            [
                String::new(),
                STATUS_HEADING.to_string(),
                String::new(),
                status.to_string(),
            ],
        );
        return;
    };

    let body = lines[section + 1..]
        .iter()
        .position(|l| !l.trim().is_empty())
        .map_or(lines.len(), |offset| section + 1 + offset);

    if body < lines.len() && !lines[body].starts_with('#') {
        lines[body] = status.to_string();
        return;
    }

    // Empty section: replace its blank lines with exactly one on each side
    let mut block = vec![String::new(), status.to_string()];
    if body < lines.len() {
        block.push(String::new());
    }
    lines.splice(section + 1..body, block);
}

/// Index one past the last line of the section starting at `heading`
fn section_end(lines: &[String], heading: usize) -> usize {
    lines[heading + 1..]
        .iter()
        .position(|l| l.starts_with("## ") || l.starts_with("# "))
        .map_or(lines.len(), |offset| heading + 1 + offset)
}

/// List the links under the template's links section, or under a new one at
/// the end of the document.
fn add_links(lines: &mut Vec<String>, links: &[(&Link, String)]) {
    let rendered = links
        .iter()
        .map(|(link, target_file)| link.render(target_file));

    let Some(section) = lines.iter().position(|l| l.trim() == LINKS_HEADING) else {
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        lines.push(String::new());
        lines.push(LINKS_HEADING.to_string());
        lines.push(String::new());
        lines.extend(rendered);
        return;
    };

    let end = section_end(lines, section);
    let mut content_end = end;
    while content_end > section + 1 && lines[content_end - 1].trim().is_empty() {
        content_end -= 1;
    }

    let mut block = vec![String::new()];
    block.extend(rendered);
    if end < lines.len() {
        block.push(String::new());
    }
    lines.splice(content_end..end, block);
}

/// Recover the links listed in a rendered document
pub fn parse_links(document: &str) -> Vec<Link> {
    document
        .lines()
        .skip_while(|l| l.trim() != LINKS_HEADING)
        .skip(1)
        .take_while(|l| !l.starts_with("## "))
        .filter_map(|l| {
            let caps = LINK_LINE.captures(l)?;
            Some(Link {
                target: caps[2].parse().ok()?,
                description: caps[1].to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    fn subs<'a>(links: Vec<(&'a Link, String)>) -> Substitutions<'a> {
        Substitutions {
            heading: "# 3. Pick a database".into(),
            date: "March 7, 2024",
            status: "Accepted",
            links,
        }
    }

    #[test]
    fn fills_heading_date_and_status() {
        let template = "# NUMBER. TITLE\n\nDate: {{date}}\n\n## Status\n\nSTATUS\n\n## Context\n\nctx";
        let out = render(lines(template), &subs(vec![]));
        assert_eq!(
            out,
            "# 3. Pick a database\n\nDate: March 7, 2024\n\n## Status\n\nAccepted\n\n## Context\n\nctx\n"
        );
    }

    #[test]
    fn other_content_passes_through() {
        let template = "# T\n\n## Status\n\nS\n\nNUMBER and TITLE and {{other}} stay";
        let out = render(lines(template), &subs(vec![]));
        assert!(out.contains("NUMBER and TITLE and {{other}} stay"));
    }

    #[test]
    fn missing_heading_and_status_are_added() {
        let out = render(lines("Just a body"), &subs(vec![]));
        assert_eq!(
            out,
            "# 3. Pick a database\n\n## Status\n\nAccepted\n\nJust a body\n"
        );
    }

    #[test]
    fn empty_status_section_gets_a_line() {
        let out = render(lines("# T\n\n## Status\n\n## Context"), &subs(vec![]));
        assert_eq!(
            out,
            "# 3. Pick a database\n\n## Status\n\nAccepted\n\n## Context\n"
        );
    }

    #[test]
    fn status_section_at_the_end_gets_no_trailing_blank() {
        let out = render(lines("# T\n\n## Status\n\n\n"), &subs(vec![]));
        assert_eq!(out, "# 3. Pick a database\n\n## Status\n\nAccepted\n");
    }

    #[test]
    fn links_are_appended_and_parse_back() {
        let a = Link {
            target: 4,
            description: "Links to".into(),
        };
        let b = Link {
            target: 12,
            description: "Amended by".into(),
        };
        let out = render(
            lines("# T\n\n## Status\n\nS\n\n"),
            &subs(vec![
                (&a, "0004-first.md".into()),
                (&b, "0012.md".into()),
            ]),
        );

        assert!(out.ends_with(
            "Accepted\n\n## Links\n\n* Links to [4](0004-first.md)\n* Amended by [12](0012.md)\n"
        ));
        assert_eq!(parse_links(&out), vec![a, b]);
    }

    #[test]
    fn links_fill_the_templates_own_links_section() {
        let link = Link {
            target: 4,
            description: "Links to".into(),
        };
        let template = "# N. T\n\n## Status\n\nS\n\n## Links\n\n## Context\n\nctx";
        let out = render(lines(template), &subs(vec![(&link, "0004.md".into())]));

        assert_eq!(out.matches(LINKS_HEADING).count(), 1);
        assert!(out.contains("## Links\n\n* Links to [4](0004.md)\n\n## Context\n\nctx\n"));
        assert_eq!(parse_links(&out), vec![link]);
    }

    #[test]
    fn links_follow_existing_text_in_the_links_section() {
        let link = Link {
            target: 2,
            description: "Amends".into(),
        };
        let template = "# T\n\n## Status\n\nS\n\n## Links\n\nSee also the wiki.\n\n";
        let out = render(lines(template), &subs(vec![(&link, "0002-x.md".into())]));

        assert!(out.ends_with("## Links\n\nSee also the wiki.\n\n* Amends [2](0002-x.md)\n"));
        assert_eq!(parse_links(&out), vec![link]);
    }

    #[test]
    fn no_links_section_parses_to_nothing() {
        assert!(parse_links("# 1. X\n\n* Not a link [1](x.md)\n").is_empty());
    }
}

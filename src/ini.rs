//! Line-oriented browscap INI parser (§4.1) and Parent-reference resolution
//! (§4.2).

use crate::error::{Error, Result};
use crate::types::{Section, SectionId};

const VERSION_SECTION: &str = "GJK_Browscap_Version";
const VERSION_KEY: &str = "Version";

pub(crate) struct Parsed {
    pub version: String,
    pub sections: Vec<Section>,
}

/// Parse a full browscap INI byte stream into ordered sections with
/// resolved `parent_id` links.
pub(crate) fn parse(bytes: &[u8]) -> Result<Parsed> {
    let text = String::from_utf8_lossy(bytes);

    let mut version = String::new();
    let mut sections: Vec<Section> = Vec::new();
    let mut name_to_id: std::collections::HashMap<String, SectionId> = Default::default();

    let mut in_version_section = false;
    let mut current: Option<SectionId> = None;

    for (line_no, raw_line) in text.lines().enumerate() {
        let line_num = line_no + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            let name = &line[1..line.len() - 1];
            if name == VERSION_SECTION {
                in_version_section = true;
                current = None;
                continue;
            }
            in_version_section = false;
            if name_to_id.contains_key(name) {
                return Err(Error::DuplicateSection {
                    name: name.to_string(),
                    line: line_num,
                });
            }
            let id = sections.len() as SectionId;
            name_to_id.insert(name.to_string(), id);
            sections.push(Section {
                id,
                name: name.to_string(),
                ..Default::default()
            });
            current = Some(id);
            continue;
        }

        let Some(eq) = line.find('=') else {
            return Err(Error::MalformedLine {
                line: line_num,
                text: line.to_string(),
            });
        };
        let key = line[..eq].trim();
        let value = unquote(line[eq + 1..].trim());

        if in_version_section {
            if key == VERSION_KEY {
                version = value.to_string();
            }
            continue;
        }

        let Some(id) = current else {
            return Err(Error::MalformedLine {
                line: line_num,
                text: line.to_string(),
            });
        };
        apply_key(&mut sections[id as usize], key, value, line_num)?;
    }

    resolve_parents(&mut sections, &name_to_id)?;

    Ok(Parsed { version, sections })
}

/// Strip one layer of matched surrounding quotes (`"..."` or `'...'`).
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn parse_bool(field: &'static str, value: &str, line: usize) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::BadBoolean {
            field,
            value: value.to_string(),
            line,
        }),
    }
}

fn apply_key(section: &mut Section, key: &str, value: &str, line: usize) -> Result<()> {
    match key {
        "Parent" => section.parent_name = value.to_string(),
        "Comment" => section.comment = value.to_string(),
        "Browser" => section.browser = value.to_string(),
        "Browser_Maker" => section.browser_maker = value.to_string(),
        "Version" => section.version = value.to_string(),
        "MajorVer" => section.major_version = value.to_string(),
        "MinorVer" => section.minor_version = value.to_string(),
        "Platform" => section.platform = value.to_string(),
        "Platform_Version" => section.platform_version = value.to_string(),
        "isMobileDevice" => {
            section.is_mobile_device =
                crate::types::TriState::of(parse_bool("isMobileDevice", value, line)?)
        }
        "isTablet" => {
            section.is_tablet = crate::types::TriState::of(parse_bool("isTablet", value, line)?)
        }
        "Crawler" => {
            section.is_crawler = crate::types::TriState::of(parse_bool("Crawler", value, line)?)
        }
        "Device_Type" => section.device_type = value.to_string(),
        "Device_Pointing_Method" => section.device_pointing_method = value.to_string(),
        "Browser_Type" => section.browser_type = value.to_string(),
        "Device_Name" => section.device_name = value.to_string(),
        "Device_Code_Name" => section.device_code_name = value.to_string(),
        "Device_Brand_Name" => section.device_brand_name = value.to_string(),
        _ => {} // unknown keys silently ignored
    }
    Ok(())
}

/// §4.2 — resolve every `Parent=name` into a `parent_id`, failing fast on a
/// dangling reference. No cycle check: the catalog is trusted, and query-time
/// inheritance walks bound their own depth defensively (see `query.rs`).
fn resolve_parents(
    sections: &mut [Section],
    name_to_id: &std::collections::HashMap<String, SectionId>,
) -> Result<()> {
    for i in 0..sections.len() {
        let parent_name = sections[i].parent_name.clone();
        if parent_name.is_empty() {
            continue;
        }
        match name_to_id.get(&parent_name) {
            Some(&pid) => sections[i].parent_id = Some(pid),
            None => {
                return Err(Error::UnknownParent {
                    section: sections[i].name.clone(),
                    parent: parent_name,
                })
            }
        }
    }
    Ok(())
}

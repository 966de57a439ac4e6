use super::TriState;

/// 0-based index into `Catalog::sections`, assigned in INI appearance order.
pub type SectionId = u32;

/// One parsed `[...]` block from the browscap INI.
///
/// Unknown property keys are silently ignored at parse time — this struct
/// only carries the keys the system recognizes (see `ini::parse`).
#[derive(Debug, Clone, Default)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub parent_id: Option<SectionId>,
    /// Raw `Parent=` value, kept around only so it can be merged onto the
    /// final `Record` the way every other string property is.
    pub parent_name: String,
    pub comment: String,
    pub browser: String,
    pub browser_maker: String,
    pub version: String,
    pub major_version: String,
    pub minor_version: String,
    pub platform: String,
    pub platform_version: String,
    pub is_mobile_device: TriState,
    pub is_tablet: TriState,
    pub is_crawler: TriState,
    pub device_type: String,
    pub device_pointing_method: String,
    pub browser_type: String,
    pub device_name: String,
    pub device_code_name: String,
    pub device_brand_name: String,
}

impl Section {
    /// Does this section's name serve as a UA pattern (vs. an abstract
    /// "parent" record only reachable through inheritance)?
    ///
    /// A section contributes a pattern unless it carries a non-empty
    /// `Comment` and no wildcard characters in its name — those are pure
    /// property-holder sections meant only to be inherited from.
    pub(crate) fn contributes_pattern(&self) -> bool {
        self.comment.is_empty() || self.name.contains('*') || self.name.contains('?')
    }
}

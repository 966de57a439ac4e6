use super::{Section, TriState};

/// The result of a successful `classify()` call: the winning section's
/// properties, merged with its ancestor chain, first-writer-wins.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub parent: String,
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
    /// The `pattern_str` of the Pattern that matched, for diagnostics.
    pub pattern: String,
}

impl Record {
    /// Merge one section's properties onto this record: each string field is
    /// only copied if still empty; each tri-state only copied if not yet
    /// `present`. Called once for the winning section, then once per
    /// ancestor walking `parent_id`.
    pub(crate) fn merge_from(&mut self, section: &Section) {
        if self.parent.is_empty() {
            self.parent = section.parent_name.clone();
        }
        if self.comment.is_empty() {
            self.comment = section.comment.clone();
        }
        if self.browser.is_empty() {
            self.browser = section.browser.clone();
        }
        if self.browser_maker.is_empty() {
            self.browser_maker = section.browser_maker.clone();
        }
        if self.version.is_empty() {
            self.version = section.version.clone();
        }
        if self.major_version.is_empty() {
            self.major_version = section.major_version.clone();
        }
        if self.minor_version.is_empty() {
            self.minor_version = section.minor_version.clone();
        }
        if self.platform.is_empty() {
            self.platform = section.platform.clone();
        }
        if self.platform_version.is_empty() {
            self.platform_version = section.platform_version.clone();
        }
        if self.device_type.is_empty() {
            self.device_type = section.device_type.clone();
        }
        if self.device_pointing_method.is_empty() {
            self.device_pointing_method = section.device_pointing_method.clone();
        }
        if self.browser_type.is_empty() {
            self.browser_type = section.browser_type.clone();
        }
        if self.device_name.is_empty() {
            self.device_name = section.device_name.clone();
        }
        if self.device_code_name.is_empty() {
            self.device_code_name = section.device_code_name.clone();
        }
        if self.device_brand_name.is_empty() {
            self.device_brand_name = section.device_brand_name.clone();
        }

        if section.is_mobile_device.present && !self.is_mobile_device.present {
            self.is_mobile_device = section.is_mobile_device;
        }
        if section.is_tablet.present && !self.is_tablet.present {
            self.is_tablet = section.is_tablet;
        }
        // Deliberately NOT `section.is_crawler.present && self.is_crawler.present`
        // (copy only once already set) — that reads backwards and would make
        // Crawler=true properties on a parent section unreachable from any
        // child that hadn't already set it itself. Same present-gated,
        // first-writer-wins rule as every other tri-state here.
        if section.is_crawler.present && !self.is_crawler.present {
            self.is_crawler = section.is_crawler;
        }
    }
}

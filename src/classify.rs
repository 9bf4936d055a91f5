//! Country and area classification of single lines

use crate::error::{PipelineError, Result};
use crate::prefixes::{CountryConfig, PrefixTable};

/// Bucket label for lines matching no calling code
pub const UNKNOWN_COUNTRY: &str = "未知国家";

/// Bucket label for member lines matching no area prefix
pub const UNKNOWN_AREA: &str = "未知地区";

/// Result of classifying one line against a target country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaOutcome<'a> {
    Area(&'a str),
    UnknownArea,
    UnknownCountry,
}

impl<'a> AreaOutcome<'a> {
    /// Output bucket name for this outcome.
    pub fn bucket(&self) -> &'a str {
        match self {
            AreaOutcome::Area(name) => name,
            AreaOutcome::UnknownArea => UNKNOWN_AREA,
            AreaOutcome::UnknownCountry => UNKNOWN_COUNTRY,
        }
    }
}

/// Read-only classifier over a [`PrefixTable`].
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'t> {
    table: &'t PrefixTable,
}

impl Classifier<'static> {
    pub fn builtin() -> Self {
        Self::new(PrefixTable::builtin())
    }
}

impl<'t> Classifier<'t> {
    pub fn new(table: &'t PrefixTable) -> Self {
        Self { table }
    }

    /// Resolve a user-supplied country name or ISO code.
    pub fn resolve_country(&self, key: &str) -> Result<&'t CountryConfig> {
        self.table
            .find(key)
            .ok_or_else(|| PipelineError::UnknownCountry(key.trim().to_string()))
    }

    #[inline]
    pub fn is_country_member(&self, line: &str, country: &CountryConfig) -> bool {
        country.is_member(line)
    }

    #[inline]
    pub fn identify_area<'c>(&self, line: &str, country: &'c CountryConfig) -> Option<&'c str> {
        country.identify_area(line)
    }

    /// Name of the country owning the longest matching calling code, or
    /// [`UNKNOWN_COUNTRY`].
    pub fn identify_country(&self, line: &str) -> &'t str {
        self.table
            .country_for(line)
            .map(CountryConfig::name)
            .unwrap_or(UNKNOWN_COUNTRY)
    }

    /// Area-split decision for one line.
    pub fn classify_area<'c>(&self, line: &str, country: &'c CountryConfig) -> AreaOutcome<'c> {
        if !self.is_country_member(line, country) {
            return AreaOutcome::UnknownCountry;
        }
        match self.identify_area(line, country) {
            Some(area) => AreaOutcome::Area(area),
            None => AreaOutcome::UnknownArea,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefixes::AreaPrefix;

    #[test]
    fn test_identify_country_builtin() {
        let classifier = Classifier::builtin();
        assert_eq!(classifier.identify_country("8613800000000"), "中国");
        assert_eq!(classifier.identify_country("447911123456"), "英国");
        assert_eq!(classifier.identify_country("000"), UNKNOWN_COUNTRY);
        assert_eq!(classifier.identify_country(""), UNKNOWN_COUNTRY);
    }

    #[test]
    fn test_resolve_country() {
        let classifier = Classifier::builtin();
        assert_eq!(classifier.resolve_country(" 德国 ").unwrap().iso(), "DE");
        assert_eq!(classifier.resolve_country("jp").unwrap().name(), "日本");

        let err = classifier.resolve_country("Atlantis").unwrap_err();
        assert!(matches!(err, PipelineError::UnknownCountry(ref name) if name == "Atlantis"));
    }

    #[test]
    fn test_classify_area_builtin() {
        let classifier = Classifier::builtin();
        let uk = classifier.resolve_country("英国").unwrap();

        assert_eq!(classifier.classify_area("442071234567", uk), AreaOutcome::Area("伦敦"));
        assert_eq!(classifier.classify_area("441611234567", uk), AreaOutcome::Area("曼彻斯特"));
        assert_eq!(classifier.classify_area("440000000", uk), AreaOutcome::UnknownArea);
        assert_eq!(classifier.classify_area("8613800000000", uk), AreaOutcome::UnknownCountry);

        let germany = classifier.resolve_country("DE").unwrap();
        assert_eq!(classifier.classify_area("4930123456", germany).bucket(), "柏林");
        assert_eq!(classifier.classify_area("49221123456", germany).bucket(), "科隆");
    }

    #[test]
    fn test_member_without_areas_is_unknown_area() {
        let classifier = Classifier::builtin();
        let china = classifier.resolve_country("CN").unwrap();
        assert_eq!(classifier.classify_area("8613800000000", china).bucket(), UNKNOWN_AREA);
    }

    #[test]
    fn test_custom_table() {
        let country = CountryConfig::new(
            "Testland",
            "TL",
            vec!["1".to_string()],
            vec![AreaPrefix::new("X", ["123"]), AreaPrefix::new("Y", ["1234"])],
        )
        .unwrap();
        let table = PrefixTable::new(vec![country]).unwrap();
        let classifier = Classifier::new(&table);
        let testland = classifier.resolve_country("TL").unwrap();

        assert_eq!(classifier.classify_area("1234567", testland), AreaOutcome::Area("Y"));
        assert_eq!(classifier.classify_area("2234567", testland).bucket(), UNKNOWN_COUNTRY);
        assert_eq!(classifier.identify_country("1999"), "Testland");
    }
}

//! Calling code and area prefix tables
//!
//! A [`PrefixTable`] is an ordered list of [`CountryConfig`] entries. Each
//! country owns a set of calling codes (used to decide membership) and an
//! ordered list of [`AreaPrefix`] groups (used to label a number with a city
//! or region).
//!
//! Matching always prefers the longest prefix. When two prefixes of the same
//! length match, declaration order decides: the country or area listed first
//! wins. The built-in table contains a few such duplicates, reported by
//! [`PrefixTable::ambiguous_prefixes`].

use crate::error::{PipelineError, Result};
use crate::prefix_data::BUILTIN_COUNTRIES;

use ahash::RandomState;
use hashbrown::{HashMap, HashSet};
use std::sync::OnceLock;

/// Static area record used by the built-in data set.
pub(crate) struct RawArea {
    pub name: &'static str,
    pub prefixes: &'static [&'static str],
}

/// Static country record used by the built-in data set.
pub(crate) struct RawCountry {
    pub name: &'static str,
    pub iso: &'static str,
    pub calling_codes: &'static [&'static str],
    pub areas: &'static [RawArea],
}

/// A named group of number prefixes inside one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaPrefix {
    pub name: String,
    pub prefixes: Vec<String>,
}

impl AreaPrefix {
    pub fn new<I, S>(name: impl Into<String>, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

/// One country of the table, with a precomputed area lookup index.
#[derive(Debug, Clone)]
pub struct CountryConfig {
    name: String,
    iso: String,
    calling_codes: Vec<String>,
    areas: Vec<AreaPrefix>,
    /// prefix -> index of the first area declaring it
    area_index: HashMap<String, usize, RandomState>,
    max_area_prefix_len: usize,
}

impl CountryConfig {
    /// Build a country entry, rejecting empty or non-numeric prefixes.
    pub fn new(
        name: impl Into<String>,
        iso: impl Into<String>,
        calling_codes: Vec<String>,
        areas: Vec<AreaPrefix>,
    ) -> Result<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(PipelineError::invalid("country name must not be empty"));
        }
        if calling_codes.is_empty() {
            return Err(PipelineError::invalid(format!(
                "country '{}' has no calling codes",
                name
            )));
        }

        let all_prefixes = calling_codes
            .iter()
            .chain(areas.iter().flat_map(|a| a.prefixes.iter()));
        for prefix in all_prefixes {
            if !is_numeric_prefix(prefix) {
                return Err(PipelineError::invalid(format!(
                    "country '{}' has a non-numeric prefix '{}'",
                    name, prefix
                )));
            }
        }

        Ok(Self::from_parts(name, iso.into(), calling_codes, areas))
    }

    fn from_parts(name: String, iso: String, calling_codes: Vec<String>, areas: Vec<AreaPrefix>) -> Self {
        let mut area_index = HashMap::with_hasher(RandomState::new());
        let mut max_area_prefix_len = 0;

        for (idx, area) in areas.iter().enumerate() {
            for prefix in &area.prefixes {
                max_area_prefix_len = max_area_prefix_len.max(prefix.len());
                // Keep the first declaration: same-length ties go to table order
                area_index.entry(prefix.clone()).or_insert(idx);
            }
        }

        Self {
            name,
            iso,
            calling_codes,
            areas,
            area_index,
            max_area_prefix_len,
        }
    }

    fn from_raw(raw: &RawCountry) -> Self {
        let areas = raw
            .areas
            .iter()
            .map(|a| AreaPrefix::new(a.name, a.prefixes.iter().copied()))
            .collect();
        let calling_codes = raw.calling_codes.iter().map(|c| c.to_string()).collect();
        Self::from_parts(raw.name.to_string(), raw.iso.to_string(), calling_codes, areas)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// ISO 3166-1 alpha-2 code, may be empty for custom tables
    pub fn iso(&self) -> &str {
        &self.iso
    }

    pub fn calling_codes(&self) -> &[String] {
        &self.calling_codes
    }

    pub fn areas(&self) -> &[AreaPrefix] {
        &self.areas
    }

    /// Longest prefix length across all areas (0 when the country has no areas).
    pub fn max_area_prefix_len(&self) -> usize {
        self.max_area_prefix_len
    }

    /// True iff `number` starts with one of this country's calling codes.
    #[inline]
    pub fn is_member(&self, number: &str) -> bool {
        self.calling_codes.iter().any(|code| number.starts_with(code.as_str()))
    }

    /// Name of the area whose prefix is the longest match for `number`.
    ///
    /// Candidate lengths are tried from [`max_area_prefix_len`](Self::max_area_prefix_len)
    /// down to 1. At each length the first area in declaration order that owns
    /// exactly that prefix wins.
    pub fn identify_area(&self, number: &str) -> Option<&str> {
        let longest = self.max_area_prefix_len.min(number.len());

        for len in (1..=longest).rev() {
            let Some(head) = number.get(..len) else {
                continue;
            };
            if let Some(&idx) = self.area_index.get(head) {
                return Some(self.areas[idx].name.as_str());
            }
        }

        None
    }

    /// Prefixes declared under more than one area of this country.
    pub fn ambiguous_area_prefixes(&self) -> Vec<AmbiguousPrefix> {
        let mut owners: Vec<(&str, Vec<&str>)> = Vec::new();
        let mut positions: HashMap<&str, usize, RandomState> = HashMap::with_hasher(RandomState::new());

        for area in &self.areas {
            // A prefix repeated inside a single area is not an ambiguity
            let mut local: HashSet<&str, RandomState> = HashSet::with_hasher(RandomState::new());
            for prefix in &area.prefixes {
                if !local.insert(prefix.as_str()) {
                    continue;
                }
                match positions.get(prefix.as_str()) {
                    Some(&pos) => owners[pos].1.push(area.name.as_str()),
                    None => {
                        positions.insert(prefix.as_str(), owners.len());
                        owners.push((prefix.as_str(), vec![area.name.as_str()]));
                    }
                }
            }
        }

        owners
            .into_iter()
            .filter(|(_, claimants)| claimants.len() > 1)
            .map(|(prefix, claimants)| AmbiguousPrefix {
                country: Some(self.name.clone()),
                prefix: prefix.to_string(),
                claimants: claimants.into_iter().map(String::from).collect(),
            })
            .collect()
    }
}

/// A prefix claimed by more than one area (or, when `country` is `None`,
/// a calling code claimed by more than one country). The first claimant wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousPrefix {
    pub country: Option<String>,
    pub prefix: String,
    pub claimants: Vec<String>,
}

/// Immutable country table with a global longest-first calling code index.
#[derive(Debug, Clone)]
pub struct PrefixTable {
    countries: Vec<CountryConfig>,
    /// (calling code, country index), longest code first, table order within a length
    calling_index: Vec<(String, usize)>,
}

static BUILTIN: OnceLock<PrefixTable> = OnceLock::new();

impl PrefixTable {
    /// Build a table from country entries. Country names must be unique.
    pub fn new(countries: Vec<CountryConfig>) -> Result<Self> {
        {
            let mut names: HashSet<&str, RandomState> = HashSet::with_hasher(RandomState::new());
            for country in &countries {
                if !names.insert(country.name()) {
                    return Err(PipelineError::invalid(format!(
                        "duplicate country name '{}'",
                        country.name()
                    )));
                }
            }
        }
        Ok(Self::index(countries))
    }

    fn index(countries: Vec<CountryConfig>) -> Self {
        let mut calling_index: Vec<(String, usize)> = countries
            .iter()
            .enumerate()
            .flat_map(|(idx, c)| c.calling_codes.iter().map(move |code| (code.clone(), idx)))
            .collect();

        // Stable sort keeps declaration order among codes of equal length
        calling_index.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            countries,
            calling_index,
        }
    }

    /// The process-wide built-in table, constructed on first use.
    pub fn builtin() -> &'static PrefixTable {
        BUILTIN.get_or_init(|| {
            let countries = BUILTIN_COUNTRIES.iter().map(CountryConfig::from_raw).collect();
            Self::index(countries)
        })
    }

    pub fn countries(&self) -> &[CountryConfig] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Look up a country by display name or ISO code (ISO match is case-insensitive).
    pub fn find(&self, key: &str) -> Option<&CountryConfig> {
        let key = key.trim();
        self.countries
            .iter()
            .find(|c| c.name == key)
            .or_else(|| {
                self.countries
                    .iter()
                    .find(|c| !c.iso.is_empty() && c.iso.eq_ignore_ascii_case(key))
            })
    }

    /// Country owning the longest calling code that prefixes `number`.
    pub fn country_for(&self, number: &str) -> Option<&CountryConfig> {
        self.calling_index
            .iter()
            .find(|(code, _)| number.starts_with(code.as_str()))
            .map(|(_, idx)| &self.countries[*idx])
    }

    /// Every ambiguous calling code and area prefix in the table.
    pub fn ambiguous_prefixes(&self) -> Vec<AmbiguousPrefix> {
        let mut found = Vec::new();

        let mut code_owners: Vec<(&str, Vec<&str>)> = Vec::new();
        for (code, idx) in &self.calling_index {
            let name = self.countries[*idx].name();
            match code_owners.iter_mut().find(|(c, _)| *c == code.as_str()) {
                Some((_, owners)) if !owners.contains(&name) => owners.push(name),
                Some(_) => {}
                None => code_owners.push((code.as_str(), vec![name])),
            }
        }
        found.extend(
            code_owners
                .into_iter()
                .filter(|(_, owners)| owners.len() > 1)
                .map(|(code, owners)| AmbiguousPrefix {
                    country: None,
                    prefix: code.to_string(),
                    claimants: owners.into_iter().map(String::from).collect(),
                }),
        );

        for country in &self.countries {
            found.extend(country.ambiguous_area_prefixes());
        }

        found
    }
}

fn is_numeric_prefix(prefix: &str) -> bool {
    !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_longest_area_prefix_wins() {
        let country = CountryConfig::new(
            "Testland",
            "TL",
            codes(&["1"]),
            vec![
                AreaPrefix::new("X", ["123"]),
                AreaPrefix::new("Y", ["1234"]),
            ],
        )
        .unwrap();

        assert_eq!(country.identify_area("1234567"), Some("Y"));
        assert_eq!(country.identify_area("1235000"), Some("X"));
        assert_eq!(country.identify_area("1299999"), None);
        assert_eq!(country.max_area_prefix_len(), 4);
    }

    #[test]
    fn test_same_length_tie_goes_to_first_declared() {
        let country = CountryConfig::new(
            "Testland",
            "",
            codes(&["33"]),
            vec![
                AreaPrefix::new("First", ["334"]),
                AreaPrefix::new("Second", ["334", "335"]),
            ],
        )
        .unwrap();

        assert_eq!(country.identify_area("33412345"), Some("First"));
        assert_eq!(country.identify_area("33512345"), Some("Second"));
    }

    #[test]
    fn test_short_number_and_no_areas() {
        let country = CountryConfig::new("Plain", "", codes(&["86"]), Vec::new()).unwrap();
        assert_eq!(country.identify_area("8613800000000"), None);
        assert_eq!(country.max_area_prefix_len(), 0);

        let builtin = PrefixTable::builtin();
        let uk = builtin.find("GB").unwrap();
        assert_eq!(uk.identify_area("44"), None);
    }

    #[test]
    fn test_non_numeric_prefix_rejected() {
        let err = CountryConfig::new("Bad", "", codes(&["1a"]), Vec::new()).unwrap_err();
        assert!(err.is_parameter_error());

        let err = CountryConfig::new("Bad", "", Vec::new(), Vec::new()).unwrap_err();
        assert!(err.is_parameter_error());
    }

    #[test]
    fn test_duplicate_country_names_rejected() {
        let a = CountryConfig::new("Same", "", codes(&["1"]), Vec::new()).unwrap();
        let b = CountryConfig::new("Same", "", codes(&["2"]), Vec::new()).unwrap();
        assert!(PrefixTable::new(vec![a, b]).is_err());
    }

    #[test]
    fn test_country_for_prefers_longest_code() {
        // "35" is declared first but "358" is more specific
        let short = CountryConfig::new("Short", "", codes(&["35"]), Vec::new()).unwrap();
        let long = CountryConfig::new("Long", "", codes(&["358"]), Vec::new()).unwrap();
        let table = PrefixTable::new(vec![short, long]).unwrap();

        assert_eq!(table.country_for("358401234567").unwrap().name(), "Long");
        assert_eq!(table.country_for("351912345678").unwrap().name(), "Short");
        assert!(table.country_for("44").is_none());
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let table = PrefixTable::builtin();
        assert!(table.len() > 70);

        // Every built-in entry passes the same checks as user-built entries
        for country in table.countries() {
            CountryConfig::new(
                country.name(),
                country.iso(),
                country.calling_codes().to_vec(),
                country.areas().to_vec(),
            )
            .unwrap();
        }
        PrefixTable::new(table.countries().to_vec()).unwrap();
    }

    #[test]
    fn test_builtin_lookup_by_name_and_iso() {
        let table = PrefixTable::builtin();
        assert_eq!(table.find("美国").unwrap().iso(), "US");
        assert_eq!(table.find("ca").unwrap().name(), "加拿大");
        assert!(table.find("Atlantis").is_none());
    }

    #[test]
    fn test_builtin_nanp_split_between_us_and_canada() {
        let table = PrefixTable::builtin();
        assert_eq!(table.country_for("12125550100").unwrap().name(), "美国");
        assert_eq!(table.country_for("14165550100").unwrap().name(), "加拿大");
        // Reconciled from the area table
        assert_eq!(table.country_for("17805550100").unwrap().name(), "加拿大");
        assert_eq!(table.country_for("18085550100").unwrap().name(), "美国");
        // 1-800 is neither
        assert!(table.country_for("18005550100").is_none());
    }

    #[test]
    fn test_builtin_ambiguous_prefixes_reported() {
        let table = PrefixTable::builtin();
        let ambiguous = table.ambiguous_prefixes();

        let france_334 = ambiguous
            .iter()
            .find(|a| a.country.as_deref() == Some("法国") && a.prefix == "334")
            .unwrap();
        assert_eq!(france_334.claimants, vec!["马赛", "里昂", "尼斯"]);

        assert!(ambiguous
            .iter()
            .any(|a| a.country.as_deref() == Some("加拿大") && a.prefix == "1825"));

        // No calling code is shared between countries
        assert!(ambiguous.iter().all(|a| a.country.is_some()));
    }

    #[test]
    fn test_builtin_ambiguous_area_resolves_to_first() {
        let france = PrefixTable::builtin().find("FR").unwrap();
        assert_eq!(france.identify_area("33491000000"), Some("马赛"));

        let canada = PrefixTable::builtin().find("CA").unwrap();
        assert_eq!(canada.identify_area("18255550100"), Some("阿尔伯塔省-卡尔加里"));
    }

    #[test]
    fn test_shared_calling_code_is_reported() {
        let a = CountryConfig::new("A", "", codes(&["1"]), Vec::new()).unwrap();
        let b = CountryConfig::new("B", "", codes(&["1"]), Vec::new()).unwrap();
        let table = PrefixTable::new(vec![a, b]).unwrap();

        let ambiguous = table.ambiguous_prefixes();
        assert_eq!(ambiguous.len(), 1);
        assert_eq!(ambiguous[0].country, None);
        assert_eq!(ambiguous[0].claimants, vec!["A", "B"]);
        assert_eq!(table.country_for("1555").unwrap().name(), "A");
    }
}

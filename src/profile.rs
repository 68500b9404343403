//! Target profile: the facts generation is seeded from.
//!
//! A [`Profile`] is an immutable snapshot built once, either through
//! [`ProfileBuilder`], the interactive collector, or a TOML file:
//!
//! ```toml
//! first_name = "Alice"
//! last_name = "Smith"
//! birth_year = 1990          # integers are accepted for numeric fields
//! company_short = "ACME"
//! interests = ["chess", "hiking"]
//! keywords = ["rover"]
//! ```
//!
//! ## Field classification
//!
//! Each field carries a closed [`FieldKind`] tag so downstream stages ask
//! "is this a name?" by matching on the tag, never by comparing key strings.
//!
//! | Kind | Fields |
//! |------|--------|
//! | `Name` | first_name, last_name, nickname |
//! | `Organization` | company_name, company_short, job_title, department |
//! | `Relation` | pet_name, spouse_name, child_name |
//! | `Temporal` | birth_year, birth_date, anniversary |
//! | `Freeform` | interests, keywords (lists) |
//!
//! Empty values are absent values: setters trim input and drop anything
//! that ends up empty, so no stage ever sees `""`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML write error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// What a field describes; decides which transforms apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Organization,
    Relation,
    Temporal,
    Freeform,
}

/// Scalar profile fields, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Nickname,
    BirthYear,
    CompanyName,
    CompanyShort,
    JobTitle,
    Department,
    PetName,
    SpouseName,
    ChildName,
    BirthDate,
    Anniversary,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::FirstName,
        Field::LastName,
        Field::Nickname,
        Field::BirthYear,
        Field::CompanyName,
        Field::CompanyShort,
        Field::JobTitle,
        Field::Department,
        Field::PetName,
        Field::SpouseName,
        Field::ChildName,
        Field::BirthDate,
        Field::Anniversary,
    ];

    /// Key used in profile files.
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Nickname => "nickname",
            Field::BirthYear => "birth_year",
            Field::CompanyName => "company_name",
            Field::CompanyShort => "company_short",
            Field::JobTitle => "job_title",
            Field::Department => "department",
            Field::PetName => "pet_name",
            Field::SpouseName => "spouse_name",
            Field::ChildName => "child_name",
            Field::BirthDate => "birth_date",
            Field::Anniversary => "anniversary",
        }
    }

    /// Human-readable label, used for prompts and the suggestion prompt.
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Nickname => "Nickname/Username",
            Field::BirthYear => "Birth year",
            Field::CompanyName => "Company/Organization name",
            Field::CompanyShort => "Company short name",
            Field::JobTitle => "Job title",
            Field::Department => "Department",
            Field::PetName => "Pet name",
            Field::SpouseName => "Spouse/Partner name",
            Field::ChildName => "Child's name",
            Field::BirthDate => "Birth date",
            Field::Anniversary => "Anniversary",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::FirstName | Field::LastName | Field::Nickname => FieldKind::Name,
            Field::CompanyName | Field::CompanyShort | Field::JobTitle | Field::Department => {
                FieldKind::Organization
            }
            Field::PetName | Field::SpouseName | Field::ChildName => FieldKind::Relation,
            Field::BirthYear | Field::BirthDate | Field::Anniversary => FieldKind::Temporal,
        }
    }

    /// Whether the field identifies a person or entity and therefore also
    /// gets uppercase and first-letter forms.
    ///
    /// Job titles and departments are organizational but not identities.
    pub fn has_entity_forms(self) -> bool {
        match self.kind() {
            FieldKind::Name | FieldKind::Relation => true,
            FieldKind::Organization => {
                matches!(self, Field::CompanyName | Field::CompanyShort)
            }
            FieldKind::Temporal | FieldKind::Freeform => false,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// List-valued profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    Interests,
    Keywords,
}

impl ListField {
    pub const ALL: [ListField; 2] = [ListField::Interests, ListField::Keywords];

    pub fn key(self) -> &'static str {
        match self {
            ListField::Interests => "interests",
            ListField::Keywords => "keywords",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ListField::Interests => "Interests/Hobbies",
            ListField::Keywords => "Additional keywords",
        }
    }

    pub fn kind(self) -> FieldKind {
        FieldKind::Freeform
    }
}

/// Immutable snapshot of target facts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    scalars: BTreeMap<Field, String>,
    interests: Vec<String>,
    keywords: Vec<String>,
}

impl Profile {
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.scalars.get(&field).map(String::as_str)
    }

    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::Interests => &self.interests,
            ListField::Keywords => &self.keywords,
        }
    }

    /// Present scalar fields in canonical field order.
    pub fn scalars(&self) -> impl Iterator<Item = (Field, &str)> {
        self.scalars.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Present scalar fields of one kind, in canonical order.
    pub fn of_kind(&self, kind: FieldKind) -> impl Iterator<Item = (Field, &str)> {
        self.scalars().filter(move |(f, _)| f.kind() == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.interests.is_empty() && self.keywords.is_empty()
    }

    /// Parse a profile from TOML text. Unknown keys are rejected.
    pub fn from_toml_str(content: &str) -> Result<Self, ProfileError> {
        let file: ProfileFile = toml::from_str(content)?;
        Ok(file.into_profile())
    }

    /// Load a profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Render the profile as TOML in the same format [`Profile::load`] reads.
    pub fn to_toml_string(&self) -> Result<String, ProfileError> {
        Ok(toml::to_string(&ProfileFile::from_profile(self))?)
    }
}

/// Scalar as written in a profile file. Numeric fields may be bare integers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ScalarValue {
    Text(String),
    Number(i64),
}

impl ScalarValue {
    fn into_text(self) -> String {
        match self {
            ScalarValue::Text(s) => s,
            ScalarValue::Number(n) => n.to_string(),
        }
    }
}

/// On-disk profile layout. Field order here is the order keys are written.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ProfileFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nickname: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth_year: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_name: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_short: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_title: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pet_name: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spouse_name: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    child_name: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth_date: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anniversary: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    interests: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    keywords: Vec<String>,
}

impl ProfileFile {
    fn slot(&mut self, field: Field) -> &mut Option<ScalarValue> {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Nickname => &mut self.nickname,
            Field::BirthYear => &mut self.birth_year,
            Field::CompanyName => &mut self.company_name,
            Field::CompanyShort => &mut self.company_short,
            Field::JobTitle => &mut self.job_title,
            Field::Department => &mut self.department,
            Field::PetName => &mut self.pet_name,
            Field::SpouseName => &mut self.spouse_name,
            Field::ChildName => &mut self.child_name,
            Field::BirthDate => &mut self.birth_date,
            Field::Anniversary => &mut self.anniversary,
        }
    }

    fn from_profile(profile: &Profile) -> Self {
        let mut file = ProfileFile {
            interests: profile.interests.clone(),
            keywords: profile.keywords.clone(),
            ..ProfileFile::default()
        };
        for (field, value) in profile.scalars() {
            *file.slot(field) = Some(ScalarValue::Text(value.to_string()));
        }
        file
    }

    fn into_profile(mut self) -> Profile {
        let mut builder = Profile::builder();
        for field in Field::ALL {
            builder = builder.set_opt(field, self.slot(field).take().map(ScalarValue::into_text));
        }
        builder
            .list(ListField::Interests, self.interests)
            .list(ListField::Keywords, self.keywords)
            .build()
    }
}

/// Builder for [`Profile`]; the only way to construct a non-empty one.
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    profile: Profile,
}

impl ProfileBuilder {
    /// Set a scalar field. Whitespace is trimmed; empty values are ignored
    /// and clear any earlier value.
    pub fn set(mut self, field: Field, value: impl AsRef<str>) -> Self {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            self.profile.scalars.remove(&field);
        } else {
            self.profile.scalars.insert(field, trimmed.to_string());
        }
        self
    }

    /// Set an optional scalar field; `None` leaves it absent.
    pub fn set_opt(self, field: Field, value: Option<impl AsRef<str>>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    /// Replace a list field. Items are trimmed and empty items dropped.
    pub fn list<I, S>(mut self, field: ListField, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<String> = items
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        match field {
            ListField::Interests => self.profile.interests = values,
            ListField::Keywords => self.profile.keywords = values,
        }
        self
    }

    pub fn build(self) -> Profile {
        self.profile
    }
}

/// Split comma-separated operator input into list items.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns a commented profile template with every recognized field.
///
/// Used by the `gen-profile` CLI command.
pub fn stock_profile_toml() -> &'static str {
    r##"# wordforge target profile
# ========================
# Every field is optional. Remove or leave empty whatever is unknown.
# Unknown keys are rejected to catch typos early.

# --- Person ----------------------------------------------------------------
first_name = ""
last_name = ""
nickname = ""
birth_year = ""           # YYYY, e.g. "1990"

# --- Organization ----------------------------------------------------------
company_name = ""
company_short = ""        # abbreviation, e.g. "ACME"
job_title = ""
department = ""

# --- Relations -------------------------------------------------------------
pet_name = ""
spouse_name = ""
child_name = ""

# --- Dates (DDMMYYYY) ------------------------------------------------------
birth_date = ""
anniversary = ""

# --- Free-form -------------------------------------------------------------
interests = []
keywords = []
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builder_trims_and_skips_empty() {
        let profile = Profile::builder()
            .set(Field::FirstName, "  Alice ")
            .set(Field::Nickname, "   ")
            .build();
        assert_eq!(profile.get(Field::FirstName), Some("Alice"));
        assert_eq!(profile.get(Field::Nickname), None);
    }

    #[test]
    fn empty_value_clears_earlier_value() {
        let profile = Profile::builder()
            .set(Field::LastName, "Smith")
            .set(Field::LastName, "")
            .build();
        assert_eq!(profile.get(Field::LastName), None);
        assert!(profile.is_empty());
    }

    #[test]
    fn list_drops_blank_items() {
        let profile = Profile::builder()
            .list(ListField::Interests, ["chess", " ", " hiking "])
            .build();
        assert_eq!(profile.list(ListField::Interests), ["chess", "hiking"]);
    }

    #[test]
    fn scalars_iterate_in_canonical_order() {
        let profile = Profile::builder()
            .set(Field::PetName, "Rex")
            .set(Field::FirstName, "Alice")
            .set(Field::CompanyName, "Acme")
            .build();
        let keys: Vec<Field> = profile.scalars().map(|(f, _)| f).collect();
        assert_eq!(keys, vec![Field::FirstName, Field::CompanyName, Field::PetName]);
    }

    #[test]
    fn field_kinds() {
        assert_eq!(Field::Nickname.kind(), FieldKind::Name);
        assert_eq!(Field::Department.kind(), FieldKind::Organization);
        assert_eq!(Field::ChildName.kind(), FieldKind::Relation);
        assert_eq!(Field::Anniversary.kind(), FieldKind::Temporal);
        assert_eq!(ListField::Keywords.kind(), FieldKind::Freeform);
    }

    #[test]
    fn entity_forms_only_for_identities() {
        assert!(Field::FirstName.has_entity_forms());
        assert!(Field::CompanyShort.has_entity_forms());
        assert!(Field::PetName.has_entity_forms());
        assert!(!Field::JobTitle.has_entity_forms());
        assert!(!Field::Department.has_entity_forms());
        assert!(!Field::BirthYear.has_entity_forms());
    }

    #[test]
    fn keys_are_distinct() {
        let keys: std::collections::BTreeSet<_> = Field::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys.len(), Field::ALL.len());
    }

    #[test]
    fn parse_profile_toml() {
        let profile = Profile::from_toml_str(
            r#"
first_name = "Alice"
birth_year = 1990
interests = ["chess", "hiking"]
"#,
        )
        .unwrap();
        assert_eq!(profile.get(Field::FirstName), Some("Alice"));
        assert_eq!(profile.get(Field::BirthYear), Some("1990"));
        assert_eq!(profile.list(ListField::Interests), ["chess", "hiking"]);
    }

    #[test]
    fn unknown_field_is_error() {
        let result = Profile::from_toml_str(r#"middle_name = "Jane""#);
        let err = result.unwrap_err();
        assert!(matches!(err, ProfileError::Toml(_)));
        assert!(err.to_string().contains("middle_name"));
    }

    #[test]
    fn list_field_must_be_array() {
        let result = Profile::from_toml_str(r#"keywords = "acme""#);
        assert!(matches!(result, Err(ProfileError::Toml(_))));
    }

    #[test]
    fn blank_file_values_are_absent() {
        let profile = Profile::from_toml_str("nickname = \"  \"\nkeywords = [\"\", \"rover\"]\n")
            .unwrap();
        assert_eq!(profile.get(Field::Nickname), None);
        assert_eq!(profile.list(ListField::Keywords), ["rover"]);
    }

    #[test]
    fn toml_output_follows_field_order() {
        let profile = Profile::builder()
            .set(Field::PetName, "Rex")
            .set(Field::FirstName, "Alice")
            .build();
        let text = profile.to_toml_string().unwrap();
        let first = text.find("first_name").unwrap();
        let pet = text.find("pet_name").unwrap();
        assert!(first < pet);
    }

    #[test]
    fn invalid_toml_is_error() {
        let result = Profile::from_toml_str("first_name = [[[");
        assert!(matches!(result, Err(ProfileError::Toml(_))));
    }

    #[test]
    fn stock_template_parses_to_empty_profile() {
        let profile = Profile::from_toml_str(stock_profile_toml()).unwrap();
        assert!(profile.is_empty());
    }

    #[test]
    fn toml_output_reloads_to_same_profile() {
        let profile = Profile::builder()
            .set(Field::FirstName, "Alice")
            .set(Field::CompanyShort, "ACME")
            .list(ListField::Keywords, ["rover"])
            .build();
        let text = profile.to_toml_string().unwrap();
        assert_eq!(Profile::from_toml_str(&text).unwrap(), profile);
    }

    #[test]
    fn load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("target.toml");
        fs::write(&path, "last_name = \"Smith\"\n").unwrap();
        let profile = Profile::load(&path).unwrap();
        assert_eq!(profile.get(Field::LastName), Some("Smith"));
    }

    #[test]
    fn split_list_trims_and_drops_empty() {
        assert_eq!(split_list("chess, hiking,, "), vec!["chess", "hiking"]);
        assert!(split_list("").is_empty());
    }
}

//! Interactive collector: asks the operator for generation settings and
//! profile facts.
//!
//! The question flow is fixed:
//!
//! ```text
//! count / min length / max length
//! first name, last name, nickname, birth year
//! [company?]   company name, short name, job title, department
//! [people?]    pet, spouse/partner, child
//! [dates?]     birth date, anniversary
//! interests (comma separated), keywords (comma separated)
//! ```
//!
//! After a wordlist is written, [`collect_hydra_request`] optionally asks
//! for a target and service to compose a `hydra` command.
//!
//! Prompting goes through the [`Prompter`] trait. [`TerminalPrompter`] uses
//! `dialoguer`; tests drive the same flow with scripted answers.

use thiserror::Error;
use tracing::warn;

use crate::config::{ConfigAdjustment, GenerationSettings};
use crate::hydra::{FormSpec, Service};
use crate::profile::{Field, ListField, Profile, ProfileBuilder, split_list};

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("prompt failed: {0}")]
    Prompt(dialoguer::Error),
    #[error("input ended before all questions were answered")]
    Exhausted,
}

impl From<dialoguer::Error> for CollectError {
    /// A closed stdin (EOF) means the operator stopped answering.
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                CollectError::Exhausted
            }
            other => CollectError::Prompt(other),
        }
    }
}

/// Source of operator answers.
pub trait Prompter {
    /// Free-text answer. An empty string means "skip".
    fn text(&mut self, prompt: &str) -> Result<String, CollectError>;
    /// Yes/no answer, defaulting to no.
    fn confirm(&mut self, prompt: &str) -> Result<bool, CollectError>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn text(&mut self, prompt: &str) -> Result<String, CollectError> {
        let answer = dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, CollectError> {
        let answer = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}

/// Everything one interactive session produced.
#[derive(Debug, Clone)]
pub struct Collected {
    pub settings: GenerationSettings,
    /// Set when a numeric answer was not an integer and defaults were used.
    pub adjustment: Option<ConfigAdjustment>,
    pub profile: Profile,
}

const COMPANY_FIELDS: [(Field, &str); 4] = [
    (Field::CompanyName, "Company/Organization name"),
    (Field::CompanyShort, "Company short name/abbreviation"),
    (Field::JobTitle, "Job title/position"),
    (Field::Department, "Department"),
];

const PEOPLE_FIELDS: [(Field, &str); 3] = [
    (Field::PetName, "Pet name (Enter to skip)"),
    (Field::SpouseName, "Spouse/Partner name (Enter to skip)"),
    (Field::ChildName, "Child's name (Enter to skip)"),
];

const DATE_FIELDS: [(Field, &str); 2] = [
    (Field::BirthDate, "Birth date, DDMMYYYY (Enter to skip)"),
    (Field::Anniversary, "Anniversary, DDMMYYYY (Enter to skip)"),
];

/// Numeric question; an empty answer takes `default`.
fn answer_or(
    prompter: &mut dyn Prompter,
    question: &str,
    default: i64,
) -> Result<String, CollectError> {
    let answer = prompter.text(&format!("{question} (default: {default})"))?;
    if answer.trim().is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

/// Ask for generation settings only.
///
/// Empty answers keep the configured values. A non-integer answer resets
/// all three numbers to the stock defaults.
pub fn collect_settings(
    prompter: &mut dyn Prompter,
    defaults: &GenerationSettings,
) -> Result<(GenerationSettings, Option<ConfigAdjustment>), CollectError> {
    let count = answer_or(
        prompter,
        "How many candidates do you need?",
        defaults.target_count,
    )?;
    let min = answer_or(prompter, "Minimum length?", defaults.min_length)?;
    let max = answer_or(prompter, "Maximum length?", defaults.max_length)?;
    let (mut settings, adjustment) = GenerationSettings::from_text(&count, &min, &max);
    settings.apply_prefixes = defaults.apply_prefixes;
    settings.seed = defaults.seed;
    Ok((settings, adjustment))
}

fn ask_fields(
    prompter: &mut dyn Prompter,
    mut builder: ProfileBuilder,
    fields: &[(Field, &str)],
) -> Result<ProfileBuilder, CollectError> {
    for &(field, prompt) in fields {
        builder = builder.set(field, prompter.text(prompt)?);
    }
    Ok(builder)
}

/// Ask for profile facts only.
pub fn collect_profile(prompter: &mut dyn Prompter) -> Result<Profile, CollectError> {
    let mut builder = ask_fields(
        prompter,
        Profile::builder(),
        &[
            (Field::FirstName, "First name"),
            (Field::LastName, "Last name"),
            (Field::Nickname, "Nickname/Username (Enter to skip)"),
            (Field::BirthYear, "Birth year, YYYY (Enter to skip)"),
        ],
    )?;

    if prompter.confirm("Include company/organization information?")? {
        builder = ask_fields(prompter, builder, &COMPANY_FIELDS)?;
    }
    if prompter.confirm("Include additional people (pet, partner, child)?")? {
        builder = ask_fields(prompter, builder, &PEOPLE_FIELDS)?;
    }
    if prompter.confirm("Include important dates?")? {
        builder = ask_fields(prompter, builder, &DATE_FIELDS)?;
    }

    let interests = prompter.text("Interests/Hobbies (comma separated, Enter to skip)")?;
    let keywords = prompter.text("Additional keywords (comma separated, Enter to skip)")?;
    Ok(builder
        .list(ListField::Interests, split_list(&interests))
        .list(ListField::Keywords, split_list(&keywords))
        .build())
}

/// Full session: settings first, then the profile.
pub fn collect(
    prompter: &mut dyn Prompter,
    defaults: &GenerationSettings,
) -> Result<Collected, CollectError> {
    let (settings, adjustment) = collect_settings(prompter, defaults)?;
    let profile = collect_profile(prompter)?;
    Ok(Collected {
        settings,
        adjustment,
        profile,
    })
}

/// Where and how to point `hydra`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydraRequest {
    pub target: String,
    pub service: Service,
    pub form: Option<FormSpec>,
}

/// Offer to prepare a `hydra` command. `None` when declined or when the
/// service choice is not on the menu.
pub fn collect_hydra_request(
    prompter: &mut dyn Prompter,
) -> Result<Option<HydraRequest>, CollectError> {
    if !prompter.confirm("Prepare hydra command for testing?")? {
        return Ok(None);
    }
    let target = prompter.text("Target IP/hostname")?;
    let menu: Vec<String> = Service::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect();
    let choice = prompter.text(&format!("Select service ({})", menu.join(", ")))?;
    let Some(service) = Service::from_choice(&choice) else {
        warn!("Invalid service selection: {choice:?}");
        return Ok(None);
    };
    let form = if service.needs_form() {
        Some(FormSpec {
            path: prompter.text("HTTP form path (e.g. /login.php)")?,
            params: prompter.text("Form parameters (e.g. user=^USER^&pass=^PASS^)")?,
            failure: prompter.text("Failure string (text shown when login fails)")?,
        })
    } else {
        None
    };
    Ok(Some(HydraRequest {
        target: target.trim().to_string(),
        service,
        form,
    }))
}

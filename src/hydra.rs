//! Username derivation and `hydra` command composition.
//!
//! Nothing here runs `hydra`. The composer writes a username list next to
//! the wordlist and returns the command line for the operator to review.
//!
//! ```text
//! hydra -L <users> -P <wordlist> <target> <service>[:"path:params:fail"] -t 4 -V
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::case::{initial, lower};
use crate::persist::write_lines;
use crate::profile::{Field, Profile};

/// Appended when the profile yields fewer than [`MIN_DERIVED_USERNAMES`].
pub const COMMON_USERNAMES: [&str; 8] = [
    "admin",
    "administrator",
    "root",
    "user",
    "guest",
    "test",
    "support",
    "sysadmin",
];

pub const MIN_DERIVED_USERNAMES: usize = 3;

/// Parallel tasks passed to `hydra -t`.
const TASKS: u32 = 4;

#[derive(Error, Debug)]
pub enum HydraError {
    #[error("wordlist not found: {}", .0.display())]
    MissingWordlist(PathBuf),
    #[error("http-post-form needs a form path, parameters and a failure string")]
    MissingForm,
    #[error("writing username list failed: {0}")]
    Io(#[from] io::Error),
}

/// Services the composer knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Service {
    Ssh,
    Ftp,
    HttpPostForm,
    Smb,
}

impl Service {
    /// Menu order used by the interactive chooser.
    pub const ALL: [Service; 4] = [Service::Ssh, Service::Ftp, Service::HttpPostForm, Service::Smb];

    pub fn name(self) -> &'static str {
        match self {
            Service::Ssh => "ssh",
            Service::Ftp => "ftp",
            Service::HttpPostForm => "http-post-form",
            Service::Smb => "smb",
        }
    }

    /// Service for a 1-based menu choice.
    pub fn from_choice(choice: &str) -> Option<Service> {
        let index: usize = choice.trim().parse().ok()?;
        index.checked_sub(1).and_then(|i| Service::ALL.get(i).copied())
    }

    pub fn needs_form(self) -> bool {
        self == Service::HttpPostForm
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Login form description for `http-post-form`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
    /// e.g. `/login.php`
    pub path: String,
    /// e.g. `user=^USER^&pass=^PASS^`
    pub params: String,
    /// Text that appears on a failed login.
    pub failure: String,
}

/// Likely usernames for the profile, deduplicated in first-seen order.
pub fn derive_usernames(profile: &Profile) -> Vec<String> {
    let first = profile.get(Field::FirstName);
    let last = profile.get(Field::LastName);

    let mut names = Vec::new();
    if let Some(first) = first {
        names.push(lower(first));
    }
    if let Some(last) = last {
        names.push(lower(last));
    }
    if let (Some(first), Some(last)) = (first, last) {
        names.push(format!("{}{}", lower(first), lower(last)));
        if let Some(i) = initial(first) {
            names.push(format!("{i}{}", lower(last)));
        }
    }
    if let Some(nick) = profile.get(Field::Nickname) {
        names.push(lower(nick));
    }

    if names.len() < MIN_DERIVED_USERNAMES {
        names.extend(COMMON_USERNAMES.iter().map(|s| s.to_string()));
    }

    let mut seen = std::collections::HashSet::new();
    names.retain(|name| seen.insert(name.clone()));
    names
}

/// The `hydra` command line.
pub fn compose_command(
    users: &Path,
    wordlist: &Path,
    target: &str,
    service: Service,
    form: Option<&FormSpec>,
) -> Result<String, HydraError> {
    let service_arg = match (service, form) {
        (Service::HttpPostForm, Some(form)) => format!(
            "{service}:\"{}:{}:{}\"",
            form.path, form.params, form.failure
        ),
        (Service::HttpPostForm, None) => return Err(HydraError::MissingForm),
        (service, _) => service.to_string(),
    };
    Ok(format!(
        "hydra -L {} -P {} {target} {service_arg} -t {TASKS} -V",
        users.display(),
        wordlist.display()
    ))
}

/// A prepared invocation.
#[derive(Debug, Clone)]
pub struct HydraPlan {
    pub usernames: Vec<String>,
    pub users_path: PathBuf,
    pub command: String,
}

/// Check the wordlist exists, write the username list and compose the command.
pub fn prepare(
    profile: &Profile,
    wordlist: &Path,
    users_path: &Path,
    target: &str,
    service: Service,
    form: Option<&FormSpec>,
) -> Result<HydraPlan, HydraError> {
    if !wordlist.exists() {
        return Err(HydraError::MissingWordlist(wordlist.to_path_buf()));
    }
    let command = compose_command(users_path, wordlist, target, service, form)?;
    let usernames = derive_usernames(profile);
    write_lines(users_path, &usernames)?;
    info!(
        "Username list saved to {} with {} usernames",
        users_path.display(),
        usernames.len()
    );
    Ok(HydraPlan {
        usernames,
        users_path: users_path.to_path_buf(),
        command,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn full_name_and_nickname() {
        let profile = Profile::builder()
            .set(Field::FirstName, "Alice")
            .set(Field::LastName, "Smith")
            .set(Field::Nickname, "Ace")
            .build();
        assert_eq!(
            derive_usernames(&profile),
            vec!["alice", "smith", "alicesmith", "asmith", "ace"]
        );
    }

    #[test]
    fn sparse_profile_gets_common_names() {
        let profile = Profile::builder().set(Field::FirstName, "Bob").build();
        let names = derive_usernames(&profile);
        assert_eq!(names[0], "bob");
        assert_eq!(&names[1..], COMMON_USERNAMES);
    }

    #[test]
    fn empty_profile_is_only_common_names() {
        assert_eq!(derive_usernames(&Profile::default()), COMMON_USERNAMES);
    }

    #[test]
    fn duplicates_removed_in_order() {
        let profile = Profile::builder()
            .set(Field::FirstName, "Root")
            .set(Field::Nickname, "root")
            .build();
        let names = derive_usernames(&profile);
        assert_eq!(names.iter().filter(|n| *n == "root").count(), 1);
        assert_eq!(names[0], "root");
        assert_eq!(names.len(), COMMON_USERNAMES.len());
    }

    #[test]
    fn three_derived_names_skip_common_list() {
        let names = derive_usernames(&alice_profile());
        assert_eq!(names, vec!["alice", "smith", "alicesmith", "asmith"]);
    }

    #[test]
    fn menu_choices() {
        assert_eq!(Service::from_choice("1"), Some(Service::Ssh));
        assert_eq!(Service::from_choice(" 3 "), Some(Service::HttpPostForm));
        assert_eq!(Service::from_choice("4"), Some(Service::Smb));
        assert_eq!(Service::from_choice("0"), None);
        assert_eq!(Service::from_choice("5"), None);
        assert_eq!(Service::from_choice("ssh"), None);
    }

    #[test]
    fn ssh_command() {
        let cmd = compose_command(
            Path::new("users.txt"),
            Path::new("wordlist.txt"),
            "10.0.0.5",
            Service::Ssh,
            None,
        )
        .unwrap();
        assert_eq!(cmd, "hydra -L users.txt -P wordlist.txt 10.0.0.5 ssh -t 4 -V");
    }

    #[test]
    fn form_command_quotes_form_spec() {
        let form = FormSpec {
            path: "/login.php".into(),
            params: "user=^USER^&pass=^PASS^".into(),
            failure: "Invalid".into(),
        };
        let cmd = compose_command(
            Path::new("u.txt"),
            Path::new("w.txt"),
            "host",
            Service::HttpPostForm,
            Some(&form),
        )
        .unwrap();
        assert_eq!(
            cmd,
            "hydra -L u.txt -P w.txt host http-post-form:\"/login.php:user=^USER^&pass=^PASS^:Invalid\" -t 4 -V"
        );
    }

    #[test]
    fn form_service_without_form_is_error() {
        let result = compose_command(
            Path::new("u"),
            Path::new("w"),
            "host",
            Service::HttpPostForm,
            None,
        );
        assert!(matches!(result, Err(HydraError::MissingForm)));
    }

    #[test]
    fn prepare_requires_wordlist() {
        let tmp = TempDir::new().unwrap();
        let result = prepare(
            &alice_profile(),
            &tmp.path().join("missing.txt"),
            &tmp.path().join("users.txt"),
            "host",
            Service::Ftp,
            None,
        );
        assert!(matches!(result, Err(HydraError::MissingWordlist(_))));
        assert!(!tmp.path().join("users.txt").exists());
    }

    #[test]
    fn prepare_writes_usernames() {
        let tmp = TempDir::new().unwrap();
        let wordlist = tmp.path().join("wordlist.txt");
        fs::write(&wordlist, "alice1990\n").unwrap();
        let users = tmp.path().join("users.txt");
        let plan = prepare(&alice_profile(), &wordlist, &users, "host", Service::Smb, None).unwrap();
        assert_eq!(
            fs::read_to_string(&users).unwrap(),
            "alice\nsmith\nalicesmith\nasmith\n"
        );
        assert!(plan.command.ends_with("host smb -t 4 -V"));
        assert_eq!(plan.usernames.len(), 4);
    }
}

use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use git2::{Cred, CredentialType, IndexAddOption, PushOptions, RemoteCallbacks, Repository, Signature, Time};
use log::{debug, warn};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Credential lookups libgit2 may attempt before the push is abandoned.
const MAX_CREDENTIAL_ATTEMPTS: u32 = 3;

/// Failures while mutating the working copy or talking to its remote.
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path {0} escapes the working copy")]
    OutsideWorkdir(PathBuf),

    #[error("repository at {0} has no working directory")]
    Bare(PathBuf),

    #[error("push rejected: {0}")]
    PushRejected(String),
}

pub type Result<T> = std::result::Result<T, VcsError>;

/// The operations the batch executor needs from a working copy.
///
/// Failures come back as values so a single bad commit only fails its date.
pub trait VersionControl {
    /// Root of the working copy.
    fn workdir(&self) -> &Path;

    /// Write `content` to a path relative to the working copy, creating parents.
    fn write_file(&mut self, relative: &Path, content: &str) -> Result<()> {
        let full = resolve(self.workdir(), relative)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|source| VcsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&full, content).map_err(|source| VcsError::Write { path: full, source })
    }

    fn stage(&mut self, relative: &Path) -> Result<()>;

    /// Record a commit of the staged changes, returning its id.
    fn commit(
        &mut self,
        message: &str,
        author_time: NaiveDateTime,
        committer_time: NaiveDateTime,
    ) -> Result<String>;

    fn push(&mut self) -> Result<()>;
}

/// Join `relative` onto `root`, refusing absolute paths and `..` segments.
pub fn resolve(root: &Path, relative: &Path) -> Result<PathBuf> {
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(VcsError::OutsideWorkdir(relative.to_path_buf()));
    }
    Ok(root.join(relative))
}

/// Convert a wall-clock time in the local zone into a git timestamp.
pub fn git_time(at: NaiveDateTime) -> Time {
    match Local.from_local_datetime(&at).earliest() {
        Some(local) => Time::new(local.timestamp(), local.offset().local_minus_utc() / 60),
        // Skipped by a DST transition; record it as UTC
        None => Time::new(Utc.from_utc_datetime(&at).timestamp(), 0),
    }
}

/// A git working copy driven through libgit2.
pub struct GitRepository {
    repo: Repository,
    workdir: PathBuf,
    remote: String,
    token: Option<String>,
}

impl GitRepository {
    /// Open an existing non-bare repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::open(path.as_ref())?;
        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| VcsError::Bare(path.as_ref().to_path_buf()))?;

        Ok(Self {
            repo,
            workdir,
            remote: "origin".to_string(),
            token: None,
        })
    }

    /// Push to a remote other than `origin`.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Token offered when the remote asks for a username and password.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    fn signature(&self, at: NaiveDateTime) -> Result<Signature<'static>> {
        // Name and email come from git config; the time is ours
        let configured = self.repo.signature()?;
        let name = String::from_utf8_lossy(configured.name_bytes()).into_owned();
        let email = String::from_utf8_lossy(configured.email_bytes()).into_owned();
        Ok(Signature::new(&name, &email, &git_time(at))?)
    }

    fn current_branch_ref(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.name()
            .map(str::to_string)
            .ok_or_else(|| VcsError::Git(git2::Error::from_str("HEAD is not a valid UTF-8 reference")))
    }
}

impl VersionControl for GitRepository {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn stage(&mut self, relative: &Path) -> Result<()> {
        let mut index = self.repo.index()?;
        if self.workdir.join(relative).is_dir() {
            index.add_all([relative], IndexAddOption::DEFAULT, None)?;
        } else {
            index.add_path(relative)?;
        }
        index.write()?;
        Ok(())
    }

    fn commit(
        &mut self,
        message: &str,
        author_time: NaiveDateTime,
        committer_time: NaiveDateTime,
    ) -> Result<String> {
        let author = self.signature(author_time)?;
        let committer = self.signature(committer_time)?;

        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        // An unborn HEAD means this is the first commit
        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &author, &committer, message, &tree, &parents)?;
        debug!("Created commit {} dated {}", oid, author_time);
        Ok(oid.to_string())
    }

    fn push(&mut self) -> Result<()> {
        let refname = self.current_branch_ref()?;
        let refspec = format!("{refname}:{refname}");
        let mut remote = self.repo.find_remote(&self.remote)?;

        let token = self.token.clone();
        let mut attempts = 0;
        let mut rejection: Option<String> = None;
        {
            let mut callbacks = RemoteCallbacks::new();
            callbacks.credentials(move |url, username, allowed| {
                attempts += 1;
                if attempts > MAX_CREDENTIAL_ATTEMPTS {
                    return Err(git2::Error::from_str("authentication failed"));
                }
                if allowed.contains(CredentialType::SSH_KEY) {
                    return Cred::ssh_key_from_agent(username.unwrap_or("git"));
                }
                if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
                    if let Some(token) = &token {
                        return Cred::userpass_plaintext("x-access-token", token);
                    }
                    let config = git2::Config::open_default()?;
                    return Cred::credential_helper(&config, url, username);
                }
                Cred::default()
            });
            callbacks.push_update_reference(|reference, status| {
                if let Some(message) = status {
                    rejection = Some(format!("{reference}: {message}"));
                }
                Ok(())
            });

            let mut options = PushOptions::new();
            options.remote_callbacks(callbacks);
            remote.push(&[refspec.as_str()], Some(&mut options))?;
        }

        match rejection {
            Some(reason) => {
                warn!("Remote '{}' rejected {}", self.remote, reason);
                Err(VcsError::PushRejected(reason))
            }
            None => Ok(()),
        }
    }
}

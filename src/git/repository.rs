use crate::error::{AffirmError, Result};
use git2::{Cred, CredentialType, FetchOptions, RemoteCallbacks, Repository as Git2Repo};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Wrapper around git2::Repository with our tag source interface
pub struct Git2TagRepository {
    repo: Mutex<Git2Repo>,
    token: Option<String>,
}

impl Git2TagRepository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2TagRepository {
            repo: Mutex::new(repo),
            token: None,
        }
    }

    /// Use an access token for HTTPS remotes
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    fn repo(&self) -> Result<MutexGuard<'_, Git2Repo>> {
        self.repo
            .lock()
            .map_err(|_| AffirmError::tag("Repository lock poisoned"))
    }

    fn remote_callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                if let Some(token) = self.token.as_deref() {
                    return Cred::userpass_plaintext("x-access-token", token);
                }
            }

            if allowed_types.contains(CredentialType::SSH_KEY) {
                let username = username_from_url.unwrap_or("git");
                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }

                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }

            Cred::default()
        });
        callbacks
    }
}

impl super::TagRepository for Git2TagRepository {
    fn fetch_tags(&self, remote: &str) -> Result<()> {
        let repo = self.repo()?;
        let mut remote_handle = repo
            .find_remote(remote)
            .map_err(|e| AffirmError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(self.remote_callbacks());

        remote_handle
            .fetch(&["+refs/tags/*:refs/tags/*"], Some(&mut fetch_options), None)
            .map_err(|e| {
                AffirmError::remote(format!("Failed to fetch tags from '{}': {}", remote, e))
            })?;

        Ok(())
    }

    fn list_tags(&self, pattern: &str) -> Result<Vec<String>> {
        let repo = self.repo()?;
        let tags = repo
            .tag_names(Some(pattern))
            .map_err(|e| AffirmError::tag(format!("Cannot list tags '{}': {}", pattern, e)))?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }
}

/// Tag source standing in for a path that could not be opened as a repository
///
/// Every operation reports the open error, so the collector records
/// it as a warning and resolution starts from the default version.
pub struct UnavailableRepository {
    reason: String,
}

impl UnavailableRepository {
    pub fn new(error: &git2::Error) -> Self {
        UnavailableRepository {
            reason: error.message().to_string(),
        }
    }

    fn error(&self) -> AffirmError {
        AffirmError::Git(git2::Error::from_str(&self.reason))
    }
}

impl super::TagRepository for UnavailableRepository {
    fn fetch_tags(&self, _remote: &str) -> Result<()> {
        Err(self.error())
    }

    fn list_tags(&self, _pattern: &str) -> Result<Vec<String>> {
        Err(self.error())
    }
}

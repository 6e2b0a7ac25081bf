//! Remote resource addressing for synchronization.
//!
//! A [`Locator`] names where task data lives: either a standard
//! `scheme://[user@]host[:port]/path` address, an SCP-style
//! `[user@]host:path` address (implied `ssh`), or a plain local path.

use thiserror::Error;

use crate::config::ConfigLookup;

/// Errors raised while parsing a sync address.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocatorError {
    /// The address looked remote but had no host/path split.
    #[error("could not parse \"{input}\"")]
    Unparseable {
        /// The address that failed to parse.
        input: String,
    },
}

/// A parsed sync address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// Scheme, e.g. `ssh` or `rsync`. `None` for local paths.
    pub protocol: Option<String>,

    /// User component, when given as `user@host`.
    pub user: Option<String>,

    /// Host name. `None` for local paths.
    pub host: Option<String>,

    /// Port component of a standard-form address.
    pub port: Option<String>,

    /// Path on the target (or the whole address, for local paths).
    pub path: String,
}

impl Locator {
    /// Parses a sync address.
    ///
    /// Local paths (no `://` and no `:`) parse as-is. Standard-form
    /// addresses split on the first `/` after the scheme; SCP-form
    /// addresses split on `:` and imply the `ssh` protocol.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Unparseable`] when a remote-looking address
    /// has no path separator after the host part.
    pub fn parse(input: &str) -> Result<Locator, LocatorError> {
        if !input.contains("://") && !input.contains(':') {
            return Ok(Locator {
                protocol: None,
                user: None,
                host: None,
                port: None,
                path: input.to_string(),
            });
        }

        let (protocol, rest, path_delimiter) = match input.find("://") {
            Some(pos) => (input[..pos].to_string(), &input[pos + 3..], '/'),
            // SCP-like syntax: [user@]host:path/to/data
            None => ("ssh".to_string(), input, ':'),
        };

        let (host_part, path) = rest
            .split_once(path_delimiter)
            .ok_or_else(|| LocatorError::Unparseable {
                input: input.to_string(),
            })?;

        let (user, host_port) = match host_part.split_once('@') {
            Some((user, host)) => (Some(user.to_string()), host),
            None => (None, host_part),
        };

        // A ':' in the host part only survives in standard-form addresses;
        // the SCP form already consumed it as the path delimiter.
        let (host, port) = match host_port.split_once(':') {
            Some((host, port)) => (host.to_string(), Some(port.to_string())),
            None => (host_port.to_string(), None),
        };

        Ok(Locator {
            protocol: Some(protocol),
            user,
            host: Some(host),
            port,
            path: path.to_string(),
        })
    }

    /// Resolves a configured alias before parsing.
    ///
    /// A non-empty `input` is looked up as `<prefix>.<input>.uri`; an empty
    /// one falls back to `<prefix>.default.uri`. When neither key is set the
    /// input passes through unchanged.
    pub fn expand_alias(input: &str, prefix: &str, config: &dyn ConfigLookup) -> String {
        let key = if input.is_empty() {
            format!("{}.default.uri", prefix)
        } else {
            format!("{}.{}.uri", prefix, input)
        };

        match config.get(&key) {
            Some(uri) if !uri.is_empty() => uri,
            _ => input.to_string(),
        }
    }

    /// True when the address is a plain local path.
    pub fn is_local(&self) -> bool {
        self.protocol.is_none()
    }

    /// The final path component, or the whole path if it has no `/`.
    pub fn name(&self) -> &str {
        match self.path.rfind('/') {
            Some(slash) => &self.path[slash + 1..],
            None => &self.path,
        }
    }

    /// Everything before the final path component, or `""`.
    pub fn parent(&self) -> &str {
        match self.path.rfind('/') {
            Some(slash) => &self.path[..slash],
            None => "",
        }
    }

    /// The path extension after the final `.`, or `""`.
    pub fn extension(&self) -> &str {
        match self.path.rfind('.') {
            Some(dot) => &self.path[dot + 1..],
            None => "",
        }
    }

    /// True when the path names a directory rather than a file.
    pub fn is_directory(&self) -> bool {
        self.path.is_empty() || self.path == "." || self.path.ends_with('/')
    }

    /// Appends a segment to a directory path. Returns false (and leaves the
    /// path untouched) when the path names a file.
    pub fn append(&mut self, segment: &str) -> bool {
        if self.is_directory() {
            self.path.push_str(segment);
            true
        } else {
            false
        }
    }
}

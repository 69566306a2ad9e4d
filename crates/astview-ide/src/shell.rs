use astview_compiler::ResolveError;

use crate::{Config, Session, SessionState};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShellState {
    Inactive,
    /// No compiler could be resolved; the panel stays off for good.
    Unavailable,
    NoDocument,
    WithDocument,
}

/// Lifecycle of the panel backend: started once, then either serving a
/// [`Session`] or permanently unavailable.
#[derive(Default)]
pub enum Shell {
    #[default]
    Inactive,
    Unavailable(ResolveError),
    Active(Box<Session>),
}

impl Shell {
    /// Resolves the compiler named by `config`. Only the first call
    /// resolves; later calls return the outcome of that one.
    pub fn activate(&mut self, config: &Config) -> Result<&mut Session, &ResolveError> {
        if matches!(self, Self::Inactive) {
            *self = match astview_compiler::resolve(&config.compiler) {
                Ok(compiler) => {
                    tracing::info!(
                        compiler = %config.compiler,
                        reparse = ?config.reparse,
                        "syntax tree view active"
                    );
                    Self::Active(Box::new(Session::with_config(compiler, config)))
                }
                Err(error) => {
                    tracing::error!(%error, "syntax tree view unavailable");
                    Self::Unavailable(error)
                }
            };
        }

        match self {
            Self::Active(session) => Ok(session.as_mut()),
            Self::Unavailable(error) => Err(&*error),
            Self::Inactive => unreachable!("resolution always leaves the inactive state"),
        }
    }

    pub fn state(&self) -> ShellState {
        match self {
            Self::Inactive => ShellState::Inactive,
            Self::Unavailable(_) => ShellState::Unavailable,
            Self::Active(session) => match session.state() {
                SessionState::NoDocument => ShellState::NoDocument,
                SessionState::WithDocument => ShellState::WithDocument,
            },
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Active(session) => Some(session.as_ref()),
            Self::Inactive | Self::Unavailable(_) => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            Self::Active(session) => Some(session.as_mut()),
            Self::Inactive | Self::Unavailable(_) => None,
        }
    }
}

use std::error::Error;
use std::fmt;

use crate::workers::pool::PoolError;

#[derive(Debug)]
pub enum EngineError {
    Pool(PoolError),
    Spawn(std::io::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool(err) => write!(f, "failed to start worker pool: {}", err),
            Self::Spawn(err) => write!(f, "failed to spawn render coordinator: {}", err),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pool(err) => Some(err),
            Self::Spawn(err) => Some(err),
        }
    }
}

impl From<PoolError> for EngineError {
    fn from(err: PoolError) -> Self {
        Self::Pool(err)
    }
}
